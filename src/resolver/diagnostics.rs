//! Diagnostic slot for the last resolution failure.
//!
//! Single writer (the fallback controller), read-and-clear for readers so a
//! stale error is never reported twice.

use crate::error::ResolutionError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

static GLOBAL_SLOT: OnceLock<Arc<DiagnosticSlot>> = OnceLock::new();

/// A recorded resolution failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub kind: String,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&ResolutionError> for DiagnosticRecord {
    fn from(error: &ResolutionError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
            recorded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticSlot {
    last: Mutex<Option<DiagnosticRecord>>,
}

impl DiagnosticSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-level slot shared by every controller that does not bring its own
    pub fn global() -> Arc<DiagnosticSlot> {
        GLOBAL_SLOT
            .get_or_init(|| Arc::new(DiagnosticSlot::new()))
            .clone()
    }

    /// Record a failure, replacing any unread one
    pub fn record(&self, error: &ResolutionError) {
        *self.last.lock() = Some(DiagnosticRecord::from(error));
    }

    /// Take the last record, leaving the slot empty
    pub fn take(&self) -> Option<DiagnosticRecord> {
        self.last.lock().take()
    }

    /// Take the last error message, leaving the slot empty
    pub fn take_message(&self) -> Option<String> {
        self.take().map(|record| record.message)
    }

    /// Whether an unread record is present
    pub fn has_record(&self) -> bool {
        self.last.lock().is_some()
    }
}
