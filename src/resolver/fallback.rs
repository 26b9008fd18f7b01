//! # Fallback Controller
//!
//! Single point of recovery for resolution failures. A bad rule file must
//! never leave the host without a working cache configuration: on any error
//! the controller records it and tells the host to use its native
//! configuration mechanism instead.

use super::assembler::ConfigProvider;
use super::diagnostics::{DiagnosticRecord, DiagnosticSlot};
use crate::error::ResolutionError;
use crate::logging::log_error;
use crate::models::Configuration;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a resolution attempt as seen by the host
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Resolved(Configuration),
    /// Resolution failed; the error is in the diagnostic slot
    UseNativeConfiguration,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        match self {
            Self::Resolved(configuration) => Some(configuration),
            Self::UseNativeConfiguration => None,
        }
    }

    pub fn into_configuration(self) -> Option<Configuration> {
        match self {
            Self::Resolved(configuration) => Some(configuration),
            Self::UseNativeConfiguration => None,
        }
    }
}

pub struct FallbackController {
    provider: Box<dyn ConfigProvider>,
    diagnostics: Arc<DiagnosticSlot>,
}

impl fmt::Debug for FallbackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackController")
            .field("inclusion_errors", &self.provider.inclusion_errors())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl FallbackController {
    /// Wrap a provider, recording failures in the process-level slot
    pub fn new<P: ConfigProvider + 'static>(provider: P) -> Self {
        Self::with_diagnostics(provider, DiagnosticSlot::global())
    }

    /// Wrap a provider, recording failures in the given slot
    pub fn with_diagnostics<P: ConfigProvider + 'static>(
        provider: P,
        diagnostics: Arc<DiagnosticSlot>,
    ) -> Self {
        Self {
            provider: Box::new(provider),
            diagnostics,
        }
    }

    /// Resolve a configuration, degrading to the native path on any error
    pub fn resolve_with_fallback(&mut self) -> ResolutionOutcome {
        match self.provider.load() {
            Ok(configuration) => {
                for error in self.provider.inclusion_errors() {
                    warn!(error = %error, "Definition excluded from rule resolution");
                }
                info!(
                    site_identifier = %configuration.site_identifier,
                    "Rule-based cache configuration resolved"
                );
                ResolutionOutcome::Resolved(configuration)
            }
            Err(error) => {
                self.record_failure(&error);
                ResolutionOutcome::UseNativeConfiguration
            }
        }
    }

    fn record_failure(&self, error: &ResolutionError) {
        warn!(
            kind = error.kind(),
            error = %error,
            "Cache rule resolution failed, falling back to native configuration"
        );
        log_error(
            "FallbackController",
            "resolve_with_fallback",
            &error.to_string(),
            Some(error.kind()),
        );
        self.diagnostics.record(error);
    }

    /// Last recorded failure message; reading clears it
    pub fn last_resolution_error(&self) -> Option<String> {
        self.diagnostics.take_message()
    }

    /// Last recorded failure with kind and timestamp; reading clears it
    pub fn take_last_record(&self) -> Option<DiagnosticRecord> {
        self.diagnostics.take()
    }

    /// Non-fatal problems from the most recent successful resolution
    pub fn inclusion_errors(&self) -> &[ResolutionError] {
        self.provider.inclusion_errors()
    }

    pub fn diagnostics(&self) -> &Arc<DiagnosticSlot> {
        &self.diagnostics
    }
}
