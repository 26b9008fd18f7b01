//! Store capability bitsets.
//!
//! Bit values match the host cache layer's constants so records can be handed
//! over without translation.

use crate::constants::CacheMode;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Features a store plugin supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreFeatures(pub u32);

impl StoreFeatures {
    pub const DATA_GUARANTEE: StoreFeatures = StoreFeatures(1);
    pub const NATIVE_TTL: StoreFeatures = StoreFeatures(2);
    pub const SEARCHABLE: StoreFeatures = StoreFeatures(4);
    pub const MULTIPLE_IDENTIFIERS: StoreFeatures = StoreFeatures(8);
    pub const DEREFERENCES_OBJECTS: StoreFeatures = StoreFeatures(16);

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: StoreFeatures) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for StoreFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Cache modes a store plugin can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeSet(pub u32);

impl ModeSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self::from_modes(&CacheMode::ALL)
    }

    pub fn from_modes(modes: &[CacheMode]) -> Self {
        Self(modes.iter().fold(0, |acc, mode| acc | mode.bit()))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn supports(&self, mode: CacheMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Modes in this set, in application/session/request order
    pub fn modes(&self) -> Vec<CacheMode> {
        CacheMode::ALL
            .into_iter()
            .filter(|mode| self.supports(*mode))
            .collect()
    }
}

impl BitOr for ModeSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<CacheMode> for ModeSet {
    fn from(mode: CacheMode) -> Self {
        Self(mode.bit())
    }
}
