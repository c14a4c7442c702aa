//! Ledger configuration
//!
//! Capacity limits for the registry and its record stores.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_FACILITIES, DEFAULT_STORE_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Facilities that may be registered at the same time
    pub max_facilities: usize,
    /// Distinct vehicles each record store is pre-sized for; stores still grow past it
    pub store_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_facilities: DEFAULT_MAX_FACILITIES,
            store_capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

impl LedgerConfig {
    pub const fn with_max_facilities(self, max_facilities: usize) -> Self {
        Self {
            max_facilities,
            ..self
        }
    }

    pub const fn with_store_capacity(self, store_capacity: usize) -> Self {
        Self {
            store_capacity,
            ..self
        }
    }
}
