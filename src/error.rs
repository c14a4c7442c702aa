//! Error types
//!
//! `ClockError` covers calendar validation and timestamp parsing;
//! `LedgerError` covers every rejected facility, store, or billing operation.

use crate::{MAX_MONTH, MAX_YEAR, Timestamp, VehicleId};

/// Ledger result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Error type for calendar components and timestamp text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("Invalid year: {0} (must be 0-{max})", max = MAX_YEAR)]
    InvalidYear(u16),

    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    #[error("Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { day: u8, month: u8, year: u16 },

    #[error("Invalid hour: {0} (must be 0-23)")]
    InvalidHour(u8),

    #[error("Invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u8),

    #[error("Invalid date/time format: {0}")]
    InvalidFormat(String),
}

/// Every way a ledger operation can be rejected.
///
/// A rejected operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    InvalidTimestamp(#[from] ClockError),

    /// New event precedes the facility's last accepted event
    #[error("Out of order event: {at} is before last event {last_seen}")]
    OutOfOrderEvent { at: Timestamp, last_seen: Timestamp },

    #[error("{0}: vehicle already has an open stay")]
    DuplicateOpenStay(VehicleId),

    #[error("{0}: vehicle has no open stay")]
    NoOpenStay(VehicleId),

    #[error("{0}: parking is full")]
    Full(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u32),

    /// Prices must be positive and strictly increasing
    #[error("Invalid rate schedule: {0}")]
    InvalidSchedule(String),

    /// Exit strictly before entry
    #[error("Invalid interval: exit {exit} is before entry {entry}")]
    InvalidInterval { entry: Timestamp, exit: Timestamp },

    /// Fee beyond the representable amount
    #[error("Fee overflow: stay from {entry} to {exit} costs more than an amount can hold")]
    FeeOverflow { entry: Timestamp, exit: Timestamp },

    #[error("{0}: invalid licence plate")]
    InvalidPlate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0}: no such parking")]
    UnknownFacility(String),

    #[error("{0}: parking already exists")]
    FacilityExists(String),

    #[error("Too many parks (limit {0})")]
    TooManyFacilities(usize),
}

impl LedgerError {
    /// Emit the rejection at the level it deserves
    pub fn log(&self) {
        match self {
            Self::OutOfOrderEvent { at, last_seen } => {
                tracing::warn!(%at, %last_seen, "Rejected out of order event");
            }
            Self::DuplicateOpenStay(vehicle) => {
                tracing::warn!(%vehicle, "Rejected entry of vehicle already inside");
            }
            Self::NoOpenStay(vehicle) => {
                tracing::warn!(%vehicle, "Rejected exit of vehicle not inside");
            }
            Self::InvalidInterval { entry, exit } => {
                tracing::warn!(%entry, %exit, "Rejected billing of inverted interval");
            }
            Self::FeeOverflow { entry, exit } => {
                tracing::warn!(%entry, %exit, "Rejected billing of stay whose fee overflows");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger operation rejected");
            }
        }
    }
}
