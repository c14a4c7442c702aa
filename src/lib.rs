//! Parking facility ledger.
//!
//! Tracks vehicles entering and leaving a set of parking facilities, keeps
//! every stay per vehicle, and bills each completed stay with a tiered
//! quarter-hour / day-cap schedule on a proleptic Gregorian clock.
//!
//! ```
//! use park_ledger::{Amount, LedgerConfig, RateSchedule, Registry, Timestamp, VehicleId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = Registry::new(LedgerConfig::default());
//! let schedule = RateSchedule::new("1.00".parse()?, "1.50".parse()?, "10.00".parse()?)?;
//! registry.create("Saldanha", 100, schedule)?;
//!
//! let car = VehicleId::new("AA-00-AA")?;
//! registry.record_entry("Saldanha", &car, "01-01-2024 08:00".parse::<Timestamp>()?)?;
//! let stay = registry.record_exit("Saldanha", &car, "01-01-2024 09:15".parse()?)?;
//! assert_eq!(stay.fee(), Some(Amount::from_cents(550)));
//! # Ok(())
//! # }
//! ```

mod amount;
mod billing;
mod config;
mod consts;
mod error;
mod facility;
mod plate;
mod prelude;
mod registry;
mod store;
mod timestamp;
mod types;

pub use amount::Amount;
pub use billing::{FeeQuote, RateSchedule, compute_fee, leap_days_between, quote};
pub use config::LedgerConfig;
pub use consts::*;
pub use error::{ClockError, LedgerError, LedgerResult};
pub use facility::{Facility, FacilityId};
pub use plate::VehicleId;
pub use registry::{HistoryEntry, Registry};
pub use store::{DailyCharge, DailyRevenue, History, RecordStore, StayRecord};
pub use timestamp::{Date, TimeOfDay, Timestamp, elapsed_minutes, is_after_or_equal};
pub use types::{Day, Hour, Minute, Month, days_in_month, is_leap_year};

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{Amount, Date, RateSchedule, Timestamp, VehicleId};

    pub fn ts(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Timestamp {
        Timestamp::new(year, month, day, hour, minute).expect("test timestamp must be valid")
    }

    pub fn date(year: u16, month: u8, day: u8) -> Date {
        Date::new(year, month, day).expect("test date must be valid")
    }

    pub fn plate(text: &str) -> VehicleId {
        VehicleId::new(text).expect("test plate must be valid")
    }

    pub const fn cents(value: i64) -> Amount {
        Amount::from_cents(value)
    }

    pub fn schedule(per_quarter: i64, after_first_hour: i64, day_cap: i64) -> RateSchedule {
        RateSchedule::new(cents(per_quarter), cents(after_first_hour), cents(day_cap))
            .expect("test schedule must be valid")
    }
}
