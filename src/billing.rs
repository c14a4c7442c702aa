//! Tiered parking fees.
//!
//! A stay is billed in whole days at the day cap plus a remainder billed
//! in quarter-hour intervals: the first hour at the base quarter price, each
//! later interval at the higher price, the remainder never exceeding one day
//! cap. Stays crossing the end of February in a leap year then get one day
//! cap back per leap year crossed.

use serde::{Deserialize, Serialize};

use crate::{
    Amount, FEBRUARY, FIRST_HOUR_QUARTERS, LedgerError, LedgerResult, MINUTES_PER_DAY,
    QUARTER_HOUR_MINUTES, Timestamp, elapsed_minutes, types::is_leap_year,
};

/// Prices of one facility. Always positive and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateFields")]
pub struct RateSchedule {
    per_quarter_hour:                  Amount,
    per_quarter_hour_after_first_hour: Amount,
    per_day_cap:                       Amount,
}

#[derive(Deserialize)]
struct RateFields {
    per_quarter_hour:                  Amount,
    per_quarter_hour_after_first_hour: Amount,
    per_day_cap:                       Amount,
}

impl TryFrom<RateFields> for RateSchedule {
    type Error = LedgerError;

    fn try_from(fields: RateFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.per_quarter_hour,
            fields.per_quarter_hour_after_first_hour,
            fields.per_day_cap,
        )
    }
}

impl RateSchedule {
    /// # Errors
    /// Returns `LedgerError::InvalidSchedule` unless
    /// `0 < per_quarter_hour < per_quarter_hour_after_first_hour < per_day_cap`.
    pub fn new(
        per_quarter_hour: Amount,
        per_quarter_hour_after_first_hour: Amount,
        per_day_cap: Amount,
    ) -> LedgerResult<Self> {
        if !per_quarter_hour.is_positive() {
            return Err(LedgerError::InvalidSchedule(format!(
                "quarter-hour price {per_quarter_hour} must be positive"
            )));
        }
        if per_quarter_hour_after_first_hour <= per_quarter_hour {
            return Err(LedgerError::InvalidSchedule(format!(
                "after-first-hour price {per_quarter_hour_after_first_hour} must exceed {per_quarter_hour}"
            )));
        }
        if per_day_cap <= per_quarter_hour_after_first_hour {
            return Err(LedgerError::InvalidSchedule(format!(
                "day cap {per_day_cap} must exceed {per_quarter_hour_after_first_hour}"
            )));
        }
        Ok(Self {
            per_quarter_hour,
            per_quarter_hour_after_first_hour,
            per_day_cap,
        })
    }

    pub const fn per_quarter_hour(&self) -> Amount {
        self.per_quarter_hour
    }

    pub const fn per_quarter_hour_after_first_hour(&self) -> Amount {
        self.per_quarter_hour_after_first_hour
    }

    pub const fn per_day_cap(&self) -> Amount {
        self.per_day_cap
    }

    /// Cost of the partial day, capped at one day
    fn remainder_cost(&self, quarter_intervals: u64) -> Amount {
        let first_hour = quarter_intervals.min(FIRST_HOUR_QUARTERS);
        let later = quarter_intervals.saturating_sub(FIRST_HOUR_QUARTERS);
        // Every price is positive, so a cost past i64 is past the cap as well
        self.per_quarter_hour
            .checked_mul(first_hour)
            .zip(self.per_quarter_hour_after_first_hour.checked_mul(later))
            .and_then(|(first, rest)| first.checked_add(rest))
            .map_or(self.per_day_cap, |cost| cost.min(self.per_day_cap))
    }
}

/// Every intermediate of a fee computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub total_minutes:     u64,
    pub whole_days:        u64,
    pub quarter_intervals: u64,
    pub remainder_cost:    Amount,
    pub leap_days:         u64,
    pub total:             Amount,
}

/// Leap years whose February the stay is counted as crossing.
///
/// A leap year counts when the stay starts in it no later than February (or
/// started in an earlier year) and ends in it after February (or ends in a
/// later year).
pub fn leap_days_between(entry: &Timestamp, exit: &Timestamp) -> u64 {
    let (first, last) = (entry.year(), exit.year());
    let counted = (first..=last)
        .filter(|&year| is_leap_year(year))
        .filter(|&year| year > first || entry.month() <= FEBRUARY)
        .filter(|&year| year < last || exit.month() > FEBRUARY)
        .count();
    counted as u64
}

/// Breaks down the fee for a stay from `entry` to `exit`.
///
/// # Errors
/// Returns `LedgerError::InvalidInterval` if `exit` is before `entry`, and
/// `LedgerError::FeeOverflow` if the total does not fit in an `Amount`.
pub fn quote(schedule: &RateSchedule, entry: &Timestamp, exit: &Timestamp) -> LedgerResult<FeeQuote> {
    if !exit.is_after_or_equal(entry) {
        return Err(LedgerError::InvalidInterval {
            entry: *entry,
            exit:  *exit,
        });
    }

    let total_minutes = elapsed_minutes(entry, exit);
    let whole_days = total_minutes / MINUTES_PER_DAY;
    let quarter_intervals = (total_minutes % MINUTES_PER_DAY).div_ceil(QUARTER_HOUR_MINUTES);
    let remainder_cost = schedule.remainder_cost(quarter_intervals);
    let leap_days = leap_days_between(entry, exit);

    // Not clamped: a short stay crossing February can come out negative
    let day_cap = schedule.per_day_cap;
    let total = day_cap
        .checked_mul(whole_days)
        .and_then(|days| days.checked_add(remainder_cost))
        .zip(day_cap.checked_mul(leap_days))
        .and_then(|(gross, credit)| gross.checked_sub(credit))
        .ok_or(LedgerError::FeeOverflow {
            entry: *entry,
            exit:  *exit,
        })?;

    Ok(FeeQuote {
        total_minutes,
        whole_days,
        quarter_intervals,
        remainder_cost,
        leap_days,
        total,
    })
}

/// Fee for a stay from `entry` to `exit`.
///
/// # Errors
/// Same as [`quote`].
pub fn compute_fee(schedule: &RateSchedule, entry: &Timestamp, exit: &Timestamp) -> LedgerResult<Amount> {
    quote(schedule, entry, exit).map(|quote| quote.total)
}
