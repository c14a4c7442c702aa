use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_HOUR, MAX_MINUTE, MAX_MONTH, MIN_DAY,
};
use crate::ClockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ClockError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ClockError> {
        let non_zero = NonZeroU8::new(value).ok_or(ClockError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ClockError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day-of-month value that was valid for the year and month it was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `ClockError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ClockError> {
        let invalid = ClockError::InvalidDay {
            day: value,
            month,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;

        if value > days_in_month(month, year) {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // No year/month context here, only the lower bound can be checked
        let invalid = ClockError::InvalidDay {
            day: value,
            month: 0,
            year: 0,
        };
        if value < MIN_DAY {
            return Err(invalid);
        }
        NonZeroU8::new(value).map(Self).ok_or(invalid)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Hour of day in `0..=23`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    /// # Errors
    /// Returns `ClockError::InvalidHour` if the value is > `MAX_HOUR`.
    pub const fn new(value: u8) -> Result<Self, ClockError> {
        if value > MAX_HOUR {
            return Err(ClockError::InvalidHour(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

/// Minute of hour in `0..=59`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `ClockError::InvalidMinute` if the value is > `MAX_MINUTE`.
    pub const fn new(value: u8) -> Result<Self, ClockError> {
        if value > MAX_MINUTE {
            return Err(ClockError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Minute {
    type Error = ClockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, or 0 when `month` is not in `1..=12`.
pub const fn days_in_month(month: u8, year: u16) -> u8 {
    if month == 0 || month > MAX_MONTH {
        return 0;
    }

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ClockError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ClockError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(ClockError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_display_is_zero_padded() {
        let month = Month::new(8).expect("august is a valid month");
        assert_eq!(month.to_string(), "08");
        assert_eq!(u8::from(month), 8);
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).expect("august is a valid month");
        let json = serde_json::to_string(&month).expect("failed to serialize month");
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).expect("failed to deserialize month");
        assert_eq!(month, parsed);

        let rejected: Result<Month, _> = serde_json::from_str("13");
        assert!(rejected.is_err());
    }

    #[test]
    fn test_day_new_valid() {
        // January - 31 days
        assert!(Day::new(1, 2024, 1).is_ok());
        assert!(Day::new(31, 2024, 1).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, 2023, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(30, 2024, 2).is_err());

        // April - 30 days
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
    }

    #[test]
    fn test_day_new_invalid() {
        assert!(matches!(Day::new(0, 2024, 1), Err(ClockError::InvalidDay { .. })));
        assert_eq!(
            Day::new(32, 2024, 1),
            Err(ClockError::InvalidDay {
                day: 32,
                month: 1,
                year: 2024
            })
        );
        // No days exist in a month that does not exist
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().expect("15 is a valid day");
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_hour_and_minute_bounds() {
        assert_eq!(Hour::new(0).map(Hour::get), Ok(0));
        assert_eq!(Hour::new(23).map(Hour::get), Ok(23));
        assert_eq!(Hour::new(24), Err(ClockError::InvalidHour(24)));

        assert_eq!(Minute::new(0).map(Minute::get), Ok(0));
        assert_eq!(Minute::new(59).map(Minute::get), Ok(59));
        assert_eq!(Minute::new(60), Err(ClockError::InvalidMinute(60)));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2020,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "year zero is divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2, 2000), 29, "Century year divisible by 400");
        assert_eq!(days_in_month(2, 1900), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
    }

    #[test]
    fn test_days_in_month_fixed_lengths() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(month, 2024), 31, "Month {month} should have 31 days");
        }
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(month, 2024), 30, "Month {month} should have 30 days");
        }
    }

    #[test]
    fn test_days_in_month_out_of_range_is_zero() {
        assert_eq!(days_in_month(0, 2024), 0);
        assert_eq!(days_in_month(13, 2024), 0);
    }
}
