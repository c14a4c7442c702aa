use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ClockError, DATE_SEPARATOR, DATE_TIME_SEPARATOR, DAYS_PER_COMMON_YEAR, MAX_YEAR,
    MINUTES_PER_DAY, MINUTES_PER_HOUR, TIME_SEPARATOR,
    types::{Day, Hour, Minute, Month, days_in_month, is_leap_year},
};

/// A calendar day, the grouping key of revenue reports.
/// Ordered chronologically and rendered as `DD-MM-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year:  u16,
    month: Month,
    day:   Day,
}

/// A minute-precision point in time on the proleptic Gregorian calendar.
///
/// Every field is validated on construction, so a `Timestamp` that exists is
/// always a real calendar minute. Field order makes the derived `Ord`
/// lexicographic over (year, month, day, hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    year:   u16,
    month:  Month,
    day:    Day,
    hour:   Hour,
    minute: Minute,
}

/// Hour and minute of a timestamp, rendered as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour:   Hour,
    minute: Minute,
}

fn validate_year(year: u16) -> Result<u16, ClockError> {
    if year > MAX_YEAR {
        return Err(ClockError::InvalidYear(year));
    }
    Ok(year)
}

fn parse_number<T: FromStr>(part: &str, whole: &str) -> Result<T, ClockError> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClockError::InvalidFormat(whole.to_owned()));
    }
    part.parse::<T>()
        .map_err(|_| ClockError::InvalidFormat(whole.to_owned()))
}

/// Days from 1 January of year 1 to 1 January of `year`
const fn days_before_year(year: u16) -> u64 {
    if year == 0 {
        return 0;
    }
    let past = (year - 1) as u64;
    past * DAYS_PER_COMMON_YEAR + past / 4 - past / 100 + past / 400
}

/// Days from 1 January of `year` to the first of `month`
fn days_before_month(month: Month, year: u16) -> u64 {
    (1..month.get())
        .map(|m| u64::from(days_in_month(m, year)))
        .sum()
}

impl Date {
    /// # Errors
    /// Returns the `ClockError` of the first field that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ClockError> {
        let year = validate_year(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month.get())?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Whole days since 1 January of year 1
    fn days_since_epoch(&self) -> u64 {
        days_before_year(self.year)
            + days_before_month(self.month, self.year)
            + u64::from(self.day.get() - 1)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for Date {
    type Err = ClockError;

    /// Parses `DD-MM-YYYY`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(ClockError::InvalidFormat(trimmed.to_owned()));
        };

        let day = parse_number::<u8>(day, trimmed)?;
        let month = parse_number::<u8>(month, trimmed)?;
        let year = parse_number::<u16>(year, trimmed)?;

        Self::new(year, month, day)
    }
}

impl TimeOfDay {
    /// # Errors
    /// Returns `ClockError::InvalidHour` or `ClockError::InvalidMinute`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockError> {
        Ok(Self {
            hour:   Hour::new(hour)?,
            minute: Minute::new(minute)?,
        })
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    fn minutes_since_midnight(self) -> u64 {
        u64::from(self.hour.get()) * MINUTES_PER_HOUR + u64::from(self.minute.get())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{TIME_SEPARATOR}{:02}", self.hour.get(), self.minute.get())
    }
}

impl FromStr for TimeOfDay {
    type Err = ClockError;

    /// Parses `HH:MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((hour, minute)) = trimmed.split_once(TIME_SEPARATOR) else {
            return Err(ClockError::InvalidFormat(trimmed.to_owned()));
        };

        let hour = parse_number::<u8>(hour, trimmed)?;
        let minute = parse_number::<u8>(minute, trimmed)?;

        Self::new(hour, minute)
    }
}

impl Timestamp {
    /// Creates a validated timestamp.
    ///
    /// # Errors
    /// Returns the `ClockError` of the first field that is out of range,
    /// checked in year, month, day, hour, minute order.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, ClockError> {
        let date = Date::new(year, month, day)?;
        let time = TimeOfDay::new(hour, minute)?;
        Ok(Self::from_parts(date, time))
    }

    /// Checks every field invariant, including the month-specific day bound
    pub fn is_valid(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> bool {
        Self::new(year, month, day, hour, minute).is_ok()
    }

    pub const fn from_parts(date: Date, time: TimeOfDay) -> Self {
        Self {
            year:   date.year,
            month:  date.month,
            day:    date.day,
            hour:   time.hour,
            minute: time.minute,
        }
    }

    /// Parses a `DD-MM-YYYY` date and an `HH:MM` time given separately
    ///
    /// # Errors
    /// Returns `ClockError::InvalidFormat` for malformed text, otherwise the
    /// error of the first out-of-range field.
    pub fn parse_parts(date: &str, time: &str) -> Result<Self, ClockError> {
        let date = date.parse::<Date>()?;
        let time = time.parse::<TimeOfDay>()?;
        Ok(Self::from_parts(date, time))
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub const fn date(&self) -> Date {
        Date {
            year:  self.year,
            month: self.month,
            day:   self.day,
        }
    }

    pub const fn time(&self) -> TimeOfDay {
        TimeOfDay {
            hour:   self.hour,
            minute: self.minute,
        }
    }

    /// Absolute minute count since 00:00 on 1 January of year 1
    pub fn minutes_since_epoch(&self) -> u64 {
        self.date().days_since_epoch() * MINUTES_PER_DAY + self.time().minutes_since_midnight()
    }

    /// Non-strict ordering: an identical minute counts as "after"
    pub fn is_after_or_equal(&self, other: &Self) -> bool {
        self >= other
    }
}

/// Absolute number of minutes between two timestamps, in either order.
///
/// Year 0 and year 1 both start at minute 0, so a span that reaches back
/// into year 0 is measured from the start of year 0 as if it were year 1:
/// `31-12-0000 00:00` is 525600 minutes from `01-01-0001 00:00`, while
/// `01-01-0000 00:00` is 0 minutes from it.
pub fn elapsed_minutes(a: &Timestamp, b: &Timestamp) -> u64 {
    a.minutes_since_epoch().abs_diff(b.minutes_since_epoch())
}

/// True when `a` is the same minute as `b` or later
pub fn is_after_or_equal(a: &Timestamp, b: &Timestamp) -> bool {
    a.is_after_or_equal(b)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DATE_TIME_SEPARATOR}{}", self.date(), self.time())
    }
}

impl FromStr for Timestamp {
    type Err = ClockError;

    /// Parses `DD-MM-YYYY HH:MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((date, time)) = trimmed.split_once(DATE_TIME_SEPARATOR) else {
            return Err(ClockError::InvalidFormat(trimmed.to_owned()));
        };
        Self::parse_parts(date, time)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
