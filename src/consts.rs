/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Maximum valid hour of day
pub const MAX_HOUR: u8 = 23;

/// Maximum valid minute of hour
pub const MAX_MINUTE: u8 = 59;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;
pub const DAYS_PER_COMMON_YEAR: u64 = 365;

/// Length of one billing interval in minutes
pub const QUARTER_HOUR_MINUTES: u64 = 15;
/// Intervals billed at the base quarter-hour price before the higher rate kicks in
pub const FIRST_HOUR_QUARTERS: u64 = 4;

/// Date component separator (`DD-MM-YYYY`)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator (`HH:MM`)
pub const TIME_SEPARATOR: char = ':';
/// Separator between the date and time parts of a timestamp
pub const DATE_TIME_SEPARATOR: char = ' ';

/// Number of `-`-separated pairs in a license plate
pub const PLATE_PAIRS: usize = 3;
/// Characters per plate pair
pub const PLATE_PAIR_LEN: usize = 2;
/// Plate pair separator
pub const PLATE_SEPARATOR: char = '-';

/// Default upper bound on simultaneously registered facilities
pub const DEFAULT_MAX_FACILITIES: usize = 20;
/// Default number of vehicles a record store is pre-sized for
pub const DEFAULT_STORE_CAPACITY: usize = 500;

pub const CENTS_PER_UNIT: i64 = 100;
/// Fractional digits kept when parsing an amount
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;
