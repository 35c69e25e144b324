// Bit layout of an encoded date (MSB to LSB):
//
//   | 31..16 | 15..12 | 11..7 | 6     | 5..0     |
//   | year   | month  | day   | upper | reserved |
//
// The sign of the whole word carries the era.

/// Clears every bit of a word.
pub const RESET_TIME: u32 = 0x0000_0000;
/// Keeps everything but the year field.
pub const RESET_YEAR: u32 = 0x0000_ffff;
/// Keeps everything but the month field.
pub const RESET_MONTH: u32 = 0xffff_0fff;
/// Keeps everything but the day field.
pub const RESET_DAY: u32 = 0xffff_f07f;

/// Selects the year field.
pub const GET_YEAR: u32 = 0xffff_0000;
/// Selects the month field.
pub const GET_MONTH: u32 = 0x0000_f000;
/// Selects the day field.
pub const GET_DAY: u32 = 0x0000_0f80;

/// High bit of the word. Coincides with the sign of a negated (BCE) word.
pub const BCE_FLAG: u32 = 0x8000_0000;
/// Marks a date as the upper bound of a range.
pub const UPPER_FLAG: u32 = 0x0000_0040;
/// Bits not used by this crate. Always written as zero.
pub const RESERVED_BITS: u32 = 0x0000_003f;

pub(crate) const YEAR_SHIFT: u32 = 16;
pub(crate) const MONTH_SHIFT: u32 = 12;
pub(crate) const DAY_SHIFT: u32 = 7;

pub(crate) const YEAR_WIDTH_MASK: u32 = 0xffff;
pub(crate) const MONTH_WIDTH_MASK: u32 = 0xf;
pub(crate) const DAY_WIDTH_MASK: u32 = 0x1f;

/// Largest year magnitude that encodes without touching bit 31.
/// The year field is 16 bits wide but the sign of the word is reserved for the era.
pub const MAX_YEAR: u16 = 0x7fff;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Last day of the longest month
pub const MAX_DAY: u8 = 31;

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

/// Minimum number of digits a year is padded to on output
pub const YEAR_PAD_WIDTH: usize = 4;
/// Maximum number of digits accepted for a month or a day
pub const MAX_MONTH_DAY_DIGITS: usize = 2;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separates the lower and upper date of a range
pub const RANGE_SEPARATOR: char = ',';

/// Era marker for dates before the common era
pub const ERA_BCE: &str = "BCE";
/// Era marker for the common era, accepted on input and never written
pub const ERA_CE: &str = "CE";

/// Name of the era flag
pub const FLAG_BCE: &str = "bce";
/// Name of the range boundary flag
pub const FLAG_UPPER: &str = "upper";
