//! Historical dates, ranges and periods for cultural-heritage cataloguing.
//!
//! Every [`Date`] packs into a single `i32` (see [`codec`]) in the layout
//! used by CIDOC-CRM time primitives: year, month and day in bit fields, a
//! bit marking the upper bound of a range, and the sign of the word for the
//! era. Dates before the common era are the negation of the same CE date.
//!
//! ```
//! use cidoc_date::{Date, Range};
//!
//! let date: Date = "500-01-01 BCE".parse().unwrap();
//! assert_eq!(date.to_string(), "0500-01-01 BCE");
//! assert!(date.as_int() < 0);
//!
//! let war: Range = "1914-07-28,1918-11-11".parse().unwrap();
//! assert!(war.upper().is_upper());
//! assert_eq!(war.to_string(), "1914-07-28,1918-11-11");
//! ```

#[macro_use]
mod logging;

pub mod codec;
mod consts;
mod flags;
mod period;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use codec::{EncodeError, Fields};
pub use consts::*;
pub use flags::{FlagError, FlagKey, Flags};
pub use period::Period;
pub use range::{Range, RangeError};
pub use types::{Day, Month, Year, days_in_month, is_leap_year, validate_ymd};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A single day of the proleptic Gregorian calendar, in either era.
///
/// The [`Flags`] travel with the date: `bce` selects the era and `upper`
/// records that the date closes a [`Range`]. A date never sets `upper` on
/// itself; [`Range::new`] stamps it.
///
/// Equality and hashing include the `upper` flag, as [`Date::as_int`] does;
/// [`Date::cmp_chronological`] ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
    flags: Flags,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Malformed date: {_0:?}")]
    MalformedInput(String),
    #[display(fmt = "Invalid year: {} (must be 0-{})", "_0", MAX_YEAR)]
    InvalidYear(u32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: u16, month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

impl Date {
    /// Creates a lower-bound date after checking it against the calendar.
    ///
    /// # Errors
    /// Returns `ParseError` if the year exceeds `MAX_YEAR` or the day does
    /// not exist in the given month.
    pub fn new(year: u16, month: u8, day: u8, bce: bool) -> Result<Self, ParseError> {
        let (year, month, day) = validate_ymd(year, month, day)?;
        Ok(Self::from_parts(year, month, day, Flags::new(bce, false)))
    }

    /// Assembles a date from components that are already validated.
    pub const fn from_parts(year: Year, month: Month, day: Day, flags: Flags) -> Self {
        Self {
            year,
            month,
            day,
            flags,
        }
    }

    /// Decodes a packed word, restoring both flags.
    ///
    /// # Errors
    /// Returns `ParseError::MalformedInput` if reserved bits are set, and the
    /// calendar errors of [`Date::new`] if the fields are not a real date
    /// (this includes the empty word).
    pub fn from_int(word: i32) -> Result<Self, ParseError> {
        if word.unsigned_abs() & RESERVED_BITS != 0 {
            return Err(ParseError::MalformedInput(format!("{word:#010x}")));
        }
        let fields = codec::decode(word);
        let (year, month, day) = validate_ymd(fields.year, fields.month, fields.day)?;
        Ok(Self::from_parts(year, month, day, Flags::new(fields.bce, fields.upper)))
    }

    /// Returns the year magnitude. Read it together with [`Date::is_bce`].
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn flags(&self) -> Flags {
        self.flags
    }

    pub const fn is_bce(&self) -> bool {
        self.flags.bce()
    }

    pub const fn is_upper(&self) -> bool {
        self.flags.upper()
    }

    /// Returns a copy of this date with the range boundary flag replaced.
    #[must_use]
    pub const fn with_upper(self, upper: bool) -> Self {
        Self {
            flags: self.flags.with(FlagKey::Upper, upper),
            ..self
        }
    }

    /// Unpacked form of this date.
    pub const fn fields(&self) -> Fields {
        Fields {
            year:  self.year(),
            month: self.month(),
            day:   self.day(),
            bce:   self.is_bce(),
            upper: self.is_upper(),
        }
    }

    /// Packs this date. Total, because `Year` never exceeds `MAX_YEAR`.
    pub const fn as_int(&self) -> i32 {
        self.fields().encode()
    }

    /// Orders dates on the time line, ignoring the `upper` flag.
    ///
    /// BCE years count backwards, so 500 BCE comes before 400 BCE, which
    /// comes before any CE date. Within a year, months and days run forward
    /// in both eras.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        self.timeline_key().cmp(&other.timeline_key())
    }

    fn timeline_key(&self) -> (i32, bool, u8, u8) {
        let year = i32::from(self.year());
        let signed = if self.is_bce() { -year } else { year };
        // (year 0 BCE sorts before year 0 CE)
        (signed, !self.is_bce(), self.month(), self.day())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}{sep}{:02}{sep}{:02}",
            self.year(),
            self.month(),
            self.day(),
            width = YEAR_PAD_WIDTH,
            sep = DATE_SEPARATOR,
        )?;
        if self.is_bce() {
            write!(f, " {ERA_BCE}")?;
        }
        Ok(())
    }
}

/// Parses `YEARS-MM-DD` with an optional `BCE`/`CE` era, case-insensitive,
/// separated from the date by at most one whitespace character.
impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso_with_era(s).map_err(|err| {
            trace!("rejected date {s:?}: {err}");
            err
        })
    }
}

impl Date {
    fn parse_iso_with_era(s: &str) -> Result<Self, ParseError> {
        let (body, bce) = Self::split_era(s);
        let malformed = || ParseError::MalformedInput(s.to_owned());

        let parts: Vec<&str> = body.split(DATE_SEPARATOR).collect();
        let &[year, month, day] = parts.as_slice() else {
            return Err(malformed());
        };

        if !Self::is_digits(year, usize::MAX)
            || !Self::is_digits(month, MAX_MONTH_DAY_DIGITS)
            || !Self::is_digits(day, MAX_MONTH_DAY_DIGITS)
        {
            return Err(malformed());
        }

        // All digits, so the only way these fail is overflow
        let year_u32 = year.parse::<u32>().unwrap_or(u32::MAX);
        let month_u8 = month.parse::<u8>().map_err(|_| malformed())?;
        let day_u8 = day.parse::<u8>().map_err(|_| malformed())?;

        let year_u16 = u16::try_from(year_u32).map_err(|_| ParseError::InvalidYear(year_u32))?;
        Self::new(year_u16, month_u8, day_u8, bce)
    }

    /// Splits a trailing era marker and the single optional whitespace before it.
    fn split_era(s: &str) -> (&str, bool) {
        for (era, bce) in [(ERA_BCE, true), (ERA_CE, false)] {
            if let Some(body) = Self::strip_era(s, era) {
                let body = body.strip_suffix(|c: char| c.is_ascii_whitespace()).unwrap_or(body);
                return (body, bce);
            }
        }
        (s, false)
    }

    fn strip_era<'a>(s: &'a str, era: &str) -> Option<&'a str> {
        let split = s.len().checked_sub(era.len())?;
        let tail = s.get(split..)?;
        if tail.eq_ignore_ascii_case(era) {
            s.get(..split)
        } else {
            None
        }
    }

    fn is_digits(s: &str, max_len: usize) -> bool {
        !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        // Time line first, then lower bounds before upper bounds.
        match self.cmp_chronological(other) {
            Ordering::Equal => self.is_upper().cmp(&other.is_upper()),
            ord => ord,
        }
    }
}

impl TryFrom<i32> for Date {
    type Error = ParseError;

    fn try_from(word: i32) -> Result<Self, Self::Error> {
        Self::from_int(word)
    }
}

impl From<Date> for i32 {
    fn from(date: Date) -> Self {
        date.as_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bce, date};
    use proptest::prelude::*;

    #[test]
    fn test_parse_iso_date() {
        let d = "2001-09-11".parse::<Date>().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2001, 9, 11));
        assert!(!d.is_bce());
        assert!(!d.is_upper());
        assert_eq!(d.to_string(), "2001-09-11");
    }

    #[test]
    fn test_parse_bce_date() {
        let d = "500-01-01 BCE".parse::<Date>().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (500, 1, 1));
        assert!(d.is_bce());
        assert!(!d.is_upper());
        assert_eq!(d.to_string(), "0500-01-01 BCE");
    }

    #[test]
    fn test_parse_era_variants() {
        struct TestCase {
            input:       &'static str,
            bce:         bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "1066-10-14 CE",
                bce:         false,
                description: "explicit CE",
            },
            TestCase {
                input:       "1066-10-14ce",
                bce:         false,
                description: "lowercase CE without space",
            },
            TestCase {
                input:       "44-03-15 bce",
                bce:         true,
                description: "lowercase BCE",
            },
            TestCase {
                input:       "44-03-15BcE",
                bce:         true,
                description: "mixed case BCE without space",
            },
            TestCase {
                input:       "44-03-15\tBCE",
                bce:         true,
                description: "tab before era",
            },
        ];

        for case in &cases {
            let d = case
                .input
                .parse::<Date>()
                .unwrap_or_else(|e| panic!("failed to parse {} ({}): {e}", case.input, case.description));
            assert_eq!(d.is_bce(), case.bce, "era mismatch for: {}", case.description);
        }
    }

    #[test]
    fn test_parse_malformed() {
        let inputs = [
            "",
            "bogus",
            "2001",
            "2001-09",
            "2001-09-11-01",
            "-09-11",
            "2001--11",
            "2001-009-11",
            "2001-09-011",
            "2001/09/11",
            " 2001-09-11",
            "2001-09-11 ",
            "2001-09-11  BCE",
            "2001-09-11 AD",
            "2001-09-11 BC",
            "+2001-09-11",
            "2001-0x-11",
            "BCE",
        ];

        for input in inputs {
            let result = input.parse::<Date>();
            assert!(
                matches!(result, Err(ParseError::MalformedInput(_))),
                "expected MalformedInput for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_parse_single_digit_components() {
        let d = "1-2-3".parse::<Date>().unwrap();
        assert_eq!(d.to_string(), "0001-02-03");
    }

    #[test]
    fn test_parse_invalid_calendar_dates() {
        assert!(matches!(
            "2021-02-29".parse::<Date>(),
            Err(ParseError::InvalidCalendarDate {
                year:  2021,
                month: 2,
                day:   29,
            })
        ));
        assert!(matches!(
            "1900-02-29".parse::<Date>(),
            Err(ParseError::InvalidCalendarDate { .. })
        ));
        assert!(matches!(
            "2001-04-31".parse::<Date>(),
            Err(ParseError::InvalidCalendarDate { .. })
        ));
        assert!(matches!(
            "2001-09-00".parse::<Date>(),
            Err(ParseError::InvalidCalendarDate { .. })
        ));
        assert!(matches!("2001-13-01".parse::<Date>(), Err(ParseError::InvalidMonth(13))));
        assert!(matches!("2001-00-01".parse::<Date>(), Err(ParseError::InvalidMonth(0))));

        assert!("2000-02-29".parse::<Date>().is_ok());
    }

    #[test]
    fn test_parse_year_limits() {
        let d = "0000-01-01".parse::<Date>().unwrap();
        assert_eq!(d.year(), 0);

        let d = "12345-06-07".parse::<Date>().unwrap();
        assert_eq!(d.to_string(), "12345-06-07");

        let d = "32767-12-31 BCE".parse::<Date>().unwrap();
        assert_eq!(d.year(), MAX_YEAR);

        assert!(matches!("32768-01-01".parse::<Date>(), Err(ParseError::InvalidYear(32768))));
        assert!(matches!("65536-01-01".parse::<Date>(), Err(ParseError::InvalidYear(65536))));
        assert!(matches!(
            "99999999999999999999-01-01".parse::<Date>(),
            Err(ParseError::InvalidYear(u32::MAX))
        ));
    }

    #[test]
    fn test_parse_leading_zeros_normalize() {
        let d = "00002001-9-1".parse::<Date>().unwrap();
        assert_eq!(d.to_string(), "2001-09-01");
    }

    #[test]
    fn test_display() {
        assert_eq!(date(2001, 9, 11).to_string(), "2001-09-11");
        assert_eq!(date(33, 4, 3).to_string(), "0033-04-03");
        assert_eq!(bce(44, 3, 15).to_string(), "0044-03-15 BCE");
        assert_eq!(date(10000, 1, 1).to_string(), "10000-01-01");
        // The upper flag never shows up in text.
        assert_eq!(date(2001, 9, 11).with_upper(true).to_string(), "2001-09-11");
    }

    #[test]
    fn test_new_defaults_to_lower_bound() {
        let d = Date::new(1970, 1, 1, false).unwrap();
        assert!(!d.is_upper());
        assert_eq!(d.flags(), Flags::default());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(date(1970, 1, 1).as_int(), 0x07B2_1080);
        assert_eq!(date(1970, 1, 1).with_upper(true).as_int(), 0x07B2_10C0);
        assert_eq!(bce(44, 3, 15).as_int(), -0x002C_3780);
    }

    #[test]
    fn test_from_int_restores_flags() {
        let d = Date::from_int(-0x002C_37C0).unwrap();
        assert_eq!(d, bce(44, 3, 15).with_upper(true));
        assert!(d.is_bce());
        assert!(d.is_upper());
    }

    #[test]
    fn test_from_int_rejects_non_dates() {
        assert!(matches!(Date::from_int(codec::EMPTY), Err(ParseError::InvalidMonth(0))));

        let feb_30 = codec::encode(2000, 2, 30, false, false);
        assert!(matches!(
            Date::from_int(feb_30),
            Err(ParseError::InvalidCalendarDate { .. })
        ));

        let reserved = date(2000, 1, 1).as_int() | 0x1;
        assert!(matches!(Date::from_int(reserved), Err(ParseError::MalformedInput(_))));

        // Bit 31 on a positive-looking year: the sign wins and 0x8000 is too large.
        assert!(matches!(Date::from_int(i32::MIN), Err(ParseError::InvalidYear(32768))));
    }

    #[test]
    fn test_chronological_order() {
        let ordered = [
            bce(500, 1, 1),
            bce(500, 12, 31),
            bce(44, 3, 15),
            bce(1, 12, 31),
            bce(0, 6, 1),
            date(0, 1, 1),
            date(1, 1, 1),
            date(1066, 10, 14),
            date(2001, 9, 11),
        ];

        for pair in ordered.windows(2) {
            assert_eq!(
                pair[0].cmp_chronological(&pair[1]),
                Ordering::Less,
                "{} should precede {}",
                pair[0],
                pair[1]
            );
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_ordering_upper_flag_breaks_ties() {
        let lower = date(1914, 7, 28);
        let upper = lower.with_upper(true);
        assert_eq!(lower.cmp_chronological(&upper), Ordering::Equal);
        assert!(lower < upper);
        assert_ne!(lower, upper);
        assert_ne!(lower.as_int(), upper.as_int());
    }

    #[test]
    fn test_serde_as_int() {
        let d = bce(44, 3, 15);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, (-0x002C_3780).to_string());

        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        let result: Result<Date, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::MalformedInput("bogus".to_owned()).to_string(),
            r#"Malformed date: "bogus""#
        );
        assert_eq!(
            ParseError::InvalidCalendarDate {
                year:  2021,
                month: 2,
                day:   29,
            }
            .to_string(),
            "Invalid calendar date 2021-02-29"
        );
        assert_eq!(
            ParseError::InvalidYear(40000).to_string(),
            "Invalid year: 40000 (must be 0-32767)"
        );
    }

    fn valid_date() -> impl Strategy<Value = Date> {
        (0u16..=MAX_YEAR, 1u8..=12, any::<bool>(), any::<bool>()).prop_flat_map(|(y, m, bce, upper)| {
            (1u8..=days_in_month(y, m).unwrap_or(1)).prop_map(move |d| {
                Date::new(y, m, d, bce)
                    .expect("strategy only yields calendar dates")
                    .with_upper(upper)
            })
        })
    }

    proptest! {
        #[test]
        fn property_text_round_trip(d in valid_date()) {
            let s = d.to_string();
            let parsed: Date = s.parse().expect("canonical text must parse");
            prop_assert_eq!(parsed.to_string(), s);
            prop_assert_eq!(parsed, d.with_upper(false));
        }

        #[test]
        fn property_int_round_trip(d in valid_date()) {
            prop_assert_eq!(Date::from_int(d.as_int()), Ok(d));
        }

        #[test]
        fn property_order_matches_text_within_ce(a in valid_date(), b in valid_date()) {
            prop_assume!(!a.is_bce() && !b.is_bce());
            let by_fields = (a.year(), a.month(), a.day()).cmp(&(b.year(), b.month(), b.day()));
            prop_assert_eq!(a.cmp_chronological(&b), by_fields);
        }
    }
}
