//! Constructors shared by the unit tests.

use crate::{Date, Range};

/// A CE lower-bound date. Panics on invalid input.
pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day, false).expect("test date must be a calendar date")
}

/// A BCE lower-bound date. Panics on invalid input.
pub fn bce(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day, true).expect("test date must be a calendar date")
}

/// A range parsed from its two canonical endpoints. Panics on invalid input.
pub fn range(lower: &str, upper: &str) -> Range {
    format!("{lower},{upper}")
        .parse()
        .expect("test range must parse")
}
