//! Bit-packed 32-bit encoding of a calendar date.
//!
//! A date is packed as `year << 16 | month << 12 | day << 7 | upper << 6`,
//! and the whole word is negated for dates before the common era. The
//! encoding is the persisted form of a [`Date`](crate::Date), so it must stay
//! stable: see [`encode`] and [`decode`].
//!
//! Nothing in here validates calendar dates. Fields wider than their slot
//! are truncated; callers validate first.

use serde::{Deserialize, Serialize};

use crate::consts::{
    BCE_FLAG, DAY_SHIFT, DAY_WIDTH_MASK, GET_DAY, GET_MONTH, GET_YEAR, MAX_YEAR, MONTH_SHIFT,
    MONTH_WIDTH_MASK, RESET_DAY, RESET_MONTH, RESET_TIME, RESET_YEAR, UPPER_FLAG, YEAR_SHIFT,
    YEAR_WIDTH_MASK,
};

/// The all-zero word. Decodes to year 0, month 0, day 0 with no flags set.
pub const EMPTY: i32 = 0;

/// Error returned by [`encode_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The year would set bit 31 and collide with the era sign.
    #[error("Year {0} overflows the encoding (must be 0-{MAX_YEAR})")]
    YearOverflow(u16),
}

/// The unpacked fields of an encoded word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fields {
    pub year:  u16,
    pub month: u8,
    pub day:   u8,
    pub bce:   bool,
    pub upper: bool,
}

impl Fields {
    /// True for the all-zero sentinel.
    pub const fn is_empty(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0 && !self.bce && !self.upper
    }

    /// Packs these fields. See [`encode`].
    pub const fn encode(&self) -> i32 {
        encode(self.year, self.month, self.day, self.bce, self.upper)
    }
}

impl From<i32> for Fields {
    fn from(word: i32) -> Self {
        decode(word)
    }
}

impl From<Fields> for i32 {
    fn from(fields: Fields) -> Self {
        fields.encode()
    }
}

#[inline]
const fn to_bits(word: i32) -> u32 {
    word.cast_unsigned()
}

#[inline]
const fn from_bits(bits: u32) -> i32 {
    bits.cast_signed()
}

/// Returns the zero word.
pub const fn clear(word: i32) -> i32 {
    from_bits(to_bits(word) & RESET_TIME)
}

/// Replaces the year field.
pub const fn set_year(word: i32, year: u16) -> i32 {
    from_bits((to_bits(word) & RESET_YEAR) | ((year as u32 & YEAR_WIDTH_MASK) << YEAR_SHIFT))
}

/// Replaces the month field. Only the low four bits of `month` are kept.
pub const fn set_month(word: i32, month: u8) -> i32 {
    from_bits((to_bits(word) & RESET_MONTH) | ((month as u32 & MONTH_WIDTH_MASK) << MONTH_SHIFT))
}

/// Replaces the day field. Only the low five bits of `day` are kept.
pub const fn set_day(word: i32, day: u8) -> i32 {
    from_bits((to_bits(word) & RESET_DAY) | ((day as u32 & DAY_WIDTH_MASK) << DAY_SHIFT))
}

/// Packs a date into a word.
///
/// The upper flag is bit 6. A BCE date is the arithmetic negation of the
/// same CE date, so `encode(y, m, d, true, u) == -encode(y, m, d, false, u)`.
///
/// Years above [`MAX_YEAR`] land in bit 31 and wrap; use [`encode_checked`]
/// to reject them.
pub const fn encode(year: u16, month: u8, day: u8, bce: bool, upper: bool) -> i32 {
    let mut w = clear(EMPTY);
    w = set_year(w, year);
    w = set_month(w, month);
    w = set_day(w, day);

    if upper {
        w = from_bits(to_bits(w) | UPPER_FLAG);
    }

    if bce { w.wrapping_neg() } else { w }
}

/// Like [`encode`] but fails instead of letting the year reach bit 31.
///
/// # Errors
/// Returns `EncodeError::YearOverflow` if `year > MAX_YEAR`.
pub const fn encode_checked(
    year: u16,
    month: u8,
    day: u8,
    bce: bool,
    upper: bool,
) -> Result<i32, EncodeError> {
    if year > MAX_YEAR {
        return Err(EncodeError::YearOverflow(year));
    }
    Ok(encode(year, month, day, bce, upper))
}

/// Unpacks a word. Never fails: out-of-calendar fields decode as they are.
pub const fn decode(word: i32) -> Fields {
    let bce = word < 0;
    let magnitude = word.unsigned_abs();

    Fields {
        year: ((magnitude & GET_YEAR) >> YEAR_SHIFT) as u16,
        month: ((magnitude & GET_MONTH) >> MONTH_SHIFT) as u8,
        day: ((magnitude & GET_DAY) >> DAY_SHIFT) as u8,
        bce,
        upper: magnitude & UPPER_FLAG != 0,
    }
}

/// True if the word encodes a BCE date.
pub const fn is_bce(word: i32) -> bool {
    to_bits(word) & BCE_FLAG != 0
}

/// True if the word is marked as an upper range bound.
pub const fn is_upper(word: i32) -> bool {
    word.unsigned_abs() & UPPER_FLAG != 0
}
