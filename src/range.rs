use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Date, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive interval between two dates.
///
/// The lower date always has `upper == false` and the upper date always has
/// `upper == true`. The upper date may not be BCE when the lower date is CE,
/// and the lower date may not come after the upper date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{lower},{upper}")]
pub struct Range {
    lower: Date,
    upper: Date,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The input does not split into exactly two dates.
    #[error("Invalid range syntax (expected '<lower>,<upper>'): {0:?}")]
    InvalidRangeSyntax(String),

    /// CE lower bound with a BCE upper bound.
    #[error("Era mismatch: lower ({lower}) is CE but upper ({upper}) is BCE")]
    EraMismatch { lower: Date, upper: Date },

    /// Lower bound is after the upper bound within the same era.
    #[error("Invalid date range: lower ({lower}) is after upper ({upper})")]
    Inverted { lower: Date, upper: Date },

    /// Error parsing one of the two dates.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Range {
    /// Creates a range and stamps the boundary flag on both dates.
    ///
    /// # Errors
    /// Returns `RangeError::EraMismatch` if `lower` is CE and `upper` is BCE,
    /// or `RangeError::Inverted` if `lower` comes after `upper`.
    pub fn new(lower: Date, upper: Date) -> Result<Self, RangeError> {
        let lower = lower.with_upper(false);
        let upper = upper.with_upper(true);

        if upper.is_bce() && !lower.is_bce() {
            debug!("rejected range {lower},{upper}: era mismatch");
            return Err(RangeError::EraMismatch { lower, upper });
        }
        if lower.cmp_chronological(&upper) == Ordering::Greater {
            debug!("rejected range {lower},{upper}: lower after upper");
            return Err(RangeError::Inverted { lower, upper });
        }

        Ok(Self { lower, upper })
    }

    /// Rebuilds a range from its two packed dates.
    ///
    /// # Errors
    /// Returns `RangeError::Parse` if either word is not a valid date, and
    /// the errors of [`Range::new`].
    pub fn from_ints(lower: i32, upper: i32) -> Result<Self, RangeError> {
        Self::new(Date::from_int(lower)?, Date::from_int(upper)?)
    }

    /// Packs both dates: `(lower, upper)`.
    pub const fn to_ints(&self) -> (i32, i32) {
        (self.lower.as_int(), self.upper.as_int())
    }

    pub const fn lower(&self) -> Date {
        self.lower
    }

    pub const fn upper(&self) -> Date {
        self.upper
    }

    /// Returns both dates as a tuple
    pub const fn dates(&self) -> (Date, Date) {
        (self.lower, self.upper)
    }

    /// Checks if the range contains a given date (inclusive at both ends).
    pub fn contains(&self, date: &Date) -> bool {
        self.lower.cmp_chronological(date) != Ordering::Greater
            && date.cmp_chronological(&self.upper) != Ordering::Greater
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower.cmp_chronological(&other.upper) != Ordering::Greater
            && other.lower.cmp_chronological(&self.upper) != Ordering::Greater
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.contains(&self.lower) && other.contains(&self.upper)
    }
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(RANGE_SEPARATOR).collect();
        let &[lower, upper] = parts.as_slice() else {
            trace!("rejected range {s:?}: {} fields", parts.len());
            return Err(RangeError::InvalidRangeSyntax(s.to_owned()));
        };

        let lower = lower.parse::<Date>()?;
        let upper = upper.parse::<Date>()?;

        Self::new(lower, upper)
    }
}

impl PartialOrd for Range {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Range {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare lower dates first, then upper dates
        match self.lower.cmp(&other.lower) {
            Ordering::Equal => self.upper.cmp(&other.upper),
            ord => ord,
        }
    }
}

impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
