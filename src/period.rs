//! Named periods with fuzzy start and end.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Date, Range, RangeError, prelude::*};

/// A named period whose start and end are each known only to within a
/// [`Range`].
///
/// `lower` is the range in which the period starts, `upper` the range in
/// which it ends. From those two ranges a period yields two envelopes:
///
/// - the **outer** range, `lower.lower()` to `upper.upper()`: every date
///   that might belong to the period;
/// - the **inner** range, `lower.upper()` to `upper.lower()`: the dates that
///   certainly belong to it. For short periods with wide uncertainty this
///   pair can be inverted, see [`Period::has_certain_core`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{name} ({lower}-{upper})")]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    name:  String,
    lower: Range,
    upper: Range,
}

#[derive(Deserialize)]
struct RawPeriod {
    name:  String,
    lower: Range,
    upper: Range,
}

impl TryFrom<RawPeriod> for Period {
    type Error = RangeError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.lower, raw.upper)
    }
}

impl Period {
    /// # Errors
    /// Returns `RangeError::EraMismatch` if the period starts in the common
    /// era but ends before it, or `RangeError::Inverted` if the earliest
    /// possible start is after the latest possible end.
    pub fn new(name: impl Into<String>, lower: Range, upper: Range) -> Result<Self, RangeError> {
        let (start, end) = (lower.lower(), upper.upper());

        if end.is_bce() && !start.is_bce() {
            debug!("rejected period ending in BCE after starting in CE: {start} to {end}");
            return Err(RangeError::EraMismatch { lower: start, upper: end });
        }
        if start.cmp_chronological(&end) == Ordering::Greater {
            debug!("rejected period starting after it ends: {start} to {end}");
            return Err(RangeError::Inverted { lower: start, upper: end });
        }

        Ok(Self {
            name: name.into(),
            lower,
            upper,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The range in which the period starts.
    pub const fn lower(&self) -> Range {
        self.lower
    }

    /// The range in which the period ends.
    pub const fn upper(&self) -> Range {
        self.upper
    }

    /// Latest possible start and earliest possible end.
    pub const fn inner_range(&self) -> (Date, Date) {
        (self.lower.upper(), self.upper.lower())
    }

    /// Earliest possible start and latest possible end.
    pub const fn outer_range(&self) -> (Date, Date) {
        (self.lower.lower(), self.upper.upper())
    }

    /// True if some dates certainly fall within the period, i.e. the inner
    /// range is not inverted.
    pub fn has_certain_core(&self) -> bool {
        let (start, end) = self.inner_range();
        start.cmp_chronological(&end) != Ordering::Greater
    }

    /// True if `date` lies inside the inner range.
    pub fn certainly_contains(&self, date: &Date) -> bool {
        let (start, end) = self.inner_range();
        start.cmp_chronological(date) != Ordering::Greater && date.cmp_chronological(&end) != Ordering::Greater
    }

    /// True if `date` lies inside the outer range.
    pub fn possibly_contains(&self, date: &Date) -> bool {
        let (start, end) = self.outer_range();
        start.cmp_chronological(date) != Ordering::Greater && date.cmp_chronological(&end) != Ordering::Greater
    }
}
