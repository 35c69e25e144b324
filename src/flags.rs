use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::consts::{FLAG_BCE, FLAG_UPPER};

/// Error returned when a flag is looked up by a name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
}

/// The closed set of flag names a [`Flags`] record answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKey {
    /// The date lies before the common era.
    Bce,
    /// The date is the upper bound of a range.
    Upper,
}

impl FlagKey {
    /// Every known key, in declaration order.
    pub const ALL: [Self; 2] = [Self::Bce, Self::Upper];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bce => FLAG_BCE,
            Self::Upper => FLAG_UPPER,
        }
    }
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlagKey {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FLAG_BCE => Ok(Self::Bce),
            FLAG_UPPER => Ok(Self::Upper),
            _ => Err(FlagError::UnknownFlag(s.to_owned())),
        }
    }
}

/// Named boolean attributes of a date.
///
/// Parsers attach attributes by name through [`Flags::set_boolean`]; code
/// that knows what it wants uses the typed accessors. Both paths reject
/// names outside [`FlagKey::ALL`]. The default record has every flag off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flags {
    bce:   bool,
    upper: bool,
}

impl Flags {
    pub const fn new(bce: bool, upper: bool) -> Self {
        Self { bce, upper }
    }

    pub const fn bce(&self) -> bool {
        self.bce
    }

    pub const fn upper(&self) -> bool {
        self.upper
    }

    /// Reads a flag by key.
    pub const fn get(&self, key: FlagKey) -> bool {
        match key {
            FlagKey::Bce => self.bce,
            FlagKey::Upper => self.upper,
        }
    }

    /// Writes a flag by key and returns its previous value.
    pub const fn set(&mut self, key: FlagKey, value: bool) -> bool {
        let slot = match key {
            FlagKey::Bce => &mut self.bce,
            FlagKey::Upper => &mut self.upper,
        };
        let prev = *slot;
        *slot = value;
        prev
    }

    /// Returns a copy with one flag replaced.
    #[must_use]
    pub const fn with(mut self, key: FlagKey, value: bool) -> Self {
        self.set(key, value);
        self
    }

    /// Reads a flag by name.
    ///
    /// # Errors
    /// Returns `FlagError::UnknownFlag` if `key` is not a known flag name.
    pub fn get_boolean(&self, key: &str) -> Result<bool, FlagError> {
        Ok(self.get(key.parse()?))
    }

    /// Writes a flag by name and returns its previous value.
    ///
    /// # Errors
    /// Returns `FlagError::UnknownFlag` if `key` is not a known flag name.
    /// The record is left untouched in that case.
    pub fn set_boolean(&mut self, key: &str, value: bool) -> Result<bool, FlagError> {
        Ok(self.set(key.parse()?, value))
    }
}
