//! RINEX revision
use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The only revision this library decodes
pub const SUPPORTED_VERSION: Version = Version {
    major: 2,
    minor: 11,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Default for Version {
    fn default() -> Self {
        SUPPORTED_VERSION
    }
}

impl Version {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns true if this revision is supported
    pub fn is_supported(&self) -> bool {
        *self == SUPPORTED_VERSION
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    /// Revision is a floating point number (F9.2), "2.11" and "2.110" are identical.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = f64::from_str(s).or(Err(ParsingError::VersionParsing(s.to_string())))?;
        if !(0.0..256.0).contains(&value) {
            return Err(ParsingError::VersionParsing(s.to_string()));
        }
        let major = value.trunc();
        let minor = ((value - major) * 100.0).round();
        if minor >= 100.0 || (major + minor / 100.0 - value).abs() > 1.0E-9 {
            return Err(ParsingError::VersionParsing(s.to_string()));
        }
        Ok(Self {
            major: major as u8,
            minor: minor as u8,
        })
    }
}
