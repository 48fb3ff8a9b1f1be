//! RINEX file types
use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// File types this library decodes, identified by
/// the letter found in column 21 of the first line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// GPS navigation message ('N')
    NavigationData,
    /// Observation data ('O')
    ObservationData,
}

impl Type {
    /// Column (0-based) of the type letter in the first line
    pub(crate) const COLUMN: usize = 20;
}

impl TryFrom<char> for Type {
    type Error = ParsingError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'N' => Ok(Self::NavigationData),
            'O' => Ok(Self::ObservationData),
            c => Err(ParsingError::UnexpectedType(c)),
        }
    }
}

impl From<Type> for char {
    fn from(t: Type) -> char {
        match t {
            Type::NavigationData => 'N',
            Type::ObservationData => 'O',
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NavigationData => f.write_str("NAVIGATION DATA"),
            Self::ObservationData => f.write_str("OBSERVATION DATA"),
        }
    }
}
