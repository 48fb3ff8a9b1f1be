//! First line ("RINEX VERSION / TYPE") decoding, shared by all readers
use std::str::FromStr;

use crate::{error::ParsingError, reader::Line, types::Type, version::Version};

pub(crate) const VERSION_TYPE: &str = "RINEX VERSION / TYPE";
pub(crate) const END_OF_HEADER: &str = "END OF HEADER";

/// Satellite system column (observation files)
const SYSTEM_COLUMN: usize = 40;

/// Content of the first line of any RINEX file
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VersionLine {
    pub version: Version,
    pub file_type: char,
    pub system: char,
}

impl VersionLine {
    /// Decodes the first line, accepting supported revisions only.
    pub fn parse(line: &Line) -> Result<Self, ParsingError> {
        if !line.is(VERSION_TYPE) {
            return Err(ParsingError::MissingVersionLine);
        }
        let version = Version::from_str(line.field(0, 9))?;
        if !version.is_supported() {
            return Err(ParsingError::NonSupportedVersion(version.to_string()));
        }
        Ok(Self {
            version,
            file_type: line.char_at(Type::COLUMN),
            system: line.char_at(SYSTEM_COLUMN),
        })
    }
    /// Verifies the file type letter.
    pub fn expect(&self, expected: Type) -> Result<(), ParsingError> {
        let t = Type::try_from(self.file_type)?;
        if t == expected {
            Ok(())
        } else {
            Err(ParsingError::UnexpectedType(self.file_type))
        }
    }
}

/// Reads the file type from the first line, without any other verification.
pub(crate) fn sniff_type(line: &Line) -> Result<Type, ParsingError> {
    if !line.is(VERSION_TYPE) {
        return Err(ParsingError::MissingVersionLine);
    }
    Type::try_from(line.char_at(Type::COLUMN))
}
