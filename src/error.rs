use thiserror::Error;

/// Format errors, raised by the fixed column decoders
/// and the file state machines. They are always fatal.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("expected \"RINEX VERSION / TYPE\" in first line")]
    MissingVersionLine,
    #[error("failed to parse revision from \"{0}\"")]
    VersionParsing(String),
    #[error("non supported revision \"{0}\"")]
    NonSupportedVersion(String),
    #[error("unexpected file type '{0}'")]
    UnexpectedType(char),
    #[error("non supported satellite system '{0}'")]
    NonSupportedSystem(char),
    #[error("failed to parse epoch year from \"{0}\"")]
    EpochYear(String),
    #[error("failed to parse epoch month from \"{0}\"")]
    EpochMonth(String),
    #[error("failed to parse epoch day from \"{0}\"")]
    EpochDay(String),
    #[error("failed to parse epoch hours from \"{0}\"")]
    EpochHours(String),
    #[error("failed to parse epoch minutes from \"{0}\"")]
    EpochMinutes(String),
    #[error("failed to parse epoch seconds from \"{0}\"")]
    EpochSeconds(String),
    #[error("failed to parse epoch fractional seconds from \"{0}\"")]
    EpochFraction(String),
    #[error("invalid calendar date {0}")]
    InvalidEpoch(String),
    #[error("failed to parse integer from \"{0}\"")]
    Integer(String),
    #[error("failed to parse float from \"{0}\"")]
    Float(String),
    #[error("invalid satellite label \"{0}\"")]
    SatelliteLabel(String),
    #[error("invalid epoch flag \"{0}\"")]
    EpochFlag(String),
    #[error("observations over-defined")]
    ObservationsOverDefined,
    #[error("expected observations")]
    ExpectedObservations,
    #[error("observation record before \"# / TYPES OF OBSERV\"")]
    MissingObservables,
}

/// Caller contract violations, when combining several files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("cannot read two navigation files")]
    TwoNavigationFiles,
    #[error("cannot read two observation files")]
    TwoObservationFiles,
    #[error("reference file must be an observation file")]
    ReferenceNotObservation,
    #[error("reference file requires an observation file to align with")]
    ReferenceWithoutObservation,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line} \"{label}\": {source}")]
    Format {
        /// 1-based line number
        line: usize,
        /// 20 column label of the offending line
        label: String,
        source: ParsingError,
    },
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("file i/o error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the [ParsingError] when this is a format error.
    pub fn as_format(&self) -> Option<&ParsingError> {
        match self {
            Self::Format { source, .. } => Some(source),
            _ => None,
        }
    }
    /// Returns the [UsageError] when this is a usage error.
    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(e) => Some(e),
            _ => None,
        }
    }
}
