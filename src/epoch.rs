//! Epoch decoding, GPS week alignment and event flags
use hifitime::{Epoch, TimeScale};

use crate::{error::ParsingError, reader::Line};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [EpochFlag] describes events that occured at an observation epoch
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochFlag {
    /// Epoch is sane
    #[default]
    Ok,
    /// Power failure since previous epoch
    PowerFailure,
    /// Antenna is being moved at current epoch
    AntennaBeingMoved,
    /// Site has changed, received has moved since last epoch
    NewSiteOccupation,
    /// New header information follows
    HeaderInformationFollows,
    /// External event
    ExternalEvent,
    /// Cycle slip records follow
    CycleSlip,
}

impl EpochFlag {
    /// Returns true if self is a valid epoch
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
    /// Flags 2 to 5 are followed by special records rather than observations
    pub fn announces_special_records(self) -> bool {
        matches!(
            self,
            Self::AntennaBeingMoved
                | Self::NewSiteOccupation
                | Self::HeaderInformationFollows
                | Self::ExternalEvent
        )
    }
}

impl std::str::FromStr for EpochFlag {
    type Err = ParsingError;
    /// A blank flag means [EpochFlag::Ok]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "0" => Ok(Self::Ok),
            "1" => Ok(Self::PowerFailure),
            "2" => Ok(Self::AntennaBeingMoved),
            "3" => Ok(Self::NewSiteOccupation),
            "4" => Ok(Self::HeaderInformationFollows),
            "5" => Ok(Self::ExternalEvent),
            "6" => Ok(Self::CycleSlip),
            _ => Err(ParsingError::EpochFlag(s.to_string())),
        }
    }
}

impl From<EpochFlag> for u8 {
    fn from(flag: EpochFlag) -> u8 {
        match flag {
            EpochFlag::Ok => 0,
            EpochFlag::PowerFailure => 1,
            EpochFlag::AntennaBeingMoved => 2,
            EpochFlag::NewSiteOccupation => 3,
            EpochFlag::HeaderInformationFollows => 4,
            EpochFlag::ExternalEvent => 5,
            EpochFlag::CycleSlip => 6,
        }
    }
}

impl std::fmt::Display for EpochFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Columns of each date/time field, 0-based, end excluded
#[derive(Debug, Clone, Copy)]
struct Layout {
    year: (usize, usize),
    month: (usize, usize),
    day: (usize, usize),
    hours: (usize, usize),
    minutes: (usize, usize),
    seconds: (usize, usize),
    fraction: (usize, usize),
    /// Nanoseconds per unit of the fraction field
    fraction_ns: u32,
}

/// Navigation epoch: "yy mm dd hh mm ss.s" in columns 4-22
const NAV_LAYOUT: Layout = Layout {
    year: (3, 5),
    month: (6, 8),
    day: (9, 11),
    hours: (12, 14),
    minutes: (15, 17),
    seconds: (18, 20),
    fraction: (21, 22),
    fraction_ns: 100_000_000,
};

/// Observation epoch: " yy mm dd hh mm ss.sssssss" in columns 2-26
const OBS_LAYOUT: Layout = Layout {
    year: (1, 3),
    month: (4, 6),
    day: (7, 9),
    hours: (10, 12),
    minutes: (13, 15),
    seconds: (15, 18),
    fraction: (19, 26),
    fraction_ns: 100,
};

/// TIME OF FIRST OBS: 5I6 followed by F13.7
const FIRST_OBS_LAYOUT: Layout = Layout {
    year: (2, 6),
    month: (10, 12),
    day: (16, 18),
    hours: (22, 24),
    minutes: (28, 30),
    seconds: (30, 35),
    fraction: (36, 43),
    fraction_ns: 100,
};

/// Two digit years: 80-99 are 1980-1999, 00-79 are 2000-2079
pub(crate) fn two_digit_year(year: i32) -> i32 {
    if year < 80 {
        year + 2000
    } else {
        year + 1900
    }
}

fn decode(line: &Line, layout: Layout, two_digits: bool) -> Result<Epoch, ParsingError> {
    let field = |(start, end): (usize, usize)| line.field(start, end);

    let y = field(layout.year);
    let mut year = y
        .trim()
        .parse::<i32>()
        .or(Err(ParsingError::EpochYear(y.to_string())))?;
    if two_digits {
        year = two_digit_year(year);
    }

    let m = field(layout.month);
    let month = m
        .trim()
        .parse::<u8>()
        .or(Err(ParsingError::EpochMonth(m.to_string())))?;

    let d = field(layout.day);
    let day = d
        .trim()
        .parse::<u8>()
        .or(Err(ParsingError::EpochDay(d.to_string())))?;

    let hh = field(layout.hours);
    let hours = hh
        .trim()
        .parse::<u8>()
        .or(Err(ParsingError::EpochHours(hh.to_string())))?;

    let mm = field(layout.minutes);
    let minutes = mm
        .trim()
        .parse::<u8>()
        .or(Err(ParsingError::EpochMinutes(mm.to_string())))?;

    let ss = field(layout.seconds);
    let seconds = ss
        .trim()
        .parse::<u8>()
        .or(Err(ParsingError::EpochSeconds(ss.to_string())))?;

    // blank fraction: whole seconds
    let fract = field(layout.fraction);
    let fraction = match fract.trim() {
        "" => 0,
        digits => digits
            .parse::<u32>()
            .or(Err(ParsingError::EpochFraction(fract.to_string())))?,
    };

    let nanos = fraction
        .checked_mul(layout.fraction_ns)
        .filter(|ns| *ns < 1_000_000_000)
        .ok_or(ParsingError::EpochFraction(fract.to_string()))?;

    Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hours,
        minutes,
        seconds,
        nanos,
        TimeScale::GPST,
    )
    .map_err(|_| {
        ParsingError::InvalidEpoch(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year, month, day, hours, minutes, seconds
        ))
    })
}

/// Decodes the epoch of a navigation record (first line)
pub(crate) fn parse_nav_epoch(line: &Line) -> Result<Epoch, ParsingError> {
    decode(line, NAV_LAYOUT, true)
}

/// Decodes the epoch of an observation record
pub(crate) fn parse_obs_epoch(line: &Line) -> Result<Epoch, ParsingError> {
    decode(line, OBS_LAYOUT, true)
}

/// Decodes the TIME OF FIRST OBS header line
pub(crate) fn parse_first_obs_epoch(line: &Line) -> Result<Epoch, ParsingError> {
    decode(line, FIRST_OBS_LAYOUT, false)
}

/// Returns the start of the GPS week (Sunday 00:00:00) containing `epoch`.
pub fn week_start(epoch: Epoch) -> Epoch {
    let (week, _) = epoch.to_time_scale(TimeScale::GPST).to_time_of_week();
    Epoch::from_time_of_week(week, 0, TimeScale::GPST)
}

/// Elapsed seconds between `week_start` and `epoch`
pub fn seconds_of_week(epoch: Epoch, week_start: Epoch) -> f64 {
    (epoch - week_start).to_seconds()
}
