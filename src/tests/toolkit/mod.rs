//! Synthetic RINEX 2.11 content, written column by column.
//! All times are expressed in seconds since 2022-03-06T00:00:00 GPST,
//! which is the start of GPS week 2200.
use crate::prelude::{Epoch, TimeScale};

mod nav;
mod obs;

pub use nav::{navigation_file, navigation_file_with, NavRecord};
pub use obs::{observation_file, ObsEpoch, ObsFile};

/// Start of the week all synthetic times refer to
pub fn week_start() -> Epoch {
    Epoch::from_gregorian(2022, 3, 6, 0, 0, 0, 0, TimeScale::GPST)
}

/// (day of march 2022, hours, minutes, seconds) of `t`.
/// Valid from 2022-03-01 to the end of the week.
pub fn calendar(t: f64) -> (u8, u8, u8, f64) {
    let days = (t / 86400.0).floor();
    let rem = t - days * 86400.0;
    let hours = (rem / 3600.0).floor();
    let minutes = ((rem - hours * 3600.0) / 60.0).floor();
    let seconds = rem - hours * 3600.0 - minutes * 60.0;
    ((6.0 + days) as u8, hours as u8, minutes as u8, seconds)
}

/// Header line: 60 columns of content then the label
pub fn header_line(content: &str, label: &str) -> String {
    format!("{:<60}{:<20}", content, label)
}

/// First line of a file
pub fn version_line(version: &str, letter: char, system: char) -> String {
    format!(
        "{:>9}{:11}{:<20}{:<20}{}",
        version, "", letter, system, "RINEX VERSION / TYPE"
    )
}

/// Split exponent field: D19.12
pub fn d19(value: f64) -> String {
    let formatted = format!("{:.12e}", value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap();
    let exponent = exponent.parse::<i32>().unwrap();
    format!(
        "{:>15}D{}{:02}",
        mantissa,
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

/// Returns true if both values are identical, NaN included
pub fn same_value(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn calendar_days() {
        assert_eq!(calendar(0.0), (6, 0, 0, 0.0));
        assert_eq!(calendar(4000.0), (6, 1, 6, 40.0));
        assert_eq!(calendar(90030.5), (7, 1, 0, 30.5));
        assert_eq!(calendar(-3600.0), (5, 23, 0, 0.0));
    }
    #[test]
    fn split_exponent_fields() {
        assert_eq!(d19(1.234567890123E-4), " 1.234567890123D-04");
        assert_eq!(d19(-25.0), "-2.500000000000D+01");
        assert_eq!(d19(0.0), " 0.000000000000D+00");
    }
    #[test]
    fn first_lines() {
        let line = version_line("2.11", 'O', 'G');
        assert_eq!(line.len(), 80);
        assert_eq!(&line[20..21], "O");
        assert_eq!(&line[40..41], "G");
        assert_eq!(&line[60..], "RINEX VERSION / TYPE");
    }
}
