//! Navigation file state machine
use std::{io::BufRead, sync::Arc};

use nalgebra::DMatrix;

#[cfg(feature = "log")]
use log::{debug, error};

use crate::{
    algorithm::unique,
    buffer::ChunkedBuffer,
    epoch::{parse_nav_epoch, seconds_of_week, week_start},
    error::{Error, ParsingError},
    fields::{parse_int, parse_row2, parse_row3, parse_row4},
    header::{VersionLine, END_OF_HEADER},
    navigation::{ephemeris::DEFAULT_FIT_INTERVAL, Ephemeris, Navigation},
    prelude::{Epoch, TimeScale},
    reader::{Line, Lines},
    types::Type,
};

/// Continuation lines following each record first line
const ORBIT_LINES: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Header,
    Epoch,
    /// Expecting orbit line n (1-based)
    Orbits(u8),
}

/// Decodes the first line of a record: PRN, epoch and clock terms.
/// The first record ever decoded defines the week start.
fn parse_clock_line(line: &Line, ts_bow: &mut Option<Epoch>) -> Result<Ephemeris, ParsingError> {
    let prn = parse_int::<u8>(line.field(0, 3))?;
    let epoch = parse_nav_epoch(line)?;
    let bow = *ts_bow.get_or_insert_with(|| week_start(epoch));
    let (a_f0, a_f1, a_f2) = parse_row3(line)?;
    Ok(Ephemeris {
        prn,
        t_oc: seconds_of_week(epoch, bow),
        a_f0,
        a_f1,
        a_f2,
        ..Default::default()
    })
}

/// Decodes orbit line `n` into `eph`.
fn parse_orbit_line(line: &Line, n: u8, eph: &mut Ephemeris) -> Result<(), ParsingError> {
    match n {
        1 => {
            let (iode, crs, dn, m_0) = parse_row4(line)?;
            eph.iode = iode as u32;
            eph.crs = crs;
            eph.dn = dn;
            eph.m_0 = m_0;
        },
        2 => {
            (eph.cuc, eph.e, eph.cus, eph.sqrt_a) = parse_row4(line)?;
        },
        3 => {
            (eph.t_oe, eph.cic, eph.omega_0, eph.cis) = parse_row4(line)?;
        },
        4 => {
            (eph.i_0, eph.crc, eph.omega, eph.omega_dot) = parse_row4(line)?;
        },
        5 => {
            let (i_dot, l2_codes, week, l2p_flag) = parse_row4(line)?;
            eph.i_dot = i_dot;
            eph.l2_codes = l2_codes;
            eph.week = week as u32;
            eph.l2p_flag = l2p_flag;
        },
        6 => {
            let (accuracy, health, t_gd, iodc) = parse_row4(line)?;
            eph.accuracy = accuracy;
            eph.health = health as u32;
            eph.t_gd = t_gd;
            eph.iodc = iodc as u32;
        },
        _ => {
            let (t_sv, fit_hours) = parse_row2(line)?;
            eph.t_sv = t_sv;
            eph.t_fit = if fit_hours > 0.0 {
                fit_hours * 3600.0
            } else {
                DEFAULT_FIT_INTERVAL
            };
        },
    }
    Ok(())
}

pub(crate) fn parse<R: BufRead>(reader: &mut R) -> Result<Navigation, Error> {
    let mut state = State::Init;
    let mut ts_bow = Option::<Epoch>::None;

    let mut t_oc = ChunkedBuffer::<f64>::new();
    let mut prns = ChunkedBuffer::<u8>::new();
    let mut records = ChunkedBuffer::<Ephemeris>::new();

    let mut eph = Ephemeris::default();

    for line in Lines::new(reader) {
        let line = line?;
        match state {
            State::Init => {
                VersionLine::parse(&line)
                    .and_then(|v| v.expect(Type::NavigationData))
                    .map_err(|e| {
                        #[cfg(feature = "log")]
                        error!("navigation: {}", e);
                        line.error(e)
                    })?;
                state = State::Header;
            },
            State::Header => {
                if line.is(END_OF_HEADER) {
                    #[cfg(feature = "log")]
                    debug!("navigation: end of header (line {})", line.number);
                    state = State::Epoch;
                }
            },
            State::Epoch => {
                if line.is_marker() {
                    continue;
                }
                eph = parse_clock_line(&line, &mut ts_bow).map_err(|e| line.error(e))?;
                state = State::Orbits(1);
            },
            State::Orbits(n) => {
                if line.is_marker() {
                    continue;
                }
                parse_orbit_line(&line, n, &mut eph).map_err(|e| line.error(e))?;
                if n < ORBIT_LINES {
                    state = State::Orbits(n + 1);
                } else {
                    t_oc.push(eph.t_oc);
                    prns.push(eph.prn);
                    records.push(std::mem::take(&mut eph));
                    state = State::Epoch;
                }
            },
        }
    }

    if state == State::Init {
        return Err(Error::Format {
            line: 0,
            label: String::new(),
            source: ParsingError::MissingVersionLine,
        });
    }

    let t_oc = t_oc.into_vec();
    let prns = prns.into_vec();
    let records = records.into_vec();

    let times = unique(&t_oc);
    let svs = unique(&prns);

    let mut ephs = DMatrix::<Option<Arc<Ephemeris>>>::from_element(times.len(), svs.len(), None);

    // duplicate (time, prn) pairs: last record wins
    for (row, eph) in records.into_iter().enumerate() {
        ephs[(times.inverse[row], svs.inverse[row])] = Some(Arc::new(eph));
    }

    #[cfg(feature = "log")]
    debug!(
        "navigation: {} records, {} epochs, {} satellites",
        t_oc.len(),
        times.len(),
        svs.len()
    );

    Ok(Navigation {
        ts_bow: ts_bow.unwrap_or_else(|| Epoch::from_time_of_week(0, 0, TimeScale::GPST)),
        t_oc: times.values,
        prns: svs.values,
        ephs,
    })
}
