//! Observation file state machine
use std::{collections::BTreeMap, f64::consts::PI, io::BufRead, str::FromStr};

use nalgebra::DMatrix;

#[cfg(feature = "log")]
use log::{debug, error};

use crate::{
    algorithm::unique,
    buffer::ChunkedBuffer,
    epoch::{parse_first_obs_epoch, parse_obs_epoch, seconds_of_week, week_start, EpochFlag},
    error::{Error, ParsingError},
    fields::{parse_float_or, parse_int, split_sv_label},
    header::{VersionLine, END_OF_HEADER},
    observation::Observation,
    prelude::{Constellation, Epoch, TimeScale},
    reader::{Line, Lines},
    types::Type,
};

const APPROX_POSITION: &str = "APPROX POSITION XYZ";
const TYPES_OF_OBSERV: &str = "# / TYPES OF OBSERV";
const TIME_OF_FIRST_OBS: &str = "TIME OF FIRST OBS";

/// Observable codes per "# / TYPES OF OBSERV" line
const TYPES_PER_LINE: usize = 9;
/// Satellite labels per epoch line
const SVS_PER_LINE: usize = 12;
/// Observation values per data line
const VALUES_PER_LINE: usize = 5;
/// Observation field width (value and LLI/SSI flags)
const VALUE_WIDTH: usize = 16;
/// Significant columns of each observation field
const VALUE_DIGITS: usize = 14;

const FLAG_COLUMN: usize = 28;
const SVS_COLUMN: usize = 32;
const CLOCK_OFFSET: (usize, usize) = (68, 80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Header,
    /// Expecting this many more observable codes
    MoreTypes(usize),
    Epoch,
    MoreSvs,
    Obs,
    /// Skipping this many special records
    Special(usize),
}

/// Epoch being decoded
#[derive(Debug, Default)]
struct PendingEpoch {
    t: f64,
    flag: EpochFlag,
    clock_offset: f64,
    expected_svs: usize,
    svs: Vec<String>,
    values: Vec<f64>,
}

impl PendingEpoch {
    fn is_complete(&self, types: usize) -> bool {
        self.values.len() == self.expected_svs * types
    }
}

/// Header system letter
fn parse_constellation(system: char) -> Result<Constellation, ParsingError> {
    match system {
        ' ' | 'G' => Ok(Constellation::GPS),
        'M' => Ok(Constellation::Mixed),
        c => Err(ParsingError::NonSupportedSystem(c)),
    }
}

/// Approximate time zone in hours, from the receiver longitude
fn time_zone(position: (f64, f64, f64)) -> i8 {
    (position.1.atan2(position.0) * 12.0 / PI).round() as i8
}

fn parse_position(line: &Line) -> Result<(f64, f64, f64), ParsingError> {
    Ok((
        parse_float_or(line.field(0, 14), 0.0)?,
        parse_float_or(line.field(14, 28), 0.0)?,
        parse_float_or(line.field(28, 42), 0.0)?,
    ))
}

/// Appends up to `count` observable codes of this line.
fn parse_types(line: &Line, count: usize, types: &mut Vec<String>) {
    for n in 0..count.min(TYPES_PER_LINE) {
        let start = 10 + 6 * n;
        types.push(line.field(start, start + 2).trim().to_string());
    }
}

/// Satellite label starting at column `start`: a blank system means GPS.
fn parse_sv_label(line: &Line, start: usize) -> Result<String, ParsingError> {
    let label = if line.char_at(start) == ' ' {
        format!("G{}", line.field(start + 1, start + 3))
    } else {
        line.field(start, start + 3).to_string()
    };
    match split_sv_label(&label) {
        Some(_) => Ok(label),
        None => Err(ParsingError::SatelliteLabel(label)),
    }
}

/// Appends the satellite labels of this line, up to the announced count.
fn parse_svs(line: &Line, pending: &mut PendingEpoch) -> Result<(), ParsingError> {
    let left = pending.expected_svs - pending.svs.len();
    for n in 0..left.min(SVS_PER_LINE) {
        let label = parse_sv_label(line, SVS_COLUMN + 3 * n)?;
        pending.svs.push(label);
    }
    Ok(())
}

/// Appends the values of this line. A satellite always starts a new line,
/// so reading stops as soon as the current satellite is complete.
fn parse_values(line: &Line, types: usize, pending: &mut PendingEpoch) -> Result<(), ParsingError> {
    let total = pending.expected_svs * types;
    for n in 0..VALUES_PER_LINE {
        if pending.values.len() == total {
            break;
        }
        let start = n * VALUE_WIDTH;
        let value = parse_float_or(line.field(start, start + VALUE_DIGITS), f64::NAN)?;
        pending.values.push(value);
        if pending.values.len() % types == 0 {
            break;
        }
    }
    Ok(())
}

/// Flat rows accumulated while reading, one per (epoch, satellite)
struct Rows {
    t: ChunkedBuffer<f64>,
    clock_offsets: ChunkedBuffer<f64>,
    events: ChunkedBuffer<EpochFlag>,
    svs: ChunkedBuffer<String>,
    values: ChunkedBuffer<f64>,
}

impl Rows {
    fn new(types: usize) -> Self {
        Self {
            t: ChunkedBuffer::new(),
            clock_offsets: ChunkedBuffer::new(),
            events: ChunkedBuffer::new(),
            svs: ChunkedBuffer::new(),
            values: ChunkedBuffer::with_width(types),
        }
    }
    fn push(&mut self, pending: PendingEpoch, types: usize) {
        for (n, sv) in pending.svs.into_iter().enumerate() {
            self.t.push(pending.t);
            self.clock_offsets.push(pending.clock_offset);
            self.events.push(pending.flag);
            self.svs.push(sv);
            self.values
                .push_row(&pending.values[n * types..(n + 1) * types]);
        }
    }
}

pub(crate) fn parse<R: BufRead>(reader: &mut R) -> Result<Observation, Error> {
    let mut state = State::Init;

    let mut constellation = Constellation::GPS;
    let mut position = (0.0_f64, 0.0_f64, 0.0_f64);
    let mut ts_bow = Option::<Epoch>::None;
    let mut declared = 0_usize;
    let mut types = Vec::<String>::new();

    let mut rows = Option::<Rows>::None;
    let mut pending = PendingEpoch::default();

    for line in Lines::new(reader) {
        let line = line?;
        match state {
            State::Init => {
                let system = VersionLine::parse(&line)
                    .and_then(|v| {
                        v.expect(Type::ObservationData)?;
                        Ok(v.system)
                    })
                    .and_then(parse_constellation)
                    .map_err(|e| {
                        #[cfg(feature = "log")]
                        error!("observation: {}", e);
                        line.error(e)
                    })?;
                constellation = system;
                state = State::Header;
            },
            State::Header => {
                if line.is(APPROX_POSITION) {
                    position = parse_position(&line).map_err(|e| line.error(e))?;
                } else if line.is(TYPES_OF_OBSERV) {
                    if declared != 0 {
                        return Err(line.error(ParsingError::ObservationsOverDefined));
                    }
                    declared =
                        parse_int::<usize>(line.field(0, 6)).map_err(|e| line.error(e))?;
                    parse_types(&line, declared, &mut types);
                    if declared > TYPES_PER_LINE {
                        state = State::MoreTypes(declared - TYPES_PER_LINE);
                    }
                } else if line.is(TIME_OF_FIRST_OBS) {
                    let first = parse_first_obs_epoch(&line).map_err(|e| line.error(e))?;
                    ts_bow = Some(week_start(first));
                } else if line.is(END_OF_HEADER) {
                    #[cfg(feature = "log")]
                    debug!(
                        "observation: end of header (line {}), observables: {:?}",
                        line.number, types
                    );
                    rows = Some(Rows::new(types.len()));
                    state = State::Epoch;
                }
            },
            State::MoreTypes(left) => {
                parse_types(&line, left, &mut types);
                state = if left > TYPES_PER_LINE {
                    State::MoreTypes(left - TYPES_PER_LINE)
                } else {
                    State::Header
                };
            },
            State::Epoch => {
                if line.is_marker() {
                    continue;
                }
                let flag = EpochFlag::from_str(line.field(FLAG_COLUMN, FLAG_COLUMN + 1))
                    .map_err(|e| line.error(e))?;
                let count = parse_int::<usize>(line.field(FLAG_COLUMN + 1, SVS_COLUMN))
                    .map_err(|e| line.error(e))?;

                if flag.announces_special_records() {
                    if count > 0 {
                        state = State::Special(count);
                    }
                    continue;
                }
                if count == 0 {
                    continue;
                }
                if types.is_empty() {
                    return Err(line.error(ParsingError::MissingObservables));
                }

                // event lines may leave the epoch blank
                let epoch = parse_obs_epoch(&line).map_err(|e| line.error(e))?;
                let bow = *ts_bow.get_or_insert_with(|| week_start(epoch));
                pending = PendingEpoch {
                    t: seconds_of_week(epoch, bow),
                    flag,
                    clock_offset: parse_float_or(line.field(CLOCK_OFFSET.0, CLOCK_OFFSET.1), 0.0)
                        .map_err(|e| line.error(e))?,
                    expected_svs: count,
                    svs: Vec::with_capacity(count),
                    values: Vec::with_capacity(count * types.len()),
                };
                parse_svs(&line, &mut pending).map_err(|e| line.error(e))?;
                state = if pending.svs.len() < count {
                    State::MoreSvs
                } else {
                    State::Obs
                };
            },
            State::MoreSvs => {
                parse_svs(&line, &mut pending).map_err(|e| line.error(e))?;
                if pending.svs.len() == pending.expected_svs {
                    state = State::Obs;
                }
            },
            State::Obs => {
                if line.is_marker() {
                    return Err(line.error(ParsingError::ExpectedObservations));
                }
                parse_values(&line, types.len(), &mut pending).map_err(|e| line.error(e))?;
                if pending.is_complete(types.len()) {
                    if let Some(rows) = rows.as_mut() {
                        rows.push(std::mem::take(&mut pending), types.len());
                    }
                    state = State::Epoch;
                }
            },
            State::Special(left) => {
                state = if left > 1 {
                    State::Special(left - 1)
                } else {
                    State::Epoch
                };
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

    let ts_bow = ts_bow.unwrap_or_else(|| Epoch::from_time_of_week(0, 0, TimeScale::GPST));
    let rows = rows.unwrap_or_else(|| Rows::new(types.len()));
    Ok(assemble(rows, types, position, constellation, ts_bow))
}

/// Reshapes flat rows into (time, satellite) matrices.
fn assemble(
    rows: Rows,
    types: Vec<String>,
    position: (f64, f64, f64),
    constellation: Constellation,
    ts_bow: Epoch,
) -> Observation {
    let nrows = rows.values.rows();

    // observables never reported are dropped
    let retained = (0..types.len())
        .filter(|c| (0..nrows).any(|r| !rows.values.row(r)[*c].is_nan()))
        .collect::<Vec<_>>();

    let t = rows.t.into_vec();
    let svs = rows.svs.into_vec();
    let clock_offsets = rows.clock_offsets.into_vec();
    let events = rows.events.into_vec();

    let times = unique(&t);
    let sats = unique(&svs);
    let (k, j) = (times.len(), sats.len());

    let mut is_vis = DMatrix::<bool>::from_element(k, j, false);
    let mut observations = BTreeMap::<String, DMatrix<f64>>::new();

    for c in retained.iter() {
        let mut matrix = DMatrix::<f64>::from_element(k, j, f64::NAN);
        // duplicate (time, satellite) rows: last one wins
        for r in 0..nrows {
            matrix[(times.inverse[r], sats.inverse[r])] = rows.values.row(r)[*c];
        }
        for (vis, value) in is_vis.iter_mut().zip(matrix.iter()) {
            *vis |= !value.is_nan();
        }
        observations.insert(types[*c].clone(), matrix);
    }

    let (sys, prns): (Vec<char>, Vec<u8>) = sats
        .values
        .iter()
        .map(|label| split_sv_label(label).unwrap_or_default())
        .unzip();

    let vis_prn = DMatrix::<f64>::from_fn(k, j, |r, c| {
        if is_vis[(r, c)] {
            prns[c] as f64
        } else {
            f64::NAN
        }
    });

    let sv_ind = sats
        .values
        .iter()
        .enumerate()
        .map(|(j, label)| (label.clone(), j))
        .collect::<BTreeMap<_, _>>();

    #[cfg(feature = "log")]
    debug!(
        "observation: {} rows, {} epochs, {} satellites, {} observables",
        nrows,
        k,
        j,
        retained.len()
    );

    Observation {
        position,
        tz_approx: time_zone(position),
        constellation,
        ts_bow,
        types: retained.iter().map(|c| types[*c].clone()).collect(),
        t: times.values,
        clock_offsets: times.first.iter().map(|r| clock_offsets[*r]).collect(),
        events: times.first.iter().map(|r| events[*r]).collect(),
        sys,
        prns,
        svs: sats.values,
        sv_ind,
        observations,
        is_vis,
        vis_prn,
        ephs: None,
        alignment: None,
    }
}
