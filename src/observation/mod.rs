//! GPS observation files
use std::{collections::BTreeMap, io::BufRead, path::Path, str::FromStr, sync::Arc};

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod parsing;

use crate::{
    alignment::{align, Alignment},
    epoch::EpochFlag,
    error::Error,
    mapping::{map_ephemerides, Warning},
    navigation::{Ephemeris, Navigation},
    prelude::{Constellation, Duration, Epoch, SV},
    reader::BufferedReader,
};

/// [Observation] is the content of an observation file:
/// one (epochs, satellites) matrix per observable.
///
/// ```text
///        svs
///      .-----.
///    t | C1  |
///      | L1  |
///      | ..  |
///      '-----'
/// ```
///
/// Missing values are NaN, `is_vis` tells whether any observable
/// was reported for a given (epoch, satellite) cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Approximate receiver position, ECEF [m]
    pub position: (f64, f64, f64),
    /// Approximate time zone [h], from the receiver longitude
    pub tz_approx: i8,
    /// Header satellite system
    pub constellation: Constellation,
    /// Start of the GPS week of the first observation
    pub ts_bow: Epoch,
    /// Observables reported at least once, in header order
    pub types: Vec<String>,
    /// Strictly increasing epochs, in seconds since `ts_bow`
    pub t: Vec<f64>,
    /// Receiver clock offset of each epoch [s]
    pub clock_offsets: Vec<f64>,
    /// Event flag of each epoch
    pub events: Vec<EpochFlag>,
    /// System letter of each satellite column
    pub sys: Vec<char>,
    /// PRN of each satellite column
    pub prns: Vec<u8>,
    /// Strictly increasing satellite labels, like "G05"
    pub svs: Vec<String>,
    /// Satellite label to column index
    pub sv_ind: BTreeMap<String, usize>,
    /// (t, svs) matrix of each observable
    pub observations: BTreeMap<String, DMatrix<f64>>,
    /// True where at least one observable exists
    pub is_vis: DMatrix<bool>,
    /// PRN where visible, NaN elsewhere
    pub vis_prn: DMatrix<f64>,
    /// (t, svs) matrix of ephemerides, once mapped
    pub ephs: Option<DMatrix<Option<Arc<Ephemeris>>>>,
    /// Shared axes with a reference station, once aligned
    pub alignment: Option<Alignment>,
}

impl Observation {
    /// Parses an observation file from any [BufRead]able interface.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<Self, Error> {
        parsing::parse(reader)
    }
    /// Parses an observation file. Files terminated by `.gz`
    /// are decompressed on the fly, when compiled with the `flate2` feature.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut reader = BufferedReader::new(path)?;
        Self::from_reader(&mut reader)
    }
    /// Parses a gzip compressed observation file, whatever its extension.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut reader = BufferedReader::gzip(path)?;
        Self::from_reader(&mut reader)
    }
    /// Number of epochs
    pub fn len(&self) -> usize {
        self.t.len()
    }
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
    /// Returns (epochs, satellites) dimensions
    pub fn shape(&self) -> (usize, usize) {
        self.is_vis.shape()
    }
    /// Returns the matrix of observable `code`, None if it was never reported.
    /// ```
    /// use rnx::prelude::*;
    /// let obs = Observation::from_file("test_resources/OBS/V2/demo0650.22o")
    ///     .unwrap();
    /// let c1 = obs.get("C1")
    ///     .unwrap();
    /// assert_eq!(c1.shape(), obs.shape());
    /// assert!(obs.get("S1").is_none());
    /// ```
    pub fn get(&self, code: &str) -> Option<&DMatrix<f64>> {
        self.observations.get(code)
    }
    /// Iterates (code, matrix) pairs in header order
    pub fn observables(&self) -> impl Iterator<Item = (&str, &DMatrix<f64>)> + '_ {
        self.types
            .iter()
            .filter_map(|code| Some((code.as_str(), self.observations.get(code)?)))
    }
    /// Absolute [Epoch] of row `k`
    pub fn epoch(&self, k: usize) -> Option<Epoch> {
        self.t.get(k).map(|t| self.ts_bow + Duration::from_seconds(*t))
    }
    /// Column of satellite `label`
    pub fn column(&self, label: &str) -> Option<usize> {
        self.sv_ind.get(label).copied()
    }
    /// [Constellation] of column `j`
    pub fn constellation_of(&self, j: usize) -> Option<Constellation> {
        let sys = self.sys.get(j)?;
        Constellation::from_str(&sys.to_string()).ok()
    }
    /// Satellite of column `j`
    pub fn sv(&self, j: usize) -> Option<SV> {
        Some(SV::new(self.constellation_of(j)?, *self.prns.get(j)?))
    }
    /// Columns of satellites that belong to `constellation`
    pub fn columns(&self, constellation: Constellation) -> Vec<usize> {
        (0..self.svs.len())
            .filter(|j| self.constellation_of(*j) == Some(constellation))
            .collect()
    }
    /// Mapped [Ephemeris] at row `k`, column `j`, if any
    pub fn ephemeris(&self, k: usize, j: usize) -> Option<&Ephemeris> {
        self.ephs.as_ref()?.get((k, j))?.as_deref()
    }
    /// Maps the nearest valid [Ephemeris] of `nav` onto each (epoch, satellite)
    /// cell, and returns the data quality [Warning]s encountered.
    /// A previous mapping is replaced.
    pub fn attach_ephemerides(&mut self, nav: &Navigation) -> Vec<Warning> {
        let mapping = map_ephemerides(nav, self);
        self.ephs = Some(mapping.ephs);
        mapping.warnings
    }
    /// Identifies the satellites and epochs shared with `reference`.
    pub fn align_with(&mut self, reference: &Observation) {
        self.alignment = Some(align(reference, self));
    }
}
