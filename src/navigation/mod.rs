//! GPS navigation files
use std::{io::BufRead, path::Path, sync::Arc};

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod ephemeris;
mod parsing;

pub use ephemeris::{Ephemeris, Kepler, Perturbations, DEFAULT_FIT_INTERVAL};

use crate::{
    error::Error,
    prelude::{Constellation, Duration, Epoch, SV},
    reader::BufferedReader,
};

/// [Navigation] is the content of a GPS navigation file:
/// ephemerides indexed by time of clock (rows) and PRN (columns).
///
/// ```text
///          prns
///        .------.
///   t_oc | ephs |
///        '------'
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Navigation {
    /// Start of the GPS week of the first record
    pub ts_bow: Epoch,
    /// Strictly increasing times of clock, in seconds since `ts_bow`
    pub t_oc: Vec<f64>,
    /// Strictly increasing satellite PRNs
    pub prns: Vec<u8>,
    /// (t_oc, prns) matrix of [Ephemeris], empty where no record exists
    pub ephs: DMatrix<Option<Arc<Ephemeris>>>,
}

impl Navigation {
    /// Parses a navigation file from any [BufRead]able interface.
    pub fn from_reader<R: BufRead>(reader: &mut R) -> Result<Self, Error> {
        parsing::parse(reader)
    }
    /// Parses a navigation file. Files terminated by `.gz`
    /// are decompressed on the fly, when compiled with the `flate2` feature.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut reader = BufferedReader::new(path)?;
        Self::from_reader(&mut reader)
    }
    /// Parses a gzip compressed navigation file, whatever its extension.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut reader = BufferedReader::gzip(path)?;
        Self::from_reader(&mut reader)
    }
    /// Number of distinct times of clock
    pub fn len(&self) -> usize {
        self.t_oc.len()
    }
    pub fn is_empty(&self) -> bool {
        self.t_oc.is_empty()
    }
    /// Returns (time, satellite) dimensions
    pub fn shape(&self) -> (usize, usize) {
        self.ephs.shape()
    }
    /// Absolute [Epoch] of row `k`
    pub fn epoch(&self, k: usize) -> Option<Epoch> {
        self.t_oc
            .get(k)
            .map(|t| self.ts_bow + Duration::from_seconds(*t))
    }
    /// Satellite of column `j`
    pub fn sv(&self, j: usize) -> Option<SV> {
        self.prns.get(j).map(|prn| SV::new(Constellation::GPS, *prn))
    }
    /// Column of satellite `prn`
    pub fn column(&self, prn: u8) -> Option<usize> {
        self.prns.binary_search(&prn).ok()
    }
    /// [Ephemeris] at row `k`, column `j`, if any
    pub fn ephemeris(&self, k: usize, j: usize) -> Option<&Ephemeris> {
        self.ephs.get((k, j)).and_then(|eph| eph.as_deref())
    }
    /// Iterates all [Ephemeris] of satellite `prn`, in chronological order
    pub fn ephemerides(&self, prn: u8) -> impl Iterator<Item = &Ephemeris> + '_ {
        let column = self.column(prn);
        (0..self.len()).filter_map(move |k| self.ephemeris(k, column?))
    }
}
