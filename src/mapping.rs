//! Ephemeris to observation mapping
use std::sync::Arc;

use nalgebra::DMatrix;

#[cfg(feature = "log")]
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    algorithm::intersect,
    navigation::{Ephemeris, Navigation},
    observation::Observation,
};

/// Time span tolerance when looking for an overlap [s]
const OVERLAP_SLACK: f64 = 3600.0;

/// Initial time distance of each cell [s]
const WEEK_SECONDS: f64 = 604800.0;

/// Non fatal data quality [Warning]s
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Warning {
    /// Navigation and observation time spans do not overlap
    NoTimeOverlap,
    /// No satellite is described by both files
    NoPrnOverlap,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoTimeOverlap => write!(f, "navigation and observation times do not overlap"),
            Self::NoPrnOverlap => write!(f, "navigation and observation PRNs do not overlap"),
        }
    }
}

/// [Mapping] result: one optional [Ephemeris] per (epoch, satellite) cell
/// of the observation, and the [Warning]s raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub ephs: DMatrix<Option<Arc<Ephemeris>>>,
    pub warnings: Vec<Warning>,
}

impl Mapping {
    fn empty(k: usize, j: usize) -> Self {
        Self {
            ephs: DMatrix::from_element(k, j, None),
            warnings: Vec::new(),
        }
    }
    fn warn(mut self, warning: Warning) -> Self {
        #[cfg(feature = "log")]
        warn!("mapping: {}", warning);
        self.warnings.push(warning);
        self
    }
    /// Number of cells that received an [Ephemeris]
    pub fn mapped(&self) -> usize {
        self.ephs.iter().filter(|eph| eph.is_some()).count()
    }
}

/// Selects, for each (epoch, satellite) cell of `obs`, the [Ephemeris] of
/// `nav` closest in time among those whose fit interval contains the epoch.
/// Only GPS satellites receive ephemerides. When two candidates are
/// equally distant, the later one wins.
pub fn map_ephemerides(nav: &Navigation, obs: &Observation) -> Mapping {
    let t = &obs.t;
    let mut mapping = Mapping::empty(t.len(), obs.svs.len());

    // express navigation times relative to the observation week
    let shift = (nav.ts_bow - obs.ts_bow).to_seconds();
    let t_oc = nav.t_oc.iter().map(|t_oc| t_oc + shift).collect::<Vec<_>>();

    let overlap = match (t_oc.first(), t_oc.last(), t.first(), t.last()) {
        (Some(nav_start), Some(nav_end), Some(obs_start), Some(obs_end)) => {
            nav_start - OVERLAP_SLACK <= *obs_end && nav_end + OVERLAP_SLACK >= *obs_start
        },
        _ => false,
    };
    if !overlap {
        return mapping.warn(Warning::NoTimeOverlap);
    }

    let gps_prns = obs
        .sys
        .iter()
        .zip(obs.prns.iter())
        .map(|(sys, prn)| if *sys == 'G' { *prn } else { 0 })
        .collect::<Vec<_>>();

    let shared = intersect(&nav.prns, &gps_prns);
    if shared.is_empty() {
        return mapping.warn(Warning::NoPrnOverlap);
    }

    for (j_nav, j_obs) in shared.left.iter().zip(shared.right.iter()) {
        let mut best = vec![WEEK_SECONDS; t.len()];
        for (k, t_oc) in t_oc.iter().enumerate() {
            let eph = match &nav.ephs[(k, *j_nav)] {
                Some(eph) => eph,
                None => continue,
            };
            let (start, end) = (t_oc - eph.t_fit / 2.0, t_oc + eph.t_fit / 2.0);
            for (n, t) in t.iter().enumerate() {
                if *t < start || *t > end {
                    continue;
                }
                let distance = (t_oc - t).abs();
                if distance <= best[n] {
                    mapping.ephs[(n, *j_obs)] = Some(Arc::clone(eph));
                    best[n] = distance;
                }
            }
        }
    }

    #[cfg(feature = "log")]
    debug!(
        "mapping: {} shared satellites, {} cells mapped",
        shared.len(),
        mapping.mapped()
    );

    mapping
}
