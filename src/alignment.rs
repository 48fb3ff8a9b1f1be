//! Reference station alignment
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{algorithm::intersect, observation::Observation};

/// [Alignment] describes the satellites and epochs two observations
/// have in common. `j_ref[n]` and `j_obs[n]` are the columns of the n-th
/// shared satellite, `k_ref[n]` and `k_obs[n]` the rows of the n-th shared epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    pub j_ref: Vec<usize>,
    pub j_obs: Vec<usize>,
    pub k_ref: Vec<usize>,
    pub k_obs: Vec<usize>,
}

impl Alignment {
    /// Number of shared satellites
    pub fn satellites(&self) -> usize {
        self.j_obs.len()
    }
    /// Number of shared epochs
    pub fn epochs(&self) -> usize {
        self.k_obs.len()
    }
    /// Iterates matching (reference, observation) cells
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), (usize, usize))> + '_ {
        self.k_ref.iter().zip(self.k_obs.iter()).flat_map(move |(kr, ko)| {
            self.j_ref
                .iter()
                .zip(self.j_obs.iter())
                .map(move |(jr, jo)| ((*kr, *jr), (*ko, *jo)))
        })
    }
}

/// Intersects satellite labels then epochs of `reference` and `obs`.
/// Values are not copied.
pub fn align(reference: &Observation, obs: &Observation) -> Alignment {
    let svs = intersect(&reference.svs, &obs.svs);
    let t = intersect(&reference.t, &obs.t);
    Alignment {
        j_ref: svs.left,
        j_obs: svs.right,
        k_ref: t.left,
        k_obs: t.right,
    }
}
