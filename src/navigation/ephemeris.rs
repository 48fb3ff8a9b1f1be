//! GPS broadcast ephemeris
use crate::{
    constants::{Omega, GM, GPS_PI},
    prelude::{Constellation, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fit interval applied when the broadcast value is not positive [s]
pub const DEFAULT_FIT_INTERVAL: f64 = 4.0 * 3600.0;

/// [Ephemeris] is one satellite orbital and clock model,
/// valid within its fit interval.
/// All times are expressed in seconds since the start
/// of the GPS week the record belongs to.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ephemeris {
    /// Satellite PRN
    pub prn: u8,
    /// Time of clock [s]
    pub t_oc: f64,
    /// Time of ephemeris [s]
    pub t_oe: f64,
    /// Transmission time of message [s]
    pub t_sv: f64,
    /// Clock bias [s]
    pub a_f0: f64,
    /// Clock drift [s.s⁻¹]
    pub a_f1: f64,
    /// Clock drift rate [s.s⁻²]
    pub a_f2: f64,
    /// Group delay differential [s]
    pub t_gd: f64,
    /// Fit interval [s]
    pub t_fit: f64,
    /// Square root of the semi major axis [m^½]
    pub sqrt_a: f64,
    /// Mean anomaly at reference time [rad]
    pub m_0: f64,
    /// Mean motion difference from computed value [rad.s⁻¹]
    pub dn: f64,
    /// Eccentricity
    pub e: f64,
    /// Argument of perigee [rad]
    pub omega: f64,
    /// Inclination angle at reference time [rad]
    pub i_0: f64,
    /// Inclination rate of change [rad.s⁻¹]
    pub i_dot: f64,
    /// Longitude of ascending node at weekly epoch [rad]
    pub omega_0: f64,
    /// Right ascension rate of change [rad.s⁻¹]
    pub omega_dot: f64,
    /// Cosine harmonic correction to the argument of latitude [rad]
    pub cuc: f64,
    /// Sine harmonic correction to the argument of latitude [rad]
    pub cus: f64,
    /// Cosine harmonic correction to the orbit radius [m]
    pub crc: f64,
    /// Sine harmonic correction to the orbit radius [m]
    pub crs: f64,
    /// Cosine harmonic correction to the inclination [rad]
    pub cic: f64,
    /// Sine harmonic correction to the inclination [rad]
    pub cis: f64,
    /// GPS week number
    pub week: u32,
    /// SV health, 0 means healthy
    pub health: u32,
    /// SV accuracy [m]
    pub accuracy: f64,
    /// Issue of data, ephemeris
    pub iode: u32,
    /// Issue of data, clock
    pub iodc: u32,
    /// Codes on L2 channel
    pub l2_codes: f64,
    /// L2 P data flag
    pub l2p_flag: f64,
}

/// [Kepler] stores all keplerian parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kepler {
    /// semi major axis (m)
    pub a: f64,
    /// Eccentricity (n.a)
    pub e: f64,
    /// Inclination angle at reference time (rad)
    pub i_0: f64,
    /// Longitude of ascending node at weekly epoch (rad)
    pub omega_0: f64,
    /// Mean anomaly at reference time (rad)
    pub m_0: f64,
    /// argument of perigee (rad)
    pub omega: f64,
    /// Time of ephemeris (s)
    pub toe: f64,
}

/// Orbit [Perturbations]
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Perturbations {
    /// Mean motion difference from computed value [rad.s⁻¹]
    pub dn: f64,
    /// Inclination rate of change [rad.s⁻¹]
    pub i_dot: f64,
    /// Right ascension rate of change [rad.s⁻¹]
    pub omega_dot: f64,
    pub cus: f64,
    pub cuc: f64,
    pub cis: f64,
    pub cic: f64,
    pub crs: f64,
    pub crc: f64,
}

impl Ephemeris {
    /// Returns the satellite this record describes
    pub fn sv(&self) -> SV {
        SV::new(Constellation::GPS, self.prn)
    }
    /// Retrieves Orbit Keplerian parameters.
    pub fn kepler(&self) -> Kepler {
        Kepler {
            a: self.semi_major_axis(),
            e: self.e,
            i_0: self.i_0,
            omega_0: self.omega_0,
            m_0: self.m_0,
            omega: self.omega,
            toe: self.t_oe,
        }
    }
    /// Retrieves Orbit [Perturbations]
    pub fn perturbations(&self) -> Perturbations {
        Perturbations {
            dn: self.dn,
            i_dot: self.i_dot,
            omega_dot: self.omega_dot,
            cus: self.cus,
            cuc: self.cuc,
            cis: self.cis,
            cic: self.cic,
            crs: self.crs,
            crc: self.crc,
        }
    }
    /// Semi major axis [m]
    pub fn semi_major_axis(&self) -> f64 {
        self.sqrt_a.powi(2)
    }
    /// Corrected mean motion [rad.s⁻¹]
    pub fn mean_motion(&self) -> f64 {
        let a = self.semi_major_axis();
        (GM::GPS / a.powi(3)).sqrt() + self.dn
    }
    /// Orbital period from the corrected mean motion [s]
    pub fn period(&self) -> f64 {
        2.0 * GPS_PI / self.mean_motion()
    }
    /// Longitude of the ascending node at time `t` (seconds of week), corrected
    /// for Earth rotation [rad]
    pub fn ascending_node(&self, t: f64) -> f64 {
        self.omega_0 + (self.omega_dot - Omega::GPS) * (t - self.t_oe) - Omega::GPS * self.t_oe
    }
    /// Validity window `(start, end)` centered on the time of clock [s]
    pub fn fit_window(&self) -> (f64, f64) {
        (self.t_oc - self.t_fit / 2.0, self.t_oc + self.t_fit / 2.0)
    }
    /// True if `t` (seconds of week) lies within the fit interval
    pub fn fits(&self, t: f64) -> bool {
        let (start, end) = self.fit_window();
        t >= start && t <= end
    }
    pub fn is_healthy(&self) -> bool {
        self.health == 0
    }
}
