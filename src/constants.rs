//! GPS constants (IS-GPS-200)

/// Speed of light in vacuum [m/s]
pub const SPEED_OF_LIGHT: f64 = 299792458.0;

/// π as defined for GPS orbital calculations
pub const GPS_PI: f64 = 3.1415926535898;

/// Earth gravitational constant
pub struct GM;

impl GM {
    /// WGS-84 value used by GPS [m³/s²]
    pub const GPS: f64 = 3.986005E14;
}

/// Earth rotation rate
pub struct Omega;

impl Omega {
    /// Sidereal Earth rate [rad/s]
    pub const GPS: f64 = 7.2921151467E-5;
}

/// GPS carrier signals
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Carrier {
    L1,
    L2,
}

impl Carrier {
    /// Carrier frequency [Hz]
    pub const fn frequency(&self) -> f64 {
        match self {
            Self::L1 => 1575.42E6,
            Self::L2 => 1227.6E6,
        }
    }
    /// Carrier wavelength [m]
    pub fn wavelength(&self) -> f64 {
        SPEED_OF_LIGHT / self.frequency()
    }
    /// Identifies the carrier from the frequency band
    /// digit of an observation code, like "L1" or "C2".
    pub fn from_observable(code: &str) -> Option<Self> {
        match code.chars().nth(1) {
            Some('1') => Some(Self::L1),
            Some('2') => Some(Self::L2),
            _ => None,
        }
    }
}
