#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
extern crate gnss_rs as gnss;

#[cfg(test)]
mod tests;

mod buffer;
mod fields;
mod header;
mod reader;

pub mod algorithm;
pub mod alignment;
pub mod constants;
pub mod epoch;
pub mod error;
pub mod loader;
pub mod mapping;
pub mod navigation;
pub mod observation;
pub mod types;
pub mod version;

pub use loader::read;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        alignment::Alignment,
        epoch::EpochFlag,
        error::{Error, ParsingError, UsageError},
        loader::{file_type, read, Dataset, Loader, Product},
        mapping::{Mapping, Warning},
        navigation::{Ephemeris, Navigation, DEFAULT_FIT_INTERVAL},
        observation::Observation,
        types::Type,
        version::Version,
    };
    // Pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}
