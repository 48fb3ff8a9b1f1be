//! Sorted set algorithms used to compact raw rows into dense matrices
mod intersect;
mod unique;

pub use intersect::{intersect, Intersection};
pub use unique::{unique, Unique};
