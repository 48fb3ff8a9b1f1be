//! integrated tests
pub mod toolkit;

mod mapping;
