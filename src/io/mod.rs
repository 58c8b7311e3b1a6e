//! Input helpers.
//!
//! - CSV ingest + structural validation (`ingest`)

pub mod ingest;

pub use ingest::*;
