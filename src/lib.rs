//! `sales-dash` library crate.
//!
//! The binary (`sales-dash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes or binding ports
//! - the filter/projection engine stays a plain function over plain data
//! - modules are reusable (e.g., batch reporting, future exporters)

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod server;
