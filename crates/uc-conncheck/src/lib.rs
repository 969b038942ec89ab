//! Connectivity Check for the AuthZ Service
//!
//! Enumerates every object and edge the service exposes, resolves their
//! type metadata, and repeats until stopped. Intended as a smoke test:
//! the first downstream failure ends the run with an error describing
//! which call failed and for which item.

pub mod config;
pub mod runner;

pub use config::{ConfigError, ConncheckConfig};
pub use runner::{run, run_pass, PassError};
