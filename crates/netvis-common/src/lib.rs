//! # netvis Common
//!
//! Shared error type, error macros and tracing setup used by every netvis
//! crate.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;

// Re-export commonly used types
pub use error::{Result, VisError};
pub use logging::{build_env_filter, init_logging, parse_env_filter, LogFormat, LoggingConfig};
