//! # netvis Config
//!
//! YAML configuration for the netvis pipelines: schema, defaults,
//! environment overrides and validation.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
