//! Configuration management for the model manager services.
//!
//! Provides environment detection, configuration loading from YAML files and
//! `APP_`-prefixed environment variables, and configuration types shared
//! between the workspace crates.

mod environment;
mod load;
pub mod shared;

pub use environment::*;
pub use load::*;
