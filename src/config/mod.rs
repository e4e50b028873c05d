//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/pyanalyzer/config.toml)
//! 3. Project config (.pyanalyzer/config.toml)
//! 4. Environment variables (PYANALYZER_*)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
