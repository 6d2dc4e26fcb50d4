//! Configuration loading
//!
//! Reads a workcell TOML file, or falls back to the layout embedded at
//! build time.

pub mod loader;
pub mod parse;

pub use loader::{embedded_config, load_config, protocol_for, EMBEDDED_CONFIG};
pub use parse::parse_config;
