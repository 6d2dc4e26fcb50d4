//! Host simulator for the plate-handling workcell
//!
//! - Configuration loading (TOML file or embedded default)
//! - Protocol runs with real-time or instant pacing
//! - Console reports

pub mod config;
pub mod report;
pub mod run;
