//! TOML parsing

use workcell_core::config::WorkcellConfig;

/// Parse a workcell configuration from TOML text
///
/// Only syntax and shape are checked here; call
/// [`WorkcellConfig::validate`] for names, speed and placements.
pub fn parse_config(text: &str) -> Result<WorkcellConfig, toml::de::Error> {
    toml::from_str(text)
}
