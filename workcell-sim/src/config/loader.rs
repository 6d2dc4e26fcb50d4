//! Configuration sources
//!
//! A file given on the command line wins; otherwise the embedded
//! `workcell.toml` is used.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use workcell_core::config::{WorkcellConfig, REFERENCE_PLATE};
use workcell_core::Protocol;

use super::parse::parse_config;

/// Embedded default configuration
/// Edit workcell.toml and rebuild to change the default layout
pub const EMBEDDED_CONFIG: &str = include_str!("../../workcell.toml");

/// Parse and validate the embedded configuration
pub fn embedded_config() -> Result<WorkcellConfig> {
    let config = parse_config(EMBEDDED_CONFIG).context("embedded workcell.toml is invalid")?;
    config
        .validate()
        .context("embedded workcell.toml failed validation")?;
    Ok(config)
}

/// Load the configuration from `path`, or the embedded default
pub fn load_config(path: Option<&Path>) -> Result<WorkcellConfig> {
    let Some(path) = path else {
        info!("using embedded configuration");
        return embedded_config();
    };

    info!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config =
        parse_config(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", path.display()))?;

    debug!(
        workcell = %config.name,
        devices = config.devices.len(),
        plates = config.plates.len(),
        custom_protocol = config.protocol.is_some(),
        "configuration loaded"
    );
    Ok(config)
}

/// Protocol to run for `config`
///
/// The configured protocol if there is one, otherwise cell screening on the
/// first placed plate.
pub fn protocol_for(config: &WorkcellConfig) -> Protocol {
    if let Some(protocol) = &config.protocol {
        return Protocol::from(protocol);
    }

    let plate = config
        .plates
        .first()
        .map_or(REFERENCE_PLATE, |p| p.id.as_str());
    Protocol::cell_screening(plate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workcell_core::config::PlacementConfig;
    use workcell_core::StepAction;

    #[test]
    fn test_embedded_matches_reference() {
        assert_eq!(embedded_config().unwrap(), WorkcellConfig::reference());
    }

    #[test]
    fn test_load_without_path_is_embedded() {
        assert_eq!(load_config(None).unwrap(), WorkcellConfig::reference());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Some(Path::new("/nonexistent/workcell.toml")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/workcell.toml"));
    }

    #[test]
    fn test_default_protocol_follows_first_plate() {
        let mut config = WorkcellConfig::reference();
        config.plates = vec![PlacementConfig {
            device: "Storage".into(),
            id: "P7".into(),
        }];

        let protocol = protocol_for(&config);
        assert_eq!(protocol.label, "Automated Cell Line Screening");
        assert!(matches!(
            &protocol.steps[0].action,
            StepAction::Transfer { plate, .. } if plate == "P7"
        ));
    }

    #[test]
    fn test_default_protocol_without_plates() {
        let mut config = WorkcellConfig::reference();
        config.plates.clear();
        let protocol = protocol_for(&config);
        assert!(matches!(
            &protocol.steps[0].action,
            StepAction::Transfer { plate, .. } if plate == REFERENCE_PLATE
        ));
    }
}
