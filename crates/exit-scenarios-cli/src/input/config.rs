use std::fs;
use tracing::debug;

use exit_scenarios_core::config::{ConfigFormat, EngineConfig};

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let canonical = super::file::resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let config = EngineConfig::parse(&contents, ConfigFormat::from_path(path))
        .map_err(|e| format!("Invalid config '{}': {}", canonical.display(), e))?;
    debug!(path = %canonical.display(), "loaded engine config");
    Ok(config)
}
