//! Replay configuration loading and parsing (config.toml)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vw_carstate::{CarStateConfig, NetworkModel};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub vehicle: CarStateConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    /// Signal table recordings, one JSON cycle per line
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// DBC holding the gear selector value descriptions
    pub dbc_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Write `<stem>.state.jsonl` files here instead of stdout
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}

impl AppConfig {
    /// Reject settings no car state could run with
    pub fn validate(&self) -> Result<()> {
        let vehicle = &self.vehicle;

        if !vehicle.steer_driver_allowance.is_finite() || vehicle.steer_driver_allowance < 0.0 {
            bail!(
                "steer_driver_allowance must be a non-negative number, got {}",
                vehicle.steer_driver_allowance
            );
        }

        let buses = vehicle.buses;
        if buses.gateway == buses.extended
            || buses.gateway == buses.camera
            || buses.extended == buses.camera
        {
            bail!(
                "CAN bus indices must be distinct (gateway {}, extended {}, camera {})",
                buses.gateway,
                buses.extended,
                buses.camera
            );
        }

        if self.input.dbc_file.is_none() && vehicle.network_model != NetworkModel::Unsupported {
            log::warn!("No DBC file configured, gear will always be unknown for raw selector values");
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
