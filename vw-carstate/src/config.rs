//! Car state configuration types
//!
//! Everything here is fixed for the lifetime of a [`crate::CarState`]. The
//! transmission type is also passed to every update call, matching how the
//! vehicle parameters are handed to the control loop.

use crate::types::{NetworkModel, TransmissionType};
use serde::{Deserialize, Serialize};

/// Driver torque above which the driver is considered to be steering
pub const DEFAULT_STEER_DRIVER_ALLOWANCE: f64 = 80.0;

/// Configuration for a car state instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarStateConfig {
    /// Network topology of the vehicle
    #[serde(default)]
    pub network_model: NetworkModel,

    /// Transmission fitted to the vehicle
    #[serde(default)]
    pub transmission: TransmissionType,

    /// Driver torque threshold for `steering_pressed`
    #[serde(default = "default_steer_driver_allowance")]
    pub steer_driver_allowance: f64,

    /// CAN bus index for each parsed bus
    #[serde(default)]
    pub buses: CanBusConfig,
}

fn default_steer_driver_allowance() -> f64 {
    DEFAULT_STEER_DRIVER_ALLOWANCE
}

impl Default for CarStateConfig {
    fn default() -> Self {
        Self {
            network_model: NetworkModel::default(),
            transmission: TransmissionType::default(),
            steer_driver_allowance: DEFAULT_STEER_DRIVER_ALLOWANCE,
            buses: CanBusConfig::default(),
        }
    }
}

/// CAN bus numbering as seen by the external parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanBusConfig {
    /// Gateway (powertrain) bus
    #[serde(default = "default_gateway_bus")]
    pub gateway: u8,
    /// Extended bus carrying the ACC radar
    #[serde(default = "default_extended_bus")]
    pub extended: u8,
    /// Driver assistance camera bus
    #[serde(default = "default_camera_bus")]
    pub camera: u8,
}

fn default_gateway_bus() -> u8 {
    0
}

fn default_extended_bus() -> u8 {
    2
}

fn default_camera_bus() -> u8 {
    1
}

impl Default for CanBusConfig {
    fn default() -> Self {
        Self {
            gateway: default_gateway_bus(),
            extended: default_extended_bus(),
            camera: default_camera_bus(),
        }
    }
}

impl CarStateConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the network topology
    pub fn with_network_model(mut self, network_model: NetworkModel) -> Self {
        self.network_model = network_model;
        self
    }

    /// Builder method: set the transmission type
    pub fn with_transmission(mut self, transmission: TransmissionType) -> Self {
        self.transmission = transmission;
        self
    }

    /// Builder method: set the driver torque threshold
    pub fn with_steer_driver_allowance(mut self, allowance: f64) -> Self {
        self.steer_driver_allowance = allowance;
        self
    }

    /// Builder method: set the CAN bus numbering
    pub fn with_buses(mut self, buses: CanBusConfig) -> Self {
        self.buses = buses;
        self
    }
}
