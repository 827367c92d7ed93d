//! Core types for the car state library
//!
//! This module defines the inputs the library consumes once per control cycle
//! (signal tables handed over by the external CAN parser) and the small closed
//! enums fixed at construction time (network topology, transmission type).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Result type for car state operations
pub type Result<T> = std::result::Result<T, CarStateError>;

/// Errors that can occur while setting up a car state
///
/// None of these are produced by [`crate::CarState::update`]; a control cycle
/// always completes.
#[derive(Debug, thiserror::Error)]
pub enum CarStateError {
    #[error("Failed to parse DBC file: {0}")]
    DbcParseError(String),

    #[error("Signal not found: {0}")]
    SignalNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Decoded signal values for one CAN bus, keyed by message then signal name
///
/// This is the table the external parser produces every cycle. Values are
/// physical (already scaled) and read-only from the library's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalTable {
    messages: HashMap<String, HashMap<String, f64>>,
}

impl SignalTable {
    /// Create an empty signal table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a signal value, replacing any previous value
    pub fn insert(&mut self, message: &str, signal: &str, value: f64) {
        self.messages
            .entry(message.to_string())
            .or_default()
            .insert(signal.to_string(), value);
    }

    /// Builder method: set a signal value
    pub fn with(mut self, message: &str, signal: &str, value: f64) -> Self {
        self.insert(message, signal, value);
        self
    }

    /// Get the current value of a signal
    pub fn get(&self, message: &str, signal: &str) -> Option<f64> {
        self.messages
            .get(message)
            .and_then(|signals| signals.get(signal))
            .copied()
    }

    pub fn contains(&self, message: &str, signal: &str) -> bool {
        self.get(message, signal).is_some()
    }

    /// All signal values carried by one message
    pub fn message(&self, message: &str) -> Option<&HashMap<String, f64>> {
        self.messages.get(message)
    }

    /// Total number of signal values across all messages
    pub fn len(&self) -> usize {
        self.messages.values().map(|signals| signals.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-vehicle network generation (topology)
///
/// Fixed when a [`crate::CarState`] is constructed and never changed after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkModel {
    /// MQB platform: rich ACC status code, per-door signals, EPS fault flag
    #[default]
    Mqb,
    /// PQ35/PQ46 platform: reduced cruise status, driver door only
    Pq,
    /// Any other platform: empty catalogs, nothing is decoded
    Unsupported,
}

impl NetworkModel {
    /// The (message, signal) pair whose value table holds the shifter positions
    pub fn shifter_signal(&self) -> Option<(&'static str, &'static str)> {
        match self {
            NetworkModel::Mqb => Some(("Getriebe_11", "GE_Fahrstufe")),
            NetworkModel::Pq => Some(("Getriebe_1", "Waehlhebelposition__Getriebe_1_")),
            NetworkModel::Unsupported => None,
        }
    }
}

impl fmt::Display for NetworkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkModel::Mqb => write!(f, "mqb"),
            NetworkModel::Pq => write!(f, "pq"),
            NetworkModel::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl FromStr for NetworkModel {
    type Err = CarStateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mqb" => Ok(NetworkModel::Mqb),
            "pq" => Ok(NetworkModel::Pq),
            "unsupported" => Ok(NetworkModel::Unsupported),
            other => Err(CarStateError::InvalidConfig(format!(
                "unknown network model '{}'",
                other
            ))),
        }
    }
}

/// Transmission fitted to the vehicle, supplied by the vehicle parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionType {
    Automatic,
    Manual,
    /// Electric drive; the gear comes from the EV gear selector
    Electric,
    #[default]
    Unspecified,
}

impl fmt::Display for TransmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmissionType::Automatic => write!(f, "automatic"),
            TransmissionType::Manual => write!(f, "manual"),
            TransmissionType::Electric => write!(f, "electric"),
            TransmissionType::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl FromStr for TransmissionType {
    type Err = CarStateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "automatic" => Ok(TransmissionType::Automatic),
            "manual" => Ok(TransmissionType::Manual),
            "electric" => Ok(TransmissionType::Electric),
            "unspecified" => Ok(TransmissionType::Unspecified),
            other => Err(CarStateError::InvalidConfig(format!(
                "unknown transmission type '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_table_insert_and_get() {
        let mut table = SignalTable::new();
        table.insert("ESP_19", "ESP_VL_Radgeschw_02", 12.5);
        table.insert("ESP_19", "ESP_VR_Radgeschw_02", 12.7);

        assert_eq!(table.get("ESP_19", "ESP_VL_Radgeschw_02"), Some(12.5));
        assert_eq!(table.get("ESP_19", "ESP_HL_Radgeschw_02"), None);
        assert_eq!(table.get("ESP_05", "ESP_VL_Radgeschw_02"), None);
        assert_eq!(table.len(), 2);

        table.insert("ESP_19", "ESP_VL_Radgeschw_02", 13.0);
        assert_eq!(table.get("ESP_19", "ESP_VL_Radgeschw_02"), Some(13.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_signal_table_json_shape() {
        let json = r#"{"LWI_01": {"LWI_Lenkradwinkel": 42.5, "LWI_VZ_Lenkradwinkel": 1}}"#;
        let table: SignalTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.get("LWI_01", "LWI_Lenkradwinkel"), Some(42.5));
        assert_eq!(table.get("LWI_01", "LWI_VZ_Lenkradwinkel"), Some(1.0));
        assert!(table.message("LWI_01").is_some());
    }

    #[test]
    fn test_network_model_parsing() {
        assert_eq!("MQB".parse::<NetworkModel>().unwrap(), NetworkModel::Mqb);
        assert_eq!("pq".parse::<NetworkModel>().unwrap(), NetworkModel::Pq);
        assert!("mlb".parse::<NetworkModel>().is_err());
        assert_eq!(NetworkModel::Pq.to_string(), "pq");
    }

    #[test]
    fn test_transmission_parsing() {
        assert_eq!(
            "manual".parse::<TransmissionType>().unwrap(),
            TransmissionType::Manual
        );
        assert_eq!(
            "Electric".parse::<TransmissionType>().unwrap(),
            TransmissionType::Electric
        );
        assert!("cvt".parse::<TransmissionType>().is_err());
    }

    #[test]
    fn test_shifter_signal_per_topology() {
        assert_eq!(
            NetworkModel::Mqb.shifter_signal(),
            Some(("Getriebe_11", "GE_Fahrstufe"))
        );
        assert!(NetworkModel::Unsupported.shifter_signal().is_none());
    }
}
