//! VW Car State Library
//!
//! Decodes the CAN signals of Volkswagen Group vehicles into one canonical
//! vehicle state per control cycle, for a driver-assistance controller.
//!
//! # Architecture
//!
//! The library sits between an external CAN parser and the controller:
//! - Declares per-topology signal catalogs the parser must serve
//! - Recombines VW's split magnitude/sign signals and converts units
//! - Smooths wheel speed into velocity and acceleration
//! - Resolves gear, cruise status and button states
//!
//! The library does NOT:
//! - Parse raw CAN frames or check message freshness
//! - Send anything on the bus
//! - Debounce buttons or filter anything but velocity
//!
//! Replay of recorded signal tables is in the application layer (vw-carstate-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use vw_carstate::{CarState, CarStateConfig, NetworkModel, ShifterValues, SignalTable, TransmissionType};
//! use std::path::Path;
//!
//! let config = CarStateConfig::new()
//!     .with_network_model(NetworkModel::Mqb)
//!     .with_transmission(TransmissionType::Automatic);
//!
//! // Selector value descriptions come from the vehicle's DBC
//! let (message, signal) = config.network_model.shifter_signal().unwrap();
//! let shifter_values = ShifterValues::from_dbc_file(Path::new("vw_mqb_2010.dbc"), message, signal).unwrap();
//!
//! let mut car = CarState::new(&config, shifter_values);
//!
//! let gateway = SignalTable::new()
//!     .with("ESP_19", "ESP_VL_Radgeschw_02", 36.0)
//!     .with("Getriebe_11", "GE_Fahrstufe", 8.0);
//! car.update(&gateway, &SignalTable::new(), config.transmission);
//!
//! println!("v_ego={} gear={}", car.state().v_ego, car.state().gear_shifter);
//! ```

pub mod buttons;
pub mod car_state;
pub mod config;
pub mod cruise;
pub mod decode;
pub mod estimator;
pub mod gear;
pub mod signals;
pub mod types;

// Re-export main types for convenience
pub use buttons::{Button, ButtonStates};
pub use car_state::{CarState, CruisePassthrough, VehicleState};
pub use config::{CanBusConfig, CarStateConfig};
pub use cruise::CruiseStatus;
pub use estimator::VelocityEstimator;
pub use gear::{GearShifter, ShifterValues};
pub use signals::{BusKind, SignalCatalog};
pub use types::{CarStateError, NetworkModel, Result, SignalTable, TransmissionType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a default car state decodes an empty cycle
        let mut car = CarState::new(&CarStateConfig::new(), ShifterValues::new());
        car.update(&SignalTable::new(), &SignalTable::new(), TransmissionType::Automatic);
        assert!(car.state().standstill);
        assert_eq!(car.state().gear_shifter, GearShifter::Unknown);
    }
}
