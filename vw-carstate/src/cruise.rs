//! Cruise control status resolution
//!
//! The two network generations expose different status granularity, so each
//! has its own resolver. MQB reports a radar status code that can signal a
//! fault; PQ only has the main switch and an engagement flag, so a fault can
//! never be detected there and is always reported as false.

use crate::decode::as_code;
use serde::{Deserialize, Serialize};

/// MQB set speeds above this are the radar's "no speed set" value (~90.69 m/s)
pub const MQB_SET_SPEED_LIMIT: f64 = 90.0;

/// PQ set speed meaning the driver has not set a speed yet
pub const PQ_SET_SPEED_UNSET: f64 = 255.0;

/// Externally visible cruise control status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseStatus {
    pub fault: bool,
    pub available: bool,
    pub enabled: bool,
}

impl CruiseStatus {
    const DISABLED: Self = Self {
        fault: false,
        available: false,
        enabled: false,
    };

    const READY: Self = Self {
        fault: false,
        available: true,
        enabled: false,
    };

    const ENGAGED: Self = Self {
        fault: false,
        available: true,
        enabled: true,
    };

    const FAULT: Self = Self {
        fault: true,
        available: false,
        enabled: false,
    };

    /// Resolve the MQB `ACC_Status_ACC` code
    ///
    /// 1 is switched off, 2 is ready, 3 to 5 are engaged (regulating, driver
    /// overriding, overrun). Everything else, including the 6 and 7 seen on
    /// comms loss or blocked sensors, is a fault.
    pub fn from_acc_status(status: f64) -> Self {
        match as_code(status) {
            Some(1) => Self::DISABLED,
            Some(2) => Self::READY,
            Some(3..=5) => Self::ENGAGED,
            _ => Self::FAULT,
        }
    }

    /// Resolve the PQ main switch and `GRA_Status` engagement value
    pub fn from_gra_status(main_switch: bool, status: f64) -> Self {
        Self {
            fault: false,
            available: main_switch,
            enabled: matches!(as_code(status), Some(1) | Some(2)),
        }
    }
}

/// Zero the MQB set speed when the radar reports "no speed set"
pub fn sanitize_mqb_set_speed(set_speed: f64) -> f64 {
    if set_speed > MQB_SET_SPEED_LIMIT {
        0.0
    } else {
        set_speed
    }
}

/// Zero the PQ set speed when no speed has been set yet
pub fn sanitize_pq_set_speed(set_speed: f64) -> f64 {
    if set_speed == PQ_SET_SPEED_UNSET {
        0.0
    } else {
        set_speed
    }
}
