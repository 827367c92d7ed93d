//! Gear selector resolution
//!
//! Automatic and electric drivetrains report a raw selector position that is
//! looked up in the DBC value table for the active topology. Manual
//! gearboxes have no selector signal, so a selector letter is derived from
//! the reverse light, handbrake and clutch instead. Both paths end in the
//! same letter-to-gear mapping, and anything unmapped becomes
//! [`GearShifter::Unknown`].

use crate::decode::as_code;
use crate::signals::dbc;
use crate::types::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Canonical gear consumed by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearShifter {
    Park,
    Reverse,
    Neutral,
    Drive,
    Eco,
    Sport,
    Manumatic,
    #[default]
    Unknown,
}

impl GearShifter {
    /// Map a selector letter from the value table to a gear
    pub fn from_letter(letter: &str) -> Self {
        match letter {
            "P" => GearShifter::Park,
            "R" => GearShifter::Reverse,
            "N" => GearShifter::Neutral,
            "D" => GearShifter::Drive,
            "E" => GearShifter::Eco,
            "S" => GearShifter::Sport,
            "T" => GearShifter::Manumatic,
            _ => GearShifter::Unknown,
        }
    }
}

impl fmt::Display for GearShifter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GearShifter::Park => "park",
            GearShifter::Reverse => "reverse",
            GearShifter::Neutral => "neutral",
            GearShifter::Drive => "drive",
            GearShifter::Eco => "eco",
            GearShifter::Sport => "sport",
            GearShifter::Manumatic => "manumatic",
            GearShifter::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Symbolic value table of the gear selector signal (raw value to letter)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShifterValues {
    values: HashMap<i64, String>,
}

impl ShifterValues {
    /// Create an empty table; every raw lookup will miss
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the selector value descriptions from a DBC file
    pub fn from_dbc_file(path: &Path, message: &str, signal: &str) -> Result<Self> {
        let values = dbc::load_value_table(path, message, signal)?;
        log::info!(
            "Loaded {} shifter positions from {}.{}",
            values.len(),
            message,
            signal
        );
        Ok(values.into_iter().collect())
    }

    pub fn insert(&mut self, raw: i64, letter: impl Into<String>) {
        self.values.insert(raw, letter.into());
    }

    /// Letter for a raw selector value, if the table has one
    pub fn get(&self, raw: f64) -> Option<&str> {
        as_code(raw).and_then(|code| self.values.get(&code)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for ShifterValues {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(raw, letter)| (raw, letter.into()))
                .collect(),
        }
    }
}

/// What the drivetrain signals said about the selector this cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectedGear {
    /// Raw selector position, resolved through the value table
    Raw(f64),
    /// Selector letter derived from other signals
    Letter(&'static str),
}

/// Resolve a detected selector state to a canonical gear
///
/// `None` means no gear could be derived for this drivetrain.
pub fn parse_gear_shifter(detected: Option<DetectedGear>, values: &ShifterValues) -> GearShifter {
    let letter = match detected {
        Some(DetectedGear::Raw(raw)) => values.get(raw),
        Some(DetectedGear::Letter(letter)) => Some(letter),
        None => None,
    };

    letter.map(GearShifter::from_letter).unwrap_or_default()
}

/// Inputs of the manual gearbox derivation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualGearInputs {
    pub reverse_light: bool,
    pub standstill: bool,
    pub hand_brake_set: bool,
    pub clutch_pressed: bool,
}

/// Derive a selector letter for a manual gearbox
///
/// Reverse light wins over everything, park needs both standstill and the
/// handbrake, and a pressed clutch reads as neutral.
pub fn manual_gear(inputs: ManualGearInputs) -> &'static str {
    if inputs.reverse_light {
        "R"
    } else if inputs.standstill && inputs.hand_brake_set {
        "P"
    } else if inputs.clutch_pressed {
        "N"
    } else {
        "D"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mqb_values() -> ShifterValues {
        [(5, "P"), (6, "R"), (7, "N"), (8, "D"), (9, "S"), (10, "E"), (14, "T"), (15, "Fehler")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_raw_lookup() {
        let values = mqb_values();
        let gear = |raw| parse_gear_shifter(Some(DetectedGear::Raw(raw)), &values);

        assert_eq!(gear(5.0), GearShifter::Park);
        assert_eq!(gear(6.0), GearShifter::Reverse);
        assert_eq!(gear(7.0), GearShifter::Neutral);
        assert_eq!(gear(8.0), GearShifter::Drive);
        assert_eq!(gear(9.0), GearShifter::Sport);
        assert_eq!(gear(10.0), GearShifter::Eco);
        assert_eq!(gear(14.0), GearShifter::Manumatic);
    }

    #[test]
    fn test_lookup_miss_is_unknown() {
        let values = mqb_values();
        let gear = |raw| parse_gear_shifter(Some(DetectedGear::Raw(raw)), &values);

        assert_eq!(gear(15.0), GearShifter::Unknown); // described, but not a gear
        assert_eq!(gear(3.0), GearShifter::Unknown); // not described at all
        assert_eq!(gear(5.5), GearShifter::Unknown);
        assert_eq!(
            parse_gear_shifter(Some(DetectedGear::Raw(5.0)), &ShifterValues::new()),
            GearShifter::Unknown
        );
        assert_eq!(parse_gear_shifter(None, &values), GearShifter::Unknown);
    }

    #[test]
    fn test_derived_letter_bypasses_table() {
        let empty = ShifterValues::new();
        assert_eq!(
            parse_gear_shifter(Some(DetectedGear::Letter("R")), &empty),
            GearShifter::Reverse
        );
        assert_eq!(
            parse_gear_shifter(Some(DetectedGear::Letter("X")), &empty),
            GearShifter::Unknown
        );
    }

    #[test]
    fn test_manual_reverse_light_has_precedence() {
        for standstill in [false, true] {
            for hand_brake_set in [false, true] {
                for clutch_pressed in [false, true] {
                    let inputs = ManualGearInputs {
                        reverse_light: true,
                        standstill,
                        hand_brake_set,
                        clutch_pressed,
                    };
                    assert_eq!(manual_gear(inputs), "R");
                }
            }
        }
    }

    #[test]
    fn test_manual_park_neutral_drive() {
        let park = ManualGearInputs {
            standstill: true,
            hand_brake_set: true,
            clutch_pressed: true,
            ..Default::default()
        };
        assert_eq!(manual_gear(park), "P");

        let rolling_with_handbrake = ManualGearInputs {
            hand_brake_set: true,
            clutch_pressed: true,
            ..Default::default()
        };
        assert_eq!(manual_gear(rolling_with_handbrake), "N");

        let stopped_without_handbrake = ManualGearInputs {
            standstill: true,
            ..Default::default()
        };
        assert_eq!(manual_gear(stopped_without_handbrake), "D");

        assert_eq!(manual_gear(ManualGearInputs::default()), "D");
    }

    #[test]
    fn test_gear_display() {
        assert_eq!(GearShifter::Manumatic.to_string(), "manumatic");
        assert_eq!(GearShifter::default(), GearShifter::Unknown);
    }
}
