//! Control button latches
//!
//! Button states persist across update cycles: a cycle overwrites only the
//! buttons its topology has signals for, everything else keeps its previous
//! value. Edges pass straight through; any debouncing is up to the consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PQ blinker byte value while the left blinker is on
pub const PQ_LEFT_BLINKER_CODE: f64 = 17.0;

/// PQ blinker byte value while the right blinker is on
pub const PQ_RIGHT_BLINKER_CODE: f64 = 18.0;

/// Canonical control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    LeftBlinker,
    RightBlinker,
    AccelCruise,
    DecelCruise,
    Cancel,
    SetCruise,
    ResumeCruise,
    GapAdjustCruise,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::LeftBlinker,
        Button::RightBlinker,
        Button::AccelCruise,
        Button::DecelCruise,
        Button::Cancel,
        Button::SetCruise,
        Button::ResumeCruise,
        Button::GapAdjustCruise,
    ];
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Button::LeftBlinker => "leftBlinker",
            Button::RightBlinker => "rightBlinker",
            Button::AccelCruise => "accelCruise",
            Button::DecelCruise => "decelCruise",
            Button::Cancel => "cancel",
            Button::SetCruise => "setCruise",
            Button::ResumeCruise => "resumeCruise",
            Button::GapAdjustCruise => "gapAdjustCruise",
        };
        write!(f, "{}", name)
    }
}

/// Latched state of every canonical button, all released by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonStates {
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub accel_cruise: bool,
    pub decel_cruise: bool,
    pub cancel: bool,
    pub set_cruise: bool,
    pub resume_cruise: bool,
    pub gap_adjust_cruise: bool,
}

impl ButtonStates {
    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::LeftBlinker => self.left_blinker,
            Button::RightBlinker => self.right_blinker,
            Button::AccelCruise => self.accel_cruise,
            Button::DecelCruise => self.decel_cruise,
            Button::Cancel => self.cancel,
            Button::SetCruise => self.set_cruise,
            Button::ResumeCruise => self.resume_cruise,
            Button::GapAdjustCruise => self.gap_adjust_cruise,
        }
    }

    /// Overwrite one button with the current signal value
    pub fn set(&mut self, button: Button, pressed: bool) {
        let slot = match button {
            Button::LeftBlinker => &mut self.left_blinker,
            Button::RightBlinker => &mut self.right_blinker,
            Button::AccelCruise => &mut self.accel_cruise,
            Button::DecelCruise => &mut self.decel_cruise,
            Button::Cancel => &mut self.cancel,
            Button::SetCruise => &mut self.set_cruise,
            Button::ResumeCruise => &mut self.resume_cruise,
            Button::GapAdjustCruise => &mut self.gap_adjust_cruise,
        };
        *slot = pressed;
    }

    /// Buttons currently held
    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|button| self.get(*button))
    }

    /// Buttons whose state differs from `previous`
    pub fn changed_since(&self, previous: &ButtonStates) -> Vec<Button> {
        Button::ALL
            .into_iter()
            .filter(|button| self.get(*button) != previous.get(*button))
            .collect()
    }
}

/// Decode the PQ blinker byte into (left, right)
pub fn decode_blinker_byte(value: f64) -> (bool, bool) {
    (value == PQ_LEFT_BLINKER_CODE, value == PQ_RIGHT_BLINKER_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_all_released() {
        let buttons = ButtonStates::default();
        assert_eq!(buttons.pressed().count(), 0);
        for button in Button::ALL {
            assert!(!buttons.get(button));
        }
    }

    #[test]
    fn test_set_touches_only_one_button() {
        let mut buttons = ButtonStates::default();
        buttons.set(Button::ResumeCruise, true);
        buttons.set(Button::Cancel, true);
        buttons.set(Button::Cancel, false);

        assert_eq!(buttons.pressed().collect::<Vec<_>>(), vec![Button::ResumeCruise]);
        assert!(buttons.resume_cruise);
    }

    #[test]
    fn test_changed_since() {
        let before = ButtonStates::default();
        let mut after = before;
        after.set(Button::LeftBlinker, true);
        after.set(Button::GapAdjustCruise, true);

        assert_eq!(
            after.changed_since(&before),
            vec![Button::LeftBlinker, Button::GapAdjustCruise]
        );
        assert!(after.changed_since(&after).is_empty());
    }

    #[test]
    fn test_blinker_byte() {
        assert_eq!(decode_blinker_byte(16.0), (false, false));
        assert_eq!(decode_blinker_byte(17.0), (true, false));
        assert_eq!(decode_blinker_byte(18.0), (false, true));
        assert_eq!(decode_blinker_byte(19.0), (false, false));
    }

    #[test]
    fn test_button_names() {
        assert_eq!(Button::GapAdjustCruise.to_string(), "gapAdjustCruise");
        assert_eq!(Button::ALL.len(), 8);
    }
}
