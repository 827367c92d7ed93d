//! PQ35/PQ46 platform signal catalog
//!
//! Passenger and rear door states are not available on this network, and
//! the blinkers arrive as one enumerated byte instead of two flags.

use crate::signals::catalog::{MessageCheck, SignalSpec};

pub(crate) const GATEWAY_SIGNALS: &[SignalSpec] = &[
    // signal, message, default
    SignalSpec::new("Steering_Angle", "EPS_1", 0.0),                           // Absolute steering angle
    SignalSpec::new("Steering_Angle_Sign", "EPS_1", 0.0),                      // Steering angle sign
    SignalSpec::new("Lenkradwinkel_Geschwindigkeit", "Lenkwinkel_1", 0.0),     // Absolute steering rate
    SignalSpec::new("Lenkradwinkel_Geschwindigkeit_S", "Lenkwinkel_1", 0.0),   // Steering rate sign
    SignalSpec::new("Radgeschw__VL_4_1", "Bremse_3", 0.0),                     // ABS wheel speed, front left
    SignalSpec::new("Radgeschw__VR_4_1", "Bremse_3", 0.0),                     // ABS wheel speed, front right
    SignalSpec::new("Radgeschw__HL_4_1", "Bremse_3", 0.0),                     // ABS wheel speed, rear left
    SignalSpec::new("Radgeschw__HR_4_1", "Bremse_3", 0.0),                     // ABS wheel speed, rear right
    SignalSpec::new("Giergeschwindigkeit", "Bremse_5", 0.0),                   // Absolute yaw rate
    SignalSpec::new("Vorzeichen_der_Giergeschwindigk", "Bremse_5", 0.0),       // Yaw rate sign
    SignalSpec::new("Fahrertuerkontakt", "Gateway_Komfort_1", 0.0),            // Door open, driver
    SignalSpec::new("Blinker_links_4_1", "Kombi_1", 0.0),                      // Left turn signal on
    SignalSpec::new("Blinker_rechts_4_1", "Kombi_1", 0.0),                     // Right turn signal on
    SignalSpec::new("Waehlhebelposition__Getriebe_1_", "Getriebe_1", 0.0),     // Gear selector position
    SignalSpec::new("Gurtschalter_Fahrer", "Airbag_1", 0.0),                   // Seatbelt status, driver
    SignalSpec::new("Gurtschalter_Beifahrer", "Airbag_1", 0.0),                // Seatbelt status, passenger
    SignalSpec::new("Bremstestschalter", "Motor_2", 0.0),                      // Brake pedal pressed
    SignalSpec::new("Bremslichtschalter", "Motor_2", 0.0),                     // Brakes applied
    SignalSpec::new("Bremsdruck", "Bremse_5", 0.0),                            // Brake pressure applied
    SignalSpec::new("Vorzeichen_Bremsdruck", "Bremse_5", 0.0),                 // Brake pressure sign
    SignalSpec::new("Fahrpedalwert_oder_Drosselklapp", "Motor_1", 0.0),        // Accelerator pedal value
    SignalSpec::new("Driver_Torque", "EPS_1", 0.0),                            // Absolute driver torque input
    SignalSpec::new("Driver_Torque_Sign", "EPS_1", 0.0),                       // Driver torque input sign
    SignalSpec::new("ESP_Passiv_getastet", "Bremse_1", 0.0),                   // Stability control disabled
    SignalSpec::new("MFA_v_Einheit_02", "Einheiten_1", 0.0),                   // MPH vs KMH speed display
    SignalSpec::new("Bremsinfo", "Kombi_1", 0.0),                              // Manual handbrake applied
    SignalSpec::new("GRA_Status", "Motor_2", 0.0),                             // ACC engagement status
    SignalSpec::new("Hauptschalter", "GRA_neu", 0.0),                          // ACC button, on/off
    SignalSpec::new("Abbrechen", "GRA_neu", 0.0),                              // ACC button, cancel
    SignalSpec::new("Setzen", "GRA_neu", 0.0),                                 // ACC button, set
    SignalSpec::new("Lang_Tip_up", "GRA_neu", 0.0),                            // ACC button, accel, long press
    SignalSpec::new("Lang_Tip_down", "GRA_neu", 0.0),                          // ACC button, decel, long press
    SignalSpec::new("Kurz_Tip_up", "GRA_neu", 0.0),                            // ACC button, accel, short press
    SignalSpec::new("Kurz_Tip_down", "GRA_neu", 0.0),                          // ACC button, decel, short press
    SignalSpec::new("Wiederaufnahme", "GRA_neu", 0.0),                         // ACC button, resume
    SignalSpec::new("Zeitlueckenverstellung", "GRA_neu", 0.0),                 // ACC button, time gap adj
    SignalSpec::new("Rechtslenker", "Systeminfo_1", 0.0),                      // RHD vs LHD construction
    SignalSpec::new("Frei_Gateway_Komfort_1_4", "Gateway_Komfort_1", 16.0),    // Blinker state byte
];

pub(crate) const GATEWAY_CHECKS: &[MessageCheck] = &[
    // message, frequency
    MessageCheck::new("Bremse_3", 100),         // J104 ABS/ESP
    MessageCheck::new("Bremse_5", 50),          // J104 ABS/ESP
    MessageCheck::new("Bremse_1", 50),          // J104 ABS/ESP
    MessageCheck::new("EPS_1", 100),            // J500 steering assist
    MessageCheck::new("Getriebe_1", 100),       // J743 auto transmission control
    MessageCheck::new("Lenkwinkel_1", 100),     // J500 steering assist
    MessageCheck::new("Airbag_1", 50),          // J234 airbag control
    MessageCheck::new("GRA_neu", 50),           // Steering wheel control buttons
    MessageCheck::new("Kombi_1", 50),           // J285 instrument cluster
    MessageCheck::new("Motor_1", 100),          // J623 engine control
    MessageCheck::new("Motor_2", 50),           // J623 engine control
    MessageCheck::new("Systeminfo_1", 10),      // System information
    MessageCheck::new("Einheiten_1", 1),        // Unit preferences
    MessageCheck::new("Gateway_Komfort_1", 1),  // Comfort gateway
];

pub(crate) const EXTENDED_SIGNALS: &[SignalSpec] = &[
    SignalSpec::new("GRA_Set_Speed", "ACC_XX02", 0.0), // ACC cruise set point
];

pub(crate) const EXTENDED_CHECKS: &[MessageCheck] = &[
    MessageCheck::new("ACC_XX02", 50), // J428 ACC radar
];
