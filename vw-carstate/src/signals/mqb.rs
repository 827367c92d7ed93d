//! MQB platform signal catalog

use crate::signals::catalog::{MessageCheck, SignalSpec};

pub(crate) const GATEWAY_SIGNALS: &[SignalSpec] = &[
    // signal, message, default
    SignalSpec::new("LWI_Lenkradwinkel", "LWI_01", 0.0),                // Absolute steering angle
    SignalSpec::new("LWI_VZ_Lenkradwinkel", "LWI_01", 0.0),             // Steering angle sign
    SignalSpec::new("LWI_Lenkradw_Geschw", "LWI_01", 0.0),              // Absolute steering rate
    SignalSpec::new("LWI_VZ_Lenkradw_Geschw", "LWI_01", 0.0),           // Steering rate sign
    SignalSpec::new("ESP_VL_Radgeschw_02", "ESP_19", 0.0),              // ABS wheel speed, front left
    SignalSpec::new("ESP_VR_Radgeschw_02", "ESP_19", 0.0),              // ABS wheel speed, front right
    SignalSpec::new("ESP_HL_Radgeschw_02", "ESP_19", 0.0),              // ABS wheel speed, rear left
    SignalSpec::new("ESP_HR_Radgeschw_02", "ESP_19", 0.0),              // ABS wheel speed, rear right
    SignalSpec::new("ESP_Gierrate", "ESP_02", 0.0),                     // Absolute yaw rate
    SignalSpec::new("ESP_VZ_Gierrate", "ESP_02", 0.0),                  // Yaw rate sign
    SignalSpec::new("ZV_FT_offen", "Gateway_72", 0.0),                  // Door open, driver
    SignalSpec::new("ZV_BT_offen", "Gateway_72", 0.0),                  // Door open, passenger
    SignalSpec::new("ZV_HFS_offen", "Gateway_72", 0.0),                 // Door open, rear left
    SignalSpec::new("ZV_HBFS_offen", "Gateway_72", 0.0),                // Door open, rear right
    SignalSpec::new("ZV_HD_offen", "Gateway_72", 0.0),                  // Trunk or hatch open
    SignalSpec::new("BH_Blinker_li", "Gateway_72", 0.0),                // Left turn signal on
    SignalSpec::new("BH_Blinker_re", "Gateway_72", 0.0),                // Right turn signal on
    SignalSpec::new("BCM1_Rueckfahrlicht_Schalter", "Gateway_72", 0.0), // Reverse light switch
    SignalSpec::new("GE_Fahrstufe", "Getriebe_11", 0.0),                // Auto trans gear selector position
    SignalSpec::new("GearPosition", "EV_Gearshift", 0.0),               // EV gear selector position
    SignalSpec::new("AB_Gurtschloss_FA", "Airbag_02", 0.0),             // Seatbelt status, driver
    SignalSpec::new("AB_Gurtschloss_BF", "Airbag_02", 0.0),             // Seatbelt status, passenger
    SignalSpec::new("ESP_Fahrer_bremst", "ESP_05", 0.0),                // Brake pedal pressed
    SignalSpec::new("ESP_Status_Bremsdruck", "ESP_05", 0.0),            // Brakes applied
    SignalSpec::new("ESP_Bremsdruck", "ESP_05", 0.0),                   // Brake pressure applied
    SignalSpec::new("MO_Fahrpedalrohwert_01", "Motor_20", 0.0),         // Accelerator pedal value
    SignalSpec::new("MO_Kuppl_schalter", "Motor_14", 0.0),              // Clutch switch
    SignalSpec::new("Driver_Strain", "EPS_01", 0.0),                    // Absolute driver torque input
    SignalSpec::new("Driver_Strain_VZ", "EPS_01", 0.0),                 // Driver torque input sign
    SignalSpec::new("HCA_Ready", "EPS_01", 0.0),                        // Steering rack HCA support configured
    SignalSpec::new("ESP_Tastung_passiv", "ESP_21", 0.0),               // Stability control disabled
    SignalSpec::new("KBI_MFA_v_Einheit_02", "Einheiten_01", 0.0),       // MPH vs KMH speed display
    SignalSpec::new("KBI_Handbremse", "Kombi_01", 0.0),                 // Manual handbrake applied
    SignalSpec::new("TSK_Fahrzeugmasse_02", "Motor_16", 0.0),           // Estimated vehicle mass
    SignalSpec::new("GRA_Hauptschalter", "GRA_ACC_01", 0.0),            // ACC button, on/off
    SignalSpec::new("GRA_Abbrechen", "GRA_ACC_01", 0.0),                // ACC button, cancel
    SignalSpec::new("GRA_Tip_Setzen", "GRA_ACC_01", 0.0),               // ACC button, set
    SignalSpec::new("GRA_Tip_Hoch", "GRA_ACC_01", 0.0),                 // ACC button, increase or accel
    SignalSpec::new("GRA_Tip_Runter", "GRA_ACC_01", 0.0),               // ACC button, decrease or decel
    SignalSpec::new("GRA_Tip_Wiederaufnahme", "GRA_ACC_01", 0.0),       // ACC button, resume
    SignalSpec::new("GRA_Verstellung_Zeitluecke", "GRA_ACC_01", 0.0),   // ACC button, time gap adj
    SignalSpec::new("GRA_Typ_Hauptschalter", "GRA_ACC_01", 0.0),        // ACC main button type
    SignalSpec::new("GRA_Tip_Stufe_2", "GRA_ACC_01", 0.0),              // Stalk type related
    SignalSpec::new("GRA_ButtonTypeInfo", "GRA_ACC_01", 0.0),           // Stalk type related
    SignalSpec::new("COUNTER", "GRA_ACC_01", 0.0),                      // GRA_ACC_01 message counter
];

pub(crate) const GATEWAY_CHECKS: &[MessageCheck] = &[
    // message, frequency
    MessageCheck::new("LWI_01", 100),       // J500 steering assist
    MessageCheck::new("EPS_01", 100),       // J500 steering assist
    MessageCheck::new("ESP_19", 100),       // J104 ABS/ESP
    MessageCheck::new("ESP_02", 50),        // J104 ABS/ESP
    MessageCheck::new("ESP_05", 50),        // J104 ABS/ESP
    MessageCheck::new("ESP_21", 50),        // J104 ABS/ESP
    MessageCheck::new("Motor_20", 50),      // J623 engine control
    MessageCheck::new("GRA_ACC_01", 33),    // Steering wheel control buttons
    MessageCheck::new("Getriebe_11", 20),   // J743 auto transmission control
    MessageCheck::new("EV_Gearshift", 10),  // EV gear selector
    MessageCheck::new("Gateway_72", 10),    // J533 CAN gateway
    MessageCheck::new("Motor_14", 10),      // J623 engine control
    MessageCheck::new("Airbag_02", 5),      // J234 airbag control
    MessageCheck::new("Kombi_01", 2),       // J285 instrument cluster
    MessageCheck::new("Motor_16", 2),       // J623 engine control
    MessageCheck::new("Einheiten_01", 1),   // Unit preferences
];

pub(crate) const EXTENDED_SIGNALS: &[SignalSpec] = &[
    SignalSpec::new("ACC_Status_ACC", "ACC_06", 0.0), // ACC engagement status
    SignalSpec::new("ACC_Typ", "ACC_06", 0.0),        // ACC type (follow to stop, stop&go)
    SignalSpec::new("SetSpeed", "ACC_02", 0.0),       // ACC set speed
];

pub(crate) const EXTENDED_CHECKS: &[MessageCheck] = &[
    MessageCheck::new("ACC_06", 50), // J428 ACC radar
    MessageCheck::new("ACC_02", 17), // J428 ACC radar
];

pub(crate) const CAMERA_SIGNALS: &[SignalSpec] = &[
    SignalSpec::new("Kombi_Lamp_Green", "LDW_02", 0.0), // Lane Assist status LED
];

pub(crate) const CAMERA_CHECKS: &[MessageCheck] = &[
    MessageCheck::new("LDW_02", 10), // R242 driver assistance camera
];
