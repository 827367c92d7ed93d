//! Car state API
//!
//! [`CarState`] is the entry point of the library. It is built once per drive
//! session for a fixed network topology and then updated in place once per
//! control cycle from the signal tables of the gateway and extended buses.
//! Every update completes and leaves a fully populated [`VehicleState`];
//! missing signals read as their catalog defaults.

use crate::buttons::{decode_blinker_byte, Button, ButtonStates};
use crate::config::CarStateConfig;
use crate::cruise::{sanitize_mqb_set_speed, sanitize_pq_set_speed, CruiseStatus};
use crate::decode::{apply_sign, brake_fraction, deg_to_rad, gas_fraction, kph_to_ms, mean};
use crate::estimator::VelocityEstimator;
use crate::gear::{
    manual_gear, parse_gear_shifter, DetectedGear, GearShifter, ManualGearInputs, ShifterValues,
};
use crate::signals::{BusKind, SignalCatalog, SignalReader};
use crate::types::{NetworkModel, SignalTable, TransmissionType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw mean wheel speed (m/s) below which the vehicle is at standstill
pub const STANDSTILL_THRESHOLD: f64 = 0.1;

/// MQB driver seatbelt buckle state meaning "latched"
const MQB_SEATBELT_LATCHED: f64 = 3.0;

const MQB_DOOR_SIGNALS: [&str; 5] = [
    "ZV_FT_offen",   // driver
    "ZV_BT_offen",   // passenger
    "ZV_HFS_offen",  // rear left
    "ZV_HBFS_offen", // rear right
    "ZV_HD_offen",   // trunk or hatch
];

/// Cruise control fields relayed unchanged to the actuation path
///
/// The controller needs these to synthesize button messages that the radar
/// will accept; the library does not interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CruisePassthrough {
    /// Main switch state
    pub main_switch: f64,
    /// Main switch hardware type
    pub main_switch_type: f64,
    /// Button type information (wheel buttons vs. stalk)
    pub button_type_info: f64,
    /// Secondary tip level flag
    pub tip_stufe_2: f64,
    /// Message counter of the button message
    pub counter: f64,
}

/// Canonical vehicle state produced once per control cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    // Kinematics (m/s, m/s^2)
    pub wheel_speed_fl: f64,
    pub wheel_speed_fr: f64,
    pub wheel_speed_rl: f64,
    pub wheel_speed_rr: f64,
    pub v_ego_raw: f64,
    pub v_ego: f64,
    pub a_ego: f64,
    pub standstill: bool,

    // Steering: angle in deg, rate in deg/s, yaw rate in rad/s
    pub steering_angle: f64,
    pub steering_rate: f64,
    pub steering_torque: f64,
    pub steering_pressed: bool,
    pub yaw_rate: f64,

    // Pedals and brakes
    pub gas: f64,
    pub gas_pressed: bool,
    pub brake: f64,
    pub brake_pressed: bool,
    pub brake_lights: bool,

    // Drivetrain; reverse light and handbrake are only read for manual gearboxes
    pub clutch_pressed: bool,
    pub gear_shifter: GearShifter,
    pub reverse_light: Option<bool>,
    pub hand_brake_set: Option<bool>,

    // Body
    pub door_open: bool,
    pub seatbelt_unlatched: bool,
    pub display_metric_units: bool,

    // Cruise control
    pub cruise: CruiseStatus,
    pub acc_set_speed: f64,
    pub cruise_passthrough: CruisePassthrough,

    pub buttons: ButtonStates,

    // Faults
    pub steering_fault: bool,
    pub stability_control_disabled: bool,
    pub parking_brake_set: bool,
}

/// Decodes one vehicle's signal tables into a [`VehicleState`]
#[derive(Debug, Clone)]
pub struct CarState {
    network_model: NetworkModel,
    steer_driver_allowance: f64,
    shifter_values: ShifterValues,
    gateway: SignalCatalog,
    extended: SignalCatalog,
    camera: SignalCatalog,
    v_ego_kf: VelocityEstimator,
    reported_fallbacks: HashSet<(&'static str, &'static str)>,
    state: VehicleState,
}

impl CarState {
    /// Create a car state for the configured topology
    ///
    /// `shifter_values` is the value table of the topology's gear selector
    /// signal (see [`NetworkModel::shifter_signal`]).
    pub fn new(config: &CarStateConfig, shifter_values: ShifterValues) -> Self {
        let model = config.network_model;

        log::info!(
            "Car state for {} network, {} transmission, {} shifter positions",
            model,
            config.transmission,
            shifter_values.len()
        );
        if model == NetworkModel::Unsupported {
            log::warn!("Unsupported network model, no signals will be decoded");
        } else if shifter_values.is_empty() {
            log::warn!("Empty shifter value table, selector positions will read as unknown gear");
        }

        Self {
            network_model: model,
            steer_driver_allowance: config.steer_driver_allowance,
            shifter_values,
            gateway: SignalCatalog::for_network(model, BusKind::Gateway, &config.buses),
            extended: SignalCatalog::for_network(model, BusKind::Extended, &config.buses),
            camera: SignalCatalog::for_network(model, BusKind::Camera, &config.buses),
            v_ego_kf: VelocityEstimator::new(),
            reported_fallbacks: HashSet::new(),
            state: VehicleState::default(),
        }
    }

    pub fn network_model(&self) -> NetworkModel {
        self.network_model
    }

    pub fn shifter_values(&self) -> &ShifterValues {
        &self.shifter_values
    }

    /// Signal catalog the external parser must serve for a bus
    pub fn catalog(&self, kind: BusKind) -> &SignalCatalog {
        match kind {
            BusKind::Gateway => &self.gateway,
            BusKind::Extended => &self.extended,
            BusKind::Camera => &self.camera,
        }
    }

    /// Current state, as left by the last update
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Owned copy of the current state, for publishing outside the loop
    pub fn snapshot(&self) -> VehicleState {
        self.state.clone()
    }

    /// Decode one control cycle
    pub fn update(
        &mut self,
        gateway: &SignalTable,
        extended: &SignalTable,
        transmission: TransmissionType,
    ) {
        let mut gw = self.gateway.reader(gateway);
        let mut ex = self.extended.reader(extended);
        let buttons_before = self.state.buttons;

        match self.network_model {
            NetworkModel::Mqb => self.update_mqb(&mut gw, &mut ex, transmission),
            NetworkModel::Pq => self.update_pq(&mut gw, &mut ex, transmission),
            NetworkModel::Unsupported => {}
        }

        for button in self.state.buttons.changed_since(&buttons_before) {
            log::debug!(
                "Button {} {}",
                button,
                if self.state.buttons.get(button) { "pressed" } else { "released" }
            );
        }

        self.report_fallbacks(BusKind::Gateway, gw.fallbacks());
        self.report_fallbacks(BusKind::Extended, ex.fallbacks());

        log::trace!(
            "v_ego={:.3} a_ego={:.3} angle={:.1} gear={} cruise={:?}",
            self.state.v_ego,
            self.state.a_ego,
            self.state.steering_angle,
            self.state.gear_shifter,
            self.state.cruise
        );
    }

    fn update_mqb(
        &mut self,
        gw: &mut SignalReader<'_>,
        ex: &mut SignalReader<'_>,
        transmission: TransmissionType,
    ) {
        // Vehicle speed and acceleration from ABS wheel speeds
        self.update_wheel_speeds([
            gw.value("ESP_19", "ESP_VL_Radgeschw_02"),
            gw.value("ESP_19", "ESP_VR_Radgeschw_02"),
            gw.value("ESP_19", "ESP_HL_Radgeschw_02"),
            gw.value("ESP_19", "ESP_HR_Radgeschw_02"),
        ]);

        // VW sends the sign of these in a separate signal
        let angle = apply_sign(
            gw.value("LWI_01", "LWI_Lenkradwinkel"),
            gw.value("LWI_01", "LWI_VZ_Lenkradwinkel"),
        );
        let rate = apply_sign(
            gw.value("LWI_01", "LWI_Lenkradw_Geschw"),
            gw.value("LWI_01", "LWI_VZ_Lenkradw_Geschw"),
        );
        let torque = apply_sign(
            gw.value("EPS_01", "Driver_Strain"),
            gw.value("EPS_01", "Driver_Strain_VZ"),
        );
        let yaw_rate = apply_sign(
            gw.value("ESP_02", "ESP_Gierrate"),
            gw.value("ESP_02", "ESP_VZ_Gierrate"),
        );
        self.update_steering(angle, rate, torque, yaw_rate);

        // ESP_Bremsdruck is a pressure in bar, scaled like the other pedals
        self.update_pedals(
            gw.value("Motor_20", "MO_Fahrpedalrohwert_01"),
            gw.value("ESP_05", "ESP_Bremsdruck"),
            gw.flag("ESP_05", "ESP_Fahrer_bremst"),
            gw.flag("ESP_05", "ESP_Status_Bremsdruck"),
        );

        let detected = match transmission {
            TransmissionType::Automatic => {
                self.state.clutch_pressed = false;
                Some(DetectedGear::Raw(gw.value("Getriebe_11", "GE_Fahrstufe")))
            }
            TransmissionType::Electric => {
                self.state.clutch_pressed = false;
                Some(DetectedGear::Raw(gw.value("EV_Gearshift", "GearPosition")))
            }
            TransmissionType::Manual => {
                let inputs = ManualGearInputs {
                    reverse_light: gw.flag("Gateway_72", "BCM1_Rueckfahrlicht_Schalter"),
                    standstill: self.state.standstill,
                    hand_brake_set: gw.flag("Kombi_01", "KBI_Handbremse"),
                    clutch_pressed: !gw.flag("Motor_14", "MO_Kuppl_schalter"),
                };
                self.state.clutch_pressed = inputs.clutch_pressed;
                self.state.reverse_light = Some(inputs.reverse_light);
                self.state.hand_brake_set = Some(inputs.hand_brake_set);
                Some(DetectedGear::Letter(manual_gear(inputs)))
            }
            TransmissionType::Unspecified => None,
        };
        self.set_gear(detected);

        let doors = MQB_DOOR_SIGNALS.map(|signal| gw.flag("Gateway_72", signal));
        self.state.door_open = doors.iter().any(|open| *open);
        self.state.seatbelt_unlatched =
            gw.value("Airbag_02", "AB_Gurtschloss_FA") != MQB_SEATBELT_LATCHED;
        // Speed unit preference; distance has its own setting we ignore
        self.state.display_metric_units = !gw.flag("Einheiten_01", "KBI_MFA_v_Einheit_02");

        self.set_cruise(
            CruiseStatus::from_acc_status(ex.value("ACC_06", "ACC_Status_ACC")),
            sanitize_mqb_set_speed(ex.value("ACC_02", "SetSpeed")),
        );

        // Both blinker signals land in the left blinker slot, so the right
        // blinker is never captured on MQB and left follows BH_Blinker_re.
        let buttons = &mut self.state.buttons;
        buttons.set(Button::LeftBlinker, gw.flag("Gateway_72", "BH_Blinker_li"));
        buttons.set(Button::LeftBlinker, gw.flag("Gateway_72", "BH_Blinker_re"));
        buttons.set(Button::AccelCruise, gw.flag("GRA_ACC_01", "GRA_Tip_Hoch"));
        buttons.set(Button::DecelCruise, gw.flag("GRA_ACC_01", "GRA_Tip_Runter"));
        buttons.set(Button::Cancel, gw.flag("GRA_ACC_01", "GRA_Abbrechen"));
        buttons.set(Button::SetCruise, gw.flag("GRA_ACC_01", "GRA_Tip_Setzen"));
        buttons.set(Button::ResumeCruise, gw.flag("GRA_ACC_01", "GRA_Tip_Wiederaufnahme"));
        buttons.set(Button::GapAdjustCruise, gw.flag("GRA_ACC_01", "GRA_Verstellung_Zeitluecke"));

        self.state.cruise_passthrough = CruisePassthrough {
            main_switch: gw.value("GRA_ACC_01", "GRA_Hauptschalter"),
            main_switch_type: gw.value("GRA_ACC_01", "GRA_Typ_Hauptschalter"),
            button_type_info: gw.value("GRA_ACC_01", "GRA_ButtonTypeInfo"),
            tip_stufe_2: gw.value("GRA_ACC_01", "GRA_Tip_Stufe_2"),
            counter: gw.value("GRA_ACC_01", "COUNTER"),
        };

        // Rack must be coded for HCA and not faulted
        self.state.steering_fault = !gw.flag("EPS_01", "HCA_Ready");
        // TODO: include an electronic parking brake check once its signal is mapped
        self.state.parking_brake_set = gw.flag("Kombi_01", "KBI_Handbremse");
        self.state.stability_control_disabled = gw.flag("ESP_21", "ESP_Tastung_passiv");
    }

    fn update_pq(
        &mut self,
        gw: &mut SignalReader<'_>,
        ex: &mut SignalReader<'_>,
        transmission: TransmissionType,
    ) {
        self.update_wheel_speeds([
            gw.value("Bremse_3", "Radgeschw__VL_4_1"),
            gw.value("Bremse_3", "Radgeschw__VR_4_1"),
            gw.value("Bremse_3", "Radgeschw__HL_4_1"),
            gw.value("Bremse_3", "Radgeschw__HR_4_1"),
        ]);

        let angle = apply_sign(
            gw.value("EPS_1", "Steering_Angle"),
            gw.value("EPS_1", "Steering_Angle_Sign"),
        );
        let rate = apply_sign(
            gw.value("Lenkwinkel_1", "Lenkradwinkel_Geschwindigkeit"),
            gw.value("Lenkwinkel_1", "Lenkradwinkel_Geschwindigkeit_S"),
        );
        let torque = apply_sign(
            gw.value("EPS_1", "Driver_Torque"),
            gw.value("EPS_1", "Driver_Torque_Sign"),
        );
        let yaw_rate = apply_sign(
            gw.value("Bremse_5", "Giergeschwindigkeit"),
            gw.value("Bremse_5", "Vorzeichen_der_Giergeschwindigk"),
        );
        self.update_steering(angle, rate, torque, yaw_rate);

        self.update_pedals(
            gw.value("Motor_1", "Fahrpedalwert_oder_Drosselklapp"),
            gw.value("Bremse_5", "Bremsdruck"),
            gw.flag("Motor_2", "Bremstestschalter"),
            gw.flag("Motor_2", "Bremslichtschalter"),
        );

        // No clutch, reverse light or handbrake mapping for manual PQ gearboxes yet
        let detected = match transmission {
            TransmissionType::Automatic => {
                self.state.clutch_pressed = false;
                Some(DetectedGear::Raw(
                    gw.value("Getriebe_1", "Waehlhebelposition__Getriebe_1_"),
                ))
            }
            _ => None,
        };
        self.set_gear(detected);

        // Only the driver door is visible on this network
        self.state.door_open = gw.flag("Gateway_Komfort_1", "Fahrertuerkontakt");
        self.state.seatbelt_unlatched = !gw.flag("Airbag_1", "Gurtschalter_Fahrer");
        self.state.display_metric_units = !gw.flag("Einheiten_1", "MFA_v_Einheit_02");

        self.set_cruise(
            CruiseStatus::from_gra_status(
                gw.flag("GRA_neu", "Hauptschalter"),
                gw.value("Motor_2", "GRA_Status"),
            ),
            sanitize_pq_set_speed(ex.value("ACC_XX02", "GRA_Set_Speed")),
        );

        let (left, right) = decode_blinker_byte(gw.value("Gateway_Komfort_1", "Frei_Gateway_Komfort_1_4"));
        let accel = gw.flag("GRA_neu", "Kurz_Tip_up") | gw.flag("GRA_neu", "Lang_Tip_up");
        let decel = gw.flag("GRA_neu", "Kurz_Tip_down") | gw.flag("GRA_neu", "Lang_Tip_down");

        let buttons = &mut self.state.buttons;
        buttons.set(Button::LeftBlinker, left);
        buttons.set(Button::RightBlinker, right);
        buttons.set(Button::AccelCruise, accel);
        buttons.set(Button::DecelCruise, decel);
        buttons.set(Button::Cancel, gw.flag("GRA_neu", "Abbrechen"));
        buttons.set(Button::SetCruise, gw.flag("GRA_neu", "Setzen"));
        buttons.set(Button::ResumeCruise, gw.flag("GRA_neu", "Wiederaufnahme"));
        buttons.set(Button::GapAdjustCruise, gw.flag("GRA_neu", "Zeitlueckenverstellung"));

        // GRA_neu has no type info or counter mapped; relay zeros
        self.state.cruise_passthrough = CruisePassthrough {
            main_switch: gw.value("GRA_neu", "Hauptschalter"),
            ..CruisePassthrough::default()
        };

        // No EPS coding or fault signal is known on PQ racks
        self.state.steering_fault = false;
        self.state.parking_brake_set = gw.flag("Kombi_1", "Bremsinfo");
        self.state.stability_control_disabled = gw.flag("Bremse_1", "ESP_Passiv_getastet");
    }

    fn update_wheel_speeds(&mut self, wheel_speeds_kph: [f64; 4]) {
        let [fl, fr, rl, rr] = wheel_speeds_kph.map(kph_to_ms);
        let state = &mut self.state;

        state.wheel_speed_fl = fl;
        state.wheel_speed_fr = fr;
        state.wheel_speed_rl = rl;
        state.wheel_speed_rr = rr;

        state.v_ego_raw = mean(&[fl, fr, rl, rr]);
        let (v_ego, a_ego) = self.v_ego_kf.update(state.v_ego_raw);
        state.v_ego = v_ego;
        state.a_ego = a_ego;
        state.standstill = state.v_ego_raw < STANDSTILL_THRESHOLD;
    }

    fn update_steering(&mut self, angle: f64, rate: f64, torque: f64, yaw_rate_deg: f64) {
        let state = &mut self.state;
        state.steering_angle = angle;
        state.steering_rate = rate;
        state.steering_torque = torque;
        state.steering_pressed = torque.abs() > self.steer_driver_allowance;
        state.yaw_rate = deg_to_rad(yaw_rate_deg);
    }

    fn update_pedals(&mut self, gas_raw: f64, brake_raw: f64, brake_pressed: bool, brake_lights: bool) {
        let state = &mut self.state;
        state.gas = gas_fraction(gas_raw);
        state.gas_pressed = state.gas > 0.0;
        state.brake = brake_fraction(brake_raw);
        state.brake_pressed = brake_pressed;
        state.brake_lights = brake_lights;
    }

    fn set_gear(&mut self, detected: Option<DetectedGear>) {
        let gear = parse_gear_shifter(detected, &self.shifter_values);
        if gear != self.state.gear_shifter {
            log::debug!("Gear {} -> {} ({:?})", self.state.gear_shifter, gear, detected);
        }
        self.state.gear_shifter = gear;
    }

    fn set_cruise(&mut self, status: CruiseStatus, set_speed: f64) {
        if status != self.state.cruise {
            log::debug!("Cruise status {:?} -> {:?}", self.state.cruise, status);
        }
        self.state.cruise = status;
        self.state.acc_set_speed = set_speed;
    }

    fn report_fallbacks(&mut self, kind: BusKind, fallbacks: &[(&'static str, &'static str)]) {
        for &(message, signal) in fallbacks {
            if self.reported_fallbacks.insert((message, signal)) {
                log::warn!(
                    "Signal {}.{} missing from {} table, using catalog default",
                    message,
                    signal,
                    kind
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let car = CarState::new(&CarStateConfig::new(), ShifterValues::new());
        let state = car.state();

        assert_eq!(state.gear_shifter, GearShifter::Unknown);
        assert_eq!(state.buttons, ButtonStates::default());
        assert!(!state.steering_fault);
        assert!(!state.cruise.fault);
        assert_eq!(state.reverse_light, None);
        assert_eq!(car.network_model(), NetworkModel::Mqb);
    }

    #[test]
    fn test_catalogs_follow_topology() {
        let config = CarStateConfig::new().with_network_model(NetworkModel::Pq);
        let car = CarState::new(&config, ShifterValues::new());

        assert!(car.catalog(BusKind::Gateway).contains("Bremse_3", "Radgeschw__VL_4_1"));
        assert!(car.catalog(BusKind::Extended).contains("ACC_XX02", "GRA_Set_Speed"));
        assert!(car.catalog(BusKind::Camera).is_empty());
        assert_eq!(car.catalog(BusKind::Extended).bus(), 2);
    }

    #[test]
    fn test_unsupported_update_keeps_defaults() {
        let config = CarStateConfig::new().with_network_model(NetworkModel::Unsupported);
        let mut car = CarState::new(&config, ShifterValues::new());

        let table = SignalTable::new().with("ESP_19", "ESP_VL_Radgeschw_02", 50.0);
        car.update(&table, &SignalTable::new(), TransmissionType::Automatic);

        assert_eq!(car.snapshot(), VehicleState::default());
    }

    #[test]
    fn test_missing_signals_read_as_defaults() {
        let config = CarStateConfig::new().with_network_model(NetworkModel::Pq);
        let mut car = CarState::new(&config, ShifterValues::new());

        car.update(&SignalTable::new(), &SignalTable::new(), TransmissionType::Automatic);

        let state = car.state();
        assert_eq!(state.v_ego_raw, 0.0);
        assert!(state.standstill);
        // Blinker byte defaults to 16, which is neither blinker
        assert!(!state.buttons.left_blinker);
        assert!(!state.buttons.right_blinker);
        assert!(car.reported_fallbacks.contains(&("Bremse_3", "Radgeschw__VL_4_1")));
        assert!(car.reported_fallbacks.contains(&("ACC_XX02", "GRA_Set_Speed")));
    }
}
