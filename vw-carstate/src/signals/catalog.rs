//! Per-topology signal catalogs
//!
//! A catalog declares which (message, signal) pairs the external parser must
//! deliver for one bus, the value to assume before a message first arrives,
//! and the expected arrival frequency of each message. The catalogs are
//! static; the car state only reads them.

use crate::config::CanBusConfig;
use crate::signals::{mqb, pq};
use crate::types::{NetworkModel, SignalTable};
use serde::{Deserialize, Serialize};
use std::fmt;

const NO_SIGNALS: &[SignalSpec] = &[];
const NO_CHECKS: &[MessageCheck] = &[];

/// One logical channel: which message carries it and its default value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSpec {
    /// Signal name
    pub signal: &'static str,
    /// Name of the message carrying the signal
    pub message: &'static str,
    /// Value reported until the message is first received
    pub default: f64,
}

impl SignalSpec {
    pub const fn new(signal: &'static str, message: &'static str, default: f64) -> Self {
        Self {
            signal,
            message,
            default,
        }
    }
}

/// Expected arrival rate of one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCheck {
    pub message: &'static str,
    pub frequency_hz: u32,
}

impl MessageCheck {
    pub const fn new(message: &'static str, frequency_hz: u32) -> Self {
        Self {
            message,
            frequency_hz,
        }
    }
}

/// Which of the parsed buses a catalog describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    Gateway,
    Extended,
    Camera,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusKind::Gateway => write!(f, "gateway"),
            BusKind::Extended => write!(f, "extended"),
            BusKind::Camera => write!(f, "camera"),
        }
    }
}

/// Static signal catalog for one bus of one topology
#[derive(Debug, Clone, Copy)]
pub struct SignalCatalog {
    kind: BusKind,
    bus: u8,
    signals: &'static [SignalSpec],
    checks: &'static [MessageCheck],
}

impl SignalCatalog {
    /// Catalog for the given topology and bus
    ///
    /// Unsupported topologies, and buses a topology does not use, get an
    /// empty catalog rather than an error.
    pub fn for_network(model: NetworkModel, kind: BusKind, buses: &CanBusConfig) -> Self {
        let bus = match kind {
            BusKind::Gateway => buses.gateway,
            BusKind::Extended => buses.extended,
            BusKind::Camera => buses.camera,
        };

        let (signals, checks): (&'static [SignalSpec], &'static [MessageCheck]) =
            match (model, kind) {
                (NetworkModel::Mqb, BusKind::Gateway) => (mqb::GATEWAY_SIGNALS, mqb::GATEWAY_CHECKS),
                (NetworkModel::Mqb, BusKind::Extended) => {
                    (mqb::EXTENDED_SIGNALS, mqb::EXTENDED_CHECKS)
                }
                (NetworkModel::Mqb, BusKind::Camera) => (mqb::CAMERA_SIGNALS, mqb::CAMERA_CHECKS),
                (NetworkModel::Pq, BusKind::Gateway) => (pq::GATEWAY_SIGNALS, pq::GATEWAY_CHECKS),
                (NetworkModel::Pq, BusKind::Extended) => (pq::EXTENDED_SIGNALS, pq::EXTENDED_CHECKS),
                (NetworkModel::Pq, BusKind::Camera) | (NetworkModel::Unsupported, _) => {
                    (NO_SIGNALS, NO_CHECKS)
                }
            };

        Self {
            kind,
            bus,
            signals,
            checks,
        }
    }

    /// Create an empty catalog
    pub fn empty(kind: BusKind, bus: u8) -> Self {
        Self {
            kind,
            bus,
            signals: NO_SIGNALS,
            checks: NO_CHECKS,
        }
    }

    pub fn kind(&self) -> BusKind {
        self.kind
    }

    /// CAN bus index this catalog is parsed on
    pub fn bus(&self) -> u8 {
        self.bus
    }

    pub fn signals(&self) -> &'static [SignalSpec] {
        self.signals
    }

    pub fn checks(&self) -> &'static [MessageCheck] {
        self.checks
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Find the declaration of a signal
    pub fn find(&self, message: &str, signal: &str) -> Option<&'static SignalSpec> {
        self.signals
            .iter()
            .find(|spec| spec.message == message && spec.signal == signal)
    }

    pub fn contains(&self, message: &str, signal: &str) -> bool {
        self.find(message, signal).is_some()
    }

    /// Declared default value of a signal
    pub fn default_for(&self, message: &str, signal: &str) -> Option<f64> {
        self.find(message, signal).map(|spec| spec.default)
    }

    /// Expected arrival frequency of a message in Hz
    pub fn frequency_of(&self, message: &str) -> Option<u32> {
        self.checks
            .iter()
            .find(|check| check.message == message)
            .map(|check| check.frequency_hz)
    }

    /// A table holding every declared signal at its default value
    pub fn default_table(&self) -> SignalTable {
        let mut table = SignalTable::new();
        for spec in self.signals {
            table.insert(spec.message, spec.signal, spec.default);
        }
        table
    }

    /// Fill every declared signal missing from `table` with its default
    ///
    /// Returns the number of values inserted.
    pub fn backfill(&self, table: &mut SignalTable) -> usize {
        let mut inserted = 0;
        for spec in self.signals {
            if !table.contains(spec.message, spec.signal) {
                table.insert(spec.message, spec.signal, spec.default);
                inserted += 1;
            }
        }
        inserted
    }

    /// Declared signals absent from `table`
    pub fn missing_from(&self, table: &SignalTable) -> Vec<&'static SignalSpec> {
        self.signals
            .iter()
            .filter(|spec| !table.contains(spec.message, spec.signal))
            .collect()
    }

    /// Read access to a table, falling back to this catalog's defaults
    pub fn reader<'a>(&self, table: &'a SignalTable) -> SignalReader<'a> {
        SignalReader {
            catalog: *self,
            table,
            fallbacks: Vec::new(),
        }
    }
}

/// Catalog-aware view of one signal table for a single update cycle
///
/// A signal absent from the table reads as its catalog default (zero if the
/// catalog does not declare it either) and is remembered as a fallback so
/// the caller can report it.
#[derive(Debug)]
pub struct SignalReader<'a> {
    catalog: SignalCatalog,
    table: &'a SignalTable,
    fallbacks: Vec<(&'static str, &'static str)>,
}

impl<'a> SignalReader<'a> {
    /// Numeric value of a signal
    pub fn value(&mut self, message: &'static str, signal: &'static str) -> f64 {
        if let Some(value) = self.table.get(message, signal) {
            return value;
        }

        if !self.fallbacks.contains(&(message, signal)) {
            self.fallbacks.push((message, signal));
        }
        self.catalog.default_for(message, signal).unwrap_or(0.0)
    }

    /// Signal interpreted as a boolean (non-zero is true)
    pub fn flag(&mut self, message: &'static str, signal: &'static str) -> bool {
        self.value(message, signal) != 0.0
    }

    /// Signals that had to be read from defaults this cycle
    pub fn fallbacks(&self) -> &[(&'static str, &'static str)] {
        &self.fallbacks
    }

    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(model: NetworkModel) -> SignalCatalog {
        SignalCatalog::for_network(model, BusKind::Gateway, &CanBusConfig::default())
    }

    #[test]
    fn test_mqb_gateway_catalog() {
        let catalog = gateway(NetworkModel::Mqb);
        assert_eq!(catalog.bus(), 0);
        assert_eq!(catalog.kind(), BusKind::Gateway);
        assert!(catalog.contains("LWI_01", "LWI_Lenkradwinkel"));
        assert!(catalog.contains("GRA_ACC_01", "COUNTER"));
        assert!(!catalog.contains("LWI_01", "Steering_Angle"));
        assert_eq!(catalog.frequency_of("ESP_19"), Some(100));
        assert_eq!(catalog.frequency_of("Einheiten_01"), Some(1));
        assert_eq!(catalog.frequency_of("Bremse_3"), None);
    }

    #[test]
    fn test_pq_blinker_default() {
        let catalog = gateway(NetworkModel::Pq);
        assert_eq!(
            catalog.default_for("Gateway_Komfort_1", "Frei_Gateway_Komfort_1_4"),
            Some(16.0)
        );
        assert_eq!(catalog.default_for("Gateway_Komfort_1", "Fahrertuerkontakt"), Some(0.0));
    }

    #[test]
    fn test_unsupported_topology_is_empty() {
        let buses = CanBusConfig::default();
        for kind in [BusKind::Gateway, BusKind::Extended, BusKind::Camera] {
            let catalog = SignalCatalog::for_network(NetworkModel::Unsupported, kind, &buses);
            assert!(catalog.is_empty());
            assert!(catalog.checks().is_empty());
        }
        let pq_camera = SignalCatalog::for_network(NetworkModel::Pq, BusKind::Camera, &buses);
        assert!(pq_camera.is_empty());
    }

    #[test]
    fn test_every_signal_has_a_frequency_check() {
        let buses = CanBusConfig::default();
        for model in [NetworkModel::Mqb, NetworkModel::Pq] {
            for kind in [BusKind::Gateway, BusKind::Extended, BusKind::Camera] {
                let catalog = SignalCatalog::for_network(model, kind, &buses);
                for spec in catalog.signals() {
                    assert!(
                        catalog.frequency_of(spec.message).is_some(),
                        "{} {}: no check for {}",
                        model,
                        kind,
                        spec.message
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_table_and_backfill() {
        let catalog = gateway(NetworkModel::Mqb);
        let defaults = catalog.default_table();
        assert_eq!(defaults.len(), catalog.signals().len());
        assert!(catalog.missing_from(&defaults).is_empty());

        let mut partial = SignalTable::new().with("LWI_01", "LWI_Lenkradwinkel", 12.0);
        let missing_before = catalog.missing_from(&partial).len();
        assert_eq!(missing_before, catalog.signals().len() - 1);

        let inserted = catalog.backfill(&mut partial);
        assert_eq!(inserted, missing_before);
        assert_eq!(partial.get("LWI_01", "LWI_Lenkradwinkel"), Some(12.0));
        assert!(catalog.missing_from(&partial).is_empty());
        assert_eq!(catalog.backfill(&mut partial), 0);
    }

    #[test]
    fn test_reader_falls_back_to_default() {
        let catalog = gateway(NetworkModel::Pq);
        let table = SignalTable::new().with("Bremse_3", "Radgeschw__VL_4_1", 36.0);
        let mut reader = catalog.reader(&table);

        assert_eq!(reader.value("Bremse_3", "Radgeschw__VL_4_1"), 36.0);
        assert_eq!(reader.value("Gateway_Komfort_1", "Frei_Gateway_Komfort_1_4"), 16.0);
        assert_eq!(reader.value("Gateway_Komfort_1", "Frei_Gateway_Komfort_1_4"), 16.0);
        assert!(!reader.flag("Not_A_Message", "Not_A_Signal"));

        assert_eq!(
            reader.fallbacks(),
            &[
                ("Gateway_Komfort_1", "Frei_Gateway_Komfort_1_4"),
                ("Not_A_Message", "Not_A_Signal"),
            ]
        );
    }
}
