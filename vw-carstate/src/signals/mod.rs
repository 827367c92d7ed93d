//! Signal catalogs and DBC value tables
//!
//! This module contains the static per-topology signal catalogs and the DBC
//! loader for symbolic value tables.

pub mod catalog;
pub mod dbc;

mod mqb;
mod pq;

// Re-export key types for convenience
pub use catalog::{BusKind, MessageCheck, SignalCatalog, SignalReader, SignalSpec};
