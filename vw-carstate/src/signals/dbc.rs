//! DBC value table loading
//!
//! The car state needs exactly one thing from the vehicle DBC: the value
//! descriptions (`VAL_`) of the gear selector signal, which map raw selector
//! positions to letters such as `P`, `R`, `N` and `D`.

use crate::types::{CarStateError, Result};
use std::path::Path;

/// Read and parse a DBC file
pub fn parse_dbc_file(path: &Path) -> Result<can_dbc::DBC> {
    log::info!("Parsing DBC file: {:?}", path);

    // Read the DBC file as bytes first (handle non-UTF8 encodings)
    let bytes = std::fs::read(path).map_err(|e| {
        CarStateError::DbcParseError(format!("Failed to read file {:?}: {}", path, e))
    })?;

    // VW DBCs carry German umlauts in comments, usually Latin-1 encoded
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("DBC file is not UTF-8, trying Latin-1 encoding");
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    };

    parse_dbc_str(&content)
}

/// Parse DBC content already held in memory
pub fn parse_dbc_str(content: &str) -> Result<can_dbc::DBC> {
    can_dbc::DBC::from_slice(content.as_bytes())
        .map_err(|e| CarStateError::DbcParseError(format!("{:?}", e)))
}

/// Value descriptions of one signal as (raw value, description) pairs
pub fn value_table(dbc: &can_dbc::DBC, message: &str, signal: &str) -> Result<Vec<(i64, String)>> {
    let dbc_msg = dbc
        .messages()
        .iter()
        .find(|m| m.message_name() == message)
        .ok_or_else(|| CarStateError::SignalNotFound(format!("message {}", message)))?;

    if !dbc_msg.signals().iter().any(|s| s.name() == signal) {
        return Err(CarStateError::SignalNotFound(format!("{}.{}", message, signal)));
    }

    let descriptions = dbc
        .value_descriptions_for_signal(can_dbc::MessageId(dbc_msg.message_id().0), signal)
        .unwrap_or_default();

    let values: Vec<(i64, String)> = descriptions
        .iter()
        .map(|desc| (*desc.a() as i64, desc.b().to_string()))
        .collect();

    log::debug!(
        "Loaded {} value descriptions for {}.{}",
        values.len(),
        message,
        signal
    );

    Ok(values)
}

/// Load the value descriptions of one signal from a DBC file
pub fn load_value_table(path: &Path, message: &str, signal: &str) -> Result<Vec<(i64, String)>> {
    let dbc = parse_dbc_file(path)?;
    value_table(&dbc, message, signal)
}
