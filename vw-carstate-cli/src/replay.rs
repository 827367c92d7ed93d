//! Signal table replay
//!
//! Feeds recorded signal tables through a [`CarState`] one cycle at a time
//! and writes the resulting vehicle state as JSON lines.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use vw_carstate::{
    BusKind, CarState, CarStateConfig, CruiseStatus, GearShifter, ShifterValues, SignalTable,
    VehicleState,
};

/// One recorded control cycle as delivered by the CAN parser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleRecord {
    /// Nanoseconds since epoch
    #[serde(default)]
    pub timestamp_ns: Option<u64>,
    #[serde(default)]
    pub gateway: SignalTable,
    #[serde(default)]
    pub extended: SignalTable,
    #[serde(default)]
    pub camera: SignalTable,
}

/// One output line
#[derive(Debug, Serialize)]
pub struct StateRecord<'a> {
    /// RFC 3339, only when the cycle carried a timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub cycle: usize,
    pub state: &'a VehicleState,
}

/// Result of replaying one recording
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub cycles: usize,
    /// Signals the recording never delivered and were filled with defaults
    pub backfilled: usize,
    pub final_gear: GearShifter,
    pub final_cruise: CruiseStatus,
}

fn format_timestamp(timestamp_ns: u64) -> Option<String> {
    let secs = (timestamp_ns / 1_000_000_000) as i64;
    let nsecs = (timestamp_ns % 1_000_000_000) as u32;
    DateTime::<Utc>::from_timestamp(secs, nsecs)
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Replays recordings for one vehicle configuration
#[derive(Debug, Clone)]
pub struct Replayer {
    config: CarStateConfig,
    shifter_values: ShifterValues,
    max_cycles: Option<usize>,
    pretty: bool,
}

impl Replayer {
    pub fn new(config: CarStateConfig, shifter_values: ShifterValues) -> Self {
        Self {
            config,
            shifter_values,
            max_cycles: None,
            pretty: false,
        }
    }

    /// Stop after this many cycles per recording
    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Replay one recording from `input` into `output`
    pub fn replay<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<ReplaySummary> {
        let mut car = CarState::new(&self.config, self.shifter_values.clone());
        let gateway_catalog = *car.catalog(BusKind::Gateway);
        let extended_catalog = *car.catalog(BusKind::Extended);
        let camera_catalog = *car.catalog(BusKind::Camera);
        let mut summary = ReplaySummary::default();

        for (line_no, line) in input.lines().enumerate() {
            if self.max_cycles.is_some_and(|max| summary.cycles >= max) {
                log::debug!("Reached cycle limit of {}", summary.cycles);
                break;
            }

            let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
            if line.trim().is_empty() {
                continue;
            }

            let mut record: CycleRecord = serde_json::from_str(&line)
                .with_context(|| format!("Invalid cycle record on line {}", line_no + 1))?;

            summary.backfilled += gateway_catalog.backfill(&mut record.gateway);
            summary.backfilled += extended_catalog.backfill(&mut record.extended);
            summary.backfilled += camera_catalog.backfill(&mut record.camera);

            car.update(&record.gateway, &record.extended, self.config.transmission);

            let out = StateRecord {
                timestamp: record.timestamp_ns.and_then(format_timestamp),
                cycle: summary.cycles,
                state: car.state(),
            };
            if self.pretty {
                serde_json::to_writer_pretty(&mut output, &out)?;
            } else {
                serde_json::to_writer(&mut output, &out)?;
            }
            writeln!(output)?;

            summary.cycles += 1;
        }

        output.flush()?;
        summary.final_gear = car.state().gear_shifter;
        summary.final_cruise = car.state().cruise;
        Ok(summary)
    }

    /// Replay one recording file
    ///
    /// Output goes to `<output_dir>/<stem>.state.jsonl`, or to stdout in one
    /// piece once the file is done.
    pub fn replay_file(&self, path: &Path, output_dir: Option<&Path>) -> Result<ReplaySummary> {
        let input = File::open(path)
            .with_context(|| format!("Failed to open recording: {:?}", path))?;
        let input = BufReader::new(input);

        let summary = match output_dir {
            Some(dir) => {
                let out_path = output_path(path, dir);
                let output = File::create(&out_path)
                    .with_context(|| format!("Failed to create output file: {:?}", out_path))?;
                self.replay(input, BufWriter::new(output))
                    .with_context(|| format!("Failed to replay {:?}", path))?
            }
            None => {
                let mut buffer = Vec::new();
                let summary = self
                    .replay(input, &mut buffer)
                    .with_context(|| format!("Failed to replay {:?}", path))?;
                io::stdout()
                    .lock()
                    .write_all(&buffer)
                    .context("Failed to write to stdout")?;
                summary
            }
        };

        log::info!(
            "{:?}: {} cycles, final gear {}, cruise available={} enabled={} fault={}, {} signals backfilled",
            path,
            summary.cycles,
            summary.final_gear,
            summary.final_cruise.available,
            summary.final_cruise.enabled,
            summary.final_cruise.fault,
            summary.backfilled
        );

        Ok(summary)
    }

    /// Replay several recordings in parallel, each with its own car state
    pub fn replay_files(
        &self,
        files: &[PathBuf],
        output_dir: Option<&Path>,
    ) -> Result<Vec<(PathBuf, Result<ReplaySummary>)>> {
        if let Some(dir) = output_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        }

        Ok(files
            .par_iter()
            .map(|path| (path.clone(), self.replay_file(path, output_dir)))
            .collect())
    }
}

/// `<output_dir>/<stem>.state.jsonl`
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "replay".to_string());
    output_dir.join(format!("{}.state.jsonl", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vw_carstate::{NetworkModel, TransmissionType};

    fn mqb_replayer() -> Replayer {
        let config = CarStateConfig::new()
            .with_network_model(NetworkModel::Mqb)
            .with_transmission(TransmissionType::Automatic);
        let shifter_values = [(5, "P"), (8, "D")].into_iter().collect();
        Replayer::new(config, shifter_values)
    }

    const RECORDING: &str = r#"{"timestamp_ns": 1700000000000000000, "gateway": {"ESP_19": {"ESP_VL_Radgeschw_02": 36.0, "ESP_VR_Radgeschw_02": 36.0, "ESP_HL_Radgeschw_02": 36.0, "ESP_HR_Radgeschw_02": 36.0}, "Getriebe_11": {"GE_Fahrstufe": 8.0}}, "extended": {"ACC_06": {"ACC_Status_ACC": 3.0}}}

{"gateway": {"Getriebe_11": {"GE_Fahrstufe": 5.0}}, "extended": {}}
"#;

    #[test]
    fn test_replay_writes_one_line_per_cycle() {
        let mut output = Vec::new();
        let summary = mqb_replayer().replay(RECORDING.as_bytes(), &mut output).unwrap();

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.final_gear, GearShifter::Park);
        assert!(summary.backfilled > 0);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["cycle"], 0);
        assert_eq!(lines[0]["timestamp"], "2023-11-14T22:13:20Z");
        assert_eq!(lines[0]["state"]["gear_shifter"], "drive");
        assert_eq!(lines[0]["state"]["cruise"]["enabled"], true);
        assert!((lines[0]["state"]["v_ego_raw"].as_f64().unwrap() - 10.0).abs() < 1e-9);

        assert_eq!(lines[1]["cycle"], 1);
        assert!(lines[1].get("timestamp").is_none());
        assert_eq!(lines[1]["state"]["gear_shifter"], "park");
    }

    #[test]
    fn test_max_cycles() {
        let mut output = Vec::new();
        let summary = mqb_replayer()
            .with_max_cycles(Some(1))
            .replay(RECORDING.as_bytes(), &mut output)
            .unwrap();

        assert_eq!(summary.cycles, 1);
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_invalid_line_reports_line_number() {
        let input = "{\"gateway\": {}}\nnot json\n";
        let err = mqb_replayer().replay(input.as_bytes(), Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_replay_files_to_output_dir() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();

        let first = input_dir.path().join("drive_a.jsonl");
        let second = input_dir.path().join("drive_b.jsonl");
        fs::write(&first, RECORDING).unwrap();
        fs::write(&second, "{\"gateway\": {}}\n").unwrap();

        let out = output_dir.path().join("states");
        let results = mqb_replayer()
            .replay_files(&[first.clone(), second.clone()], Some(&out))
            .unwrap();

        assert_eq!(results.len(), 2);
        for (path, result) in &results {
            let summary = result.as_ref().unwrap();
            let expected = if path == &first { 2 } else { 1 };
            assert_eq!(summary.cycles, expected);
        }

        let written = fs::read_to_string(out.join("drive_a.state.jsonl")).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(out.join("drive_b.state.jsonl").exists());
    }

    #[test]
    fn test_missing_recording_is_reported_per_file() {
        let output_dir = tempfile::tempdir().unwrap();
        let results = mqb_replayer()
            .replay_files(&[PathBuf::from("/nonexistent/drive.jsonl")], Some(output_dir.path()))
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_err());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("logs/drive_01.jsonl"), Path::new("out")),
            PathBuf::from("out/drive_01.state.jsonl")
        );
    }
}
