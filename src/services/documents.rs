//! Input document loading and observation import/export.
//!
//! The three static JSON documents (`twilight.json`, `moon.json`,
//! `observation.json`) are treated as already-resolved inputs: loading
//! happens once, before the session starts, and any failure is fatal and
//! reported with context rather than leaving a partially populated view.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::api::{MoonRecord, ObservationRecord, TwilightRecord};
use crate::config::EditorConfig;
use crate::error::EditError;

/// Default file name offered for an exported observation list.
pub const EXPORT_FILE_NAME: &str = "observation.json";

/// The three input documents, parsed but not yet range-filtered.
#[derive(Debug, Clone)]
pub struct Documents {
    pub twilight: Vec<TwilightRecord>,
    pub moon: Vec<MoonRecord>,
    pub observations: Vec<ObservationRecord>,
}

/// Load the three input documents from a directory.
///
/// All three files must be present and parse; a failure in any of them
/// fails the whole load.
pub fn load_documents(dir: &Path) -> Result<Documents> {
    let twilight = load_json_file(&dir.join("twilight.json"))?;
    let moon = load_json_file(&dir.join("moon.json"))?;
    let observations = load_json_file(&dir.join("observation.json"))?;

    let documents = Documents {
        twilight,
        moon,
        observations,
    };
    info!(
        "Loaded documents from {}: {} twilight, {} moon, {} observation records",
        dir.display(),
        documents.twilight.len(),
        documents.moon.len(),
        documents.observations.len()
    );
    Ok(documents)
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a user-supplied observation document (the import path).
pub fn parse_observations(json: &str) -> Result<Vec<ObservationRecord>, EditError> {
    serde_json::from_str(json).map_err(|e| EditError::Document(e.to_string()))
}

/// Serialize an observation list to the input document shape, pretty-printed
/// the way the original export wrote it.
pub fn export_observations(records: &[ObservationRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize observation list")
}

/// Drop records whose date falls outside the supported range.
///
/// Filtering, not erroring: out-of-range records are logged and discarded,
/// matching how the original clipped all three documents to its date axis.
pub fn filter_to_range<T, F>(records: Vec<T>, config: &EditorConfig, date_of: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::NaiveDate,
{
    let before = records.len();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|r| config.in_date_range(date_of(r)))
        .collect();
    if kept.len() < before {
        debug!(
            "Dropped {} record(s) outside {}..{}",
            before - kept.len(),
            config.date_start,
            config.date_end
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NightHour;
    use chrono::NaiveDate;

    fn record(date: &str, start: f64, end: f64) -> ObservationRecord {
        ObservationRecord {
            date: date.parse().unwrap(),
            start_time: NightHour::new(start),
            end_time: NightHour::new(end),
            category: "Science".to_string(),
            label: "obs".to_string(),
            tooltip: "Science block".to_string(),
            notes: None,
            filters: vec!["r".to_string()],
        }
    }

    #[test]
    fn test_export_import_roundtrip() {
        let records = vec![record("2024-10-05", 1.0, 2.0), record("2024-10-06", -1.0, 0.5)];
        let json = export_observations(&records).unwrap();
        let parsed = parse_observations(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        assert!(matches!(
            parse_observations("not json {"),
            Err(EditError::Document(_))
        ));
    }

    #[test]
    fn test_filter_to_range_drops_outside_dates() {
        let config = EditorConfig::default();
        let records = vec![
            record("2024-09-30", 1.0, 2.0),
            record("2024-10-05", 1.0, 2.0),
            record("2024-12-01", 1.0, 2.0),
        ];
        let kept = filter_to_range(records, &config, |r| r.date);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].date,
            NaiveDate::from_ymd_opt(2024, 10, 5).unwrap()
        );
    }

    #[test]
    fn test_load_documents_missing_file_is_fatal() {
        let missing = std::path::PathBuf::from("/nonexistent/nightlog-test");
        let result = load_documents(&missing);
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("twilight.json"));
    }
}
