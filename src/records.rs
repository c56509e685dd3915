//! Record IO glue around the extraction engine
//!
//! The engine itself consumes `(id, text)` pairs and never touches files;
//! this module is the external loader/serializer collaborating with it.

use crate::error::{OntoruleError, Result};
use crate::extraction::EnrichmentRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One input record as found in CVE feed exports.
/// `description` is accepted as an alias for `prompt_input`; a record with
/// neither field is loadable but will be skipped by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRecord {
    pub id: String,
    #[serde(default, alias = "description")]
    pub prompt_input: Option<String>,
}

/// Load input records from a JSON array file
pub fn load_records(path: &Path) -> Result<Vec<InputRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|e| OntoruleError::Io {
        source: e,
        context: format!("Failed to read input records: {:?}", path),
    })?;

    serde_json::from_str(&raw).map_err(|e| OntoruleError::Json {
        source: e,
        context: format!("Failed to parse input records: {:?}", path),
    })
}

/// Write enrichment records as JSON to a file, or to stdout when no path
/// is given
pub fn write_records(
    path: Option<&Path>,
    records: &[EnrichmentRecord],
    pretty: bool,
) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|e| OntoruleError::Json {
        source: e,
        context: "Failed to serialize enrichment records".to_string(),
    })?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| OntoruleError::Io {
                        source: e,
                        context: format!("Failed to create output directory: {:?}", parent),
                    })?;
                }
            }
            std::fs::write(path, json + "\n").map_err(|e| OntoruleError::Io {
                source: e,
                context: format!("Failed to write output: {:?}", path),
            })
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records_with_description_alias() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "CVE-1", "prompt_input": "first"},
                {"id": "CVE-2", "description": "second"},
                {"id": "CVE-3"}
            ]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].prompt_input.as_deref(), Some("first"));
        assert_eq!(records[1].prompt_input.as_deref(), Some("second"));
        assert!(records[2].prompt_input.is_none());
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(matches!(err, OntoruleError::Io { .. }));
    }

    #[test]
    fn test_load_records_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, OntoruleError::Json { .. }));
    }

    #[test]
    fn test_write_records_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/results.json");

        let records = vec![EnrichmentRecord::assemble("CVE-1", "text", vec![], vec![], vec![])];
        write_records(Some(&path), &records, true).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<EnrichmentRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, records);
    }
}
