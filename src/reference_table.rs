//! # Reference Table Module
//!
//! Loading and holding the table of known food additives.
//!
//! ## Source Format
//!
//! ```text
//! code,name,severity
//! e621,monosodium glutamate,4
//! e300,ascorbic acid,1
//! ```
//!
//! - The first line is a header and is always skipped
//! - Fields are separated by `,` with no quoting, so names cannot contain commas
//! - Rows with fewer than three fields are skipped, extra fields are ignored
//! - Rows with an empty code or name are skipped
//! - A code that repeats an earlier code (case-insensitively) is skipped
//!
//! The loaded [`ReferenceTable`] is immutable and cheap to clone, so one table can be
//! shared by every analysis in a session.

use crate::errors::error_logging;
use crate::harmfulness::{tier_for_tag, HarmfulnessTier, SeverityLevel};
use crate::load_errors::LoadError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Reference table compiled into the binary
const BUNDLED_TABLE: &str = include_str!("../data/additives.csv");

lazy_static! {
    static ref BUNDLED: ReferenceTable = match load_reference_table(Cursor::new(BUNDLED_TABLE)) {
        Ok(table) => table,
        Err(e) => {
            error_logging::log_load_error(&e, "load_bundled_table", None);
            ReferenceTable::default()
        }
    };
}

/// A known food additive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditiveRecord {
    /// Short identifier, e.g. "e621"
    pub code: String,
    /// Human-readable name, e.g. "monosodium glutamate"
    pub name: String,
    /// Harmfulness tier tag ("0".."6")
    pub severity_level: String,
}

impl AdditiveRecord {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        severity_level: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            severity_level: severity_level.into(),
        }
    }

    /// Parsed severity, `None` when the tag is not one of the seven tiers
    pub fn severity(&self) -> Option<SeverityLevel> {
        self.severity_level.parse().ok()
    }

    pub fn tier(&self) -> Option<HarmfulnessTier> {
        tier_for_tag(&self.severity_level)
    }
}

/// A record with its lower-cased match keys
#[derive(Debug, Clone)]
pub(crate) struct TableEntry {
    pub(crate) record: AdditiveRecord,
    pub(crate) code_key: String,
    pub(crate) name_key: String,
    /// Length of `name_key` in characters
    pub(crate) name_len: usize,
}

impl TableEntry {
    fn new(record: AdditiveRecord) -> Self {
        let code_key = record.code.to_lowercase();
        let name_key = record.name.to_lowercase();
        let name_len = name_key.chars().count();
        Self {
            record,
            code_key,
            name_key,
            name_len,
        }
    }
}

/// Immutable table of additives, in source order
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Arc<Vec<TableEntry>>,
}

impl ReferenceTable {
    /// Build a table from records, dropping records with empty keys and repeated codes
    pub fn from_records(records: impl IntoIterator<Item = AdditiveRecord>) -> Self {
        let mut seen_codes = HashSet::new();
        let mut entries = Vec::new();

        for record in records {
            if record.code.trim().is_empty() || record.name.trim().is_empty() {
                debug!(code = %record.code, name = %record.name, "Skipping additive with empty code or name");
                continue;
            }

            let entry = TableEntry::new(record);
            if !seen_codes.insert(entry.code_key.clone()) {
                warn!(code = %entry.record.code, "Skipping duplicate additive code");
                continue;
            }

            entries.push(entry);
        }

        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in source order
    pub fn records(&self) -> impl Iterator<Item = &AdditiveRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Case-insensitive lookup by code
    pub fn get(&self, code: &str) -> Option<&AdditiveRecord> {
        let key = code.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.code_key == key)
            .map(|entry| &entry.record)
    }

    pub(crate) fn entries(&self) -> &[TableEntry] {
        &self.entries
    }
}

impl PartialEq for ReferenceTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.records().eq(other.records())
    }
}

/// Parse one data row; `None` when the row has fewer than three fields
fn parse_row(line: &str) -> Option<AdditiveRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }
    Some(AdditiveRecord::new(fields[0], fields[1], fields[2]))
}

/// Load a reference table from any buffered reader
///
/// The header row is skipped; malformed rows are skipped individually.
/// Fails only when the reader itself fails.
pub fn load_reference_table<R: BufRead>(reader: R) -> Result<ReferenceTable, LoadError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(LoadError::from_read_error)?;
        if line_number == 0 {
            continue;
        }

        match parse_row(&line) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                debug!(line_number = line_number + 1, "Skipping malformed reference table row");
            }
        }
    }

    let rows = records.len();
    let table = ReferenceTable::from_records(records);
    debug!(
        rows_read = rows,
        rows_skipped = skipped,
        additives = table.len(),
        "Parsed reference table"
    );
    Ok(table)
}

/// Load a reference table from a file on disk
pub fn load_reference_table_from_path(path: impl AsRef<Path>) -> Result<ReferenceTable, LoadError> {
    let path = path.as_ref();
    let start = Instant::now();

    let result = File::open(path)
        .map_err(|e| LoadError::Open(format!("{}: {}", path.display(), e)))
        .and_then(|file| load_reference_table(BufReader::new(file)));

    let rows = result.as_ref().map(ReferenceTable::len).unwrap_or(0);
    crate::observability::record_table_load_metrics("file", result.is_ok(), rows, start.elapsed());

    if let Ok(table) = &result {
        info!(path = %path.display(), additives = table.len(), "Loaded reference table");
    }
    result
}

/// The table bundled with the crate
pub fn bundled_reference_table() -> ReferenceTable {
    BUNDLED.clone()
}

/// Load a table from disk, falling back to an empty table when it cannot be read
///
/// An empty table means "no reference data available"; every analysis against it
/// reports no matches.
pub fn load_reference_table_or_empty(path: impl AsRef<Path>) -> ReferenceTable {
    let path = path.as_ref();
    match load_reference_table_from_path(path) {
        Ok(table) => table,
        Err(e) => {
            error_logging::log_load_error(&e, "load_reference_table", path.to_str());
            warn!("Continuing without reference data");
            ReferenceTable::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let record = parse_row(" e621 , Monosodium Glutamate , 4 ").unwrap();
        assert_eq!(record, AdditiveRecord::new("e621", "Monosodium Glutamate", "4"));

        let extra = parse_row("e300,ascorbic acid,1,antioxidant,EU").unwrap();
        assert_eq!(extra.severity_level, "1");

        assert!(parse_row("e300,ascorbic acid").is_none());
        assert!(parse_row("").is_none());
    }

    #[test]
    fn test_from_records_drops_empty_keys_and_duplicates() {
        let table = ReferenceTable::from_records(vec![
            AdditiveRecord::new("e621", "monosodium glutamate", "4"),
            AdditiveRecord::new("", "nameless", "1"),
            AdditiveRecord::new("e999", "  ", "1"),
            AdditiveRecord::new("E621", "glutamate again", "2"),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("E621").unwrap().name, "monosodium glutamate");
    }

    #[test]
    fn test_entry_keys_are_lowercase() {
        let table = ReferenceTable::from_records(vec![AdditiveRecord::new(
            "E300",
            "Ascorbic Acid",
            "1",
        )]);
        let entry = &table.entries()[0];
        assert_eq!(entry.code_key, "e300");
        assert_eq!(entry.name_key, "ascorbic acid");
        assert_eq!(entry.name_len, 13);
    }

    #[test]
    fn test_bundled_table_is_loaded() {
        let table = bundled_reference_table();
        assert!(!table.is_empty());
        assert!(table.get("e621").is_some());
        assert!(table.records().all(|r| r.severity().is_some()));
    }

    #[test]
    fn test_record_tier() {
        let record = AdditiveRecord::new("e171", "titanium dioxide", "6");
        assert_eq!(record.severity(), Some(SeverityLevel::PossiblyCarcinogenic));
        assert!(record.tier().is_some());

        let unknown = AdditiveRecord::new("e999", "mystery", "x");
        assert_eq!(unknown.severity(), None);
        assert!(unknown.tier().is_none());
    }
}
