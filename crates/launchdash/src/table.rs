//! The launch data table.
//!
//! The table is loaded once at startup from a CSV file and never changes
//! afterwards. Aggregators borrow it; the server shares it behind an `Arc`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ColumnConfig;
use crate::error::{Error, Result};
use crate::record::{LaunchRecord, Outcome, PayloadRange};

/// Immutable, ordered collection of launch records.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
    /// Observed (min, max) payload.
    payload_bounds: Option<(f64, f64)>,
    /// BLAKE3 hex digest of the source.
    fingerprint: String,
    loaded_at: DateTime<Utc>,
}

/// Header positions of the columns we read.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    site: usize,
    outcome: usize,
    payload: usize,
    booster_category: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| Error::missing_column(name))
        };

        Ok(Self {
            site: find(&columns.site)?,
            outcome: find(&columns.outcome)?,
            payload: find(&columns.payload)?,
            booster_category: find(&columns.booster_category)?,
        })
    }

    fn record(&self, row: &csv::StringRecord, line: u64) -> Result<LaunchRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or_default().trim();

        let raw_outcome = field(self.outcome);
        let outcome = Outcome::parse(raw_outcome).ok_or_else(|| {
            Error::invalid_record(line, format!("outcome must be 0 or 1, got '{raw_outcome}'"))
        })?;

        let raw_payload = field(self.payload);
        let payload_mass_kg = raw_payload.parse::<f64>().map_err(|_| {
            Error::invalid_record(line, format!("payload mass '{raw_payload}' is not a number"))
        })?;

        let record = LaunchRecord::new(
            field(self.site),
            outcome,
            payload_mass_kg,
            field(self.booster_category),
        );
        record
            .check()
            .map_err(|message| Error::invalid_record(line, message))?;
        Ok(record)
    }
}

impl LaunchTable {
    /// Load the table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a configured column is
    /// missing, or any row breaks the record invariants.
    pub fn load(path: impl AsRef<Path>, columns: &ColumnConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading launch data from {}", path.display());

        let file = File::open(path).map_err(|source| Error::DataOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, columns)?;

        info!(
            records = table.len(),
            sites = table.sites.len(),
            "Loaded launch data from {}",
            path.display()
        );
        Ok(table)
    }

    /// Load the table from any reader producing CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the contents are invalid.
    pub fn from_reader(mut reader: impl Read, columns: &ColumnConfig) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes, columns)
    }

    /// Parse the table from raw CSV bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured column is missing or any row breaks
    /// the record invariants.
    pub fn from_bytes(bytes: &[u8], columns: &ColumnConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
        let headers = reader.headers()?.clone();
        let index = ColumnIndex::resolve(&headers, columns)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            records.push(index.record(&row, line)?);
        }

        let fingerprint = blake3::hash(bytes).to_hex().to_string();
        Ok(Self::assemble(records, fingerprint))
    }

    /// Build a table from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] naming the 1-based position of the
    /// first record that breaks the invariants.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        for (idx, record) in records.iter().enumerate() {
            record
                .check()
                .map_err(|message| Error::invalid_record(idx as u64 + 1, message))?;
        }
        let fingerprint = blake3::hash(&serde_json::to_vec(&records)?)
            .to_hex()
            .to_string();
        Ok(Self::assemble(records, fingerprint))
    }

    fn assemble(records: Vec<LaunchRecord>, fingerprint: String) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for record in &records {
            if !sites.iter().any(|site| *site == record.site) {
                sites.push(record.site.clone());
            }
        }

        let payload_bounds = records.iter().map(|r| r.payload_mass_kg).fold(
            None,
            |bounds: Option<(f64, f64)>, mass| match bounds {
                None => Some((mass, mass)),
                Some((lo, hi)) => Some((lo.min(mass), hi.max(mass))),
            },
        );

        Self {
            records,
            sites,
            payload_bounds,
            fingerprint,
            loaded_at: Utc::now(),
        }
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Iterate over the records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites, in first-appearance order.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed payload range `[min, max]`, or `None` for an empty table.
    #[must_use]
    pub fn payload_range(&self) -> Option<PayloadRange> {
        self.payload_bounds
            .map(|(low, high)| PayloadRange::new(low, high))
    }

    /// BLAKE3 fingerprint of the data source.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// When the table was loaded.
    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Summary statistics about the table.
    #[must_use]
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            records: self.len(),
            successes: self.iter().filter(|r| r.outcome.is_success()).count(),
            sites: self.sites.clone(),
            payload_min_kg: self.payload_bounds.map(|(lo, _)| lo),
            payload_max_kg: self.payload_bounds.map(|(_, hi)| hi),
            fingerprint: self.fingerprint.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

impl<'a> IntoIterator for &'a LaunchTable {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Summary statistics about a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    /// Number of records.
    pub records: usize,
    /// Number of successful launches.
    pub successes: usize,
    /// Distinct sites in first-appearance order.
    pub sites: Vec<String>,
    /// Lightest observed payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_min_kg: Option<f64>,
    /// Heaviest observed payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_max_kg: Option<f64>,
    /// BLAKE3 fingerprint of the data source.
    pub fingerprint: String,
    /// When the table was loaded.
    pub loaded_at: DateTime<Utc>,
}
