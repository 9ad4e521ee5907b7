//! Disease precaution table.
//!
//! Rows keyed by disease name with ordered precaution text fields. The engine
//! treats the text as opaque pass-through; only the case-insensitive keying
//! matters here.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

const DISEASE_COLUMN: &str = "Disease";
const PRECAUTION_COLUMN_PREFIX: &str = "Precaution_";

/// Precaution texts per disease, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct PrecautionTable {
    entries: HashMap<String, Vec<String>>,
}

impl PrecautionTable {
    /// Load the table from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open precaution table {:?}", path))?;
        let table = Self::from_reader(file)
            .with_context(|| format!("Failed to parse precaution table {:?}", path))?;
        info!(
            diseases = table.len(),
            file = %path.display(),
            "Loaded precaution table"
        );
        Ok(table)
    }

    /// Parse the table from any reader.
    ///
    /// Precaution columns are discovered by the `Precaution_` prefix in
    /// header order; blank cells are dropped but the remaining order is kept.
    /// The first row for a disease wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let disease_idx = headers
            .iter()
            .position(|column| column == DISEASE_COLUMN)
            .with_context(|| format!("precaution table is missing the {} column", DISEASE_COLUMN))?;
        let precaution_idx: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, column)| column.starts_with(PRECAUTION_COLUMN_PREFIX))
            .map(|(idx, _)| idx)
            .collect();

        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let disease = record.get(disease_idx).unwrap_or("").trim();
            if disease.is_empty() {
                continue;
            }
            let precautions: Vec<String> = precaution_idx
                .iter()
                .filter_map(|&idx| record.get(idx))
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
                .collect();
            entries
                .entry(disease.to_lowercase())
                .or_insert(precautions);
        }
        Ok(Self { entries })
    }

    /// Precautions for a disease, matched case-insensitively on the trimmed
    /// name.
    pub fn get(&self, disease: &str) -> Option<&[String]> {
        self.entries
            .get(&disease.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Number of diseases with precautions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
