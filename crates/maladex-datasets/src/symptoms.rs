//! Disease/symptom reference dataset loading.
//!
//! Expects a UTF-8 CSV with a `Disease` column and any number of `Symptom_N`
//! columns (N starting at 1). Cells may be blank; a row may fill fewer
//! symptom columns than the schema's maximum. Cell trimming and row skipping
//! are the indexer's job; the loader hands rows over as-is.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use maladex_core::SymptomRow;

const DISEASE_COLUMN: &str = "Disease";
const SYMPTOM_COLUMN_PREFIX: &str = "Symptom_";

/// A loaded disease/symptom table plus provenance.
#[derive(Debug, Clone)]
pub struct DiseaseDataset {
    pub rows: Vec<SymptomRow>,
    /// Where the rows came from
    pub source_file: PathBuf,
    /// When the dataset was loaded
    pub loaded_at: DateTime<Utc>,
}

impl DiseaseDataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open disease dataset {:?}", path))?;
        let rows = read_rows(file)
            .with_context(|| format!("Failed to parse disease dataset {:?}", path))?;
        info!(
            rows = rows.len(),
            file = %path.display(),
            "Loaded disease/symptom dataset"
        );
        Ok(Self {
            rows,
            source_file: path.to_path_buf(),
            loaded_at: Utc::now(),
        })
    }

    /// An empty dataset carrying only provenance, for callers that degrade
    /// instead of aborting when the file is unavailable.
    pub fn empty(path: &Path) -> Self {
        Self {
            rows: Vec::new(),
            source_file: path.to_path_buf(),
            loaded_at: Utc::now(),
        }
    }

    /// Number of raw rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct (trimmed, non-blank) disease names.
    pub fn distinct_diseases(&self) -> usize {
        let names: std::collections::HashSet<&str> = self
            .rows
            .iter()
            .map(|row| row.disease.trim())
            .filter(|name| !name.is_empty())
            .collect();
        names.len()
    }
}

// ── CSV Parsing ─────────────────────────────────────────────────────────────

/// Parse dataset rows from any reader.
///
/// The `Disease` column is required; symptom columns are discovered by the
/// `Symptom_` prefix in header order. Blank and missing cells are dropped at
/// this stage so a sparse or ragged row yields only the symptoms it actually
/// has, instead of aborting the whole load.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<SymptomRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let disease_idx = headers
        .iter()
        .position(|column| column == DISEASE_COLUMN)
        .with_context(|| format!("dataset is missing the {} column", DISEASE_COLUMN))?;
    let symptom_idx: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, column)| column.starts_with(SYMPTOM_COLUMN_PREFIX))
        .map(|(idx, _)| idx)
        .collect();
    debug!(
        symptom_columns = symptom_idx.len(),
        "Parsed disease dataset header"
    );

    let mut rows = Vec::new();
    let mut blank_diseases = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        let disease = record.get(disease_idx).unwrap_or("").to_string();
        if disease.trim().is_empty() {
            blank_diseases += 1;
        }
        let symptoms: Vec<String> = symptom_idx
            .iter()
            .filter_map(|&idx| record.get(idx))
            .filter(|cell| !cell.trim().is_empty())
            .map(|cell| cell.to_string())
            .collect();
        rows.push(SymptomRow { disease, symptoms });
    }
    if blank_diseases > 0 {
        debug!(blank_diseases, "Rows without a disease name feed the vocabulary only");
    }
    Ok(rows)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn sample_csv() -> &'static str {
        "Disease,Symptom_1,Symptom_2,Symptom_3\n\
         Flu,fever,cough,\n\
         Flu,fever, chills,\n\
         Dengue,fever,headache,nausea\n\
         ,orphan_symptom,,\n"
    }

    #[test]
    fn test_reads_rows_and_skips_blank_cells() {
        let rows = read_rows(sample_csv().as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].disease, "Flu");
        assert_eq!(rows[0].symptoms, ["fever", "cough"]);
        assert_eq!(rows[1].symptoms, ["fever", " chills"]);
        assert_eq!(rows[2].symptoms.len(), 3);
        // Blank disease rows survive loading; the indexer decides their fate.
        assert_eq!(rows[3].disease, "");
        assert_eq!(rows[3].symptoms, ["orphan_symptom"]);
    }

    #[test]
    fn test_missing_disease_column_is_an_error() {
        let err = read_rows("Illness,Symptom_1\nFlu,fever\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Disease"));
    }

    #[test]
    fn test_ragged_rows_keep_only_present_cells() {
        let input = "Disease,Symptom_1,Symptom_2\nCold,sneezing\nFlu,fever,cough\n";
        let rows = read_rows(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symptoms, ["sneezing"]);
        assert_eq!(rows[1].symptoms, ["fever", "cough"]);
    }

    #[test]
    fn test_load_reads_from_disk_with_provenance() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_csv().as_bytes()).unwrap();
        let dataset = DiseaseDataset::load(file.path()).unwrap();
        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.distinct_diseases(), 2);
        assert_eq!(dataset.source_file, file.path());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(DiseaseDataset::load(Path::new("does/not/exist.csv")).is_err());
    }
}
