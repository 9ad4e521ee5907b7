//! Optional symptom label translation table.
//!
//! Rows of (english_symptom, indonesia_symptom) pairs. Keys are canonicalized
//! by [`maladex_core::TranslationTable`] at build time; this module only gets
//! the pairs off disk.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use maladex_core::TranslationTable;

const SOURCE_COLUMN: &str = "english_symptom";
const LOCALIZED_COLUMN: &str = "indonesia_symptom";

/// Load a translation table from a CSV file.
pub fn load(path: &Path) -> Result<TranslationTable> {
    let file =
        File::open(path).with_context(|| format!("Failed to open translation table {:?}", path))?;
    let table = from_reader(file)
        .with_context(|| format!("Failed to parse translation table {:?}", path))?;
    info!(
        labels = table.len(),
        file = %path.display(),
        "Loaded symptom translation table"
    );
    Ok(table)
}

/// Parse a translation table from any reader. Rows missing either side are
/// skipped.
pub fn from_reader<R: Read>(reader: R) -> Result<TranslationTable> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let source_idx = headers
        .iter()
        .position(|column| column == SOURCE_COLUMN)
        .with_context(|| format!("translation table is missing the {} column", SOURCE_COLUMN))?;
    let localized_idx = headers
        .iter()
        .position(|column| column == LOCALIZED_COLUMN)
        .with_context(|| {
            format!("translation table is missing the {} column", LOCALIZED_COLUMN)
        })?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let source = record.get(source_idx).unwrap_or("");
        let localized = record.get(localized_idx).unwrap_or("");
        if source.trim().is_empty() || localized.trim().is_empty() {
            continue;
        }
        pairs.push((source.to_string(), localized.to_string()));
    }
    Ok(TranslationTable::from_pairs(pairs))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_pairs_and_canonicalizes_keys() {
        let input = "english_symptom,indonesia_symptom\n\
                     high_fever,Demam Tinggi\n\
                     cough,Batuk\n\
                     ,Kosong\n\
                     skipped,\n";
        let table = from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("high fever"), Some("Demam Tinggi"));
        assert_eq!(table.lookup("cough"), Some("Batuk"));
        assert_eq!(table.lookup("skipped"), None);
    }

    #[test]
    fn test_missing_columns_are_an_error() {
        let err = from_reader("english_symptom,label\nfever,Demam\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("indonesia_symptom"));
    }
}
