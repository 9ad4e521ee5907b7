//! Serialization of ranked results into exchange formats.
//!
//! Produces the representations only; where they end up (file, download,
//! stdout) is the caller's business.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::score::MatchResult;

/// One tabular export row. Column names match the historical export layout so
/// downstream spreadsheets keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "Disease")]
    pub disease: String,
    #[serde(rename = "Matched Symptoms")]
    pub matched_symptoms: usize,
    #[serde(rename = "Matched Symptom Names")]
    pub matched_symptom_names: String,
    #[serde(rename = "Total Symptoms")]
    pub total_symptoms: usize,
    #[serde(rename = "Match Score")]
    pub match_score: f64,
}

impl From<&MatchResult> for ExportRecord {
    fn from(result: &MatchResult) -> Self {
        Self {
            disease: result.disease.clone(),
            matched_symptoms: result.matched,
            matched_symptom_names: result.matched_names.join("; "),
            total_symptoms: result.total,
            match_score: result.score,
        }
    }
}

/// Flatten ranked results into export rows, preserving rank order.
pub fn to_records(results: &[MatchResult]) -> Vec<ExportRecord> {
    results.iter().map(ExportRecord::from).collect()
}

/// Write the full ranked set as CSV with a header row.
pub fn write_csv<W: io::Write>(results: &[MatchResult], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in to_records(results) {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read export rows back from CSV.
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<ExportRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// JSON array of export rows.
pub fn to_json(results: &[MatchResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_records(results))?)
}

/// Human-readable summary, one paragraph per ranked result.
pub fn text_summary(results: &[MatchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(position, result)| {
            format!(
                "{}. {} - {}/{} ({:.2})\n    Matched symptoms: {}",
                position + 1,
                result.disease,
                result.matched,
                result.total,
                result.score,
                result.matched_names.join("; ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ── Tests ───────────────────────────────────────────────────────────────────
