//! Optional disease→image-file mapping.
//!
//! Pure pass-through for the presentation layer: the engine never touches the
//! filesystem to find images, it only reports the configured file name.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

const DISEASE_COLUMN: &str = "Disease";
const IMAGE_COLUMN: &str = "ImageFile";

/// Image file names per disease, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ImageMap {
    entries: HashMap<String, String>,
}

impl ImageMap {
    /// Load the mapping from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open image map {:?}", path))?;
        let map = Self::from_reader(file)
            .with_context(|| format!("Failed to parse image map {:?}", path))?;
        info!(
            diseases = map.len(),
            file = %path.display(),
            "Loaded disease image map"
        );
        Ok(map)
    }

    /// Parse the mapping from any reader. Rows missing either side are
    /// skipped; the first row for a disease wins.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let disease_idx = headers
            .iter()
            .position(|column| column == DISEASE_COLUMN)
            .with_context(|| format!("image map is missing the {} column", DISEASE_COLUMN))?;
        let image_idx = headers
            .iter()
            .position(|column| column == IMAGE_COLUMN)
            .with_context(|| format!("image map is missing the {} column", IMAGE_COLUMN))?;

        let mut entries: HashMap<String, String> = HashMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let disease = record.get(disease_idx).unwrap_or("").trim();
            let image = record.get(image_idx).unwrap_or("").trim();
            if disease.is_empty() || image.is_empty() {
                continue;
            }
            entries
                .entry(disease.to_lowercase())
                .or_insert_with(|| image.to_string());
        }
        Ok(Self { entries })
    }

    /// Image file name for a disease, matched case-insensitively on the
    /// trimmed name.
    pub fn get(&self, disease: &str) -> Option<&str> {
        self.entries
            .get(&disease.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of diseases with an image.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let input = "Disease,ImageFile\nFlu,flu.png\nDengue,dengue.jpg\n";
        let map = ImageMap::from_reader(input.as_bytes()).unwrap();
        assert_eq!(map.get("FLU"), Some("flu.png"));
        assert_eq!(map.get(" dengue "), Some("dengue.jpg"));
        assert_eq!(map.get("Cholera"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let input = "Disease,ImageFile\nFlu,\n,orphan.png\nCold,cold.png\n";
        let map = ImageMap::from_reader(input.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Cold"), Some("cold.png"));
    }
}
