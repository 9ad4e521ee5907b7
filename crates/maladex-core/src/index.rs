//! Disease profile index built from tabular dataset rows.
//!
//! One dataset row holds a disease name and however many symptom cells were
//! filled in. The index unions all rows for a disease into a single symptom
//! set and remembers the order in which diseases were first seen, so that a
//! later stable sort on score preserves discovery order among ties.

use std::collections::{BTreeSet, HashMap, HashSet};

/// One raw dataset row: a disease plus the symptom cells present on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomRow {
    pub disease: String,
    pub symptoms: Vec<String>,
}

/// A disease and the union of symptom tokens across all of its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseEntry {
    pub disease: String,
    pub symptoms: BTreeSet<String>,
}

/// Aggregated disease profiles in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DiseaseIndex {
    entries: Vec<DiseaseEntry>,
    slots: HashMap<String, usize>,
}

impl DiseaseIndex {
    /// Symptom set for a disease, by exact (trimmed) name.
    pub fn get(&self, disease: &str) -> Option<&BTreeSet<String>> {
        self.slots
            .get(disease.trim())
            .map(|&slot| &self.entries[slot].symptoms)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &DiseaseEntry> {
        self.entries.iter()
    }

    /// Number of distinct diseases, including empty-profile ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_for(&mut self, disease: &str) -> usize {
        match self.slots.get(disease) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push(DiseaseEntry {
                    disease: disease.to_string(),
                    symptoms: BTreeSet::new(),
                });
                self.slots.insert(disease.to_string(), slot);
                slot
            }
        }
    }
}

/// Output of one indexing pass: disease profiles plus the raw vocabulary
/// tokens in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct IndexedDataset {
    pub diseases: DiseaseIndex,
    pub vocabulary_tokens: Vec<String>,
}

/// Index dataset rows in a single pass.
///
/// Symptom cells are trimmed before insertion and blank cells are skipped.
/// Rows with a blank disease contribute to the vocabulary but not to any
/// profile. A disease whose rows carry no symptoms still gets an (empty)
/// entry; scoring excludes it later.
pub fn index_rows<I>(rows: I) -> IndexedDataset
where
    I: IntoIterator<Item = SymptomRow>,
{
    let mut indexed = IndexedDataset::default();
    let mut seen: HashSet<String> = HashSet::new();
    for row in rows {
        let tokens: Vec<&str> = row
            .symptoms
            .iter()
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .collect();
        for &token in &tokens {
            if seen.insert(token.to_string()) {
                indexed.vocabulary_tokens.push(token.to_string());
            }
        }
        let disease = row.disease.trim();
        if disease.is_empty() {
            continue;
        }
        let slot = indexed.diseases.slot_for(disease);
        for &token in &tokens {
            indexed.diseases.entries[slot]
                .symptoms
                .insert(token.to_string());
        }
    }
    indexed
}

// ── Tests ───────────────────────────────────────────────────────────────────
