//! Symptom and disease name normalization.
//!
//! Dataset tokens arrive in snake_case (`abdominal_pain`); users see title-case
//! labels (`Abdominal Pain`), or a localized label when a translation table is
//! loaded. Every lookup funnels through [`canonical_key`] so `" Fever"`,
//! `fever` and `FEVER` name the same symptom.

use std::collections::HashMap;

/// Canonical lookup form of a token: underscores to spaces, trimmed, lowercase.
///
/// Underscore replacement happens before the trim so that `_fever_` and
/// `fever` collapse to the same key.
pub fn canonical_key(token: &str) -> String {
    token.replace('_', " ").trim().to_lowercase()
}

/// Human-facing label for a raw token.
///
/// A translation hit on the canonical key wins; otherwise the canonical key is
/// title-cased word by word.
pub fn display_name(token: &str, translations: Option<&TranslationTable>) -> String {
    let key = canonical_key(token);
    if let Some(table) = translations {
        if let Some(label) = table.lookup(&key) {
            return label.to_string();
        }
    }
    title_case(&key)
}

/// Synthetic raw key for a free-text symptom the vocabulary does not know:
/// trimmed, lowercase, spaces to underscores.
pub fn manual_key(token: &str) -> String {
    token.trim().to_lowercase().replace(' ', "_")
}

/// Filesystem-safe form of a disease name: trimmed, lowercase, spaces to
/// underscores, then everything that is not alphanumeric or underscore
/// dropped.
pub fn filename_safe(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Optional symptom label translations, keyed by canonical symptom.
///
/// Keys are canonicalized at build time so a lookup works for raw dataset
/// tokens and free-text spellings alike. The table is pure data; loading it
/// from disk lives with the dataset loaders.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    labels: HashMap<String, String>,
}

impl TranslationTable {
    /// Build from (source label, localized label) pairs.
    ///
    /// Pairs with a blank side are dropped. When two pairs collide on the
    /// canonical key, the first one wins.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut labels: HashMap<String, String> = HashMap::new();
        for (source, localized) in pairs {
            let key = canonical_key(source.as_ref());
            let label = localized.as_ref().trim();
            if key.is_empty() || label.is_empty() {
                continue;
            }
            labels.entry(key).or_insert_with(|| label.to_string());
        }
        Self { labels }
    }

    /// Localized label for a canonical key.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_collapses_case_underscores_and_whitespace() {
        assert_eq!(canonical_key("abdominal_pain"), "abdominal pain");
        assert_eq!(canonical_key(" Fever"), "fever");
        assert_eq!(canonical_key("FEVER"), "fever");
        assert_eq!(canonical_key("_fever_"), "fever");
        assert_eq!(canonical_key("fever"), "fever");
    }

    #[test]
    fn test_display_name_title_cases_without_translations() {
        assert_eq!(display_name("abdominal_pain", None), "Abdominal Pain");
        assert_eq!(display_name("fever", None), "Fever");
        assert_eq!(display_name("  high_FEVER ", None), "High Fever");
    }

    #[test]
    fn test_display_name_prefers_translation_hits() {
        let table = TranslationTable::from_pairs([("high_fever", "Demam Tinggi")]);
        assert_eq!(display_name("high_fever", Some(&table)), "Demam Tinggi");
        assert_eq!(display_name("HIGH FEVER", Some(&table)), "Demam Tinggi");
        // Miss falls back to title case.
        assert_eq!(display_name("cough", Some(&table)), "Cough");
    }

    #[test]
    fn test_manual_key_is_lowercase_underscored() {
        assert_eq!(manual_key("Demam Ringan"), "demam_ringan");
        assert_eq!(manual_key("  flu  "), "flu");
    }

    #[test]
    fn test_filename_safe_strips_punctuation() {
        assert_eq!(filename_safe("Fungal infection"), "fungal_infection");
        assert_eq!(filename_safe("Hepatitis B"), "hepatitis_b");
        assert_eq!(
            filename_safe("Dimorphic hemmorhoids(piles)"),
            "dimorphic_hemmorhoidspiles"
        );
        assert_eq!(filename_safe(" Migraine "), "migraine");
    }

    #[test]
    fn test_translation_table_drops_blanks_and_keeps_first_collision() {
        let table = TranslationTable::from_pairs([
            ("fever", "Demam"),
            ("", "Kosong"),
            ("cough", "  "),
            ("FEVER", "Panas"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("fever"), Some("Demam"));
        assert_eq!(table.lookup("cough"), None);
    }
}
