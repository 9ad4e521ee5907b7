//! The symptom vocabulary: every distinct raw token a dataset has shown us,
//! addressable by display name or canonical key.

use std::collections::HashMap;

use crate::normalize::{canonical_key, display_name, TranslationTable};

/// Bidirectional symptom name map built from raw dataset tokens.
///
/// Two raw tokens that share a canonical form (`abdominal_pain` and
/// `abdominal pain`) collide on the display name; the first-discovered token
/// keeps the entry and later ones resolve to it. Display names are kept in a
/// sorted list for presentation.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    display_to_raw: HashMap<String, String>,
    canonical_to_raw: HashMap<String, String>,
    sorted_displays: Vec<String>,
}

impl Vocabulary {
    /// Build from raw tokens in first-discovery order.
    pub fn from_tokens<I, S>(tokens: I, translations: Option<&TranslationTable>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut display_to_raw: HashMap<String, String> = HashMap::new();
        let mut canonical_to_raw: HashMap<String, String> = HashMap::new();
        for token in tokens {
            let raw = token.as_ref();
            let display = display_name(raw, translations);
            display_to_raw
                .entry(display)
                .or_insert_with(|| raw.to_string());
            canonical_to_raw
                .entry(canonical_key(raw))
                .or_insert_with(|| raw.to_string());
        }
        let mut sorted_displays: Vec<String> = display_to_raw.keys().cloned().collect();
        sorted_displays.sort();
        Self {
            display_to_raw,
            canonical_to_raw,
            sorted_displays,
        }
    }

    /// Display names in sorted order (the selection list).
    pub fn display_names(&self) -> &[String] {
        &self.sorted_displays
    }

    /// Raw token behind a display name.
    pub fn raw_for_display(&self, display: &str) -> Option<&str> {
        self.display_to_raw.get(display).map(String::as_str)
    }

    /// Raw token matching any spelling of a token (canonical-key lookup).
    pub fn raw_for_token(&self, token: &str) -> Option<&str> {
        self.canonical_to_raw
            .get(&canonical_key(token))
            .map(String::as_str)
    }

    /// Number of distinct display names.
    pub fn len(&self) -> usize {
        self.display_to_raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display_to_raw.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
