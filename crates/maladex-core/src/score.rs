//! Intersection scoring of a selected-symptom set against disease profiles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::index::DiseaseIndex;
use crate::normalize::{display_name, TranslationTable};

/// One ranked disease with its overlap statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub disease: String,
    /// Selected symptoms present in the disease profile.
    pub matched: usize,
    /// Size of the disease profile.
    pub total: usize,
    /// matched / total.
    pub score: f64,
    /// Display names of the matched symptoms, sorted.
    pub matched_names: Vec<String>,
}

/// Presentation tier for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    /// High at 0.75 and above, Medium at 0.50 and above, Low below that.
    pub fn for_score(score: f64) -> Self {
        if score >= 0.75 {
            MatchTier::High
        } else if score >= 0.50 {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }
}

/// Rank every disease by overlap with the selected raw tokens.
///
/// Diseases with an empty profile or zero overlap are excluded outright. The
/// sort on descending score is stable, so equal scores keep the index's
/// first-seen order. Returns the full ranked set; callers truncate for
/// presentation.
pub fn rank_diseases(
    selected: &[String],
    index: &DiseaseIndex,
    translations: Option<&TranslationTable>,
) -> Vec<MatchResult> {
    let chosen: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut results: Vec<MatchResult> = Vec::new();
    for entry in index.iter() {
        if entry.symptoms.is_empty() {
            continue;
        }
        let matched_raw: Vec<&str> = entry
            .symptoms
            .iter()
            .map(String::as_str)
            .filter(|token| chosen.contains(token))
            .collect();
        if matched_raw.is_empty() {
            continue;
        }
        let matched = matched_raw.len();
        let total = entry.symptoms.len();
        let score = if total == 0 {
            0.0
        } else {
            matched as f64 / total as f64
        };
        let mut matched_names: Vec<String> = matched_raw
            .iter()
            .map(|raw| display_name(raw, translations))
            .collect();
        matched_names.sort();
        results.push(MatchResult {
            disease: entry.disease.clone(),
            matched,
            total,
            score,
            matched_names,
        });
    }
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results
}

/// Run one prediction request.
///
/// An empty selection is rejected before any scoring happens.
pub fn predict(
    selected: &[String],
    index: &DiseaseIndex,
    translations: Option<&TranslationTable>,
) -> Result<Vec<MatchResult>> {
    if selected.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    Ok(rank_diseases(selected, index, translations))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{index_rows, SymptomRow};

    fn row(disease: &str, symptoms: &[&str]) -> SymptomRow {
        SymptomRow {
            disease: disease.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn selection(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_overlap_outranks_partial_overlap() {
        let indexed = index_rows([
            row("A", &["fever", "cough"]),
            row("B", &["fever", "headache", "nausea"]),
        ]);
        let ranked = rank_diseases(&selection(&["fever", "cough"]), &indexed.diseases, None);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].disease, "A");
        assert_eq!((ranked[0].matched, ranked[0].total), (2, 2));
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
        assert_eq!(ranked[1].disease, "B");
        assert_eq!((ranked[1].matched, ranked[1].total), (1, 3));
        assert!((ranked[1].score - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_diseases_without_overlap_are_excluded() {
        let indexed = index_rows([
            row("A", &["fever"]),
            row("B", &["rash", "itching"]),
        ]);
        let ranked = rank_diseases(&selection(&["fever"]), &indexed.diseases, None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].disease, "A");
        assert!(ranked.iter().all(|r| r.matched >= 1));
    }

    #[test]
    fn test_empty_profile_diseases_never_appear() {
        let indexed = index_rows([row("Empty", &[]), row("A", &["fever"])]);
        let ranked = rank_diseases(&selection(&["fever"]), &indexed.diseases, None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].disease, "A");
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let indexed = index_rows([
            row("Half", &["fever", "rash"]),
            row("Full", &["fever"]),
            row("Third", &["fever", "rash", "itching"]),
        ]);
        let ranked = rank_diseases(&selection(&["fever"]), &indexed.diseases, None);
        let scores: Vec<f64> = ranked.iter().map(|r| r.score).collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(ranked[0].disease, "Full");
    }

    #[test]
    fn test_equal_scores_keep_first_seen_order() {
        let indexed = index_rows([
            row("Second", &["fever", "rash"]),
            row("First", &["fever", "itching"]),
        ]);
        // Both score 1/2; discovery order decides.
        let ranked = rank_diseases(&selection(&["fever"]), &indexed.diseases, None);
        let names: Vec<&str> = ranked.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, ["Second", "First"]);
    }

    #[test]
    fn test_matched_names_are_sorted_display_names() {
        let indexed = index_rows([row("A", &["vomiting", "abdominal_pain", "chills"])]);
        let ranked = rank_diseases(
            &selection(&["vomiting", "abdominal_pain", "chills"]),
            &indexed.diseases,
            None,
        );
        assert_eq!(
            ranked[0].matched_names,
            ["Abdominal Pain", "Chills", "Vomiting"]
        );
    }

    #[test]
    fn test_matched_names_use_translations_when_present() {
        let table = TranslationTable::from_pairs([("fever", "Demam")]);
        let indexed = index_rows([row("A", &["fever", "cough"])]);
        let ranked = rank_diseases(&selection(&["fever"]), &indexed.diseases, Some(&table));
        assert_eq!(ranked[0].matched_names, ["Demam"]);
    }

    #[test]
    fn test_ad_hoc_selections_simply_never_match() {
        let indexed = index_rows([row("A", &["fever"])]);
        let ranked = rank_diseases(
            &selection(&["fever", "demam_ringan"]),
            &indexed.diseases,
            None,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].matched, 1);
    }

    #[test]
    fn test_empty_selection_is_rejected_before_scoring() {
        let indexed = index_rows([row("A", &["fever"])]);
        let err = predict(&[], &indexed.diseases, None).unwrap_err();
        assert!(matches!(err, EngineError::EmptySelection));
    }

    #[test]
    fn test_predict_with_selection_returns_ranked_results() {
        let indexed = index_rows([row("A", &["fever"])]);
        let ranked = predict(&selection(&["fever"]), &indexed.diseases, None).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_tier_thresholds_sit_at_75_and_50_percent() {
        assert_eq!(MatchTier::for_score(1.0), MatchTier::High);
        assert_eq!(MatchTier::for_score(0.75), MatchTier::High);
        assert_eq!(MatchTier::for_score(0.74), MatchTier::Medium);
        assert_eq!(MatchTier::for_score(0.50), MatchTier::Medium);
        assert_eq!(MatchTier::for_score(0.49), MatchTier::Low);
        assert_eq!(MatchTier::for_score(0.0), MatchTier::Low);
    }
}
