//! Fuzzy reconciliation of free-text symptom tokens against the vocabulary.
//!
//! Users type whatever they like (`"demam, flu; sakit kepala"`). Each token is
//! compared against every vocabulary display name on canonical keys, so case,
//! spacing and underscores never influence the similarity ranking. Tokens that
//! match nothing become ad-hoc symptoms instead of failing.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::normalize::{canonical_key, display_name, manual_key, TranslationTable};
use crate::vocab::Vocabulary;

/// Default ceiling on candidates returned per token.
pub const MAX_CANDIDATES: usize = 5;

/// Resolver settings.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Similarity cutoff in [0, 1]; candidates below it are discarded.
    /// Out-of-range values are clamped, never rejected.
    pub cutoff: f64,
    /// Keep at most this many candidates per token.
    pub max_candidates: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.70,
            max_candidates: MAX_CANDIDATES,
        }
    }
}

/// A free-text token waiting for an explicit mapping decision.
#[derive(Debug, Clone)]
pub struct PendingMapping {
    /// The token as the user typed it.
    pub token: String,
    /// Cleaned display form of the token.
    pub display: String,
    /// Vocabulary display names within the cutoff, best first.
    pub candidates: Vec<String>,
}

/// Explicit decision for one pending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingChoice {
    /// Map onto the vocabulary entry behind this display name.
    Vocabulary(String),
    /// Register the token as a new ad-hoc symptom.
    Manual,
}

/// What a resolution pass did with each token.
#[derive(Debug, Clone, Default)]
pub struct ResolutionOutcome {
    /// Raw tokens to add to the selection, in input order.
    pub resolved: Vec<String>,
    /// (token, display name) pairs mapped onto existing vocabulary entries.
    pub mapped: Vec<(String, String)>,
    /// (token, manual key) pairs registered as ad-hoc symptoms.
    pub added: Vec<(String, String)>,
    /// Tokens with two or more candidates, with the full candidate list.
    /// Informational only: the top candidate is mapped regardless.
    pub ambiguous: Vec<(String, Vec<String>)>,
}

/// Split bulk free-text into candidate tokens.
///
/// Separators are comma, semicolon and newline. Fragments are trimmed and
/// blank ones discarded.
pub fn split_bulk_input(text: &str) -> Vec<String> {
    text.split(|c| matches!(c, ',' | ';' | '\n'))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blended similarity over canonical forms: 1.0 iff the two keys are
/// identical. Jaro-Winkler favors shared prefixes, which suits typo-laden
/// symptom names; the normalized Levenshtein term keeps overall edit distance
/// honest.
fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

/// Candidate display names for one free-text token, best first.
///
/// Ties on similarity break on the display name so the ordering is
/// deterministic across runs.
pub fn close_matches(token: &str, vocab: &Vocabulary, config: &ResolverConfig) -> Vec<String> {
    let needle = canonical_key(token);
    if needle.is_empty() {
        return Vec::new();
    }
    let cutoff = config.cutoff.clamp(0.0, 1.0);
    let mut scored: Vec<(f64, &str)> = vocab
        .display_names()
        .iter()
        .filter_map(|candidate| {
            let score = similarity(&needle, &canonical_key(candidate));
            (score >= cutoff).then_some((score, candidate.as_str()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.truncate(config.max_candidates);
    scored
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Resolve tokens without user interaction.
///
/// The top candidate wins; a token with two or more candidates is additionally
/// reported as ambiguous, and a token with none is promoted to an ad-hoc
/// symptom under its manual key.
pub fn resolve_auto(
    tokens: &[String],
    vocab: &Vocabulary,
    config: &ResolverConfig,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();
    for token in tokens {
        let candidates = close_matches(token, vocab, config);
        let top_hit = candidates.first().and_then(|top| {
            vocab
                .raw_for_display(top)
                .map(|raw| (top.clone(), raw.to_string()))
        });
        match top_hit {
            Some((top, raw)) => {
                outcome.resolved.push(raw);
                outcome.mapped.push((token.clone(), top));
                if candidates.len() > 1 {
                    outcome.ambiguous.push((token.clone(), candidates));
                }
            }
            None => {
                let key = manual_key(token);
                outcome.resolved.push(key.clone());
                outcome.added.push((token.clone(), key));
            }
        }
    }
    outcome
}

/// Confirm-before-map, first half: compute candidates per token without
/// mapping anything. The caller presents each pending entry (candidates plus
/// an explicit manual option) and collects decisions.
pub fn propose_mappings(
    tokens: &[String],
    vocab: &Vocabulary,
    config: &ResolverConfig,
    translations: Option<&TranslationTable>,
) -> Vec<PendingMapping> {
    tokens
        .iter()
        .map(|token| PendingMapping {
            token: token.clone(),
            display: display_name(token, translations),
            candidates: close_matches(token, vocab, config),
        })
        .collect()
}

/// Confirm-before-map, second half: apply one explicit decision per pending
/// token, in order. A vocabulary choice whose display name is unknown falls
/// back to the manual key; pending entries without a paired decision are
/// dropped.
pub fn confirm_mappings(
    pending: &[PendingMapping],
    choices: &[MappingChoice],
    vocab: &Vocabulary,
) -> ResolutionOutcome {
    let mut outcome = ResolutionOutcome::default();
    for (entry, choice) in pending.iter().zip(choices) {
        let chosen_raw = match choice {
            MappingChoice::Vocabulary(display) => vocab
                .raw_for_display(display)
                .map(|raw| (display.clone(), raw.to_string())),
            MappingChoice::Manual => None,
        };
        match chosen_raw {
            Some((display, raw)) => {
                outcome.resolved.push(raw);
                outcome.mapped.push((entry.token.clone(), display));
            }
            None => {
                let key = manual_key(&entry.token);
                outcome.resolved.push(key.clone());
                outcome.added.push((entry.token.clone(), key));
            }
        }
    }
    outcome
}

// ── Tests ───────────────────────────────────────────────────────────────────
