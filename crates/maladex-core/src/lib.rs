//! maladex-core: the symptom→disease matching engine.
//!
//! A pure in-memory pipeline with no filesystem or framework dependencies:
//!
//! 1. [`normalize`] canonicalizes raw symptom/disease tokens.
//! 2. [`index`] aggregates tabular rows into disease profiles and a symptom
//!    vocabulary.
//! 3. [`resolve`] reconciles free-text tokens against the vocabulary with
//!    fuzzy matching, automatically or with explicit confirmation.
//! 4. [`score`] ranks diseases by overlap with the selected symptoms.
//! 5. [`export`] serializes the ranked set to CSV, JSON and plain text.
//!
//! Callers load the tables (see maladex-datasets) and inject them; the index
//! and vocabulary are built once per dataset and treated as read-only
//! afterwards.

pub mod error;
pub mod export;
pub mod index;
pub mod normalize;
pub mod resolve;
pub mod score;
pub mod vocab;

pub use error::{EngineError, Result};
pub use export::ExportRecord;
pub use index::{index_rows, DiseaseEntry, DiseaseIndex, IndexedDataset, SymptomRow};
pub use normalize::TranslationTable;
pub use resolve::{
    split_bulk_input, MappingChoice, PendingMapping, ResolutionOutcome, ResolverConfig,
};
pub use score::{predict, rank_diseases, MatchResult, MatchTier};
pub use vocab::Vocabulary;
