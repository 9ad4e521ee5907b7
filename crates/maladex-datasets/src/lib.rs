//! maladex-datasets: CSV table loading for the matching engine.
//!
//! Four tables, all UTF-8 CSV:
//! - [`symptoms`]: the disease/symptom reference dataset (required).
//! - [`precautions`]: precaution texts per disease.
//! - [`translations`]: optional localized symptom labels.
//! - [`images`]: optional disease→image-file names.
//!
//! Loaders return plain data for maladex-core to index; they never cache or
//! watch files.

pub mod images;
pub mod precautions;
pub mod symptoms;
pub mod translations;

pub use images::ImageMap;
pub use precautions::PrecautionTable;
pub use symptoms::DiseaseDataset;
