//! Configuration loading for the maladex CLI.
//! Reads maladex.toml from the current directory or path in MALADEX_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_symptoms_file")]
    pub symptoms: String,
    #[serde(default = "default_precautions_file")]
    pub precautions: String,
    /// Optional localized symptom label table.
    pub translations: Option<String>,
    /// Optional disease→image mapping table.
    pub images: Option<String>,
}

fn default_symptoms_file()    -> String { "data/DiseaseAndSymptoms.csv".to_string() }
fn default_precautions_file() -> String { "data/Disease precaution.csv".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            symptoms: default_symptoms_file(),
            precautions: default_precautions_file(),
            translations: None,
            images: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f64,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// When true, free-text tokens are never auto-mapped; the CLI prints the
    /// candidates and waits for an explicit --choose run.
    #[serde(default)]
    pub confirm_before_map: bool,
}

fn default_fuzzy_cutoff()   -> f64 { 0.70 }
fn default_max_candidates() -> usize { 5 }

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: default_fuzzy_cutoff(),
            max_candidates: default_max_candidates(),
            confirm_before_map: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// How many ranked results to print; exports always carry the full set.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize { 5 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Checks MALADEX_CONFIG env var first, then maladex.toml in the current
    /// directory. A missing file is not an error; the defaults stand and
    /// command-line flags can override the rest.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("MALADEX_CONFIG").unwrap_or_else(|_| "maladex.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::debug!(path = %path, "No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

mod tests;
