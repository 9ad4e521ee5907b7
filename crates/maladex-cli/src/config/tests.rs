#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_default_matching_settings() {
        let matching = MatchingConfig::default();
        assert!((matching.fuzzy_cutoff - 0.70).abs() < f64::EPSILON);
        assert_eq!(matching.max_candidates, 5);
        assert!(!matching.confirm_before_map);
    }

    #[test]
    fn test_default_paths_point_at_data_directory() {
        let data = DataConfig::default();
        assert_eq!(data.symptoms, "data/DiseaseAndSymptoms.csv");
        assert_eq!(data.precautions, "data/Disease precaution.csv");
        assert!(data.translations.is_none());
        assert!(data.images.is_none());
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            "[matching]\n\
             fuzzy_cutoff = 0.8\n\
             \n\
             [data]\n\
             translations = \"data/symptom_translation.csv\"\n",
        )
        .unwrap();
        assert!((config.matching.fuzzy_cutoff - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.matching.max_candidates, 5);
        assert_eq!(config.output.top_n, 5);
        assert_eq!(config.data.symptoms, "data/DiseaseAndSymptoms.csv");
        assert_eq!(
            config.data.translations.as_deref(),
            Some("data/symptom_translation.csv")
        );
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.top_n, OutputConfig::default().top_n);
        assert_eq!(config.data.symptoms, DataConfig::default().symptoms);
    }
}
