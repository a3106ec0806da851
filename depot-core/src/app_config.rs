use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::CoreResult;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Thresholds used by the warehouse analyzer.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalyticsConfig {
    /// Items priced at or above this count as high value
    #[serde(default = "default_high_value_threshold")]
    pub high_value_threshold: Decimal,
    /// Share of high value items (percent) above which a warning is raised
    #[serde(default = "default_warning_percentage")]
    pub high_value_warning_percentage: f64,
    #[serde(default = "default_minimum_diversity")]
    pub minimum_category_diversity: usize,
    #[serde(default = "default_outlier_factor")]
    pub default_outlier_factor: Decimal,
}

fn default_high_value_threshold() -> Decimal { Decimal::from(1000) }
fn default_warning_percentage() -> f64 { 70.0 }
fn default_minimum_diversity() -> usize { 2 }
fn default_outlier_factor() -> Decimal { Decimal::new(15, 1) }

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: default_high_value_threshold(),
            high_value_warning_percentage: default_warning_percentage(),
            minimum_category_diversity: default_minimum_diversity(),
            default_outlier_factor: default_outlier_factor(),
        }
    }
}

impl Config {
    /// Load from `./config`, see [`Config::load_from`].
    pub fn load() -> CoreResult<Self> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            // Per environment overrides, optional
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg. `DEPOT__ANALYTICS__HIGH_VALUE_THRESHOLD=500`
            .add_source(config::Environment::with_prefix("DEPOT").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        tracing::debug!(?config, "Loaded configuration for run mode {}", run_mode);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn workspace_config_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("config")
    }

    #[test]
    fn test_defaults_match_business_rules() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.high_value_threshold, Decimal::from(1000));
        assert_eq!(config.high_value_warning_percentage, 70.0);
        assert_eq!(config.minimum_category_diversity, 2);
        assert_eq!(config.default_outlier_factor.to_string(), "1.5");
    }

    #[test]
    fn test_load_default_file() {
        let config = Config::load_from(&workspace_config_dir()).unwrap();
        assert_eq!(config.analytics, AnalyticsConfig::default());
    }

    #[test]
    fn test_missing_directory_falls_back_to_defaults() {
        let config = Config::load_from(Path::new("does/not/exist")).unwrap();
        assert_eq!(config.analytics.minimum_category_diversity, 2);
    }

    #[test]
    fn test_malformed_value_is_config_error() {
        let dir = std::env::temp_dir().join(format!("depot-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("default.toml"), "[analytics]\nminimum_category_diversity = \"many\"\n").unwrap();

        let result = Config::load_from(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(crate::CoreError::Config(_))));
    }
}
