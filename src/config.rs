//! Layered configuration for deck comparison runs.
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - `.deckmatch/settings.toml` (searched upward from the current directory)
//! - environment variables
//! - CLI argument overrides (applied by the command layer)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DM_` and use double underscores
//! to separate nested levels:
//! - `DM_SIMILARITY__TEXT_STRICT=true` sets `similarity.text_strict`
//! - `DM_COMPARISON__POLICY=exclusive` sets `comparison.policy`
//! - `DM_LOGGING__DEFAULT=debug` sets `logging.default`
//!
//! Raw settings are plain data. [`Settings::validate`] turns them into the
//! checked runtime types, so a bad value is reported before any deck is read.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::compare::{BandEdges, ComparisonOptions, DEFAULT_RANK_THRESHOLD};
use crate::error::ConfigError;
use crate::grading::{GradeThresholds, distance_defaults};
use crate::matcher::MatchPolicy;
use crate::signals::thresholds;
use crate::similarity::SimilarityConfig;

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".deckmatch";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";

const ENV_PREFIX: &str = "DM_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Element and slide scoring
    #[serde(default)]
    pub similarity: SimilaritySection,

    /// Image hash / text vector grading
    #[serde(default)]
    pub grading: GradingConfig,

    /// Cross-deck comparison
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Score bands for reports
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimilaritySection {
    /// Weight of bounding box similarity
    #[serde(default = "default_layout_weight")]
    pub layout_weight: f64,

    /// Weight of text similarity, `layout_weight + text_weight` must be 1.0
    #[serde(default = "default_text_weight")]
    pub text_weight: f64,

    /// Minimum slide score for within-deck pairs
    #[serde(default = "default_slide_threshold")]
    pub slide_threshold: f64,

    /// Minimum element score to count an element as matched
    #[serde(default = "default_element_threshold")]
    pub element_threshold: f64,

    /// Compare text by exact equality instead of fuzzy ratio
    #[serde(default)]
    pub text_strict: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GradingConfig {
    /// Maximum image hash distance per grade
    #[serde(default = "default_distance_exact")]
    pub distance_exact: u32,
    #[serde(default = "default_distance_high")]
    pub distance_high: u32,
    #[serde(default = "default_distance_low")]
    pub distance_low: u32,

    /// Minimum text vector similarity per grade
    #[serde(default = "default_similarity_exact")]
    pub similarity_exact: f64,
    #[serde(default = "default_similarity_high")]
    pub similarity_high: f64,
    #[serde(default = "default_similarity_low")]
    pub similarity_low: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Slide matching policy: "coverage" or "exclusive"
    #[serde(default)]
    pub policy: MatchPolicy,

    /// Minimum score to keep a cross-deck candidate
    #[serde(default = "default_rank_threshold")]
    pub rank_threshold: f64,

    /// Fused vector cosine an exclusive element match must exceed
    #[serde(default = "default_exclusive_threshold")]
    pub exclusive_threshold: f64,

    /// Leading slides dropped from each deck (e.g. a title slide)
    #[serde(default)]
    pub skip_leading: usize,

    /// Number of threads for pair evaluation
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// Lower edge of the strong band
    #[serde(default = "default_strong")]
    pub strong: f64,

    /// Lower edge of the moderate band
    #[serde(default = "default_moderate")]
    pub moderate: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `compare = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

/// Checked runtime values derived from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub similarity: SimilarityConfig,
    pub grading: GradeThresholds,
    pub comparison: ComparisonOptions,
    pub bands: BandEdges,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_layout_weight() -> f64 {
    SimilarityConfig::default().layout_weight()
}
fn default_text_weight() -> f64 {
    SimilarityConfig::default().text_weight()
}
fn default_slide_threshold() -> f64 {
    SimilarityConfig::default().slide_threshold()
}
fn default_element_threshold() -> f64 {
    SimilarityConfig::default().element_threshold()
}
fn default_distance_exact() -> u32 {
    distance_defaults::EXACT
}
fn default_distance_high() -> u32 {
    distance_defaults::HIGH
}
fn default_distance_low() -> u32 {
    distance_defaults::LOW
}
fn default_similarity_exact() -> f64 {
    thresholds::TEXT_EXACT
}
fn default_similarity_high() -> f64 {
    thresholds::TEXT_HIGH
}
fn default_similarity_low() -> f64 {
    thresholds::TEXT_LOW
}
fn default_rank_threshold() -> f64 {
    DEFAULT_RANK_THRESHOLD
}
fn default_exclusive_threshold() -> f64 {
    thresholds::EXCLUSIVE_MATCH
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_strong() -> f64 {
    BandEdges::default().strong()
}
fn default_moderate() -> f64 {
    BandEdges::default().moderate()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            similarity: SimilaritySection::default(),
            grading: GradingConfig::default(),
            comparison: ComparisonConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SimilaritySection {
    fn default() -> Self {
        Self {
            layout_weight: default_layout_weight(),
            text_weight: default_text_weight(),
            slide_threshold: default_slide_threshold(),
            element_threshold: default_element_threshold(),
            text_strict: false,
        }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            distance_exact: default_distance_exact(),
            distance_high: default_distance_high(),
            distance_low: default_distance_low(),
            similarity_exact: default_similarity_exact(),
            similarity_high: default_similarity_high(),
            similarity_low: default_similarity_low(),
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::default(),
            rank_threshold: default_rank_threshold(),
            exclusive_threshold: default_exclusive_threshold(),
            skip_leading: 0,
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            strong: default_strong(),
            moderate: default_moderate(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels; single underscores
            // stay part of the field name
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
            .extract()
            .map_err(Box::new)
    }

    /// Find `.deckmatch/settings.toml` from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_in(Path::new("."), force)
    }

    /// Create a default settings file under `root`
    pub fn init_config_file_in(
        root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }

    pub fn similarity_config(&self) -> Result<SimilarityConfig, ConfigError> {
        let s = &self.similarity;
        SimilarityConfig::new(
            s.layout_weight,
            s.text_weight,
            s.slide_threshold,
            s.element_threshold,
            s.text_strict,
        )
    }

    pub fn grade_thresholds(&self) -> Result<GradeThresholds, ConfigError> {
        let g = &self.grading;
        GradeThresholds::new(
            (g.distance_exact, g.distance_high, g.distance_low),
            (g.similarity_exact, g.similarity_high, g.similarity_low),
        )
    }

    pub fn comparison_options(&self) -> Result<ComparisonOptions, ConfigError> {
        let c = &self.comparison;
        ComparisonOptions::new(
            c.policy,
            c.rank_threshold,
            c.exclusive_threshold,
            c.skip_leading,
        )
    }

    pub fn band_edges(&self) -> Result<BandEdges, ConfigError> {
        BandEdges::new(self.report.strong, self.report.moderate)
    }

    /// Check every section and build the runtime values.
    pub fn validate(&self) -> Result<EngineSettings, ConfigError> {
        Ok(EngineSettings {
            similarity: self.similarity_config()?,
            grading: self.grade_thresholds()?,
            comparison: self.comparison_options()?,
            bands: self.band_edges()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.similarity.layout_weight, 0.2);
        assert_eq!(settings.similarity.text_weight, 0.8);
        assert_eq!(settings.grading.distance_high, 4);
        assert_eq!(settings.comparison.policy, MatchPolicy::Coverage);
        assert!(settings.comparison.parallel_threads > 0);
        assert_eq!(settings.logging.default, "warn");

        let engine = settings.validate().unwrap();
        assert_eq!(engine.similarity, SimilarityConfig::default());
        assert_eq!(engine.grading, GradeThresholds::default());
        assert_eq!(engine.comparison, ComparisonOptions::default());
        assert_eq!(engine.bands, BandEdges::default());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[similarity]
layout_weight = 0.5
text_weight = 0.5
text_strict = true

[comparison]
policy = "exclusive"
skip_leading = 1

[logging.modules]
compare = "debug"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.similarity.layout_weight, 0.5);
        assert!(settings.similarity.text_strict);
        assert_eq!(settings.comparison.policy, MatchPolicy::Exclusive);
        assert_eq!(settings.comparison.skip_leading, 1);
        assert_eq!(settings.logging.modules["compare"], "debug");

        // Untouched values keep their defaults
        assert_eq!(settings.similarity.slide_threshold, 0.8);
        assert_eq!(settings.comparison.rank_threshold, 0.7);
        assert_eq!(settings.report.moderate, 0.6);
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.comparison.parallel_threads = 2;
        settings.grading.distance_low = 12;

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.comparison.parallel_threads, 2);
        assert_eq!(loaded.grading.distance_low, 12);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = Settings::init_config_file_in(temp_dir.path(), false).unwrap();
        assert!(path.ends_with(".deckmatch/settings.toml"));
        assert!(path.exists());

        assert!(Settings::init_config_file_in(temp_dir.path(), false).is_err());
        assert!(Settings::init_config_file_in(temp_dir.path(), true).is_ok());
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let mut settings = Settings::default();
        settings.similarity.text_weight = 0.9;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::WeightSum { .. })
        ));

        let mut settings = Settings::default();
        settings.grading.distance_high = 20;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::DistanceOrdering { .. })
        ));

        let mut settings = Settings::default();
        settings.report.moderate = 0.9;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::BandOrdering { .. })
        ));
    }
}
