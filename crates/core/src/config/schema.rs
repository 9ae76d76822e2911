//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Application-wide settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fuzzy text search tuning
    #[serde(default)]
    pub search: SearchConfig,

    /// Geo filter defaults
    #[serde(default)]
    pub geo: GeoConfig,

    /// Listing policies
    #[serde(default)]
    pub listings: ListingsConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Display name used in share messages
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Public origin used to build item share links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            base_url: default_base_url(),
        }
    }
}

fn default_app_name() -> String {
    "ReUniteMe".to_string()
}

fn default_base_url() -> String {
    "https://reunite.me".to_string()
}

/// Fuzzy search configuration.
///
/// A field matches when `errors / pattern_len + start / distance <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum tolerated mismatch per field (0 = exact, 1 = anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// How far into a field a match may start before it is fully penalised
    #[serde(default = "default_distance")]
    pub distance: usize,

    /// Ignore where in the field the match starts
    #[serde(default)]
    pub ignore_location: bool,

    /// Relative weight of each searched field
    #[serde(default)]
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            distance: default_distance(),
            ignore_location: false,
            weights: FieldWeights::default(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_distance() -> usize {
    100
}

/// Weights of the searched item fields
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_city_weight")]
    pub city: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            description: default_description_weight(),
            category: default_category_weight(),
            city: default_city_weight(),
        }
    }
}

fn default_name_weight() -> f64 {
    0.4
}

fn default_description_weight() -> f64 {
    0.3
}

fn default_category_weight() -> f64 {
    0.2
}

fn default_city_weight() -> f64 {
    0.1
}

/// Geo filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Radius applied when a center is given without an explicit radius
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 {
    10.0
}

/// Listing policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsConfig {
    /// Active items older than this many days are due for archiving
    #[serde(default = "default_auto_archive_days")]
    pub auto_archive_days: u32,

    /// Largest accepted photo upload
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            auto_archive_days: default_auto_archive_days(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

fn default_auto_archive_days() -> u32 {
    30
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (`RUST_LOG` takes precedence)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
