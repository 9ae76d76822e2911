//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path or use defaults.
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// probed and defaults are used when none is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        let config = Self { schema, path: None };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the search and geo code cannot work with
    pub fn validate(&self) -> Result<()> {
        let search = &self.schema.search;
        if !(0.0..=1.0).contains(&search.threshold) {
            return Err(Error::invalid_config_value(
                "search.threshold",
                format!("{} is outside 0.0..=1.0", search.threshold),
            ));
        }
        if search.distance == 0 && !search.ignore_location {
            return Err(Error::invalid_config_value(
                "search.distance",
                "must be positive unless ignore_location is set",
            ));
        }
        let w = search.weights;
        let weights = [
            ("search.weights.name", w.name),
            ("search.weights.description", w.description),
            ("search.weights.category", w.category),
            ("search.weights.city", w.city),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_config_value(key, "weights must be positive"));
            }
        }
        let radius = self.schema.geo.default_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid_config_value(
                "geo.default_radius_km",
                "must be a positive number of kilometres",
            ));
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".reunite.toml", "reunite.toml", ".config/reunite.toml"];

    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("reunite").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert!((config.schema.search.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.schema.search.distance, 100);
        assert_eq!(config.schema.listings.auto_archive_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [search]
            threshold = 0.4

            [search.weights]
            name = 0.7
            "#,
        )
        .unwrap();

        assert!((config.schema.search.threshold - 0.4).abs() < f64::EPSILON);
        assert!((config.schema.search.weights.name - 0.7).abs() < f64::EPSILON);
        assert!((config.schema.search.weights.city - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.schema.general.app_name, "ReUniteMe");
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let err = Config::from_toml("[search]\nthreshold = 1.5\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.message.contains("search.threshold"));
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let err = Config::from_toml("[search.weights]\ncity = 0.0\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml("[search\nthreshold = ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[geo]\ndefault_radius_km = 2.5").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.path.as_deref(), Some(file.path()));
        assert!((config.schema.geo.default_radius_km - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/reunite.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }
}
