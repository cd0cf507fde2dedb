//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Cutplan configuration with layered hierarchy
///
/// Built-in defaults, then the global user config, then environment
/// variables; CLI flags override all of these per invocation.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default stock sheet width, mm
    pub sheet_width: f64,

    /// Default stock sheet height, mm
    pub sheet_height: f64,

    /// Default saw kerf, mm
    pub kerf: f64,

    /// Whether panels may be rotated by default
    pub rotation_allowed: bool,

    /// Maximum sheets per pack run
    pub max_bins: usize,

    /// Board price per sheet
    pub board_price: f64,

    /// Skin (veneer) surcharge per m²
    pub skin_cost_m2: f64,

    /// History database path (default: platform data dir)
    pub db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_width: 2440.0,
            sheet_height: 1220.0,
            kerf: 3.0,
            rotation_allowed: true,
            max_bins: 100,
            board_price: 1500.0,
            skin_cost_m2: 200.0,
            db_path: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // Global user config (~/.config/cutplan/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config = global;
                    }
                }
            }
        }

        // Environment variables
        if let Ok(db) = std::env::var("CUTPLAN_DB") {
            config.db_path = Some(PathBuf::from(db));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cutplan")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Resolve the history database path, falling back to the platform data
    /// directory
    pub fn db_path(&self) -> PathBuf {
        if let Some(ref path) = self.db_path {
            return path.clone();
        }
        directories::ProjectDirs::from("", "", "cutplan")
            .map(|dirs| dirs.data_dir().join("history.db3"))
            .unwrap_or_else(|| PathBuf::from("cutplan-history.db3"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shop_stock() {
        let config = Config::default();
        assert_eq!(config.sheet_width, 2440.0);
        assert_eq!(config.sheet_height, 1220.0);
        assert_eq!(config.kerf, 3.0);
        assert!(config.rotation_allowed);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yml::from_str("kerf: 5\n").unwrap();
        assert_eq!(config.kerf, 5.0);
        assert_eq!(config.sheet_width, 2440.0);
    }
}
