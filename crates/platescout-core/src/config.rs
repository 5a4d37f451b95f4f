use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Priority: CLI > Env > File > Defaults (like a sensible person would do)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// no file exists yet
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("platescout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Spoonacular API key
    /// Get one at https://spoonacular.com/food-api/console
    pub api_key: Option<String>,

    /// API base URL (override for mock servers)
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "https://api.spoonacular.com".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default result-count cap for searches
    #[serde(default = "default_search_count")]
    pub result_count: u32,

    /// Default sample size for random suggestions
    #[serde(default = "default_random_count")]
    pub random_count: u32,
}

fn default_search_count() -> u32 {
    12
}

fn default_random_count() -> u32 {
    9
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_count: default_search_count(),
            random_count: default_random_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_counts() {
        let config = Config::default();
        assert_eq!(config.search.result_count, 12);
        assert_eq!(config.search.random_count, 9);
        assert_eq!(config.catalog.api_url, "https://api.spoonacular.com");
        assert!(config.catalog.api_key.is_none());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.catalog.api_key = Some("test-key".to_string());

        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.catalog.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let parsed: Config = toml::from_str("[catalog]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(parsed.search.result_count, 12);
        assert_eq!(parsed.catalog.api_url, "https://api.spoonacular.com");
    }
}
