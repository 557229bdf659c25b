//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/mood-map/config.toml

pub mod defaults;

use crate::cluster::ClusterParams;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Clustering parameters
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Demo post generation
    #[serde(default)]
    pub demo: DemoConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Default values for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Clustering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cell width as a fraction of viewport width
    #[serde(default = "default_cell_width_ratio")]
    pub cell_width_ratio: f64,

    /// Cell height as a fraction of viewport width
    #[serde(default = "default_cell_height_ratio")]
    pub cell_height_ratio: f64,

    /// Largest bucket shown without reduction
    #[serde(default = "default_pass_through_limit")]
    pub pass_through_limit: usize,
}

/// Demo post generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Viewport width per generated post, in projected units
    #[serde(default = "default_demo_spacing")]
    pub spacing: f64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_cell_width_ratio() -> f64 {
    DEFAULT_CELL_WIDTH_RATIO
}
fn default_cell_height_ratio() -> f64 {
    DEFAULT_CELL_HEIGHT_RATIO
}
fn default_pass_through_limit() -> usize {
    DEFAULT_PASS_THROUGH_LIMIT
}
fn default_demo_spacing() -> f64 {
    DEFAULT_DEMO_SPACING
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cell_width_ratio: default_cell_width_ratio(),
            cell_height_ratio: default_cell_height_ratio(),
            pass_through_limit: default_pass_through_limit(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            spacing: default_demo_spacing(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["cluster", "cell_width_ratio"] => Some(self.cluster.cell_width_ratio.to_string()),
            ["cluster", "cell_height_ratio"] => Some(self.cluster.cell_height_ratio.to_string()),
            ["cluster", "pass_through_limit"] => {
                Some(self.cluster.pass_through_limit.to_string())
            }

            ["demo", "spacing"] => Some(self.demo.spacing.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong. Cluster
    /// settings are validated as a whole before they are stored.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                crate::format::get_formatter(value)
                    .ok_or_else(|| Error::Config(format!("Unknown format: {}", value)))?;
                self.defaults.format = value.to_lowercase();
            }

            ["cluster", field] => {
                let mut cluster = self.cluster.clone();
                match *field {
                    "cell_width_ratio" => cluster.cell_width_ratio = parse_value(key, value)?,
                    "cell_height_ratio" => cluster.cell_height_ratio = parse_value(key, value)?,
                    "pass_through_limit" => {
                        cluster.pass_through_limit = parse_value(key, value)?
                    }
                    _ => return Err(Error::Config(format!("Unknown config key: {}", key))),
                }
                cluster
                    .params()
                    .validate()
                    .map_err(|e| Error::Config(e.to_string()))?;
                self.cluster = cluster;
            }

            ["demo", "spacing"] => {
                let spacing: f64 = parse_value(key, value)?;
                if !spacing.is_finite() || spacing <= 0.0 {
                    return Err(Error::Config(format!(
                        "demo.spacing must be positive, got {}",
                        value
                    )));
                }
                self.demo.spacing = spacing;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(key, value)?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "cluster.cell_width_ratio",
            "cluster.cell_height_ratio",
            "cluster.pass_through_limit",
            "demo.spacing",
            "server.host",
            "server.port",
        ]
    }

    /// Clustering parameters from the `[cluster]` section
    pub fn cluster_params(&self) -> ClusterParams {
        self.cluster.params()
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ClusterConfig {
    fn params(&self) -> ClusterParams {
        ClusterParams {
            cell_width_ratio: self.cell_width_ratio,
            cell_height_ratio: self.cell_height_ratio,
            pass_through_limit: self.pass_through_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.format, "json");
        assert_eq!(config.cluster.cell_width_ratio, 0.5);
        assert_eq!(config.cluster.cell_height_ratio, 0.7);
        assert_eq!(config.cluster.pass_through_limit, 7);
        assert_eq!(config.demo.spacing, 1500.0);
        assert_eq!(config.server.port, 7979);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.format"), Some("json".to_string()));

        config.set("defaults.format", "TEXT").unwrap();
        assert_eq!(config.get("defaults.format"), Some("text".to_string()));

        config.set("cluster.pass_through_limit", "5").unwrap();
        assert_eq!(config.get("cluster.pass_through_limit"), Some("5".to_string()));
        assert_eq!(config.cluster_params().pass_through_limit, 5);

        config.set("demo.spacing", "2500").unwrap();
        assert_eq!(config.demo.spacing, 2500.0);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
        assert_eq!(config.get("cluster.unknown"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
        assert!(config.set("cluster.unknown", "1").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("cluster.cell_width_ratio", "not_a_number").is_err());
        assert!(config.set("server.port", "99999").is_err());
        assert!(config.set("defaults.format", "yaml").is_err());
    }

    #[test]
    fn test_set_rejects_invalid_cluster_params() {
        let mut config = Config::default();

        assert!(config.set("cluster.pass_through_limit", "0").is_err());
        assert!(config.set("cluster.cell_height_ratio", "-0.5").is_err());
        assert!(config.set("demo.spacing", "0").is_err());

        assert_eq!(config.cluster_params(), ClusterParams::default());
    }

    #[test]
    fn test_cluster_params() {
        let mut config = Config::default();
        config.cluster.cell_width_ratio = 0.4;

        let params = config.cluster_params();
        assert_eq!(params.cell_width_ratio, 0.4);
        assert_eq!(params.cell_height_ratio, 0.7);
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.defaults.format = "gpx".to_string();
            config.cluster.pass_through_limit = 9;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.defaults.format, "gpx");
            assert_eq!(loaded.cluster.pass_through_limit, 9);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[cluster]\npass_through_limit = 3\n").unwrap();

        assert_eq!(loaded.cluster.pass_through_limit, 3);
        assert_eq!(loaded.cluster.cell_width_ratio, 0.5);
        assert_eq!(loaded.server.port, 7979);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[cluster]"));
        assert!(toml.contains("[demo]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7979");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();

        for key in &keys {
            assert!(config.get(key).is_some(), "{} has no value", key);
        }
        assert!(keys.contains(&"cluster.pass_through_limit"));
    }
}
