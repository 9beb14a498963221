use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub locations: LocationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationsConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("[locations]\npath = \"locations.json\"\n").unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:3000");
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.locations.path, PathBuf::from("locations.json"));
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [server]
            listen = "127.0.0.1:8080"

            [locations]
            path = "/srv/geofence/locations.json"

            [logging]
            filter = "geofence=debug,tower_http=info"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert_eq!(config.logging.filter, "geofence=debug,tower_http=info");
    }

    #[test]
    fn test_missing_locations_section() {
        assert!(Config::from_toml_str("[server]\nlisten = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[locations]\npath = \"zones.json\"").unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.locations.path, PathBuf::from("zones.json"));
    }
}
