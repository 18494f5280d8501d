use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::mdns::{MdnsConfig, MAX_DURATION};
use super::transport::TransportConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-mdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-mdns/config.toml";

/// Main configuration structure for Ferrous mDNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolution behaviour (browsing, retries, cache)
    #[serde(default)]
    pub mdns: MdnsConfig,

    /// Multicast socket configuration
    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-mdns.toml in current directory
    /// 3. /etc/ferrous-mdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.force_unicast_responses {
            self.mdns.force_unicast_responses = true;
        }
        if let Some(port) = overrides.port {
            self.transport.port = port;
        }
        self.mdns.browse_services.extend(overrides.browse_services);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.port == 0 {
            return Err(ConfigError::Validation("mDNS port cannot be 0".to_string()));
        }

        if self.transport.multicast_ttl == 0 {
            return Err(ConfigError::Validation(
                "Multicast TTL cannot be 0".to_string(),
            ));
        }

        if let Some(setting) = self.mdns.out_of_range() {
            return Err(ConfigError::Validation(format!(
                "{} exceeds {} seconds",
                setting,
                MAX_DURATION.as_secs()
            )));
        }

        if let Some(position) = self
            .mdns
            .browse_services
            .iter()
            .position(|service| service.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "Browse service #{} is empty",
                position + 1
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub port: Option<u16>,
    pub force_unicast_responses: bool,
    pub browse_services: Vec<String>,
}
