//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `clapsense.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Adapter identity settings.
    pub adapter: AdapterConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulated clap-source settings.
    pub simulation: SimulationConfig,
}

/// Adapter identity configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Add-on package name the adapter reports as its owner.
    pub package_name: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Simulated clap-source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fire synthetic claps on an interval.
    pub enabled: bool,
    /// Seconds between synthetic claps.
    pub interval_secs: u64,
}

impl Config {
    /// Load configuration from `clapsense.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("clapsense.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CLAPSENSE_PACKAGE_NAME") {
            self.adapter.package_name = val;
        }
        if let Ok(val) = std::env::var("CLAPSENSE_SIM_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.simulation.enabled = enabled;
            }
        }
        if let Ok(val) = std::env::var("CLAPSENSE_SIM_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.simulation.interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("CLAPSENSE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.adapter.package_name.is_empty() {
            return Err(ConfigError::Validation(
                "package_name must not be empty".to_string(),
            ));
        }
        if self.simulation.enabled && self.simulation.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be non-zero when simulation is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            package_name: "clap-sensor-adapter".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 10,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file")]
    Io(#[source] std::io::Error),

    /// The config file exists but is not valid TOML.
    #[error("failed to parse config file")]
    Parse(#[source] toml::de::Error),

    /// A config value is out of range.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.adapter.package_name, "clap-sensor-adapter");
        assert_eq!(config.logging.filter, "info");
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.interval_secs, 10);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            [adapter]
            package_name = "my-addon"

            [simulation]
            enabled = false
            interval_secs = 3
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.adapter.package_name, "my-addon");
        assert!(!config.simulation.enabled);
        assert_eq!(config.simulation.interval_secs, 3);
        // Unspecified sections keep their defaults.
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn should_reject_empty_package_name() {
        let config = Config {
            adapter: AdapterConfig {
                package_name: String::new(),
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_zero_interval_when_simulation_enabled() {
        let config = Config {
            simulation: SimulationConfig {
                enabled: true,
                interval_secs: 0,
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_accept_zero_interval_when_simulation_disabled() {
        let config = Config {
            simulation: SimulationConfig {
                enabled: false,
                interval_secs: 0,
            },
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
