//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global stabilizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// Stabilization tuning parameters.
    pub stabilization: StabilizationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default stabilization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilizationDefaults {
    /// Exponential smoothing factor for the tilt estimator, in [0, 1).
    /// Larger values weight history more heavily.
    pub smoothing_factor: f64,

    /// Nominal gravity sensor rate (Hz).
    pub sensor_rate_hz: u32,

    /// Expected frame rate of the capture source (Hz).
    pub frame_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "horizonlock=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            stabilization: StabilizationDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StabilizationDefaults {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.9,
            sensor_rate_hz: 60,
            frame_rate_hz: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "horizonlock=info,warn".to_string(),
            json: false,
            file: None,
        }
    }
}

impl StabilizerConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("horizonlock").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_smoothing_is_heavy() {
        let config = StabilizerConfig::default();
        assert!((config.stabilization.smoothing_factor - 0.9).abs() < 1e-12);
        assert_eq!(config.stabilization.sensor_rate_hz, 60);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = StabilizerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: StabilizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.stabilization.smoothing_factor,
            config.stabilization.smoothing_factor
        );
        assert_eq!(parsed.logging.level, config.logging.level);
    }
}
