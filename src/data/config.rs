//! `SimConfig` loading. RON files may list any subset of fields; the rest
//! take their defaults.

use std::path::Path;

use bevy::prelude::*;

use crate::error::ConfigError;
use crate::shared::*;

impl SimConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_ron(&source)?;
        info!("[Data] Loaded sim config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("day_length_seconds", self.day_length_seconds)?;
        positive("weather_change_interval_seconds", self.weather_change_interval_seconds)?;
        positive("step_seconds", self.step_seconds)?;
        positive("greenhouse_growth_multiplier", self.greenhouse_growth_multiplier)?;
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "time_scale",
                reason: "must be zero or positive",
            });
        }
        if !(0.0..1.0).contains(&self.night_threshold) {
            return Err(ConfigError::Invalid {
                field: "night_threshold",
                reason: "must be in [0, 1)",
            });
        }
        if self.step_seconds > self.day_length_seconds {
            return Err(ConfigError::Invalid {
                field: "step_seconds",
                reason: "must not exceed day_length_seconds",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = SimConfig::from_ron("(day_length_seconds: 120.0, weather_seed: Some(7))").unwrap();
        assert_eq!(config.day_length_seconds, 120.0);
        assert_eq!(config.weather_seed, Some(7));
        assert_eq!(config.starting_money, STARTING_MONEY);
        assert_eq!(config.barn_capacity, DEFAULT_BARN_CAPACITY);
    }

    #[test]
    fn test_default_values_round_trip() {
        let config = SimConfig::from_ron("(time_scale: 1.0, starting_money: 100)").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        let err = SimConfig::from_ron("(day_length_seconds: \"long\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_day_length() {
        let err = SimConfig::from_ron("(day_length_seconds: 0.0)").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "day_length_seconds",
                reason: "must be a positive number",
            }
        );
    }

    #[test]
    fn test_rejects_night_threshold_of_one() {
        assert!(SimConfig::from_ron("(night_threshold: 1.0)").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SimConfig::from_ron_file(Path::new("/nonexistent/farm.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
