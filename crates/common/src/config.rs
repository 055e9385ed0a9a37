//! Scene tuning: rotation interval and animation strategy.
//!
//! Defaults reproduce the reference scene. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shape interval must be greater than zero")]
    ZeroInterval,
    #[error("lerp factor must lie in (0, 1], got {0}")]
    LerpFactorOutOfRange(f32),
    #[error("spring {name} must be positive, got {value}")]
    NonPositiveSpring { name: &'static str, value: f32 },
    #[error("unknown animation strategy: {0:?} (expected \"lerp\" or \"spring\")")]
    UnknownStrategy(String),
}

/// How glyph positions chase their targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationStrategy {
    /// Per-frame linear interpolation by a fixed factor. Frame-rate coupled.
    #[default]
    Lerp,
    /// Damped spring integrated against wall-clock time.
    Spring,
}

impl AnimationStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Lerp => "lerp",
            Self::Spring => "spring",
        }
    }
}

impl fmt::Display for AnimationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lerp" => Ok(Self::Lerp),
            "spring" => Ok(Self::Spring),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Spring constants for [`AnimationStrategy::Spring`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 50.0,
            damping: 15.0,
            mass: 1.0,
        }
    }
}

/// Scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Time each shape stays active before the next one takes over.
    pub shape_interval_ms: u64,
    pub strategy: AnimationStrategy,
    /// Fraction of the remaining distance covered per frame by the lerp animator.
    pub lerp_factor: f32,
    pub spring: SpringParams,
    /// Seed for the pyramid sampler. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape_interval_ms: 3000,
            strategy: AnimationStrategy::Lerp,
            lerp_factor: 0.05,
            spring: SpringParams::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn shape_interval(&self) -> Duration {
        Duration::from_millis(self.shape_interval_ms)
    }

    /// Check every field that the scene relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shape_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.lerp_factor <= 0.0 || self.lerp_factor > 1.0 || self.lerp_factor.is_nan() {
            return Err(ConfigError::LerpFactorOutOfRange(self.lerp_factor));
        }
        for (name, value) in [
            ("stiffness", self.spring.stiffness),
            ("damping", self.spring.damping),
            ("mass", self.spring.mass),
        ] {
            if value <= 0.0 || value.is_nan() {
                return Err(ConfigError::NonPositiveSpring { name, value });
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        tracing::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let c = SceneConfig::default();
        assert_eq!(c.shape_interval(), Duration::from_millis(3000));
        assert_eq!(c.strategy, AnimationStrategy::Lerp);
        assert_eq!(c.lerp_factor, 0.05);
        assert_eq!(c.spring.stiffness, 50.0);
        assert_eq!(c.spring.damping, 15.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Spring".parse::<AnimationStrategy>().unwrap(), AnimationStrategy::Spring);
        assert_eq!(" lerp ".parse::<AnimationStrategy>().unwrap(), AnimationStrategy::Lerp);
        assert!(matches!(
            "tween".parse::<AnimationStrategy>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = SceneConfig {
            shape_interval_ms: 0,
            ..SceneConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroInterval)));

        let factor = SceneConfig {
            lerp_factor: 1.5,
            ..SceneConfig::default()
        };
        assert!(matches!(
            factor.validate(),
            Err(ConfigError::LerpFactorOutOfRange(_))
        ));

        let spring = SceneConfig {
            spring: SpringParams {
                damping: 0.0,
                ..SpringParams::default()
            },
            ..SceneConfig::default()
        };
        assert!(matches!(
            spring.validate(),
            Err(ConfigError::NonPositiveSpring { name: "damping", .. })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c: SceneConfig =
            serde_json::from_str(r#"{ "strategy": "spring", "seed": 7 }"#).unwrap();
        assert_eq!(c.strategy, AnimationStrategy::Spring);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.shape_interval_ms, 3000);
        assert_eq!(c.spring, SpringParams::default());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let c = SceneConfig {
            shape_interval_ms: 1500,
            seed: Some(42),
            ..SceneConfig::default()
        };
        c.save(tmp.path()).unwrap();
        let loaded = SceneConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, c);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), r#"{ "lerp_factor": 0.0 }"#).unwrap();
        assert!(matches!(
            SceneConfig::load(tmp.path()),
            Err(ConfigError::LerpFactorOutOfRange(_))
        ));
    }
}
