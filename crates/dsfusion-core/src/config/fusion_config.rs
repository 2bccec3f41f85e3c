//! Top-level fusion configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults;
use crate::errors::{ConfigError, FusionResult};
use crate::models::RuleKind;

/// Engine configuration.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DSFUSION_*`)
/// 2. Config file passed to [`FusionConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Rule selector, e.g. `"DEMPSTER_SHAFER"` or `"ZHANG"`.
    pub rule: String,
    /// Retention bound applied by windowed combination. `None` = unbounded.
    pub max_retained: Option<usize>,
    /// Uniform weight applied to every item of a batch. Values at or below
    /// `ZERO_WEIGHT_DELTA` disable weighting.
    pub input_weight: f64,
    /// Fail Yager combination instead of warning when no tracked focal set
    /// covers the frame.
    pub strict_universal_set: bool,
    /// Largest frame Zhang will enumerate a power set for.
    pub max_powerset_hypotheses: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            rule: defaults::DEFAULT_RULE.to_string(),
            max_retained: defaults::DEFAULT_MAX_RETAINED,
            input_weight: defaults::DEFAULT_INPUT_WEIGHT,
            strict_universal_set: defaults::DEFAULT_STRICT_UNIVERSAL_SET,
            max_powerset_hypotheses: defaults::DEFAULT_MAX_POWERSET_HYPOTHESES,
        }
    }
}

impl FusionConfig {
    /// Load a config file, apply `DSFUSION_*` environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: FusionConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_env_overrides();
        config.validate()?;
        debug!(
            path = %path.display(),
            rule = %config.rule,
            max_retained = ?config.max_retained,
            "loaded fusion config"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: FusionConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_weight.is_finite() || self.input_weight < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "input_weight".to_string(),
                message: "must be finite and non-negative".to_string(),
            });
        }
        if self.max_retained == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "max_retained".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_powerset_hypotheses == 0
            || self.max_powerset_hypotheses > crate::constants::MAX_POWERSET_HYPOTHESES
        {
            return Err(ConfigError::ValidationFailed {
                field: "max_powerset_hypotheses".to_string(),
                message: format!(
                    "must be between 1 and {}",
                    crate::constants::MAX_POWERSET_HYPOTHESES
                ),
            });
        }
        Ok(())
    }

    /// Parse the configured rule selector.
    pub fn rule_kind(&self) -> FusionResult<RuleKind> {
        self.rule.parse()
    }

    /// Apply environment variable overrides.
    /// Pattern: `DSFUSION_RULE`, `DSFUSION_MAX_RETAINED`, `DSFUSION_INPUT_WEIGHT`.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DSFUSION_RULE") {
            if !val.trim().is_empty() {
                self.rule = val.trim().to_string();
            }
        }
        if let Ok(val) = std::env::var("DSFUSION_MAX_RETAINED") {
            if let Ok(v) = val.parse::<usize>() {
                self.max_retained = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DSFUSION_INPUT_WEIGHT") {
            if let Ok(v) = val.parse::<f64>() {
                self.input_weight = v;
            }
        }
    }
}
