use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::EngineError;
use crate::features::PatternConfig;
use crate::insights::InsightConfig;
use crate::scoring::{ActionConfig, ActionWeights, QualityConfig, ReachConfig, RiskConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub patterns: PatternConfig,
    pub quality: QualityConfig,
    pub actions: ActionConfig,
    pub risks: RiskConfig,
    pub weights: ActionWeights,
    pub reach: ReachConfig,
    pub insights: InsightConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), EngineError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => EngineConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), EngineError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| EngineError::ConfigWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| EngineError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_f64("VIRALITY_LINK_PENALTY") {
            debug!(value, "link penalty overridden from env");
            self.quality.link_penalty = value;
        }
        if let Some(value) = env_f64("VIRALITY_REPLY_WEIGHT") {
            debug!(value, "reply weight overridden from env");
            self.weights.reply = value;
        }
        if let Some(value) = env_f64("VIRALITY_COUNT_VARIANCE") {
            debug!(value, "count variance overridden from env");
            self.reach.variance = value.clamp(0.0, 1.0);
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("VIRALITY_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engine.toml")))
}
