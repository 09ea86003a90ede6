//! Timeline settings read from an optional TOML file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::scale::Scale;
use crate::visibility::ClipMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub clip_mode: ClipMode,
    #[serde(default = "default_navigation_step_days")]
    pub navigation_step_days: i64,
    #[serde(default)]
    pub default_scale: Scale,
    #[serde(default = "default_duration_weeks")]
    pub default_duration_weeks: u32,
}

fn default_navigation_step_days() -> i64 {
    30
}

fn default_duration_weeks() -> u32 {
    12
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            clip_mode: ClipMode::default(),
            navigation_step_days: default_navigation_step_days(),
            default_scale: Scale::default(),
            default_duration_weeks: default_duration_weeks(),
        }
    }
}

impl TimelineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: TimelineConfig = toml::from_str("").unwrap();
        assert_eq!(config, TimelineConfig::default());
        assert_eq!(config.navigation_step_days, 30);
        assert_eq!(config.clip_mode, ClipMode::Unclamped);
    }

    #[test]
    fn parses_all_settings() {
        let config: TimelineConfig = toml::from_str(
            r#"
            clip_mode = "clamp"
            navigation_step_days = 14
            default_scale = "quarter"
            default_duration_weeks = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.clip_mode, ClipMode::Clamp);
        assert_eq!(config.navigation_step_days, 14);
        assert_eq!(config.default_scale, Scale::Quarter);
        assert_eq!(config.default_duration_weeks, 16);
    }

    #[test]
    fn rejects_unknown_scale() {
        assert!(toml::from_str::<TimelineConfig>(r#"default_scale = "day""#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TimelineConfig::load(Some(Path::new("/nonexistent/timeline.toml"))).is_err());
        assert!(TimelineConfig::load(None).is_ok());
    }
}
