//! Tunables, read from an optional JSON block embedded in the page.

use serde::Deserialize;

/// Upper bound on the particle field; each one is a vertex uploaded at start.
pub const MAX_PARTICLES: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Height of the scroll region in viewport heights.
    pub scroll_height_vh: f64,
    /// How long the published progress takes to catch up with the scrollbar.
    pub scrub_seconds: f32,
    pub color_smoothing: f32,
    pub distortion_smoothing: f32,
    pub camera_smoothing: f32,
    pub camera_fov_deg: f32,
    pub particle_count: usize,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_height_vh: 12.0,
            scrub_seconds: 0.5,
            color_smoothing: 0.05,
            distortion_smoothing: 0.1,
            camera_smoothing: 0.05,
            camera_fov_deg: 40.0,
            particle_count: 150,
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scroll_height_vh > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scroll_height_vh must exceed one viewport, got {}",
                self.scroll_height_vh
            )));
        }
        if !(self.scrub_seconds >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scrub_seconds must be non-negative, got {}",
                self.scrub_seconds
            )));
        }
        for (name, value) in [
            ("color_smoothing", self.color_smoothing),
            ("distortion_smoothing", self.distortion_smoothing),
            ("camera_smoothing", self.camera_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::Invalid(format!(
                "particle_count must be at most {MAX_PARTICLES}, got {}",
                self.particle_count
            )));
        }
        if !(self.camera_fov_deg > 0.0 && self.camera_fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera_fov_deg must be in (0, 180), got {}",
                self.camera_fov_deg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_override() {
        let config =
            SiteConfig::from_json(r#"{ "scrub_seconds": 0, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.scrub_seconds, 0.0);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.particle_count, 150);
    }

    #[test]
    fn rejects_out_of_range_smoothing() {
        let err = SiteConfig::from_json(r#"{ "camera_smoothing": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("camera_smoothing")));
        assert!(SiteConfig::from_json(r#"{ "color_smoothing": 0 }"#).is_err());
    }

    #[test]
    fn rejects_short_scroll_region_and_bad_fov() {
        assert!(SiteConfig::from_json(r#"{ "scroll_height_vh": 1 }"#).is_err());
        assert!(SiteConfig::from_json(r#"{ "camera_fov_deg": 180 }"#).is_err());
    }

    #[test]
    fn rejects_oversized_particle_field() {
        let err = SiteConfig::from_json(r#"{ "particle_count": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("particle_count")));
        assert!(SiteConfig::from_json(r#"{ "particle_count": 10000 }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SiteConfig::from_json("{ scrub_seconds: }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{ "fps": 60 }"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
