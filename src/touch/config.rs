use std::{fs, path::Path};

use serde::Deserialize;

use super::types::AnchorEdge;
use crate::error::ConfigError;

// Platform touch slop on a baseline xhdpi panel (8dp scaled by 2).
pub const DEFAULT_TOUCH_SLOP_PX: f32 = 16.0;
pub const DEFAULT_MIN_FLING_VELOCITY_PX_S: f32 = 100.0;
pub const DEFAULT_MAX_FLING_VELOCITY_PX_S: f32 = 8_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayTouchConfig {
    /// 0 anchors the overlay at the left edge, anything else at the right edge.
    pub location: u8,
    pub touch_slop_px: f32,
    pub min_fling_velocity_px_s: f32,
    pub max_fling_velocity_px_s: f32,
}

impl Default for OverlayTouchConfig {
    fn default() -> Self {
        Self {
            location: 0,
            touch_slop_px: DEFAULT_TOUCH_SLOP_PX,
            min_fling_velocity_px_s: DEFAULT_MIN_FLING_VELOCITY_PX_S,
            max_fling_velocity_px_s: DEFAULT_MAX_FLING_VELOCITY_PX_S,
        }
    }
}

impl OverlayTouchConfig {
    pub fn anchor_edge(&self) -> AnchorEdge {
        AnchorEdge::from_location(self.location)
    }

    /// Horizontal displacement a move must exceed before it counts as a swipe;
    /// half the platform slop.
    pub fn gesture_slop_px(&self) -> f32 {
        self.touch_slop_px / 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_slop_px.is_finite() || self.touch_slop_px < 0.0 {
            return Err(ConfigError::Invalid {
                field: "touch_slop_px",
                reason: "must be a finite, non-negative pixel distance",
            });
        }
        if !self.min_fling_velocity_px_s.is_finite() || self.min_fling_velocity_px_s <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "min_fling_velocity_px_s",
                reason: "must be a finite, positive velocity",
            });
        }
        if !self.max_fling_velocity_px_s.is_finite() || self.max_fling_velocity_px_s <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "max_fling_velocity_px_s",
                reason: "must be a finite, positive velocity",
            });
        }
        if self.min_fling_velocity_px_s > self.max_fling_velocity_px_s {
            return Err(ConfigError::Invalid {
                field: "min_fling_velocity_px_s",
                reason: "must not exceed max_fling_velocity_px_s",
            });
        }
        Ok(())
    }
}

pub fn parse_config(text: &str) -> Result<OverlayTouchConfig, ConfigError> {
    let config: OverlayTouchConfig =
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: None, source })?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<OverlayTouchConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: OverlayTouchConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: Some(path.to_path_buf()),
        source,
    })?;
    config.validate()?;
    log::info!("loaded overlay touch config from {}", path.display());
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> OverlayTouchConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using default overlay touch config");
            OverlayTouchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config, OverlayTouchConfig::default());
        assert_eq!(config.anchor_edge(), AnchorEdge::Left);
        assert_eq!(config.gesture_slop_px(), 8.0);
    }

    #[test]
    fn non_zero_location_anchors_right() {
        let config = parse_config("location = 1\ntouch_slop_px = 24.0\n").expect("should parse");
        assert_eq!(config.anchor_edge(), AnchorEdge::Right);
        assert_eq!(config.gesture_slop_px(), 12.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("edge = \"left\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn inverted_fling_velocities_are_invalid() {
        let err = parse_config("min_fling_velocity_px_s = 9000.0\nmax_fling_velocity_px_s = 100.0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_fling_velocity_px_s",
                ..
            }
        ));
    }

    #[test]
    fn negative_slop_is_invalid() {
        let err = parse_config("touch_slop_px = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("touch_slop_px"));
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "location = 2").expect("write config");
        let config = load_config(file.path()).expect("file config should load");
        assert_eq!(config.anchor_edge(), AnchorEdge::Right);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(load_config(&path), Err(ConfigError::Io { .. })));
        assert_eq!(load_config_or_default(&path), OverlayTouchConfig::default());
    }
}
