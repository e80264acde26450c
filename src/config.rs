//! Pad configuration, loaded from a JSON file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "retro-vpad";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Haptic pulse length. Zero disables vibration.
    pub vibration_duration_ms: u64,
    pub osd_idle_timeout_ms: u64,
    pub min_group_scale: f32,
    pub max_group_scale: f32,
    /// Drag amplification applied on tablets.
    pub tablet_drag_gain: f32,
    pub pressure_triggers: bool,
    /// Minimum pointer span (device px) before a pinch starts.
    pub min_pinch_span: f32,
    pub density: f32,
    pub is_tablet: bool,
    pub screen_width: Option<f32>,
    pub screen_height: Option<f32>,
    pub touchscreen: Option<PathBuf>,
    pub layout_file: Option<PathBuf>,
    pub verbosity: u8,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            vibration_duration_ms: 20,
            osd_idle_timeout_ms: 10_000,
            min_group_scale: 0.25,
            max_group_scale: 4.0,
            tablet_drag_gain: 2.0,
            pressure_triggers: false,
            min_pinch_span: 32.0,
            density: 1.0,
            is_tablet: false,
            screen_width: None,
            screen_height: None,
            touchscreen: None,
            layout_file: None,
            verbosity: 0,
        }
    }
}

impl PadConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = std::fs::read(path)?;
        let config: PadConfig = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_group_scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_group_scale",
                reason: format!("must be positive, got {}", self.min_group_scale),
            });
        }
        if !(self.max_group_scale >= self.min_group_scale) {
            return Err(ConfigError::Invalid {
                field: "max_group_scale",
                reason: format!(
                    "must not be below min_group_scale ({} < {})",
                    self.max_group_scale, self.min_group_scale
                ),
            });
        }
        if !(self.density > 0.0) {
            return Err(ConfigError::Invalid {
                field: "density",
                reason: format!("must be positive, got {}", self.density),
            });
        }
        if !(self.tablet_drag_gain > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tablet_drag_gain",
                reason: format!("must be positive, got {}", self.tablet_drag_gain),
            });
        }
        Ok(())
    }

    pub fn vibration_duration(&self) -> Duration {
        Duration::from_millis(self.vibration_duration_ms)
    }

    pub fn osd_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.osd_idle_timeout_ms)
    }

    /// Where the custom layout is persisted.
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.layout_file
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("layout.json")))
    }
}
