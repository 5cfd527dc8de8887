use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::PlatformFamily;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Path to the user configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabline")
            .join("config.toml")
    }

    /// Load configuration from disk, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Serialize the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Scroll animation settings
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll: ScrollConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Smooth scrolling configuration for the tab strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scrolling; disabled means instant jumps
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration override in milliseconds. Unset defers to the
    /// platform family (450 on iOS terminals, 400 on Android, 300 else).
    #[serde(default)]
    pub animation_duration_ms: Option<u64>,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Minimum distance in cells before a centering scroll is performed.
    /// Moves shorter than this are suppressed; they read as jitter.
    #[serde(default = "default_center_threshold")]
    pub center_threshold: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: None,
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            center_threshold: default_center_threshold(),
        }
    }
}

impl ScrollConfig {
    /// Effective animation duration: explicit override, else the platform
    /// family contract.
    pub fn duration_for(&self, platform: PlatformFamily) -> Duration {
        match self.animation_duration_ms {
            Some(ms) => Duration::from_millis(ms),
            None => platform.scroll_duration(),
        }
    }
}

/// Easing curve for scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// No interpolation, jump at the end
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    #[serde(default = "default_theme_name")]
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
        }
    }
}

fn default_tick_rate() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

fn default_animation_fps() -> u16 {
    60
}

fn default_center_threshold() -> u16 {
    16
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}
