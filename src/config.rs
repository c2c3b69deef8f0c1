//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/finrings/config.toml` (XDG) or platform config dir
//! 2. Project config: `.finrings.toml`
//! 3. Environment variables: `FINRINGS_*`, with `__` separating sections
//!    (e.g. `FINRINGS_TIMING__REVEAL_INTERVAL_MS=1000`)
//!
//! Every field has a default, so running without any config file reproduces
//! the stock scene.
//!
//! ```toml
//! catalog = "my-catalog.json"
//!
//! [timing]
//! reveal_interval_ms = 2000
//! fade_ms = 500
//!
//! [appearance]
//! highlight_color = "#FFFFFF"
//!
//! [camera]
//! home_eye = [0.0, 8.0, 25.0]
//!
//! [layout]
//! seed = 7
//! idle_motion = true
//! ```

use std::ops::Deref;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::models::Rgb;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub appearance: AppearanceConfig,
    pub camera: CameraConfig,
    pub layout: LayoutConfig,
    pub window: WindowConfig,
    /// Optional JSON catalog replacing the built-in content.
    pub catalog: Option<PathBuf>,
}

/// Animation and scheduling durations, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between successive label reveals on activation.
    pub reveal_interval_ms: u64,
    /// Ring fade in / fade out.
    pub fade_ms: u64,
    /// Each half of the ring pulse (up, then back).
    pub pulse_ms: u64,
    /// Camera reframe on activation and reset.
    pub camera_ms: u64,
    /// Label pop-in.
    pub label_ms: u64,
    /// Points settling back to rest scale on deactivation.
    pub settle_ms: u64,
    /// Hover highlight scale in / out.
    pub hover_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: 2000,
            fade_ms: 500,
            pulse_ms: 500,
            camera_ms: 1000,
            label_ms: 300,
            settle_ms: 300,
            hover_ms: 150,
        }
    }
}

impl TimingConfig {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn camera(&self) -> Duration {
        Duration::from_millis(self.camera_ms)
    }

    pub fn label(&self) -> Duration {
        Duration::from_millis(self.label_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn hover(&self) -> Duration {
        Duration::from_millis(self.hover_ms)
    }
}

/// Opacity, emphasis and scale targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Ring opacity while not active.
    pub idle_opacity: f32,
    /// Ring opacity while active.
    pub active_opacity: f32,
    /// Ring emissive intensity while not active.
    pub idle_emphasis: f32,
    /// Ring emissive intensity while active.
    pub active_emphasis: f32,
    /// Peak ring scale of the activation pulse.
    pub pulse_scale: f32,
    /// Point scale while hovered.
    pub hover_scale: f32,
    /// Emissive color of the hovered point.
    pub highlight_color: Rgb,
    /// Full size of a point label once revealed.
    pub label_size: [f32; 3],
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            idle_opacity: 0.1,
            active_opacity: 0.6,
            idle_emphasis: 0.3,
            active_emphasis: 0.8,
            pulse_scale: 1.05,
            hover_scale: 1.2,
            highlight_color: Rgb::WHITE,
            label_size: [2.0, 0.7, 1.0],
        }
    }
}

/// Camera placement and orbit limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position at start and after reset.
    pub home_eye: [f32; 3],
    /// Orbit focus at start and after reset.
    pub home_focus: [f32; 3],
    /// Eye offset from a ring anchor when a layer is activated.
    pub focus_offset: [f32; 3],
    /// Closest zoom distance.
    pub min_distance: f32,
    /// Farthest zoom distance.
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            home_eye: [0.0, 8.0, 25.0],
            home_focus: [0.0, 0.0, 0.0],
            focus_offset: [0.0, 2.0, 5.0],
            min_distance: 5.0,
            max_distance: 30.0,
        }
    }
}

/// Scene construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of the innermost ring.
    pub base_radius: f32,
    /// Radius increase per ring.
    pub ring_spacing: f32,
    /// Tube thickness of a ring.
    pub ring_thickness: f32,
    /// Maximum random offset applied to point angle, radius and height.
    pub jitter: f32,
    /// Seed for the point jitter.
    pub seed: u64,
    /// Hub spin, active ring spin and point bobbing.
    pub idle_motion: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: 5.0,
            ring_spacing: 2.0,
            ring_thickness: 0.2,
            jitter: 0.25,
            seed: 7,
            idle_motion: true,
        }
    }
}

/// Viewer window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "AI in Corporate Finance".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".finrings.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("FINRINGS_").split("__"))
    }

    /// Extract a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// User config path: ~/.config/finrings/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("finrings").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("finrings").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::from_figment(Figment::new()).unwrap();
        assert_eq!(config.timing.reveal_interval_ms, 2000);
        assert_eq!(config.timing.camera(), Duration::from_millis(1000));
        assert_eq!(config.appearance.highlight_color, Rgb::WHITE);
        assert_eq!(config.camera.home_eye, [0.0, 8.0, 25.0]);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let figment = Figment::new().merge(Toml::string(
            r##"
            catalog = "content.json"

            [timing]
            reveal_interval_ms = 750

            [appearance]
            highlight_color = "#FF0000"
            "##,
        ));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.timing.reveal_interval(), Duration::from_millis(750));
        assert_eq!(config.timing.fade_ms, 500);
        assert_eq!(config.appearance.highlight_color, Rgb(0xFF0000));
        assert_eq!(config.catalog, Some(PathBuf::from("content.json")));
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let figment = Figment::new().merge(Toml::string(
            r##"
            [appearance]
            highlight_color = "white"
            "##,
        ));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_nested_fields() {
        std::env::set_var("FINRINGS_TIMING__HOVER_MS", "90");
        std::env::set_var("FINRINGS_LAYOUT__IDLE_MOTION", "false");
        let config = Config::from_figment(
            Figment::new().merge(Env::prefixed("FINRINGS_").split("__")),
        );
        std::env::remove_var("FINRINGS_TIMING__HOVER_MS");
        std::env::remove_var("FINRINGS_LAYOUT__IDLE_MOTION");

        let config = config.unwrap();
        assert_eq!(config.timing.hover_ms, 90);
        assert!(!config.layout.idle_motion);
    }
}
