//! Viewer configuration, loaded from an optional JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::animation::{BoundaryPolicy, Bounds, Direction, ProgressAnimation, Step};
use crate::core::timer::TickSource;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Motion Viewer".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Pen cap oscillation and the pen scene's orbit controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    /// Sideways travel per tick
    pub dx: f32,
    /// Tilt of the pen body, in degrees
    pub tilt_degrees: f32,
    /// Extra rise per tick on top of the tilt
    pub lift: f32,
    pub height_min: f32,
    pub height_max: f32,
    pub start_direction: Direction,
    pub boundary: BoundaryPolicy,
    /// Radians per mouse click
    pub light_orbit_speed: f32,
    /// Radians per arrow key press
    pub camera_orbit_speed: f32,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            dx: 0.001,
            tilt_degrees: 20.0,
            lift: 0.0024,
            height_min: -0.85,
            height_max: 2.0,
            start_direction: Direction::Increasing,
            boundary: BoundaryPolicy::default(),
            light_orbit_speed: 1.0,
            camera_orbit_speed: 0.04,
        }
    }
}

impl PenConfig {
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        Bounds::new(self.height_min, self.height_max)
    }

    pub fn step(&self) -> Result<Step, ConfigError> {
        Step::from_tilt(self.dx, self.tilt_degrees, self.lift)
    }
}

/// Wardrobe door animation and camera controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardrobeConfig {
    /// Ticks per toggle
    pub duration: u32,
    /// Convergence rate per tick
    pub rate: f32,
    /// Door displacement when fully open
    pub max_offset: f32,
    /// Camera travel per arrow key press
    pub camera_step: f32,
    /// Spotlight radians per tick
    pub spotlight_speed: f32,
    pub left_door: String,
    pub right_door: String,
}

impl Default for WardrobeConfig {
    fn default() -> Self {
        Self {
            duration: 60,
            rate: 0.1,
            max_offset: -7.0,
            camera_step: 10.0,
            spotlight_speed: 0.01,
            left_door: "Object007".to_string(),
            right_door: "Object006".to_string(),
        }
    }
}

impl WardrobeConfig {
    pub fn animation(&self) -> Result<ProgressAnimation, ConfigError> {
        ProgressAnimation::new(self.duration, self.rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    /// Directory the demo model files are read from
    pub asset_dir: PathBuf,
    /// Fixed animation rate in Hz; unset ticks once per rendered frame
    pub tick_rate: Option<f32>,
    pub pen: PenConfig,
    pub wardrobe: WardrobeConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            asset_dir: PathBuf::from("models"),
            tick_rate: None,
            pen: PenConfig::default(),
            wardrobe: WardrobeConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read `path` if given, otherwise use defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                let config: ViewerConfig = serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?;
                log::info!("Loaded configuration from {:?}", path);
                config
            }
            None => ViewerConfig::default(),
        };

        config
            .validate()
            .context("Invalid configuration")?;
        Ok(config)
    }

    /// Check every value the animations would otherwise reject at startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pen.bounds()?;
        self.pen.step()?;
        self.wardrobe.animation()?;
        TickSource::from_rate(self.tick_rate)?;
        Ok(())
    }
}
