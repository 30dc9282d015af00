//! Error types shared by the loaders, configuration and animation constructors

use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring a model asset into the scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to import {path}: {reason}")]
    Import { path: PathBuf, reason: String },

    #[error("{path} contains no mesh geometry")]
    Empty { path: PathBuf },

    #[error("loader thread for {0} exited without reporting")]
    Disconnected(PathBuf),
}

/// Rejected configuration or animation parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("bounds must satisfy min < max (got min={min}, max={max})")]
    InvertedBounds { min: f32, max: f32 },

    #[error("convergence rate must lie in (0, 1) (got {0})")]
    Rate(f32),

    #[error("animation duration must be at least one frame")]
    ZeroDuration,

    #[error("step must be positive and finite (got dx={dx}, dy={dy})")]
    Step { dx: f32, dy: f32 },

    #[error("tick rate must be positive (got {0})")]
    TickRate(f32),
}
