use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Travel direction along the oscillation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }

    const fn sign(self) -> f32 {
        match self {
            Direction::Increasing => 1.0,
            Direction::Decreasing => -1.0,
        }
    }
}

/// Inclusive travel limits, always `min < max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if min < max {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::InvertedBounds { min, max })
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// What happens on the tick that carries the position past a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Keep the full step and flip; the position ends up to one step past the bound.
    /// After turning at `min` the position holds still for one tick before rising.
    Overshoot,
    /// Land exactly on the bound and flip.
    #[default]
    ClampThenFlip,
}

/// Per-tick displacement along one fixed direction.
///
/// `dy` moves the tracked scalar (the height); `dx` is the matching movement on
/// the secondary axis so both axes travel along the same line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    dx: f32,
    dy: f32,
}

impl Step {
    pub fn new(dx: f32, dy: f32) -> Result<Self, ConfigError> {
        if dx.is_finite() && dy.is_finite() && dy > 0.0 {
            Ok(Self { dx, dy })
        } else {
            Err(ConfigError::Step { dx, dy })
        }
    }

    /// Derive `dy` from a tilt angle: `dy = tan(tilt) * dx + lift`
    pub fn from_tilt(dx: f32, tilt_degrees: f32, lift: f32) -> Result<Self, ConfigError> {
        let dy = tilt_degrees.to_radians().tan() * dx + lift;
        Self::new(dx, dy)
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dy(&self) -> f32 {
        self.dy
    }

    /// 3D displacement that raises the tracked scalar by `rise`
    pub fn along(&self, rise: f32) -> Vec3 {
        Vec3::new(rise * self.dx / self.dy, rise, 0.0)
    }
}

/// Constant-velocity back-and-forth motion between two bounds (a triangle wave)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorState {
    position: f32,
    direction: Direction,
    bounds: Bounds,
    policy: BoundaryPolicy,
    holding: bool,
}

impl OscillatorState {
    pub fn new(position: f32, direction: Direction, bounds: Bounds) -> Self {
        Self {
            position,
            direction,
            bounds,
            policy: BoundaryPolicy::default(),
            holding: false,
        }
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Advance one tick and return the signed change in position.
    ///
    /// The direction flips exactly when `position ± dy` lands outside the bounds.
    /// A position that has drifted further out than the policy allows is pulled
    /// back in before stepping. Under [`BoundaryPolicy::Overshoot`] the tick after
    /// a turn at `min` is spent in place.
    pub fn update(&mut self, step: &Step) -> f32 {
        if self.holding {
            self.holding = false;
            return 0.0;
        }

        let previous = self.position;
        let slack = match self.policy {
            BoundaryPolicy::Overshoot => step.dy(),
            BoundaryPolicy::ClampThenFlip => 0.0,
        };
        let start = previous.clamp(self.bounds.min - slack, self.bounds.max + slack);
        let raw = start + self.direction.sign() * step.dy();

        let crossed = match self.direction {
            Direction::Increasing => raw > self.bounds.max,
            Direction::Decreasing => raw < self.bounds.min,
        };

        self.position = match self.policy {
            BoundaryPolicy::ClampThenFlip if crossed => raw.clamp(self.bounds.min, self.bounds.max),
            _ => raw,
        };

        if crossed {
            self.holding = self.policy == BoundaryPolicy::Overshoot && self.direction == Direction::Decreasing;
            self.direction = self.direction.reversed();
        }

        self.position - previous
    }
}
