/// Self-contained timers - accumulate delta time and decide when to fire

use crate::error::ConfigError;

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    interval: f32,
    accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Fixed-step accumulator - yields a whole number of steps per frame
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl Accumulator {
    /// Create accumulator with fixed timestep
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Update with delta, returns how many fixed steps are due.
    /// Anything beyond `max_steps` is dropped so a stall does not snowball.
    pub fn tick(&mut self, delta: f32) -> usize {
        self.accumulator += delta;

        let due = (self.accumulator / self.timestep) as usize;
        let steps = due.min(self.max_steps as usize);

        self.accumulator = if due > steps {
            0.0
        } else {
            self.accumulator - steps as f32 * self.timestep
        };

        steps
    }
}

/// Maximum catch-up steps per frame for fixed-rate animation
const MAX_CATCH_UP_STEPS: u8 = 4;

/// Decides how many animation ticks a rendered frame carries
#[derive(Debug, Clone)]
pub enum TickSource {
    /// One tick per rendered frame, whatever the display rate
    PerFrame,
    /// Ticks at a fixed rate independent of the display
    Fixed(Accumulator),
}

impl TickSource {
    /// Build from an optional rate: `None` ticks once per frame
    pub fn from_rate(hz: Option<f32>) -> Result<Self, ConfigError> {
        match hz {
            None => Ok(TickSource::PerFrame),
            Some(hz) if hz > 0.0 && hz.is_finite() => {
                Ok(TickSource::Fixed(Accumulator::new(hz, MAX_CATCH_UP_STEPS)))
            }
            Some(hz) => Err(ConfigError::TickRate(hz)),
        }
    }

    /// Number of ticks due for a frame that took `delta` seconds
    pub fn ticks(&mut self, delta: f32) -> usize {
        match self {
            TickSource::PerFrame => 1,
            TickSource::Fixed(accumulator) => accumulator.tick(delta),
        }
    }
}

impl Default for TickSource {
    fn default() -> Self {
        TickSource::PerFrame
    }
}
