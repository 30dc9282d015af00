//! Per-tick numeric controllers that move scene objects
//!
//! Nothing here knows about the scene graph; callers read the scalar state and
//! write it onto the objects they own.

mod orbit;
mod oscillator;
mod progress;

pub use orbit::Orbit;
pub use oscillator::{BoundaryPolicy, Bounds, Direction, OscillatorState, Step};
pub use progress::{AnimationState, ProgressAnimation};
