//! Frame timing, input translation and GPU presentation

pub mod canvas;
pub mod frame;
pub mod gpu_context;
pub mod input;
pub mod surface_renderer;
pub mod timer;

pub use canvas::{Canvas, Color, DrawOp};
pub use frame::{FrameInfo, FrameIterator, SteppedFrames};
pub use input::{Button, InputEvent};
pub use surface_renderer::SurfaceRenderer;
pub use timer::{Accumulator, FixedHz, TickSource};
