pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod demos;
pub mod error;
pub mod loaders;
pub mod math;
pub mod render;
pub mod scene;
pub mod viewer;

pub use config::ViewerConfig;
pub use demos::{create_demo, Demo, DemoKind};
pub use viewer::Viewer;
