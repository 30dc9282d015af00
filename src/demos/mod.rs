//! Scene scripts hosted by the viewer

mod pen;
mod wardrobe;

pub use pen::PenDemo;
pub use wardrobe::WardrobeDemo;

use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;
use crate::core::input::InputEvent;
use crate::error::ConfigError;
use crate::loaders::{AssetRequest, ModelData};
use crate::math::AABB;
use crate::scene::Scene;

/// Available demos
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoKind {
    Pen,
    Wardrobe,
}

/// A scene script: sets up its scene, reacts to input and loaded assets,
/// and advances its animation once per tick.
pub trait Demo {
    /// Display name
    fn name(&self) -> &'static str;

    /// Models to load in the background, keyed for `on_asset`
    fn assets(&self) -> Vec<AssetRequest>;

    /// Place camera, lights and static geometry
    fn build(&mut self, scene: &mut Scene);

    /// Stand-in geometry for an asset that failed to load
    fn placeholder(&self, key: &str) -> ModelData {
        ModelData::placeholder(key, AABB::centered(Vec3::ZERO, Vec3::ONE))
    }

    /// Attach a model that finished loading
    fn on_asset(&mut self, scene: &mut Scene, key: &str, model: &ModelData);

    /// React to a discrete key or mouse press
    fn handle_input(&mut self, scene: &mut Scene, input: InputEvent);

    /// Advance the animation by one tick
    fn animate(&mut self, scene: &mut Scene);

    /// Write animation output to the scene once per rendered frame
    fn sync(&mut self, _scene: &mut Scene) {}

    /// One-line description of the animation state
    fn status(&self) -> String;
}

pub fn create_demo(kind: DemoKind, config: &ViewerConfig) -> Result<Box<dyn Demo>, ConfigError> {
    Ok(match kind {
        DemoKind::Pen => Box::new(PenDemo::new(&config.pen)?),
        DemoKind::Wardrobe => Box::new(WardrobeDemo::new(&config.wardrobe)?),
    })
}
