use glam::Vec3;
use std::thread;
use std::time::{Duration, Instant};

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::core::canvas::Canvas;
use crate::core::frame::FrameInfo;
use crate::core::input::InputEvent;
use crate::core::timer::TickSource;
use crate::demos::Demo;
use crate::error::ConfigError;
use crate::loaders::{AssetEvent, AssetLoader, LoadOutcome};
use crate::render;
use crate::scene::Scene;

/// Top-level render-loop controller.
///
/// Owns the scene and the demo scripting it. Every frame it first attaches
/// whatever assets finished loading, then advances the demo once per due tick.
pub struct Viewer {
    scene: Scene,
    demo: Box<dyn Demo>,
    loader: AssetLoader,
    ticks: TickSource,
    tick_count: u64,
}

impl Viewer {
    pub fn new(mut demo: Box<dyn Demo>, config: &ViewerConfig) -> Result<Self, ConfigError> {
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, aspect));
        demo.build(&mut scene);
        log::info!("Built {} scene with {} nodes", demo.name(), scene.len());

        Ok(Self {
            scene,
            demo,
            loader: AssetLoader::new(config.asset_dir.clone()),
            ticks: TickSource::from_rate(config.tick_rate)?,
            tick_count: 0,
        })
    }

    /// Kick off background loading of the demo's models
    pub fn start(&mut self) {
        for request in self.demo.assets() {
            self.loader.request(request);
        }
    }

    /// Attach every load that has completed; returns how many were attached
    pub fn attach_loaded(&mut self) -> usize {
        let events = self.loader.poll();
        let count = events.len();
        for event in events {
            self.deliver(event);
        }
        count
    }

    /// Block until all requested assets are attached or `timeout` passes
    pub fn finish_loading(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while self.loader.pending() > 0 && Instant::now() < deadline {
            if self.attach_loaded() == 0 {
                thread::sleep(Duration::from_millis(5));
            }
        }
        if self.loader.pending() > 0 {
            log::warn!("{} assets still loading after {:?}", self.loader.pending(), timeout);
        }
    }

    /// Run one rendered frame and return how many animation ticks it carried
    pub fn frame(&mut self, frame: &FrameInfo) -> usize {
        self.attach_loaded();

        let ticks = self.ticks.ticks(frame.delta);
        for _ in 0..ticks {
            self.demo.animate(&mut self.scene);
        }
        self.tick_count += ticks as u64;

        self.demo.sync(&mut self.scene);
        ticks
    }

    /// Hand a finished load to the demo; failures get the demo's placeholder
    pub fn deliver(&mut self, event: AssetEvent) {
        match event.outcome {
            LoadOutcome::Loaded(model) => {
                log::debug!("Loaded {} ({} meshes)", event.key, model.meshes.len());
                self.demo.on_asset(&mut self.scene, &event.key, &model);
            }
            LoadOutcome::Failed(error) => {
                log::error!("{}", error);
                let placeholder = self.demo.placeholder(&event.key);
                self.demo.on_asset(&mut self.scene, &event.key, &placeholder);
            }
        }
    }

    pub fn input(&mut self, input: InputEvent) {
        self.demo.handle_input(&mut self.scene, input);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.camera.set_aspect(width, height);
    }

    pub fn render(&self, width: u32, height: u32) -> Canvas {
        render::draw_scene(&self.scene, width, height)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn demo(&self) -> &dyn Demo {
        self.demo.as_ref()
    }

    /// Loads requested but not yet attached
    pub fn pending_assets(&self) -> usize {
        self.loader.pending()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn status(&self) -> String {
        format!("{}: {} after {} ticks", self.demo.name(), self.demo.status(), self.tick_count)
    }
}
