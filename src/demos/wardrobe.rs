use glam::Vec3;
use std::f32::consts::FRAC_PI_4;

use super::Demo;
use crate::animation::{Orbit, ProgressAnimation};
use crate::config::WardrobeConfig;
use crate::core::input::{Button, InputEvent};
use crate::error::ConfigError;
use crate::loaders::{AssetRequest, MeshData, ModelData};
use crate::math::AABB;
use crate::scene::{Light, LightKind, MeshInfo, NodeId, NodeKind, Scene, Transform};

const CAMERA_START: Vec3 = Vec3::new(0.0, 50.0, 150.0);
const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(100.0, 100.0, 100.0);
const SPOTLIGHT_RADIUS: f32 = 100.0;
const SPOTLIGHT_HEIGHT: f32 = 100.0;
const SPOTLIGHT_TARGET: Vec3 = Vec3::new(0.0, 20.0, 0.0);
const FLOOR_SIZE: f32 = 400.0;
const MODEL_SCALE: f32 = 2.0;

const WARDROBE_KEY: &str = "wardrobe";

/// A door node and where it sits when closed
#[derive(Debug, Clone, Copy)]
struct Door {
    node: NodeId,
    rest: Vec3,
}

impl Door {
    fn bind(scene: &Scene, node: NodeId) -> Self {
        Self {
            node,
            rest: scene.node(node).transform.translation,
        }
    }

    fn place(&self, scene: &mut Scene, offset: f32) {
        scene.node_mut(self.node).transform.translation.y = self.rest.y + offset;
    }
}

/// A wardrobe whose doors slide open and shut on mouse clicks, under a
/// spotlight circling overhead. Arrow keys move the camera.
pub struct WardrobeDemo {
    animation: ProgressAnimation,
    max_offset: f32,
    camera_step: f32,
    left_name: String,
    right_name: String,
    doors: Option<(Door, Door)>,
    spotlight: Option<NodeId>,
    spotlight_orbit: Orbit,
}

impl WardrobeDemo {
    pub fn new(config: &WardrobeConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            animation: config.animation()?,
            max_offset: config.max_offset,
            camera_step: config.camera_step,
            left_name: config.left_door.clone(),
            right_name: config.right_door.clone(),
            doors: None,
            spotlight: None,
            spotlight_orbit: Orbit::new(Vec3::ZERO, SPOTLIGHT_RADIUS, 0.0, config.spotlight_speed, SPOTLIGHT_HEIGHT),
        })
    }

    pub fn animation(&self) -> &ProgressAnimation {
        &self.animation
    }

    /// Left and right door nodes, once both are found in the model
    pub fn doors(&self) -> Option<(NodeId, NodeId)> {
        self.doors.map(|(left, right)| (left.node, right.node))
    }

    pub fn spotlight(&self) -> Option<NodeId> {
        self.spotlight
    }

    fn move_camera(scene: &mut Scene, delta: Vec3) {
        scene.camera.position += delta;
    }
}

impl Demo for WardrobeDemo {
    fn name(&self) -> &'static str {
        "wardrobe"
    }

    fn assets(&self) -> Vec<AssetRequest> {
        vec![AssetRequest::new(WARDROBE_KEY, "draa.glb")]
    }

    fn build(&mut self, scene: &mut Scene) {
        scene.camera.position = CAMERA_START;
        scene.camera.look_at(Vec3::ZERO);

        scene.add(
            "ambient_light",
            Transform::IDENTITY,
            NodeKind::Light(Light::ambient(0x606060, 3.0)),
        );
        scene.add(
            "directional_light",
            Transform::from_translation(DIRECTIONAL_LIGHT_POSITION),
            NodeKind::Light(Light::new(LightKind::Directional, 0xffffff, 2.0)),
        );
        self.spotlight = Some(scene.add(
            "spotlight",
            Transform::from_translation(self.spotlight_orbit.position()),
            NodeKind::Light(Light::new(
                LightKind::Spot {
                    target: SPOTLIGHT_TARGET,
                    angle: FRAC_PI_4,
                },
                0xffffff,
                2.0,
            )),
        ));

        let half = FLOOR_SIZE / 2.0;
        scene.add(
            "floor",
            Transform::IDENTITY,
            NodeKind::Mesh(MeshInfo {
                bounds: AABB::new(Vec3::new(-half, 0.0, -half), Vec3::new(half, 0.0, half)),
                color: [0.35, 0.3, 0.25],
            }),
        );
    }

    /// Cabinet plus both doors, so the drawers still animate without the model
    fn placeholder(&self, key: &str) -> ModelData {
        let panel = |name: &str, min: Vec3, max: Vec3| MeshData {
            name: name.to_string(),
            transform: Transform::IDENTITY,
            bounds: AABB::new(min, max),
            color: [1.0, 0.0, 1.0],
        };

        ModelData {
            meshes: vec![
                panel(key, Vec3::new(-20.0, 0.0, -10.0), Vec3::new(20.0, 40.0, 10.0)),
                panel(&self.left_name, Vec3::new(-20.0, 0.0, 10.0), Vec3::new(0.0, 40.0, 11.0)),
                panel(&self.right_name, Vec3::new(0.0, 0.0, 10.0), Vec3::new(20.0, 40.0, 11.0)),
            ],
        }
    }

    fn on_asset(&mut self, scene: &mut Scene, key: &str, model: &ModelData) {
        if key != WARDROBE_KEY {
            log::warn!("Wardrobe demo ignoring unexpected asset {:?}", key);
            return;
        }

        let root = scene.instantiate("wardrobe", model, Transform::IDENTITY.with_scale(MODEL_SCALE));
        for mesh in &model.meshes {
            log::debug!("Wardrobe mesh: {}", mesh.name);
        }

        let left = scene.find(root, &self.left_name);
        let right = scene.find(root, &self.right_name);
        match (left, right) {
            (Some(left), Some(right)) => {
                self.doors = Some((Door::bind(scene, left), Door::bind(scene, right)));
                log::info!("Bound doors {} and {}", self.left_name, self.right_name);
            }
            _ => log::warn!(
                "Model has no {} / {} meshes, doors will not move",
                self.left_name,
                self.right_name
            ),
        }
    }

    fn handle_input(&mut self, scene: &mut Scene, input: InputEvent) {
        let InputEvent::Pressed(button) = input;
        let step = self.camera_step;
        match button {
            b if b.is_mouse() => {
                self.animation.toggle();
                log::debug!(
                    "Doors {}",
                    if self.animation.is_open() { "opening" } else { "closing" }
                );
            }
            Button::ArrowUp => Self::move_camera(scene, Vec3::new(0.0, 0.0, -step)),
            Button::ArrowDown => Self::move_camera(scene, Vec3::new(0.0, 0.0, step)),
            Button::ArrowLeft => Self::move_camera(scene, Vec3::new(-step, 0.0, 0.0)),
            Button::ArrowRight => Self::move_camera(scene, Vec3::new(step, 0.0, 0.0)),
            _ => {}
        }
    }

    fn animate(&mut self, scene: &mut Scene) {
        let position = self.spotlight_orbit.advance(1.0);
        if let Some(spotlight) = self.spotlight {
            scene.node_mut(spotlight).transform.translation = position;
        }

        self.animation.tick();
    }

    /// Doors follow progress on every frame, whether or not a run is active
    fn sync(&mut self, scene: &mut Scene) {
        if let Some((left, right)) = self.doors {
            let offset = self.animation.offset(self.max_offset);
            left.place(scene, offset);
            right.place(scene, offset);
        }
    }

    fn status(&self) -> String {
        format!(
            "doors {} progress {:.4} ({:?})",
            if self.animation.is_open() { "open" } else { "closed" },
            self.animation.progress(),
            self.animation.state()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use approx::assert_relative_eq;

    fn setup() -> (WardrobeDemo, Scene) {
        let mut demo = WardrobeDemo::new(&WardrobeConfig::default()).unwrap();
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 1.0));
        demo.build(&mut scene);
        (demo, scene)
    }

    #[test]
    fn placeholder_binds_both_doors() {
        let (mut demo, mut scene) = setup();
        let model = demo.placeholder(WARDROBE_KEY);
        demo.on_asset(&mut scene, WARDROBE_KEY, &model);

        let (left, right) = demo.doors().unwrap();
        assert_eq!(scene.node(left).name, "Object007");
        assert_eq!(scene.node(right).name, "Object006");
    }

    #[test]
    fn model_without_doors_leaves_them_unbound() {
        let (mut demo, mut scene) = setup();
        let model = ModelData::placeholder("cabinet", AABB::new(Vec3::ZERO, Vec3::ONE));
        demo.on_asset(&mut scene, WARDROBE_KEY, &model);
        assert!(demo.doors().is_none());
    }

    #[test]
    fn any_mouse_button_toggles() {
        let (mut demo, mut scene) = setup();
        demo.handle_input(&mut scene, InputEvent::Pressed(Button::MouseRight));
        assert!(demo.animation().is_open());
        demo.handle_input(&mut scene, InputEvent::Pressed(Button::MouseMiddle));
        assert!(!demo.animation().is_open());
    }

    #[test]
    fn arrows_move_camera_in_fixed_steps() {
        let (mut demo, mut scene) = setup();
        demo.handle_input(&mut scene, InputEvent::Pressed(Button::ArrowUp));
        demo.handle_input(&mut scene, InputEvent::Pressed(Button::ArrowLeft));
        assert_eq!(scene.camera.position, Vec3::new(-10.0, 50.0, 140.0));

        demo.handle_input(&mut scene, InputEvent::Pressed(Button::ArrowDown));
        demo.handle_input(&mut scene, InputEvent::Pressed(Button::ArrowRight));
        assert_eq!(scene.camera.position, CAMERA_START);
    }

    #[test]
    fn spotlight_circles_at_fixed_height() {
        let (mut demo, mut scene) = setup();
        let spotlight = demo.spotlight().unwrap();

        for _ in 0..100 {
            demo.animate(&mut scene);
        }

        let p = scene.node(spotlight).transform.translation;
        assert_relative_eq!(p.y, SPOTLIGHT_HEIGHT);
        assert_relative_eq!(p.x, SPOTLIGHT_RADIUS * 1.0f32.cos(), epsilon = 1e-3);
        assert_relative_eq!(p.z, SPOTLIGHT_RADIUS * 1.0f32.sin(), epsilon = 1e-3);
    }

    #[test]
    fn doors_follow_progress_after_run_ends() {
        let (mut demo, mut scene) = setup();
        let model = demo.placeholder(WARDROBE_KEY);
        demo.on_asset(&mut scene, WARDROBE_KEY, &model);
        let (left, right) = demo.doors().unwrap();

        demo.handle_input(&mut scene, InputEvent::Pressed(Button::MouseLeft));
        for _ in 0..80 {
            demo.animate(&mut scene);
            demo.sync(&mut scene);
        }

        let expected = -7.0 * demo.animation().progress();
        assert_relative_eq!(scene.node(left).transform.translation.y, expected);
        assert_relative_eq!(scene.node(right).transform.translation.y, expected);
        assert!(demo.animation().progress() > 0.99);
    }
}
