use glam::Vec3;

use super::Demo;
use crate::animation::{OscillatorState, Orbit, Step};
use crate::config::PenConfig;
use crate::core::input::{Button, InputEvent};
use crate::error::ConfigError;
use crate::loaders::{AssetRequest, ModelData};
use crate::math::AABB;
use crate::scene::{Light, LightKind, MeshInfo, NodeId, NodeKind, Scene, Transform};

const ROOM_SIZE: f32 = 20.0;
const ROOM_CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 10.0);
const POINT_LIGHT_START: Vec3 = Vec3::new(-2.0, 2.0, -2.0);
const POINT_LIGHT_RANGE: f32 = 50.0;
const POINT_LIGHT_INTENSITY: f32 = 100.0;

/// Where the pen body and cap rest, and where the cap starts its travel
const PEN_POSITION: Vec3 = Vec3::new(1.0, -0.85, 0.0);
const PEN_TILT_DEGREES: f32 = -20.0;
const PEN_SCALE: f32 = 4.0;
const HOLDER_SCALE: f32 = 2.0;

const HOLDER_KEY: &str = "holder";
const BODY_KEY: &str = "body";
const HEAD_KEY: &str = "head";

/// A pen standing in its holder whose cap slides up and down along the pen.
///
/// Mouse buttons swing the point light around the room; left/right arrows
/// orbit the camera around the holder.
pub struct PenDemo {
    step: Step,
    oscillator: OscillatorState,
    cap: Option<NodeId>,
    light: Option<NodeId>,
    light_orbit: Orbit,
    camera_orbit: Orbit,
}

impl PenDemo {
    pub fn new(config: &PenConfig) -> Result<Self, ConfigError> {
        let step = config.step()?;
        let oscillator = OscillatorState::new(PEN_POSITION.y, config.start_direction, config.bounds()?)
            .with_policy(config.boundary);

        Ok(Self {
            step,
            oscillator,
            cap: None,
            light: None,
            light_orbit: Orbit::around(Vec3::ZERO, POINT_LIGHT_START, config.light_orbit_speed),
            camera_orbit: Orbit::around(Vec3::ZERO, CAMERA_START, config.camera_orbit_speed),
        })
    }

    pub fn oscillator(&self) -> &OscillatorState {
        &self.oscillator
    }

    /// The cap node, once its model has arrived
    pub fn cap(&self) -> Option<NodeId> {
        self.cap
    }

    fn pen_transform() -> Transform {
        Transform::from_translation(PEN_POSITION)
            .with_scale(PEN_SCALE)
            .with_rotation_z(PEN_TILT_DEGREES.to_radians())
    }

    /// Cap placement for the oscillator's current height
    fn cap_translation(&self) -> Vec3 {
        PEN_POSITION + self.step.along(self.oscillator.position() - PEN_POSITION.y)
    }

    fn swing_light(&mut self, scene: &mut Scene, steps: f32) {
        let position = self.light_orbit.advance(steps);
        if let Some(light) = self.light {
            scene.node_mut(light).transform.translation = position;
        }
    }

    fn orbit_camera(&mut self, scene: &mut Scene, steps: f32) {
        scene.camera.position = self.camera_orbit.advance(steps);
        scene.camera.look_at(self.camera_orbit.center);
    }
}

impl Demo for PenDemo {
    fn name(&self) -> &'static str {
        "pen"
    }

    fn assets(&self) -> Vec<AssetRequest> {
        vec![
            AssetRequest::new(HOLDER_KEY, "pen_holder.glb"),
            AssetRequest::new(BODY_KEY, "pen_body.gltf"),
            AssetRequest::new(HEAD_KEY, "pen_head.gltf"),
        ]
    }

    fn build(&mut self, scene: &mut Scene) {
        scene.camera.position = CAMERA_START;
        scene.camera.look_at(Vec3::ZERO);

        scene.add(
            "room",
            Transform::from_translation(ROOM_CENTER),
            NodeKind::Mesh(MeshInfo {
                bounds: AABB::centered(Vec3::ZERO, Vec3::splat(ROOM_SIZE)),
                color: [0.55, 0.5, 0.45],
            }),
        );
        scene.add(
            "ambient_light",
            Transform::IDENTITY,
            NodeKind::Light(Light::ambient(0xffffff, 1.0)),
        );
        self.light = Some(scene.add(
            "point_light",
            Transform::from_translation(POINT_LIGHT_START),
            NodeKind::Light(Light::new(
                LightKind::Point { range: POINT_LIGHT_RANGE },
                0xffffff,
                POINT_LIGHT_INTENSITY,
            )),
        ));
    }

    fn placeholder(&self, key: &str) -> ModelData {
        let bounds = match key {
            HOLDER_KEY => AABB::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.25, 0.5)),
            HEAD_KEY => AABB::new(Vec3::new(-0.02, 0.1, -0.02), Vec3::new(0.02, 0.25, 0.02)),
            _ => AABB::new(Vec3::new(-0.02, 0.0, -0.02), Vec3::new(0.02, 0.3, 0.02)),
        };
        ModelData::placeholder(key, bounds)
    }

    fn on_asset(&mut self, scene: &mut Scene, key: &str, model: &ModelData) {
        match key {
            HOLDER_KEY => {
                let holder = scene.instantiate("pen_holder", model, Transform::IDENTITY.with_scale(HOLDER_SCALE));
                let center = scene.world_position(holder);
                self.camera_orbit = Orbit::around(center, scene.camera.position, self.camera_orbit.speed);
                scene.camera.look_at(center);
            }
            BODY_KEY => {
                scene.instantiate("pen_body", model, Self::pen_transform());
            }
            HEAD_KEY => {
                let cap = scene.instantiate("pen_head", model, Self::pen_transform());
                scene.node_mut(cap).transform.translation = self.cap_translation();
                self.cap = Some(cap);
                log::info!("Pen cap in place, starting oscillation");
            }
            other => log::warn!("Pen demo ignoring unexpected asset {:?}", other),
        }
    }

    fn handle_input(&mut self, scene: &mut Scene, input: InputEvent) {
        let InputEvent::Pressed(button) = input;
        match button {
            Button::MouseLeft => self.swing_light(scene, 1.0),
            Button::MouseRight => self.swing_light(scene, -1.0),
            Button::ArrowLeft => self.orbit_camera(scene, -1.0),
            Button::ArrowRight => self.orbit_camera(scene, 1.0),
            _ => {}
        }
    }

    fn animate(&mut self, scene: &mut Scene) {
        // Motion starts once the cap exists
        let Some(cap) = self.cap else {
            return;
        };

        self.oscillator.update(&self.step);
        scene.node_mut(cap).transform.translation = self.cap_translation();
    }

    fn status(&self) -> String {
        match self.cap {
            Some(_) => format!(
                "cap height {:.4} moving {:?}",
                self.oscillator.position(),
                self.oscillator.direction()
            ),
            None => "waiting for pen cap".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    fn setup() -> (PenDemo, Scene) {
        let mut demo = PenDemo::new(&PenConfig::default()).unwrap();
        let mut scene = Scene::new(Camera::new(Vec3::ZERO, 1.0));
        demo.build(&mut scene);
        (demo, scene)
    }

    #[test]
    fn idle_until_cap_loads() {
        let (mut demo, mut scene) = setup();
        demo.animate(&mut scene);
        assert_eq!(demo.oscillator().position(), PEN_POSITION.y);
        assert_eq!(demo.status(), "waiting for pen cap");
    }

    #[test]
    fn cap_moves_along_tilted_axis() {
        let (mut demo, mut scene) = setup();
        let head = demo.placeholder(HEAD_KEY);
        demo.on_asset(&mut scene, HEAD_KEY, &head);
        let cap = demo.cap().unwrap();

        for _ in 0..10 {
            demo.animate(&mut scene);
        }

        let moved = scene.node(cap).transform.translation - PEN_POSITION;
        assert_relative_eq!(moved.x, 0.01, epsilon = 1e-5);
        assert_relative_eq!(moved.y, demo.oscillator().position() - PEN_POSITION.y, epsilon = 1e-6);
    }

    #[test]
    fn mouse_buttons_swing_light_both_ways() {
        let (mut demo, mut scene) = setup();
        let light = demo.light.unwrap();

        demo.handle_input(&mut scene, InputEvent::Pressed(Button::MouseLeft));
        let swung = scene.node(light).transform.translation;
        assert_relative_eq!(swung.y, POINT_LIGHT_START.y);
        assert!((swung - POINT_LIGHT_START).length() > 1.0);

        demo.handle_input(&mut scene, InputEvent::Pressed(Button::MouseRight));
        let back = scene.node(light).transform.translation;
        assert_relative_eq!(back.x, POINT_LIGHT_START.x, epsilon = 1e-5);
        assert_relative_eq!(back.z, POINT_LIGHT_START.z, epsilon = 1e-5);
    }

    #[test]
    fn arrow_left_orbits_camera_towards_positive_x() {
        let (mut demo, mut scene) = setup();

        demo.handle_input(&mut scene, InputEvent::Pressed(Button::ArrowLeft));

        let position = scene.camera.position;
        assert_relative_eq!(position.x, 10.0 * 0.04f32.sin(), epsilon = 1e-4);
        assert_relative_eq!(position.z, 10.0 * 0.04f32.cos(), epsilon = 1e-4);
        assert_eq!(scene.camera.target, Vec3::ZERO);
    }
}
