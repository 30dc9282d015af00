use glam::{Mat4, Quat, Vec3};

use crate::camera::Camera;
use crate::loaders::ModelData;
use crate::math::AABB;

/// Local position, rotation and scale of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_rotation_z(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_z(radians);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Drawable geometry summarized by its model-space bounds
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    pub bounds: AABB,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Point { range: f32 },
    Directional,
    Spot { target: Vec3, angle: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, hex, intensity)
    }

    pub fn new(kind: LightKind, hex: u32, intensity: f32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            kind,
            color: [channel(16), channel(8), channel(0)],
            intensity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshInfo),
    Light(Light),
}

/// Handle to a node owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Scene graph plus the camera looking at it.
///
/// Nodes are never removed, so a `NodeId` stays valid for the scene's lifetime.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    pub camera: Camera,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            nodes: Vec::new(),
            camera,
        }
    }

    /// Add a root-level node
    pub fn add(&mut self, name: impl Into<String>, transform: Transform, kind: NodeKind) -> NodeId {
        self.insert(name.into(), transform, kind, None)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        self.insert(name.into(), transform, kind, Some(parent))
    }

    fn insert(&mut self, name: String, transform: Transform, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            transform,
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Attach a loaded model under a new group node carrying `transform`
    pub fn instantiate(&mut self, name: impl Into<String>, model: &ModelData, transform: Transform) -> NodeId {
        let root = self.add(name, transform, NodeKind::Group);
        for mesh in &model.meshes {
            self.add_child(
                root,
                mesh.name.clone(),
                mesh.transform,
                NodeKind::Mesh(MeshInfo {
                    bounds: mesh.bounds,
                    color: mesh.color,
                }),
            );
        }
        root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node named `name` in depth-first order below (and including) `root`
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// First node named `name` in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name).map(NodeId)
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Every mesh with its world matrix
    pub fn meshes(&self) -> impl Iterator<Item = (Mat4, &MeshInfo)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match &node.kind {
            NodeKind::Mesh(mesh) => Some((self.world_matrix(NodeId(i)), mesh)),
            _ => None,
        })
    }

    /// Every light with its world position
    pub fn lights(&self) -> impl Iterator<Item = (Vec3, &Light)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match &node.kind {
            NodeKind::Light(light) => Some((self.world_position(NodeId(i)), light)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::MeshData;

    fn scene() -> Scene {
        Scene::new(Camera::new(Vec3::new(0.0, 0.0, 10.0), 1.0))
    }

    fn unit_mesh() -> NodeKind {
        NodeKind::Mesh(MeshInfo {
            bounds: AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
            color: [1.0, 1.0, 1.0],
        })
    }

    #[test]
    fn world_position_composes_parents() {
        let mut scene = scene();
        let parent = scene.add("model", Transform::from_translation(Vec3::X).with_scale(2.0), NodeKind::Group);
        let child = scene.add_child(parent, "door", Transform::from_translation(Vec3::Y), unit_mesh());

        assert_eq!(scene.world_position(child), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn find_searches_depth_first() {
        let mut scene = scene();
        let root = scene.add("root", Transform::IDENTITY, NodeKind::Group);
        let a = scene.add_child(root, "a", Transform::IDENTITY, NodeKind::Group);
        let target = scene.add_child(a, "Object007", Transform::IDENTITY, unit_mesh());
        scene.add_child(root, "Object007", Transform::IDENTITY, unit_mesh());

        assert_eq!(scene.find(root, "Object007"), Some(target));
        assert_eq!(scene.find(a, "missing"), None);
        assert_eq!(scene.node(target).parent(), Some(a));
    }

    #[test]
    fn instantiate_keeps_mesh_names() {
        let model = ModelData {
            meshes: vec![
                MeshData {
                    name: "Object006".to_string(),
                    transform: Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
                    bounds: AABB::new(Vec3::ZERO, Vec3::ONE),
                    color: [0.5, 0.5, 0.5],
                },
                MeshData {
                    name: "Object007".to_string(),
                    transform: Transform::IDENTITY,
                    bounds: AABB::new(Vec3::ZERO, Vec3::ONE),
                    color: [0.5, 0.5, 0.5],
                },
            ],
        };

        let mut scene = scene();
        let root = scene.instantiate("wardrobe", &model, Transform::IDENTITY.with_scale(2.0));

        assert_eq!(scene.node(root).children().len(), 2);
        let right = scene.find(root, "Object006").unwrap();
        assert_eq!(scene.world_position(right), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(scene.meshes().count(), 2);
    }

    #[test]
    fn lights_report_world_positions() {
        let mut scene = scene();
        scene.add(
            "point",
            Transform::from_translation(Vec3::new(-2.0, 2.0, -2.0)),
            NodeKind::Light(Light::new(LightKind::Point { range: 50.0 }, 0xffffff, 100.0)),
        );

        let lights: Vec<_> = scene.lights().collect();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].0, Vec3::new(-2.0, 2.0, -2.0));
        assert_eq!(lights[0].1.color, [1.0, 1.0, 1.0]);
    }
}
