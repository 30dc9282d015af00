//! Wireframe rasterization of a scene onto a CPU canvas

use glam::{Mat4, Vec3};

use crate::camera::project_with;
use crate::core::canvas::{Canvas, Color, DrawOp};
use crate::math::AABB;
use crate::scene::{LightKind, Scene};

const BACKGROUND: Color = Color::hex(0x101014);

/// Corner index pairs joined by the twelve box edges
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7), // along x
    (0, 2), (1, 3), (4, 6), (5, 7), // along y
    (0, 4), (1, 5), (2, 6), (3, 7), // along z
];

/// Draw every mesh as its oriented bounding box and every positioned light as a disc
pub fn draw_scene(scene: &Scene, width: u32, height: u32) -> Canvas {
    Canvas::new(width, height)
        .draw_all(scene_ops(scene, width, height))
        .execute_ops()
}

/// Draw operations for one frame, back to front in scene order
pub fn scene_ops(scene: &Scene, width: u32, height: u32) -> Vec<DrawOp> {
    let view_projection = scene.camera.view_projection();
    let mut ops = vec![DrawOp::Clear(BACKGROUND)];

    for (world, mesh) in scene.meshes() {
        let color = Color::from_linear(mesh.color, 1.0);
        ops.extend(box_edges(&view_projection, &world, &mesh.bounds, width, height, color));
    }

    for (position, light) in scene.lights() {
        let color = Color::from_linear(light.color, 1.0);
        let radius = match light.kind {
            LightKind::Ambient => continue,
            LightKind::Directional => 4,
            LightKind::Point { .. } => 6,
            LightKind::Spot { target, .. } => {
                if let Some(line) = segment(&view_projection, position, target, width, height, color) {
                    ops.push(line);
                }
                5
            }
        };

        if let Some((x, y, _)) = project_with(&view_projection, position, width, height) {
            ops.push(DrawOp::FilledCircle {
                cx: x.round() as i32,
                cy: y.round() as i32,
                radius,
                color,
            });
        }
    }

    ops
}

fn box_edges(
    view_projection: &Mat4,
    world: &Mat4,
    bounds: &AABB,
    width: u32,
    height: u32,
    color: Color,
) -> impl Iterator<Item = DrawOp> {
    let corners = bounds.corners().map(|c| world.transform_point3(c));
    let view_projection = *view_projection;
    BOX_EDGES.into_iter().filter_map(move |(a, b)| {
        segment(&view_projection, corners[a], corners[b], width, height, color)
    })
}

/// A projected line, dropped when either end is behind the camera
fn segment(
    view_projection: &Mat4,
    from: Vec3,
    to: Vec3,
    width: u32,
    height: u32,
    color: Color,
) -> Option<DrawOp> {
    let (x1, y1, _) = project_with(view_projection, from, width, height)?;
    let (x2, y2, _) = project_with(view_projection, to, width, height)?;
    Some(DrawOp::Line {
        x1: x1.round() as i32,
        y1: y1.round() as i32,
        x2: x2.round() as i32,
        y2: y2.round() as i32,
        color,
    })
}
