use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use super::{MeshData, ModelData};
use crate::math::AABB;
use crate::scene::Transform;

/// Loads a glTF/GLB file and flattens its node tree into named meshes.
///
/// Each mesh keeps the transform of its node relative to the scene root, so
/// the viewer can move individual parts (doors, caps) by name.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData> {
    let path = path.as_ref();
    log::debug!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF {:?}: {} scenes, {} nodes, {} meshes",
        path,
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut meshes = Vec::new();
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .context("glTF file has no scenes")?;

    for node in scene.nodes() {
        process_node(&node, &buffers, &Mat4::IDENTITY, &mut meshes)?;
    }

    Ok(ModelData { meshes })
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    meshes: &mut Vec<MeshData>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        if let Some(mesh_data) = process_mesh(node, &mesh, buffers, &global_transform)? {
            meshes.push(mesh_data);
        }
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, meshes)?;
    }

    Ok(())
}

/// Bounds and base color of one mesh, in the mesh's own space
fn process_mesh(
    node: &gltf::Node,
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
) -> Result<Option<MeshData>> {
    let mut bounds: Option<AABB> = None;
    let mut color = [0.8, 0.8, 0.8];

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions = reader
            .read_positions()
            .with_context(|| format!("Mesh {:?} has a primitive without positions", mesh.name()))?;

        if let Some(primitive_bounds) = AABB::from_points(positions.map(Vec3::from_array)) {
            bounds = Some(match bounds {
                Some(b) => b.union(&primitive_bounds),
                None => primitive_bounds,
            });
        }

        let base = primitive.material().pbr_metallic_roughness().base_color_factor();
        color = [base[0], base[1], base[2]];
    }

    let Some(bounds) = bounds else {
        log::warn!("Mesh {:?} has no vertices, skipping", mesh.name());
        return Ok(None);
    };

    let (scale, rotation, translation) = transform.to_scale_rotation_translation();
    let name = node
        .name()
        .or_else(|| mesh.name())
        .map(str::to_string)
        .unwrap_or_else(|| format!("node{}", node.index()));

    Ok(Some(MeshData {
        name,
        transform: Transform {
            translation,
            rotation,
            scale,
        },
        bounds,
        color,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_model("models/does_not_exist.glb").unwrap_err();
        assert!(format!("{:#}", err).contains("does_not_exist.glb"));
    }
}
