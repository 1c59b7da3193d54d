use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::VertexFormat;
use point_field::PointField;

/// Per-point size multiplier in `[0, 2)`, relative to the galaxy's `size`.
pub const ATTRIBUTE_POINT_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_PointScale", 988_540_917, VertexFormat::Float32);

/// Build a point-list mesh with one vertex per field point.
pub fn create_point_field_mesh(field: &PointField) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, field.positions().to_vec());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, field.colors_rgba());
    mesh.insert_attribute(ATTRIBUTE_POINT_SCALE, field.scales().to_vec());
    mesh
}
