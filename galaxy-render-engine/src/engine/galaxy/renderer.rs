use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use point_field::{PointField, PointRenderer, PointStyle};

use crate::engine::mesh::point_field_mesh::create_point_field_mesh;

/// Marker for entities drawing a point field.
#[derive(Component)]
pub struct PointFieldPrimitive;

/// Entity and GPU assets behind one point primitive.
#[derive(Debug, Clone)]
pub struct GalaxyPrimitive {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Point renderer backed by Bevy meshes.
///
/// Primitives are spawned hidden and parented under `parent` on attach.
/// Disposal removes the mesh and material assets; detaching despawns the
/// entity.
pub struct BevyPointRenderer<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub parent: Entity,
}

impl PointRenderer for BevyPointRenderer<'_, '_, '_> {
    type Handle = GalaxyPrimitive;

    fn create_point_primitive(&mut self, field: &PointField, style: &PointStyle) -> GalaxyPrimitive {
        let mesh = self.meshes.add(create_point_field_mesh(field));
        let material = self.materials.add(point_material(style));

        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                Visibility::Hidden,
                NoFrustumCulling,
                PointFieldPrimitive,
            ))
            .id();

        GalaxyPrimitive {
            entity,
            mesh,
            material,
        }
    }

    fn attach(&mut self, handle: &GalaxyPrimitive) {
        self.commands.entity(self.parent).add_child(handle.entity);
        self.commands
            .entity(handle.entity)
            .insert(Visibility::Inherited);
    }

    fn detach(&mut self, handle: &GalaxyPrimitive) {
        self.commands.entity(handle.entity).despawn();
    }

    fn dispose(&mut self, handle: &GalaxyPrimitive) {
        self.meshes.remove(&handle.mesh);
        self.materials.remove(&handle.material);
    }
}

/// Unlit, additive, vertex-colored material for a point primitive.
pub fn point_material(style: &PointStyle) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE.with_alpha(style.opacity),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}
