//! Mesh generation for point field primitives.
//!
//! Point fields become point-list meshes carrying per-vertex color and a
//! per-point scale attribute.

/// Point-list mesh built from a sampled point field.
pub mod point_field_mesh;
