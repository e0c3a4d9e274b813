//! Mesh generation for the orrery: the shared UV sphere, the lit cube, orbit
//! polylines, and the vertex layout every body pipeline binds.

pub mod cube;
pub mod error;
pub mod mesh;
pub mod polyline;
pub mod sphere;
pub mod vertex_format;

pub use cube::unit_cube;
pub use error::MeshError;
pub use mesh::{Mesh, MeshVertex};
pub use polyline::circle_points;
pub use sphere::generate_sphere;
pub use vertex_format::{
    MESH_VERTEX_ATTRIBUTES, MESH_VERTEX_LAYOUT, SPHERE_FRONT_FACE, mesh_vertex_buffer_layout,
};
