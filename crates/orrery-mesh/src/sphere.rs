//! UV-sphere tessellation.
//!
//! Vertices are laid out ring-major: ring 0 is the south pole (`y = -radius`),
//! ring `rings - 1` the north pole. Within a ring, sector `s` sits at azimuth
//! `2π · s / (sectors - 1)`, so the first and last sector of each ring coincide
//! in position but carry different `u` coordinates (the texture seam).

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::error::MeshError;
use crate::mesh::{Mesh, MeshVertex};

/// Generate a UV sphere of the given radius.
///
/// Produces `rings * sectors` vertices and `6 * (rings - 1) * (sectors - 1)`
/// indices. Rows adjacent to a pole contain zero-area triangles; they are kept
/// so the index buffer stays a regular grid.
pub fn generate_sphere(radius: f32, rings: u32, sectors: u32) -> Result<Mesh, MeshError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }
    if rings < 2 {
        return Err(MeshError::TooFewRings(rings));
    }
    if sectors < 2 {
        return Err(MeshError::TooFewSectors(sectors));
    }
    let vertex_count = u64::from(rings) * u64::from(sectors);
    if vertex_count > u64::from(u32::MAX) {
        return Err(MeshError::TooManyVertices { rings, sectors });
    }

    let ring_step = 1.0 / (rings - 1) as f32;
    let sector_step = 1.0 / (sectors - 1) as f32;

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for r in 0..rings {
        let ring_frac = r as f32 * ring_step;
        let y = (-FRAC_PI_2 + PI * ring_frac).sin();
        let horizontal = (PI * ring_frac).sin();

        for s in 0..sectors {
            let sector_frac = s as f32 * sector_step;
            let x = (TAU * sector_frac).cos() * horizontal;
            let z = (TAU * sector_frac).sin() * horizontal;

            vertices.push(MeshVertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
                uv: [sector_frac, ring_frac],
            });
        }
    }

    let quads = (rings as usize - 1) * (sectors as usize - 1);
    let mut indices = Vec::with_capacity(quads * 6);
    for r in 0..rings - 1 {
        for s in 0..sectors - 1 {
            let first = r * sectors + s;
            let second = r * sectors + (s + 1);
            let third = (r + 1) * sectors + (s + 1);
            let fourth = (r + 1) * sectors + s;

            indices.extend_from_slice(&[first, second, third, third, fourth, first]);
        }
    }

    Ok(Mesh::new(vertices, indices))
}
