//! Flat-shaded cube used by the lighting stage.

use crate::mesh::{Mesh, MeshVertex};

/// Corner signs and outward normal for each face, in buffer order.
const FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
    // Back
    (
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        [0.0, 0.0, -1.0],
    ),
    // Front
    (
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [0.0, 0.0, 1.0],
    ),
    // Left
    (
        [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0]],
        [-1.0, 0.0, 0.0],
    ),
    // Right
    (
        [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
        [1.0, 0.0, 0.0],
    ),
    // Top
    (
        [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [0.0, 1.0, 0.0],
    ),
    // Bottom
    (
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        [0.0, -1.0, 0.0],
    ),
];

const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Build an axis-aligned cube with edge length `size`, centred on the origin.
///
/// Each face owns four vertices so normals stay flat: 24 vertices, 36 indices.
pub fn unit_cube(size: f32) -> Mesh {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (corners, normal) in FACES {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(CORNER_UVS) {
            vertices.push(MeshVertex {
                position: corner.map(|c| c * half),
                normal,
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Mesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = unit_cube(1.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert!(cube.indices_in_bounds());
    }

    #[test]
    fn test_face_vertices_lie_on_their_plane() {
        let size = 2.0;
        let cube = unit_cube(size);
        for face in cube.vertices.chunks_exact(4) {
            let n = glam::Vec3::from(face[0].normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            for v in face {
                assert_eq!(v.normal, face[0].normal);
                let d = glam::Vec3::from(v.position).dot(n);
                assert!((d - size * 0.5).abs() < 1e-6, "plane distance {d}");
            }
        }
    }

    #[test]
    fn test_first_face_indices() {
        let cube = unit_cube(1.0);
        assert_eq!(&cube.indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&cube.indices[30..], &[20, 21, 22, 22, 23, 20]);
    }
}
