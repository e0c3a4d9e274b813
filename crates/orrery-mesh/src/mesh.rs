//! Mesh data structure shared by every rendered body.

use bytemuck::{Pod, Zeroable};

/// A single interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates in [0, 1].
    pub uv: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<MeshVertex>(), 32);

/// Vertices plus a triangle index list, ready for GPU upload.
///
/// Built once at startup and never mutated. Bodies reuse the same mesh with
/// their own model transforms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a mesh from prebuilt buffers.
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns `true` if every index references an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len() as u64;
        self.indices.iter().all(|&i| u64::from(i) < count)
    }

    /// Unnormalized geometric normal of a triangle, `(b - a) x (c - a)`.
    ///
    /// Zero for degenerate triangles such as those collapsed onto a pole.
    pub fn triangle_normal(&self, triangle: [u32; 3]) -> glam::Vec3 {
        let [a, b, c] = triangle.map(|i| glam::Vec3::from(self.vertices[i as usize].position));
        (b - a).cross(c - a)
    }

    /// Raw vertex bytes for a `wgpu` vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a `wgpu` index buffer (`IndexFormat::Uint32`).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> Mesh {
        let v = |x: f32, y: f32| MeshVertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [x, y],
        };
        Mesh::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], vec![0, 1, 2])
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn test_counts_and_triangles() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_out_of_bounds_index_detected() {
        let mut mesh = single_triangle();
        mesh.indices[2] = 3;
        assert!(!mesh.indices_in_bounds());
    }

    #[test]
    fn test_triangle_normal_follows_right_hand_rule() {
        let mesh = single_triangle();
        let n = mesh.triangle_normal([0, 1, 2]);
        assert!((n - glam::Vec3::Z).length() < 1e-6);
        let flipped = mesh.triangle_normal([0, 2, 1]);
        assert!((flipped + glam::Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_byte_views_match_buffer_sizes() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_bytes().len(), 3 * 32);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }
}
