//! Mesh generation error types.

/// Invalid tessellation parameters passed to a mesh generator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A sphere needs at least two rings (the two poles).
    #[error("sphere needs at least 2 rings, got {0}")]
    TooFewRings(u32),

    /// A sphere needs at least two sectors.
    #[error("sphere needs at least 2 sectors, got {0}")]
    TooFewSectors(u32),

    /// Radius must be finite and strictly positive.
    #[error("radius must be finite and > 0, got {0}")]
    InvalidRadius(f32),

    /// The vertex grid would not be addressable with `u32` indices.
    #[error("{rings} x {sectors} vertices overflow a u32 index buffer")]
    TooManyVertices {
        /// Requested ring count.
        rings: u32,
        /// Requested sector count.
        sectors: u32,
    },

    /// A closed polyline needs at least three segments.
    #[error("circle needs at least 3 segments, got {0}")]
    TooFewSegments(u32),
}
