//! Closed polylines for orbit paths, uploaded once as line-strip buffers.

use std::f32::consts::TAU;

use crate::error::MeshError;

/// Points on a circle of `radius` in the XZ plane, centred on the origin.
///
/// Returns `segments + 1` points; the last repeats the first so the result can
/// be drawn directly as a line strip.
pub fn circle_points(radius: f32, segments: u32) -> Result<Vec<[f32; 3]>, MeshError> {
    if segments < 3 {
        return Err(MeshError::TooFewSegments(segments));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }

    let step = TAU / segments as f32;
    let mut points: Vec<[f32; 3]> = (0..segments)
        .map(|i| {
            let angle = i as f32 * step;
            [radius * angle.cos(), 0.0, radius * angle.sin()]
        })
        .collect();
    points.push(points[0]);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_closed() {
        let pts = circle_points(6.0, 64).unwrap();
        assert_eq!(pts.len(), 65);
        assert_eq!(pts[0], pts[64]);
        assert_eq!(pts[0], [6.0, 0.0, 0.0]);
    }

    #[test]
    fn test_points_lie_on_radius() {
        let radius = 12.5;
        for p in circle_points(radius, 100).unwrap() {
            let planar = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!((planar - radius).abs() < 1e-4);
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn test_quarter_turn() {
        let pts = circle_points(1.0, 4).unwrap();
        assert!(pts[1][0].abs() < 1e-6);
        assert!((pts[1][2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_too_few_segments() {
        assert_eq!(circle_points(1.0, 2), Err(MeshError::TooFewSegments(2)));
    }

    #[test]
    fn test_zero_radius_collapses_to_origin() {
        let pts = circle_points(0.0, 8).unwrap();
        assert!(pts.iter().all(|p| *p == [0.0, 0.0, 0.0]));
    }
}
