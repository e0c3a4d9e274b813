//! Point light circling the scene, used by the lit-cube stage.

use glam::Vec3;

/// A point light moving on a horizontal circle above the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitingLight {
    pub radius: f32,
    /// Constant height of the circle above the XZ plane.
    pub height: f32,
    /// Radians per second.
    pub angular_velocity: f32,
    /// Linear RGB.
    pub color: [f32; 3],
}

impl Default for OrbitingLight {
    fn default() -> Self {
        Self {
            radius: 2.0,
            height: 1.0,
            angular_velocity: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl OrbitingLight {
    /// Light position at time `t`: `(r sin ωt, height, r cos ωt)`.
    ///
    /// Starts on +Z and sweeps towards +X, the opposite phase to planets.
    pub fn position_at(&self, t: f64) -> Vec3 {
        let angle = f64::from(self.angular_velocity) * t;
        let r = f64::from(self.radius);
        Vec3::new(
            (angle.sin() * r) as f32,
            self.height,
            (angle.cos() * r) as f32,
        )
    }
}
