//! Circular-orbit kinematics in the XZ plane.
//!
//! Positions are derived from the simulation clock on every call; no body
//! carries mutable state, so transforms for distinct bodies can be computed
//! in any order or in parallel.

use glam::{DMat4, DVec3, Mat4};

use crate::error::SpaceError;

/// A body on a circular orbit around the system origin.
///
/// Fields are only reachable through accessors so every instance has passed
/// the checks in [`OrbitingBody::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitingBody {
    name: String,
    orbital_radius: f32,
    angular_velocity: f32,
    rotation_speed: f32,
    scale: f32,
}

impl OrbitingBody {
    /// Create a body, rejecting negative radii, non-positive scales and
    /// non-finite speeds.
    pub fn new(
        name: impl Into<String>,
        orbital_radius: f32,
        angular_velocity: f32,
        rotation_speed: f32,
        scale: f32,
    ) -> Result<Self, SpaceError> {
        let name = name.into();
        let invalid = |reason| SpaceError::InvalidOrbit {
            name: name.clone(),
            reason,
        };
        if !orbital_radius.is_finite() || orbital_radius < 0.0 {
            return Err(invalid("orbital radius must be finite and >= 0"));
        }
        if !angular_velocity.is_finite() || !rotation_speed.is_finite() {
            return Err(invalid("speeds must be finite"));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(invalid("scale must be finite and > 0"));
        }
        Ok(Self {
            name,
            orbital_radius,
            angular_velocity,
            rotation_speed,
            scale,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance from the orbit centre. Zero pins the body to the centre.
    pub fn orbital_radius(&self) -> f32 {
        self.orbital_radius
    }

    /// Orbital angular velocity in radians per second.
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Spin about the body's own Y axis in radians per second.
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Uniform visual scale applied to the shared sphere mesh.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// A body fixed at the origin that only spins (the central star).
    pub fn star(name: impl Into<String>, rotation_speed: f32, scale: f32) -> Result<Self, SpaceError> {
        Self::new(name, 0.0, 0.0, rotation_speed, scale)
    }

    /// Position on the orbit at time `t`: `(r cos ωt, 0, r sin ωt)`.
    pub fn position_at(&self, t: f64) -> DVec3 {
        circular_offset(self.orbital_radius, self.angular_velocity, t)
    }

    /// Spin angle in radians at time `t`.
    pub fn spin_angle(&self, t: f64) -> f64 {
        f64::from(self.rotation_speed) * t
    }

    /// Time for one full orbit, or `None` for a body that does not orbit.
    pub fn period(&self) -> Option<f64> {
        let w = f64::from(self.angular_velocity).abs();
        (w > 0.0).then(|| std::f64::consts::TAU / w)
    }

    /// Model matrix `Translate(orbit) * Scale(scale) * RotateY(spin)`.
    ///
    /// Column-major, as consumed by `wgpu` uniform buffers.
    pub fn transform_at(&self, t: f64) -> Mat4 {
        compose(self.position_at(t), self.scale, self.spin_angle(t))
    }
}

/// A body orbiting another orbiting body (a moon around its planet).
///
/// The satellite's own `orbital_radius` and `angular_velocity` describe its
/// circle around the primary; the two offsets are summed at the same time.
#[derive(Clone, Debug, PartialEq)]
pub struct Satellite {
    body: OrbitingBody,
}

impl Satellite {
    pub fn new(body: OrbitingBody) -> Self {
        Self { body }
    }

    /// The satellite's orbit relative to its primary.
    pub fn body(&self) -> &OrbitingBody {
        &self.body
    }

    /// World position: the primary's orbit position plus the local circle.
    pub fn position_at(&self, primary: &OrbitingBody, t: f64) -> DVec3 {
        primary.position_at(t) + self.body.position_at(t)
    }

    pub fn transform_at(&self, primary: &OrbitingBody, t: f64) -> Mat4 {
        compose(
            self.position_at(primary, t),
            self.body.scale,
            self.body.spin_angle(t),
        )
    }
}

fn circular_offset(radius: f32, angular_velocity: f32, t: f64) -> DVec3 {
    let radius = f64::from(radius);
    let angle = f64::from(angular_velocity) * t;
    DVec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

// Evaluated in f64 so long-running clocks keep their precision; narrowed once.
fn compose(translation: DVec3, scale: f32, spin: f64) -> Mat4 {
    let m = DMat4::from_translation(translation)
        * DMat4::from_scale(DVec3::splat(f64::from(scale)))
        * DMat4::from_rotation_y(spin);
    m.as_mat4()
}
