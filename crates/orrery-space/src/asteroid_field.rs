//! Asteroid belts and planetary rings: a seeded population of small bodies
//! scattered over an annulus, each creeping forward in angle every tick.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SpaceError;

/// A single asteroid. Only the polar angle changes after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidBody {
    /// Position relative to the field centre.
    pub position: Vec3,
    /// Uniform visual scale.
    pub size: f32,
    /// Radians added to the polar angle on each tick.
    pub angular_increment: f32,
}

impl AsteroidBody {
    /// Distance from the field's vertical axis, ignoring the vertical offset.
    pub fn planar_distance(&self) -> f32 {
        self.position.x.hypot(self.position.z)
    }

    /// Polar angle in the XZ plane, in `(-π, π]`.
    pub fn angle(&self) -> f32 {
        self.position.z.atan2(self.position.x)
    }

    /// Advance one tick. The distance is re-derived from the current position
    /// rather than stored, and `y` is left untouched.
    pub fn advance(&mut self) {
        let angle = self.angle() + self.angular_increment;
        let distance = self.planar_distance();
        self.position.x = distance * angle.cos();
        self.position.z = distance * angle.sin();
    }
}

/// Generation parameters for an [`AsteroidField`].
#[derive(Clone, Debug, PartialEq)]
pub struct AsteroidFieldParams {
    /// Number of bodies to scatter.
    pub count: u32,
    /// Inner radius of the annulus.
    pub inner_radius: f32,
    /// Outer radius of the annulus.
    pub outer_radius: f32,
    /// Inclusive `(min, max)` for body size.
    pub size_range: (f32, f32),
    /// Inclusive `(min, max)` for the per-tick angular increment.
    pub angular_increment_range: (f32, f32),
    /// Vertical offsets are drawn from `[-vertical_jitter, vertical_jitter]`.
    pub vertical_jitter: f32,
    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl AsteroidFieldParams {
    /// The main belt between the inner and outer planets.
    pub fn belt(seed: Option<u64>) -> Self {
        Self {
            count: 2000,
            inner_radius: 10.0,
            outer_radius: 12.0,
            size_range: (0.01, 0.05),
            angular_increment_range: (0.001, 0.005),
            vertical_jitter: 0.2,
            seed,
        }
    }

    /// A thin ring around a planet, in planet-local coordinates.
    pub fn ring(seed: Option<u64>) -> Self {
        Self {
            count: 1000,
            inner_radius: 1.0,
            outer_radius: 1.4,
            size_range: (0.005, 0.015),
            angular_increment_range: (0.01, 0.02),
            vertical_jitter: 0.02,
            seed,
        }
    }

    /// Check counts, annulus bounds and sampling ranges.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.count == 0 {
            return Err(SpaceError::EmptyField);
        }
        let (inner, outer) = (self.inner_radius, self.outer_radius);
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || inner > outer {
            return Err(SpaceError::InvalidAnnulus { inner, outer });
        }
        check_range("size", self.size_range)?;
        check_range("angular increment", self.angular_increment_range)?;
        let jitter = self.vertical_jitter;
        if !jitter.is_finite() || !(jitter * 2.0).is_finite() || jitter < 0.0 {
            return Err(SpaceError::InvalidRange {
                what: "vertical jitter",
                min: -jitter,
                max: jitter,
            });
        }
        Ok(())
    }
}

fn check_range(what: &'static str, (min, max): (f32, f32)) -> Result<(), SpaceError> {
    // `random_range` also rejects a span that overflows to infinity.
    if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
        return Err(SpaceError::InvalidRange { what, min, max });
    }
    Ok(())
}

/// Smallest shard worth a thread in [`AsteroidField::advance_parallel`].
pub const MIN_SHARD_LEN: usize = 4096;

/// A population of asteroids sharing one annulus.
///
/// The population is fixed at generation; [`advance`](Self::advance) mutates
/// each body's angle in place.
#[derive(Clone, Debug, PartialEq)]
pub struct AsteroidField {
    bodies: Vec<AsteroidBody>,
    seed: u64,
}

impl AsteroidField {
    /// Scatter `params.count` bodies. Deterministic for a given seed.
    ///
    /// Per body, draws in order: angle in `[0, 2π)`, distance in
    /// `[inner, outer]`, vertical offset, size, angular increment.
    pub fn generate(params: &AsteroidFieldParams) -> Result<Self, SpaceError> {
        params.validate()?;

        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let jitter = params.vertical_jitter;
        let (size_min, size_max) = params.size_range;
        let (inc_min, inc_max) = params.angular_increment_range;

        let bodies = (0..params.count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let distance = rng.random_range(params.inner_radius..=params.outer_radius);
                let height = rng.random_range(-jitter..=jitter);
                let size = rng.random_range(size_min..=size_max);
                let angular_increment = rng.random_range(inc_min..=inc_max);

                AsteroidBody {
                    position: Vec3::new(distance * angle.cos(), height, distance * angle.sin()),
                    size,
                    angular_increment,
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Generated asteroid field: {} bodies in [{}, {}], seed {seed}",
            bodies.len(),
            params.inner_radius,
            params.outer_radius
        );

        Ok(Self { bodies, seed })
    }

    pub fn bodies(&self) -> &[AsteroidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The seed the population was drawn from, for replaying a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance every body by its angular increment.
    pub fn advance(&mut self) {
        self.bodies.iter_mut().for_each(AsteroidBody::advance);
    }

    /// Advance `ticks` times.
    pub fn advance_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.advance();
        }
    }

    /// Same result as [`advance`](Self::advance), with the bodies split into
    /// up to `workers` contiguous shards updated on scoped threads.
    ///
    /// Shards never hold fewer than [`MIN_SHARD_LEN`] bodies, so small fields
    /// run serially on the calling thread.
    pub fn advance_parallel(&mut self, workers: usize) {
        let workers = Self::effective_workers(self.bodies.len(), workers);
        if workers == 1 {
            self.advance();
            return;
        }
        let shard_len = self.bodies.len().div_ceil(workers);
        std::thread::scope(|scope| {
            for shard in self.bodies.chunks_mut(shard_len) {
                scope.spawn(move || shard.iter_mut().for_each(AsteroidBody::advance));
            }
        });
    }

    /// Threads `advance_parallel` actually uses for `len` bodies.
    pub fn effective_workers(len: usize, workers: usize) -> usize {
        workers.clamp(1, (len / MIN_SHARD_LEN).max(1))
    }

    /// Worker count for [`advance_parallel`](Self::advance_parallel) on this machine.
    pub fn default_workers() -> usize {
        num_cpus::get().max(1)
    }

    /// World-space `(position, size)` per body, with the field centred on
    /// `system_offset` (the origin for a belt, the host planet for a ring).
    pub fn render_positions(&self, system_offset: Vec3) -> Vec<(Vec3, f32)> {
        self.bodies
            .iter()
            .map(|b| (system_offset + b.position, b.size))
            .collect()
    }

    /// One model matrix per body for instanced drawing of the shared sphere.
    pub fn instance_transforms(&self, system_offset: Vec3) -> Vec<Mat4> {
        self.bodies
            .iter()
            .map(|b| {
                Mat4::from_translation(system_offset + b.position)
                    * Mat4::from_scale(Vec3::splat(b.size))
            })
            .collect()
    }
}
