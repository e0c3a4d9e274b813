//! Scene state owned by the frame loop.
//!
//! Holds the shared meshes, the immutable orbiting bodies and the two
//! mutable asteroid fields. The renderer reads a [`FrameSnapshot`] each
//! frame and never touches the kinematics directly.

use glam::{Mat4, Vec3};
use orrery_config::{AsteroidFieldConfig, BodyConfig, Config, ConfigError};
use orrery_mesh::{Mesh, MeshError, circle_points, generate_sphere, unit_cube};
use orrery_space::{
    AsteroidField, AsteroidFieldParams, OrbitingBody, OrbitingLight, Satellite, SpaceError,
};
use tracing::{debug, info};

/// Anything that can go wrong while building a scene from config.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("space: {0}")]
    Space(#[from] SpaceError),
}

/// Per-frame render inputs: one model matrix per drawn sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Simulation time the snapshot was taken at.
    pub time: f64,
    pub sun: Mat4,
    /// Same order as [`SceneState::planets`].
    pub planets: Vec<Mat4>,
    pub moon: Option<Mat4>,
    /// Instanced belt transforms, centred on the origin.
    pub belt: Vec<Mat4>,
    /// Instanced ring transforms, centred on the ring host.
    pub ring: Vec<Mat4>,
    pub light_position: Vec3,
    pub light_color: [f32; 3],
}

/// Everything the frame loop mutates or reads.
pub struct SceneState {
    sphere: Mesh,
    cube: Mesh,
    orbit_paths: Vec<Vec<[f32; 3]>>,
    sun: OrbitingBody,
    planets: Vec<OrbitingBody>,
    moon: Option<(usize, Satellite)>,
    belt: Option<AsteroidField>,
    ring: Option<(usize, AsteroidField)>,
    light: OrbitingLight,
    asteroid_workers: usize,
    time: f64,
    ticks: u64,
}

impl SceneState {
    /// Build meshes, bodies and fields from a validated config.
    pub fn from_config(config: &Config) -> Result<Self, SceneError> {
        config.validate()?;

        let sphere = generate_sphere(config.mesh.radius, config.mesh.rings, config.mesh.sectors)?;
        info!(
            vertices = sphere.vertex_count(),
            indices = sphere.index_count(),
            "Generated sphere mesh"
        );

        let system = &config.system;
        let sun = OrbitingBody::star(&system.sun.name, system.sun.rotation_speed, system.sun.scale)?;
        let planets = system
            .planets
            .iter()
            .map(body_from_config)
            .collect::<Result<Vec<_>, _>>()?;

        let orbit_paths = planets
            .iter()
            .map(|p| circle_points(p.orbital_radius(), config.mesh.orbit_segments))
            .collect::<Result<Vec<_>, _>>()?;

        let moon = match &system.moon {
            Some(moon) => Some((moon.host, Satellite::new(body_from_config(&moon.body)?))),
            None => None,
        };

        let belt = build_field("belt", &config.belt)?;
        let ring = build_field("ring", &config.ring)?.map(|field| (system.ring_host, field));

        let light = OrbitingLight {
            radius: config.light.radius,
            height: config.light.height,
            angular_velocity: config.light.angular_velocity,
            color: config.light.color,
        };

        let asteroid_workers = match config.simulation.asteroid_workers {
            0 => AsteroidField::default_workers(),
            n => n,
        };

        Ok(Self {
            sphere,
            cube: unit_cube(1.0),
            orbit_paths,
            sun,
            planets,
            moon,
            belt,
            ring,
            light,
            asteroid_workers,
            time: 0.0,
            ticks: 0,
        })
    }

    /// Advance the clock by `dt` and move every asteroid one tick.
    pub fn update(&mut self, dt: f64) {
        self.time += dt;
        self.ticks += 1;
        let workers = self.asteroid_workers;
        let fields = self.belt.iter_mut().chain(self.ring.iter_mut().map(|(_, f)| f));
        for field in fields {
            if workers > 1 {
                field.advance_parallel(workers);
            } else {
                field.advance();
            }
        }
    }

    /// Collect every model matrix for the current simulation time.
    pub fn frame(&self) -> FrameSnapshot {
        let t = self.time;
        let planets = self.planets.iter().map(|p| p.transform_at(t)).collect();
        let moon = self
            .moon
            .as_ref()
            .map(|(host, moon)| moon.transform_at(&self.planets[*host], t));
        let belt = self
            .belt
            .as_ref()
            .map(|field| field.instance_transforms(Vec3::ZERO))
            .unwrap_or_default();
        let ring = self
            .ring
            .as_ref()
            .map(|(host, field)| field.instance_transforms(self.ring_centre(*host)))
            .unwrap_or_default();

        FrameSnapshot {
            time: t,
            sun: self.sun.transform_at(t),
            planets,
            moon,
            belt,
            ring,
            light_position: self.light.position_at(t),
            light_color: self.light.color,
        }
    }

    fn ring_centre(&self, host: usize) -> Vec3 {
        self.planets[host].position_at(self.time).as_vec3()
    }

    /// The shared sphere mesh used for every body.
    pub fn sphere(&self) -> &Mesh {
        &self.sphere
    }

    /// The lit cube from the lighting stage.
    pub fn cube(&self) -> &Mesh {
        &self.cube
    }

    /// One closed line strip per planet orbit.
    pub fn orbit_paths(&self) -> &[Vec<[f32; 3]>] {
        &self.orbit_paths
    }

    pub fn sun(&self) -> &OrbitingBody {
        &self.sun
    }

    pub fn planets(&self) -> &[OrbitingBody] {
        &self.planets
    }

    pub fn belt(&self) -> Option<&AsteroidField> {
        self.belt.as_ref()
    }

    pub fn ring(&self) -> Option<&AsteroidField> {
        self.ring.as_ref().map(|(_, f)| f)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn body_from_config(body: &BodyConfig) -> Result<OrbitingBody, SpaceError> {
    OrbitingBody::new(
        &body.name,
        body.orbital_radius,
        body.angular_velocity,
        body.rotation_speed,
        body.scale,
    )
}

fn build_field(label: &str, field: &AsteroidFieldConfig) -> Result<Option<AsteroidField>, SpaceError> {
    if !field.enabled {
        debug!("Asteroid {label} disabled");
        return Ok(None);
    }
    let params = AsteroidFieldParams {
        count: field.count,
        inner_radius: field.inner_radius,
        outer_radius: field.outer_radius,
        size_range: (field.size_min, field.size_max),
        angular_increment_range: (field.increment_min, field.increment_max),
        vertical_jitter: field.vertical_jitter,
        seed: field.seed,
    };
    let generated = AsteroidField::generate(&params)?;
    info!(bodies = generated.len(), seed = generated.seed(), "Generated asteroid {label}");
    Ok(Some(generated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.belt.count = 200;
        config.belt.seed = Some(3);
        config.ring.count = 100;
        config.ring.seed = Some(4);
        config
    }

    #[test]
    fn test_scene_builds_from_default_config() {
        let scene = SceneState::from_config(&small_config()).unwrap();
        assert_eq!(scene.sphere().vertex_count(), 400);
        assert_eq!(scene.sphere().index_count(), 2166);
        assert_eq!(scene.cube().vertex_count(), 24);
        assert_eq!(scene.planets().len(), 6);
        assert_eq!(scene.orbit_paths().len(), 6);
        assert_eq!(scene.belt().map(AsteroidField::len), Some(200));
        assert_eq!(scene.ring().map(AsteroidField::len), Some(100));
    }

    #[test]
    fn test_frame_has_one_transform_per_body() {
        let scene = SceneState::from_config(&small_config()).unwrap();
        let frame = scene.frame();
        assert_eq!(frame.time, 0.0);
        assert_eq!(frame.planets.len(), 6);
        assert!(frame.moon.is_some());
        assert_eq!(frame.belt.len(), 200);
        assert_eq!(frame.ring.len(), 100);
        assert_eq!(frame.sun.w_axis.truncate(), Vec3::ZERO);
    }

    #[test]
    fn test_update_advances_time_and_asteroids() {
        let mut scene = SceneState::from_config(&small_config()).unwrap();
        let before = scene.belt().unwrap().bodies().to_vec();
        scene.update(0.5);
        scene.update(0.5);
        assert_eq!(scene.ticks(), 2);
        assert!((scene.time() - 1.0).abs() < 1e-12);
        let after = scene.belt().unwrap().bodies();
        let moved = before
            .iter()
            .zip(after)
            .filter(|(a, b)| (a.position - b.position).length() > 1e-6)
            .count();
        assert_eq!(moved, before.len());
    }

    #[test]
    fn test_ring_follows_its_host() {
        let mut scene = SceneState::from_config(&small_config()).unwrap();
        for _ in 0..100 {
            scene.update(1.0);
        }
        let frame = scene.frame();
        let host = scene.planets()[5].position_at(scene.time()).as_vec3();
        let config = small_config();
        for m in &frame.ring {
            let local = m.w_axis.truncate() - host;
            let planar = local.x.hypot(local.z);
            assert!(
                planar >= config.ring.inner_radius - 1e-3 && planar <= config.ring.outer_radius + 1e-3,
                "ring body at planar distance {planar} from host"
            );
        }
    }

    #[test]
    fn test_parallel_workers_match_serial() {
        let mut serial_cfg = small_config();
        serial_cfg.simulation.asteroid_workers = 1;
        let mut parallel_cfg = small_config();
        parallel_cfg.simulation.asteroid_workers = 3;

        let mut serial = SceneState::from_config(&serial_cfg).unwrap();
        let mut parallel = SceneState::from_config(&parallel_cfg).unwrap();
        for _ in 0..10 {
            serial.update(1.0 / 60.0);
            parallel.update(1.0 / 60.0);
        }
        assert_eq!(serial.frame(), parallel.frame());
    }

    #[test]
    fn test_disabled_fields_are_skipped() {
        let mut config = small_config();
        config.belt.enabled = false;
        config.ring.enabled = false;
        let scene = SceneState::from_config(&config).unwrap();
        let frame = scene.frame();
        assert!(frame.belt.is_empty());
        assert!(frame.ring.is_empty());
    }

    #[test]
    fn test_invalid_mesh_config_is_reported() {
        let mut config = small_config();
        config.mesh.rings = 1;
        assert!(matches!(
            SceneState::from_config(&config),
            Err(SceneError::Mesh(MeshError::TooFewRings(1)))
        ));
    }

    #[test]
    fn test_inverted_belt_is_reported() {
        let mut config = small_config();
        config.belt.inner_radius = 20.0;
        assert!(matches!(
            SceneState::from_config(&config),
            Err(SceneError::Space(SpaceError::InvalidAnnulus { .. }))
        ));
    }

    #[test]
    fn test_dangling_ring_host_is_reported() {
        let mut config = small_config();
        config.system.ring_host = 42;
        assert!(matches!(
            SceneState::from_config(&config),
            Err(SceneError::Config(_))
        ));
    }
}
