//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level orrery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Clock and loop settings.
    pub simulation: SimulationConfig,
    /// Shared sphere mesh tessellation.
    pub mesh: MeshConfig,
    /// Star, planets and moon.
    pub system: SystemConfig,
    /// Asteroid belt around the star.
    pub belt: AsteroidFieldConfig,
    /// Ring around `system.ring_host`, in planet-local coordinates.
    pub ring: RingFieldConfig,
    /// Point light for the lit stage.
    pub light: LightConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Multiplier from wall-clock seconds to simulation seconds.
    pub time_scale: f64,
    /// Frames to run in headless mode (0 = until interrupted).
    pub frames: u64,
    /// Seconds of wall-clock time each headless frame represents.
    pub frame_time: f64,
    /// Worker threads for asteroid updates (0 = one per CPU, 1 = serial).
    pub asteroid_workers: usize,
}

/// Sphere mesh configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Radius of the shared sphere before per-body scaling.
    pub radius: f32,
    /// Latitude subdivisions (>= 2).
    pub rings: u32,
    /// Longitude subdivisions (>= 2).
    pub sectors: u32,
    /// Segments per orbit polyline.
    pub orbit_segments: u32,
}

/// One body on a circular orbit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub name: String,
    /// Distance from the orbit centre.
    pub orbital_radius: f32,
    /// Radians per simulation second.
    pub angular_velocity: f32,
    /// Spin in radians per simulation second.
    pub rotation_speed: f32,
    /// Uniform scale applied to the shared sphere.
    pub scale: f32,
}

/// A moon and the planet it circles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoonConfig {
    /// Index into `system.planets`.
    pub host: usize,
    /// Orbit relative to the host.
    pub body: BodyConfig,
}

/// The star and everything on a fixed orbit around it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// Central star; its orbital radius is ignored.
    pub sun: BodyConfig,
    pub planets: Vec<BodyConfig>,
    /// Optional moon.
    pub moon: Option<MoonConfig>,
    /// Index into `planets` of the body carrying the ring.
    pub ring_host: usize,
}

/// Asteroid field generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AsteroidFieldConfig {
    /// Skip generation entirely when `false`.
    pub enabled: bool,
    pub count: u32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Radians per tick, lower bound.
    pub increment_min: f32,
    /// Radians per tick, upper bound.
    pub increment_max: f32,
    pub vertical_jitter: f32,
    /// Fixed seed for a reproducible field; `None` re-randomizes each run.
    pub seed: Option<u64>,
}

/// The planetary ring section.
///
/// Serialized exactly like [`AsteroidFieldConfig`], but fields missing from
/// `config.ron` fall back to [`AsteroidFieldConfig::ring`] rather than the
/// belt defaults.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct RingFieldConfig(pub AsteroidFieldConfig);

/// Field-by-field overrides read for a ring section. `None` means the
/// field was absent from the file.
#[derive(Deserialize)]
struct FieldOverrides {
    #[serde(default, deserialize_with = "present")]
    enabled: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    count: Option<u32>,
    #[serde(default, deserialize_with = "present")]
    inner_radius: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    outer_radius: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    size_min: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    size_max: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    increment_min: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    increment_max: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    vertical_jitter: Option<f32>,
    #[serde(default, deserialize_with = "present")]
    seed: Option<Option<u64>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FieldOverrides {
    fn apply(self, base: AsteroidFieldConfig) -> AsteroidFieldConfig {
        AsteroidFieldConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            count: self.count.unwrap_or(base.count),
            inner_radius: self.inner_radius.unwrap_or(base.inner_radius),
            outer_radius: self.outer_radius.unwrap_or(base.outer_radius),
            size_min: self.size_min.unwrap_or(base.size_min),
            size_max: self.size_max.unwrap_or(base.size_max),
            increment_min: self.increment_min.unwrap_or(base.increment_min),
            increment_max: self.increment_max.unwrap_or(base.increment_max),
            vertical_jitter: self.vertical_jitter.unwrap_or(base.vertical_jitter),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

impl<'de> Deserialize<'de> for RingFieldConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = FieldOverrides::deserialize(deserializer)?;
        Ok(Self(overrides.apply(AsteroidFieldConfig::ring())))
    }
}

impl Default for RingFieldConfig {
    fn default() -> Self {
        Self(AsteroidFieldConfig::ring())
    }
}

impl std::ops::Deref for RingFieldConfig {
    type Target = AsteroidFieldConfig;

    fn deref(&self) -> &AsteroidFieldConfig {
        &self.0
    }
}

impl std::ops::DerefMut for RingFieldConfig {
    fn deref_mut(&mut self) -> &mut AsteroidFieldConfig {
        &mut self.0
    }
}

/// Orbiting point light.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    pub radius: f32,
    pub height: f32,
    pub angular_velocity: f32,
    pub color: [f32; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,orrery_space=trace").
    pub log_level: String,
    /// Also write JSON logs to the log directory in debug builds.
    pub log_to_file: bool,
    /// Emit a per-frame summary every N frames (0 = never).
    pub report_interval: u64,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            mesh: MeshConfig::default(),
            system: SystemConfig::default(),
            belt: AsteroidFieldConfig::default(),
            ring: RingFieldConfig::default(),
            light: LightConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            frames: 600,
            frame_time: 1.0 / 60.0,
            asteroid_workers: 1,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            rings: 20,
            sectors: 20,
            orbit_segments: 128,
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "body".to_string(),
            orbital_radius: 0.0,
            angular_velocity: 0.0,
            rotation_speed: 0.0,
            scale: 1.0,
        }
    }
}

impl BodyConfig {
    fn new(name: &str, orbital_radius: f32, angular_velocity: f32, rotation_speed: f32, scale: f32) -> Self {
        Self {
            name: name.to_string(),
            orbital_radius,
            angular_velocity,
            rotation_speed,
            scale,
        }
    }
}

impl Default for MoonConfig {
    fn default() -> Self {
        Self {
            host: 2,
            body: BodyConfig::new("moon", 0.8, 0.2, 0.05, 0.1),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sun: BodyConfig::new("sun", 0.0, 0.0, 0.05, 2.0),
            planets: vec![
                BodyConfig::new("mercury", 3.0, 0.047, 0.01, 0.2),
                BodyConfig::new("venus", 4.5, 0.035, 0.008, 0.35),
                BodyConfig::new("earth", 6.0, 0.017, 1.0, 0.4),
                BodyConfig::new("mars", 8.0, 0.014, 0.9, 0.3),
                BodyConfig::new("jupiter", 15.0, 0.008, 2.4, 1.0),
                BodyConfig::new("saturn", 20.0, 0.006, 2.2, 0.85),
            ],
            moon: Some(MoonConfig::default()),
            ring_host: 5,
        }
    }
}

impl Default for AsteroidFieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 2000,
            inner_radius: 10.0,
            outer_radius: 12.0,
            size_min: 0.01,
            size_max: 0.05,
            increment_min: 0.001,
            increment_max: 0.005,
            vertical_jitter: 0.2,
            seed: None,
        }
    }
}

impl AsteroidFieldConfig {
    /// Defaults for a planetary ring (planet-local radii).
    pub fn ring() -> Self {
        Self {
            count: 1000,
            inner_radius: 1.0,
            outer_radius: 1.4,
            size_min: 0.005,
            size_max: 0.015,
            increment_min: 0.01,
            increment_max: 0.02,
            vertical_jitter: 0.02,
            ..Self::default()
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            height: 1.0,
            angular_velocity: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
            report_interval: 60,
        }
    }
}

/// Platform config directory for the orrery (e.g. `~/.config/orrery`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("orrery"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Check cross-references between sections.
    ///
    /// Numeric ranges (ring counts, annulus bounds) are checked by the crates
    /// that consume them; this only catches dangling planet indices.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let planets = self.system.planets.len();
        if self.ring.enabled && self.system.ring_host >= planets {
            return Err(ConfigError::InvalidValue {
                field: "system.ring_host",
                reason: format!("index {} but only {planets} planets", self.system.ring_host),
            });
        }
        if let Some(moon) = &self.system.moon
            && moon.host >= planets
        {
            return Err(ConfigError::InvalidValue {
                field: "system.moon.host",
                reason: format!("index {} but only {planets} planets", moon.host),
            });
        }
        Ok(())
    }
}
