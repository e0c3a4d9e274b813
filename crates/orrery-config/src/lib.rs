//! Configuration for the orrery.
//!
//! Settings persist to disk as `config.ron`, tolerate missing or unknown
//! fields, and can be overridden from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AsteroidFieldConfig, BodyConfig, Config, DebugConfig, LightConfig, MeshConfig, MoonConfig,
    RingFieldConfig, SimulationConfig, SystemConfig, default_config_dir,
};
pub use error::ConfigError;
