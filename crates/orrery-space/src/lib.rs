//! Solar-system kinematics: circular orbits for the star, planets and moon,
//! seeded asteroid belts and rings, and the orbiting point light.

pub mod asteroid_field;
pub mod error;
pub mod light;
pub mod orbital;

pub use asteroid_field::{AsteroidBody, AsteroidField, AsteroidFieldParams, MIN_SHARD_LEN};
pub use error::SpaceError;
pub use light::OrbitingLight;
pub use orbital::{OrbitingBody, Satellite};
