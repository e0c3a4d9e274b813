//! Errors raised when constructing bodies and fields from caller parameters.

/// Invalid startup parameters for orbits or asteroid fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpaceError {
    /// An orbiting body was given a negative or non-finite parameter.
    #[error("invalid orbit for `{name}`: {reason}")]
    InvalidOrbit {
        /// Name of the offending body.
        name: String,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// An asteroid field must contain at least one body.
    #[error("asteroid field needs at least one body")]
    EmptyField,

    /// Annulus bounds are inverted, negative, or non-finite.
    #[error("invalid annulus: inner radius {inner}, outer radius {outer}")]
    InvalidAnnulus {
        /// Inner radius as given.
        inner: f32,
        /// Outer radius as given.
        outer: f32,
    },

    /// A sampling range is inverted or non-finite.
    #[error("invalid {what} range [{min}, {max}]")]
    InvalidRange {
        /// Which parameter the range belongs to.
        what: &'static str,
        /// Lower bound as given.
        min: f32,
        /// Upper bound as given.
        max: f32,
    },
}
