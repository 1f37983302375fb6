#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Surface properties carried by every body.
///
/// The solver does not read these yet; they travel with the body so drivers and renderers can.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution, 0-1
    pub bounciness: f32,

    /// Coefficient of friction, 0-1
    pub friction: f32,
}

impl Material {
    /// Material with no bounce and no friction
    pub const ZERO: Self = Self { bounciness: 0.0, friction: 0.0 };

    /// Creates a new material with the specified properties
    pub fn new(bounciness: f32, friction: f32) -> Self {
        Self { bounciness, friction }
    }

    /// Creates a material for ice (low friction, some bounce)
    pub fn ice() -> Self {
        Self::new(0.4, 0.05)
    }

    /// Creates a material for rubber (high friction, high bounce)
    pub fn rubber() -> Self {
        Self::new(0.7, 0.8)
    }
}
