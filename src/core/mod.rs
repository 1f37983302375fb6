pub mod world;
pub mod config;
pub mod storage;
pub mod events;
pub mod snapshot;
pub mod exchange;
pub mod interpolation;
mod scheduler;

pub use self::world::{PhysicsWorld, TickStats};
pub use self::config::SimulationConfig;
pub use self::storage::{BodyStorage, Storage, AUTO_ID_START};
pub use self::events::{EventQueue, PhysicsEvent, CollisionEvent, BodyEvent, BodyEventType};
pub use self::snapshot::{FrameSnapshot, BodySnapshot};
pub use self::exchange::{FrameExchange, PublishedFrames};
pub use self::interpolation::{FrameReader, FrameSample, TickPredictor, interpolation_factor};
pub use self::scheduler::{
    FixedStepScheduler, SchedulerHandle, TickController, StopToken, CommandSender,
};

use crate::math::Vector2;

use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Identifier of a body. Static and dynamic bodies have separate id spaces.
///
/// Ids are either chosen by the caller or allocated upward from [`AUTO_ID_START`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyId(pub i32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for BodyId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Which registry a body lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// The gravity to apply to the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GravityType {
    /// No gravity
    None,

    /// Constant acceleration, in world units per second squared
    Constant(Vector2),
}

impl GravityType {
    /// Returns the acceleration this gravity applies everywhere
    pub fn acceleration(&self) -> Vector2 {
        match self {
            Self::None => Vector2::ZERO,
            Self::Constant(acceleration) => *acceleration,
        }
    }
}

impl Default for GravityType {
    fn default() -> Self {
        // world units are pixels at zoom 0
        Self::Constant(Vector2::new(0.0, -600.0))
    }
}
