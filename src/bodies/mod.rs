mod shape;
mod static_body;
mod dynamic_body;
mod material;
mod color;

pub use self::shape::{BodyShape, PhysicsBody};
pub use self::static_body::StaticBody;
pub use self::dynamic_body::DynamicBody;
pub use self::material::Material;
pub use self::color::Color;
pub use self::body_flags::BodyFlags;

use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Velocity and placement changes a driver can request for a dynamic body.
///
/// Mass is stored on the body but does not scale any of these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyCommand {
    /// `velocity += force * dt`
    Accelerate {
        /// Acceleration to integrate
        force: Vector2,

        /// Time span to integrate over, in seconds
        dt: f32,
    },

    /// `velocity += impulse`
    AddForce(Vector2),

    /// Replaces the velocity
    SetVelocity(Vector2),

    /// Teleports the body; the next published frame does not interpolate
    SetPosition(Vector2),
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Per-body state bits for dynamic bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct BodyFlags: u32 {
            /// Body is accelerated by the world gravity every tick
            const AFFECTED_BY_GRAVITY = 0x01;

            /// Body touched an obstacle during the last tick
            const IN_CONTACT = 0x02;

            /// Position was set directly since the last published frame
            const TELEPORTED = 0x04;
        }
    }

    impl Default for BodyFlags {
        fn default() -> Self {
            Self::AFFECTED_BY_GRAVITY
        }
    }
}
