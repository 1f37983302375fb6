//! Fixed-step 2D polygon physics.
//!
//! Bodies are clockwise polygons. Dynamic bodies move by collide-and-slide against static
//! obstacles on a dedicated simulation thread ticking at a fixed interval, and every tick publishes
//! an immutable snapshot pair that a consumer running at any frame rate can interpolate between.

#[macro_use]
extern crate tracing;

pub mod math;
pub mod shapes;
pub mod bodies;
pub mod collision;
pub mod core;
pub mod render;

/// Re-export common types for easier usage
pub use crate::core::{
    PhysicsWorld, SimulationConfig, GravityType, BodyId,
    FixedStepScheduler, SchedulerHandle, TickController, FrameReader, FrameSample, FrameSnapshot,
};
pub use crate::bodies::{StaticBody, DynamicBody, BodyCommand, PhysicsBody, Material, Color};
pub use crate::render::{Camera, Viewport};
pub use crate::shapes::Polygon;
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use crate::core::BodyId;
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid polygon: {0}")]
        InvalidPolygon(String),

        #[error("Triangulation made no progress with {remaining} vertices left (degenerate or self-intersecting polygon)")]
        TriangulationFailed { remaining: usize },

        #[error("Body id {0} is already occupied")]
        IdOccupied(BodyId),

        #[error("No free body id left above the allocation watermark")]
        IdSpaceExhausted,

        #[error("Body not found: {0}")]
        BodyNotFound(BodyId),

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Scheduler error: {0}")]
        SchedulerError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
