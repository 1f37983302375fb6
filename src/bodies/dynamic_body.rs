use crate::bodies::{body_flags::BodyFlags, BodyCommand, BodyShape, Color, Material, PhysicsBody};
use crate::error::PhysicsError;
use crate::math::{Aabb, Vector2};
use crate::shapes::Polygon;
use crate::Result;

use std::sync::Arc;

/// Default number of collide-and-slide passes per tick
pub const DEFAULT_MAX_COLLISION_DEPTH: u32 = 4;

/// A translating polygon that collides with and slides along static bodies.
///
/// Dynamic bodies never rotate and never collide with each other.
#[derive(Debug, Clone)]
pub struct DynamicBody {
    shape: Arc<BodyShape>,
    pub(crate) position: Vector2,
    pub(crate) velocity: Vector2,
    mass: f32,
    max_collision_depth: u32,
    material: Material,
    color: Color,
    pub(crate) flags: BodyFlags,
}

impl DynamicBody {
    /// Creates a new dynamic body at rest at `position`
    pub fn new(polygon: Polygon, position: Vector2) -> Result<Self> {
        Ok(Self::from_shape(Arc::new(BodyShape::new(polygon)?), position))
    }

    /// Creates a new dynamic body sharing an already processed collider
    pub fn from_shape(shape: Arc<BodyShape>, position: Vector2) -> Self {
        Self {
            shape,
            position,
            velocity: Vector2::ZERO,
            mass: 1.0,
            max_collision_depth: DEFAULT_MAX_COLLISION_DEPTH,
            material: Material::default(),
            color: Color::default(),
            flags: BodyFlags::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Enables or disables world gravity for this body
    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, enabled);
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Sets the mass. Must be finite and positive.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be finite and positive, got {}",
                mass
            )));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn max_collision_depth(&self) -> u32 {
        self.max_collision_depth
    }

    /// Sets the number of collide-and-slide passes allowed per tick. Must be at least 1.
    pub fn set_max_collision_depth(&mut self, depth: u32) -> Result<()> {
        if depth == 0 {
            return Err(PhysicsError::InvalidParameter(
                "max collision depth must be at least 1".to_string(),
            ));
        }
        self.max_collision_depth = depth;
        Ok(())
    }

    pub fn flags(&self) -> BodyFlags {
        self.flags
    }

    /// Returns true if the body touched an obstacle during the last tick
    pub fn in_contact(&self) -> bool {
        self.flags.contains(BodyFlags::IN_CONTACT)
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// `velocity += force * dt`
    pub fn accelerate(&mut self, force: Vector2, dt: f32) {
        self.velocity += force * dt;
    }

    /// `velocity += force`
    pub fn add_force(&mut self, force: Vector2) {
        self.velocity += force;
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Moves the body without sweeping. The move is flagged as a discontinuity.
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.flags.insert(BodyFlags::TELEPORTED);
    }

    /// Applies a driver command
    pub fn apply(&mut self, command: BodyCommand) {
        match command {
            BodyCommand::Accelerate { force, dt } => self.accelerate(force, dt),
            BodyCommand::AddForce(force) => self.add_force(force),
            BodyCommand::SetVelocity(velocity) => self.set_velocity(velocity),
            BodyCommand::SetPosition(position) => self.set_position(position),
        }
    }

    /// World-space box covering every position of the body along `displacement`
    pub fn swept_bounds(&self, displacement: Vector2) -> Aabb {
        self.shape.local_bounds().swept(displacement).translated(self.position)
    }
}

impl PhysicsBody for DynamicBody {
    fn shape(&self) -> &Arc<BodyShape> {
        &self.shape
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn velocity(&self) -> Vector2 {
        self.velocity
    }

    fn material(&self) -> Material {
        self.material
    }

    fn color(&self) -> Color {
        self.color
    }
}
