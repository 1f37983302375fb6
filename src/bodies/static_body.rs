use crate::bodies::{BodyShape, Color, Material, PhysicsBody};
use crate::math::{Aabb, Vector2};
use crate::shapes::Polygon;
use crate::Result;

use std::sync::Arc;

/// An immovable obstacle. Its position is fixed at construction, so the world-space bounding box
/// is computed once.
#[derive(Debug, Clone)]
pub struct StaticBody {
    shape: Arc<BodyShape>,
    position: Vector2,
    bounds: Aabb,
    material: Material,
    color: Color,
}

impl StaticBody {
    /// Creates a new static body from a clockwise outline placed at `position`
    pub fn new(polygon: Polygon, position: Vector2) -> Result<Self> {
        Ok(Self::from_shape(Arc::new(BodyShape::new(polygon)?), position))
    }

    /// Creates a new static body sharing an already processed collider
    pub fn from_shape(shape: Arc<BodyShape>, position: Vector2) -> Self {
        let bounds = shape.local_bounds().translated(position);
        Self {
            shape,
            position,
            bounds,
            material: Material::default(),
            color: Color::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl PhysicsBody for StaticBody {
    fn shape(&self) -> &Arc<BodyShape> {
        &self.shape
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn material(&self) -> Material {
        self.material
    }

    fn color(&self) -> Color {
        self.color
    }

    fn world_bounds(&self) -> Aabb {
        self.bounds
    }
}
