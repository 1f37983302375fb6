use crate::bodies::{Color, PhysicsBody};
use crate::core::storage::Storage;
use crate::core::{BodyId, PhysicsWorld};
use crate::math::Vector2;

use std::collections::BTreeMap;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Drawable state of one body at the end of a tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodySnapshot {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Local-space outline
    pub collider: Vec<Vector2>,
    pub triangles: Vec<[usize; 3]>,
    pub color: Color,
}

impl BodySnapshot {
    /// Copies the drawable state out of a body
    pub fn capture(body: &impl PhysicsBody) -> Self {
        Self {
            position: body.position(),
            velocity: body.velocity(),
            collider: body.shape().points().to_vec(),
            triangles: body.shape().triangles().to_vec(),
            color: body.color(),
        }
    }

    /// Outline translated to `position`
    pub fn vertices_at(&self, position: Vector2) -> Vec<Vector2> {
        self.collider.iter().map(|p| *p + position).collect()
    }

    /// Outline in world space
    pub fn world_vertices(&self) -> Vec<Vector2> {
        self.vertices_at(self.position)
    }
}

/// Deep copy of the whole world after a tick.
///
/// Shares nothing with the live world, so it can be handed to another thread and read while the
/// simulation keeps running.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FrameSnapshot {
    /// Number of ticks completed when this was captured
    pub tick: u64,
    pub statics: BTreeMap<BodyId, BodySnapshot>,
    pub dynamics: BTreeMap<BodyId, BodySnapshot>,
}

impl FrameSnapshot {
    pub fn capture(world: &PhysicsWorld) -> Self {
        Self {
            tick: world.tick_count(),
            statics: world
                .statics()
                .iter()
                .map(|(id, body)| (id, BodySnapshot::capture(body)))
                .collect(),
            dynamics: world
                .dynamics()
                .iter()
                .map(|(id, body)| (id, BodySnapshot::capture(body)))
                .collect(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{DynamicBody, StaticBody};
    use crate::shapes::Polygon;

    #[test]
    fn snapshot_is_independent_of_world() {
        let mut world = PhysicsWorld::new();
        let id = world
            .add_dynamic(DynamicBody::new(Polygon::default(), Vector2::new(0.0, 10.0)).unwrap())
            .unwrap();
        world
            .add_static(StaticBody::new(Polygon::rectangle(5.0, 1.0).unwrap(), Vector2::ZERO).unwrap())
            .unwrap();

        let before = world.snapshot();
        let copy = before.clone();
        world.step(0.01);
        world.set_position(id, Vector2::new(50.0, 50.0)).unwrap();

        assert_eq!(before, copy);
        assert_eq!(before.dynamics[&id].position, Vector2::new(0.0, 10.0));
        assert_eq!(before.dynamics[&id].triangles.len(), 2);
        assert_eq!(before.body_count(), 2);
        assert_ne!(world.snapshot(), before);
    }
}
