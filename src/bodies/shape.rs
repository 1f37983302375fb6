use crate::bodies::{Color, Material};
use crate::math::{Aabb, Vector2};
use crate::shapes::{Polygon, PolygonGeometry};
use crate::Result;

use std::sync::Arc;

/// A polygon collider together with its precomputed geometry.
///
/// Immutable after construction; bodies hold it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyShape {
    polygon: Polygon,
    geometry: PolygonGeometry,
}

impl BodyShape {
    /// Preprocesses a polygon into a collider
    pub fn new(polygon: Polygon) -> Result<Self> {
        let geometry = PolygonGeometry::compute(&polygon)?;
        Ok(Self { polygon, geometry })
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn points(&self) -> &[Vector2] {
        self.polygon.points()
    }

    #[inline]
    pub fn geometry(&self) -> &PolygonGeometry {
        &self.geometry
    }

    /// Local-space bounding box
    #[inline]
    pub fn local_bounds(&self) -> Aabb {
        self.geometry.bounds
    }

    #[inline]
    pub fn edge_normals(&self) -> &[Vector2] {
        &self.geometry.edge_normals
    }

    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.geometry.triangles
    }
}

/// Read access shared by static and dynamic bodies
pub trait PhysicsBody {
    /// Returns the collider
    fn shape(&self) -> &Arc<BodyShape>;

    /// Returns the world-space position of the local origin
    fn position(&self) -> Vector2;

    /// Returns the velocity; always zero for static bodies
    fn velocity(&self) -> Vector2 {
        Vector2::ZERO
    }

    /// Returns the surface material
    fn material(&self) -> Material;

    /// Returns the draw color
    fn color(&self) -> Color;

    /// Returns the bounding box in world space
    fn world_bounds(&self) -> Aabb {
        self.shape().local_bounds().translated(self.position())
    }

    /// Returns vertex `index` in world space
    fn world_point(&self, index: usize) -> Vector2 {
        self.shape().points()[index] + self.position()
    }

    /// Returns the endpoints of edge `index` in world space
    fn world_edge(&self, index: usize) -> (Vector2, Vector2) {
        let (start, end) = self.shape().polygon().edge(index);
        (start + self.position(), end + self.position())
    }

    /// Returns every vertex in world space
    fn world_points(&self) -> Vec<Vector2> {
        let position = self.position();
        self.shape().points().iter().map(|p| *p + position).collect()
    }
}
