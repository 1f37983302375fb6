use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Axis-Aligned Bounding Box (AABB) in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner of the AABB
    pub min: Vector2,

    /// Maximum corner of the AABB
    pub max: Vector2,
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum points
    #[inline]
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Creates the smallest AABB containing both endpoints of a segment
    #[inline]
    pub fn from_segment(a: Vector2, b: Vector2) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Creates an AABB from a set of points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut aabb = Self { min: *first, max: *first };
        for point in rest {
            aabb.expand_to_include_point(*point);
        }

        Some(aabb)
    }

    /// Checks if this AABB contains a point (boundary inclusive)
    #[inline]
    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Checks if this AABB overlaps another. Touching boxes count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x &&
        self.min.y <= other.max.y && other.min.y <= self.max.y
    }

    /// Returns this AABB moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns this AABB grown along the direction of `displacement` only, so that it covers
    /// every position of the box along the sweep.
    #[inline]
    pub fn swept(&self, displacement: Vector2) -> Self {
        let mut swept = *self;
        if displacement.x < 0.0 {
            swept.min.x += displacement.x;
        } else {
            swept.max.x += displacement.x;
        }
        if displacement.y < 0.0 {
            swept.min.y += displacement.y;
        } else {
            swept.max.y += displacement.y;
        }
        swept
    }

    /// Expands this AABB to include a point
    #[inline]
    pub fn expand_to_include_point(&mut self, point: Vector2) {
        self.min = self.min.min(&point);
        self.max = self.max.max(&point);
    }
}
