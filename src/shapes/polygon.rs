use crate::error::PhysicsError;
use crate::math::{Aabb, Cyclic, Vector2};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A simple polygon with clockwise winding (y pointing up) and no explicit closing point.
///
/// Construction rejects input the preprocessing stages cannot handle: fewer than three points,
/// non-finite coordinates, zero-length edges, and counter-clockwise or zero-area outlines.
/// Self-intersection is not detected here; it surfaces as a triangulation failure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Polygon {
    points: Vec<Vector2>,
}

impl Polygon {
    /// Creates a polygon from clockwise points
    pub fn new(points: impl Into<Vec<Vector2>>) -> Result<Self> {
        let points = points.into();

        if points.len() < 3 {
            return Err(PhysicsError::InvalidPolygon(format!(
                "a polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PhysicsError::InvalidPolygon(format!(
                "vertex {} is not finite: {}",
                index, points[index]
            )));
        }

        for i in 0..points.len() {
            let next = points.wrapped(i as isize + 1);
            if (*next - points[i]).try_normalize().is_none() {
                return Err(PhysicsError::InvalidPolygon(format!(
                    "edge {} has zero length at {}",
                    i, points[i]
                )));
            }
        }

        let polygon = Self { points };
        let signed_area = polygon.signed_area();
        if signed_area >= 0.0 {
            return Err(PhysicsError::InvalidPolygon(format!(
                "vertices must wind clockwise with non-zero area (signed area {})",
                signed_area
            )));
        }

        Ok(polygon)
    }

    /// Axis-aligned rectangle centred on the origin
    pub fn rectangle(half_width: f32, half_height: f32) -> Result<Self> {
        Self::new(vec![
            Vector2::new(-half_width, half_height),
            Vector2::new(half_width, half_height),
            Vector2::new(half_width, -half_height),
            Vector2::new(-half_width, -half_height),
        ])
    }

    /// Regular polygon centred on the origin with its first vertex pointing up
    pub fn regular(sides: usize, radius: f32) -> Result<Self> {
        let step = std::f32::consts::TAU / sides.max(1) as f32;
        let points = (0..sides)
            .map(|i| {
                // clockwise: angles decrease
                let angle = std::f32::consts::FRAC_PI_2 - step * i as f32;
                Vector2::new(angle.cos(), angle.sin()) * radius
            })
            .collect::<Vec<_>>();
        Self::new(points)
    }

    /// Returns the vertices
    #[inline]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    /// Returns the number of vertices (and edges)
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a constructed polygon has at least three vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the vertex at `index`, wrapping around
    #[inline]
    pub fn vertex(&self, index: isize) -> Vector2 {
        *self.points.wrapped(index)
    }

    /// Returns the endpoints of edge `index`, which runs from vertex `index` to vertex `index + 1`
    #[inline]
    pub fn edge(&self, index: usize) -> (Vector2, Vector2) {
        (self.points[index], self.vertex(index as isize + 1))
    }

    /// Shoelace area; negative for clockwise winding
    pub fn signed_area(&self) -> f32 {
        signed_area(&self.points)
    }

    /// Unsigned enclosed area
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Local-space bounding box
    pub fn bounds(&self) -> Aabb {
        // at least three points are guaranteed
        Aabb::from_points(&self.points).unwrap_or(Aabb::new(Vector2::ZERO, Vector2::ZERO))
    }
}

impl Default for Polygon {
    /// The unit square with one corner at the origin
    fn default() -> Self {
        Self {
            points: vec![Vector2::unit_y(), Vector2::one(), Vector2::unit_x(), Vector2::zero()],
        }
    }
}

/// Shoelace area of a closed outline; negative for clockwise winding
pub fn signed_area(points: &[Vector2]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    let twice: f32 = (0..points.len())
        .map(|i| points[i].cross(points.wrapped(i as isize + 1)))
        .sum();
    twice * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_input() {
        assert!(Polygon::new(vec![Vector2::zero(), Vector2::unit_x()]).is_err());
        assert!(Polygon::new(vec![
            Vector2::new(0.0, 1.0),
            Vector2::new(f32::INFINITY, 1.0),
            Vector2::new(1.0, 0.0),
        ])
        .is_err());
        // repeated point
        assert!(Polygon::new(vec![
            Vector2::new(0.0, 1.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 0.0),
        ])
        .is_err());
        // counter-clockwise
        assert!(Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ])
        .is_err());
        // collinear, zero area
        assert!(Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
        ])
        .is_err());
    }

    #[test]
    fn helpers_wind_clockwise() {
        let rect = Polygon::rectangle(2.0, 1.0).unwrap();
        assert_relative_eq!(rect.signed_area(), -8.0);

        let hexagon = Polygon::regular(6, 1.0).unwrap();
        assert!(hexagon.signed_area() < 0.0);
        assert_relative_eq!(hexagon.vertex(0), Vector2::new(0.0, 1.0), epsilon = 1.0e-6);

        assert_relative_eq!(Polygon::default().signed_area(), -1.0);
    }
}
