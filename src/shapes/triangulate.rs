use crate::error::PhysicsError;
use crate::math::{wrap_index, Vector2};
use crate::Result;

/// Splits a clockwise simple polygon into `n - 2` clockwise triangles by ear clipping.
///
/// Triangles are returned as index triples into `points`, in the order the ears were clipped.
/// A candidate ear at vertex `A` with neighbours `B` (previous) and `C` (next) is accepted when
/// `B -> A -> C` turns clockwise and no other remaining vertex lies inside or on the triangle.
///
/// Degenerate or self-intersecting outlines can leave a pass with no ear at all; that is reported
/// as [`PhysicsError::TriangulationFailed`] rather than looping forever.
pub fn triangulate(points: &[Vector2]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(PhysicsError::InvalidPolygon(format!(
            "cannot triangulate {} vertices",
            points.len()
        )));
    }

    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let ear = (0..remaining.len())
            .find(|&i| is_ear(points, &remaining, i))
            .ok_or(PhysicsError::TriangulationFailed { remaining: remaining.len() })?;

        let (prev, current, next) = neighbours(&remaining, ear);
        triangles.push([prev, current, next]);
        remaining.remove(ear);
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);

    Ok(triangles)
}

fn neighbours(remaining: &[usize], i: usize) -> (usize, usize, usize) {
    let len = remaining.len();
    (
        remaining[wrap_index(i as isize - 1, len)],
        remaining[i],
        remaining[wrap_index(i as isize + 1, len)],
    )
}

fn is_ear(points: &[Vector2], remaining: &[usize], i: usize) -> bool {
    let (prev, current, next) = neighbours(remaining, i);
    let a = points[current];
    let b = points[prev];
    let c = points[next];

    // reflex or straight corner
    if (b - a).cross(&(c - a)) <= 0.0 {
        return false;
    }

    !remaining
        .iter()
        .filter(|&&j| j != prev && j != current && j != next)
        .any(|&j| point_in_triangle(points[j], b, a, c))
}

/// Boundary-inclusive containment test for a clockwise triangle `a, b, c`
pub fn point_in_triangle(p: Vector2, a: Vector2, b: Vector2, c: Vector2) -> bool {
    (b - a).cross(&(p - a)) <= 0.0
        && (c - b).cross(&(p - b)) <= 0.0
        && (a - c).cross(&(p - c)) <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::polygon::signed_area;
    use approx::assert_relative_eq;

    fn triangle_area(points: &[Vector2], t: &[usize; 3]) -> f32 {
        signed_area(&[points[t[0]], points[t[1]], points[t[2]]])
    }

    #[test]
    fn square_yields_two_clockwise_triangles() {
        let square = [
            Vector2::new(-1.0, 1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, -1.0),
            Vector2::new(-1.0, -1.0),
        ];
        let triangles = triangulate(&square).unwrap();
        assert_eq!(triangles.len(), 2);

        let total: f32 = triangles.iter().map(|t| triangle_area(&square, t)).sum();
        assert_relative_eq!(total, -4.0);
        for t in &triangles {
            assert!(triangle_area(&square, t) < 0.0);
        }
    }

    #[test]
    fn notched_polygon_preserves_area() {
        let notched = [
            Vector2::new(-2.0, 2.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(2.0, -2.0),
            Vector2::new(-2.0, -2.0),
        ];
        let triangles = triangulate(&notched).unwrap();
        assert_eq!(triangles.len(), 3);

        let total: f32 = triangles.iter().map(|t| triangle_area(&notched, t)).sum();
        assert_relative_eq!(total, signed_area(&notched), epsilon = 1.0e-4);
    }

    #[test]
    fn collinear_outline_fails_instead_of_looping() {
        let line = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(3.0, 0.0),
        ];
        assert_eq!(
            triangulate(&line),
            Err(PhysicsError::TriangulationFailed { remaining: 4 })
        );
    }

    #[test]
    fn containment_includes_boundary() {
        let a = Vector2::new(0.0, 1.0);
        let b = Vector2::new(1.0, 0.0);
        let c = Vector2::new(-1.0, 0.0);
        assert!(point_in_triangle(Vector2::new(0.0, 0.5), a, b, c));
        assert!(point_in_triangle(Vector2::new(0.0, 0.0), a, b, c));
        assert!(!point_in_triangle(Vector2::new(0.0, -0.1), a, b, c));
    }
}
