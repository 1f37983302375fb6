use crate::math::{Aabb, Vector2};

/// Why two finite segments failed to produce an intersection point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMiss {
    /// The bounding boxes of the two segments do not overlap
    Disjoint,

    /// The segments are parallel or collinear
    Parallel,

    /// The supporting lines cross outside of the (padded) segments
    OutOfRange,
}

/// Intersects the finite segment `a -> b` with the finite segment `c -> d`.
///
/// Both segments are parametrized by signed areas: the crossing lies at `a + t * (b - a)` and at
/// `c + u * (d - c)`. The crossing is accepted when both `t` and `u` lie in
/// `[-padding, 1 + padding]`, which absorbs floating-point error for contacts that start exactly on
/// an edge. The returned point always lies on the supporting line of `a -> b`.
///
/// The bounding-box rejection is not padded, so collinear-touching configurations with zero-width
/// boxes still pass through to the parametric test.
pub fn segment_intersection(
    a: Vector2,
    b: Vector2,
    c: Vector2,
    d: Vector2,
    padding: f32,
) -> Result<Vector2, SegmentMiss> {
    if !Aabb::from_segment(a, b).intersects(&Aabb::from_segment(c, d)) {
        return Err(SegmentMiss::Disjoint);
    }

    let ab = b - a;
    let cd = d - c;
    let determinant = ab.cross(&cd);
    if determinant == 0.0 {
        return Err(SegmentMiss::Parallel);
    }

    let ac = c - a;
    let t = ac.cross(&cd) / determinant;
    let u = ac.cross(&ab) / determinant;

    let range = -padding..=1.0 + padding;
    if range.contains(&t) && range.contains(&u) {
        Ok(a + ab * t)
    } else {
        Err(SegmentMiss::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crossing_segments_meet() {
        let hit = segment_intersection(
            Vector2::new(1.0, 2.0),
            Vector2::new(1.0, -3.0),
            Vector2::new(-100.0, 0.0),
            Vector2::new(100.0, 0.0),
            0.05,
        );
        assert_relative_eq!(hit.unwrap(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn parallel_segments_are_rejected() {
        let miss = segment_intersection(
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(3.0, 0.0),
            0.05,
        );
        assert_eq!(miss, Err(SegmentMiss::Parallel));
    }

    #[test]
    fn padding_accepts_near_misses() {
        // stops short of the edge: the unpadded box test rejects it
        let a = Vector2::new(0.0, 1.0);
        let b = Vector2::new(0.0, 0.02);
        let c = Vector2::new(-1.0, 0.0);
        let d = Vector2::new(1.0, 0.0);
        assert_eq!(segment_intersection(a, b, c, d, 0.05), Err(SegmentMiss::Disjoint));

        // boxes touch, but the lines cross at t = 1.02 along a -> b
        let b = Vector2::new(0.0, 0.0);
        let c = Vector2::new(-1.0, -0.04);
        let d = Vector2::new(1.0, 0.0);
        assert!(segment_intersection(a, b, c, d, 0.05).is_ok());
        assert_eq!(segment_intersection(a, b, c, d, 0.0), Err(SegmentMiss::OutOfRange));
    }
}
