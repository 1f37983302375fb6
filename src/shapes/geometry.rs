use crate::error::PhysicsError;
use crate::math::{Aabb, Cyclic, Vector2};
use crate::shapes::{triangulate, Polygon};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Derived data for a polygon collider, computed once at body construction and never updated.
///
/// All indices refer to the vertex list of the source [`Polygon`]. Edge `i` runs from vertex `i`
/// to vertex `i + 1`; `edge_normals[i]` is its outward unit normal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PolygonGeometry {
    /// Local-space bounding box
    pub bounds: Aabb,

    /// Indices of convex corners, in vertex order
    pub convex_vertices: Vec<usize>,

    /// Outward unit normal of every edge
    pub edge_normals: Vec<Vector2>,

    /// Outward unit normal of every convex corner, parallel to `convex_vertices`
    pub convex_normals: Vec<Vector2>,

    /// Clockwise triangles covering the polygon
    pub triangles: Vec<[usize; 3]>,
}

impl PolygonGeometry {
    /// Runs every preprocessing stage on a validated polygon
    pub fn compute(polygon: &Polygon) -> Result<Self> {
        let points = polygon.points();

        let convex_vertices = convex_vertices(points);
        let edge_normals = edge_normals(points)?;
        let convex_normals = convex_vertex_normals(&edge_normals, &convex_vertices)?;
        let triangles = triangulate(points)?;

        Ok(Self {
            bounds: polygon.bounds(),
            convex_vertices,
            edge_normals,
            convex_normals,
            triangles,
        })
    }

    /// Iterates `(vertex index, corner normal)` for every convex corner
    pub fn convex_corners(&self) -> impl Iterator<Item = (usize, Vector2)> + '_ {
        self.convex_vertices
            .iter()
            .copied()
            .zip(self.convex_normals.iter().copied())
    }
}

/// Indices of the vertices where a clockwise outline turns right
pub fn convex_vertices(points: &[Vector2]) -> Vec<usize> {
    (0..points.len())
        .filter(|&i| {
            let i = i as isize;
            let incoming = points[i as usize] - *points.wrapped(i - 1);
            let outgoing = *points.wrapped(i + 1) - points[i as usize];
            incoming.cross(&outgoing) < 0.0
        })
        .collect()
}

/// Outward unit normal of every edge of a clockwise outline
pub fn edge_normals(points: &[Vector2]) -> Result<Vec<Vector2>> {
    (0..points.len())
        .map(|i| {
            let next = *points.wrapped(i as isize + 1);
            (points[i] - next)
                .try_normalize()
                .map(|direction| direction.rotate_cw90())
                .ok_or_else(|| {
                    PhysicsError::InvalidPolygon(format!("edge {} has zero length", i))
                })
        })
        .collect()
}

/// Normalized sum of the two edge normals meeting at each convex corner
pub fn convex_vertex_normals(edge_normals: &[Vector2], convex_vertices: &[usize]) -> Result<Vec<Vector2>> {
    convex_vertices
        .iter()
        .map(|&i| {
            let incoming = *edge_normals.wrapped(i as isize - 1);
            (edge_normals[i] + incoming).try_normalize().ok_or_else(|| {
                PhysicsError::InvalidPolygon(format!("vertex {} folds back onto itself", i))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_normals_point_outward() {
        let square = Polygon::rectangle(1.0, 1.0).unwrap();
        let geometry = PolygonGeometry::compute(&square).unwrap();

        // edges: top, right, bottom, left
        assert_relative_eq!(geometry.edge_normals[0], Vector2::new(0.0, 1.0));
        assert_relative_eq!(geometry.edge_normals[1], Vector2::new(1.0, 0.0));
        assert_relative_eq!(geometry.edge_normals[2], Vector2::new(0.0, -1.0));
        assert_relative_eq!(geometry.edge_normals[3], Vector2::new(-1.0, 0.0));

        assert_eq!(geometry.convex_vertices, vec![0, 1, 2, 3]);
        let diagonal = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(geometry.convex_normals[0], Vector2::new(-diagonal, diagonal), epsilon = 1.0e-6);
        assert_relative_eq!(geometry.convex_normals[2], Vector2::new(diagonal, -diagonal), epsilon = 1.0e-6);
    }

    #[test]
    fn notch_is_not_convex() {
        let notched = Polygon::new(vec![
            Vector2::new(-2.0, 2.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(2.0, -2.0),
            Vector2::new(-2.0, -2.0),
        ])
        .unwrap();
        let geometry = PolygonGeometry::compute(&notched).unwrap();

        assert_eq!(geometry.convex_vertices, vec![0, 2, 3, 4]);
        assert_eq!(geometry.convex_normals.len(), 4);
        assert_eq!(geometry.triangles.len(), 3);
        assert_eq!(geometry.bounds.min, Vector2::new(-2.0, -2.0));
    }
}
