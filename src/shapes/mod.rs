//! Polygon colliders and the preprocessing that turns an outline into collision-ready data.

mod polygon;
mod geometry;
mod triangulate;

pub use self::polygon::{Polygon, signed_area};
pub use self::geometry::{PolygonGeometry, convex_vertices, edge_normals, convex_vertex_normals};
pub use self::triangulate::{triangulate, point_in_triangle};
