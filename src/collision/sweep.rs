use crate::bodies::{DynamicBody, PhysicsBody, StaticBody};
use crate::math::{segment_intersection, Vector2};

/// Contact found by [`sweep_against`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Displacement clipped to end at the first contact
    pub displacement: Vector2,

    /// Contact normal pointing out of the obstacle, towards the mover
    pub normal: Vector2,
}

/// Sweeps `body` by `displacement` against one static obstacle.
///
/// Two passes run after a swept bounding-box cull:
///
/// 1. each convex corner of the mover travels along the displacement and is tested against every
///    obstacle edge that faces the motion and faces the corner;
/// 2. each convex corner of the obstacle travels along the reversed displacement against the
///    mover's edges, which catches obstacle corners poking into a mover edge.
///
/// Every accepted intersection shortens the displacement used by later tests. Ties resolve to the
/// last accepted intersection in iteration order.
pub fn sweep_against(
    body: &DynamicBody,
    obstacle: &StaticBody,
    displacement: Vector2,
    padding: f32,
) -> Option<SweepHit> {
    if !body.swept_bounds(displacement).intersects(&obstacle.world_bounds()) {
        return None;
    }

    let mut hit = None;
    let mut displacement = displacement;

    if let Some((clipped, normal)) = sweep_corners(body, obstacle, displacement, padding) {
        displacement = clipped;
        hit = Some(SweepHit { displacement, normal });
    }

    if let Some((clipped, normal)) = sweep_corners(obstacle, body, -displacement, padding) {
        displacement = -clipped;
        hit = Some(SweepHit { displacement, normal: -normal });
    }

    hit
}

/// Moves the convex corners of `corners` along `sweep` into the edges of `edges`. Returns the
/// shortened sweep and the normal of the edge that shortened it last.
fn sweep_corners(
    corners: &impl PhysicsBody,
    edges: &impl PhysicsBody,
    mut sweep: Vector2,
    padding: f32,
) -> Option<(Vector2, Vector2)> {
    let edge_normals = edges.shape().edge_normals();
    let mut last_normal = None;

    for (vertex, corner_normal) in corners.shape().geometry().convex_corners() {
        let point = corners.world_point(vertex);

        for (edge, edge_normal) in edge_normals.iter().enumerate() {
            // edge faces away from the motion
            if edge_normal.dot(&sweep) > 0.0 {
                continue;
            }
            // corner faces away from the edge
            if edge_normal.dot(&corner_normal) >= 0.0 {
                continue;
            }

            let (start, end) = edges.world_edge(edge);
            if let Ok(contact) = segment_intersection(point, point + sweep, start, end, padding) {
                sweep = contact - point;
                last_normal = Some(*edge_normal);
            }
        }
    }

    last_normal.map(|normal| (sweep, normal))
}
