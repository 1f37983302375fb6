use crate::bodies::Color;
use crate::core::{BodyId, BodyKind, FrameSample};
use crate::math::Vector2;

/// One body ready to draw: world-space vertices and the triangle list indexing them
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPolygon {
    pub id: BodyId,
    pub kind: BodyKind,
    pub vertices: Vec<Vector2>,
    pub triangles: Vec<[usize; 3]>,
    pub color: Color,
}

/// Turns a frame sample into draw polygons.
///
/// Static bodies come from the current snapshot. Dynamic bodies are placed at the position blended
/// between both snapshots and drawn with the current collider; a dynamic body present in only one
/// of the two snapshots is skipped for this frame.
pub fn extract(sample: &FrameSample) -> Vec<DrawPolygon> {
    let statics = sample.current.statics.iter().map(|(id, body)| DrawPolygon {
        id: *id,
        kind: BodyKind::Static,
        vertices: body.world_vertices(),
        triangles: body.triangles.clone(),
        color: body.color,
    });

    let dynamics = sample.current.dynamics.iter().filter_map(|(id, body)| {
        let position = sample.dynamic_position(*id)?;
        Some(DrawPolygon {
            id: *id,
            kind: BodyKind::Dynamic,
            vertices: body.vertices_at(position),
            triangles: body.triangles.clone(),
            color: body.color,
        })
    });

    statics.chain(dynamics).collect()
}

/// Vertex layout for an indexed triangle batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Flattens draw polygons into one vertex buffer and one `u32` index buffer
#[derive(Debug, Clone, Default)]
pub struct DrawBatch {
    vertices: Vec<DrawVertex>,
    indices: Vec<u32>,
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn push(&mut self, polygon: &DrawPolygon) {
        let base = self.vertices.len() as u32;
        let color = polygon.color.to_f32_array();

        self.vertices.extend(polygon.vertices.iter().map(|v| DrawVertex {
            position: (*v).into(),
            color,
        }));
        self.indices.extend(
            polygon
                .triangles
                .iter()
                .flat_map(|triangle| triangle.iter().map(move |i| base + *i as u32)),
        );
    }

    pub fn extend<'a>(&mut self, polygons: impl IntoIterator<Item = &'a DrawPolygon>) {
        for polygon in polygons {
            self.push(polygon);
        }
    }

    pub fn vertices(&self) -> &[DrawVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
