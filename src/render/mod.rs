//! Consumer-side helpers: a 2D camera and extraction of interpolated draw data from snapshots.

mod camera;
mod extract;

pub use self::camera::{Camera, CameraMatrices, Viewport, DEFAULT_ZOOM};
pub use self::extract::{extract, DrawBatch, DrawPolygon, DrawVertex};
