use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

use nalgebra as na;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Zoom of a freshly created camera, as a power of two
pub const DEFAULT_ZOOM: f32 = -9.5;

/// Size of the render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// A 2D camera looking at `position`, with a logarithmic zoom.
///
/// The scale factor is `2^zoom`. The shorter viewport side always spans `2 / 2^zoom` world units,
/// so pixels stay square for any aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Camera {
    pub position: Vector2,
    zoom: f32,
}

impl Camera {
    pub fn new(position: Vector2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Linear scale, `2^zoom`
    pub fn scale(&self) -> f32 {
        self.zoom.exp2()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Changes the zoom while keeping the world point `center` fixed on screen
    pub fn set_zoom_on_point(&mut self, zoom: f32, center: Vector2) {
        let factor = (zoom - self.zoom).exp2();
        self.zoom = zoom;
        self.position = self.position.lerp(&center, (factor - 1.0) / factor);
    }

    /// Builds the transforms for a viewport. Fails on an empty viewport.
    pub fn matrices(&self, viewport: Viewport) -> Result<CameraMatrices> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "viewport must be non-empty, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        let scale = self.scale();
        let aspect = viewport.aspect();
        let (sx, sy) = if aspect < 1.0 {
            (scale, scale * aspect)
        } else {
            (scale / aspect, scale)
        };

        #[rustfmt::skip]
        let world_to_ndc = na::Matrix3::new(
            sx,  0.0, -self.position.x * sx,
            0.0, sy,  -self.position.y * sy,
            0.0, 0.0, 1.0,
        );

        let half_width = viewport.width as f32 * 0.5;
        let half_height = viewport.height as f32 * 0.5;
        // pixel rows grow downwards
        #[rustfmt::skip]
        let ndc_to_pixel = na::Matrix3::new(
            half_width, 0.0,          half_width,
            0.0,        -half_height, half_height,
            0.0,        0.0,          1.0,
        );

        let world_to_pixel = ndc_to_pixel * world_to_ndc;
        let pixel_to_world = world_to_pixel.try_inverse().ok_or_else(|| {
            PhysicsError::InvalidParameter(format!("camera zoom {} is not invertible", self.zoom))
        })?;

        Ok(CameraMatrices {
            world_to_ndc,
            world_to_pixel,
            pixel_to_world,
            pixels_per_unit: scale * 0.5 * viewport.width.min(viewport.height) as f32,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector2::ZERO, DEFAULT_ZOOM)
    }
}

/// Homogeneous 2D transforms derived from a [`Camera`] and a [`Viewport`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub world_to_ndc: na::Matrix3<f32>,
    pub world_to_pixel: na::Matrix3<f32>,
    pub pixel_to_world: na::Matrix3<f32>,
    pub pixels_per_unit: f32,
}

impl CameraMatrices {
    pub fn to_ndc(&self, world: Vector2) -> Vector2 {
        transform(&self.world_to_ndc, world)
    }

    pub fn to_pixel(&self, world: Vector2) -> Vector2 {
        transform(&self.world_to_pixel, world)
    }

    pub fn to_world(&self, pixel: Vector2) -> Vector2 {
        transform(&self.pixel_to_world, pixel)
    }
}

fn transform(matrix: &na::Matrix3<f32>, point: Vector2) -> Vector2 {
    Vector2::from_point(&matrix.transform_point(&point.to_point()))
}
