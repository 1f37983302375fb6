mod vector;
mod aabb;
mod segment;

pub use vector::Vector2;
pub use aabb::Aabb;
pub use segment::{segment_intersection, SegmentMiss};

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Clamps a value between a minimum and maximum value
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn saturate(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        clamp(value, 0.0, 1.0)
    }
}

/// Linearly interpolates between two values
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Maps any signed index onto `0..len` with wrap-around, so `-1` is the last element and `len` is
/// the first. `len` must be non-zero.
#[inline]
pub fn wrap_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0, "wrap_index on empty sequence");
    index.rem_euclid(len as isize) as usize
}

/// Cyclic access for polygon-like sequences
pub trait Cyclic<T> {
    /// Returns the element at `index`, wrapping around in both directions
    fn wrapped(&self, index: isize) -> &T;
}

impl<T> Cyclic<T> for [T] {
    #[inline]
    fn wrapped(&self, index: isize) -> &T {
        &self[wrap_index(index, self.len())]
    }
}
