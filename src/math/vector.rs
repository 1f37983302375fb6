use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// 2D vector with y pointing up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    /// A zero vector constant
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new 2D vector
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Creates a new 2D vector with all components set to one
    #[inline]
    pub fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    /// Creates a unit vector pointing in the x direction
    #[inline]
    pub fn unit_x() -> Self {
        Self { x: 1.0, y: 0.0 }
    }

    /// Creates a unit vector pointing in the y direction
    #[inline]
    pub fn unit_y() -> Self {
        Self { x: 0.0, y: 1.0 }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the z component of the 3D cross product of two 2D vectors.
    ///
    /// Negative when `other` turns clockwise from `self` (y pointing up).
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or `None` when the vector is too short or not finite
    /// to have one
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        let length = self.length();
        (length > crate::math::EPSILON && length.is_finite()).then(|| *self / length)
    }

    /// Like [`try_normalize`](Self::try_normalize), leaving degenerate vectors unchanged
    #[inline]
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or(*self)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the vector 90 degrees clockwise (y pointing up)
    #[inline]
    pub fn rotate_cw90(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Removes the component along `normal`, leaving the part of the vector that lies on the
    /// line `normal` is perpendicular to. `normal` must be unit length.
    #[inline]
    pub fn project_on_line(&self, normal: &Self) -> Self {
        *self - *normal * normal.dot(self)
    }

    /// Largest absolute component
    #[inline]
    pub fn max_abs_component(&self) -> f32 {
        self.x.abs().max(self.y.abs())
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }

    /// Convert to a nalgebra point, for use with homogeneous transforms
    #[inline]
    pub fn to_point(&self) -> na::Point2<f32> {
        na::Point2::new(self.x, self.y)
    }

    /// Convert from a nalgebra point
    #[inline]
    pub fn from_point(p: &na::Point2<f32>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<[f32; 2]> for Vector2 {
    #[inline]
    fn from(array: [f32; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl From<(f32, f32)> for Vector2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for [f32; 2] {
    #[inline]
    fn from(vector: Vector2) -> Self {
        [vector.x, vector.y]
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl AbsDiffEq for Vector2 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

macro_rules! componentwise {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident) => {
        impl $op for Vector2 {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::new(self.x.$method(rhs.x), self.y.$method(rhs.y))
            }
        }

        impl $assign_op for Vector2 {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = (*self).$method(rhs);
            }
        }
    };
}

macro_rules! scalar {
    ($op:ident, $method:ident) => {
        impl $op<f32> for Vector2 {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: f32) -> Self {
                Self::new(self.x.$method(rhs), self.y.$method(rhs))
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign);
componentwise!(Sub, sub, SubAssign, sub_assign);
scalar!(Mul, mul);
scalar!(Div, div);

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
