//! Planar point and loop utilities shared by every engine.
//!
//! Points are `glam` double precision vectors. A [`Loop`] is an implicitly
//! closed sequence of points whose winding is always computed from the point
//! order, never stored.

pub mod loops;

pub use glam::DVec2 as Point2;
pub use glam::DVec3 as Point3;
pub use loops::*;

/// An ordered, implicitly closed polygon boundary.
pub type Loop = Vec<Point2>;

/// Multiplies two points as complex numbers.
///
/// # Examples
/// ```
/// use slice_kernel::geometry::{complex_mul, Point2};
///
/// let i = Point2::new(0.0, 1.0);
/// assert_eq!(complex_mul(i, i), Point2::new(-1.0, 0.0));
/// ```
#[inline]
pub fn complex_mul(a: Point2, b: Point2) -> Point2 {
    Point2::new(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x)
}

/// Principal square root of a point treated as a complex number.
///
/// # Examples
/// ```
/// use slice_kernel::geometry::{complex_sqrt, Point2};
///
/// let root = complex_sqrt(Point2::new(-1.0, 0.0));
/// assert!((root - Point2::new(0.0, 1.0)).length() < 1e-12);
/// ```
pub fn complex_sqrt(a: Point2) -> Point2 {
    let length = a.length();
    if length == 0.0 {
        return Point2::ZERO;
    }
    let angle = a.y.atan2(a.x) * 0.5;
    let (sin, cos) = angle.sin_cos();
    Point2::new(cos, sin) * length.sqrt()
}

/// Rotates a direction a quarter turn clockwise.
#[inline]
pub fn clockwise_quarter(v: Point2) -> Point2 {
    Point2::new(v.y, -v.x)
}

#[cfg(test)]
mod tests;
