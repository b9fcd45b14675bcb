//! Vector, point and rotation value types.
//!
//! All three share the same two-component representation but carry
//! different meaning, so they are distinct types rather than aliases:
//! a [`Point`] cannot be passed where a [`Rotation`] is expected, and a
//! [`Rotation`] can only be built with unit magnitude.
//!
//! Rotating a vector uses the standard rotation matrix:
//! ```text
//! x' = x * cos(θ) - y * sin(θ)
//! y' = x * sin(θ) + y * cos(θ)
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{round_to, GeometryError, UNIT_TOLERANCE};

/// A magnitude and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector::new(0.0, 0.0);

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction in radians, in (-π, π].
    pub fn radians(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Direction in degrees, in (-180, 180].
    pub fn degrees(&self) -> f64 {
        self.radians().to_degrees()
    }

    /// Rotate this vector by `rotation`, keeping its magnitude.
    pub fn rotate(self, rotation: Rotation) -> Vector {
        let (cos, sin) = (rotation.cos(), rotation.sin());
        Vector::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Complex product: magnitudes multiply, angles add.
    pub fn multiply(self, other: Vector) -> Vector {
        Vector::new(
            self.x * other.x - self.y * other.y,
            self.x * other.y + self.y * other.x,
        )
    }

    /// `(magnitude, radians)`
    pub fn as_polar_radians(&self) -> (f64, f64) {
        (self.magnitude(), self.radians())
    }

    /// `(magnitude, degrees)`
    pub fn as_polar_degrees(&self) -> (f64, f64) {
        (self.magnitude(), self.degrees())
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul for Vector {
    type Output = Vector;
    fn mul(self, other: Vector) -> Vector {
        self.multiply(other)
    }
}

impl Mul<Rotation> for Vector {
    type Output = Vector;
    fn mul(self, rotation: Rotation) -> Vector {
        self.rotate(rotation)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, scalar: f64) -> Vector {
        Vector::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, scalar: f64) -> Vector {
        Vector::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Vector r:{:.3} theta:{:.3}>", self.magnitude(), self.degrees())
    }
}

/// A position relative to the origin.
///
/// Arithmetic keeps the left operand's kind: `Point + Vector`,
/// `Point - Point` and `Point * Rotation` all produce a `Point`.
/// The `x()`/`y()` accessors round to three decimal digits; use
/// [`Point::vector`] for the exact components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(Vector);

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point(Vector::new(x, y))
    }

    pub const fn origin() -> Self {
        Point(Vector::ZERO)
    }

    /// The displacement from the origin to this point.
    pub fn vector(&self) -> Vector {
        self.0
    }

    /// X coordinate rounded to 3 decimal digits.
    pub fn x(&self) -> f64 {
        round_to(self.0.x, 3)
    }

    /// Y coordinate rounded to 3 decimal digits.
    pub fn y(&self) -> f64 {
        round_to(self.0.y, 3)
    }

    /// Rounded `(x, y)`.
    pub fn as_euclidean(&self) -> (f64, f64) {
        (self.x(), self.y())
    }

    pub fn magnitude(&self) -> f64 {
        self.0.magnitude()
    }

    pub fn radians(&self) -> f64 {
        self.0.radians()
    }

    pub fn degrees(&self) -> f64 {
        self.0.degrees()
    }

    pub fn as_polar_radians(&self) -> (f64, f64) {
        self.0.as_polar_radians()
    }

    pub fn as_polar_degrees(&self) -> (f64, f64) {
        self.0.as_polar_degrees()
    }
}

impl From<Vector> for Point {
    fn from(vector: Vector) -> Self {
        Point(vector)
    }
}

impl From<Point> for Vector {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point(self.0 + other.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Point {
        Point(self.0 + other)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point(self.0 - other.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, other: Vector) -> Point {
        Point(self.0 - other)
    }
}

impl Mul<Rotation> for Point {
    type Output = Point;
    fn mul(self, rotation: Rotation) -> Point {
        Point(self.0.rotate(rotation))
    }
}

impl Mul<Vector> for Point {
    type Output = Point;
    fn mul(self, other: Vector) -> Point {
        Point(self.0 * other)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, scalar: f64) -> Point {
        Point(self.0 * scalar)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point(-self.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Point x:{:.3} y:{:.3}>", self.x(), self.y())
    }
}

/// A pure rotation, stored as the unit vector `(cos θ, sin θ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Vector);

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Rotation = Rotation(Vector::new(1.0, 0.0));

    /// Create a rotation of `radians` counter-clockwise.
    pub fn from_radians(radians: f64) -> Self {
        Rotation(Vector::new(radians.cos(), radians.sin()))
    }

    /// Create a rotation of `degrees` counter-clockwise.
    ///
    /// The angle is first normalized into [0, 360), so 0 and 360 give
    /// the same rotation.
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.rem_euclid(360.0).to_radians())
    }

    /// Use an existing vector as a rotation.
    ///
    /// # Errors
    ///
    /// `GeometryError::InvalidRotation` if the magnitude is not 1 (within
    /// [`UNIT_TOLERANCE`]). A vector lying on the positive x axis is
    /// accepted regardless of length.
    pub fn from_vector(vector: Vector) -> Result<Self, GeometryError> {
        let magnitude = vector.magnitude();
        if (magnitude - 1.0).abs() > UNIT_TOLERANCE && vector.radians() != 0.0 {
            return Err(GeometryError::InvalidRotation {
                magnitude,
                degrees: vector.degrees(),
            });
        }
        Ok(Rotation(vector))
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.0.y
    }

    pub fn radians(&self) -> f64 {
        self.0.radians()
    }

    pub fn degrees(&self) -> f64 {
        self.0.degrees()
    }

    pub fn magnitude(&self) -> f64 {
        self.0.magnitude()
    }

    pub fn as_vector(&self) -> Vector {
        self.0
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::IDENTITY
    }
}

impl TryFrom<Vector> for Rotation {
    type Error = GeometryError;

    fn try_from(vector: Vector) -> Result<Self, Self::Error> {
        Rotation::from_vector(vector)
    }
}

/// Composing two rotations adds their angles.
impl Mul for Rotation {
    type Output = Rotation;
    fn mul(self, other: Rotation) -> Rotation {
        Rotation(self.0.rotate(other))
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Rotation m:{:.3} theta:{:.3} degrees>", self.magnitude(), self.degrees())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Difference between two angles in degrees, folded into [0, 180].
    fn angle_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    proptest! {
        /// Property: composing rotations adds their angles modulo 360.
        #[test]
        fn prop_rotation_composition_adds_angles(
            a in -720.0f64..720.0,
            b in -720.0f64..720.0,
        ) {
            let r1 = Rotation::from_degrees(a);
            let r2 = Rotation::from_degrees(b);
            let composed = r1 * r2;

            prop_assert!(
                angle_distance(composed.degrees(), r1.degrees() + r2.degrees()) < 1e-6,
                "{} + {} gave {}",
                r1.degrees(),
                r2.degrees(),
                composed.degrees()
            );
            prop_assert!((composed.magnitude() - 1.0).abs() < UNIT_TOLERANCE);
        }

        /// Property: rotation preserves magnitude.
        #[test]
        fn prop_rotation_preserves_magnitude(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            degrees in -360.0f64..360.0,
        ) {
            let v = Vector::new(x, y);
            let rotated = v.rotate(Rotation::from_degrees(degrees));
            prop_assert!((rotated.magnitude() - v.magnitude()).abs() < 1e-9 * (1.0 + v.magnitude()));
        }

        /// Property: every rotation built from an angle passes the unit check.
        #[test]
        fn prop_from_degrees_is_valid_rotation(degrees in -1080.0f64..1080.0) {
            let r = Rotation::from_degrees(degrees);
            prop_assert!(Rotation::from_vector(r.as_vector()).is_ok());
        }

        /// Property: angles a full turn apart give the same rotation.
        #[test]
        fn prop_full_turn_is_identity(degrees in 0.0f64..360.0) {
            let a = Rotation::from_degrees(degrees);
            let b = Rotation::from_degrees(degrees + 360.0);
            prop_assert!((a.cos() - b.cos()).abs() < 1e-9);
            prop_assert!((a.sin() - b.sin()).abs() < 1e-9);
        }
    }
}
