//! Rotated rectangles defined by center, extents and orientation.
//!
//! Corners are derived on demand from the center, the half extents and the
//! rotation, so repeated queries never accumulate error:
//! ```text
//! corner(right, up) = center + (right, up) * rotation
//! ```

use std::fmt;

use super::{GeometryError, Point, Rotation, Vector};

/// A rectangle, possibly angled, positioned relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    center: Point,
    height: f64,
    width: f64,
    rotation: Rotation,
}

impl Rectangle {
    /// Create a rectangle centered at `center`.
    ///
    /// `rotation` is the counter-clockwise rotation of the whole rectangle
    /// about its own center.
    ///
    /// # Errors
    ///
    /// `GeometryError::InvalidArgument` if `height` or `width` is negative
    /// or not finite.
    pub fn new(
        center: Point,
        height: f64,
        width: f64,
        rotation: Rotation,
    ) -> Result<Self, GeometryError> {
        check_extent("height", height)?;
        check_extent("width", width)?;
        Ok(Self {
            center,
            height,
            width,
            rotation,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Offset `(right, up)` from the center, rotated with the rectangle.
    fn corner(&self, right: f64, up: f64) -> Point {
        self.center + Vector::new(right, up).rotate(self.rotation)
    }

    pub fn upper_left(&self) -> Point {
        self.corner(-self.width / 2.0, self.height / 2.0)
    }

    pub fn upper_right(&self) -> Point {
        self.corner(self.width / 2.0, self.height / 2.0)
    }

    pub fn lower_right(&self) -> Point {
        self.corner(self.width / 2.0, -self.height / 2.0)
    }

    pub fn lower_left(&self) -> Point {
        self.corner(-self.width / 2.0, -self.height / 2.0)
    }

    /// Corners in order: upper-left, upper-right, lower-right, lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.upper_left(),
            self.upper_right(),
            self.lower_right(),
            self.lower_left(),
        ]
    }

    /// Rounded `(x, y)` of each corner, in [`Rectangle::corners`] order.
    pub fn as_euclidean(&self) -> [(f64, f64); 4] {
        self.corners().map(|p| p.as_euclidean())
    }

    /// Vector from the lower-right corner to the upper-left corner.
    pub fn diagonal(&self) -> Vector {
        (self.upper_left() - self.lower_right()).vector()
    }

    /// Length of the diagonal.
    pub fn hypotenuse(&self) -> f64 {
        self.diagonal().magnitude()
    }

    pub fn area(&self) -> f64 {
        self.height * self.width
    }

    /// Smallest axis-aligned rectangle enclosing all four corners.
    ///
    /// The result keeps this rectangle's center rather than the midpoint of
    /// the corner extents. The two agree because the corners are always
    /// symmetric about the center.
    pub fn bounding_box(&self) -> Rectangle {
        let corners = self.corners().map(|p| p.vector());
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for c in corners {
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_y = min_y.min(c.y);
            max_y = max_y.max(c.y);
        }

        Rectangle {
            center: self.center,
            height: max_y - min_y,
            width: max_x - min_x,
            rotation: Rotation::IDENTITY,
        }
    }

    /// Move the rectangle by `offset`.
    pub fn translate(&mut self, offset: Vector) {
        self.center = self.center + offset;
    }

    /// Rotate the rectangle about its own center.
    pub fn rotate(&mut self, rotation: Rotation) {
        self.rotation = self.rotation * rotation;
    }

    /// Rotate the rectangle (position and orientation) about the origin.
    pub fn rotate_from_origin(&mut self, rotation: Rotation) {
        self.center = self.center * rotation;
        self.rotation = self.rotation * rotation;
    }

    /// Rotate the rectangle (position and orientation) about `pivot`.
    pub fn rotate_from_point(&mut self, pivot: Point, rotation: Rotation) {
        self.center = self.center - pivot;
        self.rotate_from_origin(rotation);
        self.center = self.center + pivot;
    }

    /// Scale both extents by `factor` about the center.
    ///
    /// # Errors
    ///
    /// `GeometryError::InvalidArgument` if `factor` is negative or not finite.
    pub fn scale(&mut self, factor: f64) -> Result<(), GeometryError> {
        check_extent("scale factor", factor)?;
        self.height *= factor;
        self.width *= factor;
        Ok(())
    }
}

fn check_extent(name: &str, value: f64) -> Result<(), GeometryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Rectangle center {} height {:.3} width {:.3} rotation {}>",
            self.center, self.height, self.width, self.rotation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(degrees: f64) -> Rectangle {
        Rectangle::new(Point::new(10.0, 10.0), 20.0, 20.0, Rotation::from_degrees(degrees)).unwrap()
    }

    #[test]
    fn test_rectangle_axis_aligned_corners() {
        let rectangle = square(0.0);
        assert_eq!(rectangle.upper_left().as_euclidean(), (0.0, 20.0));
        assert_eq!(rectangle.lower_left().as_euclidean(), (0.0, 0.0));
        assert_eq!(rectangle.lower_right().as_euclidean(), (20.0, 0.0));
        assert_eq!(rectangle.upper_right().as_euclidean(), (20.0, 20.0));
    }

    #[test]
    fn test_rectangle_fifteen_degrees() {
        let rectangle = square(15.0);
        assert_eq!(rectangle.center().as_euclidean(), (10.0, 10.0));
        assert_eq!(rectangle.upper_left().as_euclidean(), (-2.247, 17.071));
        assert_eq!(rectangle.lower_right().as_euclidean(), (22.247, 2.929));
        assert_eq!(rectangle.lower_left().as_euclidean(), (2.929, -2.247));
        assert_eq!(rectangle.upper_right().as_euclidean(), (17.071, 22.247));
    }

    #[test]
    fn test_zero_and_full_turn_match() {
        assert_eq!(square(0.0).as_euclidean(), square(360.0).as_euclidean());
    }

    #[test]
    fn test_corners_do_not_drift() {
        let rectangle = square(15.0);
        let first = rectangle.corners();
        for _ in 0..100 {
            assert_eq!(rectangle.corners(), first);
        }
    }

    #[test]
    fn test_bounding_box_of_unrotated_is_identity() {
        let rectangle = Rectangle::new(Point::new(3.0, -4.0), 6.0, 10.0, Rotation::IDENTITY).unwrap();
        let bbox = rectangle.bounding_box();
        assert_eq!(bbox.center(), rectangle.center());
        assert_eq!(bbox.height(), 6.0);
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.as_euclidean(), rectangle.as_euclidean());
    }

    #[test]
    fn test_bounding_box_of_square_bbox_corners() {
        let bbox = square(0.0).bounding_box();
        assert_eq!(bbox.upper_left().as_euclidean(), (0.0, 20.0));
        assert_eq!(bbox.lower_left().as_euclidean(), (0.0, 0.0));
        assert_eq!(bbox.lower_right().as_euclidean(), (20.0, 0.0));
        assert_eq!(bbox.upper_right().as_euclidean(), (20.0, 20.0));
    }

    #[test]
    fn test_bounding_box_of_rotated_square() {
        let bbox = square(45.0).bounding_box();
        let expected = 20.0 * std::f64::consts::SQRT_2;
        assert!((bbox.width() - expected).abs() < 1e-9);
        assert!((bbox.height() - expected).abs() < 1e-9);
        assert_eq!(bbox.rotation(), Rotation::IDENTITY);
        assert_eq!(bbox.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_area_and_hypotenuse() {
        let rectangle = Rectangle::new(Point::origin(), 3.0, 4.0, Rotation::from_degrees(30.0)).unwrap();
        assert_eq!(rectangle.area(), 12.0);
        assert!((rectangle.hypotenuse() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_extent_rejected() {
        let result = Rectangle::new(Point::origin(), -1.0, 4.0, Rotation::IDENTITY);
        assert!(matches!(result, Err(GeometryError::InvalidArgument(_))));

        let result = Rectangle::new(Point::origin(), 1.0, f64::NAN, Rotation::IDENTITY);
        assert!(matches!(result, Err(GeometryError::InvalidArgument(_))));
    }

    #[test]
    fn test_translate() {
        let mut rectangle = square(0.0);
        rectangle.translate(Vector::new(5.0, -10.0));
        assert_eq!(rectangle.center().as_euclidean(), (15.0, 0.0));
        assert_eq!(rectangle.upper_left().as_euclidean(), (5.0, 10.0));
    }

    #[test]
    fn test_rotate_in_place_keeps_center() {
        let mut rectangle = square(0.0);
        rectangle.rotate(Rotation::from_degrees(15.0));
        assert_eq!(rectangle.center().as_euclidean(), (10.0, 10.0));
        assert_eq!(rectangle.as_euclidean(), square(15.0).as_euclidean());
    }

    #[test]
    fn test_rotate_from_origin() {
        let mut rectangle = square(0.0);
        rectangle.rotate_from_origin(Rotation::from_degrees(90.0));
        assert_eq!(rectangle.center().as_euclidean(), (-10.0, 10.0));
        assert!((rectangle.rotation().degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_from_point() {
        let mut rectangle = square(0.0);
        rectangle.rotate_from_point(Point::new(10.0, 0.0), Rotation::from_degrees(180.0));
        assert_eq!(rectangle.center().as_euclidean(), (10.0, -10.0));

        // Rotating about its own center is the same as rotate()
        let mut about_center = square(0.0);
        about_center.rotate_from_point(Point::new(10.0, 10.0), Rotation::from_degrees(15.0));
        assert_eq!(about_center.as_euclidean(), square(15.0).as_euclidean());
    }

    #[test]
    fn test_scale() {
        let mut rectangle = square(0.0);
        rectangle.scale(0.5).unwrap();
        assert_eq!(rectangle.upper_left().as_euclidean(), (5.0, 15.0));
        assert!(rectangle.scale(-2.0).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
