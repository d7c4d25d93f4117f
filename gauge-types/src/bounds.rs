//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use gauge_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f32>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include_point(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f32>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include_point(point);
        }
        aabb
    }

    /// Create the bounding box of a triangle given by its three vertices.
    #[must_use]
    pub fn from_triangle(v0: &Point3<f32>, v1: &Point3<f32>, v2: &Point3<f32>) -> Self {
        Self {
            min: Point3::new(
                v0.x.min(v1.x).min(v2.x),
                v0.y.min(v1.y).min(v2.y),
                v0.z.min(v1.z).min(v2.z),
            ),
            max: Point3::new(
                v0.x.max(v1.x).max(v2.x),
                v0.y.max(v1.y).max(v2.y),
                v0.z.max(v1.z).max(v2.z),
            ),
        }
    }

    /// Check if the AABB is empty (has no valid volume).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn expand_to_include_point(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Expand this AABB to include another.
    pub fn expand_to_include(&mut self, other: &Self) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.min.z = self.min.z.min(other.min.z);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
        self.max.z = self.max.z.max(other.max.z);
    }

    /// Get the size (dimensions) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Get the index of the longest axis (0=X, 1=Y, 2=Z).
    #[must_use]
    pub fn longest_axis(&self) -> usize {
        let s = self.size();
        if s.x >= s.y && s.x >= s.z {
            0
        } else if s.y >= s.z {
            1
        } else {
            2
        }
    }

    /// Check if the AABB contains a point.
    ///
    /// Points on the boundary are considered inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Squared distance from a point to this AABB.
    ///
    /// Zero for points inside or on the boundary. This is a lower bound on
    /// the squared distance from the point to anything contained in the box,
    /// which is what makes it usable for branch-and-bound pruning.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(aabb.distance_squared_to(&Point3::new(0.5, 0.5, 0.5)), 0.0);
    /// assert_eq!(aabb.distance_squared_to(&Point3::new(2.0, 0.5, 0.5)), 1.0);
    /// ```
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3<f32>) -> f32 {
        let dx = (self.min.x - point.x).max(0.0).max(point.x - self.max.x);
        let dy = (self.min.y - point.y).max(0.0).max(point.y - self.max.y);
        let dz = (self.min.z - point.z).max(0.0).max(point.z - self.max.z);
        dz.mul_add(dz, dx.mul_add(dx, dy * dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_triangle() {
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 0.0, 0.0);
        let v2 = Point3::new(0.5, 1.0, 0.5);

        let bbox = Aabb::from_triangle(&v0, &v1, &v2);

        assert!((bbox.min.x - 0.0).abs() < 1e-6);
        assert!((bbox.max.x - 1.0).abs() < 1e-6);
        assert!((bbox.max.y - 1.0).abs() < 1e-6);
        assert!((bbox.max.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn aabb_longest_axis() {
        let bbox_x = Aabb::new(Point3::origin(), Point3::new(10.0, 1.0, 1.0));
        let bbox_y = Aabb::new(Point3::origin(), Point3::new(1.0, 10.0, 1.0));
        let bbox_z = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 10.0));

        assert_eq!(bbox_x.longest_axis(), 0);
        assert_eq!(bbox_y.longest_axis(), 1);
        assert_eq!(bbox_z.longest_axis(), 2);
    }

    #[test]
    fn empty_aabb_is_empty() {
        assert!(Aabb::empty().is_empty());
        assert!(!Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn expand_to_include_box() {
        let mut bbox = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let other = Aabb::new(Point3::new(-1.0, 0.5, 0.5), Point3::new(0.5, 2.0, 0.5));

        bbox.expand_to_include(&other);

        assert!((bbox.min.x - (-1.0)).abs() < 1e-6);
        assert!((bbox.max.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn distance_squared_inside_is_zero() {
        let bbox = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(bbox.distance_squared_to(&Point3::new(0.5, 0.5, 0.5)), 0.0);
        assert_eq!(bbox.distance_squared_to(&Point3::new(1.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn distance_squared_outside() {
        let bbox = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        // Face distance
        assert!((bbox.distance_squared_to(&Point3::new(3.0, 0.5, 0.5)) - 4.0).abs() < 1e-6);
        // Corner distance: (1,1,1) away from corner (1,1,1)
        assert!((bbox.distance_squared_to(&Point3::new(2.0, 2.0, 2.0)) - 3.0).abs() < 1e-6);
    }
}
