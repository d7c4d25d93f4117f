//! Vertex types and attributes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl VertexColor {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::VertexColor;
    ///
    /// let red = VertexColor::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from floating point values in [0, 1] range.
    ///
    /// Values are clamped to the valid range.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::VertexColor;
    ///
    /// let color = VertexColor::from_float(1.0, 0.5, 0.0);
    /// assert_eq!(color.r, 255);
    /// assert_eq!(color.g, 127);
    /// assert_eq!(color.b, 0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: values are clamped to [0.0, 1.0] before * 255.0
    pub fn from_float(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }

    /// Convert to floating point values in [0, 1] range.
    #[inline]
    #[must_use]
    pub fn to_float(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Black color (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White color (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl Default for VertexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A vertex in 3D space with optional attributes.
///
/// The position is the only field the deviation core reads. Normals, colors
/// and texture coordinates are carried through from the loaders so the
/// writers can reproduce them; the query engines never touch them.
///
/// # Example
///
/// ```
/// use gauge_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1.position, v2.position);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f32>,

    /// Unit normal vector, if the source file carried one.
    pub normal: Option<Vector3<f32>>,

    /// Vertex color (RGB), from file format or visualization.
    pub color: Option<VertexColor>,

    /// Texture coordinates (U, V), if the source file carried them.
    pub uv: Option<(f32, f32)>,
}

impl Vertex {
    /// Create a new vertex with only position set.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            normal: None,
            color: None,
            uv: None,
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.x, 1.0);
    /// assert_eq!(v.position.y, 2.0);
    /// assert_eq!(v.position.z, 3.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with position and color.
    ///
    /// # Example
    ///
    /// ```
    /// use gauge_types::{Vertex, VertexColor, Point3};
    ///
    /// let v = Vertex::with_color(Point3::origin(), VertexColor::new(255, 0, 0));
    /// assert_eq!(v.color, Some(VertexColor::new(255, 0, 0)));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_color(position: Point3<f32>, color: VertexColor) -> Self {
        Self {
            position,
            normal: None,
            color: Some(color),
            uv: None,
        }
    }

    /// Create a vertex with position and normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal: Some(normal),
            color: None,
            uv: None,
        }
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self::new(position)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_from_coords() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f32::EPSILON);
        assert!((v.position.y - 2.0).abs() < f32::EPSILON);
        assert!((v.position.z - 3.0).abs() < f32::EPSILON);
        assert!(v.normal.is_none());
        assert!(v.color.is_none());
    }

    #[test]
    fn vertex_with_normal() {
        let v = Vertex::with_normal(Point3::origin(), Vector3::z());
        let n = v.normal.map(|n| (n.x, n.y, n.z));
        assert_eq!(n, Some((0.0, 0.0, 1.0)));
    }

    #[test]
    fn vertex_from_array() {
        let v: Vertex = [1.0, 2.0, 3.0].into();
        assert!((v.position.x - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn color_from_float() {
        let c = VertexColor::from_float(1.0, 0.5, 0.0);
        assert_eq!(c.r, 255);
        assert!((i32::from(c.g) - 127).abs() <= 1);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn color_to_float() {
        let c = VertexColor::new(255, 128, 0);
        let (r, g, b) = c.to_float();
        assert!((r - 1.0).abs() < 0.01);
        assert!((g - 0.502).abs() < 0.01);
        assert!(b.abs() < 0.01);
    }

    #[test]
    fn color_clamps_values() {
        let c = VertexColor::from_float(2.0, -1.0, 0.5);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
        assert!((i32::from(c.b) - 127).abs() <= 1);
    }
}
