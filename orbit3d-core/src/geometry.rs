/// Geometry primitives for the projected point-cloud
use nalgebra::{Point2, Vector3};

/// A position or offset in 3D space
pub type Point3D = Vector3<f64>;

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const PURPLE: Rgb = Rgb::new(255, 0, 254);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Transparent key for offscreen circle buffers. PURPLE stays one step off it.
pub const COLOR_KEY: Rgb = Rgb::new(255, 0, 255);

/// Integer screen-space rectangle a point is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    /// Square of side `size` centered on `center`
    pub fn centered(center: Point2<f64>, size: u32) -> Self {
        let half = (size / 2) as i32;
        Self {
            x: center.x as i32 - half,
            y: center.y as i32 - half,
            width: size,
            height: size,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }
}

/// What a renderable point stands for in its body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    /// The center of mass, which owns vertices
    Body,
    /// A leaf vertex attached to a body
    Vertex,
}

/// The renderable unit shared by bodies and vertices.
///
/// `displayed_radius`, `visible`, `depth_layer` and `rect` are derived from
/// `position.z` and `base_radius` by [`crate::projection::project`] and are
/// stale until it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub position: Point3D,
    pub base_radius: f64,
    pub displayed_radius: u32,
    pub color: Rgb,
    pub visible: bool,
    pub depth_layer: f64,
    pub rect: ScreenRect,
    pub role: PointRole,
}

impl ProjectedPoint {
    pub fn new(position: Point3D, base_radius: f64, color: Rgb, role: PointRole) -> Self {
        Self {
            position,
            base_radius,
            displayed_radius: 0,
            color,
            visible: false,
            depth_layer: 0.0,
            rect: ScreenRect::default(),
            role,
        }
    }

    /// Screen position of the point; the projection keeps x and y as-is
    pub fn screen_position(&self) -> Point2<f64> {
        Point2::new(self.position.x, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_is_unprojected() {
        let point = ProjectedPoint::new(Point3D::new(1.0, 2.0, 3.0), 16.0, GREEN, PointRole::Vertex);
        assert!(!point.visible);
        assert_eq!(point.displayed_radius, 0);
        assert_eq!(point.screen_position(), Point2::new(1.0, 2.0));
    }

    #[test]
    fn test_centered_rect() {
        let rect = ScreenRect::centered(Point2::new(100.7, 50.2), 32);
        assert_eq!(rect, ScreenRect { x: 84, y: 34, width: 32, height: 32 });
        assert_eq!(rect.center(), (100, 50));
    }

    #[test]
    fn test_purple_is_not_the_color_key() {
        assert_ne!(PURPLE, COLOR_KEY);
    }
}
