/// Perspective-scaling projection and depth layering
use nalgebra::Point2;

use crate::geometry::{ProjectedPoint, ScreenRect};

/// Logical surface width the scene is laid out for
pub const SCREEN_WIDTH: u32 = 1280;
/// Logical surface height the scene is laid out for
pub const SCREEN_HEIGHT: u32 = 720;
/// Upper bound on a displayed radius, so a point hugging the projection plane
/// cannot cover the screen
pub const MAX_DISPLAYED_RADIUS: u32 = 128;

/// Logical screen dimensions used by every projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Distance at which a point is drawn at its base size
    pub fn focal_length(&self) -> f64 {
        0.5 * self.width
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Depth-scaled radius of a point, or `None` when it sits on or behind the
/// projection plane.
pub fn displayed_radius(base_radius: f64, z: f64, screen: &Screen) -> Option<u32> {
    if z <= 0.0 || z.is_nan() {
        return None;
    }
    // `as` saturates: negative sizes collapse to 0, huge ones hit the clamp
    let radius = (base_radius * (screen.focal_length() / z)).trunc() as u32;
    Some(radius.min(MAX_DISPLAYED_RADIUS))
}

/// Draw-order key; lower layers draw first, so far points end up behind
pub fn depth_layer(z: f64, screen: &Screen) -> f64 {
    screen.width - z
}

/// Recompute the derived fields of `point` from its position and base size
pub fn project(point: &mut ProjectedPoint, screen: &Screen) {
    match displayed_radius(point.base_radius, point.position.z, screen) {
        Some(radius) => {
            point.displayed_radius = radius;
            point.visible = true;
        }
        None => {
            point.displayed_radius = 0;
            point.visible = false;
        }
    }
    point.rect = ScreenRect::centered(point.screen_position(), point.displayed_radius * 2);
    point.depth_layer = depth_layer(point.position.z, screen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3D, PointRole, RED};

    fn point_at(z: f64, base_radius: f64) -> ProjectedPoint {
        ProjectedPoint::new(Point3D::new(640.0, 360.0, z), base_radius, RED, PointRole::Body)
    }

    #[test]
    fn test_base_size_at_focal_length() {
        let screen = Screen::default();
        let mut point = point_at(640.0, 16.0);
        project(&mut point, &screen);
        assert!(point.visible);
        assert_eq!(point.displayed_radius, 16);
        assert_eq!(point.depth_layer, 640.0);
        assert_eq!(point.rect, ScreenRect { x: 624, y: 344, width: 32, height: 32 });
    }

    #[test]
    fn test_radius_truncates() {
        let screen = Screen::default();
        // 16 * 640 / 700 = 14.63
        assert_eq!(displayed_radius(16.0, 700.0, &screen), Some(14));
        // 10 * 640 / 3 = 2133.3, clamped
        assert_eq!(displayed_radius(10.0, 3.0, &screen), Some(MAX_DISPLAYED_RADIUS));
    }

    #[test]
    fn test_non_positive_depth_is_culled() {
        let screen = Screen::default();
        for z in [0.0, -0.0, -1.0, -640.0] {
            let mut point = point_at(z, 16.0);
            point.visible = true;
            point.displayed_radius = 99;
            project(&mut point, &screen);
            assert!(!point.visible, "z = {z}");
            assert_eq!(point.displayed_radius, 0);
        }
    }

    #[test]
    fn test_radius_non_increasing_with_depth() {
        let screen = Screen::default();
        let mut previous = u32::MAX;
        for step in 1..2000 {
            let z = step as f64 * 0.75;
            let radius = displayed_radius(32.0, z, &screen).unwrap();
            assert!(radius <= previous, "radius grew at z = {z}");
            assert!(radius <= MAX_DISPLAYED_RADIUS);
            previous = radius;
        }
    }

    #[test]
    fn test_far_points_get_lower_layers() {
        let screen = Screen::default();
        assert!(depth_layer(900.0, &screen) < depth_layer(300.0, &screen));
    }
}
