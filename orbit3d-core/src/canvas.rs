/// Drawing surface and input events the scene talks to
use nalgebra::Point2;

use crate::geometry::Rgb;

/// Immediate-mode 2D surface in logical screen coordinates.
///
/// Calls are issued in paint order; later calls cover earlier ones.
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgb);

    /// Filled circle of `radius` logical pixels around `center`
    fn draw_filled_circle(&mut self, color: Rgb, center: Point2<f64>, radius: u32);

    /// Straight line between two logical points
    fn draw_line(&mut self, color: Rgb, from: Point2<f64>, to: Point2<f64>);
}

/// Input that reaches the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Quit,
    /// Mouse button released at a logical screen position
    MouseUp { position: Point2<f64> },
}
