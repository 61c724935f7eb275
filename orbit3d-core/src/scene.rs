/// Per-frame sequencing of input, motion and drawing for one orbit body
use log::info;

use crate::canvas::{Canvas, UiEvent};
use crate::geometry::{ProjectedPoint, Rgb, WHITE};
use crate::orbit::{BodyId, OrbitBody};
use crate::projection::Screen;
use crate::transform::RotationState;

/// Rotation applied every frame, in radians.
///
/// pygame's `rotate_*_ip` takes degrees, so a sketch stepping by 0.1 there
/// turns about 57 times slower than this default.
pub const DEFAULT_SPIN: RotationState = RotationState {
    x: 0.1,
    y: 0.1,
    z: 0.0,
};

pub const BACKGROUND: Rgb = WHITE;

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// What one call to [`Scene::step`] put on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub edges: usize,
    pub points_drawn: usize,
}

/// A single orbit body plus the loop state around it
pub struct Scene {
    body: OrbitBody,
    spin: RotationState,
    paused: bool,
    state: LoopState,
}

impl Scene {
    pub fn new(screen: Screen) -> Self {
        Self {
            body: OrbitBody::with_cube(BodyId(0), screen),
            spin: DEFAULT_SPIN,
            paused: false,
            state: LoopState::Running,
        }
    }

    pub fn with_spin(mut self, spin: RotationState) -> Self {
        self.spin = spin;
        self
    }

    pub fn body(&self) -> &OrbitBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut OrbitBody {
        &mut self.body
    }

    pub fn screen(&self) -> &Screen {
        self.body.screen()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume rotation. The orbit keeps following the clock.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn handle_event(&mut self, event: UiEvent) -> LoopState {
        match event {
            UiEvent::Quit => {
                if self.state == LoopState::Running {
                    info!("quit requested");
                }
                self.state = LoopState::Terminated;
            }
            UiEvent::MouseUp { position } => {
                if self.state == LoopState::Running {
                    self.body.add_click_vertex(position);
                }
            }
        }
        self.state
    }

    /// Advance to wall-clock time `t` and paint one frame onto `canvas`.
    ///
    /// Order: move the body along its orbit, rotate the vertices around the
    /// new position, clear, update (which reprojects every point and draws
    /// the mesh), then the points back-to-front.
    pub fn step<C: Canvas + ?Sized>(&mut self, t: f64, canvas: &mut C) -> FrameStats {
        let spin = if self.paused {
            RotationState::zero()
        } else {
            self.spin
        };
        self.body.advance_to(t);
        self.body.rotate(spin.x, spin.y, spin.z);

        canvas.clear(BACKGROUND);
        let edges = self.body.update(canvas);

        let mut points_drawn = 0;
        for point in self.draw_order() {
            if !point.visible {
                continue;
            }
            canvas.draw_filled_circle(point.color, point.screen_position(), point.displayed_radius);
            points_drawn += 1;
        }

        FrameStats {
            edges,
            points_drawn,
        }
    }

    /// Every point sorted by depth layer, far first. Equal layers keep
    /// insertion order.
    pub fn draw_order(&self) -> Vec<&ProjectedPoint> {
        let mut points: Vec<&ProjectedPoint> = self.body.points().collect();
        points.sort_by(|a, b| a.depth_layer.total_cmp(&b.depth_layer));
        points
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3D, PointRole};
    use nalgebra::Point2;

    #[test]
    fn test_quit_terminates() {
        let mut scene = Scene::default();
        assert_eq!(scene.state(), LoopState::Running);
        assert_eq!(scene.handle_event(UiEvent::Quit), LoopState::Terminated);
        assert_eq!(scene.handle_event(UiEvent::Quit), LoopState::Terminated);
    }

    #[test]
    fn test_clicks_after_quit_are_ignored() {
        let mut scene = Scene::default();
        scene.handle_event(UiEvent::Quit);
        scene.handle_event(UiEvent::MouseUp {
            position: Point2::new(10.0, 10.0),
        });
        assert_eq!(scene.body().children().len(), 8);
    }

    #[test]
    fn test_draw_order_far_first_and_stable() {
        let mut scene = Scene::default();
        let body = scene.body_mut();
        body.add_vertex(Point3D::new(0.0, 0.0, 0.0), WHITE);
        body.refresh();

        let order = scene.draw_order();
        assert!(order.windows(2).all(|w| w[0].depth_layer <= w[1].depth_layer));

        // Body and the zero-offset vertex share a layer; body was inserted first
        let body_at = order.iter().position(|p| p.role == PointRole::Body).unwrap();
        let twin_at = order.iter().position(|p| p.color == WHITE).unwrap();
        assert_eq!(order[body_at].depth_layer, order[twin_at].depth_layer);
        assert!(body_at < twin_at);
    }

    struct NullCanvas;

    impl Canvas for NullCanvas {
        fn clear(&mut self, _color: Rgb) {}
        fn draw_filled_circle(&mut self, _color: Rgb, _center: Point2<f64>, _radius: u32) {}
        fn draw_line(&mut self, _color: Rgb, _from: Point2<f64>, _to: Point2<f64>) {}
    }

    #[test]
    fn test_pause_freezes_rotation() {
        let mut scene = Scene::default();
        scene.toggle_pause();
        for frame in 0..3 {
            scene.step(frame as f64 * 0.016, &mut NullCanvas);
        }
        assert_eq!(scene.body().rotation(), RotationState::zero());

        scene.toggle_pause();
        scene.step(0.1, &mut NullCanvas);
        assert_eq!(scene.body().rotation(), DEFAULT_SPIN);
    }

    #[test]
    fn test_custom_spin() {
        let mut scene = Scene::default().with_spin(RotationState::new(0.0, 0.0, 0.5));
        scene.step(0.0, &mut NullCanvas);
        scene.step(0.0, &mut NullCanvas);
        assert_eq!(scene.body().rotation(), RotationState::new(0.0, 0.0, 1.0));
    }
}
