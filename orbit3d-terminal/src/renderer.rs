/// Half-block terminal canvas for the logical screen
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use orbit3d_core::geometry::{COLOR_KEY, WHITE};
use orbit3d_core::{Canvas, Rgb, Screen};
use std::io::Write;

/// Upper half block: the foreground paints the top pixel, the background the
/// bottom one, so each cell carries two pixel rows
const HALF_BLOCK: char = '▀';

/// Pixel buffer sized to the terminal, addressed in logical coordinates
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    pixels: Vec<Rgb>,
    logical: Screen,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, logical: Screen) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            pixels: vec![WHITE; cols * rows * 2],
            logical,
        }
    }

    /// Rebuild the buffer for a new terminal size
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows, self.logical);
    }

    pub fn cols(&self) -> u16 {
        self.cols as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows as u16
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    /// Buffer pixels per logical pixel, horizontally and vertically
    fn scale(&self) -> (f64, f64) {
        (
            self.cols as f64 / self.logical.width,
            self.pixel_height() as f64 / self.logical.height,
        )
    }

    fn to_pixels(&self, point: Point2<f64>) -> (f64, f64) {
        let (sx, sy) = self.scale();
        (point.x * sx, point.y * sy)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.cols && y < self.pixel_height() {
            Some(self.pixels[y * self.cols + x])
        } else {
            None
        }
    }

    fn put(&mut self, x: f64, y: f64, color: Rgb) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.cols && y < self.pixel_height() {
            self.pixels[y * self.cols + x] = color;
        }
    }

    /// Write the buffer to the terminal starting at the top-left cell
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.pixels[2 * row * self.cols + col];
                let bottom = self.pixels[(2 * row + 1) * self.cols + col];

                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(to_color(top)))?;
                    writer.queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn draw_filled_circle(&mut self, color: Rgb, center: Point2<f64>, radius: u32) {
        // The key color is transparent in the circle buffer
        if color == COLOR_KEY || radius == 0 {
            return;
        }

        let (cx, cy) = self.to_pixels(center);
        let (sx, sy) = self.scale();
        let rx = (radius as f64 * sx).max(0.5);
        let ry = (radius as f64 * sy).max(0.5);

        let x0 = (cx - rx).floor().max(0.0);
        let x1 = (cx + rx).ceil().min(self.cols as f64 - 1.0);
        let y0 = (cy - ry).floor().max(0.0);
        let y1 = (cy + ry).ceil().min(self.pixel_height() as f64 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return;
        }

        for y in y0 as usize..=y1 as usize {
            for x in x0 as usize..=x1 as usize {
                let dx = (x as f64 + 0.5 - cx) / rx;
                let dy = (y as f64 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.pixels[y * self.cols + x] = color;
                }
            }
        }
    }

    fn draw_line(&mut self, color: Rgb, from: Point2<f64>, to: Point2<f64>) {
        let bounds = (self.cols as f64, self.pixel_height() as f64);
        let Some((start, end)) = clip_segment(self.to_pixels(from), self.to_pixels(to), bounds) else {
            return;
        };

        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.put((start.0 + t * dx).floor(), (start.1 + t * dy).floor(), color);
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Liang-Barsky clip of a segment against `[0, width] x [0, height]`
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    (width, height): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if ![p0.0, p0.1, p1.0, p1.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [(-dx, p0.0), (dx, width - p0.0), (-dy, p0.1), (dy, height - p0.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit3d_core::geometry::{BLACK, RED};

    // 16x9 cells -> 16x18 pixels for a 1280x720 logical screen
    fn small_canvas() -> TerminalCanvas {
        TerminalCanvas::new(16, 9, Screen::default())
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut canvas = small_canvas();
        canvas.clear(BLACK);
        for y in 0..18 {
            for x in 0..16 {
                assert_eq!(canvas.pixel(x, y), Some(BLACK));
            }
        }
        assert_eq!(canvas.pixel(16, 0), None);
    }

    #[test]
    fn test_circle_lands_at_scaled_center() {
        let mut canvas = small_canvas();
        canvas.draw_filled_circle(RED, Point2::new(640.0, 360.0), 128);
        assert_eq!(canvas.pixel(8, 9), Some(RED));
        assert_eq!(canvas.pixel(7, 8), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(15, 17), Some(WHITE));
    }

    #[test]
    fn test_color_key_circle_is_transparent() {
        let mut canvas = small_canvas();
        canvas.draw_filled_circle(COLOR_KEY, Point2::new(640.0, 360.0), 128);
        canvas.draw_filled_circle(RED, Point2::new(640.0, 360.0), 0);
        assert!(canvas.pixels.iter().all(|p| *p == WHITE));
    }

    #[test]
    fn test_circle_off_screen_is_ignored() {
        let mut canvas = small_canvas();
        canvas.draw_filled_circle(RED, Point2::new(-5000.0, 1e9), 128);
        assert!(canvas.pixels.iter().all(|p| *p == WHITE));
    }

    #[test]
    fn test_horizontal_line_spans_the_row() {
        let mut canvas = small_canvas();
        canvas.draw_line(BLACK, Point2::new(0.0, 362.0), Point2::new(1280.0, 362.0));
        for x in 0..16 {
            assert_eq!(canvas.pixel(x, 9), Some(BLACK));
        }
        assert_eq!(canvas.pixel(0, 8), Some(WHITE));
    }

    #[test]
    fn test_line_outside_is_clipped_away() {
        let mut canvas = small_canvas();
        canvas.draw_line(BLACK, Point2::new(-100.0, -100.0), Point2::new(-10.0, 5000.0));
        canvas.draw_line(BLACK, Point2::new(f64::NAN, 0.0), Point2::new(10.0, 10.0));
        assert!(canvas.pixels.iter().all(|p| *p == WHITE));
    }

    #[test]
    fn test_long_line_is_clipped_to_buffer() {
        let (start, end) = clip_segment((-1e12, 5.0), (1e12, 5.0), (16.0, 18.0)).unwrap();
        assert!(start.0.abs() < 1e-3 && (end.0 - 16.0).abs() < 1e-3);
        assert_eq!((start.1, end.1), (5.0, 5.0));
    }

    #[test]
    fn test_present_writes_one_block_per_cell() {
        let canvas = small_canvas();
        let mut out = Vec::new();
        canvas.present(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.chars().filter(|c| *c == HALF_BLOCK).count(), 16 * 9);
    }

    #[test]
    fn test_resize_rebuilds_buffer() {
        let mut canvas = small_canvas();
        canvas.resize(4, 2);
        assert_eq!((canvas.cols(), canvas.rows()), (4, 2));
        assert_eq!(canvas.pixels.len(), 16);
    }
}
