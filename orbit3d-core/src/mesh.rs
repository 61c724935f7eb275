/// Wireframe edges between the visible vertices of a body
use crate::canvas::Canvas;
use crate::geometry::{Rgb, BLACK};
use crate::orbit::Vertex;

pub const EDGE_COLOR: Rgb = BLACK;

/// Index pairs `(i, j)` with `i < j` where both vertices are visible.
///
/// Every unordered pair shows up exactly once; culled vertices never appear.
pub fn visible_edges(children: &[Vertex]) -> impl Iterator<Item = (usize, usize)> + '_ {
    children
        .iter()
        .enumerate()
        .filter(|(_, vertex)| vertex.point.visible)
        .flat_map(move |(i, _)| {
            children[i + 1..]
                .iter()
                .enumerate()
                .filter(|(_, vertex)| vertex.point.visible)
                .map(move |(k, _)| (i, i + 1 + k))
        })
}

/// Draw one line per visible pair and return how many were drawn
pub fn draw_mesh<C: Canvas + ?Sized>(children: &[Vertex], canvas: &mut C) -> usize {
    let mut drawn = 0;
    for (i, j) in visible_edges(children) {
        canvas.draw_line(
            EDGE_COLOR,
            children[i].point.screen_position(),
            children[j].point.screen_position(),
        );
        drawn += 1;
    }
    drawn
}
