/// Terminal key and mouse events mapped onto scene input
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use nalgebra::Point2;
use orbit3d_core::{Screen, UiEvent};

/// Everything the frame loop reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Ui(UiEvent),
    ToggleHud,
    TogglePause,
    PointerMoved(Point2<f64>),
    Resize { cols: u16, rows: u16 },
}

/// Logical position of the middle of a terminal cell
pub fn cell_to_logical(column: u16, row: u16, cols: u16, rows: u16, screen: &Screen) -> Point2<f64> {
    let cols = cols.max(1) as f64;
    let rows = rows.max(1) as f64;
    Point2::new(
        (column as f64 + 0.5) * screen.width / cols,
        (row as f64 + 0.5) * screen.height / rows,
    )
}

pub fn map_event(event: &Event, cols: u16, rows: u16, screen: &Screen) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, cols, rows, screen),
        Event::Resize(cols, rows) => Some(Action::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Ui(UiEvent::Quit))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Ui(UiEvent::Quit)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::ToggleHud),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePause),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent, cols: u16, rows: u16, screen: &Screen) -> Option<Action> {
    let position = cell_to_logical(mouse.column, mouse.row, cols, rows, screen);
    match mouse.kind {
        MouseEventKind::Up(_) => Some(Action::Ui(UiEvent::MouseUp { position })),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Action::PointerMoved(position)),
        _ => None,
    }
}

/// Last pointer position seen, in logical coordinates
#[derive(Debug, Default)]
pub struct MouseTracker {
    position: Option<Point2<f64>>,
}

impl MouseTracker {
    pub fn observe(&mut self, action: &Action) {
        match action {
            Action::PointerMoved(position) | Action::Ui(UiEvent::MouseUp { position }) => {
                self.position = Some(*position);
            }
            _ => {}
        }
    }

    pub fn position(&self) -> Option<Point2<f64>> {
        self.position
    }
}
