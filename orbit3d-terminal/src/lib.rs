/// Terminal host for the orbit scene: surface, input and the frame loop
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info, trace, warn};
use orbit3d_core::{FrameStats, LoopState, Scene, Screen};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;

pub use config::Args;
pub use error::AppError;
pub use renderer::TerminalCanvas;

use input::{Action, MouseTracker};

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    canvas: TerminalCanvas,
    mouse: MouseTracker,
    frame_time: Option<Duration>,
    show_hud: bool,
    started: Instant,
    last_fps_update: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(args: &Args) -> Result<Self, AppError> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(args, cols, rows))
    }

    fn with_size(args: &Args, cols: u16, rows: u16) -> Self {
        let screen = Screen::default();
        info!(
            "starting with {}x{} cells, fps cap {:?}, spin {:?}",
            cols,
            rows,
            args.frame_time(),
            args.spin()
        );

        Self {
            scene: Scene::new(screen).with_spin(args.spin()),
            canvas: TerminalCanvas::new(cols, rows, screen),
            mouse: MouseTracker::default(),
            frame_time: args.frame_time(),
            show_hud: args.hud,
            started: Instant::now(),
            last_fps_update: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        let session = TerminalSession::enter()?;
        let result = self.main_loop();
        result.and(session.leave())
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        while self.scene.state() == LoopState::Running {
            let frame_start = Instant::now();

            self.drain_input()?;
            if self.scene.state() == LoopState::Terminated {
                break;
            }

            // Motion follows the clock, not the frame count
            let t = self.started.elapsed().as_secs_f64();
            self.stats = self.scene.step(t, &mut self.canvas);
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            if let Some(target) = self.frame_time {
                let elapsed = frame_start.elapsed();
                if elapsed < target {
                    std::thread::sleep(target - elapsed);
                } else {
                    trace!("frame took {:?}, budget {:?}", elapsed, target);
                }
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_update).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_update).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_update = now;
            }
        }

        Ok(())
    }

    fn drain_input(&mut self) -> Result<(), AppError> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            let action = input::map_event(
                &event,
                self.canvas.cols(),
                self.canvas.rows(),
                self.scene.screen(),
            );
            if let Some(action) = action {
                self.apply(action);
            }
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        self.mouse.observe(&action);
        match action {
            Action::Ui(event) => {
                self.scene.handle_event(event);
            }
            Action::ToggleHud => self.show_hud = !self.show_hud,
            Action::TogglePause => {
                self.scene.toggle_pause();
                info!("rotation paused: {}", self.scene.is_paused());
            }
            Action::Resize { cols, rows } => {
                debug!("terminal resized to {}x{}", cols, rows);
                self.canvas.resize(cols, rows);
            }
            Action::PointerMoved(_) => {}
        }
    }

    fn render(&mut self) -> Result<(), AppError> {
        let mut stdout = stdout();
        self.canvas.present(&mut stdout)?;

        if self.show_hud {
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Black),
                SetBackgroundColor(Color::Grey),
                Print(self.hud_line()),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn hud_line(&self) -> String {
        let cursor = match self.mouse.position() {
            Some(p) => format!("({:.0}, {:.0})", p.x, p.y),
            None => "-".to_string(),
        };
        let line = format!(
            "orbit3d | FPS: {:.1} | vertices: {} | edges: {} | pointer: {}{} | Click=Add P=Pause H=HUD Q=Quit",
            self.fps,
            self.scene.body().children().len(),
            self.stats.edges,
            cursor,
            if self.scene.is_paused() { " | paused" } else { "" },
        );
        line.chars().take(self.canvas.cols() as usize).collect()
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
///
/// Dropping an active session restores the terminal, so early returns and
/// panics in the frame loop leave the shell usable.
struct TerminalSession {
    restore: fn() -> Result<(), AppError>,
    active: bool,
}

impl TerminalSession {
    fn enter() -> Result<Self, AppError> {
        terminal::enable_raw_mode()?;
        // Armed before the screen switch so a failed switch still undoes raw mode
        let session = Self::armed(restore_terminal);
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        Ok(session)
    }

    fn armed(restore: fn() -> Result<(), AppError>) -> Self {
        Self {
            restore,
            active: true,
        }
    }

    /// Restore now and report failure instead of logging it
    fn leave(mut self) -> Result<(), AppError> {
        self.active = false;
        (self.restore)()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = (self.restore)() {
                warn!("failed to restore terminal: {}", err);
            }
        }
    }
}

fn restore_terminal() -> Result<(), AppError> {
    terminal::disable_raw_mode()?;
    execute!(
        stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    )?;
    Ok(())
}
