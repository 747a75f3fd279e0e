//! Terminal front-end: drives an [`affine3d_core::Scene`] from keyboard and
//! mouse input and draws it as ASCII lines.

use affine3d_core::{Axis, ProjectionMode, Scene};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub mod input;
pub mod model;
pub mod prompt;
pub mod renderer;

pub use input::{command_for_key, Command, Direction};
pub use prompt::{AxisPrompt, PromptOutcome};
pub use renderer::LineRenderer;

/// Rows taken by the HUD line at the top and the status line at the bottom.
const CHROME_ROWS: u16 = 2;
/// Approximate pixel size of one terminal cell, for drag sensitivity.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;
/// Highest accepted frame rate; keeps the frame time above zero.
pub const MAX_FPS: u32 = 240;
/// Spin speed change per `[` / `]` press.
const SPEED_STEP_DEG_PER_SEC: f64 = 15.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    renderer: LineRenderer,
    running: bool,
    frame_time: Duration,
    drag_from: Option<(u16, u16)>,
    prompt: Option<AxisPrompt>,
    status: String,
}

impl TerminalApp {
    pub fn new(scene: Scene, fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, fps, width, height))
    }

    fn with_size(scene: Scene, fps: u32, width: u16, height: u16) -> Self {
        Self {
            scene,
            renderer: renderer_for(width, height),
            running: true,
            frame_time: Duration::from_millis(1000 / u64::from(fps.clamp(1, MAX_FPS))),
            drag_from: None,
            prompt: None,
            status: "Esc quits".to_string(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup: every step runs, the first error wins
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );

        result.and(raw).and(screen)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        info!(frame_ms = self.frame_time.as_millis() as u64, "entering main loop");

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(event, Instant::now());
            }

            // Update
            self.scene.tick(Instant::now());

            // Render
            self.render()?;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }
        }

        info!("leaving main loop");
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.renderer = renderer_for(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_key(key) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancelled => {
                    self.prompt = None;
                    self.status = "axis entry cancelled".to_string();
                }
                PromptOutcome::Invalid(err) => {
                    self.prompt = None;
                    self.reject(err);
                }
                PromptOutcome::Submitted { p1, p2 } => {
                    self.prompt = None;
                    match self.scene.set_axis_from_text(&p1, &p2) {
                        Ok(()) => self.status = format!("axis set through {p1} and {p2}"),
                        Err(err) => self.reject(err),
                    }
                }
            }
            return;
        }

        if let Some(command) = command_for_key(key) {
            self.apply(command, now);
        }
    }

    fn reject(&mut self, err: affine3d_core::EngineError) {
        warn!(%err, "command rejected");
        self.status = err.to_string();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let ctrl = mouse.modifiers.contains(KeyModifiers::CONTROL);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_from = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((col, row)) = self.drag_from {
                    let dx = (f64::from(mouse.column) - f64::from(col)) * CELL_WIDTH_PX;
                    let dy = (f64::from(mouse.row) - f64::from(row)) * CELL_HEIGHT_PX;
                    self.scene.drag(dx, dy);
                }
                self.drag_from = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_from = None,
            // scrolling towards the user widens the view
            MouseEventKind::ScrollDown => self.scene.wheel(1, ctrl),
            MouseEventKind::ScrollUp => self.scene.wheel(-1, ctrl),
            _ => {}
        }
    }

    /// Applies a bound command to the scene, scaled by the configured steps.
    pub fn apply(&mut self, command: Command, now: Instant) {
        let cfg = self.scene.config().clone();
        match command {
            Command::Quit => self.running = false,
            Command::Translate(axis, dir) => {
                let d = axis.unit() * (dir.sign() * cfg.translate_step);
                self.scene.translate(d.x, d.y, d.z);
            }
            Command::Rotate(axis, dir) => {
                self.scene
                    .rotate_axis_aligned(axis, dir.sign() * cfg.rotate_step_deg.to_radians());
            }
            Command::Scale(Direction::Positive) => self.scene.scale_uniform(cfg.scale_step),
            Command::Scale(Direction::Negative) => self.scene.scale_uniform(1.0 / cfg.scale_step),
            Command::Nudge(dir) => {
                if !self
                    .scene
                    .nudge_around_axis(dir.sign() * cfg.nudge_step_deg.to_radians())
                {
                    self.status = "no rotation axis: press x, y, z or F".to_string();
                }
            }
            Command::SelectAxis(axis) => {
                let spinning = self.scene.select_principal_axis(axis, now);
                self.status = format!(
                    "axis {} {}",
                    axis_name(axis),
                    if spinning { "spinning" } else { "paused" }
                );
            }
            Command::ToggleSpin => {
                if self.scene.axis().is_none() {
                    self.status = "no rotation axis: press x, y, z or F".to_string();
                } else {
                    self.scene.toggle_spin(now);
                }
            }
            Command::Reverse => self.scene.reverse_direction(),
            Command::Speed(dir) => {
                let speed = self.scene.spin().speed_deg_per_sec();
                self.scene
                    .set_speed_deg_per_sec(speed + dir.sign() * SPEED_STEP_DEG_PER_SEC);
            }
            Command::ClearAxis => self.scene.clear_axis(),
            Command::ToggleProjection => {
                self.scene.toggle_projection_mode();
            }
            Command::Reset => {
                self.scene.reset();
                self.status = "reset".to_string();
            }
            Command::PromptAxis => {
                self.prompt = Some(AxisPrompt::new(self.scene.model().centroid()));
            }
        }
    }

    fn hud(&self) -> String {
        let camera = self.scene.camera();
        let projection = self.scene.projection();
        let spin = self.scene.spin();
        let mode = match projection.mode {
            ProjectionMode::Perspective => "persp",
            ProjectionMode::Orthographic => "ortho",
        };
        let axis = match self.scene.axis() {
            Some(line) => format!("{} -> {}", line.p1(), line.p2()),
            None => "none".to_string(),
        };
        format!(
            "{mode} fov={:.0}° r={:.1} | axis {axis} | spin {} {:+.0}°/s | WASDQE move, arrows/PgUp/PgDn turn, +/- scale, xyz/F axis, space spin, v rev, p proj, r reset",
            projection.fov_y_deg(),
            camera.radius(),
            if spin.is_spinning() { "on" } else { "off" },
            spin.speed_deg_per_sec(),
        )
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.renderer.viewport();
        let frame = self.scene.render(width, height);

        // Clear renderer
        self.renderer.clear();
        self.renderer.render_frame(&frame);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, 1)?;

        // Draw UI overlay
        let (cols, rows) = terminal::size()?;
        let bottom = match &self.prompt {
            Some(prompt) => prompt.line(),
            None => self.status.clone(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(fit(&self.hud(), cols)),
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Cyan),
            Print(fit(&bottom, cols)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

fn renderer_for(width: u16, height: u16) -> LineRenderer {
    LineRenderer::new(
        usize::from(width),
        usize::from(height.saturating_sub(CHROME_ROWS)),
    )
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "X",
        Axis::Y => "Y",
        Axis::Z => "Z",
    }
}

/// Truncates `text` to `cols` characters.
fn fit(text: &str, cols: u16) -> String {
    text.chars().take(usize::from(cols)).collect()
}
