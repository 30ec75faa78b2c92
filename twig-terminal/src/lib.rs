/// Terminal wireframe viewer for a generated tree and its stage
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use twig_core::config::ViewConfig;
use twig_core::{Camera, Mesh, RotationState, Scene, Segment, Transform};

pub mod renderer;

pub use renderer::{AsciiRenderer, Layer};

/// Rows reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Continuous y spin that Space pauses and resumes at the configured rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    rate: f32,
    paused: bool,
}

impl Spin {
    /// A zero rate starts paused and resumes at the default view rate
    pub fn new(rate: f32) -> Self {
        if rate == 0.0 {
            Self {
                rate: ViewConfig::default().spin,
                paused: true,
            }
        } else {
            Self {
                rate,
                paused: false,
            }
        }
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Radians to turn this frame
    pub fn per_frame(&self) -> f32 {
        if self.paused {
            0.0
        } else {
            self.rate
        }
    }
}

/// Main application struct for terminal rendering.
///
/// The scene is built before the app starts; the frame loop only reads it.
pub struct TerminalApp {
    title: String,
    tree: Vec<Segment>,
    stage: Vec<Segment>,
    ground: Option<Mesh>,
    view: ViewConfig,
    spin: Spin,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(title: impl Into<String>, scene: &Scene, view: ViewConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(STATUS_ROWS).max(1);

        let (stage, ground) = match scene.stage() {
            Some(stage) => (stage.segments(), Some(stage.ground_mesh())),
            None => (Vec::new(), None),
        };
        let target = camera_target(scene);

        Ok(Self {
            title: title.into(),
            tree: scene.tree_segments().to_vec(),
            stage,
            ground,
            rotation: RotationState::zero(),
            camera: Camera::orbit(
                std::f32::consts::FRAC_PI_2,
                std::f32::consts::FRAC_PI_2 * 0.85,
                view.distance,
                target,
                width as u32,
                // Terminal cells are roughly twice as tall as wide
                height as u32 * 2,
            ),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            spin: Spin::new(view.spin),
            view,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.view.fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.rotation.rotate(0.0, self.spin.per_frame(), 0.0);

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(0.1, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-0.1, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -0.1, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, 0.1, 0.0),
                KeyCode::Char(' ') => self.spin.toggle(),
                KeyCode::Char('r') => self.rotation = RotationState::zero(),
                _ => {}
            },
            Event::Resize(width, height) => {
                let height = height.saturating_sub(STATUS_ROWS).max(1);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.camera.aspect = width as f32 / (height as f32 * 2.0);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let model = Transform::rotation_matrix(&self.rotation, &self.camera.target);

        self.renderer.clear();
        if let Some(ground) = &self.ground {
            self.renderer.render_mesh(ground, &model, &self.camera);
        }
        self.renderer
            .render_segments(&self.stage, Layer::Stage, &model, &self.camera);
        self.renderer
            .render_segments(&self.tree, Layer::Tree, &model, &self.camera);

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "twig | {} | {} segments | FPS: {:.1} | WASD/Arrows=Rotate Space=Spin R=Reset Q=Quit",
                self.title,
                self.tree.len(),
                self.fps
            )),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            ResetColor,
            cursor::MoveTo(0, STATUS_ROWS),
        )?;

        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

/// Aim at the middle of the stage, or at the tree when there is none
fn camera_target(scene: &Scene) -> Point3<f32> {
    if let Some(stage) = scene.stage() {
        return Point3::new(0.0, stage.height / 2.0, 0.0);
    }
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for s in scene.tree_segments() {
        min_y = min_y.min(s.start.y).min(s.end.y);
        max_y = max_y.max(s.start.y).max(s.end.y);
    }
    let trunk = scene.tree_segments()[0].start;
    Point3::new(trunk.x, (min_y + max_y) / 2.0, trunk.z)
}

/// Print one segment per line as `x0 y0 z0 -> x1 y1 z1`
pub fn dump_segments<W: Write>(writer: &mut W, segments: &[Segment]) -> io::Result<()> {
    for s in segments {
        writeln!(
            writer,
            "{:.4} {:.4} {:.4} -> {:.4} {:.4} {:.4}",
            s.start.x, s.start.y, s.start.z, s.end.x, s.end.y, s.end.z
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use twig_core::SceneConfig;

    #[test]
    fn test_dump_format() {
        let mut config = SceneConfig::default();
        config.tree.preset = twig_core::Preset::Static;
        let scene = Scene::build(&config);

        let mut out = Vec::new();
        dump_segments(&mut out, scene.tree_segments()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "0.0000 0.0000 0.0000 -> 0.0000 5.0000 0.0000");
    }

    #[test]
    fn test_target_without_stage() {
        let mut config = SceneConfig::default();
        config.stage.enabled = false;
        config.tree.origin = [2.0, 1.0, 0.0];
        let scene = Scene::build(&config);

        let target = camera_target(&scene);
        assert_eq!(target.x, 2.0);
        assert!(target.y > 1.0);
    }

    #[test]
    fn test_spin_toggle_restores_configured_rate() {
        let mut spin = Spin::new(0.02);
        assert_eq!(spin.per_frame(), 0.02);
        spin.toggle();
        assert_eq!(spin.per_frame(), 0.0);
        spin.toggle();
        assert_eq!(spin.per_frame(), 0.02);
    }

    #[test]
    fn test_zero_spin_starts_paused() {
        let mut spin = Spin::new(0.0);
        assert_eq!(spin.per_frame(), 0.0);
        spin.toggle();
        assert_eq!(spin.per_frame(), ViewConfig::default().spin);
    }
}
