/// Terminal front-end for the SW3D software rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::Vector3;
use std::io::{stdout, Write};
use sw3d_core::{
    draw_mesh, standard_pipeline, Axis, Camera, DrawMode, Mesh, Pipeline, PixelMap, Placement,
    RenderConfig, RenderContext, RenderError,
};
use tracing::{info, warn};

/// Degrees added to the mesh placement per rotation key press.
const MESH_ROTATE_STEP: f32 = 10.0;

pub mod canvas;

pub use canvas::TermCanvas;

/// Pipeline owner bound to one imported mesh
///
/// Keeps the persistent rendering context; every `process` call submits
/// a copy of it, so the original-geometry snapshot survives any number
/// of re-executions.
pub struct Renderer {
    pipeline: Pipeline,
    context: RenderContext,
}

impl Renderer {
    pub fn new(mesh: Mesh, camera: Camera, width: u32, height: u32) -> Self {
        Self {
            pipeline: standard_pipeline(),
            context: RenderContext::new(camera, Placement::new(mesh), width, height),
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.context.camera_mut()
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        self.context.placement_mut()
    }

    /// Run the full pipeline and return the final clipped 2D mesh.
    pub fn process(&self) -> Result<Mesh, RenderError> {
        Ok(self.pipeline.execute(self.context.clone())?.into_mesh())
    }
}

/// Event-driven terminal application
///
/// Every key event triggers exactly one pipeline re-execution and one
/// redraw; there is no frame loop and nothing renders while idle.
pub struct App {
    renderer: Renderer,
    canvas: TermCanvas,
    map: PixelMap,
    mode: DrawMode,
    title: String,
    running: bool,
}

impl App {
    pub fn new(mesh: Mesh, config: &RenderConfig) -> anyhow::Result<Self> {
        let (term_width, term_height) = terminal::size()?;
        let width = if config.width > 0 {
            config.width
        } else {
            term_width as u32
        };
        let height = if config.height > 0 {
            config.height
        } else {
            term_height as u32
        };

        info!(width, height, triangles = mesh.triangle_count(), "starting renderer");
        Ok(Self {
            renderer: Renderer::new(mesh, Camera::default(), width, height),
            canvas: TermCanvas::new(width as usize, height as usize),
            map: PixelMap::new(width, height),
            mode: config.draw_mode,
            title: config.title.clone(),
            running: true,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.event_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn event_loop(&mut self) -> anyhow::Result<()> {
        self.render()?;
        while self.running {
            // Block until the next user action
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                self.handle_key(code)?;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> anyhow::Result<()> {
        match code {
            KeyCode::Esc => {
                self.running = false;
                return Ok(());
            }
            KeyCode::Left => self.renderer.camera_mut().move_axis(Axis::X, false),
            KeyCode::Right => self.renderer.camera_mut().move_axis(Axis::X, true),
            KeyCode::Up => self.renderer.camera_mut().move_axis(Axis::Y, true),
            KeyCode::Down => self.renderer.camera_mut().move_axis(Axis::Y, false),
            KeyCode::Char('w') => self.renderer.camera_mut().move_axis(Axis::Z, true),
            KeyCode::Char('s') => self.renderer.camera_mut().move_axis(Axis::Z, false),
            KeyCode::Char('a') => self.renderer.camera_mut().rotate_axis(Axis::Y, false),
            KeyCode::Char('d') => self.renderer.camera_mut().rotate_axis(Axis::Y, true),
            KeyCode::Char('q') => self.renderer.camera_mut().rotate_axis(Axis::X, false),
            KeyCode::Char('e') => self.renderer.camera_mut().rotate_axis(Axis::X, true),
            KeyCode::Char('+') => self.renderer.camera_mut().zoom(true),
            KeyCode::Char('-') => self.renderer.camera_mut().zoom(false),
            // Mesh placement rotation, independent of the camera
            KeyCode::Char('j') => self.rotate_placement(0.0, -MESH_ROTATE_STEP),
            KeyCode::Char('l') => self.rotate_placement(0.0, MESH_ROTATE_STEP),
            KeyCode::Char('i') => self.rotate_placement(-MESH_ROTATE_STEP, 0.0),
            KeyCode::Char('k') => self.rotate_placement(MESH_ROTATE_STEP, 0.0),
            KeyCode::Enter => {
                self.mode = self.mode.next();
                info!(mode = ?self.mode, "draw mode toggled");
            }
            _ => return Ok(()),
        }
        self.render()
    }

    /// Add to the placed mesh's x/y rotation angles, in degrees.
    fn rotate_placement(&mut self, dx: f32, dy: f32) {
        self.renderer.placement_mut().rotation += Vector3::new(dx, dy, 0.0);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let mut out = stdout();
        match self.renderer.process() {
            Ok(mesh) => {
                self.canvas.clear();
                draw_mesh(&mut self.canvas, &mesh, self.mode, &self.map);
                self.canvas.draw(&mut out)?;
                self.status_line(
                    &mut out,
                    format!(
                        "{} | mode: {:?} | arrows/ws move  adqe rotate  jlik mesh  +/- zoom  enter mode  esc quit",
                        self.title, self.mode
                    ),
                )?;
            }
            Err(err) => {
                // Keep the previous frame; only the status line changes
                warn!(%err, "pipeline failed");
                self.status_line(&mut out, format!("{} | render failed: {}", self.title, err))?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn status_line<W: Write>(&self, writer: &mut W, text: String) -> std::io::Result<()> {
        queue!(
            writer,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(TermColor::Yellow),
            Print(text),
            ResetColor
        )
    }
}
