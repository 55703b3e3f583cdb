/// Terminal frontend for the watch-movement viewer
///
/// Owns the frame loop: keyboard events dispatch the store's mutation
/// operations, and every frame the camera rig, spin state and derived
/// layer appearances are folded into an ASCII rendering.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::cell::RefCell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};
use wm3d_core::{
    Camera, CameraRig, CameraView, Fields, Layer, LayerAppearance, SpinState, Transform, ViewStore,
    WatchMovement,
};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Opacity step for the `,` / `.` keys
const OPACITY_STEP: f32 = 0.1;
/// Speed step for the `[` / `]` keys
const SPEED_STEP: f32 = 0.1;

/// Main application struct for the terminal viewer
pub struct ViewerApp {
    store: ViewStore,
    movement: WatchMovement,
    rig: Rc<RefCell<CameraRig>>,
    camera: Camera,
    spin: SpinState,
    renderer: AsciiRenderer,
    running: bool,
    last_tick: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    /// Wire a (possibly pre-seeded) store to the rendering pieces. The
    /// camera rig follows the store's camera target through a slice
    /// subscription, so a view switch retargets it inside the mutation.
    pub fn new(mut store: ViewStore) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        log::debug!("terminal viewport {width}x{height}");

        let rig = Rc::new(RefCell::new(CameraRig::new(store.state().camera_target)));
        {
            let rig = Rc::clone(&rig);
            store.subscribe(Fields::CAMERA_TARGET, move |state| {
                rig.borrow_mut().retarget(state.camera_target);
            });
        }

        let camera = Camera::from_preset(store.state().camera_target, width as u32, height as u32);

        Ok(Self {
            store,
            movement: WatchMovement::build(),
            rig,
            camera,
            spin: SpinState::new(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_tick: Instant::now(),
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
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        self.last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Advance the continuous pieces by the elapsed frame time
            let now = Instant::now();
            let dt = (now - self.last_tick).as_secs_f32();
            self.last_tick = now;
            self.tick(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Per-frame update: spin the movement and ease the camera
    fn tick(&mut self, dt: f32) {
        self.spin.advance(dt, self.store.state().rotation_speed);
        let mut rig = self.rig.borrow_mut();
        rig.advance(dt);
        self.camera.set_pose(rig.current_position, rig.current_target);
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }

                // Layer visibility
                KeyCode::Char(c @ '1'..='6') => {
                    self.store.toggle_layer(Layer::ALL[c as usize - '1' as usize]);
                }
                KeyCode::Char('!') => self.store.show_only_layer(Layer::Case),
                KeyCode::Char('@') => self.store.show_only_layer(Layer::BasePlate),
                KeyCode::Char('#') => self.store.show_only_layer(Layer::GearTrain),
                KeyCode::Char('$') => self.store.show_only_layer(Layer::Escapement),
                KeyCode::Char('%') => self.store.show_only_layer(Layer::Balance),
                KeyCode::Char('^') => self.store.show_only_layer(Layer::Hands),
                KeyCode::Char('a') => self.store.reveal_all(),

                // Highlight and appearance
                KeyCode::Char('h') => {
                    let next = next_highlight(self.store.state().highlighted);
                    self.store.set_highlighted_layer(next);
                }
                KeyCode::Char('x') => {
                    let exploded = self.store.state().exploded;
                    self.store.set_exploded(!exploded);
                }
                KeyCode::Char(',') => self.nudge_opacity(-OPACITY_STEP),
                KeyCode::Char('.') => self.nudge_opacity(OPACITY_STEP),

                // Rotation speed
                KeyCode::Char('[') => {
                    let speed = self.store.state().rotation_speed;
                    self.store.set_rotation_speed(speed - SPEED_STEP);
                }
                KeyCode::Char(']') => {
                    let speed = self.store.state().rotation_speed;
                    self.store.set_rotation_speed(speed + SPEED_STEP);
                }

                // Camera presets
                KeyCode::Char('i') => self.store.set_camera_view(CameraView::Isometric),
                KeyCode::Char('t') => self.store.set_camera_view(CameraView::Top),
                KeyCode::Char('y') => self.store.set_camera_view(CameraView::Side),
                KeyCode::Char('g') => self.store.set_camera_view(CameraView::GearTrain),
                KeyCode::Char('e') => self.store.set_camera_view(CameraView::Escapement),
                KeyCode::Char('b') => self.store.set_camera_view(CameraView::Balance),

                _ => {}
            }
        }
        Ok(())
    }

    /// Opacity keys act on the highlighted layer; no highlight, no-op
    fn nudge_opacity(&mut self, delta: f32) {
        if let Some(layer) = self.store.state().highlighted {
            let opacity = self.store.state().opacity_of(layer);
            self.store.set_layer_opacity(layer, opacity + delta);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let state = self.store.state();
        for layer in Layer::ALL {
            let appearance = LayerAppearance::derive(layer, state);
            if !appearance.visible {
                continue;
            }
            let model = Transform::layer_matrix(self.spin.angle, appearance.lift);
            self.renderer.render_mesh(
                self.movement.mesh(layer),
                &model,
                &self.camera,
                appearance.opacity,
                appearance.highlighted,
            );
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let state = self.store.state();
        let highlight = state
            .highlighted
            .map(Layer::label)
            .unwrap_or("none");
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WM3D | view: {} | speed: {:.2} | exploded: {} | highlight: {} | FPS: {:.1}",
                state.camera_view.label(),
                state.rotation_speed,
                if state.exploded { "on" } else { "off" },
                highlight,
                self.fps
            )),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkGrey),
            Print(
                "1-6 toggle layer  shift+1-6 isolate  a all  h highlight  ,/. opacity  \
                 x explode  [/] speed  i/t/y/g/e/b views  q quit"
            ),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Cycle order for the highlight key: none, then each layer in stack order
fn next_highlight(current: Option<Layer>) -> Option<Layer> {
    match current {
        None => Some(Layer::ALL[0]),
        Some(layer) if layer.index() + 1 < Layer::COUNT => Some(Layer::ALL[layer.index() + 1]),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_cycle_visits_every_layer_once() {
        let mut current = None;
        let mut seen = Vec::new();
        loop {
            current = next_highlight(current);
            match current {
                Some(layer) => seen.push(layer),
                None => break,
            }
        }
        assert_eq!(seen, Layer::ALL.to_vec());
    }
}
