//! Terminal front end: raw-mode crossterm surface, input listener thread and
//! the fixed-cadence render loop
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, terminal,
};
use spaceship_core::{
    render_frame, Control, ControlConfig, FrameStats, InputEvent, Mesh, Pose, Surface,
};
use std::io::{self, stdout, Stdout};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

pub mod config;
pub mod listener;
pub mod renderer;

pub use config::AppConfig;
pub use listener::{spawn_listener, CrosstermInput};
pub use renderer::TerminalSurface;

/// Apply every queued input event to `pose`, oldest first.
///
/// Returns [`Control::Quit`] as soon as a quit event arrives or the listener
/// has gone away; events queued after a quit are left unread.
pub fn drain_events(rx: &Receiver<InputEvent>, pose: &mut Pose, controls: &ControlConfig) -> Control {
    loop {
        match rx.try_recv() {
            Ok(event) => {
                if pose.apply(event, controls) == Control::Quit {
                    return Control::Quit;
                }
            }
            Err(TryRecvError::Empty) => return Control::Continue,
            Err(TryRecvError::Disconnected) => return Control::Quit,
        }
    }
}

/// Run `body` once `setup` has succeeded, then run `restore` whatever the
/// outcome. The first error wins.
fn with_restore<B, R>(setup: io::Result<()>, body: B, restore: R) -> io::Result<()>
where
    B: FnOnce() -> io::Result<()>,
    R: FnOnce() -> io::Result<()>,
{
    let result = setup.and_then(|()| body());
    let restored = restore();
    result.and(restored)
}

/// Leave the alternate screen and raw mode
fn restore_terminal() -> io::Result<()> {
    let shown = execute!(
        stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let cooked = terminal::disable_raw_mode();
    shown.and(cooked)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    pose: Pose,
    config: AppConfig,
    surface: TerminalSurface<Stdout>,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let pose = Pose::new(config.camera.player(&config.controls));

        Ok(Self {
            mesh,
            pose,
            config,
            surface: TerminalSurface::new(stdout(), width, height),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        })
    }

    /// Take over the terminal, run until quit, then restore the terminal
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let setup = execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        );
        with_restore(setup, || self.start(), restore_terminal)
    }

    fn start(&mut self) -> io::Result<()> {
        let (tx, rx) = mpsc::sync_channel(self.config.frame.input_queue);
        let listener = spawn_listener(CrosstermInput::new(), tx)?;
        log::info!("Render loop started");

        let result = self.main_loop(&rx);

        // A finished listener has already sent Quit; one still blocked on a
        // read is left behind and ends with the process.
        if listener.is_finished() && listener.join().is_err() {
            log::warn!("Input listener panicked");
        }
        match &result {
            Ok(()) => log::info!("Render loop stopped"),
            Err(e) => log::warn!("Render loop failed: {}", e),
        }
        result
    }

    fn main_loop(&mut self, rx: &Receiver<InputEvent>) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(self.config.frame.tick_ms);

        loop {
            let frame_start = Instant::now();

            // Handle input
            if drain_events(rx, &mut self.pose, &self.config.controls) == Control::Quit {
                return Ok(());
            }

            // Update
            self.pose.step(&self.config.physics);

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
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.surface.sync_size(width, height);

        if let Some(stats) = render_frame(
            &mut self.surface,
            &self.mesh,
            &self.pose,
            &self.config.render,
            self.config.frame.glyph,
        ) {
            self.stats = stats;
        }

        let status = self
            .config
            .debug
            .show_hud
            .then(|| status_line(&self.pose, self.fps, &self.stats));
        self.surface.set_status(status);

        self.surface.present()
    }
}

/// One-line HUD text
pub fn status_line(pose: &Pose, fps: f32, stats: &FrameStats) -> String {
    let p = pose.player.position;
    format!(
        "FPS {:.1} | pos ({:.1}, {:.1}, {:.1}) speed {:.3} | yaw {:.0}° pitch {:.0}° | {} drawn {} culled {} clipped | W/S thrust/brake A/D/R/F/mouse look Q quit",
        fps,
        p.x,
        p.y,
        p.z,
        pose.player.velocity.length(),
        pose.player.yaw.to_degrees(),
        pose.player.pitch.to_degrees(),
        stats.drawn,
        stats.culled,
        stats.clipped,
    )
}
