use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{AudioOutput, Game, InitOptions};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::platform::winit::translate_key_event;
use crate::input::GamepadWatcher;
use crate::session::Session;

/// Poll period for gamepad connections while the gesture gate is closed.
/// Once the session runs, the redraw cycle itself drives polling.
const GAMEPAD_POLL_PERIOD: Duration = Duration::from_millis(50);

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Fixed options handed to `Game::init` at bootstrap.
    pub options: InitOptions,
    pub gpu: GpuInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "aster".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            options: InitOptions::default(),
            gpu: GpuInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `game` and `audio` under the host event loop until the window
    /// closes.
    ///
    /// Engine and audio initialization wait for the first key or gamepad
    /// event; until then the window shows whatever the host clears it to
    /// and a start prompt goes to the user-message channel.
    pub fn run<G, A>(config: RuntimeConfig, game: G, audio: A) -> Result<()>
    where
        G: Game + 'static,
        A: AudioOutput + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = HostState::new(config, game, audio);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// Window-bound resources; exist from `resumed` onward.
struct Attached {
    window: Arc<Window>,
    gpu: Gpu,
}

struct HostState<G, A> {
    config: RuntimeConfig,
    session: Session<G, A>,
    gamepads: GamepadWatcher,
    attached: Option<Attached>,
    /// Origin for frame timestamps (milliseconds since runtime start).
    epoch: Instant,
}

impl<G, A> HostState<G, A>
where
    G: Game + 'static,
    A: AudioOutput + 'static,
{
    fn new(config: RuntimeConfig, game: G, audio: A) -> Self {
        let options = config.options;
        Self {
            config,
            session: Session::new(game, audio, options),
            gamepads: GamepadWatcher::new(),
            attached: None,
            epoch: Instant::now(),
        }
    }

    fn attach(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.config.gpu.clone()))
            .context("failed to create GPU context")?;

        // Startup viewport probe; the bootstrapper applies whatever is
        // stored here last.
        let size = window.inner_size();
        self.session.probe_viewport(size.width as i32, size.height as i32);

        self.attached = Some(Attached { window, gpu });
        Ok(())
    }

    /// Resize bridge: engine first, surface second, same notification.
    fn apply_resize(&mut self, new_size: PhysicalSize<u32>) {
        let forwarded = self
            .session
            .handle_resize(new_size.width as i32, new_size.height as i32);

        if forwarded {
            if let Some(att) = self.attached.as_mut() {
                att.gpu.resize(new_size);
                att.window.request_redraw();
            }
        }
    }

    /// One animation frame: acquire, drive the session, present.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.session.is_running() {
            return;
        }
        let Some(att) = self.attached.as_mut() else {
            return;
        };

        let mut frame = match att.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                if att.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("surface memory exhausted; shutting down");
                    event_loop.exit();
                }
                return;
            }
        };

        let now_ms = self.epoch.elapsed().as_secs_f64() * 1_000.0;
        {
            let mut canvas = att.gpu.canvas(&mut frame);
            self.session.frame(now_ms, |game| game.draw(&mut canvas));
        }

        att.window.pre_present_notify();
        att.gpu.submit(frame);
    }
}

impl<G, A> ApplicationHandler for HostState<G, A>
where
    G: Game + 'static,
    A: AudioOutput + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.attached.is_some() {
            return;
        }

        match self.attach(event_loop) {
            Ok(()) => log::info!("press a key or connect a gamepad to start"),
            Err(e) => {
                log::error!("failed to bring up the host window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested; leaving the event loop");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.session.handle_input(translate_key_event(&event));
            }

            WindowEvent::Resized(new_size) => self.apply_resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) = self.attached.as_ref().map(|a| a.window.inner_size()) {
                    self.apply_resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Gamepad traffic does not flow through the window; poll it here so
        // a controller connect can open the gesture gate by itself.
        let (session, gamepads) = (&mut self.session, &mut self.gamepads);
        gamepads.poll(|ev| session.handle_input(ev));

        if self.session.is_running() {
            if let Some(att) = self.attached.as_ref() {
                att.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(
                Instant::now() + GAMEPAD_POLL_PERIOD,
            ));
        }
    }
}
