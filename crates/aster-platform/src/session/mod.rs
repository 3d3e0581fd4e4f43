//! Gesture-gated session.
//!
//! The session binds a game core and an audio backend to host callbacks.
//! Engine and audio initialization is deferred until the first qualifying
//! input event (key press, key release, gamepad connect or disconnect);
//! until then every gating channel feeds the one-shot gate instead of the
//! game's permanent handlers. The gate opens once and never re-arms.
//!
//! All state lives on this object and is mutated from the event-loop thread
//! only. A multi-threaded host would need to wrap the session in explicit
//! mutual exclusion before splitting resize and frame callbacks across
//! threads.

use crate::core::{AudioOutput, Game, InitOptions};
use crate::input::InputEvent;
use crate::time::{FrameClock, FrameTime};

/// Lifecycle of the gesture gate.
///
/// The phase only moves forward. `Initializing` is transient within a
/// single callback; `Running` and `Halted` are where a session ends up for
/// the rest of its life.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootPhase {
    /// Waiting for the first qualifying input event.
    Uninitialized,
    /// Bootstrap in progress.
    Initializing,
    /// Engine and audio are live; the frame loop may run.
    Running,
    /// Engine initialization failed. Terminal, no retry for this session.
    Halted,
}

/// Last known viewport size in integer pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowState {
    pub width: i32,
    pub height: i32,
}

/// Platform session: gesture gate, frame driver, and resize bridge in one
/// explicit object.
pub struct Session<G, A> {
    game: G,
    audio: A,
    options: InitOptions,
    phase: BootPhase,
    window: WindowState,
    clock: FrameClock,
}

impl<G: Game, A: AudioOutput> Session<G, A> {
    pub fn new(game: G, audio: A, options: InitOptions) -> Self {
        Self {
            game,
            audio,
            options,
            phase: BootPhase::Uninitialized,
            window: WindowState::default(),
            clock: FrameClock::new(),
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    /// True once bootstrap succeeded; the host keys the frame loop on this.
    pub fn is_running(&self) -> bool {
        self.phase == BootPhase::Running
    }

    /// Last known viewport size.
    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Records the startup viewport size without notifying collaborators.
    pub fn probe_viewport(&mut self, width: i32, height: i32) {
        self.window = WindowState { width, height };
    }

    /// Feeds one gating input event.
    ///
    /// The first event while uninitialized runs bootstrap; on success the
    /// triggering event, and only that event, is replayed to its own
    /// permanent handler, so the gesture that woke the session is not lost.
    /// While running, events forward directly. After a failed bootstrap
    /// they are dropped silently.
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.phase {
            BootPhase::Uninitialized => {
                self.bootstrap();
                if self.phase == BootPhase::Running {
                    self.forward(event);
                }
            }
            BootPhase::Running => self.forward(event),
            BootPhase::Initializing | BootPhase::Halted => {}
        }
    }

    /// Viewport changed.
    ///
    /// The new size is always recorded. Returns true when the engine
    /// consumed it, in which case the host must resize the drawing surface
    /// next: engine first, surface second, same notification. Before
    /// bootstrap only the record is kept; the bootstrapper applies it.
    pub fn handle_resize(&mut self, width: i32, height: i32) -> bool {
        self.window = WindowState { width, height };

        if self.phase != BootPhase::Running {
            return false;
        }

        self.game.resize(width, height);
        true
    }

    /// Drives one frame at host timestamp `now_ms` (milliseconds).
    ///
    /// Within an invocation, audio advances first, then the engine update,
    /// then `present` (the draw step, supplied by the host so the session
    /// stays free of GPU types). Returns `None`, touching nothing, unless
    /// the session is running.
    pub fn frame<F>(&mut self, now_ms: f64, present: F) -> Option<FrameTime>
    where
        F: FnOnce(&mut G),
    {
        if self.phase != BootPhase::Running {
            return None;
        }

        let ft = self.clock.tick(now_ms);
        self.audio.pump();
        self.game.update(ft.dt_ms);
        present(&mut self.game);

        Some(ft)
    }

    fn bootstrap(&mut self) {
        // The phase switch is the handler rebind: from here on no event can
        // reach the one-shot gate again.
        self.phase = BootPhase::Initializing;

        self.audio.start();

        if !self.game.init(&self.options) {
            log::debug!("session: engine initialization failed; halting");
            self.phase = BootPhase::Halted;
            return;
        }

        let WindowState { width, height } = self.window;
        self.game.resize(width, height);

        self.phase = BootPhase::Running;
        log::debug!("session: running at {width}x{height}");
    }

    fn forward(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.game.key_down(key),
            InputEvent::KeyUp(key) => self.game.key_up(key),
            InputEvent::GamepadConnected(pad) => self.game.gamepad_connected(pad),
            InputEvent::GamepadDisconnected(pad) => self.game.gamepad_disconnected(pad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::device::Canvas;
    use crate::input::Key;

    // Shared call log; fine under the single-threaded session model.
    type CallLog = Rc<RefCell<Vec<String>>>;

    struct StubGame {
        log: CallLog,
        init_ok: bool,
    }

    impl Game for StubGame {
        fn init(&mut self, options: &InitOptions) -> bool {
            self.log.borrow_mut().push(format!(
                "init fullscreen={} hide_quit={}",
                options.keyboard_fullscreen_instructions, options.hide_quit_instructions
            ));
            self.init_ok
        }

        fn resize(&mut self, width: i32, height: i32) {
            self.log.borrow_mut().push(format!("resize {width}x{height}"));
        }

        fn update(&mut self, dt_ms: f32) {
            self.log.borrow_mut().push(format!("update {dt_ms}"));
        }

        fn draw(&mut self, _canvas: &mut Canvas<'_>) {
            unreachable!("tests present without a GPU canvas");
        }

        fn key_down(&mut self, key: Key) {
            self.log.borrow_mut().push(format!("key_down {key:?}"));
        }

        fn key_up(&mut self, key: Key) {
            self.log.borrow_mut().push(format!("key_up {key:?}"));
        }

        fn gamepad_connected(&mut self, pad: usize) {
            self.log.borrow_mut().push(format!("pad_connected {pad}"));
        }

        fn gamepad_disconnected(&mut self, pad: usize) {
            self.log.borrow_mut().push(format!("pad_disconnected {pad}"));
        }
    }

    struct StubAudio {
        log: CallLog,
    }

    impl AudioOutput for StubAudio {
        fn start(&mut self) {
            self.log.borrow_mut().push("audio_start".into());
        }

        fn pump(&mut self) {
            self.log.borrow_mut().push("audio_pump".into());
        }
    }

    fn session(init_ok: bool) -> (Session<StubGame, StubAudio>, CallLog) {
        let log: CallLog = Rc::default();
        let game = StubGame { log: log.clone(), init_ok };
        let audio = StubAudio { log: log.clone() };
        (Session::new(game, audio, InitOptions::default()), log)
    }

    fn count(log: &CallLog, prefix: &str) -> usize {
        log.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }

    // ── bootstrap ─────────────────────────────────────────────────────────

    #[test]
    fn first_keydown_bootstraps_in_order_and_replays() {
        let (mut s, log) = session(true);
        s.probe_viewport(640, 480);

        s.handle_input(InputEvent::KeyDown(Key::Space));

        assert_eq!(s.phase(), BootPhase::Running);
        assert_eq!(
            *log.borrow(),
            vec![
                "audio_start".to_string(),
                "init fullscreen=true hide_quit=true".to_string(),
                "resize 640x480".to_string(),
                "key_down Space".to_string(),
            ]
        );
    }

    #[test]
    fn every_gating_channel_opens_the_gate() {
        let gestures = [
            InputEvent::KeyDown(Key::Enter),
            InputEvent::KeyUp(Key::Enter),
            InputEvent::GamepadConnected(0),
            InputEvent::GamepadDisconnected(0),
        ];

        for gesture in gestures {
            let (mut s, _log) = session(true);
            s.handle_input(gesture);
            assert_eq!(s.phase(), BootPhase::Running, "gesture {gesture:?}");
        }
    }

    #[test]
    fn a_triggering_keyup_replays_as_keyup() {
        let (mut s, log) = session(true);
        s.handle_input(InputEvent::KeyUp(Key::Z));

        assert_eq!(log.borrow().last().unwrap(), "key_up Z");
        assert_eq!(count(&log, "key_down"), 0);
    }

    #[test]
    fn later_events_never_reinitialize() {
        let (mut s, log) = session(true);
        s.handle_input(InputEvent::KeyDown(Key::A));
        s.handle_input(InputEvent::KeyUp(Key::A));
        s.handle_input(InputEvent::GamepadConnected(1));

        assert_eq!(count(&log, "audio_start"), 1);
        assert_eq!(count(&log, "init"), 1);
        assert_eq!(count(&log, "key_up"), 1);
        assert_eq!(count(&log, "pad_connected"), 1);
    }

    // ── failed engine init ────────────────────────────────────────────────

    #[test]
    fn failed_init_halts_without_replay_or_frames() {
        let (mut s, log) = session(false);
        s.handle_input(InputEvent::KeyDown(Key::Space));

        assert_eq!(s.phase(), BootPhase::Halted);
        // Audio had already started when init failed; nothing after it ran.
        assert_eq!(*log.borrow().last().unwrap(), "init fullscreen=true hide_quit=true");
        assert_eq!(count(&log, "key_down"), 0);

        assert!(s.frame(16.0, |_| unreachable!("frame while halted")).is_none());
        assert_eq!(count(&log, "update"), 0);
    }

    #[test]
    fn halted_sessions_drop_events_silently() {
        let (mut s, log) = session(false);
        s.handle_input(InputEvent::KeyDown(Key::Space));
        let len_after_halt = log.borrow().len();

        s.handle_input(InputEvent::KeyUp(Key::Space));
        s.handle_input(InputEvent::GamepadConnected(2));

        assert_eq!(log.borrow().len(), len_after_halt);
        assert_eq!(count(&log, "init"), 1);
    }

    // ── frame driver ──────────────────────────────────────────────────────

    #[test]
    fn frames_do_not_run_before_bootstrap() {
        let (mut s, log) = session(true);
        assert!(s.frame(0.0, |_| unreachable!("frame before gesture")).is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn first_frame_has_zero_delta_then_exact_differences() {
        let (mut s, _log) = session(true);
        s.handle_input(InputEvent::KeyDown(Key::Space));

        let first = s.frame(1000.0, |_| {}).unwrap();
        assert_eq!(first.dt_ms, 0.0);

        let second = s.frame(1016.5, |_| {}).unwrap();
        assert_eq!(second.dt_ms, 16.5);
    }

    #[test]
    fn frame_orders_audio_update_present() {
        let (mut s, log) = session(true);
        s.handle_input(InputEvent::KeyDown(Key::Space));
        log.borrow_mut().clear();

        s.frame(5.0, |game| game.log.borrow_mut().push("present".into()));

        assert_eq!(
            *log.borrow(),
            vec!["audio_pump".to_string(), "update 0".to_string(), "present".to_string()]
        );
    }

    // ── resize bridge ─────────────────────────────────────────────────────

    #[test]
    fn window_state_tracks_the_last_notification() {
        let (mut s, _log) = session(true);
        s.handle_resize(100, 200);
        s.handle_resize(300, 400);
        s.handle_resize(1920, 1080);

        assert_eq!(s.window(), WindowState { width: 1920, height: 1080 });
    }

    #[test]
    fn pre_bootstrap_resizes_are_stored_but_not_forwarded() {
        let (mut s, log) = session(true);
        s.probe_viewport(640, 480);

        assert!(!s.handle_resize(800, 600));
        assert_eq!(count(&log, "resize"), 0);

        // Bootstrap applies the latest stored size, not the startup probe.
        s.handle_input(InputEvent::KeyDown(Key::Space));
        assert_eq!(count(&log, "resize 800x600"), 1);
    }

    #[test]
    fn running_resizes_reach_the_engine_and_request_surface_resize() {
        let (mut s, log) = session(true);
        s.handle_input(InputEvent::KeyDown(Key::Space));

        assert!(s.handle_resize(1024, 768));
        assert_eq!(count(&log, "resize 1024x768"), 1);
    }
}
