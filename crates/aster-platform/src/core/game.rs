use crate::device::Canvas;
use crate::input::Key;

/// Configuration handed to the engine at initialization.
///
/// The defaults are the gesture-gated profile: tell the player how to reach
/// fullscreen from the keyboard, and keep quit instructions hidden; the
/// host window carries its own close affordance.
#[derive(Debug, Copy, Clone)]
pub struct InitOptions {
    pub keyboard_fullscreen_instructions: bool,
    pub hide_quit_instructions: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            keyboard_fullscreen_instructions: true,
            hide_quit_instructions: true,
        }
    }
}

/// Engine contract implemented by the hosted game.
///
/// `init` runs once, on the first user gesture, after audio output has
/// started. Returning `false` is fatal to the session: the frame loop never
/// starts and no further callbacks arrive. Any user-visible error reporting
/// for that case is the engine's responsibility.
pub trait Game {
    /// One-time engine initialization.
    fn init(&mut self, options: &InitOptions) -> bool;

    /// Viewport dimensions changed. Also called once right after a
    /// successful `init` with the last known size.
    fn resize(&mut self, width: i32, height: i32);

    /// Advances the simulation by `dt_ms` milliseconds.
    fn update(&mut self, dt_ms: f32);

    /// Draws the current frame.
    fn draw(&mut self, canvas: &mut Canvas<'_>);

    /// Permanent key-press handler.
    fn key_down(&mut self, key: Key) {
        let _ = key;
    }

    /// Permanent key-release handler.
    fn key_up(&mut self, key: Key) {
        let _ = key;
    }

    /// A gamepad appeared.
    fn gamepad_connected(&mut self, pad: usize) {
        let _ = pad;
    }

    /// A gamepad went away.
    fn gamepad_disconnected(&mut self, pad: usize) {
        let _ = pad;
    }
}
