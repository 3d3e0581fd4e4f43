//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit or gilrs types.
//! Runtime code translates host events into [`InputEvent`]s; the session and
//! the hosted game only ever see those.

mod gamepad;
pub(crate) mod platform;
mod types;

pub use gamepad::GamepadWatcher;
pub use types::{InputEvent, Key};
