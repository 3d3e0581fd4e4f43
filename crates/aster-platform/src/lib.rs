//! Aster platform crate.
//!
//! Binds a game core to the native host: a gesture-gated session over the
//! window event loop, input devices, audio output, a GPU context, and a
//! synchronous file loader.

pub mod core;
pub mod device;
pub mod files;
pub mod input;
pub mod session;
pub mod time;
pub mod window;

pub mod logging;
