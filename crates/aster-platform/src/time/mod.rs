//! Frame timing.
//!
//! Provides stable, testable frame timing without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per session
//! - call `tick()` once per presented frame with the host timestamp

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
