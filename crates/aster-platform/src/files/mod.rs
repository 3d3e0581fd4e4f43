//! Synchronous file loading.
//!
//! One blocking whole-file read with an explicit failure taxonomy. Meant
//! for initialization-time asset access; nothing here belongs on a
//! per-frame path.

mod loader;

pub use loader::{load_file, FileBuffer, LoadError};
