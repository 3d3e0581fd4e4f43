//! Host-specific event translation.

pub(crate) mod winit;
