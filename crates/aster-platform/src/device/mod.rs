//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and handing the game a per-frame [`Canvas`]

mod gpu;

pub use gpu::{Canvas, Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
