//! wgpu render backend for the cube demo.
//!
//! Draws the scene's single mesh with a flat colour, filled or as a wireframe
//! line list, over a black clear.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - GPU buffers mirror exactly one kernel geometry; when the mesh geometry id
//!   changes, the old buffers are destroyed after the new ones are uploaded.

mod device;
mod gpu;
mod shaders;

pub use device::{GpuError, request_device, surface_config};
pub use gpu::{WgpuFrame, WgpuRenderer};
