//! Rendering adapter: renderer-agnostic interface, camera, orbit controls and
//! the viewport controller.
//!
//! # Invariants
//! - Renderers never mutate scene state.
//! - Camera aspect always matches the last viewport size.
//! - The effective pixel ratio never exceeds [`MAX_PIXEL_RATIO`].

mod camera;
mod renderer;
mod viewport;

pub use camera::{OrbitControls, PerspectiveCamera};
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::{MAX_PIXEL_RATIO, SurfaceSize, Viewport};
