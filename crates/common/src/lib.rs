//! Shared value types used across the cubelab crates.

mod color;
mod types;

pub use color::{Color, ColorError};
pub use types::{GeometryId, Transform, ViewportSize};
