//! Demo runtime: the shared application context, the spin and rotation
//! actions, the parameter panel wiring, the frame loop and startup config.
//!
//! # Invariants
//! - All state lives in one [`DemoContext`], passed explicitly to the frame
//!   loop, panel callbacks and key handlers.
//! - Only dimension and segment edits rebuild the geometry.
//! - While the rotation gate is on, every frame sets `rotation.y` to the
//!   elapsed time.
//! - At most one spin re-enable task is pending; stopping the loop cancels it.

pub mod actions;
pub mod config;
pub mod context;
pub mod demo;
pub mod frame;
pub mod wiring;

pub use config::{CameraConfig, ConfigError, DemoConfig, PanelConfig, WindowConfig};
pub use context::{Deferred, DemoContext};
pub use demo::Demo;
pub use frame::{FrameLoop, FrameStatus};
pub use wiring::{ControlIds, build_panel};
