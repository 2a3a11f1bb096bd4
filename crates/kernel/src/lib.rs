//! Scene kernel: the scene state, box geometry generation and rebuild, and the
//! time-driven pieces the frame loop advances (clock, tweens, timers).
//!
//! # Invariants
//! - The mesh owns exactly one live geometry; a rebuild disposes the old one.
//! - Geometry is only rebuilt through [`Scene::rebuild_geometry`].
//! - Deferred work only runs when its owner polls the scheduler.

pub mod animation;
pub mod clock;
pub mod geometry;
pub mod scene;
pub mod schedule;

pub use animation::{Animator, Tween, TweenTarget};
pub use clock::{Clock, ManualTime, MonotonicTime, TimeSource};
pub use geometry::{BoxField, BoxGeometry, BoxParams, GeometryGroup, GeometryVertex};
pub use scene::{BasicMaterial, DEFAULT_COLOR, Mesh, Scene, SceneEvent};
pub use schedule::{Scheduler, TaskHandle};
