use crate::config::DemoConfig;
use cubelab_common::ViewportSize;
use cubelab_kernel::{
    Animator, BasicMaterial, Clock, Scene, Scheduler, TaskHandle, TimeSource,
};
use cubelab_render::{OrbitControls, PerspectiveCamera, Viewport};
use std::rc::Rc;
use std::time::Duration;

/// Work deferred through the [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Flip the rotation gate.
    ToggleRotation,
}

/// Everything the frame loop, the panel callbacks and the event handlers share.
#[derive(Debug)]
pub struct DemoContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub clock: Clock,
    pub animator: Animator,
    pub scheduler: Scheduler<Deferred>,
    /// Re-enable task queued by the last spin, while it is still pending.
    pub pending_resume: Option<TaskHandle>,
}

impl DemoContext {
    pub fn new(config: &DemoConfig, time: Rc<dyn TimeSource>, device_pixel_ratio: f32) -> Self {
        let material = BasicMaterial {
            color: config.color,
            wireframe: config.wireframe,
        };
        let scene = Scene::new(config.geometry, material);

        let size = ViewportSize::new(config.window.width, config.window.height);
        let mut camera = PerspectiveCamera::new(
            config.camera.fov,
            size.aspect(),
            config.camera.near,
            config.camera.far,
        );
        camera.position.z = config.camera.z;

        let mut controls = OrbitControls::new();
        controls.enable_damping = config.camera.damping;

        Self {
            scene,
            camera,
            controls,
            viewport: Viewport::new(size, device_pixel_ratio),
            clock: Clock::new(time),
            animator: Animator::new(),
            scheduler: Scheduler::new(),
            pending_resume: None,
        }
    }

    /// Time since the context was created.
    pub fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Run every deferred task whose deadline has passed. Returns how many ran.
    pub fn run_due_tasks(&mut self, now: Duration) -> usize {
        let due = self.scheduler.take_due(now);
        for task in &due {
            match task {
                Deferred::ToggleRotation => {
                    let rotating = self.scene.toggle_rotation();
                    tracing::debug!("deferred rotation toggle fired, rotating={rotating}");
                }
            }
        }
        if let Some(handle) = self.pending_resume {
            if !self.scheduler.is_pending(handle) {
                self.pending_resume = None;
            }
        }
        due.len()
    }
}
