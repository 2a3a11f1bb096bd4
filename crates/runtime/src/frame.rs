use crate::context::DemoContext;
use cubelab_render::Renderer;

/// Outcome of one [`FrameLoop::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus<O> {
    /// A frame was drawn; the host should request the next one.
    Continue(O),
    /// The loop was stopped; nothing was drawn.
    Stopped,
}

/// Per-frame driver. The host calls [`tick`](Self::tick) once per redraw and
/// requests another redraw while it returns [`FrameStatus::Continue`].
#[derive(Debug)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self {
            running: true,
            frames: 0,
        }
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick<R: Renderer>(
        &mut self,
        ctx: &mut DemoContext,
        renderer: &mut R,
    ) -> FrameStatus<R::Output> {
        if !self.running {
            return FrameStatus::Stopped;
        }

        let now = ctx.now();
        let elapsed = now.as_secs_f32();

        ctx.controls.update(&mut ctx.camera);
        ctx.run_due_tasks(now);
        ctx.animator
            .advance(now, &mut ctx.scene.mesh_mut().transform);

        if ctx.scene.rotating() {
            ctx.scene.mesh_mut().transform.rotation.y = elapsed;
        }

        let output = renderer.render(&ctx.scene, &ctx.camera);
        for event in ctx.scene.drain_events() {
            tracing::debug!(frame = self.frames, "{event:?}");
        }
        self.frames += 1;
        FrameStatus::Continue(output)
    }

    /// Stop the loop and drop all deferred work.
    pub fn stop(&mut self, ctx: &mut DemoContext) {
        if !self.running {
            return;
        }
        self.running = false;
        let cancelled = ctx.scheduler.cancel_all();
        ctx.pending_resume = None;
        ctx.animator.clear();
        tracing::info!(
            "frame loop stopped after {} frames, cancelled {cancelled} pending tasks",
            self.frames
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions;
    use crate::config::DemoConfig;
    use cubelab_kernel::{ManualTime, Scene};
    use cubelab_render::{DebugTextRenderer, PerspectiveCamera};
    use std::f32::consts::PI;
    use std::rc::Rc;
    use std::time::Duration;

    /// Records the mesh y-rotation and gate state at each draw.
    #[derive(Default)]
    struct Recorder {
        draws: Vec<(f32, bool)>,
    }

    impl Renderer for Recorder {
        type Output = ();

        fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) {
            self.draws
                .push((scene.mesh().transform.rotation.y, scene.rotating()));
        }
    }

    fn setup() -> (Rc<ManualTime>, DemoContext) {
        let time = Rc::new(ManualTime::new());
        let ctx = DemoContext::new(&DemoConfig::default(), time.clone(), 1.0);
        (time, ctx)
    }

    fn step(
        time: &ManualTime,
        frames: &mut FrameLoop,
        ctx: &mut DemoContext,
        rec: &mut Recorder,
        ms: u64,
    ) {
        time.advance(Duration::from_millis(ms));
        assert_eq!(frames.tick(ctx, rec), FrameStatus::Continue(()));
    }

    #[test]
    fn each_tick_draws_once() {
        let (_time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut text = DebugTextRenderer::new();
        for _ in 0..3 {
            assert!(matches!(
                frames.tick(&mut ctx, &mut text),
                FrameStatus::Continue(_)
            ));
        }
        assert_eq!(frames.frames(), 3);
        assert_eq!(text.frames(), 3);
    }

    #[test]
    fn gate_overwrites_rotation_with_elapsed_time() {
        let (time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        ctx.scene.mesh_mut().transform.rotation.y = 42.0;
        time.advance(Duration::from_millis(2500));
        actions::toggle_rotation(&mut ctx);
        frames.tick(&mut ctx, &mut rec);

        let (y, rotating) = rec.draws[0];
        assert!(rotating);
        assert!((y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn spin_with_gate_off_never_reenables() {
        let (time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        actions::spin(&mut ctx);
        for _ in 0..30 {
            step(&time, &mut frames, &mut ctx, &mut rec, 100);
        }

        assert!(rec.draws.iter().all(|(_, rotating)| !rotating));
        let (y, _) = *rec.draws.last().unwrap();
        assert!((y - 4.0 * PI).abs() < 1e-5);
        assert_eq!(ctx.animator.active(), 0);
        // Rotation only grows while the eased tween runs.
        assert!(rec.draws.windows(2).all(|w| w[1].0 >= w[0].0));
    }

    #[test]
    fn spin_with_gate_on_reenables_after_one_second() {
        let (time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        actions::toggle_rotation(&mut ctx);
        step(&time, &mut frames, &mut ctx, &mut rec, 100);
        let y0 = ctx.scene.mesh().transform.rotation.y;

        actions::spin(&mut ctx);
        assert!(!ctx.scene.rotating());
        assert_eq!(ctx.animator.active(), 2);

        step(&time, &mut frames, &mut ctx, &mut rec, 900);
        assert!(!ctx.scene.rotating());

        step(&time, &mut frames, &mut ctx, &mut rec, 100);
        assert!(ctx.scene.rotating());
        // The gate is back on, so this frame already shows elapsed time.
        let (y, rotating) = *rec.draws.last().unwrap();
        assert!(rotating);
        assert!((y - 1.1).abs() < 1e-5);
        assert!(y < y0 + 4.0 * PI);
    }

    #[test]
    fn stop_cancels_pending_work() {
        let (time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        actions::toggle_rotation(&mut ctx);
        actions::spin(&mut ctx);
        frames.stop(&mut ctx);

        assert_eq!(ctx.scheduler.pending(), 0);
        assert!(ctx.pending_resume.is_none());
        assert_eq!(ctx.animator.active(), 0);
        assert!(!frames.is_running());

        time.advance(Duration::from_secs(2));
        assert_eq!(frames.tick(&mut ctx, &mut rec), FrameStatus::Stopped);
        assert!(rec.draws.is_empty());
        assert!(!ctx.scene.rotating());
    }

    #[test]
    fn respin_while_paused_keeps_only_the_last_resume() {
        let (time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        actions::toggle_rotation(&mut ctx);
        actions::spin(&mut ctx);
        time.advance(Duration::from_millis(300));
        actions::toggle_rotation(&mut ctx);
        actions::spin(&mut ctx);

        // The first resume would have fired at 1000 ms.
        step(&time, &mut frames, &mut ctx, &mut rec, 700);
        assert!(!ctx.scene.rotating());
        step(&time, &mut frames, &mut ctx, &mut rec, 400);
        assert!(ctx.scene.rotating());
        step(&time, &mut frames, &mut ctx, &mut rec, 2000);
        assert!(ctx.scene.rotating());
        assert_eq!(ctx.scheduler.pending(), 0);
    }

    #[test]
    fn tick_drains_scene_events() {
        let (_time, mut ctx) = setup();
        let mut frames = FrameLoop::new();
        let mut rec = Recorder::default();

        assert_eq!(ctx.scene.events().len(), 1);
        actions::toggle_rotation(&mut ctx);
        ctx.scene.rebuild_geometry();
        assert_eq!(ctx.scene.events().len(), 4);

        frames.tick(&mut ctx, &mut rec);
        assert!(ctx.scene.events().is_empty());
    }
}
