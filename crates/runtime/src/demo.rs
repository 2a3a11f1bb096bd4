use crate::actions;
use crate::config::DemoConfig;
use crate::context::DemoContext;
use crate::frame::{FrameLoop, FrameStatus};
use crate::wiring::{ControlIds, build_panel};
use cubelab_common::Color;
use cubelab_input::{Action, KeyBindings};
use cubelab_kernel::TimeSource;
use cubelab_panel::{ControlId, FolderId, Panel, PanelError};
use cubelab_render::{Renderer, SurfaceSize};
use std::rc::Rc;

/// The whole demo: context, panel, key bindings and frame loop.
///
/// The panel is kept beside the context rather than inside it, so a panel
/// write can borrow both at once.
pub struct Demo {
    ctx: DemoContext,
    panel: Panel<DemoContext>,
    ids: ControlIds,
    keys: KeyBindings,
    frames: FrameLoop,
}

impl Demo {
    pub fn new(config: &DemoConfig, time: Rc<dyn TimeSource>, device_pixel_ratio: f32) -> Self {
        let ctx = DemoContext::new(config, time, device_pixel_ratio);
        let (mut panel, ids) = build_panel(&config.panel.title, config.panel.width);
        panel.set_open(FolderId::ROOT, config.panel.open);
        let keys = KeyBindings::default();
        tracing::info!(
            "demo ready: geometry {}, {} panel controls, {} key bindings",
            ctx.scene.mesh().geometry().id().short(),
            panel.len(),
            keys.len()
        );
        Self {
            ctx,
            panel,
            ids,
            keys,
            frames: FrameLoop::new(),
        }
    }

    pub fn context(&self) -> &DemoContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut DemoContext {
        &mut self.ctx
    }

    pub fn panel(&self) -> &Panel<DemoContext> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel<DemoContext> {
        &mut self.panel
    }

    pub fn ids(&self) -> &ControlIds {
        &self.ids
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    /// Dispatch a logical key press. Returns the action it mapped to.
    pub fn handle_key(&mut self, key: &str) -> Action {
        let action = self.keys.action_for(key);
        match action {
            Action::TogglePanel => {
                self.panel.toggle_hidden();
            }
            Action::Noop => {}
        }
        action
    }

    /// Window resized to a logical `width` x `height`. Returns the new
    /// drawing-surface size.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> SurfaceSize {
        let ctx = &mut self.ctx;
        ctx.viewport
            .resize(width, height, device_pixel_ratio, &mut ctx.camera)
    }

    pub fn tick<R: Renderer>(&mut self, renderer: &mut R) -> FrameStatus<R::Output> {
        self.frames.tick(&mut self.ctx, renderer)
    }

    pub fn shutdown(&mut self) {
        self.frames.stop(&mut self.ctx);
    }

    pub fn spin(&mut self) {
        actions::spin(&mut self.ctx);
    }

    pub fn toggle_rotation(&mut self) -> bool {
        actions::toggle_rotation(&mut self.ctx)
    }

    pub fn set_number(&mut self, id: ControlId, value: f64) -> Result<f64, PanelError> {
        self.panel.set_number(&mut self.ctx, id, value)
    }

    pub fn set_bool(&mut self, id: ControlId, value: bool) -> Result<(), PanelError> {
        self.panel.set_bool(&mut self.ctx, id, value)
    }

    pub fn toggle(&mut self, id: ControlId) -> Result<bool, PanelError> {
        self.panel.toggle(&mut self.ctx, id)
    }

    pub fn set_color(&mut self, id: ControlId, value: Color) -> Result<(), PanelError> {
        self.panel.set_color(&mut self.ctx, id, value)
    }

    pub fn invoke(&mut self, id: ControlId) -> Result<(), PanelError> {
        self.panel.invoke(&mut self.ctx, id)
    }
}

impl std::fmt::Debug for Demo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Demo")
            .field("ctx", &self.ctx)
            .field("panel", &self.panel)
            .field("frames", &self.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubelab_kernel::ManualTime;
    use cubelab_render::DebugTextRenderer;
    use std::time::Duration;

    fn demo() -> (Rc<ManualTime>, Demo) {
        let time = Rc::new(ManualTime::new());
        let demo = Demo::new(&DemoConfig::default(), time.clone(), 1.0);
        (time, demo)
    }

    #[test]
    fn h_toggles_the_panel_every_time() {
        let (_time, mut demo) = demo();
        assert!(!demo.panel().is_hidden());
        for i in 0..5 {
            assert_eq!(demo.handle_key("h"), Action::TogglePanel);
            assert_eq!(demo.panel().is_hidden(), i % 2 == 0);
        }
    }

    #[test]
    fn other_keys_do_nothing() {
        let (_time, mut demo) = demo();
        assert_eq!(demo.handle_key("H"), Action::Noop);
        assert_eq!(demo.handle_key("x"), Action::Noop);
        assert!(!demo.panel().is_hidden());
        assert!(!demo.context().scene.rotating());
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let (_time, mut demo) = demo();
        let surface = demo.resize(800.0, 600.0, 3.0);
        assert!((demo.context().camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(
            surface,
            SurfaceSize {
                width: 1600,
                height: 1200
            }
        );

        let surface = demo.resize(801.0, 333.0, 1.5);
        assert_eq!(
            surface,
            SurfaceSize {
                width: 1201,
                height: 499
            }
        );
    }

    #[test]
    fn panel_starts_closed_unless_configured_open() {
        let (_time, closed) = demo();
        assert!(!closed.panel().is_open(FolderId::ROOT));

        let mut config = DemoConfig::default();
        config.panel.open = true;
        let open = Demo::new(&config, Rc::new(ManualTime::new()), 1.0);
        assert!(open.panel().is_open(FolderId::ROOT));
        assert!(open.panel().folders().iter().all(|f| !f.is_open()));
    }

    #[test]
    fn ruota_then_next_frame_uses_elapsed_time() {
        let (time, mut demo) = demo();
        let mut text = DebugTextRenderer::new();
        time.advance(Duration::from_millis(750));
        let ruota = demo.ids().ruota;
        demo.invoke(ruota).unwrap();

        let FrameStatus::Continue(frame) = demo.tick(&mut text) else {
            panic!("loop stopped");
        };
        assert!(frame.contains("rotating=true"));
        assert_eq!(demo.context().scene.mesh().transform.rotation.y, 0.75);
    }

    #[test]
    fn shutdown_stops_ticks() {
        let (_time, mut demo) = demo();
        let mut text = DebugTextRenderer::new();
        demo.toggle_rotation();
        demo.spin();
        demo.shutdown();
        assert_eq!(demo.tick(&mut text), FrameStatus::Stopped);
        assert_eq!(demo.context().scheduler.pending(), 0);
        assert_eq!(text.frames(), 0);
    }

    #[test]
    fn event_log_stays_bounded_across_many_frames() {
        let (time, mut demo) = demo();
        let mut text = DebugTextRenderer::new();
        let ids = demo.ids().clone();
        for i in 0..5000 {
            demo.set_number(ids.segments[0], (i % 10 + 1) as f64).unwrap();
            demo.invoke(ids.ruota).unwrap();
            assert!(matches!(demo.tick(&mut text), FrameStatus::Continue(_)));
            assert!(demo.context().scene.events().is_empty());
            time.advance(Duration::from_millis(16));
        }
        assert_eq!(demo.frames().frames(), 5000);
    }
}
