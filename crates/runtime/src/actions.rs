use crate::context::{Deferred, DemoContext};
use cubelab_kernel::TweenTarget;
use std::f32::consts::PI;
use std::time::Duration;

/// Extra y-rotation added by one spin.
pub const SPIN_TURN: f32 = 4.0 * PI;
/// Length of the spin tween, and the delay before the gate is flipped back.
pub const SPIN_DURATION: Duration = Duration::from_secs(1);

/// Spin the mesh two full turns around y.
///
/// With the rotation gate on, the gate is switched off, a tween is started and
/// a gate toggle is scheduled [`SPIN_DURATION`] later. A second tween is then
/// started unconditionally, so a spin with the gate on issues two overlapping
/// tweens towards the same end value. Scheduling a new toggle cancels one still
/// pending from an earlier spin, so only the last toggle fires: gate on, spin,
/// ruota, spin ends with the gate on, where two uncancelled toggles would
/// leave it off.
pub fn spin(ctx: &mut DemoContext) {
    let now = ctx.now();
    let to = ctx.scene.mesh().transform.rotation.y + SPIN_TURN;

    if ctx.scene.rotating() {
        ctx.scene.set_rotating(false);
        ctx.animator.tween_to(
            &ctx.scene.mesh().transform,
            TweenTarget::RotationY,
            to,
            SPIN_DURATION,
            now,
        );
        if let Some(previous) = ctx.pending_resume.take() {
            ctx.scheduler.cancel(previous);
        }
        let handle = ctx
            .scheduler
            .schedule(now, SPIN_DURATION, Deferred::ToggleRotation);
        ctx.pending_resume = Some(handle);
    }

    ctx.animator.tween_to(
        &ctx.scene.mesh().transform,
        TweenTarget::RotationY,
        to,
        SPIN_DURATION,
        now,
    );
    tracing::debug!("spin to rotation.y={to:.3}");
}

/// Flip the rotation gate. Returns the new state.
pub fn toggle_rotation(ctx: &mut DemoContext) -> bool {
    ctx.scene.toggle_rotation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use cubelab_kernel::ManualTime;
    use std::rc::Rc;

    fn setup() -> (Rc<ManualTime>, DemoContext) {
        let time = Rc::new(ManualTime::new());
        let ctx = DemoContext::new(&DemoConfig::default(), time.clone(), 1.0);
        (time, ctx)
    }

    #[test]
    fn spin_with_gate_off_issues_one_tween() {
        let (_time, mut ctx) = setup();
        spin(&mut ctx);
        assert_eq!(ctx.animator.active(), 1);
        assert_eq!(ctx.scheduler.pending(), 0);
        assert!(ctx.pending_resume.is_none());
        assert!(!ctx.scene.rotating());
        let tween = &ctx.animator.tweens()[0];
        assert_eq!(tween.target, TweenTarget::RotationY);
        assert_eq!(tween.from, 0.0);
        assert!((tween.to - SPIN_TURN).abs() < 1e-6);
        assert_eq!(tween.duration, SPIN_DURATION);
    }

    #[test]
    fn spin_with_gate_on_issues_two_tweens_and_a_resume() {
        let (_time, mut ctx) = setup();
        assert!(toggle_rotation(&mut ctx));
        spin(&mut ctx);
        assert!(!ctx.scene.rotating());
        assert_eq!(ctx.animator.active(), 2);
        let tweens = ctx.animator.tweens();
        assert_eq!(tweens[0].to, tweens[1].to);
        assert_eq!(ctx.scheduler.pending(), 1);
        assert!(ctx.pending_resume.is_some());
    }

    #[test]
    fn second_spin_replaces_pending_resume() {
        let (time, mut ctx) = setup();
        toggle_rotation(&mut ctx);
        spin(&mut ctx);
        let first = ctx.pending_resume;

        time.advance(Duration::from_millis(300));
        toggle_rotation(&mut ctx);
        spin(&mut ctx);

        assert_eq!(ctx.scheduler.pending(), 1);
        assert_ne!(ctx.pending_resume, first);
        assert!(!ctx.scheduler.is_pending(first.unwrap()));
    }

    #[test]
    fn toggle_rotation_flips_without_animation() {
        let (_time, mut ctx) = setup();
        assert!(toggle_rotation(&mut ctx));
        assert!(!toggle_rotation(&mut ctx));
        assert_eq!(ctx.animator.active(), 0);
        assert_eq!(ctx.scene.mesh().transform.rotation.y, 0.0);
    }
}
