use cubelab_common::Transform;
use std::time::Duration;

/// Transform channel a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    RotationY,
}

impl TweenTarget {
    fn read(&self, t: &Transform) -> f32 {
        match self {
            Self::RotationY => t.rotation.y,
        }
    }

    fn write(&self, t: &mut Transform, value: f32) {
        match self {
            Self::RotationY => t.rotation.y = value,
        }
    }
}

/// Power1 ease-out: `1 - (1 - t)^2`, with `t` clamped to `[0, 1]`.
fn power1_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// One running interpolation from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
}

impl Tween {
    /// Value at time `now`, and whether the tween has finished.
    pub fn sample(&self, now: Duration) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let k = power1_out(progress);
        (self.from + (self.to - self.from) * k, false)
    }
}

/// Set of running tweens over one transform.
///
/// Tweens are independent: several may drive the same channel at once, in
/// which case the most recently started one is applied last and wins.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: Vec<Tween>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween of `target` towards `to`, starting from its current value.
    pub fn tween_to(
        &mut self,
        transform: &Transform,
        target: TweenTarget,
        to: f32,
        duration: Duration,
        now: Duration,
    ) {
        let from = target.read(transform);
        tracing::debug!("tween {target:?} {from:.3} -> {to:.3} over {duration:?}");
        self.tweens.push(Tween {
            target,
            from,
            to,
            start: now,
            duration,
        });
    }

    /// Apply every running tween at time `now`; finished tweens land on their
    /// end value and are removed. Returns the number still running.
    pub fn advance(&mut self, now: Duration, transform: &mut Transform) -> usize {
        self.tweens.retain(|tween| {
            let (value, done) = tween.sample(now);
            tween.target.write(transform, value);
            !done
        });
        self.tweens.len()
    }

    pub fn active(&self) -> usize {
        self.tweens.len()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
