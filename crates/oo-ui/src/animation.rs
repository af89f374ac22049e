//! Animation primitives: easing functions, tweens, and retargetable values.

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Cubic ease-in-out (smooth start and end). Used for panel transitions.
    pub fn ease_in_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
        }
    }
}

/// Value between `from` and `to` after `elapsed_ms` of a `duration_ms`
/// transition, using the default panel easing.
///
/// A zero duration, or an elapsed time at or past the duration, yields `to`
/// exactly.
pub fn interpolate(from: f32, to: f32, elapsed_ms: u32, duration_ms: u32) -> f32 {
    interpolate_eased(from, to, elapsed_ms, duration_ms, easing::ease_in_out_cubic)
}

/// Like [`interpolate`] with an explicit easing function.
pub fn interpolate_eased(
    from: f32,
    to: f32,
    elapsed_ms: u32,
    duration_ms: u32,
    easing: fn(f32) -> f32,
) -> f32 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return to;
    }
    let t = elapsed_ms as f32 / duration_ms as f32;
    from + (to - from) * easing(t)
}

/// A running animation that interpolates between two values.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    /// Starting value.
    pub start: f32,
    /// Target value.
    pub end: f32,
    /// Total duration in milliseconds.
    pub duration_ms: u32,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u32,
    /// Easing function to apply.
    pub easing: fn(f32) -> f32,
}

impl Tween {
    /// Create a new tween animation.
    pub fn new(start: f32, end: f32, duration_ms: u32, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// A tween that is already resting at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0, easing::linear)
    }

    /// Advance by `dt_ms` and return the current interpolated value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.value()
    }

    /// Check if the animation has completed.
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        interpolate_eased(
            self.start,
            self.end,
            self.elapsed_ms,
            self.duration_ms,
            self.easing,
        )
    }
}

/// How a value moves to a new target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Jump to the target on the next read.
    Snap,
    /// Interpolate from the current value over the given duration.
    Tween { duration_ms: u32 },
}

/// A value that can be retargeted while it is still moving.
///
/// Retargeting starts a fresh tween from wherever the value currently is,
/// so an interrupted transition never jumps. Retargeting to the target it
/// already has is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedValue {
    tween: Tween,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            tween: Tween::settled(initial),
        }
    }

    /// Move toward `target` using `transition`.
    pub fn animate_to(&mut self, target: f32, transition: Transition) {
        if self.tween.end == target {
            return;
        }
        self.tween = match transition {
            Transition::Snap => Tween::settled(target),
            Transition::Tween { duration_ms } => Tween::new(
                self.tween.value(),
                target,
                duration_ms,
                easing::ease_in_out_cubic,
            ),
        };
    }

    /// Advance by `dt_ms` and return the current value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.tween.tick(dt_ms)
    }

    pub fn value(&self) -> f32 {
        self.tween.value()
    }

    /// The value this animation comes to rest at.
    pub fn target(&self) -> f32 {
        self.tween.end
    }

    pub fn is_settled(&self) -> bool {
        self.tween.is_finished()
    }
}
