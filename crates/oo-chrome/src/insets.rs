//! Content surface geometry derived from device insets and chrome
//! visibility.
//!
//! [`targets`] is the pure rule set: where every padding comes to rest and
//! how it travels there. [`InsetCoordinator`] remembers the system-bar
//! sizes across frames where the platform reports them as zero, and
//! [`AnimatedInsets`] moves the live values toward the targets on each
//! frame tick.

use oo_types::insets::{EdgeInsets, InsetSnapshot, RawInsets, VerticalInsets};
use oo_ui::animation::{AnimatedValue, Transition};

use crate::settings::BrowserSettings;
use crate::visibility::VisibilityState;

/// Resting value of one output plus the path to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetTarget {
    pub value: f32,
    pub transition: Transition,
}

impl InsetTarget {
    fn new(value: f32, transition: Transition) -> Self {
        Self { value, transition }
    }
}

/// Targets for every animated layout value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetTargets {
    pub content_padding: InsetTarget,
    pub corner_radius: InsetTarget,
    pub cutout_top: InsetTarget,
    pub cutout_left: InsetTarget,
    pub cutout_right: InsetTarget,
    pub cutout_bottom: InsetTarget,
    pub system_bar_top: InsetTarget,
    pub system_bar_bottom: InsetTarget,
}

impl InsetTargets {
    /// Geometry once every transition has finished.
    pub fn resting(&self) -> InsetSnapshot {
        InsetSnapshot {
            content_padding: self.content_padding.value,
            corner_radius: self.corner_radius.value,
            cutout_padding: EdgeInsets::new(
                self.cutout_top.value,
                self.cutout_left.value,
                self.cutout_right.value,
                self.cutout_bottom.value,
            ),
            system_bar_padding: VerticalInsets::new(
                self.system_bar_top.value,
                self.system_bar_bottom.value,
            ),
        }
    }
}

/// Compute layout targets. Pure.
pub fn targets(
    raw: &RawInsets,
    visibility: &VisibilityState,
    settings: &BrowserSettings,
) -> InsetTargets {
    let immersive = visibility.is_immersive();
    let has_cutout = raw.has_cutout();
    let keyboard = raw.keyboard_visible;
    let tween = Transition::Tween {
        duration_ms: settings.animation_speed_ms,
    };

    // Outside immersive mode the system-bar padding already covers the
    // cutout, so cutout padding only applies while immersive.
    let cutout = |edge: f32| InsetTarget::new(if immersive { edge } else { 0.0 }, tween);

    // Snapping on cutout-less devices avoids a flash of the status bar area;
    // under a notch the content would jump, so it animates instead.
    let system_bar_top = InsetTarget::new(
        if visibility.address_bar_visible {
            raw.system_bars.top
        } else {
            0.0
        },
        if has_cutout { tween } else { Transition::Snap },
    );

    // With the keyboard up, keep a padding-sized lip so the lock control
    // stays reachable above it.
    let bottom = if keyboard {
        settings.padding_dp
    } else if !immersive {
        raw.system_bars.bottom
    } else {
        0.0
    };
    let system_bar_bottom = InsetTarget::new(
        bottom,
        if immersive && !keyboard {
            Transition::Snap
        } else {
            tween
        },
    );

    InsetTargets {
        content_padding: InsetTarget::new(
            if immersive { 0.0 } else { settings.padding_dp },
            tween,
        ),
        corner_radius: InsetTarget::new(
            if !immersive || has_cutout {
                settings.corner_radius_dp
            } else {
                0.0
            },
            tween,
        ),
        cutout_top: cutout(raw.cutout.top),
        cutout_left: cutout(raw.cutout.left),
        cutout_right: cutout(raw.cutout.right),
        cutout_bottom: cutout(raw.cutout.bottom),
        system_bar_top,
        system_bar_bottom,
    }
}

/// Tracks raw platform insets across frames.
///
/// Hidden system bars are reported with zero size, which would make the
/// reserved space vanish before the chrome comes back. The first non-zero
/// size seen for each bar is latched and used from then on.
#[derive(Debug, Clone, Default)]
pub struct InsetCoordinator {
    raw: RawInsets,
    latched_bars: VerticalInsets,
}

impl InsetCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the platform's insets for this frame.
    pub fn observe(&mut self, raw: RawInsets) {
        if self.latched_bars.top == 0.0 && raw.system_bars.top > 0.0 {
            self.latched_bars.top = raw.system_bars.top;
            log::debug!("latched status bar height {}", raw.system_bars.top);
        }
        if self.latched_bars.bottom == 0.0 && raw.system_bars.bottom > 0.0 {
            self.latched_bars.bottom = raw.system_bars.bottom;
            log::debug!("latched navigation bar height {}", raw.system_bars.bottom);
        }
        self.raw = raw;
    }

    /// Last observed insets with system bars replaced by their latched size.
    pub fn effective_raw(&self) -> RawInsets {
        RawInsets {
            system_bars: self.latched_bars,
            ..self.raw
        }
    }

    pub fn has_cutout(&self) -> bool {
        self.raw.has_cutout()
    }

    /// Targets for the current frame. No side effects.
    pub fn update(&self, visibility: &VisibilityState, settings: &BrowserSettings) -> InsetTargets {
        targets(&self.effective_raw(), visibility, settings)
    }
}

/// Live layout values moving toward their targets.
#[derive(Debug, Clone)]
pub struct AnimatedInsets {
    content_padding: AnimatedValue,
    corner_radius: AnimatedValue,
    cutout: [AnimatedValue; 4],
    system_bar_top: AnimatedValue,
    system_bar_bottom: AnimatedValue,
}

impl AnimatedInsets {
    /// Start at rest on `targets`.
    pub fn settled_at(targets: &InsetTargets) -> Self {
        let v = |t: InsetTarget| AnimatedValue::new(t.value);
        Self {
            content_padding: v(targets.content_padding),
            corner_radius: v(targets.corner_radius),
            cutout: [
                v(targets.cutout_top),
                v(targets.cutout_left),
                v(targets.cutout_right),
                v(targets.cutout_bottom),
            ],
            system_bar_top: v(targets.system_bar_top),
            system_bar_bottom: v(targets.system_bar_bottom),
        }
    }

    /// Point every value at its new target. Values already heading to the
    /// same target keep their progress.
    pub fn retarget(&mut self, targets: &InsetTargets) {
        let go = |value: &mut AnimatedValue, t: InsetTarget| value.animate_to(t.value, t.transition);
        go(&mut self.content_padding, targets.content_padding);
        go(&mut self.corner_radius, targets.corner_radius);
        go(&mut self.cutout[0], targets.cutout_top);
        go(&mut self.cutout[1], targets.cutout_left);
        go(&mut self.cutout[2], targets.cutout_right);
        go(&mut self.cutout[3], targets.cutout_bottom);
        go(&mut self.system_bar_top, targets.system_bar_top);
        go(&mut self.system_bar_bottom, targets.system_bar_bottom);
    }

    /// Advance all values by `dt_ms` and return the frame's geometry.
    pub fn tick(&mut self, dt_ms: u32) -> InsetSnapshot {
        self.content_padding.tick(dt_ms);
        self.corner_radius.tick(dt_ms);
        for c in &mut self.cutout {
            c.tick(dt_ms);
        }
        self.system_bar_top.tick(dt_ms);
        self.system_bar_bottom.tick(dt_ms);
        self.snapshot()
    }

    pub fn snapshot(&self) -> InsetSnapshot {
        InsetSnapshot {
            content_padding: self.content_padding.value(),
            corner_radius: self.corner_radius.value(),
            cutout_padding: EdgeInsets::new(
                self.cutout[0].value(),
                self.cutout[1].value(),
                self.cutout[2].value(),
                self.cutout[3].value(),
            ),
            system_bar_padding: VerticalInsets::new(
                self.system_bar_top.value(),
                self.system_bar_bottom.value(),
            ),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.content_padding.is_settled()
            && self.corner_radius.is_settled()
            && self.cutout.iter().all(AnimatedValue::is_settled)
            && self.system_bar_top.is_settled()
            && self.system_bar_bottom.is_settled()
    }
}
