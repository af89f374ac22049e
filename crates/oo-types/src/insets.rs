//! Display inset geometry: notches, system bars, on-screen keyboard.
//!
//! All values are in density-independent pixels.

use serde::{Deserialize, Serialize};

/// Insets on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(top: f32, left: f32, right: f32, bottom: f32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }
}

/// Insets on the top and bottom edges only (system bars).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalInsets {
    pub top: f32,
    pub bottom: f32,
}

impl VerticalInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        bottom: 0.0,
    };

    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}

/// Insets as reported by the platform for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInsets {
    /// Display cutout (camera notch, punch hole).
    pub cutout: EdgeInsets,
    /// Status bar / navigation bar.
    pub system_bars: VerticalInsets,
    /// Whether the on-screen keyboard is showing.
    pub keyboard_visible: bool,
    /// Height the keyboard occupies at the bottom edge.
    pub keyboard_bottom: f32,
}

impl RawInsets {
    /// A cutout exists when the top or a side edge is notched. Bottom
    /// cutouts are ignored.
    pub fn has_cutout(&self) -> bool {
        self.cutout.top > 0.0 || self.cutout.left > 0.0 || self.cutout.right > 0.0
    }
}

/// Layout geometry derived from raw insets and chrome visibility.
///
/// Produced every frame by the inset animation driver and consumed by the
/// layout of the content surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InsetSnapshot {
    /// Padding applied on every side of the content surface.
    pub content_padding: f32,
    /// Corner rounding of the content surface.
    pub corner_radius: f32,
    /// Extra padding keeping content out of the cutout.
    pub cutout_padding: EdgeInsets,
    /// Space reserved for the system bars (or the keyboard lip).
    pub system_bar_padding: VerticalInsets,
}
