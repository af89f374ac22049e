//! Toolkit-agnostic pointer event types.
//!
//! Every host UI maps its native touch input to these types. The chrome
//! never sees raw platform input.

use serde::{Deserialize, Serialize};

/// Identifies one finger (or mouse button) for the lifetime of a gesture.
pub type PointerId = u32;

/// A position on the content surface, in density-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A single sample of a pointer gesture (first-down, moves, release).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    /// A pointer touched the surface.
    Down { id: PointerId, at: Point },
    /// A pointer moved while pressed.
    Move { id: PointerId, at: Point },
    /// A pointer left the surface.
    Up { id: PointerId, at: Point },
    /// The platform took the gesture away (e.g. a system edge swipe).
    Cancel,
}

impl PointerEvent {
    /// The pointer this sample belongs to, if any.
    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            Self::Down { id, .. } | Self::Move { id, .. } | Self::Up { id, .. } => Some(*id),
            Self::Cancel => None,
        }
    }

    /// Sample position, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { at, .. } | Self::Move { at, .. } | Self::Up { at, .. } => Some(*at),
            Self::Cancel => None,
        }
    }
}
