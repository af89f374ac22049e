//! Tap-vs-drag classification over an abstract pointer stream.
//!
//! The content surface sits on top of a view that runs its own scroll and
//! zoom recognizers. Those recognizers can claim a gesture's positional
//! data part way through, so the classifier never decides from what it sees
//! at release. It keeps one flag per gesture, flips it the moment a move
//! sample leaves the slop radius, and only reads it at release.

use oo_types::input::{Point, PointerEvent, PointerId};

/// Movement (in dp) a pointer may wander before a press becomes a drag.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Outcome of a completed single-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureClass {
    Tap,
    Drag,
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    pointer: PointerId,
    down: Point,
    is_drag: bool,
    /// A second pointer joined; the gesture will not be classified.
    multi_pointer: bool,
}

/// Per-surface gesture state: idle, or tracking one gesture from first-down
/// to release.
#[derive(Debug, Clone)]
pub struct TapDragClassifier {
    slop: f32,
    tracking: Option<Tracking>,
}

impl TapDragClassifier {
    pub fn new(slop: f32) -> Self {
        Self {
            slop,
            tracking: None,
        }
    }

    pub fn slop(&self) -> f32 {
        self.slop
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Whether the current gesture has already crossed the slop radius.
    pub fn is_dragging(&self) -> bool {
        self.tracking.is_some_and(|t| t.is_drag)
    }

    /// Feed one pointer sample.
    ///
    /// Returns a classification only on the release of the tracked pointer.
    /// Cancelled and multi-pointer gestures end without one.
    pub fn handle(&mut self, event: &PointerEvent) -> Option<GestureClass> {
        match *event {
            PointerEvent::Down { id, at } => {
                match self.tracking.as_mut() {
                    Some(t) => {
                        log::debug!("pointer {id} joined gesture of pointer {}", t.pointer);
                        t.multi_pointer = true;
                    },
                    None => {
                        self.tracking = Some(Tracking {
                            pointer: id,
                            down: at,
                            is_drag: false,
                            multi_pointer: false,
                        });
                    },
                }
                None
            },
            PointerEvent::Move { id, at } => {
                if let Some(t) = self.tracking.as_mut()
                    && t.pointer == id
                    && !t.is_drag
                    && t.down.distance_to(at) > self.slop
                {
                    t.is_drag = true;
                    log::debug!("pointer {id} crossed touch slop");
                }
                None
            },
            PointerEvent::Up { id, .. } => {
                let t = self.tracking.filter(|t| t.pointer == id)?;
                self.tracking = None;
                if t.multi_pointer {
                    log::debug!("multi-pointer gesture left unclassified");
                    return None;
                }
                Some(if t.is_drag {
                    GestureClass::Drag
                } else {
                    GestureClass::Tap
                })
            },
            PointerEvent::Cancel => {
                if self.tracking.take().is_some() {
                    log::debug!("gesture cancelled by platform");
                }
                None
            },
        }
    }

    /// Drop any gesture in progress without classifying it.
    pub fn reset(&mut self) {
        self.tracking = None;
    }
}

impl Default for TapDragClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP)
    }
}

/// Classify a recorded gesture (first-down, moves, release).
///
/// Returns `None` when the stream is cancelled, involves more than one
/// pointer, or never releases.
pub fn classify_gesture<'a>(
    slop: f32,
    events: impl IntoIterator<Item = &'a PointerEvent>,
) -> Option<GestureClass> {
    let mut classifier = TapDragClassifier::new(slop);
    events.into_iter().find_map(|e| classifier.handle(e))
}
