//! oo-ui: UI primitives that do not depend on any particular toolkit.
//!
//! Animations are explicit time-driven interpolations advanced by a tick
//! from the host's frame loop, and gestures are classified from abstract
//! pointer samples. Nothing here draws.

pub mod animation;
pub mod gesture;

pub use animation::{AnimatedValue, Transition, Tween, interpolate};
pub use gesture::{DEFAULT_TOUCH_SLOP, GestureClass, TapDragClassifier, classify_gesture};
