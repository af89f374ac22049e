//! Foundation types for the oo browser chrome.
//!
//! This crate contains the toolkit-agnostic types shared by every oo crate:
//! pointer/input events, display inset geometry, and the error type.

pub mod error;
pub mod input;
pub mod insets;
