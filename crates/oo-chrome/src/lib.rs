//! Browser chrome core.
//!
//! The chrome around an embedded web engine: which panels are shown
//! ([`visibility`]), how the content surface is inset from notches, system
//! bars and the keyboard ([`insets`]), how capability requests from pages
//! are mediated ([`permission`]), and the address bar and options strip.
//! [`Shell`] wires these to the platform collaborators from `oo-platform`.

pub mod address_bar;
pub mod insets;
pub mod options;
pub mod permission;
pub mod settings;
pub mod shell;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use address_bar::{AddressBar, SubmitOutcome, classify_input};
pub use insets::{AnimatedInsets, InsetCoordinator, InsetTargets};
pub use options::{OptionAction, OptionEntry, OptionsStrip};
pub use permission::{Admission, PendingPermissionRequest, PermissionBridge, RequestPhase};
pub use settings::BrowserSettings;
pub use shell::{BackOutcome, LoadState, Shell, ShellSnapshot};
pub use visibility::{PanelState, PanelVisibilityController, VisibilityState};
