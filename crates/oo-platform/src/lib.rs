//! Platform collaborators consumed by the chrome.
//!
//! Each collaborator is a trait so the chrome can run against a real
//! platform, the headless desktop implementations provided here, or test
//! doubles.

pub mod content;
pub mod permission;
pub mod settings;

pub use content::{
    CapabilityRequest, CapabilityResponder, ContentEvent, ContentHost, HeadlessContentHost,
};
pub use permission::{
    CapabilityKind, DesktopPermissionService, GrantMap, GrantPolicy, PermissionId,
    PermissionService, PermissionTicket,
};
pub use settings::{MemorySettingsStore, SettingValue, SettingsStore, TomlSettingsStore};
