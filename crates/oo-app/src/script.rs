//! Session scripts: a TOML list of user and content actions to replay
//! against the chrome.
//!
//! ```toml
//! grant_policy = "grant_all"
//!
//! [[step]]
//! action = "insets"
//! system_bars = { top = 24.0, bottom = 48.0 }
//!
//! [[step]]
//! action = "tap"
//! x = 120.0
//! y = 300.0
//! ```

use serde::Deserialize;

use oo_chrome::OptionAction;
use oo_platform::permission::{CapabilityKind, GrantPolicy};
use oo_types::error::{OoError, Result};
use oo_types::input::PointerEvent;
use oo_types::insets::{EdgeInsets, VerticalInsets};

/// A scripted session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    /// How the stand-in platform dialog answers.
    #[serde(default)]
    pub grant_policy: GrantPolicy,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Session {
    pub fn from_toml(text: &str) -> Result<Self> {
        let session: Session = toml::from_str(text)?;
        if session.steps.is_empty() {
            return Err(OoError::Script("session has no steps".into()));
        }
        Ok(session)
    }
}

/// One replayed action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Raw pointer samples on the content surface.
    Pointer { events: Vec<PointerEvent> },
    /// Press and release in place.
    Tap { x: f32, y: f32 },
    /// New platform insets.
    Insets {
        #[serde(default)]
        cutout: EdgeInsets,
        #[serde(default)]
        system_bars: VerticalInsets,
        #[serde(default)]
        keyboard_visible: bool,
        #[serde(default)]
        keyboard_bottom: f32,
    },
    /// Vertical drag on the address bar row.
    VerticalDrag { dy: f32 },
    ToggleAddressBar,
    ToggleInteractable,
    Focus { focused: bool },
    Type { text: String },
    /// Horizontal drag on the address field.
    DragAddressBar { dx: f32 },
    Submit,
    /// Content navigates on its own, e.g. a link click.
    FollowLink { url: String },
    RequestCapability { kind: CapabilityKind, origin: String },
    EnterFullscreen,
    ExitFullscreen,
    Allow,
    Deny,
    SetPolicy { policy: GrantPolicy },
    PerformOption { option: OptionAction },
    OptionSlot { slot: usize },
    NextOptionsPage,
    PrevOptionsPage,
    Back,
    /// Advance animations.
    Tick { ms: u32 },
}
