//! Browser preferences and their persistence.

use serde::{Deserialize, Serialize};

use oo_platform::settings::SettingsStore;

/// Store keys, one per field plus the last visited URL.
pub mod keys {
    pub const PADDING_DP: &str = "padding_dp";
    pub const CORNER_RADIUS_DP: &str = "corner_radius_dp";
    pub const IS_INTERACTABLE: &str = "is_interactable";
    pub const DEFAULT_URL: &str = "default_url";
    pub const ANIMATION_SPEED: &str = "animation_speed";
    pub const SINGLE_LINE_HEIGHT: &str = "single_line_height";
    pub const IS_DESKTOP_MODE: &str = "is_desktop_mode";
    pub const DESKTOP_MODE_WIDTH: &str = "desktop_mode_width";
    pub const LAST_URL: &str = "last_url";
}

pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8 Pro) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Mobile Safari/537.36";
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// User-tunable chrome preferences.
///
/// Treated as an immutable value: changes build a new instance and replace
/// the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Inset around the content surface while the chrome is shown.
    pub padding_dp: f32,
    /// Rounding of the content surface corners.
    pub corner_radius_dp: f32,
    /// Touches go straight to content (`true`) or are intercepted to toggle
    /// the chrome (`false`).
    pub is_interactable: bool,
    /// Fallback navigation target.
    pub default_url: String,
    /// Duration of every visibility transition.
    pub animation_speed_ms: u32,
    /// Address bar row height.
    pub single_line_height: u32,
    pub is_desktop_mode: bool,
    /// Viewport width forced on pages in desktop mode.
    pub desktop_mode_width: u32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            padding_dp: 8.0,
            corner_radius_dp: 24.0,
            is_interactable: true,
            default_url: "https://www.google.com".to_string(),
            animation_speed_ms: 300,
            single_line_height: 64,
            is_desktop_mode: false,
            desktop_mode_width: 820,
        }
    }
}

impl BrowserSettings {
    /// Read every field from `store`, substituting the default for missing
    /// or invalid entries.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let d = Self::default();
        Self {
            padding_dp: non_negative(
                keys::PADDING_DP,
                store.get_f32(keys::PADDING_DP, d.padding_dp),
                d.padding_dp,
            ),
            corner_radius_dp: non_negative(
                keys::CORNER_RADIUS_DP,
                store.get_f32(keys::CORNER_RADIUS_DP, d.corner_radius_dp),
                d.corner_radius_dp,
            ),
            is_interactable: store.get_bool(keys::IS_INTERACTABLE, d.is_interactable),
            default_url: web_url(
                keys::DEFAULT_URL,
                store.get_string(keys::DEFAULT_URL, &d.default_url),
                d.default_url.clone(),
            ),
            animation_speed_ms: positive(store, keys::ANIMATION_SPEED, d.animation_speed_ms),
            single_line_height: positive(store, keys::SINGLE_LINE_HEIGHT, d.single_line_height),
            is_desktop_mode: store.get_bool(keys::IS_DESKTOP_MODE, d.is_desktop_mode),
            desktop_mode_width: positive(store, keys::DESKTOP_MODE_WIDTH, d.desktop_mode_width),
        }
    }

    /// Write every field to `store`, keyed by field name.
    pub fn persist<S: SettingsStore + ?Sized>(&self, store: &mut S) {
        store.set(keys::PADDING_DP, self.padding_dp.into());
        store.set(keys::CORNER_RADIUS_DP, self.corner_radius_dp.into());
        store.set(keys::IS_INTERACTABLE, self.is_interactable.into());
        store.set(keys::DEFAULT_URL, self.default_url.as_str().into());
        store.set(keys::ANIMATION_SPEED, self.animation_speed_ms.into());
        store.set(keys::SINGLE_LINE_HEIGHT, self.single_line_height.into());
        store.set(keys::IS_DESKTOP_MODE, self.is_desktop_mode.into());
        store.set(keys::DESKTOP_MODE_WIDTH, self.desktop_mode_width.into());
    }

    pub fn with_interactable(&self, is_interactable: bool) -> Self {
        Self {
            is_interactable,
            ..self.clone()
        }
    }

    pub fn with_desktop_mode(&self, is_desktop_mode: bool) -> Self {
        Self {
            is_desktop_mode,
            ..self.clone()
        }
    }

    /// User agent matching the current layout mode.
    pub fn user_agent(&self) -> &'static str {
        if self.is_desktop_mode {
            DESKTOP_USER_AGENT
        } else {
            MOBILE_USER_AGENT
        }
    }
}

fn non_negative(key: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("setting {key:?} = {value} out of range, using {default}");
        default
    }
}

fn positive<S: SettingsStore + ?Sized>(store: &S, key: &str, default: u32) -> u32 {
    let raw = store.get_i64(key, i64::from(default));
    match u32::try_from(raw) {
        Ok(v) if v > 0 => v,
        _ => {
            log::warn!("setting {key:?} = {raw} out of range, using {default}");
            default
        },
    }
}

fn web_url(key: &str, value: String, default: String) -> String {
    match url::Url::parse(&value) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => value,
        _ => {
            log::warn!("setting {key:?} = {value:?} is not a web URL, using {default}");
            default
        },
    }
}
