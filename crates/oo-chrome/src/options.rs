//! The options strip under the address bar: a paged row of quick actions.

use serde::{Deserialize, Serialize};

use crate::settings::BrowserSettings;

/// Buttons shown per page.
pub const OPTIONS_PER_PAGE: usize = 4;

/// A quick action offered by the strip. Performed by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionAction {
    ToggleDesktopMode,
    ToggleInteractable,
    Reload,
    GoHome,
    LogSettings,
}

impl OptionAction {
    /// Every action, in strip order.
    pub const ALL: &'static [OptionAction] = &[
        OptionAction::ToggleDesktopMode,
        OptionAction::ToggleInteractable,
        OptionAction::Reload,
        OptionAction::GoHome,
        OptionAction::LogSettings,
    ];

    /// Button label. Toggles name the state they switch to.
    pub fn label(self, settings: &BrowserSettings) -> &'static str {
        match self {
            OptionAction::ToggleDesktopMode if settings.is_desktop_mode => "Mobile layout",
            OptionAction::ToggleDesktopMode => "Desktop layout",
            OptionAction::ToggleInteractable if settings.is_interactable => "Lock content",
            OptionAction::ToggleInteractable => "Unlock content",
            OptionAction::Reload => "Reload",
            OptionAction::GoHome => "Home",
            OptionAction::LogSettings => "Log settings",
        }
    }
}

/// A button as drawn: the action and its current label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub action: OptionAction,
    pub label: &'static str,
}

/// Which page of the strip is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptionsStrip {
    page: usize,
}

impl OptionsStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count() -> usize {
        OptionAction::ALL.len().div_ceil(OPTIONS_PER_PAGE)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Actions on the current page.
    pub fn visible(&self) -> &'static [OptionAction] {
        OptionAction::ALL
            .chunks(OPTIONS_PER_PAGE)
            .nth(self.page)
            .unwrap_or(&[])
    }

    /// Buttons on the current page, labelled for `settings`.
    pub fn entries(&self, settings: &BrowserSettings) -> Vec<OptionEntry> {
        self.visible()
            .iter()
            .map(|&action| OptionEntry {
                action,
                label: action.label(settings),
            })
            .collect()
    }

    /// Action in `slot` (0-based) of the current page.
    pub fn action_at(&self, slot: usize) -> Option<OptionAction> {
        self.visible().get(slot).copied()
    }

    /// Move one page on. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < Self::page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move one page back. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Back to the first page, e.g. when the strip closes.
    pub fn reset(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_hold_four_actions() {
        assert_eq!(OptionsStrip::page_count(), 2);
        let mut strip = OptionsStrip::new();
        assert_eq!(strip.visible().len(), 4);
        assert_eq!(strip.action_at(0), Some(OptionAction::ToggleDesktopMode));
        assert!(strip.next_page());
        assert_eq!(strip.visible(), &[OptionAction::LogSettings]);
        assert_eq!(strip.action_at(1), None);
    }

    #[test]
    fn paging_stops_at_the_ends() {
        let mut strip = OptionsStrip::new();
        assert!(!strip.prev_page());
        assert!(strip.next_page());
        assert!(!strip.next_page());
        assert_eq!(strip.page(), 1);
        assert!(strip.prev_page());
        strip.next_page();
        strip.reset();
        assert_eq!(strip.page(), 0);
    }

    #[test]
    fn toggle_labels_follow_settings() {
        let s = BrowserSettings::default();
        assert_eq!(OptionAction::ToggleDesktopMode.label(&s), "Desktop layout");
        assert_eq!(
            OptionAction::ToggleDesktopMode.label(&s.with_desktop_mode(true)),
            "Mobile layout"
        );
        assert_eq!(
            OptionAction::ToggleInteractable.label(&s.with_interactable(false)),
            "Unlock content"
        );
    }

    #[test]
    fn entries_carry_current_labels() {
        let strip = OptionsStrip::new();
        let s = BrowserSettings::default().with_desktop_mode(true);
        let entries = strip.entries(&s);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].action, OptionAction::ToggleDesktopMode);
        assert_eq!(entries[0].label, "Mobile layout");
        assert_eq!(entries[2].label, "Reload");
    }

    #[test]
    fn actions_deserialize_from_snake_case() {
        let a: OptionAction = serde_json::from_str("\"toggle_desktop_mode\"").unwrap();
        assert_eq!(a, OptionAction::ToggleDesktopMode);
    }
}
