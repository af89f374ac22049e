//! The address bar text field and the URL-or-search decision on submit.

use serde::Serialize;

/// Search endpoint for input that does not look like an address.
pub const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";

/// Turn address bar input into the URL to load.
///
/// An http(s) URL with a host is loaded as typed. Other input containing a
/// dot and no whitespace is an address; it gains an `https://` prefix unless
/// it already names a scheme. Anything else becomes a search query.
/// Returns `None` for blank input.
pub fn classify_input(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let is_web_url = url::Url::parse(input)
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some());
    if is_web_url || (has_scheme(input) && !input.contains(char::is_whitespace)) {
        return Some(input.to_string());
    }
    if input.contains('.') && !input.contains(char::is_whitespace) {
        Some(format!("https://{input}"))
    } else {
        Some(format!("{SEARCH_URL_PREFIX}{}", urlencoding::encode(input)))
    }
}

/// Whether `input` starts with a `scheme://` part.
fn has_scheme(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Result of pressing Go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input: the current URL was put back, nothing to load.
    Restored,
    Navigate(String),
}

/// Text, focus and committed URL of the address field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressBar {
    text: String,
    url: String,
    focused: bool,
}

impl AddressBar {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: url.clone(),
            url,
            focused: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// URL of the page being shown.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The user edited the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Gaining focus clears an unedited URL so typing starts fresh; losing
    /// it with nothing typed puts the URL back.
    pub fn set_focused(&mut self, focused: bool) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;
        if focused {
            if self.text == self.url {
                self.text.clear();
            }
        } else if self.text.trim().is_empty() {
            self.restore();
        }
    }

    /// Horizontal drag on the field. Dragging right restores the URL.
    pub fn on_horizontal_drag(&mut self, delta_x: f32) {
        if delta_x > 0.0 {
            self.restore();
        }
    }

    /// Press Go. Focus is dropped either way.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = match classify_input(&self.text) {
            Some(target) => {
                log::info!("address bar: {:?} -> {target}", self.text.trim());
                self.text = target.clone();
                SubmitOutcome::Navigate(target)
            },
            None => {
                self.restore();
                SubmitOutcome::Restored
            },
        };
        self.focused = false;
        outcome
    }

    /// Content navigated. The text follows only while the user is not
    /// typing.
    pub fn on_navigation(&mut self, url: &str) {
        self.url = url.to_string();
        if !self.focused {
            self.text = url.to_string();
        }
    }

    fn restore(&mut self) {
        self.text.clone_from(&self.url);
    }
}
