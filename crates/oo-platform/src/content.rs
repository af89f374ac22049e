//! The embedded web-rendering engine, seen from the chrome.

use std::collections::VecDeque;

use oo_types::error::{OoError, Result};

use crate::permission::CapabilityKind;

/// One-shot handle that answers a capability request on the engine side.
///
/// Taking `self` by value makes a second answer impossible.
pub type CapabilityResponder = Box<dyn FnOnce(bool) -> Result<()>>;

/// Web content asked for a device capability.
pub struct CapabilityRequest {
    pub kind: CapabilityKind,
    /// Origin of the requesting page.
    pub origin: String,
    pub responder: CapabilityResponder,
}

impl std::fmt::Debug for CapabilityRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRequest")
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Events the engine raises toward the chrome.
#[derive(Debug)]
pub enum ContentEvent {
    NavigationStarted { url: String },
    /// Load progress, 0-100.
    Progress(u8),
    NavigationFinished { url: String, can_go_back: bool },
    CapabilityRequested(CapabilityRequest),
    /// Content entered its own fullscreen view (e.g. video).
    CustomViewShown,
    CustomViewHidden,
}

/// Navigation and configuration surface of the engine.
pub trait ContentHost {
    fn load_url(&mut self, url: &str) -> Result<()>;

    fn go_back(&mut self) -> Result<()>;

    fn can_go_back(&self) -> bool;

    fn reload(&mut self) -> Result<()>;

    /// URL of the page currently shown, if any.
    fn current_url(&self) -> Option<String>;

    /// Switch the user agent and whether the engine lays pages out on a
    /// wide (desktop) viewport.
    fn set_user_agent(&mut self, user_agent: &str, wide_viewport: bool) -> Result<()>;

    fn evaluate_script(&mut self, script: &str) -> Result<()>;

    /// Ask content to leave its fullscreen view.
    fn dismiss_custom_view(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Headless implementation
// ---------------------------------------------------------------------------

/// An engine without rendering: keeps a history stack and raises the
/// navigation events a real engine would, for the chrome to drain.
#[derive(Debug, Default)]
pub struct HeadlessContentHost {
    back_stack: Vec<String>,
    current: Option<String>,
    user_agent: String,
    wide_viewport: bool,
    /// Fullscreen views content has opened and not yet closed.
    custom_views: u32,
    scripts: Vec<String>,
    events: VecDeque<ContentEvent>,
}

impl HeadlessContentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<ContentEvent> {
        self.events.drain(..).collect()
    }

    /// Raise an event on behalf of page content (capability requests,
    /// fullscreen video).
    pub fn raise(&mut self, event: ContentEvent) {
        if matches!(event, ContentEvent::CustomViewShown) {
            self.custom_views += 1;
        }
        self.events.push_back(event);
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn wide_viewport(&self) -> bool {
        self.wide_viewport
    }

    /// Scripts evaluated so far.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    fn finish(&mut self, url: String) {
        self.events
            .push_back(ContentEvent::NavigationStarted { url: url.clone() });
        self.events.push_back(ContentEvent::Progress(100));
        self.events.push_back(ContentEvent::NavigationFinished {
            url,
            can_go_back: self.can_go_back(),
        });
    }
}

impl ContentHost for HeadlessContentHost {
    fn load_url(&mut self, url: &str) -> Result<()> {
        if let Some(prev) = self.current.take() {
            self.back_stack.push(prev);
        }
        self.current = Some(url.to_string());
        self.finish(url.to_string());
        Ok(())
    }

    fn go_back(&mut self) -> Result<()> {
        let prev = self
            .back_stack
            .pop()
            .ok_or_else(|| OoError::Content("no history to go back to".into()))?;
        self.current = Some(prev.clone());
        self.finish(prev);
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    fn reload(&mut self) -> Result<()> {
        let url = self
            .current
            .clone()
            .ok_or_else(|| OoError::Content("nothing loaded".into()))?;
        self.finish(url);
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.current.clone()
    }

    fn set_user_agent(&mut self, user_agent: &str, wide_viewport: bool) -> Result<()> {
        self.user_agent = user_agent.to_string();
        self.wide_viewport = wide_viewport;
        Ok(())
    }

    fn evaluate_script(&mut self, script: &str) -> Result<()> {
        self.scripts.push(script.to_string());
        Ok(())
    }

    fn dismiss_custom_view(&mut self) -> Result<()> {
        // Closes the newest view; hidden is raised once none remain.
        if self.custom_views > 0 {
            self.custom_views -= 1;
            if self.custom_views == 0 {
                self.events.push_back(ContentEvent::CustomViewHidden);
            }
        }
        Ok(())
    }
}
