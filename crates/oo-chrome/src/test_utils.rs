//! Shared test doubles for the chrome core.
//!
//! [`RecordingContentHost`] and [`RecordingPermissionService`] record every
//! call for assertion; [`ResponderLog`] captures what content was told about
//! its capability requests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use oo_platform::content::{CapabilityResponder, ContentHost};
use oo_platform::permission::{PermissionId, PermissionService, PermissionTicket};
use oo_types::error::{OoError, Result};

/// A recorded call into the content host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    LoadUrl(String),
    GoBack,
    Reload,
    SetUserAgent { user_agent: String, wide_viewport: bool },
    EvaluateScript(String),
    DismissCustomView,
}

/// A content host that records calls and lets the test set its state.
#[derive(Debug, Default)]
pub struct RecordingContentHost {
    pub calls: Vec<HostCall>,
    pub can_go_back: bool,
    pub current: Option<String>,
}

impl RecordingContentHost {
    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::LoadUrl(u) => Some(u.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl ContentHost for RecordingContentHost {
    fn load_url(&mut self, url: &str) -> Result<()> {
        self.calls.push(HostCall::LoadUrl(url.to_string()));
        self.current = Some(url.to_string());
        Ok(())
    }

    fn go_back(&mut self) -> Result<()> {
        self.calls.push(HostCall::GoBack);
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    fn reload(&mut self) -> Result<()> {
        self.calls.push(HostCall::Reload);
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.current.clone()
    }

    fn set_user_agent(&mut self, user_agent: &str, wide_viewport: bool) -> Result<()> {
        self.calls.push(HostCall::SetUserAgent {
            user_agent: user_agent.to_string(),
            wide_viewport,
        });
        Ok(())
    }

    fn evaluate_script(&mut self, script: &str) -> Result<()> {
        self.calls.push(HostCall::EvaluateScript(script.to_string()));
        Ok(())
    }

    fn dismiss_custom_view(&mut self) -> Result<()> {
        self.calls.push(HostCall::DismissCustomView);
        Ok(())
    }
}

/// A permission service that records started flows.
#[derive(Debug, Default)]
pub struct RecordingPermissionService {
    pub requests: Vec<(PermissionTicket, BTreeSet<PermissionId>)>,
    /// Make every `request` fail.
    pub fail: bool,
}

impl PermissionService for RecordingPermissionService {
    fn request(
        &mut self,
        ticket: PermissionTicket,
        permissions: &BTreeSet<PermissionId>,
    ) -> Result<()> {
        if self.fail {
            return Err(OoError::Permission("dialog unavailable".into()));
        }
        self.requests.push((ticket, permissions.clone()));
        Ok(())
    }
}

/// Collects the answers given to capability responders.
#[derive(Debug, Clone, Default)]
pub struct ResponderLog {
    answers: Rc<RefCell<Vec<bool>>>,
}

impl ResponderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responder(&self) -> CapabilityResponder {
        let answers = Rc::clone(&self.answers);
        Box::new(move |granted: bool| -> Result<()> {
            answers.borrow_mut().push(granted);
            Ok(())
        })
    }

    pub fn answers(&self) -> Vec<bool> {
        self.answers.borrow().clone()
    }
}
