//! Replays a [`Session`] against a headless shell.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use oo_chrome::{BackOutcome, Shell, ShellSnapshot};
use oo_platform::content::{CapabilityRequest, ContentEvent, ContentHost, HeadlessContentHost};
use oo_platform::permission::{CapabilityKind, DesktopPermissionService};
use oo_platform::settings::SettingsStore;
use oo_types::error::{OoError, Result};
use oo_types::input::{Point, PointerEvent};
use oo_types::insets::RawInsets;

use crate::script::{Session, Step};

pub type HeadlessShell<S> = Shell<S, HeadlessContentHost, DesktopPermissionService>;

/// What a page was told about one of its capability requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityAnswer {
    pub kind: CapabilityKind,
    pub origin: String,
    pub granted: bool,
}

/// Outcome of a replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps_run: usize,
    pub back_outcomes: Vec<BackOutcome>,
    pub capability_answers: Vec<CapabilityAnswer>,
    pub current_url: Option<String>,
    pub user_agent: String,
    pub final_state: ShellSnapshot,
}

/// Drives a shell step by step, delivering host events and platform
/// decisions between steps.
pub struct Runner<S: SettingsStore> {
    shell: HeadlessShell<S>,
    answers: Rc<RefCell<Vec<CapabilityAnswer>>>,
    back_outcomes: Vec<BackOutcome>,
    steps_run: usize,
}

impl<S: SettingsStore> Runner<S> {
    pub fn new(shell: HeadlessShell<S>) -> Self {
        let mut runner = Self {
            shell,
            answers: Rc::new(RefCell::new(Vec::new())),
            back_outcomes: Vec::new(),
            steps_run: 0,
        };
        runner.pump();
        runner
    }

    pub fn shell(&self) -> &HeadlessShell<S> {
        &self.shell
    }

    pub fn run(&mut self, session: &Session) -> Result<()> {
        self.shell.platform_mut().set_policy(session.grant_policy);
        for (i, step) in session.steps.iter().enumerate() {
            log::debug!("step {}: {step:?}", i + 1);
            self.apply(step)
                .map_err(|e| OoError::Script(format!("step {}: {e}", i + 1)))?;
            self.pump();
            self.steps_run += 1;
        }
        Ok(())
    }

    pub fn apply(&mut self, step: &Step) -> Result<()> {
        let shell = &mut self.shell;
        match step {
            Step::Pointer { events } => {
                for e in events {
                    if let Some(class) = shell.on_surface_pointer(e) {
                        log::info!("gesture: {class:?}");
                    }
                }
            },
            Step::Tap { x, y } => {
                let at = Point::new(*x, *y);
                shell.on_surface_pointer(&PointerEvent::Down { id: 0, at });
                shell.on_surface_pointer(&PointerEvent::Up { id: 0, at });
            },
            Step::Insets {
                cutout,
                system_bars,
                keyboard_visible,
                keyboard_bottom,
            } => shell.on_insets_changed(RawInsets {
                cutout: *cutout,
                system_bars: *system_bars,
                keyboard_visible: *keyboard_visible,
                keyboard_bottom: *keyboard_bottom,
            }),
            Step::VerticalDrag { dy } => shell.on_vertical_drag(*dy),
            Step::ToggleAddressBar => shell.toggle_address_bar(),
            Step::ToggleInteractable => shell.toggle_interactable(),
            Step::Focus { focused } => shell.focus_address_bar(*focused),
            Step::Type { text } => shell.edit_address_bar(text),
            Step::DragAddressBar { dx } => shell.drag_address_bar(*dx),
            Step::Submit => {
                shell.submit_address_bar();
            },
            Step::FollowLink { url } => shell.host_mut().load_url(url)?,
            Step::RequestCapability { kind, origin } => {
                let answers = Rc::clone(&self.answers);
                let (kind, origin) = (*kind, origin.clone());
                let responder_origin = origin.clone();
                shell
                    .host_mut()
                    .raise(ContentEvent::CapabilityRequested(CapabilityRequest {
                        kind,
                        origin,
                        responder: Box::new(move |granted: bool| -> Result<()> {
                            log::info!(
                                "{responder_origin} told {kind:?} is {}",
                                if granted { "granted" } else { "denied" }
                            );
                            answers.borrow_mut().push(CapabilityAnswer {
                                kind,
                                origin: responder_origin,
                                granted,
                            });
                            Ok(())
                        }),
                    }));
            },
            Step::EnterFullscreen => shell.host_mut().raise(ContentEvent::CustomViewShown),
            Step::ExitFullscreen => shell.host_mut().dismiss_custom_view()?,
            Step::Allow => shell.allow_permission(),
            Step::Deny => shell.deny_permission(),
            Step::SetPolicy { policy } => shell.platform_mut().set_policy(*policy),
            Step::PerformOption { option } => shell.perform_option(*option),
            Step::OptionSlot { slot } => {
                if shell.activate_option(*slot).is_none() {
                    return Err(OoError::Script(format!(
                        "no option in slot {slot} of page {}",
                        shell.options().page()
                    )));
                }
            },
            Step::NextOptionsPage => {
                shell.next_options_page();
            },
            Step::PrevOptionsPage => {
                shell.prev_options_page();
            },
            Step::Back => {
                let outcome = shell.on_back();
                log::info!("back: {outcome:?}");
                self.back_outcomes.push(outcome);
            },
            Step::Tick { ms } => {
                shell.tick(*ms);
            },
        }
        Ok(())
    }

    /// Deliver everything the host and the platform have raised until
    /// both are quiet.
    pub fn pump(&mut self) {
        loop {
            let events = self.shell.host_mut().drain_events();
            let decision = self.shell.platform_mut().next_decision();
            if events.is_empty() && decision.is_none() {
                break;
            }
            for event in events {
                self.shell.handle_content_event(event);
            }
            if let Some((ticket, grants)) = decision {
                self.shell.on_permission_result(ticket, &grants);
            }
        }
    }

    pub fn report(&self) -> Report {
        Report {
            steps_run: self.steps_run,
            back_outcomes: self.back_outcomes.clone(),
            capability_answers: self.answers.borrow().clone(),
            current_url: self.shell.host().current_url(),
            user_agent: self.shell.host().user_agent().to_string(),
            final_state: self.shell.snapshot(),
        }
    }
}
