//! Mediation between content capability requests and the platform
//! permission dialog.
//!
//! A request moves `Idle -> Pending -> Idle`. While pending, the chrome
//! shows its own allow/deny panel. Allow hands the request to the platform
//! flow and waits for its decision; Deny answers immediately with an empty
//! grant map. Every request is answered exactly once: resolving consumes the
//! request, and a request dropped unanswered is denied on the way out.

use std::collections::BTreeSet;

use serde::Serialize;

use oo_platform::content::CapabilityRequest;
use oo_platform::permission::{
    CapabilityKind, GrantMap, PermissionId, PermissionService, PermissionTicket,
};
use oo_types::error::Result;

/// Answers the content side with the platform's decision.
pub type ResolveFn = Box<dyn FnOnce(&GrantMap) -> Result<()>>;

/// Where a pending request is in the two-step flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    /// Mediation panel shown, waiting for allow/deny.
    AwaitingUser,
    /// Platform dialog started, waiting for its decision.
    AwaitingPlatform,
}

/// The one capability request currently being mediated.
pub struct PendingPermissionRequest {
    pub ticket: PermissionTicket,
    pub kind: CapabilityKind,
    pub origin: String,
    pub title: String,
    pub rationale: String,
    pub capabilities: BTreeSet<PermissionId>,
    phase: RequestPhase,
    resolve: Option<ResolveFn>,
}

impl PendingPermissionRequest {
    fn new(ticket: PermissionTicket, request: CapabilityRequest) -> Self {
        let CapabilityRequest {
            kind,
            origin,
            responder,
        } = request;
        Self {
            ticket,
            kind,
            origin,
            title: kind.title().to_string(),
            rationale: kind.rationale().to_string(),
            capabilities: kind.permissions(),
            phase: RequestPhase::AwaitingUser,
            resolve: Some(Box::new(move |grants: &GrantMap| {
                responder(kind.is_granted(grants))
            })),
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    fn resolve(mut self, grants: &GrantMap) -> Result<()> {
        match self.resolve.take() {
            Some(f) => f(grants),
            None => Ok(()),
        }
    }
}

impl Drop for PendingPermissionRequest {
    fn drop(&mut self) {
        if let Some(f) = self.resolve.take() {
            log::warn!("permission request #{} dropped unanswered, denying", self.ticket);
            if let Err(e) = f(&GrantMap::new()) {
                log::warn!("denying dropped request #{} failed: {e}", self.ticket);
            }
        }
    }
}

impl std::fmt::Debug for PendingPermissionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPermissionRequest")
            .field("ticket", &self.ticket)
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// What happened to an incoming capability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Now pending under this ticket.
    Pending(PermissionTicket),
    /// Another request was already pending; this one was denied.
    AutoDenied,
}

/// Holds at most one pending request.
#[derive(Debug, Default)]
pub struct PermissionBridge {
    pending: Option<PendingPermissionRequest>,
    next_ticket: PermissionTicket,
}

impl PermissionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingPermissionRequest> {
        self.pending.as_ref()
    }

    /// Content asked for a capability.
    pub fn on_capability_requested(&mut self, request: CapabilityRequest) -> Admission {
        if let Some(current) = &self.pending {
            log::warn!(
                "{:?} request from {} while #{} is pending, denying",
                request.kind,
                request.origin,
                current.ticket
            );
            if let Err(e) = (request.responder)(false) {
                log::warn!("auto-deny could not reach content: {e}");
            }
            return Admission::AutoDenied;
        }
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        log::info!(
            "{:?} requested by {}, pending as #{ticket}",
            request.kind,
            request.origin
        );
        self.pending = Some(PendingPermissionRequest::new(ticket, request));
        Admission::Pending(ticket)
    }

    /// User chose Allow on the mediation panel.
    ///
    /// Starts the platform flow. If it cannot start, the request is
    /// answered as denied.
    pub fn allow<P: PermissionService + ?Sized>(&mut self, platform: &mut P) {
        let Some(req) = self.pending.as_mut() else {
            log::debug!("allow with nothing pending");
            return;
        };
        if req.phase == RequestPhase::AwaitingPlatform {
            log::debug!("platform flow for #{} already running", req.ticket);
            return;
        }
        req.phase = RequestPhase::AwaitingPlatform;
        if let Err(e) = platform.request(req.ticket, &req.capabilities) {
            log::warn!("platform permission flow failed to start: {e}");
            self.finish(&GrantMap::new());
        }
    }

    /// User chose Deny on the mediation panel. The platform flow is skipped.
    pub fn deny(&mut self) {
        if self.pending.is_none() {
            log::debug!("deny with nothing pending");
            return;
        }
        self.finish(&GrantMap::new());
    }

    /// The platform flow returned a decision.
    ///
    /// Decisions for anything but the current request's running flow are
    /// stale and ignored. Returns whether the decision was applied.
    pub fn on_platform_result(&mut self, ticket: PermissionTicket, grants: &GrantMap) -> bool {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|r| r.ticket == ticket && r.phase == RequestPhase::AwaitingPlatform);
        if !current {
            log::warn!("ignoring stale permission result #{ticket}");
            return false;
        }
        self.finish(grants);
        true
    }

    /// Resolve and clear the pending request. The pending slot is cleared
    /// even when the content side can no longer be reached.
    fn finish(&mut self, grants: &GrantMap) {
        let Some(req) = self.pending.take() else {
            return;
        };
        let ticket = req.ticket;
        let kind = req.kind;
        match req.resolve(grants) {
            Ok(()) => log::info!(
                "#{ticket} {:?} resolved: {}",
                kind,
                if kind.is_granted(grants) {
                    "granted"
                } else {
                    "denied"
                }
            ),
            Err(e) => log::warn!("#{ticket} could not be delivered to content: {e}"),
        }
    }
}
