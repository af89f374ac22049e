//! Device capabilities and the platform permission-grant flow.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use oo_types::error::Result;

/// A platform permission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionId {
    FineLocation,
    CoarseLocation,
    Camera,
    RecordAudio,
}

impl PermissionId {
    /// Stable string form used in logs and platform bridges.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FineLocation => "location.fine",
            Self::CoarseLocation => "location.coarse",
            Self::Camera => "camera",
            Self::RecordAudio => "microphone",
        }
    }
}

impl std::fmt::Display for PermissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-permission outcome of a grant flow. An empty map means "denied".
pub type GrantMap = BTreeMap<PermissionId, bool>;

/// A device feature web content can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    Geolocation,
    Camera,
    Microphone,
}

impl CapabilityKind {
    /// Platform permissions that back this capability.
    pub fn permissions(self) -> BTreeSet<PermissionId> {
        match self {
            Self::Geolocation => [PermissionId::FineLocation, PermissionId::CoarseLocation]
                .into_iter()
                .collect(),
            Self::Camera => [PermissionId::Camera].into_iter().collect(),
            Self::Microphone => [PermissionId::RecordAudio].into_iter().collect(),
        }
    }

    /// Heading shown on the mediation panel.
    pub fn title(self) -> &'static str {
        match self {
            Self::Geolocation => "Location Access Required",
            Self::Camera => "Camera Access Required",
            Self::Microphone => "Microphone Access Required",
        }
    }

    /// Explanation shown on the mediation panel.
    pub fn rationale(self) -> &'static str {
        match self {
            Self::Geolocation => "This website wants to use your device's location.",
            Self::Camera => "This website wants to use your camera.",
            Self::Microphone => "This website wants to use your microphone.",
        }
    }

    /// The capability is granted when any of its backing permissions is.
    pub fn is_granted(self, grants: &GrantMap) -> bool {
        self.permissions()
            .iter()
            .any(|p| grants.get(p).copied().unwrap_or(false))
    }
}

/// Correlates a platform grant flow with the request that started it.
pub type PermissionTicket = u64;

/// Abstraction over the platform's native permission dialog.
///
/// The flow is asynchronous: `request` only starts it. The decision is
/// delivered later, tagged with the same ticket, through the chrome's
/// permission-result entry point.
pub trait PermissionService {
    fn request(&mut self, ticket: PermissionTicket, permissions: &BTreeSet<PermissionId>)
    -> Result<()>;
}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// How the desktop permission service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantPolicy {
    #[default]
    GrantAll,
    DenyAll,
}

/// Desktop stand-in for the native dialog: queues requests and answers
/// them by policy when polled.
#[derive(Debug, Default)]
pub struct DesktopPermissionService {
    policy: GrantPolicy,
    queued: VecDeque<(PermissionTicket, BTreeSet<PermissionId>)>,
}

impl DesktopPermissionService {
    pub fn new(policy: GrantPolicy) -> Self {
        Self {
            policy,
            queued: VecDeque::new(),
        }
    }

    pub fn set_policy(&mut self, policy: GrantPolicy) {
        self.policy = policy;
    }

    /// Number of flows started but not yet answered.
    pub fn outstanding(&self) -> usize {
        self.queued.len()
    }

    /// Answer the oldest outstanding flow.
    pub fn next_decision(&mut self) -> Option<(PermissionTicket, GrantMap)> {
        let (ticket, permissions) = self.queued.pop_front()?;
        let granted = self.policy == GrantPolicy::GrantAll;
        let decision = permissions.into_iter().map(|p| (p, granted)).collect();
        Some((ticket, decision))
    }
}

impl PermissionService for DesktopPermissionService {
    fn request(
        &mut self,
        ticket: PermissionTicket,
        permissions: &BTreeSet<PermissionId>,
    ) -> Result<()> {
        log::info!(
            "platform permission flow #{ticket} for [{}]",
            permissions
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.queued.push_back((ticket, permissions.clone()));
        Ok(())
    }
}
