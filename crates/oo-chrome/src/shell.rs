//! The composition root: owns every chrome component and the platform
//! collaborators, and routes input and content events between them.
//!
//! All mutation goes through `&mut Shell`, so every transition is
//! serialized on the caller's event loop. After each change the inset
//! targets are recomputed and the animated geometry is retargeted; the
//! frame loop only has to call [`Shell::tick`].

use serde::Serialize;

use oo_platform::content::{ContentEvent, ContentHost};
use oo_platform::permission::{CapabilityKind, GrantMap, PermissionService, PermissionTicket};
use oo_platform::settings::SettingsStore;
use oo_types::error::Result;
use oo_types::input::PointerEvent;
use oo_types::insets::{InsetSnapshot, RawInsets};
use oo_ui::gesture::GestureClass;

use crate::address_bar::{AddressBar, SubmitOutcome};
use crate::insets::{AnimatedInsets, InsetCoordinator};
use crate::options::{OptionAction, OptionEntry, OptionsStrip};
use crate::permission::{PermissionBridge, RequestPhase};
use crate::settings::{BrowserSettings, keys};
use crate::visibility::{PanelState, PanelVisibilityController, SurfaceTapOutcome, VisibilityState};

// -----------------------------------------------------------------------
// Supporting types
// -----------------------------------------------------------------------

/// Page loading state as reported by content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadState {
    pub is_loading: bool,
    /// 0-100.
    pub progress: u8,
    pub can_go_back: bool,
}

/// What a back press did, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackOutcome {
    /// Content's fullscreen view was asked to close.
    DismissedCustomView,
    /// The chrome came back and content switched to intercept mode.
    ExitedImmersive,
    NavigatedBack,
    /// Nothing to do; the platform may close the app.
    NotHandled,
}

/// Summary of the pending permission request for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingSummary {
    pub ticket: PermissionTicket,
    pub kind: CapabilityKind,
    pub origin: String,
    pub title: String,
    pub rationale: String,
    pub phase: RequestPhase,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellSnapshot {
    pub settings: BrowserSettings,
    pub visibility: VisibilityState,
    pub is_immersive: bool,
    pub panel: PanelState,
    pub address_bar: AddressBar,
    pub options_page: usize,
    pub options: Vec<OptionEntry>,
    pub load: LoadState,
    pub custom_view_active: bool,
    pub pending_permission: Option<PendingSummary>,
    pub insets: InsetSnapshot,
}

/// Script that pins the page viewport to `width` CSS pixels and keeps it
/// pinned when the page rewrites its `<head>`.
pub fn desktop_viewport_script(width: u32) -> String {
    format!(
        r#"(function() {{
  function enforce() {{
    var meta = document.querySelector('meta[name=viewport]');
    if (!meta) {{
      meta = document.createElement('meta');
      meta.setAttribute('name', 'viewport');
      document.getElementsByTagName('head')[0].appendChild(meta);
    }}
    if (meta.getAttribute('content') !== 'width={width}') {{
      meta.setAttribute('content', 'width={width}');
    }}
  }}
  enforce();
  var head = document.getElementsByTagName('head')[0];
  if (head) {{
    new MutationObserver(enforce).observe(head, {{ childList: true, subtree: true }});
  }}
}})();"#
    )
}

// -----------------------------------------------------------------------
// Shell
// -----------------------------------------------------------------------

/// The browser chrome wired to its collaborators.
pub struct Shell<S, H, P> {
    store: S,
    host: H,
    platform: P,
    settings: BrowserSettings,
    visibility: PanelVisibilityController,
    insets: InsetCoordinator,
    animated: AnimatedInsets,
    permissions: PermissionBridge,
    address_bar: AddressBar,
    options: OptionsStrip,
    load: LoadState,
    custom_view_active: bool,
}

impl<S: SettingsStore, H: ContentHost, P: PermissionService> Shell<S, H, P> {
    /// Load settings, configure the host and open the last visited page
    /// (or the default URL).
    pub fn start(store: S, mut host: H, platform: P) -> Result<Self> {
        let settings = BrowserSettings::load(&store);
        let last = store.get_string(keys::LAST_URL, &settings.default_url);
        let url = if last.trim().is_empty() {
            settings.default_url.clone()
        } else {
            last
        };
        log::info!("starting at {url}");
        log::debug!("settings: {settings:?}");

        host.set_user_agent(settings.user_agent(), settings.is_desktop_mode)?;
        host.load_url(&url)?;

        let visibility = PanelVisibilityController::default();
        let insets = InsetCoordinator::new();
        let animated = AnimatedInsets::settled_at(&insets.update(&visibility.state(), &settings));
        Ok(Self {
            store,
            host,
            platform,
            settings,
            visibility,
            insets,
            animated,
            permissions: PermissionBridge::new(),
            address_bar: AddressBar::new(url),
            options: OptionsStrip::new(),
            load: LoadState::default(),
            custom_view_active: false,
        })
    }

    // -- accessors ------------------------------------------------------

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    pub fn options(&self) -> &OptionsStrip {
        &self.options
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_custom_view_active(&self) -> bool {
        self.custom_view_active
    }

    pub fn permissions(&self) -> &PermissionBridge {
        &self.permissions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let visibility = self.visibility.state();
        ShellSnapshot {
            settings: self.settings.clone(),
            visibility,
            is_immersive: visibility.is_immersive(),
            panel: self.visibility.panel_state(),
            address_bar: self.address_bar.clone(),
            options_page: self.options.page(),
            options: self.options.entries(&self.settings),
            load: self.load,
            custom_view_active: self.custom_view_active,
            pending_permission: self.permissions.pending().map(|r| PendingSummary {
                ticket: r.ticket,
                kind: r.kind,
                origin: r.origin.clone(),
                title: r.title.clone(),
                rationale: r.rationale.clone(),
                phase: r.phase(),
            }),
            insets: self.animated.snapshot(),
        }
    }

    // -- settings -------------------------------------------------------

    /// Replace the settings wholesale and persist them.
    ///
    /// Switching desktop mode changes the user agent and reloads.
    pub fn replace_settings(&mut self, settings: BrowserSettings) {
        if settings == self.settings {
            return;
        }
        let desktop_changed = settings.is_desktop_mode != self.settings.is_desktop_mode;
        log::debug!("settings: {settings:?}");
        settings.persist(&mut self.store);
        self.settings = settings;
        self.flush_store();

        if desktop_changed {
            log::info!(
                "{} layout",
                if self.settings.is_desktop_mode {
                    "desktop"
                } else {
                    "mobile"
                }
            );
            if let Err(e) = self
                .host
                .set_user_agent(self.settings.user_agent(), self.settings.is_desktop_mode)
            {
                log::warn!("could not switch user agent: {e}");
            }
            if let Err(e) = self.host.reload() {
                log::warn!("reload after layout switch failed: {e}");
            }
        }
        self.relayout();
    }

    /// Flip whether touches reach content or toggle the chrome.
    pub fn toggle_interactable(&mut self) {
        let next = self.settings.with_interactable(!self.settings.is_interactable);
        log::info!(
            "content {}",
            if next.is_interactable {
                "unlocked"
            } else {
                "locked"
            }
        );
        self.replace_settings(next);
    }

    // -- chrome input ---------------------------------------------------

    /// Pointer sample on the content surface.
    pub fn on_surface_pointer(&mut self, event: &PointerEvent) -> Option<GestureClass> {
        let (class, outcome) = self
            .visibility
            .on_surface_pointer(event, self.settings.is_interactable);
        if outcome == SurfaceTapOutcome::ChromeHidden {
            self.options.reset();
            let next = self.settings.with_interactable(true);
            self.replace_settings(next);
        }
        self.relayout();
        class
    }

    /// Vertical drag on the address bar row.
    pub fn on_vertical_drag(&mut self, delta_y: f32) {
        self.visibility.on_vertical_drag(delta_y);
        if !self.visibility.state().options_panel_visible {
            self.options.reset();
        }
        self.relayout();
    }

    pub fn toggle_address_bar(&mut self) {
        self.visibility.toggle_address_bar();
        if !self.visibility.state().address_bar_visible {
            self.options.reset();
        }
        self.relayout();
    }

    pub fn focus_address_bar(&mut self, focused: bool) {
        self.address_bar.set_focused(focused);
    }

    pub fn edit_address_bar(&mut self, text: &str) {
        self.address_bar.set_text(text);
    }

    pub fn drag_address_bar(&mut self, delta_x: f32) {
        self.address_bar.on_horizontal_drag(delta_x);
    }

    /// Go pressed on the address bar.
    ///
    /// Navigating from intercept mode also hides the chrome and hands
    /// touches back to content.
    pub fn submit_address_bar(&mut self) -> SubmitOutcome {
        let outcome = self.address_bar.submit();
        if let SubmitOutcome::Navigate(url) = &outcome {
            if let Err(e) = self.host.load_url(url) {
                log::warn!("failed to load {url}: {e}");
            }
            if !self.settings.is_interactable {
                self.visibility.set_address_bar_visible(false);
                self.options.reset();
                let next = self.settings.with_interactable(true);
                self.replace_settings(next);
            }
            self.relayout();
        }
        outcome
    }

    pub fn next_options_page(&mut self) -> bool {
        self.options.next_page()
    }

    pub fn prev_options_page(&mut self) -> bool {
        self.options.prev_page()
    }

    /// Press the button in `slot` of the visible options page.
    pub fn activate_option(&mut self, slot: usize) -> Option<OptionAction> {
        let action = self.options.action_at(slot)?;
        self.perform_option(action);
        Some(action)
    }

    pub fn perform_option(&mut self, action: OptionAction) {
        log::debug!("option {action:?}");
        match action {
            OptionAction::ToggleDesktopMode => {
                let next = self
                    .settings
                    .with_desktop_mode(!self.settings.is_desktop_mode);
                self.replace_settings(next);
            },
            OptionAction::ToggleInteractable => self.toggle_interactable(),
            OptionAction::Reload => {
                if let Err(e) = self.host.reload() {
                    log::warn!("reload failed: {e}");
                }
            },
            OptionAction::GoHome => {
                let home = self.settings.default_url.clone();
                if let Err(e) = self.host.load_url(&home) {
                    log::warn!("failed to load {home}: {e}");
                }
            },
            OptionAction::LogSettings => {
                log::info!("settings: {:?}", self.settings);
                log::info!(
                    "immersive: {}, visibility: {:?}",
                    self.visibility.is_immersive(),
                    self.visibility.state()
                );
            },
        }
    }

    // -- back -----------------------------------------------------------

    /// Whether a back press would be handled.
    pub fn back_enabled(&self) -> bool {
        self.custom_view_active
            || !self.visibility.state().address_bar_visible
            || self.host.can_go_back()
    }

    /// Back press: fullscreen view, then immersive mode, then history.
    pub fn on_back(&mut self) -> BackOutcome {
        if self.custom_view_active {
            if let Err(e) = self.host.dismiss_custom_view() {
                log::warn!("could not dismiss fullscreen view: {e}");
            }
            return BackOutcome::DismissedCustomView;
        }
        if self.visibility.panel_state() == PanelState::Hidden {
            self.visibility.set_address_bar_visible(true);
            let next = self.settings.with_interactable(false);
            self.replace_settings(next);
            self.relayout();
            return BackOutcome::ExitedImmersive;
        }
        if self.host.can_go_back() {
            match self.host.go_back() {
                Ok(()) => return BackOutcome::NavigatedBack,
                Err(e) => log::warn!("back navigation failed: {e}"),
            }
        }
        BackOutcome::NotHandled
    }

    // -- content --------------------------------------------------------

    pub fn handle_content_event(&mut self, event: ContentEvent) {
        match event {
            ContentEvent::NavigationStarted { url } => {
                log::debug!("loading {url}");
                self.load.is_loading = true;
                self.load.progress = 0;
                self.address_bar.on_navigation(&url);
                self.remember_url(&url);
            },
            ContentEvent::Progress(p) => {
                self.load.progress = p.min(100);
            },
            ContentEvent::NavigationFinished { url, can_go_back } => {
                log::info!("loaded {url}");
                self.load = LoadState {
                    is_loading: false,
                    progress: 100,
                    can_go_back,
                };
                self.address_bar.on_navigation(&url);
                self.remember_url(&url);
                if self.settings.is_desktop_mode {
                    let script = desktop_viewport_script(self.settings.desktop_mode_width);
                    if let Err(e) = self.host.evaluate_script(&script) {
                        log::warn!("desktop viewport script failed: {e}");
                    }
                }
            },
            ContentEvent::CapabilityRequested(request) => {
                self.permissions.on_capability_requested(request);
                self.sync_permission();
            },
            ContentEvent::CustomViewShown => {
                if self.custom_view_active {
                    log::warn!("fullscreen view already shown, dismissing the new one");
                    if let Err(e) = self.host.dismiss_custom_view() {
                        log::warn!("could not dismiss fullscreen view: {e}");
                    }
                } else {
                    log::info!("fullscreen view shown");
                    self.custom_view_active = true;
                }
            },
            ContentEvent::CustomViewHidden => {
                if self.custom_view_active {
                    log::info!("fullscreen view hidden");
                }
                self.custom_view_active = false;
            },
        }
    }

    // -- permissions ----------------------------------------------------

    /// Allow pressed on the mediation panel.
    pub fn allow_permission(&mut self) {
        self.permissions.allow(&mut self.platform);
        self.sync_permission();
    }

    /// Deny pressed on the mediation panel.
    pub fn deny_permission(&mut self) {
        self.permissions.deny();
        self.sync_permission();
    }

    /// The platform flow for `ticket` came back.
    pub fn on_permission_result(&mut self, ticket: PermissionTicket, grants: &GrantMap) -> bool {
        let applied = self.permissions.on_platform_result(ticket, grants);
        self.sync_permission();
        applied
    }

    // -- layout ---------------------------------------------------------

    /// New insets from the platform.
    pub fn on_insets_changed(&mut self, raw: RawInsets) {
        self.insets.observe(raw);
        self.relayout();
    }

    /// Advance animations by `dt_ms` and return the frame's geometry.
    pub fn tick(&mut self, dt_ms: u32) -> InsetSnapshot {
        self.animated.tick(dt_ms)
    }

    pub fn is_layout_settled(&self) -> bool {
        self.animated.is_settled()
    }

    // -- internals ------------------------------------------------------

    fn relayout(&mut self) {
        let targets = self.insets.update(&self.visibility.state(), &self.settings);
        self.animated.retarget(&targets);
    }

    fn sync_permission(&mut self) {
        self.visibility
            .set_permission_pending(self.permissions.is_pending());
        self.relayout();
    }

    fn remember_url(&mut self, url: &str) {
        self.store.set(keys::LAST_URL, url.into());
        self.flush_store();
    }

    fn flush_store(&mut self) {
        if let Err(e) = self.store.flush() {
            log::warn!("failed to persist settings: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        HostCall, RecordingContentHost, RecordingPermissionService, ResponderLog,
    };
    use oo_platform::content::CapabilityRequest;
    use oo_platform::permission::PermissionId;
    use oo_platform::settings::MemorySettingsStore;
    use oo_types::input::Point;
    use oo_types::insets::{EdgeInsets, VerticalInsets};

    type TestShell = Shell<MemorySettingsStore, RecordingContentHost, RecordingPermissionService>;

    fn shell_with(store: MemorySettingsStore) -> TestShell {
        Shell::start(
            store,
            RecordingContentHost::default(),
            RecordingPermissionService::default(),
        )
        .unwrap()
    }

    fn shell() -> TestShell {
        shell_with(MemorySettingsStore::new())
    }

    fn locked_shell() -> TestShell {
        let mut store = MemorySettingsStore::new();
        store.set(keys::IS_INTERACTABLE, false.into());
        shell_with(store)
    }

    fn tap(shell: &mut TestShell) -> Option<GestureClass> {
        let at = Point::new(100.0, 200.0);
        shell.on_surface_pointer(&PointerEvent::Down { id: 0, at });
        shell.on_surface_pointer(&PointerEvent::Up { id: 0, at })
    }

    fn phone() -> RawInsets {
        RawInsets {
            system_bars: VerticalInsets::new(24.0, 48.0),
            ..RawInsets::default()
        }
    }

    fn geolocation(log: &ResponderLog) -> ContentEvent {
        ContentEvent::CapabilityRequested(CapabilityRequest {
            kind: CapabilityKind::Geolocation,
            origin: "https://maps.example".into(),
            responder: log.responder(),
        })
    }

    #[test]
    fn start_opens_default_url_with_mobile_agent() {
        let s = shell();
        assert_eq!(s.host().loads(), vec!["https://www.google.com"]);
        assert!(matches!(
            &s.host().calls[0],
            HostCall::SetUserAgent { wide_viewport: false, .. }
        ));
        assert_eq!(s.address_bar().text(), "https://www.google.com");
        assert_eq!(s.visibility(), VisibilityState::default());
    }

    #[test]
    fn start_resumes_last_url() {
        let mut store = MemorySettingsStore::new();
        store.set(keys::LAST_URL, "https://resume.example".into());
        let s = shell_with(store);
        assert_eq!(s.host().loads(), vec!["https://resume.example"]);
    }

    #[test]
    fn navigation_updates_state_and_last_url() {
        let mut s = shell();
        s.handle_content_event(ContentEvent::NavigationStarted {
            url: "https://a.com".into(),
        });
        assert!(s.load_state().is_loading);
        s.handle_content_event(ContentEvent::Progress(140));
        assert_eq!(s.load_state().progress, 100);
        s.handle_content_event(ContentEvent::NavigationFinished {
            url: "https://a.com".into(),
            can_go_back: true,
        });
        assert_eq!(
            s.load_state(),
            LoadState {
                is_loading: false,
                progress: 100,
                can_go_back: true
            }
        );
        assert_eq!(s.address_bar().text(), "https://a.com");
        assert_eq!(
            s.store().get_string(keys::LAST_URL, ""),
            "https://a.com"
        );
    }

    #[test]
    fn tap_in_intercept_mode_hides_chrome_and_unlocks() {
        let mut s = locked_shell();
        s.on_vertical_drag(-10.0);
        assert_eq!(tap(&mut s), Some(GestureClass::Tap));
        let v = s.visibility();
        assert!(!v.address_bar_visible);
        assert!(!v.options_panel_visible);
        assert!(s.settings().is_interactable);
        assert!(s.store().get_bool(keys::IS_INTERACTABLE, false));
    }

    #[test]
    fn tap_on_interactable_content_is_ignored() {
        let mut s = shell();
        assert_eq!(tap(&mut s), None);
        assert!(s.visibility().address_bar_visible);
    }

    #[test]
    fn back_exits_immersive_into_intercept_mode() {
        let mut s = locked_shell();
        tap(&mut s);
        assert!(s.visibility().is_immersive());
        assert_eq!(s.snapshot().panel, PanelState::Hidden);
        assert!(s.back_enabled());
        assert_eq!(s.on_back(), BackOutcome::ExitedImmersive);
        assert!(s.visibility().address_bar_visible);
        assert_eq!(
            s.snapshot().panel,
            PanelState::Shown {
                options_open: false
            }
        );
        assert!(!s.settings().is_interactable);
    }

    #[test]
    fn back_prefers_custom_view_over_everything() {
        let mut s = shell();
        s.toggle_address_bar();
        s.host_mut().can_go_back = true;
        s.handle_content_event(ContentEvent::CustomViewShown);
        assert_eq!(s.on_back(), BackOutcome::DismissedCustomView);
        assert_eq!(s.host().count(&HostCall::DismissCustomView), 1);
        // Bar is still hidden until the view actually closes.
        assert!(!s.visibility().address_bar_visible);
    }

    #[test]
    fn back_navigates_history_then_gives_up() {
        let mut s = shell();
        assert!(!s.back_enabled());
        assert_eq!(s.on_back(), BackOutcome::NotHandled);
        s.host_mut().can_go_back = true;
        assert_eq!(s.on_back(), BackOutcome::NavigatedBack);
        assert_eq!(s.host().count(&HostCall::GoBack), 1);
    }

    #[test]
    fn second_custom_view_is_dismissed() {
        let mut s = shell();
        s.handle_content_event(ContentEvent::CustomViewShown);
        s.handle_content_event(ContentEvent::CustomViewShown);
        assert!(s.is_custom_view_active());
        assert_eq!(s.host().count(&HostCall::DismissCustomView), 1);
        s.handle_content_event(ContentEvent::CustomViewHidden);
        assert!(!s.is_custom_view_active());
    }

    #[test]
    fn submit_search_from_intercept_mode_hides_chrome() {
        let mut s = locked_shell();
        s.focus_address_bar(true);
        s.edit_address_bar("hello world");
        let outcome = s.submit_address_bar();
        assert_eq!(
            outcome,
            SubmitOutcome::Navigate("https://www.google.com/search?q=hello%20world".into())
        );
        assert_eq!(
            s.host().loads().last(),
            Some(&"https://www.google.com/search?q=hello%20world")
        );
        assert!(!s.visibility().address_bar_visible);
        assert!(s.settings().is_interactable);
    }

    #[test]
    fn submit_blank_does_not_navigate() {
        let mut s = shell();
        s.focus_address_bar(true);
        assert_eq!(s.submit_address_bar(), SubmitOutcome::Restored);
        assert_eq!(s.host().loads().len(), 1);
        assert!(s.visibility().address_bar_visible);
    }

    #[test]
    fn navigation_while_typing_keeps_text() {
        let mut s = shell();
        s.focus_address_bar(true);
        s.edit_address_bar("exa");
        s.handle_content_event(ContentEvent::NavigationFinished {
            url: "https://redirect.example".into(),
            can_go_back: false,
        });
        assert_eq!(s.address_bar().text(), "exa");
        assert_eq!(s.address_bar().url(), "https://redirect.example");
    }

    #[test]
    fn desktop_mode_switches_agent_reloads_and_pins_viewport() {
        let mut s = shell();
        s.perform_option(OptionAction::ToggleDesktopMode);
        assert!(s.settings().is_desktop_mode);
        assert!(s.host().calls.contains(&HostCall::SetUserAgent {
            user_agent: crate::settings::DESKTOP_USER_AGENT.into(),
            wide_viewport: true,
        }));
        assert_eq!(s.host().count(&HostCall::Reload), 1);

        s.handle_content_event(ContentEvent::NavigationFinished {
            url: "https://a.com".into(),
            can_go_back: false,
        });
        let scripts: Vec<_> = s
            .host()
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::EvaluateScript(js) => Some(js.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("width=820"));
    }

    #[test]
    fn mobile_mode_runs_no_viewport_script() {
        let mut s = shell();
        s.handle_content_event(ContentEvent::NavigationFinished {
            url: "https://a.com".into(),
            can_go_back: false,
        });
        assert!(
            !s.host()
                .calls
                .iter()
                .any(|c| matches!(c, HostCall::EvaluateScript(_)))
        );
    }

    #[test]
    fn options_strip_pages_and_activates() {
        let mut s = shell();
        assert_eq!(s.activate_option(1), Some(OptionAction::ToggleInteractable));
        assert!(!s.settings().is_interactable);
        assert!(s.next_options_page());
        assert_eq!(s.activate_option(0), Some(OptionAction::LogSettings));
        assert_eq!(s.activate_option(3), None);
        assert!(s.prev_options_page());
        s.activate_option(3);
        assert_eq!(s.host().loads().last(), Some(&"https://www.google.com"));
    }

    #[test]
    fn closing_options_resets_page() {
        let mut s = shell();
        s.on_vertical_drag(-5.0);
        s.next_options_page();
        s.on_vertical_drag(5.0);
        assert_eq!(s.options().page(), 0);
    }

    #[test]
    fn permission_request_blocks_immersive_until_denied() {
        let log = ResponderLog::new();
        let mut s = shell();
        s.toggle_address_bar();
        assert!(s.visibility().is_immersive());

        s.handle_content_event(geolocation(&log));
        assert!(!s.visibility().is_immersive());
        let pending = s.snapshot().pending_permission.unwrap();
        assert_eq!(pending.title, "Location Access Required");
        assert_eq!(pending.phase, RequestPhase::AwaitingUser);

        s.deny_permission();
        assert!(s.visibility().is_immersive());
        assert_eq!(log.answers(), vec![false]);
        assert!(s.platform().requests.is_empty());
    }

    #[test]
    fn permission_allow_round_trip() {
        let log = ResponderLog::new();
        let mut s = shell();
        s.handle_content_event(geolocation(&log));
        s.allow_permission();
        let (ticket, asked) = s.platform().requests[0].clone();
        assert!(asked.contains(&PermissionId::FineLocation));
        assert!(s.permissions().is_pending());

        assert!(!s.on_permission_result(ticket + 7, &GrantMap::new()));
        let grants: GrantMap = [(PermissionId::FineLocation, true)].into_iter().collect();
        assert!(s.on_permission_result(ticket, &grants));
        assert!(!s.permissions().is_pending());
        assert!(!s.visibility().permission_pending);
        assert_eq!(log.answers(), vec![true]);
    }

    #[test]
    fn concurrent_request_is_auto_denied() {
        let first = ResponderLog::new();
        let second = ResponderLog::new();
        let mut s = shell();
        s.handle_content_event(geolocation(&first));
        s.handle_content_event(geolocation(&second));
        assert_eq!(second.answers(), vec![false]);
        assert!(first.answers().is_empty());
        assert_eq!(s.snapshot().pending_permission.unwrap().ticket, 1);
    }

    #[test]
    fn immersive_geometry_settles_to_zero() {
        let mut s = shell();
        s.on_insets_changed(phone());
        s.tick(1000);
        let shown = s.tick(0);
        assert_eq!(shown.content_padding, 8.0);
        assert_eq!(shown.system_bar_padding, VerticalInsets::new(24.0, 48.0));

        s.toggle_address_bar();
        s.tick(150);
        assert!(!s.is_layout_settled());
        let hidden = s.tick(150);
        assert!(s.is_layout_settled());
        assert_eq!(hidden.content_padding, 0.0);
        assert_eq!(hidden.corner_radius, 0.0);
        assert_eq!(hidden.cutout_padding, EdgeInsets::ZERO);
        assert_eq!(hidden.system_bar_padding, VerticalInsets::ZERO);
    }

    #[test]
    fn snapshot_serializes() {
        let s = shell();
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["is_immersive"], false);
        assert_eq!(json["settings"]["default_url"], "https://www.google.com");
        assert_eq!(json["panel"]["state"], "shown");
        assert_eq!(json["panel"]["options_open"], false);
        assert_eq!(json["options"][0]["action"], "toggle_desktop_mode");
        assert_eq!(json["options"][0]["label"], "Desktop layout");
        assert!(json["pending_permission"].is_null());
    }
}
