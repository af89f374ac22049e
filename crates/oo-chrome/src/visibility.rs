//! Which chrome layers are shown, and how touches on the content surface
//! change that.
//!
//! The address bar row holds the options strip, so the strip is never shown
//! without the bar. Immersive mode is derived: the bar is hidden and no
//! permission request is waiting on the mediation panel.

use serde::Serialize;

use oo_types::input::PointerEvent;
use oo_ui::gesture::{GestureClass, TapDragClassifier};

/// Visibility flags owned by [`PanelVisibilityController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityState {
    pub address_bar_visible: bool,
    pub options_panel_visible: bool,
    /// Mirrors whether the permission bridge holds a request.
    pub permission_pending: bool,
}

impl VisibilityState {
    pub fn is_immersive(&self) -> bool {
        !self.address_bar_visible && !self.permission_pending
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self {
            address_bar_visible: true,
            options_panel_visible: false,
            permission_pending: false,
        }
    }
}

/// Coarse state of the address bar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Shown { options_open: bool },
    Hidden,
}

/// What a touch on the content surface did to the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTapOutcome {
    /// Nothing changed.
    Ignored,
    /// The chrome was hidden; content should become interactable again.
    ChromeHidden,
}

/// Single source of truth for chrome visibility.
#[derive(Debug, Clone)]
pub struct PanelVisibilityController {
    state: VisibilityState,
    classifier: TapDragClassifier,
}

impl PanelVisibilityController {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            state: VisibilityState::default(),
            classifier: TapDragClassifier::new(touch_slop),
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_immersive(&self) -> bool {
        self.state.is_immersive()
    }

    pub fn panel_state(&self) -> PanelState {
        if self.state.address_bar_visible {
            PanelState::Shown {
                options_open: self.state.options_panel_visible,
            }
        } else {
            PanelState::Hidden
        }
    }

    /// Show or hide the address bar. Hiding it also closes the options.
    pub fn set_address_bar_visible(&mut self, visible: bool) {
        if self.state.address_bar_visible != visible {
            log::info!("address bar {}", if visible { "shown" } else { "hidden" });
        }
        self.state.address_bar_visible = visible;
        if !visible {
            self.state.options_panel_visible = false;
        }
    }

    /// Open or close the options strip. Opening is refused while the
    /// address bar is hidden.
    pub fn set_options_panel_visible(&mut self, visible: bool) {
        if visible && !self.state.address_bar_visible {
            log::debug!("options panel needs the address bar, ignoring");
            return;
        }
        self.state.options_panel_visible = visible;
    }

    pub fn toggle_address_bar(&mut self) {
        self.set_address_bar_visible(!self.state.address_bar_visible);
    }

    /// Called by the shell whenever the permission bridge changes state.
    pub fn set_permission_pending(&mut self, pending: bool) {
        self.state.permission_pending = pending;
    }

    /// Feed one pointer sample from the content surface.
    ///
    /// While content is interactable the surface is not intercepted and no
    /// gesture is tracked. Otherwise a classified tap hides the chrome.
    pub fn on_surface_pointer(
        &mut self,
        event: &PointerEvent,
        content_interactable: bool,
    ) -> (Option<GestureClass>, SurfaceTapOutcome) {
        if content_interactable {
            self.classifier.reset();
            return (None, SurfaceTapOutcome::Ignored);
        }
        let class = self.classifier.handle(event);
        let outcome = match class {
            Some(GestureClass::Tap) => self.on_content_surface_tap(content_interactable),
            Some(GestureClass::Drag) | None => SurfaceTapOutcome::Ignored,
        };
        (class, outcome)
    }

    /// A tap landed on the content surface.
    pub fn on_content_surface_tap(&mut self, content_interactable: bool) -> SurfaceTapOutcome {
        if content_interactable {
            return SurfaceTapOutcome::Ignored;
        }
        self.set_address_bar_visible(false);
        SurfaceTapOutcome::ChromeHidden
    }

    /// Vertical drag on the address bar row: finger up opens the options,
    /// finger down closes them.
    pub fn on_vertical_drag(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.set_options_panel_visible(true);
        } else if delta_y > 0.0 {
            self.set_options_panel_visible(false);
        }
    }
}

impl Default for PanelVisibilityController {
    fn default() -> Self {
        Self::new(oo_ui::gesture::DEFAULT_TOUCH_SLOP)
    }
}
