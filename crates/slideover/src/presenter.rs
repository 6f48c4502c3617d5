#![forbid(unsafe_code)]

//! Presenter session: slides one panel in and out of a host view.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──show──▶ Shown ──close──▶ Closing ──AnimationFinished──▶ Idle
//! ```
//!
//! - `show` attaches the backdrop (optional) and the panel, jumps the panel
//!   to its out-of-frame offset, and issues the slide-in animation.
//! - `close` hides the backdrop and animates the panel back to the stored
//!   offset. Views are detached only when the platform reports that the
//!   close animation finished; the presenter is then equal to a fresh one.
//!
//! # Invariants
//!
//! - `is_shown()` is true from a successful `show` until teardown.
//! - At most one panel/backdrop pair is tracked; `show` while shown or
//!   closing is a no-op with no hooks.
//! - The offset transform is `Some` exactly while shown.
//! - A generated backdrop follows later [`Presenter::set_backdrop_alpha`] /
//!   [`Presenter::set_backdrop_color`] calls; an adopted one never does.
//!
//! # Failure Modes
//!
//! - No explicit host and no platform default: `show` returns
//!   [`ShowOutcome::NoHost`] without touching the tree.
//! - Zero-area host bounds: a warning is logged and presentation proceeds.
//! - `close` while idle or already closing returns a no-op outcome.
//! - Completion events for unknown or superseded animations are ignored.

use std::fmt;
use std::time::Duration;

use slideover_core::{
    Edges, PackedRgba, PresentationOptions, Rect, Translation, ViewId, pin_edges, place,
};
use tracing::{debug, warn};

use crate::config::PresenterConfig;
use crate::observer::{Dismissal, PresenterObserver};
use crate::request::{BackdropRequest, ShowRequest};
use crate::tree::{AnimationId, PropertyChange, ViewTree};

/// A backdrop attached by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backdrop {
    pub view: ViewId,
    /// True when the presenter created the view and owns its styling.
    pub generated: bool,
}

/// Coarse phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Shown,
    Closing,
}

/// Everything a session tracks between show and teardown.
///
/// A completed show/close round trip leaves this equal to
/// `PresenterState::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenterState {
    host: Option<ViewId>,
    panel: Option<ViewId>,
    backdrop: Option<Backdrop>,
    offset: Option<Translation>,
    shown: bool,
    slide_in: Option<AnimationId>,
    closing: Option<AnimationId>,
}

impl PresenterState {
    pub fn host(&self) -> Option<ViewId> {
        self.host
    }

    pub fn panel(&self) -> Option<ViewId> {
        self.panel
    }

    pub fn backdrop(&self) -> Option<Backdrop> {
        self.backdrop
    }

    /// Out-of-frame transform of the current presentation.
    pub fn offset(&self) -> Option<Translation> {
        self.offset
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn phase(&self) -> Phase {
        match (self.shown, self.closing) {
            (false, _) => Phase::Idle,
            (true, None) => Phase::Shown,
            (true, Some(_)) => Phase::Closing,
        }
    }
}

/// Result of [`Presenter::show`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Views attached and the slide-in issued.
    Presented { slide_in: AnimationId },
    /// A panel is already shown or closing; nothing changed.
    AlreadyShown,
    /// No host was given and the platform has no default container.
    NoHost,
}

/// Result of [`Presenter::close`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Slide-out issued; teardown follows its completion.
    Closing(AnimationId),
    /// Nothing is shown.
    NotShown,
    /// A close animation is already in flight.
    AlreadyClosing,
}

/// Asynchronous input from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterEvent {
    AnimationFinished(AnimationId),
    /// A view with a tap recognizer was tapped.
    Tapped(ViewId),
}

/// What [`Presenter::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterAction {
    /// The panel reached its resting position.
    SlideInFinished,
    /// The close animation finished and all views were detached.
    TornDown,
    /// The backdrop was tapped. `close` is the result of the close the tap
    /// triggered, or `None` when the observer deferred.
    BackdropTapped {
        dismissal: Dismissal,
        close: Option<CloseOutcome>,
    },
}

/// A slide-over presentation session.
///
/// Owned by the caller; each operation borrows the toolkit's [`ViewTree`].
/// The presenter only stores view handles, never the views themselves.
pub struct Presenter {
    config: PresenterConfig,
    state: PresenterState,
    observer: Option<Box<dyn PresenterObserver>>,
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter {
    pub fn new() -> Self {
        Self::with_config(PresenterConfig::default())
    }

    pub fn with_config(config: PresenterConfig) -> Self {
        Self {
            config,
            state: PresenterState::default(),
            observer: None,
        }
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn state(&self) -> &PresenterState {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state.shown
    }

    pub fn set_observer(&mut self, observer: Box<dyn PresenterObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) -> Option<Box<dyn PresenterObserver>> {
        self.observer.take()
    }

    // --- Styling ---

    /// Set the generated backdrop's opacity, restyling an attached one.
    pub fn set_backdrop_alpha<T: ViewTree + ?Sized>(&mut self, tree: &mut T, alpha: f32) {
        self.config.backdrop_alpha = alpha.clamp(0.0, 1.0);
        if let Some(view) = self.generated_backdrop() {
            tree.set_alpha(view, self.config.backdrop_alpha);
        }
    }

    /// Set the generated backdrop's color, restyling an attached one.
    pub fn set_backdrop_color<T: ViewTree + ?Sized>(&mut self, tree: &mut T, color: PackedRgba) {
        self.config.backdrop_color = color;
        if let Some(view) = self.generated_backdrop() {
            tree.set_background(view, color);
        }
    }

    fn generated_backdrop(&self) -> Option<ViewId> {
        self.state
            .backdrop
            .filter(|backdrop| backdrop.generated)
            .map(|backdrop| backdrop.view)
    }

    // --- Show ---

    /// Attach `request.panel` to its host and slide it in.
    pub fn show<T: ViewTree + ?Sized>(&mut self, tree: &mut T, request: ShowRequest) -> ShowOutcome {
        let _span = tracing::debug_span!(
            "presenter_show",
            panel = request.panel.raw(),
            direction = ?request.options.direction
        )
        .entered();

        if self.state.shown {
            debug!(phase = ?self.state.phase(), "show ignored: panel already presented");
            return ShowOutcome::AlreadyShown;
        }

        let Some(host) = request.host.or_else(|| tree.default_host()) else {
            debug!("show ignored: no host container available");
            return ShowOutcome::NoHost;
        };

        self.notify(|o| o.will_show());

        let host_bounds = tree.bounds(host);
        if host_bounds.is_empty() {
            warn!(
                host = host.raw(),
                width = host_bounds.width,
                height = host_bounds.height,
                "host bounds are zero; panel will lay out at zero size until the host is sized"
            );
        }

        let backdrop = self.attach_backdrop(tree, host, request.backdrop);

        let panel = request.panel;
        let height = request
            .options
            .margin
            .effective_height(tree.natural_size(panel).height);

        tree.add_subview(host, panel);
        tree.set_hidden(panel, true);
        let offset =
            self.prepare_out_of_frame(tree, panel, host, host_bounds, &request.options, height);
        tree.set_hidden(panel, false);

        let duration = request.duration.unwrap_or(self.config.show_duration);
        let slide_in = tree.animate(
            duration,
            vec![PropertyChange::Transform {
                view: panel,
                to: Translation::IDENTITY,
            }],
        );

        self.state = PresenterState {
            host: Some(host),
            panel: Some(panel),
            backdrop,
            offset: Some(offset),
            shown: true,
            slide_in: Some(slide_in),
            closing: None,
        };
        debug!(host = host.raw(), height, ?offset, "panel presented");

        self.notify(|o| o.did_show());
        ShowOutcome::Presented { slide_in }
    }

    fn attach_backdrop<T: ViewTree + ?Sized>(
        &self,
        tree: &mut T,
        host: ViewId,
        request: BackdropRequest,
    ) -> Option<Backdrop> {
        let backdrop = match request {
            BackdropRequest::Disabled => return None,
            BackdropRequest::Adopt(view) => Backdrop {
                view,
                generated: false,
            },
            BackdropRequest::Generate => {
                let view = tree.create_view();
                tree.set_background(view, self.config.backdrop_color);
                tree.set_alpha(view, self.config.effective_alpha());
                Backdrop {
                    view,
                    generated: true,
                }
            }
        };

        tree.add_subview(host, backdrop.view);
        // An adopted view may still be hidden from a previous close.
        tree.set_hidden(backdrop.view, false);
        for constraint in pin_edges(backdrop.view, host, Edges::ALL) {
            tree.activate(constraint);
        }
        tree.set_interactive(backdrop.view, true);
        tree.add_tap_recognizer(backdrop.view);
        Some(backdrop)
    }

    /// Constrain the panel and jump it to its out-of-frame position.
    fn prepare_out_of_frame<T: ViewTree + ?Sized>(
        &self,
        tree: &mut T,
        panel: ViewId,
        host: ViewId,
        host_bounds: Rect,
        options: &PresentationOptions,
        height: f64,
    ) -> Translation {
        let placement = place(panel, host, host_bounds, options, height);
        for constraint in placement.constraints {
            tree.activate(constraint);
        }
        tree.set_transform(panel, placement.offset);
        placement.offset
    }

    // --- Close ---

    /// Slide the panel out using the configured close duration.
    pub fn close<T: ViewTree + ?Sized>(&mut self, tree: &mut T) -> CloseOutcome {
        self.close_with(tree, self.config.close_duration)
    }

    /// Slide the panel out over `duration`.
    ///
    /// `did_close` fires as soon as the animation is issued; the views are
    /// detached later, on [`PresenterEvent::AnimationFinished`].
    pub fn close_with<T: ViewTree + ?Sized>(
        &mut self,
        tree: &mut T,
        duration: Duration,
    ) -> CloseOutcome {
        match self.state.phase() {
            Phase::Idle => {
                debug!("close ignored: nothing presented");
                return CloseOutcome::NotShown;
            }
            Phase::Closing => {
                debug!("close ignored: already closing");
                return CloseOutcome::AlreadyClosing;
            }
            Phase::Shown => {}
        }

        self.notify(|o| o.will_close());

        let mut changes = Vec::with_capacity(2);
        if let Some(backdrop) = self.state.backdrop {
            changes.push(PropertyChange::Hidden {
                view: backdrop.view,
                hidden: true,
            });
        }
        if let (Some(panel), Some(offset)) = (self.state.panel, self.state.offset) {
            changes.push(PropertyChange::Transform {
                view: panel,
                to: offset,
            });
        }
        let animation = tree.animate(duration, changes);
        self.state.slide_in = None;
        self.state.closing = Some(animation);
        debug!(?duration, "close issued");

        self.notify(|o| o.did_close());
        CloseOutcome::Closing(animation)
    }

    fn tear_down<T: ViewTree + ?Sized>(&mut self, tree: &mut T) {
        if let Some(panel) = self.state.panel {
            tree.remove_from_superview(panel);
        }
        if let Some(backdrop) = self.state.backdrop {
            tree.remove_from_superview(backdrop.view);
        }
        self.state = PresenterState::default();
        debug!("presentation torn down");
    }

    // --- Events ---

    /// Feed an asynchronous platform event to the session.
    ///
    /// Returns `None` when the event does not concern this session.
    pub fn handle_event<T: ViewTree + ?Sized>(
        &mut self,
        tree: &mut T,
        event: PresenterEvent,
    ) -> Option<PresenterAction> {
        match event {
            PresenterEvent::AnimationFinished(id) if self.state.closing == Some(id) => {
                self.tear_down(tree);
                Some(PresenterAction::TornDown)
            }
            PresenterEvent::AnimationFinished(id) if self.state.slide_in == Some(id) => {
                self.state.slide_in = None;
                Some(PresenterAction::SlideInFinished)
            }
            PresenterEvent::Tapped(view)
                if self.state.phase() == Phase::Shown
                    && self.state.backdrop.is_some_and(|b| b.view == view) =>
            {
                Some(self.dismiss_from_backdrop(tree))
            }
            _ => None,
        }
    }

    fn dismiss_from_backdrop<T: ViewTree + ?Sized>(&mut self, tree: &mut T) -> PresenterAction {
        let dismissal = match self.observer.as_mut() {
            Some(observer) => observer.backdrop_tapped(),
            None => Dismissal::Close,
        };
        let close = match dismissal {
            Dismissal::Close => Some(self.close(tree)),
            Dismissal::CloseAfter(duration) => Some(self.close_with(tree, duration)),
            Dismissal::Defer => None,
        };
        PresenterAction::BackdropTapped { dismissal, close }
    }

    fn notify(&mut self, hook: impl FnOnce(&mut dyn PresenterObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            hook(observer);
        }
    }
}
