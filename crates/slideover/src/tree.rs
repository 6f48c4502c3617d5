#![forbid(unsafe_code)]

//! The platform boundary: what the presenter needs from a host toolkit.
//!
//! A toolkit adapter implements [`ViewTree`] over its own view hierarchy.
//! Asynchronous results (animation completion, taps on views that have a
//! tap recognizer) are fed back through
//! [`Presenter::handle_event`](crate::Presenter::handle_event) on the UI
//! thread.

use std::time::Duration;

use slideover_core::{Constraint, PackedRgba, Rect, Size, Translation, ViewId};

/// Identifier the platform assigns to an issued animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One property mutation inside an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyChange {
    /// Interpolate the view's transform towards `to`.
    Transform { view: ViewId, to: Translation },
    /// Not interpolated: applied as soon as the animation starts.
    Hidden { view: ViewId, hidden: bool },
}

/// Mutable access to a host toolkit's view hierarchy.
///
/// All calls happen on the UI thread. Methods taking a `ViewId` the
/// toolkit does not know should do nothing.
pub trait ViewTree {
    /// The application's primary top-level container, if one exists.
    fn default_host(&self) -> Option<ViewId>;

    /// Current bounds of `view` in its own coordinate space.
    fn bounds(&self, view: ViewId) -> Rect;

    /// Size `view` currently reports for itself before any constraint from
    /// the presenter is applied.
    fn natural_size(&self, view: ViewId) -> Size;

    /// Create a fresh, detached, unstyled view.
    fn create_view(&mut self) -> ViewId;

    /// Attach `child` on top of `parent`'s existing subviews.
    fn add_subview(&mut self, parent: ViewId, child: ViewId);

    /// Detach `view` and drop the constraints that reference it.
    fn remove_from_superview(&mut self, view: ViewId);

    /// Install and activate a layout constraint.
    fn activate(&mut self, constraint: Constraint);

    /// Show or hide a view immediately.
    fn set_hidden(&mut self, view: ViewId, hidden: bool);

    /// Set a view's opacity.
    fn set_alpha(&mut self, view: ViewId, alpha: f32);

    /// Set a view's background color.
    fn set_background(&mut self, view: ViewId, color: PackedRgba);

    /// Enable or disable user interaction on a view.
    fn set_interactive(&mut self, view: ViewId, interactive: bool);

    /// Apply a transform immediately, without animation.
    fn set_transform(&mut self, view: ViewId, transform: Translation);

    /// Deliver future taps on `view` as
    /// [`PresenterEvent::Tapped`](crate::PresenterEvent::Tapped).
    fn add_tap_recognizer(&mut self, view: ViewId);

    /// Start animating `changes` over `duration`.
    ///
    /// Completion must be reported later as
    /// [`PresenterEvent::AnimationFinished`](crate::PresenterEvent::AnimationFinished)
    /// carrying the returned id. Re-targeting a property that is already
    /// animating follows the toolkit's own rules (typically last write wins).
    fn animate(&mut self, duration: Duration, changes: Vec<PropertyChange>) -> AnimationId;
}
