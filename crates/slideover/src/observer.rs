#![forbid(unsafe_code)]

//! Lifecycle hooks for a presenter session.

use std::time::Duration;

/// What to do when the backdrop is tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dismissal {
    /// Close with the presenter's configured close duration.
    #[default]
    Close,
    /// Close over the given duration.
    CloseAfter(Duration),
    /// Leave the panel up; the observer's owner closes it later.
    Defer,
}

/// Optional hooks around show and close.
///
/// Every method has a no-op default, so implementors override only what they
/// need. Hooks run synchronously on the UI thread while the presenter is
/// mutably borrowed; to react by calling back into the presenter, return a
/// [`Dismissal`] or record the intent and act after the call returns.
///
/// # Ordering
///
/// - `will_show` runs before any view mutation, `did_show` right after the
///   slide-in animation is issued (not when it completes).
/// - `will_close` runs before the close animation is issued.
/// - `did_close` runs right after the close animation is issued, *before*
///   the panel and backdrop are detached. Teardown happens later, when the
///   animation reports completion.
pub trait PresenterObserver {
    fn will_show(&mut self) {}

    fn did_show(&mut self) {}

    fn will_close(&mut self) {}

    fn did_close(&mut self) {}

    /// Called when the presenter's backdrop is tapped.
    fn backdrop_tapped(&mut self) -> Dismissal {
        Dismissal::Close
    }
}
