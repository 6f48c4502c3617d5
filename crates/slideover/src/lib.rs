#![forbid(unsafe_code)]

//! Slide-over presenter: slides a caller-supplied panel into a host view from
//! one of four edges, with an optional dimming backdrop, and animates it back
//! out on dismissal.
//!
//! The toolkit side is abstracted by [`ViewTree`]; the session itself is a
//! plain value ([`Presenter`]) owned by the caller.
//!
//! # Example
//!
//! ```ignore
//! use slideover::{Direction, Margin, Presenter, PresenterEvent, ShowRequest};
//!
//! let mut presenter = Presenter::new();
//! let _ = presenter.show(
//!     &mut tree,
//!     ShowRequest::new(sheet).direction(Direction::Bottom).margin(Margin::height(240.0)),
//! );
//!
//! // Later, from the toolkit's event loop:
//! presenter.handle_event(&mut tree, PresenterEvent::Tapped(view));
//! ```

pub mod config;
pub mod observer;
pub mod presenter;
pub mod request;
pub mod tree;

pub use config::{DEFAULT_BACKDROP_ALPHA, DEFAULT_DURATION, PresenterConfig};
pub use observer::{Dismissal, PresenterObserver};
pub use presenter::{
    Backdrop, CloseOutcome, Phase, Presenter, PresenterAction, PresenterEvent, PresenterState,
    ShowOutcome,
};
pub use request::{BackdropRequest, ShowRequest};
pub use tree::{AnimationId, PropertyChange, ViewTree};

pub use slideover_core::{
    Anchor, Constraint, Direction, Edges, Margin, PackedRgba, Placement, PresentationOptions, Rect,
    Relation, Size, Translation, ViewId, pin_edges, place,
};
