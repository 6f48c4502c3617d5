#![forbid(unsafe_code)]

//! Platform-independent pieces of the slide-over presenter.
//!
//! This crate provides:
//! - [`geometry`]: view handles, rectangles, edge sets, and [`Translation`]
//! - [`color`]: [`PackedRgba`] for backdrop styling
//! - [`options`]: [`Direction`], [`Margin`], and [`PresentationOptions`]
//! - [`placement`]: the constraint set and out-of-frame offset for a panel

pub mod color;
pub mod geometry;
pub mod options;
pub mod placement;

pub use color::PackedRgba;
pub use geometry::{Edges, Rect, Size, Translation, ViewId};
pub use options::{Direction, Margin, PresentationOptions};
pub use placement::{Anchor, Constraint, Placement, Relation, pin_edges, place};
