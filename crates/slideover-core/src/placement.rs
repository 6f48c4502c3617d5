#![forbid(unsafe_code)]

//! Panel placement: layout constraints plus the out-of-frame offset.
//!
//! For a given host, panel height, and [`PresentationOptions`], [`place`]
//! produces:
//!
//! 1. the anchor constraints that pin the panel at its resting position,
//! 2. the resting frame those constraints resolve to (host-local), and
//! 3. the translation that moves the panel fully outside the host on the
//!    entry edge.
//!
//! # Invariants
//!
//! - Left/right anchors are pinned to the host's left/right anchors offset by
//!   `margin.left` / `-margin.right` for every direction; they alone define
//!   the panel width.
//! - `Bottom`/`Top` pin the matching edge unless `margin.centered`, in which
//!   case the panel is vertically centered and the travel distance uses half
//!   the host height instead of the edge margin.
//! - `Left`/`Right` always center vertically and ignore `centered`.
//! - With non-negative margins and a panel narrower than the host, the resting
//!   frame moved by the offset never overlaps the host's interior.

use crate::geometry::{Edges, Rect, Translation, ViewId};
use crate::options::{Direction, PresentationOptions};

/// Layout anchor of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Left,
    Right,
    Top,
    Bottom,
    CenterY,
    Height,
}

/// Right-hand side of a layout constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation {
    /// Equal to the same anchor of `target`, plus `constant`.
    To { target: ViewId, constant: f64 },
    /// Equal to a fixed value.
    Constant(f64),
}

/// `item.anchor == relation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub item: ViewId,
    pub anchor: Anchor,
    pub relation: Relation,
}

impl Constraint {
    pub const fn to(item: ViewId, anchor: Anchor, target: ViewId, constant: f64) -> Self {
        Self {
            item,
            anchor,
            relation: Relation::To { target, constant },
        }
    }

    pub const fn constant(item: ViewId, anchor: Anchor, value: f64) -> Self {
        Self {
            item,
            anchor,
            relation: Relation::Constant(value),
        }
    }
}

/// Constraints that pin `item`'s `edges` to the same edges of `target`.
pub fn pin_edges(item: ViewId, target: ViewId, edges: Edges) -> Vec<Constraint> {
    [
        (Edges::LEFT, Anchor::Left),
        (Edges::RIGHT, Anchor::Right),
        (Edges::TOP, Anchor::Top),
        (Edges::BOTTOM, Anchor::Bottom),
    ]
    .into_iter()
    .filter(|(edge, _)| edges.contains(*edge))
    .map(|(_, anchor)| Constraint::to(item, anchor, target, 0.0))
    .collect()
}

/// Resolved placement of a panel inside a host.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub direction: Direction,
    /// Height the panel is laid out with.
    pub height: f64,
    pub constraints: Vec<Constraint>,
    /// Frame the constraints resolve to, in host-local coordinates.
    pub resting: Rect,
    /// Translation that places the panel outside the host.
    pub offset: Translation,
}

impl Placement {
    /// Frame of the panel while the offset transform is applied.
    pub fn out_of_frame(&self) -> Rect {
        self.resting.translated(self.offset)
    }
}

/// Compute the placement of `panel` inside `host`.
///
/// `height` is the effective panel height (see
/// [`Margin::effective_height`](crate::Margin::effective_height)).
pub fn place(
    panel: ViewId,
    host: ViewId,
    host_bounds: Rect,
    options: &PresentationOptions,
    height: f64,
) -> Placement {
    let margin = &options.margin;
    let host_w = host_bounds.width;
    let host_h = host_bounds.height;

    let mut constraints = vec![
        Constraint::constant(panel, Anchor::Height, height),
        Constraint::to(panel, Anchor::Left, host, margin.left),
        Constraint::to(panel, Anchor::Right, host, -margin.right),
    ];

    let centered_y = (host_h - height) / 2.0;
    let center = |constraints: &mut Vec<Constraint>| {
        constraints.push(Constraint::to(panel, Anchor::CenterY, host, 0.0));
    };

    let (y, offset) = match options.direction {
        Direction::Bottom => {
            if margin.centered {
                center(&mut constraints);
                (centered_y, Translation::new(0.0, host_h / 2.0 + height))
            } else {
                constraints.push(Constraint::to(panel, Anchor::Bottom, host, -margin.bottom));
                (
                    host_h - margin.bottom - height,
                    Translation::new(0.0, margin.bottom + height),
                )
            }
        }
        Direction::Top => {
            if margin.centered {
                center(&mut constraints);
                (centered_y, Translation::new(0.0, -(host_h / 2.0 + height)))
            } else {
                constraints.push(Constraint::to(panel, Anchor::Top, host, margin.top));
                (margin.top, Translation::new(0.0, -(margin.top + height)))
            }
        }
        Direction::Left => {
            center(&mut constraints);
            (centered_y, Translation::new(-host_w + margin.right, 0.0))
        }
        Direction::Right => {
            center(&mut constraints);
            (centered_y, Translation::new(host_w - margin.left, 0.0))
        }
    };

    let resting = Rect::new(
        margin.left,
        y,
        host_w - margin.left - margin.right,
        height,
    );

    Placement {
        direction: options.direction,
        height,
        constraints,
        resting,
        offset,
    }
}
