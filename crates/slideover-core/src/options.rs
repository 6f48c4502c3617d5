#![forbid(unsafe_code)]

//! Per-presentation options: entry direction and margins.

/// Edge of the host a panel slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Bottom, Self::Top, Self::Left, Self::Right];

    /// Whether the panel travels along the vertical axis.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }
}

/// Panel insets within the host plus an explicit height.
///
/// `left`/`right` always define the panel's width. `bottom`/`top` are used
/// by the matching direction when `centered` is false. A `height` of zero
/// means "use the panel's natural height".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
    pub centered: bool,
}

impl Margin {
    /// All insets zero, natural height, edge-anchored.
    pub const fn new() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            height: 0.0,
            centered: false,
        }
    }

    /// Zero insets with an explicit panel height.
    pub const fn height(height: f64) -> Self {
        Self {
            height,
            ..Self::new()
        }
    }

    /// Horizontal insets only.
    pub const fn sides(left: f64, right: f64) -> Self {
        Self {
            left,
            right,
            ..Self::new()
        }
    }

    /// Set the left inset.
    pub fn left(mut self, left: f64) -> Self {
        self.left = left;
        self
    }

    /// Set the right inset.
    pub fn right(mut self, right: f64) -> Self {
        self.right = right;
        self
    }

    /// Set the top inset, used by top entries.
    pub fn top(mut self, top: f64) -> Self {
        self.top = top;
        self
    }

    /// Set the bottom inset, used by bottom entries.
    pub fn bottom(mut self, bottom: f64) -> Self {
        self.bottom = bottom;
        self
    }

    /// Set an explicit panel height (`0.0` means natural height).
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Vertically center the panel instead of pinning it to the entry edge.
    ///
    /// Only meaningful for [`Direction::Bottom`] and [`Direction::Top`];
    /// horizontal entries are always centered.
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Height to lay the panel out with, falling back to `natural` when no
    /// explicit height was configured.
    #[inline]
    pub fn effective_height(&self, natural: f64) -> f64 {
        if self.height == 0.0 {
            natural
        } else {
            self.height
        }
    }
}

/// Configuration for one show call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresentationOptions {
    pub margin: Margin,
    pub direction: Direction,
}

impl PresentationOptions {
    /// Default margin, entering from the bottom.
    pub const fn new() -> Self {
        Self {
            margin: Margin::new(),
            direction: Direction::Bottom,
        }
    }

    /// Default margin, entering from `direction`.
    pub const fn from_direction(direction: Direction) -> Self {
        Self {
            margin: Margin::new(),
            direction,
        }
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
