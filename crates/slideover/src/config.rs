#![forbid(unsafe_code)]

//! Session-wide presenter configuration.

use std::time::Duration;

use slideover_core::PackedRgba;

/// Default duration of both the slide-in and the slide-out.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Default opacity of a presenter-generated backdrop.
pub const DEFAULT_BACKDROP_ALPHA: f32 = 0.5;

/// Styling and timing shared by every presentation of one session.
///
/// The backdrop color and alpha only apply to backdrops the presenter
/// creates itself; a caller-supplied backdrop keeps its own styling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PresenterConfig {
    pub backdrop_color: PackedRgba,
    /// Opacity in `[0.0, 1.0]`.
    pub backdrop_alpha: f32,
    pub show_duration: Duration,
    pub close_duration: Duration,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            backdrop_color: PackedRgba::BLACK,
            backdrop_alpha: DEFAULT_BACKDROP_ALPHA,
            show_duration: DEFAULT_DURATION,
            close_duration: DEFAULT_DURATION,
        }
    }
}

impl PresenterConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set backdrop color.
    pub fn backdrop_color(mut self, color: PackedRgba) -> Self {
        self.backdrop_color = color;
        self
    }

    /// Set backdrop opacity (clamped to `[0.0, 1.0]`).
    pub fn backdrop_alpha(mut self, alpha: f32) -> Self {
        self.backdrop_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the slide-in duration.
    pub fn show_duration(mut self, duration: Duration) -> Self {
        self.show_duration = duration;
        self
    }

    /// Set the slide-out duration.
    pub fn close_duration(mut self, duration: Duration) -> Self {
        self.close_duration = duration;
        self
    }

    /// Opacity actually applied to a generated backdrop.
    #[inline]
    pub(crate) fn effective_alpha(&self) -> f32 {
        self.backdrop_alpha.clamp(0.0, 1.0)
    }
}
