#![forbid(unsafe_code)]

//! Builder for a single show call.

use std::time::Duration;

use slideover_core::{Direction, Margin, PresentationOptions, ViewId};

/// Where the backdrop for a presentation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackdropRequest {
    /// Create and style a fresh backdrop view.
    #[default]
    Generate,
    /// Adopt a caller view as the backdrop; its styling is left untouched.
    Adopt(ViewId),
    /// No backdrop: the panel can only be dismissed programmatically.
    Disabled,
}

/// Arguments for [`Presenter::show`](crate::Presenter::show).
///
/// ```ignore
/// let request = ShowRequest::new(panel)
///     .host(container)
///     .direction(Direction::Left)
///     .margin(Margin::sides(0.0, 64.0));
/// presenter.show(&mut tree, request);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowRequest {
    pub panel: ViewId,
    /// Host to attach into; `None` uses the platform's default container.
    pub host: Option<ViewId>,
    pub backdrop: BackdropRequest,
    pub options: PresentationOptions,
    /// Slide-in duration; `None` uses the session's configured duration.
    pub duration: Option<Duration>,
}

impl ShowRequest {
    /// Present `panel` with defaults: default host, generated backdrop, bottom entry.
    pub fn new(panel: ViewId) -> Self {
        Self {
            panel,
            host: None,
            backdrop: BackdropRequest::Generate,
            options: PresentationOptions::default(),
            duration: None,
        }
    }

    /// Attach into `host` instead of the default container.
    pub fn host(mut self, host: ViewId) -> Self {
        self.host = Some(host);
        self
    }

    /// Use a caller-supplied backdrop view.
    pub fn backdrop(mut self, backdrop: ViewId) -> Self {
        self.backdrop = BackdropRequest::Adopt(backdrop);
        self
    }

    /// Present without any backdrop.
    pub fn without_backdrop(mut self) -> Self {
        self.backdrop = BackdropRequest::Disabled;
        self
    }

    /// Set direction and margin together.
    pub fn options(mut self, options: PresentationOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the entry edge.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    /// Set the panel margin.
    pub fn margin(mut self, margin: Margin) -> Self {
        self.options.margin = margin;
        self
    }

    /// Override the slide-in duration for this show.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}
