/// Transient notices overlaid on the page
///
/// One notice is visible at a time and auto-dismisses on a timer; there
/// is no close button and no notice queue.

use std::time::{Duration, Instant};

use iced::widget::{container, text};
use iced::{Border, Color, Element, Shadow, Theme, Vector};

use crate::Message;

/// What a notice reports, which picks its accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A transient toast-style message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The message to display
    pub text: String,
    /// Kind determines the accent styling
    pub kind: NoticeKind,
    /// When the notice appeared, anchoring its dismissal deadline
    pub shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
            shown_at: Instant::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
            shown_at: Instant::now(),
        }
    }

    /// Whether the notice has outlived `lifetime` as of `now`.
    /// Each notice carries its own deadline, so one replacing another
    /// still gets its full time on screen.
    pub fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.duration_since(self.shown_at) >= lifetime
    }
}

impl NoticeKind {
    /// Accent color for the notice border, from the active palette
    fn accent(self, theme: &Theme) -> Color {
        let palette = theme.extended_palette();
        match self {
            NoticeKind::Success => palette.success.strong.color,
            NoticeKind::Info => palette.primary.strong.color,
            NoticeKind::Error => palette.danger.strong.color,
        }
    }
}

/// Render a notice as a small floating card
pub fn view(notice: &Notice) -> Element<'_, Message> {
    let kind = notice.kind;

    container(text(&notice.text).size(14))
        .padding([10.0, 18.0])
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                text_color: Some(palette.background.weak.text),
                background: Some(palette.background.weak.color.into()),
                border: Border {
                    color: kind.accent(theme),
                    width: 1.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::BLACK,
                    offset: Vector::new(0.0, 2.0),
                    blur_radius: 8.0,
                },
            }
        })
        .into()
}
