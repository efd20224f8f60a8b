//! Notification bar widget for the copy status line

use crate::ui::state::{Notification, NotificationLevel};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line status message; renders nothing when there is no notification
pub struct NotificationBar<'a> {
    notification: Option<&'a Notification>,
    theme: &'a Theme,
}

impl<'a> NotificationBar<'a> {
    #[must_use]
    pub const fn new(notification: Option<&'a Notification>, theme: &'a Theme) -> Self {
        Self {
            notification,
            theme,
        }
    }

    const fn prefix_for_level(level: NotificationLevel) -> &'static str {
        match level {
            NotificationLevel::Success => "✓ ",
            NotificationLevel::Error => "✗ ",
        }
    }
}

impl Widget for NotificationBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notification) = self.notification else {
            return;
        };

        let style = match notification.level {
            NotificationLevel::Success => self.theme.success_style(),
            NotificationLevel::Error => self.theme.error_style(),
        };

        let line = Line::from(vec![
            Span::styled(Self::prefix_for_level(notification.level), style),
            Span::styled(notification.text.as_str(), style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
