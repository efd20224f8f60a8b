//! Help bar widget for displaying keybind hints

use crate::ui::keymap::{Action, KeyMap};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "↑/k", "q/esc")
    pub key: String,
    /// Action description (e.g., "up", "copy value")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }

    /// Hints for every action, in the order the footer shows them
    #[must_use]
    pub fn from_keymap(keymap: &KeyMap) -> Vec<Self> {
        [
            Action::Up,
            Action::Down,
            Action::Copy,
            Action::Quit,
            Action::ToggleHelp,
        ]
        .into_iter()
        .map(|action| Self::new(keymap.label(action), action.description()))
        .collect()
    }
}

/// Footer with key hints
///
/// Collapsed it is a single line; expanded it lists one binding per line.
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    expanded: bool,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            expanded: false,
        }
    }

    /// Show the full key reference instead of the one-line footer
    #[must_use]
    pub const fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Rows this bar needs in its current mode
    #[must_use]
    pub fn height(&self) -> u16 {
        if self.expanded {
            u16::try_from(self.hints.len()).unwrap_or(u16::MAX)
        } else {
            1
        }
    }

    fn short_line(&self) -> Line<'a> {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.key_style()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(hint.action.as_str(), self.theme.dimmed_style()));
        }

        Line::from(spans)
    }

    fn full_lines(&self) -> Vec<Line<'a>> {
        let key_width = self
            .hints
            .iter()
            .map(|hint| hint.key.chars().count())
            .max()
            .unwrap_or(0);

        self.hints
            .iter()
            .map(|hint| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<key_width$}", hint.key),
                        self.theme.key_style(),
                    ),
                    Span::raw("  "),
                    Span::styled(hint.action.as_str(), self.theme.dimmed_style()),
                ])
            })
            .collect()
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = if self.expanded {
            self.full_lines()
        } else {
            vec![self.short_line()]
        };
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_hints_follow_keymap() {
        let hints = KeyHint::from_keymap(&KeyMap::default());
        assert_eq!(hints.len(), 5);
        assert_eq!(hints[0].key, "↑/k");
        assert_eq!(hints[2].action, "copy value");
        assert_eq!(hints[4].key, "?");
    }

    #[test]
    fn test_short_footer_is_one_line() {
        let theme = Theme::default();
        let hints = KeyHint::from_keymap(&KeyMap::default());
        let bar = HelpBar::new(&hints, &theme);
        assert_eq!(bar.height(), 1);

        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);

        let text = row_text(&buf, 0);
        assert!(text.contains("q/esc quit"));
        assert!(text.contains("? toggle help"));
    }

    #[test]
    fn test_expanded_lists_each_binding() {
        let theme = Theme::default();
        let hints = KeyHint::from_keymap(&KeyMap::default());
        let bar = HelpBar::new(&hints, &theme).expanded(true);
        assert_eq!(bar.height(), 5);

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);

        assert!(row_text(&buf, 2).contains("c/ctrl+c"));
        assert!(row_text(&buf, 2).contains("copy value"));
        assert!(row_text(&buf, 3).contains("quit"));
    }
}
