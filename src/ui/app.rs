//! Ratatui-based session runner
//!
//! Owns the terminal for the lifetime of the session: sets it up, runs the
//! draw/event loop until quit, and restores it afterwards.

use super::clipboard::{ClipboardWriter, SystemClipboard, spawn_copy};
use super::error::Result;
use super::events::{EventResult, handle_event, next_event};
use super::keymap::{Action, KeyMap};
use super::state::SessionState;
use super::theme::Theme;
use super::widgets::{FieldTable, HelpBar, KeyHint, NotificationBar};
use crate::config::ViewerConfig;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Paragraph, TableState, Wrap},
};
use std::io::{self, Stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

const TITLE: &str = "SEPA Payment Information";

/// Longest the loop waits for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Interactive viewer over a parsed document
pub struct SessionApp {
    keymap: KeyMap,
    hints: Vec<KeyHint>,
    theme: Theme,
    table_height: u16,
    notification_ttl: Duration,
    clipboard: Arc<dyn ClipboardWriter>,
}

impl SessionApp {
    /// Create a session runner with the given key bindings and defaults for
    /// everything else
    #[must_use]
    pub fn new(keymap: KeyMap) -> Self {
        let defaults = ViewerConfig::default();
        let hints = KeyHint::from_keymap(&keymap);
        Self {
            keymap,
            hints,
            theme: Theme::default(),
            table_height: defaults.table_height,
            notification_ttl: defaults.notification_ttl(),
            clipboard: Arc::new(SystemClipboard),
        }
    }

    /// Create a session runner from configuration
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidConfig` if a key binding cannot be parsed.
    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        let keymap = KeyMap::from_config(&config.keybinds)?;
        let mut app = Self::new(keymap);
        app.table_height = config.table_height;
        app.notification_ttl = config.notification_ttl();
        Ok(app)
    }

    /// Use a different clipboard backend
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Build the initial state for a parse outcome
    #[must_use]
    pub fn session<E: std::fmt::Display>(
        &self,
        parsed: std::result::Result<crate::sepa::SepaData, E>,
    ) -> SessionState {
        SessionState::from_parse(parsed).with_notification_ttl(self.notification_ttl)
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run the session until the user quits
    ///
    /// # Errors
    ///
    /// Returns `UiError::IoError` if the terminal cannot be set up, drawn to
    /// or read from.
    pub fn run(&self, state: SessionState) -> Result<()> {
        let mut terminal = Self::setup_terminal().inspect_err(|e| {
            tracing::error!(error = %e, "terminal setup failed");
        })?;

        let result = self.run_loop(&mut terminal, state);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        mut state: SessionState,
    ) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut table_state = TableState::default();

        loop {
            terminal.draw(|frame| self.render(frame, &state, &mut table_state))?;

            let Some(event) = next_event(&rx, state.notification_deadline(), POLL_INTERVAL)?
            else {
                continue;
            };

            match handle_event(&mut state, event, &self.keymap, Instant::now()) {
                EventResult::Copy(value) => {
                    spawn_copy(Arc::clone(&self.clipboard), value, tx.clone());
                }
                EventResult::Quit => break,
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        tracing::debug!("session ended by user");
        Ok(())
    }

    /// Draw one frame
    pub fn render(&self, frame: &mut Frame, state: &SessionState, table_state: &mut TableState) {
        let area = frame.area();

        if let Some(error) = state.error() {
            self.render_error(frame, area, error);
            return;
        }

        table_state.select(Some(state.cursor()));

        let help_bar = HelpBar::new(&self.hints, &self.theme).expanded(state.show_full_help());
        let title_height = if state.subtitle().is_some() { 4 } else { 3 };

        let [title_area, table_area, notification_area, help_area, _] = Layout::vertical([
            Constraint::Length(title_height),
            Constraint::Length(FieldTable::height_for(self.table_height)),
            Constraint::Length(if state.notification().is_some() { 3 } else { 0 }),
            Constraint::Length(help_bar.height()),
            Constraint::Min(0),
        ])
        .areas(area);

        let mut title_lines = vec![
            Line::default(),
            Line::styled(TITLE, self.theme.title_style()),
        ];
        if let Some(subtitle) = state.subtitle() {
            title_lines.push(Line::styled(subtitle, self.theme.dimmed_style()));
        }
        frame.render_widget(Paragraph::new(title_lines), title_area);

        let table_area = Rect {
            width: table_area.width.min(FieldTable::width()),
            ..table_area
        };
        frame.render_stateful_widget(
            FieldTable::new(state.fields(), &self.theme),
            table_area,
            table_state,
        );

        // One blank line above and below the notification.
        let [_, notification_line, _] = Layout::vertical([Constraint::Length(1); 3])
            .areas(notification_area);
        frame.render_widget(
            NotificationBar::new(state.notification(), &self.theme),
            notification_line,
        );

        frame.render_widget(help_bar, help_area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, error: &str) {
        let quit_key = self
            .keymap
            .primary_label(Action::Quit)
            .unwrap_or_else(|| "q".to_string());

        let text = vec![
            Line::styled(format!("Error: {error}"), self.theme.error_style()),
            Line::default(),
            Line::raw(format!("Press '{quit_key}' to quit.")),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sepa::{self, Category, Field, SepaData};
    use crate::ui::mock::MockClipboard;
    use ratatui::backend::TestBackend;

    fn screen(app: &SessionApp, state: &SessionState) -> String {
        let backend = TestBackend::new(110, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut table_state = TableState::default();
        terminal
            .draw(|frame| app.render(frame, state, &mut table_state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample() -> SepaData {
        SepaData {
            fields: vec![
                Field::new(Category::GroupHeader, "Message ID", "MSG-2024-001"),
                Field::new(Category::Debtor, "Name", "ACME GmbH"),
            ],
            payment_info_count: 1,
            transaction_count: 1,
        }
    }

    fn app() -> SessionApp {
        SessionApp::new(KeyMap::default()).with_clipboard(Arc::new(MockClipboard::new()))
    }

    #[test]
    fn test_renders_title_table_and_footer() {
        let app = app();
        let state = app.session::<sepa::ParseError>(Ok(sample()));
        let text = screen(&app, &state);

        assert!(text.contains("SEPA Payment Information"));
        assert!(text.contains("Category"));
        assert!(text.contains("MSG-2024-001"));
        assert!(text.contains("ACME GmbH"));
        assert!(text.contains("c/ctrl+c copy value"));
        assert!(!text.contains("Copied:"));
    }

    #[test]
    fn test_renders_notification() {
        let app = app();
        let mut state = app.session::<sepa::ParseError>(Ok(sample()));
        state.copy_finished(Ok("MSG-2024-001".to_string()), Instant::now());

        let text = screen(&app, &state);
        assert!(text.contains("Copied: MSG-2024-001"));
    }

    #[test]
    fn test_renders_coverage_note() {
        let app = app();
        let data = SepaData {
            payment_info_count: 2,
            ..sample()
        };
        let state = app.session::<sepa::ParseError>(Ok(data));
        let text = screen(&app, &state);
        assert!(text.contains("showing first of 2 payment blocks"));
    }

    #[test]
    fn test_renders_error_view() {
        let app = app();
        let state = app.session::<&str>(Err("failed to parse XML: unexpected end"));
        let text = screen(&app, &state);

        assert!(text.contains("Error: failed to parse XML: unexpected end"));
        assert!(text.contains("Press 'q' to quit."));
        assert!(!text.contains("Category"));
    }

    #[test]
    fn test_expanded_help() {
        let app = app();
        let mut state = app.session::<sepa::ParseError>(Ok(sample()));
        state.toggle_help();
        let text = screen(&app, &state);
        assert!(text.contains("toggle help"));
        assert!(!text.contains(" • "));
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = ViewerConfig::default();
        config.notification_ms = 500;
        let app = SessionApp::from_config(&config).unwrap();

        let mut state = app.session::<sepa::ParseError>(Ok(sample()));
        let start = Instant::now();
        state.copy_finished(Ok("x".to_string()), start);
        assert_eq!(
            state.notification_deadline(),
            Some(start + Duration::from_millis(500))
        );
    }
}
