//! Session state for the viewer TUI
//!
//! Holds the field list, the cursor, the transient copy notification and the
//! help toggle. All mutation goes through the methods here; the event loop
//! only decides which one to call.

use super::error::ClipboardError;
use crate::sepa::{Field, SepaData};
use std::time::{Duration, Instant};

/// Notification values longer than this are shortened
pub const MAX_NOTIFICATION_VALUE: usize = 40;

const ELLIPSIS: &str = "...";

/// Default lifetime of a notification
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(2);

/// Coarse state of the session, derived from `SessionState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fields available, normal browsing
    Ready,
    /// Nothing to browse; only quit is accepted
    Empty,
    /// A copy just finished and its notification is showing
    NotifyVisible,
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A self-clearing status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
    /// When the one-shot clear timer fires
    pub expires_at: Instant,
}

/// Shorten a value for display in the notification line
///
/// Values of up to 40 characters are returned unchanged; longer values keep
/// their first 37 characters followed by `...`.
#[must_use]
pub fn truncate_value(value: &str) -> String {
    if value.chars().count() <= MAX_NOTIFICATION_VALUE {
        return value.to_string();
    }
    let keep = MAX_NOTIFICATION_VALUE - ELLIPSIS.len();
    let mut short: String = value.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

/// Application state for the viewer
#[derive(Debug)]
pub struct SessionState {
    fields: Vec<Field>,
    cursor: usize,
    notification: Option<Notification>,
    notification_ttl: Duration,
    /// Message shown instead of the table when there is nothing to browse
    error: Option<String>,
    /// Extra line under the title (e.g. skipped payment blocks)
    subtitle: Option<String>,
    show_full_help: bool,
    should_quit: bool,
}

impl SessionState {
    /// Create a session over a field list
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            cursor: 0,
            notification: None,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            error: None,
            subtitle: None,
            show_full_help: false,
            should_quit: false,
        }
    }

    /// Create a session that only displays an error and waits for quit
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Create a session from the outcome of parsing a document
    #[must_use]
    pub fn from_parse<E: std::fmt::Display>(result: Result<SepaData, E>) -> Self {
        match result {
            Ok(data) => {
                let subtitle = data.coverage_note();
                Self {
                    subtitle,
                    ..Self::new(data.fields)
                }
            }
            Err(e) => Self::failed(e.to_string()),
        }
    }

    /// Set how long notifications stay visible
    #[must_use]
    pub const fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    /// Current coarse mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.fields.is_empty() {
            Mode::Empty
        } else if self.notification.is_some() {
            Mode::NotifyVisible
        } else {
            Mode::Ready
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Field under the cursor
    #[must_use]
    pub fn current_field(&self) -> Option<&Field> {
        self.fields.get(self.cursor)
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Notification text, empty when none is showing
    #[must_use]
    pub fn notification_text(&self) -> &str {
        self.notification.as_ref().map_or("", |n| n.text.as_str())
    }

    /// When the pending notification clear is due
    #[must_use]
    pub fn notification_deadline(&self) -> Option<Instant> {
        self.notification.as_ref().map(|n| n.expires_at)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub const fn show_full_help(&self) -> bool {
        self.show_full_help
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Move cursor up, stopping at the first row
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down, stopping at the last row
    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.fields.len() {
            self.cursor += 1;
        }
    }

    /// Value to put on the clipboard for the selected row, if there is one
    #[must_use]
    pub fn copy_request(&self) -> Option<String> {
        self.current_field().map(|field| field.value.clone())
    }

    /// Record the outcome of a clipboard write and arm the clear timer
    ///
    /// A newer outcome replaces any notification still showing and pushes the
    /// deadline out again.
    pub fn copy_finished(&mut self, outcome: Result<String, ClipboardError>, now: Instant) {
        let (level, text) = match outcome {
            Ok(value) => (
                NotificationLevel::Success,
                format!("Copied: {}", truncate_value(&value)),
            ),
            Err(e) => (NotificationLevel::Error, format!("Copy failed: {e}")),
        };

        self.notification = Some(Notification {
            level,
            text,
            expires_at: now + self.notification_ttl,
        });
    }

    /// Clear the notification if its timer has run out
    ///
    /// Returns whether anything was cleared.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        if self.notification.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notification = None;
            true
        } else {
            false
        }
    }

    pub const fn toggle_help(&mut self) {
        self.show_full_help = !self.show_full_help;
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }
}
