//! Clipboard access for the session
//!
//! Writes happen off the event loop: [`spawn_copy`] hands the value to a
//! worker thread and the outcome comes back as an [`AppEvent::CopyFinished`].

use super::error::ClipboardError;
use super::events::AppEvent;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

/// Something that can put text on a clipboard
pub trait ClipboardWriter: Send + Sync {
    /// Replace the clipboard contents with `text`
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard cannot be opened or refuses
    /// the write.
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, opened fresh for every write
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Write `value` to the clipboard on a background thread
///
/// The outcome is posted to `events` once the write returns. If the receiver
/// is gone by then the result is dropped.
pub fn spawn_copy(clipboard: Arc<dyn ClipboardWriter>, value: String, events: Sender<AppEvent>) {
    tracing::debug!(len = value.len(), "dispatching clipboard write");

    thread::spawn(move || {
        let result = clipboard.write(&value);
        match &result {
            Ok(()) => tracing::info!("value copied to clipboard"),
            Err(e) => tracing::warn!(error = %e, "clipboard write failed"),
        }
        let _ = events.send(AppEvent::CopyFinished { value, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mock::MockClipboard;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_spawn_copy_reports_success() {
        let mock = Arc::new(MockClipboard::new());
        let (tx, rx) = mpsc::channel();

        spawn_copy(mock.clone(), "DE89370400440532013000".to_string(), tx);

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            event,
            AppEvent::CopyFinished {
                value: "DE89370400440532013000".to_string(),
                result: Ok(()),
            }
        );
        assert_eq!(mock.writes(), vec!["DE89370400440532013000".to_string()]);
    }

    #[test]
    fn test_spawn_copy_reports_failure() {
        let mock = Arc::new(MockClipboard::failing("no display"));
        let (tx, rx) = mpsc::channel();

        spawn_copy(mock, "x".to_string(), tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::CopyFinished { result, .. } => {
                assert_eq!(
                    result,
                    Err(ClipboardError::Unavailable("no display".to_string()))
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
