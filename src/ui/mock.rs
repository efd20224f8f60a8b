//! Mock clipboard for testing

use super::clipboard::ClipboardWriter;
use super::error::ClipboardError;
use std::sync::Mutex;

/// Clipboard that records writes instead of touching the system
///
/// Useful for testing the session without a display server.
#[derive(Debug, Default)]
pub struct MockClipboard {
    writes: Mutex<Vec<String>>,
    /// Cause to report instead of accepting writes
    failure: Option<String>,
}

impl MockClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that rejects every write as unavailable
    #[must_use]
    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            failure: Some(cause.into()),
        }
    }

    /// Values written so far, oldest first
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl ClipboardWriter for MockClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(cause) = &self.failure {
            return Err(ClipboardError::Unavailable(cause.clone()));
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(text.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_writes() {
        let mock = MockClipboard::new();
        mock.write("one").unwrap();
        mock.write("two").unwrap();
        assert_eq!(mock.writes(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockClipboard::failing("no display");
        assert!(mock.write("one").is_err());
        assert!(mock.writes().is_empty());
    }
}
