//! Event handling for the session
//!
//! Terminal input, clipboard completions and the notification timer all
//! arrive as [`AppEvent`]s and are applied to the state one at a time.

use super::error::ClipboardError;
use super::keymap::{Action, KeyMap};
use super::state::{Mode, SessionState};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Everything the session loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// A background clipboard write returned
    CopyFinished {
        value: String,
        result: Result<(), ClipboardError>,
    },
    /// The notification deadline passed
    TimerFired,
    /// The terminal was resized
    Resize,
}

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Write this value to the clipboard
    Copy(String),
    /// Leave the session
    Quit,
    /// No action taken
    Ignored,
}

/// Apply one event to the session state
pub fn handle_event(
    state: &mut SessionState,
    event: AppEvent,
    keymap: &KeyMap,
    now: Instant,
) -> EventResult {
    match event {
        AppEvent::Key(key) => handle_key(state, &key, keymap),
        AppEvent::CopyFinished { value, result } => {
            state.copy_finished(result.map(|()| value), now);
            EventResult::Continue
        }
        AppEvent::TimerFired => {
            if state.expire_notification(now) {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        AppEvent::Resize => EventResult::Continue,
    }
}

fn handle_key(state: &mut SessionState, key: &KeyEvent, keymap: &KeyMap) -> EventResult {
    // Release and repeat events are reported on some platforms; act on presses only.
    if key.kind != KeyEventKind::Press {
        return EventResult::Ignored;
    }

    let Some(action) = keymap.action_for(key) else {
        return EventResult::Ignored;
    };

    if state.mode() == Mode::Empty && action != Action::Quit {
        return EventResult::Ignored;
    }

    match action {
        Action::Up => {
            state.cursor_up();
            EventResult::Continue
        }
        Action::Down => {
            state.cursor_down();
            EventResult::Continue
        }
        Action::Copy => state
            .copy_request()
            .map_or(EventResult::Ignored, EventResult::Copy),
        Action::ToggleHelp => {
            state.toggle_help();
            EventResult::Continue
        }
        Action::Quit => {
            state.quit();
            EventResult::Quit
        }
    }
}

/// Wait for the next event from any source
///
/// Pending clipboard completions are drained first, then an expired
/// notification deadline, then terminal input. Returns `None` when
/// `max_wait` passes with nothing to do.
///
/// # Errors
///
/// Returns an I/O error if polling or reading the terminal fails.
pub fn next_event(
    completions: &Receiver<AppEvent>,
    deadline: Option<Instant>,
    max_wait: Duration,
) -> io::Result<Option<AppEvent>> {
    match completions.try_recv() {
        Ok(event) => return Ok(Some(event)),
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
    }

    let now = Instant::now();
    let timeout = match deadline {
        Some(at) if at <= now => return Ok(Some(AppEvent::TimerFired)),
        Some(at) => max_wait.min(at - now),
        None => max_wait,
    };

    if !event::poll(timeout)? {
        return Ok(None);
    }

    Ok(match event::read()? {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    })
}
