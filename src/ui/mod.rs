//! Interactive session
//!
//! A full-screen table over the flattened document. The user moves a cursor
//! over the rows, copies the selected value to the clipboard and quits; a
//! short-lived notification reports each copy.
//!
//! # Architecture
//!
//! ```text
//!  crossterm input ──┐
//!  clipboard thread ─┼─► AppEvent ─► handle_event ─► SessionState ─► render
//!  notify deadline ──┘                    │
//!                                         └─► EventResult::Copy ─► spawn_copy
//! ```
//!
//! Events are applied one at a time on the loop thread. The only work done
//! elsewhere is the clipboard write, whose outcome comes back over a channel.
//!
//! # Testing
//!
//! State transitions are plain method calls taking an explicit `now`, so
//! timer behaviour can be tested without sleeping. The clipboard is behind
//! the [`ClipboardWriter`] trait and rendering works against ratatui's
//! `TestBackend`.

pub mod app;
pub mod clipboard;
pub mod error;
pub mod events;
pub mod keymap;
pub mod state;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod mock;

pub use app::SessionApp;
pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use error::{ClipboardError, Result, UiError};
pub use keymap::{Action, KeyMap};
pub use state::{Mode, SessionState, truncate_value};
