//! Ratatui widgets for the viewer
//!
//! Custom widgets for rendering the session screen.

mod field_table;
mod help_bar;
mod notification_bar;

pub use field_table::{COLUMN_WIDTHS, FieldTable};
pub use help_bar::{HelpBar, KeyHint};
pub use notification_bar::NotificationBar;
