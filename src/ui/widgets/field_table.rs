//! Field table widget for displaying the flattened document

use crate::sepa::Field;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState},
};

/// Widths of the Category, Field and Value columns
pub const COLUMN_WIDTHS: [u16; 3] = [20, 25, 50];

const HEADERS: [&str; 3] = ["Category", "Field", "Value"];

/// Bordered three-column table with the cursor row highlighted
///
/// Rendered as a `StatefulWidget` so the scroll offset in [`TableState`]
/// survives between frames.
pub struct FieldTable<'a> {
    fields: &'a [Field],
    theme: &'a Theme,
}

impl<'a> FieldTable<'a> {
    /// Create a new field table widget
    #[must_use]
    pub const fn new(fields: &'a [Field], theme: &'a Theme) -> Self {
        Self { fields, theme }
    }

    /// Total height needed to show `rows` data rows plus header and borders
    #[must_use]
    pub const fn height_for(rows: u16) -> u16 {
        rows.saturating_add(3)
    }

    /// Total width of the columns plus borders and column spacing
    #[must_use]
    pub const fn width() -> u16 {
        COLUMN_WIDTHS[0] + COLUMN_WIDTHS[1] + COLUMN_WIDTHS[2] + 2 + 2
    }
}

impl StatefulWidget for FieldTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let header = Row::new(HEADERS.map(Cell::from)).style(self.theme.header_style());

        let rows = self.fields.iter().map(|field| {
            Row::new([
                Cell::from(field.category.label()),
                Cell::from(field.name.as_str()),
                Cell::from(field.value.as_str()),
            ])
        });

        let widths = COLUMN_WIDTHS.map(Constraint::Length);

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .row_highlight_style(self.theme.selected_style());

        StatefulWidget::render(table, area, buf, state);
    }
}
