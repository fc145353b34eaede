use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::catalog::Movie;
use crate::ui::style::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const TABLE_COLUMN_SPACING: u16 = 1;

pub const DEFAULT_HEADERS: [&str; 4] = ["Title", "Year", "Rating", "Popularity"];

/// Render the movie results table.
pub fn render_movie_table(
    frame: &mut Frame,
    area: Rect,
    table_state: &mut TableState,
    movies: &[Movie],
    headers: &[String],
    theme: &Theme,
) {
    let header_cells = headers
        .iter()
        .map(|header| Cell::from(header.as_str()))
        .collect::<Vec<_>>();
    let header = Row::new(header_cells)
        .style(theme.header_style())
        .height(1)
        .bottom_margin(1);

    let rows = movies.iter().map(movie_row).collect::<Vec<_>>();

    let table = Table::new(rows, column_widths(headers.len()))
        .header(header)
        .column_spacing(TABLE_COLUMN_SPACING)
        .highlight_spacing(HighlightSpacing::WhenSelected)
        .row_highlight_style(theme.row_highlight_style())
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(table, area, table_state);

    render_header_separator(frame, area, theme);
}

fn movie_row(movie: &Movie) -> Row<'_> {
    Row::new(vec![
        Cell::from(movie.title.as_str()),
        Cell::from(movie.year().unwrap_or("—")),
        Cell::from(
            movie
                .vote_average
                .map(|avg| format!("{avg:.1}"))
                .unwrap_or_else(|| "—".to_string()),
        ),
        Cell::from(
            movie
                .popularity
                .map(|pop| format!("{pop:.0}"))
                .unwrap_or_else(|| "—".to_string()),
        ),
    ])
}

fn column_widths(columns: usize) -> Vec<Constraint> {
    let mut widths = vec![
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(10),
    ];
    widths.truncate(columns.max(1));
    widths
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
    const HEADER_HEIGHT: u16 = 1;
    if HEADER_HEIGHT >= area.height {
        return;
    }
    let sep_rect = Rect {
        x: area.x,
        y: area.y + HEADER_HEIGHT,
        width: area.width,
        height: 1,
    };
    let width = area.width as usize;
    if width == 0 {
        return;
    }

    let base_style = Style::new().bg(theme.header_bg());
    if width <= 2 {
        let para = Paragraph::new(" ".repeat(width)).style(base_style);
        frame.render_widget(para, sep_rect);
        return;
    }

    let middle = "─".repeat(width - 2);
    let middle_style = Style::new().bg(theme.header_bg()).fg(theme.header_fg());
    let spans = vec![
        Span::styled(" ", base_style),
        Span::styled(middle, middle_style),
        Span::styled(" ", base_style),
    ];
    frame.render_widget(Paragraph::new(Text::from(Line::from(spans))), sep_rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_track_requested_column_count() {
        assert_eq!(column_widths(4).len(), 4);
        assert_eq!(column_widths(2).len(), 2);
        assert_eq!(column_widths(0).len(), 1);
    }
}
