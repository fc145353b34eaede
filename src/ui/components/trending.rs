use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::trending::TrendingEntry;
use crate::ui::style::Theme;

/// Render the one-line trending strip above the results.
///
/// Callers skip the strip entirely while the list is empty; the layout never
/// reserves a row for it.
pub fn render_trending_strip(
    frame: &mut Frame,
    area: Rect,
    entries: &[TrendingEntry],
    theme: &Theme,
) {
    if entries.is_empty() || area.height == 0 {
        return;
    }

    let mut spans = vec![Span::styled("Trending: ", theme.empty_style())];
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", theme.empty_style()));
        }
        spans.push(Span::styled(format!("{}.", index + 1), theme.empty_style()));
        spans.push(Span::styled(
            format!(" {}", entry.title),
            theme.highlight_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
