use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use throbber_widgets_tui::Throbber;

use crate::search::SearchState;

use super::App;
use super::components::{render_movie_table, render_trending_strip};

impl App {
    /// Draw one frame: prompt row, optional trending strip, then exactly one
    /// of {spinner, error message, results table}.
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let trending_height = if self.trending.is_empty() { 0 } else { 2 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(trending_height),
                Constraint::Min(1),
            ])
            .split(area);

        self.render_prompt(frame, layout[0]);
        render_trending_strip(frame, layout[1], &self.trending, &self.theme);
        self.render_results(frame, layout[2]);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let prompt = self.input_title.as_deref().unwrap_or("Find movies");
        let prompt_text = format!("{prompt} > ");
        let prompt_width = prompt_text.chars().count() as u16;

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(prompt_width), Constraint::Min(1)])
            .split(area);

        let widget = Paragraph::new(prompt_text).style(self.theme.prompt_style());
        frame.render_widget(widget, horizontal[0]);
        self.search_input.render(frame, horizontal[1], &self.theme);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        match &self.state {
            SearchState::Loading => self.render_spinner(frame, area),
            SearchState::Failed(message) => {
                let widget = Paragraph::new(message.as_str())
                    .alignment(Alignment::Center)
                    .style(self.theme.error_style());
                frame.render_widget(widget, centered_line(area));
            }
            SearchState::Ready(movies) => {
                let movies = movies.clone();
                render_movie_table(
                    frame,
                    area,
                    &mut self.table_state,
                    &movies,
                    &self.headers,
                    &self.theme,
                );
                if movies.is_empty() {
                    self.render_empty_notice(frame, area);
                }
            }
        }
    }

    fn render_spinner(&self, frame: &mut Frame, area: Rect) {
        let spinner = Throbber::default()
            .style(self.theme.empty_style())
            .throbber_style(self.theme.empty_style());
        let spinner_span = spinner.to_symbol_span(&self.throbber_state);
        let line = Line::from(vec![
            spinner_span,
            Span::styled("Loading movies", self.theme.empty_style()),
        ]);
        let widget = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(widget, centered_line(area));
    }

    fn render_empty_notice(&self, frame: &mut Frame, area: Rect) {
        const HEADER_AND_DIVIDER_HEIGHT: u16 = 2;
        let mut notice_area = area;
        if notice_area.height <= HEADER_AND_DIVIDER_HEIGHT {
            return;
        }
        notice_area.y += HEADER_AND_DIVIDER_HEIGHT;
        notice_area.height -= HEADER_AND_DIVIDER_HEIGHT;

        let widget = Paragraph::new("No movies found")
            .alignment(Alignment::Center)
            .style(self.theme.empty_style());
        frame.render_widget(widget, centered_line(notice_area));
    }
}

/// Middle row of an area, for single-line centered notices.
fn centered_line(area: Rect) -> Rect {
    if area.height <= 1 {
        return area;
    }
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    }
}
