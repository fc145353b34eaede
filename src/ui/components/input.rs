use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::ui::style::Theme;

/// Single-line text input with cursor editing.
#[derive(Debug, Default)]
pub struct SearchInput {
    text: String,
    /// Byte offset of the cursor within `text`, always on a char boundary.
    cursor: usize,
}

impl SearchInput {
    pub fn new(initial: impl Into<String>) -> Self {
        let text = initial.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply a key press. Returns `true` when the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.text.is_empty() {
                    return false;
                }
                self.text.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                let Some(prev) = self.prev_boundary() else {
                    return false;
                };
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.text.len() {
                    return false;
                }
                self.text.remove(self.cursor);
                true
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                false
            }
            KeyCode::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                false
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let text: &str = if self.text.is_empty() {
            "Search through thousands of movies"
        } else {
            &self.text
        };
        let style = if self.text.is_empty() {
            theme.empty_style()
        } else {
            ratatui::style::Style::default()
        };
        frame.render_widget(Paragraph::new(text).style(style), area);

        let cursor_x = self.text[..self.cursor].width() as u16;
        frame.set_cursor_position(Position {
            x: area.x + cursor_x.min(area.width.saturating_sub(1)),
            y: area.y,
        });
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
