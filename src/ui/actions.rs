use std::time::Instant;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

use super::{App, SearchOutcome};

impl App {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<SearchOutcome>> {
        match key.code {
            KeyCode::Esc => {
                return Ok(Some(SearchOutcome {
                    accepted: false,
                    query: self.search_input.text().to_string(),
                    selection: None,
                }));
            }
            KeyCode::Enter => {
                let selection = self.current_selection();
                return Ok(Some(SearchOutcome {
                    accepted: true,
                    query: self.search_input.text().to_string(),
                    selection,
                }));
            }
            KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Down => {
                self.move_selection_down();
            }
            _ => {
                if self.search_input.input(key) {
                    self.note_query_edit(Instant::now());
                }
            }
        }
        Ok(None)
    }

    fn move_selection_up(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected > 0
        {
            self.table_state.select(Some(selected - 1));
        }
    }

    fn move_selection_down(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            let len = self.filtered_len();
            if selected + 1 < len {
                self.table_state.select(Some(selected + 1));
            }
        }
    }
}
