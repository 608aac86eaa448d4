use crate::app::state::{App, InputMode};
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            if let Some(query) = app.search_query_mut() {
                query.clear();
            }
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            if let Some(query) = app.search_query_mut() {
                query.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(query) = app.search_query_mut() {
                query.push(c);
            }
        }
        _ => {}
    }
}
