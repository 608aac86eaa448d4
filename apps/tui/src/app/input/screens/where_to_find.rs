use crate::app::input::helpers::digit_index;
use crate::app::state::{App, InputMode};
use coffee_finder::domain::Category;
use crossterm::event::KeyCode;

pub fn handle_where_to_find_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Esc {
        app.close_finder();
        return;
    }

    let Some(finder) = app.finder.as_mut() else {
        return;
    };

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(category) = digit_index(c).and_then(Category::from_index) {
                finder.choose_category(category);
            }
        }
        KeyCode::Char('0') => {
            finder.category.clear();
            finder.city.clear();
            finder.query.clear();
        }
        KeyCode::Char('c') => {
            finder.cycle_city();
        }
        KeyCode::Up => finder.move_selection(false),
        KeyCode::Down => finder.move_selection(true),
        KeyCode::Left => finder.step_on_map(false),
        KeyCode::Right => finder.step_on_map(true),
        KeyCode::Char('x') => finder.coordinator.clear(),
        KeyCode::Enter => finder.center_on_selection(),
        KeyCode::Char('f') => finder.fit_to_visible(),
        _ => {}
    }
}
