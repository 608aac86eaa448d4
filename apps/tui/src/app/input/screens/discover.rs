use crate::app::input::helpers::{digit_index, wrap_decrement, wrap_increment};
use crate::app::state::{App, InputMode};
use coffee_finder::filter::CoffeeFacet;
use crossterm::event::KeyCode;

pub async fn handle_discover_input(app: &mut App, key: KeyCode) -> color_eyre::Result<()> {
    let discover = &mut app.discover;
    let total_rows = discover.pipeline.cached().len();

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Esc => {
            discover.query.clear();
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(facet) = digit_index(c).and_then(CoffeeFacet::from_index) {
                discover.choose_facet(facet);
            }
        }
        KeyCode::Left => {
            discover.chip_index = wrap_decrement(discover.chip_index, discover.chips().len());
        }
        KeyCode::Right => {
            discover.chip_index = wrap_increment(discover.chip_index, discover.chips().len());
        }
        KeyCode::Char(' ') => {
            discover.toggle_chip();
        }
        KeyCode::Char('c') => {
            discover.filter.clear();
            discover.chip_index = 0;
        }
        KeyCode::Char('s') => {
            discover.sort = discover.sort.next();
            app.status_message = format!("Sorted by {}", discover.sort.label());
        }
        KeyCode::Up => {
            discover.selected_index = discover.selected_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if discover.selected_index + 1 < total_rows {
                discover.selected_index += 1;
            }
        }
        KeyCode::PageUp => {
            discover.selected_index = discover.selected_index.saturating_sub(5);
        }
        KeyCode::PageDown => {
            discover.selected_index =
                (discover.selected_index + 5).min(total_rows.saturating_sub(1));
        }
        KeyCode::Home => {
            discover.selected_index = 0;
        }
        KeyCode::End => {
            discover.selected_index = total_rows.saturating_sub(1);
        }
        KeyCode::Enter => {
            if total_rows > 0 {
                app.open_detail().await?;
            }
        }
        KeyCode::Char('w') => {
            app.open_finder().await?;
        }
        _ => {}
    }

    Ok(())
}
