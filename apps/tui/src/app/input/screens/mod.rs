use crate::app::state::{App, AppScreen, InputMode};
use crossterm::event::KeyCode;

mod coffee_detail;
mod discover;
mod help;
mod roaster;
mod search;
mod where_to_find;

pub async fn dispatch_input(app: &mut App, key: KeyCode) -> color_eyre::Result<()> {
    if help::handle_help_toggle(app, key) {
        return Ok(());
    }

    if app.input_mode == InputMode::Search {
        search::handle_search_input(app, key);
        return Ok(());
    }

    match app.screen {
        AppScreen::Discover => discover::handle_discover_input(app, key).await?,
        AppScreen::CoffeeDetail => coffee_detail::handle_coffee_detail_input(app, key).await?,
        AppScreen::Roaster => roaster::handle_roaster_input(app, key).await?,
        AppScreen::WhereToFind => where_to_find::handle_where_to_find_input(app, key),
    }

    Ok(())
}
