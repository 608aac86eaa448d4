// UI module for the coffee finder
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

/// Renders the current screen. Takes `&mut App` because list viewports and
/// the map area are measured while drawing.
pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Discover => screens::discover::render_discover(app, f),
        AppScreen::CoffeeDetail => screens::coffee_detail::render_coffee_detail(app, f),
        AppScreen::Roaster => screens::roaster::render_roaster(app, f),
        AppScreen::WhereToFind => screens::where_to_find::render_where_to_find(app, f),
    }

    if app.show_help {
        screens::help::render_help(app, f);
    }
}
