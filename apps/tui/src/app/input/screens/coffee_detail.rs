use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub async fn handle_coffee_detail_input(app: &mut App, key: KeyCode) -> color_eyre::Result<()> {
    match key {
        KeyCode::Esc | KeyCode::Backspace => {
            app.screen = AppScreen::Discover;
            app.detail = None;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('w') => {
            app.open_finder().await?;
        }
        KeyCode::Char('r') => {
            app.open_roaster().await?;
        }
        KeyCode::Up => {
            if let Some(detail) = app.detail.as_mut() {
                detail.review_offset = detail.review_offset.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if let Some(detail) = app.detail.as_mut() {
                if detail.review_offset + 1 < detail.detail.reviews.len() {
                    detail.review_offset += 1;
                }
            }
        }
        _ => {}
    }

    Ok(())
}
