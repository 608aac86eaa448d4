use crate::app::state::App;
use crossterm::event::KeyCode;

pub async fn handle_roaster_input(app: &mut App, key: KeyCode) -> color_eyre::Result<()> {
    match key {
        KeyCode::Esc | KeyCode::Backspace => app.close_roaster(),
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('w') => {
            app.open_finder().await?;
        }
        KeyCode::Enter => {
            app.open_roaster_coffee().await?;
        }
        KeyCode::Up | KeyCode::Down => {
            if let Some(roaster) = app.roaster.as_mut() {
                roaster.move_selection(key == KeyCode::Down);
            }
        }
        _ => {}
    }

    Ok(())
}
