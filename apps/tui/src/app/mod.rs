// App module for the coffee finder
// Screen state and key handling

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, InputMode};
