mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use coffee_finder::config::init_app_config;
use coffee_finder::logging::{self, LogTarget};
use coffee_finder::AppContext;
use color_eyre::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    for (key, value) in args.env_overrides() {
        std::env::set_var(key, value);
    }
    dotenv::dotenv().ok();

    let config = init_app_config()?;

    // The TUI owns stdout, so interactive runs log to a file
    let headless = args.headless || !is_terminal();
    logging::init(&LogTarget::for_run(headless, &config.log_file), args.debug)?;
    info!(
        database = %config.database_path.display(),
        renderer = %config.map_renderer,
        "configuration loaded"
    );

    let context = AppContext::connect(config).await?;

    if args.seed && context.seed().await? {
        info!("demo data inserted");
    }

    if headless {
        return event::run_headless(&context, args.json, args.search.as_deref()).await;
    }

    let mut app = App::new(context);
    app.load_catalogue().await?;

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
