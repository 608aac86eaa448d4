use coffee_finder::context::CatalogSummary;
use coffee_finder::AppContext;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::{handle_input, App};
use crate::ui;

/// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Coffees listed under "Recent" in the headless summary.
const RECENT_COFFEES: usize = 5;

/// Print a catalogue summary (or search results) and exit
pub async fn run_headless(context: &AppContext, json: bool, search: Option<&str>) -> Result<()> {
    if let Some(term) = search {
        return render_search_results(context, term, json).await;
    }

    let summary = context.summary(RECENT_COFFEES).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

async fn render_search_results(context: &AppContext, term: &str, json: bool) -> Result<()> {
    let coffees = context.search_coffees(term).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&coffees)?);
        return Ok(());
    }

    println!("\nCoffees matching '{term}': {}", coffees.len());
    for coffee in coffees {
        println!(
            "- {} | {} | {}",
            coffee.name,
            coffee.roaster_name.as_deref().unwrap_or("(unknown)"),
            coffee.origin.as_deref().unwrap_or("(none)")
        );
    }

    Ok(())
}

fn format_summary(summary: &CatalogSummary) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "\nCoffee Finder Stats");
    let _ = writeln!(out, "===================");
    let _ = writeln!(out, "Total coffees: {}", summary.total_coffees);
    let _ = writeln!(out, "Total roasters: {}", summary.total_roasters);
    let _ = writeln!(out, "Total reviews: {}", summary.total_reviews);

    let _ = writeln!(out, "\nLocations by Type:");
    for (category, count) in &summary.locations_by_category {
        let _ = writeln!(out, "- {category}: {count}");
    }

    let _ = writeln!(out, "\nCoffees by Origin:");
    for (origin, count) in &summary.coffees_by_origin {
        let _ = writeln!(out, "- {origin}: {count}");
    }

    let _ = writeln!(out, "\nRecent Coffees:");
    for coffee in &summary.recent_coffees {
        let _ = writeln!(
            out,
            "- {} | {} | {} | {}",
            coffee.name, coffee.roaster, coffee.origin, coffee.created_at
        );
    }

    out
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code).await;
                if !app.running {
                    break;
                }
            }
            Ok(Event::Mouse(mouse)) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    debug!(column = mouse.column, row = mouse.row, "click");
                    app.handle_click(mouse.column, mouse.row);
                }
            }
            Ok(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_finder::context::RecentCoffee;

    #[test]
    fn summary_text_lists_every_section() {
        let summary = CatalogSummary {
            total_coffees: 2,
            total_roasters: 1,
            total_reviews: 0,
            locations_by_category: vec![("cafe".to_string(), 3)],
            coffees_by_origin: vec![("Kenya".to_string(), 2)],
            recent_coffees: vec![RecentCoffee {
                name: "Gichathaini".to_string(),
                roaster: "Nomad Coffee".to_string(),
                origin: "Kenya".to_string(),
                created_at: "2025-01-01".to_string(),
            }],
        };

        let text = format_summary(&summary);
        assert!(text.contains("Total coffees: 2"));
        assert!(text.contains("- cafe: 3"));
        assert!(text.contains("- Kenya: 2"));
        assert!(text.contains("- Gichathaini | Nomad Coffee | Kenya | 2025-01-01"));
    }
}
