use crate::app::state::AppScreen;
use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::tables::header_style;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const GLOBAL_KEYS: &[(&str, &str)] = &[("F1", "toggle this help"), ("q", "quit")];

const DISCOVER_KEYS: &[(&str, &str)] = &[
    ("1-4", "origin / process / roast / notes facet"),
    ("←/→", "move between values"),
    ("space", "toggle value"),
    ("c", "clear filters"),
    ("s", "cycle sort"),
    ("/", "search by name or origin"),
    ("↑/↓", "move in list"),
    ("Enter", "coffee details"),
    ("w", "all locations"),
];

const DETAIL_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "scroll reviews"),
    ("w", "where to find this coffee"),
    ("r", "roaster profile"),
    ("Esc", "back to discover"),
];

const ROASTER_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "select coffee"),
    ("Enter", "open coffee"),
    ("w", "roaster locations on the map"),
    ("Esc", "back to coffee"),
];

const FINDER_KEYS: &[(&str, &str)] = &[
    ("1-3", "cafes / roasteries / shops"),
    ("c", "cycle city"),
    ("0", "reset filters"),
    ("/", "fuzzy search name or address"),
    ("↑/↓", "select in list"),
    ("←/→", "select on map, west to east"),
    ("click", "select marker"),
    ("Enter", "centre map on selection"),
    ("f", "fit map to results"),
    ("x", "clear selection"),
    ("Esc", "back"),
];

pub fn render_help(app: &App, f: &mut Frame<'_>) {
    let (title, keys) = match app.screen {
        AppScreen::Discover => ("Discover", DISCOVER_KEYS),
        AppScreen::CoffeeDetail => ("Coffee", DETAIL_KEYS),
        AppScreen::Roaster => ("Roaster", ROASTER_KEYS),
        AppScreen::WhereToFind => ("Where to find", FINDER_KEYS),
    };

    let lines: Vec<TextLine<'_>> = keys
        .iter()
        .chain(GLOBAL_KEYS)
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:>8}  "), header_style()),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(format!("Help: {title} (Esc to close)"))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
