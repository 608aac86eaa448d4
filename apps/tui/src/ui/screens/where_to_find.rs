use crate::app::state::{FinderState, InputMode};
use crate::app::App;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::tables::{chip_line, header_style, key_hints, selected_row_style};
use coffee_finder::domain::{Category, Location};
use coffee_finder::map::Marker;
use coffee_finder::selection::ScrollOutcome;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Lines each location takes in the list.
const ROW_HEIGHT: u16 = 2;

fn category_color(category: Category) -> Color {
    match category {
        Category::Cafe => Color::Cyan,
        Category::Roastery => Color::Yellow,
        Category::Shop => Color::Magenta,
    }
}

pub fn render_where_to_find(app: &mut App, f: &mut Frame<'_>) {
    let searching = app.input_mode == InputMode::Search;
    let status = app.status_message.clone();
    let renderer = app.context.renderer();
    let catalogue = &app.discover.coffees;
    let Some(finder) = app.finder.as_mut() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(finder, searching, f, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let info = finder.selected_info(catalogue);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(info.as_deref().map_or(0, info_height)),
        ])
        .split(body[0]);

    render_location_list(finder, f, left[0]);
    if let Some(rows) = info {
        render_location_info(&rows, f, left[1]);
    }

    let markers: Vec<Marker<'_>> = finder
        .visible()
        .map(|location| {
            Marker::from_location(location, finder.coordinator.is_selected(&location.id))
        })
        .collect();
    let map_area = render_map(f, body[1], renderer, &finder.region, &markers);
    finder.map_area = map_area;

    let sync = match finder.last_sync {
        ScrollOutcome::NotVisible => "selection hidden by filters",
        ScrollOutcome::Estimated { .. } => "scrolled (estimated)",
        _ => "",
    };
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled(status, Style::default().fg(Color::Gray)),
            Span::styled(format!("  {sync}"), Style::default().fg(Color::DarkGray)),
        ])),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(key_hints(&[
            ("1-3", "Type"),
            ("c", "City"),
            ("/", "Search"),
            ("↑/↓", "List"),
            ("←/→", "Map"),
            ("Esc", "Back"),
            ("F1", "Help"),
        ])),
        rows[3],
    );
}

fn render_header(finder: &FinderState, searching: bool, f: &mut Frame<'_>, area: Rect) {
    let active_category = finder.category.selected().first().cloned();
    let categories = chip_line(
        Category::ALL.iter().enumerate().map(|(i, category)| {
            (
                format!("{} {}", i + 1, category.label()),
                active_category.as_deref() == Some(category.as_str()),
            )
        }),
        None,
    );

    let active_city = finder.city.selected().first().cloned();
    let mut cities = vec![("All cities".to_string(), active_city.is_none())];
    cities.extend(
        finder
            .city_chips()
            .iter()
            .map(|city| (city.clone(), active_city.as_deref() == Some(city.as_str()))),
    );
    let cities = chip_line(cities, None);

    let search = if searching {
        Span::raw(format!("Search: {}_", finder.query))
    } else if finder.query.is_empty() {
        Span::styled("/ to search name or address", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(format!("Search: {}", finder.query))
    };

    let border = if searching { Color::Yellow } else { Color::Cyan };
    f.render_widget(
        Paragraph::new(vec![categories, cities, TextLine::from(search)]).block(
            Block::default()
                .title(finder.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        area,
    );
}

fn location_lines(location: &Location, selected: bool) -> [TextLine<'_>; 2] {
    let base = if selected {
        selected_row_style()
    } else {
        Style::default()
    };

    let mut title = vec![
        Span::styled(location.name.as_str(), base.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", location.category.as_str()),
            base.fg(category_color(location.category)),
        ),
    ];
    if location.is_primary {
        title.push(Span::styled("  ★", base.fg(Color::Yellow)));
    }
    if !location.is_open {
        title.push(Span::styled("  closed", base.fg(Color::Red)));
    }

    let detail = format!(
        "  {}, {}{}",
        location.address,
        location.city,
        location
            .distance
            .as_deref()
            .map(|d| format!(" · {d}"))
            .unwrap_or_default()
    );

    [
        TextLine::from(title),
        TextLine::from(Span::styled(detail, base.fg(Color::Gray))),
    ]
}

fn render_location_list(finder: &mut FinderState, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(
            "Locations ({}/{})",
            finder.visible_ids().len(),
            finder.locations.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let visible_rows = usize::from(area.height.saturating_sub(2) / ROW_HEIGHT);
    finder.viewport.measure(visible_rows);

    if finder.visible_ids().is_empty() {
        f.render_widget(Paragraph::new("No locations match.").block(block), area);
        return;
    }

    let offset = finder.viewport.offset();
    let lines: Vec<TextLine<'_>> = finder
        .visible()
        .skip(offset)
        .take(visible_rows)
        .flat_map(|location| location_lines(location, finder.coordinator.is_selected(&location.id)))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn info_height(rows: &[(&'static str, String)]) -> u16 {
    u16::try_from(rows.len()).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_location_info(rows: &[(&'static str, String)], f: &mut Frame<'_>, area: Rect) {
    let lines: Vec<TextLine<'_>> = rows
        .iter()
        .map(|(label, value)| {
            TextLine::from(vec![
                Span::styled(format!("{label:<9}"), header_style()),
                Span::raw(value.as_str()),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}
