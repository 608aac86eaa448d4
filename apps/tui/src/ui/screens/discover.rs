use crate::app::state::InputMode;
use crate::app::App;
use crate::ui::widgets::tables::{chip_line, header_style, key_hints, selected_row_style};
use coffee_finder::filter::{CoffeeFacet, Facet};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_discover(app: &mut App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_search_bar(app, f, chunks[0]);
    render_facets(app, f, chunks[1]);
    render_coffee_table(app, f, chunks[2]);

    f.render_widget(
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Gray)),
        chunks[3],
    );
    f.render_widget(
        Paragraph::new(key_hints(&[
            ("1-4", "Facet"),
            ("←/→ space", "Choose"),
            ("c", "Clear"),
            ("s", "Sort"),
            ("/", "Search"),
            ("Enter", "Details"),
            ("w", "Where to find"),
            ("F1", "Help"),
        ])),
        chunks[4],
    );
}

fn render_search_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let query = &app.discover.query;
    let text = if query.is_empty() && !searching {
        Span::styled("Search by name or origin...", Style::default().fg(Color::DarkGray))
    } else if searching {
        Span::raw(format!("{query}_"))
    } else {
        Span::raw(query.clone())
    };

    let border = if searching { Color::Yellow } else { Color::Cyan };
    let paragraph = Paragraph::new(TextLine::from(text)).block(
        Block::default()
            .title("Discover Coffee")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(paragraph, area);
}

fn render_facets(app: &App, f: &mut Frame<'_>, area: Rect) {
    let discover = &app.discover;
    let active = discover.filter.active();

    let mut facet_spans = CoffeeFacet::all()
        .iter()
        .enumerate()
        .flat_map(|(i, facet)| {
            let style = if active == Some(*facet) {
                header_style().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            [
                Span::styled(format!(" {} {} ", i + 1, facet.label()), style),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();
    facet_spans.push(Span::styled(
        format!("  Sort: {}", discover.sort.label()),
        Style::default().fg(Color::Magenta),
    ));

    let chips = discover.chips();
    let chip_row = if active.is_none() {
        TextLine::from(Span::styled(
            "Pick a facet to filter",
            Style::default().fg(Color::DarkGray),
        ))
    } else if chips.is_empty() {
        TextLine::from(Span::styled(
            "No values for this facet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        chip_line(
            chips
                .iter()
                .map(|value| (value.clone(), discover.filter.is_selected(value))),
            Some(discover.chip_index),
        )
    };

    let paragraph = Paragraph::new(vec![TextLine::from(facet_spans), chip_row]).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filters")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_coffee_table(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(
            "Coffees ({}/{})",
            app.discover.pipeline.cached().len(),
            app.discover.coffees.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    // header row plus borders
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    app.discover.viewport.measure(max_visible_rows);
    app.discover.viewport.ensure_visible(app.discover.selected_index);

    let discover = &app.discover;
    if discover.pipeline.cached().is_empty() {
        let message = if discover.coffees.is_empty() {
            "No coffees found."
        } else {
            "Nothing matches the current filters."
        };
        f.render_widget(
            Paragraph::new(message)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Roaster"),
        Cell::from("Origin"),
        Cell::from("Process"),
        Cell::from("Roast"),
    ])
    .style(header_style());

    let offset = discover.viewport.offset();
    let rows = discover
        .visible()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, coffee)| {
            let style = if i == discover.selected_index {
                selected_row_style()
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(coffee.name.clone()),
                Cell::from(coffee.roaster_name.clone().unwrap_or_default()),
                Cell::from(coffee.origin.clone().unwrap_or_default()),
                Cell::from(coffee.process.clone().unwrap_or_default()),
                Cell::from(coffee.roast_level.clone().unwrap_or_default()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Percentage(28),
        Constraint::Percentage(22),
        Constraint::Percentage(16),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
