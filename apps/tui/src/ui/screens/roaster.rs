use crate::app::App;
use crate::ui::widgets::tables::{header_style, key_hints, selected_row_style};
use coffee_finder::domain::{Coffee, Location, Roaster};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn hero_lines(roaster: &Roaster) -> Vec<TextLine<'_>> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut lines = vec![TextLine::from(Span::styled(
        roaster.name.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(location) = roaster.location.as_deref() {
        lines.push(TextLine::from(Span::styled(location, muted)));
    }
    if let Some(website) = roaster.website.as_deref() {
        lines.push(TextLine::from(Span::styled(
            website,
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled("Our story", header_style())));
    lines.push(match roaster.description.as_deref() {
        Some(story) => TextLine::from(story),
        None => TextLine::from(Span::styled("No description yet", muted)),
    });
    lines
}

fn coffee_lines(coffee: &Coffee, selected: bool) -> [TextLine<'_>; 2] {
    let base = if selected {
        selected_row_style()
    } else {
        Style::default()
    };
    let origin = [coffee.origin.as_deref(), coffee.process.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    let notes = coffee
        .tasting_notes
        .as_deref()
        .map(|notes| notes.join(", "))
        .unwrap_or_default();

    [
        TextLine::from(vec![
            Span::styled(coffee.name.as_str(), base.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {origin}"), base.fg(Color::Gray)),
        ]),
        TextLine::from(Span::styled(format!("  {notes}"), base.fg(Color::Magenta))),
    ]
}

fn location_line(location: &Location) -> TextLine<'_> {
    let mut spans = vec![
        Span::styled(location.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}, {}", location.address, location.city),
            Style::default().fg(Color::Gray),
        ),
    ];
    if !location.is_open {
        spans.push(Span::styled("  closed", Style::default().fg(Color::Red)));
    }
    TextLine::from(spans)
}

pub fn render_roaster(app: &App, f: &mut Frame<'_>) {
    let Some(state) = app.roaster.as_ref() else {
        return;
    };
    let profile = &state.profile;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(
        Paragraph::new(hero_lines(&profile.roaster))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Roaster")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
        rows[0],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_coffees(app, f, body[0]);

    let locations: Vec<TextLine<'_>> = if profile.locations.is_empty() {
        vec![TextLine::from(Span::styled(
            "No locations listed",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        profile.locations.iter().map(location_line).collect()
    };
    f.render_widget(
        Paragraph::new(locations).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(format!("Locations ({})", profile.locations.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        body[1],
    );

    f.render_widget(
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Gray)),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(key_hints(&[
            ("↑/↓", "Coffees"),
            ("Enter", "Open coffee"),
            ("w", "Locations map"),
            ("Esc", "Back"),
            ("F1", "Help"),
        ])),
        rows[3],
    );
}

fn render_coffees(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(state) = app.roaster.as_ref() else {
        return;
    };
    let coffees = &state.profile.coffees;

    // two lines per coffee; keep the cursor on screen
    let page = usize::from(area.height.saturating_sub(2) / 2).max(1);
    let skip = (state.selected_index + 1).saturating_sub(page);

    let lines: Vec<TextLine<'_>> = coffees
        .iter()
        .enumerate()
        .skip(skip)
        .take(page)
        .flat_map(|(i, coffee)| coffee_lines(coffee, i == state.selected_index))
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(format!("Coffees ({})", coffees.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
