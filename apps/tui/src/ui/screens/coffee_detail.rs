use crate::app::App;
use crate::ui::widgets::charts::render_rating_histogram;
use crate::ui::widgets::star_chart::render_star_chart;
use crate::ui::widgets::tables::{header_style, key_hints, stars};
use coffee_finder::domain::Coffee;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn field<'a>(label: &'static str, value: Option<&'a str>) -> TextLine<'a> {
    TextLine::from(vec![
        Span::styled(format!("{label:<10}"), header_style()),
        Span::raw(value.unwrap_or("-")),
    ])
}

fn info_lines(coffee: &Coffee) -> Vec<TextLine<'_>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            coffee.name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        field("Roaster", coffee.roaster_name.as_deref()),
        field("Origin", coffee.origin.as_deref()),
        field("Region", coffee.region.as_deref()),
        field("Process", coffee.process.as_deref()),
        field("Roast", coffee.roast_level.as_deref()),
        field("Varietal", coffee.varietal.as_deref()),
        field("Altitude", coffee.altitude.as_deref()),
        TextLine::from(""),
    ];

    match coffee.tasting_notes.as_deref() {
        Some(notes) if !notes.is_empty() => {
            lines.push(TextLine::from(Span::styled("Tasting notes", header_style())));
            lines.push(TextLine::from(notes.join(" · ")));
        }
        _ => lines.push(TextLine::from(Span::styled(
            "No tasting notes",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}

pub fn render_coffee_detail(app: &App, f: &mut Frame<'_>) {
    let Some(state) = app.detail.as_ref() else {
        return;
    };
    let detail = &state.detail;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let mut info = info_lines(&detail.coffee);
    if !state.roaster_coffees.is_empty() {
        let roaster = detail.roaster.as_ref().map_or("roaster", |r| r.name.as_str());
        info.push(TextLine::from(""));
        info.push(TextLine::from(Span::styled(
            format!("More from {roaster}"),
            header_style(),
        )));
        for other in &state.roaster_coffees {
            info.push(TextLine::from(format!("  {}", other.name)));
        }
    }

    f.render_widget(
        Paragraph::new(info).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Coffee")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        top[0],
    );
    render_star_chart(f, top[1], &detail.shares);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(rows[1]);

    render_reviews(app, f, bottom[0]);
    render_rating_histogram(f, bottom[1], &detail.histogram, detail.mean_rating);

    f.render_widget(
        Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Gray)),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(key_hints(&[
            ("↑/↓", "Scroll reviews"),
            ("w", "Where to find"),
            ("r", "Roaster"),
            ("Esc", "Back"),
            ("F1", "Help"),
        ])),
        rows[3],
    );
}

fn render_reviews(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(state) = app.detail.as_ref() else {
        return;
    };
    let reviews = &state.detail.reviews;

    let lines: Vec<TextLine<'_>> = if reviews.is_empty() {
        vec![TextLine::from(Span::styled(
            "No reviews yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        reviews
            .iter()
            .skip(state.review_offset)
            .flat_map(|review| {
                let method = review
                    .brewing_method
                    .as_deref()
                    .map(|m| format!(" · {m}"))
                    .unwrap_or_default();
                [
                    TextLine::from(vec![
                        Span::styled(stars(review.rating), Style::default().fg(Color::Yellow)),
                        Span::styled(format!(" {}", review.user_name), header_style()),
                        Span::styled(method, Style::default().fg(Color::Magenta)),
                    ]),
                    TextLine::from(review.review_text.clone().unwrap_or_default()),
                ]
            })
            .collect()
    };

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(format!("Reviews ({})", reviews.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}
