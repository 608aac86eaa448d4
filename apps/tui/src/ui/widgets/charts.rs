use crate::ui::widgets::tables::ACCENT;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;

const STAR_LABELS: [&str; 5] = ["1★", "2★", "3★", "4★", "5★"];

pub fn render_rating_histogram(
    f: &mut Frame<'_>,
    area: Rect,
    histogram: &[u32; 5],
    mean: Option<f64>,
) {
    let bars: Vec<Bar<'_>> = histogram
        .iter()
        .zip(STAR_LABELS)
        .map(|(count, label)| {
            Bar::default()
                .value(u64::from(*count))
                .label(TextLine::from(label))
                .style(Style::default().fg(ACCENT))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = histogram.iter().copied().max().unwrap_or(0).max(1);
    let title = mean.map_or_else(
        || "Ratings (no reviews)".to_string(),
        |mean| format!("Ratings (avg {mean:.1})"),
    );

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(u64::from(max_value))
        .bar_gap(1)
        .bar_width(4);

    f.render_widget(chart, area);
}
