use coffee_finder::geometry::{BrewShares, ChartGeometry, Point, Segment, StarChart};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Chart space has y growing downwards; the canvas grows upwards.
fn to_canvas(point: Point, size: f64) -> (f64, f64) {
    (point.x, size - point.y)
}

fn draw_segment(ctx: &mut Context<'_>, segment: Segment, size: f64, color: Color) {
    let (x1, y1) = to_canvas(segment.from, size);
    let (x2, y2) = to_canvas(segment.to, size);
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

/// Starting x that centres `chars` characters on `x`, kept inside the chart.
fn label_x(x: f64, chars: usize, units_per_cell: f64, size: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let width = chars as f64 * units_per_cell;
    (x - width / 2.0).clamp(0.0, (size - width).max(0.0))
}

pub fn render_star_chart(f: &mut Frame<'_>, area: Rect, shares: &BrewShares) {
    let geometry = ChartGeometry::default();
    let chart = StarChart::compute(shares, &geometry);
    let size = geometry.size;
    let inner_width = f64::from(area.width.saturating_sub(2).max(1));
    let units_per_cell = size / inner_width;

    let empty = shares.as_array().iter().all(|share| *share <= 0.0);
    let title = if empty {
        "Brew methods (no votes)"
    } else {
        "Brew methods"
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(move |ctx| {
            for axis in chart.axes {
                draw_segment(ctx, axis, size, Color::DarkGray);
            }
            for edge in StarChart::polygon_edges(&chart.reference) {
                draw_segment(ctx, edge, size, Color::DarkGray);
            }
            ctx.layer();

            for edge in StarChart::polygon_edges(&chart.data) {
                draw_segment(ctx, edge, size, Color::Yellow);
            }

            for label in chart.labels {
                let text = format!("{} {:.0}%", label.text, shares.get(label.method));
                let (x, y) = to_canvas(label.position, size);
                let x = label_x(x, text.chars().count(), units_per_cell, size);
                ctx.print(
                    x,
                    y,
                    TextLine::from(Span::styled(text, Style::default().fg(Color::Cyan))),
                );
            }
        });

    f.render_widget(canvas, area);
}
