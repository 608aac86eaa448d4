use crate::ui::widgets::tables::{selected_row_style, ACCENT};
use coffee_finder::map::{MapRegion, MapRenderer, MapShape, Marker};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker as Symbol;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const GRID_STEPS: u32 = 4;

fn draw_grid(ctx: &mut Context<'_>, region: &MapRegion) {
    let [west, east] = region.x_bounds();
    let [south, north] = region.y_bounds();
    for step in 1..GRID_STEPS {
        let t = f64::from(step) / f64::from(GRID_STEPS);
        let x = west + (east - west) * t;
        let y = south + (north - south) * t;
        ctx.draw(&CanvasLine {
            x1: x,
            y1: south,
            x2: x,
            y2: north,
            color: Color::DarkGray,
        });
        ctx.draw(&CanvasLine {
            x1: west,
            y1: y,
            x2: east,
            y2: y,
            color: Color::DarkGray,
        });
    }
}

fn marker_style(selected: bool, primary: bool) -> Style {
    match (selected, primary) {
        (true, _) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default().fg(Color::Cyan),
    }
}

/// Draws the map and returns the inner area markers were projected into,
/// or `None` when the renderer has nothing to hit test.
pub fn render_map(
    f: &mut Frame<'_>,
    area: Rect,
    renderer: &dyn MapRenderer,
    region: &MapRegion,
    markers: &[Marker<'_>],
) -> Option<Rect> {
    let block = Block::default()
        .title(format!(
            "Map {:.4}, {:.4}",
            region.latitude, region.longitude
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let shapes = renderer.shapes(region, markers);

    if !renderer.supports_hit_testing() {
        let lines: Vec<TextLine<'_>> = shapes
            .into_iter()
            .filter_map(|shape| match shape {
                MapShape::Row { text, selected } => Some(if selected {
                    TextLine::from(Span::styled(text, selected_row_style()))
                } else {
                    TextLine::from(text)
                }),
                _ => None,
            })
            .collect();

        let paragraph = if lines.is_empty() {
            Paragraph::new("No locations to show")
        } else {
            Paragraph::new(lines)
        };
        f.render_widget(paragraph.block(block), area);
        return None;
    }

    // one canvas cell in degrees, so labels start right of their dot
    let cell = region.longitude_delta / f64::from(inner.width.max(1));

    let canvas = Canvas::default()
        .block(block)
        .marker(Symbol::Braille)
        .x_bounds(region.x_bounds())
        .y_bounds(region.y_bounds())
        .paint(move |ctx| {
            for shape in &shapes {
                match shape {
                    MapShape::Frame { region } => {
                        draw_grid(ctx, region);
                        ctx.layer();
                    }
                    MapShape::Dot {
                        x,
                        y,
                        selected,
                        primary,
                    } => {
                        let symbol = if *selected { "◉" } else { "●" };
                        ctx.print(
                            *x,
                            *y,
                            TextLine::from(Span::styled(symbol, marker_style(*selected, *primary))),
                        );
                    }
                    MapShape::Label {
                        x,
                        y,
                        text,
                        selected,
                    } => {
                        ctx.print(
                            x + cell,
                            *y,
                            TextLine::from(Span::styled(
                                format!(" {text}"),
                                marker_style(*selected, false),
                            )),
                        );
                    }
                    MapShape::Row { .. } => {}
                }
            }
        });

    f.render_widget(canvas, area);
    Some(inner)
}
