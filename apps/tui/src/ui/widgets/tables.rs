use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

pub const ACCENT: Color = Color::Rgb(196, 120, 52);

pub fn selected_row_style() -> Style {
    Style::default()
        .bg(ACCENT)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// "key: action" pairs for the footer.
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, header_style()),
                Span::raw(format!(": {action}   ")),
            ]
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}

/// A row of chips. `cursor` marks the focused chip, `active` the chosen ones.
pub fn chip_line<'a, I>(chips: I, cursor: Option<usize>) -> TextLine<'a>
where
    I: IntoIterator<Item = (String, bool)>,
{
    let spans = chips
        .into_iter()
        .enumerate()
        .flat_map(|(i, (label, active))| {
            let mut style = if active {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default().fg(Color::Gray)
            };
            if cursor == Some(i) {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}

pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
