use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Space start/pause   "),
        Span::raw("a add   "),
        Span::raw("r reset   "),
        Span::raw("d delete   "),
        Span::raw("s/p start/pause all   "),
        Span::raw("c clear done   "),
        Span::raw("/ search   "),
        Span::raw("o sort   "),
        Span::raw("h history   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
