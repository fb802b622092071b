use crate::app::AppState;
use crate::domain::format_clock;
use crate::ui::styles::{border_style, color_for_tag, completed_style, default_style, title_style};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the completed-timer history pane (newest first)
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let history = app.engine.history();

    let items: Vec<ListItem> = history
        .iter()
        .skip(app.history_scroll)
        .map(|entry| {
            let mut spans = vec![
                Span::styled("✓ ".to_string(), completed_style()),
                Span::styled(
                    "● ".to_string(),
                    Style::default().fg(color_for_tag(&entry.color)),
                ),
                Span::styled(entry.name.clone(), default_style()),
                Span::raw("  "),
                Span::styled(format!("({})", format_clock(entry.duration)), completed_style()),
                Span::raw("  "),
                Span::styled(
                    entry.completed_at.format("%Y-%m-%d %H:%M").to_string(),
                    border_style(),
                ),
            ];

            if let Some(desc) = &entry.description {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(desc.clone(), border_style()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.history_scroll > 0 {
        format!(" History ({}) [scrolled +{}] ", history.len(), app.history_scroll)
    } else {
        format!(" History ({}) ", history.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
