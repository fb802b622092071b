use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a yes/no confirmation prompt for the destructive bulk actions
pub fn render_confirm_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, message) = match app.ui_mode {
        UiMode::ConfirmDeleteAll => (
            " Delete All Timers ",
            format!(
                "  Delete all {} timers? The history log is kept.",
                app.engine.timers().len()
            ),
        ),
        UiMode::ConfirmClearHistory => (
            " Clear History ",
            format!(
                "  Remove all {} history entries? Live timers are kept.",
                app.engine.history().len()
            ),
        ),
        _ => return,
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Yes   "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" No"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
