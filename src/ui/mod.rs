pub mod details_pane;
pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_confirm_modal;
use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{hint_style, status_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.show_history);

    // Render keybindings bar
    render_keybindings(f, layout.keybindings_area);

    // Render panes
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    if let Some(history_area) = layout.history_area {
        render_history_pane(f, app, history_area);
    }

    // Render status line (search prompt takes precedence)
    let status = if app.ui_mode == UiMode::Searching {
        Paragraph::new(Line::from(vec![
            Span::raw(" /"),
            Span::raw(app.search_query.clone()),
            Span::styled("█", status_style()),
        ]))
        .style(hint_style())
    } else if let Some(message) = &app.status {
        Paragraph::new(Line::raw(format!(" {}", message))).style(status_style())
    } else {
        Paragraph::new(Line::raw("")).style(hint_style())
    };
    f.render_widget(status, layout.status_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    // Render confirm prompt if active
    if matches!(
        app.ui_mode,
        UiMode::ConfirmDeleteAll | UiMode::ConfirmClearHistory
    ) {
        render_confirm_modal(f, app, size);
    }
}
