use crate::app::AppState;
use crate::domain::status_badge;
use crate::ui::styles::{border_style, default_style, idle_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the details pane for the selected timer
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(timer) = app.selected_timer() else {
        let paragraph = Paragraph::new(Line::styled("No timer selected", idle_style())).block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", idle_style()),
            Span::styled(timer.name.clone(), default_style()),
        ]),
        Line::from(vec![
            Span::styled("State: ", idle_style()),
            Span::styled(status_badge(timer).to_string(), default_style()),
        ]),
        Line::from(vec![
            Span::styled("Remaining: ", idle_style()),
            Span::styled(timer.remaining_formatted(), default_style()),
        ]),
        Line::from(vec![
            Span::styled("Duration: ", idle_style()),
            Span::styled(timer.duration_formatted(), default_style()),
        ]),
        Line::from(vec![
            Span::styled("Created: ", idle_style()),
            Span::styled(
                timer.created_at.format("%Y-%m-%d %H:%M").to_string(),
                default_style(),
            ),
        ]),
    ];

    if let Some(desc) = &timer.description {
        lines.push(Line::from(vec![
            Span::styled("Notes: ", idle_style()),
            Span::styled(desc.clone(), default_style()),
        ]));
    }

    if let Some(pct) = timer.alert_percentage {
        let fired = if timer.alert_fired { " (fired)" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("Alert at: ", idle_style()),
            Span::styled(format!("{}%{}", pct, fired), default_style()),
        ]));
    }

    if let Some(completed_at) = timer.completed_at {
        lines.push(Line::from(vec![
            Span::styled("Completed: ", idle_style()),
            Span::styled(completed_at.format("%Y-%m-%d %H:%M").to_string(), default_style()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .ratio(f64::from(timer.percentage_completed()) / 100.0)
        .label(format!("{}%", timer.percentage_completed()));
    f.render_widget(gauge, chunks[1]);
}
