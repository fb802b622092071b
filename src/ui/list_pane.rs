use crate::app::AppState;
use crate::domain::{status_badge, Timer, TimerState};
use crate::ui::styles::{
    border_style, color_for_tag, completed_style, default_style, idle_style, paused_style,
    running_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Style for a timer's status badge
fn badge_style(timer: &Timer) -> Style {
    match timer.state {
        TimerState::Running => running_style(),
        TimerState::Paused => paused_style(),
        TimerState::Idle => idle_style(),
        TimerState::Completed => completed_style(),
    }
}

/// Create one row of the timer list
fn create_timer_line(timer: &Timer, is_selected: bool) -> Line {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        "● ".to_string(),
        Style::default().fg(color_for_tag(&timer.color)),
    ));

    let name_style = if is_selected {
        selected_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(timer.name.clone(), name_style));

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!(
            "{} / {}",
            timer.remaining_formatted(),
            timer.duration_formatted()
        ),
        default_style(),
    ));

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("{}%", timer.percentage_completed()),
        idle_style(),
    ));

    spans.push(Span::raw("  "));
    spans.push(Span::styled(status_badge(timer).to_string(), badge_style(timer)));

    if let Some(pct) = timer.alert_percentage {
        spans.push(Span::raw("  "));
        let alert_text = if timer.alert_fired {
            format!("🔔 {}% ✓", pct)
        } else {
            format!("🔔 {}%", pct)
        };
        spans.push(Span::styled(alert_text, idle_style()));
    }

    Line::from(spans)
}

/// Render the timer list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timers = app.engine.timers();
    let rows = app.visible_rows();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(row_idx, &timer_idx)| {
            let line = create_timer_line(&timers[timer_idx], row_idx == app.selected);
            ListItem::new(line)
        })
        .collect();

    let mut title = format!(" Timers ({}) [sort: {}] ", rows.len(), app.sort_key.label());
    if !app.search_query.is_empty() {
        title = format!(
            " Timers ({}) [sort: {}] [filter: {}] ",
            rows.len(),
            app.sort_key.label(),
            app.search_query
        );
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
