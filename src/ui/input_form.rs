use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{color_for_tag, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// One labelled field line with a cursor on the active field
fn field_line<'a>(label: &'a str, value: &'a str, active: bool) -> Vec<Line<'a>> {
    let label_text = if active {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };

    let mut value_spans = vec![Span::raw("> "), Span::styled(value, modal_title_style())];
    if active {
        value_spans.push(Span::styled("█", modal_title_style())); // Cursor
    }

    vec![Line::raw(label_text), Line::from(value_spans)]
}

/// Render the create-timer input form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.extend(field_line("Name", &form.name, form.editing_field == 0));

        // Duration as three fields on one line
        let duration_label = match form.editing_field {
            1 => "Duration (editing hours):",
            2 => "Duration (editing minutes):",
            3 => "Duration (editing seconds):",
            _ => "Duration:",
        };
        lines.push(Line::raw(duration_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(
                format!(
                    "{}h {}m {}s",
                    if form.hours.is_empty() { "0" } else { &form.hours },
                    if form.minutes.is_empty() { "0" } else { &form.minutes },
                    if form.seconds.is_empty() { "0" } else { &form.seconds },
                ),
                modal_title_style(),
            ),
        ]));

        lines.extend(field_line(
            "Notes",
            &form.description,
            form.editing_field == 4,
        ));
        lines.extend(field_line(
            "Alert at % (optional)",
            &form.alert,
            form.editing_field == 5,
        ));

        // Color picker
        lines.push(Line::raw("Color (←/→):"));
        let color_spans: Vec<Span> = crate::app::COLOR_PALETTE
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let marker = if i == form.color_index { "[●] " } else { " ● " };
                Span::styled(marker, Style::default().fg(color_for_tag(name)))
            })
            .collect();
        lines.push(Line::from(color_spans));

        lines.push(Line::raw(""));
        lines.push(Line::raw(
            "Tab to switch fields  ·  Enter to create  ·  Esc to cancel",
        ));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Add Timer ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
