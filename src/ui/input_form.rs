use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
    view::{DashboardView, InputFormState, UiMode},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit task form or the notes prompt
pub fn render_input_form(f: &mut Frame, view: &DashboardView, area: Rect) {
    if let Some(form) = &view.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = match view.ui_mode {
            UiMode::EditingTask(_) => " Edit Task ",
            UiMode::EditingNotes => " Mood Notes ",
            _ => " Add Task ",
        };

        let paragraph = Paragraph::new(form_lines(form))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Lines of the form body; the focused field is marked and carries a cursor
pub fn form_lines(form: &InputFormState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];

    let label = if form.text_only { "Notes" } else { "Task" };
    push_field(&mut lines, label, form.text.clone(), form.editing_field == 0);

    if !form.text_only {
        push_field(
            &mut lines,
            "Priority (←/→)",
            form.priority.to_string(),
            form.editing_field == 1,
        );
        push_field(
            &mut lines,
            "Category (←/→)",
            form.category.to_string(),
            form.editing_field == 2,
        );
        push_field(
            &mut lines,
            "Estimate (minutes)",
            form.estimate.clone(),
            form.editing_field == 3,
        );
        lines.push(Line::styled(
            "Tab to switch fields  ·  Enter to submit  ·  Esc to cancel",
            hint_style(),
        ));
    } else {
        lines.push(Line::styled("Enter to save  ·  Esc to cancel", hint_style()));
    }

    lines
}

fn push_field(lines: &mut Vec<Line<'static>>, label: &str, value: String, focused: bool) {
    let label = if focused {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };
    lines.push(Line::raw(label));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
}
