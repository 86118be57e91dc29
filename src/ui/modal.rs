use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    mood_pane::tag_choices,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the context tag picker over the dashboard
pub fn render_tag_picker(f: &mut Frame, state: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(tag_picker_lines(state))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Context Tags ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// One row per tag with its number key and selection state
pub fn tag_picker_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for (number, tag) in tag_choices() {
        let check = if state.daily_mood.context_tags.contains(&tag) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}]", number), modal_title_style()),
            Span::raw(format!(" {} {} {}", check, tag.emoji(), tag)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  1-6 toggle  ·  any other key closes"));
    lines
}
