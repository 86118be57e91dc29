use crate::app::AppState;
use crate::domain::{empty_state_message, estimate_badge, format_clock, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, over_estimate_style, priority_style,
    running_style, selected_style, tag_style, title_style,
};
use crate::ui::view::DashboardView;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the filtered task list
pub fn render_list_pane(f: &mut Frame, state: &AppState, view: &DashboardView, area: Rect) {
    let dark = state.is_dark_mode;
    let tasks = state.filtered_tasks();
    let title = format!(
        " Tasks [{}] ({}/{}) ",
        state.current_filter,
        tasks.len(),
        state.tasks.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(dark))
        .title(Span::styled(title, title_style(dark)));

    if tasks.is_empty() {
        let message = empty_state_message(state.current_filter, !state.tasks.is_empty());
        let paragraph = Paragraph::new(Line::styled(message, hint_style()))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let running = state.is_timer_running(task.id);
            let elapsed = state
                .elapsed_display(task.id, view.now)
                .unwrap_or(task.actual_minutes);
            let line = create_task_line(task, elapsed, running);
            let style = if idx == view.selected_index {
                selected_style(dark)
            } else {
                default_style(dark)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: [x] ● Write proposal  ▶ 0:26 / ~30m [Work]
pub fn create_task_line(task: &Task, elapsed: u32, running: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));
    spans.push(Span::styled("● ".to_string(), priority_style(task.priority)));

    if task.completed {
        spans.push(Span::styled(task.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.text.clone()));
    }
    spans.push(Span::raw("  ".to_string()));

    // Stopwatch
    if running || elapsed > 0 {
        let marker = if running { "▶ " } else { "⏱ " };
        let over = task.has_estimate() && elapsed >= task.estimated_minutes;
        let clock_style = if over {
            over_estimate_style()
        } else if running {
            running_style()
        } else {
            hint_style()
        };
        spans.push(Span::styled(format!("{}{}", marker, format_clock(elapsed)), clock_style));
        if task.has_estimate() {
            spans.push(Span::raw(" / ".to_string()));
        }
    }

    let badge = estimate_badge(task.estimated_minutes);
    if !badge.is_empty() {
        spans.push(Span::styled(badge, hint_style()));
    }

    spans.push(Span::raw(" ".to_string()));
    spans.push(Span::styled(format!("[{}]", task.category), tag_style()));

    Line::from(spans)
}
