pub mod calendar_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod mood_pane;
pub mod progress_pane;
pub mod styles;
pub mod view;

use crate::app::AppState;
use crate::domain::{format_focus, ViewMode};
use calendar_pane::render_calendar_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_tag_picker;
use mood_pane::render_mood_pane;
use progress_pane::render_progress_pane;
use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{default_style, error_style, hint_style, title_style};
use view::{DashboardView, UiMode};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, state: &AppState, view: &DashboardView) {
    let size = f.size();
    let dark = state.is_dark_mode;
    let today = view.now.date_naive();
    let layout = create_layout(size);

    // Theme background
    f.render_widget(Paragraph::new("").style(default_style(dark)), size);

    // Greeting and date
    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {}", view.header),
        title_style(dark),
    )));
    f.render_widget(header, layout.header_area);

    match state.current_view {
        ViewMode::Dashboard => render_list_pane(f, state, view, layout.main_area),
        ViewMode::Calendar => render_calendar_pane(f, state, today, layout.main_area),
    }
    render_progress_pane(f, state, layout.progress_area);
    render_mood_pane(f, state, today, layout.mood_area);

    // Status line
    let status = match &view.status {
        Some(message) if message.is_error => {
            Line::from(Span::styled(format!(" {}", message.text), error_style()))
        }
        Some(message) => Line::from(Span::raw(format!(" {}", message.text))),
        None => Line::from(Span::styled(
            format!(" Focus today: {}", format_focus(state.time_tracking.today_focus)),
            hint_style(),
        )),
    };
    f.render_widget(Paragraph::new(status), layout.status_area);

    render_keybindings(f, state.current_view, layout.keybindings_area);

    match view.ui_mode {
        UiMode::PickingTags => render_tag_picker(f, state, size),
        UiMode::AddingTask | UiMode::EditingTask(_) | UiMode::EditingNotes => {
            render_input_form(f, view, size)
        }
        UiMode::Normal => {}
    }
}
