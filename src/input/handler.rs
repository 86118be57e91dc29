use crate::app::AppState;
use crate::command::Command;
use crate::domain::{ContextTag, Mood, ViewMode};
use crate::ui::view::{DashboardView, InputFormState, UiMode};
use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent};

/// What the main loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Dispatch(Command),
}

/// Handle keyboard input events
pub fn handle_key(view: &mut DashboardView, state: &AppState, key: KeyEvent) -> KeyAction {
    match view.ui_mode {
        UiMode::Normal => handle_normal_mode(view, state, key),
        UiMode::AddingTask | UiMode::EditingTask(_) | UiMode::EditingNotes => {
            handle_input_form_mode(view, key)
        }
        UiMode::PickingTags => handle_tag_picker_mode(view, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(view: &mut DashboardView, state: &AppState, key: KeyEvent) -> KeyAction {
    if state.current_view == ViewMode::Calendar {
        if let Some(action) = handle_calendar_keys(state, key) {
            return action;
        }
    }

    let visible = state.filtered_tasks().len();
    let selected = view.selected_task_id(state);

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            view.move_selection_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.move_selection_down(visible);
            KeyAction::None
        }

        // Timer
        KeyCode::Enter | KeyCode::Char(' ') => selected
            .map(|id| KeyAction::Dispatch(Command::ToggleTimer(id)))
            .unwrap_or(KeyAction::None),

        // Tasks
        KeyCode::Char('d') => selected
            .map(|id| KeyAction::Dispatch(Command::ToggleComplete(id)))
            .unwrap_or(KeyAction::None),
        KeyCode::Char('x') | KeyCode::Delete => selected
            .map(|id| KeyAction::Dispatch(Command::DeleteTask(id)))
            .unwrap_or(KeyAction::None),
        KeyCode::Char('a') => {
            view.ui_mode = UiMode::AddingTask;
            view.input_form = Some(InputFormState::new_task());
            KeyAction::None
        }
        KeyCode::Char('e') => {
            if let Some(task) = selected.and_then(|id| state.task(id)) {
                view.ui_mode = UiMode::EditingTask(task.id);
                view.input_form = Some(InputFormState::editing(task));
            }
            KeyAction::None
        }
        KeyCode::Char('f') => {
            view.selected_index = 0;
            KeyAction::Dispatch(Command::CycleFilter)
        }
        KeyCode::Char('C') => KeyAction::Dispatch(Command::ClearCompleted),

        // Mood draft
        KeyCode::Char(c @ '1'..='5') => {
            let value = c.to_digit(10).unwrap_or(3) as u8;
            match Mood::try_from(value) {
                Ok(mood) => KeyAction::Dispatch(Command::SelectMood(mood)),
                Err(_) => KeyAction::None,
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::Dispatch(Command::AdjustEnergy(1)),
        KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::Dispatch(Command::AdjustEnergy(-1)),
        KeyCode::Char('g') => {
            view.ui_mode = UiMode::PickingTags;
            KeyAction::None
        }
        KeyCode::Char('n') => {
            view.ui_mode = UiMode::EditingNotes;
            view.input_form = Some(InputFormState::notes(&state.daily_mood.notes));
            KeyAction::None
        }
        KeyCode::Char('L') => KeyAction::Dispatch(Command::LogMood),
        KeyCode::Char('m') => KeyAction::Dispatch(Command::EditTodaysMood),

        // Presentation
        KeyCode::Char('t') => KeyAction::Dispatch(Command::ToggleTheme),
        KeyCode::Char('v') => KeyAction::Dispatch(Command::ToggleView),
        KeyCode::Char('[') => KeyAction::Dispatch(Command::PrevMonth),
        KeyCode::Char(']') => KeyAction::Dispatch(Command::NextMonth),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

        _ => KeyAction::None,
    }
}

/// Day navigation while the calendar is shown
fn handle_calendar_keys(state: &AppState, key: KeyEvent) -> Option<KeyAction> {
    let selected = state.calendar.selected;
    let step = match key.code {
        KeyCode::Left => Duration::days(-1),
        KeyCode::Right => Duration::days(1),
        KeyCode::Up => Duration::days(-7),
        KeyCode::Down => Duration::days(7),
        KeyCode::Char('T') => return Some(KeyAction::Dispatch(Command::GoToToday)),
        _ => return None,
    };
    selected
        .checked_add_signed(step)
        .map(|date| KeyAction::Dispatch(Command::SelectDate(date)))
}

/// Handle keys while a form is open
fn handle_input_form_mode(view: &mut DashboardView, key: KeyEvent) -> KeyAction {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            let mode = view.ui_mode;
            let Some(form) = view.input_form.take() else {
                view.close_form();
                return KeyAction::None;
            };
            view.close_form();
            let command = match mode {
                UiMode::AddingTask => Command::AddTask {
                    text: form.text.clone(),
                    priority: form.priority,
                    category: form.category,
                    estimated_minutes: form.estimate_minutes(),
                },
                UiMode::EditingTask(id) => Command::EditTask {
                    id,
                    text: form.text.clone(),
                    priority: Some(form.priority),
                    category: Some(form.category),
                },
                UiMode::EditingNotes => Command::SetNotes(form.text.clone()),
                _ => return KeyAction::None,
            };
            KeyAction::Dispatch(command)
        }

        // Cancel form
        KeyCode::Esc => {
            view.close_form();
            KeyAction::None
        }

        KeyCode::Tab => {
            if let Some(form) = view.input_form.as_mut() {
                form.next_field();
            }
            KeyAction::None
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(form) = view.input_form.as_mut() {
                form.cycle_option(key.code == KeyCode::Right);
            }
            KeyAction::None
        }
        KeyCode::Backspace => {
            if let Some(form) = view.input_form.as_mut() {
                form.backspace();
            }
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if let Some(form) = view.input_form.as_mut() {
                form.push_char(c);
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handle keys in the context tag picker: 1-6 toggle, anything else closes
fn handle_tag_picker_mode(view: &mut DashboardView, key: KeyEvent) -> KeyAction {
    if let KeyCode::Char(c @ '1'..='6') = key.code {
        let index = c.to_digit(10).unwrap_or(1) as usize - 1;
        if let Some(tag) = ContextTag::all().get(index) {
            return KeyAction::Dispatch(Command::ToggleContext(*tag));
        }
    }
    view.ui_mode = UiMode::Normal;
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::dispatch;
    use crate::domain::{Category, Priority, TaskFilter};
    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn create_test_state() -> AppState {
        let mut state = AppState::new(now().date_naive());
        for text in ["Task 1", "Task 2"] {
            state
                .add_task(text, Priority::Medium, Category::Work, 0, now())
                .unwrap();
        }
        state
    }

    /// Feed keys, applying dispatched commands like the main loop does
    fn press(view: &mut DashboardView, state: &mut AppState, codes: &[KeyCode]) -> Vec<KeyAction> {
        codes
            .iter()
            .map(|code| {
                let action = handle_key(view, state, key(*code));
                if let KeyAction::Dispatch(command) = &action {
                    let _ = dispatch(state, command.clone(), now());
                }
                action
            })
            .collect()
    }

    #[test]
    fn test_handle_navigation() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());

        press(&mut view, &mut state, &[KeyCode::Down]);
        assert_eq!(view.selected_index, 1);
        press(&mut view, &mut state, &[KeyCode::Down]);
        assert_eq!(view.selected_index, 1);
        press(&mut view, &mut state, &[KeyCode::Up]);
        assert_eq!(view.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let state = create_test_state();
        let mut view = DashboardView::new(now());
        assert_eq!(handle_key(&mut view, &state, key(KeyCode::Char('q'))), KeyAction::Quit);
    }

    #[test]
    fn test_enter_toggles_timer_on_selected() {
        let state = create_test_state();
        let mut view = DashboardView::new(now());
        view.selected_index = 1;
        let expected = state.tasks[1].id;
        assert_eq!(
            handle_key(&mut view, &state, key(KeyCode::Enter)),
            KeyAction::Dispatch(Command::ToggleTimer(expected))
        );
    }

    #[test]
    fn test_task_keys_without_tasks_do_nothing() {
        let state = AppState::new(now().date_naive());
        let mut view = DashboardView::new(now());
        for code in [KeyCode::Enter, KeyCode::Char('d'), KeyCode::Char('x'), KeyCode::Char('e')] {
            assert_eq!(handle_key(&mut view, &state, key(code)), KeyAction::None);
        }
        assert_eq!(view.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_add_task() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());

        press(&mut view, &mut state, &[KeyCode::Char('a')]);
        assert_eq!(view.ui_mode, UiMode::AddingTask);
        assert!(view.input_form.is_some());

        press(
            &mut view,
            &mut state,
            &[
                KeyCode::Char('N'),
                KeyCode::Char('e'),
                KeyCode::Char('w'),
                KeyCode::Tab,
                KeyCode::Right,
                KeyCode::Tab,
                KeyCode::Tab,
                KeyCode::Char('2'),
                KeyCode::Char('5'),
            ],
        );
        let actions = press(&mut view, &mut state, &[KeyCode::Enter]);
        assert!(matches!(actions[0], KeyAction::Dispatch(Command::AddTask { .. })));

        assert_eq!(state.tasks.len(), 3);
        assert_eq!(state.tasks[0].text, "New");
        assert_eq!(state.tasks[0].priority, Priority::High);
        assert_eq!(state.tasks[0].estimated_minutes, 25);
        assert_eq!(view.ui_mode, UiMode::Normal);
        assert!(view.input_form.is_none());
    }

    #[test]
    fn test_handle_edit_task() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());
        let id = state.tasks[0].id;

        press(
            &mut view,
            &mut state,
            &[KeyCode::Char('e'), KeyCode::Backspace, KeyCode::Char('X'), KeyCode::Enter],
        );
        assert_eq!(state.task(id).unwrap().text, "Task X");
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());
        press(&mut view, &mut state, &[KeyCode::Char('a'), KeyCode::Char('z'), KeyCode::Esc]);
        assert_eq!(view.ui_mode, UiMode::Normal);
        assert_eq!(state.tasks.len(), 2);
    }

    #[test]
    fn test_handle_delete_and_complete() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());

        press(&mut view, &mut state, &[KeyCode::Char('d')]);
        assert!(state.tasks[0].completed);

        press(&mut view, &mut state, &[KeyCode::Char('f'), KeyCode::Char('f')]);
        assert_eq!(state.current_filter, TaskFilter::Completed);
        press(&mut view, &mut state, &[KeyCode::Char('x')]);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "Task 1");
    }

    #[test]
    fn test_mood_keys() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());

        press(
            &mut view,
            &mut state,
            &[
                KeyCode::Char('4'),
                KeyCode::Char('+'),
                KeyCode::Char('+'),
                KeyCode::Char('g'),
                KeyCode::Char('1'),
                KeyCode::Char('6'),
                KeyCode::Esc,
                KeyCode::Char('n'),
                KeyCode::Char('o'),
                KeyCode::Char('k'),
                KeyCode::Enter,
                KeyCode::Char('L'),
            ],
        );
        let entry = state.entry_for(now().date_naive()).unwrap();
        assert_eq!(entry.mood, Mood::Great);
        assert_eq!(entry.energy, 7);
        assert!(entry.context_tags.contains(&ContextTag::Work));
        assert!(entry.context_tags.contains(&ContextTag::Family));
        assert_eq!(entry.notes, "ok");
        assert_eq!(view.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_calendar_keys() {
        let mut state = create_test_state();
        let mut view = DashboardView::new(now());
        press(&mut view, &mut state, &[KeyCode::Char('v')]);
        assert_eq!(state.current_view, ViewMode::Calendar);

        press(&mut view, &mut state, &[KeyCode::Right, KeyCode::Down]);
        assert_eq!(state.calendar.selected, NaiveDate::from_ymd_opt(2024, 6, 18).unwrap());

        press(&mut view, &mut state, &[KeyCode::Char(']')]);
        assert_eq!(state.calendar.month, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

        press(&mut view, &mut state, &[KeyCode::Char('T')]);
        assert_eq!(state.calendar.selected, now().date_naive());
    }
}
