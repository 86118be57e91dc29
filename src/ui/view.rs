use crate::app::AppState;
use crate::domain::{header_line, Category, Priority, Task};
use crate::ticker::Tick;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// What the keyboard currently drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask(Uuid),
    EditingNotes,
    PickingTags,
}

/// Form state for adding or editing a task, or typing mood notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    pub text: String,
    pub priority: Priority,
    pub category: Category,
    /// Digits only
    pub estimate: String,
    /// 0 = text, 1 = priority, 2 = category, 3 = estimate
    pub editing_field: usize,
    /// Notes use only the text field
    pub text_only: bool,
}

impl InputFormState {
    const FIELD_COUNT: usize = 4;
    const MAX_ESTIMATE_DIGITS: usize = 4;

    pub fn new_task() -> Self {
        Self {
            text: String::new(),
            priority: Priority::default(),
            category: Category::default(),
            estimate: String::new(),
            editing_field: 0,
            text_only: false,
        }
    }

    pub fn editing(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            priority: task.priority,
            category: task.category,
            estimate: String::new(),
            editing_field: 0,
            text_only: false,
        }
    }

    pub fn notes(current: &str) -> Self {
        Self {
            text: current.to_string(),
            text_only: true,
            ..Self::new_task()
        }
    }

    pub fn next_field(&mut self) {
        if !self.text_only {
            self.editing_field = (self.editing_field + 1) % Self::FIELD_COUNT;
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.editing_field {
            0 => self.text.push(c),
            3 if c.is_ascii_digit() && self.estimate.len() < Self::MAX_ESTIMATE_DIGITS => {
                self.estimate.push(c)
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.editing_field {
            0 => {
                self.text.pop();
            }
            3 => {
                self.estimate.pop();
            }
            _ => {}
        }
    }

    /// Step the priority or category selector
    pub fn cycle_option(&mut self, forward: bool) {
        match self.editing_field {
            1 => self.priority = cycle(Priority::all(), self.priority, forward),
            2 => self.category = cycle(Category::all(), self.category, forward),
            _ => {}
        }
    }

    pub fn estimate_minutes(&self) -> u32 {
        self.estimate.parse().unwrap_or(0)
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    options[next]
}

/// Transient message in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Dashboard-only state: selection, input modes and the display clock.
/// Never persisted.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status: Option<StatusMessage>,
    /// Instant the running timers are drawn against
    pub now: DateTime<Local>,
    pub header: String,
}

impl DashboardView {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: None,
            now,
            header: header_line(now),
        }
    }

    pub fn on_tick(&mut self, tick: Tick, now: DateTime<Local>) {
        match tick {
            Tick::TimerRefresh => self.now = now,
            Tick::ClockRefresh => {
                self.now = now;
                self.header = header_line(now);
            }
        }
    }

    /// Keep the selection inside a list of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self, len: usize) {
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    /// Id of the highlighted row under the current filter
    pub fn selected_task_id(&self, state: &AppState) -> Option<Uuid> {
        state
            .filtered_tasks()
            .get(self.selected_index)
            .map(|t| t.id)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn close_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}
