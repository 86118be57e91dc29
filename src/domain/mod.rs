pub mod enums;
pub mod mood;
pub mod task;
pub mod views;

pub use enums::{Category, ContextTag, EnergyLevel, Mood, ParseEnumError, Priority, TaskFilter, ViewMode};
pub use mood::{format_time_logged, DailyMood, MoodEntry, MAX_ENERGY};
pub use task::{session_minutes, Task, TimerSession};
pub use views::{empty_state_message, estimate_badge, format_clock, format_focus, greeting, header_line};
