use super::enums::TaskFilter;
use chrono::{DateTime, Local, Timelike};

/// Stopwatch display "H:MM" for a minute count
pub fn format_clock(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Focus time display "Xh Ym"
pub fn format_focus(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Estimate badge, empty when no estimate is set
pub fn estimate_badge(estimated_minutes: u32) -> String {
    if estimated_minutes > 0 {
        format!("~{}m", estimated_minutes)
    } else {
        String::new()
    }
}

/// Time-of-day greeting
pub fn greeting(now: DateTime<Local>) -> &'static str {
    match now.hour() {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Header line: greeting plus the long-form date
pub fn header_line(now: DateTime<Local>) -> String {
    format!(
        "{}! Ready to be productive?  {}",
        greeting(now),
        now.format("%A, %B %-d, %Y")
    )
}

/// Message shown when the filtered list is empty
pub fn empty_state_message(filter: TaskFilter, has_any_tasks: bool) -> &'static str {
    match filter {
        TaskFilter::Active if has_any_tasks => "No active tasks. Great job! 🎉",
        TaskFilter::Active => "No tasks yet. Add your first task!",
        TaskFilter::Completed => "No completed tasks yet. Start working! 💪",
        TaskFilter::All => "No tasks yet. Add your first task to get started! ✨",
    }
}
