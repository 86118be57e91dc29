use super::enums::{Category, Priority};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whole minutes between two instants, rounded half up
///
/// A clock that went backwards yields zero rather than a negative session.
pub fn session_minutes(start: DateTime<Local>, end: DateTime<Local>) -> u32 {
    let millis = end.signed_duration_since(start).num_milliseconds().max(0);
    ((millis + 30_000) / 60_000) as u32
}

/// One committed stopwatch run on a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub minutes: u32,
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    /// 0 means no estimate
    #[serde(default)]
    pub estimated_minutes: u32,
    /// Sum of `timer_sessions[*].minutes`
    #[serde(default)]
    pub actual_minutes: u32,
    #[serde(default)]
    pub timer_sessions: Vec<TimerSession>,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Local>>,
    /// Optional due date, carried through saves unchanged
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(
        text: String,
        priority: Priority,
        category: Category,
        estimated_minutes: u32,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            completed_at: None,
            priority,
            category,
            estimated_minutes,
            actual_minutes: 0,
            timer_sessions: Vec::new(),
            created_at: now,
            edited_at: None,
            due_date: None,
        }
    }

    /// Flip completion, keeping `completed_at` in step. Returns the new state.
    pub fn toggle_completed(&mut self, now: DateTime<Local>) -> bool {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
        self.completed
    }

    /// Append a finished session and accumulate its minutes
    pub fn record_session(&mut self, start: DateTime<Local>, end: DateTime<Local>) -> &TimerSession {
        let minutes = session_minutes(start, end);
        self.actual_minutes = self.actual_minutes.saturating_add(minutes);
        self.timer_sessions.push(TimerSession { start, end, minutes });
        &self.timer_sessions[self.timer_sessions.len() - 1]
    }

    /// Local calendar day the task was created on
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn has_estimate(&self) -> bool {
        self.estimated_minutes > 0
    }

    /// True when tracked time has reached a non-zero estimate
    pub fn is_over_estimate(&self) -> bool {
        self.has_estimate() && self.actual_minutes >= self.estimated_minutes
    }

    /// First eight characters of the id, as shown in listings
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// Recompute `actual_minutes` from the session log
    pub fn sessions_total(&self) -> u32 {
        self.timer_sessions.iter().map(|s| s.minutes).sum()
    }
}
