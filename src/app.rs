use crate::calendar::CalendarCursor;
use crate::config::Settings;
use crate::domain::{DailyMood, MoodEntry, Task, TaskFilter, ViewMode, MAX_ENERGY};
use crate::persistence::Snapshot;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Most mood entries kept in history
pub const MOOD_HISTORY_LIMIT: usize = 30;

/// Cached counters. Adjusted in lockstep with the events that move them,
/// never recomputed by scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTracking {
    /// Minutes committed by timer stops today
    #[serde(default)]
    pub today_focus: u32,
    #[serde(default)]
    pub today_completed: u32,
    #[serde(default)]
    pub weekly_completed: u32,
    /// Consecutive-day task completion streak shown in stats
    #[serde(default)]
    pub streak: u32,
    /// Days with a committed mood entry
    #[serde(default)]
    pub mood_streak: u32,
}

/// The running stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub task_id: Uuid,
    pub session_start: DateTime<Local>,
}

/// Main application state
///
/// Owned by one session and passed by reference into every operation.
/// Task, timer and mood operations live in `crate::store`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub mood_entries: Vec<MoodEntry>,
    pub daily_mood: DailyMood,
    pub time_tracking: TimeTracking,
    pub settings: Settings,
    pub is_dark_mode: bool,
    pub current_view: ViewMode,
    pub current_filter: TaskFilter,
    pub calendar: CalendarCursor,
    /// At most one timer runs at a time
    pub(crate) timer: Option<ActiveTimer>,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            mood_entries: Vec::new(),
            daily_mood: DailyMood::new(today),
            time_tracking: TimeTracking::default(),
            settings: Settings::default(),
            is_dark_mode: true,
            current_view: ViewMode::Dashboard,
            current_filter: TaskFilter::All,
            calendar: CalendarCursor::new(today),
            timer: None,
        }
    }

    /// Rebuild state from a persisted record, repairing anything that
    /// would break an invariant instead of failing.
    pub fn from_snapshot(snapshot: Snapshot, today: NaiveDate) -> Self {
        let mut state = Self::new(today);

        let mut seen_ids = HashSet::new();
        let total_tasks = snapshot.tasks.len();
        state.tasks = snapshot
            .tasks
            .into_iter()
            .filter(|t| seen_ids.insert(t.id))
            .collect();
        if state.tasks.len() != total_tasks {
            warn!(
                dropped = total_tasks - state.tasks.len(),
                "Dropped tasks with duplicate ids while loading"
            );
        }
        // Files without sessions keep their recorded minutes
        for task in state.tasks.iter_mut().filter(|t| !t.timer_sessions.is_empty()) {
            let tracked = task.sessions_total();
            if task.actual_minutes != tracked {
                warn!(
                    task_id = %task.id,
                    recorded = task.actual_minutes,
                    tracked,
                    "Repaired tracked minutes from timer sessions"
                );
                task.actual_minutes = tracked;
            }
        }

        let mut seen_dates = HashSet::new();
        let total_entries = snapshot.mood_entries.len();
        state.mood_entries = snapshot
            .mood_entries
            .into_iter()
            .filter(|e| seen_dates.insert(e.date))
            .take(MOOD_HISTORY_LIMIT)
            .collect();
        if state.mood_entries.len() != total_entries {
            warn!(
                dropped = total_entries - state.mood_entries.len(),
                "Dropped duplicate or overflow mood entries while loading"
            );
        }
        for entry in state.mood_entries.iter_mut().filter(|e| e.energy > MAX_ENERGY) {
            warn!(date = %entry.date, energy = entry.energy, "Clamped mood entry energy");
            entry.energy = MAX_ENERGY;
        }

        if let Some(mut draft) = snapshot.daily_mood {
            draft.reset_if_stale(today);
            if draft.energy > MAX_ENERGY {
                warn!(energy = draft.energy, "Clamped draft mood energy");
                draft.set_energy(draft.energy);
            }
            state.daily_mood = draft;
        }
        // An entry already logged today is what the draft shows on restart
        if let Some(entry) = state.mood_entries.iter().find(|e| e.date == today) {
            state.daily_mood.load_from(entry);
        }

        state.time_tracking = snapshot.time_tracking;
        state.settings = snapshot.settings;
        state.is_dark_mode = snapshot.is_dark_mode;
        state.current_view = snapshot.current_view;

        state.timer = snapshot.active_timer.filter(|timer| {
            let known = state.tasks.iter().any(|t| t.id == timer.task_id);
            if !known {
                warn!(task_id = %timer.task_id, "Discarded active timer for a missing task");
            }
            known
        });

        state
    }

    /// Full persisted record of the current state
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            mood_entries: self.mood_entries.clone(),
            daily_mood: Some(self.daily_mood.clone()),
            time_tracking: self.time_tracking.clone(),
            settings: self.settings.clone(),
            is_dark_mode: self.is_dark_mode,
            current_view: self.current_view,
            active_timer: self.timer,
        }
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains_task(&self, id: Uuid) -> bool {
        self.task(id).is_some()
    }

    /// Resolve a full id or a unique id prefix (as printed by listings)
    pub fn find_task_by_prefix(&self, prefix: &str) -> Option<Uuid> {
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.simple().to_string().starts_with(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id)
    }

    pub fn active_timer(&self) -> Option<&ActiveTimer> {
        self.timer.as_ref()
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.is_dark_mode = !self.is_dark_mode;
        self.is_dark_mode
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.current_view = self.current_view.toggled();
        self.current_view
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.current_filter = filter;
    }
}
