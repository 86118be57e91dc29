use crate::app::AppState;
use crate::domain::{Category, ContextTag, Mood, Priority, TaskFilter, ViewMode};
use crate::error::{HubError, HubResult};
use crate::store::TimerEvent;
use chrono::{DateTime, Local, NaiveDate};
use tracing::debug;
use uuid::Uuid;

/// Every state-changing request the CLI or dashboard can make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask {
        text: String,
        priority: Priority,
        category: Category,
        estimated_minutes: u32,
    },
    EditTask {
        id: Uuid,
        text: String,
        priority: Option<Priority>,
        category: Option<Category>,
    },
    DeleteTask(Uuid),
    ToggleComplete(Uuid),
    ClearCompleted,
    SetFilter(TaskFilter),
    CycleFilter,

    StartTimer(Uuid),
    StopTimer(Uuid),
    ToggleTimer(Uuid),

    SelectMood(Mood),
    SetEnergy(u8),
    /// Nudge energy up or down, staying within 0..=10
    AdjustEnergy(i8),
    ToggleContext(ContextTag),
    SetNotes(String),
    LogMood,
    EditTodaysMood,

    ToggleTheme,
    ToggleView,
    NextMonth,
    PrevMonth,
    SelectDate(NaiveDate),
    GoToToday,
}

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TaskAdded(Uuid),
    TaskEdited(Uuid),
    TaskDeleted(Uuid),
    CompletionToggled { id: Uuid, completed: bool },
    Cleared(usize),
    Timer(TimerEvent),
    DraftUpdated,
    MoodLogged { date: NaiveDate, mood: Mood },
    /// Whether today already had an entry to load
    DraftLoaded(bool),
    ThemeToggled { dark: bool },
    ViewChanged(ViewMode),
    FilterChanged(TaskFilter),
    CalendarMoved(NaiveDate),
    /// The command referred to something that does not exist
    Unchanged,
}

impl Outcome {
    /// Whether the persisted record changed and must be saved
    pub fn persists(&self) -> bool {
        match self {
            Self::FilterChanged(_)
            | Self::CalendarMoved(_)
            | Self::Unchanged
            | Self::Cleared(0)
            | Self::DraftLoaded(false) => false,
            _ => true,
        }
    }
}

/// Apply one command to `state` at instant `now`
pub fn dispatch(state: &mut AppState, command: Command, now: DateTime<Local>) -> HubResult<Outcome> {
    let today = now.date_naive();
    debug!(?command, "Dispatching");

    let outcome = match command {
        Command::AddTask {
            text,
            priority,
            category,
            estimated_minutes,
        } => {
            let task = state.add_task(&text, priority, category, estimated_minutes, now)?;
            Outcome::TaskAdded(task.id)
        }
        Command::EditTask {
            id,
            text,
            priority,
            category,
        } => {
            state.edit_task(id, &text, priority, category, now)?;
            Outcome::TaskEdited(id)
        }
        Command::DeleteTask(id) => match state.delete_task(id, now) {
            Some(task) => Outcome::TaskDeleted(task.id),
            None => Outcome::Unchanged,
        },
        Command::ToggleComplete(id) => match state.toggle_complete(id, now) {
            Some(completed) => Outcome::CompletionToggled { id, completed },
            None => Outcome::Unchanged,
        },
        Command::ClearCompleted => Outcome::Cleared(state.clear_completed(now)),
        Command::SetFilter(filter) => {
            state.set_filter(filter);
            Outcome::FilterChanged(filter)
        }
        Command::CycleFilter => {
            let next = state.current_filter.next();
            state.set_filter(next);
            Outcome::FilterChanged(next)
        }

        Command::StartTimer(id) => timer_outcome(state.start_timer(id, now)),
        Command::StopTimer(id) => timer_outcome(state.stop_timer(id, now).map(TimerEvent::Stopped)),
        Command::ToggleTimer(id) => timer_outcome(state.toggle_timer(id, now)),

        Command::SelectMood(mood) => {
            state.daily_mood.reset_if_stale(today);
            state.daily_mood.set_mood(mood);
            Outcome::DraftUpdated
        }
        Command::SetEnergy(energy) => {
            state.daily_mood.reset_if_stale(today);
            state.daily_mood.set_energy(energy);
            Outcome::DraftUpdated
        }
        Command::AdjustEnergy(delta) => {
            state.daily_mood.reset_if_stale(today);
            let energy = state.daily_mood.energy as i16 + delta as i16;
            state.daily_mood.set_energy(energy.max(0) as u8);
            Outcome::DraftUpdated
        }
        Command::ToggleContext(tag) => {
            state.daily_mood.reset_if_stale(today);
            state.daily_mood.toggle_context(tag);
            Outcome::DraftUpdated
        }
        Command::SetNotes(notes) => {
            state.daily_mood.reset_if_stale(today);
            state.daily_mood.set_notes(notes);
            Outcome::DraftUpdated
        }
        Command::LogMood => {
            state.daily_mood.reset_if_stale(today);
            let entry = state.log_mood_entry(today, now)?;
            Outcome::MoodLogged {
                date: entry.date,
                mood: entry.mood,
            }
        }
        Command::EditTodaysMood => Outcome::DraftLoaded(state.edit_todays_mood(today)),

        Command::ToggleTheme => Outcome::ThemeToggled {
            dark: state.toggle_theme(),
        },
        Command::ToggleView => Outcome::ViewChanged(state.toggle_view()),
        Command::NextMonth => {
            state.calendar.next_month();
            Outcome::CalendarMoved(state.calendar.month)
        }
        Command::PrevMonth => {
            state.calendar.prev_month();
            Outcome::CalendarMoved(state.calendar.month)
        }
        Command::SelectDate(date) => {
            state.calendar.select(date);
            Outcome::CalendarMoved(date)
        }
        Command::GoToToday => {
            state.calendar.go_to(today);
            Outcome::CalendarMoved(today)
        }
    };

    Ok(outcome)
}

/// User-facing confirmation for an outcome, if it warrants one
pub fn announce(state: &AppState, outcome: &Outcome) -> Option<String> {
    let task_text = |id: &Uuid| state.task(*id).map(|t| t.text.clone()).unwrap_or_default();
    let message = match outcome {
        Outcome::TaskAdded(id) => format!("Task \"{}\" added successfully", task_text(id)),
        Outcome::TaskEdited(id) => format!("Task updated to \"{}\"", task_text(id)),
        Outcome::TaskDeleted(_) => "Task deleted".to_string(),
        Outcome::CompletionToggled { id, completed } => format!(
            "Task \"{}\" marked as {}",
            task_text(id),
            if *completed { "complete" } else { "incomplete" }
        ),
        Outcome::Cleared(0) => "No completed tasks to clear".to_string(),
        Outcome::Cleared(n) => format!("Cleared {} completed task{}", n, if *n == 1 { "" } else { "s" }),
        Outcome::Timer(TimerEvent::Started { task_id, preempted }) => match preempted {
            Some(stopped) => format!(
                "Timer started on \"{}\" (previous timer stopped at {}m)",
                task_text(task_id),
                stopped.minutes
            ),
            None => format!("Timer started on \"{}\"", task_text(task_id)),
        },
        Outcome::Timer(TimerEvent::Stopped(stopped)) => format!(
            "Timer stopped: +{}m on \"{}\"",
            stopped.minutes,
            task_text(&stopped.task_id)
        ),
        Outcome::MoodLogged { .. } => "Mood logged successfully!".to_string(),
        Outcome::DraftLoaded(true) => "Edit mode activated. Update your mood and log again.".to_string(),
        Outcome::DraftLoaded(false) => "No mood logged today yet".to_string(),
        Outcome::ThemeToggled { dark } => {
            format!("Switched to {} mode", if *dark { "dark" } else { "light" })
        }
        Outcome::FilterChanged(filter) => format!("Showing {} tasks", filter),
        Outcome::DraftUpdated | Outcome::ViewChanged(_) | Outcome::CalendarMoved(_) | Outcome::Unchanged => {
            return None
        }
    };
    Some(message)
}

fn timer_outcome(event: Option<TimerEvent>) -> Outcome {
    event.map(Outcome::Timer).unwrap_or(Outcome::Unchanged)
}

/// Resolve a CLI-supplied id (full or unique prefix)
pub fn resolve_task_id(state: &AppState, raw: &str) -> HubResult<Uuid> {
    if let Ok(id) = raw.trim().parse::<Uuid>() {
        if state.contains_task(id) {
            return Ok(id);
        }
        return Err(HubError::NotFound(id));
    }
    state
        .find_task_by_prefix(raw)
        .ok_or_else(|| HubError::UnknownTaskRef(raw.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoppedTimer;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    fn add(state: &mut AppState, text: &str) -> Uuid {
        let outcome = dispatch(
            state,
            Command::AddTask {
                text: text.to_string(),
                priority: Priority::Medium,
                category: Category::Work,
                estimated_minutes: 0,
            },
            now(),
        )
        .unwrap();
        match outcome {
            Outcome::TaskAdded(id) => id,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_add_and_toggle_complete() {
        let mut state = AppState::new(now().date_naive());
        let id = add(&mut state, "Write proposal");

        let outcome = dispatch(&mut state, Command::ToggleComplete(id), now()).unwrap();
        assert_eq!(outcome, Outcome::CompletionToggled { id, completed: true });
        assert!(outcome.persists());
        assert_eq!(state.time_tracking.today_completed, 1);
    }

    #[test]
    fn test_validation_errors_leave_state_untouched() {
        let mut state = AppState::new(now().date_naive());
        let before = state.to_snapshot();

        let err = dispatch(
            &mut state,
            Command::AddTask {
                text: "   ".to_string(),
                priority: Priority::High,
                category: Category::Work,
                estimated_minutes: 5,
            },
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, HubError::EmptyInput));

        let err = dispatch(&mut state, Command::LogMood, now()).unwrap_err();
        assert!(matches!(err, HubError::MissingMoodSelection));
        assert_eq!(state.to_snapshot(), before);
    }

    #[test]
    fn test_missing_ids_are_unchanged() {
        let mut state = AppState::new(now().date_naive());
        let ghost = Uuid::new_v4();
        for command in [
            Command::DeleteTask(ghost),
            Command::ToggleComplete(ghost),
            Command::StartTimer(ghost),
            Command::StopTimer(ghost),
            Command::ToggleTimer(ghost),
        ] {
            let outcome = dispatch(&mut state, command, now()).unwrap();
            assert_eq!(outcome, Outcome::Unchanged);
            assert!(!outcome.persists());
        }
    }

    #[test]
    fn test_timer_commands() {
        let mut state = AppState::new(now().date_naive());
        let t1 = add(&mut state, "t1");
        let t2 = add(&mut state, "t2");

        dispatch(&mut state, Command::StartTimer(t1), now()).unwrap();
        let outcome = dispatch(&mut state, Command::ToggleTimer(t2), now() + Duration::minutes(20)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Timer(TimerEvent::Started {
                task_id: t2,
                preempted: Some(StoppedTimer { task_id: t1, minutes: 20 }),
            })
        );
        assert_eq!(state.time_tracking.today_focus, 20);
    }

    #[test]
    fn test_mood_flow_same_day_overwrite() {
        let mut state = AppState::new(now().date_naive());
        dispatch(&mut state, Command::SelectMood(Mood::Great), now()).unwrap();
        dispatch(&mut state, Command::SetEnergy(7), now()).unwrap();
        let outcome = dispatch(&mut state, Command::LogMood, now()).unwrap();
        assert_eq!(
            outcome,
            Outcome::MoodLogged {
                date: now().date_naive(),
                mood: Mood::Great
            }
        );

        dispatch(&mut state, Command::SelectMood(Mood::Okay), now()).unwrap();
        dispatch(&mut state, Command::SetEnergy(3), now()).unwrap();
        dispatch(&mut state, Command::LogMood, now() + Duration::hours(2)).unwrap();

        assert_eq!(state.mood_entries.len(), 1);
        assert_eq!(state.mood_entries[0].mood, Mood::Okay);
        assert_eq!(state.mood_entries[0].energy, 3);
        assert_eq!(state.time_tracking.mood_streak, 1);
    }

    #[test]
    fn test_log_mood_ignores_yesterdays_draft() {
        let mut state = AppState::new(now().date_naive());
        dispatch(&mut state, Command::SelectMood(Mood::VerySad), now()).unwrap();

        let next_day = now() + Duration::days(1);
        let err = dispatch(&mut state, Command::LogMood, next_day).unwrap_err();
        assert!(matches!(err, HubError::MissingMoodSelection));
        assert!(state.mood_entries.is_empty());
        assert_eq!(state.daily_mood.date, next_day.date_naive());
    }

    #[test]
    fn test_adjust_energy_clamps() {
        let mut state = AppState::new(now().date_naive());
        for _ in 0..8 {
            dispatch(&mut state, Command::AdjustEnergy(1), now()).unwrap();
        }
        assert_eq!(state.daily_mood.energy, 10);
        for _ in 0..12 {
            dispatch(&mut state, Command::AdjustEnergy(-1), now()).unwrap();
        }
        assert_eq!(state.daily_mood.energy, 0);
    }

    #[test]
    fn test_stale_draft_is_reset_before_edit() {
        let yesterday = now().date_naive() - Duration::days(1);
        let mut state = AppState::new(yesterday);
        state.daily_mood.set_mood(Mood::VerySad);
        state.daily_mood.toggle_context(ContextTag::Family);

        dispatch(&mut state, Command::SetEnergy(6), now()).unwrap();
        assert_eq!(state.daily_mood.date, now().date_naive());
        assert_eq!(state.daily_mood.mood, None);
        assert!(state.daily_mood.context_tags.is_empty());
        assert_eq!(state.daily_mood.energy, 6);
    }

    #[test]
    fn test_presentation_commands() {
        let mut state = AppState::new(now().date_naive());

        let outcome = dispatch(&mut state, Command::CycleFilter, now()).unwrap();
        assert_eq!(outcome, Outcome::FilterChanged(TaskFilter::Active));
        assert!(!outcome.persists());

        let outcome = dispatch(&mut state, Command::ToggleTheme, now()).unwrap();
        assert_eq!(outcome, Outcome::ThemeToggled { dark: false });
        assert!(outcome.persists());

        let outcome = dispatch(&mut state, Command::NextMonth, now()).unwrap();
        assert_eq!(
            outcome,
            Outcome::CalendarMoved(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        );
        assert!(!outcome.persists());

        dispatch(&mut state, Command::GoToToday, now()).unwrap();
        assert_eq!(state.calendar.selected, now().date_naive());
    }

    #[test]
    fn test_clear_completed_persists_only_when_something_went() {
        let mut state = AppState::new(now().date_naive());
        add(&mut state, "open");
        let outcome = dispatch(&mut state, Command::ClearCompleted, now()).unwrap();
        assert_eq!(outcome, Outcome::Cleared(0));
        assert!(!outcome.persists());
    }

    #[test]
    fn test_announce() {
        let mut state = AppState::new(now().date_naive());
        let id = add(&mut state, "Write proposal");
        assert_eq!(
            announce(&state, &Outcome::TaskAdded(id)).as_deref(),
            Some("Task \"Write proposal\" added successfully")
        );
        let outcome = dispatch(&mut state, Command::ToggleComplete(id), now()).unwrap();
        assert_eq!(
            announce(&state, &outcome).as_deref(),
            Some("Task \"Write proposal\" marked as complete")
        );
        assert_eq!(
            announce(&state, &Outcome::Cleared(2)).as_deref(),
            Some("Cleared 2 completed tasks")
        );
        assert_eq!(announce(&state, &Outcome::DraftUpdated), None);
    }

    #[test]
    fn test_resolve_task_id() {
        let mut state = AppState::new(now().date_naive());
        let id = add(&mut state, "find me");
        let short = state.task(id).unwrap().short_id();

        assert_eq!(resolve_task_id(&state, &short).unwrap(), id);
        assert_eq!(resolve_task_id(&state, &id.to_string()).unwrap(), id);
        assert!(matches!(
            resolve_task_id(&state, &Uuid::new_v4().to_string()),
            Err(HubError::NotFound(_))
        ));
        assert!(matches!(
            resolve_task_id(&state, "nothing"),
            Err(HubError::UnknownTaskRef(_))
        ));
    }
}
