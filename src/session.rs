use crate::app::AppState;
use crate::clock::Clock;
use crate::command::{dispatch, Command, Outcome};
use crate::error::HubResult;
use crate::persistence::Persist;
use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{info, warn};
use uuid::Uuid;

/// One running instance: the owned state plus where it is saved and what
/// time it is. Every write goes through `execute`, which saves after any
/// command that changed the persisted record.
pub struct Session<S: Persist, C: Clock> {
    state: AppState,
    store: S,
    clock: C,
}

impl<S: Persist, C: Clock> Session<S, C> {
    /// Load from `store`, falling back to a fresh state when nothing is saved
    pub fn open(store: S, clock: C) -> Result<Self> {
        let today = clock.now().date_naive();
        let state = match store.load()? {
            Some(snapshot) => {
                let state = AppState::from_snapshot(snapshot, today);
                info!(
                    tasks = state.tasks.len(),
                    mood_entries = state.mood_entries.len(),
                    "Loaded saved state"
                );
                state
            }
            None => {
                info!("Starting with empty state");
                AppState::new(today)
            }
        };
        Ok(Self { state, store, clock })
    }

    pub fn execute(&mut self, command: Command) -> HubResult<Outcome> {
        let now = self.clock.now();
        let outcome = dispatch(&mut self.state, command, now)?;
        if outcome.persists() {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Write the full snapshot. The in-memory state is kept even if this fails.
    pub fn save(&mut self) -> HubResult<()> {
        if let Err(err) = self.store.save(&self.state.to_snapshot()) {
            warn!(error = %err, "Failed to save state");
            return Err(err.into());
        }
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    /// Live minutes for a task, including a running session
    pub fn elapsed_display(&self, id: Uuid) -> Option<u32> {
        self.state.elapsed_display(id, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::{Category, Mood, Priority};
    use crate::error::HubError;
    use crate::persistence::{JsonFileStore, MemoryStore};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    fn add_command(text: &str) -> Command {
        Command::AddTask {
            text: text.to_string(),
            priority: Priority::High,
            category: Category::Work,
            estimated_minutes: 30,
        }
    }

    #[test]
    fn test_saves_after_every_write() {
        let clock = ManualClock::new(start());
        let mut session = Session::open(MemoryStore::new(), &clock).unwrap();

        let id = match session.execute(add_command("Write proposal")).unwrap() {
            Outcome::TaskAdded(id) => id,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(session.store().save_count, 1);

        session.execute(Command::CycleFilter).unwrap();
        assert_eq!(session.store().save_count, 1);

        session.execute(Command::StartTimer(id)).unwrap();
        clock.advance(Duration::minutes(20));
        assert_eq!(session.elapsed_display(id), Some(20));
        session.execute(Command::StopTimer(id)).unwrap();
        assert_eq!(session.store().save_count, 3);

        let saved = session.store().saved.clone().unwrap();
        assert_eq!(saved.time_tracking.today_focus, 20);
        assert_eq!(saved.tasks[0].actual_minutes, 20);
        assert!(saved.active_timer.is_none());
    }

    #[test]
    fn test_validation_error_does_not_save() {
        let clock = ManualClock::new(start());
        let mut session = Session::open(MemoryStore::new(), &clock).unwrap();

        let err = session.execute(Command::LogMood).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.store().save_count, 0);
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let clock = ManualClock::new(start());
        let store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };
        let mut session = Session::open(store, &clock).unwrap();

        let err = session.execute(add_command("kept in memory")).unwrap_err();
        assert!(matches!(err, HubError::Storage(_)));
        assert_eq!(session.state().tasks.len(), 1);
    }

    #[test]
    fn test_running_timer_survives_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(start());

        let id = {
            let mut session = Session::open(JsonFileStore::in_dir(temp_dir.path()), &clock).unwrap();
            let id = match session.execute(add_command("long haul")).unwrap() {
                Outcome::TaskAdded(id) => id,
                other => panic!("unexpected {:?}", other),
            };
            session.execute(Command::StartTimer(id)).unwrap();
            id
        };

        clock.advance(Duration::minutes(42));
        let mut session = Session::open(JsonFileStore::in_dir(temp_dir.path()), &clock).unwrap();
        assert!(session.state().is_timer_running(id));
        session.execute(Command::StopTimer(id)).unwrap();
        assert_eq!(session.state().time_tracking.today_focus, 42);
    }

    #[test]
    fn test_reopen_next_day_resets_draft_but_keeps_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(start());
        {
            let mut session = Session::open(JsonFileStore::in_dir(temp_dir.path()), &clock).unwrap();
            session.execute(Command::SelectMood(Mood::Great)).unwrap();
            session.execute(Command::LogMood).unwrap();
            session.execute(Command::SelectMood(Mood::Okay)).unwrap();
        }

        clock.advance(Duration::days(1));
        let session = Session::open(JsonFileStore::in_dir(temp_dir.path()), &clock).unwrap();
        assert_eq!(session.state().mood_entries.len(), 1);
        assert_eq!(session.state().daily_mood.mood, None);
        assert_eq!(session.state().daily_mood.date, start().date_naive() + Duration::days(1));
    }
}
