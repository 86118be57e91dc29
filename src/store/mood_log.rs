use crate::app::{AppState, MOOD_HISTORY_LIMIT};
use crate::domain::MoodEntry;
use crate::error::{HubError, HubResult};
use chrono::{DateTime, Local, NaiveDate};
use tracing::info;

impl AppState {
    /// Commit the draft as the entry for `today`.
    ///
    /// An existing entry for the day is overwritten in place; only a new
    /// day bumps the mood streak and can evict the oldest history.
    pub fn log_mood_entry(&mut self, today: NaiveDate, now: DateTime<Local>) -> HubResult<&MoodEntry> {
        let mood = self.daily_mood.mood.ok_or(HubError::MissingMoodSelection)?;
        let entry = self.daily_mood.commit(mood, today, now);

        let index = match self.mood_entries.iter().position(|e| e.date == today) {
            Some(existing) => {
                self.mood_entries[existing] = entry;
                info!(%today, mood = mood.value(), "Mood entry updated");
                existing
            }
            None => {
                self.mood_entries.insert(0, entry);
                self.time_tracking.mood_streak += 1;
                self.mood_entries.truncate(MOOD_HISTORY_LIMIT);
                info!(
                    %today,
                    mood = mood.value(),
                    streak = self.time_tracking.mood_streak,
                    "Mood entry logged"
                );
                0
            }
        };
        Ok(&self.mood_entries[index])
    }

    /// Load today's entry into the draft for editing. Returns whether one existed.
    pub fn edit_todays_mood(&mut self, today: NaiveDate) -> bool {
        match self.mood_entries.iter().find(|e| e.date == today) {
            Some(entry) => {
                let entry = entry.clone();
                self.daily_mood.load_from(&entry);
                true
            }
            None => false,
        }
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.mood_entries.iter().find(|e| e.date == date)
    }

    /// Most recent first, at most `n`
    pub fn recent_entries(&self, n: usize) -> &[MoodEntry] {
        &self.mood_entries[..n.min(self.mood_entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextTag, Mood};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap() + Duration::days(offset)
    }

    fn noon(date: NaiveDate) -> DateTime<Local> {
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
    }

    fn log(state: &mut AppState, date: NaiveDate, mood: Mood, energy: u8) {
        state.daily_mood.set_mood(mood);
        state.daily_mood.set_energy(energy);
        state.log_mood_entry(date, noon(date)).unwrap();
    }

    #[test]
    fn test_log_requires_mood_selection() {
        let mut state = AppState::new(day(0));
        let result = state.log_mood_entry(day(0), noon(day(0)));
        assert!(matches!(result, Err(HubError::MissingMoodSelection)));
        assert!(state.mood_entries.is_empty());
        assert_eq!(state.time_tracking.mood_streak, 0);
    }

    #[test]
    fn test_same_day_overwrites_in_place() {
        let mut state = AppState::new(day(0));
        log(&mut state, day(0), Mood::Great, 7);
        assert_eq!(state.time_tracking.mood_streak, 1);

        log(&mut state, day(0), Mood::Okay, 3);
        assert_eq!(state.mood_entries.len(), 1);
        assert_eq!(state.time_tracking.mood_streak, 1);
        let entry = state.entry_for(day(0)).unwrap();
        assert_eq!(entry.mood, Mood::Okay);
        assert_eq!(entry.energy, 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut state = AppState::new(day(0));
        log(&mut state, day(0), Mood::Good, 5);
        log(&mut state, day(1), Mood::Good, 5);
        log(&mut state, day(2), Mood::Good, 5);
        assert_eq!(state.mood_entries[2].date, day(0));

        log(&mut state, day(0), Mood::Excellent, 9);
        assert_eq!(state.mood_entries.len(), 3);
        assert_eq!(state.mood_entries[2].date, day(0));
        assert_eq!(state.mood_entries[2].mood, Mood::Excellent);
        assert_eq!(state.time_tracking.mood_streak, 3);
    }

    #[test]
    fn test_history_capped_at_thirty() {
        let mut state = AppState::new(day(0));
        for offset in 0..35 {
            log(&mut state, day(offset), Mood::Good, 5);
            assert!(state.mood_entries.len() <= MOOD_HISTORY_LIMIT);
        }
        assert_eq!(state.mood_entries.len(), 30);
        assert_eq!(state.mood_entries[0].date, day(34));
        assert_eq!(state.mood_entries[29].date, day(5));
        assert!(state.entry_for(day(4)).is_none());
        assert_eq!(state.time_tracking.mood_streak, 35);
    }

    #[test]
    fn test_entry_carries_draft_fields() {
        let mut state = AppState::new(day(0));
        state.daily_mood.set_mood(Mood::Great);
        state.daily_mood.toggle_context(ContextTag::Learning);
        state.daily_mood.set_notes(" finished the course ");
        let entry = state.log_mood_entry(day(0), noon(day(0))).unwrap();
        assert_eq!(entry.notes, "finished the course");
        assert!(entry.context_tags.contains(&ContextTag::Learning));
        assert_eq!(entry.time_logged, "12:00 PM");
    }

    #[test]
    fn test_recent_entries() {
        let mut state = AppState::new(day(0));
        assert!(state.recent_entries(7).is_empty());
        for offset in 0..3 {
            log(&mut state, day(offset), Mood::Good, 5);
        }
        let recent = state.recent_entries(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, day(2));
        assert_eq!(state.recent_entries(10).len(), 3);
    }

    #[test]
    fn test_edit_todays_mood_loads_draft() {
        let mut state = AppState::new(day(0));
        assert!(!state.edit_todays_mood(day(0)));

        log(&mut state, day(0), Mood::VerySad, 1);
        state.daily_mood.set_mood(Mood::Excellent);
        state.daily_mood.set_energy(10);

        assert!(state.edit_todays_mood(day(0)));
        assert_eq!(state.daily_mood.mood, Some(Mood::VerySad));
        assert_eq!(state.daily_mood.energy, 1);
    }
}
