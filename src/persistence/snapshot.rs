use crate::app::{ActiveTimer, TimeTracking};
use crate::config::Settings;
use crate::domain::{DailyMood, MoodEntry, Task, ViewMode};
use serde::{Deserialize, Serialize};

/// Everything that survives a restart, as stored in `state.json`.
///
/// Missing fields fall back to defaults so older or hand-edited files
/// still load. The filter and calendar cursor are session-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub mood_entries: Vec<MoodEntry>,
    #[serde(default)]
    pub daily_mood: Option<DailyMood>,
    #[serde(default)]
    pub time_tracking: TimeTracking,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_dark_mode")]
    pub is_dark_mode: bool,
    #[serde(default)]
    pub current_view: ViewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_timer: Option<ActiveTimer>,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            mood_entries: Vec::new(),
            daily_mood: None,
            time_tracking: TimeTracking::default(),
            settings: Settings::default(),
            is_dark_mode: default_dark_mode(),
            current_view: ViewMode::default(),
            active_timer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_uses_defaults() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
        assert!(snapshot.is_dark_mode);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(Snapshot::default()).unwrap();
        assert!(json.get("moodEntries").is_some());
        assert!(json.get("timeTracking").is_some());
        assert!(json.get("isDarkMode").is_some());
        assert_eq!(json["currentView"], "dashboard");
        assert!(json.get("activeTimer").is_none());
    }

    #[test]
    fn test_reads_legacy_shape() {
        let json = r#"{
            "tasks": [{
                "id": "6f1c2a1e-4b1a-4c55-9a3e-0d8f6b7c1a20",
                "text": "Read a book",
                "completed": true,
                "priority": "Low",
                "category": "Learning",
                "createdAt": "2024-06-10T09:00:00+00:00"
            }],
            "timeTracking": {"todayFocus": 45, "moodStreak": 2},
            "isDarkMode": false
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].actual_minutes, 0);
        assert!(snapshot.tasks[0].timer_sessions.is_empty());
        assert_eq!(snapshot.time_tracking.today_focus, 45);
        assert_eq!(snapshot.time_tracking.mood_streak, 2);
        assert_eq!(snapshot.settings, Settings::default());
        assert!(!snapshot.is_dark_mode);
    }
}
