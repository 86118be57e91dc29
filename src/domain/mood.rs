use super::enums::{ContextTag, Mood};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const MAX_ENERGY: u8 = 10;
pub const DEFAULT_ENERGY: u8 = 5;

/// Display form of the time an entry was logged, e.g. "9:05 AM"
pub fn format_time_logged(at: DateTime<Local>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// A committed mood record. At most one exists per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mood: Mood,
    #[serde(default = "default_energy")]
    pub energy: u8,
    #[serde(default)]
    pub context_tags: BTreeSet<ContextTag>,
    #[serde(default)]
    pub notes: String,
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub time_logged: String,
}

impl MoodEntry {
    pub fn label(&self) -> &'static str {
        self.mood.label()
    }

    pub fn emoji(&self) -> &'static str {
        self.mood.emoji()
    }
}

fn default_energy() -> u8 {
    DEFAULT_ENERGY
}

/// Uncommitted mood input for the current day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMood {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default = "default_energy")]
    pub energy: u8,
    #[serde(default)]
    pub context_tags: BTreeSet<ContextTag>,
    #[serde(default)]
    pub notes: String,
    pub date: NaiveDate,
}

impl DailyMood {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mood: None,
            energy: DEFAULT_ENERGY,
            context_tags: BTreeSet::new(),
            notes: String::new(),
            date: today,
        }
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = Some(mood);
    }

    /// Set energy, clamped to 0..=10
    pub fn set_energy(&mut self, energy: u8) {
        self.energy = energy.min(MAX_ENERGY);
    }

    /// Select or deselect a tag. Returns whether the tag is now selected.
    pub fn toggle_context(&mut self, tag: ContextTag) -> bool {
        if self.context_tags.remove(&tag) {
            false
        } else {
            self.context_tags.insert(tag);
            true
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Copy a committed entry back into the draft for re-editing
    pub fn load_from(&mut self, entry: &MoodEntry) {
        self.mood = Some(entry.mood);
        self.energy = entry.energy;
        self.context_tags = entry.context_tags.clone();
        self.notes = entry.notes.clone();
        self.date = entry.date;
    }

    /// Replace a draft left over from an earlier day. Returns true if reset.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.date < today {
            *self = DailyMood::new(today);
            true
        } else {
            false
        }
    }

    /// Build the committed entry for `today`
    pub(crate) fn commit(&self, mood: Mood, today: NaiveDate, now: DateTime<Local>) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            date: today,
            mood,
            energy: self.energy,
            context_tags: self.context_tags.clone(),
            notes: self.notes.trim().to_string(),
            timestamp: now,
            time_logged: format_time_logged(now),
        }
    }
}
