use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a label does not name any variant of an enum
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Priority::Low, Priority::Medium, Priority::High]
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Work,
    #[default]
    Personal,
    Health,
    Learning,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Health => "Health",
            Self::Learning => "Learning",
            Self::Other => "Other",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Category::Work,
            Category::Personal,
            Category::Health,
            Category::Learning,
            Category::Other,
        ]
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
                expected: "work, personal, health, learning, other",
            })
    }
}

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Next filter in tab order (all -> active -> completed -> all)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                kind: "filter",
                value: s.to_string(),
                expected: "all, active, completed",
            }),
        }
    }
}

/// Top-level view of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Dashboard,
    Calendar,
}

impl ViewMode {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Dashboard => Self::Calendar,
            Self::Calendar => Self::Dashboard,
        }
    }
}

/// Five-point mood scale, serialized as its numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
    VerySad = 1,
    Okay = 2,
    Good = 3,
    Great = 4,
    Excellent = 5,
}

impl Mood {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VerySad => "Very Sad",
            Self::Okay => "Okay",
            Self::Good => "Good",
            Self::Great => "Great",
            Self::Excellent => "Excellent",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::VerySad => "😢",
            Self::Okay => "😐",
            Self::Good => "😊",
            Self::Great => "😄",
            Self::Excellent => "😍",
        }
    }

    /// All moods in ascending order
    pub fn all() -> &'static [Mood] {
        &[
            Mood::VerySad,
            Mood::Okay,
            Mood::Good,
            Mood::Great,
            Mood::Excellent,
        ]
    }
}

impl TryFrom<u8> for Mood {
    type Error = ParseEnumError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VerySad),
            2 => Ok(Self::Okay),
            3 => Ok(Self::Good),
            4 => Ok(Self::Great),
            5 => Ok(Self::Excellent),
            _ => Err(ParseEnumError {
                kind: "mood",
                value: value.to_string(),
                expected: "1-5",
            }),
        }
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> Self {
        mood.value()
    }
}

impl FromStr for Mood {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Mood::try_from(n);
        }
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseEnumError {
                kind: "mood",
                value: s.to_string(),
                expected: "1-5",
            })
    }
}

/// Context tags that can be attached to a mood entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextTag {
    Work,
    Personal,
    Health,
    Learning,
    Social,
    Family,
}

impl ContextTag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Health => "Health",
            Self::Learning => "Learning",
            Self::Social => "Social",
            Self::Family => "Family",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Work => "🏢",
            Self::Personal => "👤",
            Self::Health => "❤️",
            Self::Learning => "📚",
            Self::Social => "👥",
            Self::Family => "👨‍👩‍👧",
        }
    }

    pub fn all() -> &'static [ContextTag] {
        &[
            ContextTag::Work,
            ContextTag::Personal,
            ContextTag::Health,
            ContextTag::Learning,
            ContextTag::Social,
            ContextTag::Family,
        ]
    }
}

impl FromStr for ContextTag {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextTag::all()
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "context tag",
                value: s.to_string(),
                expected: "work, personal, health, learning, social, family",
            })
    }
}

/// Energy band used for colouring the 0-10 energy slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub fn from_energy(energy: u8) -> Self {
        match energy {
            0..=3 => Self::Low,
            4..=6 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Priority, Category, TaskFilter, Mood, ContextTag, EnergyLevel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("Medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!(" LOW ".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("work".parse::<Category>(), Ok(Category::Work));
        assert_eq!("LEARNING".parse::<Category>(), Ok(Category::Learning));
        assert!("chores".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(TaskFilter::All.next(), TaskFilter::Active);
        assert_eq!(TaskFilter::Active.next(), TaskFilter::Completed);
        assert_eq!(TaskFilter::Completed.next(), TaskFilter::All);
    }

    #[test]
    fn test_mood_from_value_and_label() {
        assert_eq!(Mood::try_from(1), Ok(Mood::VerySad));
        assert_eq!(Mood::try_from(5), Ok(Mood::Excellent));
        assert!(Mood::try_from(0).is_err());
        assert!(Mood::try_from(6).is_err());
        assert_eq!("4".parse::<Mood>(), Ok(Mood::Great));
        assert_eq!("very sad".parse::<Mood>(), Ok(Mood::VerySad));
    }

    #[test]
    fn test_mood_serializes_as_number() {
        let json = serde_json::to_string(&Mood::Great).unwrap();
        assert_eq!(json, "4");
        let back: Mood = serde_json::from_str("2").unwrap();
        assert_eq!(back, Mood::Okay);
        assert!(serde_json::from_str::<Mood>("9").is_err());
    }

    #[test]
    fn test_mood_ordering_is_numeric() {
        assert!(Mood::VerySad < Mood::Good);
        assert!(Mood::Excellent > Mood::Great);
    }

    #[test]
    fn test_energy_level_bands() {
        assert_eq!(EnergyLevel::from_energy(0), EnergyLevel::Low);
        assert_eq!(EnergyLevel::from_energy(3), EnergyLevel::Low);
        assert_eq!(EnergyLevel::from_energy(4), EnergyLevel::Medium);
        assert_eq!(EnergyLevel::from_energy(6), EnergyLevel::Medium);
        assert_eq!(EnergyLevel::from_energy(7), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_energy(10), EnergyLevel::High);
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Dashboard.toggled(), ViewMode::Calendar);
        assert_eq!(ViewMode::Calendar.toggled(), ViewMode::Dashboard);
    }
}
