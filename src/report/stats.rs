use crate::app::AppState;
use crate::domain::{Mood, MoodEntry};

/// How many of the most recent mood entries feed the weekly statistics
pub const MOOD_STATS_WINDOW: usize = 7;

/// Metrics shown as progress rings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    DailyTasks,
    WeeklyTasks,
    MoodStreak,
    DailyFocus,
}

impl ProgressKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DailyTasks => "Daily Tasks",
            Self::WeeklyTasks => "Weekly Tasks",
            Self::MoodStreak => "Mood Streak",
            Self::DailyFocus => "Daily Focus",
        }
    }

    pub fn all() -> &'static [ProgressKind] {
        &[
            ProgressKind::DailyTasks,
            ProgressKind::WeeklyTasks,
            ProgressKind::MoodStreak,
            ProgressKind::DailyFocus,
        ]
    }
}

/// A counter against its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: u32,
    pub goal: u32,
}

impl Progress {
    /// Fill fraction in 0.0..=1.0; a zero goal reads as complete
    pub fn ratio(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.current as f64 / self.goal as f64).min(1.0)
    }

    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.goal
    }
}

/// Read one ring's counter and goal from the state
pub fn progress(state: &AppState, kind: ProgressKind) -> Progress {
    let counters = &state.time_tracking;
    let settings = &state.settings;
    let (current, goal) = match kind {
        ProgressKind::DailyTasks => (counters.today_completed, settings.daily_task_goal),
        ProgressKind::WeeklyTasks => (counters.weekly_completed, settings.weekly_task_goal),
        ProgressKind::MoodStreak => (counters.mood_streak, settings.mood_streak_goal),
        ProgressKind::DailyFocus => (counters.today_focus, settings.daily_focus_goal),
    };
    Progress { current, goal }
}

/// Aggregates over the last `MOOD_STATS_WINDOW` logged entries
#[derive(Debug, Clone, PartialEq)]
pub struct MoodStats {
    pub avg_mood: f64,
    pub avg_energy: f64,
    pub most_common_mood: Mood,
    /// Entries actually averaged (at most the window size)
    pub sample_size: usize,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rolling stats over the most recent entries, not a calendar week.
///
/// Ties for the most common mood go to the lower mood. An empty log
/// yields zero averages and `Mood::Good`.
pub fn weekly_mood_stats(entries: &[MoodEntry]) -> MoodStats {
    let window = &entries[..MOOD_STATS_WINDOW.min(entries.len())];
    if window.is_empty() {
        return MoodStats {
            avg_mood: 0.0,
            avg_energy: 0.0,
            most_common_mood: Mood::Good,
            sample_size: 0,
        };
    }

    let n = window.len() as f64;
    let mood_sum: u32 = window.iter().map(|e| e.mood.value() as u32).sum();
    let energy_sum: u32 = window.iter().map(|e| e.energy as u32).sum();

    let mut most_common_mood = Mood::Good;
    let mut best_count = 0;
    for mood in Mood::all() {
        let count = window.iter().filter(|e| e.mood == *mood).count();
        if count > best_count {
            best_count = count;
            most_common_mood = *mood;
        }
    }

    MoodStats {
        avg_mood: round_one_decimal(mood_sum as f64 / n),
        avg_energy: round_one_decimal(energy_sum as f64 / n),
        most_common_mood,
        sample_size: window.len(),
    }
}

/// Headline task numbers for the stats panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub today_completed: u32,
    /// `weekly_completed` as a rounded percentage of the weekly goal; may exceed 100
    pub weekly_rate: u32,
    pub today_focus: u32,
    pub streak: u32,
}

pub fn task_summary(state: &AppState) -> TaskSummary {
    let total = state.tasks.len();
    let completed = state.tasks.iter().filter(|t| t.completed).count();
    let counters = &state.time_tracking;
    let weekly_goal = state.settings.weekly_task_goal;

    let weekly_rate = if weekly_goal == 0 {
        100
    } else {
        (counters.weekly_completed as f64 / weekly_goal as f64 * 100.0).round() as u32
    };

    TaskSummary {
        total,
        completed,
        active: total - completed,
        today_completed: counters.today_completed,
        weekly_rate,
        today_focus: counters.today_focus,
        streak: counters.streak,
    }
}
