pub mod generator;
pub mod stats;

pub use generator::{generate_summary, write_summary};
pub use stats::{
    progress, task_summary, weekly_mood_stats, MoodStats, Progress, ProgressKind, TaskSummary,
    MOOD_STATS_WINDOW,
};
