use crate::persistence::get_dayboard_dir;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DAILY_TASK_GOAL: u32 = 10;
pub const DEFAULT_WEEKLY_TASK_GOAL: u32 = 50;
pub const DEFAULT_DAILY_FOCUS_GOAL: u32 = 480;
pub const DEFAULT_MOOD_STREAK_GOAL: u32 = 7;

/// Default tracing filter when `DAYBOARD_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// User goals, persisted with the rest of the state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_daily_task_goal")]
    pub daily_task_goal: u32,
    #[serde(default = "default_weekly_task_goal")]
    pub weekly_task_goal: u32,
    /// Minutes of tracked focus per day
    #[serde(default = "default_daily_focus_goal")]
    pub daily_focus_goal: u32,
    /// Days of consecutive mood logging
    #[serde(default = "default_mood_streak_goal")]
    pub mood_streak_goal: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_task_goal: DEFAULT_DAILY_TASK_GOAL,
            weekly_task_goal: DEFAULT_WEEKLY_TASK_GOAL,
            daily_focus_goal: DEFAULT_DAILY_FOCUS_GOAL,
            mood_streak_goal: DEFAULT_MOOD_STREAK_GOAL,
        }
    }
}

fn default_daily_task_goal() -> u32 {
    DEFAULT_DAILY_TASK_GOAL
}

fn default_weekly_task_goal() -> u32 {
    DEFAULT_WEEKLY_TASK_GOAL
}

fn default_daily_focus_goal() -> u32 {
    DEFAULT_DAILY_FOCUS_GOAL
}

fn default_mood_streak_goal() -> u32 {
    DEFAULT_MOOD_STREAK_GOAL
}

/// Process-level configuration resolved from CLI flags and environment
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl RuntimeConfig {
    /// Explicit values win; otherwise the data dir is discovered and the
    /// log filter falls back to `DEFAULT_LOG_FILTER`.
    pub fn resolve(data_dir: Option<PathBuf>, log_filter: Option<String>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => get_dayboard_dir()?,
        };
        Ok(Self {
            data_dir,
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join(crate::persistence::STATE_FILE_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("dayboard.log")
    }
}
