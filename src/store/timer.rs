use crate::app::{ActiveTimer, AppState};
use crate::domain::session_minutes;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A session committed by stopping a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppedTimer {
    pub task_id: Uuid,
    pub minutes: u32,
}

/// What a timer operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started {
        task_id: Uuid,
        /// Timer on another task that had to stop first
        preempted: Option<StoppedTimer>,
    },
    Stopped(StoppedTimer),
}

impl AppState {
    pub fn is_timer_running(&self, id: Uuid) -> bool {
        self.timer.is_some_and(|t| t.task_id == id)
    }

    pub fn running_task_id(&self) -> Option<Uuid> {
        self.timer.map(|t| t.task_id)
    }

    /// Start timing `id`, stopping whatever else is running first.
    ///
    /// Returns `None` when the task does not exist or is already being timed.
    pub fn start_timer(&mut self, id: Uuid, now: DateTime<Local>) -> Option<TimerEvent> {
        if !self.contains_task(id) {
            debug!(task_id = %id, "Start ignored: no such task");
            return None;
        }
        if self.is_timer_running(id) {
            debug!(task_id = %id, "Start ignored: timer already running");
            return None;
        }

        let preempted = match self.running_task_id() {
            Some(other) => self.stop_timer(other, now),
            None => None,
        };

        self.timer = Some(ActiveTimer {
            task_id: id,
            session_start: now,
        });
        info!(task_id = %id, preempted = preempted.is_some(), "Timer started");
        Some(TimerEvent::Started {
            task_id: id,
            preempted,
        })
    }

    /// Stop the timer on `id`, committing the session to the task and to
    /// today's focus total. No-op when `id` is not being timed.
    pub fn stop_timer(&mut self, id: Uuid, now: DateTime<Local>) -> Option<StoppedTimer> {
        let timer = match self.timer {
            Some(timer) if timer.task_id == id => timer,
            _ => {
                debug!(task_id = %id, "Stop ignored: no active timer");
                return None;
            }
        };
        self.timer = None;

        let Some(task) = self.task_mut(id) else {
            warn!(task_id = %id, "Active timer referenced a missing task");
            return None;
        };
        let minutes = task.record_session(timer.session_start, now).minutes;
        self.time_tracking.today_focus = self.time_tracking.today_focus.saturating_add(minutes);

        info!(task_id = %id, minutes, "Timer stopped");
        Some(StoppedTimer { task_id: id, minutes })
    }

    /// Stop if running, else start
    pub fn toggle_timer(&mut self, id: Uuid, now: DateTime<Local>) -> Option<TimerEvent> {
        if self.is_timer_running(id) {
            self.stop_timer(id, now).map(TimerEvent::Stopped)
        } else {
            self.start_timer(id, now)
        }
    }

    /// Tracked minutes for display, including the uncommitted running
    /// session. Read-only; safe to call on every tick.
    pub fn elapsed_display(&self, id: Uuid, now: DateTime<Local>) -> Option<u32> {
        let task = self.task(id)?;
        let running = match self.timer {
            Some(timer) if timer.task_id == id => session_minutes(timer.session_start, now),
            _ => 0,
        };
        Some(task.actual_minutes + running)
    }
}
