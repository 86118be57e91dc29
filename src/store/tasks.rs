use crate::app::AppState;
use crate::domain::{Category, Priority, Task, TaskFilter};
use crate::error::{HubError, HubResult};
use chrono::{DateTime, Local};
use tracing::{debug, info};
use uuid::Uuid;

/// Projection of `tasks` through `filter`, preserving order
pub fn filtered_view(tasks: &[Task], filter: TaskFilter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            TaskFilter::All => true,
            TaskFilter::Active => !t.completed,
            TaskFilter::Completed => t.completed,
        })
        .collect()
}

impl AppState {
    /// Add a task at the front of the list (most recent first)
    pub fn add_task(
        &mut self,
        text: &str,
        priority: Priority,
        category: Category,
        estimated_minutes: u32,
        now: DateTime<Local>,
    ) -> HubResult<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HubError::EmptyInput);
        }

        let task = Task::new(text.to_string(), priority, category, estimated_minutes, now);
        info!(task_id = %task.id, %priority, %category, "Task added");
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Replace text and optionally priority/category
    pub fn edit_task(
        &mut self,
        id: Uuid,
        new_text: &str,
        new_priority: Option<Priority>,
        new_category: Option<Category>,
        now: DateTime<Local>,
    ) -> HubResult<&Task> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(HubError::EmptyInput);
        }
        let task = self.task_mut(id).ok_or(HubError::NotFound(id))?;

        task.text = new_text.to_string();
        if let Some(priority) = new_priority {
            task.priority = priority;
        }
        if let Some(category) = new_category {
            task.category = category;
        }
        task.edited_at = Some(now);
        info!(task_id = %id, "Task edited");
        Ok(&*task)
    }

    /// Remove a task, committing its running timer first. Missing ids are a no-op.
    pub fn delete_task(&mut self, id: Uuid, now: DateTime<Local>) -> Option<Task> {
        let index = match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => index,
            None => {
                debug!(task_id = %id, "Delete ignored: no such task");
                return None;
            }
        };

        if self.is_timer_running(id) {
            self.stop_timer(id, now);
        }

        let removed = self.tasks.remove(index);
        info!(task_id = %id, "Task deleted");
        Some(removed)
    }

    /// Flip completion and move the completion counters with it.
    /// Returns the new completed state, or `None` for a missing id.
    pub fn toggle_complete(&mut self, id: Uuid, now: DateTime<Local>) -> Option<bool> {
        if !self.contains_task(id) {
            debug!(task_id = %id, "Toggle ignored: no such task");
            return None;
        }

        if self.is_timer_running(id) {
            self.stop_timer(id, now);
        }

        let completed = self.task_mut(id)?.toggle_completed(now);
        let counters = &mut self.time_tracking;
        if completed {
            counters.today_completed += 1;
            counters.weekly_completed += 1;
        } else {
            counters.today_completed = counters.today_completed.saturating_sub(1);
            counters.weekly_completed = counters.weekly_completed.saturating_sub(1);
        }
        info!(task_id = %id, completed, "Task completion toggled");
        Some(completed)
    }

    /// Remove every completed task in one batch. Returns how many went.
    pub fn clear_completed(&mut self, now: DateTime<Local>) -> usize {
        if let Some(timer) = self.timer {
            if self.task(timer.task_id).is_some_and(|t| t.completed) {
                self.stop_timer(timer.task_id, now);
            }
        }

        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            info!(removed, "Cleared completed tasks");
        }
        removed
    }

    /// Tasks visible under the current filter
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        filtered_view(&self.tasks, self.current_filter)
    }

    pub fn has_completed_tasks(&self) -> bool {
        self.tasks.iter().any(|t| t.completed)
    }
}
