use crate::app::AppState;
use crate::domain::Task;
use chrono::{Datelike, Months, NaiveDate};

/// Month being browsed and the day picked within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    /// Always the first day of the shown month
    pub month: NaiveDate,
    pub selected: NaiveDate,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected: today,
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month.checked_add_months(Months::new(1)) {
            self.month = next;
        }
    }

    pub fn prev_month(&mut self) {
        if let Some(prev) = self.month.checked_sub_months(Months::new(1)) {
            self.month = prev;
        }
    }

    /// Pick a day, moving the shown month to contain it
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.month = first_of_month(date);
    }

    pub fn go_to(&mut self, today: NaiveDate) {
        self.select(today);
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}

/// Per-day task counts for the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total: usize,
    pub completed: usize,
    pub is_today: bool,
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Every day of the month containing `month`
pub fn days_in_month(month: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(month);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// Tasks created on `date`, in store order
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.created_on() == date).collect()
}

/// One bucket per day of the month
pub fn month_buckets(tasks: &[Task], month: NaiveDate, today: NaiveDate) -> Vec<DayBucket> {
    days_in_month(month)
        .into_iter()
        .map(|date| {
            let day_tasks = tasks_for_date(tasks, date);
            DayBucket {
                date,
                total: day_tasks.len(),
                completed: day_tasks.iter().filter(|t| t.completed).count(),
                is_today: date == today,
            }
        })
        .collect()
}

impl AppState {
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        tasks_for_date(&self.tasks, date)
    }

    /// Buckets for the month under the calendar cursor
    pub fn calendar_month(&self, today: NaiveDate) -> Vec<DayBucket> {
        month_buckets(&self.tasks, self.calendar.month, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_on(text: &str, y: i32, m: u32, d: u32, h: u32) -> Task {
        let at = Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        Task::new(text.to_string(), Priority::Medium, Category::Work, 0, at)
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 17)).len(), 29);
        assert_eq!(days_in_month(date(2023, 2, 1)).len(), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)).len(), 31);
        assert_eq!(days_in_month(date(2024, 4, 5))[0], date(2024, 4, 1));
    }

    #[test]
    fn test_cursor_navigation_wraps_years() {
        let mut cursor = CalendarCursor::new(date(2024, 12, 20));
        assert_eq!(cursor.month, date(2024, 12, 1));
        cursor.next_month();
        assert_eq!(cursor.month, date(2025, 1, 1));
        cursor.prev_month();
        cursor.prev_month();
        assert_eq!(cursor.month, date(2024, 11, 1));
        assert_eq!(cursor.title(), "November 2024");
        // Selection is not moved by paging
        assert_eq!(cursor.selected, date(2024, 12, 20));
    }

    #[test]
    fn test_cursor_select_moves_month() {
        let mut cursor = CalendarCursor::new(date(2024, 1, 10));
        cursor.select(date(2024, 3, 3));
        assert_eq!(cursor.month, date(2024, 3, 1));
        assert_eq!(cursor.selected, date(2024, 3, 3));
        cursor.go_to(date(2024, 1, 10));
        assert_eq!(cursor.month, date(2024, 1, 1));
    }

    #[test]
    fn test_tasks_for_date_preserves_order() {
        let tasks = vec![
            task_on("b", 2024, 3, 5, 15),
            task_on("other day", 2024, 3, 6, 9),
            task_on("a", 2024, 3, 5, 8),
        ];
        let found: Vec<&str> = tasks_for_date(&tasks, date(2024, 3, 5))
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(found, vec!["b", "a"]);
        assert!(tasks_for_date(&tasks, date(2024, 3, 7)).is_empty());
    }

    #[test]
    fn test_month_buckets_counts() {
        let mut done = task_on("done", 2024, 3, 5, 9);
        done.completed = true;
        let tasks = vec![done, task_on("open", 2024, 3, 5, 10), task_on("april", 2024, 4, 1, 9)];

        let buckets = month_buckets(&tasks, date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(buckets.len(), 31);
        let fifth = &buckets[4];
        assert_eq!(fifth.date, date(2024, 3, 5));
        assert_eq!(fifth.total, 2);
        assert_eq!(fifth.completed, 1);
        assert!(fifth.is_today);
        assert_eq!(buckets.iter().map(|b| b.total).sum::<usize>(), 2);
    }
}
