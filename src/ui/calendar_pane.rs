use crate::app::AppState;
use crate::calendar::DayBucket;
use crate::ui::styles::{
    border_style, done_style, hint_style, selected_style, title_style, today_style,
};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

/// Render the month grid and the tasks of the selected day
pub fn render_calendar_pane(f: &mut Frame, state: &AppState, today: NaiveDate, area: Rect) {
    let dark = state.is_dark_mode;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    let buckets = state.calendar_month(today);
    let mut lines = vec![Line::styled(WEEKDAY_HEADER, hint_style())];
    for week in month_weeks(&buckets) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| match cell {
                Some(bucket) => Span::styled(
                    day_cell(bucket),
                    cell_style(bucket, state.calendar.selected, dark),
                ),
                None => Span::raw("    "),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(dark))
            .title(Span::styled(
                format!(" {} ", state.calendar.title()),
                title_style(dark),
            )),
    );
    f.render_widget(grid, chunks[0]);

    let selected = state.calendar.selected;
    let day_tasks = state.tasks_for_date(selected);
    let day_lines: Vec<Line> = if day_tasks.is_empty() {
        vec![Line::styled("No tasks created this day", hint_style())]
    } else {
        day_tasks
            .iter()
            .map(|task| {
                let mark = if task.completed { "[x] " } else { "[ ] " };
                let style = if task.completed {
                    done_style()
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(mark),
                    Span::styled(task.text.clone(), style),
                ])
            })
            .collect()
    };
    let day_list = Paragraph::new(day_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(dark))
            .title(Span::styled(
                format!(" {} ", selected.format("%A, %B %-d")),
                title_style(dark),
            )),
    );
    f.render_widget(day_list, chunks[1]);
}

/// Arrange a month's buckets into Monday-first weeks, padding with blanks
pub fn month_weeks(buckets: &[DayBucket]) -> Vec<Vec<Option<&DayBucket>>> {
    let Some(first) = buckets.first() else {
        return Vec::new();
    };
    let lead = first.date.weekday().num_days_from_monday() as usize;

    let mut cells: Vec<Option<&DayBucket>> = vec![None; lead];
    cells.extend(buckets.iter().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells.chunks(7).map(|week| week.to_vec()).collect()
}

/// Four-column cell: day number plus a marker for task activity
fn day_cell(bucket: &DayBucket) -> String {
    let marker = match (bucket.total, bucket.completed) {
        (0, _) => ' ',
        (total, completed) if completed == total => '✓',
        _ => '•',
    };
    format!(" {:>2}{}", bucket.date.day(), marker)
}

fn cell_style(bucket: &DayBucket, selected: NaiveDate, dark: bool) -> Style {
    if bucket.date == selected {
        selected_style(dark)
    } else if bucket.is_today {
        today_style()
    } else {
        Style::default()
    }
}
