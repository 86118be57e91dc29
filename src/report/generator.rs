use crate::app::AppState;
use crate::domain::{header_line, EnergyLevel, Task};
use crate::report::stats::{progress, task_summary, weekly_mood_stats, ProgressKind, MOOD_STATS_WINDOW};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Format minutes as "Xh Ym" or "Xm" for display
fn format_duration(total_mins: u32) -> String {
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn task_line(report: &mut String, state: &AppState, task: &Task, now: DateTime<Local>) {
    let marker = if task.completed {
        "x"
    } else if state.is_timer_running(task.id) {
        "▶"
    } else {
        " "
    };
    let elapsed = state.elapsed_display(task.id, now).unwrap_or(task.actual_minutes);

    report.push_str(&format!(
        "- [{}] **{}** ({}, {})\n",
        marker, task.text, task.priority, task.category
    ));
    if task.has_estimate() {
        let ratio = elapsed as f64 / task.estimated_minutes as f64 * 100.0;
        report.push_str(&format!(
            "  - Time: {} / {} estimated ({})\n",
            format_duration(elapsed),
            format_duration(task.estimated_minutes),
            format_percent(ratio)
        ));
    } else if elapsed > 0 {
        report.push_str(&format!("  - Time: {}\n", format_duration(elapsed)));
    }
    if !task.timer_sessions.is_empty() {
        report.push_str(&format!("  - Sessions: {}\n", task.timer_sessions.len()));
    }
}

/// Render the daily summary as Markdown
pub fn generate_summary(state: &AppState, now: DateTime<Local>) -> String {
    let today = now.date_naive();
    let summary = task_summary(state);
    let mut report = String::new();

    report.push_str(&format!("# Daily Summary - {}\n\n", today));
    report.push_str(&format!("_{}_\n\n", header_line(now)));

    // Progress rings
    report.push_str("## Progress\n\n");
    for kind in ProgressKind::all() {
        let ring = progress(state, *kind);
        let done = if ring.is_complete() { " ✓" } else { "" };
        let values = match kind {
            ProgressKind::DailyFocus => format!(
                "{} / {}",
                format_duration(ring.current),
                format_duration(ring.goal)
            ),
            _ => format!("{} / {}", ring.current, ring.goal),
        };
        report.push_str(&format!(
            "- **{}:** {} ({}%){}\n",
            kind.label(),
            values,
            ring.percent(),
            done
        ));
    }
    report.push('\n');

    report.push_str("## Tasks\n\n");
    report.push_str(&format!(
        "- **Total Tasks:** {} (Active: {}, Completed: {})\n",
        summary.total, summary.active, summary.completed
    ));
    report.push_str(&format!("- **Completed Today:** {}\n", summary.today_completed));
    report.push_str(&format!("- **Weekly Rate:** {}%\n", summary.weekly_rate));
    report.push_str(&format!(
        "- **Focus Time:** {}\n",
        crate::domain::format_focus(summary.today_focus)
    ));
    report.push_str(&format!("- **Streak:** {} days\n\n", summary.streak));

    let (done, active): (Vec<&Task>, Vec<&Task>) = state.tasks.iter().partition(|t| t.completed);
    if !active.is_empty() {
        report.push_str("### Active Tasks\n\n");
        for task in active {
            task_line(&mut report, state, task, now);
        }
        report.push('\n');
    }
    if !done.is_empty() {
        report.push_str("### Completed Tasks\n\n");
        for task in done {
            task_line(&mut report, state, task, now);
        }
        report.push('\n');
    }

    // Mood
    report.push_str("## Mood\n\n");
    match state.entry_for(today) {
        Some(entry) => report.push_str(&format!(
            "- **Today:** {} {} (energy {}/10)\n",
            entry.emoji(),
            entry.label(),
            entry.energy
        )),
        None => report.push_str("- **Today:** not logged yet\n"),
    }

    let stats = weekly_mood_stats(&state.mood_entries);
    if stats.sample_size > 0 {
        report.push_str(&format!("- **Average Mood:** {:.1} / 5\n", stats.avg_mood));
        report.push_str(&format!("- **Average Energy:** {:.1} / 10\n", stats.avg_energy));
        report.push_str(&format!(
            "- **Most Common:** {} {}\n",
            stats.most_common_mood.emoji(),
            stats.most_common_mood.label()
        ));
    }
    report.push_str(&format!(
        "- **Mood Streak:** {} days\n\n",
        state.time_tracking.mood_streak
    ));

    let recent = state.recent_entries(MOOD_STATS_WINDOW);
    if !recent.is_empty() {
        report.push_str("### Recent Moods\n\n");
        for entry in recent {
            let tags: Vec<&str> = entry.context_tags.iter().map(|t| t.label()).collect();
            let tags_str = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            report.push_str(&format!(
                "- {} {} {} {}, energy {} ({}){}\n",
                entry.date,
                entry.time_logged,
                entry.emoji(),
                entry.label(),
                entry.energy,
                EnergyLevel::from_energy(entry.energy),
                tags_str
            ));
            if !entry.notes.is_empty() {
                report.push_str(&format!("  > {}\n", entry.notes));
            }
        }
        report.push('\n');
    }

    report
}

/// Write the summary to `output`, or to `report-YYYY-MM-DD.md` in `data_dir`
pub fn write_summary(
    state: &AppState,
    now: DateTime<Local>,
    data_dir: &Path,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let output = match output {
        Some(path) => path,
        None => {
            crate::persistence::ensure_dir(data_dir)?;
            data_dir.join(format!("report-{}.md", now.date_naive()))
        }
    };

    fs::write(&output, generate_summary(state, now))
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    Ok(output)
}
