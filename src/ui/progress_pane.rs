use crate::app::AppState;
use crate::domain::format_focus;
use crate::report::{progress, task_summary, Progress, ProgressKind};
use crate::ui::styles::{border_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render one gauge per goal plus a summary line
pub fn render_progress_pane(f: &mut Frame, state: &AppState, area: Rect) {
    let dark = state.is_dark_mode;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(dark))
        .title(Span::styled(" Progress ", title_style(dark)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let kinds = ProgressKind::all();
    let mut constraints: Vec<Constraint> = kinds.iter().map(|_| Constraint::Length(2)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (kind, row) in kinds.iter().zip(rows.iter()) {
        let value = progress(state, *kind);
        let gauge = Gauge::default()
            .block(Block::default().title(Span::raw(kind.label())))
            .gauge_style(gauge_style(value.is_complete()))
            .ratio(value.ratio())
            .label(gauge_label(*kind, value));
        f.render_widget(gauge, *row);
    }

    if let Some(footer) = rows.get(kinds.len()) {
        let summary = task_summary(state);
        let line = Line::styled(
            format!(
                "Weekly rate {}%  ·  Streak {}d  ·  {} active",
                summary.weekly_rate, summary.streak, summary.active
            ),
            hint_style(),
        );
        f.render_widget(Paragraph::new(line), *footer);
    }
}

/// Text drawn over a gauge, e.g. "3/10 (30%)" or "1h 5m / 8h 0m"
pub fn gauge_label(kind: ProgressKind, value: Progress) -> String {
    match kind {
        ProgressKind::DailyFocus => format!(
            "{} / {} ({}%)",
            format_focus(value.current),
            format_focus(value.goal),
            value.percent()
        ),
        _ => format!("{}/{} ({}%)", value.current, value.goal, value.percent()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gauge_label_counts() {
        let value = Progress { current: 3, goal: 10 };
        assert_eq!(gauge_label(ProgressKind::DailyTasks, value), "3/10 (30%)");
    }

    #[test]
    fn test_gauge_label_focus_uses_hours() {
        let value = Progress { current: 65, goal: 480 };
        assert_eq!(gauge_label(ProgressKind::DailyFocus, value), "1h 5m / 8h 0m (14%)");
    }
}
