use crate::app::AppState;
use crate::domain::{ContextTag, EnergyLevel, Mood};
use crate::report::{weekly_mood_stats, MOOD_STATS_WINDOW};
use crate::ui::styles::{border_style, hint_style, mood_style, selected_style, tag_style, title_style};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the mood draft, today's entry and the weekly statistics
pub fn render_mood_pane(f: &mut Frame, state: &AppState, today: NaiveDate, area: Rect) {
    let dark = state.is_dark_mode;
    let draft = &state.daily_mood;
    let mut lines = Vec::new();

    lines.push(mood_picker_line(draft.mood, dark));
    lines.push(Line::raw(format!(
        "Energy {}/10 {} ({})",
        draft.energy,
        energy_bar(draft.energy),
        EnergyLevel::from_energy(draft.energy)
    )));

    let tags: Vec<Span> = if draft.context_tags.is_empty() {
        vec![Span::styled("no context tags", hint_style())]
    } else {
        draft
            .context_tags
            .iter()
            .map(|t| Span::styled(format!("{} {}  ", t.emoji(), t), tag_style()))
            .collect()
    };
    lines.push(Line::from(tags));
    if !draft.notes.is_empty() {
        lines.push(Line::raw(format!("Notes: {}", draft.notes)));
    }
    lines.push(Line::raw(""));

    match state.entry_for(today) {
        Some(entry) => lines.push(Line::from(vec![
            Span::raw("Today: "),
            Span::styled(format!("{} {}", entry.emoji(), entry.label()), mood_style(entry.mood)),
            Span::styled(format!(" at {}", entry.time_logged), hint_style()),
        ])),
        None => lines.push(Line::styled("Not logged today", hint_style())),
    }

    let recent = state.recent_entries(MOOD_STATS_WINDOW);
    if !recent.is_empty() {
        let stats = weekly_mood_stats(recent);
        lines.push(Line::raw(format!(
            "Avg mood {:.1} · Avg energy {:.1} · Mostly {} {}",
            stats.avg_mood,
            stats.avg_energy,
            stats.most_common_mood.emoji(),
            stats.most_common_mood
        )));
        let history: Vec<Span> = recent
            .iter()
            .rev()
            .map(|e| Span::styled(format!("{} ", e.emoji()), mood_style(e.mood)))
            .collect();
        lines.push(Line::from(history));
    }
    lines.push(Line::styled(
        format!("Streak {} day(s)", state.time_tracking.mood_streak),
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(dark))
                .title(Span::styled(" Mood ", title_style(dark))),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// The five moods with the draft's selection highlighted
fn mood_picker_line(selected: Option<Mood>, dark: bool) -> Line<'static> {
    let spans: Vec<Span> = Mood::all()
        .iter()
        .map(|mood| {
            let text = format!(" {} {} ", mood.value(), mood.emoji());
            if selected == Some(*mood) {
                Span::styled(text, selected_style(dark))
            } else {
                Span::raw(text)
            }
        })
        .collect();
    Line::from(spans)
}

/// Ten-cell bar, e.g. "█████░░░░░" for 5
pub fn energy_bar(energy: u8) -> String {
    let filled = energy.min(10) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Numbered tag choices for the picker
pub fn tag_choices() -> impl Iterator<Item = (usize, ContextTag)> {
    ContextTag::all().iter().copied().enumerate().map(|(i, t)| (i + 1, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_energy_bar() {
        assert_eq!(energy_bar(0), "░░░░░░░░░░");
        assert_eq!(energy_bar(7), "███████░░░");
        assert_eq!(energy_bar(12), "██████████");
    }

    #[test]
    fn test_tag_choices_numbered_from_one() {
        let choices: Vec<_> = tag_choices().collect();
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0], (1, ContextTag::Work));
        assert_eq!(choices[5], (6, ContextTag::Family));
    }

    #[test]
    fn test_mood_picker_highlights_selection() {
        let line = mood_picker_line(Some(Mood::Great), true);
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[3].style, selected_style(true));
        assert_eq!(line.spans[0].style, ratatui::style::Style::default());
    }
}
