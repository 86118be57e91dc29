use crate::domain::{Mood, Priority};
use ratatui::style::{Color, Modifier, Style};

/// Foreground for body text in the current theme
fn text_color(dark: bool) -> Color {
    if dark {
        Color::White
    } else {
        Color::Black
    }
}

/// Default text style
pub fn default_style(dark: bool) -> Style {
    if dark {
        Style::default().fg(text_color(dark))
    } else {
        Style::default().fg(text_color(dark)).bg(Color::White)
    }
}

/// Selected row highlight style
pub fn selected_style(dark: bool) -> Style {
    let bg = if dark { Color::LightCyan } else { Color::Blue };
    let fg = if dark { Color::Black } else { Color::White };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// Running timer badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Over-estimate warning style
pub fn over_estimate_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(dark: bool) -> Style {
    let fg = if dark { Color::Cyan } else { Color::Blue };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(dark: bool) -> Style {
    let fg = if dark { Color::Gray } else { Color::DarkGray };
    Style::default().fg(fg)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style; complete goals turn green
pub fn gauge_style(complete: bool) -> Style {
    let fg = if complete { Color::Green } else { Color::Cyan };
    Style::default().fg(fg).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Tag badge style
pub fn tag_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Marker colour per priority
pub fn priority_style(priority: Priority) -> Style {
    let fg = match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    };
    Style::default().fg(fg)
}

/// Mood colour from sad (red) to excellent (green)
pub fn mood_style(mood: Mood) -> Style {
    let fg = match mood {
        Mood::VerySad => Color::Red,
        Mood::Okay => Color::LightRed,
        Mood::Good => Color::Yellow,
        Mood::Great => Color::LightGreen,
        Mood::Excellent => Color::Green,
    };
    Style::default().fg(fg)
}

/// Highlight for today's cell in the calendar
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}
