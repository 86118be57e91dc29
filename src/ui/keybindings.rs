use crate::domain::ViewMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hint text for the current view
pub fn hints(view: ViewMode) -> Vec<&'static str> {
    match view {
        ViewMode::Dashboard => vec![
            " ↑/↓ select   ",
            "Enter timer   ",
            "d done   ",
            "x delete   ",
            "a add   ",
            "e edit   ",
            "f filter   ",
            "C clear   ",
            "1-5 mood   ",
            "+/- energy   ",
            "g tags   ",
            "n notes   ",
            "L log   ",
            "m re-edit   ",
            "t theme   ",
            "v calendar   ",
            "q quit",
        ],
        ViewMode::Calendar => vec![
            " ←/→ day   ",
            "↑/↓ week   ",
            "[ / ] month   ",
            "T today   ",
            "v dashboard   ",
            "t theme   ",
            "q quit",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, view: ViewMode, area: Rect) {
    let spans: Vec<Span> = hints(view).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
