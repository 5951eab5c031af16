use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Outcome of the last action, shown in place of the key hints.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub fn render(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        Some(Notice::Error(text)) => Line::from(Span::styled(format!("✗ {}", text), theme::red())),
        Some(Notice::Info(text)) => Line::from(Span::styled(text.as_str(), theme::green())),
        None => {
            let hints = [
                ("[Tab]", " focus  "),
                ("[Enter]", " act  "),
                ("[f/x/e/c]", " fast  "),
                ("[n/p]", " page  "),
                ("[a]", " adhkar  "),
                ("[t]", " theme  "),
                ("[?]", " help  "),
                ("[Esc]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(key, theme::gold()));
                spans.push(Span::styled(label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
