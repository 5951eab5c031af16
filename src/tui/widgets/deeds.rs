use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::DailyChallenge;
use crate::tui::theme;
use crate::utils::format::{pad_display, plural};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    challenge: &DailyChallenge,
    streak: u32,
    focus_idx: usize,
    focused: bool,
) {
    let title = format!(
        " Good Deeds · {}% · streak {} ",
        challenge.progress_percent(),
        plural(streak, "day")
    );
    let block = Block::default()
        .title(Span::styled(title, theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let text_width = area.width.saturating_sub(18) as usize;

    let items: Vec<ListItem> = challenge
        .deeds
        .iter()
        .enumerate()
        .map(|(i, deed)| {
            let done = challenge.is_completed(deed.id);
            let is_focused = focused && i == focus_idx;

            let (icon, icon_style) = if done {
                ("●", theme::green())
            } else {
                ("○", theme::dim())
            };
            let mut text_style = if done {
                theme::dim().add_modifier(Modifier::CROSSED_OUT)
            } else {
                theme::bold()
            };
            if is_focused {
                text_style = theme::gold().add_modifier(Modifier::BOLD);
            }

            ListItem::new(Line::from(vec![
                Span::styled("  ", theme::dim()),
                Span::styled(icon, icon_style),
                Span::styled(" ", theme::dim()),
                Span::styled(pad_display(&deed.text, text_width), text_style),
                Span::styled(format!(" {}", deed.category.as_str()), theme::dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
