use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::DhikrItem;
use crate::tui::theme;
use crate::utils::format::{format_duration_secs, pad_display};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    items: &[DhikrItem],
    focus_idx: usize,
    focused: bool,
    reminder_in: Option<i64>,
) {
    let title = match reminder_in {
        Some(secs) => format!(" Dhikr · reminder in {} ", format_duration_secs(secs)),
        None => " Dhikr ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(title, theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let name_width = area.width.saturating_sub(22) as usize;

    let mut list_items: Vec<ListItem> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let is_focused = focused && i == focus_idx;
        let name_style = if is_focused {
            theme::gold().add_modifier(Modifier::BOLD)
        } else {
            theme::bold()
        };

        let filled = (item.ratio() * 5.0).round() as usize;
        let bar = format!("{}{}", "▓".repeat(filled), "░".repeat(5 - filled.min(5)));
        let color = if item.is_complete() {
            theme::green()
        } else {
            theme::amber()
        };

        list_items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("  {}", pad_display(&item.translation, name_width)), name_style),
            Span::styled(format!(" {} {:>3}/{}", bar, item.count, item.target), color),
        ])));

        if is_focused {
            list_items.push(ListItem::new(Line::from(vec![
                Span::styled("    ", theme::dim()),
                Span::styled(item.arabic.as_str(), theme::gold()),
            ])));
            list_items.push(ListItem::new(Line::from(Span::styled(
                format!("    {}", pad_display(&item.virtue, name_width + 14)),
                theme::dim().add_modifier(Modifier::ITALIC),
            ))));
        }
    }

    let list = List::new(list_items).block(block);
    frame.render_widget(list, area);
}
