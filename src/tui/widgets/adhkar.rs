use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::adhkar::adhkar_for;
use crate::models::AdhkarCategory;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, category: AdhkarCategory, scroll: u16) {
    let mut tabs = vec![Span::styled(" ", theme::dim())];
    for c in AdhkarCategory::all() {
        let style = if c == category {
            theme::gold().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            theme::dim()
        };
        tabs.push(Span::styled(format!(" {} ", c.title()), style));
    }

    let block = Block::default()
        .title(Line::from(tabs))
        .title_bottom(Line::from(Span::styled(
            " [←/→] category  [↑/↓] scroll  [Esc] back ",
            theme::dim(),
        )))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold())
        .style(theme::surface());

    let mut lines = Vec::new();
    for (i, entry) in adhkar_for(category).iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}.", i + 1),
            theme::gold(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.arabic),
            theme::bold(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.translation),
            theme::base(),
        )));
        let mut meta = vec![Span::styled(format!("  {}", entry.reference), theme::dim())];
        if let Some(label) = entry.repeat_label() {
            meta.push(Span::styled(format!("  ·  {}", label), theme::amber()));
        }
        lines.push(Line::from(meta));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
