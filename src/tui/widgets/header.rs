use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::api::HijriLookup;
use crate::models::duas::Dua;
use crate::tui::theme;
use crate::utils::calendar::RamadanStatus;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    today: NaiveDate,
    hijri: &HijriLookup,
    status: &RamadanStatus,
    dua: &Dua,
) {
    let gregorian_str = today.format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  رمضان  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("ramadan companion", theme::gold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(hijri.info.long_form(), theme::amber()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(gregorian_str, theme::dim()),
        Span::styled(format!("  ({})", hijri.source.label()), theme::dim()),
    ]);

    let status_line = Line::from(vec![
        Span::styled(status.headline(), theme::bold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(status.detail(), theme::green()),
    ]);

    let dua_line = Line::from(vec![
        Span::styled(dua.translation, theme::dim().add_modifier(Modifier::ITALIC)),
        Span::styled(format!("  ({})", dua.reference), theme::dim()),
    ]);

    let text = vec![
        title_line,
        date_line,
        status_line,
        Line::from(Span::styled(dua.arabic, theme::gold())),
        dua_line,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
