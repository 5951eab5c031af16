use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::api::HijriLookup;
use crate::models::{FastingDay, FastingStatus, FastingSummary};
use crate::tui::theme;
use crate::utils::calendar::RamadanWindow;

const CELL_WIDTH: usize = 5;

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    area: Rect,
    window: &RamadanWindow,
    season: &[HijriLookup],
    records: &[FastingDay],
    today: NaiveDate,
    cursor: usize,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Fasting · Ramadan {} ", window.hijri_year),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let status_of = |date: NaiveDate| {
        let key = date.format("%Y-%m-%d").to_string();
        records.iter().find(|r| r.date == key).map(|r| r.status)
    };

    let mut lines = vec![Line::from(Span::styled(
        "  Su   Mo   Tu   We   Th   Fr   Sa",
        theme::dim(),
    ))];

    let mut row = vec![Span::raw("  ")];
    let mut column = window.leading_blanks() as usize;
    row.push(Span::raw(" ".repeat(column * CELL_WIDTH)));

    for (i, lookup) in season.iter().enumerate() {
        let status = status_of(lookup.date);
        let icon = status.map(|s| s.icon()).unwrap_or(" ");
        let mut style = match status {
            Some(FastingStatus::Fasted) => theme::green(),
            Some(FastingStatus::Missed) => theme::red(),
            Some(FastingStatus::Exempt) => theme::amber(),
            None => theme::dim(),
        };
        if lookup.date == today {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if focused && i == cursor {
            style = style.patch(theme::selected());
        }
        row.push(Span::styled(format!("{:>2}{} ", lookup.info.day, icon), style));
        row.push(Span::raw(" "));

        column += 1;
        if column % 7 == 0 {
            lines.push(Line::from(std::mem::take(&mut row)));
            row.push(Span::raw("  "));
        }
    }
    if row.len() > 1 {
        lines.push(Line::from(row));
    }

    let in_season: Vec<FastingDay> = records
        .iter()
        .filter(|r| r.naive_date().is_some_and(|d| window.contains(d)))
        .cloned()
        .collect();
    let summary = FastingSummary::from_days(&in_season);

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("  ✓ {}  ", summary.fasted), theme::green()),
        Span::styled(format!("✗ {}  ", summary.missed), theme::red()),
        Span::styled(format!("– {}  ", summary.exempt), theme::amber()),
        Span::styled(summary.makeup_label(), theme::dim()),
    ]));

    if let Some(selected) = season.get(cursor) {
        let label = match status_of(selected.date) {
            Some(status) => status.as_str().to_string(),
            None => "not recorded".to_string(),
        };
        let notes = records
            .iter()
            .find(|r| r.naive_date() == Some(selected.date))
            .and_then(|r| r.notes.clone())
            .map(|n| format!(" · {}", n))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!(
                "  {} · {} {} · {}{}",
                selected.date.format("%a %b %-d"),
                selected.info.day,
                selected.info.month_name,
                label,
                notes
            ),
            if focused { theme::gold() } else { theme::dim() },
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
