use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::quran::{juz_name, TOTAL_JUZ, TOTAL_PAGES, TOTAL_SURAHS};
use crate::models::{QuranProgress, Surah};
use crate::tui::theme;
use crate::utils::format::format_pages;

fn bar_line(label: &str, value: u32, total: u32, pct: u32, width: usize, extra: String) -> Line<'static> {
    let ratio = (value as f64 / total as f64).min(1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    let bar = format!("{}{}", "▓".repeat(filled), "░".repeat(empty));
    let style = if pct >= 100 { theme::green() } else { theme::amber() };

    Line::from(vec![
        Span::styled(format!("  {:<6}", label), theme::bold()),
        Span::styled(format!("{:>3}/{:<3} ", value, total), theme::dim()),
        Span::styled(bar, style),
        Span::styled(format!(" {:>3}%", pct), style),
        Span::styled(extra, theme::dim()),
    ])
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    progress: &QuranProgress,
    surahs: &[Surah],
    surah_error: Option<&str>,
    pace: Option<f64>,
    focused: bool,
) {
    let block = Block::default()
        .title(Span::styled(" Quran ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let bar_width = (area.width.saturating_sub(30) as usize).clamp(4, 20);

    let surah_label = surahs
        .iter()
        .find(|s| s.number == progress.surah)
        .map(|s| format!("  {}", s.english_name))
        .unwrap_or_default();

    let mut lines = vec![
        bar_line(
            "Juz",
            progress.juz,
            TOTAL_JUZ,
            progress.juz_percent(),
            bar_width,
            format!("  {}", juz_name(progress.juz)),
        ),
        bar_line(
            "Page",
            progress.page,
            TOTAL_PAGES,
            progress.page_percent(),
            bar_width,
            String::new(),
        ),
        bar_line(
            "Surah",
            progress.surah,
            TOTAL_SURAHS,
            progress.surah_percent(),
            bar_width,
            surah_label,
        ),
        Line::from(vec![
            Span::styled(format!("  {:<6}", "Ayah"), theme::bold()),
            Span::styled(format!("{:>3}", progress.ayah), theme::dim()),
        ]),
    ];

    if let Some(err) = surah_error {
        lines.push(Line::from(Span::styled(format!("  {}", err), theme::red())));
    }

    let pace_text = match pace {
        _ if progress.pages_remaining() == 0 => "  Khatm complete, masha'Allah".to_string(),
        Some(p) => format!(
            "  {} pages left · {} a day to finish",
            progress.pages_remaining(),
            format_pages((p * 10.0).ceil() / 10.0)
        ),
        None => format!("  {} pages left", progress.pages_remaining()),
    };
    lines.push(Line::from(Span::styled(
        pace_text,
        theme::dim().add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
