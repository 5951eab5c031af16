use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};
use rusqlite::Connection;

use crate::api::{HijriLookup, Lookup, Remote};
use crate::config::AppConfig;
use crate::db::repository::{
    reset_all_progress, DeedsRepo, DhikrRepo, FastingRepo, QuranRepo, SettingsRepo,
};
use crate::models::dhikr::next_reminder;
use crate::models::duas::dua_of_the_day;
use crate::models::{
    AdhkarCategory, DailyChallenge, DhikrItem, FastingDay, FastingStatus, Increment,
    QuranProgress, Surah, UserSettings,
};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::statusbar::Notice;
use crate::tui::widgets::{adhkar, deeds, dhikr, fasting, header, quran, statusbar};
use crate::utils::calendar::{ramadan_status, RamadanStatus};
use crate::utils::format::plural;

const UPDATING: &str = "Updating Hijri dates and surah list…";

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Adhkar,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusSection {
    Fasting,
    Quran,
    Deeds,
    Dhikr,
}

impl FocusSection {
    fn next(self) -> Self {
        match self {
            FocusSection::Fasting => FocusSection::Quran,
            FocusSection::Quran => FocusSection::Deeds,
            FocusSection::Deeds => FocusSection::Dhikr,
            FocusSection::Dhikr => FocusSection::Fasting,
        }
    }

    fn prev(self) -> Self {
        match self {
            FocusSection::Fasting => FocusSection::Dhikr,
            FocusSection::Quran => FocusSection::Fasting,
            FocusSection::Deeds => FocusSection::Quran,
            FocusSection::Dhikr => FocusSection::Deeds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    ConfirmReset,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub focus_section: FocusSection,
    pub focus_idx: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub notice: Option<Notice>,
    pub adhkar_category: AdhkarCategory,
    pub adhkar_scroll: u16,

    // Cached state (refreshed on load/action)
    pub today: NaiveDate,
    pub hijri: HijriLookup,
    pub status: RamadanStatus,
    pub season: Vec<HijriLookup>,
    pub fasting: Vec<FastingDay>,
    pub quran: QuranProgress,
    pub surahs: Vec<Surah>,
    pub surah_error: Option<String>,
    pub challenge: DailyChallenge,
    pub streak: u32,
    pub dhikr: Vec<DhikrItem>,
    pub settings: UserSettings,
    pub reminder_in: Option<i64>,
    /// Remote dates and surah list not fetched yet; local values are shown.
    pub remote_pending: bool,
}

impl App {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        let offset = config.calendar.hijri_offset;
        let status = ramadan_status(today, offset);
        let season = status
            .window()
            .dates()
            .into_iter()
            .map(|d| HijriLookup::local(d, offset))
            .collect();
        let challenge = DailyChallenge::generate(today, config.deeds.per_day);

        let mut app = App {
            view: View::Dashboard,
            config,
            focus_section: FocusSection::Fasting,
            focus_idx: 0,
            should_quit: false,
            input_mode: InputMode::Normal,
            notice: None,
            adhkar_category: AdhkarCategory::Morning,
            adhkar_scroll: 0,
            today,
            hijri: HijriLookup::local(today, offset),
            status,
            season,
            fasting: Vec::new(),
            quran: QuranProgress::default(),
            surahs: Vec::new(),
            surah_error: None,
            challenge,
            streak: 0,
            dhikr: Vec::new(),
            settings: UserSettings::default(),
            reminder_in: None,
            remote_pending: true,
        };
        app.focus_idx = app.today_index();
        app
    }

    /// Replace locally computed dates and the surah list with remote (or
    /// cached) values. Never fails; problems are logged and shown inline.
    pub fn fetch_remote(&mut self, conn: &Connection, remote: &Remote) {
        self.remote_pending = false;
        if self.notice == Some(Notice::Info(UPDATING.to_string())) {
            self.notice = None;
        }
        let offset = self.config.calendar.hijri_offset;
        let mut lookup = Lookup::new(conn, remote);
        self.hijri = lookup.hijri(self.today, offset);
        self.season = lookup.season(&self.status.window(), offset);
        match lookup.surahs() {
            Ok(list) => {
                self.surahs = list;
                self.surah_error = None;
            }
            Err(e) => self.surah_error = Some(e.to_string()),
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        let per_day = self.config.deeds.per_day;
        self.fasting = FastingRepo::all(conn)?;
        self.quran = QuranRepo::get_or_default(conn)?;
        self.challenge = DeedsRepo::challenge_for(conn, self.today, per_day)?;
        self.streak = DeedsRepo::streak(conn)?.current(self.today);
        self.dhikr = DhikrRepo::list(conn, self.today)?;
        self.settings = SettingsRepo::get(conn)?;
        theme::set_dark_mode(self.settings.dark_mode);
        self.update_reminder(Local::now().naive_local());
        Ok(())
    }

    pub fn tick(&mut self, conn: &Connection, now: NaiveDateTime) {
        if now.date() != self.today {
            log::info!("Day changed to {}", now.date());
            self.roll_over(now.date());
            if let Err(e) = self.load(conn) {
                self.notice = Some(Notice::Error(e.to_string()));
            }
            self.focus_idx = match self.focus_section {
                FocusSection::Fasting => self.today_index(),
                _ => self.focus_idx.min(self.section_len().saturating_sub(1)),
            };
        }
        self.update_reminder(now);
    }

    fn roll_over(&mut self, today: NaiveDate) {
        let offset = self.config.calendar.hijri_offset;
        self.today = today;
        self.hijri = HijriLookup::local(today, offset);
        let status = ramadan_status(today, offset);
        if status.window() != self.status.window() {
            self.season = status
                .window()
                .dates()
                .into_iter()
                .map(|d| HijriLookup::local(d, offset))
                .collect();
        }
        self.status = status;
    }

    fn update_reminder(&mut self, now: NaiveDateTime) {
        self.reminder_in = if self.settings.dhikr_reminders_enabled {
            let at = next_reminder(now, self.config.dhikr.reminder_hour);
            Some((at - now).num_seconds())
        } else {
            None
        };
    }

    fn today_index(&self) -> usize {
        self.season
            .iter()
            .position(|d| d.date == self.today)
            .unwrap_or(0)
    }

    fn selected_date(&self) -> Option<NaiveDate> {
        self.season.get(self.focus_idx).map(|d| d.date)
    }

    fn section_len(&self) -> usize {
        match self.focus_section {
            FocusSection::Fasting => self.season.len(),
            FocusSection::Quran => 1,
            FocusSection::Deeds => self.challenge.deeds.len(),
            FocusSection::Dhikr => self.dhikr.len(),
        }
    }

    fn focus(&mut self, section: FocusSection) {
        if self.focus_section != section {
            self.focus_section = section;
            self.focus_idx = if section == FocusSection::Fasting {
                self.today_index()
            } else {
                0
            };
        }
    }

    /// Show the outcome of an action in the status bar.
    fn report(&mut self, outcome: Result<String>) {
        self.notice = Some(match outcome {
            Ok(msg) => Notice::Info(msg),
            Err(e) => Notice::Error(e.to_string()),
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        match self.input_mode {
            InputMode::ConfirmReset => self.handle_confirm_reset(key, conn),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, conn),
                View::Adhkar => self.handle_adhkar_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        self.notice = None;

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('a') => {
                self.view = View::Adhkar;
                self.adhkar_scroll = 0;
            }
            KeyCode::Tab => self.focus(self.focus_section.next()),
            KeyCode::BackTab => self.focus(self.focus_section.prev()),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.move_cursor(key.code, conn);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let outcome = match self.focus_section {
                    FocusSection::Fasting => self.cycle_fasting(conn),
                    FocusSection::Quran => self.turn_page(conn, true),
                    FocusSection::Deeds => self.toggle_focused_deed(conn),
                    FocusSection::Dhikr => self.increment_focused_dhikr(conn),
                };
                self.report(outcome);
            }
            // Fasting keys always act on the calendar, switching focus if needed
            KeyCode::Char(c @ ('f' | 'x' | 'e' | 'c')) => {
                self.focus(FocusSection::Fasting);
                let status = match c {
                    'f' => Some(FastingStatus::Fasted),
                    'x' => Some(FastingStatus::Missed),
                    'e' => Some(FastingStatus::Exempt),
                    _ => None,
                };
                let outcome = self.set_fasting(conn, status);
                self.report(outcome);
            }
            KeyCode::Char('n') => {
                let outcome = self.turn_page(conn, true);
                self.report(outcome);
            }
            KeyCode::Char('p') => {
                let outcome = self.turn_page(conn, false);
                self.report(outcome);
            }
            KeyCode::Char('R') => {
                let outcome = DhikrRepo::reset_counts(conn, self.today)
                    .and_then(|_| self.load(conn))
                    .map(|_| "Dhikr counters reset".to_string());
                self.report(outcome);
            }
            KeyCode::Char('t') => {
                let outcome = self.toggle_setting(conn, |s| {
                    s.dark_mode = !s.dark_mode;
                    if s.dark_mode { "Dark mode on" } else { "Dark mode off" }
                });
                self.report(outcome);
            }
            KeyCode::Char('r') => {
                let outcome = self.toggle_setting(conn, |s| {
                    s.dhikr_reminders_enabled = !s.dhikr_reminders_enabled;
                    if s.dhikr_reminders_enabled {
                        "Dhikr reminders on"
                    } else {
                        "Dhikr reminders off"
                    }
                });
                self.report(outcome);
            }
            KeyCode::Char('X') => {
                self.input_mode = InputMode::ConfirmReset;
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, code: KeyCode, conn: &Connection) {
        if self.focus_section == FocusSection::Quran {
            let outcome = match code {
                KeyCode::Right => self.turn_page(conn, true),
                KeyCode::Left => self.turn_page(conn, false),
                KeyCode::Up => self.step_ayah(conn, 1),
                _ => self.step_ayah(conn, -1),
            };
            self.report(outcome);
            return;
        }

        let last = self.section_len().saturating_sub(1);
        let step: isize = match (self.focus_section, code) {
            (FocusSection::Fasting, KeyCode::Up) => -7,
            (FocusSection::Fasting, KeyCode::Down) => 7,
            (FocusSection::Fasting, KeyCode::Left) => -1,
            (FocusSection::Fasting, KeyCode::Right) => 1,
            (_, KeyCode::Up) => -1,
            (_, KeyCode::Down) => 1,
            _ => 0,
        };
        let target = self.focus_idx as isize + step;
        if (0..=last as isize).contains(&target) {
            self.focus_idx = target as usize;
        }
    }

    fn handle_adhkar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') => {
                self.view = View::Dashboard;
            }
            KeyCode::Right | KeyCode::Tab => {
                self.adhkar_category = self.adhkar_category.next();
                self.adhkar_scroll = 0;
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.adhkar_category = self.adhkar_category.prev();
                self.adhkar_scroll = 0;
            }
            KeyCode::Down => self.adhkar_scroll = self.adhkar_scroll.saturating_add(1),
            KeyCode::Up => self.adhkar_scroll = self.adhkar_scroll.saturating_sub(1),
            KeyCode::PageDown => self.adhkar_scroll = self.adhkar_scroll.saturating_add(10),
            KeyCode::PageUp => self.adhkar_scroll = self.adhkar_scroll.saturating_sub(10),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Dashboard;
        }
    }

    fn handle_confirm_reset(&mut self, key: KeyEvent, conn: &Connection) {
        self.input_mode = InputMode::Normal;
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            let outcome = reset_all_progress(conn)
                .and_then(|_| self.load(conn))
                .map(|_| "All progress erased".to_string());
            self.report(outcome);
        } else {
            self.notice = Some(Notice::Info("Reset cancelled".to_string()));
        }
    }

    // ─── Actions ─────────────────────────────────────────────────────────────

    fn set_fasting(&mut self, conn: &Connection, status: Option<FastingStatus>) -> Result<String> {
        let date = self
            .selected_date()
            .ok_or_else(|| anyhow!("No day selected"))?;
        let msg = match status {
            Some(status) => {
                FastingRepo::mark(conn, date, status, None)?;
                format!("{} {} marked as {}", status.icon(), date.format("%b %-d"), status)
            }
            None => {
                FastingRepo::remove(conn, date)?;
                format!("Cleared {}", date.format("%b %-d"))
            }
        };
        self.load(conn)?;
        Ok(msg)
    }

    /// Not recorded → fasted → missed → exempt → not recorded.
    fn cycle_fasting(&mut self, conn: &Connection) -> Result<String> {
        let date = self
            .selected_date()
            .ok_or_else(|| anyhow!("No day selected"))?;
        let next = match FastingRepo::get(conn, date)?.map(|d| d.status) {
            None => Some(FastingStatus::Fasted),
            Some(FastingStatus::Fasted) => Some(FastingStatus::Missed),
            Some(FastingStatus::Missed) => Some(FastingStatus::Exempt),
            Some(FastingStatus::Exempt) => None,
        };
        self.set_fasting(conn, next)
    }

    fn turn_page(&mut self, conn: &Connection, forward: bool) -> Result<String> {
        let moved = if forward {
            self.quran.next_page()
        } else {
            self.quran.prev_page()
        };
        if !moved {
            return Ok(format!("Already on page {}", self.quran.page));
        }
        QuranRepo::save(conn, &self.quran)?;
        Ok(format!("Page {} · Juz {}", self.quran.page, self.quran.juz))
    }

    fn step_ayah(&mut self, conn: &Connection, delta: i32) -> Result<String> {
        let mut progress = self.quran.clone();
        progress.ayah = progress.ayah.saturating_add_signed(delta);
        progress.last_updated = chrono::Utc::now();
        let progress = progress.clamped().bounded_by(&self.surahs);
        QuranRepo::save(conn, &progress)?;
        self.quran = progress;
        Ok(format!("Surah {} · Ayah {}", self.quran.surah, self.quran.ayah))
    }

    fn toggle_focused_deed(&mut self, conn: &Connection) -> Result<String> {
        let deed = self
            .challenge
            .deeds
            .get(self.focus_idx)
            .cloned()
            .ok_or_else(|| anyhow!("No deed selected"))?;
        let (challenge, done) =
            DeedsRepo::toggle(conn, deed.id, self.today, self.config.deeds.per_day)?;
        self.load(conn)?;
        Ok(if challenge.all_done() {
            format!("All deeds done today! Streak: {}", plural(self.streak, "day"))
        } else if done {
            format!("✓ {}", deed.text)
        } else {
            format!("Unmarked: {}", deed.text)
        })
    }

    fn increment_focused_dhikr(&mut self, conn: &Connection) -> Result<String> {
        let id = self
            .dhikr
            .get(self.focus_idx)
            .map(|d| d.id)
            .ok_or_else(|| anyhow!("No dhikr selected"))?;
        let (item, outcome) = DhikrRepo::increment(conn, id, self.today)?;
        if let Some(slot) = self.dhikr.iter_mut().find(|d| d.id == id) {
            *slot = item.clone();
        }
        Ok(match outcome {
            Increment::Counted(n) => format!("{} · {}/{}", item.translation, n, item.target),
            Increment::Completed => format!("Target reached: {} ×{}", item.translation, item.target),
            Increment::AlreadyComplete => format!("{} is already complete", item.translation),
        })
    }

    fn toggle_setting(
        &mut self,
        conn: &Connection,
        change: impl FnOnce(&mut UserSettings) -> &'static str,
    ) -> Result<String> {
        let mut settings = self.settings.clone();
        let msg = change(&mut settings);
        SettingsRepo::save(conn, &settings)?;
        self.settings = settings;
        theme::set_dark_mode(self.settings.dark_mode);
        self.update_reminder(Local::now().naive_local());
        Ok(msg.to_string())
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Adhkar => {
                frame.render_widget(Block::default().style(theme::base()), frame.area());
                adhkar::render(frame, frame.area(), self.adhkar_category, self.adhkar_scroll);
            }
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode == InputMode::ConfirmReset {
            self.draw_confirm_reset(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            self.today,
            &self.hijri,
            &self.status,
            dua_of_the_day(self.today),
        );
        statusbar::render(frame, outer_chunks[2], self.notice.as_ref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer_chunks[1]);

        let window = self.status.window();
        let calendar_rows = (window.leading_blanks() + window.len()).div_ceil(7) as u16;

        // Left column: fasting calendar + Quran
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(calendar_rows + 6), Constraint::Min(0)])
            .split(columns[0]);

        fasting::render(
            frame,
            left_chunks[0],
            &window,
            &self.season,
            &self.fasting,
            self.today,
            self.focus_idx,
            self.focus_section == FocusSection::Fasting,
        );

        let pace = self
            .status
            .reading_days_left()
            .and_then(|d| self.quran.daily_pace(d));
        quran::render(
            frame,
            left_chunks[1],
            &self.quran,
            &self.surahs,
            self.surah_error.as_deref(),
            pace,
            self.focus_section == FocusSection::Quran,
        );

        // Right column: good deeds + dhikr
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.challenge.deeds.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        deeds::render(
            frame,
            right_chunks[0],
            &self.challenge,
            self.streak,
            self.focus_idx,
            self.focus_section == FocusSection::Deeds,
        );
        dhikr::render(
            frame,
            right_chunks[1],
            &self.dhikr,
            self.focus_idx,
            self.focus_section == FocusSection::Dhikr,
            self.reminder_in,
        );
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 6,
            width: area.width / 2,
            height: (area.height * 2 / 3).max(10),
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[Tab]", "Switch focus section"),
            ("[↑ ↓ ← →]", "Move within the section"),
            ("[Enter]", "Cycle fast · next page · toggle deed · count dhikr"),
            ("[f] [x] [e]", "Mark day fasted / missed / exempt"),
            ("[c]", "Clear the selected day"),
            ("[n] [p]", "Next / previous Quran page"),
            ("[R]", "Reset dhikr counters"),
            ("[a]", "Adhkar reader"),
            ("[t]", "Toggle dark mode"),
            ("[r]", "Toggle dhikr reminder"),
            ("[X]", "Reset all progress"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<13}", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_confirm_reset(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(3),
            width: area.width / 2,
            height: 6,
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Erase fasting, Quran, deeds and dhikr progress?",
                theme::bold(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [y]", theme::red()),
                Span::styled(" erase  ·  ", theme::dim()),
                Span::styled("[any key]", theme::gold()),
                Span::styled(" cancel", theme::dim()),
            ]),
        ];

        let block = Block::default()
            .title(Span::styled(" Reset Progress ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::red())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// Run the TUI event loop. The first frame uses locally computed dates;
/// remote values replace them once fetched.
pub fn run(conn: Connection, config: AppConfig, remote: Remote) -> Result<()> {
    let mut app = App::new(config, Local::now().date_naive());
    app.load(&conn)?;
    if remote.is_enabled() {
        app.notice = Some(Notice::Info(UPDATING.to_string()));
    }

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &conn, &remote);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    conn: &Connection,
    remote: &Remote,
) -> Result<()> {
    let events = EventHandler::new(1000);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.remote_pending {
            app.fetch_remote(conn, remote);
            continue;
        }

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, conn);
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Resize => {}
            Event::Tick(now) => app.tick(conn, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::fake::FakeTransport;
    use crate::config::ApiConfig;
    use crate::db::migrations::run_migrations;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn setup() -> (Connection, App) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let mut app = App::new(AppConfig::default(), today);
        app.load(&conn).unwrap();
        (conn, app)
    }

    fn press(app: &mut App, conn: &Connection, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), conn);
    }

    #[test]
    fn test_starts_on_today_in_calendar() {
        let (_conn, app) = setup();
        assert_eq!(app.focus_section, FocusSection::Fasting);
        assert_eq!(app.selected_date(), Some(app.today));
        assert!(app.hijri.info.is_ramadan());
    }

    #[test]
    fn test_mark_fast_with_shortcut() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('x'));
        let stored = FastingRepo::get(&conn, app.today).unwrap().unwrap();
        assert_eq!(stored.status, FastingStatus::Missed);
        assert_eq!(app.fasting.len(), 1);

        press(&mut app, &conn, KeyCode::Char('c'));
        assert!(FastingRepo::get(&conn, app.today).unwrap().is_none());
    }

    #[test]
    fn test_enter_cycles_fasting_status() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Left);
        let date = app.selected_date().unwrap();

        let mut seen = Vec::new();
        for _ in 0..4 {
            press(&mut app, &conn, KeyCode::Enter);
            seen.push(FastingRepo::get(&conn, date).unwrap().map(|d| d.status));
        }
        assert_eq!(
            seen,
            vec![
                Some(FastingStatus::Fasted),
                Some(FastingStatus::Missed),
                Some(FastingStatus::Exempt),
                None
            ]
        );
    }

    #[test]
    fn test_calendar_cursor_stays_in_season() {
        let (conn, mut app) = setup();
        for _ in 0..10 {
            press(&mut app, &conn, KeyCode::Up);
        }
        assert_eq!(app.focus_idx, 4);
        for _ in 0..10 {
            press(&mut app, &conn, KeyCode::Down);
        }
        assert!(app.focus_idx < app.season.len());
    }

    #[test]
    fn test_toggle_deed_twice() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Tab);
        press(&mut app, &conn, KeyCode::Tab);
        assert_eq!(app.focus_section, FocusSection::Deeds);

        let first = app.challenge.deeds[0].id;
        press(&mut app, &conn, KeyCode::Enter);
        assert!(app.challenge.is_completed(first));
        press(&mut app, &conn, KeyCode::Enter);
        assert!(app.challenge.completed.is_empty());
    }

    #[test]
    fn test_dhikr_enter_counts() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::BackTab);
        assert_eq!(app.focus_section, FocusSection::Dhikr);
        press(&mut app, &conn, KeyCode::Enter);
        press(&mut app, &conn, KeyCode::Enter);
        assert_eq!(app.dhikr[0].count, 2);
        assert_eq!(DhikrRepo::list(&conn, app.today).unwrap()[0].count, 2);

        press(&mut app, &conn, KeyCode::Char('R'));
        assert_eq!(app.dhikr[0].count, 0);
    }

    #[test]
    fn test_quran_page_keys() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('n'));
        press(&mut app, &conn, KeyCode::Char('n'));
        press(&mut app, &conn, KeyCode::Char('p'));
        assert_eq!(QuranRepo::get_or_default(&conn).unwrap().page, 2);

        press(&mut app, &conn, KeyCode::Char('p'));
        press(&mut app, &conn, KeyCode::Char('p'));
        assert_eq!(app.quran.page, 1);
        assert_eq!(app.notice, Some(Notice::Info("Already on page 1".to_string())));
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('f'));
        press(&mut app, &conn, KeyCode::Char('t'));

        press(&mut app, &conn, KeyCode::Char('X'));
        press(&mut app, &conn, KeyCode::Char('n'));
        assert_eq!(app.fasting.len(), 1);

        press(&mut app, &conn, KeyCode::Char('X'));
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        press(&mut app, &conn, KeyCode::Char('y'));
        assert!(app.fasting.is_empty());
        assert!(FastingRepo::all(&conn).unwrap().is_empty());
        assert!(SettingsRepo::get(&conn).unwrap().dark_mode);
    }

    #[test]
    fn test_adhkar_view_navigation() {
        let (conn, mut app) = setup();
        press(&mut app, &conn, KeyCode::Char('a'));
        assert_eq!(app.view, View::Adhkar);
        press(&mut app, &conn, KeyCode::Right);
        assert_eq!(app.adhkar_category, AdhkarCategory::Evening);
        press(&mut app, &conn, KeyCode::Down);
        assert_eq!(app.adhkar_scroll, 1);
        press(&mut app, &conn, KeyCode::Left);
        assert_eq!(app.adhkar_category, AdhkarCategory::Morning);
        assert_eq!(app.adhkar_scroll, 0);
        press(&mut app, &conn, KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_rolls_over_to_new_day() {
        let (conn, mut app) = setup();
        let tomorrow = app.today.succ_opt().unwrap();
        app.tick(&conn, tomorrow.and_hms_opt(0, 0, 1).unwrap());
        assert_eq!(app.today, tomorrow);
        assert!(app.challenge.is_for(tomorrow));
        assert_eq!(app.hijri.info.day, 6);
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_first_frame_uses_local_dates() {
        let (conn, mut app) = setup();
        assert!(app.remote_pending);
        app.notice = Some(Notice::Info(UPDATING.to_string()));

        let screen = screen_text(&app);
        assert!(screen.contains("Ramadan 1446 AH"), "{}", screen);
        assert!(screen.contains("(offline)"));
        assert!(screen.contains("Updating Hijri dates"));

        let remote = Remote::new(Box::new(FakeTransport::default()), &ApiConfig::default());
        app.fetch_remote(&conn, &remote);
        assert!(!app.remote_pending);
        assert_eq!(app.notice, None);
        assert_eq!(app.surah_error.as_deref(), Some("Failed to load surah list"));
        assert_eq!(app.season.len(), app.status.window().len() as usize);
    }

    #[test]
    fn test_rollover_puts_cursor_on_new_day() {
        let (conn, mut app) = setup();
        app.focus_idx = 500;
        let tomorrow = app.today.succ_opt().unwrap();
        app.tick(&conn, tomorrow.and_hms_opt(0, 0, 1).unwrap());
        assert_eq!(app.selected_date(), Some(tomorrow));

        app.focus(FocusSection::Deeds);
        app.focus_idx = 500;
        let next = tomorrow.succ_opt().unwrap();
        app.tick(&conn, next.and_hms_opt(0, 0, 1).unwrap());
        assert!(app.focus_idx < app.challenge.deeds.len());
    }

    #[test]
    fn test_reminder_countdown() {
        let (conn, mut app) = setup();
        let now = app.today.and_hms_opt(15, 0, 0).unwrap();
        app.tick(&conn, now);
        assert_eq!(app.reminder_in, Some(3600));

        press(&mut app, &conn, KeyCode::Char('r'));
        assert!(!app.settings.dhikr_reminders_enabled);
        app.tick(&conn, now);
        assert_eq!(app.reminder_in, None);
    }
}
