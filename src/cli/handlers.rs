use anyhow::{anyhow, Context, Result};
use chrono::{Duration, Local, NaiveDate};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::api::{Lookup, Remote};
use crate::cli::args::{DeedsCommands, DhikrCommands, FastCommands, QuranCommands, SettingsCommands};
use crate::config::AppConfig;
use crate::db::repository::{
    reset_all_progress, DeedsRepo, DhikrRepo, FastingRepo, QuranRepo, SettingsRepo,
};
use crate::models::adhkar::adhkar_for;
use crate::models::duas::dua_of_the_day;
use crate::models::quran::{juz_name, TOTAL_PAGES};
use crate::models::settings::parse_switch;
use crate::models::{
    AdhkarCategory, FastingDay, FastingStatus, FastingSummary, Increment, QuranProgress,
    SettingKey,
};
use crate::utils::calendar::ramadan_status;
use crate::utils::format::{format_pages, pad_display, plural, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ─── Today ───────────────────────────────────────────────────────────────────

pub fn handle_today(conn: &Connection, config: &AppConfig, remote: &Remote) -> Result<()> {
    let today = today();
    let offset = config.calendar.hijri_offset;
    let hijri = Lookup::new(conn, remote).hijri(today, offset);
    let status = ramadan_status(today, offset);

    println!();
    print_colored!(GOLD, "  {}", hijri.info.long_form());
    println_colored!(DIM, "  ({})", hijri.source.label());
    println_colored!(DIM, "  {}", today.format("%A, %B %-d, %Y"));
    println!();
    println_colored!(BOLD, "  {}", status.headline());
    println!("  {}", status.detail());

    let dua = dua_of_the_day(today);
    println!();
    println_colored!(GOLD, "  Dua of the day");
    println!("  {}", dua.arabic);
    println!("  {}", dua.translation);
    println_colored!(DIM, "  {}", dua.reference);
    println!();
    Ok(())
}

// ─── Fasting ─────────────────────────────────────────────────────────────────

pub fn handle_fast(
    conn: &Connection,
    config: &AppConfig,
    remote: &Remote,
    action: &FastCommands,
) -> Result<()> {
    match action {
        FastCommands::Mark {
            date,
            status,
            notes,
        } => {
            let date = parse_date(date, today())?;
            let status = FastingStatus::from_str(status)?;
            FastingRepo::mark(conn, date, status, notes.clone())?;
            let color = match status {
                FastingStatus::Fasted => GREEN,
                FastingStatus::Missed => RED,
                FastingStatus::Exempt => AMBER,
            };
            println_colored!(color, "  {} {} marked as {}", status.icon(), date, status);
        }
        FastCommands::Clear { date } => {
            let date = parse_date(date, today())?;
            if FastingRepo::remove(conn, date)? {
                println_colored!(DIM, "  Cleared {}", date);
            } else {
                println_colored!(DIM, "  Nothing recorded for {}", date);
            }
        }
        FastCommands::List => {
            let days = FastingRepo::all(conn)?;
            println!();
            if days.is_empty() {
                println_colored!(DIM, "  No fasts recorded yet");
            }
            for day in &days {
                print_fasting_day(day);
            }
            print_summary(&FastingSummary::from_days(&days));
        }
        FastCommands::Missed => {
            let missed = FastingRepo::missed(conn)?;
            println!();
            if missed.is_empty() {
                println_colored!(GREEN, "  ✓ No missed fasts");
            } else {
                println_colored!(AMBER, "  {} to make up", plural(missed.len() as u32, "fast"));
                println!();
                for day in &missed {
                    print_fasting_day(day);
                }
            }
            println!();
        }
        FastCommands::Calendar => handle_fast_calendar(conn, config, remote)?,
    }
    Ok(())
}

fn print_fasting_day(day: &FastingDay) {
    let color = match day.status {
        FastingStatus::Fasted => GREEN,
        FastingStatus::Missed => RED,
        FastingStatus::Exempt => AMBER,
    };
    print_colored!(color, "  {} {}  {:<7}", day.status.icon(), day.date, day.status);
    match &day.notes {
        Some(notes) => println_colored!(DIM, "  {}", notes),
        None => println!(),
    }
}

fn print_summary(summary: &FastingSummary) {
    println!();
    println!(
        "  Tracked {}  ·  fasted {}  ·  exempt {}",
        summary.tracked, summary.fasted, summary.exempt
    );
    if summary.missed == 0 {
        println_colored!(GREEN, "  {}", summary.makeup_label());
    } else {
        println_colored!(AMBER, "  {}", summary.makeup_label());
    }
    println!();
}

fn handle_fast_calendar(conn: &Connection, config: &AppConfig, remote: &Remote) -> Result<()> {
    let today = today();
    let offset = config.calendar.hijri_offset;
    let window = ramadan_status(today, offset).window();
    let days = Lookup::new(conn, remote).season(&window, offset);
    let records = FastingRepo::all(conn)?;

    println!();
    println_colored!(
        GOLD,
        "  Ramadan {} AH  ({} – {})",
        window.hijri_year,
        window.start.format("%b %-d"),
        window.end.format("%b %-d, %Y")
    );
    println!();
    println_colored!(DIM, "  Su   Mo   Tu   We   Th   Fr   Sa");

    print!("  ");
    let mut column = window.leading_blanks();
    for _ in 0..column {
        print!("     ");
    }
    for lookup in &days {
        let key = lookup.date.format("%Y-%m-%d").to_string();
        let status = records.iter().find(|r| r.date == key).map(|r| r.status);
        let cell = format!("{:>2}{} ", lookup.info.day, status.map(|s| s.icon()).unwrap_or(" "));
        let color = match status {
            Some(FastingStatus::Fasted) => GREEN,
            Some(FastingStatus::Missed) => RED,
            Some(FastingStatus::Exempt) => AMBER,
            None if lookup.date == today => BOLD,
            None => DIM,
        };
        print_colored!(color, "{}", cell);
        print!(" ");
        column += 1;
        if column % 7 == 0 {
            println!();
            print!("  ");
        }
    }
    println!();

    let in_season: Vec<FastingDay> = records
        .into_iter()
        .filter(|r| r.naive_date().is_some_and(|d| window.contains(d)))
        .collect();
    print_summary(&FastingSummary::from_days(&in_season));
    Ok(())
}

// ─── Quran ───────────────────────────────────────────────────────────────────

pub fn handle_quran(
    conn: &Connection,
    config: &AppConfig,
    remote: &Remote,
    action: &QuranCommands,
) -> Result<()> {
    match action {
        QuranCommands::Show => {
            let progress = QuranRepo::get_or_default(conn)?;
            print_quran_progress(conn, config, remote, &progress);
        }
        QuranCommands::Set {
            juz,
            page,
            surah,
            ayah,
        } => {
            if juz.is_none() && page.is_none() && surah.is_none() && ayah.is_none() {
                return Err(anyhow!("Nothing to set. Use --juz, --page, --surah or --ayah"));
            }
            let mut progress = QuranRepo::get_or_default(conn)?;
            if let Some(juz) = juz {
                progress.juz = *juz;
            }
            if let Some(page) = page {
                progress.page = *page;
            }
            if let Some(surah) = surah {
                progress.surah = *surah;
            }
            if let Some(ayah) = ayah {
                progress.ayah = *ayah;
            }
            progress.last_updated = chrono::Utc::now();
            let mut progress = progress.clamped();
            if ayah.is_some() || surah.is_some() {
                match Lookup::new(conn, remote).surahs() {
                    Ok(surahs) => progress = progress.bounded_by(&surahs),
                    Err(e) => log::warn!("{}; ayah not checked against surah length", e),
                }
            }
            QuranRepo::save(conn, &progress)?;
            println_colored!(GREEN, "  ✓ Progress saved");
            print_quran_progress(conn, config, remote, &progress);
        }
        QuranCommands::Next | QuranCommands::Prev => {
            let mut progress = QuranRepo::get_or_default(conn)?;
            let moved = match action {
                QuranCommands::Next => progress.next_page(),
                _ => progress.prev_page(),
            };
            if moved {
                QuranRepo::save(conn, &progress)?;
                println_colored!(
                    GREEN,
                    "  Page {} · Juz {} ({})",
                    progress.page,
                    progress.juz,
                    juz_name(progress.juz)
                );
            } else {
                println_colored!(DIM, "  Already on page {}", progress.page);
            }
        }
        QuranCommands::Surahs => {
            let surahs = Lookup::new(conn, remote).surahs()?;
            let current = QuranRepo::get_or_default(conn)?.surah;
            println!();
            for surah in &surahs {
                let line = format!(
                    "  {:>3}  {}  {}  {:>3} ayahs  {}",
                    surah.number,
                    pad_display(&surah.english_name, 18),
                    pad_display(&surah.english_name_translation, 28),
                    surah.number_of_ayahs,
                    surah.revelation_type
                );
                if surah.number == current {
                    println_colored!(GOLD, "{}", line);
                } else {
                    println!("{}", line);
                }
            }
            println!();
        }
    }
    Ok(())
}

fn print_quran_progress(
    conn: &Connection,
    config: &AppConfig,
    remote: &Remote,
    progress: &QuranProgress,
) {
    let surah_name = Lookup::new(conn, remote)
        .surahs()
        .ok()
        .and_then(|list| list.into_iter().find(|s| s.number == progress.surah))
        .map(|s| format!(" ({})", s.english_name))
        .unwrap_or_default();

    println!();
    println_colored!(GOLD, "  Quran progress");
    println!();
    println!(
        "  Juz    {:>3}/30   {}  {:>3}%  {}",
        progress.juz,
        progress_bar(progress.juz, 30, 20),
        progress.juz_percent(),
        juz_name(progress.juz)
    );
    println!(
        "  Page   {:>3}/{}  {}  {:>3}%",
        progress.page,
        TOTAL_PAGES,
        progress_bar(progress.page, TOTAL_PAGES, 20),
        progress.page_percent()
    );
    println!(
        "  Surah  {:>3}/114  {}  {:>3}%{}",
        progress.surah,
        progress_bar(progress.surah, 114, 20),
        progress.surah_percent(),
        surah_name
    );
    println!("  Ayah   {:>3}", progress.ayah);

    let status = ramadan_status(today(), config.calendar.hijri_offset);
    if let Some(pace) = status.reading_days_left().and_then(|d| progress.daily_pace(d)) {
        println!();
        println_colored!(
            DIM,
            "  {} pages left · {} pages a day to finish this Ramadan",
            progress.pages_remaining(),
            format_pages((pace * 10.0).ceil() / 10.0)
        );
    }
    println_colored!(
        DIM,
        "  Last updated {}",
        progress.last_updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!();
}

// ─── Good deeds ──────────────────────────────────────────────────────────────

pub fn handle_deeds(conn: &Connection, config: &AppConfig, action: &DeedsCommands) -> Result<()> {
    let today = today();
    let per_day = config.deeds.per_day;

    match action {
        DeedsCommands::List => {
            let challenge = DeedsRepo::challenge_for(conn, today, per_day)?;
            let streak = DeedsRepo::streak(conn)?.current(today);
            println!();
            println_colored!(GOLD, "  Good deeds for {}", challenge.date);
            println!();
            for deed in &challenge.deeds {
                if challenge.is_completed(deed.id) {
                    println_colored!(GREEN, "  {:>2}  ✓ {}", deed.id, deed.text);
                } else {
                    print!("  {:>2}  ○ {}", deed.id, deed.text);
                    println_colored!(DIM, "  [{}]", deed.category.as_str());
                }
            }
            println!();
            println!(
                "  {} {}%   Streak: {}",
                progress_bar(challenge.completed.len() as u32, challenge.deeds.len() as u32, 20),
                challenge.progress_percent(),
                plural(streak, "day")
            );
            println!();
        }
        DeedsCommands::Toggle { id } => {
            let (challenge, done) = DeedsRepo::toggle(conn, *id, today, per_day)?;
            let text = challenge
                .deeds
                .iter()
                .find(|d| d.id == *id)
                .map(|d| d.text.as_str())
                .unwrap_or_default();
            if done {
                println_colored!(GREEN, "  ✓ {}", text);
            } else {
                println_colored!(DIM, "  ○ {} (unmarked)", text);
            }
            if challenge.all_done() {
                let streak = DeedsRepo::streak(conn)?.current(today);
                println_colored!(GOLD, "  All done for today! Streak: {}", plural(streak, "day"));
            }
        }
    }
    Ok(())
}

// ─── Dhikr ───────────────────────────────────────────────────────────────────

pub fn handle_dhikr(conn: &Connection, action: &DhikrCommands) -> Result<()> {
    let today = today();

    match action {
        DhikrCommands::List => {
            let items = DhikrRepo::list(conn, today)?;
            println!();
            println_colored!(GOLD, "  Dhikr");
            println!();
            for item in &items {
                let line = format!(
                    "  {}  {}  {} {:>3}/{}",
                    item.id,
                    pad_display(&item.translation, 40),
                    progress_bar(item.count, item.target, 10),
                    item.count,
                    item.target
                );
                if item.is_complete() {
                    println_colored!(GREEN, "{} ✓", line);
                } else {
                    println!("{}", line);
                }
                println_colored!(DIM, "     {}", item.arabic);
            }
            println!();
        }
        DhikrCommands::Count { id, times } => {
            let mut last = None;
            for _ in 0..(*times).max(1) {
                let (item, outcome) = DhikrRepo::increment(conn, *id, today)?;
                let reached = !matches!(outcome, Increment::Counted(_));
                last = Some((item, outcome));
                if reached {
                    break;
                }
            }
            if let Some((item, outcome)) = last {
                match outcome {
                    Increment::Counted(n) => {
                        println_colored!(AMBER, "  ◑ {}: {}/{}", item.translation, n, item.target)
                    }
                    Increment::Completed => println_colored!(
                        GREEN,
                        "  ✓ {}: {}/{} (target reached!)",
                        item.translation,
                        item.count,
                        item.target
                    ),
                    Increment::AlreadyComplete => println_colored!(
                        DIM,
                        "  {} already at its target of {}",
                        item.translation,
                        item.target
                    ),
                }
            }
        }
        DhikrCommands::Reset => {
            DhikrRepo::reset_counts(conn, today)?;
            println_colored!(DIM, "  All counters reset");
        }
    }
    Ok(())
}

// ─── Adhkar ──────────────────────────────────────────────────────────────────

pub fn handle_adhkar(category: &str) -> Result<()> {
    let category = AdhkarCategory::from_str(category)?;
    println!();
    println_colored!(GOLD, "  {}", category.title());
    for entry in adhkar_for(category) {
        println!();
        println_colored!(BOLD, "  {}", entry.arabic);
        println!("  {}", entry.translation);
        print_colored!(DIM, "  {}", entry.reference);
        match entry.repeat_label() {
            Some(label) => println_colored!(AMBER, "  · {}", label),
            None => println!(),
        }
    }
    println!();
    Ok(())
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings(conn: &Connection, action: &SettingsCommands) -> Result<()> {
    match action {
        SettingsCommands::Show => {
            let settings = SettingsRepo::get(conn)?;
            println!();
            for key in SettingKey::all() {
                let on = settings.get(key);
                print!("  {:<18}", key.as_str());
                if on {
                    println_colored!(GREEN, "on");
                } else {
                    println_colored!(DIM, "off");
                }
            }
            println!();
        }
        SettingsCommands::Set { key, value } => {
            let key = SettingKey::from_str(key)?;
            let value = parse_switch(value)?;
            let mut settings = SettingsRepo::get(conn)?;
            settings.set(key, value);
            SettingsRepo::save(conn, &settings)?;
            println_colored!(
                GREEN,
                "  ✓ {} is now {}",
                key.as_str(),
                if value { "on" } else { "off" }
            );
        }
    }
    Ok(())
}

// ─── Reset ───────────────────────────────────────────────────────────────────

pub fn handle_reset(conn: &Connection, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("  Erase all fasting, Quran, deeds and dhikr progress? [y/N] ")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println_colored!(DIM, "  Nothing changed");
            return Ok(());
        }
    }
    reset_all_progress(conn).context("Resetting progress")?;
    println_colored!(AMBER, "  All progress erased. Settings were kept.");
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

/// Accepts YYYY-MM-DD, "today" or "yesterday".
fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD or 'today'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date(" Yesterday ", today).unwrap(), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(
            parse_date("2025-03-01", today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2025", today).is_err());
        assert!(parse_date("2025-02-30", today).is_err());
    }
}
