use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::dhikr::default_items;
use crate::models::{
    DailyChallenge, DeedStreak, DhikrItem, FastingDay, FastingStatus, Increment, QuranProgress,
    UserSettings,
};

// ─── Storage keys ────────────────────────────────────────────────────────────

pub mod keys {
    pub const FASTING_DAYS: &str = "fastingDays";
    pub const QURAN_PROGRESS: &str = "quranProgress";
    pub const DAILY_CHALLENGE: &str = "dailyChallenge";
    pub const GOOD_DEED_STREAK: &str = "goodDeedStreak";
    pub const LAST_GOOD_DEED_COMPLETION: &str = "lastGoodDeedCompletion";
    pub const DHIKR_ITEMS: &str = "dhikrItems";
    pub const USER_SETTINGS: &str = "userSettings";

    /// Everything "reset all progress" wipes. Settings survive.
    pub const PROGRESS: &[&str] = &[
        FASTING_DAYS,
        QURAN_PROGRESS,
        DAILY_CHALLENGE,
        GOOD_DEED_STREAK,
        LAST_GOOD_DEED_COMPLETION,
        DHIKR_ITEMS,
    ];
}

// ─── Key/value storage ───────────────────────────────────────────────────────

pub struct Storage;

impl Storage {
    pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Typed read. A value that no longer parses is reported and treated
    /// as missing.
    pub fn get<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
        let Some(raw) = Self::get_raw(conn, key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Ignoring unreadable value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    pub fn set<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Serializing value for '{}'", key))?;
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, json],
        )?;
        Ok(())
    }

    pub fn remove(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn keys(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }
}

/// Remove all tracked progress, keeping user settings.
pub fn reset_all_progress(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for key in keys::PROGRESS {
        Storage::remove(&tx, key)?;
    }
    tx.commit()?;
    log::info!("All progress reset");
    Ok(())
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ─── Fasting repo ────────────────────────────────────────────────────────────

pub struct FastingRepo;

impl FastingRepo {
    pub fn all(conn: &Connection) -> Result<Vec<FastingDay>> {
        Ok(Storage::get(conn, keys::FASTING_DAYS)?.unwrap_or_default())
    }

    pub fn get(conn: &Connection, date: NaiveDate) -> Result<Option<FastingDay>> {
        let key = date_key(date);
        Ok(Self::all(conn)?.into_iter().find(|d| d.date == key))
    }

    /// Insert or replace the record for `day.date`.
    pub fn save(conn: &Connection, day: FastingDay) -> Result<()> {
        let mut days: Vec<FastingDay> = Self::all(conn)?
            .into_iter()
            .filter(|d| d.date != day.date)
            .collect();
        days.push(day);
        Storage::set(conn, keys::FASTING_DAYS, &days)
    }

    /// Set the status for `date`. A note already on record is kept when
    /// `notes` is None.
    pub fn mark(
        conn: &Connection,
        date: NaiveDate,
        status: FastingStatus,
        notes: Option<String>,
    ) -> Result<FastingDay> {
        let notes = match notes {
            Some(notes) => Some(notes),
            None => Self::get(conn, date)?.and_then(|d| d.notes),
        };
        let day = FastingDay::new(date, status, notes);
        Self::save(conn, day.clone())?;
        Ok(day)
    }

    /// Returns false when no record existed.
    pub fn remove(conn: &Connection, date: NaiveDate) -> Result<bool> {
        let key = date_key(date);
        let days = Self::all(conn)?;
        let before = days.len();
        let kept: Vec<FastingDay> = days.into_iter().filter(|d| d.date != key).collect();
        if kept.len() == before {
            return Ok(false);
        }
        Storage::set(conn, keys::FASTING_DAYS, &kept)?;
        Ok(true)
    }

    pub fn missed(conn: &Connection) -> Result<Vec<FastingDay>> {
        Ok(Self::all(conn)?
            .into_iter()
            .filter(|d| d.status == FastingStatus::Missed)
            .collect())
    }
}

// ─── Quran repo ──────────────────────────────────────────────────────────────

pub struct QuranRepo;

impl QuranRepo {
    pub fn get(conn: &Connection) -> Result<Option<QuranProgress>> {
        Storage::get(conn, keys::QURAN_PROGRESS)
    }

    pub fn get_or_default(conn: &Connection) -> Result<QuranProgress> {
        Ok(Self::get(conn)?.unwrap_or_default())
    }

    pub fn save(conn: &Connection, progress: &QuranProgress) -> Result<()> {
        Storage::set(conn, keys::QURAN_PROGRESS, &progress.clone().clamped())
    }
}

// ─── Good deeds repo ─────────────────────────────────────────────────────────

pub struct DeedsRepo;

impl DeedsRepo {
    /// Today's challenge, generated and stored when the stored one is from
    /// another day (or missing).
    pub fn challenge_for(conn: &Connection, today: NaiveDate, per_day: usize) -> Result<DailyChallenge> {
        if let Some(existing) = Storage::get::<DailyChallenge>(conn, keys::DAILY_CHALLENGE)? {
            if existing.is_for(today) {
                return Ok(existing);
            }
        }
        let fresh = DailyChallenge::generate(today, per_day);
        Storage::set(conn, keys::DAILY_CHALLENGE, &fresh)?;
        log::debug!("Generated good deeds challenge for {}", fresh.date);
        Ok(fresh)
    }

    pub fn streak(conn: &Connection) -> Result<DeedStreak> {
        let count: u32 = Storage::get(conn, keys::GOOD_DEED_STREAK)?.unwrap_or(0);
        let last: Option<String> = Storage::get(conn, keys::LAST_GOOD_DEED_COMPLETION)?;
        let last_completion = last.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
        Ok(DeedStreak {
            count,
            last_completion,
        })
    }

    fn save_streak(conn: &Connection, streak: &DeedStreak) -> Result<()> {
        Storage::set(conn, keys::GOOD_DEED_STREAK, &streak.count)?;
        match streak.last_completion {
            Some(date) => Storage::set(conn, keys::LAST_GOOD_DEED_COMPLETION, &date_key(date)),
            None => Storage::remove(conn, keys::LAST_GOOD_DEED_COMPLETION),
        }
    }

    /// Toggle a deed of today's challenge and keep the streak in step.
    /// Returns the updated challenge and the new completion state of `id`.
    pub fn toggle(
        conn: &Connection,
        id: u32,
        today: NaiveDate,
        per_day: usize,
    ) -> Result<(DailyChallenge, bool)> {
        let mut challenge = Self::challenge_for(conn, today, per_day)?;
        let was_done = challenge.all_done();
        let now_completed = challenge.toggle(id)?;
        let is_done = challenge.all_done();

        let tx = conn.unchecked_transaction()?;
        if was_done != is_done {
            let mut streak = Self::streak(&tx)?;
            if is_done {
                challenge.streak_before = Some(streak.clone());
                streak.complete_day(today);
            } else if let Some(before) = challenge.streak_before.take() {
                streak = before;
            } else {
                streak.uncomplete_day(today);
            }
            Self::save_streak(&tx, &streak)?;
        }
        Storage::set(&tx, keys::DAILY_CHALLENGE, &challenge)?;
        tx.commit()?;
        Ok((challenge, now_completed))
    }
}

// ─── Dhikr repo ──────────────────────────────────────────────────────────────

pub struct DhikrRepo;

impl DhikrRepo {
    /// Counters for `today`: seeded on first access, and zeroed when they
    /// were last touched on an earlier day.
    pub fn list(conn: &Connection, today: NaiveDate) -> Result<Vec<DhikrItem>> {
        let now = Utc::now();
        let Some(mut items) = Storage::get::<Vec<DhikrItem>>(conn, keys::DHIKR_ITEMS)? else {
            let items = default_items(now);
            Storage::set(conn, keys::DHIKR_ITEMS, &items)?;
            return Ok(items);
        };

        let mut rolled = false;
        for item in items.iter_mut().filter(|i| i.count > 0 && i.is_stale(today)) {
            item.reset(now);
            rolled = true;
        }
        if rolled {
            log::debug!("Dhikr counters rolled over for {}", today);
            Storage::set(conn, keys::DHIKR_ITEMS, &items)?;
        }
        Ok(items)
    }

    pub fn increment(conn: &Connection, id: u32, today: NaiveDate) -> Result<(DhikrItem, Increment)> {
        let mut items = Self::list(conn, today)?;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| anyhow!("Dhikr {} not found", id))?;
        let outcome = item.increment(Utc::now());
        let updated = item.clone();
        if outcome != Increment::AlreadyComplete {
            Storage::set(conn, keys::DHIKR_ITEMS, &items)?;
        }
        Ok((updated, outcome))
    }

    pub fn reset_counts(conn: &Connection, today: NaiveDate) -> Result<()> {
        let now = Utc::now();
        let mut items = Self::list(conn, today)?;
        for item in items.iter_mut() {
            item.reset(now);
        }
        Storage::set(conn, keys::DHIKR_ITEMS, &items)
    }
}

// ─── Settings repo ───────────────────────────────────────────────────────────

pub struct SettingsRepo;

impl SettingsRepo {
    pub fn get(conn: &Connection) -> Result<UserSettings> {
        Ok(Storage::get(conn, keys::USER_SETTINGS)?.unwrap_or_default())
    }

    pub fn save(conn: &Connection, settings: &UserSettings) -> Result<()> {
        Storage::set(conn, keys::USER_SETTINGS, settings)
    }
}

// ─── Fetch cache ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CachedBody {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl CachedBody {
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < max_age
    }
}

pub struct CacheRepo;

impl CacheRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<CachedBody>> {
        let row = conn
            .query_row(
                "SELECT body, fetched_at FROM fetch_cache WHERE key = ?1",
                params![key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((body, fetched_at)) => {
                let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
                    .map_err(|e| anyhow!("Bad cache timestamp '{}': {}", fetched_at, e))?
                    .with_timezone(&Utc);
                Ok(Some(CachedBody { body, fetched_at }))
            }
        }
    }

    pub fn store(conn: &Connection, key: &str, body: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO fetch_cache (key, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![key, body, fetched_at.to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::SettingKey;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fasting_day_round_trip() {
        let conn = conn();
        let day = FastingDay::new(ymd(2025, 3, 4), FastingStatus::Missed, Some("ill".into()));
        FastingRepo::save(&conn, day.clone()).unwrap();
        let loaded = FastingRepo::get(&conn, ymd(2025, 3, 4)).unwrap().unwrap();
        assert_eq!(loaded, day);
    }

    #[test]
    fn test_fasting_save_replaces_same_date() {
        let conn = conn();
        FastingRepo::save(&conn, FastingDay::new(ymd(2025, 3, 4), FastingStatus::Missed, None)).unwrap();
        FastingRepo::save(&conn, FastingDay::new(ymd(2025, 3, 5), FastingStatus::Fasted, None)).unwrap();
        FastingRepo::save(&conn, FastingDay::new(ymd(2025, 3, 4), FastingStatus::Fasted, None)).unwrap();

        let all = FastingRepo::all(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert!(FastingRepo::missed(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_fasting_mark_keeps_existing_note() {
        let conn = conn();
        let date = ymd(2025, 3, 4);
        FastingRepo::mark(&conn, date, FastingStatus::Missed, Some("travelling".into())).unwrap();
        let day = FastingRepo::mark(&conn, date, FastingStatus::Fasted, None).unwrap();
        assert_eq!(day.status, FastingStatus::Fasted);
        assert_eq!(day.notes.as_deref(), Some("travelling"));
        assert_eq!(FastingRepo::get(&conn, date).unwrap().unwrap(), day);

        FastingRepo::mark(&conn, date, FastingStatus::Exempt, Some("ill".into())).unwrap();
        let day = FastingRepo::get(&conn, date).unwrap().unwrap();
        assert_eq!(day.notes.as_deref(), Some("ill"));
    }

    #[test]
    fn test_fasting_remove() {
        let conn = conn();
        FastingRepo::save(&conn, FastingDay::new(ymd(2025, 3, 4), FastingStatus::Exempt, None)).unwrap();
        assert!(FastingRepo::remove(&conn, ymd(2025, 3, 4)).unwrap());
        assert!(!FastingRepo::remove(&conn, ymd(2025, 3, 4)).unwrap());
        assert!(FastingRepo::all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_value_is_treated_as_missing() {
        let conn = conn();
        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, 'not json')",
            params![keys::FASTING_DAYS],
        )
        .unwrap();
        assert!(FastingRepo::all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_quran_progress_defaults_and_saves_clamped() {
        let conn = conn();
        assert!(QuranRepo::get(&conn).unwrap().is_none());
        assert_eq!(QuranRepo::get_or_default(&conn).unwrap().page, 1);

        let progress = QuranProgress {
            page: 1000,
            ..QuranProgress::default()
        };
        QuranRepo::save(&conn, &progress).unwrap();
        assert_eq!(QuranRepo::get(&conn).unwrap().unwrap().page, 604);
    }

    #[test]
    fn test_challenge_is_stable_within_a_day() {
        let conn = conn();
        let first = DeedsRepo::challenge_for(&conn, ymd(2025, 3, 1), 5).unwrap();
        let again = DeedsRepo::challenge_for(&conn, ymd(2025, 3, 1), 5).unwrap();
        assert_eq!(first, again);

        let next = DeedsRepo::challenge_for(&conn, ymd(2025, 3, 2), 5).unwrap();
        assert_eq!(next.date, "2025-03-02");
        assert!(next.completed.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_challenge_and_streak() {
        let conn = conn();
        let today = ymd(2025, 3, 1);
        let challenge = DeedsRepo::challenge_for(&conn, today, 1).unwrap();
        let id = challenge.deeds[0].id;

        let (after_first, done) = DeedsRepo::toggle(&conn, id, today, 1).unwrap();
        assert!(done);
        assert!(after_first.all_done());
        assert_eq!(DeedsRepo::streak(&conn).unwrap().current(today), 1);

        let (after_second, done) = DeedsRepo::toggle(&conn, id, today, 1).unwrap();
        assert!(!done);
        assert_eq!(after_second, challenge);
        assert_eq!(DeedsRepo::streak(&conn).unwrap().current(today), 0);
    }

    #[test]
    fn test_toggle_twice_restores_lapsed_streak() {
        let conn = conn();
        let lapsed = DeedStreak {
            count: 5,
            last_completion: Some(ymd(2025, 3, 1)),
        };
        DeedsRepo::save_streak(&conn, &lapsed).unwrap();

        let today = ymd(2025, 3, 5);
        let id = DeedsRepo::challenge_for(&conn, today, 1).unwrap().deeds[0].id;
        DeedsRepo::toggle(&conn, id, today, 1).unwrap();
        assert_eq!(DeedsRepo::streak(&conn).unwrap().current(today), 1);

        let (challenge, _) = DeedsRepo::toggle(&conn, id, today, 1).unwrap();
        assert_eq!(challenge.streak_before, None);
        assert_eq!(DeedsRepo::streak(&conn).unwrap(), lapsed);
    }

    #[test]
    fn test_streak_grows_across_days() {
        let conn = conn();
        for d in 1..=3 {
            let today = ymd(2025, 3, d);
            let challenge = DeedsRepo::challenge_for(&conn, today, 2).unwrap();
            for deed in &challenge.deeds {
                DeedsRepo::toggle(&conn, deed.id, today, 2).unwrap();
            }
        }
        let streak = DeedsRepo::streak(&conn).unwrap();
        assert_eq!(streak.count, 3);
        assert_eq!(streak.last_completion, Some(ymd(2025, 3, 3)));
    }

    #[test]
    fn test_dhikr_seeded_and_capped() {
        let conn = conn();
        let today = Utc::now().with_timezone(&chrono::Local).date_naive();
        let items = DhikrRepo::list(&conn, today).unwrap();
        assert!(!items.is_empty());
        let smallest = items.iter().min_by_key(|i| i.target).unwrap().clone();

        for _ in 0..smallest.target {
            DhikrRepo::increment(&conn, smallest.id, today).unwrap();
        }
        let (item, outcome) = DhikrRepo::increment(&conn, smallest.id, today).unwrap();
        assert_eq!(outcome, Increment::AlreadyComplete);
        assert_eq!(item.count, smallest.target);

        DhikrRepo::reset_counts(&conn, today).unwrap();
        let items = DhikrRepo::list(&conn, today).unwrap();
        assert!(items.iter().all(|i| i.count == 0));
    }

    #[test]
    fn test_dhikr_unknown_id() {
        let conn = conn();
        let today = ymd(2025, 3, 1);
        assert!(DhikrRepo::increment(&conn, 404, today).is_err());
    }

    #[test]
    fn test_dhikr_rolls_over_on_new_day() {
        let conn = conn();
        let today = Utc::now().with_timezone(&chrono::Local).date_naive();
        DhikrRepo::increment(&conn, 1, today).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let items = DhikrRepo::list(&conn, tomorrow).unwrap();
        assert!(items.iter().all(|i| i.count == 0));
    }

    #[test]
    fn test_reset_keeps_settings() {
        let conn = conn();
        let today = ymd(2025, 3, 1);
        let mut settings = UserSettings::default();
        settings.set(SettingKey::DarkMode, true);
        SettingsRepo::save(&conn, &settings).unwrap();
        FastingRepo::save(&conn, FastingDay::new(today, FastingStatus::Fasted, None)).unwrap();
        QuranRepo::save(&conn, &QuranProgress::default()).unwrap();
        DeedsRepo::challenge_for(&conn, today, 3).unwrap();
        DhikrRepo::list(&conn, today).unwrap();

        reset_all_progress(&conn).unwrap();

        assert_eq!(Storage::keys(&conn).unwrap(), vec![keys::USER_SETTINGS.to_string()]);
        assert!(SettingsRepo::get(&conn).unwrap().dark_mode);
        assert!(FastingRepo::all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_cache_freshness() {
        let conn = conn();
        let fetched = Utc::now() - Duration::hours(2);
        CacheRepo::store(&conn, "k", "{}", fetched).unwrap();
        let cached = CacheRepo::get(&conn, "k").unwrap().unwrap();
        assert_eq!(cached.body, "{}");
        assert!(!cached.is_fresh(Duration::hours(1), Utc::now()));
        assert!(cached.is_fresh(Duration::hours(24), Utc::now()));
        assert!(CacheRepo::get(&conn, "missing").unwrap().is_none());
    }
}
