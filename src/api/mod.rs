pub mod client;

pub use client::{ApiError, Remote};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::Connection;

use crate::db::repository::CacheRepo;
use crate::models::Surah;
use crate::utils::calendar::RamadanWindow;
use crate::utils::hijri::{convert, HijriInfo};

const HIJRI_MAX_AGE_HOURS: i64 = 24;
const SURAH_MAX_AGE_HOURS: i64 = 1;
const SURAH_CACHE_KEY: &str = "surah:list";

/// Where a looked-up value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Network,
    /// Expired cache entry used because the network was unavailable.
    Stale,
    /// Computed on this machine.
    Local,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Cache => "cached",
            Source::Network => "online",
            Source::Stale => "cached (stale)",
            Source::Local => "offline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HijriLookup {
    pub date: NaiveDate,
    pub info: HijriInfo,
    pub source: Source,
}

impl HijriLookup {
    pub fn local(date: NaiveDate, offset_days: i32) -> Self {
        Self {
            date,
            info: convert(date, offset_days),
            source: Source::Local,
        }
    }
}

/// Cache-first resolver for remote data. After one network failure it stops
/// trying for the rest of its lifetime, so a whole calendar of lookups costs
/// at most one timeout when offline.
pub struct Lookup<'a> {
    conn: &'a Connection,
    remote: &'a Remote,
    now: DateTime<Utc>,
    network_ok: bool,
}

impl<'a> Lookup<'a> {
    pub fn new(conn: &'a Connection, remote: &'a Remote) -> Self {
        Self::at(conn, remote, Utc::now())
    }

    pub fn at(conn: &'a Connection, remote: &'a Remote, now: DateTime<Utc>) -> Self {
        Self {
            conn,
            remote,
            now,
            network_ok: remote.is_enabled(),
        }
    }

    fn resolve<T>(
        &mut self,
        key: &str,
        url: &str,
        max_age: Duration,
        parse: fn(&str) -> Result<T, ApiError>,
    ) -> Option<(T, Source)> {
        let cached = CacheRepo::get(self.conn, key).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable cache entry '{}': {}", key, e);
            None
        });

        if let Some(entry) = cached.as_ref().filter(|c| c.is_fresh(max_age, self.now)) {
            match parse(&entry.body) {
                Ok(value) => {
                    log::debug!("Cache hit for '{}'", key);
                    return Some((value, Source::Cache));
                }
                Err(e) => log::warn!("Discarding cached '{}': {}", key, e),
            }
        }

        if self.network_ok {
            let fetched = self
                .remote
                .fetch_body(url)
                .and_then(|body| parse(&body).map(|value| (body, value)));
            match fetched {
                Ok((body, value)) => {
                    if let Err(e) = CacheRepo::store(self.conn, key, &body, self.now) {
                        log::warn!("Could not cache '{}': {}", key, e);
                    }
                    return Some((value, Source::Network));
                }
                Err(e) => {
                    log::warn!("{}; continuing offline", e);
                    self.network_ok = false;
                }
            }
        }

        let entry = cached?;
        parse(&entry.body).ok().map(|value| (value, Source::Stale))
    }

    /// Hijri date of `date`, shifted by the moon-sighting offset.
    pub fn hijri(&mut self, date: NaiveDate, offset_days: i32) -> HijriLookup {
        let adjusted = date + Duration::days(offset_days as i64);
        let key = format!("gToH:{}", adjusted);
        let url = self.remote.gtoh_url(adjusted);

        self.resolve(&key, &url, Duration::hours(HIJRI_MAX_AGE_HOURS), client::parse_gtoh)
            .map(|(info, source)| HijriLookup { date, info, source })
            .unwrap_or_else(|| HijriLookup::local(date, offset_days))
    }

    /// One lookup per day of the season, in date order.
    pub fn season(&mut self, window: &RamadanWindow, offset_days: i32) -> Vec<HijriLookup> {
        window
            .dates()
            .into_iter()
            .map(|date| self.hijri(date, offset_days))
            .collect()
    }

    pub fn surahs(&mut self) -> Result<Vec<Surah>> {
        let url = self.remote.surah_url();
        self.resolve(
            SURAH_CACHE_KEY,
            &url,
            Duration::hours(SURAH_MAX_AGE_HOURS),
            client::parse_surahs,
        )
        .map(|(list, _)| list)
        .ok_or_else(|| anyhow!("Failed to load surah list"))
    }
}

#[cfg(test)]
mod tests {
    use super::client::fake::*;
    use super::*;
    use crate::config::ApiConfig;
    use crate::db::migrations::run_migrations;
    use crate::utils::calendar::ramadan_window;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn remote(transport: &FakeTransport) -> Remote {
        Remote::new(Box::new(transport.clone()), &ApiConfig::default())
    }

    #[test]
    fn test_hijri_network_then_cache() {
        let conn = setup();
        let date = ymd(2025, 3, 1);
        let probe = remote(&FakeTransport::default());
        let transport = FakeTransport::default().with(&probe.gtoh_url(date), &gtoh_body("01", 9, "1446"));
        let remote = remote(&transport);

        let first = Lookup::new(&conn, &remote).hijri(date, 0);
        assert_eq!(first.source, Source::Network);
        assert_eq!((first.info.day, first.info.month, first.info.year), (1, 9, 1446));

        let second = Lookup::new(&conn, &remote).hijri(date, 0);
        assert_eq!(second.source, Source::Cache);
        assert_eq!(second.info, first.info);
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_hijri_offset_queries_shifted_date() {
        let conn = setup();
        let transport = FakeTransport::default();
        let remote = remote(&transport);
        Lookup::new(&conn, &remote).hijri(ymd(2025, 3, 1), -1);
        assert_eq!(transport.calls.borrow()[0], remote.gtoh_url(ymd(2025, 2, 28)));
    }

    #[test]
    fn test_hijri_offline_falls_back_to_local() {
        let conn = setup();
        let transport = FakeTransport::default();
        let remote = remote(&transport);
        let lookup = Lookup::new(&conn, &remote).hijri(ymd(2025, 3, 5), 0);
        assert_eq!(lookup.source, Source::Local);
        assert_eq!(lookup.info, convert(ymd(2025, 3, 5), 0));
    }

    #[test]
    fn test_hijri_stale_cache_beats_local() {
        let conn = setup();
        let date = ymd(2025, 3, 1);
        let long_ago = Utc::now() - Duration::days(3);
        CacheRepo::store(&conn, "gToH:2025-03-01", &gtoh_body("30", 8, "1446"), long_ago).unwrap();

        let transport = FakeTransport::default();
        let remote = remote(&transport);
        let lookup = Lookup::new(&conn, &remote).hijri(date, 0);
        assert_eq!(lookup.source, Source::Stale);
        assert_eq!((lookup.info.day, lookup.info.month), (30, 8));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_season_stops_after_first_failure() {
        let conn = setup();
        let transport = FakeTransport::default();
        let remote = remote(&transport);
        let window = ramadan_window(1446, 0);

        let days = Lookup::new(&conn, &remote).season(&window, 0);
        assert_eq!(days.len() as u32, window.len());
        assert!(days.iter().all(|d| d.source == Source::Local && d.info.is_ramadan()));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_disabled_remote_stays_local() {
        let conn = setup();
        let transport = FakeTransport::default();
        let config = ApiConfig {
            enabled: false,
            ..ApiConfig::default()
        };
        let remote = Remote::new(Box::new(transport.clone()), &config);
        let lookup = Lookup::new(&conn, &remote).hijri(ymd(2025, 3, 1), 0);
        assert_eq!(lookup.source, Source::Local);
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_surahs_cached_for_an_hour() {
        let conn = setup();
        let probe = remote(&FakeTransport::default());
        let transport = FakeTransport::default().with(&probe.surah_url(), SURAHS_BODY);
        let remote = remote(&transport);
        let now = Utc::now();

        assert_eq!(Lookup::at(&conn, &remote, now).surahs().unwrap().len(), 2);
        Lookup::at(&conn, &remote, now + Duration::minutes(30)).surahs().unwrap();
        assert_eq!(transport.call_count(), 1);
        Lookup::at(&conn, &remote, now + Duration::minutes(90)).surahs().unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[test]
    fn test_surahs_unavailable() {
        let conn = setup();
        let remote = remote(&FakeTransport::default());
        let err = Lookup::new(&conn, &remote).surahs().unwrap_err();
        assert_eq!(err.to_string(), "Failed to load surah list");
    }
}
