use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::shuffle::shuffle_for_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeedCategory {
    Charity,
    Worship,
    Kindness,
    Quran,
    Family,
}

impl DeedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeedCategory::Charity => "charity",
            DeedCategory::Worship => "worship",
            DeedCategory::Kindness => "kindness",
            DeedCategory::Quran => "quran",
            DeedCategory::Family => "family",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodDeed {
    pub id: u32,
    pub text: String,
    pub category: DeedCategory,
}

const CATALOG: &[(u32, &str, DeedCategory)] = &[
    (1, "Give charity, however small, to someone in need", DeedCategory::Charity),
    (2, "Feed a fasting person or share your iftar", DeedCategory::Charity),
    (3, "Donate something you no longer use", DeedCategory::Charity),
    (4, "Pay for a stranger's meal or drink", DeedCategory::Charity),
    (5, "Pray two rakahs of Duha", DeedCategory::Worship),
    (6, "Pray Taraweeh at the masjid", DeedCategory::Worship),
    (7, "Make dua for ten people by name", DeedCategory::Worship),
    (8, "Wake up for tahajjud before suhoor", DeedCategory::Worship),
    (9, "Pray every sunnah prayer today", DeedCategory::Worship),
    (10, "Smile at everyone you meet", DeedCategory::Kindness),
    (11, "Send a kind message to an old friend", DeedCategory::Kindness),
    (12, "Help a neighbour with a chore", DeedCategory::Kindness),
    (13, "Forgive someone who wronged you", DeedCategory::Kindness),
    (14, "Hold back from complaining all day", DeedCategory::Kindness),
    (15, "Read one juz of the Quran", DeedCategory::Quran),
    (16, "Memorise a new ayah", DeedCategory::Quran),
    (17, "Read the tafsir of a short surah", DeedCategory::Quran),
    (18, "Listen to a recitation with its translation", DeedCategory::Quran),
    (19, "Call your parents and ask about their day", DeedCategory::Family),
    (20, "Prepare suhoor for your family", DeedCategory::Family),
    (21, "Teach a child a short dua", DeedCategory::Family),
    (22, "Visit or call a relative you have not spoken to in a while", DeedCategory::Family),
];

pub fn catalog() -> Vec<GoodDeed> {
    CATALOG
        .iter()
        .map(|(id, text, category)| GoodDeed {
            id: *id,
            text: text.to_string(),
            category: *category,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub date: String,
    pub deeds: Vec<GoodDeed>,
    pub completed: Vec<u32>,
    /// Streak as it was before this day became complete.
    #[serde(rename = "streakBefore", default, skip_serializing_if = "Option::is_none")]
    pub streak_before: Option<DeedStreak>,
}

impl DailyChallenge {
    /// Deterministic selection for `date`: the catalog shuffled with a
    /// date seed, first `per_day` entries.
    pub fn generate(date: NaiveDate, per_day: usize) -> Self {
        let mut deeds = catalog();
        shuffle_for_date(&mut deeds, date);
        deeds.truncate(per_day.clamp(1, CATALOG.len()));
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            deeds,
            completed: Vec::new(),
            streak_before: None,
        }
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date.format("%Y-%m-%d").to_string()
    }

    pub fn is_completed(&self, id: u32) -> bool {
        self.completed.contains(&id)
    }

    /// Flip completion of `id`. Returns the new completion state.
    pub fn toggle(&mut self, id: u32) -> Result<bool> {
        if !self.deeds.iter().any(|d| d.id == id) {
            return Err(anyhow!("Deed {} is not part of today's challenge", id));
        }
        if let Some(pos) = self.completed.iter().position(|c| *c == id) {
            self.completed.remove(pos);
            Ok(false)
        } else {
            self.completed.push(id);
            Ok(true)
        }
    }

    pub fn all_done(&self) -> bool {
        !self.deeds.is_empty() && self.deeds.iter().all(|d| self.is_completed(d.id))
    }

    pub fn progress_percent(&self) -> u32 {
        if self.deeds.is_empty() {
            return 0;
        }
        (self.completed.len() as f64 / self.deeds.len() as f64 * 100.0).round() as u32
    }
}

/// Consecutive days on which every deed of the day was completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeedStreak {
    pub count: u32,
    pub last_completion: Option<NaiveDate>,
}

impl DeedStreak {
    /// Streak as seen on `today`: zero once a full day has been skipped.
    pub fn current(&self, today: NaiveDate) -> u32 {
        match self.last_completion {
            Some(last) if last == today || Some(last) == today.pred_opt() => self.count,
            _ => 0,
        }
    }

    /// Record that `today` became fully complete.
    pub fn complete_day(&mut self, today: NaiveDate) {
        match self.last_completion {
            Some(last) if last == today => {}
            Some(last) if Some(last) == today.pred_opt() => {
                self.count += 1;
                self.last_completion = Some(today);
            }
            _ => {
                self.count = 1;
                self.last_completion = Some(today);
            }
        }
    }

    /// Undo `complete_day` for `today` after a deed was unticked, when no
    /// snapshot of the earlier streak is available. A streak that
    /// `complete_day` restarted cannot be recovered this way.
    pub fn uncomplete_day(&mut self, today: NaiveDate) {
        if self.last_completion != Some(today) {
            return;
        }
        self.count = self.count.saturating_sub(1);
        self.last_completion = if self.count > 0 { today.pred_opt() } else { None };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_generate_is_deterministic_per_day() {
        let a = DailyChallenge::generate(day(5), 5);
        let b = DailyChallenge::generate(day(5), 5);
        assert_eq!(a, b);
        assert_eq!(a.deeds.len(), 5);
        assert!(a.is_for(day(5)));
        assert!(!a.is_for(day(6)));
    }

    #[test]
    fn test_generate_has_unique_deeds() {
        let challenge = DailyChallenge::generate(day(9), 8);
        let mut ids: Vec<u32> = challenge.deeds.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut challenge = DailyChallenge::generate(day(1), 3);
        let original = challenge.clone();
        let id = challenge.deeds[1].id;
        assert!(challenge.toggle(id).unwrap());
        assert!(challenge.is_completed(id));
        assert!(!challenge.toggle(id).unwrap());
        assert_eq!(challenge, original);
    }

    #[test]
    fn test_toggle_unknown_deed() {
        let mut challenge = DailyChallenge::generate(day(1), 3);
        assert!(challenge.toggle(999).is_err());
    }

    #[test]
    fn test_progress_and_all_done() {
        let mut challenge = DailyChallenge::generate(day(2), 3);
        assert_eq!(challenge.progress_percent(), 0);
        let ids: Vec<u32> = challenge.deeds.iter().map(|d| d.id).collect();
        challenge.toggle(ids[0]).unwrap();
        assert_eq!(challenge.progress_percent(), 33);
        assert!(!challenge.all_done());
        challenge.toggle(ids[1]).unwrap();
        challenge.toggle(ids[2]).unwrap();
        assert!(challenge.all_done());
        assert_eq!(challenge.progress_percent(), 100);
    }

    #[test]
    fn test_streak_consecutive_days() {
        let mut streak = DeedStreak::default();
        streak.complete_day(day(1));
        streak.complete_day(day(2));
        streak.complete_day(day(2));
        assert_eq!(streak.count, 2);
        assert_eq!(streak.current(day(3)), 2);
        assert_eq!(streak.current(day(4)), 0);

        streak.complete_day(day(5));
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_uncomplete_reverts() {
        let mut streak = DeedStreak::default();
        streak.complete_day(day(1));
        let before = streak.clone();
        streak.complete_day(day(2));
        streak.uncomplete_day(day(2));
        assert_eq!(streak, before);

        let mut fresh = DeedStreak::default();
        fresh.complete_day(day(7));
        fresh.uncomplete_day(day(7));
        assert_eq!(fresh, DeedStreak::default());
    }
}
