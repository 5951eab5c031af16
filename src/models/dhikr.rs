use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhikrItem {
    pub id: u32,
    pub arabic: String,
    pub translation: String,
    pub virtue: String,
    pub target: u32,
    pub count: u32,
    pub last_updated: DateTime<Utc>,
}

/// Outcome of a single tap on a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Counted(u32),
    /// This tap reached the target.
    Completed,
    AlreadyComplete,
}

impl DhikrItem {
    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }

    pub fn increment(&mut self, now: DateTime<Utc>) -> Increment {
        if self.is_complete() {
            return Increment::AlreadyComplete;
        }
        self.count = (self.count + 1).min(self.target);
        self.last_updated = now;
        if self.is_complete() {
            Increment::Completed
        } else {
            Increment::Counted(self.count)
        }
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.count = 0;
        self.last_updated = now;
    }

    pub fn ratio(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.count as f64 / self.target as f64).min(1.0)
    }

    /// Counts belong to the local day they were last touched on.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.last_updated.with_timezone(&Local).date_naive() < today
    }
}

const BUILTINS: &[(u32, &str, &str, &str, u32)] = &[
    (
        1,
        "سُبْحَانَ اللَّهِ",
        "Glory be to Allah",
        "Whoever says it a hundred times a day has his sins wiped away, even if they are like the foam of the sea.",
        33,
    ),
    (
        2,
        "الْحَمْدُ لِلَّهِ",
        "All praise is due to Allah",
        "Alhamdulillah fills the scales.",
        33,
    ),
    (
        3,
        "اللَّهُ أَكْبَرُ",
        "Allah is the Greatest",
        "Completes the tasbih of Fatimah after each prayer.",
        34,
    ),
    (
        4,
        "أَسْتَغْفِرُ اللَّهَ",
        "I seek forgiveness from Allah",
        "Allah makes for whoever holds to istighfar a way out of every distress.",
        100,
    ),
    (
        5,
        "لَا إِلَٰهَ إِلَّا اللَّهُ",
        "There is no god but Allah",
        "The best remembrance is la ilaha illallah.",
        100,
    ),
    (
        6,
        "اللَّهُمَّ صَلِّ عَلَى مُحَمَّدٍ",
        "O Allah, send blessings upon Muhammad",
        "Whoever sends one blessing upon the Prophet receives ten from Allah.",
        10,
    ),
];

pub fn default_items(now: DateTime<Utc>) -> Vec<DhikrItem> {
    BUILTINS
        .iter()
        .map(|(id, arabic, translation, virtue, target)| DhikrItem {
            id: *id,
            arabic: arabic.to_string(),
            translation: translation.to_string(),
            virtue: virtue.to_string(),
            target: *target,
            count: 0,
            last_updated: now,
        })
        .collect()
}

/// Next daily reminder at `hour`:00 local time, today if still ahead,
/// otherwise tomorrow.
pub fn next_reminder(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(at);
    if now < today {
        today
    } else {
        today + Duration::days(1)
    }
}
