use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TOTAL_PAGES: u32 = 604;
pub const TOTAL_JUZ: u32 = 30;
pub const TOTAL_SURAHS: u32 = 114;
pub const MAX_AYAH: u32 = 286;

/// First page of each juz in the standard Madani mushaf.
const JUZ_START_PAGES: [u32; 30] = [
    1, 22, 42, 62, 82, 102, 121, 142, 162, 182, 201, 222, 242, 262, 282, 302, 322, 342, 362,
    382, 402, 422, 442, 462, 482, 502, 522, 542, 562, 582,
];

const JUZ_NAMES: [&str; 30] = [
    "Alif Lām Mīm",
    "Sayaqūl",
    "Tilka'r-Rusul",
    "Lan Tanālu",
    "Wa'l-Muḥṣanāt",
    "Lā Yuḥibbu'llāh",
    "Wa Idhā Samiʿū",
    "Wa Law Annanā",
    "Qāla'l-Mala'u",
    "Wa A'lamū",
    "Yaʿtadhirūna",
    "Wa Mā Min Dābbatin",
    "Wa Mā Ubarri'u",
    "Rubamā",
    "Subḥāna'lladhī",
    "Qāla Alam",
    "Iqtaraba Li'n-Nās",
    "Qad Aflaḥa",
    "Wa Qāla'lladhīna",
    "A'man Khalaqa",
    "Utlu Mā Ūḥiya",
    "Wa Man Yaqnut",
    "Wa Mā Liya",
    "Fa Man Aẓlamu",
    "Ilayhi Yuraddu",
    "Ḥā Mīm",
    "Qāla Fa Mā Khaṭbukum",
    "Qad Samiʿa'llāhu",
    "Tabāraka'lladhī",
    "ʿAmma",
];

pub fn juz_name(juz: u32) -> &'static str {
    if (1..=TOTAL_JUZ).contains(&juz) {
        JUZ_NAMES[(juz - 1) as usize]
    } else {
        ""
    }
}

pub fn juz_for_page(page: u32) -> u32 {
    let page = page.clamp(1, TOTAL_PAGES);
    JUZ_START_PAGES.partition_point(|&start| start <= page) as u32
}

/// Rounded percentage of `value` over `total`, capped at 100.
pub fn percent(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (value as f64 / total as f64 * 100.0).round() as u32;
    pct.min(100)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranProgress {
    pub juz: u32,
    pub page: u32,
    pub surah: u32,
    pub ayah: u32,
    pub last_updated: DateTime<Utc>,
}

impl Default for QuranProgress {
    fn default() -> Self {
        Self {
            juz: 1,
            page: 1,
            surah: 1,
            ayah: 1,
            last_updated: Utc::now(),
        }
    }
}

impl QuranProgress {
    /// Pull every field back into its valid range. Fields are not
    /// reconciled with each other.
    pub fn clamped(mut self) -> Self {
        self.juz = self.juz.clamp(1, TOTAL_JUZ);
        self.page = self.page.clamp(1, TOTAL_PAGES);
        self.surah = self.surah.clamp(1, TOTAL_SURAHS);
        self.ayah = self.ayah.clamp(1, MAX_AYAH);
        self
    }

    /// Cap `ayah` at the length of the current surah when the list is known.
    pub fn bounded_by(mut self, surahs: &[Surah]) -> Self {
        if let Some(surah) = surahs.iter().find(|s| s.number == self.surah) {
            self.ayah = self.ayah.min(surah.number_of_ayahs.max(1));
        }
        self
    }

    pub fn page_percent(&self) -> u32 {
        percent(self.page, TOTAL_PAGES)
    }

    pub fn juz_percent(&self) -> u32 {
        percent(self.juz, TOTAL_JUZ)
    }

    pub fn surah_percent(&self) -> u32 {
        percent(self.surah, TOTAL_SURAHS)
    }

    /// Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= TOTAL_PAGES {
            return false;
        }
        self.page += 1;
        self.juz = juz_for_page(self.page);
        self.last_updated = Utc::now();
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        self.juz = juz_for_page(self.page);
        self.last_updated = Utc::now();
        true
    }

    pub fn pages_remaining(&self) -> u32 {
        TOTAL_PAGES - self.page.min(TOTAL_PAGES)
    }

    /// Pages per day needed to finish within `days_left` days (today included).
    pub fn daily_pace(&self, days_left: u32) -> Option<f64> {
        if days_left == 0 {
            return None;
        }
        Some(self.pages_remaining() as f64 / days_left as f64)
    }
}

/// Surah metadata as served by the alquran.cloud `/surah` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_juz_for_page_boundaries() {
        assert_eq!(juz_for_page(1), 1);
        assert_eq!(juz_for_page(21), 1);
        assert_eq!(juz_for_page(22), 2);
        assert_eq!(juz_for_page(581), 29);
        assert_eq!(juz_for_page(582), 30);
        assert_eq!(juz_for_page(604), 30);
        assert_eq!(juz_for_page(0), 1);
        assert_eq!(juz_for_page(9999), 30);
    }

    #[test]
    fn test_juz_name() {
        assert_eq!(juz_name(1), "Alif Lām Mīm");
        assert_eq!(juz_name(30), "ʿAmma");
        assert_eq!(juz_name(0), "");
        assert_eq!(juz_name(31), "");
    }

    #[test]
    fn test_percentages_are_capped() {
        let progress = QuranProgress {
            page: 302,
            juz: 16,
            surah: 114,
            ..QuranProgress::default()
        };
        assert_eq!(progress.page_percent(), 50);
        assert_eq!(progress.juz_percent(), 53);
        assert_eq!(progress.surah_percent(), 100);
        assert_eq!(percent(900, 604), 100);
    }

    #[test]
    fn test_ayah_bounded_by_surah_length() {
        let surahs = vec![Surah {
            number: 1,
            name: "الفاتحة".to_string(),
            english_name: "Al-Faatiha".to_string(),
            english_name_translation: "The Opening".to_string(),
            number_of_ayahs: 7,
            revelation_type: "Meccan".to_string(),
        }];
        let progress = QuranProgress {
            ayah: 50,
            ..QuranProgress::default()
        };
        assert_eq!(progress.clone().bounded_by(&surahs).ayah, 7);
        assert_eq!(progress.bounded_by(&[]).ayah, 50);
    }

    #[test]
    fn test_navigation_keeps_juz_in_sync() {
        let mut progress = QuranProgress {
            page: 21,
            ..QuranProgress::default()
        };
        assert!(progress.next_page());
        assert_eq!(progress.page, 22);
        assert_eq!(progress.juz, 2);
        assert!(progress.prev_page());
        assert_eq!(progress.juz, 1);

        let mut first = QuranProgress::default();
        assert!(!first.prev_page());
        assert_eq!(first.page, 1);

        let mut last = QuranProgress {
            page: TOTAL_PAGES,
            ..QuranProgress::default()
        };
        assert!(!last.next_page());
    }

    #[test]
    fn test_clamped() {
        let progress = QuranProgress {
            juz: 0,
            page: 700,
            surah: 200,
            ayah: 0,
            ..QuranProgress::default()
        }
        .clamped();
        assert_eq!((progress.juz, progress.page, progress.surah, progress.ayah), (1, 604, 114, 1));
    }

    #[test]
    fn test_daily_pace() {
        let progress = QuranProgress {
            page: 4,
            ..QuranProgress::default()
        };
        assert_eq!(progress.daily_pace(30), Some(20.0));
        assert_eq!(progress.daily_pace(0), None);
    }

    #[test]
    fn test_progress_json_uses_camel_case() {
        let json = serde_json::to_value(QuranProgress::default()).unwrap();
        assert!(json.get("lastUpdated").is_some());
        assert_eq!(json["juz"], 1);
    }
}
