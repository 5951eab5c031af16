use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

pub const RAMADAN: usize = 9;

/// JDN of 1 Muharram 1 AH in the civil (Friday epoch) tabular calendar.
const ISLAMIC_EPOCH_JDN: i64 = 1_948_440;
/// JDN of 0001-01-01 CE minus one, so that `num_days_from_ce() + this` is a JDN.
const CE_JDN_OFFSET: i64 = 1_721_425;

pub fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    fn from_parts(day: usize, month: usize, year: usize) -> Self {
        Self {
            day,
            month,
            year,
            month_name: hijri_month_name(month).to_string(),
        }
    }

    /// "3rd Ramadan 1446 AH"
    pub fn long_form(&self) -> String {
        format!("{} {} {} AH", format_ordinal(self.day), self.month_name, self.year)
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == RAMADAN
    }
}

/// Umm al-Qura conversion through the `hijri_date` tables.
pub fn to_hijri(date: NaiveDate) -> Result<HijriInfo> {
    let hd = HijriDate::from_gr(
        date.year() as usize,
        date.month() as usize,
        date.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    Ok(HijriInfo::from_parts(hd.day(), hd.month(), hd.year()))
}

/// Hijri date for `date` shifted by `offset_days` for local moon sighting.
/// Falls back to the tabular calendar outside the range covered by the
/// Umm al-Qura tables, so it never fails.
pub fn convert(date: NaiveDate, offset_days: i32) -> HijriInfo {
    let adjusted = date + Duration::days(offset_days as i64);
    match to_hijri(adjusted) {
        Ok(info) => info,
        Err(e) => {
            log::debug!("{}; using tabular calendar for {}", e, adjusted);
            tabular(adjusted)
        }
    }
}

/// Arithmetic (tabular) conversion, 30-year cycle with 11 leap years.
pub fn tabular(date: NaiveDate) -> HijriInfo {
    let (year, month, day) = jdn_to_hijri(gregorian_to_jdn(date));
    HijriInfo::from_parts(day as usize, month as usize, year as usize)
}

pub fn gregorian_to_jdn(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + CE_JDN_OFFSET
}

pub fn jdn_to_gregorian(jdn: i64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt((jdn - CE_JDN_OFFSET) as i32)
}

pub fn hijri_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    day + (59 * (month - 1) + 1) / 2
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + ISLAMIC_EPOCH_JDN
        - 1
}

pub fn jdn_to_hijri(jdn: i64) -> (i64, i64, i64) {
    let year = (30 * (jdn - ISLAMIC_EPOCH_JDN) + 10646).div_euclid(10631);
    let first_of_year = hijri_to_jdn(year, 1, 1);
    // ceil((jdn - (29 + first)) / 29.5) + 1
    let twice = 2 * (jdn - 29 - first_of_year);
    let month = (-(-twice).div_euclid(59) + 1).clamp(1, 12);
    let day = jdn - hijri_to_jdn(year, month, 1) + 1;
    (year, month, day)
}

/// Gregorian date of a Hijri date in the tabular calendar.
pub fn tabular_to_gregorian(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    jdn_to_gregorian(hijri_to_jdn(year, month, day))
}

/// 1st, 2nd, 3rd, 4th ... 11th, 12th, 13th ... 21st
pub fn format_ordinal(day: usize) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_jdn_of_known_date() {
        assert_eq!(gregorian_to_jdn(ymd(2000, 1, 1)), 2_451_545);
        assert_eq!(jdn_to_gregorian(2_451_545), Some(ymd(2000, 1, 1)));
    }

    #[test]
    fn test_tabular_epoch() {
        assert_eq!(hijri_to_jdn(1, 1, 1), ISLAMIC_EPOCH_JDN);
        assert_eq!(jdn_to_hijri(ISLAMIC_EPOCH_JDN), (1, 1, 1));
    }

    #[test]
    fn test_tabular_ramadan_1446() {
        assert_eq!(tabular_to_gregorian(1446, 9, 1), Some(ymd(2025, 3, 1)));
        let info = tabular(ymd(2025, 3, 1));
        assert_eq!((info.year, info.month, info.day), (1446, 9, 1));
        assert!(info.is_ramadan());
    }

    #[test]
    fn test_tabular_round_trip() {
        for year in [1, 600, 1445, 1446, 1447, 1600] {
            for month in 1..=12 {
                for day in [1, 15, 29] {
                    let jdn = hijri_to_jdn(year, month, day);
                    assert_eq!(jdn_to_hijri(jdn), (year, month, day));
                }
            }
        }
    }

    #[test]
    fn test_tabular_days_are_contiguous() {
        let mut prev = jdn_to_hijri(hijri_to_jdn(1446, 1, 1));
        for offset in 1..400 {
            let next = jdn_to_hijri(hijri_to_jdn(1446, 1, 1) + offset);
            let advanced_day = next.0 == prev.0 && next.1 == prev.1 && next.2 == prev.2 + 1;
            let new_month = next.2 == 1 && (next.1 == prev.1 + 1 || (next.1 == 1 && prev.1 == 12));
            assert!(advanced_day || new_month, "{:?} -> {:?}", prev, next);
            prev = next;
        }
    }

    #[test]
    fn test_umm_al_qura_ramadan_start() {
        let info = to_hijri(ymd(2025, 3, 1)).unwrap();
        assert_eq!((info.year, info.month, info.day), (1446, 9, 1));
        assert_eq!(info.month_name, "Ramadan");
    }

    #[test]
    fn test_convert_applies_offset() {
        let base = convert(ymd(2025, 3, 1), 0);
        let shifted = convert(ymd(2025, 3, 1), 1);
        assert_eq!(shifted.day, base.day + 1);
    }

    #[test]
    fn test_convert_falls_back_outside_tables() {
        let info = convert(ymd(1800, 6, 1), 0);
        assert_eq!(info, tabular(ymd(1800, 6, 1)));
    }

    #[test]
    fn test_format_ordinal() {
        let cases = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"),
                     (12, "12th"), (13, "13th"), (21, "21st"), (22, "22nd"), (30, "30th")];
        for (day, expected) in cases {
            assert_eq!(format_ordinal(day), expected);
        }
    }

    #[test]
    fn test_long_form() {
        let info = tabular(ymd(2025, 3, 3));
        assert_eq!(info.long_form(), "3rd Ramadan 1446 AH");
    }
}
