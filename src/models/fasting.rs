use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastingStatus {
    Fasted,
    Missed,
    Exempt,
}

impl FastingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastingStatus::Fasted => "fasted",
            FastingStatus::Missed => "missed",
            FastingStatus::Exempt => "exempt",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FastingStatus::Fasted => "✓",
            FastingStatus::Missed => "✗",
            FastingStatus::Exempt => "–",
        }
    }
}

impl std::fmt::Display for FastingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FastingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fasted" | "done" => Ok(FastingStatus::Fasted),
            "missed" => Ok(FastingStatus::Missed),
            "exempt" => Ok(FastingStatus::Exempt),
            _ => Err(anyhow::anyhow!(
                "Unknown fasting status: {} (use fasted, missed or exempt)",
                s
            )),
        }
    }
}

/// One tracked day of the fasting calendar, keyed by its ISO date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingDay {
    pub date: String,
    pub status: FastingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FastingDay {
    pub fn new(date: NaiveDate, status: FastingStatus, notes: Option<String>) -> Self {
        let notes = notes.and_then(|n| {
            let trimmed = n.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            status,
            notes,
        }
    }

    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FastingSummary {
    pub tracked: usize,
    pub fasted: usize,
    pub missed: usize,
    pub exempt: usize,
}

impl FastingSummary {
    pub fn from_days(days: &[FastingDay]) -> Self {
        let count = |s: FastingStatus| days.iter().filter(|d| d.status == s).count();
        Self {
            tracked: days.len(),
            fasted: count(FastingStatus::Fasted),
            missed: count(FastingStatus::Missed),
            exempt: count(FastingStatus::Exempt),
        }
    }

    /// "3 fasts to make up" / "1 fast to make up" / "0 fasts missed"
    pub fn makeup_label(&self) -> String {
        let noun = if self.missed == 1 { "fast" } else { "fasts" };
        if self.missed > 0 {
            format!("{} {} to make up", self.missed, noun)
        } else {
            format!("{} {} missed", self.missed, noun)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(FastingStatus::from_str("Fasted").unwrap(), FastingStatus::Fasted);
        assert_eq!(FastingStatus::from_str("EXEMPT").unwrap(), FastingStatus::Exempt);
        assert!(FastingStatus::from_str("skipped").is_err());
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day = FastingDay::new(date, FastingStatus::Fasted, Some("   ".to_string()));
        assert_eq!(day.notes, None);
        assert_eq!(day.date, "2025-03-01");
    }

    #[test]
    fn test_json_shape() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let day = FastingDay::new(date, FastingStatus::Missed, Some("travel".to_string()));
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, r#"{"date":"2025-03-02","status":"missed","notes":"travel"}"#);
    }

    #[test]
    fn test_makeup_label() {
        let mut summary = FastingSummary::default();
        assert_eq!(summary.makeup_label(), "0 fasts missed");
        summary.missed = 1;
        assert_eq!(summary.makeup_label(), "1 fast to make up");
        summary.missed = 4;
        assert_eq!(summary.makeup_label(), "4 fasts to make up");
    }
}
