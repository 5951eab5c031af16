use chrono::{Datelike, Duration, NaiveDate};

use crate::utils::hijri::{convert, tabular_to_gregorian, RAMADAN};

/// Gregorian span of one Ramadan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamadanWindow {
    pub hijri_year: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl RamadanWindow {
    pub fn len(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }

    /// Day of Ramadan (1-based) for a date inside the window.
    pub fn day_number(&self, date: NaiveDate) -> Option<u32> {
        if self.contains(date) {
            Some(((date - self.start).num_days() + 1) as u32)
        } else {
            None
        }
    }

    /// Empty cells before the first day in a Sunday-first week grid.
    pub fn leading_blanks(&self) -> u32 {
        self.start.weekday().num_days_from_sunday()
    }
}

/// Locate Ramadan of `hijri_year` on the Gregorian calendar using the same
/// conversion (and moon-sighting offset) as the rest of the app.
pub fn ramadan_window(hijri_year: usize, offset_days: i32) -> RamadanWindow {
    let guess = tabular_to_gregorian(hijri_year as i64, RAMADAN as i64, 1)
        .unwrap_or(NaiveDate::MIN)
        - Duration::days(offset_days as i64);

    let start = (-3..=3)
        .map(|delta| guess + Duration::days(delta))
        .find(|d| {
            let h = convert(*d, offset_days);
            h.year == hijri_year && h.month == RAMADAN && h.day == 1
        })
        .unwrap_or(guess);

    let mut end = start + Duration::days(28);
    while end < start + Duration::days(29) && convert(end + Duration::days(1), offset_days).month == RAMADAN {
        end += Duration::days(1);
    }

    RamadanWindow {
        hijri_year,
        start,
        end,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RamadanStatus {
    Upcoming {
        window: RamadanWindow,
        days_until: i64,
    },
    Ongoing {
        window: RamadanWindow,
        day: u32,
        days_remaining: u32,
    },
    Completed {
        window: RamadanWindow,
        next: RamadanWindow,
    },
}

impl RamadanStatus {
    /// The season a fasting calendar should show: the running or next
    /// Ramadan, or the one just finished so missed days can still be logged.
    pub fn window(&self) -> RamadanWindow {
        match self {
            RamadanStatus::Upcoming { window, .. }
            | RamadanStatus::Ongoing { window, .. }
            | RamadanStatus::Completed { window, .. } => *window,
        }
    }

    /// Days left to read in, today included. None once Ramadan is over.
    pub fn reading_days_left(&self) -> Option<u32> {
        match self {
            RamadanStatus::Upcoming { window, .. } => Some(window.len()),
            RamadanStatus::Ongoing { days_remaining, .. } => Some(days_remaining + 1),
            RamadanStatus::Completed { .. } => None,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RamadanStatus::Upcoming { .. } => "Prepare for the blessed month",
            RamadanStatus::Ongoing { .. } => "Make the most of this blessed time",
            RamadanStatus::Completed { .. } => "Don't forget to make up missed fasts",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            RamadanStatus::Upcoming { window, days_until } => format!(
                "Starts on {} ({} days)",
                window.start.format("%B %-d, %Y"),
                days_until
            ),
            RamadanStatus::Ongoing {
                day,
                days_remaining,
                ..
            } => format!("Day {} · {} days remaining", day, days_remaining),
            RamadanStatus::Completed { window, next } => format!(
                "Ended on {} · next Ramadan starts {}",
                window.end.format("%B %-d, %Y"),
                next.start.format("%B %-d, %Y")
            ),
        }
    }
}

pub fn ramadan_status(today: NaiveDate, offset_days: i32) -> RamadanStatus {
    let h = convert(today, offset_days);
    let window = ramadan_window(h.year, offset_days);

    if h.month == RAMADAN {
        let day = window.day_number(today).unwrap_or(h.day as u32);
        RamadanStatus::Ongoing {
            window,
            day,
            days_remaining: window.len().saturating_sub(day),
        }
    } else if h.month < RAMADAN {
        RamadanStatus::Upcoming {
            window,
            days_until: (window.start - today).num_days(),
        }
    } else {
        RamadanStatus::Completed {
            window,
            next: ramadan_window(h.year + 1, offset_days),
        }
    }
}
