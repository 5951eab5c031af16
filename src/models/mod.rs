pub mod adhkar;
pub mod deeds;
pub mod dhikr;
pub mod duas;
pub mod fasting;
pub mod quran;
pub mod settings;

pub use adhkar::AdhkarCategory;
pub use deeds::{DailyChallenge, DeedStreak};
pub use dhikr::{DhikrItem, Increment};
pub use fasting::{FastingDay, FastingStatus, FastingSummary};
pub use quran::{QuranProgress, Surah};
pub use settings::{SettingKey, UserSettings};
