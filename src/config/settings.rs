use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_hijri_offset() -> i32 {
    0
}
fn default_aladhan_base() -> String {
    "https://api.aladhan.com/v1".to_string()
}
fn default_quran_base() -> String {
    "https://api.alquran.cloud/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_per_day() -> usize {
    5
}
fn default_reminder_hour() -> u32 {
    16
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Days to add/subtract from the Hijri date for local moon sighting.
    /// 0 = Umm al-Qura, -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Set to false to stay fully offline.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_aladhan_base")]
    pub aladhan_base: String,
    #[serde(default = "default_quran_base")]
    pub quran_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            aladhan_base: default_aladhan_base(),
            quran_base: default_quran_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeedsConfig {
    #[serde(default = "default_per_day")]
    pub per_day: usize,
}

impl Default for DeedsConfig {
    fn default() -> Self {
        Self {
            per_day: default_per_day(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DhikrConfig {
    /// Local hour (0-23) of the daily dhikr reminder.
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u32,
}

impl Default for DhikrConfig {
    fn default() -> Self {
        Self {
            reminder_hour: default_reminder_hour(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub deeds: DeedsConfig,
    #[serde(default)]
    pub dhikr: DhikrConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "ramadan-companion")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("ramadan.db"))
    }

    /// Loads config.toml, writing the defaults there on first run so there
    /// is a file to edit.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(&path) {
                log::warn!("Could not write default config to {:?}: {}", path, e);
            }
            return Ok(config);
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config.normalized())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn normalized(mut self) -> Self {
        if !(-3..=3).contains(&self.calendar.hijri_offset) {
            log::warn!(
                "hijri_offset {} out of range, clamping to ±3",
                self.calendar.hijri_offset
            );
            self.calendar.hijri_offset = self.calendar.hijri_offset.clamp(-3, 3);
        }
        self.dhikr.reminder_hour = self.dhikr.reminder_hour.min(23);
        self.api.timeout_secs = self.api.timeout_secs.max(1);
        self
    }
}
