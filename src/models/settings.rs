use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_true")]
    pub dhikr_reminders_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_enabled: true,
            dhikr_reminders_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    DarkMode,
    Notifications,
    DhikrReminders,
}

impl SettingKey {
    pub fn all() -> [SettingKey; 3] {
        [SettingKey::DarkMode, SettingKey::Notifications, SettingKey::DhikrReminders]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DarkMode => "dark-mode",
            SettingKey::Notifications => "notifications",
            SettingKey::DhikrReminders => "dhikr-reminders",
        }
    }
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "dark-mode" | "dark" => Ok(SettingKey::DarkMode),
            "notifications" => Ok(SettingKey::Notifications),
            "dhikr-reminders" | "reminders" => Ok(SettingKey::DhikrReminders),
            _ => Err(anyhow::anyhow!(
                "Unknown setting: {} (use dark-mode, notifications or dhikr-reminders)",
                s
            )),
        }
    }
}

impl UserSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::DarkMode => self.dark_mode,
            SettingKey::Notifications => self.notifications_enabled,
            SettingKey::DhikrReminders => self.dhikr_reminders_enabled,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::DarkMode => self.dark_mode = value,
            SettingKey::Notifications => self.notifications_enabled = value,
            SettingKey::DhikrReminders => self.dhikr_reminders_enabled = value,
        }
    }
}

/// Accepts on/off, true/false, yes/no, 1/0.
pub fn parse_switch(s: &str) -> anyhow::Result<bool> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(anyhow::anyhow!("Expected on or off, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let s: UserSettings = serde_json::from_str(r#"{"darkMode":true}"#).unwrap();
        assert!(s.dark_mode);
        assert!(s.notifications_enabled);
        assert!(s.dhikr_reminders_enabled);
    }

    #[test]
    fn test_set_and_get() {
        let mut s = UserSettings::default();
        s.set(SettingKey::DhikrReminders, false);
        assert!(!s.get(SettingKey::DhikrReminders));
        assert_eq!("dark_mode".parse::<SettingKey>().unwrap(), SettingKey::DarkMode);
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("ON").unwrap());
        assert!(!parse_switch("no").unwrap());
        assert!(parse_switch("maybe").is_err());
    }
}
