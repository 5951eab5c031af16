use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ramadan", version, author, about = "A terminal companion for the month of Ramadan")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hijri date, Ramadan status and today's dua
    Today,
    /// Fasting log
    Fast {
        #[command(subcommand)]
        action: FastCommands,
    },
    /// Quran reading position
    Quran {
        #[command(subcommand)]
        action: QuranCommands,
    },
    /// Today's good deeds challenge
    Deeds {
        #[command(subcommand)]
        action: DeedsCommands,
    },
    /// Dhikr counters
    Dhikr {
        #[command(subcommand)]
        action: DhikrCommands,
    },
    /// Read the adhkar of a category (morning, evening, general)
    Adhkar {
        #[arg(default_value = "morning")]
        category: String,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Erase all tracked progress (settings are kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FastCommands {
    /// Record a day as fasted, missed or exempt
    Mark {
        /// Date as YYYY-MM-DD, or "today"
        date: String,
        /// fasted, missed or exempt
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove the record for a day
    Clear {
        /// Date as YYYY-MM-DD, or "today"
        date: String,
    },
    /// Every recorded day
    List,
    /// Days still to make up
    Missed,
    /// Calendar grid of this Ramadan
    Calendar,
}

#[derive(Subcommand, Debug)]
pub enum QuranCommands {
    /// Current position and progress
    Show,
    /// Update the position
    Set {
        #[arg(long)]
        juz: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        surah: Option<u32>,
        #[arg(long)]
        ayah: Option<u32>,
    },
    /// Advance one page
    Next,
    /// Go back one page
    Prev,
    /// List all surahs
    Surahs,
}

#[derive(Subcommand, Debug)]
pub enum DeedsCommands {
    /// Today's deeds and streak
    List,
    /// Mark a deed done, or undo it
    Toggle {
        /// Deed id as shown by `deeds list`
        id: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum DhikrCommands {
    /// Today's counters
    List,
    /// Add to a counter
    Count {
        /// Dhikr id as shown by `dhikr list`
        id: u32,
        #[arg(long, default_value = "1")]
        times: u32,
    },
    /// Set every counter back to zero
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    Show,
    /// Turn a setting on or off
    Set {
        /// dark-mode, notifications or dhikr-reminders
        key: String,
        /// on or off
        value: String,
    },
}
