pub mod adhkar;
pub mod deeds;
pub mod dhikr;
pub mod fasting;
pub mod header;
pub mod quran;
pub mod statusbar;
