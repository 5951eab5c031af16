pub mod calendar;
pub mod format;
pub mod hijri;
pub mod shuffle;
