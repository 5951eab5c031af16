use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::style::{Color, Modifier, Style};

pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub text_dim: Color,
    pub gold: Color,
    pub green: Color,
    pub amber: Color,
    pub red: Color,
    pub highlight: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 16, 14),
    surface: Color::Rgb(28, 25, 20),
    border: Color::Rgb(55, 48, 36),
    text: Color::Rgb(230, 218, 196),
    text_dim: Color::Rgb(130, 118, 96),
    gold: Color::Rgb(196, 160, 68),
    green: Color::Rgb(92, 148, 92),
    amber: Color::Rgb(210, 138, 60),
    red: Color::Rgb(180, 82, 62),
    highlight: Color::Rgb(70, 62, 48),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 246, 238),
    surface: Color::Rgb(243, 236, 222),
    border: Color::Rgb(206, 192, 164),
    text: Color::Rgb(48, 40, 28),
    text_dim: Color::Rgb(128, 114, 90),
    gold: Color::Rgb(150, 112, 24),
    green: Color::Rgb(46, 112, 58),
    amber: Color::Rgb(178, 98, 20),
    red: Color::Rgb(168, 52, 40),
    highlight: Color::Rgb(226, 212, 182),
};

static DARK_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_dark_mode(on: bool) {
    DARK_MODE.store(on, Ordering::Relaxed);
}

pub fn palette() -> &'static Palette {
    if DARK_MODE.load(Ordering::Relaxed) {
        &DARK
    } else {
        &LIGHT
    }
}

pub fn base() -> Style {
    Style::default().fg(palette().text).bg(palette().bg)
}

pub fn dim() -> Style {
    Style::default().fg(palette().text_dim)
}

pub fn gold() -> Style {
    Style::default().fg(palette().gold)
}

pub fn green() -> Style {
    Style::default().fg(palette().green)
}

pub fn amber() -> Style {
    Style::default().fg(palette().amber)
}

pub fn red() -> Style {
    Style::default().fg(palette().red)
}

pub fn bold() -> Style {
    Style::default().fg(palette().text).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(palette().text).bg(palette().surface)
}

pub fn border(focused: bool) -> Style {
    if focused {
        gold()
    } else {
        Style::default().fg(palette().border)
    }
}

/// Cursor cell in grids and lists.
pub fn selected() -> Style {
    Style::default()
        .bg(palette().highlight)
        .add_modifier(Modifier::BOLD)
}
