use ratatui::style::Color;

use crate::status::StatusKind;

// Centralized theme colors. Keep these as small helpers so components never
// hard-code a palette.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    let (r, g, b) = ACCENT_RGB;
    Color::Rgb(r, g, b)
}

pub fn border() -> Color {
    Color::DarkGray
}

// Buttons
pub fn button_bg() -> Color {
    Color::Gray
}
pub fn button_fg() -> Color {
    Color::Black
}
pub fn button_disabled_fg() -> Color {
    Color::DarkGray
}

// Status bar
pub fn status_bg() -> Color {
    Color::Black
}

pub fn status_fg(kind: Option<StatusKind>) -> Color {
    match kind {
        Some(StatusKind::Success) => Color::Green,
        Some(StatusKind::Warning) => Color::Yellow,
        Some(StatusKind::Error) => Color::Red,
        Some(StatusKind::Info) | None => Color::White,
    }
}

// Help dialog
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
