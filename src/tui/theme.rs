//! Centralized color theme for the modseek TUI.
//!
//! All color constants are RGB truecolor. Views import from here instead
//! of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Deep green — primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x2E, 0x7D, 0x32);
/// Light green — highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x66, 0xBB, 0x6A);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber — accent, calls to action, important items.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x00);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text — secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text — disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error — failures.
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Success — confirmations.
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
/// Warning — degraded status.
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
/// Info — informational highlights.
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Title style (accent, bold).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default()
        .fg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Key hint style for the status bar and footers.
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_MUTED)
}
