//! Events flowing through the Elm-architecture event loop.

use crate::api::types::{ModResult, ModSummary};

/// Completion events carry the generation token captured when the request
/// was issued; the receiving state machine compares it against its current
/// generation and discards stale responses. Errors travel as display
/// strings because `reqwest::Error` is not `Clone`.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for debounce timers, notification TTLs, etc.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Autocomplete fetch completed.
    SuggestionsLoaded {
        generation: u64,
        outcome: Result<Vec<String>, String>,
    },
    /// Search page fetch completed (submit or load-more).
    SearchLoaded {
        generation: u64,
        page: u32,
        outcome: Result<Vec<ModResult>, String>,
    },
    /// Summary fetch completed.
    SummaryLoaded {
        generation: u64,
        mod_id: String,
        outcome: Result<ModSummary, String>,
    },
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
