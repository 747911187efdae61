//! modseek — terminal client for a remote mod search service.
//!
//! The crate is split into three layers:
//! - [`api`]: the HTTP contract with the search service (reqwest client,
//!   wire types).
//! - [`core`]: the interaction state machines (autocomplete, search
//!   session, summary loader, debounce). These are UI-free and fully unit
//!   testable.
//! - [`tui`]: the ratatui front end wiring keystrokes and the tokio event
//!   loop to the state machines.

pub mod api;
pub mod config;
pub mod core;
pub mod logging;
pub mod tui;

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
