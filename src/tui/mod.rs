//! Terminal front end: Elm-style event loop, search view, widgets.

pub mod app;
pub mod events;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
