//! Autocomplete suggestion state.
//!
//! The suggestion list is replaced wholesale on each successful response
//! and always reflects the most recently issued request: a response whose
//! generation token no longer matches is discarded. Transport failures
//! degrade silently (suggestions are a convenience feature) by clearing and
//! hiding the list.

use crate::api::types::SuggestMode;

pub struct AutocompleteState {
    suggestions: Vec<String>,
    visible: bool,
    mode: SuggestMode,
    generation: u64,
}

impl AutocompleteState {
    pub fn new(mode: SuggestMode) -> Self {
        Self {
            suggestions: Vec::new(),
            visible: false,
            mode,
            generation: 0,
        }
    }

    /// Issue a new request slot. Returns the generation token the caller
    /// must attach to the fetch; any response carrying an older token is
    /// ignored by [`apply`](Self::apply).
    pub fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a fetch outcome. Returns false if the response was stale.
    pub fn apply(&mut self, generation: u64, outcome: Result<Vec<String>, String>) -> bool {
        if generation != self.generation {
            log::debug!(
                "dropping stale suggestion response (generation {generation}, current {})",
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.visible = true;
            }
            Err(e) => {
                // Log-only: no user-facing error for a degraded convenience
                // feature.
                log::warn!("suggestion fetch failed: {e}");
                self.suggestions.clear();
                self.visible = false;
            }
        }
        true
    }

    /// Hide the list without discarding the query or the suggestions.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Clear and hide the list (query became empty, no fetch issued).
    /// Also invalidates any in-flight request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.suggestions.clear();
        self.visible = false;
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mode(&self) -> SuggestMode {
        self.mode
    }

    /// Toggle the backend mode. Takes effect on the next issued fetch.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}
