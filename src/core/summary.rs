//! Per-mod summary loader state.
//!
//! At most one summary request is active. Selecting a new target clears
//! the previous text and enters loading before any network activity, so a
//! stale summary is never shown attributed to a new selection. Responses
//! are applied only when both the generation token and the target identity
//! still match.

use crate::api::types::ModSummary;

/// Placeholder shown when the summary endpoint cannot be reached.
/// Not retried automatically.
pub const SUMMARY_UNAVAILABLE: &str =
    "Summary unavailable. The service could not be reached; close and reopen to retry.";

pub struct SummaryPanel {
    target: Option<String>,
    title: String,
    text: String,
    loading: bool,
    generation: u64,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self {
            target: None,
            title: String::new(),
            text: String::new(),
            loading: false,
            generation: 0,
        }
    }

    /// Select `mod_id` as the new target and issue a request slot. The
    /// previous summary text is cleared immediately; `title` gives the
    /// panel a heading while loading.
    pub fn select(&mut self, mod_id: &str, title: &str) -> u64 {
        self.target = Some(mod_id.to_string());
        self.title = title.to_string();
        self.text.clear();
        self.loading = true;
        self.generation += 1;
        self.generation
    }

    /// Apply a fetch outcome for `mod_id`. Returns false if the response
    /// is stale or the target has changed (including after close).
    pub fn apply(
        &mut self,
        generation: u64,
        mod_id: &str,
        outcome: Result<ModSummary, String>,
    ) -> bool {
        if generation != self.generation || self.target.as_deref() != Some(mod_id) {
            log::debug!("dropping stale summary response for {mod_id}");
            return false;
        }

        match outcome {
            Ok(summary) => {
                self.title = summary.title;
                self.text = summary.summary;
            }
            Err(e) => {
                log::warn!("summary fetch failed for {mod_id}: {e}");
                self.text = SUMMARY_UNAVAILABLE.to_string();
            }
        }
        self.loading = false;
        true
    }

    /// Dismiss the panel. The in-flight request (if any) is not cancelled;
    /// its response fails the target check in [`apply`](Self::apply).
    pub fn close(&mut self) {
        self.target = None;
        self.loading = false;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Default for SummaryPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, text: &str) -> Result<ModSummary, String> {
        Ok(ModSummary {
            mod_id: id.to_string(),
            title: id.to_uppercase(),
            summary: text.to_string(),
        })
    }

    #[test]
    fn test_select_clears_previous_text() {
        let mut panel = SummaryPanel::new();
        let generation = panel.select("jei", "JEI");
        panel.apply(generation, "jei", summary("jei", "Recipe viewer."));
        assert_eq!(panel.text(), "Recipe viewer.");

        panel.select("botania", "Botania");
        assert!(panel.text().is_empty());
        assert!(panel.is_loading());
        assert_eq!(panel.target(), Some("botania"));
    }

    #[test]
    fn test_supersession_discards_late_response() {
        let mut panel = SummaryPanel::new();
        let for_x = panel.select("x", "X");
        let for_y = panel.select("y", "Y");

        assert!(panel.apply(for_y, "y", summary("y", "About Y.")));
        // X's response arrives after Y's and must be discarded.
        assert!(!panel.apply(for_x, "x", summary("x", "About X.")));

        assert_eq!(panel.target(), Some("y"));
        assert_eq!(panel.text(), "About Y.");
        assert!(!panel.is_loading());
    }

    #[test]
    fn test_failure_sets_placeholder() {
        let mut panel = SummaryPanel::new();
        let generation = panel.select("jei", "JEI");
        assert!(panel.apply(generation, "jei", Err("timeout".to_string())));
        assert_eq!(panel.text(), SUMMARY_UNAVAILABLE);
        assert!(!panel.is_loading());
        // Title from selection is kept so the panel stays attributed.
        assert_eq!(panel.title(), "JEI");
    }

    #[test]
    fn test_close_discards_in_flight_response() {
        let mut panel = SummaryPanel::new();
        let generation = panel.select("jei", "JEI");
        panel.close();
        assert!(!panel.is_open());
        assert!(!panel.apply(generation, "jei", summary("jei", "Late.")));
        assert!(!panel.is_open());
    }
}
