//! Search session state: one committed query's paginated result
//! accumulation.
//!
//! A session starts when a query is committed (page 0 replaces results)
//! and grows by load-more fetches (page > 0 appends). Pagination is
//! serialized per session by the in-flight flag; a new submit supersedes
//! any earlier in-flight fetch through the generation token.
//!
//! `has_more` is a heuristic: a full page implies possibly more, a short
//! page implies end of results. When the true total is an exact multiple
//! of the page size, one extra load-more returns an empty page that then
//! reports the end. This approximation is inherited from the service
//! contract and deliberately preserved.

use crate::api::types::ModResult;

/// Lifecycle of the result list, so "no results" renders distinctly from
/// "not yet searched" and from "loading".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query committed yet.
    Idle,
    /// Page 0 fetch in flight for a fresh session.
    Loading,
    /// At least one page applied (possibly with zero items).
    Loaded,
    /// The initial fetch failed; results were cleared.
    Failed,
}

/// Descriptor of an issued page fetch: the generation token to attach to
/// the response and the page index to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
}

/// Outcome of applying a fetch response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Response belonged to a superseded request; state untouched.
    Stale,
    /// Page applied.
    Applied,
    /// Transport failure applied per the failure policy; the caller should
    /// surface a visible, non-blocking notice.
    TransportFailed,
}

pub struct SearchSession {
    committed_query: String,
    page: u32,
    page_size: u32,
    results: Vec<ModResult>,
    has_more: bool,
    in_flight: bool,
    generation: u64,
    phase: SearchPhase,
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            committed_query: String::new(),
            page: 0,
            page_size,
            results: Vec::new(),
            has_more: false,
            in_flight: false,
            generation: 0,
            phase: SearchPhase::Idle,
        }
    }

    /// Commit `query` to a new session and issue page 0. Whitespace-only
    /// queries are treated as empty and issue nothing. Supersedes any
    /// earlier in-flight fetch.
    pub fn submit(&mut self, query: &str) -> Option<PageRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.committed_query = query.to_string();
        self.page = 0;
        self.generation += 1;
        self.in_flight = true;
        self.phase = SearchPhase::Loading;

        Some(PageRequest {
            generation: self.generation,
            page: 0,
        })
    }

    /// Issue the next page. No-op while no session is active, a fetch is
    /// already in flight, or the last page was short.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.committed_query.is_empty() || self.in_flight || !self.has_more {
            return None;
        }

        self.generation += 1;
        self.in_flight = true;

        Some(PageRequest {
            generation: self.generation,
            page: self.page + 1,
        })
    }

    /// Apply a fetch outcome for the request identified by `generation`.
    pub fn apply(
        &mut self,
        generation: u64,
        page: u32,
        outcome: Result<Vec<ModResult>, String>,
    ) -> SessionUpdate {
        if generation != self.generation {
            // The in-flight flag belongs to the newer request; leave it.
            log::debug!(
                "dropping stale search response for page {page} \
                 (generation {generation}, current {})",
                self.generation
            );
            return SessionUpdate::Stale;
        }

        self.in_flight = false;

        match outcome {
            Ok(items) => {
                self.has_more = items.len() as u32 == self.page_size;
                if page == 0 {
                    self.results = items;
                } else {
                    self.results.extend(items);
                }
                self.page = page;
                self.phase = SearchPhase::Loaded;
                SessionUpdate::Applied
            }
            Err(e) => {
                log::warn!(
                    "search fetch failed for \"{}\" page {page}: {e}",
                    self.committed_query
                );
                if page == 0 {
                    self.results.clear();
                    self.has_more = false;
                    self.phase = SearchPhase::Failed;
                } else {
                    // Prior pages stay; has_more unchanged so the user may
                    // retry load-more.
                }
                SessionUpdate::TransportFailed
            }
        }
    }

    pub fn results(&self) -> &[ModResult] {
        &self.results
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// A completed search that found nothing: the explicit "no results"
    /// state, not an error.
    pub fn no_results(&self) -> bool {
        self.phase == SearchPhase::Loaded && self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(count: usize, prefix: &str) -> Vec<ModResult> {
        (0..count)
            .map(|i| ModResult {
                id: format!("{prefix}-{i}"),
                title: format!("{prefix} {i}"),
                authors: vec!["author".to_string()],
                categories: vec!["misc".to_string()],
                description: String::new(),
                popularity_rank: i as u32,
                website_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_submit_empty_query_is_noop() {
        let mut session = SearchSession::new(10);
        assert!(session.submit("").is_none());
        assert!(session.submit("   ").is_none());
        assert_eq!(session.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_submit_then_full_page_sets_has_more() {
        let mut session = SearchSession::new(10);
        let request = session.submit("tinkers").unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(session.phase(), SearchPhase::Loading);

        let update = session.apply(request.generation, 0, Ok(mods(10, "t")));
        assert_eq!(update, SessionUpdate::Applied);
        assert_eq!(session.results().len(), 10);
        assert!(session.has_more());
        assert_eq!(session.phase(), SearchPhase::Loaded);
    }

    #[test]
    fn test_load_more_appends_in_order() {
        // Scenario B: full page 0, then a short page 1.
        let mut session = SearchSession::new(10);
        let request = session.submit("tinkers").unwrap();
        session.apply(request.generation, 0, Ok(mods(10, "p0")));

        let more = session.load_more().unwrap();
        assert_eq!(more.page, 1);
        session.apply(more.generation, 1, Ok(mods(3, "p1")));

        assert_eq!(session.results().len(), 13);
        assert_eq!(session.results()[0].id, "p0-0");
        assert_eq!(session.results()[10].id, "p1-0");
        assert!(!session.has_more());
        assert!(session.load_more().is_none());
    }

    #[test]
    fn test_short_page_zero_means_no_more() {
        let mut session = SearchSession::new(10);
        let request = session.submit("rare").unwrap();
        session.apply(request.generation, 0, Ok(mods(4, "r")));
        assert!(!session.has_more());
        assert!(session.load_more().is_none());
    }

    #[test]
    fn test_no_results_is_terminal_not_error() {
        // Scenario C.
        let mut session = SearchSession::new(10);
        let request = session.submit("zzz-no-match").unwrap();
        let update = session.apply(request.generation, 0, Ok(vec![]));
        assert_eq!(update, SessionUpdate::Applied);
        assert!(session.results().is_empty());
        assert!(session.no_results());
        assert!(!session.has_more());
    }

    #[test]
    fn test_submit_failure_clears_results() {
        // Scenario D.
        let mut session = SearchSession::new(10);
        let request = session.submit("foo").unwrap();
        session.apply(request.generation, 0, Ok(mods(10, "old")));

        let request = session.submit("foo").unwrap();
        let update = session.apply(
            request.generation,
            0,
            Err("connection refused".to_string()),
        );
        assert_eq!(update, SessionUpdate::TransportFailed);
        assert!(session.results().is_empty());
        assert!(!session.has_more());
        assert_eq!(session.phase(), SearchPhase::Failed);
        assert!(!session.no_results());
    }

    #[test]
    fn test_load_more_failure_preserves_results() {
        let mut session = SearchSession::new(10);
        let request = session.submit("foo").unwrap();
        session.apply(request.generation, 0, Ok(mods(10, "p0")));

        let more = session.load_more().unwrap();
        let update = session.apply(more.generation, 1, Err("timeout".to_string()));
        assert_eq!(update, SessionUpdate::TransportFailed);
        assert_eq!(session.results().len(), 10);
        // has_more untouched: the user may retry.
        assert!(session.has_more());
        assert!(session.load_more().is_some());
    }

    #[test]
    fn test_load_more_serialized_while_in_flight() {
        let mut session = SearchSession::new(10);
        let request = session.submit("foo").unwrap();
        session.apply(request.generation, 0, Ok(mods(10, "p0")));

        let first = session.load_more();
        assert!(first.is_some());
        // Second load-more while the first is still in flight: no-op.
        assert!(session.load_more().is_none());
    }

    #[test]
    fn test_new_submit_supersedes_in_flight_fetch() {
        let mut session = SearchSession::new(10);
        let old = session.submit("first").unwrap();
        let new = session.submit("second").unwrap();

        // Old response arrives late and is discarded.
        assert_eq!(
            session.apply(old.generation, 0, Ok(mods(10, "old"))),
            SessionUpdate::Stale
        );
        assert!(session.results().is_empty());
        assert!(session.is_in_flight());

        session.apply(new.generation, 0, Ok(mods(5, "new")));
        assert_eq!(session.results().len(), 5);
        assert_eq!(session.committed_query(), "second");
    }

    #[test]
    fn test_submit_idempotent_for_same_query() {
        let mut session = SearchSession::new(10);
        let first = session.submit("biomes").unwrap();
        session.apply(first.generation, 0, Ok(mods(7, "b")));
        let after_once: Vec<String> =
            session.results().iter().map(|m| m.id.clone()).collect();

        let second = session.submit("biomes").unwrap();
        session.apply(second.generation, 0, Ok(mods(7, "b")));
        let after_twice: Vec<String> =
            session.results().iter().map(|m| m.id.clone()).collect();

        assert_eq!(after_once, after_twice);
        assert_eq!(session.page(), 0);
    }

    #[test]
    fn test_exact_multiple_extra_page_is_empty() {
        // The documented approximation: total count 10 with page size 10
        // over-reports has_more; the follow-up page comes back empty and
        // settles it.
        let mut session = SearchSession::new(10);
        let request = session.submit("exact").unwrap();
        session.apply(request.generation, 0, Ok(mods(10, "e")));
        assert!(session.has_more());

        let more = session.load_more().unwrap();
        session.apply(more.generation, 1, Ok(vec![]));
        assert_eq!(session.results().len(), 10);
        assert!(!session.has_more());
    }
}
