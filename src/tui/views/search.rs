//! Search view — the interactive front end for the mod search service.
//!
//! Owns the query input line and orchestrates the three fetch flows:
//! debounced autocomplete while typing, the paginated search session on
//! submit, and the lazily loaded per-mod summary on selection. Fetches run
//! as spawned tasks that report back through the app event channel tagged
//! with the generation token captured at issue time.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::types::{ModResult, ModSummary};
use crate::config::SearchConfig;
use crate::core::autocomplete::AutocompleteState;
use crate::core::debounce::Debouncer;
use crate::core::session::{PageRequest, SearchPhase, SearchSession, SessionUpdate};
use crate::core::summary::SummaryPanel;

use super::super::events::AppEvent;
use super::super::services::Services;
use super::super::theme;
use super::super::widgets::input_buffer::InputBuffer;

// ── Focus zones ─────────────────────────────────────────────────────────────

/// Which panel currently has keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusZone {
    /// Query line — typing schedules debounced suggestion fetches.
    Input,
    /// Suggestion dropdown — j/k move, Enter commits the suggestion.
    Suggestions,
    /// Result list — j/k move, Enter opens the summary, m loads more.
    Results,
}

// ── State ────────────────────────────────────────────────────────────────────

pub struct SearchViewState {
    input: InputBuffer,
    focus: FocusZone,
    autocomplete: AutocompleteState,
    session: SearchSession,
    summary: SummaryPanel,
    /// Debounce for suggestion fetches while typing.
    suggest_debounce: Debouncer,
    /// Grace period before the dropdown hides after the input loses focus,
    /// so moving into the suggestion list never races the hide.
    hide_grace: Debouncer,
    suggest_size: u32,
    suggestion_cursor: usize,
    result_cursor: usize,
}

impl SearchViewState {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            input: InputBuffer::new(),
            focus: FocusZone::Input,
            autocomplete: AutocompleteState::new(config.suggest_mode()),
            session: SearchSession::new(config.page_size),
            summary: SummaryPanel::new(),
            suggest_debounce: Debouncer::new(std::time::Duration::from_millis(
                config.debounce_ms,
            )),
            hide_grace: Debouncer::new(std::time::Duration::from_millis(config.blur_grace_ms)),
            suggest_size: config.suggest_size,
            suggestion_cursor: 0,
            result_cursor: 0,
        }
    }

    /// Drive the timers. Call from on_tick.
    pub fn poll(&mut self, services: &Services) {
        if self.suggest_debounce.fire() {
            self.spawn_suggest_fetch(services);
        }
        if self.hide_grace.fire() {
            self.autocomplete.hide();
        }
    }

    // ── Fetch completion (routed from the app event loop) ───────────────

    pub fn on_suggestions(&mut self, generation: u64, outcome: Result<Vec<String>, String>) {
        if self.autocomplete.apply(generation, outcome) {
            self.suggestion_cursor = 0;
            if self.focus == FocusZone::Suggestions && self.autocomplete.suggestions().is_empty()
            {
                self.focus = FocusZone::Input;
            }
        }
    }

    /// Apply a search page. Returns a message to surface as an error
    /// notification when the fetch failed.
    pub fn on_search(
        &mut self,
        generation: u64,
        page: u32,
        outcome: Result<Vec<ModResult>, String>,
    ) -> Option<String> {
        match self.session.apply(generation, page, outcome) {
            SessionUpdate::Stale => None,
            SessionUpdate::Applied => {
                if page == 0 {
                    self.result_cursor = 0;
                } else {
                    self.clamp_result_cursor();
                }
                None
            }
            SessionUpdate::TransportFailed => Some(format!(
                "Search failed for \"{}\"",
                self.session.committed_query()
            )),
        }
    }

    pub fn on_summary(
        &mut self,
        generation: u64,
        mod_id: &str,
        outcome: Result<ModSummary, String>,
    ) {
        self.summary.apply(generation, mod_id, outcome);
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        // Summary panel consumes all input when open
        if self.summary.is_open() {
            return self.handle_summary_input(*code, *modifiers);
        }

        match self.focus {
            FocusZone::Input => self.handle_query_input(*code, *modifiers, services),
            FocusZone::Suggestions => self.handle_suggestion_input(*code, *modifiers, services),
            FocusZone::Results => self.handle_result_input(*code, *modifiers, services),
        }
    }

    fn handle_query_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match (modifiers, code) {
            // Leave Ctrl+C for the global quit binding.
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => false,
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                self.autocomplete.toggle_mode();
                true
            }
            (_, KeyCode::Esc) => {
                // Hide the dropdown; the query stays.
                self.autocomplete.hide();
                true
            }
            (_, KeyCode::Enter) => {
                self.submit_query(services);
                true
            }
            (_, KeyCode::Down) => {
                if self.autocomplete.is_visible() && !self.autocomplete.suggestions().is_empty()
                {
                    self.focus_suggestions();
                } else {
                    self.focus_results();
                }
                true
            }
            (_, KeyCode::Tab) => {
                self.focus_results();
                true
            }
            (_, KeyCode::Backspace) => {
                self.input.backspace();
                self.suggest_debounce.poke();
                true
            }
            (_, KeyCode::Delete) => {
                self.input.delete();
                self.suggest_debounce.poke();
                true
            }
            (_, KeyCode::Left) => {
                self.input.move_left();
                true
            }
            (_, KeyCode::Right) => {
                self.input.move_right();
                true
            }
            (_, KeyCode::Home) => {
                self.input.move_home();
                true
            }
            (_, KeyCode::End) => {
                self.input.move_end();
                true
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.input.insert_char(c);
                self.suggest_debounce.poke();
                true
            }
            _ => true, // Consume to avoid pass-through while typing
        }
    }

    fn handle_suggestion_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => false,
            (_, KeyCode::Esc) => {
                self.autocomplete.hide();
                self.focus = FocusZone::Input;
                true
            }
            (_, KeyCode::Enter) => {
                if let Some(picked) = self
                    .autocomplete
                    .suggestions()
                    .get(self.suggestion_cursor)
                    .cloned()
                {
                    self.input.set_text(&picked);
                    self.submit_query(services);
                }
                self.focus = FocusZone::Input;
                true
            }
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                let len = self.autocomplete.suggestions().len();
                if len > 0 && self.suggestion_cursor + 1 < len {
                    self.suggestion_cursor += 1;
                }
                true
            }
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                if self.suggestion_cursor == 0 {
                    // Back up into the query line; the dropdown stays open.
                    self.focus = FocusZone::Input;
                } else {
                    self.suggestion_cursor -= 1;
                }
                true
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                // Typing resumes editing the query.
                self.focus = FocusZone::Input;
                self.input.insert_char(c);
                self.suggest_debounce.poke();
                true
            }
            (_, KeyCode::Backspace) => {
                self.focus = FocusZone::Input;
                self.input.backspace();
                self.suggest_debounce.poke();
                true
            }
            _ => true,
        }
    }

    fn handle_result_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> bool {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => {
                self.move_result_cursor(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => {
                self.result_cursor = self.result_cursor.saturating_sub(1);
                true
            }
            (_, KeyCode::PageDown) => {
                self.move_result_cursor(10);
                true
            }
            (_, KeyCode::PageUp) => {
                self.result_cursor = self.result_cursor.saturating_sub(10);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.result_cursor = 0;
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                self.result_cursor = self.session.results().len().saturating_sub(1);
                true
            }
            (_, KeyCode::Enter) => {
                self.open_summary(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('m')) => {
                if let Some(request) = self.session.load_more() {
                    self.spawn_search_fetch(request, services);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('/') | KeyCode::Char('i'))
            | (_, KeyCode::Esc) => {
                self.focus_input(services);
                true
            }
            _ => false, // Let global keybindings (q, ?, ...) through
        }
    }

    fn handle_summary_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (modifiers, code) {
            // Leave Ctrl+C for the global quit binding.
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => false,
            (_, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) => {
                // In-flight fetches keep running; their responses are
                // discarded by the target check.
                self.summary.close();
                true
            }
            _ => true, // Consume all other input while the panel is open
        }
    }

    // ── Focus transitions ────────────────────────────────────────────────

    /// Return keyboard focus to the query line. A non-empty query
    /// re-triggers a suggestion fetch immediately (no debounce), so the
    /// dropdown reappears after focus was elsewhere.
    fn focus_input(&mut self, services: &Services) {
        self.focus = FocusZone::Input;
        self.hide_grace.cancel();
        if !self.input.is_empty() {
            self.spawn_suggest_fetch(services);
        }
    }

    fn focus_suggestions(&mut self) {
        self.focus = FocusZone::Suggestions;
        self.suggestion_cursor = 0;
        self.hide_grace.cancel();
    }

    /// Move focus to the result list. Hiding the dropdown is deferred by
    /// the grace period so a pick-up via the suggestion list is never
    /// pre-empted.
    fn focus_results(&mut self) {
        self.focus = FocusZone::Results;
        if self.autocomplete.is_visible() {
            self.hide_grace.poke();
        }
    }

    // ── Flow triggers ────────────────────────────────────────────────────

    /// Commit the current query: cancel any pending debounce and start a
    /// new session at page 0.
    fn submit_query(&mut self, services: &Services) {
        self.suggest_debounce.cancel();
        self.hide_grace.cancel();
        self.autocomplete.hide();

        let query = self.input.text().to_string();
        if let Some(request) = self.session.submit(&query) {
            self.focus = FocusZone::Results;
            self.spawn_search_fetch(request, services);
        }
    }

    fn open_summary(&mut self, services: &Services) {
        let Some(result) = self.session.results().get(self.result_cursor) else {
            return;
        };
        let mod_id = result.id.clone();
        let generation = self.summary.select(&mod_id, &result.title);

        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let outcome = api.summary(&mod_id).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SummaryLoaded {
                generation,
                mod_id,
                outcome,
            });
        });
    }

    /// Issue a suggestion fetch for the current query. An empty query
    /// issues nothing and clears the dropdown instead.
    fn spawn_suggest_fetch(&mut self, services: &Services) {
        let text = self.input.text().trim().to_string();
        if text.is_empty() {
            self.autocomplete.clear();
            return;
        }

        let generation = self.autocomplete.issue();
        let mode = self.autocomplete.mode();
        let size = self.suggest_size;
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let outcome = api
                .suggestions(mode, &text, size)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SuggestionsLoaded {
                generation,
                outcome,
            });
        });
    }

    fn spawn_search_fetch(&mut self, request: PageRequest, services: &Services) {
        let query = self.session.committed_query().to_string();
        let size = self.session.page_size();
        let api = services.api.clone();
        let tx = services.event_tx.clone();
        tokio::spawn(async move {
            let outcome = api
                .search(&query, size, request.page)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SearchLoaded {
                generation: request.generation,
                page: request.page,
                outcome,
            });
        });
    }

    // ── Cursor helpers ───────────────────────────────────────────────────

    fn move_result_cursor(&mut self, n: usize) {
        let last = self.session.results().len().saturating_sub(1);
        self.result_cursor = self.result_cursor.saturating_add(n).min(last);
    }

    fn clamp_result_cursor(&mut self) {
        let last = self.session.results().len().saturating_sub(1);
        self.result_cursor = self.result_cursor.min(last);
    }

    /// Suggest mode label for the status bar.
    pub fn mode_label(&self) -> &'static str {
        self.autocomplete.mode().label()
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);

        self.render_query_bar(frame, chunks[0]);
        self.render_body(frame, chunks[1]);

        if self.autocomplete.is_visible() && !self.autocomplete.suggestions().is_empty() {
            self.render_suggestions(frame, chunks[0], chunks[1]);
        }

        if self.summary.is_open() {
            self.render_summary_panel(frame, area);
        }
    }

    fn render_query_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusZone::Input;
        let border = if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let block = Block::default()
            .title(" Query ")
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = self.input.text();
        let display = if text.is_empty() && !focused {
            Span::styled(
                "Type to search mods...",
                Style::default().fg(theme::TEXT_DIM),
            )
        } else if focused {
            Span::styled(format!("{text}_"), Style::default().fg(theme::TEXT))
        } else {
            Span::styled(text.to_string(), Style::default().fg(theme::TEXT))
        };

        let mode_tag = format!("[{}]", self.autocomplete.mode().label());
        let pad = mode_tag_pad(inner.width, text, &mode_tag);

        let line = Line::from(vec![
            Span::raw(" "),
            display,
            Span::raw(" ".repeat(pad)),
            Span::styled(mode_tag, Style::default().fg(theme::TEXT_MUTED)),
        ]);
        frame.render_widget(Paragraph::new(vec![line]), inner);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        match self.session.phase() {
            SearchPhase::Idle => {
                self.render_body_message(
                    frame,
                    area,
                    "Type a query and press Enter to search.",
                    theme::TEXT_MUTED,
                );
            }
            SearchPhase::Loading => {
                self.render_body_message(frame, area, "Searching...", theme::TEXT_MUTED);
            }
            SearchPhase::Failed => {
                self.render_body_message(
                    frame,
                    area,
                    "Search failed. Edit the query and press Enter to retry.",
                    theme::ERROR,
                );
            }
            SearchPhase::Loaded if self.session.no_results() => {
                let message =
                    format!("No results for \"{}\"", self.session.committed_query());
                self.render_body_message(frame, area, &message, theme::TEXT_MUTED);
            }
            SearchPhase::Loaded => {
                let halves = Layout::horizontal([
                    Constraint::Percentage(58),
                    Constraint::Percentage(42),
                ])
                .split(area);
                self.render_result_list(frame, halves[0]);
                self.render_result_detail(frame, halves[1]);
            }
        }
    }

    fn render_body_message(
        &self,
        frame: &mut Frame,
        area: Rect,
        message: &str,
        color: ratatui::style::Color,
    ) {
        let block = Block::default()
            .title(" Results ")
            .borders(Borders::ALL)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(message.to_string(), Style::default().fg(color)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_result_list(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FocusZone::Results;
        let border = if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let results = self.session.results();
        let footer = if self.session.is_in_flight() {
            " loading... ".to_string()
        } else if self.session.has_more() {
            format!(" {} results · m:more ", results.len())
        } else {
            format!(" {} results · end ", results.len())
        };

        let block = Block::default()
            .title(format!(" Results: {} ", self.session.committed_query()))
            .title_bottom(Line::from(footer).right_aligned())
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Keep the selected row inside the window.
        let visible = inner.height as usize;
        let offset = self
            .result_cursor
            .saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = results
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, result)| {
                let selected = focused && i == self.result_cursor;
                let pointer = if selected { "\u{25b8} " } else { "  " };
                let style = if selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(vec![
                    Span::styled(pointer, Style::default().fg(theme::ACCENT)),
                    Span::styled(truncated(&result.title, 36), style),
                    Span::styled(
                        format!("  #{}", result.popularity_rank),
                        Style::default().fg(theme::TEXT_DIM),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_result_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Details ")
            .borders(Borders::ALL)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = self.session.results().get(self.result_cursor) else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(result.title.clone(), theme::title())),
            Line::raw(""),
            field_line("Authors", result.authors.join(", ")),
            field_line("Categories", result.categories.join(", ")),
            field_line("Popularity", format!("#{}", result.popularity_rank)),
            field_line("Website", result.website_url.clone()),
            Line::raw(""),
        ];
        lines.push(Line::from(Span::styled(
            result.description.clone(),
            Style::default().fg(theme::TEXT),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", theme::key_hint()),
            Span::raw(": AI summary"),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_suggestions(&self, frame: &mut Frame, query_area: Rect, body_area: Rect) {
        let suggestions = self.autocomplete.suggestions();
        let height = (suggestions.len() as u16 + 2).min(body_area.height);
        let width = query_area.width.saturating_sub(4).min(48).max(20);
        let dropdown = Rect::new(
            query_area.x + 2,
            query_area.y + query_area.height.saturating_sub(1),
            width,
            height,
        );

        let focused = self.focus == FocusZone::Suggestions;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(dropdown);

        frame.render_widget(Clear, dropdown);
        frame.render_widget(block, dropdown);

        let lines: Vec<Line> = suggestions
            .iter()
            .enumerate()
            .map(|(i, suggestion)| {
                let selected = focused && i == self.suggestion_cursor;
                let pointer = if selected { "\u{25b8} " } else { "  " };
                let style = if selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                Line::from(vec![
                    Span::styled(pointer, Style::default().fg(theme::ACCENT)),
                    Span::styled(truncated(suggestion, width as usize - 4), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_summary_panel(&self, frame: &mut Frame, area: Rect) {
        let panel = centered_fixed(64, 14, area);

        let block = Block::default()
            .title(format!(" {} ", self.summary.title()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(panel);

        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let mut lines = vec![Line::raw("")];
        if self.summary.is_loading() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    "Generating summary...",
                    Style::default().fg(theme::TEXT_MUTED),
                ),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                self.summary.text().to_string(),
                Style::default().fg(theme::TEXT),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  Esc", theme::key_hint()),
            Span::raw(":close"),
        ]));

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            inner,
        );
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default()
                .fg(theme::TEXT_MUTED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

/// Padding that right-aligns the mode tag in the query bar. Counts
/// characters, not bytes, so multibyte queries keep the tag in place.
fn mode_tag_pad(inner_width: u16, query: &str, tag: &str) -> usize {
    (inner_width as usize).saturating_sub(query.chars().count() + tag.len() + 4)
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Compute a centered rectangle with fixed dimensions.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
