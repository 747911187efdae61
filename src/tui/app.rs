use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::AppConfig;

use super::events::{AppEvent, Notification, NotificationLevel};
use super::services::Services;
use super::theme;
use super::views::search::SearchViewState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Search view state.
    pub search: SearchViewState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
    ) -> Self {
        Self {
            running: true,
            search: SearchViewState::new(&config.search),
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    /// Main event loop: render, then wait for the next tick, backend
    /// event, or terminal input.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal consumes all input when open
                if self.show_help {
                    if is_key_press(&crossterm_event) {
                        self.show_help = false;
                    }
                    return;
                }

                // Priority 2: The search view
                if self.search.handle_input(&crossterm_event, &self.services) {
                    return;
                }

                // Priority 3: Global keybindings
                self.handle_global_input(&crossterm_event);
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::SuggestionsLoaded {
                generation,
                outcome,
            } => {
                self.search.on_suggestions(generation, outcome);
            }
            AppEvent::SearchLoaded {
                generation,
                page,
                outcome,
            } => {
                if let Some(message) = self.search.on_search(generation, page, outcome) {
                    self.push_notification(message, NotificationLevel::Error);
                }
            }
            AppEvent::SummaryLoaded {
                generation,
                mod_id,
                outcome,
            } => {
                self.search.on_summary(generation, &mod_id, outcome);
            }
        }
    }

    fn handle_global_input(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.running = false;
            }
            (_, KeyCode::Char('?')) => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, drive the
    /// search view's timers.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        self.search.poll(&self.services);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        self.search.render(frame, chunks[0]);
        self.render_status_bar(frame, chunks[1]);

        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = Line::from(vec![
            Span::styled(
                " modseek ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("suggest:", theme::key_hint()),
            Span::styled(
                self.search.mode_label(),
                Style::default().fg(theme::PRIMARY_LIGHT),
            ),
            Span::raw(" │ "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":search "),
            Span::styled("Ctrl+T", theme::key_hint()),
            Span::raw(":mode "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Query line:", ""),
            ("type", "Edit query (suggestions appear as you type)"),
            ("Enter", "Run the search"),
            ("Ctrl+T", "Toggle suggestion mode (fast/advanced)"),
            ("Down", "Into suggestions, or results"),
            ("Esc", "Hide suggestions"),
            ("", ""),
            ("Suggestions:", ""),
            ("j/k or arrows", "Navigate"),
            ("Enter", "Search for the selected suggestion"),
            ("Esc", "Dismiss"),
            ("", ""),
            ("Results:", ""),
            ("j/k or arrows", "Navigate"),
            ("g / G", "Jump to top / bottom"),
            ("Enter", "Open AI summary for selected mod"),
            ("m", "Load more results"),
            ("/ or i", "Back to the query line"),
        ];

        let lines: Vec<Line> = keybindings
            .into_iter()
            .map(|(key, description)| {
                if description.is_empty() {
                    Line::from(Span::styled(key, theme::title()))
                } else {
                    Line::from(vec![
                        Span::styled(
                            format!("  {key:<16}"),
                            Style::default().fg(theme::PRIMARY_LIGHT),
                        ),
                        Span::styled(description, Style::default().fg(theme::TEXT)),
                    ])
                }
            })
            .collect();

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(modal);

        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn is_key_press(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// Compute a centered rectangle as a percentage of the available area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);

    horizontal[1]
}
