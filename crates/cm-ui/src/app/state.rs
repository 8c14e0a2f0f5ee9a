use anyhow::Result;
use cm_core::merge::{merge, render_pretty, MergeStats, SLOT_COUNT};
use crossterm::{
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crate::clipboard;
use crate::events::Event;
use crate::theme::Theme;

/// How long the transient copy status stays on screen
const COPY_STATUS_TTL: Duration = Duration::from_secs(2);

/// Poll interval for the event loop
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Placeholder shown in empty input slots
const SLOT_PLACEHOLDER: &str = r#"[{"time": "00:00.50", ...}]"#;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Editing the input slots
    Edit,
    /// Help overlay
    Help,
}

impl Default for AppMode {
    fn default() -> Self {
        AppMode::Edit
    }
}

/// Transient copy acknowledgment, cleared by the tick handler
#[derive(Debug, Clone)]
pub struct CopyStatus {
    /// Message shown in the status bar
    pub message: String,
    /// When the message should disappear
    pub expires_at: Instant,
}

/// Application state
///
/// All of it is transient: six input buffers, the last merge result, stats,
/// the error banner and the copy status. Every user action mutates this
/// struct through a method that is testable without a terminal.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Raw text of the six input slots
    pub inputs: [String; SLOT_COUNT],
    /// Per-slot cursor position, in characters
    pub cursors: [usize; SLOT_COUNT],
    /// Index of the focused slot
    pub focus: usize,
    /// Pretty-printed merge result, if any
    pub merged_json: Option<String>,
    /// Stats for the last successful merge
    pub stats: Option<MergeStats>,
    /// Error banner content
    pub error: Option<String>,
    /// Transient copy acknowledgment
    pub copy_status: Option<CopyStatus>,
    /// Scroll offset for the output pane
    pub output_scroll: u16,
    /// Should quit
    pub should_quit: bool,
}

impl AppState {
    /// Create a new app state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with some slots preloaded
    pub fn with_inputs(inputs: [String; SLOT_COUNT]) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// At least one slot has content, so merge is available
    pub fn can_merge(&self) -> bool {
        self.inputs.iter().any(|s| !s.trim().is_empty())
    }

    /// A merge result exists, so copy is available
    pub fn can_copy(&self) -> bool {
        self.merged_json.is_some()
    }

    /// Run the merge over the current slots.
    ///
    /// On success the previous result, stats and error are replaced. On
    /// failure only the error banner changes; an earlier result stays on
    /// screen until the input is corrected and merge retried.
    pub fn request_merge(&mut self) {
        if !self.can_merge() {
            return;
        }

        match merge(&self.inputs).and_then(|outcome| {
            let json = render_pretty(&outcome.entries)?;
            Ok((json, outcome.stats))
        }) {
            Ok((json, stats)) => {
                tracing::debug!(total = stats.total_after, "merge succeeded");
                self.merged_json = Some(json);
                self.stats = Some(stats);
                self.error = None;
                self.output_scroll = 0;
            }
            Err(err) => {
                tracing::debug!(%err, "merge failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Record the outcome of a clipboard write.
    ///
    /// A new copy replaces any pending status and its deadline.
    pub fn note_copy(&mut self, result: std::result::Result<(), String>) {
        let message = match result {
            Ok(()) => "Copied!".to_string(),
            Err(reason) => format!("Copy failed: {reason}"),
        };
        self.copy_status = Some(CopyStatus {
            message,
            expires_at: Instant::now() + COPY_STATUS_TTL,
        });
    }

    /// Periodic tick: expire the copy status
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(status) = &self.copy_status {
            if now >= status.expires_at {
                self.copy_status = None;
            }
        }
    }

    /// Reset everything to the initial empty state
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Move focus to the next slot
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % SLOT_COUNT;
    }

    /// Move focus to the previous slot
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + SLOT_COUNT - 1) % SLOT_COUNT;
    }

    /// Insert a character at the cursor of the focused slot
    pub fn insert_char(&mut self, c: char) {
        let byte_pos = self.byte_pos(self.cursors[self.focus]);
        self.inputs[self.focus].insert(byte_pos, c);
        self.cursors[self.focus] += 1;
    }

    /// Delete the character before the cursor of the focused slot
    pub fn backspace(&mut self) {
        let cursor = self.cursors[self.focus];
        if cursor == 0 {
            return;
        }
        self.cursors[self.focus] = cursor - 1;
        let byte_pos = self.byte_pos(cursor - 1);
        let char_len = self.inputs[self.focus][byte_pos..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(1);
        self.inputs[self.focus].drain(byte_pos..byte_pos + char_len);
    }

    /// Move the cursor left within the focused slot
    pub fn cursor_left(&mut self) {
        if self.cursors[self.focus] > 0 {
            self.cursors[self.focus] -= 1;
        }
    }

    /// Move the cursor right within the focused slot
    pub fn cursor_right(&mut self) {
        let char_count = self.inputs[self.focus].chars().count();
        if self.cursors[self.focus] < char_count {
            self.cursors[self.focus] += 1;
        }
    }

    /// Convert the focused slot's character position to a byte position
    fn byte_pos(&self, char_pos: usize) -> usize {
        self.inputs[self.focus]
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.inputs[self.focus].len())
    }

    fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(5);
    }

    fn scroll_output_down(&mut self) {
        let max = self
            .merged_json
            .as_ref()
            .map(|j| j.lines().count() as u16)
            .unwrap_or(0)
            .saturating_sub(1);
        self.output_scroll = (self.output_scroll + 5).min(max);
    }
}

/// Main application
pub struct App {
    /// Application state
    pub state: AppState,
    /// Theme
    theme: Theme,
    /// Terminal
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new app with the given initial state
    pub fn new(state: AppState) -> Result<Self> {
        // Install panic hook to restore terminal on panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state,
            theme: Theme::default(),
            terminal,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            let ev = if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    event::Event::Key(key) => Event::Input(key),
                    event::Event::Resize(w, h) => Event::Resize(w, h),
                    _ => Event::Tick,
                }
            } else {
                Event::Tick
            };
            self.handle_event(ev);

            if self.state.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        // Status expiry must not wait for an idle poll timeout; continuous
        // key input would otherwise keep the message on screen forever.
        self.state.tick();
        match ev {
            Event::Input(key) => self.handle_input(key),
            Event::Resize(_, _) => {}
            Event::Tick => {}
        }
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let theme = &self.theme;
        self.terminal.draw(|frame| {
            let area = frame.area();
            match state.mode {
                AppMode::Help => render_help(frame, area),
                AppMode::Edit => render_form(frame, area, state, theme),
            }
        })?;
        Ok(())
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyEvent) {
        match self.state.mode {
            AppMode::Edit => self.handle_edit_input(key),
            AppMode::Help => self.state.mode = AppMode::Edit,
        }
    }

    fn handle_edit_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.should_quit = true;
            }
            KeyCode::F(1) => self.state.mode = AppMode::Help,

            // Actions (check Ctrl modifiers before plain chars)
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.request_merge();
            }
            KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.copy_result();
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.clear_all();
            }

            // Slot navigation
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::BackTab => self.state.focus_prev(),

            // Output pane scrolling
            KeyCode::PageUp => self.state.scroll_output_up(),
            KeyCode::PageDown => self.state.scroll_output_down(),

            // Editing the focused slot
            KeyCode::Enter => self.state.insert_char('\n'),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Left => self.state.cursor_left(),
            KeyCode::Right => self.state.cursor_right(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.insert_char(c);
            }

            _ => {}
        }
    }

    /// Copy the merged JSON to the system clipboard.
    ///
    /// The write is an external collaborator action: its failure becomes a
    /// transient status message, never an engine error.
    fn copy_result(&mut self) {
        let Some(json) = self.state.merged_json.clone() else {
            return;
        };
        let result = clipboard::copy_text(&json).map_err(|e| e.to_string());
        self.state.note_copy(result);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

// Render functions

fn render_form(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let has_banner = state.error.is_some();
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(12)];
    if has_banner {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(8));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, chunks[0]);
    render_inputs(frame, chunks[1], state, theme);
    if has_banner {
        render_error(frame, chunks[2], state, theme);
    }
    let results_area = if has_banner { chunks[3] } else { chunks[2] };
    render_results(frame, results_area, state, theme);
    let status_area = if has_banner { chunks[4] } else { chunks[3] };
    render_status_bar(frame, status_area, state, theme);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("cm-merge - merge comment JSON lists by time")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn render_inputs(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_idx, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(*row);

        for (col_idx, col) in cols.iter().enumerate() {
            let slot = row_idx * 3 + col_idx;
            render_slot(frame, *col, state, theme, slot);
        }
    }
}

fn render_slot(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, slot: usize) {
    let focused = state.focus == slot;
    let border = if focused {
        theme.focus_border
    } else {
        theme.unfocus_border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" Input {} ", slot + 1));

    let text = &state.inputs[slot];
    let paragraph = if text.is_empty() {
        Paragraph::new(SLOT_PLACEHOLDER).style(Style::default().fg(theme.placeholder))
    } else {
        Paragraph::new(text.as_str())
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn render_error(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let message = state.error.as_deref().unwrap_or("");
    let banner = Paragraph::new(message)
        .style(Style::default().fg(theme.error))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Error "),
        );
    frame.render_widget(banner, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(20)])
        .split(area);

    render_stats(frame, chunks[0], state, theme);
    render_output(frame, chunks[1], state, theme);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.unfocus_border))
        .title(" Stats ");

    let paragraph = match &state.stats {
        Some(stats) => Paragraph::new(stats.to_string()).style(Style::default().fg(theme.accent)),
        None => Paragraph::new("No merge yet.").style(Style::default().fg(theme.placeholder)),
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn render_output(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.unfocus_border))
        .title(" Merged JSON (PgUp/PgDn to scroll) ");

    let paragraph = match &state.merged_json {
        Some(json) => Paragraph::new(json.as_str()).scroll((state.output_scroll, 0)),
        None => Paragraph::new("Press Ctrl-G to merge.").style(Style::default().fg(theme.placeholder)),
    };
    frame.render_widget(paragraph.block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let action = |label: &str, enabled: bool| -> Span<'static> {
        if enabled {
            Span::raw(label.to_string())
        } else {
            Span::styled(label.to_string(), Style::default().fg(theme.disabled))
        }
    };

    let mut spans = vec![
        action("Ctrl-G merge", state.can_merge()),
        Span::raw("  "),
        action("Ctrl-Y copy", state.can_copy()),
        Span::raw("  Ctrl-L clear  Tab next slot  F1 help  Ctrl-Q quit"),
    ];
    if let Some(status) = &state.copy_status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.message.clone(),
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = "\
cm-merge help

  Tab / Shift-Tab   move focus between the six input slots
  (typing)          edit the focused slot; Enter inserts a newline
  Ctrl-G            merge all non-empty slots, sorted by time
  Ctrl-Y            copy the merged JSON to the clipboard
  Ctrl-L            clear all slots, the result, stats and errors
  PgUp / PgDn       scroll the merged JSON pane
  Ctrl-Q            quit

Each slot expects a JSON array of objects with string fields
`time`, `command` and `comment`. Extra fields are kept as-is.

Press any key to close this help.";

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, area);
}
