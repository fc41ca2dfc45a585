//! Interactive shell loop.
//!
//! The [`Shell`] lives behind an async mutex. Each submitted line runs on its
//! own Tokio task and reports back through the same channel that carries
//! terminal input, so the screen keeps redrawing while `read`, `curl` or
//! `weather` wait on the network. Only one line runs at a time; Enter is
//! refused until the running one finishes.

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::Style;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};
use tui_textarea::{CursorMove, TextArea};

use crate::core::history::HistoryEntry;
use crate::core::shell::Shell;
use crate::core::theme::Theme;
use crate::ui::render::{self, EntryBody, TranscriptEntry};
use crate::ui::terminal::{restore_terminal, setup_terminal, write_cursor_color, ShellTerminal};
use crate::ui::theme::Palette;

const STARTUP_COMMAND: &str = "banner";

#[derive(Debug)]
pub enum ShellEvent {
    Terminal(Event),
    Finished {
        entries: Vec<HistoryEntry>,
        exit: bool,
    },
    ThemeChanged(Theme),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Complete,
    RecallPrevious,
    RecallNext,
    PageUp,
    PageDown,
    Clear,
    Quit,
    Edit,
}

pub fn key_action(key: &KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('l') if ctrl => KeyAction::Clear,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Tab => KeyAction::Complete,
        KeyCode::Up => KeyAction::RecallPrevious,
        KeyCode::Down => KeyAction::RecallNext,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        _ => KeyAction::Edit,
    }
}

/// Everything the renderer needs, owned by the UI so drawing never waits on
/// a running command.
pub struct ShellView {
    pub prompt_identity: String,
    pub entries: Vec<TranscriptEntry>,
    pub palette: Palette,
    pub input: TextArea<'static>,
    pub busy: Option<String>,
    pub status: Option<String>,
    pub scroll_from_bottom: usize,
    pub page_height: usize,
    recall: Vec<String>,
    recall_index: Option<usize>,
}

impl ShellView {
    pub fn new(prompt_identity: String, entries: Vec<HistoryEntry>, theme: &Theme) -> Self {
        let mut view = Self {
            prompt_identity,
            entries: entries.iter().map(TranscriptEntry::from_history).collect(),
            palette: Palette::from_theme(theme),
            input: TextArea::default(),
            busy: None,
            status: None,
            scroll_from_bottom: 0,
            page_height: 1,
            recall: Vec::new(),
            recall_index: None,
        };
        view.configure_input();
        view
    }

    pub fn apply_theme(&mut self, theme: &Theme) {
        self.palette = Palette::from_theme(theme);
        self.configure_input();
    }

    fn configure_input(&mut self) {
        self.input.set_style(self.palette.input_text_style);
        self.input.set_cursor_style(self.palette.input_cursor_style);
        self.input.set_cursor_line_style(Style::default());
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("")
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = TextArea::from([text.to_string()]);
        self.input.move_cursor(CursorMove::End);
        self.configure_input();
    }

    /// Take the current line for submission. Returns `None` while another
    /// line is still running.
    pub fn take_submission(&mut self) -> Option<String> {
        if let Some(running) = &self.busy {
            self.status = Some(format!("busy: wait for '{running}' to finish"));
            return None;
        }
        let line = self.input_text();
        self.set_input("");
        self.status = None;
        self.scroll_from_bottom = 0;
        self.recall_index = None;
        if !line.trim().is_empty() && self.recall.last() != Some(&line) {
            self.recall.push(line.clone());
        }
        self.busy = Some(line.trim().to_string());
        Some(line)
    }

    /// Take the history after a command finished. History only grows until
    /// a `clear`, so entries already transformed are kept and only the new
    /// tail is converted.
    pub fn finish(&mut self, entries: Vec<HistoryEntry>) {
        let cached = self.entries.len();
        let still_valid = entries.len() >= cached
            && (cached == 0 || entries[cached - 1].command == self.entries[cached - 1].command);
        if !still_valid {
            self.entries.clear();
        }
        let start = self.entries.len();
        self.entries.extend(entries[start..].iter().map(TranscriptEntry::from_history));
        self.busy = None;
    }

    pub fn recall_previous(&mut self) {
        if self.recall.is_empty() {
            return;
        }
        let index = match self.recall_index {
            Some(0) => 0,
            Some(i) => i - 1,
            None => self.recall.len() - 1,
        };
        self.recall_index = Some(index);
        let line = self.recall[index].clone();
        self.set_input(&line);
    }

    pub fn recall_next(&mut self) {
        match self.recall_index {
            Some(i) if i + 1 < self.recall.len() => {
                self.recall_index = Some(i + 1);
                let line = self.recall[i + 1].clone();
                self.set_input(&line);
            }
            Some(_) => {
                self.recall_index = None;
                self.set_input("");
            }
            None => {}
        }
    }

    /// Apply a completion result: a unique match is filled in with a
    /// trailing space, several matches extend to their common prefix and are
    /// listed in the status line.
    pub fn apply_completion(&mut self, common: &str, matches: &[&str]) {
        match matches {
            [] => self.status = None,
            [only] => {
                self.set_input(&format!("{only} "));
                self.status = None;
            }
            many => {
                self.set_input(common);
                self.status = Some(many.join("  "));
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(self.page_height);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(self.page_height);
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run_shell(mut shell: Shell) -> Result<(), Box<dyn Error>> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ShellEvent>();

    let theme_tx = event_tx.clone();
    shell.session.theme.subscribe(Box::new(move |theme: &Theme| {
        let _ = theme_tx.send(ShellEvent::ThemeChanged(theme.clone()));
    }));

    shell.execute(STARTUP_COMMAND).await;
    let mut view = ShellView::new(
        shell.session.prompt_identity(),
        shell.session.history.entries().to_vec(),
        shell.session.theme.get(),
    );
    let shell = Arc::new(Mutex::new(shell));

    let mut terminal = setup_terminal(view.palette.cursor_color)?;
    let reader = spawn_event_reader(event_tx.clone());
    info!("Shell started");

    let result = event_loop(&mut terminal, &shell, &mut view, &event_tx, &mut event_rx).await;

    reader.abort();
    restore_terminal(&mut terminal)?;
    info!("Shell stopped");
    result
}

async fn event_loop(
    terminal: &mut ShellTerminal,
    shell: &Arc<Mutex<Shell>>,
    view: &mut ShellView,
    event_tx: &mpsc::UnboundedSender<ShellEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<ShellEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| render::draw(f, view))?;

        let Some(event) = event_rx.recv().await else {
            return Ok(());
        };
        let flow = match event {
            ShellEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_key(key, shell, view, event_tx)
            }
            ShellEvent::Terminal(_) => Flow::Continue,
            ShellEvent::Finished { entries, exit } => {
                view.finish(entries);
                if exit {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }
            ShellEvent::ThemeChanged(theme) => {
                view.apply_theme(&theme);
                write_cursor_color(terminal.backend_mut(), view.palette.cursor_color)?;
                Flow::Continue
            }
        };
        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

fn handle_key(
    key: KeyEvent,
    shell: &Arc<Mutex<Shell>>,
    view: &mut ShellView,
    event_tx: &mpsc::UnboundedSender<ShellEvent>,
) -> Flow {
    match key_action(&key) {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Submit => {
            if let Some(line) = view.take_submission() {
                spawn_command(shell.clone(), line, event_tx.clone());
            }
        }
        KeyAction::Clear => {
            if view.busy.is_none() {
                view.set_input("clear");
                if let Some(line) = view.take_submission() {
                    spawn_command(shell.clone(), line, event_tx.clone());
                }
            }
        }
        KeyAction::Complete => {
            let partial = view.input_text();
            if partial.contains(char::is_whitespace) {
                return Flow::Continue;
            }
            // The shell is locked while a command runs.
            if let Ok(guard) = shell.try_lock() {
                let (common, matches) = guard.complete(&partial);
                view.apply_completion(&common, &matches);
            }
        }
        KeyAction::RecallPrevious => view.recall_previous(),
        KeyAction::RecallNext => view.recall_next(),
        KeyAction::PageUp => view.scroll_up(),
        KeyAction::PageDown => view.scroll_down(),
        KeyAction::Edit => {
            view.status = None;
            view.input.input(tui_textarea::Input::from(key));
        }
    }
    Flow::Continue
}

fn spawn_command(shell: Arc<Mutex<Shell>>, line: String, event_tx: mpsc::UnboundedSender<ShellEvent>) {
    tokio::spawn(async move {
        let mut shell = shell.lock().await;
        debug!(line = %line, "Running command line");
        shell.execute(&line).await;
        let _ = event_tx.send(ShellEvent::Finished {
            entries: shell.session.history.entries().to_vec(),
            exit: shell.session.exit_requested(),
        });
    });
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<ShellEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ShellEvent::Terminal(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::CommandOutput;

    fn view() -> ShellView {
        ShellView::new("guest@localhost".to_string(), Vec::new(), &Theme::default_theme())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), KeyAction::Quit);
        assert_eq!(key_action(&key(KeyCode::Char('l'), KeyModifiers::CONTROL)), KeyAction::Clear);
        assert_eq!(key_action(&key(KeyCode::Char('c'), KeyModifiers::NONE)), KeyAction::Edit);
        assert_eq!(key_action(&key(KeyCode::Enter, KeyModifiers::NONE)), KeyAction::Submit);
        assert_eq!(key_action(&key(KeyCode::Tab, KeyModifiers::NONE)), KeyAction::Complete);
        assert_eq!(key_action(&key(KeyCode::PageUp, KeyModifiers::NONE)), KeyAction::PageUp);
    }

    #[test]
    fn submission_is_refused_while_busy() {
        let mut view = view();
        view.set_input("read sqli-basics");
        assert_eq!(view.take_submission().as_deref(), Some("read sqli-basics"));
        assert_eq!(view.busy.as_deref(), Some("read sqli-basics"));

        view.set_input("help");
        assert_eq!(view.take_submission(), None);
        assert_eq!(view.input_text(), "help");
        assert!(view.status.as_deref().unwrap_or_default().contains("busy"));

        view.finish(vec![HistoryEntry {
            command: "read sqli-basics".to_string(),
            output: CommandOutput::text("..."),
        }]);
        assert_eq!(view.take_submission().as_deref(), Some("help"));
    }

    fn entry(command: &str, output: CommandOutput) -> HistoryEntry {
        HistoryEntry {
            command: command.to_string(),
            output,
        }
    }

    #[test]
    fn finish_only_converts_new_entries() {
        let mut view = view();
        let first = entry("read a", CommandOutput::markdown("# A"));
        view.finish(vec![first.clone()]);
        assert_eq!(view.entries.len(), 1);

        // A stale cached body proves the first entry was not rebuilt.
        view.entries[0].body = EntryBody::Text("cached".to_string());
        view.finish(vec![first.clone(), entry("whoami", CommandOutput::text("guest"))]);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].body, EntryBody::Text("cached".to_string()));
        assert_eq!(view.entries[1].body, EntryBody::Text("guest".to_string()));
    }

    #[test]
    fn finish_rebuilds_after_clear() {
        let mut view = view();
        view.finish(vec![entry("whoami", CommandOutput::text("guest"))]);
        view.finish(Vec::new());
        assert!(view.entries.is_empty());

        view.finish(vec![entry("read a", CommandOutput::markdown("**b**"))]);
        assert_eq!(view.entries[0].body, EntryBody::Terminal("b".to_string()));

        // Same length but different history: not a continuation of the cache.
        view.finish(vec![entry("date", CommandOutput::text("now"))]);
        assert_eq!(view.entries[0].command, "date");
        assert_eq!(view.entries[0].body, EntryBody::Text("now".to_string()));
    }

    #[test]
    fn recall_walks_submitted_lines() {
        let mut view = view();
        for line in ["help", "whoami", "whoami", "date"] {
            view.set_input(line);
            view.take_submission();
            view.finish(Vec::new());
        }

        view.recall_previous();
        assert_eq!(view.input_text(), "date");
        view.recall_previous();
        assert_eq!(view.input_text(), "whoami");
        view.recall_previous();
        assert_eq!(view.input_text(), "help");
        view.recall_previous();
        assert_eq!(view.input_text(), "help");
        view.recall_next();
        assert_eq!(view.input_text(), "whoami");
        view.recall_next();
        view.recall_next();
        assert_eq!(view.input_text(), "");
    }

    #[test]
    fn completion_fills_unique_match() {
        let mut view = view();
        view.apply_completion("weather", &["weather"]);
        assert_eq!(view.input_text(), "weather ");
        assert!(view.status.is_none());
    }

    #[test]
    fn completion_lists_ambiguous_matches() {
        let mut view = view();
        view.apply_completion("e", &["echo", "emacs", "email", "exit"]);
        assert_eq!(view.input_text(), "e");
        assert_eq!(view.status.as_deref(), Some("echo  emacs  email  exit"));
    }

    #[test]
    fn paging_never_goes_below_bottom() {
        let mut view = view();
        view.page_height = 10;
        view.scroll_up();
        view.scroll_up();
        assert_eq!(view.scroll_from_bottom, 20);
        view.scroll_down();
        view.scroll_down();
        view.scroll_down();
        assert_eq!(view.scroll_from_bottom, 0);
    }
}
