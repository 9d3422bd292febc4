//! WordSnap TUI
//!
//! Terminal interface for WordSnap, a single-user vocabulary manager.
//! All words and collections live in memory for the duration of the
//! session; there is no persistence by design.
//!
//! ## Layout
//!
//! Three-pane layout:
//! - Left: Collections (with per-collection word counts)
//! - Middle: Word list (filtered by collection and search)
//! - Right: Detail (selected word)
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - h/l or ←/→: Switch focus between panes
//! - Tab: Cycle through panes
//! - Enter: Pick collection / Focus detail
//! - q: Quit
//!
//! ## Commands
//!
//! - a: Add word       e: Edit word       d: Delete word   f: Favorite
//! - c: Add collection r: Rename collection x: Delete collection
//! - /: Search         ?: Help

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordsnap_core::{Config, VocabularyStore};

mod app;
mod format;
mod forms;
mod ui;

use app::{App, InputMode};

#[derive(Parser)]
#[command(name = "wordsnap")]
#[command(about = "WordSnap - vocabulary collections in your terminal")]
#[command(version)]
struct Cli {
    /// Start with an empty store instead of the demo data
    #[arg(long)]
    empty: bool,

    /// Collection id to start filtered to
    #[arg(long)]
    collection: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    init_logging(&config);

    let mut store = if cli.empty || !config.demo_data {
        VocabularyStore::new()
    } else {
        VocabularyStore::with_demo_data()
    };

    // CLI flag wins over the config file
    if let Some(id) = cli.collection.or(config.start_collection.clone()) {
        if store.collection(&id).is_some() {
            store.set_active_collection(id);
        } else {
            eprintln!("Warning: unknown collection '{}', starting on All Words", id);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&store);
    let result = run_app(&mut terminal, &mut app, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut VocabularyStore,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll with a short timeout so status messages can expire
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // If help is showing, any key dismisses it
                if app.show_help {
                    app.show_help = false;
                    continue;
                }

                if app.form.is_some() {
                    handle_form_mode(app, store, key.code, key.modifiers);
                } else {
                    match app.input_mode {
                        InputMode::Normal => {
                            handle_normal_mode(app, store, key.code, key.modifiers)
                        }
                        InputMode::Search => handle_search_mode(app, store, key.code),
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(
    app: &mut App,
    store: &mut VocabularyStore,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    // Clear status message on navigation keys
    match code {
        KeyCode::Char('j')
        | KeyCode::Char('k')
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Char('h')
        | KeyCode::Char('l')
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('g')
        | KeyCode::Char('G') => {
            app.status_message = None;
        }
        _ => {}
    }

    // Clear pending 'g' if timeout expired (500ms)
    if let Some(time) = app.pending_g {
        if time.elapsed() > std::time::Duration::from_millis(500) {
            app.pending_g = None;
        }
    }

    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => app.move_up(store),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(store),
        KeyCode::Char('h') | KeyCode::Left => app.prev_pane(),
        KeyCode::Char('l') | KeyCode::Right => app.next_pane(),
        KeyCode::Tab => app.next_pane(),
        KeyCode::BackTab => app.prev_pane(),

        KeyCode::Enter => app.handle_enter(store),

        // Word commands
        KeyCode::Char('a') => app.open_add_word(store),
        KeyCode::Char('e') => app.open_edit_word(store),
        KeyCode::Char('d') => app.delete_current_word(store),
        KeyCode::Char('f') => app.toggle_favorite_current(store),

        // Collection commands
        KeyCode::Char('c') => app.open_add_collection(store),
        KeyCode::Char('r') => app.open_edit_collection(store),
        KeyCode::Char('x') => app.delete_current_collection(store),

        // Search mode
        KeyCode::Char('/') => app.enter_search_mode(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Vim navigation: G (go to last)
        KeyCode::Char('G') => {
            app.pending_g = None;
            app.move_to_last(store);
        }

        // Vim navigation: g (start of gg sequence)
        KeyCode::Char('g') => {
            if app.pending_g.is_some() {
                app.pending_g = None;
                app.move_to_first(store);
            } else {
                app.pending_g = Some(std::time::Instant::now());
            }
        }

        _ => {
            // Any other key clears pending 'g'
            app.pending_g = None;
        }
    }
}

/// Handle key events in search mode
fn handle_search_mode(app: &mut App, store: &mut VocabularyStore, code: KeyCode) {
    match code {
        // Cancel search
        KeyCode::Esc => app.cancel_search(store),

        // Confirm search (stay in the filtered view)
        KeyCode::Enter => app.confirm_search(),

        // Text input
        KeyCode::Char(c) => app.search_insert_char(c, store),
        KeyCode::Backspace => app.search_delete_char(store),

        _ => {}
    }
}

/// Handle key events while a modal form is open
fn handle_form_mode(
    app: &mut App,
    store: &mut VocabularyStore,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        // Dismiss without saving
        KeyCode::Esc => app.dismiss_form(store),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.dismiss_form(store);
        }

        // Submit
        KeyCode::Enter => app.submit_form(store),

        // Field focus
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }

        // Text input
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.insert_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.delete_char();
            }
        }
        KeyCode::Left => {
            if let Some(form) = app.form.as_mut() {
                form.cursor_left();
            }
        }
        KeyCode::Right => {
            if let Some(form) = app.form.as_mut() {
                form.cursor_right();
            }
        }

        _ => {}
    }
}

/// Initialize logging
///
/// Only initializes if the WORDSNAP_LOG environment variable is set.
/// Logs to file (config.log_file or wordsnap.log in the current
/// directory) so the TUI output stays clean.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("WORDSNAP_LOG") else {
        return;
    };

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from("wordsnap.log"));

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "wordsnap_core={},wordsnap_tui={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("logging initialized to {:?}", log_path);
}
