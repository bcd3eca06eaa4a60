//! userdata-tui binary entry point.
//!
//! Parses configuration, initializes the terminal in raw mode, runs the TUI
//! event loop, and restores the terminal state on exit.
//!
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use userdata_tui::app::{self, AppState, Theme, keymap::Keymap};
use userdata_tui::config::{self, Cli};
use userdata_tui::source::{Fetcher, HttpUserSource};

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_logging(&cli)?;

    let source = HttpUserSource::new(cli.url.clone(), cli.timeout()).context("build HTTP client")?;
    let fetcher = Fetcher::new(Arc::new(source));
    let mut state = AppState::new(
        Theme::load_or_init(&cli.theme_path()),
        Keymap::load_or_init(&cli.keybinds_path()),
    );
    tracing::info!(url = %cli.url, "starting");

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state, &fetcher);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
