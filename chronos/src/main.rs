//! chronos - Classroom Observation Tracker
//!
//! Terminal UI for timing teaching modes, counting teaching actions and
//! taking notes during a lesson observation, then exporting a text report.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/chronos/config.toml (~/.config/chronos/config.toml)
//! - Logs: $XDG_STATE_HOME/chronos/ (~/.local/state/chronos/)

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chronos_core::export::{DirectoryExporter, Osc52Clipboard};
use chronos_core::{Config, SessionTracker, TrackerSettings};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

#[derive(Parser)]
#[command(name = "chronos")]
#[command(about = "Classroom observation tracker")]
#[command(version)]
struct Args {
    /// Subject to preselect (must be one of the configured subjects)
    #[arg(short, long)]
    subject: Option<String>,

    /// Directory for saved reports (overrides export.directory)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Load configuration from this file instead of the default path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the subject list and exit
    #[arg(long)]
    list_subjects: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let subjects = config.session.subjects.clone();
    let subject_index = match &args.subject {
        Some(wanted) => match subjects.iter().position(|s| s == wanted) {
            Some(index) => index,
            None => bail!(
                "unknown subject {:?} (available: {})",
                wanted,
                subjects.join(", ")
            ),
        },
        None => config.session.default_subject_index(),
    };

    if args.list_subjects {
        for (index, subject) in subjects.iter().enumerate() {
            let marker = if index == subject_index { '*' } else { ' ' };
            println!("{marker} {subject}");
        }
        return Ok(());
    }

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        chronos_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let export_dir = args
        .export_dir
        .clone()
        .unwrap_or_else(|| config.export.resolved_directory());

    tracing::info!(
        subject = %subjects[subject_index],
        export_dir = %export_dir.display(),
        "chronos TUI starting up"
    );

    let tracker = SessionTracker::new(
        subjects[subject_index].clone(),
        TrackerSettings::from(&config),
    );
    let mut app = App::new(
        tracker,
        subjects,
        subject_index,
        Box::new(Osc52Clipboard::stdout()),
        Box::new(DirectoryExporter::new(export_dir)),
    );

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run app
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("chronos TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Fire due tick and inactivity timers
        app.pump();

        // Render only when state or the header clock changed
        if app.needs_redraw() {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.mark_drawn();
        }

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
