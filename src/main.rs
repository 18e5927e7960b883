mod app;
mod clock;
mod domain;
mod export;
mod input;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_agenda_dir, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "A terminal daily agenda with per-task timers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the Markdown export from stored state without opening the UI
    Export {
        /// Directory to write the document into. Defaults to the agenda directory.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export { output }) => run_export(output),
        None => run_tui(),
    }
}

fn run_export(output: Option<String>) -> Result<()> {
    let store = FileStore::default_location()?;
    let mut app = AppState::new(Box::new(store), Box::new(SystemClock));

    let dir = match output {
        Some(path) => PathBuf::from(path),
        None => ensure_agenda_dir()?,
    };

    match app.export(&dir) {
        Some(path) => {
            println!("Exported: {}", path.display());
            Ok(())
        }
        None => {
            let notice = app.notice.unwrap_or_else(|| "Export failed".to_string());
            anyhow::bail!(notice)
        }
    }
}

fn run_tui() -> Result<()> {
    ensure_agenda_dir()?;
    let store = FileStore::default_location()?;
    let mut app = AppState::new(Box::new(store), Box::new(SystemClock));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    app.save();

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Refresh running timer displays
        app.tick();

        // Autosave if needed
        if app.needs_save {
            app.save();
        }
    }
}
