mod app;
mod domain;
mod engine;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::format_clock;
use engine::TimerEngine;
use persistence::{ensure_data_dir, init_local_dir, TimerStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "multitimer")]
#[command(about = "A terminal multi-timer with progress alerts and a completion history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .multitimer directory in the current directory
    Init,
    /// Print the completed-timer history, newest first
    History,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized data directory: {}", data_dir.display());
            println!();
            println!("Multitimer will now use this local directory for timer storage.");
            println!("Run 'multitimer' to start.");
            Ok(())
        }
        Some(Commands::History) => {
            let store = TimerStore::new(ensure_data_dir()?);
            let history = store.load_history()?;

            if history.is_empty() {
                println!("No completed timers yet.");
                return Ok(());
            }
            for entry in &history {
                println!(
                    "{}  {}  ({})",
                    entry.completed_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.name,
                    format_clock(entry.duration)
                );
            }
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    // Ensure the data directory exists and show which one we're using
    let data_dir = ensure_data_dir()?;
    eprintln!("Using data directory: {}", data_dir.display());

    let engine = TimerEngine::load(TimerStore::new(data_dir))?;
    let mut app = AppState::new(engine);

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

    // Pause any still-running timers so they resume cleanly next session
    let running: Vec<Uuid> = app
        .engine
        .timers()
        .iter()
        .filter(|t| t.is_running())
        .map(|t| t.id)
        .collect();
    if !running.is_empty() {
        if let Err(e) = app.engine.pause_many(&running, Instant::now()) {
            eprintln!("Error saving state: {}", e);
        }
    }

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key, Instant::now())?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Advance due timer ticks and surface alerts/completions
        app.tick(Instant::now());
    }
}
