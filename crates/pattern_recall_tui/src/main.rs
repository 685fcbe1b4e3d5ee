//! Terminal front-end for Pattern Recall

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod controller;
mod event;
mod input;
mod script;
mod timer;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as term_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pattern_recall::{Catalog, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{Cli, Command};
use config::RecallConfig;
use controller::GameController;
use event::AppEvent;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = RecallConfig::load(cli.config.as_deref())?;
    init_logging(&config)?;

    match cli.command {
        Command::Play { tick_millis } => {
            let period = match tick_millis {
                Some(0) => anyhow::bail!("--tick-millis must be greater than zero"),
                Some(millis) => Duration::from_millis(millis),
                None => config.tick_period(),
            };
            run_play(period).await?;
        }
        Command::Levels => print_levels(),
        Command::Script { file } => {
            let view = script::run_file(&file)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(config: &RecallConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn print_levels() {
    let catalog = Catalog::standard();
    for level in catalog.levels() {
        let pattern = level.pattern();
        println!("{} ({} cells)", level.name(), pattern.len());
        println!("  {}", level.description());
        for line in pattern.display().lines() {
            println!("    {}", line);
        }
        println!();
    }
}

async fn run_play(period: Duration) -> Result<()> {
    info!(period_ms = period.as_millis() as u64, "Starting Pattern Recall TUI");

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_screen, restore_terminal)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let running = Arc::new(AtomicBool::new(true));
    let reader = spawn_key_reader(event_tx.clone(), Arc::clone(&running));

    let mut controller = GameController::new(Session::standard(), period, event_tx);
    let res = run_app(&mut terminal, &mut controller, &mut event_rx).await;

    running.store(false, Ordering::Relaxed);
    drop(controller);

    restore_terminal()?;
    terminal.show_cursor()?;

    if reader.await.is_err() {
        error!("Key reader panicked");
    }
    res
}

fn enter_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Runs `setup`, and runs `restore` before returning its error if it fails.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    setup().or_else(|e| {
        if let Err(restore_err) = restore() {
            error!(error = %restore_err, "Failed to restore terminal");
        }
        Err(e)
    })
}

/// Polls the terminal on a blocking thread and forwards key presses.
fn spawn_key_reader(
    events: mpsc::UnboundedSender<AppEvent>,
    running: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while running.load(Ordering::Relaxed) {
            match term_event::poll(Duration::from_millis(100)) {
                Ok(true) => match term_event::read() {
                    Ok(Event::Key(key)) => {
                        if events.send(AppEvent::Key(key)).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Failed to read terminal event");
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal");
                    return;
                }
            }
        }
    })
}

async fn run_app(
    terminal: &mut Tui,
    controller: &mut GameController,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut app = App::new();
    let mut views = controller.subscribe();

    loop {
        {
            let view = views.borrow_and_update();
            terminal.draw(|f| ui::draw(f, &view, &app))?;
        }

        let Some(event) = events.recv().await else {
            info!("Event queue closed");
            return Ok(());
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = input::map_key(key) {
                    app.handle_action(action, controller);
                }
            }
            AppEvent::Tick(entry) => {
                if controller.tick(entry).is_applied() {
                    app.refresh_status(&views.borrow());
                }
            }
        }

        if app.should_quit() {
            info!(score = controller.session().score(), "Player quit");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<()> = setup_or_restore(
            || anyhow::bail!("alternate screen unavailable"),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_leaves_terminal_alone() {
        let restored = Cell::new(false);
        let result = setup_or_restore(
            || Ok(7),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn test_setup_error_survives_failed_restore() {
        let result: Result<()> = setup_or_restore(
            || anyhow::bail!("terminal too small"),
            || anyhow::bail!("restore failed"),
        );
        assert_eq!(result.unwrap_err().to_string(), "terminal too small");
    }
}
