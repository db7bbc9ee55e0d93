use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use quizdash::config::parse_poll_interval;
use quizdash::ui::Theme;
use quizdash::{app, events, ui, App, HttpBackend, QuizBackend, Settings};

#[derive(Parser, Debug)]
#[command(name = "quizdash")]
#[command(about = "Terminal dashboard for a quiz-automation backend")]
struct Args {
    /// Backend base URL (overrides config and QUIZDASH_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// History refresh interval (e.g., "30s", "500ms", "2m")
    #[arg(short, long)]
    poll_interval: Option<String>,

    /// Log file for the interactive dashboard
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch status and history once, export them to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(ref interval) = args.poll_interval {
        settings.poll_interval = parse_poll_interval(interval)?;
    }
    if let Some(path) = args.log_file {
        settings.log_file = Some(path);
    }

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        init_stderr_logging();
        return export_to_file(&settings, &export_path);
    }

    // The terminal belongs to the TUI, so logs go to a file
    init_file_logging(&settings.log_file_or_default())?;
    run_tui(&settings)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).with_writer(io::stderr).init();
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the interactive dashboard
fn run_tui(settings: &Settings) -> Result<()> {
    // Backend calls run on this runtime while the UI loop stays on the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let backend = Arc::new(HttpBackend::new(&settings.backend_url)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app, fetch status and start polling
    let mut app =
        App::new(backend, rt.handle().clone(), settings).with_theme(Theme::auto_detect());
    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Stop polling before the terminal is handed back
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    drop(app);
    // Don't wait on requests still in flight
    rt.shutdown_background();
    tracing::info!("dashboard stopped");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        // Apply backend completions before drawing
        app.drain_events();

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch status and history once and write them to a JSON file
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let backend = HttpBackend::new(&settings.backend_url)?;

    let (status, history) = rt.block_on(async { tokio::join!(backend.status(), backend.history()) });

    let status = match status {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch status");
            None
        }
    };
    let history = history
        .with_context(|| format!("Failed to fetch history from {}", settings.backend_url))?;

    app::write_export(export_path, backend.description(), status.as_ref(), &history)?;

    println!("Exported {} runs to: {}", history.len(), export_path.display());
    Ok(())
}
