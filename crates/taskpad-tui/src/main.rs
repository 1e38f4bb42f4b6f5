use std::io;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use taskpad_service::BlockingHttpService;
use taskpad_tui::app::App;

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().collect();

    // Parse CLI: taskpad [--server URL] [--api-key KEY]
    // --server URL → the remote task collection (also TASKPAD_URL env var)
    // --api-key KEY → authenticate with API key (also TASKPAD_API_KEY env var)
    let server_url = if let Some(pos) = args.iter().position(|a| a == "--server") {
        args.get(pos + 1)
            .context("--server requires a URL argument")?
            .clone()
    } else {
        match std::env::var("TASKPAD_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => bail!("no server configured: pass --server URL or set TASKPAD_URL"),
        }
    };

    let api_key = if let Some(pos) = args.iter().position(|a| a == "--api-key") {
        Some(
            args.get(pos + 1)
                .context("--api-key requires a key argument")?
                .clone(),
        )
    } else {
        std::env::var("TASKPAD_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    };

    let service = match api_key {
        Some(key) => BlockingHttpService::with_api_key(&server_url, key),
        None => BlockingHttpService::new(&server_url),
    };

    run_tui(service)
}

/// The TUI owns the terminal, so diagnostics go to a file instead of
/// stderr. Enabled only when TASKPAD_LOG names a path.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TASKPAD_LOG") else {
        return Ok(());
    };
    if path.is_empty() {
        return Ok(());
    }
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(service: BlockingHttpService) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, service);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: BlockingHttpService,
) -> Result<()> {
    let mut app = App::new(service);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless the form is capturing text
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
