//! NoteHub TUI entry point.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notehub_core::{NotesApi, QueryKey, TagFilter};
use notehub_tui::api_client::RestClient;
use notehub_tui::browser::InitialData;
use clap::Parser;
use notehub_tui::cli::Cli;
use notehub_tui::config::TuiConfig;
use notehub_tui::error::TuiError;
use notehub_tui::events::TuiEvent;
use notehub_tui::persistence::{self, PersistedState};
use notehub_tui::state::{App, Effect};
use notehub_tui::tasks::{spawn_create, spawn_fetch};
use notehub_tui::telemetry::init_logging;
use notehub_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let cli = Cli::parse();
    let config = TuiConfig::load(cli.config.as_deref())?;
    init_logging(&config.log_path)?;

    let tag = initial_tag(&config, cli.tag.as_deref())?;
    let api: Arc<dyn NotesApi> = Arc::new(RestClient::new(&config)?);
    let initial = prefetch(api.as_ref(), tag, config.per_page).await;
    let mut app = App::new(config, api, tag, initial)?;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let effects = app.reconcile()?;
    run_effects(&app, effects, &event_tx);

    let mut ticker = tokio::time::interval(app.config.refresh_interval());

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let deadline = app.browser.search_deadline();
        let event = tokio::select! {
            _ = ticker.tick() => TuiEvent::Tick,
            _ = sleep_until(deadline) => TuiEvent::SearchDeadline,
            Some(event) = event_rx.recv() => event,
        };
        let effects = app.handle_event(event, Instant::now())?;
        run_effects(&app, effects, &event_tx);

        if app.should_quit {
            break;
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "Failed to persist UI state");
    }
    app.shutdown()?;
    tracing::info!("NoteHub TUI exited");

    Ok(())
}

/// `--tag` wins over the persisted filter; a bad `--tag` stops startup.
fn initial_tag(config: &TuiConfig, tag_param: Option<&str>) -> Result<TagFilter, TuiError> {
    if let Some(raw) = tag_param {
        return Ok(TagFilter::from_param(Some(raw))?);
    }
    match persistence::load(&config.persistence_path) {
        Ok(state) => Ok(state.map(|s: PersistedState| s.tag_filter).unwrap_or_default()),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring unreadable UI state");
            Ok(TagFilter::All)
        }
    }
}

/// Fetch the first page before the first frame so it renders without a spinner.
async fn prefetch(api: &dyn NotesApi, tag: TagFilter, per_page: u32) -> Option<InitialData> {
    let key = QueryKey::first_page(tag.tag());
    match api.fetch_notes(&key.to_params(per_page)).await {
        Ok(page) => Some(InitialData { key, page }),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "Initial fetch failed");
            None
        }
    }
}

fn run_effects(app: &App, effects: Vec<Effect>, sender: &mpsc::Sender<TuiEvent>) {
    for effect in effects {
        match effect {
            Effect::Fetch(request) => spawn_fetch(
                Arc::clone(&app.api),
                request,
                app.config.per_page,
                sender.clone(),
            ),
            Effect::Create(request) => spawn_create(Arc::clone(&app.api), request, sender.clone()),
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}
