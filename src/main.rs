mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crate::state::storage::{Author, LocalStorage};
use anyhow::{Context, bail};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use football_api::client::FootballApi;
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::load();
    let mut storage = LocalStorage::open(&settings.data_dir)?;

    if handle_cli_args(&mut storage)? {
        return Ok(());
    }

    let Some(session) = storage.session() else {
        eprintln!("No session found. Sign in first:\n\n  roxyscore --login you@example.com");
        std::process::exit(1);
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);
    info!("signed in as {}, data in {}", session.email, storage.path().display());

    let client = FootballApi::new(settings.api_config());
    let app = App::new(settings, storage);
    let live = Arc::new(AtomicBool::new(app.store.has_live()));
    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Live score refresh thread (every 60s while anything is live)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone(), live.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger fixture load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx, live).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

/// Handles the non-interactive commands. Returns true when the process
/// should exit instead of starting the UI.
fn handle_cli_args(storage: &mut LocalStorage) -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(false);
    };

    match arg.as_str() {
        "-h" | "--help" => println!("{}", usage_text()),
        "-V" | "--version" => println!("roxyscore {}", env!("CARGO_PKG_VERSION")),
        "--login" => {
            let email = args.next().unwrap_or_default();
            if !email.contains('@') {
                bail!("--login needs an email address, got {email:?}");
            }
            let session = storage.set_session(email.trim())?;
            println!("Signed in as {}", session.email);
        }
        "--logout" => {
            storage.logout()?;
            println!("Signed out");
        }
        "--ticket" => {
            let (Some(subject), Some(body)) = (args.next(), args.next()) else {
                bail!("--ticket needs a subject and a message");
            };
            let session = storage
                .session()
                .context("sign in with --login before opening a support ticket")?;
            let ticket = storage.create_ticket(&subject, &body, &session.email)?;
            println!("Opened ticket {} ({})", ticket.id, ticket.subject);
        }
        "--reply" => {
            let (Some(id), Some(text)) = (args.next(), args.next()) else {
                bail!("--reply needs a ticket id and a message");
            };
            match storage.add_message(&id, &text, Author::User)? {
                Some(ticket) => println!("Replied to {} ({} messages)", ticket.id, ticket.messages.len()),
                None => bail!("no ticket {id}"),
            }
        }
        "--close" => {
            let id = args.next().context("--close needs a ticket id")?;
            storage.close_ticket(&id)?;
            println!("Closed {id}");
        }
        "--tickets" => {
            for ticket in storage.tickets() {
                println!(
                    "{}  {:?}  {}  ({} messages)",
                    ticket.id,
                    ticket.status,
                    ticket.subject,
                    ticket.messages.len()
                );
            }
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
    Ok(true)
}

fn usage_text() -> &'static str {
    "roxyscore - live football scores in your terminal

Usage:
  roxyscore
  roxyscore --login <email>
  roxyscore --logout
  roxyscore --ticket <subject> <message>
  roxyscore --tickets
  roxyscore --reply <ticket-id> <message>
  roxyscore --close <ticket-id>
  roxyscore --help
  roxyscore --version

Environment:
  ROXYSCORE_API_KEY    API-Football key (without one the built-in fixtures are shown)
  ROXYSCORE_API_URL    API base URL (default https://v3.football.api-sports.io)
  ROXYSCORE_DATA_DIR   Where favorites and settings are stored
  ROXYSCORE_LOG        Log level for the log pane (default warn)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
    live: Arc<AtomicBool>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &live, &mut loading)
                        .await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadTodaysFixtures).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    live: &AtomicBool,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        NetworkResponse::FixturesLoaded { fixtures } => {
            let request = {
                let mut guard = app.lock().await;
                let changed = guard.on_fixtures_loaded(fixtures);
                live.store(guard.store.has_live(), Ordering::Relaxed);
                if changed { guard.live_detail_request() } else { None }
            };
            if let Some(request) = request {
                let _ = network_requests.send(request).await;
            }
        }
        NetworkResponse::MatchDetailLoaded { match_id, detail } => {
            let mut guard = app.lock().await;
            guard.on_match_detail_loaded(&match_id, detail);
        }
        NetworkResponse::TeamFixturesLoaded { team_id, fixtures } => {
            let mut guard = app.lock().await;
            guard.on_team_fixtures_loaded(&team_id, fixtures);
        }
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let event = match tokio::task::spawn_blocking(crossterm_event::read).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                error!("terminal input failed: {e}");
                continue;
            }
            Err(_) => break,
        };

        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Resize(_, _) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Hide);
    let _ = execute!(stdout, terminal::EnterAlternateScreen);
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
