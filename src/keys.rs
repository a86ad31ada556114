use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    let request = if guard.state.search.active {
        handle_search_keys(&mut guard, key_event.code)
    } else {
        handle_tab_keys(&mut guard, key_event)
    };

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}

/// The search overlay captures typing until Esc or Enter.
fn handle_search_keys(app: &mut App, code: KeyCode) -> Option<NetworkRequest> {
    match code {
        KeyCode::Esc => app.state.search.close(),
        KeyCode::Enter => return app.search_activate(),
        KeyCode::Down => app.search_down(),
        KeyCode::Up => app.state.search.selected.up(),
        KeyCode::Backspace => app.state.search.pop(),
        Char(c) => app.state.search.push(c),
        _ => {}
    }
    None
}

fn handle_tab_keys(app: &mut App, key_event: KeyEvent) -> Option<NetworkRequest> {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Today),
        (_, Char('2'), _) => app.update_tab(MenuItem::Favorites),
        (_, Char('3'), _) if app.state.match_view.match_id.is_some() => {
            app.update_tab(MenuItem::Match)
        }
        (_, Char('4'), _) if app.state.team_view.team.is_some() => app.update_tab(MenuItem::Team),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Today
        (MenuItem::Today, Char('j') | KeyCode::Down, _) => app.today_down(),
        (MenuItem::Today, Char('k') | KeyCode::Up, _) => app.today_up(),
        (MenuItem::Today, KeyCode::Enter, _) => return app.today_activate(),

        // Favorites
        (MenuItem::Favorites, Char('j') | KeyCode::Down, _) => app.favorites_down(),
        (MenuItem::Favorites, Char('k') | KeyCode::Up, _) => app.favorites_up(),
        (MenuItem::Favorites, KeyCode::Enter, _) => return app.favorites_activate(),

        // Match detail
        (MenuItem::Match, Char('j') | KeyCode::Down, _) => app.match_scroll_down(),
        (MenuItem::Match, Char('k') | KeyCode::Up, _) => app.match_scroll_up(),
        (MenuItem::Match, Char('h'), _) => return app.open_current_home_team(),
        (MenuItem::Match, Char('a'), _) => return app.open_current_away_team(),
        (MenuItem::Match, KeyCode::Esc, _) => app.go_back(),

        // Team fixtures
        (MenuItem::Team, Char('j') | KeyCode::Down, _) => app.team_down(),
        (MenuItem::Team, Char('k') | KeyCode::Up, _) => app.team_up(),
        (MenuItem::Team, KeyCode::Enter, _) => return app.team_activate(),
        (MenuItem::Team, KeyCode::Esc, _) => app.go_back(),

        // Favorite toggles
        (_, Char('s'), _) => app.toggle_favorite_match(),
        (_, Char('F'), _) => app.toggle_favorite_team(),

        // Global
        (_, Char('/'), _) => app.state.search.open(),
        (_, Char('r'), _) => return Some(NetworkRequest::LoadTodaysFixtures),
        (_, Char('n'), _) => app.toggle_notifications(),
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    None
}
