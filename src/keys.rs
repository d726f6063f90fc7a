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
    let mut refetch = false;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => refetch = guard.update_tab(MenuItem::Games),
        (_, Char('2'), _) => refetch = guard.update_tab(MenuItem::Standings),
        (_, Char('3'), _) => refetch = guard.update_tab(MenuItem::Teams),
        (_, Char('?'), _) => refetch = guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Sport selection
        (_, Char('l') | KeyCode::Right, _) => refetch = guard.next_sport(),
        (_, Char('h') | KeyCode::Left, _) => refetch = guard.prev_sport(),

        // League filter
        (_, Char(']'), _) => refetch = guard.next_league(),
        (_, Char('['), _) => refetch = guard.prev_league(),

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.scroll_up(),

        // Retry after an error, refresh after an empty result
        (MenuItem::Games | MenuItem::Standings | MenuItem::Teams, Char('r'), _) => refetch = true,

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if refetch && let Some(request) = guard.request_current() {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
