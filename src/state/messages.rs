use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use sports_api::client::Query;
use sports_api::{Category, NormalizedRecord, RequestTicket, SportId};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSports,
    /// Supersedes any category fetch still in flight.
    LoadCategory {
        ticket: RequestTicket,
        sport: SportId,
        category: Category,
        query: Query,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SportsLoaded { sports: Vec<String> },
    CategoryLoaded {
        ticket: RequestTicket,
        result: Result<Vec<NormalizedRecord>, String>,
    },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
