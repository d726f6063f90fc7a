use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use sports_api::client::{Query, SportsApi};
use sports_api::{Category, RequestTicket, SportId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Shared by the worker and every fetch task it spawns.
#[derive(Clone)]
struct FetchContext {
    client: SportsApi,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

pub struct NetworkWorker {
    ctx: FetchContext,
    requests: mpsc::Receiver<NetworkRequest>,
}

impl NetworkWorker {
    pub fn new(
        client: SportsApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            ctx: FetchContext {
                client,
                responses,
                is_loading: Arc::new(AtomicBool::new(false)),
            },
            requests,
        }
    }

    pub async fn run(mut self) {
        // At most one category fetch runs at a time; a newer selection aborts
        // the older one, pending retries included.
        let mut in_flight: Option<JoinHandle<()>> = None;

        while let Some(request) = self.requests.recv().await {
            match request {
                NetworkRequest::LoadSports => {
                    if !self.ctx.load_sports().await {
                        break;
                    }
                }
                NetworkRequest::LoadCategory { ticket, sport, category, query } => {
                    if let Some(handle) = in_flight.take()
                        && !handle.is_finished()
                    {
                        debug!("superseding in-flight fetch");
                        handle.abort();
                    }
                    let ctx = self.ctx.clone();
                    in_flight = Some(tokio::spawn(async move {
                        ctx.load_category(ticket, sport, category, query).await;
                    }));
                }
            }
        }

        if let Some(handle) = in_flight {
            handle.abort();
        }
    }
}

impl FetchContext {
    /// Returns false once the UI side has gone away.
    async fn load_sports(&self) -> bool {
        self.start_loading_animation().await;
        debug!("loading sport list");
        let result = self.client.fetch_sports().await;
        self.stop_loading_animation(result.is_ok()).await;

        let response = match result {
            Ok(sports) => NetworkResponse::SportsLoaded { sports },
            Err(err) => NetworkResponse::Error { message: err.to_string() },
        };
        self.send(response).await
    }

    async fn load_category(
        &self,
        ticket: RequestTicket,
        sport: SportId,
        category: Category,
        query: Query,
    ) {
        self.start_loading_animation().await;
        debug!("loading {category} for {sport}");
        let result = self.client.fetch_records(&sport, category, &query).await;
        debug!("network request complete");
        self.stop_loading_animation(result.is_ok()).await;

        let response = NetworkResponse::CategoryLoaded {
            ticket,
            result: result.map_err(|err| err.to_string()),
        };
        self.send(response).await;
    }

    async fn send(&self, response: NetworkResponse) -> bool {
        if let Err(e) = self.responses.send(response).await {
            error!("Failed to send network response: {e}");
            return false;
        }
        true
    }

    async fn start_loading_animation(&self) {
        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        // A superseded fetch may have left the spinner running; reuse it.
        if self.is_loading.swap(true, Ordering::Relaxed) {
            return;
        }

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
