use crate::state::messages::{NetworkRequest, NetworkResponse};
use football_api::client::FootballApi;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

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

/// Owns the API client and serves `NetworkRequest`s one at a time.
pub struct NetworkWorker {
    client: FootballApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: FootballApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadTodaysFixtures => self.handle_load_todays_fixtures().await,
                NetworkRequest::LoadMatchDetail {
                    match_id,
                    fixture_id,
                    home_team_id,
                    away_team_id,
                } => {
                    self.handle_load_match_detail(match_id, fixture_id, &home_team_id, &away_team_id)
                        .await
                }
                NetworkRequest::LoadTeamFixtures { team_id, api_team_id } => {
                    self.handle_load_team_fixtures(team_id, api_team_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation().await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    /// Upstream failures arrive here as an empty list; the store then keeps
    /// whatever it is showing.
    async fn handle_load_todays_fixtures(&self) -> NetworkResponse {
        debug!("loading today's fixtures");
        let fixtures = self.client.todays_fixtures().await;
        NetworkResponse::FixturesLoaded { fixtures }
    }

    async fn handle_load_match_detail(
        &self,
        match_id: String,
        fixture_id: u64,
        home_team_id: &str,
        away_team_id: &str,
    ) -> NetworkResponse {
        debug!("loading detail for fixture {fixture_id}");
        let detail = self
            .client
            .match_detail(fixture_id, home_team_id, away_team_id)
            .await;
        NetworkResponse::MatchDetailLoaded { match_id, detail }
    }

    async fn handle_load_team_fixtures(&self, team_id: String, api_team_id: u32) -> NetworkResponse {
        debug!("loading fixtures for team {team_id} (upstream {api_team_id})");
        let fixtures = self
            .client
            .team_fixtures(&api_team_id.to_string(), None)
            .await;
        NetworkResponse::TeamFixturesLoaded { team_id, fixtures }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

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

    async fn stop_loading_animation(&self) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state: LoadingState::default() })
            .await;
    }
}
