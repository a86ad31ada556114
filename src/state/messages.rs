use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use football_api::apifootball::FixtureItem;
use football_api::{MatchDetail, TeamFixture};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadTodaysFixtures,
    LoadMatchDetail {
        match_id: String,
        fixture_id: u64,
        home_team_id: String,
        away_team_id: String,
    },
    LoadTeamFixtures { team_id: String, api_team_id: u32 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Raw upstream fixtures; merged into the fixture store by the UI loop.
    FixturesLoaded { fixtures: Vec<FixtureItem> },
    MatchDetailLoaded { match_id: String, detail: MatchDetail },
    TeamFixturesLoaded { team_id: String, fixtures: Vec<TeamFixture> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
