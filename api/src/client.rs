use crate::apifootball::{
    Envelope, EventItem, FixtureItem, LineupBlock, StandingsItem, StatisticsBlock,
};
use crate::cache::ResponseCache;
use crate::catalog::{LEAGUES, LeagueConfig};
use crate::mapping;
use crate::{HeadToHead, Lineups, Match, MatchDetail, MatchEvent, StandingRow, StatRow, TeamFixture};
use chrono::{Datelike, NaiveDate, Utc};
use futures_util::future;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_TIMEZONE: &str = "Europe/Istanbul";
/// One TTL for every response. Live fixtures change minute to minute, so
/// finished ones share the short window too.
pub const CACHE_TTL: Duration = Duration::from_secs(60);
const API_KEY_HEADER: &str = "x-apisports-key";
const H2H_LAST: u32 = 10;

const FIXTURES: &str = "/fixtures";
const STATISTICS: &str = "/fixtures/statistics";
const LINEUPS: &str = "/fixtures/lineups";
const EVENTS: &str = "/fixtures/events";
const HEAD_TO_HEAD: &str = "/fixtures/headtohead";
const STANDINGS: &str = "/standings";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Sent as the `timezone` query parameter on fixture list requests.
    pub timezone: String,
    pub cache_ttl: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(10),
            timezone: DEFAULT_TIMEZONE.to_owned(),
            cache_ttl: CACHE_TTL,
        }
    }
}

/// API-Football v3 client with a shared response cache.
///
/// Every public fetcher absorbs failures: transport errors, HTTP errors,
/// upstream-signalled errors and undecodable payloads are logged and come
/// back as `None` or an empty value.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: Client,
    config: ApiConfig,
    leagues: Vec<LeagueConfig>,
    cache: Arc<Mutex<ResponseCache>>,
}

impl Default for FootballApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    InvalidUrl(String),
    Network(reqwest::Error, String),
    Status(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Upstream(String, String),
    Decode(serde_json::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(url) => write!(f, "Invalid request URL: {url}"),
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(e, url) => write!(f, "HTTP error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Upstream(errors, url) => write!(f, "Upstream error for {url}: {errors}"),
            ApiError::Decode(e, endpoint) => write!(f, "Unexpected {endpoint} payload: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FootballApi {
    pub fn new(config: ApiConfig) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            match HeaderValue::from_str(key) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(API_KEY_HEADER, value);
                }
                Err(e) => warn!("ignoring unusable API key: {e}"),
            }
        }

        Self {
            client: Client::builder()
                .user_agent("roxyscore/0.1 (terminal score tracker)")
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            config,
            leagues: LEAGUES.to_vec(),
            cache: Arc::new(Mutex::new(ResponseCache::new())),
        }
    }

    /// Replace the leagues polled by `todays_fixtures`.
    pub fn with_leagues(mut self, leagues: Vec<LeagueConfig>) -> Self {
        self.leagues = leagues;
        self
    }

    pub fn leagues(&self) -> &[LeagueConfig] {
        &self.leagues
    }

    // -----------------------------------------------------------------------
    // Fixture lists
    // -----------------------------------------------------------------------

    /// Fixtures of every polled league for today's UTC date.
    pub async fn todays_fixtures(&self) -> Vec<FixtureItem> {
        self.todays_fixtures_on(Utc::now().date_naive()).await
    }

    /// One request per league, issued concurrently. A league whose request
    /// fails contributes nothing; the others are kept in league order.
    pub async fn todays_fixtures_on(&self, date: NaiveDate) -> Vec<FixtureItem> {
        let season = season_for(date).to_string();
        let day = date.format("%Y-%m-%d").to_string();

        let requests = self.leagues.iter().map(|lc| {
            let params = [
                ("league", lc.id.to_string()),
                ("season", season.clone()),
                ("date", day.clone()),
                ("timezone", self.config.timezone.clone()),
            ];
            async move { (lc, self.fetch_list::<FixtureItem>(FIXTURES, &params).await) }
        });

        future::join_all(requests)
            .await
            .into_iter()
            .flat_map(|(lc, fixtures)| {
                let fixtures = fixtures.unwrap_or_default();
                debug!("{}: {} fixtures on {day}", lc.name, fixtures.len());
                fixtures
            })
            .collect()
    }

    /// A team's fixtures for a season (current season when `None`).
    pub async fn team_fixtures(&self, team_id: &str, season: Option<i32>) -> Vec<TeamFixture> {
        let season = season.unwrap_or_else(current_season);
        let params = [
            ("team", team_id.to_owned()),
            ("season", season.to_string()),
            ("timezone", self.config.timezone.clone()),
        ];
        self.fetch_list::<FixtureItem>(FIXTURES, &params)
            .await
            .unwrap_or_default()
            .iter()
            .map(|item| mapping::map_team_fixture(item, team_id, &self.leagues))
            .collect()
    }

    /// Single fixture by upstream id, without detail sections.
    pub async fn fixture_by_id(&self, fixture_id: u64) -> Option<Match> {
        let params = [("id", fixture_id.to_string())];
        let item = self
            .fetch_list::<FixtureItem>(FIXTURES, &params)
            .await?
            .into_iter()
            .next()?;
        mapping::map_fixture(&item, &self.leagues)
            .map_err(|e| warn!("fixture {fixture_id}: {e}"))
            .ok()
    }

    // -----------------------------------------------------------------------
    // Match detail
    // -----------------------------------------------------------------------

    pub async fn fixture_statistics(&self, fixture_id: u64) -> Vec<StatRow> {
        let params = [("fixture", fixture_id.to_string())];
        self.fetch_list::<StatisticsBlock>(STATISTICS, &params)
            .await
            .map(|blocks| mapping::map_statistics(&blocks))
            .unwrap_or_default()
    }

    pub async fn fixture_lineups(&self, fixture_id: u64) -> Option<Lineups> {
        let params = [("fixture", fixture_id.to_string())];
        let blocks = self.fetch_list::<LineupBlock>(LINEUPS, &params).await?;
        mapping::map_lineups(&blocks)
    }

    pub async fn fixture_events(&self, fixture_id: u64, home_team_id: &str) -> Vec<MatchEvent> {
        let params = [("fixture", fixture_id.to_string())];
        self.fetch_list::<EventItem>(EVENTS, &params)
            .await
            .map(|events| mapping::map_events(&events, home_team_id))
            .unwrap_or_default()
    }

    /// Last meetings of two teams, oriented so `team_a` is the home side.
    pub async fn head_to_head(&self, team_a: &str, team_b: &str) -> HeadToHead {
        let params = [
            ("h2h", format!("{team_a}-{team_b}")),
            ("last", H2H_LAST.to_string()),
        ];
        self.fetch_list::<FixtureItem>(HEAD_TO_HEAD, &params)
            .await
            .map(|items| mapping::map_head_to_head(&items, team_a))
            .unwrap_or_default()
    }

    /// All four detail sections, fetched concurrently.
    pub async fn match_detail(&self, fixture_id: u64, home_team_id: &str, away_team_id: &str) -> MatchDetail {
        let (events, stats, lineup, head_to_head) = future::join4(
            self.fixture_events(fixture_id, home_team_id),
            self.fixture_statistics(fixture_id),
            self.fixture_lineups(fixture_id),
            self.head_to_head(home_team_id, away_team_id),
        )
        .await;

        MatchDetail {
            fixture_id,
            events,
            stats,
            lineup,
            head_to_head,
        }
    }

    // -----------------------------------------------------------------------
    // Standings
    // -----------------------------------------------------------------------

    pub async fn standings(&self, league_id: u32) -> Vec<StandingRow> {
        let params = [
            ("league", league_id.to_string()),
            ("season", current_season().to_string()),
        ];
        self.fetch_list::<StandingsItem>(STANDINGS, &params)
            .await
            .map(|items| mapping::map_standings(&items))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// The `response` array of an endpoint, served from cache while fresh.
    /// `None` on any failure; the failure is logged.
    pub async fn fetch_json(&self, endpoint: &str, params: &[(&str, String)]) -> Option<Vec<Value>> {
        match self.get(endpoint, params).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Option<Vec<T>> {
        let payload = self.fetch_json(endpoint, params).await?;
        serde_json::from_value(Value::Array(payload))
            .map_err(|e| warn!("{}", ApiError::Decode(e, endpoint.to_owned())))
            .ok()
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Vec<Value>> {
        let url = self.request_url(endpoint, params)?;
        let key = url.to_string();

        let cached = self.cache().get(&key);
        if let Some(payload) = cached {
            debug!("cache hit {key}");
            return Ok(payload);
        }

        debug!("GET {key}");
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, key.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Status(e, key.clone()))?;

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, key.clone()))?;

        if envelope.has_errors() {
            let errors = envelope.errors.unwrap_or_default().to_string();
            return Err(ApiError::Upstream(errors, key));
        }

        let payload = envelope.response.unwrap_or_default();
        self.cache().put(&key, payload.clone(), self.config.cache_ttl);
        Ok(payload)
    }

    /// Endpoint URL with query parameters in sorted order, so equivalent
    /// requests share a cache key.
    fn request_url(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Url> {
        let raw = format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw.clone()))?;

        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort();
        if !sorted.is_empty() {
            let mut query = url.query_pairs_mut();
            for (name, value) in sorted {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// Seasons start in August and are labelled by their starting year.
pub fn season_for(date: impl Datelike) -> i32 {
    if date.month0() >= 7 { date.year() } else { date.year() - 1 }
}

pub fn current_season() -> i32 {
    season_for(Utc::now())
}
