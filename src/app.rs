use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, TodayRow, today_rows};
use crate::state::messages::NetworkRequest;
use crate::state::storage::LocalStorage;
use football_api::apifootball::FixtureItem;
use football_api::catalog::{self, LEAGUES};
use football_api::store::{FixtureStore, SearchResults};
use football_api::{Match, MatchDetail, Score, TeamFixture, TeamRef};
use log::{info, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Today,
    Favorites,
    Match,
    Team,
    Help,
}

/// A row on the Favorites tab: starred matches first, then starred teams.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteRow {
    Match(Match),
    Team(TeamRef),
}

/// A row in the search overlay, teams before live matches.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHit {
    Team(TeamRef),
    Match(String),
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub store: FixtureStore,
    pub storage: LocalStorage,
}

impl App {
    pub fn new(settings: AppSettings, storage: LocalStorage) -> Self {
        Self::with_store(settings, storage, FixtureStore::with_fallback())
    }

    pub fn with_store(settings: AppSettings, storage: LocalStorage, store: FixtureStore) -> Self {
        let mut app = Self {
            state: AppState::new(storage.collapsed_leagues()),
            settings,
            store,
            storage,
        };
        app.remember_favorite_scores();
        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers
    // -----------------------------------------------------------------------

    /// Merge a fresh fixture list. Returns whether the store changed; on
    /// failure the current leagues stay on screen without a notice. Detail
    /// already fetched for a synced match survives the rebuild.
    pub fn on_fixtures_loaded(&mut self, fixtures: Vec<FixtureItem>) -> bool {
        let kept: Vec<(String, MatchDetail)> = self
            .store
            .all_matches()
            .filter(|m| m.fixture_id().is_some() && m.has_detail())
            .map(|m| (m.id.clone(), detail_of(m)))
            .collect();

        if !self.store.load_from_api(&fixtures, LEAGUES) {
            return false;
        }

        for (id, detail) in kept {
            if let Some(m) = self.store.get_match_mut(&id) {
                apply_detail(m, detail);
            }
        }

        let rows = self.today_rows().len();
        self.state.today.clamp(rows);
        self.announce_goals();
        info!("fixture store now holds {} leagues", self.store.leagues().len());
        true
    }

    /// After a refresh, the live match on screen gets its events and stats
    /// fetched again.
    pub fn live_detail_request(&self) -> Option<NetworkRequest> {
        if self.state.active_tab != MenuItem::Match {
            return None;
        }
        let m = self.current_match().filter(|m| m.is_live())?;
        Some(NetworkRequest::LoadMatchDetail {
            match_id: m.id.clone(),
            fixture_id: m.fixture_id()?,
            home_team_id: m.home.id.clone(),
            away_team_id: m.away.id.clone(),
        })
    }

    pub fn on_match_detail_loaded(&mut self, match_id: &str, detail: MatchDetail) {
        let Some(m) = self.store.get_match_mut(match_id) else {
            warn!("detail for {match_id} arrived after the match left the store");
            return;
        };
        apply_detail(m, detail);
    }

    pub fn on_team_fixtures_loaded(&mut self, team_id: &str, fixtures: Vec<TeamFixture>) {
        let view = &mut self.state.team_view;
        if view.team.as_ref().map(|t| t.id.as_str()) != Some(team_id) {
            return;
        }
        view.fixtures = fixtures;
        view.loaded = true;
        view.selected.reset();
    }

    fn announce_goals(&mut self) {
        let notify = self.storage.notif_on();
        for id in self.storage.fav_matches() {
            let Some(m) = self.store.get_match(&id) else {
                continue;
            };
            let previous = self.state.seen_scores.insert(id.clone(), m.score);
            if notify && previous.is_some_and(|p| scored(p, m.score)) {
                let text = format!(
                    "GOL! {} {}-{} {}",
                    m.home.name,
                    m.score.home.unwrap_or(0),
                    m.score.away.unwrap_or(0),
                    m.away.name
                );
                self.state.info(text);
            }
        }
    }

    fn remember_favorite_scores(&mut self) {
        for id in self.storage.fav_matches() {
            if let Some(m) = self.store.get_match(&id) {
                self.state.seen_scores.insert(id, m.score);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    /// Esc from the match or team view returns to where it was opened from.
    pub fn go_back(&mut self) {
        let target = match self.state.previous_tab {
            MenuItem::Help => MenuItem::Today,
            tab if tab == self.state.active_tab => MenuItem::Today,
            tab => tab,
        };
        self.update_tab(target);
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Today tab
    // -----------------------------------------------------------------------

    pub fn today_rows(&self) -> Vec<TodayRow> {
        today_rows(self.store.leagues(), &self.state.collapsed)
    }

    pub fn today_down(&mut self) {
        let len = self.today_rows().len();
        self.state.today.down(len);
    }

    pub fn today_up(&mut self) {
        self.state.today.up();
    }

    /// Enter on a league header folds it; on a match, opens the match.
    pub fn today_activate(&mut self) -> Option<NetworkRequest> {
        match self.today_rows().get(self.state.today.index)?.clone() {
            TodayRow::League { league_id } => {
                self.toggle_collapse(&league_id);
                None
            }
            TodayRow::Match { match_id } => self.open_match(&match_id),
        }
    }

    pub fn toggle_collapse(&mut self, league_id: &str) {
        if !self.state.collapsed.remove(league_id) {
            self.state.collapsed.insert(league_id.to_owned());
        }
        let mut ids: Vec<String> = self.state.collapsed.iter().cloned().collect();
        ids.sort();
        if let Err(e) = self.storage.set_collapsed_leagues(&ids) {
            warn!("could not persist collapsed leagues: {e:#}");
        }
        let len = self.today_rows().len();
        self.state.today.clamp(len);
    }

    fn selected_today_match(&self) -> Option<String> {
        match self.today_rows().get(self.state.today.index)? {
            TodayRow::Match { match_id } => Some(match_id.clone()),
            TodayRow::League { .. } => None,
        }
    }

    // -----------------------------------------------------------------------
    // Match and team views
    // -----------------------------------------------------------------------

    /// Switch to the match view. Synced matches without detail yet produce a
    /// request for it.
    pub fn open_match(&mut self, match_id: &str) -> Option<NetworkRequest> {
        let m = self.store.get_match(match_id)?;
        let request = match m.fixture_id() {
            Some(fixture_id) if !m.has_detail() => Some(NetworkRequest::LoadMatchDetail {
                match_id: m.id.clone(),
                fixture_id,
                home_team_id: m.home.id.clone(),
                away_team_id: m.away.id.clone(),
            }),
            _ => None,
        };
        self.state.match_view.match_id = Some(match_id.to_owned());
        self.state.match_view.scroll_offset = 0;
        self.update_tab(MenuItem::Match);
        request
    }

    pub fn current_match(&self) -> Option<&Match> {
        let id = self.state.match_view.match_id.as_deref()?;
        self.store.get_match(id)
    }

    pub fn match_scroll_down(&mut self) {
        self.state.match_view.scroll_offset = self.state.match_view.scroll_offset.saturating_add(1);
    }

    pub fn match_scroll_up(&mut self) {
        self.state.match_view.scroll_offset = self.state.match_view.scroll_offset.saturating_sub(1);
    }

    /// Switch to the team view and request its fixtures when the team can be
    /// resolved to an upstream id.
    pub fn open_team(&mut self, team: TeamRef) -> Option<NetworkRequest> {
        let request = match upstream_team_id(&team.id) {
            Some(api_team_id) => Some(NetworkRequest::LoadTeamFixtures {
                team_id: team.id.clone(),
                api_team_id,
            }),
            None => {
                self.state.info(format!("{} için fikstür bulunamadı", team.name));
                None
            }
        };
        let view = &mut self.state.team_view;
        view.team = Some(team);
        view.fixtures.clear();
        view.loaded = request.is_none();
        view.selected.reset();
        self.update_tab(MenuItem::Team);
        request
    }

    pub fn open_current_home_team(&mut self) -> Option<NetworkRequest> {
        let team = self.current_match()?.home.clone();
        self.open_team(team)
    }

    pub fn open_current_away_team(&mut self) -> Option<NetworkRequest> {
        let team = self.current_match()?.away.clone();
        self.open_team(team)
    }

    pub fn team_down(&mut self) {
        let len = self.state.team_view.fixtures.len();
        self.state.team_view.selected.down(len);
    }

    pub fn team_up(&mut self) {
        self.state.team_view.selected.up();
    }

    /// Enter on a team fixture opens it when it is part of today's store.
    pub fn team_activate(&mut self) -> Option<NetworkRequest> {
        let view = &self.state.team_view;
        let id = view.fixtures.get(view.selected.index)?.id.clone();
        if self.store.get_match(&id).is_none() {
            self.state.info("Bu maç bugünün listesinde değil");
            return None;
        }
        self.open_match(&id)
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    pub fn favorite_rows(&self) -> Vec<FavoriteRow> {
        let matches = self
            .storage
            .fav_matches()
            .into_iter()
            .filter_map(|id| self.store.get_match(&id).cloned())
            .map(FavoriteRow::Match);
        let teams = self.storage.fav_teams().into_iter().map(FavoriteRow::Team);
        matches.chain(teams).collect()
    }

    pub fn favorites_down(&mut self) {
        let len = self.favorite_rows().len();
        self.state.favorites.down(len);
    }

    pub fn favorites_up(&mut self) {
        self.state.favorites.up();
    }

    pub fn favorites_activate(&mut self) -> Option<NetworkRequest> {
        match self.favorite_rows().into_iter().nth(self.state.favorites.index)? {
            FavoriteRow::Match(m) => self.open_match(&m.id),
            FavoriteRow::Team(team) => self.open_team(team),
        }
    }

    /// Star or unstar the match under the cursor on whichever tab is active.
    pub fn toggle_favorite_match(&mut self) {
        let id = match self.state.active_tab {
            MenuItem::Today => self.selected_today_match(),
            MenuItem::Match => self.state.match_view.match_id.clone(),
            MenuItem::Favorites => match self.favorite_rows().into_iter().nth(self.state.favorites.index) {
                Some(FavoriteRow::Match(m)) => Some(m.id),
                _ => None,
            },
            _ => None,
        };
        let Some(id) = id else {
            return;
        };

        match self.storage.toggle_fav_match(&id) {
            Ok(true) => {
                if let Some(m) = self.store.get_match(&id) {
                    self.state.seen_scores.insert(id.clone(), m.score);
                }
                self.state.info("Maç favorilere eklendi");
            }
            Ok(false) => {
                self.state.seen_scores.remove(&id);
                self.state.info("Maç favorilerden çıkarıldı");
            }
            Err(e) => self.state.error(format!("Favori kaydedilemedi: {e}")),
        }
        let len = self.favorite_rows().len();
        self.state.favorites.clamp(len);
    }

    /// Star or unstar the team in focus: the team view's team, or the
    /// favorite row under the cursor.
    pub fn toggle_favorite_team(&mut self) {
        let team = match self.state.active_tab {
            MenuItem::Team => self.state.team_view.team.clone(),
            MenuItem::Favorites => match self.favorite_rows().into_iter().nth(self.state.favorites.index) {
                Some(FavoriteRow::Team(team)) => Some(team),
                _ => None,
            },
            _ => None,
        };
        let Some(team) = team else {
            return;
        };

        match self.storage.toggle_fav_team(&team) {
            Ok(true) => self.state.info(format!("{} favorilere eklendi", team.name)),
            Ok(false) => self.state.info(format!("{} favorilerden çıkarıldı", team.name)),
            Err(e) => self.state.error(format!("Favori kaydedilemedi: {e}")),
        }
        let len = self.favorite_rows().len();
        self.state.favorites.clamp(len);
    }

    pub fn toggle_notifications(&mut self) {
        let on = !self.storage.notif_on();
        match self.storage.set_notif_on(on) {
            Ok(()) if on => self.state.info("Bildirimler açıldı"),
            Ok(()) => self.state.info("Bildirimler kapatıldı"),
            Err(e) => self.state.error(format!("Ayar kaydedilemedi: {e}")),
        }
    }

    // -----------------------------------------------------------------------
    // Search overlay
    // -----------------------------------------------------------------------

    pub fn search_results(&self) -> SearchResults {
        self.store.search(&self.state.search.query)
    }

    pub fn search_hits(&self) -> Vec<SearchHit> {
        let results = self.search_results();
        let teams = results.teams.into_iter().map(|t| SearchHit::Team(t.team));
        let matches = results.live_matches.into_iter().map(|m| SearchHit::Match(m.id));
        teams.chain(matches).collect()
    }

    pub fn search_down(&mut self) {
        let len = self.search_hits().len();
        self.state.search.selected.down(len);
    }

    pub fn search_activate(&mut self) -> Option<NetworkRequest> {
        let hit = self.search_hits().into_iter().nth(self.state.search.selected.index)?;
        self.state.search.close();
        match hit {
            SearchHit::Team(team) => self.open_team(team),
            SearchHit::Match(id) => self.open_match(&id),
        }
    }
}

fn detail_of(m: &Match) -> MatchDetail {
    MatchDetail {
        fixture_id: m.fixture_id().unwrap_or_default(),
        events: m.events.clone(),
        stats: m.stats.clone(),
        lineup: Some(m.lineup.clone()),
        head_to_head: m.head_to_head.clone(),
    }
}

fn apply_detail(m: &mut Match, detail: MatchDetail) {
    m.events = detail.events;
    m.stats = detail.stats;
    if let Some(lineup) = detail.lineup {
        m.lineup = lineup;
    }
    m.head_to_head = detail.head_to_head;
}

/// A goal went in between two observed scores. Kickoff turns `None` into
/// 0-0, which is not a goal.
fn scored(before: Score, after: Score) -> bool {
    match (before.home, before.away, after.home, after.away) {
        (Some(h0), Some(a0), Some(h1), Some(a1)) => h1 > h0 || a1 > a0,
        _ => false,
    }
}

/// Upstream id for a team: numeric ids come from a sync, slugs are looked
/// up in the team profiles.
pub fn upstream_team_id(team_id: &str) -> Option<u32> {
    team_id
        .parse()
        .ok()
        .or_else(|| catalog::find_profile(team_id).and_then(|p| p.api_id))
}
