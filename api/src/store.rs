//! Fixture store: the leagues currently on display.
//!
//! Starts from a fallback dataset and is replaced wholesale by a successful
//! merge of upstream fixtures. A failed merge leaves it untouched.

use crate::apifootball::FixtureItem;
use crate::catalog::{self, LeagueConfig};
use crate::mapping::{self, MapError};
use crate::{League, Match, TeamRef};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

const FALLBACK_FIXTURES_JSON: &str = include_str!("../fallback_fixtures.json");

pub const SEARCH_TEAM_LIMIT: usize = 6;
pub const SEARCH_MATCH_LIMIT: usize = 5;

/// A team as listed by `FixtureStore::all_teams`, tagged with the league of
/// the first match it appeared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub team: TeamRef,
    pub league: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub teams: Vec<TeamEntry>,
    pub live_matches: Vec<Match>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.live_matches.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    leagues: Vec<League>,
}

impl FixtureStore {
    pub fn new(fallback: Vec<League>) -> Self {
        Self { leagues: fallback }
    }

    /// Store seeded with the dataset compiled into the crate.
    pub fn with_fallback() -> Self {
        match load_embedded_fallback() {
            Ok(leagues) => Self::new(leagues),
            Err(e) => {
                warn!("invalid embedded fallback fixtures: {e}");
                Self::default()
            }
        }
    }

    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    pub fn all_matches(&self) -> impl Iterator<Item = &Match> {
        self.leagues.iter().flat_map(|l| l.matches.iter())
    }

    pub fn get_match(&self, id: &str) -> Option<&Match> {
        self.all_matches().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.leagues
            .iter_mut()
            .flat_map(|l| l.matches.iter_mut())
            .find(|m| m.id == id)
    }

    /// Distinct teams in match order; the first occurrence wins.
    pub fn all_teams(&self) -> Vec<TeamEntry> {
        let mut seen = HashSet::new();
        let mut teams = Vec::new();
        for m in self.all_matches() {
            for team in [&m.home, &m.away] {
                if seen.insert(team.id.as_str()) {
                    teams.push(TeamEntry {
                        team: team.clone(),
                        league: m.league_name.clone(),
                    });
                }
            }
        }
        teams
    }

    pub fn has_live(&self) -> bool {
        self.all_matches().any(Match::is_live)
    }

    /// Case-insensitive substring search over team names, and over team and
    /// league names of live matches.
    pub fn search(&self, query: &str) -> SearchResults {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return SearchResults::default();
        }
        let hit = |s: &str| s.to_lowercase().contains(&needle);

        let teams = self
            .all_teams()
            .into_iter()
            .filter(|t| hit(&t.team.name))
            .take(SEARCH_TEAM_LIMIT)
            .collect();
        let live_matches = self
            .all_matches()
            .filter(|m| m.is_live())
            .filter(|m| hit(&m.home.name) || hit(&m.away.name) || hit(&m.league_name))
            .take(SEARCH_MATCH_LIMIT)
            .cloned()
            .collect();

        SearchResults { teams, live_matches }
    }

    /// Replace the store's leagues with upstream fixtures grouped by league.
    ///
    /// All or nothing: returns `false` and keeps the current leagues when the
    /// input is empty or any fixture lacks the data needed to display it.
    pub fn load_from_api(&mut self, fixtures: &[FixtureItem], leagues: &[LeagueConfig]) -> bool {
        if fixtures.is_empty() {
            return false;
        }
        match group_by_league(fixtures, leagues) {
            Ok(grouped) if !grouped.is_empty() => {
                debug!(
                    "fixture store: {} fixtures in {} leagues",
                    fixtures.len(),
                    grouped.len()
                );
                self.leagues = grouped;
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("fixture merge aborted, keeping current data: {e}");
                false
            }
        }
    }
}

fn group_by_league(fixtures: &[FixtureItem], leagues: &[LeagueConfig]) -> Result<Vec<League>, MapError> {
    let mut order: Vec<League> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in fixtures {
        let m = mapping::map_fixture(item, leagues)?;
        let slot = match index.get(&m.league_id) {
            Some(&i) => i,
            None => {
                let info = mapping::fixture_league(item, leagues).unwrap_or_else(|| {
                    catalog::league_info(leagues, &m.league_id, None, None)
                });
                order.push(League {
                    id: info.id,
                    name: info.name,
                    country: info.country,
                    flag: info.flag,
                    priority: info.priority,
                    matches: Vec::new(),
                });
                index.insert(m.league_id.clone(), order.len() - 1);
                order.len() - 1
            }
        };
        order[slot].matches.push(m);
    }

    // Stable: leagues sharing a priority keep first-seen order.
    order.sort_by_key(|l| l.priority);
    Ok(order)
}

fn load_embedded_fallback() -> Result<Vec<League>, serde_json::Error> {
    serde_json::from_str(FALLBACK_FIXTURES_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LEAGUES;
    use crate::MatchStatus;
    use serde_json::{json, Value};

    fn fixtures(value: Value) -> Vec<FixtureItem> {
        serde_json::from_value(value).expect("valid fixtures json")
    }

    fn item(id: u64, league: u64, home: (u64, &str), away: (u64, &str), status: &str) -> Value {
        json!({
            "fixture": {"id": id, "date": "2024-03-02T17:00:00+00:00", "status": {"short": status, "elapsed": 0}},
            "league": {"id": league, "name": format!("League {league}"), "country": "X"},
            "teams": {"home": {"id": home.0, "name": home.1}, "away": {"id": away.0, "name": away.1}},
            "goals": {"home": null, "away": null},
            "score": {"halftime": {"home": null, "away": null}}
        })
    }

    #[test]
    fn embedded_fallback_parses() {
        let leagues = load_embedded_fallback().expect("fallback fixtures should parse");
        assert!(!leagues.is_empty());
        assert!(leagues.iter().all(|l| !l.matches.is_empty()));
    }

    #[test]
    fn fallback_keeps_score_invariant() {
        let store = FixtureStore::with_fallback();
        for m in store.all_matches() {
            let upcoming = m.status == MatchStatus::Upcoming;
            assert_eq!(m.score.home.is_none(), upcoming, "match {}", m.id);
            assert_eq!(m.score.away.is_none(), upcoming, "match {}", m.id);
        }
    }

    #[test]
    fn queries_over_fallback() {
        let store = FixtureStore::with_fallback();
        assert!(store.has_live());
        assert_eq!(store.get_match("sl1").map(|m| m.home.name.as_str()), Some("Galatasaray"));
        assert!(store.get_match("nope").is_none());

        let teams = store.all_teams();
        let rma: Vec<_> = teams.iter().filter(|t| t.team.id == "rma").collect();
        assert_eq!(rma.len(), 1);
        // Real Madrid first appears in the Champions League group, which sorts
        // before La Liga.
        assert_eq!(rma[0].league, "Şampiyonlar Ligi");
    }

    #[test]
    fn search_limits_and_live_only() {
        let store = FixtureStore::with_fallback();

        let results = store.search("a");
        assert!(results.teams.len() <= SEARCH_TEAM_LIMIT);
        assert!(results.live_matches.len() <= SEARCH_MATCH_LIMIT);
        assert!(results.live_matches.iter().all(Match::is_live));

        let city = store.search("city");
        assert_eq!(city.teams.len(), 1);
        assert_eq!(city.live_matches.len(), 1);
        assert_eq!(city.live_matches[0].id, "pl1");

        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn load_groups_and_sorts_by_priority() {
        let mut store = FixtureStore::default();
        let items = fixtures(json!([
            item(1, 88, (194, "Ajax"), (197, "PSV"), "NS"),
            item(2, 39, (50, "Manchester City"), (42, "Arsenal"), "2H"),
            item(3, 203, (645, "Galatasaray"), (611, "Fenerbahce"), "FT"),
            item(4, 39, (40, "Liverpool"), (49, "Chelsea"), "NS"),
        ]));

        assert!(store.load_from_api(&items, LEAGUES));
        let ids: Vec<&str> = store.leagues().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["203", "39", "88"]);

        let pl = &store.leagues()[1];
        assert_eq!(pl.name, "Premier League");
        assert_eq!(pl.matches.len(), 2);
        assert_eq!(pl.matches[0].id, "2");

        let other = &store.leagues()[2];
        assert_eq!(other.name, "League 88");
        assert_eq!(other.flag, catalog::TROPHY_FLAG);
        assert_eq!(other.priority, catalog::UNKNOWN_LEAGUE_PRIORITY);

        let m = store.get_match("1").unwrap();
        assert_eq!(m.minute, None);
        assert_eq!(m.halftime_score, None);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut store = FixtureStore::with_fallback();
        let before = store.leagues().to_vec();
        assert!(!store.load_from_api(&[], LEAGUES));
        assert_eq!(store.leagues(), before.as_slice());
    }

    #[test]
    fn malformed_fixture_leaves_store_untouched() {
        let mut store = FixtureStore::with_fallback();
        let before = store.leagues().to_vec();

        let mut broken = item(2, 39, (50, "Manchester City"), (42, "Arsenal"), "2H");
        broken["teams"]["away"] = json!({"id": 42});
        let items = fixtures(json!([item(1, 203, (645, "Galatasaray"), (611, "Fenerbahce"), "NS"), broken]));

        assert!(!store.load_from_api(&items, LEAGUES));
        assert_eq!(store.leagues(), before.as_slice());
    }
}
