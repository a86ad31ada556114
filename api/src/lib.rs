pub mod apifootball;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod mapping;
pub mod store;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types: the display model, independent of the API-Football wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    pub name: String,
    pub country: String,
    pub flag: String,
    /// Sort key, lower is shown first.
    pub priority: u32,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub league_id: String,
    pub league_name: String,
    pub league_flag: String,
    pub home: TeamRef,
    pub away: TeamRef,
    pub score: Score,
    pub status: MatchStatus,
    #[serde(default)]
    pub minute: Option<u16>,
    #[serde(default)]
    pub halftime_score: Option<String>,
    pub kickoff_time: String,
    pub kickoff_date: String,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub stats: Vec<StatRow>,
    #[serde(default)]
    pub lineup: Lineups,
    #[serde(default)]
    pub head_to_head: HeadToHead,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    /// True once any detail section (events, stats, lineup, h2h) carries data.
    pub fn has_detail(&self) -> bool {
        !self.events.is_empty()
            || !self.stats.is_empty()
            || !self.lineup.home.starting.is_empty()
            || !self.head_to_head.matches.is_empty()
    }

    /// Upstream fixture id, when this match came from a sync rather than
    /// the fallback dataset.
    pub fn fixture_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: String,
    pub name: String,
    pub short_code: String,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Goals per side; both are `None` exactly when the match is upcoming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: Option<u16>,
    pub away: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "Yaklaşan",
            MatchStatus::Live => "Canlı",
            MatchStatus::Finished => "Bitti",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub minute: u16,
    #[serde(default)]
    pub extra_minute: Option<u16>,
    pub kind: EventKind,
    pub side: Side,
    pub player: String,
    #[serde(default)]
    pub assist: Option<String>,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Goal,
    #[serde(rename = "yellow")]
    YellowCard,
    #[serde(rename = "red")]
    RedCard,
    #[serde(rename = "sub")]
    Substitution,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRow {
    pub label: String,
    pub home: i32,
    pub away: i32,
    #[serde(default)]
    pub kind: Option<StatKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Percentage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineups {
    pub home: Lineup,
    pub away: Lineup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    #[serde(default)]
    pub formation: String,
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub starting: Vec<LineupPlayer>,
    #[serde(default)]
    pub substitutes: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPlayer {
    pub number: Option<u16>,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins: H2HWins,
    pub matches: Vec<H2HEntry>,
}

/// Tallies from the point of view of the designated home team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2HWins {
    pub home: u32,
    pub draw: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2HEntry {
    pub date: String,
    pub home_score: u16,
    pub away_score: u16,
}

/// Detail sections fetched on demand for a synced match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchDetail {
    pub fixture_id: u64,
    pub events: Vec<MatchEvent>,
    pub stats: Vec<StatRow>,
    pub lineup: Option<Lineups>,
    pub head_to_head: HeadToHead,
}

/// One row of a team's fixture list, seen from that team's side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFixture {
    pub id: String,
    pub is_home: bool,
    pub opponent_id: String,
    pub opponent_name: String,
    pub opponent_logo: String,
    pub goals_for: Option<u16>,
    pub goals_against: Option<u16>,
    pub status: MatchStatus,
    pub minute: Option<u16>,
    pub league_name: String,
    pub league_flag: String,
    pub date: String,
    pub time: String,
    pub matchweek: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingRow {
    pub rank: u16,
    pub team_id: String,
    pub team_name: String,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goal_difference: i32,
    pub points: i32,
    pub form: String,
}
