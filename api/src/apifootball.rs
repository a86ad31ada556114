//! API-Football v3 raw wire types, shaped for deserializing responses.
//! These map to the display model through the functions in mapping.rs.
//! Base URL: https://v3.football.api-sports.io

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Every endpoint answers `{ "response": [...], "errors": [] | {...} }`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Envelope {
    #[serde(default)]
    pub response: Option<Vec<Value>>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl Envelope {
    /// Upstream signals failures in-band: an empty list means "no errors",
    /// anything non-empty (usually an object keyed by field) is an error.
    pub fn has_errors(&self) -> bool {
        match &self.errors {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}

/// Identifier that upstream sends as a number on most endpoints and as a
/// string on a few. Normalized to its string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WireId(pub String);

impl WireId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => WireId(n.to_string()),
            Raw::Text(s) => WireId(s.trim().to_owned()),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures  (/fixtures, /fixtures/headtohead)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureItem {
    pub fixture: Option<FixtureInfo>,
    pub league: Option<FixtureLeague>,
    pub teams: Option<FixtureTeams>,
    pub goals: Option<Goals>,
    pub score: Option<ScoreBreakdown>,
}

impl FixtureItem {
    pub fn fixture_id(&self) -> Option<&WireId> {
        self.fixture.as_ref().and_then(|f| f.id.as_ref())
    }

    pub fn status_short(&self) -> Option<&str> {
        self.fixture
            .as_ref()
            .and_then(|f| f.status.as_ref())
            .and_then(|s| s.short.as_deref())
    }

    pub fn elapsed(&self) -> Option<u16> {
        self.fixture
            .as_ref()
            .and_then(|f| f.status.as_ref())
            .and_then(|s| s.elapsed)
    }

    pub fn kickoff(&self) -> Option<&str> {
        self.fixture.as_ref().and_then(|f| f.date.as_deref())
    }

    pub fn home_team(&self) -> Option<&WireTeam> {
        self.teams.as_ref().and_then(|t| t.home.as_ref())
    }

    pub fn away_team(&self) -> Option<&WireTeam> {
        self.teams.as_ref().and_then(|t| t.away.as_ref())
    }

    pub fn goals(&self) -> Goals {
        self.goals.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureInfo {
    pub id: Option<WireId>,
    pub date: Option<String>, // ISO 8601 with offset
    pub timestamp: Option<i64>,
    pub status: Option<FixtureStatus>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureStatus {
    pub long: Option<String>,
    pub short: Option<String>,
    pub elapsed: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureLeague {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub logo: Option<String>,
    pub flag: Option<String>,
    pub season: Option<i32>,
    pub round: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FixtureTeams {
    pub home: Option<WireTeam>,
    pub away: Option<WireTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub winner: Option<bool>,
}

impl WireTeam {
    pub fn id_str(&self) -> &str {
        self.id.as_ref().map(WireId::as_str).unwrap_or_default()
    }

    /// String-normalized identity comparison.
    pub fn is(&self, team_id: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.as_str() == team_id.trim())
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct Goals {
    pub home: Option<u16>,
    pub away: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreBreakdown {
    pub halftime: Option<Goals>,
    pub fulltime: Option<Goals>,
    pub extratime: Option<Goals>,
    pub penalty: Option<Goals>,
}

// ---------------------------------------------------------------------------
// Events  (/fixtures/events)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventItem {
    pub time: Option<EventTime>,
    pub team: Option<WireTeam>,
    pub player: Option<NamedRef>,
    pub assist: Option<NamedRef>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub detail: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct EventTime {
    pub elapsed: Option<u16>,
    pub extra: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NamedRef {
    pub id: Option<WireId>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Statistics  (/fixtures/statistics)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatisticsBlock {
    pub team: Option<WireTeam>,
    pub statistics: Option<Vec<StatisticEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatisticEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Number, numeric string ("57%") or null depending on the statistic.
    pub value: Option<Value>,
}

// ---------------------------------------------------------------------------
// Lineups  (/fixtures/lineups)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LineupBlock {
    pub team: Option<WireTeam>,
    pub formation: Option<String>,
    #[serde(rename = "startXI")]
    pub start_xi: Option<Vec<LineupSlot>>,
    pub substitutes: Option<Vec<LineupSlot>>,
    pub coach: Option<NamedRef>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LineupSlot {
    pub player: Option<LineupEntry>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LineupEntry {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub number: Option<u16>,
    pub pos: Option<String>,
}

// ---------------------------------------------------------------------------
// Standings  (/standings)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsItem {
    pub league: Option<StandingsLeague>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsLeague {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub season: Option<i32>,
    /// One table per group; domestic leagues have a single group.
    pub standings: Option<Vec<Vec<StandingEntry>>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub rank: Option<u16>,
    pub team: Option<WireTeam>,
    pub points: Option<i32>,
    pub goals_diff: Option<i32>,
    pub form: Option<String>,
    pub all: Option<StandingRecord>,
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct StandingRecord {
    pub played: Option<u16>,
    pub win: Option<u16>,
    pub draw: Option<u16>,
    pub lose: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_id_accepts_numbers_and_strings() {
        let from_num: WireId = serde_json::from_value(json!(645)).unwrap();
        let from_str: WireId = serde_json::from_value(json!("645")).unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(from_num.as_str(), "645");
    }

    #[test]
    fn envelope_error_detection() {
        let clean: Envelope = serde_json::from_value(json!({"response": [], "errors": []})).unwrap();
        assert!(!clean.has_errors());

        let keyed: Envelope =
            serde_json::from_value(json!({"response": [], "errors": {"token": "invalid key"}})).unwrap();
        assert!(keyed.has_errors());

        let empty_obj: Envelope = serde_json::from_value(json!({"errors": {}})).unwrap();
        assert!(!empty_obj.has_errors());
        assert!(empty_obj.response.is_none());
    }

    #[test]
    fn fixture_item_tolerates_missing_sections() {
        let item: FixtureItem = serde_json::from_value(json!({
            "fixture": {"id": 1035041, "status": {"short": "NS", "elapsed": null}}
        }))
        .unwrap();
        assert_eq!(item.fixture_id().map(WireId::as_str), Some("1035041"));
        assert_eq!(item.status_short(), Some("NS"));
        assert!(item.home_team().is_none());
        assert_eq!(item.goals(), Goals::default());
    }

    #[test]
    fn lineup_block_reads_start_xi() {
        let block: LineupBlock = serde_json::from_value(json!({
            "formation": "4-3-3",
            "startXI": [{"player": {"id": 1, "name": "Alisson", "number": 1, "pos": "G"}}],
            "substitutes": []
        }))
        .unwrap();
        assert_eq!(block.start_xi.as_deref().map(<[_]>::len), Some(1));
        assert!(block.coach.is_none());
    }
}
