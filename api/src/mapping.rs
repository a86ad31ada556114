//! Mapping: API-Football wire types → display model.
//!
//! Everything here is pure. The detail mappers are total and substitute
//! defaults for missing fields; only `map_fixture`, which feeds the fixture
//! store's all-or-nothing merge, reports structural problems.

use crate::apifootball::{
    EventItem, FixtureItem, LineupBlock, LineupSlot, StandingsItem, StatisticsBlock, WireId,
    WireTeam,
};
use crate::catalog::{self, LeagueConfig, LeagueInfo};
use crate::{
    EventKind, H2HEntry, H2HWins, HeadToHead, Lineup, LineupPlayer, Lineups, Match, MatchEvent,
    MatchStatus, Score, Side, StandingRow, StatKind, StatRow, TeamFixture, TeamRef,
};
use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use serde_json::Value;
use std::fmt;

/// Most recent fixtures considered for a head-to-head summary.
pub const H2H_LIMIT: usize = 10;

const LIVE_STATUSES: &[&str] = &["1H", "HT", "2H", "ET", "BT", "P", "SUSP", "INT", "LIVE"];
const DONE_STATUSES: &[&str] = &["FT", "AET", "PEN"];

/// Kick-off times are shown in Istanbul time, which has no DST.
const DISPLAY_UTC_OFFSET_SECS: i32 = 3 * 3600;
const MONTHS_TR: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

/// Upstream statistic type → (label, kind). Types not listed are dropped.
const STAT_LABELS: &[(&str, &str, Option<StatKind>)] = &[
    ("Ball Possession", "Topa Sahip Olma", Some(StatKind::Percentage)),
    ("Total Shots", "Şut", None),
    ("Shots on Goal", "İsabetli Şut", None),
    ("Shots off Goal", "İsabetsiz Şut", None),
    ("Corner Kicks", "Korner", None),
    ("Fouls", "Faul", None),
    ("Offsides", "Ofsayt", None),
    ("Yellow Cards", "Sarı Kart", None),
    ("Red Cards", "Kırmızı Kart", None),
    ("Goalkeeper Saves", "Kurtarış", None),
    ("Total passes", "Pas", None),
    ("Passes %", "Pas Yüzdesi", Some(StatKind::Percentage)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    MissingField { fixture: String, field: &'static str },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::MissingField { fixture, field } => {
                write!(f, "fixture {fixture}: missing {field}")
            }
        }
    }
}

impl std::error::Error for MapError {}

// ---------------------------------------------------------------------------
// Shared policies
// ---------------------------------------------------------------------------

pub fn classify_status(short: &str) -> MatchStatus {
    if LIVE_STATUSES.contains(&short) {
        MatchStatus::Live
    } else if DONE_STATUSES.contains(&short) {
        MatchStatus::Finished
    } else {
        MatchStatus::Upcoming
    }
}

/// Applies the "no score before kick-off" rule to raw goals.
pub fn score_for(status: MatchStatus, home: Option<u16>, away: Option<u16>) -> Score {
    match status {
        MatchStatus::Upcoming => Score { home: None, away: None },
        _ => Score {
            home: Some(home.unwrap_or(0)),
            away: Some(away.unwrap_or(0)),
        },
    }
}

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub fn parse_kickoff(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&display_offset()))
}

/// "21:00"
pub fn format_time(dt: &DateTime<FixedOffset>) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

/// "14 Oca"
pub fn format_day_month(dt: &DateTime<FixedOffset>) -> String {
    format!("{} {}", dt.day(), MONTHS_TR[dt.month0() as usize])
}

/// "14 Oca 2024"
pub fn format_date(dt: &DateTime<FixedOffset>) -> String {
    format!("{} {}", format_day_month(dt), dt.year())
}

fn kickoff_of(item: &FixtureItem) -> Option<DateTime<FixedOffset>> {
    if let Some(dt) = item.kickoff().and_then(parse_kickoff) {
        return Some(dt);
    }
    item.fixture
        .as_ref()
        .and_then(|f| f.timestamp)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&display_offset()))
}

fn team_ref(team: &WireTeam, id: &str, name: &str) -> TeamRef {
    let style = catalog::team_style(id, name);
    TeamRef {
        id: id.to_owned(),
        name: name.to_owned(),
        short_code: style.short,
        primary_color: style.color,
        secondary_color: style.color2,
        logo_url: team.logo.clone().filter(|l| !l.is_empty()),
    }
}

// ---------------------------------------------------------------------------
// Fixture → Match (store merge, single-fixture lookup)
// ---------------------------------------------------------------------------

/// Resolve league display data for a fixture.
pub fn fixture_league(item: &FixtureItem, leagues: &[LeagueConfig]) -> Option<LeagueInfo> {
    let league = item.league.as_ref()?;
    let id = league.id.as_ref()?;
    Some(catalog::league_info(
        leagues,
        id.as_str(),
        league.name.as_deref(),
        league.country.as_deref(),
    ))
}

/// Build a `Match` with empty detail sections. Fails when identity data
/// (fixture id, league, either team's id or name) is missing.
pub fn map_fixture(item: &FixtureItem, leagues: &[LeagueConfig]) -> Result<Match, MapError> {
    let fixture_id = item
        .fixture_id()
        .map(WireId::to_string)
        .ok_or_else(|| MapError::MissingField { fixture: "?".into(), field: "fixture.id" })?;
    let missing = |field: &'static str| MapError::MissingField { fixture: fixture_id.clone(), field };

    let league = fixture_league(item, leagues).ok_or_else(|| missing("league.id"))?;
    let home = required_team(item.home_team()).ok_or_else(|| missing("teams.home"))?;
    let away = required_team(item.away_team()).ok_or_else(|| missing("teams.away"))?;

    let status = classify_status(item.status_short().unwrap_or_default());
    let goals = item.goals();
    let halftime = item
        .score
        .as_ref()
        .and_then(|s| s.halftime)
        .and_then(|ht| Some(format!("{}-{}", ht.home?, ht.away?)));
    let kickoff = kickoff_of(item);

    Ok(Match {
        id: fixture_id.clone(),
        league_id: league.id,
        league_name: league.name,
        league_flag: league.flag,
        home: team_ref(home.0, home.1, home.2),
        away: team_ref(away.0, away.1, away.2),
        score: score_for(status, goals.home, goals.away),
        status,
        minute: item.elapsed().filter(|m| *m > 0),
        halftime_score: halftime,
        kickoff_time: kickoff.as_ref().map(format_time).unwrap_or_default(),
        kickoff_date: kickoff.as_ref().map(format_day_month).unwrap_or_default(),
        ..Default::default()
    })
}

fn required_team(team: Option<&WireTeam>) -> Option<(&WireTeam, &str, &str)> {
    let team = team?;
    let id = team.id.as_ref()?.as_str();
    let name = team.name.as_deref()?;
    if id.is_empty() {
        return None;
    }
    Some((team, id, name))
}

// ---------------------------------------------------------------------------
// Team fixture list
// ---------------------------------------------------------------------------

/// Map a fixture from the perspective of `team_id`.
pub fn map_team_fixture(item: &FixtureItem, team_id: &str, leagues: &[LeagueConfig]) -> TeamFixture {
    let empty = WireTeam::default();
    let home = item.home_team().unwrap_or(&empty);
    let away = item.away_team().unwrap_or(&empty);
    let is_home = home.is(team_id);
    let opponent = if is_home { away } else { home };

    let goals = item.goals();
    let (mine, theirs) = if is_home { (goals.home, goals.away) } else { (goals.away, goals.home) };

    let league = item.league.clone().unwrap_or_default();
    let info = fixture_league(item, leagues);
    let kickoff = kickoff_of(item);

    TeamFixture {
        id: item.fixture_id().map(WireId::to_string).unwrap_or_default(),
        is_home,
        opponent_id: opponent.id_str().to_owned(),
        opponent_name: opponent.name.clone().unwrap_or_default(),
        opponent_logo: opponent.logo.clone().unwrap_or_default(),
        goals_for: mine,
        goals_against: theirs,
        status: classify_status(item.status_short().unwrap_or_default()),
        minute: item.elapsed(),
        league_name: info
            .as_ref()
            .map(|i| i.name.clone())
            .filter(|n| !n.is_empty())
            .or(league.name)
            .unwrap_or_default(),
        league_flag: info
            .map(|i| i.flag)
            .unwrap_or_else(|| catalog::TROPHY_FLAG.to_owned()),
        date: kickoff.as_ref().map(format_date).unwrap_or_default(),
        time: kickoff.as_ref().map(format_time).unwrap_or_default(),
        matchweek: league.round.unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Detail mappers
// ---------------------------------------------------------------------------

pub fn map_events(items: &[EventItem], home_team_id: &str) -> Vec<MatchEvent> {
    items
        .iter()
        .map(|e| {
            let detail = e.detail.clone().unwrap_or_default();
            let kind = match e.kind.as_deref() {
                Some("Goal") => EventKind::Goal,
                Some("Card") if detail == "Red Card" => EventKind::RedCard,
                Some("Card") => EventKind::YellowCard,
                Some("subst") => EventKind::Substitution,
                _ => EventKind::Other,
            };
            let side = match &e.team {
                Some(team) if team.is(home_team_id) => Side::Home,
                _ => Side::Away,
            };
            MatchEvent {
                minute: e.time.and_then(|t| t.elapsed).unwrap_or(0),
                extra_minute: e.time.and_then(|t| t.extra),
                kind,
                side,
                player: e
                    .player
                    .as_ref()
                    .and_then(|p| p.name.clone())
                    .unwrap_or_else(|| "?".to_owned()),
                assist: e
                    .assist
                    .as_ref()
                    .and_then(|a| a.name.clone())
                    .filter(|n| !n.is_empty()),
                detail,
            }
        })
        .collect()
}

/// Needs both team blocks; away values are matched by statistic type, not
/// by position.
pub fn map_statistics(blocks: &[StatisticsBlock]) -> Vec<StatRow> {
    let [home_block, away_block, ..] = blocks else {
        return Vec::new();
    };
    let home = home_block.statistics.as_deref().unwrap_or_default();
    let away = away_block.statistics.as_deref().unwrap_or_default();

    home.iter()
        .filter_map(|stat| {
            let kind_name = stat.kind.as_deref()?;
            let (_, label, kind) = STAT_LABELS.iter().find(|(name, ..)| *name == kind_name)?;
            let away_value = away
                .iter()
                .find(|s| s.kind.as_deref() == Some(kind_name))
                .map(|s| stat_value(s.value.as_ref()))
                .unwrap_or(0);
            Some(StatRow {
                label: (*label).to_owned(),
                home: stat_value(stat.value.as_ref()),
                away: away_value,
                kind: *kind,
            })
        })
        .collect()
}

/// Integer prefix of a numeric or numeric-string value ("57%" → 57); 0 when
/// absent or unparseable.
fn stat_value(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => leading_int(s),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().map(|v| sign * v).unwrap_or(0)
}

pub fn map_lineups(blocks: &[LineupBlock]) -> Option<Lineups> {
    let [home, away, ..] = blocks else {
        return None;
    };
    Some(Lineups {
        home: map_lineup(home),
        away: map_lineup(away),
    })
}

fn map_lineup(block: &LineupBlock) -> Lineup {
    Lineup {
        formation: block.formation.clone().unwrap_or_default(),
        coach: block
            .coach
            .as_ref()
            .and_then(|c| c.name.clone())
            .unwrap_or_default(),
        starting: map_players(block.start_xi.as_deref().unwrap_or_default()),
        substitutes: map_players(block.substitutes.as_deref().unwrap_or_default()),
    }
}

fn map_players(slots: &[LineupSlot]) -> Vec<LineupPlayer> {
    slots
        .iter()
        .filter_map(|slot| slot.player.as_ref())
        .map(|p| LineupPlayer {
            number: p.number,
            name: p.name.clone().unwrap_or_default(),
            position: p.pos.clone().unwrap_or_default(),
        })
        .collect()
}

/// Reorient each past meeting so `home_team_id` is always the home side and
/// tally results for that team. Level scores count as draws.
pub fn map_head_to_head(items: &[FixtureItem], home_team_id: &str) -> HeadToHead {
    let mut wins = H2HWins::default();
    let matches = items
        .iter()
        .take(H2H_LIMIT)
        .map(|f| {
            let goals = f.goals();
            let (h, a) = (goals.home.unwrap_or(0), goals.away.unwrap_or(0));
            let listed_first = f.home_team().is_some_and(|t| t.is(home_team_id));
            let (ours, theirs) = if listed_first { (h, a) } else { (a, h) };

            match ours.cmp(&theirs) {
                std::cmp::Ordering::Greater => wins.home += 1,
                std::cmp::Ordering::Less => wins.away += 1,
                std::cmp::Ordering::Equal => wins.draw += 1,
            }

            H2HEntry {
                date: kickoff_of(f).as_ref().map(format_date).unwrap_or_default(),
                home_score: ours,
                away_score: theirs,
            }
        })
        .collect();

    HeadToHead { wins, matches }
}

/// First group table of the first league block.
pub fn map_standings(items: &[StandingsItem]) -> Vec<StandingRow> {
    let table = items
        .first()
        .and_then(|item| item.league.as_ref())
        .and_then(|league| league.standings.as_ref())
        .and_then(|groups| groups.first());
    let Some(table) = table else {
        return Vec::new();
    };

    table
        .iter()
        .map(|entry| {
            let team = entry.team.clone().unwrap_or_default();
            let record = entry.all.unwrap_or_default();
            StandingRow {
                rank: entry.rank.unwrap_or(0),
                team_id: team.id_str().to_owned(),
                team_name: team.name.unwrap_or_default(),
                played: record.played.unwrap_or(0),
                won: record.win.unwrap_or(0),
                drawn: record.draw.unwrap_or(0),
                lost: record.lose.unwrap_or(0),
                goal_difference: entry.goals_diff.unwrap_or(0),
                points: entry.points.unwrap_or(0),
                form: entry.form.clone().unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LEAGUES;
    use serde_json::json;

    fn fixture(value: Value) -> FixtureItem {
        serde_json::from_value(value).expect("valid fixture json")
    }

    fn derby(status: &str, home_goals: Value, away_goals: Value) -> FixtureItem {
        fixture(json!({
            "fixture": {"id": 1208021, "date": "2024-01-14T16:00:00+00:00", "status": {"short": status, "elapsed": 67}},
            "league": {"id": 203, "name": "Super Lig", "country": "Turkey", "round": "Regular Season - 20"},
            "teams": {
                "home": {"id": 645, "name": "Galatasaray", "logo": "https://media.api-sports.io/football/teams/645.png"},
                "away": {"id": 611, "name": "Fenerbahce", "logo": ""}
            },
            "goals": {"home": home_goals, "away": away_goals},
            "score": {"halftime": {"home": 1, "away": 0}}
        }))
    }

    #[test]
    fn status_sets() {
        assert_eq!(classify_status("2H"), MatchStatus::Live);
        assert_eq!(classify_status("SUSP"), MatchStatus::Live);
        assert_eq!(classify_status("PEN"), MatchStatus::Finished);
        assert_eq!(classify_status("NS"), MatchStatus::Upcoming);
        assert_eq!(classify_status("PST"), MatchStatus::Upcoming);
        assert_eq!(classify_status(""), MatchStatus::Upcoming);
    }

    #[test]
    fn kickoff_is_formatted_in_istanbul_time() {
        let dt = parse_kickoff("2024-01-14T16:00:00+00:00").unwrap();
        assert_eq!(format_time(&dt), "19:00");
        assert_eq!(format_day_month(&dt), "14 Oca");
        assert_eq!(format_date(&dt), "14 Oca 2024");

        let late = parse_kickoff("2023-08-31T22:30:00+00:00").unwrap();
        assert_eq!(format_date(&late), "1 Eyl 2023");
    }

    #[test]
    fn map_fixture_builds_display_match() {
        let m = map_fixture(&derby("2H", json!(2), json!(1)), LEAGUES).unwrap();
        assert_eq!(m.id, "1208021");
        assert_eq!(m.league_id, "203");
        assert_eq!(m.league_name, "Süper Lig");
        assert_eq!(m.home.short_code, "GS");
        assert_eq!(m.away.short_code, "FB");
        assert_eq!(m.away.logo_url, None);
        assert_eq!(m.status, MatchStatus::Live);
        assert_eq!(m.score, Score { home: Some(2), away: Some(1) });
        assert_eq!(m.minute, Some(67));
        assert_eq!(m.halftime_score.as_deref(), Some("1-0"));
        assert_eq!(m.kickoff_time, "19:00");
        assert_eq!(m.kickoff_date, "14 Oca");
        assert!(!m.has_detail());
    }

    #[test]
    fn upcoming_fixture_has_no_score() {
        let m = map_fixture(&derby("NS", json!(null), json!(null)), LEAGUES).unwrap();
        assert_eq!(m.score, Score { home: None, away: None });
    }

    #[test]
    fn halftime_needs_both_sides() {
        let item = fixture(json!({
            "fixture": {"id": 1208021, "status": {"short": "2H"}},
            "league": {"id": 203},
            "teams": {"home": {"id": 645, "name": "Galatasaray"}, "away": {"id": 611, "name": "Fenerbahce"}},
            "goals": {"home": 1, "away": 0},
            "score": {"halftime": {"home": 1, "away": null}}
        }));
        let m = map_fixture(&item, LEAGUES).unwrap();
        assert_eq!(m.halftime_score, None);
    }

    #[test]
    fn map_fixture_rejects_missing_team() {
        let item = fixture(json!({
            "fixture": {"id": 5, "status": {"short": "NS"}},
            "league": {"id": 39},
            "teams": {"home": {"id": 50, "name": "Manchester City"}}
        }));
        let err = map_fixture(&item, LEAGUES).unwrap_err();
        assert_eq!(err, MapError::MissingField { fixture: "5".into(), field: "teams.away" });
    }

    #[test]
    fn team_fixture_from_away_side() {
        let tf = map_team_fixture(&derby("FT", json!(3), json!(1)), "611", LEAGUES);
        assert!(!tf.is_home);
        assert_eq!(tf.opponent_id, "645");
        assert_eq!(tf.opponent_name, "Galatasaray");
        assert_eq!(tf.goals_for, Some(1));
        assert_eq!(tf.goals_against, Some(3));
        assert_eq!(tf.status, MatchStatus::Finished);
        assert_eq!(tf.league_flag, "🇹🇷");
        assert_eq!(tf.date, "14 Oca 2024");
        assert_eq!(tf.matchweek, "Regular Season - 20");
    }

    #[test]
    fn team_fixture_unknown_league_uses_upstream_name() {
        let item = fixture(json!({
            "fixture": {"id": 9, "status": {"short": "NS"}},
            "league": {"id": 88, "name": "Eredivisie"},
            "teams": {"home": {"id": "194", "name": "Ajax"}, "away": {"id": 197, "name": "PSV"}},
            "goals": {"home": null, "away": null}
        }));
        let tf = map_team_fixture(&item, "194", LEAGUES);
        assert!(tf.is_home);
        assert_eq!(tf.league_name, "Eredivisie");
        assert_eq!(tf.league_flag, catalog::TROPHY_FLAG);
        assert_eq!(tf.goals_for, None);
    }

    #[test]
    fn events_are_classified_and_sided() {
        let items: Vec<EventItem> = serde_json::from_value(json!([
            {"time": {"elapsed": 12}, "team": {"id": 645}, "player": {"name": "Icardi"}, "assist": {"name": "Ziyech"}, "type": "Goal", "detail": "Normal Goal"},
            {"time": {"elapsed": 31}, "team": {"id": "611"}, "player": {"name": "Fred"}, "assist": {"name": null}, "type": "Card", "detail": "Yellow Card"},
            {"time": {"elapsed": 67}, "team": {"id": 611}, "player": {"name": "Yuksek"}, "type": "Card", "detail": "Red Card"},
            {"time": {"elapsed": 63}, "team": {"id": 611}, "player": {"name": "Szymanski"}, "type": "subst", "detail": "Substitution 1"},
            {"time": {"elapsed": 90, "extra": 3}, "team": {"id": 645}, "type": "Var", "detail": "Goal cancelled"}
        ]))
        .unwrap();

        let events = map_events(&items, "645");
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Goal, EventKind::YellowCard, EventKind::RedCard, EventKind::Substitution, EventKind::Other]
        );
        assert_eq!(events[0].side, Side::Home);
        assert_eq!(events[0].assist.as_deref(), Some("Ziyech"));
        assert_eq!(events[1].side, Side::Away);
        assert_eq!(events[1].assist, None);
        assert_eq!(events[4].player, "?");
        assert_eq!(events[4].extra_minute, Some(3));
    }

    #[test]
    fn statistics_match_by_type_and_drop_unknown() {
        let blocks: Vec<StatisticsBlock> = serde_json::from_value(json!([
            {"team": {"id": 645}, "statistics": [
                {"type": "Ball Possession", "value": "57%"},
                {"type": "expected_goals", "value": "1.85"},
                {"type": "Total Shots", "value": 14},
                {"type": "Red Cards", "value": null}
            ]},
            {"team": {"id": 611}, "statistics": [
                {"type": "Total Shots", "value": 9},
                {"type": "Ball Possession", "value": "43%"}
            ]}
        ]))
        .unwrap();

        let rows = map_statistics(&blocks);
        assert_eq!(
            rows,
            vec![
                StatRow { label: "Topa Sahip Olma".into(), home: 57, away: 43, kind: Some(StatKind::Percentage) },
                StatRow { label: "Şut".into(), home: 14, away: 9, kind: None },
                StatRow { label: "Kırmızı Kart".into(), home: 0, away: 0, kind: None },
            ]
        );
    }

    #[test]
    fn statistics_need_two_blocks() {
        let blocks: Vec<StatisticsBlock> =
            serde_json::from_value(json!([{"statistics": [{"type": "Fouls", "value": 3}]}])).unwrap();
        assert!(map_statistics(&blocks).is_empty());
    }

    #[test]
    fn stat_value_parsing() {
        assert_eq!(stat_value(Some(&json!("57%"))), 57);
        assert_eq!(stat_value(Some(&json!("abc"))), 0);
        assert_eq!(stat_value(Some(&json!(""))), 0);
        assert_eq!(stat_value(Some(&json!(12))), 12);
        assert_eq!(stat_value(Some(&json!(null))), 0);
        assert_eq!(stat_value(None), 0);
    }

    #[test]
    fn lineups_default_missing_coach() {
        let blocks: Vec<LineupBlock> = serde_json::from_value(json!([
            {"formation": "4-2-3-1", "coach": {"name": "Okan Buruk"},
             "startXI": [{"player": {"name": "Muslera", "number": 1, "pos": "G"}}],
             "substitutes": [{"player": {"name": "Gunay", "number": 19, "pos": "G"}}]},
            {"formation": "4-3-3", "startXI": [], "substitutes": null}
        ]))
        .unwrap();

        let lineups = map_lineups(&blocks).unwrap();
        assert_eq!(lineups.home.coach, "Okan Buruk");
        assert_eq!(lineups.home.starting[0].number, Some(1));
        assert_eq!(lineups.home.substitutes[0].name, "Gunay");
        assert_eq!(lineups.away.coach, "");
        assert!(lineups.away.substitutes.is_empty());

        assert!(map_lineups(&blocks[..1]).is_none());
    }

    #[test]
    fn head_to_head_reorients_to_designated_home() {
        let items: Vec<FixtureItem> = serde_json::from_value(json!([
            {"fixture": {"date": "2024-01-14T16:00:00+00:00"},
             "teams": {"home": {"id": 611}, "away": {"id": 645}}, "goals": {"home": 3, "away": 1}},
            {"fixture": {"date": "2023-11-05T16:00:00+00:00"},
             "teams": {"home": {"id": 645}, "away": {"id": 611}}, "goals": {"home": 2, "away": 2}},
            {"fixture": {"date": "2023-03-26T16:00:00+00:00"},
             "teams": {"home": {"id": 645}, "away": {"id": 611}}, "goals": {"home": 1, "away": 0}}
        ]))
        .unwrap();

        let h2h = map_head_to_head(&items, "645");
        assert_eq!(h2h.matches[0], H2HEntry { date: "14 Oca 2024".into(), home_score: 1, away_score: 3 });
        assert_eq!(h2h.wins, H2HWins { home: 1, draw: 1, away: 1 });
    }

    #[test]
    fn level_score_with_opponent_at_home_is_a_draw() {
        let items: Vec<FixtureItem> = serde_json::from_value(json!([
            {"fixture": {"date": "2023-11-05T16:00:00+00:00"},
             "teams": {"home": {"id": 611}, "away": {"id": 645}}, "goals": {"home": 1, "away": 1}}
        ]))
        .unwrap();

        let h2h = map_head_to_head(&items, "645");
        assert_eq!(h2h.wins, H2HWins { home: 0, draw: 1, away: 0 });
        assert_eq!((h2h.matches[0].home_score, h2h.matches[0].away_score), (1, 1));
    }

    #[test]
    fn head_to_head_caps_history() {
        let one = json!({"teams": {"home": {"id": 1}, "away": {"id": 2}}, "goals": {"home": 0, "away": 0}});
        let items: Vec<FixtureItem> =
            serde_json::from_value(Value::Array(vec![one; 14])).unwrap();
        let h2h = map_head_to_head(&items, "1");
        assert_eq!(h2h.matches.len(), H2H_LIMIT);
        assert_eq!(h2h.wins.draw, H2H_LIMIT as u32);
    }

    #[test]
    fn standings_take_first_table() {
        let items: Vec<StandingsItem> = serde_json::from_value(json!([
            {"league": {"id": 203, "standings": [[
                {"rank": 1, "team": {"id": 645, "name": "Galatasaray"}, "points": 52, "goalsDiff": 33, "form": "WWDWW",
                 "all": {"played": 20, "win": 17, "draw": 1, "lose": 2}},
                {"rank": 2, "team": {"id": 611, "name": "Fenerbahce"}, "points": 50, "goalsDiff": 30}
            ]]}}
        ]))
        .unwrap();

        let rows = map_standings(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_id, "645");
        assert_eq!(rows[0].won, 17);
        assert_eq!(rows[1].played, 0);
        assert!(map_standings(&[]).is_empty());
    }
}
