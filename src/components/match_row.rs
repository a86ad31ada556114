use crate::components::theme::{FAVORITE_GLYPH, status_style, team_style};
use football_api::{League, Match, MatchStatus, TeamFixture};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const TEAM_NAME_WIDTH: usize = 18;

/// Kickoff time for upcoming matches, otherwise the score.
pub fn score_text(m: &Match) -> String {
    match (m.status, m.score.home, m.score.away) {
        (MatchStatus::Upcoming, _, _) | (_, None, _) | (_, _, None) => m.kickoff_time.clone(),
        (_, Some(home), Some(away)) => format!("{home} - {away}"),
    }
}

/// Minute marker for live matches, the status label otherwise.
pub fn status_text(m: &Match) -> String {
    match (m.status, m.minute) {
        (MatchStatus::Live, Some(minute)) => format!("{minute}'"),
        (status, _) => status.label().to_string(),
    }
}

pub fn league_header(league: &League, collapsed: bool) -> Line<'static> {
    let marker = if collapsed { "▸" } else { "▾" };
    let live = league.matches.iter().filter(|m| m.is_live()).count();
    let mut spans = vec![
        Span::styled(format!("{marker} {} ", league.flag), Style::default().fg(Color::Gray)),
        Span::styled(league.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", league.country), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  ({} maç)", league.matches.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if live > 0 {
        spans.push(Span::styled(format!("  {live} canlı"), status_style(MatchStatus::Live)));
    }
    Line::from(spans)
}

pub fn match_line(m: &Match, favorite: bool) -> Line<'static> {
    let star = if favorite { FAVORITE_GLYPH } else { " " };
    Line::from(vec![
        Span::styled(format!("  {star} "), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{:>6} ", status_text(m)), status_style(m.status)),
        Span::styled(format!("{:>4} ", m.home.short_code), team_style(&m.home)),
        Span::raw(format!("{:>width$} ", truncate(&m.home.name, TEAM_NAME_WIDTH), width = TEAM_NAME_WIDTH)),
        Span::styled(
            format!("{:^7}", score_text(m)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {:<width$}", truncate(&m.away.name, TEAM_NAME_WIDTH), width = TEAM_NAME_WIDTH)),
        Span::styled(format!(" {}", m.away.short_code), team_style(&m.away)),
    ])
}

pub fn team_fixture_line(f: &TeamFixture) -> Line<'static> {
    let venue = if f.is_home { "vs" } else { "@ " };
    let result = match (f.goals_for, f.goals_against) {
        (Some(gf), Some(ga)) if f.status != MatchStatus::Upcoming => format!("{gf} - {ga}"),
        _ => f.time.clone(),
    };
    let outcome = match (f.status, f.goals_for, f.goals_against) {
        (MatchStatus::Finished, Some(gf), Some(ga)) if gf > ga => Span::styled(" G", Style::default().fg(Color::Green)),
        (MatchStatus::Finished, Some(gf), Some(ga)) if gf < ga => Span::styled(" M", Style::default().fg(Color::Red)),
        (MatchStatus::Finished, Some(_), Some(_)) => Span::styled(" B", Style::default().fg(Color::Yellow)),
        (MatchStatus::Live, _, _) => Span::styled(" ●", status_style(MatchStatus::Live)),
        _ => Span::raw("  "),
    };
    Line::from(vec![
        Span::styled(format!("{:<7}", f.date), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{venue} {:<width$}", truncate(&f.opponent_name, TEAM_NAME_WIDTH), width = TEAM_NAME_WIDTH)),
        Span::styled(format!("{result:^7}"), Style::default().add_modifier(Modifier::BOLD)),
        outcome,
        Span::styled(
            format!("  {} {} {}", f.league_flag, f.league_name, f.matchweek),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use football_api::Score;

    fn fixture(status: MatchStatus, score: Score, minute: Option<u16>) -> Match {
        Match {
            status,
            score,
            minute,
            kickoff_time: "20:00".into(),
            ..Match::default()
        }
    }

    #[test]
    fn upcoming_shows_kickoff_time() {
        let m = fixture(MatchStatus::Upcoming, Score::default(), None);
        assert_eq!(score_text(&m), "20:00");
        assert_eq!(status_text(&m), "Yaklaşan");
    }

    #[test]
    fn live_shows_score_and_minute() {
        let m = fixture(MatchStatus::Live, Score { home: Some(2), away: Some(1) }, Some(67));
        assert_eq!(score_text(&m), "2 - 1");
        assert_eq!(status_text(&m), "67'");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("Fenerbahçe", 20), "Fenerbahçe");
        assert_eq!(truncate("Başakşehir FK", 5), "Başa…");
    }
}
