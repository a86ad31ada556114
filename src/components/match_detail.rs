use crate::components::match_row::{score_text, status_text, truncate};
use crate::components::theme::{status_style, team_style};
use football_api::{EventKind, Lineup, Match, MatchEvent, Side, StatKind, StatRow};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget, Wrap};

const BAR_WIDTH: usize = 20;
const PLAYER_COLUMN: usize = 28;

/// Scrollable single-column rendering of a match and whatever detail
/// sections it carries.
pub struct MatchDetailView<'a> {
    pub m: &'a Match,
    pub scroll_offset: u16,
    pub favorite: bool,
}

impl Widget for MatchDetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = header_lines(self.m, self.favorite);
        lines.extend(detail_lines(self.m));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0))
            .render(area, buf);
    }
}

fn header_lines(m: &Match, favorite: bool) -> Vec<Line<'static>> {
    let star = if favorite { " ★" } else { "" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} {}", m.league_flag, m.league_name), Style::default().fg(Color::Gray)),
            Span::styled(star.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(m.home.name.clone(), team_style(&m.home)),
            Span::styled(format!("   {}   ", score_text(m)), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(m.away.name.clone(), team_style(&m.away)),
        ]),
    ];

    let mut meta = vec![Span::styled(status_text(m), status_style(m.status))];
    if let Some(ht) = &m.halftime_score {
        meta.push(Span::styled(format!("  İY {ht}"), Style::default().fg(Color::DarkGray)));
    }
    meta.push(Span::styled(
        format!("  {} {}", m.kickoff_date, m.kickoff_time),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(meta));
    lines
}

/// Section lines for events, statistics, lineups and head-to-head. Empty
/// sections are announced rather than skipped.
pub fn detail_lines(m: &Match) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    section(&mut lines, "Maç Olayları");
    if m.events.is_empty() {
        placeholder(&mut lines, "Henüz olay yok");
    }
    lines.extend(m.events.iter().map(|e| event_line(m, e)));

    section(&mut lines, "İstatistikler");
    if m.stats.is_empty() {
        placeholder(&mut lines, "İstatistik bulunmuyor");
    }
    lines.extend(m.stats.iter().map(stat_line));

    section(&mut lines, "Kadrolar");
    if m.lineup.home.starting.is_empty() && m.lineup.away.starting.is_empty() {
        placeholder(&mut lines, "Kadro açıklanmadı");
    } else {
        lineup_lines(&mut lines, &m.lineup.home, &m.lineup.away);
    }

    section(&mut lines, "Son Karşılaşmalar");
    let h2h = &m.head_to_head;
    if h2h.matches.is_empty() {
        placeholder(&mut lines, "Geçmiş maç bulunamadı");
    } else {
        lines.push(Line::from(format!(
            "{} {}  ·  Beraberlik {}  ·  {} {}",
            m.home.short_code, h2h.wins.home, h2h.wins.draw, m.away.short_code, h2h.wins.away
        )));
        lines.extend(h2h.matches.iter().map(|entry| {
            Line::from(vec![
                Span::styled(format!("{:<12}", entry.date), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{} {} - {} {}",
                    m.home.short_code, entry.home_score, entry.away_score, m.away.short_code
                )),
            ])
        }));
    }

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
}

fn placeholder(lines: &mut Vec<Line<'static>>, text: &str) {
    lines.push(Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))));
}

fn event_line(m: &Match, e: &MatchEvent) -> Line<'static> {
    let minute = match e.extra_minute {
        Some(extra) => format!("{}+{extra}'", e.minute),
        None => format!("{}'", e.minute),
    };
    let (glyph, style) = match e.kind {
        EventKind::Goal => ("⚽", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        EventKind::YellowCard => ("▮", Style::default().fg(Color::Yellow)),
        EventKind::RedCard => ("▮", Style::default().fg(Color::Red)),
        EventKind::Substitution => ("⇄", Style::default().fg(Color::Gray)),
        EventKind::Other => ("·", Style::default().fg(Color::Gray)),
    };
    let team = match e.side {
        Side::Home => &m.home,
        Side::Away => &m.away,
    };
    let mut spans = vec![
        Span::styled(format!("{minute:>6} "), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{glyph} "), style),
        Span::styled(format!("{:<4}", team.short_code), team_style(team)),
        Span::styled(e.player.clone(), style),
    ];
    if let Some(assist) = &e.assist {
        spans.push(Span::styled(format!(" ({assist})"), Style::default().fg(Color::Gray)));
    }
    if !e.detail.is_empty() {
        spans.push(Span::styled(format!("  {}", e.detail), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn stat_line(row: &StatRow) -> Line<'static> {
    let suffix = match row.kind {
        Some(StatKind::Percentage) => "%",
        None => "",
    };
    let (home_cells, away_cells) = bar_split(row.home, row.away);
    Line::from(vec![
        Span::raw(format!("{:>5}{suffix} ", row.home)),
        Span::styled("█".repeat(home_cells), Style::default().fg(Color::Blue)),
        Span::styled("█".repeat(away_cells), Style::default().fg(Color::Red)),
        Span::raw(format!(" {:<5}", format!("{}{suffix}", row.away))),
        Span::styled(row.label.clone(), Style::default().fg(Color::Gray)),
    ])
}

/// Share of `BAR_WIDTH` for each side; an all-zero row splits evenly.
pub fn bar_split(home: i32, away: i32) -> (usize, usize) {
    let home = home.max(0) as usize;
    let away = away.max(0) as usize;
    let total = home + away;
    if total == 0 {
        return (BAR_WIDTH / 2, BAR_WIDTH - BAR_WIDTH / 2);
    }
    let home_cells = (home * BAR_WIDTH + total / 2) / total;
    (home_cells, BAR_WIDTH - home_cells)
}

fn lineup_lines(lines: &mut Vec<Line<'static>>, home: &Lineup, away: &Lineup) {
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<width$}", format!("{}  {}", home.formation, home.coach), width = PLAYER_COLUMN),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{}  {}", away.formation, away.coach), Style::default().fg(Color::Gray)),
    ]));

    let rows = home.starting.len().max(away.starting.len());
    for i in 0..rows {
        let cell = |lineup: &Lineup| {
            lineup
                .starting
                .get(i)
                .map(|p| {
                    let number = p.number.map(|n| n.to_string()).unwrap_or_default();
                    format!("{number:>2} {} {}", p.position, truncate(&p.name, PLAYER_COLUMN - 6))
                })
                .unwrap_or_default()
        };
        lines.push(Line::from(format!("{:<width$}{}", cell(home), cell(away), width = PLAYER_COLUMN)));
    }

    let bench = home.substitutes.len() + away.substitutes.len();
    if bench > 0 {
        lines.push(Line::from(Span::styled(
            format!("Yedekler: {} / {}", home.substitutes.len(), away.substitutes.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn bar_split_is_proportional() {
        assert_eq!(bar_split(60, 40), (12, 8));
        assert_eq!(bar_split(0, 0), (10, 10));
        assert_eq!(bar_split(3, 0), (20, 0));
        assert_eq!(bar_split(-1, 5), (0, 20));
    }

    #[test]
    fn empty_sections_show_placeholders() {
        let lines = text(&detail_lines(&Match::default()));
        for expected in [
            "Henüz olay yok",
            "İstatistik bulunmuyor",
            "Kadro açıklanmadı",
            "Geçmiş maç bulunamadı",
        ] {
            assert!(lines.iter().any(|l| l == expected), "missing {expected}");
        }
    }

    #[test]
    fn extra_time_minute_is_shown() {
        let m = Match::default();
        let event = MatchEvent {
            minute: 90,
            extra_minute: Some(3),
            kind: EventKind::Goal,
            side: Side::Away,
            player: "Dzeko".into(),
            assist: Some("Tadic".into()),
            detail: String::new(),
        };
        let line = event_line(&m, &event).to_string();
        assert!(line.contains("90+3'"));
        assert!(line.contains("Dzeko (Tadic)"));
    }
}
