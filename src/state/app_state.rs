use crate::app::MenuItem;
use football_api::{League, Score, TeamFixture, TeamRef};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// List selection
// ---------------------------------------------------------------------------

/// Cursor over a list whose length is only known at draw/key time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
}

impl Selection {
    pub fn down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Pull the cursor back inside the list after it shrank.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

// ---------------------------------------------------------------------------
// Today tab
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayRow {
    League { league_id: String },
    Match { match_id: String },
}

/// Flatten leagues into selectable rows: a header per league, followed by
/// its matches unless the league is collapsed.
pub fn today_rows(leagues: &[League], collapsed: &HashSet<String>) -> Vec<TodayRow> {
    let mut rows = Vec::new();
    for league in leagues {
        rows.push(TodayRow::League { league_id: league.id.clone() });
        if collapsed.contains(&league.id) {
            continue;
        }
        rows.extend(league.matches.iter().map(|m| TodayRow::Match { match_id: m.id.clone() }));
    }
    rows
}

// ---------------------------------------------------------------------------
// Match / team views
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MatchViewState {
    pub match_id: Option<String>,
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct TeamViewState {
    pub team: Option<TeamRef>,
    pub fixtures: Vec<TeamFixture>,
    pub loaded: bool,
    pub selected: Selection,
}

// ---------------------------------------------------------------------------
// Search overlay
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub selected: Selection,
}

impl SearchState {
    pub fn open(&mut self) {
        self.active = true;
        self.query.clear();
        self.selected.reset();
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
        self.selected.reset();
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected.reset();
    }
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub status: Option<StatusMessage>,
    pub collapsed: HashSet<String>,
    pub today: Selection,
    pub favorites: Selection,
    pub match_view: MatchViewState,
    pub team_view: TeamViewState,
    pub search: SearchState,
    /// Last seen score per favorite match, used to announce goals.
    pub seen_scores: HashMap<String, Score>,
}

impl AppState {
    pub fn new(collapsed: impl IntoIterator<Item = String>) -> Self {
        Self {
            collapsed: collapsed.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: false });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: true });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use football_api::Match;

    fn league(id: &str, matches: &[&str]) -> League {
        League {
            id: id.to_string(),
            matches: matches
                .iter()
                .map(|m| Match { id: m.to_string(), ..Match::default() })
                .collect(),
            ..League::default()
        }
    }

    #[test]
    fn collapsed_leagues_hide_their_matches() {
        let leagues = [league("sl", &["a", "b"]), league("pl", &["c"])];
        let collapsed = HashSet::from(["sl".to_string()]);

        let rows = today_rows(&leagues, &collapsed);
        assert_eq!(
            rows,
            vec![
                TodayRow::League { league_id: "sl".into() },
                TodayRow::League { league_id: "pl".into() },
                TodayRow::Match { match_id: "c".into() },
            ]
        );
        assert_eq!(today_rows(&leagues, &HashSet::new()).len(), 5);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut sel = Selection::default();
        sel.up();
        assert_eq!(sel.index, 0);
        sel.down(2);
        sel.down(2);
        assert_eq!(sel.index, 1);
        sel.clamp(0);
        assert_eq!(sel.index, 0);
    }

    #[test]
    fn search_edits_reset_the_cursor() {
        let mut search = SearchState::default();
        search.open();
        search.selected.down(3);
        search.push('g');
        assert_eq!(search.query, "g");
        assert_eq!(search.selected.index, 0);
        search.pop();
        assert!(search.query.is_empty());
    }
}
