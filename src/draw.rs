use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, FavoriteRow, MenuItem, SearchHit};
use crate::components::match_detail::MatchDetailView;
use crate::components::match_row::{league_header, match_line, team_fixture_line};
use crate::components::theme::{FAVORITE_GLYPH, LIVE_COLOR, team_style};
use crate::state::app_state::TodayRow;
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 4] = &["Bugün", "Favoriler", "Maç", "Takım"];

const HIGHLIGHT: Style = Style::new().bg(Color::Rgb(40, 48, 72)).add_modifier(Modifier::BOLD);

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Today => draw_today(f, layout.main, app),
            MenuItem::Favorites => draw_favorites(f, layout.main, app),
            MenuItem::Match => draw_match(f, layout.main, app),
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_status(f, layout.status, app);

        if app.state.search.active {
            draw_search(f, f.area(), app);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Today => 0,
        MenuItem::Favorites => 1,
        MenuItem::Match => 2,
        MenuItem::Team => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {t}", i + 1)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(" RoxyScore ", Style::default().fg(LIVE_COLOR)))
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Ara: /  Yardım: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_today(f: &mut Frame, area: Rect, app: &App) {
    let live = app.store.all_matches().filter(|m| m.is_live()).count();
    let title = if live > 0 {
        format!(" Bugünün Maçları · {live} canlı ")
    } else {
        " Bugünün Maçları ".to_string()
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [strip, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(favorite_strip(app)), strip);

    let items: Vec<ListItem> = app
        .today_rows()
        .iter()
        .filter_map(|row| match row {
            TodayRow::League { league_id } => {
                let league = app.store.leagues().iter().find(|l| &l.id == league_id)?;
                Some(ListItem::new(league_header(
                    league,
                    app.state.collapsed.contains(league_id),
                )))
            }
            TodayRow::Match { match_id } => {
                let m = app.store.get_match(match_id)?;
                Some(ListItem::new(match_line(m, app.storage.is_fav_match(match_id))))
            }
        })
        .collect();

    if items.is_empty() {
        draw_placeholder(f, list_area, "Bugün maç yok");
        return;
    }

    let mut state = ListState::default().with_selected(Some(app.state.today.index));
    f.render_stateful_widget(List::new(items).highlight_style(HIGHLIGHT), list_area, &mut state);
}

fn favorite_strip(app: &App) -> Line<'static> {
    let teams = app.storage.fav_teams();
    if teams.is_empty() {
        return Line::from(Span::styled(
            "Favori takım yok · takım sayfasında F ile ekle",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let mut spans = vec![Span::styled(format!("{FAVORITE_GLYPH} "), Style::default().fg(Color::Yellow))];
    for team in &teams {
        spans.push(Span::styled(format!("{} ", team.short_code), team_style(team)));
    }
    Line::from(spans)
}

fn draw_favorites(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Favoriler ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.favorite_rows();
    if rows.is_empty() {
        draw_placeholder(
            f,
            inner,
            "Henüz favori yok\n\ns: maçı favorile   F: takımı favorile",
        );
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            FavoriteRow::Match(m) => ListItem::new(match_line(m, true)),
            FavoriteRow::Team(team) => ListItem::new(Line::from(vec![
                Span::styled(format!("  {FAVORITE_GLYPH} "), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:>4} ", team.short_code), team_style(team)),
                Span::raw(team.name.clone()),
            ])),
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.state.favorites.index));
    f.render_stateful_widget(List::new(items).highlight_style(HIGHLIGHT), inner, &mut state);
}

fn draw_match(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White)
        .title(" Maç Detayı ")
        .title_bottom(" h/a: takım  s: favori  Esc: geri ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(m) = app.current_match() else {
        draw_placeholder(f, inner, "Maç bulunamadı");
        return;
    };

    f.render_widget(
        MatchDetailView {
            m,
            scroll_offset: app.state.match_view.scroll_offset,
            favorite: app.storage.is_fav_match(&m.id),
        },
        inner,
    );
}

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.state.team_view;
    let Some(team) = view.team.as_ref() else {
        draw_placeholder(f, area, "Takım seçilmedi");
        return;
    };

    let star = if app.storage.is_fav_team(&team.id) { format!(" {FAVORITE_GLYPH}") } else { String::new() };
    let block = default_border(Color::White)
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(team.name.clone(), team_style(team)),
            Span::styled(format!("{star} "), Style::default().fg(Color::Yellow)),
        ]))
        .title_bottom(" F: favori  Enter: maç  Esc: geri ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.fixtures.is_empty() {
        let msg = if view.loaded { "Fikstür bulunamadı" } else { "Fikstür yükleniyor..." };
        draw_placeholder(f, inner, msg);
        return;
    }

    let items: Vec<ListItem> = view.fixtures.iter().map(|fx| ListItem::new(team_fixture_line(fx))).collect();
    let mut state = ListState::default().with_selected(Some(view.selected.index));
    f.render_stateful_widget(List::new(items).highlight_style(HIGHLIGHT), inner, &mut state);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Yardım ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = [
        ("1 / 2 / 3 / 4", "Bugün, Favoriler, Maç, Takım"),
        ("j / k, ↓ / ↑", "Gezin"),
        ("Enter", "Maçı aç, lig grubunu daralt / genişlet"),
        ("/", "Takım veya canlı maç ara"),
        ("s", "Maçı favorile"),
        ("F", "Takımı favorile"),
        ("h / a", "Maç ekranında ev sahibi / deplasman takımı"),
        ("r", "Maçları yenile"),
        ("n", "Gol bildirimlerini aç / kapat"),
        ("f", "Tam ekran"),
        ("\"", "Log paneli"),
        ("Esc", "Geri"),
        ("q", "Çıkış"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>16}  "), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(area, 60, 16);
    f.render_widget(Clear, popup);

    let block = default_border(Color::Cyan).title(" Ara ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [input, results] = Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("› ", Style::default().fg(Color::Cyan)),
            Span::raw(app.state.search.query.clone()),
            Span::styled("▏", Style::default().fg(Color::Gray)),
        ])),
        input,
    );

    if app.state.search.query.trim().is_empty() {
        draw_hint(f, results, "Takım, lig veya canlı maç adı yaz");
        return;
    }

    let hits = app.search_hits();
    if hits.is_empty() {
        draw_hint(f, results, "Sonuç bulunamadı");
        return;
    }

    let items: Vec<ListItem> = hits
        .iter()
        .filter_map(|hit| match hit {
            SearchHit::Team(team) => Some(ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4} ", team.short_code), team_style(team)),
                Span::raw(team.name.clone()),
            ]))),
            SearchHit::Match(id) => {
                let m = app.store.get_match(id)?;
                Some(ListItem::new(match_line(m, app.storage.is_fav_match(id))))
            }
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(app.state.search.selected.index));
    f.render_stateful_widget(List::new(items).highlight_style(HIGHLIGHT), results, &mut state);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Log "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let notif = if app.storage.notif_on() { "🔔" } else { "🔕" };
    let user = app.storage.session().map(|s| s.email).unwrap_or_default();

    let message = match &app.state.status {
        Some(status) if status.is_error => Span::styled(status.text.clone(), Style::default().fg(Color::Red)),
        Some(status) => Span::styled(status.text.clone(), Style::default().fg(LIVE_COLOR)),
        None => Span::styled(
            "j/k: gezin  Enter: aç  s: favori  /: ara  r: yenile  q: çıkış",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(user.chars().count() as u16 + 4)]).areas(area);
    f.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), message])), left);
    f.render_widget(
        Paragraph::new(format!("{user} {notif}"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        right,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_hint(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string()).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading {
        return;
    }
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::White));
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(22), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

/// A `width` x `height` box centered in `area`, shrunk to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 3,
        width,
        height,
    )
}
