//! Static lookup tables: polled leagues and team display styles.

pub const TROPHY_FLAG: &str = "🏆";
pub const UNKNOWN_LEAGUE_PRIORITY: u32 = 99;
pub const DEFAULT_PRIMARY_COLOR: &str = "#1e2740";
pub const DEFAULT_SECONDARY_COLOR: &str = "rgba(255,255,255,0.15)";

/// A league polled for today's fixtures. `id` is the API-Football league id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueConfig {
    pub id: u32,
    pub name: &'static str,
    pub country: &'static str,
    pub flag: &'static str,
    pub priority: u32,
}

pub const LEAGUES: &[LeagueConfig] = &[
    LeagueConfig { id: 203, name: "Süper Lig", country: "Türkiye", flag: "🇹🇷", priority: 1 },
    LeagueConfig { id: 2, name: "Şampiyonlar Ligi", country: "Avrupa", flag: "🏆", priority: 2 },
    LeagueConfig { id: 39, name: "Premier League", country: "İngiltere", flag: "🏴󠁧󠁢󠁥󠁮󠁧󠁿", priority: 3 },
    LeagueConfig { id: 140, name: "La Liga", country: "İspanya", flag: "🇪🇸", priority: 4 },
    LeagueConfig { id: 135, name: "Serie A", country: "İtalya", flag: "🇮🇹", priority: 5 },
    LeagueConfig { id: 78, name: "Bundesliga", country: "Almanya", flag: "🇩🇪", priority: 6 },
    LeagueConfig { id: 61, name: "Ligue 1", country: "Fransa", flag: "🇫🇷", priority: 7 },
    LeagueConfig { id: 3, name: "Avrupa Ligi", country: "Avrupa", flag: "🏆", priority: 8 },
];

/// Display data for a league, resolved from the config table or from what
/// upstream says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueInfo {
    pub id: String,
    pub name: String,
    pub country: String,
    pub flag: String,
    pub priority: u32,
}

pub fn find_league<'a>(leagues: &'a [LeagueConfig], id: &str) -> Option<&'a LeagueConfig> {
    let id = id.trim().parse::<u32>().ok()?;
    leagues.iter().find(|l| l.id == id)
}

pub fn league_info(
    leagues: &[LeagueConfig],
    id: &str,
    upstream_name: Option<&str>,
    upstream_country: Option<&str>,
) -> LeagueInfo {
    match find_league(leagues, id) {
        Some(lc) => LeagueInfo {
            id: id.to_owned(),
            name: lc.name.to_owned(),
            country: lc.country.to_owned(),
            flag: lc.flag.to_owned(),
            priority: lc.priority,
        },
        None => LeagueInfo {
            id: id.to_owned(),
            name: upstream_name.unwrap_or_default().to_owned(),
            country: upstream_country.unwrap_or_default().to_owned(),
            flag: TROPHY_FLAG.to_owned(),
            priority: UNKNOWN_LEAGUE_PRIORITY,
        },
    }
}

// ---------------------------------------------------------------------------
// Team styles
// ---------------------------------------------------------------------------

/// Hand-curated profile for a club the app features. Fallback data refers to
/// these by slug; synced data by upstream id.
#[derive(Debug, Clone, Copy)]
pub struct TeamProfile {
    pub slug: &'static str,
    pub api_id: Option<u32>,
    pub name: &'static str,
    pub short: &'static str,
    pub color: &'static str,
    pub color2: &'static str,
    pub league: &'static str,
}

pub const TEAM_PROFILES: &[TeamProfile] = &[
    TeamProfile { slug: "gs", api_id: Some(645), name: "Galatasaray", short: "GS", color: "#e8002d", color2: "#FFD700", league: "Süper Lig" },
    TeamProfile { slug: "fb", api_id: Some(611), name: "Fenerbahçe", short: "FB", color: "#002f6c", color2: "#FFED00", league: "Süper Lig" },
    TeamProfile { slug: "bjk", api_id: Some(609), name: "Beşiktaş", short: "BJK", color: "#1a1a1a", color2: "#CCCCCC", league: "Süper Lig" },
    TeamProfile { slug: "ts", api_id: Some(614), name: "Trabzonspor", short: "TS", color: "#8B1A1A", color2: "#1C4F9C", league: "Süper Lig" },
    TeamProfile { slug: "bsk", api_id: Some(564), name: "Başakşehir", short: "İBB", color: "#0066CC", color2: "#FF6600", league: "Süper Lig" },
    TeamProfile { slug: "svs", api_id: Some(1002), name: "Sivasspor", short: "SVS", color: "#8B0000", color2: "#FFA500", league: "Süper Lig" },
    TeamProfile { slug: "ank", api_id: None, name: "Ankaragücü", short: "ANK", color: "#000080", color2: "#FFD700", league: "Süper Lig" },
    TeamProfile { slug: "ksp", api_id: Some(3603), name: "Kasımpaşa", short: "KSP", color: "#C0392B", color2: "#FFFFFF", league: "Süper Lig" },
];

/// Generic colors for well-known clubs, keyed by upstream id.
#[derive(Debug, Clone, Copy)]
pub struct TeamColors {
    pub api_id: u32,
    pub short: &'static str,
    pub color: &'static str,
    pub color2: &'static str,
}

pub const TEAM_COLORS: &[TeamColors] = &[
    TeamColors { api_id: 50, short: "MCI", color: "#6CABDD", color2: "#1c2c5b" },
    TeamColors { api_id: 42, short: "ARS", color: "#EF0107", color2: "#063672" },
    TeamColors { api_id: 40, short: "LIV", color: "#C8102E", color2: "#00B2A9" },
    TeamColors { api_id: 49, short: "CHE", color: "#034694", color2: "#DBA111" },
    TeamColors { api_id: 47, short: "TOT", color: "#132257", color2: "#FFFFFF" },
    TeamColors { api_id: 33, short: "MNU", color: "#DA020E", color2: "#FFE500" },
    TeamColors { api_id: 541, short: "RMA", color: "#FEBE10", color2: "#1a1a2e" },
    TeamColors { api_id: 529, short: "BAR", color: "#004D98", color2: "#A50044" },
    TeamColors { api_id: 530, short: "ATM", color: "#CB3524", color2: "#273B7D" },
    TeamColors { api_id: 536, short: "SEV", color: "#C8102E", color2: "#F5F5F5" },
    TeamColors { api_id: 85, short: "PSG", color: "#003F7F", color2: "#D80027" },
    TeamColors { api_id: 157, short: "FCB", color: "#DC052D", color2: "#0066B2" },
    TeamColors { api_id: 496, short: "JUV", color: "#000000", color2: "#FFFFFF" },
    TeamColors { api_id: 505, short: "INT", color: "#0068A8", color2: "#000000" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStyle {
    pub short: String,
    pub color: String,
    pub color2: String,
}

pub fn find_profile(team_id: &str) -> Option<&'static TeamProfile> {
    let team_id = team_id.trim();
    let numeric = team_id.parse::<u32>().ok();
    TEAM_PROFILES
        .iter()
        .find(|p| p.slug == team_id || (numeric.is_some() && p.api_id == numeric))
}

/// Resolve short code and colors: profile → color table → initials.
pub fn team_style(team_id: &str, name: &str) -> TeamStyle {
    if let Some(p) = find_profile(team_id) {
        return TeamStyle {
            short: p.short.to_owned(),
            color: p.color.to_owned(),
            color2: p.color2.to_owned(),
        };
    }

    let numeric = team_id.trim().parse::<u32>().ok();
    if let Some(tc) = numeric.and_then(|id| TEAM_COLORS.iter().find(|c| c.api_id == id)) {
        return TeamStyle {
            short: tc.short.to_owned(),
            color: tc.color.to_owned(),
            color2: tc.color2.to_owned(),
        };
    }

    TeamStyle {
        short: initials(name),
        color: DEFAULT_PRIMARY_COLOR.to_owned(),
        color2: DEFAULT_SECONDARY_COLOR.to_owned(),
    }
}

/// First three characters of the name with whitespace removed, upper-cased.
pub fn initials(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .take(3)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_league_uses_config_table() {
        let info = league_info(LEAGUES, "203", Some("Super Lig"), Some("Turkey"));
        assert_eq!(info.name, "Süper Lig");
        assert_eq!(info.flag, "🇹🇷");
        assert_eq!(info.priority, 1);
    }

    #[test]
    fn unknown_league_falls_back_to_upstream_name_and_trophy() {
        let info = league_info(LEAGUES, "999", Some("Eredivisie"), Some("Netherlands"));
        assert_eq!(info.name, "Eredivisie");
        assert_eq!(info.country, "Netherlands");
        assert_eq!(info.flag, TROPHY_FLAG);
        assert_eq!(info.priority, UNKNOWN_LEAGUE_PRIORITY);
    }

    #[test]
    fn team_style_prefers_profile_by_slug_or_api_id() {
        assert_eq!(team_style("gs", "Galatasaray").short, "GS");
        let by_id = team_style("645", "Galatasaray");
        assert_eq!(by_id.short, "GS");
        assert_eq!(by_id.color, "#e8002d");
    }

    #[test]
    fn team_style_falls_back_to_color_table_then_initials() {
        assert_eq!(team_style("50", "Manchester City").short, "MCI");

        let unknown = team_style("12345", "Go Ahead Eagles");
        assert_eq!(unknown.short, "GOA");
        assert_eq!(unknown.color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(unknown.color2, DEFAULT_SECONDARY_COLOR);
    }

    #[test]
    fn initials_handle_short_and_unicode_names() {
        assert_eq!(initials("Köln"), "KÖL");
        assert_eq!(initials("AZ"), "AZ");
        assert_eq!(initials(""), "");
    }
}
