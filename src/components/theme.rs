use football_api::{MatchStatus, TeamRef};
use tui::style::{Color, Modifier, Style};

pub const LIVE_COLOR: Color = Color::Rgb(0, 214, 120);
pub const FAVORITE_GLYPH: &str = "★";

/// `#rrggbb` or `#rgb` to a terminal color. Anything else (the catalog also
/// uses `rgba(...)` for translucent accents) falls back to `fallback`.
pub fn hex_color(value: &str, fallback: Color) -> Color {
    let Some(hex) = value.trim().strip_prefix('#').filter(|h| h.is_ascii()) else {
        return fallback;
    };
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let rgb = match hex.len() {
        6 => (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
        3 => {
            let wide = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
            (wide(0), wide(1), wide(2))
        }
        _ => return fallback,
    };
    match rgb {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => fallback,
    }
}

/// Short code painted in the club's primary color. Near-black primaries are
/// unreadable on a dark terminal, so those use the secondary color.
pub fn team_style(team: &TeamRef) -> Style {
    let primary = hex_color(&team.primary_color, Color::White);
    let color = match primary {
        Color::Rgb(r, g, b) if u16::from(r) + u16::from(g) + u16::from(b) < 90 => {
            hex_color(&team.secondary_color, Color::White)
        }
        c => c,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn status_style(status: MatchStatus) -> Style {
    match status {
        MatchStatus::Live => Style::default().fg(LIVE_COLOR).add_modifier(Modifier::BOLD),
        MatchStatus::Finished => Style::default().fg(Color::Gray),
        MatchStatus::Upcoming => Style::default().fg(Color::DarkGray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(hex_color("#e8002d", Color::Reset), Color::Rgb(0xe8, 0x00, 0x2d));
        assert_eq!(hex_color("#fff", Color::Reset), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn unparseable_colors_fall_back() {
        assert_eq!(hex_color("rgba(255,255,255,0.15)", Color::Gray), Color::Gray);
        assert_eq!(hex_color("#12345", Color::Gray), Color::Gray);
        assert_eq!(hex_color("#zzzzzz", Color::Gray), Color::Gray);
    }

    #[test]
    fn dark_primary_uses_secondary() {
        let team = TeamRef {
            primary_color: "#1a1a1a".into(),
            secondary_color: "#CCCCCC".into(),
            ..TeamRef::default()
        };
        assert_eq!(team_style(&team).fg, Some(Color::Rgb(0xcc, 0xcc, 0xcc)));
    }
}
