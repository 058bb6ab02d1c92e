use std::fmt;

/// 24-bit team accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Fallback for constructors missing from the livery table.
    pub const NEUTRAL: Rgb = Rgb(0x99, 0x99, 0x99);

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

// Keyed by the API's constructorId
const LIVERIES: &[(&str, &str)] = &[
    ("red_bull", "#3671C6"),
    ("mclaren", "#FF8000"),
    ("ferrari", "#E8002D"),
    ("mercedes", "#27F4D2"),
    ("aston_martin", "#229971"),
    ("alpine", "#0093CC"),
    ("williams", "#64C4FF"),
    ("rb", "#6692FF"),
    ("sauber", "#52E252"),
    ("haas", "#B6BABD"),
];

/// Accent colour for a constructor id.
pub fn team_color(constructor_id: &str) -> Rgb {
    LIVERIES
        .iter()
        .find(|(id, _)| *id == constructor_id)
        .and_then(|(_, hex)| Rgb::from_hex(hex))
        .unwrap_or(Rgb::NEUTRAL)
}

/// A constructor as it appears in standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// API id (e.g., "red_bull")
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub color: Rgb,
}

impl Team {
    pub fn new(id: String, name: String, nationality: String) -> Self {
        let color = team_color(&id);
        Self {
            id,
            name,
            nationality,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#FF8000"), Some(Rgb(255, 128, 0)));
        assert_eq!(Rgb::from_hex("27f4d2"), Some(Rgb(0x27, 0xF4, 0xD2)));
        assert_eq!(Rgb::from_hex("#FFF"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_display_round_trips_hex() {
        assert_eq!(Rgb(0x36, 0x71, 0xC6).to_string(), "#3671C6");
    }

    #[test]
    fn test_known_and_unknown_teams() {
        assert_eq!(team_color("mclaren"), Rgb(0xFF, 0x80, 0x00));
        assert_eq!(team_color("minardi"), Rgb::NEUTRAL);
    }

    #[test]
    fn test_team_new_picks_livery() {
        let team = Team::new("ferrari".into(), "Ferrari".into(), "Italian".into());
        assert_eq!(team.color, Rgb(0xE8, 0x00, 0x2D));
    }
}
