use super::{plural, points, Style};
use crate::state::DriverStanding;

const EMPTY: &str = "No driver standings available at the moment. Please check back later.";

/// Full drivers' championship.
pub fn drivers(standings: &[DriverStanding], year: i32, style: Style) -> String {
    let mut lines = vec![format!("FORMULA 1 {} STANDINGS 🏆", year), String::new()];

    if standings.is_empty() {
        lines.push(format!("  {}", EMPTY));
        return lines.join("\n");
    }

    for d in standings {
        let rank = if d.position == 1 {
            "👑".to_string()
        } else {
            format!("#{}", d.position)
        };
        let (swatch, team) = match &d.team {
            Some(team) => (style.swatch(team.color), team.name.as_str()),
            None => (String::new(), "Unknown Constructor"),
        };

        lines.push(format!("  {:<4}{}", rank, d.driver.full_name()));
        lines.push(format!("      {}{}", swatch, team));
        lines.push(format!(
            "      🏁 {} pts   🏆 {}   🌍 {}",
            points(d.points),
            plural(d.wins, "win", "wins"),
            d.driver.nationality
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Driver, Team};
    use rust_decimal_macros::dec;

    fn standings() -> Vec<DriverStanding> {
        vec![
            DriverStanding {
                position: 1,
                points: dec!(62),
                wins: 1,
                driver: Driver {
                    id: "norris".into(),
                    given_name: "Lando".into(),
                    family_name: "Norris".into(),
                    nationality: "British".into(),
                },
                team: Some(Team::new("mclaren".into(), "McLaren".into(), "British".into())),
            },
            DriverStanding {
                position: 2,
                points: dec!(61.5),
                wins: 2,
                driver: Driver {
                    id: "max_verstappen".into(),
                    given_name: "Max".into(),
                    family_name: "Verstappen".into(),
                    nationality: "Dutch".into(),
                },
                team: None,
            },
        ]
    }

    #[test]
    fn test_leader_gets_crown() {
        let page = drivers(&standings(), 2025, Style::default());

        assert!(page.starts_with("FORMULA 1 2025 STANDINGS"));
        assert!(page.contains("👑   Lando Norris"));
        assert!(page.contains("#2  Max Verstappen"));
        assert!(!page.contains("#1"));
    }

    #[test]
    fn test_stats_and_missing_team() {
        let page = drivers(&standings(), 2025, Style::default());

        assert!(page.contains("🏁 62 pts   🏆 1 win   🌍 British"));
        assert!(page.contains("🏁 61.5 pts   🏆 2 wins   🌍 Dutch"));
        assert!(page.contains("Unknown Constructor"));
    }

    #[test]
    fn test_empty_standings() {
        let page = drivers(&[], 2026, Style::default());
        assert!(page.contains(EMPTY));
    }
}
