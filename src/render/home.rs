use chrono::{DateTime, Datelike, Utc};

use super::{next_race_label, plural, points, race_card, Style, EM_DASH};
use crate::countdown::compute_remaining;
use crate::schedule::Outlook;
use crate::state::{leader_gap, total_wins, DriverStanding};

const STANDINGS_UNAVAILABLE: &str =
    "Standings data is not available at the moment. Please return later.";
const SCHEDULE_UNAVAILABLE: &str = "Upcoming race information is currently unavailable.";

/// Home page: hero metrics, championship leader, top drivers, next races.
///
/// `None` for a section means its fetch failed.
pub fn home(
    drivers: Option<&[DriverStanding]>,
    outlook: Option<&Outlook>,
    top_n: usize,
    now: DateTime<Utc>,
    style: Style,
) -> String {
    let top: &[DriverStanding] = drivers.map(|d| &d[..d.len().min(top_n)]).unwrap_or(&[]);
    let next_race = outlook.and_then(Outlook::next_race);

    let mut lines = vec![
        format!(
            "FORMULA 1 CHAMPIONSHIP COMMAND CENTER · Season {}",
            now.year()
        ),
        String::new(),
    ];

    // Hero metrics
    let gap = leader_gap(top)
        .map(|g| format!("{} pts", points(g)))
        .unwrap_or_else(|| EM_DASH.to_string());
    lines.push(format!("  Leader's advantage   {}", gap));
    lines.push(format!(
        "  Wins among top {}     {}",
        top.len(),
        total_wins(top)
    ));
    lines.push(format!(
        "  Next Grand Prix      {} ({})",
        next_race
            .map(|r| r.name.as_str())
            .unwrap_or("Awaiting schedule"),
        next_race_label(next_race)
    ));

    if let Some(leader) = top.first() {
        lines.push(String::new());
        lines.push("CHAMPIONSHIP LEADER".to_string());
        lines.push(format!(
            "  #{} {}",
            leader.position,
            leader.driver.full_name()
        ));
        lines.push(format!(
            "  {}{} · {} pts · {} · {}",
            leader.team.as_ref().map(|t| style.swatch(t.color)).unwrap_or_default(),
            team_name(leader),
            points(leader.points),
            plural(leader.wins, "win", "wins"),
            leader.driver.nationality
        ));
    }

    lines.push(String::new());
    lines.push("ELITE DRIVER STANDINGS".to_string());
    if top.is_empty() {
        lines.push(format!("  {}", STANDINGS_UNAVAILABLE));
    } else {
        for d in top {
            lines.push(format!(
                "  #{:<2} {}{:<24} {}",
                d.position,
                d.team.as_ref().map(|t| style.swatch(t.color)).unwrap_or_default(),
                d.driver.full_name(),
                team_name(d)
            ));
            lines.push(format!(
                "      {} pts · {} · {}",
                points(d.points),
                plural(d.wins, "win", "wins"),
                d.driver.nationality
            ));
        }
    }

    lines.push(String::new());
    match next_race {
        Some(race) => lines.push(format!(
            "UPCOMING GRAND PRIX WEEKENDS · Round {} · {}",
            race.round, race.country
        )),
        None => lines.push("UPCOMING GRAND PRIX WEEKENDS".to_string()),
    }

    match outlook {
        None => lines.push(format!("  {}", SCHEDULE_UNAVAILABLE)),
        Some(Outlook::SeasonOver { year }) => lines.push(format!(
            "  Season {} is over. Next season: {}.",
            year,
            year + 1
        )),
        Some(outlook) => {
            for (i, race) in outlook.races().iter().enumerate() {
                if i > 0 {
                    lines.push(String::new());
                }
                let remaining = compute_remaining(now, &race.start_target());
                lines.extend(race_card(race, &remaining));
            }
        }
    }

    lines.join("\n")
}

fn team_name(standing: &DriverStanding) -> &str {
    standing
        .team
        .as_ref()
        .map(|t| t.name.as_str())
        .unwrap_or("Unknown Constructor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{race, Driver, Team};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()
    }

    fn standing(position: u32, family: &str, points: Decimal, wins: u32) -> DriverStanding {
        DriverStanding {
            position,
            points,
            wins,
            driver: Driver {
                id: family.to_lowercase(),
                given_name: "Test".into(),
                family_name: family.into(),
                nationality: "British".into(),
            },
            team: Some(Team::new("mclaren".into(), "McLaren".into(), "British".into())),
        }
    }

    fn field() -> Vec<DriverStanding> {
        vec![
            standing(1, "Norris", dec!(44), 1),
            standing(2, "Verstappen", dec!(36), 0),
            standing(3, "Russell", dec!(35), 0),
        ]
    }

    #[test]
    fn test_home_full_page() {
        let outlook = Outlook::ThisSeason(vec![
            race(2, "2025-03-23", Some("07:00:00Z")),
            race(3, "2025-04-06", None),
        ]);

        let page = home(Some(&field()), Some(&outlook), 5, now(), Style::default());

        assert!(page.contains("Season 2025"));
        assert!(page.contains("Leader's advantage   8 pts"));
        assert!(page.contains("Wins among top 3     1"));
        assert!(page.contains("Round 2 Grand Prix (Mar 23, 07:00 UTC)"));
        assert!(page.contains("#1 Test Norris"));
        assert!(page.contains("McLaren · 44 pts · 1 win · British"));
        assert!(page.contains("UPCOMING GRAND PRIX WEEKENDS · Round 2 · Australia"));
        assert!(page.contains("Lights out in  03 days 07 hours 00 minutes 00 seconds"));
        // Date-only race has no countdown
        assert!(page.contains("Lights out in  To be announced"));
    }

    #[test]
    fn test_home_limits_top_drivers() {
        let page = home(Some(&field()), None, 2, now(), Style::default());
        assert!(page.contains("Wins among top 2"));
        assert!(!page.contains("Russell"));
    }

    #[test]
    fn test_home_unavailable_sections() {
        let page = home(None, None, 5, now(), Style::default());

        assert!(page.contains(&format!("Leader's advantage   {}", EM_DASH)));
        assert!(page.contains("Awaiting schedule (To be announced)"));
        assert!(page.contains(STANDINGS_UNAVAILABLE));
        assert!(page.contains(SCHEDULE_UNAVAILABLE));
        assert!(!page.contains("CHAMPIONSHIP LEADER"));
    }

    #[test]
    fn test_home_season_over() {
        let outlook = Outlook::SeasonOver { year: 2025 };
        let page = home(Some(&field()), Some(&outlook), 5, now(), Style::default());
        assert!(page.contains("Season 2025 is over. Next season: 2026."));
    }
}
