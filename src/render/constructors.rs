use super::{points, Style, EM_DASH};
use crate::state::{performance_ratio, ConstructorInsights, ConstructorStanding};

const EMPTY: &str = "Constructor standings are currently unavailable. \
Return later to follow the battle for engineering supremacy.";

const BAR_WIDTH: usize = 20;

/// Constructors' championship with headline insights.
pub fn constructors(standings: &[ConstructorStanding], year: i32, style: Style) -> String {
    let mut lines = vec![
        format!("CONSTRUCTORS CHAMPIONSHIP · Season {}", year),
        String::new(),
    ];

    if standings.is_empty() {
        lines.push(format!("  {}", EMPTY));
        return lines.join("\n");
    }

    let insights = ConstructorInsights::from_standings(standings);
    lines.push(format!(
        "  Total championship points   {}",
        points(insights.total_points)
    ));
    lines.push(format!("  Teams in the hunt           {}", insights.grid_depth));
    lines.push(format!(
        "  Leader advantage            {}",
        insights
            .winning_margin
            .map(|m| format!("{} pts", points(m)))
            .unwrap_or_else(|| EM_DASH.to_string())
    ));

    let leader_points = standings[0].points;

    for team in standings {
        let ratio = performance_ratio(team.points, leader_points);
        let filled = (ratio as usize * BAR_WIDTH + 50) / 100;

        lines.push(String::new());
        lines.push(format!(
            "  P{:<3}{}{:<28} {} pts",
            team.position,
            style.swatch(team.team.color),
            team.team.name,
            points(team.points)
        ));
        lines.push(format!("      {}", team.team.nationality));
        lines.push(format!(
            "      Wins {} · Points share {}% · Position {}",
            team.wins, ratio, team.position
        ));
        lines.push(format!(
            "      [{}{}]",
            "█".repeat(filled),
            " ".repeat(BAR_WIDTH - filled)
        ));
        lines.push(if team.wins > 0 {
            format!("      {} victories secured this season.", team.wins)
        } else {
            "      Hunting for their first win this year.".to_string()
        });
    }

    lines.join("\n")
}
