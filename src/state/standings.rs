use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::Team;

/// Smallest bar drawn for a scoring-less team, in percent.
const MIN_PERFORMANCE_RATIO: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub nationality: String,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// One row of the drivers' championship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverStanding {
    pub position: u32,
    /// Points can be fractional (half-points races)
    pub points: Decimal,
    pub wins: u32,
    pub driver: Driver,
    /// Current team. Absent only if the API lists none.
    pub team: Option<Team>,
}

/// One row of the constructors' championship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorStanding {
    pub position: u32,
    pub points: Decimal,
    pub wins: u32,
    pub team: Team,
}

/// Points between P1 and P2. None with fewer than two drivers.
pub fn leader_gap(standings: &[DriverStanding]) -> Option<Decimal> {
    match standings {
        [leader, runner_up, ..] => Some(leader.points - runner_up.points),
        _ => None,
    }
}

/// Combined wins of the given drivers.
pub fn total_wins(standings: &[DriverStanding]) -> u32 {
    standings.iter().map(|d| d.wins).sum()
}

/// Headline numbers for the constructors page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorInsights {
    /// Combined tally across all teams
    pub total_points: Decimal,
    /// Teams in the standings
    pub grid_depth: usize,
    /// Gap between the top two, never negative. None with fewer than two teams.
    pub winning_margin: Option<Decimal>,
}

impl ConstructorInsights {
    pub fn from_standings(standings: &[ConstructorStanding]) -> Self {
        let total_points = standings.iter().map(|t| t.points).sum();

        let winning_margin = match standings {
            [leader, runner_up, ..] => Some((leader.points - runner_up.points).max(Decimal::ZERO)),
            _ => None,
        };

        Self {
            total_points,
            grid_depth: standings.len(),
            winning_margin,
        }
    }
}

/// A team's points as a percentage of the leader's, rounded and clamped to
/// 8..=100 so every bar stays visible. Zero when the leader has no points.
pub fn performance_ratio(points: Decimal, leader_points: Decimal) -> u8 {
    if leader_points <= Decimal::ZERO {
        return 0;
    }

    let pct = (points / leader_points * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::from(MIN_PERFORMANCE_RATIO), dec!(100));

    pct.to_u8().unwrap_or(MIN_PERFORMANCE_RATIO)
}
