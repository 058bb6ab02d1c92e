mod race;
mod standings;
mod team;

pub use race::Race;
pub use standings::{
    leader_gap, performance_ratio, total_wins, ConstructorInsights, ConstructorStanding, Driver,
    DriverStanding,
};
pub use team::{Rgb, Team};

#[cfg(test)]
pub(crate) use race::race;
