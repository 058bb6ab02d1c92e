use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::ApiError;
use crate::config::ApiConfig;
use crate::state::{ConstructorStanding, Driver, DriverStanding, Race, Team};

/// Which championship year to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Current,
    Year(i32),
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Current => f.write_str("current"),
            Season::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Client for the Jolpica mirror of the Ergast F1 API.
#[derive(Debug, Clone)]
pub struct JolpicaClient {
    http: reqwest::Client,
    base_url: String,
}

impl JolpicaClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current drivers' championship, leader first.
    pub async fn driver_standings(&self) -> Result<Vec<DriverStanding>, ApiError> {
        let data: StandingsData = self.get("current/driverstandings.json").await?;
        parse_driver_standings(data)
    }

    /// Current constructors' championship, leader first.
    pub async fn constructor_standings(&self) -> Result<Vec<ConstructorStanding>, ApiError> {
        let data: StandingsData = self.get("current/constructorstandings.json").await?;
        parse_constructor_standings(data)
    }

    /// Full race calendar for a season, in round order.
    pub async fn schedule(&self, season: Season) -> Result<Vec<Race>, ApiError> {
        let data: ScheduleData = self.get(&format!("{}.json", season)).await?;
        parse_schedule(data)
    }

    /// GET a path under the base URL and unwrap the `MRData` envelope.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "fetching");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })?;
        Ok(envelope.data)
    }
}

// Wire shapes. Ergast sends every number as a string.

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MRData")]
    data: T,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    #[serde(rename = "StandingsTable")]
    table: StandingsTable,
}

#[derive(Debug, Deserialize)]
struct StandingsTable {
    // Empty before the first race of a season
    #[serde(rename = "StandingsLists", default)]
    lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    drivers: Vec<RawDriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    constructors: Vec<RawConstructorStanding>,
}

#[derive(Debug, Deserialize)]
struct RawDriverStanding {
    // Missing for excluded drivers
    position: Option<String>,
    points: String,
    wins: String,
    #[serde(rename = "Driver")]
    driver: RawDriver,
    #[serde(rename = "Constructors", default)]
    constructors: Vec<RawConstructor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDriver {
    driver_id: String,
    given_name: String,
    family_name: String,
    #[serde(default)]
    nationality: String,
}

#[derive(Debug, Deserialize)]
struct RawConstructorStanding {
    position: Option<String>,
    points: String,
    wins: String,
    #[serde(rename = "Constructor")]
    constructor: RawConstructor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConstructor {
    constructor_id: String,
    name: String,
    #[serde(default)]
    nationality: String,
}

#[derive(Debug, Deserialize)]
struct ScheduleData {
    #[serde(rename = "RaceTable")]
    table: RaceTable,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<RawRace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRace {
    season: String,
    round: String,
    race_name: String,
    date: String,
    time: Option<String>,
    #[serde(rename = "Circuit")]
    circuit: RawCircuit,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCircuit {
    circuit_name: String,
    #[serde(rename = "Location")]
    location: RawLocation,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    locality: String,
    country: String,
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, ApiError> {
    value.trim().parse().map_err(|_| ApiError::Field {
        field,
        value: value.to_string(),
    })
}

fn parse_points(value: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(value.trim()).map_err(|_| ApiError::Field {
        field: "points",
        value: value.to_string(),
    })
}

/// Listed position, or the row's place in the list when the API omits it.
fn parse_position(position: Option<&str>, index: usize) -> Result<u32, ApiError> {
    match position {
        Some(p) => parse_u32("position", p),
        None => Ok(index as u32 + 1),
    }
}

impl From<RawConstructor> for Team {
    fn from(raw: RawConstructor) -> Self {
        Team::new(raw.constructor_id, raw.name, raw.nationality)
    }
}

fn parse_driver_standings(data: StandingsData) -> Result<Vec<DriverStanding>, ApiError> {
    let Some(list) = data.table.lists.into_iter().next() else {
        return Ok(Vec::new());
    };

    list.drivers
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            Ok(DriverStanding {
                position: parse_position(raw.position.as_deref(), i)?,
                points: parse_points(&raw.points)?,
                wins: parse_u32("wins", &raw.wins)?,
                driver: Driver {
                    id: raw.driver.driver_id,
                    given_name: raw.driver.given_name,
                    family_name: raw.driver.family_name,
                    nationality: raw.driver.nationality,
                },
                // Mid-season switches list every team; the first is current
                team: raw.constructors.into_iter().next().map(Team::from),
            })
        })
        .collect()
}

fn parse_constructor_standings(data: StandingsData) -> Result<Vec<ConstructorStanding>, ApiError> {
    let Some(list) = data.table.lists.into_iter().next() else {
        return Ok(Vec::new());
    };

    list.constructors
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            Ok(ConstructorStanding {
                position: parse_position(raw.position.as_deref(), i)?,
                points: parse_points(&raw.points)?,
                wins: parse_u32("wins", &raw.wins)?,
                team: raw.constructor.into(),
            })
        })
        .collect()
}

fn parse_schedule(data: ScheduleData) -> Result<Vec<Race>, ApiError> {
    let mut races = data
        .table
        .races
        .into_iter()
        .map(|raw| {
            Ok(Race {
                season: raw.season,
                round: parse_u32("round", &raw.round)?,
                name: raw.race_name,
                circuit: raw.circuit.circuit_name,
                locality: raw.circuit.location.locality,
                country: raw.circuit.location.country,
                date: raw.date,
                time: raw.time,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    races.sort_by_key(|r| r.round);
    Ok(races)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rgb;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn decode<T: DeserializeOwned>(value: serde_json::Value) -> T {
        let envelope: Envelope<T> = serde_json::from_value(value).unwrap();
        envelope.data
    }

    fn driver_standings_fixture() -> serde_json::Value {
        json!({
            "MRData": {
                "series": "f1",
                "StandingsTable": {
                    "season": "2025",
                    "round": "3",
                    "StandingsLists": [{
                        "season": "2025",
                        "round": "3",
                        "DriverStandings": [
                            {
                                "position": "1",
                                "positionText": "1",
                                "points": "62",
                                "wins": "1",
                                "Driver": {
                                    "driverId": "norris",
                                    "permanentNumber": "4",
                                    "code": "NOR",
                                    "givenName": "Lando",
                                    "familyName": "Norris",
                                    "dateOfBirth": "1999-11-13",
                                    "nationality": "British"
                                },
                                "Constructors": [{
                                    "constructorId": "mclaren",
                                    "name": "McLaren",
                                    "nationality": "British"
                                }]
                            },
                            {
                                "position": "2",
                                "positionText": "2",
                                "points": "61.5",
                                "wins": "1",
                                "Driver": {
                                    "driverId": "max_verstappen",
                                    "givenName": "Max",
                                    "familyName": "Verstappen",
                                    "nationality": "Dutch"
                                },
                                "Constructors": [
                                    { "constructorId": "red_bull", "name": "Red Bull", "nationality": "Austrian" },
                                    { "constructorId": "rb", "name": "RB F1 Team", "nationality": "Italian" }
                                ]
                            },
                            {
                                "positionText": "-",
                                "points": "0",
                                "wins": "0",
                                "Driver": {
                                    "driverId": "doohan",
                                    "givenName": "Jack",
                                    "familyName": "Doohan",
                                    "nationality": "Australian"
                                },
                                "Constructors": []
                            }
                        ]
                    }]
                }
            }
        })
    }

    #[test]
    fn test_parse_driver_standings() {
        let standings = parse_driver_standings(decode(driver_standings_fixture())).unwrap();

        assert_eq!(standings.len(), 3);

        let leader = &standings[0];
        assert_eq!(leader.position, 1);
        assert_eq!(leader.points, dec!(62));
        assert_eq!(leader.wins, 1);
        assert_eq!(leader.driver.full_name(), "Lando Norris");
        let team = leader.team.as_ref().unwrap();
        assert_eq!(team.name, "McLaren");
        assert_eq!(team.color, Rgb(0xFF, 0x80, 0x00));

        // Half points and first-listed team
        assert_eq!(standings[1].points, dec!(61.5));
        assert_eq!(standings[1].team.as_ref().unwrap().id, "red_bull");

        // No position and no team
        assert_eq!(standings[2].position, 3);
        assert!(standings[2].team.is_none());
    }

    #[test]
    fn test_empty_standings_lists_before_season_start() {
        let value = json!({
            "MRData": { "StandingsTable": { "season": "2026", "StandingsLists": [] } }
        });

        assert!(parse_driver_standings(decode(value.clone())).unwrap().is_empty());
        assert!(parse_constructor_standings(decode(value)).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_points_is_field_error() {
        let value = json!({
            "MRData": { "StandingsTable": { "StandingsLists": [{
                "ConstructorStandings": [{
                    "position": "1",
                    "points": "lots",
                    "wins": "0",
                    "Constructor": { "constructorId": "haas", "name": "Haas F1 Team", "nationality": "American" }
                }]
            }]}}
        });

        let err = parse_constructor_standings(decode(value)).unwrap_err();
        assert!(matches!(err, ApiError::Field { field: "points", .. }));
    }

    #[test]
    fn test_parse_constructor_standings() {
        let value = json!({
            "MRData": { "StandingsTable": { "StandingsLists": [{
                "ConstructorStandings": [
                    {
                        "position": "1",
                        "points": "111",
                        "wins": "2",
                        "Constructor": { "constructorId": "mclaren", "name": "McLaren", "nationality": "British" }
                    },
                    {
                        "position": "2",
                        "points": "75",
                        "wins": "0",
                        "Constructor": { "constructorId": "newteam", "name": "New Team", "nationality": "American" }
                    }
                ]
            }]}}
        });

        let standings = parse_constructor_standings(decode(value)).unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].team.name, "McLaren");
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[1].points, dec!(75));
        assert_eq!(standings[1].team.color, Rgb::NEUTRAL);
    }

    #[test]
    fn test_parse_schedule_sorts_by_round() {
        let value = json!({
            "MRData": { "RaceTable": { "season": "2025", "Races": [
                {
                    "season": "2025",
                    "round": "2",
                    "raceName": "Chinese Grand Prix",
                    "Circuit": {
                        "circuitId": "shanghai",
                        "circuitName": "Shanghai International Circuit",
                        "Location": { "lat": "31.3389", "long": "121.22", "locality": "Shanghai", "country": "China" }
                    },
                    "date": "2025-03-23",
                    "time": "07:00:00Z"
                },
                {
                    "season": "2025",
                    "round": "1",
                    "raceName": "Australian Grand Prix",
                    "Circuit": {
                        "circuitName": "Albert Park Grand Prix Circuit",
                        "Location": { "locality": "Melbourne", "country": "Australia" }
                    },
                    "date": "2025-03-16"
                }
            ]}}
        });

        let races = parse_schedule(decode(value)).unwrap();
        assert_eq!(races.len(), 2);
        assert_eq!(races[0].round, 1);
        assert_eq!(races[0].name, "Australian Grand Prix");
        assert_eq!(races[0].time, None);
        assert_eq!(races[1].circuit, "Shanghai International Circuit");
        assert_eq!(races[1].time.as_deref(), Some("07:00:00Z"));
    }

    #[test]
    fn test_missing_envelope_is_decode_error() {
        let result: Result<Envelope<ScheduleData>, _> =
            serde_json::from_value(json!({ "data": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_season_path_segment() {
        assert_eq!(Season::Current.to_string(), "current");
        assert_eq!(Season::Year(2026).to_string(), "2026");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://api.jolpi.ca/ergast/f1/".into(),
            timeout_secs: 5,
        };
        let client = JolpicaClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.jolpi.ca/ergast/f1");
    }
}
