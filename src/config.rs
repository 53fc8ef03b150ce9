//! Application-level configuration loading, including the seed club list and
//! the league scoring policy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    engine::ScheduleRules,
    state::{league::Division, store::LeagueRules},
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FUTBOL_TRACKER_CONFIG_PATH";

/// Clubs per division in a full season.
const DEFAULT_TEAMS_PER_DIVISION: usize = 16;
/// Goals conceded per forfeited fixture of a disabled series.
const DEFAULT_FORFEIT_GOALS_AGAINST: i32 = 1;

/// Club entry used to initialize the standings when storage is empty.
#[derive(Debug, Clone)]
pub struct SeedClub {
    /// Club display name.
    pub name: String,
    /// Division the club starts in.
    pub division: Division,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    teams_per_division: usize,
    forfeit_goals_against: i32,
    sub12_distribution: Vec<i32>,
    clubs: Vec<SeedClub>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in league defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        clubs = config.clubs.len(),
                        "loaded league configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Engine policy derived from this configuration.
    pub fn league_rules(&self) -> LeagueRules {
        LeagueRules {
            schedule: ScheduleRules {
                teams_per_division: self.teams_per_division,
                forfeit_goals_against: self.forfeit_goals_against,
            },
            sub12_distribution: self.sub12_distribution.clone(),
        }
    }

    /// Clubs used to initialize the standings when storage is empty.
    pub fn seed_clubs(&self) -> &[SeedClub] {
        &self.clubs
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            teams_per_division: DEFAULT_TEAMS_PER_DIVISION,
            forfeit_goals_against: DEFAULT_FORFEIT_GOALS_AGAINST,
            sub12_distribution: default_sub12_distribution(),
            clubs: default_clubs(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    teams_per_division: Option<usize>,
    #[serde(default)]
    forfeit_goals_against: Option<i32>,
    #[serde(default)]
    sub12_distribution: Option<Vec<i32>>,
    #[serde(default)]
    clubs: Option<Vec<RawClub>>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            teams_per_division: value
                .teams_per_division
                .unwrap_or(DEFAULT_TEAMS_PER_DIVISION),
            forfeit_goals_against: value
                .forfeit_goals_against
                .unwrap_or(DEFAULT_FORFEIT_GOALS_AGAINST),
            sub12_distribution: value
                .sub12_distribution
                .filter(|table| !table.is_empty())
                .unwrap_or_else(default_sub12_distribution),
            clubs: value
                .clubs
                .filter(|clubs| !clubs.is_empty())
                .map(|clubs| clubs.into_iter().map(Into::into).collect())
                .unwrap_or_else(default_clubs),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of a seed club inside the configuration file.
struct RawClub {
    name: String,
    division: Division,
}

impl From<RawClub> for SeedClub {
    fn from(value: RawClub) -> Self {
        Self {
            name: value.name,
            division: value.division,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Bonus points awarded by final Sub12 rank; ranks past the end reuse the
/// last entry.
fn default_sub12_distribution() -> Vec<i32> {
    vec![
        100, 90, 85, 80, 75, 70, 65, 60, 55, 50, 45, 40, 35, 30, 25, 25,
    ]
}

/// Built-in club list shipped with the binary: 16 clubs per division.
fn default_clubs() -> Vec<SeedClub> {
    const PRIMERA: [&str; 16] = [
        "21 Diciembre",
        "Avance",
        "Estrella",
        "Cruz azul",
        "Unión",
        "Barrabases",
        "San Miguel",
        "Condor",
        "San Martin",
        "El Tejar",
        "Junior",
        "San Luis",
        "El Lucero",
        "Deportivo Chile",
        "Chillan Viejo",
        "Union Española",
    ];
    const SEGUNDA: [&str; 16] = [
        "Union Catolica",
        "Union Mardones",
        "Real Oriente",
        "Irene Frei",
        "Colo colo Zañartu",
        "Ferroviarios",
        "Estadio",
        "Roberto Mateos",
        "Atlanta",
        "Nacional",
        "Vicuña Mackenna",
        "Buenos Amigos",
        "Zaragoza",
        "El Sauce",
        "Manuel Rodriguez",
        "Lautaro",
    ];

    PRIMERA
        .into_iter()
        .map(|name| SeedClub {
            name: name.to_string(),
            division: Division::Primera,
        })
        .chain(SEGUNDA.into_iter().map(|name| SeedClub {
            name: name.to_string(),
            division: Division::Segunda,
        }))
        .collect()
}
