use crate::state::app_state::League;
use log::LevelFilter;
use sports_api::SportId;
use sports_api::client::{ApiConfig, Query};

/// Sports offered when the backend's `/sports` listing is unreachable.
const FALLBACK_SPORTS: [&str; 6] = [
    "football",
    "basketball",
    "baseball",
    "american-football",
    "cricket",
    "tennis",
];
const DEFAULT_SPORT: &str = "football";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
/// Leagues offered by the league picker: (id, name, country).
const PRESET_LEAGUES: [(u32, &str, &str); 4] = [
    (39, "Premier League", "England"),
    (78, "Bundesliga", "Germany"),
    (135, "Serie A", "Italy"),
    (140, "La Liga", "Spain"),
];

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api: ApiConfig,
    pub initial_sport: SportId,
    pub query: Query,
    pub fallback_sports: Vec<SportId>,
    pub leagues: Vec<League>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: DEFAULT_LOG_LEVEL,
            api: ApiConfig::default(),
            initial_sport: SportId::new(DEFAULT_SPORT),
            query: Query::default(),
            fallback_sports: FALLBACK_SPORTS.iter().copied().map(SportId::new).collect(),
            leagues: PRESET_LEAGUES
                .iter()
                .map(|&(id, name, country)| League::new(id, name, country))
                .collect(),
        }
    }
}

impl AppSettings {
    /// Read settings once at startup. Nothing downstream touches the environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_level: non_empty("SPORTSDASH_LOG")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.log_level),
            api: ApiConfig::from_lookup(&lookup),
            initial_sport: non_empty("SPORTSDASH_SPORT")
                .map(SportId::new)
                .unwrap_or(defaults.initial_sport),
            query: Query {
                league: non_empty("SPORTSDASH_LEAGUE").and_then(|v| v.trim().parse().ok()),
                season: non_empty("SPORTSDASH_SEASON").map(|v| v.trim().to_owned()),
            },
            ..defaults
        }
    }
}
