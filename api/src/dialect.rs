//! Candidate field paths per (category, dialect).
//!
//! Each target field lists the dotted paths it may live under, in priority
//! order. The normalizer takes the first path that resolves; adding support for
//! a new provider shape means adding a path here, not a new branch.

use crate::Dialect;

pub const HOME_TEAM_PLACEHOLDER: &str = "Home Team";
pub const AWAY_TEAM_PLACEHOLDER: &str = "Away Team";
pub const TEAM_PLACEHOLDER: &str = "Unknown Team";
pub const STATUS_LABEL_PLACEHOLDER: &str = "Unknown";
pub const STATUS_SHORT_PLACEHOLDER: &str = "N/A";

type Paths = &'static [&'static str];

#[derive(Debug)]
pub struct GameFields {
    pub id: Paths,
    pub date: Paths,
    pub home_team: Paths,
    pub away_team: Paths,
    pub home_score: Paths,
    pub away_score: Paths,
    pub status_label: Paths,
    pub status_short: Paths,
}

#[derive(Debug)]
pub struct StandingFields {
    pub rank: Paths,
    pub team_id: Paths,
    pub team_name: Paths,
    pub played: Paths,
    pub wins: Paths,
    pub draws: Paths,
    pub losses: Paths,
    pub points: Paths,
    pub goals_diff: Paths,
}

#[derive(Debug)]
pub struct TeamFields {
    pub team_id: Paths,
    pub team_name: Paths,
    pub logo_url: Paths,
}

const GAME_ID: Paths = &["id", "fixture.id"];
const GAME_DATE: Paths = &["date", "fixture.date", "timestamp"];
const STATUS_LABEL: Paths = &[
    "status.long",
    "status.short",
    "fixture.status.long",
    "fixture.status.short",
];
const STATUS_SHORT: Paths = &["status.short", "fixture.status.short"];

/// API-Sports football fixtures.
pub static FOOTBALL_GAMES: GameFields = GameFields {
    id: GAME_ID,
    date: GAME_DATE,
    home_team: &["teams.home.name"],
    away_team: &["teams.away.name"],
    home_score: &["goals.home", "score.fulltime.home"],
    away_score: &["goals.away", "score.fulltime.away"],
    status_label: STATUS_LABEL,
    status_short: STATUS_SHORT,
};

/// Basketball, baseball, hockey, american-football and the rest.
pub static GENERIC_GAMES: GameFields = GameFields {
    id: GAME_ID,
    date: GAME_DATE,
    home_team: &["teams.home.name", "home.name"],
    away_team: &["teams.away.name", "away.name"],
    home_score: &["scores.home.total", "scores.home"],
    away_score: &["scores.away.total", "scores.away"],
    status_label: STATUS_LABEL,
    status_short: STATUS_SHORT,
};

pub static STANDINGS: StandingFields = StandingFields {
    rank: &["rank", "position"],
    team_id: &["team.id"],
    team_name: &["team.name"],
    played: &["all.played", "played", "games.played"],
    wins: &["all.win", "win", "games.win.total"],
    draws: &["all.draw", "draw"],
    losses: &["all.lose", "loss", "games.lose.total"],
    points: &["points"],
    goals_diff: &["goalsDiff"],
};

pub static TEAMS: TeamFields = TeamFields {
    team_id: &["id", "team.id"],
    team_name: &["name", "team.name"],
    logo_url: &["logo", "team.logo"],
};

pub fn game_fields(dialect: Dialect) -> &'static GameFields {
    match dialect {
        Dialect::Football => &FOOTBALL_GAMES,
        Dialect::Generic => &GENERIC_GAMES,
    }
}

/// Standings rows share one layout across providers.
pub fn standing_fields(_dialect: Dialect) -> &'static StandingFields {
    &STANDINGS
}

pub fn team_fields(_dialect: Dialect) -> &'static TeamFields {
    &TEAMS
}
