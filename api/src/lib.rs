pub mod client;
pub mod dialect;
pub mod normalize;
pub mod payload;

pub use normalize::normalize;

use chrono::{DateTime, Utc};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the provider wire format
// ---------------------------------------------------------------------------

/// Short statuses of a game that is over: full time, after extra time, after penalties.
const FINISHED_SHORT_STATUSES: [&str; 3] = ["FT", "AET", "PEN"];

/// Display placeholder for a score the provider did not report.
pub const SCORE_PLACEHOLDER: &str = "-";

/// Which dashboard view a payload belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Games,
    Standings,
    Teams,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Games, Category::Standings, Category::Teams];

    /// Maximum number of records shown for this category.
    pub fn cap(&self) -> usize {
        match self {
            Category::Games => 12,
            Category::Standings => 20,
            Category::Teams => 16,
        }
    }

    /// URL path segment on the backend proxy.
    pub fn path(&self) -> &'static str {
        match self {
            Category::Games => "games",
            Category::Standings => "standings",
            Category::Teams => "teams",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Games => "Games",
            Category::Standings => "Standings",
            Category::Teams => "Teams",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Field-layout family a sport's payloads follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// API-Sports football (soccer): fixtures with `goals` and `score.fulltime`.
    Football,
    /// Every other sport: `scores.home.total` style.
    Generic,
}

/// Sport identifier as used in backend URLs ("football", "american-football", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SportId(String);

impl SportId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn dialect(&self) -> Dialect {
        match self.0.as_str() {
            "football" | "soccer" => Dialect::Football,
            _ => Dialect::Generic,
        }
    }

    /// "american-football" → "american football"
    pub fn display_name(&self) -> String {
        self.0.replace('-', " ")
    }
}

impl From<&str> for SportId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Game(GameRecord),
    Standing(StandingRecord),
    Team(TeamRecord),
}

impl NormalizedRecord {
    pub fn category(&self) -> Category {
        match self {
            NormalizedRecord::Game(_) => Category::Games,
            NormalizedRecord::Standing(_) => Category::Standings,
            NormalizedRecord::Team(_) => Category::Teams,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub date: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>, // None = not reported, shown as "-"
    pub away_score: Option<u32>,
    pub status_label: String, // "Match Finished"
    pub status_short: String, // "FT"
}

impl GameRecord {
    pub fn home_score_label(&self) -> String {
        score_label(self.home_score)
    }

    pub fn away_score_label(&self) -> String {
        score_label(self.away_score)
    }

    pub fn is_finished(&self) -> bool {
        FINISHED_SHORT_STATUSES.contains(&self.status_short.as_str())
            || self.status_label == "Match Finished"
    }
}

fn score_label(score: Option<u32>) -> String {
    score
        .map(|s| s.to_string())
        .unwrap_or_else(|| SCORE_PLACEHOLDER.to_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingRecord {
    pub rank: u32,
    pub team_id: String,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Signed: deductions can push a total below zero.
    pub points: i32,
    pub goals_diff: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub team_id: String,
    pub team_name: String,
    pub logo_url: Option<String>,
}

/// What the rendering layer shows for one (sport, category) selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Failed(String),
    /// Well-formed response with zero records. Not an error.
    Empty,
    Loaded(Vec<NormalizedRecord>),
}

impl LoadState {
    pub fn from_result<E: fmt::Display>(result: Result<Vec<NormalizedRecord>, E>) -> Self {
        match result {
            Ok(records) if records.is_empty() => LoadState::Empty,
            Ok(records) => LoadState::Loaded(records),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        match self {
            LoadState::Loaded(records) => records,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Request freshness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Hands out monotonically increasing tickets. Only the newest ticket may
/// update visible state; responses carrying an older one are dropped.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}
