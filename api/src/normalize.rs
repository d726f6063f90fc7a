use crate::dialect::{
    self, AWAY_TEAM_PLACEHOLDER, HOME_TEAM_PLACEHOLDER, STATUS_LABEL_PLACEHOLDER,
    STATUS_SHORT_PLACEHOLDER, TEAM_PLACEHOLDER,
};
use crate::payload::{first_count, first_date, first_int, first_text, lookup, response_list};
use crate::{
    Category, Dialect, GameRecord, NormalizedRecord, SportId, StandingRecord, TeamRecord,
};
use serde_json::Value;

/// Turn a raw provider response into display-ready records.
///
/// Total over any JSON input: a missing envelope or unrecognised shape gives an
/// empty list, absent fields take placeholders. Output is capped at
/// [`Category::cap`].
pub fn normalize(raw: &Value, category: Category, sport: &SportId) -> Vec<NormalizedRecord> {
    let items = response_list(raw);
    let dialect = sport.dialect();

    let rows: Vec<&Value> = match category {
        Category::Standings => flatten_standings(items),
        _ => items.iter().collect(),
    };

    rows.into_iter()
        .take(category.cap())
        .enumerate()
        .map(|(index, row)| map_row(row, index, category, dialect))
        .collect()
}

fn map_row(row: &Value, index: usize, category: Category, dialect: Dialect) -> NormalizedRecord {
    match category {
        Category::Games => NormalizedRecord::Game(map_game(row, index, dialect)),
        Category::Standings => NormalizedRecord::Standing(map_standing(row, index, dialect)),
        Category::Teams => NormalizedRecord::Team(map_team(row, index, dialect)),
    }
}

// ---------------------------------------------------------------------------
// Standings flattening
// ---------------------------------------------------------------------------

/// Standings arrive in one of three shapes:
///   - football: `[{league: {standings: [[row, ...], [row, ...]]}}]`, one
///     inner array per group
///   - basketball/hockey: `[[row, ...], [row, ...]]`, one array per conference
///   - flat: `[row, ...]`
///
/// The nested shapes are detected from the first element and flattened in
/// order; group membership is dropped.
fn flatten_standings(items: &[Value]) -> Vec<&Value> {
    let Some(first) = items.first() else {
        return Vec::new();
    };

    if league_groups(first).is_some() {
        return items
            .iter()
            .filter_map(league_groups)
            .flat_map(flatten_groups)
            .collect();
    }

    if first.is_array() {
        return flatten_groups(items);
    }

    items.iter().collect()
}

fn league_groups(item: &Value) -> Option<&[Value]> {
    lookup(item, "league.standings")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// One level of flattening. A group that is already a row is kept as-is.
fn flatten_groups(groups: &[Value]) -> Vec<&Value> {
    groups
        .iter()
        .flat_map(|group| match group {
            Value::Array(rows) => rows.iter().collect::<Vec<_>>(),
            row => vec![row],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn map_game(row: &Value, index: usize, dialect: Dialect) -> GameRecord {
    let fields = dialect::game_fields(dialect);

    GameRecord {
        id: first_text(row, fields.id).unwrap_or_else(|| index.to_string()),
        date: first_date(row, fields.date),
        home_team: first_text(row, fields.home_team)
            .unwrap_or_else(|| HOME_TEAM_PLACEHOLDER.to_owned()),
        away_team: first_text(row, fields.away_team)
            .unwrap_or_else(|| AWAY_TEAM_PLACEHOLDER.to_owned()),
        home_score: first_count(row, fields.home_score),
        away_score: first_count(row, fields.away_score),
        status_label: first_text(row, fields.status_label)
            .unwrap_or_else(|| STATUS_LABEL_PLACEHOLDER.to_owned()),
        status_short: first_text(row, fields.status_short)
            .unwrap_or_else(|| STATUS_SHORT_PLACEHOLDER.to_owned()),
    }
}

fn map_standing(row: &Value, index: usize, dialect: Dialect) -> StandingRecord {
    let fields = dialect::standing_fields(dialect);
    let count = |paths: &[&str]| first_count(row, paths).unwrap_or(0);

    StandingRecord {
        rank: first_count(row, fields.rank).unwrap_or(index as u32 + 1),
        team_id: first_text(row, fields.team_id).unwrap_or_else(|| index.to_string()),
        team_name: first_text(row, fields.team_name)
            .unwrap_or_else(|| TEAM_PLACEHOLDER.to_owned()),
        played: count(fields.played),
        wins: count(fields.wins),
        draws: count(fields.draws),
        losses: count(fields.losses),
        points: first_int(row, fields.points).unwrap_or(0),
        goals_diff: first_int(row, fields.goals_diff),
    }
}

fn map_team(row: &Value, index: usize, dialect: Dialect) -> TeamRecord {
    let fields = dialect::team_fields(dialect);

    TeamRecord {
        team_id: first_text(row, fields.team_id).unwrap_or_else(|| index.to_string()),
        team_name: first_text(row, fields.team_name)
            .unwrap_or_else(|| TEAM_PLACEHOLDER.to_owned()),
        logo_url: first_text(row, fields.logo_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn football() -> SportId {
        SportId::new("football")
    }

    fn games(records: &[NormalizedRecord]) -> Vec<&GameRecord> {
        records
            .iter()
            .map(|r| match r {
                NormalizedRecord::Game(g) => g,
                other => panic!("expected game, got {other:?}"),
            })
            .collect()
    }

    fn standings(records: &[NormalizedRecord]) -> Vec<&StandingRecord> {
        records
            .iter()
            .map(|r| match r {
                NormalizedRecord::Standing(s) => s,
                other => panic!("expected standing, got {other:?}"),
            })
            .collect()
    }

    fn teams(records: &[NormalizedRecord]) -> Vec<&TeamRecord> {
        records
            .iter()
            .map(|r| match r {
                NormalizedRecord::Team(t) => t,
                other => panic!("expected team, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn empty_or_malformed_payloads_normalize_to_nothing() {
        let payloads = [
            json!({}),
            json!({ "response": null }),
            json!({ "response": [] }),
            json!({ "response": "rate limited" }),
            json!(null),
            json!([{ "id": 1 }]),
        ];
        for raw in &payloads {
            for category in Category::ALL {
                for sport in [football(), SportId::new("basketball")] {
                    assert!(normalize(raw, category, &sport).is_empty(), "{raw} / {category}");
                }
            }
        }
    }

    #[test]
    fn football_game_with_missing_away_goals() {
        let raw = json!({
            "results": 1,
            "response": [{
                "fixture": { "id": 1035037, "date": "2023-08-11T19:00:00+00:00" },
                "teams": { "home": { "name": "Arsenal" }, "away": { "name": "Chelsea" } },
                "goals": { "home": 2, "away": null },
                "status": { "long": "Match Finished", "short": "FT" }
            }]
        });
        let records = normalize(&raw, Category::Games, &football());
        let games = games(&records);
        assert_eq!(games.len(), 1);

        let game = games[0];
        assert_eq!(game.id, "1035037");
        assert_eq!(game.home_team, "Arsenal");
        assert_eq!(game.away_team, "Chelsea");
        assert_eq!(game.home_score, Some(2));
        assert_eq!(game.away_score, None);
        assert_eq!(game.away_score_label(), "-");
        assert_eq!(game.status_label, "Match Finished");
        assert!(game.is_finished());
        assert!(game.date.is_some());
    }

    #[test]
    fn zero_goals_are_a_score_not_a_placeholder() {
        let raw = json!({ "response": [{
            "goals": { "home": 0, "away": 0 },
            "score": { "fulltime": { "home": 3, "away": 3 } }
        }]});
        let records = normalize(&raw, Category::Games, &football());
        let game = games(&records)[0];
        assert_eq!(game.home_score, Some(0));
        assert_eq!(game.home_score_label(), "0");
        assert_eq!(game.away_score, Some(0));
    }

    #[test]
    fn football_falls_back_to_fulltime_score_and_fixture_status() {
        let raw = json!({ "response": [{
            "score": { "fulltime": { "home": 1, "away": 4 } },
            "fixture": { "status": { "long": "Match Finished", "short": "FT" } }
        }]});
        let records = normalize(&raw, Category::Games, &football());
        let game = games(&records)[0];
        assert_eq!((game.home_score, game.away_score), (Some(1), Some(4)));
        assert_eq!(game.status_label, "Match Finished");
        assert_eq!(game.status_short, "FT");
        assert_eq!(game.home_team, HOME_TEAM_PLACEHOLDER);
        assert_eq!(game.away_team, AWAY_TEAM_PLACEHOLDER);
        assert_eq!(game.id, "0");
    }

    #[test]
    fn generic_games_read_totals_or_bare_scores() {
        let raw = json!({ "response": [
            {
                "id": 1,
                "home": { "name": "Yankees" },
                "away": { "name": "Red Sox" },
                "scores": { "home": { "total": 5 }, "away": { "total": 0 } },
                "status": { "short": "FT" }
            },
            {
                "id": 2,
                "teams": { "home": { "name": "Celtics" }, "away": { "name": "Knicks" } },
                "scores": { "home": 101, "away": "99" },
                "timestamp": 1700000000
            },
            {
                "id": 3,
                "teams": { "home": { "name": "Bulls" }, "away": { "name": "Heat" } },
                "scores": { "home": { "total": null }, "away": { "total": null } }
            }
        ]});
        let records = normalize(&raw, Category::Games, &SportId::new("basketball"));
        let games = games(&records);

        assert_eq!(games[0].home_team, "Yankees");
        assert_eq!((games[0].home_score, games[0].away_score), (Some(5), Some(0)));
        assert_eq!(games[0].status_label, "FT");

        assert_eq!((games[1].home_score, games[1].away_score), (Some(101), Some(99)));
        assert_eq!(games[1].status_label, STATUS_LABEL_PLACEHOLDER);
        assert_eq!(games[1].status_short, STATUS_SHORT_PLACEHOLDER);
        assert!(games[1].date.is_some());

        assert_eq!(games[2].home_score_label(), "-");
        assert_eq!(games[2].away_score_label(), "-");
    }

    #[test]
    fn football_dialect_ignores_generic_team_paths() {
        let raw = json!({ "response": [{ "home": { "name": "Ignored" } }] });
        let fb = normalize(&raw, Category::Games, &football());
        assert_eq!(games(&fb)[0].home_team, HOME_TEAM_PLACEHOLDER);

        let generic = normalize(&raw, Category::Games, &SportId::new("hockey"));
        assert_eq!(games(&generic)[0].home_team, "Ignored");
    }

    #[test]
    fn grouped_football_standings_flatten_in_order() {
        let raw = json!({ "response": [{
            "league": {
                "id": 2,
                "standings": [
                    [ { "rank": 1, "team": { "name": "A" } }, { "rank": 2, "team": { "name": "B" } } ],
                    [ { "rank": 1, "team": { "name": "C" } } ]
                ]
            }
        }]});
        let records = normalize(&raw, Category::Standings, &football());
        let names: Vec<&str> = standings(&records).iter().map(|s| s.team_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn conference_arrays_flatten_like_league_groups() {
        let raw = json!({ "response": [
            [ { "position": 1, "team": { "id": 10, "name": "East 1" } } ],
            [ { "position": 1, "team": { "id": 20, "name": "West 1" } } ]
        ]});
        let records = normalize(&raw, Category::Standings, &SportId::new("basketball"));
        let rows = standings(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].team_name, "West 1");
        assert_eq!(rows[1].team_id, "20");
        assert_eq!(rows[1].rank, 1);
    }

    #[test]
    fn flat_standings_pass_through() {
        let raw = json!({ "response": [
            { "team": { "name": "X" }, "points": 9 },
            { "team": { "name": "Y" }, "points": 0 }
        ]});
        let records = normalize(&raw, Category::Standings, &SportId::new("baseball"));
        let rows = standings(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1, "rank falls back to list position");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].points, 0);
    }

    #[test]
    fn standings_losses_fall_back_to_loss_field() {
        let raw = json!({ "response": [{
            "rank": 4,
            "team": { "id": 33, "name": "Manchester United" },
            "all": { "played": 38, "win": 18, "draw": 6 },
            "loss": 14,
            "points": 60,
            "goalsDiff": 9
        }]});
        let records = normalize(&raw, Category::Standings, &football());
        let row = standings(&records)[0];
        assert_eq!(
            row,
            &StandingRecord {
                rank: 4,
                team_id: "33".into(),
                team_name: "Manchester United".into(),
                played: 38,
                wins: 18,
                draws: 6,
                losses: 14,
                points: 60,
                goals_diff: Some(9),
            }
        );
    }

    #[test]
    fn standings_missing_numbers_default_to_zero() {
        let raw = json!({ "response": [{ "team": null }] });
        let records = normalize(&raw, Category::Standings, &football());
        let row = standings(&records)[0];
        assert_eq!(row.team_name, TEAM_PLACEHOLDER);
        assert_eq!((row.played, row.wins, row.draws, row.losses, row.points), (0, 0, 0, 0, 0));
        assert_eq!(row.goals_diff, None);
    }

    #[test]
    fn negative_points_and_goal_difference_are_kept() {
        let raw = json!({ "response": [{
            "rank": 20,
            "team": { "id": 71, "name": "Deducted FC" },
            "all": { "played": 10, "win": 0, "draw": 1, "lose": 9 },
            "points": -3,
            "goalsDiff": -21
        }]});
        let records = normalize(&raw, Category::Standings, &football());
        let row = standings(&records)[0];
        assert_eq!(row.points, -3);
        assert_eq!(row.goals_diff, Some(-21));
        assert_eq!(row.losses, 9);
    }

    #[test]
    fn all_values_win_over_flat_values_even_when_zero() {
        let raw = json!({ "response": [{ "all": { "win": 0 }, "win": 12 }] });
        let records = normalize(&raw, Category::Standings, &football());
        assert_eq!(standings(&records)[0].wins, 0);
    }

    #[test]
    fn teams_read_flat_or_nested_shapes() {
        let raw = json!({ "response": [
            { "id": 145, "name": "Lakers", "logo": "https://media.example/145.png" },
            { "team": { "id": 42, "name": "Arsenal", "logo": "https://media.example/42.png" }, "venue": {} },
            { "team": { "logo": "" } }
        ]});
        let records = normalize(&raw, Category::Teams, &football());
        let teams = teams(&records);
        assert_eq!(teams[0].team_name, "Lakers");
        assert_eq!(teams[0].team_id, "145");
        assert_eq!(teams[1].team_name, "Arsenal");
        assert_eq!(teams[1].logo_url.as_deref(), Some("https://media.example/42.png"));
        assert_eq!(teams[2].team_name, TEAM_PLACEHOLDER);
        assert_eq!(teams[2].team_id, "2");
        assert_eq!(teams[2].logo_url, None);
    }

    #[test]
    fn output_never_exceeds_category_cap() {
        let rows: Vec<Value> = (0..50).map(|i| json!({ "id": i, "rank": i })).collect();
        let raw = json!({ "response": rows.clone() });
        for category in Category::ALL {
            let records = normalize(&raw, category, &football());
            assert_eq!(records.len(), category.cap());
            assert!(records.iter().all(|r| r.category() == category));
        }

        let grouped = json!({ "response": [{ "league": { "standings": [rows.clone(), rows] } }] });
        assert_eq!(normalize(&grouped, Category::Standings, &football()).len(), 20);
    }

    #[test]
    fn non_object_rows_still_produce_placeholder_records() {
        let raw = json!({ "response": [42, "text", null] });
        let records = normalize(&raw, Category::Teams, &football());
        assert_eq!(records.len(), 3);
        assert!(teams(&records).iter().all(|t| t.team_name == TEAM_PLACEHOLDER));
    }
}
