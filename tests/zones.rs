use std::fs;
use std::path::PathBuf;

use nbashot_terminal::player_stats::PlayerRecord;
use nbashot_terminal::stats_api::parse_shot_locations_json;
use nbashot_terminal::zones::{
    free_throw_row, zones_for_player, Cell, WideZoneTable, ZoneRow,
};

fn fixture_table() -> WideZoneTable {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("shot_locations.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_shot_locations_json(&raw).expect("fixture should parse")
}

fn small_table(columns: &[&str], rows: Vec<Vec<Cell>>) -> WideZoneTable {
    WideZoneTable {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}

fn zone(rows: &[ZoneRow], name: &str) -> ZoneRow {
    rows.iter()
        .find(|z| z.zone == name)
        .unwrap_or_else(|| panic!("zone {name} missing"))
        .clone()
}

#[test]
fn rebuilds_zone_breakdown_from_wide_row() {
    let table = fixture_table();
    let rows = zones_for_player("LeBron James", &table);
    assert_eq!(rows.len(), 6); // 7 zones minus Backcourt

    let ra = zone(&rows, "Restricted Area");
    assert_eq!(ra.fgm, Some(4.0));
    assert_eq!(ra.fga, Some(6.0));
    assert_eq!(ra.pts, Some(8.0));

    // Total retained attempts: 6 + 4 + 3 + 1 + 1 + 9 = 24.
    let share = ra.shot_share.expect("share defined");
    assert!((share - 0.25).abs() < 1e-9);
}

#[test]
fn three_point_zones_score_three() {
    let table = fixture_table();
    let rows = zones_for_player("LeBron James", &table);

    let atb = zone(&rows, "Above the Break 3");
    assert_eq!(atb.pts, Some(12.0));
    let pps = atb.pts_per_shot.expect("attempted");
    assert!((pps - 12.0 / 9.0).abs() < 1e-9);
    let pct = atb.fg_pct.expect("attempted");
    assert!((pct - 4.0 / 9.0).abs() < 1e-9);

    let mid = zone(&rows, "Mid-Range");
    assert_eq!(mid.pts, Some(2.0));
}

#[test]
fn backcourt_never_appears() {
    let table = fixture_table();
    for name in ["LeBron James", "Cold Hands", "Messy Feed"] {
        let rows = zones_for_player(name, &table);
        assert!(rows.iter().all(|z| z.zone != "Backcourt"), "{name}");
    }
}

#[test]
fn shot_shares_sum_to_one_when_attempts_exist() {
    let table = fixture_table();
    let rows = zones_for_player("LeBron James", &table);
    let total: f64 = rows.iter().filter_map(|z| z.shot_share).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn zero_total_attempts_leave_all_shares_undefined() {
    let table = fixture_table();
    let rows = zones_for_player("Cold Hands", &table);
    assert!(!rows.is_empty());
    for z in &rows {
        assert_eq!(z.shot_share, None, "{}", z.zone);
        assert_eq!(z.fg_pct, None, "{}", z.zone);
        assert_eq!(z.pts_per_shot, None, "{}", z.zone);
    }
}

#[test]
fn recomputes_percentage_instead_of_trusting_source() {
    // Raw FG_PCT says 0.9 but 1-of-4 is really 25%; a raw 0.0 with zero
    // attempts must stay undefined rather than read as "shot 0%".
    let table = small_table(
        &[
            "PLAYER_NAME",
            "Mid-Range_FGM",
            "Mid-Range_FGA",
            "Mid-Range_FG_PCT",
            "Left Corner 3_FGM",
            "Left Corner 3_FGA",
            "Left Corner 3_FG_PCT",
        ],
        vec![vec![
            Cell::Text("Test Player".to_string()),
            Cell::Num(1.0),
            Cell::Num(4.0),
            Cell::Num(0.9),
            Cell::Num(0.0),
            Cell::Num(0.0),
            Cell::Num(0.0),
        ]],
    );
    let rows = zones_for_player("Test Player", &table);

    let mid = zone(&rows, "Mid-Range");
    assert_eq!(mid.fg_pct, Some(0.25));
    let corner = zone(&rows, "Left Corner 3");
    assert_eq!(corner.fg_pct, None);
}

#[test]
fn sums_split_zone_sub_ranges() {
    // Upstream occasionally splits one zone across sub-range columns;
    // makes and attempts accumulate under the shared prefix.
    let table = small_table(
        &[
            "PLAYER_NAME",
            "Mid-Range_FGM",
            "Mid-Range_FGA",
            "Mid-Range_FGM",
            "Mid-Range_FGA",
        ],
        vec![vec![
            Cell::Text("Test Player".to_string()),
            Cell::Num(2.0),
            Cell::Num(5.0),
            Cell::Num(1.0),
            Cell::Num(3.0),
        ]],
    );
    let rows = zones_for_player("Test Player", &table);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fgm, Some(3.0));
    assert_eq!(rows[0].fga, Some(8.0));
    assert_eq!(rows[0].fg_pct, Some(3.0 / 8.0));
}

#[test]
fn duplicate_player_rows_use_the_first() {
    let table = small_table(
        &["PLAYER_NAME", "Mid-Range_FGM", "Mid-Range_FGA"],
        vec![
            vec![
                Cell::Text("Twin".to_string()),
                Cell::Num(2.0),
                Cell::Num(4.0),
            ],
            vec![
                Cell::Text("Twin".to_string()),
                Cell::Num(9.0),
                Cell::Num(9.0),
            ],
        ],
    );
    let rows = zones_for_player("Twin", &table);
    assert_eq!(rows[0].fgm, Some(2.0));
    assert_eq!(rows[0].fga, Some(4.0));
}

#[test]
fn absent_player_or_missing_name_column_yield_empty() {
    let table = fixture_table();
    assert!(zones_for_player("Nobody Here", &table).is_empty());

    let no_name = small_table(
        &["Mid-Range_FGM", "Mid-Range_FGA"],
        vec![vec![Cell::Num(1.0), Cell::Num(2.0)]],
    );
    assert!(zones_for_player("Anyone", &no_name).is_empty());

    let empty = WideZoneTable::default();
    assert!(zones_for_player("Anyone", &empty).is_empty());
}

#[test]
fn idempotent_for_identical_inputs() {
    let table = fixture_table();
    let first = zones_for_player("LeBron James", &table);
    let second = zones_for_player("LeBron James", &table);
    assert_eq!(first, second);
}

#[test]
fn free_throw_row_uses_per_game_rates() {
    let player = PlayerRecord {
        player_id: Some(1),
        name: "FT Shooter".to_string(),
        team: "BOS".to_string(),
        gp: Some(50.0),
        min_per_game: Some(30.0),
        pts_per_game: Some(20.0),
        fg_pct: Some(0.45),
        fg3_pct: Some(0.38),
        ft_pct: Some(0.75),
        ftm: Some(150.0),
        fta: Some(200.0),
    };
    let row = free_throw_row(&player);
    assert_eq!(row.zone, "Free Throw");
    assert_eq!(row.fgm, Some(3.0));
    assert_eq!(row.fga, Some(4.0));
    assert_eq!(row.fg_pct, Some(0.75));
    // Free throws are not field-goal attempts.
    assert_eq!(row.pts, None);
    assert_eq!(row.pts_per_shot, None);
    assert_eq!(row.shot_share, None);
}

#[test]
fn free_throw_row_with_zero_games_is_undefined() {
    let player = PlayerRecord {
        player_id: None,
        name: "No Games".to_string(),
        team: "ATL".to_string(),
        gp: Some(0.0),
        min_per_game: None,
        pts_per_game: None,
        fg_pct: None,
        fg3_pct: None,
        ft_pct: None,
        ftm: Some(0.0),
        fta: Some(0.0),
    };
    let row = free_throw_row(&player);
    assert_eq!(row.fgm, None);
    assert_eq!(row.fga, None);
    assert_eq!(row.fg_pct, None);
}
