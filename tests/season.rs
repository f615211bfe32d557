use anyhow::anyhow;
use chrono::NaiveDate;

use nbashot_terminal::season::{
    candidate_seasons_latest_first, detect_latest_season, season_start_year, season_str_from_year,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn season_string_zero_pads_successor_year() {
    assert_eq!(season_str_from_year(2025), "2025-26");
    assert_eq!(season_str_from_year(1999), "1999-00");
    assert_eq!(season_str_from_year(2009), "2009-10");
}

#[test]
fn october_starts_the_new_season() {
    assert_eq!(season_start_year(date(2026, 10, 1)), 2026);
    assert_eq!(season_start_year(date(2026, 9, 30)), 2025);
    assert_eq!(season_start_year(date(2026, 1, 15)), 2025);
    assert_eq!(season_start_year(date(2026, 12, 31)), 2026);
}

#[test]
fn candidates_run_most_recent_first() {
    let candidates = candidate_seasons_latest_first(date(2026, 8, 30), 3);
    assert_eq!(candidates, ["2025-26", "2024-25", "2023-24"]);
}

#[test]
fn detection_returns_first_season_with_rows() {
    let mut probed = Vec::new();
    let season = detect_latest_season(
        date(2026, 8, 30),
        8,
        |candidate| {
            probed.push(candidate.to_string());
            match candidate {
                "2025-26" => Err(anyhow!("timeout")),
                "2024-25" => Ok(0),
                "2023-24" => Ok(450),
                other => panic!("should have stopped before {other}"),
            }
        },
        "1900-01",
    );
    assert_eq!(season, "2023-24");
    // Errors and empty results both advance the probe, nothing surfaces.
    assert_eq!(probed, ["2025-26", "2024-25", "2023-24"]);
}

#[test]
fn detection_falls_back_when_every_probe_fails() {
    let mut calls = 0;
    let season = detect_latest_season(
        date(2026, 8, 30),
        4,
        |_| {
            calls += 1;
            Err(anyhow!("blocked"))
        },
        "2025-26",
    );
    assert_eq!(season, "2025-26");
    assert_eq!(calls, 4);
}

#[test]
fn detection_falls_back_on_all_empty_results() {
    let season = detect_latest_season(date(2026, 8, 30), 3, |_| Ok(0), "2020-21");
    assert_eq!(season, "2020-21");
}
