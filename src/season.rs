use anyhow::Result;
use chrono::{Datelike, NaiveDate};

/// "2025" -> "2025-26", "1999" -> "1999-00".
pub fn season_str_from_year(start_year: i32) -> String {
    format!("{start_year}-{:02}", (start_year + 1).rem_euclid(100))
}

/// NBA seasons tip off in October; before that the current calendar year
/// still belongs to last season.
pub fn season_start_year(today: NaiveDate) -> i32 {
    if today.month() >= 10 {
        today.year()
    } else {
        today.year() - 1
    }
}

pub fn candidate_seasons_latest_first(today: NaiveDate, lookback: usize) -> Vec<String> {
    let start_year = season_start_year(today);
    (0..lookback as i32)
        .map(|i| season_str_from_year(start_year - i))
        .collect()
}

/// Probes candidate seasons most-recent-first until one has data. `probe`
/// returns a row count for the season; errors and empty results both just
/// advance to the next candidate. Falls back to `fallback` when every
/// candidate comes up dry, so callers never see an error from here.
pub fn detect_latest_season<P>(
    today: NaiveDate,
    lookback: usize,
    mut probe: P,
    fallback: &str,
) -> String
where
    P: FnMut(&str) -> Result<usize>,
{
    for season in candidate_seasons_latest_first(today, lookback) {
        match probe(&season) {
            Ok(rows) if rows > 0 => return season,
            Ok(_) | Err(_) => continue,
        }
    }
    fallback.to_string()
}
