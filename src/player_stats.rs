use serde_json::Value;

use crate::stats_api::RawTable;

/// One player-season line, already converted to per-game rates. Any stat
/// whose denominator was zero (or whose source cell was non-numeric) is
/// `None` rather than 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_id: Option<i64>,
    pub name: String,
    pub team: String,
    pub gp: Option<f64>,
    pub min_per_game: Option<f64>,
    pub pts_per_game: Option<f64>,
    pub fg_pct: Option<f64>,
    pub fg3_pct: Option<f64>,
    pub ft_pct: Option<f64>,
    // Season totals, kept for the free-throw pseudo-zone.
    pub ftm: Option<f64>,
    pub fta: Option<f64>,
}

/// Converts the raw season-totals table into per-game records, one output
/// record per input row in source order. Shooting percentages are derived
/// from makes/attempts here; upstream-reported percentage columns are
/// ignored.
pub fn records_from_table(table: &RawTable) -> Vec<PlayerRecord> {
    let col = |name: &str| table.column_index(name);
    let name_idx = col("PLAYER_NAME");
    let team_idx = col("TEAM_ABBREVIATION");
    let id_idx = col("PLAYER_ID");
    let gp_idx = col("GP");
    let min_idx = col("MIN");
    let pts_idx = col("PTS");
    let fgm_idx = col("FGM");
    let fga_idx = col("FGA");
    let fg3m_idx = col("FG3M");
    let fg3a_idx = col("FG3A");
    let ftm_idx = col("FTM");
    let fta_idx = col("FTA");

    table
        .rows
        .iter()
        .map(|row| {
            let num = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(coerce_numeric);
            let text = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };

            let gp = num(gp_idx);
            let ftm = num(ftm_idx);
            let fta = num(fta_idx);

            PlayerRecord {
                player_id: num(id_idx).map(|id| id as i64),
                name: text(name_idx),
                team: text(team_idx),
                gp,
                min_per_game: per_game(num(min_idx), gp),
                pts_per_game: per_game(num(pts_idx), gp),
                fg_pct: pct(num(fgm_idx), num(fga_idx)),
                fg3_pct: pct(num(fg3m_idx), num(fg3a_idx)),
                ft_pct: pct(ftm, fta),
                ftm,
                fta,
            }
        })
        .collect()
}

/// makes/attempts, undefined (not zero) when attempts are missing or 0.
pub fn pct(makes: Option<f64>, attempts: Option<f64>) -> Option<f64> {
    match (makes, attempts) {
        (Some(m), Some(a)) if a > 0.0 => Some(m / a),
        _ => None,
    }
}

fn per_game(total: Option<f64>, gp: Option<f64>) -> Option<f64> {
    match (total, gp) {
        (Some(total), Some(gp)) if gp > 0.0 => Some(total / gp),
        _ => None,
    }
}

/// Numbers pass through; numeric strings parse; everything else is
/// undefined.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
