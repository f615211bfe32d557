use std::collections::HashMap;

use crate::player_stats::PlayerRecord;

pub const BACKCOURT_ZONE: &str = "Backcourt";
pub const FREE_THROW_ZONE: &str = "Free Throw";

const METRIC_SUFFIXES: [&str; 3] = ["_FGM", "_FGA", "_FG_PCT"];

/// One cell of the wide shot-location table. Numeric coercion happens at
/// parse time, so shot-metric columns hold `Num` or `Empty` only.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Num(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Per-player shot-location table with the upstream two-level
/// (zone, metric) columns flattened to `<Zone>_<Metric>` keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideZoneTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl WideZoneTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-zone shooting line for one player. Every stat is `None` when its
/// denominator is zero; a raw 0.0 would conflate "shot 0%" with "never
/// attempted".
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRow {
    pub zone: String,
    pub fgm: Option<f64>,
    pub fga: Option<f64>,
    pub fg_pct: Option<f64>,
    pub pts: Option<f64>,
    pub pts_per_shot: Option<f64>,
    pub shot_share: Option<f64>,
}

/// Rebuilds the long-form zone breakdown for one player from the wide
/// table. Missing player or missing name column yields an empty vec.
/// Pure transform; identical inputs give identical output.
pub fn zones_for_player(player_name: &str, table: &WideZoneTable) -> Vec<ZoneRow> {
    let Some(name_idx) = table.column_index("PLAYER_NAME") else {
        return Vec::new();
    };
    let Some(row) = table
        .rows
        .iter()
        .find(|row| row.get(name_idx).and_then(Cell::as_str) == Some(player_name))
    else {
        return Vec::new();
    };

    // Accumulate makes/attempts per zone prefix. Upstream sometimes splits
    // a zone into sub-ranges, so the same zone can appear under several
    // columns; raw FG_PCT columns are read past and recomputed below.
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (f64, f64)> = HashMap::new();
    for (idx, col) in table.columns.iter().enumerate() {
        let Some((zone, metric)) = split_zone_column(col) else {
            continue;
        };
        if metric == "FG_PCT" {
            continue;
        }
        let entry = totals.entry(zone.to_string()).or_insert_with(|| {
            order.push(zone.to_string());
            (0.0, 0.0)
        });
        let val = row.get(idx).and_then(Cell::as_f64);
        if let Some(val) = val {
            match metric {
                "FGM" => entry.0 += val,
                "FGA" => entry.1 += val,
                _ => {}
            }
        }
    }

    let mut zones: Vec<ZoneRow> = order
        .into_iter()
        .filter(|zone| zone != BACKCOURT_ZONE)
        .map(|zone| {
            let (fgm, fga) = totals[&zone];
            let fg_pct = if fga > 0.0 { Some(fgm / fga) } else { None };
            let pts_val = if zone.contains('3') { 3.0 } else { 2.0 };
            let pts = fgm * pts_val;
            let pts_per_shot = if fga > 0.0 { Some(pts / fga) } else { None };
            ZoneRow {
                zone,
                fgm: Some(fgm),
                fga: Some(fga),
                fg_pct,
                pts: Some(pts),
                pts_per_shot,
                shot_share: None,
            }
        })
        .collect();

    let total_fga: f64 = zones.iter().filter_map(|z| z.fga).sum();
    if total_fga > 0.0 {
        for zone in &mut zones {
            zone.shot_share = zone.fga.map(|fga| fga / total_fga);
        }
    }

    zones
}

/// Synthetic pseudo-zone carrying per-game free-throw rates. Free throws
/// are not field-goal attempts, so points, points-per-shot and shot share
/// stay undefined.
pub fn free_throw_row(player: &PlayerRecord) -> ZoneRow {
    let per_game = |total: Option<f64>| match (total, player.gp) {
        (Some(total), Some(gp)) if gp > 0.0 => Some(total / gp),
        _ => None,
    };
    ZoneRow {
        zone: FREE_THROW_ZONE.to_string(),
        fgm: per_game(player.ftm),
        fga: per_game(player.fta),
        fg_pct: player.ft_pct,
        pts: None,
        pts_per_shot: None,
        shot_share: None,
    }
}

fn split_zone_column(col: &str) -> Option<(&str, &str)> {
    for suffix in METRIC_SUFFIXES {
        if let Some(zone) = col.strip_suffix(suffix) {
            if !zone.is_empty() {
                return Some((zone, &suffix[1..]));
            }
        }
    }
    None
}

/// Cosmetic zone label for display: "In_The_Paint_Non_RA" style names
/// become "In The Paint (Non-RA)".
pub fn display_zone(zone: &str) -> String {
    zone.replace('_', " ").replace("Non RA", "(Non-RA)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_metric_suffixes() {
        assert_eq!(
            split_zone_column("Restricted Area_FGM"),
            Some(("Restricted Area", "FGM"))
        );
        assert_eq!(
            split_zone_column("Above the Break 3_FG_PCT"),
            Some(("Above the Break 3", "FG_PCT"))
        );
        assert_eq!(split_zone_column("PLAYER_NAME"), None);
        assert_eq!(split_zone_column("_FGA"), None);
    }

    #[test]
    fn display_zone_prettifies() {
        assert_eq!(display_zone("In_The_Paint_Non_RA"), "In The Paint (Non-RA)");
        assert_eq!(display_zone("Mid-Range"), "Mid-Range");
    }
}
