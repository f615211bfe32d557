use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::http_client::{http_client, NBA_HEADERS};
use crate::retry::{politeness_pause, with_retry};
use crate::zones::{Cell, WideZoneTable};

const STATS_BASE: &str = "https://stats.nba.com/stats";

/// Flat tabular payload: `resultSets[0].headers` + `rowSet`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn player_stats_url(season: &str, season_type: &str) -> String {
    format!(
        "{STATS_BASE}/leaguedashplayerstats?Season={}&SeasonType={}&PerMode=Totals&MeasureType=Base&LeagueID=00",
        encode_param(season),
        encode_param(season_type),
    )
}

pub fn shot_locations_url(season: &str, season_type: &str) -> String {
    format!(
        "{STATS_BASE}/leaguedashplayershotlocations?Season={}&SeasonType={}&PerMode=PerGame&DistanceRange=By+Zone&LeagueID=00",
        encode_param(season),
        encode_param(season_type),
    )
}

/// Per-player season totals. Pause + full fetch/parse cycle sits inside
/// the retry loop, matching the upstream call contract.
pub fn load_player_stats(config: &Config, season: &str) -> Result<RawTable> {
    let url = player_stats_url(season, &config.season_type);
    with_retry(
        || {
            let body = fetch_body(config, &url)?;
            parse_player_stats_json(&body)
        },
        config.retry_attempts,
        config.retry_base_delay,
    )
    .with_context(|| format!("loading player stats for {season}"))
}

/// Wide per-player shot-location table, flattened to `<Zone>_<Metric>`
/// columns.
pub fn load_shot_locations(config: &Config, season: &str) -> Result<WideZoneTable> {
    let url = shot_locations_url(season, &config.season_type);
    with_retry(
        || {
            let body = fetch_body(config, &url)?;
            parse_shot_locations_json(&body)
        },
        config.retry_attempts,
        config.retry_base_delay,
    )
    .with_context(|| format!("loading shot locations for {season}"))
}

/// Single-attempt row-count probe used by season detection. Failures are
/// the caller's signal to move on to the next candidate, so no retry.
pub fn probe_season_rows(config: &Config, season: &str) -> Result<usize> {
    let url = player_stats_url(season, &config.season_type);
    let body = fetch_body(config, &url)?;
    Ok(parse_player_stats_json(&body)?.len())
}

fn fetch_body(config: &Config, url: &str) -> Result<String> {
    politeness_pause(config.pause_min_ms, config.pause_max_ms);
    let client = http_client(config.request_timeout)?;
    let mut req = client.get(url);
    for (name, value) in NBA_HEADERS {
        req = req.header(name, value);
    }
    let resp = req.send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status}: {}", body.chars().take(200).collect::<String>()));
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    #[serde(default, rename = "resultSets")]
    result_sets: Vec<StatsResultSet>,
}

#[derive(Debug, Deserialize)]
struct StatsResultSet {
    headers: Vec<String>,
    #[serde(default, rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

pub fn parse_player_stats_json(raw: &str) -> Result<RawTable> {
    let envelope: StatsEnvelope =
        serde_json::from_str(raw.trim()).context("invalid stats json")?;
    let set = envelope
        .result_sets
        .into_iter()
        .next()
        .context("missing resultSets")?;
    Ok(RawTable {
        columns: set.headers,
        rows: set.row_set,
    })
}

/// Shot locations come back with a two-level header: a SHOT_CATEGORY row
/// naming the zones (with columnsToSkip/columnSpan) above a flat metric
/// row. Older mirrors serve a plain flat resultSets array; both shapes
/// land here.
pub fn parse_shot_locations_json(raw: &str) -> Result<WideZoneTable> {
    let root: Value = serde_json::from_str(raw.trim()).context("invalid shot location json")?;

    let result_sets = root.get("resultSets").context("missing resultSets")?;
    let set = match result_sets {
        Value::Array(_) => first_result_set(&root).context("empty resultSets")?,
        _ => result_sets,
    };

    let columns = match set.get("headers") {
        Some(Value::Array(headers)) if headers.first().map(Value::is_object).unwrap_or(false) => {
            flatten_two_level_headers(headers).context("malformed two-level headers")?
        }
        Some(headers) => string_array(Some(headers)).context("malformed headers")?,
        None => return Err(anyhow::anyhow!("missing headers")),
    };

    let rows = row_set(set)
        .into_iter()
        .map(|row| coerce_row(&columns, row))
        .collect();

    Ok(WideZoneTable { columns, rows })
}

fn flatten_two_level_headers(headers: &[Value]) -> Option<Vec<String>> {
    let zone_row = headers
        .iter()
        .find(|h| h.get("name").and_then(Value::as_str) == Some("SHOT_CATEGORY"))?;
    let flat_row = headers
        .iter()
        .find(|h| h.get("name").and_then(Value::as_str) != Some("SHOT_CATEGORY"))?;

    let zones = string_array(zone_row.get("columnNames"))?;
    let names = string_array(flat_row.get("columnNames"))?;
    let skip = zone_row
        .get("columnsToSkip")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;
    let span = zone_row
        .get("columnSpan")
        .and_then(Value::as_u64)
        .unwrap_or(3) as usize;
    if span == 0 || names.len() < skip {
        return None;
    }

    let mut columns: Vec<String> = names[..skip].to_vec();
    for (i, metric) in names[skip..].iter().enumerate() {
        match zones.get(i / span) {
            Some(zone) => columns.push(format!("{zone}_{metric}")),
            None => columns.push(metric.clone()),
        }
    }
    Some(columns)
}

/// Shot-metric columns are coerced to numbers at ingest; non-numeric
/// values become Empty, not zero.
fn coerce_row(columns: &[String], row: Vec<Value>) -> Vec<Cell> {
    columns
        .iter()
        .zip(row)
        .map(|(col, value)| {
            if is_shot_metric_column(col) {
                match crate::player_stats::coerce_numeric(&value) {
                    Some(n) => Cell::Num(n),
                    None => Cell::Empty,
                }
            } else {
                match value {
                    Value::String(s) => Cell::Text(s),
                    Value::Number(n) => n.as_f64().map(Cell::Num).unwrap_or(Cell::Empty),
                    _ => Cell::Empty,
                }
            }
        })
        .collect()
}

fn is_shot_metric_column(col: &str) -> bool {
    col.contains("FGM") || col.contains("FGA") || col.contains("FG_PCT")
}

fn first_result_set(root: &Value) -> Option<&Value> {
    root.get("resultSets").and_then(|sets| match sets {
        Value::Array(list) => list.first(),
        other => Some(other),
    })
}

fn row_set(set: &Value) -> Vec<Vec<Value>> {
    let Some(rows) = set.get("rowSet").and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|row| row.as_array().cloned())
        .collect()
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let list = value?.as_array()?;
    let mut out = Vec::with_capacity(list.len());
    for item in list {
        out.push(item.as_str()?.to_string());
    }
    Some(out)
}

fn encode_param(raw: &str) -> String {
    raw.replace(' ', "+")
}
