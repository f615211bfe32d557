use std::env;
use std::time::Duration;

pub const SEASON_TYPE: &str = "Regular Season";
pub const DEFAULT_FALLBACK_SEASON: &str = "2025-26";

/// Runtime knobs for the upstream fetch path. Every field has an
/// `NBA_*` environment override; defaults match what stats.nba.com
/// tolerates without throttling.
#[derive(Debug, Clone)]
pub struct Config {
    pub season_type: String,
    pub fallback_season: String,
    pub season_lookback: usize,
    pub retry_attempts: u32,
    pub retry_base_delay: Duration,
    pub pause_min_ms: u64,
    pub pause_max_ms: u64,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season_type: SEASON_TYPE.to_string(),
            fallback_season: DEFAULT_FALLBACK_SEASON.to_string(),
            season_lookback: 8,
            retry_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
            pause_min_ms: 250,
            pause_max_ms: 600,
            request_timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(60 * 30),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        let pause_min_ms = env_u64("NBA_PAUSE_MIN_MS", defaults.pause_min_ms);
        let pause_max_ms = env_u64("NBA_PAUSE_MAX_MS", defaults.pause_max_ms).max(pause_min_ms);
        Self {
            season_type: env::var("NBA_SEASON_TYPE")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.season_type),
            fallback_season: env::var("NBA_FALLBACK_SEASON")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or(defaults.fallback_season),
            season_lookback: env_u64("NBA_SEASON_LOOKBACK", defaults.season_lookback as u64)
                .clamp(1, 30) as usize,
            retry_attempts: env_u64("NBA_RETRY_ATTEMPTS", defaults.retry_attempts as u64)
                .clamp(1, 10) as u32,
            retry_base_delay: Duration::from_millis(
                env_u64(
                    "NBA_RETRY_BASE_MS",
                    defaults.retry_base_delay.as_millis() as u64,
                )
                .max(1),
            ),
            pause_min_ms,
            pause_max_ms,
            request_timeout: Duration::from_secs(
                env_u64(
                    "NBA_REQUEST_TIMEOUT_SECS",
                    defaults.request_timeout.as_secs(),
                )
                .clamp(1, 120),
            ),
            cache_ttl: Duration::from_secs(env_u64(
                "NBA_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_variants() {
        let config = Config::default();
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.cache_ttl, Duration::from_secs(1800));
        assert_eq!(config.fallback_season, "2025-26");
        assert!(config.pause_min_ms <= config.pause_max_ms);
    }
}
