use std::thread;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;

/// Uniform random sleep applied before every upstream call, first attempt
/// included. Keeps the request cadence below stats.nba.com's throttling
/// threshold; distinct from the retry backoff.
pub fn politeness_pause(min_ms: u64, max_ms: u64) {
    let upper = max_ms.max(min_ms);
    let ms = if upper == min_ms {
        min_ms
    } else {
        rand::thread_rng().gen_range(min_ms..=upper)
    };
    thread::sleep(Duration::from_millis(ms));
}

/// Runs `op` up to `max_attempts` times with linear backoff
/// (`base_delay` x attempt number) between failures. The last error is
/// surfaced once attempts are exhausted.
pub fn with_retry<T, F>(mut op: F, max_attempts: u32, base_delay: Duration) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    with_retry_using(&mut op, max_attempts, base_delay, thread::sleep)
}

/// Backoff sleeps go through `sleep` so tests can count them.
pub fn with_retry_using<T, F, S>(
    op: &mut F,
    max_attempts: u32,
    base_delay: Duration,
    mut sleep: S,
) -> Result<T>
where
    F: FnMut() -> Result<T>,
    S: FnMut(Duration),
{
    let attempts = max_attempts.max(1);
    let mut last_err = None;
    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) => {
                last_err = Some(err);
                if attempt < attempts {
                    sleep(base_delay * attempt);
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("retry loop ran zero attempts")))
}
