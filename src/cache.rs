use std::collections::HashMap;
use std::time::{Duration, Instant};

/// TTL cache keyed by season identifier. Seasons are immutable keys and
/// entries are replaced wholesale, so expiry and manual clear are the only
/// invalidation paths.
#[derive(Debug)]
pub struct SeasonCache<T> {
    ttl: Duration,
    entries: HashMap<String, (Instant, T)>,
}

impl<T: Clone> SeasonCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh hit clones out; expired entries are dropped lazily here.
    pub fn get(&mut self, season: &str) -> Option<T> {
        match self.entries.get(season) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                self.entries.remove(season);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, season: &str, value: T) {
        self.entries.insert(season.to_string(), (Instant::now(), value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
