use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Headers stats.nba.com expects before it will serve a non-browser caller.
pub const NBA_HEADERS: [(&str, &str); 4] = [
    ("User-Agent", "Mozilla/5.0"),
    ("Referer", "https://www.nba.com/"),
    ("Origin", "https://www.nba.com"),
    ("Accept-Language", "en-US,en;q=0.9"),
];

/// Process-wide blocking client. The timeout of the first caller wins;
/// all loaders share one Config so this never differs in practice.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")
    })
}
