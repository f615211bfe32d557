pub mod assets;
pub mod cache;
pub mod config;
pub mod http_client;
pub mod player_stats;
pub mod retry;
pub mod season;
pub mod state;
pub mod stats_api;
pub mod zones;
