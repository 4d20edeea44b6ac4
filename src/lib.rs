pub mod best_thirds;
pub mod espn;
pub mod fake_feed;
pub mod feed;
pub mod fixtures;
pub mod gates;
pub mod http_client;
pub mod names;
pub mod pairings;
pub mod placeholder;
pub mod report;
pub mod resolver;
pub mod simulator;
pub mod standings;
pub mod state;
