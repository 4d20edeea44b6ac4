use std::env;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::espn::{
    DEFAULT_SCOREBOARD_URL, DEFAULT_STANDINGS_URL, fetch_scoreboard, fetch_standings,
};
use crate::gates::clock_now;
use crate::state::{Delta, ProviderCommand};

const DEFAULT_POLL_SECS: u64 = 60;
const MIN_POLL_SECS: u64 = 10;
const DEFAULT_SCOREBOARD_DATES: &str = "20260611-20260719";
const DEFAULT_FAKE_PLAYED: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Espn,
    Fake,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub source: FeedSource,
    pub poll_interval: Duration,
    pub standings_url: String,
    pub scoreboard_url: String,
    pub scoreboard_dates: Vec<String>,
    /// Fixtures the offline feed plays before its first publish.
    pub fake_played: usize,
    pub fake_seed: Option<u64>,
}

impl FeedConfig {
    pub fn from_env() -> Self {
        let source = match env::var("WC26_SOURCE")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "fake" | "offline" => FeedSource::Fake,
            _ => FeedSource::Espn,
        };
        let poll_secs = env::var("WC26_POLL_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_SECS)
            .max(MIN_POLL_SECS);
        let standings_url = env_url("ESPN_STANDINGS_URL", DEFAULT_STANDINGS_URL);
        let scoreboard_url = env_url("ESPN_SCOREBOARD_URL", DEFAULT_SCOREBOARD_URL);
        let fake_played = env::var("WC26_FAKE_PLAYED")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_FAKE_PLAYED)
            .min(104);
        let fake_seed = env::var("WC26_FAKE_SEED")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        let dates_raw = env::var("WC26_SCOREBOARD_DATES")
            .unwrap_or_else(|_| DEFAULT_SCOREBOARD_DATES.to_string());

        Self {
            source,
            poll_interval: Duration::from_secs(poll_secs),
            standings_url,
            scoreboard_url,
            scoreboard_dates: split_dates(&dates_raw),
            fake_played,
            fake_seed,
        }
    }
}

fn env_url(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Comma-separated `dates=` windows; blank input falls back to the whole tournament.
pub fn split_dates(raw: &str) -> Vec<String> {
    let dates: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if dates.is_empty() {
        vec![DEFAULT_SCOREBOARD_DATES.to_string()]
    } else {
        dates
    }
}

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>, cfg: FeedConfig) {
    thread::spawn(move || {
        let mut last_poll: Option<Instant> = None;

        loop {
            let mut refresh = last_poll.is_none_or(|at| at.elapsed() >= cfg.poll_interval);
            match cmd_rx.try_recv() {
                Ok(ProviderCommand::Refresh) => refresh = true,
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }

            if refresh {
                if let Err(err) = poll_once(&tx, &cfg) {
                    if tx
                        .send(Delta::Log(format!("[WARN] Feed error: {err:#}")))
                        .is_err()
                    {
                        break;
                    }
                }
                last_poll = Some(Instant::now());
            }

            thread::sleep(Duration::from_millis(900));
        }
    });
}

fn poll_once(tx: &Sender<Delta>, cfg: &FeedConfig) -> Result<()> {
    tx.send(Delta::SetClock(clock_now()))?;

    match fetch_standings(&cfg.standings_url) {
        Ok(groups) => tx.send(Delta::SetGroups(groups))?,
        Err(err) => tx.send(Delta::Log(format!("[WARN] Standings fetch error: {err:#}")))?,
    }

    let fetched = fetch_scoreboard(&cfg.scoreboard_url, &cfg.scoreboard_dates);
    for err in fetched.errors {
        tx.send(Delta::Log(format!("[WARN] Scoreboard fetch error: {err}")))?;
    }
    tx.send(Delta::SetScoreboard(fetched.results))?;
    Ok(())
}
