use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use wc26_bracket::feed::{self, FeedConfig, FeedSource};
use wc26_bracket::state::{Delta, ProviderCommand, TrackerState, apply_delta};
use wc26_bracket::{fake_feed, gates, report};

const FIRST_DATA_TIMEOUT: Duration = Duration::from_secs(45);
const LOG_TAIL: usize = 12;

#[derive(Debug, Default)]
struct Args {
    watch: bool,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--watch" => args.watch = true,
            "--json" => args.json = true,
            other => bail!("unknown argument: {other} (expected --watch or --json)"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = parse_args()?;
    let cfg = FeedConfig::from_env();

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    match cfg.source {
        FeedSource::Espn => feed::spawn_provider(tx, cmd_rx, cfg.clone()),
        FeedSource::Fake => fake_feed::spawn_fake_provider(tx, cmd_rx, cfg.clone()),
    }

    let mut state = TrackerState::new(gates::clock_now());
    let (mut have_groups, mut have_scoreboard) = (false, false);
    let started = Instant::now();
    while !(have_groups && have_scoreboard) {
        let remaining = FIRST_DATA_TIMEOUT
            .checked_sub(started.elapsed())
            .context("timed out waiting for the first standings and scoreboard")?;
        let delta = rx
            .recv_timeout(remaining)
            .context("feed stopped before delivering data")?;
        have_groups |= matches!(delta, Delta::SetGroups(_));
        have_scoreboard |= matches!(delta, Delta::SetScoreboard(_));
        apply_delta(&mut state, delta);
    }
    print_report(&state, &args)?;

    if !args.watch {
        return Ok(());
    }
    let _ = cmd_tx.send(ProviderCommand::Refresh);
    while let Ok(delta) = rx.recv() {
        let redraw = matches!(delta, Delta::SetScoreboard(_));
        apply_delta(&mut state, delta);
        if redraw {
            print_report(&state, &args)?;
        }
    }
    Ok(())
}

fn print_report(state: &TrackerState, args: &Args) -> Result<()> {
    if args.json {
        let bracket = state.bracket();
        let body = serde_json::to_string_pretty(&bracket).context("failed to encode bracket")?;
        println!("{body}");
    } else {
        println!("{}", report::render_state(state));
    }
    let skip = state.logs.len().saturating_sub(LOG_TAIL);
    for line in state.logs.iter().skip(skip) {
        eprintln!("{line}");
    }
    Ok(())
}
