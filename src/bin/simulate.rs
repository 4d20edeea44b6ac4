use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use wc26_bracket::fixtures::{playoff_candidates, roster_groups, wc_fixtures};
use wc26_bracket::gates::{clock_now, parse_instant};
use wc26_bracket::report::render_snapshot;
use wc26_bracket::simulator::{PlayoffMapping, SimulatedScores, SimulatorSession};
use wc26_bracket::standings::Group;

const DEFAULT_SCENARIO: &str = "tests/fixtures/sim_scenario.json";

/// What-if input: optional live groups (rosters otherwise), predicted scores, playoff winners
/// and knockout picks.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    #[serde(default)]
    groups: Option<Vec<Group>>,
    #[serde(default)]
    scores: SimulatedScores,
    #[serde(default)]
    overrides: PlayoffMapping,
    #[serde(default)]
    picks: BTreeMap<u32, String>,
    /// Seed for filling every group fixture with random scores before `scores` apply.
    #[serde(default)]
    random: Option<u64>,
    #[serde(default)]
    now: Option<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let json = args.iter().any(|a| a == "--json");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENARIO));

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| format!("invalid scenario {}", path.display()))?;

    let now = match scenario.now.as_deref() {
        Some(raw) => parse_instant(raw).ok_or_else(|| anyhow!("invalid `now` instant: {raw}"))?,
        None => clock_now(),
    };

    let mut session = SimulatorSession::default();
    if let Some(seed) = scenario.random {
        session.randomize_scores(wc_fixtures(), &mut StdRng::seed_from_u64(seed));
    }
    session.scores.extend(scenario.scores);
    for (placeholder, team) in &scenario.overrides {
        match playoff_candidates(placeholder) {
            Some(teams) if !teams.contains(&team.as_str()) => {
                eprintln!("[WARN] {team} is not a candidate for {placeholder}");
            }
            None => eprintln!("[WARN] {placeholder} is not a playoff slot"),
            Some(_) => {}
        }
        session.select_playoff_winner(placeholder, team);
    }
    for (match_number, team) in &scenario.picks {
        session.pick_winner(*match_number, team);
    }

    let live_groups = scenario.groups.unwrap_or_else(roster_groups);
    let snapshot = session.snapshot(&live_groups, wc_fixtures(), now);

    if json {
        let body = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        println!("{body}");
    } else {
        println!("{}", render_snapshot(&snapshot));
    }
    Ok(())
}
