use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::best_thirds::calculate_best_thirds;
use crate::espn::{STATUS_FINAL, ScoreboardMap, scoreboard_key};
use crate::feed::FeedConfig;
use crate::fixtures::{
    DRAW_WINNER, Fixture, LiveResult, LiveResults, roster_groups, wc_fixtures,
};
use crate::gates::clock_now;
use crate::names::canonical_name;
use crate::pairings::{pairings_for_key, qualifying_thirds_key};
use crate::placeholder::is_placeholder;
use crate::resolver::{Mode, Resolver};
use crate::simulator::{PendingScore, SimulatedScores, simulate_with_fixtures};
use crate::standings::Group;
use crate::state::{Delta, ProviderCommand};

const MAX_GOALS: u32 = 4;

/// Offline tournament that plays fixtures one at a time in match-number order.
#[derive(Debug, Clone)]
pub struct FakeTournament {
    seeds: Vec<Group>,
    groups: Vec<Group>,
    scores: SimulatedScores,
    knockout: LiveResults,
    scoreboard: ScoreboardMap,
    next_idx: usize,
    now: DateTime<Utc>,
}

impl FakeTournament {
    pub fn new(now: DateTime<Utc>) -> Self {
        let seeds = roster_groups();
        Self {
            groups: seeds.clone(),
            seeds,
            scores: SimulatedScores::new(),
            knockout: LiveResults::new(),
            scoreboard: ScoreboardMap::new(),
            next_idx: 0,
            now,
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn scoreboard(&self) -> &ScoreboardMap {
        &self.scoreboard
    }

    pub fn played(&self) -> usize {
        self.next_idx
    }

    pub fn finished(&self) -> bool {
        self.next_idx >= wc_fixtures().len()
    }

    /// Plays the next fixture. Returns `false` once the bracket is exhausted or the next
    /// knockout tie still has an unresolved side.
    pub fn play_next(&mut self, rng: &mut impl Rng) -> bool {
        let Some(fixture) = wc_fixtures().get(self.next_idx) else {
            return false;
        };
        let (home, away) = self.resolve_sides(fixture);
        if is_placeholder(&home) || is_placeholder(&away) {
            return false;
        }

        let home_goals = rng.gen_range(0..=MAX_GOALS);
        let away_goals = rng.gen_range(0..=MAX_GOALS);

        let winner = if fixture.is_group_stage() {
            self.scores.insert(
                fixture.match_number,
                PendingScore::new(home_goals.to_string(), away_goals.to_string()),
            );
            self.groups = simulate_with_fixtures(
                &self.seeds,
                &self.scores,
                &HashMap::new(),
                wc_fixtures(),
            );
            match home_goals.cmp(&away_goals) {
                std::cmp::Ordering::Greater => home.clone(),
                std::cmp::Ordering::Less => away.clone(),
                std::cmp::Ordering::Equal => DRAW_WINNER.to_string(),
            }
        } else if home_goals > away_goals || (home_goals == away_goals && rng.gen_bool(0.5)) {
            home.clone()
        } else {
            away.clone()
        };

        let result = LiveResult {
            winner: Some(winner),
            status: STATUS_FINAL.to_string(),
            score_str: format!("{home_goals} - {away_goals}"),
            minute: Some("90'".to_string()),
        };
        if !fixture.is_group_stage() {
            self.knockout.insert(fixture.match_number, result.clone());
        }
        self.scoreboard
            .insert(scoreboard_key(&away, &home), result.clone());
        self.scoreboard.insert(scoreboard_key(&home, &away), result);
        self.next_idx += 1;
        true
    }

    fn resolve_sides(&self, fixture: &Fixture) -> (String, String) {
        let best_thirds = calculate_best_thirds(&self.groups, self.now);
        let pairings = pairings_for_key(&qualifying_thirds_key(&best_thirds));
        let overrides = HashMap::new();
        let resolver = Resolver::new(&self.groups, wc_fixtures(), &self.knockout, self.now)
            .with_pairings(Some(&pairings))
            .with_mode(Mode::Simulation(&overrides));
        let resolved = resolver.resolve_fixture(fixture);
        (
            canonical_name(&resolved.home).to_string(),
            canonical_name(&resolved.away).to_string(),
        )
    }
}

pub fn spawn_fake_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>, cfg: FeedConfig) {
    thread::spawn(move || {
        let mut rng = match cfg.fake_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = clock_now();
        let mut tournament = FakeTournament::new(now);
        while tournament.played() < cfg.fake_played && tournament.play_next(&mut rng) {}

        let _ = tx.send(Delta::SetClock(now));
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Offline feed: {} fixtures played",
            tournament.played()
        )));
        if !publish(&tx, &tournament) {
            return;
        }

        let mut last_tick = Instant::now();
        loop {
            thread::sleep(Duration::from_millis(900));

            let mut tick = last_tick.elapsed() >= cfg.poll_interval;
            match cmd_rx.try_recv() {
                Ok(ProviderCommand::Refresh) => tick = true,
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }
            if !tick || tournament.finished() {
                continue;
            }
            last_tick = Instant::now();

            if tournament.play_next(&mut rng) && !publish(&tx, &tournament) {
                break;
            }
        }
    });
}

fn publish(tx: &Sender<Delta>, tournament: &FakeTournament) -> bool {
    tx.send(Delta::SetGroups(tournament.groups().to_vec())).is_ok()
        && tx
            .send(Delta::SetScoreboard(tournament.scoreboard().clone()))
            .is_ok()
}
