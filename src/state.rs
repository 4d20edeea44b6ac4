use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::best_thirds::{calculate_best_thirds, placeholder_thirds};
use crate::espn::{ScoreboardMap, map_results_to_fixtures};
use crate::fixtures::{Fixture, LiveResults, wc_fixtures};
use crate::pairings::{R32Pairings, pairings_for_key, qualifying_thirds_key};
use crate::resolver::{ResolvedFixture, Resolver};
use crate::simulator::{SimulationSnapshot, SimulatorSession, unresolved_playoff_slots};
use crate::standings::{Group, StandingEntry, has_games_started};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub enum Delta {
    SetGroups(Vec<Group>),
    SetScoreboard(ScoreboardMap),
    SetClock(DateTime<Utc>),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Refresh,
}

/// Live tournament view plus the simulator's what-if session.
#[derive(Debug, Clone)]
pub struct TrackerState {
    pub groups: Vec<Group>,
    pub fixtures: Vec<Fixture>,
    pub scoreboard: ScoreboardMap,
    pub live_results: LiveResults,
    pub best_thirds: Vec<StandingEntry>,
    pub qualifying_key: Option<String>,
    /// Set only once a group game has been played.
    pub pairings: Option<R32Pairings>,
    pub games_started: bool,
    pub now: DateTime<Utc>,
    pub simulator: SimulatorSession,
    pub logs: VecDeque<String>,
}

impl TrackerState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            groups: Vec::new(),
            fixtures: wc_fixtures().to_vec(),
            scoreboard: ScoreboardMap::new(),
            live_results: LiveResults::new(),
            best_thirds: placeholder_thirds(),
            qualifying_key: None,
            pairings: None,
            games_started: false,
            now,
            simulator: SimulatorSession::default(),
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.groups, &self.fixtures, &self.live_results, self.now)
            .with_pairings(self.pairings.as_ref())
    }

    pub fn bracket(&self) -> Vec<ResolvedFixture> {
        self.resolver().resolve_bracket()
    }

    pub fn simulation_snapshot(&self) -> SimulationSnapshot {
        self.simulator
            .snapshot(&self.groups, &self.fixtures, self.now)
    }

    pub fn unresolved_playoff_slots(&self) -> Vec<String> {
        unresolved_playoff_slots(&self.groups)
    }

    fn recompute_tables(&mut self) {
        self.games_started = has_games_started(&self.groups);
        self.best_thirds = calculate_best_thirds(&self.groups, self.now);
        if self.games_started {
            let key = qualifying_thirds_key(&self.best_thirds);
            self.pairings = Some(pairings_for_key(&key));
            self.qualifying_key = Some(key);
        } else {
            self.pairings = None;
            self.qualifying_key = None;
        }
    }

    fn remap_results(&mut self) {
        self.live_results = map_results_to_fixtures(
            &self.fixtures,
            &self.scoreboard,
            &self.groups,
            self.pairings.as_ref(),
            self.now,
        );
    }
}

pub fn apply_delta(state: &mut TrackerState, delta: Delta) {
    match delta {
        Delta::SetGroups(groups) => {
            let count = groups.len();
            state.groups = groups;
            state.recompute_tables();
            state.remap_results();
            match &state.qualifying_key {
                Some(key) => state.push_log(format!("[INFO] Standings: {count} groups, key {key}")),
                None => state.push_log(format!("[INFO] Standings: {count} groups, no games yet")),
            }
        }
        Delta::SetScoreboard(scoreboard) => {
            state.scoreboard = scoreboard;
            state.remap_results();
            let mapped = state.live_results.len();
            state.push_log(format!("[INFO] Scoreboard: {mapped} fixtures matched"));
        }
        Delta::SetClock(now) => {
            state.now = now;
            state.recompute_tables();
            state.remap_results();
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
