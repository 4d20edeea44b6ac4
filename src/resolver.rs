use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fixtures::{Fixture, LiveResult, LiveResults, find_fixture};
use crate::gates::bracket_disclosed;
use crate::pairings::R32Pairings;
use crate::placeholder::Placeholder;
use crate::standings::{Group, StandingEntry, StatKind, find_group};

/// Games a team must have finished before its provisional group rank is shown live.
const MIN_GAMES_FOR_REVEAL: i32 = 2;
// Fixture data is acyclic; the cap only protects against hand-edited fixture lists.
const MAX_DEPTH: u8 = 16;

#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Real standings: every wall-clock gate applies.
    Live,
    /// Hypothetical data: gates are bypassed and the overrides win first.
    Simulation(&'a HashMap<String, String>),
}

impl Mode<'_> {
    pub fn is_simulation(&self) -> bool {
        matches!(self, Mode::Simulation(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFixture {
    pub match_number: u32,
    pub round: String,
    pub home: String,
    pub away: String,
    pub result: Option<LiveResult>,
}

/// Turns symbolic team references into display names against one snapshot of the tournament.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    groups: &'a [Group],
    fixtures: &'a [Fixture],
    results: &'a LiveResults,
    pairings: Option<&'a R32Pairings>,
    mode: Mode<'a>,
    now: DateTime<Utc>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        groups: &'a [Group],
        fixtures: &'a [Fixture],
        results: &'a LiveResults,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            groups,
            fixtures,
            results,
            pairings: None,
            mode: Mode::Live,
            now,
        }
    }

    pub fn with_pairings(mut self, pairings: Option<&'a R32Pairings>) -> Self {
        self.pairings = pairings;
        self
    }

    pub fn with_mode(mut self, mode: Mode<'a>) -> Self {
        self.mode = mode;
        self
    }

    /// Resolves `code`; `home_context` is the home side's raw code when `code` is an away slot.
    pub fn resolve(&self, code: &str, home_context: Option<&str>) -> String {
        self.resolve_at(code, home_context, 0)
    }

    pub fn resolve_fixture(&self, fixture: &Fixture) -> ResolvedFixture {
        ResolvedFixture {
            match_number: fixture.match_number,
            round: fixture.round.clone(),
            home: self.resolve(&fixture.home_team, None),
            away: self.resolve(&fixture.away_team, Some(&fixture.home_team)),
            result: self.results.get(&fixture.match_number).cloned(),
        }
    }

    /// Every knockout fixture, resolved in match-number order.
    pub fn resolve_bracket(&self) -> Vec<ResolvedFixture> {
        let mut out: Vec<ResolvedFixture> = self
            .fixtures
            .iter()
            .filter(|f| !f.is_group_stage())
            .map(|f| self.resolve_fixture(f))
            .collect();
        out.sort_by_key(|f| f.match_number);
        out
    }

    fn resolve_at(&self, code: &str, home_context: Option<&str>, depth: u8) -> String {
        if code.is_empty() {
            return "?".to_string();
        }
        if let Mode::Simulation(overrides) = self.mode
            && let Some(team) = overrides.get(code)
        {
            return team.clone();
        }
        if depth >= MAX_DEPTH {
            return code.to_string();
        }

        let resolved = match Placeholder::parse(code) {
            Placeholder::Literal(_) => None,
            Placeholder::MatchWinner(n) => self.winner_of(n).map(str::to_string),
            Placeholder::MatchLoser(n) => self.loser_of(n, depth),
            Placeholder::QualifyingThird(_) => self.qualifying_third(home_context, depth),
            Placeholder::GroupRank { rank, letter } => self.group_rank(rank, letter),
        };
        resolved.unwrap_or_else(|| code.to_string())
    }

    fn winner_of(&self, match_number: u32) -> Option<&str> {
        self.results.get(&match_number)?.decided_winner()
    }

    fn loser_of(&self, match_number: u32, depth: u8) -> Option<String> {
        let winner = self.winner_of(match_number)?;
        let fixture = find_fixture(self.fixtures, match_number)?;
        let home = self.resolve_at(&fixture.home_team, None, depth + 1);
        let away = self.resolve_at(&fixture.away_team, Some(&fixture.home_team), depth + 1);
        Some(if winner == home { away } else { home })
    }

    fn qualifying_third(&self, home_context: Option<&str>, depth: u8) -> Option<String> {
        let pairings = self.pairings?;
        let slot = home_context.filter(|s| !s.is_empty())?;
        if !self.gates_open() {
            return None;
        }
        let third_code = pairings.get(slot)?;
        Some(self.resolve_at(third_code, None, depth + 1))
    }

    fn group_rank(&self, rank: u8, letter: char) -> Option<String> {
        let group = find_group(self.groups, letter)?;
        let mut ordered: Vec<&StandingEntry> = group.entries.iter().collect();
        ordered.sort_by_key(|e| e.get_stat(StatKind::Rank));
        let entry = ordered.get(usize::from(rank).checked_sub(1)?)?;

        let ready = self.mode.is_simulation()
            || (bracket_disclosed(self.now)
                && entry.get_stat(StatKind::GamesPlayed) >= MIN_GAMES_FOR_REVEAL);
        ready.then(|| entry.team.name.clone())
    }

    fn gates_open(&self) -> bool {
        self.mode.is_simulation() || bracket_disclosed(self.now)
    }
}
