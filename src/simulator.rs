use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::best_thirds::calculate_best_thirds;
use crate::fixtures::{Fixture, LiveResult, LiveResults, PLAYOFF_CANDIDATES, group_stage_fixtures};
use crate::gates::playoff_setup_open;
use crate::names::canonical_name;
use crate::pairings::{R32Pairings, pairings_for_key, qualifying_thirds_key};
use crate::resolver::{Mode, ResolvedFixture, Resolver};
use crate::standings::{Group, StandingEntry};

pub const SIM_SCORE_LABEL: &str = "Sim";
const RANDOM_MAX_GOALS: u32 = 4;

/// A score pair as typed; either side may still be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingScore {
    #[serde(default, deserialize_with = "string_or_number")]
    pub home: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub away: String,
}

impl PendingScore {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Both sides as goals, or `None` while the prediction is incomplete or malformed.
    /// Counts beyond `u16::MAX` are malformed.
    pub fn goals(&self) -> Option<(u16, u16)> {
        let home = self.home.trim().parse::<u16>().ok()?;
        let away = self.away.trim().parse::<u16>().ok()?;
        Some((home, away))
    }
}

pub type SimulatedScores = BTreeMap<u32, PendingScore>;
pub type PlayoffMapping = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Recomputes group tables from predicted scores over the built-in group fixtures.
pub fn simulate(
    live_groups: &[Group],
    scores: &SimulatedScores,
    overrides: &PlayoffMapping,
) -> Vec<Group> {
    simulate_with_fixtures(live_groups, scores, overrides, group_stage_fixtures())
}

/// Builds a fresh set of tables from `live_groups`: overrides renamed in, every derived stat
/// rebuilt from the complete scores only, then re-sorted and re-ranked.
pub fn simulate_with_fixtures(
    live_groups: &[Group],
    scores: &SimulatedScores,
    overrides: &PlayoffMapping,
    fixtures: &[Fixture],
) -> Vec<Group> {
    let mut groups: Vec<Group> = live_groups
        .iter()
        .map(|group| Group {
            name: group.name.clone(),
            entries: group
                .entries
                .iter()
                .map(|entry| reset_entry(entry, overrides))
                .collect(),
        })
        .collect();

    for fixture in fixtures.iter().filter(|f| f.is_group_stage()) {
        let Some((home_goals, away_goals)) = scores
            .get(&fixture.match_number)
            .and_then(PendingScore::goals)
        else {
            continue;
        };
        let home = effective_name(&fixture.home_team, overrides);
        let away = effective_name(&fixture.away_team, overrides);
        let (Some(h), Some(a)) = (locate(&groups, home), locate(&groups, away)) else {
            continue;
        };
        groups[h.0].entries[h.1].record_result(home_goals, away_goals);
        groups[a.0].entries[a.1].record_result(away_goals, home_goals);
    }

    for group in &mut groups {
        group.rerank();
    }
    groups
}

/// Fills every group fixture with a random 0..=4 score pair.
pub fn random_scores(fixtures: &[Fixture], rng: &mut impl Rng) -> SimulatedScores {
    fixtures
        .iter()
        .filter(|f| f.is_group_stage())
        .map(|f| {
            let home = rng.gen_range(0..=RANDOM_MAX_GOALS);
            let away = rng.gen_range(0..=RANDOM_MAX_GOALS);
            (f.match_number, PendingScore::new(home.to_string(), away.to_string()))
        })
        .collect()
}

/// Playoff placeholders present in the groups that still need a simulated winner.
pub fn unresolved_playoff_slots(groups: &[Group]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for entry in groups.iter().flat_map(|g| &g.entries) {
        let name = &entry.team.name;
        let is_slot = PLAYOFF_CANDIDATES.iter().any(|(slot, _)| *slot == name.as_str());
        if is_slot && !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

fn reset_entry(entry: &StandingEntry, overrides: &PlayoffMapping) -> StandingEntry {
    let mut out = entry.clone();
    if let Some(team) = overrides.get(&out.team.name) {
        out.team.name = team.clone();
        out.team.display_name = team.clone();
    }
    out.reset_derived();
    out
}

fn effective_name<'a>(raw: &'a str, overrides: &'a PlayoffMapping) -> &'a str {
    let normalized = canonical_name(raw);
    overrides
        .get(normalized)
        .map(String::as_str)
        .unwrap_or(normalized)
}

fn locate(groups: &[Group], name: &str) -> Option<(usize, usize)> {
    groups.iter().enumerate().find_map(|(gi, group)| {
        group
            .entries
            .iter()
            .position(|e| e.matches_name(name))
            .map(|ei| (gi, ei))
    })
}

/// Everything the simulator shows, computed the same way as the live view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub groups: Vec<Group>,
    pub best_thirds: Vec<StandingEntry>,
    pub qualifying_key: String,
    pub pairings: R32Pairings,
    pub bracket: Vec<ResolvedFixture>,
}

/// What-if state: playoff winners, predicted group scores and knockout picks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorSession {
    #[serde(default)]
    pub playoff_mapping: PlayoffMapping,
    #[serde(default)]
    pub scores: SimulatedScores,
    #[serde(default)]
    pub picks: LiveResults,
}

impl SimulatorSession {
    pub fn select_playoff_winner(&mut self, placeholder: &str, team: &str) {
        self.playoff_mapping
            .insert(placeholder.to_string(), team.to_string());
    }

    /// Stores one side of a prediction exactly as typed.
    pub fn set_score(&mut self, match_number: u32, side: Side, value: &str) {
        let score = self.scores.entry(match_number).or_default();
        match side {
            Side::Home => score.home = value.to_string(),
            Side::Away => score.away = value.to_string(),
        }
    }

    pub fn pick_winner(&mut self, match_number: u32, team: &str) {
        self.picks.insert(
            match_number,
            LiveResult {
                winner: Some(team.to_string()),
                status: String::new(),
                score_str: SIM_SCORE_LABEL.to_string(),
                minute: None,
            },
        );
    }

    pub fn randomize_scores(&mut self, fixtures: &[Fixture], rng: &mut impl Rng) {
        self.scores.extend(random_scores(fixtures, rng));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn setup_open(now: DateTime<Utc>) -> bool {
        playoff_setup_open(now)
    }

    pub fn snapshot(
        &self,
        live_groups: &[Group],
        fixtures: &[Fixture],
        now: DateTime<Utc>,
    ) -> SimulationSnapshot {
        let groups = simulate_with_fixtures(live_groups, &self.scores, &self.playoff_mapping, fixtures);
        let best_thirds = calculate_best_thirds(&groups, now);
        let qualifying_key = qualifying_thirds_key(&best_thirds);
        let pairings = pairings_for_key(&qualifying_key);
        let bracket = Resolver::new(&groups, fixtures, &self.picks, now)
            .with_pairings(Some(&pairings))
            .with_mode(Mode::Simulation(&self.playoff_mapping))
            .resolve_bracket();
        SimulationSnapshot {
            groups,
            best_thirds,
            qualifying_key,
            pairings,
            bracket,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
