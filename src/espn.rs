use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::fixtures::{DRAW_WINNER, Fixture, LiveResult, LiveResults};
use crate::http_client::fetch_text;
use crate::names::canonical_name;
use crate::pairings::R32Pairings;
use crate::resolver::Resolver;
use crate::standings::{Group, StandingEntry};

pub const DEFAULT_STANDINGS_URL: &str =
    "https://site.web.api.espn.com/apis/v2/sports/soccer/fifa.world/standings";
pub const DEFAULT_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/soccer/fifa.world/scoreboard";

pub const STATUS_FINAL: &str = "STATUS_FINAL";

/// Scoreboard results keyed by `"Home|Away"`; every event is stored under both orientations.
pub type ScoreboardMap = HashMap<String, LiveResult>;

#[derive(Debug, Default)]
pub struct ScoreboardFetch {
    pub results: ScoreboardMap,
    pub errors: Vec<String>,
}

pub fn scoreboard_key(home: &str, away: &str) -> String {
    format!("{home}|{away}")
}

pub fn fetch_standings(url: &str) -> Result<Vec<Group>> {
    let body = fetch_text(url).context("standings request failed")?;
    parse_standings_json(&body)
}

/// Fetches every date window; a failing window is reported and skipped.
pub fn fetch_scoreboard(base_url: &str, dates: &[String]) -> ScoreboardFetch {
    let mut out = ScoreboardFetch::default();
    for date in dates {
        let url = format!("{base_url}?dates={date}");
        let parsed = fetch_text(&url).and_then(|body| parse_scoreboard_json(&body));
        match parsed {
            Ok(results) => out.results.extend(results),
            Err(err) => out.errors.push(format!("{date}: {err:#}")),
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    children: Vec<StandingsChild>,
}

#[derive(Debug, Deserialize)]
struct StandingsChild {
    name: String,
    #[serde(default)]
    standings: Option<StandingsBlock>,
}

#[derive(Debug, Deserialize)]
struct StandingsBlock {
    #[serde(default)]
    entries: Vec<StandingEntry>,
}

/// Grouped standings with team names rewritten to their canonical spelling.
///
/// An ungrouped payload carries no group letters, so it yields no groups.
pub fn parse_standings_json(raw: &str) -> Result<Vec<Group>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: StandingsResponse =
        serde_json::from_str(trimmed).context("invalid standings json")?;

    Ok(data
        .children
        .into_iter()
        .map(|child| {
            let entries = child
                .standings
                .map(|block| block.entries)
                .unwrap_or_default()
                .into_iter()
                .map(normalize_entry)
                .collect();
            Group {
                name: child.name,
                entries,
            }
        })
        .collect())
}

fn normalize_entry(mut entry: StandingEntry) -> StandingEntry {
    let name = canonical_name(&entry.team.name).to_string();
    entry.team.display_name = name.clone();
    entry.team.name = name;
    entry
}

#[derive(Debug, Deserialize)]
struct ScoreboardResponse {
    #[serde(default)]
    events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
    #[serde(default)]
    status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "displayClock", default)]
    display_clock: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    #[serde(default)]
    competitors: Vec<EspnCompetitor>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    #[serde(rename = "homeAway", default)]
    home_away: String,
    #[serde(default)]
    score: Option<serde_json::Value>,
    #[serde(default)]
    winner: Option<bool>,
    team: EspnTeam,
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    #[serde(rename = "displayName")]
    display_name: String,
}

pub fn parse_scoreboard_json(raw: &str) -> Result<ScoreboardMap> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ScoreboardMap::new());
    }
    let data: ScoreboardResponse =
        serde_json::from_str(trimmed).context("invalid scoreboard json")?;

    let mut out = ScoreboardMap::new();
    for event in data.events {
        let Some(competition) = event.competitions.first() else {
            continue;
        };
        let home = competition.competitors.iter().find(|c| c.home_away == "home");
        let away = competition.competitors.iter().find(|c| c.home_away == "away");
        let (Some(home), Some(away)) = (home, away) else {
            continue;
        };

        let home_name = canonical_name(&home.team.display_name).to_string();
        let away_name = canonical_name(&away.team.display_name).to_string();
        let home_score = score_text(home.score.as_ref());
        let away_score = score_text(away.score.as_ref());

        let status = event
            .status
            .as_ref()
            .and_then(|s| s.kind.as_ref())
            .map(|k| k.name.clone())
            .unwrap_or_default();
        let minute = event.status.as_ref().and_then(|s| s.display_clock.clone());

        let winner = (status == STATUS_FINAL).then(|| {
            final_winner(
                (home_name.as_str(), home_score.as_str(), home.winner),
                (away_name.as_str(), away_score.as_str(), away.winner),
            )
        });

        let result = LiveResult {
            winner,
            status,
            score_str: format!("{home_score} - {away_score}"),
            minute,
        };
        out.insert(scoreboard_key(&away_name, &home_name), result.clone());
        out.insert(scoreboard_key(&home_name, &away_name), result);
    }
    Ok(out)
}

fn score_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// Level after 90/120 minutes: the provider's winner flag carries the shoot-out result.
fn final_winner(home: (&str, &str, Option<bool>), away: (&str, &str, Option<bool>)) -> String {
    let h = home.1.parse::<i32>().unwrap_or(0);
    let a = away.1.parse::<i32>().unwrap_or(0);
    if h > a {
        return home.0.to_string();
    }
    if a > h {
        return away.0.to_string();
    }
    match (home.2, away.2) {
        (Some(true), _) => home.0.to_string(),
        (_, Some(true)) => away.0.to_string(),
        _ => DRAW_WINNER.to_string(),
    }
}

/// Attaches scoreboard results to fixtures by their resolved team names.
///
/// Fixtures are visited in match-number order so a knockout winner mapped earlier can resolve
/// the `W<N>` codes of later rounds within the same pass.
pub fn map_results_to_fixtures(
    fixtures: &[Fixture],
    scoreboard: &ScoreboardMap,
    groups: &[Group],
    pairings: Option<&R32Pairings>,
    now: DateTime<Utc>,
) -> LiveResults {
    let mut ordered: Vec<&Fixture> = fixtures.iter().collect();
    ordered.sort_by_key(|f| f.match_number);

    let mut mapped = LiveResults::new();
    for fixture in ordered {
        let found = {
            let resolver = Resolver::new(groups, fixtures, &mapped, now).with_pairings(pairings);
            let home = resolver.resolve(&fixture.home_team, None);
            let away = resolver.resolve(&fixture.away_team, Some(&fixture.home_team));
            let home = canonical_name(&home);
            let away = canonical_name(&away);
            scoreboard
                .get(&scoreboard_key(home, away))
                .or_else(|| scoreboard.get(&scoreboard_key(away, home)))
                .cloned()
        };
        if let Some(result) = found {
            mapped.insert(fixture.match_number, result);
        }
    }
    mapped
}
