use std::fmt::Write;

use crate::pairings::R32Pairings;
use crate::placeholder::is_placeholder;
use crate::resolver::ResolvedFixture;
use crate::simulator::SimulationSnapshot;
use crate::standings::{Group, StandingEntry, StatKind};
use crate::state::TrackerState;

const TEAM_WIDTH: usize = 22;
// Top eight thirds go through.
const QUALIFYING_THIRDS: usize = 8;

pub fn group_table(group: &Group) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", group.name);
    let _ = writeln!(
        out,
        "  {:>2}  {:<w$} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3}",
        "#",
        "Team",
        "P",
        "W",
        "D",
        "L",
        "GF",
        "GA",
        "GD",
        "Pts",
        w = TEAM_WIDTH
    );
    for entry in &group.entries {
        let _ = writeln!(out, "  {}", entry_row(entry));
    }
    out
}

fn entry_row(entry: &StandingEntry) -> String {
    format!(
        "{:>2}  {:<w$} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>+4} {:>3}",
        entry.get_stat(StatKind::Rank),
        truncate(&entry.team.display_name, TEAM_WIDTH),
        entry.get_stat(StatKind::GamesPlayed),
        entry.get_stat(StatKind::Wins),
        entry.get_stat(StatKind::Ties),
        entry.get_stat(StatKind::Losses),
        entry.get_stat(StatKind::PointsFor),
        entry.get_stat(StatKind::PointsAgainst),
        entry.get_stat(StatKind::PointDifferential),
        entry.get_stat(StatKind::Points),
        w = TEAM_WIDTH
    )
}

pub fn best_thirds_table(thirds: &[StandingEntry]) -> String {
    let mut out = String::from("Best third-placed teams\n");
    for (idx, entry) in thirds.iter().enumerate() {
        let marker = if idx < QUALIFYING_THIRDS { '*' } else { ' ' };
        let group = entry.team.abbreviation.as_deref().unwrap_or("");
        let _ = writeln!(out, "{marker} {}  {group:<6}", entry_row(entry));
    }
    out
}

pub fn pairings_table(key: &str, pairings: &R32Pairings) -> String {
    let mut out = format!("Third-place pairings ({key})\n");
    for (slot, code) in pairings.iter() {
        let _ = writeln!(out, "  {slot} v {code}");
    }
    out
}

pub fn bracket_table(bracket: &[ResolvedFixture]) -> String {
    let mut out = String::new();
    let mut round: &str = "";
    for fixture in bracket {
        if fixture.round != round {
            round = fixture.round.as_str();
            let _ = writeln!(out, "{round}");
        }
        let score = fixture
            .result
            .as_ref()
            .map(|r| r.score_str.as_str())
            .unwrap_or("-");
        let mark = |name: &str| {
            if is_placeholder(name) {
                format!("({name})")
            } else {
                name.to_string()
            }
        };
        let _ = write!(
            out,
            "  M{:<3} {:>w$} {:^7} {}",
            fixture.match_number,
            mark(&fixture.home),
            score,
            mark(&fixture.away),
            w = TEAM_WIDTH
        );
        if let Some(winner) = fixture.result.as_ref().and_then(|r| r.decided_winner()) {
            let _ = write!(out, "  -> {winner}");
        }
        out.push('\n');
    }
    out
}

/// Full live report: every table, thirds, pairings, then the bracket.
pub fn render_state(state: &TrackerState) -> String {
    let mut out = String::new();
    if state.groups.is_empty() {
        out.push_str("No standings yet.\n");
    }
    for group in &state.groups {
        out.push_str(&group_table(group));
        out.push('\n');
    }
    out.push_str(&best_thirds_table(&state.best_thirds));
    out.push('\n');
    match (&state.qualifying_key, &state.pairings) {
        (Some(key), Some(pairings)) => out.push_str(&pairings_table(key, pairings)),
        _ => out.push_str("Third-place pairings: waiting for the first group game\n"),
    }
    out.push('\n');
    out.push_str(&bracket_table(&state.bracket()));
    out
}

pub fn render_snapshot(snapshot: &SimulationSnapshot) -> String {
    let mut out = String::new();
    for group in &snapshot.groups {
        out.push_str(&group_table(group));
        out.push('\n');
    }
    out.push_str(&best_thirds_table(&snapshot.best_thirds));
    out.push('\n');
    out.push_str(&pairings_table(&snapshot.qualifying_key, &snapshot.pairings));
    out.push('\n');
    out.push_str(&bracket_table(&snapshot.bracket));
    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('~');
    short
}

#[cfg(test)]
mod tests {
    use super::{bracket_table, truncate};
    use crate::fixtures::LiveResult;
    use crate::resolver::ResolvedFixture;

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(truncate("Spain", 8), "Spain");
        assert_eq!(truncate("Bosnia and Herzegovina", 8), "Bosnia ~");
    }

    #[test]
    fn bracket_marks_codes_and_winners() {
        let rows = vec![
            ResolvedFixture {
                match_number: 73,
                round: "Round of 32".to_string(),
                home: "2A".to_string(),
                away: "Canada".to_string(),
                result: None,
            },
            ResolvedFixture {
                match_number: 74,
                round: "Round of 32".to_string(),
                home: "Germany".to_string(),
                away: "Japan".to_string(),
                result: Some(LiveResult {
                    winner: Some("Japan".to_string()),
                    status: "STATUS_FINAL".to_string(),
                    score_str: "1 - 2".to_string(),
                    minute: None,
                }),
            },
        ];
        let text = bracket_table(&rows);
        assert_eq!(text.matches("Round of 32").count(), 1);
        assert!(text.contains("(2A)"));
        assert!(text.contains("-> Japan"));
    }
}
