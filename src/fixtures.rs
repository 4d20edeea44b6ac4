use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::names::canonical_name;
use crate::standings::{Group, StandingEntry, Team};

pub const GROUP_STAGE_ROUND: &str = "Group Stage";
/// Winner recorded for a level match with no shoot-out.
pub const DRAW_WINNER: &str = "Draw";
pub const GROUP_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub match_number: u32,
    pub round: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub city: String,
}

impl Fixture {
    pub fn is_group_stage(&self) -> bool {
        self.round == GROUP_STAGE_ROUND
    }
}

/// Outcome of a played (or simulated) match as the bracket sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResult {
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub score_str: String,
    #[serde(default)]
    pub minute: Option<String>,
}

impl LiveResult {
    /// The advancing team; empty and drawn results advance nobody.
    pub fn decided_winner(&self) -> Option<&str> {
        self.winner
            .as_deref()
            .filter(|w| !w.is_empty() && *w != DRAW_WINNER)
    }
}

pub type LiveResults = HashMap<u32, LiveResult>;

// Draw order inside each group; the round-robin pattern below depends on it.
static GROUP_ROSTERS: [(char, [&str; 4]); 12] = [
    ('A', ["Mexico", "South Africa", "South Korea", "Winner Path D"]),
    ('B', ["Canada", "Winner Path A", "Qatar", "Switzerland"]),
    ('C', ["Haiti", "Scotland", "Brazil", "Morocco"]),
    ('D', ["USA", "Paraguay", "Australia", "Winner Path C"]),
    ('E', ["Côte d'Ivoire", "Ecuador", "Germany", "Curaçao"]),
    ('F', ["Netherlands", "Japan", "Winner Path B", "Tunisia"]),
    ('G', ["IR Iran", "New Zealand", "Belgium", "Egypt"]),
    ('H', ["Saudi Arabia", "Uruguay", "Spain", "Cabo Verde"]),
    ('I', ["France", "Senegal", "Winner Pathway 2", "Norway"]),
    ('J', ["Argentina", "Algeria", "Austria", "Jordan"]),
    ('K', ["Portugal", "Winner Pathway 1", "Uzbekistan", "Colombia"]),
    ('L', ["Ghana", "Panama", "England", "Croatia"]),
];

// (home index, away index) per matchday.
const ROUND_ROBIN: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (3, 1)], [(3, 0), (1, 2)]];
const MATCHDAY_DATES: [&str; 3] = ["11/06/26", "18/06/26", "24/06/26"];

// (match, round, date, time, home, away, venue, city)
type KnockoutRow = (u32, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

const KNOCKOUT_FIXTURES: &[KnockoutRow] = &[
    (73, "Round of 32", "28/06/26", "12:00", "2A", "2B", "SoFi Stadium", "Los Angeles"),
    (74, "Round of 32", "29/06/26", "16:30", "1E", "3(A/B/C/D/F)", "Gillette Stadium", "Boston"),
    (75, "Round of 32", "29/06/26", "19:00", "1F", "2C", "Estadio BBVA", "Monterrey"),
    (76, "Round of 32", "29/06/26", "12:00", "1C", "2F", "NRG Stadium", "Houston"),
    (77, "Round of 32", "30/06/26", "17:00", "1I", "3(C/D/F/G/H)", "MetLife Stadium", "New York/NJ"),
    (78, "Round of 32", "30/06/26", "12:00", "2E", "2I", "AT&T Stadium", "Dallas"),
    (79, "Round of 32", "30/06/26", "19:00", "1A", "3(C/E/F/H/I)", "Estadio Azteca", "Mexico City"),
    (80, "Round of 32", "01/07/26", "12:00", "1L", "3(E/H/I/J/K)", "Mercedes-Benz Stadium", "Atlanta"),
    (81, "Round of 32", "01/07/26", "17:00", "1D", "3(B/E/F/I/J)", "Levi's Stadium", "San Francisco"),
    (82, "Round of 32", "01/07/26", "13:00", "1G", "3(A/E/H/I/J)", "Lumen Field", "Seattle"),
    (83, "Round of 32", "02/07/26", "19:00", "2K", "2L", "BMO Field", "Toronto"),
    (84, "Round of 32", "02/07/26", "12:00", "1H", "2J", "SoFi Stadium", "Los Angeles"),
    (85, "Round of 32", "02/07/26", "20:00", "1B", "3(E/F/G/I/J)", "BC Place", "Vancouver"),
    (86, "Round of 32", "03/07/26", "18:00", "1J", "2H", "Hard Rock Stadium", "Miami"),
    (87, "Round of 32", "03/07/26", "20:30", "1K", "3(D/E/I/J/L)", "Arrowhead Stadium", "Kansas City"),
    (88, "Round of 32", "03/07/26", "13:00", "2D", "2G", "AT&T Stadium", "Dallas"),
    (89, "Round of 16", "04/07/26", "17:00", "W 74", "W 77", "Lincoln Financial Field", "Philadelphia"),
    (90, "Round of 16", "04/07/26", "12:00", "W 73", "W 75", "NRG Stadium", "Houston"),
    (91, "Round of 16", "05/07/26", "16:00", "W 76", "W 78", "MetLife Stadium", "New York/NJ"),
    (92, "Round of 16", "05/07/26", "18:00", "W 79", "W 80", "Estadio Azteca", "Mexico City"),
    (93, "Round of 16", "06/07/26", "14:00", "W 83", "W 84", "AT&T Stadium", "Dallas"),
    (94, "Round of 16", "06/07/26", "17:00", "W 81", "W 82", "Lumen Field", "Seattle"),
    (95, "Round of 16", "07/07/26", "12:00", "W 86", "W 88", "Mercedes-Benz Stadium", "Atlanta"),
    (96, "Round of 16", "07/07/26", "13:00", "W 85", "W 87", "BC Place", "Vancouver"),
    (97, "Quarter Final", "09/07/26", "16:00", "W 89", "W 90", "Gillette Stadium", "Boston"),
    (98, "Quarter Final", "10/07/26", "12:00", "W 93", "W 94", "SoFi Stadium", "Los Angeles"),
    (99, "Quarter Final", "11/07/26", "17:00", "W 91", "W 92", "Hard Rock Stadium", "Miami"),
    (100, "Quarter Final", "11/07/26", "20:00", "W 95", "W 96", "Arrowhead Stadium", "Kansas City"),
    (101, "Semi Final", "14/07/26", "14:00", "W 97", "W 98", "AT&T Stadium", "Dallas"),
    (102, "Semi Final", "15/07/26", "15:00", "W 99", "W 100", "Mercedes-Benz Stadium", "Atlanta"),
    (103, "Third Place", "18/07/26", "17:00", "L 101", "L 102", "Hard Rock Stadium", "Miami"),
    (104, "Final", "19/07/26", "15:00", "W 101", "W 102", "MetLife Stadium", "New York/NJ"),
];

/// Simulator dropdown choices, keyed by the canonical placeholder name used in the groups.
pub const PLAYOFF_CANDIDATES: &[(&str, &[&str])] = &[
    ("Path A [UEFA]", &["Wales", "Bosnia", "Italy", "N. Ireland"]),
    ("Path B [UEFA]", &["Ukraine", "Sweden", "Poland", "Albania"]),
    ("Path C [UEFA]", &["Slovakia", "Kosovo", "Türkiye", "Romania"]),
    ("Path D [UEFA]", &["Czechia", "Ireland", "Denmark", "N. Macedonia"]),
    ("Pathway 1", &["New Caledonia", "Jamaica", "DR Congo"]),
    ("Pathway 2", &["Bolivia", "Suriname", "Iraq"]),
];

static GROUP_FIXTURES: Lazy<Vec<Fixture>> = Lazy::new(build_group_fixtures);
static ALL_FIXTURES: Lazy<Vec<Fixture>> = Lazy::new(|| {
    let mut all = GROUP_FIXTURES.clone();
    all.extend(knockout_fixtures());
    all
});

pub fn group_stage_fixtures() -> &'static [Fixture] {
    &GROUP_FIXTURES
}

/// Group stage then knockout, ordered by match number (1..=104).
pub fn wc_fixtures() -> &'static [Fixture] {
    &ALL_FIXTURES
}

pub fn knockout_fixtures() -> Vec<Fixture> {
    KNOCKOUT_FIXTURES
        .iter()
        .map(|&(match_number, round, date, time, home, away, venue, city)| Fixture {
            match_number,
            round: round.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            venue: venue.to_string(),
            city: city.to_string(),
        })
        .collect()
}

pub fn find_fixture(fixtures: &[Fixture], match_number: u32) -> Option<&Fixture> {
    fixtures.iter().find(|f| f.match_number == match_number)
}

/// Matchday (1..=3) of a group-stage match number.
pub fn matchday_of(match_number: u32) -> Option<u8> {
    match match_number {
        1..=24 => Some(1),
        25..=48 => Some(2),
        49..=72 => Some(3),
        _ => None,
    }
}

/// Empty tables for all twelve groups, in draw order, with canonical team names.
pub fn roster_groups() -> Vec<Group> {
    GROUP_ROSTERS
        .iter()
        .map(|(letter, teams)| {
            let entries = teams
                .iter()
                .map(|raw| StandingEntry::new(Team::named(canonical_name(raw))))
                .collect();
            Group::for_letter(*letter, entries)
        })
        .collect()
}

pub fn playoff_candidates(placeholder: &str) -> Option<&'static [&'static str]> {
    PLAYOFF_CANDIDATES
        .iter()
        .find(|(name, _)| *name == placeholder)
        .map(|(_, teams)| *teams)
}

fn build_group_fixtures() -> Vec<Fixture> {
    let mut out = Vec::with_capacity(72);
    let mut match_number = 1;
    for (day, pairs) in ROUND_ROBIN.iter().enumerate() {
        for (_, teams) in GROUP_ROSTERS.iter() {
            for &(home, away) in pairs {
                out.push(Fixture {
                    match_number,
                    round: GROUP_STAGE_ROUND.to_string(),
                    date: MATCHDAY_DATES[day].to_string(),
                    time: String::new(),
                    home_team: teams[home].to_string(),
                    away_team: teams[away].to_string(),
                    venue: String::new(),
                    city: String::new(),
                });
                match_number += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{group_stage_fixtures, matchday_of, playoff_candidates, roster_groups, wc_fixtures};

    #[test]
    fn match_numbers_are_dense() {
        let numbers: Vec<u32> = wc_fixtures().iter().map(|f| f.match_number).collect();
        assert_eq!(numbers, (1..=104).collect::<Vec<_>>());
    }

    #[test]
    fn every_pair_in_a_group_meets_once() {
        let mut seen = HashSet::new();
        for f in group_stage_fixtures() {
            let mut pair = [f.home_team.clone(), f.away_team.clone()];
            pair.sort();
            assert!(seen.insert(pair), "duplicate pairing in match {}", f.match_number);
        }
        assert_eq!(seen.len(), 72);
    }

    #[test]
    fn matchday_windows_follow_numbering() {
        assert_eq!(matchday_of(1), Some(1));
        assert_eq!(matchday_of(25), Some(2));
        assert_eq!(matchday_of(72), Some(3));
        assert_eq!(matchday_of(73), None);
        let first = &group_stage_fixtures()[0];
        assert_eq!(first.home_team, "Mexico");
        assert_eq!(first.away_team, "South Africa");
    }

    #[test]
    fn roster_groups_use_canonical_names() {
        let groups = roster_groups();
        assert_eq!(groups.len(), 12);
        assert!(groups[0].entries.iter().any(|e| e.team.name == "Path D [UEFA]"));
    }

    #[test]
    fn playoff_candidates_keyed_by_canonical_slot() {
        assert!(playoff_candidates("Path D [UEFA]").is_some_and(|t| t.contains(&"Denmark")));
        assert_eq!(playoff_candidates("Winner Path D"), None);
    }
}
