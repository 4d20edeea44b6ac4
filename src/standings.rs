use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

/// Rank reported for an entry that never had one written.
pub const MISSING_RANK: i32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, deserialize_with = "string_or_default")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl Team {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            display_name: name.clone(),
            name,
            abbreviation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Rank,
    GamesPlayed,
    Wins,
    Ties,
    Losses,
    PointsFor,
    PointsAgainst,
    PointDifferential,
    Points,
}

impl StatKind {
    /// Stats the simulation engine recomputes from scratch on every run.
    pub const DERIVED: [StatKind; 8] = [
        StatKind::GamesPlayed,
        StatKind::Wins,
        StatKind::Ties,
        StatKind::Losses,
        StatKind::PointsFor,
        StatKind::PointsAgainst,
        StatKind::PointDifferential,
        StatKind::Points,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StatKind::Rank => "rank",
            StatKind::GamesPlayed => "gamesPlayed",
            StatKind::Wins => "wins",
            StatKind::Ties => "ties",
            StatKind::Losses => "losses",
            StatKind::PointsFor => "pointsFor",
            StatKind::PointsAgainst => "pointsAgainst",
            StatKind::PointDifferential => "pointDifferential",
            StatKind::Points => "points",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub name: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub value: i32,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub team: Team,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl StandingEntry {
    /// A fresh row with every derived stat present and zeroed.
    pub fn new(team: Team) -> Self {
        let mut entry = Self {
            team,
            stats: Vec::with_capacity(StatKind::DERIVED.len() + 1),
        };
        entry.reset_derived();
        entry
    }

    pub fn get_stat(&self, kind: StatKind) -> i32 {
        let found = self
            .stats
            .iter()
            .find(|s| s.name == kind.as_str())
            .map(|s| s.value);
        match (found, kind) {
            (Some(value), _) => value,
            (None, StatKind::Rank) => MISSING_RANK,
            (None, _) => 0,
        }
    }

    pub fn set_stat(&mut self, kind: StatKind, value: i32) {
        let name = kind.as_str();
        if let Some(stat) = self.stats.iter_mut().find(|s| s.name == name) {
            stat.value = value;
            stat.display_value = Some(value.to_string());
        } else {
            self.stats.push(Stat {
                name: name.to_string(),
                value,
                display_value: Some(value.to_string()),
            });
        }
    }

    pub fn add_to_stat(&mut self, kind: StatKind, delta: i32) {
        let current = self.get_stat(kind);
        self.set_stat(kind, current.saturating_add(delta));
    }

    pub fn reset_derived(&mut self) {
        for kind in StatKind::DERIVED {
            self.set_stat(kind, 0);
        }
    }

    /// Books one finished match from this team's point of view.
    pub fn record_result(&mut self, goals_for: u16, goals_against: u16) {
        let (gf, ga) = (i32::from(goals_for), i32::from(goals_against));
        self.add_to_stat(StatKind::GamesPlayed, 1);
        self.add_to_stat(StatKind::PointsFor, gf);
        self.add_to_stat(StatKind::PointsAgainst, ga);
        self.add_to_stat(StatKind::PointDifferential, gf - ga);
        match gf.cmp(&ga) {
            Ordering::Greater => {
                self.add_to_stat(StatKind::Wins, 1);
                self.add_to_stat(StatKind::Points, 3);
            }
            Ordering::Equal => {
                self.add_to_stat(StatKind::Ties, 1);
                self.add_to_stat(StatKind::Points, 1);
            }
            Ordering::Less => self.add_to_stat(StatKind::Losses, 1),
        }
    }

    pub fn tiebreak_key(&self) -> (i32, i32, i32) {
        (
            self.get_stat(StatKind::Points),
            self.get_stat(StatKind::PointDifferential),
            self.get_stat(StatKind::PointsFor),
        )
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.team.name == name || self.team.display_name == name
    }
}

/// Descending by (points, goal difference, goals for). Exact ties compare equal.
pub fn compare_standing(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.tiebreak_key().cmp(&a.tiebreak_key())
}

pub fn sort_by_tiebreak(entries: &mut [StandingEntry]) {
    entries.sort_by(compare_standing);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<StandingEntry>,
}

impl Group {
    pub fn for_letter(letter: char, entries: Vec<StandingEntry>) -> Self {
        Self {
            name: format!("Group {letter}"),
            entries,
        }
    }

    /// Trailing `A`..`L` of the group name, if any.
    pub fn letter(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .last()
            .filter(|c| ('A'..='L').contains(c))
    }

    pub fn games_played(&self) -> i32 {
        self.entries
            .iter()
            .map(|e| e.get_stat(StatKind::GamesPlayed))
            .sum()
    }

    /// Re-sorts by the tie-break and writes the 1-based position back into `rank`.
    pub fn rerank(&mut self) {
        sort_by_tiebreak(&mut self.entries);
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            entry.set_stat(StatKind::Rank, idx as i32 + 1);
        }
    }
}

pub fn has_games_started(groups: &[Group]) -> bool {
    groups.iter().map(Group::games_played).sum::<i32>() > 0
}

pub fn find_group(groups: &[Group], letter: char) -> Option<&Group> {
    groups.iter().find(|g| g.name.ends_with(letter))
}

fn int_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(v) => i32::try_from(v).ok(),
            None => n.as_f64().and_then(rounded_i32),
        },
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok().and_then(rounded_i32),
        _ => None,
    };
    Ok(parsed.unwrap_or(0))
}

// Out-of-range or non-finite values are rejected instead of saturating.
fn rounded_i32(v: f64) -> Option<i32> {
    let r = v.round();
    (r.is_finite() && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX)).then_some(r as i32)
}

fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
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

#[cfg(test)]
mod tests {
    use super::{Group, StandingEntry, StatKind, Team, MISSING_RANK};

    #[test]
    fn missing_stats_read_as_defaults() {
        let entry = StandingEntry {
            team: Team::named("Ghana"),
            stats: Vec::new(),
        };
        assert_eq!(entry.get_stat(StatKind::Points), 0);
        assert_eq!(entry.get_stat(StatKind::Rank), MISSING_RANK);
    }

    #[test]
    fn set_stat_refreshes_display_value() {
        let mut entry = StandingEntry::new(Team::named("Ghana"));
        entry.set_stat(StatKind::Points, 7);
        let stat = entry
            .stats
            .iter()
            .find(|s| s.name == "points")
            .expect("points stat");
        assert_eq!(stat.value, 7);
        assert_eq!(stat.display_value.as_deref(), Some("7"));

        entry.set_stat(StatKind::Rank, 2);
        assert_eq!(entry.get_stat(StatKind::Rank), 2);
        assert_eq!(entry.stats.iter().filter(|s| s.name == "rank").count(), 1);
    }

    #[test]
    fn group_letter_comes_from_name_suffix() {
        assert_eq!(Group::for_letter('K', Vec::new()).letter(), Some('K'));
        let odd = Group {
            name: "Standings".to_string(),
            entries: Vec::new(),
        };
        assert_eq!(odd.letter(), None);
    }

    #[test]
    fn stat_values_accept_floats_from_provider() {
        let raw = r#"{"name":"points","value":4.0,"displayValue":"4"}"#;
        let stat: super::Stat = serde_json::from_str(raw).expect("stat json");
        assert_eq!(stat.value, 4);
    }

    #[test]
    fn out_of_range_provider_values_read_as_zero() {
        for raw in [
            r#"{"name":"points","value":4294967296}"#,
            r#"{"name":"points","value":-3000000000}"#,
            r#"{"name":"points","value":"1e12"}"#,
        ] {
            let stat: super::Stat = serde_json::from_str(raw).expect("stat json");
            assert_eq!(stat.value, 0, "{raw}");
        }
    }

    #[test]
    fn stat_additions_saturate() {
        let mut entry = StandingEntry::new(Team::named("Ghana"));
        entry.set_stat(StatKind::PointsFor, i32::MAX - 1);
        entry.add_to_stat(StatKind::PointsFor, 5);
        assert_eq!(entry.get_stat(StatKind::PointsFor), i32::MAX);
    }
}
