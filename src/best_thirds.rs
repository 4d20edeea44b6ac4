use chrono::{DateTime, Utc};

use crate::fixtures::GROUP_LETTERS;
use crate::gates::release_passed;
use crate::standings::{Group, StandingEntry, StatKind, Team, has_games_started, sort_by_tiebreak};

const GROUP_TAG_PREFIX: &str = "GRP ";

/// `GRP A`: the abbreviation that carries a third-placed team's source group.
pub fn group_tag(letter: char) -> String {
    format!("{GROUP_TAG_PREFIX}{letter}")
}

/// Source group of a ranked third, read back from its `GRP X` tag.
pub fn source_letter(entry: &StandingEntry) -> Option<char> {
    let tag = entry.team.abbreviation.as_deref()?;
    let rest = tag.strip_prefix(GROUP_TAG_PREFIX).unwrap_or(tag).trim();
    let mut chars = rest.chars();
    let letter = chars.next()?;
    chars.next().is_none().then_some(letter)
}

/// Ranks every group's third-placed team against the others.
///
/// Until the release date has passed and at least one group game has been played this returns
/// the twelve synthetic `3A`..`3L` rows instead, so nothing real leaks before disclosure.
pub fn calculate_best_thirds(groups: &[Group], now: DateTime<Utc>) -> Vec<StandingEntry> {
    if groups.is_empty() || !has_games_started(groups) || !release_passed(now) {
        return placeholder_thirds();
    }

    let mut thirds: Vec<StandingEntry> = groups
        .iter()
        .filter_map(|group| {
            let third = group.entries.get(2)?;
            let mut tagged = third.clone();
            tagged.team.abbreviation = group.letter().map(group_tag);
            Some(tagged)
        })
        .collect();

    sort_by_tiebreak(&mut thirds);
    for (idx, entry) in thirds.iter_mut().enumerate() {
        entry.set_stat(StatKind::Rank, idx as i32 + 1);
    }
    thirds
}

pub fn placeholder_thirds() -> Vec<StandingEntry> {
    GROUP_LETTERS
        .iter()
        .enumerate()
        .map(|(idx, &letter)| {
            let code = format!("3{letter}");
            let mut entry = StandingEntry::new(Team {
                id: code.clone(),
                name: code.clone(),
                display_name: code,
                abbreviation: Some(group_tag(letter)),
            });
            entry.set_stat(StatKind::Rank, idx as i32 + 1);
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{group_tag, source_letter};
    use crate::standings::{StandingEntry, Team};

    #[test]
    fn source_letter_reads_group_tag() {
        let mut entry = StandingEntry::new(Team::named("Japan"));
        assert_eq!(source_letter(&entry), None);
        entry.team.abbreviation = Some(group_tag('F'));
        assert_eq!(source_letter(&entry), Some('F'));
        entry.team.abbreviation = Some("JPN".to_string());
        assert_eq!(source_letter(&entry), None);
    }
}
