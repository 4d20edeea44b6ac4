use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use wc26_bracket::fixtures::{Fixture, group_stage_fixtures, roster_groups, wc_fixtures};
use wc26_bracket::gates::parse_instant;
use wc26_bracket::simulator::{
    PendingScore, PlayoffMapping, SIM_SCORE_LABEL, Side, SimulatedScores, SimulatorSession,
    random_scores, simulate, simulate_with_fixtures, unresolved_playoff_slots,
};
use wc26_bracket::standings::{Group, StandingEntry, StatKind, compare_standing, find_group};

fn scores(rows: &[(u32, &str, &str)]) -> SimulatedScores {
    rows.iter()
        .map(|&(n, h, a)| (n, PendingScore::new(h, a)))
        .collect()
}

fn entry<'a>(groups: &'a [Group], name: &str) -> &'a StandingEntry {
    groups
        .iter()
        .flat_map(|g| &g.entries)
        .find(|e| e.team.name == name)
        .expect("team should be present")
}

fn stat_line(e: &StandingEntry) -> [i32; 8] {
    [
        e.get_stat(StatKind::GamesPlayed),
        e.get_stat(StatKind::Wins),
        e.get_stat(StatKind::Ties),
        e.get_stat(StatKind::Losses),
        e.get_stat(StatKind::PointsFor),
        e.get_stat(StatKind::PointsAgainst),
        e.get_stat(StatKind::PointDifferential),
        e.get_stat(StatKind::Points),
    ]
}

#[test]
fn win_and_draw_accumulate() {
    // Match 1: Mexico v South Africa, match 25: Mexico v South Korea.
    let groups = simulate(
        &roster_groups(),
        &scores(&[(1, "3", "1"), (25, "1", "1")]),
        &PlayoffMapping::new(),
    );
    assert_eq!(stat_line(entry(&groups, "Mexico")), [2, 1, 1, 0, 4, 2, 2, 4]);
    assert_eq!(stat_line(entry(&groups, "South Africa")), [1, 0, 0, 1, 1, 3, -2, 0]);
    assert_eq!(stat_line(entry(&groups, "South Korea")), [1, 0, 1, 0, 1, 1, 0, 1]);

    let group_a = find_group(&groups, 'A').expect("group A");
    assert_eq!(group_a.entries[0].team.name, "Mexico");
    assert_eq!(group_a.entries[0].get_stat(StatKind::Rank), 1);
}

#[test]
fn incomplete_scores_are_skipped() {
    let groups = simulate(
        &roster_groups(),
        &scores(&[(1, "", "2"), (2, "1", "x"), (3, "-1", "0")]),
        &PlayoffMapping::new(),
    );
    for group in &groups {
        assert_eq!(group.games_played(), 0, "{} should be untouched", group.name);
    }
}

#[test]
fn simulation_is_idempotent_and_does_not_alias() {
    let live = roster_groups();
    let before = live.clone();
    let predicted = random_scores(group_stage_fixtures(), &mut StdRng::seed_from_u64(42));

    let first = simulate(&live, &predicted, &PlayoffMapping::new());
    let second = simulate(&live, &predicted, &PlayoffMapping::new());
    assert_eq!(first, second);
    assert_eq!(live, before);

    // Feeding the output back in rebuilds the same tables rather than double counting.
    let again = simulate(&first, &predicted, &PlayoffMapping::new());
    assert_eq!(again, first);
}

#[test]
fn stat_invariants_hold_after_full_group_stage() {
    let predicted = random_scores(group_stage_fixtures(), &mut StdRng::seed_from_u64(9));
    let groups = simulate(&roster_groups(), &predicted, &PlayoffMapping::new());

    let mut total_for = 0;
    let mut total_against = 0;
    for group in &groups {
        for (idx, e) in group.entries.iter().enumerate() {
            let [gp, w, d, l, gf, ga, gd, pts] = stat_line(e);
            assert_eq!(gp, 3);
            assert_eq!(w + d + l, gp);
            assert_eq!(pts, 3 * w + d);
            assert_eq!(gd, gf - ga);
            assert_eq!(e.get_stat(StatKind::Rank), idx as i32 + 1);
            total_for += gf;
            total_against += ga;
        }
        for pair in group.entries.windows(2) {
            assert_ne!(
                compare_standing(&pair[0], &pair[1]),
                std::cmp::Ordering::Greater
            );
        }
    }
    assert_eq!(total_for, total_against);
}

#[test]
fn tiebreak_orders_points_then_difference_then_goals() {
    // Group A: Mexico, South Africa, South Korea, Path D.
    let groups = simulate(
        &roster_groups(),
        &scores(&[
            (1, "0", "0"),  // Mexico v South Africa
            (2, "3", "0"),  // South Korea v Path D
            (25, "4", "1"), // Mexico v South Korea
            (26, "0", "2"), // Path D v South Africa
        ]),
        &PlayoffMapping::new(),
    );
    let group_a = find_group(&groups, 'A').expect("group A");
    let order: Vec<&str> = group_a.entries.iter().map(|e| e.team.name.as_str()).collect();
    // Mexico 4pts +3, South Africa 4pts +2, South Korea 3pts 0.
    assert_eq!(order, ["Mexico", "South Africa", "South Korea", "Path D [UEFA]"]);
}

#[test]
fn exact_ties_keep_input_order() {
    let groups = simulate(
        &roster_groups(),
        &scores(&[(1, "1", "1"), (2, "1", "1")]),
        &PlayoffMapping::new(),
    );
    let group_a = find_group(&groups, 'A').expect("group A");
    let order: Vec<&str> = group_a.entries.iter().map(|e| e.team.name.as_str()).collect();
    assert_eq!(order, ["Mexico", "South Africa", "South Korea", "Path D [UEFA]"]);
}

#[test]
fn oversized_scores_are_not_predictions() {
    let groups = simulate(
        &roster_groups(),
        &scores(&[(1, "4294967295", "0"), (25, "2147483647", "0"), (2, "65536", "1")]),
        &PlayoffMapping::new(),
    );
    for group in &groups {
        assert_eq!(group.games_played(), 0, "{} should be untouched", group.name);
    }
}

#[test]
fn largest_scores_keep_stat_invariants() {
    let every_group_game: Vec<(u32, &str, &str)> = group_stage_fixtures()
        .iter()
        .map(|f| (f.match_number, "65535", "0"))
        .collect();
    let groups = simulate(&roster_groups(), &scores(&every_group_game), &PlayoffMapping::new());

    let mexico = entry(&groups, "Mexico");
    assert_eq!(mexico.get_stat(StatKind::Wins), 2);
    assert_eq!(mexico.get_stat(StatKind::Losses), 1);
    for group in &groups {
        for e in &group.entries {
            let [gp, w, d, l, gf, ga, gd, pts] = stat_line(e);
            assert_eq!(gp, 3);
            assert_eq!(w + d + l, gp);
            assert_eq!(pts, 3 * w + d);
            assert_eq!(gd, gf - ga);
            assert!(gf >= 0 && ga >= 0);
        }
    }
}

#[test]
fn overrides_rename_slots_and_route_results() {
    let mut overrides = PlayoffMapping::new();
    overrides.insert("Path D [UEFA]".to_string(), "Denmark".to_string());

    // Match 2: South Korea v Winner Path D.
    let groups = simulate(&roster_groups(), &scores(&[(2, "0", "2")]), &overrides);
    let denmark = entry(&groups, "Denmark");
    assert_eq!(denmark.team.display_name, "Denmark");
    assert_eq!(denmark.get_stat(StatKind::Points), 3);
    assert!(
        groups
            .iter()
            .flat_map(|g| &g.entries)
            .all(|e| e.team.name != "Path D [UEFA]")
    );
    assert_eq!(unresolved_playoff_slots(&groups).len(), 5);
}

#[test]
fn unknown_teams_are_skipped() {
    let fixtures = vec![Fixture {
        match_number: 1,
        round: "Group Stage".to_string(),
        date: "11/06/26".to_string(),
        time: String::new(),
        home_team: "Atlantis".to_string(),
        away_team: "Mexico".to_string(),
        venue: String::new(),
        city: String::new(),
    }];
    let groups = simulate_with_fixtures(
        &roster_groups(),
        &scores(&[(1, "5", "0")]),
        &HashMap::new(),
        &fixtures,
    );
    assert_eq!(entry(&groups, "Mexico").get_stat(StatKind::GamesPlayed), 0);
}

#[test]
fn session_snapshot_builds_full_bracket() {
    let now = parse_instant("2026-06-28T00:00:00Z").expect("instant");
    let mut session = SimulatorSession::default();
    session.randomize_scores(wc_fixtures(), &mut StdRng::seed_from_u64(5));
    assert_eq!(session.scores.len(), 72);
    session.set_score(1, Side::Home, "");
    session.select_playoff_winner("Path D [UEFA]", "Czechia");

    let snapshot = session.snapshot(&roster_groups(), wc_fixtures(), now);
    assert_eq!(snapshot.groups.len(), 12);
    assert_eq!(snapshot.best_thirds.len(), 12);
    assert_eq!(snapshot.qualifying_key.len(), 8);
    assert_eq!(snapshot.bracket.len(), 32);

    let m73 = &snapshot.bracket[0];
    assert_eq!(m73.match_number, 73);
    let group_a = find_group(&snapshot.groups, 'A').expect("group A");
    assert_eq!(m73.home, group_a.entries[1].team.name);
    assert!(snapshot.groups.iter().flat_map(|g| &g.entries).any(|e| e.team.name == "Czechia"));

    session.pick_winner(73, &m73.home);
    let picked = session.snapshot(&roster_groups(), wc_fixtures(), now);
    let m90 = picked
        .bracket
        .iter()
        .find(|f| f.match_number == 90)
        .expect("match 90");
    assert_eq!(m90.home, m73.home);
    assert_eq!(session.picks[&73].score_str, SIM_SCORE_LABEL);

    session.reset();
    assert!(session.scores.is_empty());
    assert!(session.playoff_mapping.is_empty());
    assert!(session.picks.is_empty());
}

#[test]
fn setup_window_closes_in_april() {
    let open = parse_instant("2026-03-31T23:59:59Z").expect("instant");
    let closed = parse_instant("2026-04-01T00:00:00Z").expect("instant");
    assert!(SimulatorSession::setup_open(open));
    assert!(!SimulatorSession::setup_open(closed));
}
