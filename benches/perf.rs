use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use wc26_bracket::best_thirds::calculate_best_thirds;
use wc26_bracket::espn::parse_standings_json;
use wc26_bracket::fixtures::{LiveResults, group_stage_fixtures, roster_groups, wc_fixtures};
use wc26_bracket::gates::parse_instant;
use wc26_bracket::pairings::{pairings_for_key, qualifying_thirds_key};
use wc26_bracket::resolver::Resolver;
use wc26_bracket::simulator::{PlayoffMapping, random_scores, simulate};

fn bench_simulate(c: &mut Criterion) {
    let live = roster_groups();
    let scores = random_scores(group_stage_fixtures(), &mut StdRng::seed_from_u64(1));
    let overrides = PlayoffMapping::new();
    c.bench_function("simulate_group_stage", |b| {
        b.iter(|| {
            let groups = simulate(black_box(&live), black_box(&scores), &overrides);
            black_box(groups.len());
        })
    });
}

fn bench_resolve_bracket(c: &mut Criterion) {
    let now = parse_instant("2026-06-28T00:00:00Z").expect("valid instant");
    let scores = random_scores(group_stage_fixtures(), &mut StdRng::seed_from_u64(2));
    let groups = simulate(&roster_groups(), &scores, &PlayoffMapping::new());
    let thirds = calculate_best_thirds(&groups, now);
    let pairings = pairings_for_key(&qualifying_thirds_key(&thirds));
    let results = LiveResults::new();
    c.bench_function("resolve_bracket", |b| {
        b.iter(|| {
            let bracket = Resolver::new(&groups, wc_fixtures(), &results, now)
                .with_pairings(Some(&pairings))
                .resolve_bracket();
            black_box(bracket.len());
        })
    });
}

fn bench_standings_parse(c: &mut Criterion) {
    c.bench_function("standings_parse", |b| {
        b.iter(|| {
            let groups = parse_standings_json(black_box(STANDINGS_JSON)).expect("valid json");
            black_box(groups.len());
        })
    });
}

criterion_group!(
    benches,
    bench_simulate,
    bench_resolve_bracket,
    bench_standings_parse
);
criterion_main!(benches);

const STANDINGS_JSON: &str = r#"{
  "children": [
    {
      "name": "Group A",
      "standings": {
        "entries": [
          { "team": { "id": "1", "name": "Mexico" }, "stats": [ { "name": "rank", "value": 1 }, { "name": "points", "value": 6 } ] },
          { "team": { "id": "2", "name": "Korea Republic" }, "stats": [ { "name": "rank", "value": 2 }, { "name": "points", "value": 4 } ] },
          { "team": { "id": "3", "name": "South Africa" }, "stats": [ { "name": "rank", "value": 3 }, { "name": "points", "value": 1 } ] },
          { "team": { "id": "4", "name": "Winner Path D" }, "stats": [ { "name": "rank", "value": 4 }, { "name": "points", "value": 0 } ] }
        ]
      }
    },
    {
      "name": "Group B",
      "standings": {
        "entries": [
          { "team": { "id": "5", "name": "Canada" }, "stats": [ { "name": "rank", "value": 1 }, { "name": "points", "value": 3 } ] },
          { "team": { "id": "6", "name": "Switzerland" }, "stats": [ { "name": "rank", "value": 2 }, { "name": "points", "value": 3 } ] },
          { "team": { "id": "7", "name": "Qatar" }, "stats": [ { "name": "rank", "value": 3 }, { "name": "points", "value": 0 } ] },
          { "team": { "id": "8", "name": "Winner Path A" }, "stats": [ { "name": "rank", "value": 4 }, { "name": "points", "value": 0 } ] }
        ]
      }
    }
  ]
}"#;
