use std::env;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Best-thirds table and third-place pairings are disclosed from this instant.
pub const RELEASE_DATE: &str = "2026-06-18T00:00:00Z";
/// First group-stage kickoff day.
pub const TOURNAMENT_START: &str = "2026-06-11T00:00:00Z";
/// Playoff winners are picked in the simulator only before this instant.
pub const PLAYOFF_SETUP_END: &str = "2026-04-01T00:00:00Z";

static RELEASE: Lazy<Option<DateTime<Utc>>> = Lazy::new(|| parse_instant(RELEASE_DATE));
static KICKOFF: Lazy<Option<DateTime<Utc>>> = Lazy::new(|| parse_instant(TOURNAMENT_START));
static SETUP_END: Lazy<Option<DateTime<Utc>>> = Lazy::new(|| parse_instant(PLAYOFF_SETUP_END));

pub fn release_passed(now: DateTime<Utc>) -> bool {
    RELEASE.is_some_and(|at| now >= at)
}

pub fn tournament_started(now: DateTime<Utc>) -> bool {
    KICKOFF.is_some_and(|at| now >= at)
}

/// Both wall-clock gates that guard live bracket disclosure.
pub fn bracket_disclosed(now: DateTime<Utc>) -> bool {
    tournament_started(now) && release_passed(now)
}

pub fn playoff_setup_open(now: DateTime<Utc>) -> bool {
    SETUP_END.is_some_and(|end| now < end)
}

pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Wall clock, unless `WC26_NOW` pins it to an RFC 3339 instant.
pub fn clock_now() -> DateTime<Utc> {
    env::var("WC26_NOW")
        .ok()
        .and_then(|raw| parse_instant(&raw))
        .unwrap_or_else(Utc::now)
}
