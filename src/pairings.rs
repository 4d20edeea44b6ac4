//! Round-of-32 slots that receive a third-placed team.
//!
//! The official allocation is a 495-row table keyed by which eight groups supply a qualifying
//! third. Only the rows listed in `EXACT_TABLE` are known here; any other combination gets a
//! positional approximation (sorted letters dealt out in slot order). That fallback is not the
//! competition rule and brackets built from it are best-effort until the full table is supplied.

use serde::{Deserialize, Serialize};

use crate::best_thirds::source_letter;
use crate::placeholder::is_third_placeholder;
use crate::standings::StandingEntry;

/// Key used before eight real thirds exist.
pub const DEFAULT_KEY: &str = "ABCDEFGH";

/// Group winners that meet a third-placed team, in allocation order.
pub const THIRD_SLOTS: [&str; 8] = ["1A", "1B", "1D", "1E", "1G", "1I", "1K", "1L"];

const DEFAULT_CODES: [&str; 8] = [
    "3C/E/F/H/I",
    "3E/F/G/I/J",
    "3B/E/F/I/J",
    "3A/B/C/D/F",
    "3A/E/H/I/J",
    "3C/D/F/G/H",
    "3D/E/I/J/L",
    "3E/H/I/J/K",
];

const EXACT_TABLE: &[(&str, [&str; 8])] = &[(
    "ABCDEFGH",
    ["3E", "3H", "3G", "3I", "3D", "3J", "3F", "3K"],
)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct R32Pairings {
    #[serde(rename = "1A")]
    pub vs_1a: String,
    #[serde(rename = "1B")]
    pub vs_1b: String,
    #[serde(rename = "1D")]
    pub vs_1d: String,
    #[serde(rename = "1E")]
    pub vs_1e: String,
    #[serde(rename = "1G")]
    pub vs_1g: String,
    #[serde(rename = "1I")]
    pub vs_1i: String,
    #[serde(rename = "1K")]
    pub vs_1k: String,
    #[serde(rename = "1L")]
    pub vs_1l: String,
}

impl R32Pairings {
    pub fn from_codes<S: AsRef<str>>(codes: [S; 8]) -> Self {
        let [a, b, d, e, g, i, k, l] = codes.map(|c| c.as_ref().to_string());
        Self {
            vs_1a: a,
            vs_1b: b,
            vs_1d: d,
            vs_1e: e,
            vs_1g: g,
            vs_1i: i,
            vs_1k: k,
            vs_1l: l,
        }
    }

    /// Generic labels shown before the qualifying thirds are known.
    pub fn generic() -> Self {
        Self::from_codes(DEFAULT_CODES)
    }

    /// Third-place code facing `slot` (e.g. `"1E"`).
    pub fn get(&self, slot: &str) -> Option<&str> {
        let code = match slot {
            "1A" => &self.vs_1a,
            "1B" => &self.vs_1b,
            "1D" => &self.vs_1d,
            "1E" => &self.vs_1e,
            "1G" => &self.vs_1g,
            "1I" => &self.vs_1i,
            "1K" => &self.vs_1k,
            "1L" => &self.vs_1l,
            _ => return None,
        };
        Some(code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        THIRD_SLOTS
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|code| (slot, code)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingSource {
    /// Fewer or more than eight letters: generic labels.
    Generic,
    /// Row found in the known allocation table.
    Exact,
    /// Approximation for combinations missing from the table.
    Positional,
}

/// Sorted, concatenated group letters of the top eight thirds.
pub fn qualifying_thirds_key(best_thirds: &[StandingEntry]) -> String {
    if best_thirds.len() < 8 {
        return DEFAULT_KEY.to_string();
    }
    let top8 = &best_thirds[..8];
    if top8.iter().any(|e| is_third_placeholder(&e.team.name)) {
        return DEFAULT_KEY.to_string();
    }
    let mut letters: Vec<char> = top8.iter().filter_map(source_letter).collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

pub fn knockout_pairings(qualifying: &[char]) -> R32Pairings {
    lookup_pairings(qualifying).0
}

/// Same as [`knockout_pairings`], also reporting which tier produced the table.
pub fn lookup_pairings(qualifying: &[char]) -> (R32Pairings, PairingSource) {
    if qualifying.len() != 8 {
        return (R32Pairings::generic(), PairingSource::Generic);
    }

    let mut sorted = qualifying.to_vec();
    sorted.sort_unstable();
    let key: String = sorted.iter().collect();

    if let Some((_, codes)) = EXACT_TABLE.iter().find(|(k, _)| *k == key) {
        return (R32Pairings::from_codes(*codes), PairingSource::Exact);
    }

    let codes: [String; 8] = std::array::from_fn(|idx| format!("3{}", sorted[idx]));
    (R32Pairings::from_codes(codes), PairingSource::Positional)
}

pub fn pairings_for_key(key: &str) -> R32Pairings {
    let letters: Vec<char> = key.chars().collect();
    knockout_pairings(&letters)
}
