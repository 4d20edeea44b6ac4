use std::collections::HashMap;

use once_cell::sync::Lazy;

// Provider spellings and playoff labels rewritten to the names used in rosters and fixtures.
const SYNONYMS: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("United States of America", "USA"),
    ("Bosnia and Herzegovina", "Bosnia"),
    ("Bosnia-Herzegovina", "Bosnia"),
    ("Czech Republic", "Czechia"),
    ("North Macedonia", "N. Macedonia"),
    ("Northern Ireland", "N. Ireland"),
    ("Republic of Ireland", "Ireland"),
    ("Ireland Republic", "Ireland"),
    ("Turkey", "Türkiye"),
    ("Cape Verde", "Cabo Verde"),
    ("Cape Verde Islands", "Cabo Verde"),
    ("Central African Republic", "CAR"),
    ("Congo DR", "DR Congo"),
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Cote d'Ivoire", "Côte d'Ivoire"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("Curacao", "Curaçao"),
    ("Equatorial Guinea", "Eq. Guinea"),
    ("China PR", "China"),
    ("Iran", "IR Iran"),
    ("Korea Republic", "South Korea"),
    ("United Arab Emirates", "UAE"),
    ("Winner Playoff Path A", "Path A [UEFA]"),
    ("Winner Path A", "Path A [UEFA]"),
    ("Winner Playoff Path B", "Path B [UEFA]"),
    ("Winner Path B", "Path B [UEFA]"),
    ("Winner Playoff Path C", "Path C [UEFA]"),
    ("Winner Path C", "Path C [UEFA]"),
    ("Winner Playoff Path D", "Path D [UEFA]"),
    ("Winner Path D", "Path D [UEFA]"),
    ("Intercontinental Playoff Path 1", "Pathway 1"),
    ("Winner Pathway 1", "Pathway 1"),
    ("Winner of Intercontinental Playoff Path 1", "Pathway 1"),
    ("WINNER OF INTERCONTINENTAL PLAYOFF PATH 1", "Pathway 1"),
    ("Intercontinental Playoff Path 2", "Pathway 2"),
    ("Winner Pathway 2", "Pathway 2"),
    ("Winner of Intercontinental Playoff Path 2", "Pathway 2"),
    ("WINNER OF INTERCONTINENTAL PLAYOFF PATH 2", "Pathway 2"),
];

static SYNONYM_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SYNONYMS.iter().copied().collect());

/// Canonical join key for a raw provider or fixture name. Unknown names pass through.
pub fn canonical_name(raw: &str) -> &str {
    SYNONYM_INDEX.get(raw).copied().unwrap_or(raw)
}
