/// A fixture-side team reference, parsed once from its raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// Already a team name (or a code nobody understands yet).
    Literal(&'a str),
    /// `1A`, `2K`, `3C`: the team holding `rank` in group `letter`.
    GroupRank { rank: u8, letter: char },
    /// `W74` or `W 74`.
    MatchWinner(u32),
    /// `L101` or `L 101`.
    MatchLoser(u32),
    /// `3(A/B/C/D/F)`: whichever third-placed team the pairing table sends to the home slot.
    QualifyingThird(&'a str),
}

impl<'a> Placeholder<'a> {
    pub fn parse(code: &'a str) -> Self {
        if code.starts_with("3(") {
            return Placeholder::QualifyingThird(code);
        }
        if let Some(parsed) = parse_group_rank(code) {
            return parsed;
        }
        if let Some(n) = parse_match_ref(code, 'W') {
            return Placeholder::MatchWinner(n);
        }
        if let Some(n) = parse_match_ref(code, 'L') {
            return Placeholder::MatchLoser(n);
        }
        Placeholder::Literal(code)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Placeholder::Literal(_))
    }
}

/// True when `name` is still one of the symbolic codes rather than a team.
pub fn is_placeholder(name: &str) -> bool {
    !Placeholder::parse(name).is_literal()
}

/// `3A`..`3L`: the synthetic rows the best-thirds ranker emits while gated.
pub fn is_third_placeholder(name: &str) -> bool {
    matches!(
        Placeholder::parse(name),
        Placeholder::GroupRank { rank: 3, .. }
    )
}

fn parse_group_rank(code: &str) -> Option<Placeholder<'_>> {
    let mut chars = code.chars();
    let rank = chars.next()?;
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('1'..='3').contains(&rank) || !('A'..='L').contains(&letter) {
        return None;
    }
    Some(Placeholder::GroupRank {
        rank: rank as u8 - b'0',
        letter,
    })
}

fn parse_match_ref(code: &str, prefix: char) -> Option<u32> {
    let rest = code.strip_prefix(prefix)?;
    let digits = rest
        .strip_prefix(|c: char| c.is_whitespace())
        .unwrap_or(rest);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
