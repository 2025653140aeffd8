use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── TIERS ─────────────────────────────────────────────────────────────────────
//

/// Difficulty band. Variants are declared easiest first; the course opens at
/// `C1` and closes at `A2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    C1,
    C2,
    B1,
    B2,
    A1,
    A2,
}

impl Tier {
    pub const ALL: [Tier; 6] = [Tier::C1, Tier::C2, Tier::B1, Tier::B2, Tier::A1, Tier::A2];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Tier::C1 => "C1",
            Tier::C2 => "C2",
            Tier::B1 => "B1",
            Tier::B2 => "B2",
            Tier::A1 => "A1",
            Tier::A2 => "A2",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Tier::C1 => "Beginner",
            Tier::C2 => "Elementary",
            Tier::B1 => "Intermediate",
            Tier::B2 => "Upper Intermediate",
            Tier::A1 => "Advanced",
            Tier::A2 => "Expert",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Tier::C1 => "Basic German - Everyday expressions and basic phrases",
            Tier::C2 => "Elementary German - Simple conversations and topics",
            Tier::B1 => "Intermediate German - Complex topics and situations",
            Tier::B2 => "Upper Intermediate - Fluent discussions on various topics",
            Tier::A1 => "Advanced German - Professional and academic contexts",
            Tier::A2 => "Expert German - Native-like fluency and understanding",
        }
    }

    /// Both levels of this tier, in sequence order.
    #[must_use]
    pub fn levels(self) -> [LevelId; 2] {
        [
            LevelId::new(self, SubLevel::First),
            LevelId::new(self, SubLevel::Second),
        ]
    }

    fn from_code(code: &str) -> Option<Self> {
        Tier::ALL.into_iter().find(|tier| tier.code() == code)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubLevel {
    First,
    Second,
}

impl SubLevel {
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            SubLevel::First => 1,
            SubLevel::Second => 2,
        }
    }
}

//
// ─── LEVEL IDS ─────────────────────────────────────────────────────────────────
//

/// One of the twelve course levels, e.g. `C1.1`.
///
/// Ordering follows [`LEVEL_SEQUENCE`], which is the single source of truth for
/// progress.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LevelId {
    tier: Tier,
    sub: SubLevel,
}

pub const LEVEL_COUNT: usize = 12;

/// The fixed, total order of all levels.
pub const LEVEL_SEQUENCE: [LevelId; LEVEL_COUNT] = [
    LevelId::new(Tier::C1, SubLevel::First),
    LevelId::new(Tier::C1, SubLevel::Second),
    LevelId::new(Tier::C2, SubLevel::First),
    LevelId::new(Tier::C2, SubLevel::Second),
    LevelId::new(Tier::B1, SubLevel::First),
    LevelId::new(Tier::B1, SubLevel::Second),
    LevelId::new(Tier::B2, SubLevel::First),
    LevelId::new(Tier::B2, SubLevel::Second),
    LevelId::new(Tier::A1, SubLevel::First),
    LevelId::new(Tier::A1, SubLevel::Second),
    LevelId::new(Tier::A2, SubLevel::First),
    LevelId::new(Tier::A2, SubLevel::Second),
];

impl LevelId {
    pub const FIRST: LevelId = LEVEL_SEQUENCE[0];
    pub const LAST: LevelId = LEVEL_SEQUENCE[LEVEL_COUNT - 1];

    #[must_use]
    pub const fn new(tier: Tier, sub: SubLevel) -> Self {
        Self { tier, sub }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn sub_level(&self) -> SubLevel {
        self.sub
    }

    /// Position in [`LEVEL_SEQUENCE`].
    #[must_use]
    pub fn index(&self) -> usize {
        LEVEL_SEQUENCE
            .iter()
            .position(|level| level == self)
            .unwrap_or(LEVEL_COUNT)
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        LEVEL_SEQUENCE.get(index).copied()
    }

    /// The level after this one, or `None` for the last level.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn all() -> impl Iterator<Item = LevelId> {
        LEVEL_SEQUENCE.into_iter()
    }
}

impl PartialOrd for LevelId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LevelId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Debug for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelId({self})")
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tier.code(), self.sub.number())
    }
}

/// Error type for parsing a level identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level identifier: {raw:?}")]
pub struct ParseLevelError {
    raw: String,
}

impl FromStr for LevelId {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelError { raw: s.to_owned() };
        let (tier, sub) = s.trim().split_once('.').ok_or_else(err)?;
        let tier = Tier::from_code(tier).ok_or_else(err)?;
        let sub = match sub {
            "1" => SubLevel::First,
            "2" => SubLevel::Second,
            _ => return Err(err()),
        };
        Ok(Self::new(tier, sub))
    }
}

impl TryFrom<String> for LevelId {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LevelId> for String {
    fn from(level: LevelId) -> Self {
        level.to_string()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_c1_and_ends_at_a2() {
        assert_eq!(LevelId::FIRST.to_string(), "C1.1");
        assert_eq!(LevelId::LAST.to_string(), "A2.2");
        let names: Vec<String> = LevelId::all().map(|l| l.to_string()).collect();
        assert_eq!(
            names,
            [
                "C1.1", "C1.2", "C2.1", "C2.2", "B1.1", "B1.2", "B2.1", "B2.2", "A1.1", "A1.2",
                "A2.1", "A2.2"
            ]
        );
    }

    #[test]
    fn index_matches_sequence_position() {
        for (i, level) in LEVEL_SEQUENCE.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(LevelId::from_index(i), Some(*level));
        }
        assert_eq!(LevelId::from_index(LEVEL_COUNT), None);
    }

    #[test]
    fn next_walks_the_sequence_and_stops_at_last() {
        let c12: LevelId = "C1.2".parse().unwrap();
        assert_eq!(LevelId::FIRST.next(), Some(c12));
        let b11: LevelId = "B1.1".parse().unwrap();
        assert_eq!("C2.2".parse::<LevelId>().unwrap().next(), Some(b11));
        assert_eq!(LevelId::LAST.next(), None);
        assert!(LevelId::LAST.is_last());
    }

    #[test]
    fn ordering_follows_sequence_not_tier_letters() {
        let c2: LevelId = "C2.1".parse().unwrap();
        let b1: LevelId = "B1.1".parse().unwrap();
        assert!(c2 < b1);
    }

    #[test]
    fn parse_rejects_unknown_identifiers() {
        for raw in ["", "C3.1", "C1.3", "C1", "c1.1", "C1-1"] {
            assert!(raw.parse::<LevelId>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn serde_uses_display_form() {
        let level: LevelId = "B2.2".parse().unwrap();
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, "\"B2.2\"");
        let back: LevelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
        assert!(serde_json::from_str::<LevelId>("\"Z9.9\"").is_err());
    }

    #[test]
    fn tier_levels_are_adjacent() {
        for tier in Tier::ALL {
            let [first, second] = tier.levels();
            assert_eq!(first.next(), Some(second));
        }
    }
}
