use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Content category within a level's study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StudySection {
    Vocabulary,
    Grammar,
    Culture,
    Reading,
    Practice,
}

impl StudySection {
    pub const ALL: [StudySection; 5] = [
        StudySection::Vocabulary,
        StudySection::Grammar,
        StudySection::Culture,
        StudySection::Reading,
        StudySection::Practice,
    ];

    /// Stable identifier used in persisted section lists.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            StudySection::Vocabulary => "vocabulary",
            StudySection::Grammar => "grammar",
            StudySection::Culture => "culture",
            StudySection::Reading => "reading",
            StudySection::Practice => "exercises",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StudySection::Vocabulary => "Vocabulary",
            StudySection::Grammar => "Grammar",
            StudySection::Culture => "Culture",
            StudySection::Reading => "Reading",
            StudySection::Practice => "Practice",
        }
    }
}

impl fmt::Display for StudySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown study section: {0:?}")]
pub struct ParseSectionError(pub String);

impl FromStr for StudySection {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudySection::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| ParseSectionError(s.to_owned()))
    }
}
