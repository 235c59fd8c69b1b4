use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five complexity tiers every record is authored at.
///
/// Tier numbers are stable wire values; the variant names describe the
/// audience each tier is written for, from a curious child up to an
/// attending physician.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ComplexityLevel {
    /// Tier 1 — children, everyday words and analogies.
    Child,
    /// Tier 2 — adult patients and caregivers, plain language.
    Patient,
    /// Tier 3 — nursing and allied health, clinical terminology.
    Nurse,
    /// Tier 4 — medical students, full pathophysiology.
    Student,
    /// Tier 5 — physicians, expert reasoning and current guidelines.
    Physician,
}

impl ComplexityLevel {
    /// All tiers in ascending order.
    pub fn all() -> [ComplexityLevel; 5] {
        [
            ComplexityLevel::Child,
            ComplexityLevel::Patient,
            ComplexityLevel::Nurse,
            ComplexityLevel::Student,
            ComplexityLevel::Physician,
        ]
    }

    /// The numeric tier, 1 through 5.
    pub fn tier(self) -> u8 {
        self as u8 + 1
    }

    /// The next tier down, if any.
    pub fn lower(self) -> Option<ComplexityLevel> {
        match self {
            ComplexityLevel::Child => None,
            ComplexityLevel::Patient => Some(ComplexityLevel::Child),
            ComplexityLevel::Nurse => Some(ComplexityLevel::Patient),
            ComplexityLevel::Student => Some(ComplexityLevel::Nurse),
            ComplexityLevel::Physician => Some(ComplexityLevel::Student),
        }
    }
}

impl From<ComplexityLevel> for u8 {
    fn from(level: ComplexityLevel) -> u8 {
        level.tier()
    }
}

impl TryFrom<u8> for ComplexityLevel {
    type Error = LevelError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(ComplexityLevel::Child),
            2 => Ok(ComplexityLevel::Patient),
            3 => Ok(ComplexityLevel::Nurse),
            4 => Ok(ComplexityLevel::Student),
            5 => Ok(ComplexityLevel::Physician),
            other => Err(LevelError::OutOfRange(other)),
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.tier())
    }
}

/// Errors from tier-number conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("complexity level {0} is outside the 1-5 tier range")]
    OutOfRange(u8),
}

/// One glossary entry attached to a tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
}

impl KeyTerm {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// The authored payload for one complexity tier of a record.
///
/// `level` repeats the tier the content is filed under in the parent's
/// `levels` map; the two must agree, and the schema validator treats a
/// mismatch as an error rather than trusting either side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelContent {
    pub level: ComplexityLevel,
    pub summary: String,
    pub explanation: String,
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analogies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

impl LevelContent {
    pub fn new(
        level: ComplexityLevel,
        summary: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            level,
            summary: summary.into(),
            explanation: explanation.into(),
            key_terms: Vec::new(),
            analogies: Vec::new(),
            examples: Vec::new(),
            clinical_notes: None,
        }
    }

    pub fn with_key_term(mut self, term: impl Into<String>, definition: impl Into<String>) -> Self {
        self.key_terms.push(KeyTerm::new(term, definition));
        self
    }
}
