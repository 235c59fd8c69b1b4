use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ContentId;
use crate::level::{ComplexityLevel, LevelContent};
use crate::source::{Citation, MediaAsset};
use crate::tags::ContentTags;
use crate::xref::CrossReference;

/// What kind of knowledge a record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Structure,
    System,
    Pathway,
    Process,
    Condition,
    Concept,
    Topic,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentKind::Structure => "structure",
            ContentKind::System => "system",
            ContentKind::Pathway => "pathway",
            ContentKind::Process => "process",
            ContentKind::Condition => "condition",
            ContentKind::Concept => "concept",
            ContentKind::Topic => "topic",
        };
        write!(f, "{name}")
    }
}

/// Editorial lifecycle state of a record.
///
/// Archived records are soft-retired: they stay in the corpus and keep
/// resolving as cross-reference targets, because other records' edges
/// may still point at them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    /// Legal lifecycle moves: draft → published → archived. A record
    /// never moves backwards and is never hard-deleted.
    pub fn can_transition_to(self, next: ContentStatus) -> bool {
        matches!(
            (self, next),
            (ContentStatus::Draft, ContentStatus::Published)
                | (ContentStatus::Published, ContentStatus::Archived)
        )
    }

    pub fn is_retired(self) -> bool {
        matches!(self, ContentStatus::Archived)
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        };
        write!(f, "{name}")
    }
}

/// One educational topic record: the unit of knowledge in the corpus.
///
/// Every record is authored at all five complexity tiers. The `levels`
/// map is keyed by tier, and each entry's own `level` field must agree
/// with its key — the schema validator enforces both sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<String>,
    pub levels: BTreeMap<ComplexityLevel, LevelContent>,
    #[serde(default)]
    pub media: Vec<MediaAsset>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
    pub tags: ContentTags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Monotonically increasing revision counter, starting at 1.
    pub version: u32,
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
}

impl ContentItem {
    /// The tiers this record is actually authored at, ascending.
    pub fn authored_levels(&self) -> Vec<ComplexityLevel> {
        self.levels.keys().copied().collect()
    }

    /// The tiers missing from the full five-tier set, ascending.
    pub fn missing_levels(&self) -> Vec<ComplexityLevel> {
        ComplexityLevel::all()
            .into_iter()
            .filter(|level| !self.levels.contains_key(level))
            .collect()
    }

    pub fn level(&self, level: ComplexityLevel) -> Option<&LevelContent> {
        self.levels.get(&level)
    }
}
