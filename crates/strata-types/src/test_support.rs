//! Fixture builders shared by the workspace's test suites.
//!
//! Compiled only for tests (or under the `test-support` feature so
//! downstream crates' dev builds can reuse the same fixtures).

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::{
    ClinicalRelevance, ComplexityLevel, ContentItem, ContentKind, ContentStatus, ContentTags,
    CrossReference, LevelContent, Relationship,
};

/// A well-formed record with all five tiers and no cross-references.
pub fn item(id: &str) -> ContentItem {
    item_with_levels(id, &[1, 2, 3, 4, 5])
}

/// A record authored only at the given tiers. Out-of-range tier
/// numbers panic; fixtures are supposed to be obviously wrong at the
/// call site, not at run time.
pub fn item_with_levels(id: &str, tiers: &[u8]) -> ContentItem {
    let mut levels = BTreeMap::new();
    for &tier in tiers {
        let level = ComplexityLevel::try_from(tier).expect("fixture tier in 1-5");
        levels.insert(
            level,
            LevelContent::new(
                level,
                format!("{id} summary at {level}"),
                format!("{id} explanation at {level}"),
            )
            .with_key_term("mobility", "the ability to move around"),
        );
    }

    let authored_at = Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap();
    ContentItem {
        id: id.into(),
        kind: ContentKind::Concept,
        name: id.replace('-', " "),
        alternate_names: Vec::new(),
        levels,
        media: Vec::new(),
        citations: Vec::new(),
        cross_references: Vec::new(),
        tags: ContentTags::new(ClinicalRelevance::Medium),
        created_at: authored_at,
        updated_at: authored_at,
        version: 1,
        status: ContentStatus::Published,
        contributors: Vec::new(),
    }
}

/// Attach a cross-reference to a fixture record.
pub fn with_xref(mut item: ContentItem, target: &str, relationship: Relationship) -> ContentItem {
    item.cross_references.push(CrossReference::new(
        target,
        ContentKind::Concept,
        relationship,
        format!("see {target}"),
    ));
    item
}
