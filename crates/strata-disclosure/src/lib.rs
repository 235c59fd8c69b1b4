//! Strata Progressive Disclosure Selector
//!
//! The runtime-facing read surface: resolve a record at a requested
//! complexity tier against the built [`Index`]. Selection runs after
//! the build pipeline but is deliberately decoupled from it, so the
//! selector stays correct even against a corpus that never passed
//! validation — a missing tier falls back (or errors, under
//! [`FallbackMode::Strict`]) instead of panicking.
//!
//! The index is immutable, so any number of readers can select
//! concurrently without coordination.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use strata_registry::Index;
use strata_types::{ComplexityLevel, ContentId, ContentTags, LevelContent};
use thiserror::Error;

/// What to do when the requested tier is not authored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Serve the highest authored tier at or below the request.
    #[default]
    NearestLower,
    /// Only the exact tier will do.
    Strict,
}

/// The expected miss cases. `NotFound` is ordinary — callers looking
/// up user-supplied ids must handle it; it is not an invariant breach.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("no record with id '{id}'")]
    NotFound { id: ContentId },

    #[error("record '{id}' has no content at tier {requested} (or below, under nearest-lower)")]
    LevelUnavailable {
        id: ContentId,
        requested: ComplexityLevel,
    },
}

/// Resolve one record at one tier.
///
/// Exact hits return directly. Under [`FallbackMode::NearestLower`] a
/// missing tier walks down to the closest authored tier below the
/// request — on a validated corpus that walk never happens, since
/// every record carries all five tiers, but selection must hold up
/// against unvalidated input too.
pub fn select<'a>(
    index: &'a Index,
    id: &ContentId,
    requested: ComplexityLevel,
    fallback: FallbackMode,
) -> Result<&'a LevelContent, SelectError> {
    let item = index
        .get_content_by_id(id)
        .ok_or_else(|| SelectError::NotFound { id: id.clone() })?;

    if let Some(content) = item.level(requested) {
        return Ok(content);
    }

    match fallback {
        FallbackMode::Strict => Err(SelectError::LevelUnavailable {
            id: id.clone(),
            requested,
        }),
        FallbackMode::NearestLower => {
            let mut tier = requested.lower();
            while let Some(level) = tier {
                if let Some(content) = item.level(level) {
                    return Ok(content);
                }
                tier = level.lower();
            }
            Err(SelectError::LevelUnavailable {
                id: id.clone(),
                requested,
            })
        }
    }
}

/// The record's tags, as authored.
///
/// Tags are declared once per record, not per tier, so this is a
/// direct passthrough rather than a union over tiers — a recurring
/// point of confusion for callers expecting per-level tagging.
pub fn tags_across_levels<'a>(index: &'a Index, id: &ContentId) -> Option<&'a ContentTags> {
    index.get_content_by_id(id).map(|item| &item.tags)
}

/// The tiers a record is actually authored at, ascending. Empty when
/// the id does not resolve.
pub fn available_levels(index: &Index, id: &ContentId) -> Vec<ComplexityLevel> {
    index
        .get_content_by_id(id)
        .map(|item| item.authored_levels())
        .unwrap_or_default()
}
