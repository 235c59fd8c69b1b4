use rayon::prelude::*;
use strata_types::{ComplexityLevel, ContentItem, Corpus, LevelContent};
use tracing::{debug, info};

use crate::finding::{Finding, ValidationReport};

/// Validate a single record in isolation.
///
/// Checks are local by construction: nothing here looks at other
/// records, so corpus-wide rules (duplicate ids, unresolvable
/// cross-references) cannot and do not appear in this report.
pub fn validate(item: &ContentItem) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_identity(item, &mut report);
    check_level_set(item, &mut report);
    for (key, content) in &item.levels {
        check_level_content(item, *key, content, &mut report);
    }
    check_descriptors(item, &mut report);
    check_cross_references(item, &mut report);

    debug!(
        item = %item.id,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated record"
    );
    report
}

/// Validate every record in the corpus.
///
/// Each record is independent, so the pass fans out across the rayon
/// pool and fans back in by merging the per-record reports in corpus
/// order. No state is shared between workers; determinism comes from
/// the ordered merge, not from scheduling.
pub fn validate_corpus(corpus: &Corpus) -> ValidationReport {
    let items: Vec<&ContentItem> = corpus.items().collect();
    let records = items.len();
    let per_item: Vec<ValidationReport> = items.into_par_iter().map(validate).collect();

    let mut report = ValidationReport::new();
    for item_report in per_item {
        report.merge(item_report);
    }

    info!(
        records,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "schema validation pass complete"
    );
    report
}

fn check_identity(item: &ContentItem, report: &mut ValidationReport) {
    if item.id.as_str().is_empty() {
        report.push(
            Finding::error(&item.id, "missing-id", "record id is empty").with_field("id"),
        );
    } else if !item.id.is_well_formed() {
        report.push(
            Finding::warning(
                &item.id,
                "malformed-id",
                format!(
                    "id '{}' is not a namespaced lowercase slug",
                    item.id
                ),
            )
            .with_field("id"),
        );
    }

    if item.name.trim().is_empty() {
        report.push(
            Finding::error(&item.id, "missing-name", "record name is empty").with_field("name"),
        );
    }

    if item.version == 0 {
        report.push(
            Finding::error(
                &item.id,
                "invalid-version",
                "version must be a positive integer",
            )
            .with_field("version"),
        );
    }
}

fn check_level_set(item: &ContentItem, report: &mut ValidationReport) {
    for missing in item.missing_levels() {
        report.push(
            Finding::error(
                &item.id,
                "incomplete-level-set",
                format!("incomplete level set: tier {} is missing", missing.tier()),
            )
            .with_field("levels"),
        );
    }
}

fn check_level_content(
    item: &ContentItem,
    key: ComplexityLevel,
    content: &LevelContent,
    report: &mut ValidationReport,
) {
    let field = |suffix: &str| format!("levels.{}.{}", key.tier(), suffix);

    if content.level != key {
        report.push(
            Finding::error(
                &item.id,
                "level-key-mismatch",
                format!(
                    "content filed under tier {} declares tier {}",
                    key.tier(),
                    content.level.tier()
                ),
            )
            .with_field(field("level")),
        );
    }

    if content.summary.trim().is_empty() {
        report.push(
            Finding::error(&item.id, "missing-summary", "summary is empty")
                .with_field(field("summary")),
        );
    }

    if content.explanation.trim().is_empty() {
        report.push(
            Finding::error(&item.id, "missing-explanation", "explanation is empty")
                .with_field(field("explanation")),
        );
    }

    let mut seen = std::collections::HashSet::new();
    for term in &content.key_terms {
        if term.term.trim().is_empty() {
            report.push(
                Finding::error(&item.id, "empty-key-term", "key term has an empty term")
                    .with_field(field("key_terms")),
            );
            continue;
        }
        if term.definition.trim().is_empty() {
            report.push(
                Finding::error(
                    &item.id,
                    "empty-key-term-definition",
                    format!("key term '{}' has an empty definition", term.term),
                )
                .with_field(field("key_terms")),
            );
        }
        if !seen.insert(term.term.as_str()) {
            report.push(
                Finding::error(
                    &item.id,
                    "duplicate-key-term",
                    format!("key term '{}' appears more than once in this tier", term.term),
                )
                .with_field(field("key_terms")),
            );
        }
    }
}

fn check_descriptors(item: &ContentItem, report: &mut ValidationReport) {
    for (position, name) in item.alternate_names.iter().enumerate() {
        if name.trim().is_empty() {
            report.push(
                Finding::warning(
                    &item.id,
                    "empty-alternate-name",
                    "alternate name entry is an empty string",
                )
                .with_field(format!("alternate_names.{position}")),
            );
        }
    }

    for citation in &item.citations {
        if citation.title.trim().is_empty() {
            report.push(
                Finding::warning(
                    &item.id,
                    "empty-citation-title",
                    format!("citation '{}' has an empty title", citation.id),
                )
                .with_field("citations"),
            );
        }
    }

    for asset in &item.media {
        if asset.filename.trim().is_empty() || asset.title.trim().is_empty() {
            report.push(
                Finding::warning(
                    &item.id,
                    "incomplete-media-descriptor",
                    format!("media asset '{}' is missing filename or title", asset.id),
                )
                .with_field("media"),
            );
        }
    }

    for topic in &item.tags.topics {
        if topic.trim().is_empty() {
            report.push(
                Finding::warning(&item.id, "empty-topic", "topic entry is an empty string")
                    .with_field("tags.topics"),
            );
        }
    }

    for keyword in &item.tags.keywords {
        if keyword.trim().is_empty() {
            report.push(
                Finding::warning(
                    &item.id,
                    "empty-keyword",
                    "keyword entry is an empty string",
                )
                .with_field("tags.keywords"),
            );
        }
    }
}

fn check_cross_references(item: &ContentItem, report: &mut ValidationReport) {
    for (position, xref) in item.cross_references.iter().enumerate() {
        let field = format!("cross_references.{position}");
        if xref.target_id.as_str().is_empty() {
            report.push(
                Finding::error(
                    &item.id,
                    "empty-cross-reference-target",
                    "cross-reference has an empty target id",
                )
                .with_field(field),
            );
        } else if xref.target_id == item.id {
            // Resolvability against the rest of the corpus is the graph
            // resolver's job; a self-edge is visible locally.
            report.push(
                Finding::warning(
                    &item.id,
                    "self-reference",
                    format!("record cross-references itself as '{}'", xref.relationship),
                )
                .with_field(field),
            );
        }
    }
}
