use std::collections::{BTreeMap, BTreeSet};

use strata_types::{CategoryMap, ContentId, Corpus};
use tracing::{debug, info};

use crate::index::Index;
use crate::report::{ConsistencyFinding, ConsistencyReport};

/// Builder result: the report always, the index only when the report
/// is clean. A collided or drifted registry cannot answer lookups
/// truthfully, so there is no degraded index to offer.
#[derive(Clone, Debug)]
pub struct BuildOutcome {
    pub index: Option<Index>,
    pub report: ConsistencyReport,
}

/// Aggregate the corpus into an [`Index`], checking it against the
/// separately declared category registry on the way.
///
/// The declared map is the legacy second source of truth; the source
/// grouping inside `corpus` is authoritative. Every disagreement
/// between the two is reported and is fatal to the build.
pub fn build(corpus: &Corpus, declared: &CategoryMap) -> BuildOutcome {
    let mut findings = Vec::new();

    // Id collisions first: every other check assumes one record per id.
    let mut occurrences: BTreeMap<&ContentId, usize> = BTreeMap::new();
    for id in corpus.ids() {
        *occurrences.entry(id).or_insert(0) += 1;
    }
    for (id, count) in &occurrences {
        if *count > 1 {
            debug!(id = %id, count, "id collision");
            findings.push(ConsistencyFinding::id_collision(id, *count));
        }
    }

    // Actual grouping, straight from the corpus's source layout.
    let mut actual: BTreeMap<&str, Vec<&ContentId>> = BTreeMap::new();
    for group in corpus.categories() {
        let ids = actual.entry(group.category.as_str()).or_default();
        for item in &group.items {
            ids.push(&item.id);
        }
    }

    // Category name sets must agree before per-category contents can.
    for category in declared.keys() {
        if !actual.contains_key(category.as_str()) {
            findings.push(ConsistencyFinding::unknown_category(category, true));
        }
    }
    for category in actual.keys() {
        if !declared.contains_key(*category) {
            findings.push(ConsistencyFinding::unknown_category(category, false));
        }
    }

    // Per-category set comparison. A declared id that exists nowhere in
    // the corpus is a dangling entry; one that exists but is grouped
    // elsewhere is drift, as is a grouped id the declaration misses.
    for (category, declared_ids) in declared {
        let Some(actual_ids) = actual.get(category.as_str()) else {
            continue;
        };
        let declared_set: BTreeSet<&ContentId> = declared_ids.iter().collect();
        let actual_set: BTreeSet<&ContentId> = actual_ids.iter().copied().collect();

        let mut missing = Vec::new();
        for id in declared_set.difference(&actual_set) {
            if occurrences.contains_key(*id) {
                missing.push((*id).clone());
            } else {
                findings.push(ConsistencyFinding::dangling(category, *id));
            }
        }
        let undeclared: Vec<ContentId> = actual_set
            .difference(&declared_set)
            .map(|id| (*id).clone())
            .collect();

        if !missing.is_empty() || !undeclared.is_empty() {
            findings.push(ConsistencyFinding::drift(category, missing, undeclared));
        }
    }

    let report = ConsistencyReport { findings };
    info!(
        records = corpus.len(),
        categories = corpus.categories().len(),
        findings = report.findings.len(),
        "registry build complete"
    );

    if report.is_fatal() {
        return BuildOutcome {
            index: None,
            report,
        };
    }

    let mut items = BTreeMap::new();
    let mut categories = BTreeMap::new();
    let mut category_of = BTreeMap::new();
    for group in corpus.categories() {
        let mut ids = Vec::with_capacity(group.items.len());
        for item in &group.items {
            ids.push(item.id.clone());
            items.insert(item.id.clone(), item.clone());
            category_of.insert(item.id.clone(), group.category.clone());
        }
        categories.insert(group.category.clone(), ids);
    }

    BuildOutcome {
        index: Some(Index::new(items, categories, category_of)),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_types::test_support::item;
    use strata_types::CategorySource;
    use crate::report::ConsistencyFindingKind;

    fn declared(entries: &[(&str, &[&str])]) -> CategoryMap {
        entries
            .iter()
            .map(|(category, ids)| {
                (
                    category.to_string(),
                    ids.iter().map(|id| ContentId::new(*id)).collect(),
                )
            })
            .collect()
    }

    fn two_category_corpus() -> Corpus {
        Corpus::new(vec![
            CategorySource::new(
                "rehabilitation",
                vec![
                    item("rehab-mobility-aids-overview"),
                    item("rehab-gait-training"),
                ],
            ),
            CategorySource::new("study-skills", vec![item("study-skills-spaced-repetition")]),
        ])
        .unwrap()
    }

    #[test]
    fn agreeing_registry_builds_an_index() {
        let corpus = two_category_corpus();
        let declared = declared(&[
            (
                "rehabilitation",
                &["rehab-mobility-aids-overview", "rehab-gait-training"],
            ),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.report.findings.is_empty());
        let index = outcome.index.expect("clean build");
        assert_eq!(index.len(), 3);
        assert_eq!(index.get_by_category("rehabilitation").len(), 2);
    }

    #[test]
    fn declaration_order_does_not_matter_within_a_category() {
        let corpus = two_category_corpus();
        let declared = declared(&[
            (
                "rehabilitation",
                &["rehab-gait-training", "rehab-mobility-aids-overview"],
            ),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.report.findings.is_empty());
        // The index keeps source order, not declaration order.
        let index = outcome.index.unwrap();
        let ids: Vec<&str> = index
            .get_by_category("rehabilitation")
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rehab-mobility-aids-overview", "rehab-gait-training"]);
    }

    #[test]
    fn id_collision_reports_and_withholds_the_index() {
        let corpus = Corpus::new(vec![CategorySource::new(
            "rehabilitation",
            vec![
                item("rehab-mobility-aids-overview"),
                item("rehab-mobility-aids-overview"),
            ],
        )])
        .unwrap();
        let declared = declared(&[("rehabilitation", &["rehab-mobility-aids-overview"])]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.index.is_none());
        assert_eq!(
            outcome.report.count_of(ConsistencyFindingKind::IdCollision),
            1
        );
        let finding = &outcome.report.findings[0];
        assert!(finding.message.contains("2 records"));
    }

    #[test]
    fn unregistered_item_is_drift() {
        let corpus = two_category_corpus();
        // rehab-gait-training was added to the category module but the
        // registry constant was never updated.
        let declared = declared(&[
            ("rehabilitation", &["rehab-mobility-aids-overview"]),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.index.is_none());
        assert_eq!(
            outcome.report.count_of(ConsistencyFindingKind::RegistryDrift),
            1
        );
        assert!(outcome.report.findings[0]
            .message
            .contains("rehab-gait-training"));
    }

    #[test]
    fn declared_id_with_no_record_is_dangling() {
        let corpus = two_category_corpus();
        let declared = declared(&[
            (
                "rehabilitation",
                &[
                    "rehab-mobility-aids-overview",
                    "rehab-gait-training",
                    "rehab-retired-topic",
                ],
            ),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.index.is_none());
        assert_eq!(
            outcome
                .report
                .count_of(ConsistencyFindingKind::DanglingRegistryEntry),
            1
        );
        // The dangling id is not double-reported as drift.
        assert_eq!(
            outcome.report.count_of(ConsistencyFindingKind::RegistryDrift),
            0
        );
    }

    #[test]
    fn undeclared_category_is_drift() {
        let corpus = two_category_corpus();
        let declared = declared(&[(
            "rehabilitation",
            &["rehab-mobility-aids-overview", "rehab-gait-training"],
        )]);

        let outcome = build(&corpus, &declared);
        assert!(outcome.index.is_none());
        assert!(outcome
            .report
            .findings
            .iter()
            .any(|f| f.message.contains("study-skills")));
    }

    #[test]
    fn rebuild_from_flattened_index_reproduces_it() {
        let corpus = two_category_corpus();
        let declared = declared(&[
            (
                "rehabilitation",
                &["rehab-mobility-aids-overview", "rehab-gait-training"],
            ),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let first = build(&corpus, &declared).index.expect("clean build");
        let second = build(&first.to_corpus(), &declared)
            .index
            .expect("round-trip build");
        assert_eq!(first, second);
    }

    #[test]
    fn build_is_deterministic() {
        let corpus = two_category_corpus();
        let declared = declared(&[
            (
                "rehabilitation",
                &["rehab-mobility-aids-overview", "rehab-gait-training"],
            ),
            ("study-skills", &["study-skills-spaced-repetition"]),
        ]);

        let first = build(&corpus, &declared);
        let second = build(&corpus, &declared);
        assert_eq!(first.report, second.report);
        assert_eq!(first.index.unwrap(), second.index.unwrap());
    }
}
