//! End-to-end pipeline behavior over small authored corpora.

use std::collections::BTreeMap;

use strata_pipeline::{run, PipelineOptions};
use strata_types::test_support::{item, item_with_levels, with_xref};
use strata_types::{CategoryMap, CategorySource, ContentId, ContentItem, Corpus, Relationship};

fn declared_for(corpus: &Corpus) -> CategoryMap {
    let mut declared: CategoryMap = BTreeMap::new();
    for group in corpus.categories() {
        declared.insert(
            group.category.clone(),
            group.items.iter().map(|item| item.id.clone()).collect(),
        );
    }
    declared
}

fn rehab_corpus(items: Vec<ContentItem>) -> Corpus {
    Corpus::new(vec![CategorySource::new("rehabilitation", items)]).unwrap()
}

#[test]
fn clean_corpus_is_publishable() {
    let a = with_xref(
        item("rehab-mobility-aids-overview"),
        "rehab-wheelchair-skills",
        Relationship::Child,
    );
    let b = with_xref(
        item("rehab-wheelchair-skills"),
        "rehab-mobility-aids-overview",
        Relationship::Parent,
    );
    let corpus = rehab_corpus(vec![a, b]);
    let declared = declared_for(&corpus);

    let outcome = run(&corpus, &declared, PipelineOptions::publish_gate());

    assert!(outcome.report.summary.publishable);
    assert_eq!(outcome.report.summary.schema_errors, 0);
    assert!(outcome.index.is_some());
    assert!(outcome.graph.is_some());

    let index = outcome.index.unwrap();
    for id in index.ids() {
        assert_eq!(&index.get_content_by_id(id).unwrap().id, id);
    }
}

#[test]
fn schema_gate_skips_barrier_stages() {
    let corpus = rehab_corpus(vec![item_with_levels("rehab-gait-training", &[1, 2, 4, 5])]);
    let declared = declared_for(&corpus);

    let outcome = run(
        &corpus,
        &declared,
        PipelineOptions {
            strict: true,
            halt_on_schema_errors: true,
        },
    );

    assert!(outcome.report.summary.halted_after_validation);
    assert!(outcome.report.graph.is_none());
    assert!(outcome.report.consistency.is_none());
    assert!(outcome.index.is_none());
    assert!(outcome.graph.is_none());
    assert_eq!(outcome.report.summary.schema_errors, 1);
    assert_eq!(outcome.report.validation.findings[0].code, "incomplete-level-set");
}

#[test]
fn schema_errors_without_the_gate_still_reach_later_stages() {
    let corpus = rehab_corpus(vec![item_with_levels("rehab-gait-training", &[1, 2, 4, 5])]);
    let declared = declared_for(&corpus);

    let outcome = run(&corpus, &declared, PipelineOptions::default());

    assert!(!outcome.report.summary.halted_after_validation);
    assert!(outcome.report.graph.is_some());
    assert!(outcome.report.consistency.is_some());
    // The record is indexable even though a tier is missing; only the
    // publishable verdict carries the schema failure.
    assert!(outcome.index.is_some());
    assert!(!outcome.report.summary.publishable);
}

#[test]
fn dangling_reference_is_advisory_by_default_and_fatal_when_strict() {
    let a = with_xref(
        item("rehab-mobility-aids-overview"),
        "rehab-nonexistent",
        Relationship::Related,
    );
    let corpus = rehab_corpus(vec![a]);
    let declared = declared_for(&corpus);

    let lenient = run(&corpus, &declared, PipelineOptions::default());
    assert_eq!(lenient.report.summary.graph_warnings, 1);
    assert_eq!(lenient.report.summary.graph_errors, 0);
    assert!(lenient.graph.is_some());

    let strict = run(
        &corpus,
        &declared,
        PipelineOptions {
            strict: true,
            halt_on_schema_errors: false,
        },
    );
    assert_eq!(strict.report.summary.graph_errors, 1);
    assert!(strict.graph.is_none());
    assert!(!strict.report.summary.publishable);
}

#[test]
fn id_collision_blocks_the_index_but_not_the_report() {
    let corpus = rehab_corpus(vec![
        item("rehab-mobility-aids-overview"),
        item("rehab-mobility-aids-overview"),
    ]);
    let declared = declared_for(&corpus);

    let outcome = run(&corpus, &declared, PipelineOptions::default());

    assert!(outcome.index.is_none());
    let consistency = outcome.report.consistency.expect("stage ran");
    assert_eq!(consistency.findings.len(), 1);
    assert!(consistency.findings[0]
        .message
        .contains("rehab-mobility-aids-overview"));
    assert!(!outcome.report.summary.publishable);
}

#[test]
fn asymmetric_hierarchy_warns_but_publishes() {
    let a = with_xref(
        item("rehab-mobility-aids-overview"),
        "rehab-wheelchair-skills",
        Relationship::Child,
    );
    let b = item("rehab-wheelchair-skills");
    let corpus = rehab_corpus(vec![a, b]);
    let declared = declared_for(&corpus);

    let outcome = run(&corpus, &declared, PipelineOptions::publish_gate());

    assert_eq!(outcome.report.summary.graph_warnings, 1);
    assert!(outcome.report.summary.publishable);
}

#[test]
fn archived_records_keep_resolving_as_targets() {
    let mut retired = item("rehab-deprecated-brace-fitting");
    retired.status = strata_types::ContentStatus::Archived;
    let a = with_xref(
        item("rehab-mobility-aids-overview"),
        "rehab-deprecated-brace-fitting",
        Relationship::Related,
    );
    let corpus = rehab_corpus(vec![a, retired]);
    let declared = declared_for(&corpus);

    let outcome = run(&corpus, &declared, PipelineOptions::publish_gate());

    assert!(outcome.report.summary.publishable);
    assert_eq!(outcome.report.summary.graph_warnings, 0);
}

#[test]
fn pipeline_reports_are_idempotent() {
    let a = with_xref(
        item("rehab-mobility-aids-overview"),
        "rehab-nonexistent",
        Relationship::Related,
    );
    let b = item_with_levels("rehab-gait-training", &[1, 3, 5]);
    let corpus = rehab_corpus(vec![a, b]);
    let declared = declared_for(&corpus);

    let first = run(&corpus, &declared, PipelineOptions::default());
    let second = run(&corpus, &declared, PipelineOptions::default());

    assert_eq!(first.report, second.report);
    // Byte-identical once serialized, not merely structurally equal.
    assert_eq!(
        serde_json::to_string(&first.report).unwrap(),
        serde_json::to_string(&second.report).unwrap()
    );
}

#[test]
fn rebuilding_from_the_flattened_index_round_trips() {
    let corpus = Corpus::new(vec![
        CategorySource::new(
            "rehabilitation",
            vec![
                item("rehab-mobility-aids-overview"),
                item("rehab-gait-training"),
            ],
        ),
        CategorySource::new("study-skills", vec![item("study-skills-spaced-repetition")]),
    ])
    .unwrap();
    let declared = declared_for(&corpus);

    let first = run(&corpus, &declared, PipelineOptions::publish_gate());
    let index = first.index.expect("clean build");

    let second = run(&index.to_corpus(), &declared, PipelineOptions::publish_gate());
    let rebuilt = second.index.expect("round-trip build");

    let first_ids: Vec<&ContentId> = index.ids().collect();
    let rebuilt_ids: Vec<&ContentId> = rebuilt.ids().collect();
    assert_eq!(first_ids, rebuilt_ids);
    for id in index.ids() {
        assert_eq!(index.category_of(id), rebuilt.category_of(id));
    }
}
