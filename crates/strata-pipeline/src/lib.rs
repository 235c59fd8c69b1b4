//! Strata Build Pipeline
//!
//! One pass over a loaded corpus: schema validation fans out across
//! the rayon pool (records are independent), then the two barrier
//! stages — cross-reference resolution and registry build — run over
//! the complete corpus, and everything folds into a single
//! [`PipelineReport`]. The pipeline never throws for data problems;
//! every issue is a report entry, and the only early exit is the
//! explicit `halt_on_schema_errors` gate.
//!
//! The produced [`Index`] and graph handle are both immutable, so the
//! read surface (`strata-disclosure`, graph traversals) serves any
//! number of concurrent readers once `run` returns.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use strata_graph::{resolve, CrossRefGraph, GraphReport, ResolveMode};
use strata_registry::{build, ConsistencyReport, Index};
use strata_schema::{validate_corpus, ValidationReport};
use strata_types::{CategoryMap, Corpus};
use tracing::info;

/// Pipeline configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Treat unresolved cross-references as fatal (pre-publish gating).
    pub strict: bool,
    /// Stop after schema validation if any schema error was found,
    /// skipping the barrier stages entirely.
    pub halt_on_schema_errors: bool,
}

impl PipelineOptions {
    /// The pre-publish profile: strict resolution, halt early on
    /// schema errors.
    pub fn publish_gate() -> Self {
        Self {
            strict: true,
            halt_on_schema_errors: true,
        }
    }
}

/// Per-stage counts plus the overall verdict.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub records: usize,
    pub schema_errors: usize,
    pub schema_warnings: usize,
    pub graph_errors: usize,
    pub graph_warnings: usize,
    pub registry_findings: usize,
    /// True when the schema gate stopped the pipeline early.
    pub halted_after_validation: bool,
    /// True when nothing blocks publication: no errors anywhere and
    /// both the index and the graph handle were produced.
    pub publishable: bool,
}

/// The three stage reports in one place. Stages that never ran (behind
/// the schema gate) are `None`, distinct from having run clean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub validation: ValidationReport,
    pub graph: Option<GraphReport>,
    pub consistency: Option<ConsistencyReport>,
    pub summary: PipelineSummary,
}

/// Everything `run` produces: the report, plus the query handles when
/// the corpus earned them.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    pub report: PipelineReport,
    pub graph: Option<CrossRefGraph>,
    pub index: Option<Index>,
}

/// Run the full build pipeline over a loaded corpus.
///
/// Stage order is fixed: per-record validation first (parallel), then
/// graph resolution and registry build, which both need every id in
/// hand before they can judge anything. Running twice over the same
/// corpus produces equal reports.
pub fn run(corpus: &Corpus, declared: &CategoryMap, options: PipelineOptions) -> PipelineOutcome {
    info!(
        records = corpus.len(),
        strict = options.strict,
        "starting corpus build pipeline"
    );

    let validation = validate_corpus(corpus);

    if options.halt_on_schema_errors && validation.has_errors() {
        info!(
            errors = validation.error_count(),
            "halting after schema validation"
        );
        let summary = PipelineSummary {
            records: corpus.len(),
            schema_errors: validation.error_count(),
            schema_warnings: validation.warning_count(),
            halted_after_validation: true,
            publishable: false,
            ..Default::default()
        };
        return PipelineOutcome {
            report: PipelineReport {
                validation,
                graph: None,
                consistency: None,
                summary,
            },
            graph: None,
            index: None,
        };
    }

    let mode = if options.strict {
        ResolveMode::Strict
    } else {
        ResolveMode::Lenient
    };
    let graph_outcome = resolve(corpus, mode);
    let build_outcome = build(corpus, declared);

    let summary = PipelineSummary {
        records: corpus.len(),
        schema_errors: validation.error_count(),
        schema_warnings: validation.warning_count(),
        graph_errors: graph_outcome.report.error_count(),
        graph_warnings: graph_outcome.report.warning_count(),
        registry_findings: build_outcome.report.findings.len(),
        halted_after_validation: false,
        publishable: validation.error_count() == 0
            && graph_outcome.graph.is_some()
            && graph_outcome.report.error_count() == 0
            && build_outcome.index.is_some(),
    };

    info!(
        schema_errors = summary.schema_errors,
        graph_findings = summary.graph_errors + summary.graph_warnings,
        registry_findings = summary.registry_findings,
        publishable = summary.publishable,
        "corpus build pipeline complete"
    );

    PipelineOutcome {
        report: PipelineReport {
            validation,
            graph: Some(graph_outcome.report),
            consistency: Some(build_outcome.report),
            summary,
        },
        graph: graph_outcome.graph,
        index: build_outcome.index,
    }
}
