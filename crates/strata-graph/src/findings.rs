use serde::{Deserialize, Serialize};
use strata_types::ContentId;

/// The corpus-wide problems the resolver can surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFindingKind {
    /// A cross-reference whose target id resolves to no record.
    OrphanReference,
    /// A parent/child edge with no mirrored declaration on the target.
    AsymmetricRelationship,
    /// A parent/child chain that loops back on itself.
    CycleDetected,
}

impl std::fmt::Display for GraphFindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraphFindingKind::OrphanReference => "orphan-reference",
            GraphFindingKind::AsymmetricRelationship => "asymmetric-relationship",
            GraphFindingKind::CycleDetected => "cycle-detected",
        };
        write!(f, "{name}")
    }
}

/// One resolver finding.
///
/// `fatal` marks the corpus-fatal cases: traversal queries over a
/// graph carrying such a finding would be wrong, so the query handle
/// is withheld. Non-fatal findings are advisories for human review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphFinding {
    pub kind: GraphFindingKind,
    pub source_id: ContentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<ContentId>,
    /// The offending id sequence for cycle findings, in walk order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<ContentId>,
    pub fatal: bool,
    pub message: String,
}

impl GraphFinding {
    pub fn orphan(source_id: &ContentId, target_id: &ContentId, fatal: bool) -> Self {
        Self {
            kind: GraphFindingKind::OrphanReference,
            source_id: source_id.clone(),
            target_id: Some(target_id.clone()),
            cycle: Vec::new(),
            fatal,
            message: format!(
                "'{source_id}' references '{target_id}', which does not exist in the corpus"
            ),
        }
    }

    pub fn asymmetric(source_id: &ContentId, target_id: &ContentId) -> Self {
        Self {
            kind: GraphFindingKind::AsymmetricRelationship,
            source_id: source_id.clone(),
            target_id: Some(target_id.clone()),
            cycle: Vec::new(),
            fatal: false,
            message: format!(
                "'{source_id}' declares a hierarchical edge to '{target_id}' \
                 but '{target_id}' does not declare the reciprocal edge back"
            ),
        }
    }

    pub fn cycle(ids: Vec<ContentId>) -> Self {
        let walk = ids
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self {
            kind: GraphFindingKind::CycleDetected,
            source_id: ids[0].clone(),
            target_id: None,
            cycle: ids,
            fatal: true,
            message: format!("parent/child hierarchy contains a cycle: {walk}"),
        }
    }
}

/// Everything the resolver found, plus whether any of it invalidates
/// the graph handle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphReport {
    pub findings: Vec<GraphFinding>,
}

impl GraphReport {
    pub fn is_fatal(&self) -> bool {
        self.findings.iter().any(|f| f.fatal)
    }

    pub fn count_of(&self, kind: GraphFindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| !f.fatal).count()
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.fatal).count()
    }
}
