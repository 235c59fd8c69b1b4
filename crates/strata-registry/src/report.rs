use serde::{Deserialize, Serialize};
use strata_types::ContentId;

/// The registry↔corpus disagreements the builder can surface. All of
/// them are corpus-fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsistencyFindingKind {
    /// Two records claim the same id; the index cannot represent both.
    IdCollision,
    /// A category's declared id list disagrees with the records
    /// actually grouped under it.
    RegistryDrift,
    /// A declared id that resolves to no record anywhere.
    DanglingRegistryEntry,
}

impl std::fmt::Display for ConsistencyFindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConsistencyFindingKind::IdCollision => "id-collision",
            ConsistencyFindingKind::RegistryDrift => "registry-drift",
            ConsistencyFindingKind::DanglingRegistryEntry => "dangling-registry-entry",
        };
        write!(f, "{name}")
    }
}

/// One registry consistency finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyFinding {
    pub kind: ConsistencyFindingKind,
    /// The category the finding is about, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The implicated ids, sorted for stable reports.
    pub ids: Vec<ContentId>,
    pub message: String,
}

impl ConsistencyFinding {
    pub fn id_collision(id: &ContentId, occurrences: usize) -> Self {
        Self {
            kind: ConsistencyFindingKind::IdCollision,
            category: None,
            ids: vec![id.clone()],
            message: format!("id '{id}' is claimed by {occurrences} records"),
        }
    }

    pub fn drift(category: &str, mut missing: Vec<ContentId>, mut undeclared: Vec<ContentId>) -> Self {
        missing.sort();
        undeclared.sort();
        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!(
                "declared but not in the category source: {}",
                join(&missing)
            ));
        }
        if !undeclared.is_empty() {
            parts.push(format!(
                "in the category source but not declared: {}",
                join(&undeclared)
            ));
        }
        let mut ids = missing;
        ids.extend(undeclared);
        Self {
            kind: ConsistencyFindingKind::RegistryDrift,
            category: Some(category.to_string()),
            ids,
            message: format!("category '{category}' drifted: {}", parts.join("; ")),
        }
    }

    pub fn unknown_category(category: &str, declared: bool) -> Self {
        let message = if declared {
            format!("declared category '{category}' has no source grouping")
        } else {
            format!("source grouping '{category}' is not declared in the registry")
        };
        Self {
            kind: ConsistencyFindingKind::RegistryDrift,
            category: Some(category.to_string()),
            ids: Vec::new(),
            message,
        }
    }

    pub fn dangling(category: &str, id: &ContentId) -> Self {
        Self {
            kind: ConsistencyFindingKind::DanglingRegistryEntry,
            category: Some(category.to_string()),
            ids: vec![id.clone()],
            message: format!(
                "category '{category}' declares '{id}', which resolves to no record"
            ),
        }
    }
}

fn join(ids: &[ContentId]) -> String {
    ids.iter()
        .map(|id| format!("'{id}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Registry agreement findings for one build.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub findings: Vec<ConsistencyFinding>,
}

impl ConsistencyReport {
    /// Any finding at all blocks the index; there are no advisory
    /// registry findings.
    pub fn is_fatal(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn count_of(&self, kind: ConsistencyFindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }
}
