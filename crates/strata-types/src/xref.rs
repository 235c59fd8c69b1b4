use serde::{Deserialize, Serialize};

use crate::ids::ContentId;
use crate::item::ContentKind;

/// How a cross-reference's source relates to its target.
///
/// A closed enumeration rather than a free label so that the graph
/// resolver can check symmetry and acyclicity mechanically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// The target is a broader record this one belongs under.
    Parent,
    /// The target is a narrower record under this one.
    Child,
    /// Topically connected, no hierarchy implied.
    Related,
    /// Same tier under a shared parent.
    Sibling,
}

impl Relationship {
    /// The declaration the target would make back at the source if the
    /// edge were mirrored.
    pub fn reciprocal(self) -> Relationship {
        match self {
            Relationship::Parent => Relationship::Child,
            Relationship::Child => Relationship::Parent,
            Relationship::Related => Relationship::Related,
            Relationship::Sibling => Relationship::Sibling,
        }
    }

    /// Parent and child edges participate in the hierarchy DAG;
    /// related and sibling edges are exempt from the cycle rule.
    pub fn is_hierarchical(self) -> bool {
        matches!(self, Relationship::Parent | Relationship::Child)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Relationship::Parent => "parent",
            Relationship::Child => "child",
            Relationship::Related => "related",
            Relationship::Sibling => "sibling",
        };
        write!(f, "{name}")
    }
}

/// A directed, typed edge from one content record to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    pub target_id: ContentId,
    pub target_kind: ContentKind,
    pub relationship: Relationship,
    /// Display text for the link, opaque to the integrity layer.
    pub label: String,
}

impl CrossReference {
    pub fn new(
        target_id: impl Into<ContentId>,
        target_kind: ContentKind,
        relationship: Relationship,
        label: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            target_kind,
            relationship,
            label: label.into(),
        }
    }
}
