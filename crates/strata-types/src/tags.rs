use serde::{Deserialize, Serialize};

/// How directly a topic bears on clinical practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalRelevance {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for ClinicalRelevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ClinicalRelevance::Low => "low",
            ClinicalRelevance::Medium => "medium",
            ClinicalRelevance::High => "high",
            ClinicalRelevance::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Which licensing exams a topic shows up on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRelevance {
    #[serde(default)]
    pub usmle: bool,
    #[serde(default)]
    pub nbme: bool,
    /// Shelf exams the topic appears on, e.g. `pediatrics`, `surgery`.
    #[serde(default)]
    pub shelf: Vec<String>,
}

impl ExamRelevance {
    pub fn is_exam_relevant(&self) -> bool {
        self.usmle || self.nbme || !self.shelf.is_empty()
    }
}

/// Structured metadata attached once per record (not per tier).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentTags {
    /// Body systems touched, e.g. `renal`, `musculoskeletal`.
    #[serde(default)]
    pub systems: Vec<String>,
    /// Topic areas, e.g. `rehabilitation`, `study-skills`.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Free search keywords, opaque to the integrity layer.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub clinical_relevance: ClinicalRelevance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_relevance: Option<ExamRelevance>,
}

impl ContentTags {
    pub fn new(clinical_relevance: ClinicalRelevance) -> Self {
        Self {
            systems: Vec::new(),
            topics: Vec::new(),
            keywords: Vec::new(),
            clinical_relevance,
            exam_relevance: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.push(topic.into());
        self
    }
}
