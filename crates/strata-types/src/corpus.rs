use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ContentId;
use crate::item::ContentItem;

/// The separately declared registry constant: category name to the
/// ordered ids it claims. The registry builder checks this against the
/// corpus's actual source grouping.
pub type CategoryMap = BTreeMap<String, Vec<ContentId>>;

/// Errors from corpus construction. These are the "wrong container
/// shape" cases that no report entry can describe, so they surface as
/// hard errors instead of findings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    #[error("category '{0}' appears more than once in the corpus groupings")]
    DuplicateCategory(String),
}

/// One source grouping: a category name and the records authored under
/// it, in source order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySource {
    pub category: String,
    pub items: Vec<ContentItem>,
}

impl CategorySource {
    pub fn new(category: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }
}

/// The loaded corpus: every record read into one immutable snapshot,
/// grouped by source category, before any validation begins.
///
/// This replaces the implicit per-module export lists of the authoring
/// layout — once a `Corpus` exists, nothing else about module structure
/// matters to the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    categories: Vec<CategorySource>,
}

impl Corpus {
    /// Assemble a corpus from source groupings. Category names must be
    /// unique; duplicates mean the loader handed us a malformed layout
    /// and there is no sensible way to report that per-record.
    pub fn new(categories: Vec<CategorySource>) -> Result<Self, CorpusError> {
        let mut seen = HashSet::new();
        for group in &categories {
            if !seen.insert(group.category.clone()) {
                return Err(CorpusError::DuplicateCategory(group.category.clone()));
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[CategorySource] {
        &self.categories
    }

    /// All records in source order: category order first, then the
    /// order within each category.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.categories.iter().flat_map(|group| group.items.iter())
    }

    /// All (category, record) pairs in source order.
    pub fn grouped_items(&self) -> impl Iterator<Item = (&str, &ContentItem)> {
        self.categories.iter().flat_map(|group| {
            group
                .items
                .iter()
                .map(move |item| (group.category.as_str(), item))
        })
    }

    /// Every id in source order, duplicates included — uniqueness is
    /// the registry builder's check, not a loading concern.
    pub fn ids(&self) -> impl Iterator<Item = &ContentId> {
        self.items().map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
