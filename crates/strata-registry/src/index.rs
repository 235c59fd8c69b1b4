use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strata_types::{CategorySource, ContentId, ContentItem, Corpus, CrossReference};

/// The compiled corpus index: id→record and category→ids, immutable
/// once built. Safe for unlimited concurrent readers — nothing writes
/// after `build` returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    items: BTreeMap<ContentId, ContentItem>,
    categories: BTreeMap<String, Vec<ContentId>>,
    category_of: BTreeMap<ContentId, String>,
}

impl Index {
    pub(crate) fn new(
        items: BTreeMap<ContentId, ContentItem>,
        categories: BTreeMap<String, Vec<ContentId>>,
        category_of: BTreeMap<ContentId, String>,
    ) -> Self {
        Self {
            items,
            categories,
            category_of,
        }
    }

    pub fn get_content_by_id(&self, id: &ContentId) -> Option<&ContentItem> {
        self.items.get(id)
    }

    /// The records grouped under a category, in source order. Unknown
    /// categories yield an empty listing.
    pub fn get_by_category(&self, category: &str) -> Vec<&ContentItem> {
        self.categories
            .get(category)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.items.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A record's declared cross-references, straight off the record.
    pub fn get_cross_references(&self, id: &ContentId) -> &[CrossReference] {
        self.items
            .get(id)
            .map(|item| item.cross_references.as_slice())
            .unwrap_or(&[])
    }

    pub fn category_of(&self, id: &ContentId) -> Option<&str> {
        self.category_of.get(id).map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ContentId> {
        self.items.keys()
    }

    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flatten the index back into a category-grouped corpus. Feeding
    /// the result back through the builder reproduces the same index —
    /// the registry is a derived artifact, not a second source of truth.
    pub fn to_corpus(&self) -> Corpus {
        let groups = self
            .categories
            .iter()
            .map(|(category, ids)| {
                let items = ids
                    .iter()
                    .filter_map(|id| self.items.get(id))
                    .cloned()
                    .collect();
                CategorySource::new(category.clone(), items)
            })
            .collect();
        Corpus::new(groups).expect("index categories are unique by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_types::test_support::item;

    fn tiny_index() -> Index {
        let a = item("rehab-mobility-aids-overview");
        let b = item("study-skills-spaced-repetition");

        let mut items = BTreeMap::new();
        items.insert(a.id.clone(), a.clone());
        items.insert(b.id.clone(), b.clone());

        let mut categories = BTreeMap::new();
        categories.insert("rehabilitation".to_string(), vec![a.id.clone()]);
        categories.insert("study-skills".to_string(), vec![b.id.clone()]);

        let mut category_of = BTreeMap::new();
        category_of.insert(a.id, "rehabilitation".to_string());
        category_of.insert(b.id, "study-skills".to_string());

        Index::new(items, categories, category_of)
    }

    #[test]
    fn lookup_returns_the_record_with_that_id() {
        let index = tiny_index();
        for id in index.ids() {
            assert_eq!(&index.get_content_by_id(id).unwrap().id, id);
        }
    }

    #[test]
    fn category_listing_resolves_records() {
        let index = tiny_index();
        let rehab = index.get_by_category("rehabilitation");
        assert_eq!(rehab.len(), 1);
        assert_eq!(rehab[0].id.as_str(), "rehab-mobility-aids-overview");
        assert!(index.get_by_category("nutrition").is_empty());
    }

    #[test]
    fn category_of_follows_the_grouping() {
        let index = tiny_index();
        assert_eq!(
            index.category_of(&ContentId::new("study-skills-spaced-repetition")),
            Some("study-skills")
        );
        assert_eq!(index.category_of(&ContentId::new("rehab-nonexistent")), None);
    }

    #[test]
    fn flattening_preserves_membership() {
        let index = tiny_index();
        let corpus = index.to_corpus();
        assert_eq!(corpus.len(), 2);
        let categories: Vec<&str> = corpus
            .categories()
            .iter()
            .map(|group| group.category.as_str())
            .collect();
        assert_eq!(categories, vec!["rehabilitation", "study-skills"]);
    }
}
