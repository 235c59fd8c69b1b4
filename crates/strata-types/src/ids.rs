use serde::{Deserialize, Serialize};

/// Identifier of a content record: a globally unique, namespaced slug
/// such as `rehab-mobility-aids-overview`.
///
/// Ids are authored, never generated, so this newtype carries the raw
/// slug rather than a UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the slug has the expected shape: lowercase alphanumeric
    /// segments joined by single hyphens, with at least one hyphen so
    /// the leading segment acts as a domain namespace.
    pub fn is_well_formed(&self) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let mut segments = 0usize;
        for segment in self.0.split('-') {
            if segment.is_empty() {
                return false;
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return false;
            }
            segments += 1;
        }
        segments >= 2
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentId {
    fn from(slug: &str) -> Self {
        Self(slug.to_string())
    }
}

impl From<String> for ContentId {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}
