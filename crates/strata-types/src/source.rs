use serde::{Deserialize, Serialize};

/// What kind of asset a media descriptor points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Diagram,
    Image,
    Video,
    Animation,
    Audio,
}

/// Descriptor for one media asset attached to a record. The asset
/// bytes live with the rendering layer; only the reference is modeled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: String,
    pub kind: MediaKind,
    pub filename: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// What kind of source a citation points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationKind {
    Textbook,
    Article,
    Guideline,
    Website,
}

/// One source a record's content is drawn from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    pub kind: CitationKind,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub license: String,
}

impl Citation {
    pub fn new(id: impl Into<String>, kind: CitationKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            authors: Vec::new(),
            source: String::new(),
            license: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Diagram).unwrap(),
            "\"diagram\""
        );
    }

    #[test]
    fn citation_optional_fields_default_empty() {
        let citation: Citation = serde_json::from_str(
            r#"{"id":"ref-1","kind":"article","title":"Gait Retraining After Stroke"}"#,
        )
        .unwrap();
        assert!(citation.authors.is_empty());
        assert!(citation.license.is_empty());
    }
}
