use serde::{Deserialize, Serialize};
use strata_types::ContentId;

/// How serious a finding is.
///
/// Errors block publishing; warnings are for human review and never
/// gate the pipeline on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One validation finding: which record, which field, what rule, and a
/// human-readable message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub item_id: ContentId,
    /// Dotted path of the offending field, e.g. `levels.3.key_terms`.
    pub field: String,
    /// Stable machine-readable rule code, e.g. `incomplete-level-set`.
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(
        item_id: &ContentId,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.clone(),
            field: String::new(),
            code: code.into(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(
        item_id: &ContentId,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.clone(),
            field: String::new(),
            code: code.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Set the offending field path.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }
}

/// Accumulated findings for one record or one whole corpus pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Fold another report into this one, preserving order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Findings for one record, in emission order.
    pub fn findings_for<'a>(&'a self, id: &'a ContentId) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| &f.item_id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_order_and_counts() {
        let id_a = ContentId::new("rehab-a");
        let id_b = ContentId::new("rehab-b");

        let mut report = ValidationReport::new();
        report.push(Finding::error(&id_a, "missing-name", "name is empty"));

        let mut other = ValidationReport::new();
        other.push(Finding::warning(&id_b, "empty-alternate-name", "blank entry"));
        report.merge(other);

        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.findings[0].item_id, id_a);
        assert_eq!(report.findings[1].item_id, id_b);
    }

    #[test]
    fn findings_for_filters_by_record() {
        let id_a = ContentId::new("rehab-a");
        let id_b = ContentId::new("rehab-b");

        let mut report = ValidationReport::new();
        report.push(Finding::error(&id_a, "missing-name", "name is empty"));
        report.push(Finding::error(&id_b, "missing-name", "name is empty"));

        assert_eq!(report.findings_for(&id_a).count(), 1);
    }

    #[test]
    fn severity_orders_warning_below_error() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn finding_serializes_with_lowercase_severity() {
        let finding = Finding::error(&ContentId::new("rehab-a"), "missing-name", "name is empty")
            .with_field("name");
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        assert!(json.contains("\"field\":\"name\""));
    }
}
