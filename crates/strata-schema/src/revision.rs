use strata_types::ContentItem;

use crate::finding::{Finding, ValidationReport};

/// Check that `next` is a legal revision of `previous`.
///
/// A corpus snapshot cannot observe history, so the monotonicity rules
/// for `version` and `updated_at` are checked here, pairwise, when an
/// editor saves a revision. Both records must carry the same id.
pub fn check_revision(previous: &ContentItem, next: &ContentItem) -> ValidationReport {
    let mut report = ValidationReport::new();

    if previous.id != next.id {
        report.push(
            Finding::error(
                &next.id,
                "revision-id-mismatch",
                format!(
                    "revision compares '{}' against '{}'",
                    previous.id, next.id
                ),
            )
            .with_field("id"),
        );
        return report;
    }

    if next.version <= previous.version {
        report.push(
            Finding::error(
                &next.id,
                "version-not-increased",
                format!(
                    "version went from {} to {}; revisions must increase it",
                    previous.version, next.version
                ),
            )
            .with_field("version"),
        );
    }

    if next.updated_at < previous.updated_at {
        report.push(
            Finding::error(
                &next.id,
                "backdated-update",
                "updated_at moved backwards across a revision",
            )
            .with_field("updated_at"),
        );
    }

    if next.created_at != previous.created_at {
        report.push(
            Finding::error(
                &next.id,
                "created-at-changed",
                "created_at is immutable once a record exists",
            )
            .with_field("created_at"),
        );
    }

    if previous.status != next.status && !previous.status.can_transition_to(next.status) {
        report.push(
            Finding::error(
                &next.id,
                "illegal-status-transition",
                format!(
                    "status cannot move from '{}' to '{}'",
                    previous.status, next.status
                ),
            )
            .with_field("status"),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use strata_types::test_support::item;
    use strata_types::ContentStatus;

    #[test]
    fn version_bump_with_later_timestamp_passes() {
        let previous = item("rehab-mobility-aids-overview");
        let mut next = previous.clone();
        next.version = 2;
        next.updated_at = previous.updated_at + Duration::days(1);

        let report = check_revision(&previous, &next);
        assert!(report.is_empty(), "findings: {:?}", report.findings);
    }

    #[test]
    fn version_reuse_is_rejected() {
        let previous = item("rehab-mobility-aids-overview");
        let next = previous.clone();

        let report = check_revision(&previous, &next);
        assert!(report
            .findings
            .iter()
            .any(|f| f.code == "version-not-increased"));
    }

    #[test]
    fn backdated_update_is_rejected() {
        let previous = item("rehab-mobility-aids-overview");
        let mut next = previous.clone();
        next.version = 2;
        next.updated_at = previous.updated_at - Duration::days(1);

        let report = check_revision(&previous, &next);
        assert!(report.findings.iter().any(|f| f.code == "backdated-update"));
    }

    #[test]
    fn archived_cannot_return_to_published() {
        let mut previous = item("rehab-mobility-aids-overview");
        previous.status = ContentStatus::Archived;
        let mut next = previous.clone();
        next.version = 2;
        next.status = ContentStatus::Published;

        let report = check_revision(&previous, &next);
        assert!(report
            .findings
            .iter()
            .any(|f| f.code == "illegal-status-transition"));
    }

    #[test]
    fn different_ids_short_circuit() {
        let previous = item("rehab-mobility-aids-overview");
        let next = item("rehab-gait-training");

        let report = check_revision(&previous, &next);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, "revision-id-mismatch");
    }
}
