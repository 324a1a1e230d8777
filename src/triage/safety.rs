//! Safety verdict mapping.

use crate::triage::types::{RawCategoryScore, SafetyCategory, SafetyResult};

/// Severity at or above which a single category blocks the message.
/// Fixed policy constant, not configurable per call.
pub const BLOCK_SEVERITY: u8 = 4;

/// Normalize a raw per-category severity report into a [`SafetyResult`].
///
/// `blocked` is true iff at least one reported severity is
/// ≥ [`BLOCK_SEVERITY`]. An absent report, an empty report, or a category
/// with no severity never blocks; categories are recorded in report order
/// either way.
pub fn map_safety(report: Option<&[RawCategoryScore]>) -> SafetyResult {
    let mut blocked = false;
    let mut categories = Vec::new();

    if let Some(entries) = report {
        for entry in entries {
            categories.push(SafetyCategory {
                category: entry.category.clone(),
                severity: entry.severity,
            });
            if entry.severity.is_some_and(|s| s >= BLOCK_SEVERITY) {
                blocked = true;
            }
        }
    }

    SafetyResult {
        blocked,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(category: &str, severity: Option<u8>) -> RawCategoryScore {
        RawCategoryScore {
            category: category.into(),
            severity,
        }
    }

    #[test]
    fn absent_report_is_not_blocked() {
        let result = map_safety(None);
        assert!(!result.blocked);
        assert!(result.categories.is_empty());
    }

    #[test]
    fn empty_report_is_not_blocked() {
        let result = map_safety(Some(&[]));
        assert!(!result.blocked);
        assert!(result.categories.is_empty());
    }

    #[test]
    fn severity_at_threshold_blocks() {
        let result = map_safety(Some(&[score("SelfHarm", Some(4))]));
        assert!(result.blocked);
    }

    #[test]
    fn severity_below_threshold_does_not_block() {
        let result = map_safety(Some(&[
            score("Hate", Some(2)),
            score("Violence", Some(3)),
        ]));
        assert!(!result.blocked);
        assert_eq!(result.categories.len(), 2);
    }

    #[test]
    fn max_severity_blocks() {
        let result = map_safety(Some(&[score("Violence", Some(6))]));
        assert!(result.blocked);
        assert_eq!(result.categories[0].severity, Some(6));
    }

    #[test]
    fn one_blocking_category_among_many_blocks() {
        let result = map_safety(Some(&[
            score("Hate", Some(0)),
            score("Sexual", Some(5)),
            score("Violence", Some(1)),
        ]));
        assert!(result.blocked);
    }

    #[test]
    fn missing_severity_is_recorded_but_never_blocks() {
        let result = map_safety(Some(&[score("Hate", None)]));
        assert!(!result.blocked);
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].severity, None);
    }

    #[test]
    fn category_order_is_preserved() {
        let result = map_safety(Some(&[
            score("Hate", Some(0)),
            score("Violence", Some(0)),
            score("SelfHarm", Some(0)),
            score("Sexual", Some(0)),
        ]));
        let names: Vec<&str> = result
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, ["Hate", "Violence", "SelfHarm", "Sexual"]);
    }
}
