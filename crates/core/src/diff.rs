//! Widget id diffing and the update-safety policy.
//!
//! An update may remove at most [`MAX_REMOVED_WIDGETS_PER_UPDATE`] widgets.
//! A widget whose id was regenerated counts as removed.

use serde_json::Value;
use std::collections::HashSet;

use crate::error::{DashboardError, Result};
use crate::metrics::record_policy_rejection;
use crate::widgets::widget_ids;

/// Maximum number of widgets a single update may remove.
pub const MAX_REMOVED_WIDGETS_PER_UPDATE: usize = 1;

/// Ids present in `existing` but not in `new`.
///
/// Each id appears at most once, in first-seen order from `existing`.
pub fn removed_widget_ids<S: AsRef<str>>(existing: &[S], new: &[S]) -> Vec<String> {
    let new: HashSet<&str> = new.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();
    existing
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| !new.contains(id) && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Apply the update-safety policy to a list of removed ids.
pub fn enforce_removal_limit(removed: &[String]) -> Result<()> {
    if removed.len() > MAX_REMOVED_WIDGETS_PER_UPDATE {
        record_policy_rejection();
        return Err(DashboardError::PolicyViolation(format!(
            "deleting more than one panel is not supported (would remove {}: {})",
            removed.len(),
            removed.join(", ")
        )));
    }
    Ok(())
}

/// Compare two documents and reject the update if it removes too many widgets.
///
/// Returns the removed ids when the update is allowed.
pub fn check_widget_removal(existing: &Value, new: &Value) -> Result<Vec<String>> {
    let removed = removed_widget_ids(&widget_ids(existing), &widget_ids(new));
    enforce_removal_limit(&removed)?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_sets_remove_nothing() {
        let ids = ["w1", "w2", "w3"];
        assert!(removed_widget_ids(&ids, &ids).is_empty());
    }

    #[test]
    fn test_single_removal() {
        let removed = removed_widget_ids(&["w1", "w2", "w3"], &["w1", "w3"]);
        assert_eq!(removed, vec!["w2"]);
        assert!(enforce_removal_limit(&removed).is_ok());
    }

    #[test]
    fn test_multiple_removals_are_rejected() {
        let removed = removed_widget_ids(&["w1", "w2", "w3"], &["w1"]);
        assert_eq!(removed, vec!["w2", "w3"]);
        let err = enforce_removal_limit(&removed).unwrap_err();
        assert!(err.is_policy_violation());
    }

    #[test]
    fn test_duplicates_reported_once() {
        let removed = removed_widget_ids(&["a", "b", "a", "b", "c"], &["c"]);
        assert_eq!(removed, vec!["a", "b"]);
    }

    #[test]
    fn test_additions_are_not_removals() {
        let removed = removed_widget_ids(&["w1"], &["w1", "w2", "w3"]);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_regenerated_ids_count_as_removed() {
        let old = json!({ "widgets": [
            { "id": "a", "query": {} },
            { "id": "b", "query": {} }
        ]});
        let new = json!({ "widgets": [
            { "id": "a2", "query": {} },
            { "id": "b2", "query": {} }
        ]});
        assert!(check_widget_removal(&old, &new).is_err());
    }

    #[test]
    fn test_check_widget_removal_with_malformed_new_document() {
        let old = json!({ "widgets": [ { "id": "a", "query": {} } ] });
        let new = json!({ "widgets": "broken" });
        assert_eq!(check_widget_removal(&old, &new).unwrap(), vec!["a"]);
    }
}
