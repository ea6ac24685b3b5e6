use metrics::counter;
use std::sync::OnceLock;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "error" }
}

/// Track a permission decision
pub fn track_access_decision(permission: &str, allowed: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if allowed { "allowed" } else { "denied" };
    counter!("access_decisions_total", "permission" => permission.to_string(), "outcome" => status)
        .increment(1);
}

/// Track a list fetch that reached the store
pub fn track_list_fetch(schema: &str, success: bool) {
    if !is_observability_enabled() {
        return;
    }
    counter!("list_fetches_total", "schema" => schema.to_string(), "outcome" => outcome(success))
        .increment(1);
}

pub fn track_bulk_status_change(schema: &str, status: &str, success: bool) {
    if !is_observability_enabled() {
        return;
    }
    counter!(
        "bulk_status_changes_total",
        "schema" => schema.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome(success)
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome(true), "success");
        assert_eq!(outcome(false), "error");
    }

    #[test]
    fn test_tracking_without_recorder_is_noop() {
        track_access_decision("list_sale", true);
        track_list_fetch("sales", false);
        track_bulk_status_change("sales", "deleted", true);
    }
}
