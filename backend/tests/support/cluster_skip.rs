//! `SKIP_TEST_CLUSTER` policy for suites needing embedded PostgreSQL.

/// Whether `SKIP_TEST_CLUSTER` holds "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

/// Report a cluster that failed to start.
///
/// Prints a `SKIP-TEST-CLUSTER` marker and yields `None` when skipping is
/// allowed; panics otherwise so CI does not silently pass.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        return None;
    }
    panic!("embedded PostgreSQL unavailable: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
}
