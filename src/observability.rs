// ── Consolidation ───────────────────────────────────────────────

/// Counter: booking records fed into `consolidate::group`.
pub const RECORDS_GROUPED_TOTAL: &str = "daybook_records_grouped_total";

/// Counter: consolidated ranges emitted.
pub const RANGES_EMITTED_TOTAL: &str = "daybook_ranges_emitted_total";

// ── Fetching ────────────────────────────────────────────────────

/// Counter: pages received from page sources.
pub const PAGES_FETCHED_TOTAL: &str = "daybook_pages_fetched_total";

/// Counter: items accumulated by successful fetches.
pub const ITEMS_FETCHED_TOTAL: &str = "daybook_items_fetched_total";

/// Counter: fetches that ended in an error. Labels: reason.
pub const FETCH_FAILURES_TOTAL: &str = "daybook_fetch_failures_total";

/// Histogram: wall time of a whole `fetch_all` call in seconds.
pub const FETCH_DURATION_SECONDS: &str = "daybook_fetch_duration_seconds";

/// Map an error to a short label for metrics.
pub fn error_label(err: &crate::Error) -> &'static str {
    match err {
        crate::Error::InvalidArgument(_) => "invalid_argument",
        crate::Error::SourceFailure(_) => "source_failure",
        crate::Error::Timeout(_) => "timeout",
        crate::Error::LimitExceeded(_) => "limit_exceeded",
    }
}
