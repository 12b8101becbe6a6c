use std::time::Duration;

use crate::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Knobs for `fetch::fetch_all`. The default waits on every page for as long
/// as it takes and never caps the page count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchConfig {
    /// Deadline for a single `get_page` call.
    pub page_timeout: Option<Duration>,
    /// Upper bound on page requests per call.
    pub max_pages: Option<usize>,
}

impl FetchConfig {
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// Settings for the `daybook` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Page size of the in-memory source records are staged through.
    pub page_size: u32,
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Read `DAYBOOK_PAGE_SIZE`, `DAYBOOK_PAGE_TIMEOUT_MS` and `DAYBOOK_MAX_PAGES`.
    /// Unset or unparseable values fall back to the defaults. A page size or
    /// page cap of zero counts as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let page_size: u32 = lookup("DAYBOOK_PAGE_SIZE")
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let page_timeout = lookup("DAYBOOK_PAGE_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis);
        let max_pages = lookup("DAYBOOK_MAX_PAGES")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0);

        Self {
            page_size,
            fetch: FetchConfig {
                page_timeout,
                max_pages,
            },
        }
    }
}
