use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::limits::DEFAULT_PAGE_SIZE;

// ── Bookings ─────────────────────────────────────────────────────

/// One day of allocation for one project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRecord {
    pub project: String,
    pub date: NaiveDate,
    pub allocation: i32,
}

impl BookingRecord {
    pub fn new(project: impl Into<String>, date: NaiveDate, allocation: i32) -> Self {
        Self {
            project: project.into(),
            date,
            allocation,
        }
    }

    pub fn pair(&self) -> Allocation {
        Allocation {
            project: self.project.clone(),
            allocation: self.allocation,
        }
    }
}

/// A (project, allocation) pair. Ordered by project, then allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Allocation {
    pub project: String,
    pub allocation: i32,
}

impl Allocation {
    pub fn new(project: impl Into<String>, allocation: i32) -> Self {
        Self {
            project: project.into(),
            allocation,
        }
    }
}

/// Maximal run of consecutive days sharing one allocation set.
/// `from` and `to` are both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Sorted ascending.
    pub items: Vec<Allocation>,
}

impl ConsolidatedRange {
    pub fn new(from: NaiveDate, to: NaiveDate, items: Vec<Allocation>) -> Self {
        debug_assert!(from <= to, "range from must not be after to");
        Self { from, to, items }
    }

    /// Number of calendar days covered, inclusive on both ends.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Every date in the range, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from.iter_days().take_while(move |d| *d <= self.to)
    }
}

// ── Pagination ───────────────────────────────────────────────────

/// One page of results. An empty `next_token` means there is nothing after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: String,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: next_token.into(),
        }
    }

    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, String::new())
    }

    pub fn is_last(&self) -> bool {
        self.next_token.is_empty()
    }
}

/// Token payload used by `VecPageSource`. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageCursor {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// Items to skip before this page starts.
    pub fn offset(&self) -> usize {
        (self.current_page.saturating_sub(1) as usize) * self.page_size as usize
    }

    pub fn next(&self) -> Self {
        Self {
            current_page: self.current_page + 1,
            page_size: self.page_size,
        }
    }
}

// ── Scores ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score {
    pub value: i32,
}

impl Score {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}
