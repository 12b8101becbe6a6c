mod day_set;
mod runs;

pub use day_set::{equivalent, DayAllocationSet, DayKey};
pub use runs::contiguous_runs;

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::model::*;

// ── Booking consolidation ────────────────────────────────────────

/// Partition records into one `DayAllocationSet` per date, ascending by date.
pub fn day_sets<'a, I>(records: I) -> BTreeMap<NaiveDate, DayAllocationSet>
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let mut days: BTreeMap<NaiveDate, DayAllocationSet> = BTreeMap::new();
    for record in records {
        days.entry(record.date).or_default().push(record.pair());
    }
    days
}

/// Collapse daily booking records into maximal ranges of consecutive days
/// whose allocation sets are identical.
///
/// 1. Group records by date.
/// 2. Bucket dates by the canonical key of their allocation set, which is
///    equal exactly when two days are `equivalent`.
/// 3. Split each bucket into runs of consecutive days.
/// 4. Sort the runs by start date.
///
/// Equal sets separated by a differing day stay separate ranges.
pub fn group(records: &[BookingRecord]) -> Vec<ConsolidatedRange> {
    if records.is_empty() {
        return Vec::new();
    }

    let days = day_sets(records);
    let day_count = days.len();

    // Dates arrive ascending from the BTreeMap, so each class's date list
    // is already sorted.
    let mut classes: HashMap<DayKey, Vec<(NaiveDate, DayAllocationSet)>> = HashMap::new();
    for (date, set) in days {
        classes.entry(set.key()).or_default().push((date, set));
    }
    let class_count = classes.len();

    let mut ranges = Vec::new();
    for mut members in classes.into_values() {
        let dates: Vec<NaiveDate> = members.iter().map(|(date, _)| *date).collect();
        let mut cursor = 0usize;
        for (from, to) in contiguous_runs(&dates) {
            // The run's items come from its first day.
            let first = std::mem::take(&mut members[cursor].1);
            cursor += dates[cursor..].iter().take_while(|d| **d <= to).count();
            ranges.push(ConsolidatedRange::new(from, to, first.into_sorted()));
        }
    }

    ranges.sort_by_key(|r| r.from);

    debug!(
        records = records.len(),
        days = day_count,
        classes = class_count,
        ranges = ranges.len(),
        "grouped bookings"
    );
    metrics::counter!(crate::observability::RECORDS_GROUPED_TOTAL).increment(records.len() as u64);
    metrics::counter!(crate::observability::RANGES_EMITTED_TOTAL).increment(ranges.len() as u64);

    ranges
}

/// Flatten ranges back into per-day records: every item, on every day.
pub fn expand(ranges: &[ConsolidatedRange]) -> Vec<BookingRecord> {
    let mut records = Vec::new();
    for range in ranges {
        for date in range.dates() {
            for item in &range.items {
                records.push(BookingRecord::new(item.project.clone(), date, item.allocation));
            }
        }
    }
    records
}
