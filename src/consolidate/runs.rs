use chrono::NaiveDate;

/// Split ascending, distinct dates into maximal runs of consecutive days.
/// Returns inclusive `(first, last)` pairs.
pub fn contiguous_runs(sorted: &[NaiveDate]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut runs: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for &date in sorted {
        if let Some(last) = runs.last_mut()
            && last.1.succ_opt() == Some(date) {
                last.1 = date;
                continue;
            }
        runs.push((date, date));
    }
    runs
}
