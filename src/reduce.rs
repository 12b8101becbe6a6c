use crate::model::Score;

/// Highest score, or `None` for an empty slice.
pub fn with_max(scores: &[Score]) -> Option<Score> {
    scores.iter().copied().max()
}

pub fn average_or_none(items: &[i32]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let sum: i64 = items.iter().map(|&n| n as i64).sum();
    Some(sum as f64 / items.len() as f64)
}

/// The value nearest the mean. Ties go to whichever comes first.
pub fn closest_to_average(numbers: &[i32]) -> Option<i32> {
    let average = average_or_none(numbers)?;
    let mut best: Option<(i32, f64)> = None;
    for &n in numbers {
        let distance = (average - n as f64).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((n, distance)),
        }
    }
    best.map(|(n, _)| n)
}

/// `text` followed by `suffix`, or `""` when `text` is absent or blank.
pub fn with_suffix(text: Option<&str>, suffix: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => {
            let suffix = suffix.unwrap_or_default();
            let mut out = String::with_capacity(t.len() + suffix.len());
            out.push_str(t);
            out.push_str(suffix);
            out
        }
        _ => String::new(),
    }
}

/// Interleave two sequences: `first[0], second[0], first[1], second[1], ...`.
/// Whatever is left of the longer one follows in order.
pub fn merge(first: Option<&[i32]>, second: Option<&[i32]>) -> Vec<i32> {
    let first = first.unwrap_or_default();
    let second = second.unwrap_or_default();
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for i in 0..first.len().max(second.len()) {
        if let Some(&a) = first.get(i) {
            merged.push(a);
        }
        if let Some(&b) = second.get(i) {
            merged.push(b);
        }
    }
    merged
}
