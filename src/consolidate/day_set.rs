use std::collections::BTreeSet;

use crate::model::Allocation;

/// All (project, allocation) pairs booked on one date. One pair per record;
/// nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAllocationSet {
    pairs: Vec<Allocation>,
}

/// Canonical form of a day set: `(cardinality, sorted distinct pairs)`.
/// Equal keys ⇔ `equivalent` holds.
pub type DayKey = (usize, Vec<Allocation>);

impl DayAllocationSet {
    pub fn push(&mut self, pair: Allocation) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, pair: &Allocation) -> bool {
        self.pairs.iter().any(|p| p == pair)
    }

    pub fn key(&self) -> DayKey {
        let distinct: BTreeSet<&Allocation> = self.pairs.iter().collect();
        (self.pairs.len(), distinct.into_iter().cloned().collect())
    }

    /// The pairs sorted ascending, duplicates kept.
    pub fn into_sorted(mut self) -> Vec<Allocation> {
        self.pairs.sort();
        self.pairs
    }
}

impl FromIterator<Allocation> for DayAllocationSet {
    fn from_iter<I: IntoIterator<Item = Allocation>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Pairwise set equality: same cardinality and containment in both directions.
pub fn equivalent(a: &DayAllocationSet, b: &DayAllocationSet) -> bool {
    a.len() == b.len()
        && a.pairs.iter().all(|p| b.contains(p))
        && b.pairs.iter().all(|p| a.contains(p))
}
