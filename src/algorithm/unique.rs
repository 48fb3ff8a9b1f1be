use itertools::Itertools;
use std::cmp::Ordering;

/// Sorted distinct values of a sequence, with index maps
/// from and to the original sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Unique<T> {
    /// Strictly increasing distinct values
    pub values: Vec<T>,
    /// Index of the first occurrence of each value, in the input sequence
    pub first: Vec<usize>,
    /// Index into `values` of each input item
    pub inverse: Vec<usize>,
}

impl<T> Unique<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn total_cmp<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Sorts and deduplicates `items`. Compacted indices are retrieved by binary search.
pub fn unique<T: PartialOrd + Clone>(items: &[T]) -> Unique<T> {
    let values = items
        .iter()
        .cloned()
        .sorted_by(total_cmp)
        .dedup()
        .collect::<Vec<_>>();

    let mut first = vec![usize::MAX; values.len()];

    let inverse = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let index = values
                .binary_search_by(|v| total_cmp(v, item))
                .unwrap_or_else(|index| index);
            if first[index] == usize::MAX {
                first[index] = i;
            }
            index
        })
        .collect::<Vec<_>>();

    Unique {
        values,
        first,
        inverse,
    }
}
