use std::cmp::Ordering;

use super::unique::{total_cmp, unique};

/// Sorted values shared by two sequences, with the index of their
/// first occurrence in each sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<T> {
    pub values: Vec<T>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

impl<T> Intersection<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sorted set intersection of `left` and `right`.
pub fn intersect<T: PartialOrd + Clone>(left: &[T], right: &[T]) -> Intersection<T> {
    let (lhs, rhs) = (unique(left), unique(right));

    let mut values = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < lhs.values.len() && j < rhs.values.len() {
        match total_cmp(&lhs.values[i], &rhs.values[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                values.push(lhs.values[i].clone());
                left.push(lhs.first[i]);
                right.push(rhs.first[j]);
                i += 1;
                j += 1;
            },
        }
    }

    Intersection {
        values,
        left,
        right,
    }
}
