//! Total orders over class structures
//!
//! Every comparator orders nodes so that two nodes are equal exactly when all of their compared
//! fields are structurally equal. Composite nodes compare their fields one after the other in a
//! fixed order and stop at the first difference, so the order of fields decides which difference
//! dominates.
//!
//! Labels make this harder: a label is only equal to itself, yet two copies of the same method
//! never share labels. Comparators of nodes which contain labels therefore implement
//! [`IndexAwareComparator`] and resolve labels to their index in a [`LabelIndexLookup`] (see
//! [`crate::labels`]). The context free [`StructuralComparator::compare`] builds a lookup from the
//! two operands; [`IndexAwareComparator::compare_with_labels`] reuses one handed down from an
//! enclosing comparison.
//!
//! Absent values (`None`) sort before present ones.

mod annotation;
mod class;
mod instruction;
mod label;
mod method;
mod registry;
mod types;

pub use annotation::*;
pub use class::*;
pub use instruction::*;
pub use label::*;
pub use method::*;
pub use registry::*;
pub use types::*;

use crate::labels::LabelIndexLookup;
use std::cmp::Ordering;

/// Total order over some node type
pub trait StructuralComparator<T: ?Sized> {
    /// Compare two nodes
    ///
    /// Nodes containing labels are compared with a lookup built from the two nodes alone.
    fn compare(&self, first: &T, second: &T) -> Ordering;

    /// Compare two possibly absent nodes, absent first
    fn compare_optional(&self, first: Option<&T>, second: Option<&T>) -> Ordering {
        compare_nulls_first(first, second, |first, second| self.compare(first, second))
    }
}

/// Total order over a node type containing labels
pub trait IndexAwareComparator<T: ?Sized>: StructuralComparator<T> {
    /// Compare two nodes, resolving labels through `labels`
    ///
    /// The lookup may be extended with indices learned along the way. Labels absent from the
    /// lookup are compared by identity.
    fn compare_with_labels(&self, first: &T, second: &T, labels: &mut LabelIndexLookup)
        -> Ordering;

    /// Compare two possibly absent nodes, absent first
    fn compare_optional_with_labels(
        &self,
        first: Option<&T>,
        second: Option<&T>,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        compare_nulls_first(first, second, |first, second| {
            self.compare_with_labels(first, second, labels)
        })
    }
}

/// Comparators which can disregard line numbers
pub trait IgnoreLineNumbersCapable: Sized {
    /// Compare as if line numbers (and labels only used by them) were absent
    fn ignore_line_numbers(self) -> Self;
}

/// Order absent values first, then delegate
pub fn compare_nulls_first<T: ?Sized>(
    first: Option<&T>,
    second: Option<&T>,
    compare: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (first, second) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(first), Some(second)) => compare(first, second),
    }
}

/// Compare sequences where order is not significant
///
/// Both sequences are sorted with the element order, then compared by length and finally element
/// by element. Any permutation of a sequence is equal to it.
pub fn compare_unordered<T>(
    first: &[T],
    second: &[T],
    mut compare: impl FnMut(&T, &T) -> Ordering,
) -> Ordering {
    let mut first: Vec<&T> = first.iter().collect();
    let mut second: Vec<&T> = second.iter().collect();
    first.sort_by(|a, b| compare(*a, *b));
    second.sort_by(|a, b| compare(*a, *b));

    first.len().cmp(&second.len()).then_with(|| {
        first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| compare(*a, *b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Compare sequences where order is significant
///
/// Sequences are compared by length first and then element by element.
pub fn compare_positional<T>(
    first: &[T],
    second: &[T],
    mut compare: impl FnMut(&T, &T) -> Ordering,
) -> Ordering {
    first.len().cmp(&second.len()).then_with(|| {
        first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nulls_first() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(compare_nulls_first(None, Some(&1), cmp), Ordering::Less);
        assert_eq!(compare_nulls_first(Some(&1), None, cmp), Ordering::Greater);
        assert_eq!(compare_nulls_first::<i32>(None, None, cmp), Ordering::Equal);
        assert_eq!(compare_nulls_first(Some(&1), Some(&2), cmp), Ordering::Less);
    }

    #[test]
    fn unordered_ignores_permutations() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(compare_unordered(&[3, 1, 2], &[2, 3, 1], cmp), Ordering::Equal);
        assert_eq!(compare_unordered(&[1, 2], &[1, 2, 0], cmp), Ordering::Less);
        assert_eq!(compare_unordered(&[5, 1], &[1, 4], cmp), Ordering::Greater);
    }

    #[test]
    fn positional_respects_order() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(compare_positional(&[1, 2], &[1, 2], cmp), Ordering::Equal);
        assert_eq!(compare_positional(&[2, 1], &[1, 2], cmp), Ordering::Greater);
        assert_eq!(compare_positional(&[9], &[1, 2], cmp), Ordering::Less);
    }
}
