use super::{IndexAwareComparator, StructuralComparator};
use crate::jvm::code::Label;
use crate::labels::LabelIndexLookup;
use log::trace;
use std::cmp::Ordering;

/// Compares labels by index, falling back to identity
///
/// Two labels are equal if the lookup gives them the same index. Labels without an index are
/// only equal to themselves, and sort after labels with an index.
#[derive(Copy, Clone, Debug, Default)]
pub struct LabelComparator;

impl StructuralComparator<Label> for LabelComparator {
    /// A lone label has no instruction stream to index it: compare identities
    fn compare(&self, first: &Label, second: &Label) -> Ordering {
        first.identity_cmp(second)
    }
}

impl IndexAwareComparator<Label> for LabelComparator {
    fn compare_with_labels(
        &self,
        first: &Label,
        second: &Label,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        match (labels.find(first), labels.find(second)) {
            (Some(first), Some(second)) => first.cmp(&second),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => {
                trace!("Comparing unindexed labels {:?} and {:?}", first, second);
                self.compare(first, second)
            }
        }
    }
}

impl LabelComparator {
    /// Compare lists of labels position by position
    pub fn compare_lists(
        &self,
        first: &[Label],
        second: &[Label],
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        super::compare_positional(first, second, |a, b| self.compare_with_labels(a, b, labels))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolved_labels_compare_by_index() {
        let (a, b, c) = (Label::new(), Label::new(), Label::new());
        let mut labels = LabelIndexLookup::from_entries(vec![(a, 0), (b, 0), (c, 1)]);
        let cmp = LabelComparator;
        assert_eq!(cmp.compare_with_labels(&a, &b, &mut labels), Ordering::Equal);
        assert_eq!(cmp.compare_with_labels(&a, &c, &mut labels), Ordering::Less);
        assert_eq!(cmp.compare_with_labels(&c, &b, &mut labels), Ordering::Greater);
    }

    #[test]
    fn unresolved_labels_compare_by_identity() {
        let (a, b) = (Label::new(), Label::new());
        let mut labels = LabelIndexLookup::new();
        let cmp = LabelComparator;
        assert_eq!(cmp.compare_with_labels(&a, &a, &mut labels), Ordering::Equal);
        assert_ne!(cmp.compare_with_labels(&a, &b, &mut labels), Ordering::Equal);
        assert_eq!(
            cmp.compare_with_labels(&a, &b, &mut labels),
            cmp.compare_with_labels(&b, &a, &mut labels).reverse()
        );

        labels.put_if_unknown(b, 3);
        assert_eq!(cmp.compare_with_labels(&b, &a, &mut labels), Ordering::Less);
        assert_eq!(cmp.compare_optional(None, Some(&a)), Ordering::Less);
    }
}
