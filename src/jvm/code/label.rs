use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LABEL: AtomicU64 = AtomicU64::new(1);

/// Opaque jump target
///
/// A label has no name or value of its own: two labels are the same target if and only if they
/// came from the same call to [`Label::new`]. Copies of a label refer to the same target. Readable
/// names (`L0`, `L1`, ...) are only assigned through a
/// [`LabelIndexLookup`](crate::labels::LabelIndexLookup).
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct Label(u64);

impl Label {
    /// Make a fresh label, distinct from every other label in the process
    pub fn new() -> Label {
        Label(NEXT_LABEL.fetch_add(1, Ordering::Relaxed))
    }

    /// Hash of the label identity
    ///
    /// Stable for the lifetime of the process, but not across runs.
    pub fn identity_hash(&self) -> u32 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish() as u32
    }

    /// Total order on identities, for tie-breaking only
    ///
    /// The order has no meaning beyond being consistent within a process.
    pub(crate) fn identity_cmp(&self, other: &Label) -> std::cmp::Ordering {
        self.identity_hash()
            .cmp(&other.identity_hash())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl Default for Label {
    fn default() -> Label {
        Label::new()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Label@{:x}", self.identity_hash())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_labels_are_distinct() {
        let first = Label::new();
        let second = Label::new();
        let copy = first;
        assert_ne!(first, second);
        assert_eq!(first, copy);
        assert_eq!(first.identity_hash(), copy.identity_hash());
        assert_ne!(first.identity_cmp(&second), std::cmp::Ordering::Equal);
        assert_eq!(first.identity_cmp(&copy), std::cmp::Ordering::Equal);
    }
}
