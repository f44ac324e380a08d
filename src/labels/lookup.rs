use crate::jvm::code::Label;
use log::trace;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Stable indices for labels
///
/// Labels only have an identity, so two copies of the same code use different labels. Indexing
/// labels by their position lets them be compared and printed (`L0`, `L1`, ...) independently of
/// identity.
///
/// Indices are write-once: the first index recorded for a label is kept for the lifetime of the
/// lookup, and later writes for the same label are ignored.
#[derive(Clone, Debug, Default)]
pub struct LabelIndexLookup {
    indices: HashMap<Label, usize>,
}

impl LabelIndexLookup {
    pub fn new() -> LabelIndexLookup {
        LabelIndexLookup {
            indices: HashMap::new(),
        }
    }

    /// Shared lookup which knows no labels
    pub fn empty() -> &'static LabelIndexLookup {
        static EMPTY: OnceLock<LabelIndexLookup> = OnceLock::new();
        EMPTY.get_or_init(LabelIndexLookup::new)
    }

    /// Lookup pre-seeded with some entries
    pub fn from_entries(entries: impl IntoIterator<Item = (Label, usize)>) -> LabelIndexLookup {
        let mut lookup = LabelIndexLookup::new();
        lookup.put_all(entries);
        lookup
    }

    /// Index of a label, if known
    pub fn find(&self, label: &Label) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.indices.contains_key(label)
    }

    /// Record an index for a label, unless the label already has one
    ///
    /// Returns whether the index was recorded.
    pub fn put_if_unknown(&mut self, label: Label, index: usize) -> bool {
        match self.indices.entry(label) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                trace!("Label {:?} gets index {}", label, index);
                entry.insert(index);
                true
            }
        }
    }

    /// Record indices for all unknown labels, in order
    pub fn put_all(&mut self, entries: impl IntoIterator<Item = (Label, usize)>) {
        for (label, index) in entries {
            self.put_if_unknown(label, index);
        }
    }

    /// Record all indices from another lookup for labels unknown here
    pub fn merge_with(&mut self, other: &LabelIndexLookup) {
        self.put_all(other.entries());
    }

    /// All entries, sorted by index
    ///
    /// Labels sharing an index (from different instruction streams) are ordered by identity.
    pub fn entries(&self) -> Vec<(Label, usize)> {
        let mut entries: Vec<(Label, usize)> = self
            .indices
            .iter()
            .map(|(label, index)| (*label, *index))
            .collect();
        entries.sort_by(|(label1, index1), (label2, index2)| {
            index1.cmp(index2).then_with(|| label1.identity_cmp(label2))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}
