use super::{IndexAwareRenderer, Renderer};
use crate::jvm::code::Label;
use crate::labels::LabelIndexLookup;
use log::trace;

/// Renders labels as `L<index>`, or `L<identity hash>` when the label has no index
#[derive(Copy, Clone, Debug, Default)]
pub struct LabelRenderer;

impl LabelRenderer {
    /// Name of the label according to `labels`
    pub fn name(&self, label: &Label, labels: &LabelIndexLookup) -> String {
        match labels.find(label) {
            Some(index) => format!("L{}", index),
            None => {
                trace!("No index for {:?}", label);
                format!("L{}", label.identity_hash())
            }
        }
    }
}

/// A lone label has no instruction stream to index it
impl Renderer<Label> for LabelRenderer {
    fn render(&self, node: &Label) -> String {
        self.name(node, LabelIndexLookup::empty())
    }
}

impl IndexAwareRenderer<Label> for LabelRenderer {
    fn render_with_labels(&self, node: &Label, labels: &mut LabelIndexLookup) -> String {
        self.name(node, labels)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_or_identity() {
        let label = Label::new();
        let mut labels = LabelIndexLookup::from_entries(vec![(label, 3)]);
        assert_eq!(LabelRenderer.render_with_labels(&label, &mut labels), "L3");
        assert_eq!(
            LabelRenderer.render(&label),
            format!("L{}", label.identity_hash())
        );
    }
}
