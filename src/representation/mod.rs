//! Readable text for class structures
//!
//! Renderings are meant for assertion failure messages: they are deterministic (given the same
//! label indices), line oriented, and show every field that the matching comparator in
//! [`crate::comparator`] looks at.
//!
//! Labels render as `L<index>` when the [`LabelIndexLookup`] knows them and as
//! `L<identity hash>` otherwise. The context free [`Renderer::render`] indexes the labels of the
//! rendered node itself; [`IndexAwareRenderer::render_with_labels`] uses the lookup it is handed.
//!
//! Most nodes also have a simplified rendering: a single line without secondary details, used
//! when a whole tree would be too noisy.

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

/// Text form of some node type
pub trait Renderer<T: ?Sized> {
    /// Full, possibly multi-line, rendering
    ///
    /// Nodes containing labels are rendered with a lookup built from the node alone.
    fn render(&self, node: &T) -> String;

    /// Short single line rendering, defaulting to the full rendering
    fn render_simplified(&self, node: &T) -> String {
        self.render(node)
    }
}

/// Text form of a node type containing labels
pub trait IndexAwareRenderer<T: ?Sized>: Renderer<T> {
    /// Full rendering, naming labels through `labels`
    ///
    /// Renderers of methods add the method's own labels to the lookup first. Labels still absent
    /// from the lookup render by identity hash.
    fn render_with_labels(&self, node: &T, labels: &mut LabelIndexLookup) -> String;

    /// Short single line rendering, naming labels through `labels`
    fn render_simplified_with_labels(&self, node: &T, _labels: &mut LabelIndexLookup) -> String {
        self.render_simplified(node)
    }
}

/// Prefix every line of `text`
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indents_every_line() {
        assert_eq!(indent("a\nb", "  "), "  a\n  b");
        assert_eq!(indent("", "  "), "");
    }
}
