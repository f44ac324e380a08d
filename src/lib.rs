//! Comparing and printing JVM class structures in tests
//!
//! Two classes produced by different runs of a bytecode generator never share labels, so plain
//! equality on the class tree is useless for assertions. This crate resolves every label to its
//! position in the instruction stream (see [`labels`]) and offers:
//!
//!   * total orders over classes, methods, fields, instructions, annotations, and the rest of the
//!     class tree (see [`comparator`])
//!   * deterministic text renderings of the same structures, for assertion messages (see
//!     [`representation`])
//!
//! Both come as one type per kind of node, plus a registry ([`comparator::DefaultComparators`],
//! [`representation::DefaultRepresentations`]) for code that only knows at runtime what kind of
//! node it is looking at. [`Settings`] configures the registries.

pub mod comparator;
mod errors;
pub mod jvm;
pub mod labels;
mod node;
pub mod representation;
mod settings;

pub use errors::*;
pub use node::*;
pub use settings::*;
