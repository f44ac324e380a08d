//! Tree representation of classes
//!
//! This is the shape a bytecode reader hands over: every declaration is a plain owned node with
//! public fields, and method bodies are flat instruction lists.
//!
//!   - __Class__ is represented using [`ClassNode`]
//!   - __Method__ is represented using [`MethodNode`]
//!   - __Field__ is represented using [`FieldNode`]
//!
//! Labels are shared between a method's instructions, local variables, try/catch blocks, and
//! local variable annotations. A well formed tree uses the same [`Label`](crate::jvm::code::Label)
//! everywhere it means the same position.

mod annotation;
mod attribute;
mod class;
mod field;
mod method;

pub use annotation::*;
pub use attribute::*;
pub use class::*;
pub use field::*;
pub use method::*;
