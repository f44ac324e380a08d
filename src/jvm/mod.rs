//! JVM class structures as read from class files
//!
//! ### Simple example
//!
//! Consider the following simple Java method:
//!
//! ```java,ignore,no_run
//! static int abs(int x) {
//!     if (x < 0) {
//!         return -x;
//!     }
//!     return x;
//! }
//! ```
//!
//! A bytecode reader would hand over the following tree:
//!
//! ```
//! use bytecode_testkit::jvm::code::{Instruction, Instruction::*, Label, Opcode};
//! use bytecode_testkit::jvm::model::MethodNode;
//! use bytecode_testkit::jvm::MethodAccessFlags;
//!
//! let positive = Label::new();
//! let mut method = MethodNode::new(MethodAccessFlags::STATIC, "abs", "(I)I");
//! method.instructions = vec![
//!     Var { opcode: Opcode::ILOAD, var: 0 },
//!     Jump { opcode: Opcode(156), label: positive }, // IFGE
//!     Var { opcode: Opcode::ILOAD, var: 0 },
//!     Insn { opcode: Opcode(116) }, // INEG
//!     Insn { opcode: Opcode::IRETURN },
//!     Instruction::Label(positive),
//!     Var { opcode: Opcode::ILOAD, var: 0 },
//!     Insn { opcode: Opcode::IRETURN },
//! ];
//! method.max_stack = 1;
//! method.max_locals = 1;
//! ```

mod access_flags;
pub mod code;
mod descriptors;
pub mod model;
mod names;

pub use access_flags::*;
pub use descriptors::*;
pub use names::*;
