//! Method bodies: labels, opcodes, and instructions
//!
//! An instruction stream is a plain `Vec<Instruction>` in which [`Instruction::Label`] entries
//! mark the positions of jump targets. Labels are identity-only handles; see
//! [`crate::labels`] for how they are given stable names.

mod instructions;
mod label;
mod opcodes;

pub use instructions::*;
pub use label::*;
pub use opcodes::*;
