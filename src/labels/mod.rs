//! Stable names for labels
//!
//! Labels are compared by identity, so two copies of the same method never share labels. To
//! compare or print code, every label gets an index from its position in the instruction stream
//! that defines it. The index is what gets compared and printed (`L0`, `L1`, ...).
//!
//! A [`LabelIndexLookup`] is built once per comparison or rendering and then passed down to every
//! nested comparator or renderer, so that an instruction, a local variable range, and a try/catch
//! block all agree on the index of a shared label. Indices for labels found outside the
//! instruction stream are only meaningful once the stream has been indexed.

mod extract;
mod lookup;

pub use extract::*;
pub use lookup::*;
