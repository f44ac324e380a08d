use crate::NodeKind;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// A flattened annotation `[name, value, name, value, ...]` list has an odd length
    OddAnnotationValueCount(usize),

    /// A name slot in a flattened annotation value list does not hold a string
    AnnotationValueNameNotString(usize),

    /// A field or method descriptor could not be parsed
    MalformedDescriptor(String),

    /// Start, end, and index lists of a local variable annotation differ in length
    UnevenLocalVariableRanges {
        start: usize,
        end: usize,
        index: usize,
    },

    /// A class, field, or method name is not valid
    MalformedName(String),

    /// A renderer for this node kind has already been registered
    ///
    /// Registries are write-once per kind: build a fresh registry to swap a renderer out.
    DuplicateRenderer(NodeKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OddAnnotationValueCount(count) => write!(
                f,
                "There must be an even number of values (found {})",
                count
            ),
            Error::AnnotationValueNameNotString(index) => write!(
                f,
                "Annotation value name at position {} is not a string",
                index
            ),
            Error::MalformedDescriptor(msg) => write!(f, "Malformed descriptor: {}", msg),
            Error::UnevenLocalVariableRanges { start, end, index } => write!(
                f,
                "Local variable ranges need as many ends and indices as starts \
                 (found {} starts, {} ends, {} indices)",
                start, end, index
            ),
            Error::MalformedName(msg) => write!(f, "Malformed name: {}", msg),
            Error::DuplicateRenderer(kind) => {
                write!(f, "A renderer for {:?} is already registered", kind)
            }
        }
    }
}

impl std::error::Error for Error {}
