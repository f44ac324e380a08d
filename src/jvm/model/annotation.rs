use crate::jvm::code::Label;
use crate::Error;
use std::fmt;

/// Annotation, as it appears on a class, field, method, or parameter
#[derive(Clone, PartialEq, Debug)]
pub struct AnnotationNode {
    /// Descriptor of the annotation interface (eg. `Ljava/lang/Deprecated;`)
    pub descriptor: String,

    /// Element values, in the order they appear in the class file
    pub values: Vec<(String, AnnotationValue)>,
}

/// Value of an annotation element
#[derive(Clone, PartialEq, Debug)]
pub enum AnnotationValue {
    Byte(i8),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),

    /// Class literal, given as a descriptor
    Class(String),

    /// Enum constant
    Enum { descriptor: String, value: String },

    Annotation(AnnotationNode),
    Array(Vec<AnnotationValue>),
}

impl AnnotationNode {
    pub fn new(descriptor: impl Into<String>) -> AnnotationNode {
        AnnotationNode {
            descriptor: descriptor.into(),
            values: vec![],
        }
    }

    /// Add an element value
    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.push((name.into(), value));
        self
    }

    /// Build an annotation from a flattened `[name, value, name, value, ...]` list
    ///
    /// This is the layout some bytecode readers use. The list must have an even length and every
    /// name slot must hold a string.
    pub fn from_flat_values(
        descriptor: impl Into<String>,
        flat_values: Vec<AnnotationValue>,
    ) -> Result<AnnotationNode, Error> {
        if flat_values.len() % 2 != 0 {
            return Err(Error::OddAnnotationValueCount(flat_values.len()));
        }

        let mut values = Vec::with_capacity(flat_values.len() / 2);
        let mut flat_values = flat_values.into_iter().enumerate();
        while let Some((idx, name)) = flat_values.next() {
            let name = match name {
                AnnotationValue::String(name) => name,
                _ => return Err(Error::AnnotationValueNameNotString(idx)),
            };
            if let Some((_, value)) = flat_values.next() {
                values.push((name, value));
            }
        }

        Ok(AnnotationNode {
            descriptor: descriptor.into(),
            values,
        })
    }

    /// Look up the value of an element
    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(value_name, _)| value_name == name)
            .map(|(_, value)| value)
    }
}

/// Reference to the type being annotated by a type annotation
///
/// The target sort is in the most significant byte. The remaining bytes depend on the sort.
///
/// See <https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.7.20.1>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeReference(pub u32);

impl TypeReference {
    pub const CLASS_TYPE_PARAMETER: u8 = 0x00;
    pub const METHOD_TYPE_PARAMETER: u8 = 0x01;
    pub const CLASS_EXTENDS: u8 = 0x10;
    pub const CLASS_TYPE_PARAMETER_BOUND: u8 = 0x11;
    pub const METHOD_TYPE_PARAMETER_BOUND: u8 = 0x12;
    pub const FIELD: u8 = 0x13;
    pub const METHOD_RETURN: u8 = 0x14;
    pub const METHOD_RECEIVER: u8 = 0x15;
    pub const METHOD_FORMAL_PARAMETER: u8 = 0x16;
    pub const THROWS: u8 = 0x17;
    pub const LOCAL_VARIABLE: u8 = 0x40;
    pub const RESOURCE_VARIABLE: u8 = 0x41;
    pub const EXCEPTION_PARAMETER: u8 = 0x42;
    pub const INSTANCEOF: u8 = 0x43;
    pub const NEW: u8 = 0x44;
    pub const CONSTRUCTOR_REFERENCE: u8 = 0x45;
    pub const METHOD_REFERENCE: u8 = 0x46;
    pub const CAST: u8 = 0x47;
    pub const CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT: u8 = 0x48;
    pub const METHOD_INVOCATION_TYPE_ARGUMENT: u8 = 0x49;
    pub const CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT: u8 = 0x4A;
    pub const METHOD_REFERENCE_TYPE_ARGUMENT: u8 = 0x4B;

    /// Reference with just a sort
    pub fn of_sort(sort: u8) -> TypeReference {
        TypeReference((sort as u32) << 24)
    }

    pub fn sort(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn type_parameter_index(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn type_parameter_bound_index(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Index in the `implements` clause, `-1` for the superclass
    pub fn super_type_index(&self) -> i16 {
        ((self.0 & 0x00FF_FF00) >> 8) as u16 as i16
    }

    pub fn formal_parameter_index(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn exception_index(&self) -> u16 {
        ((self.0 & 0x00FF_FF00) >> 8) as u16
    }

    pub fn try_catch_block_index(&self) -> u16 {
        ((self.0 & 0x00FF_FF00) >> 8) as u16
    }

    pub fn type_argument_index(&self) -> u8 {
        self.0 as u8
    }
}

/// One step of a [`TypePath`]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypePathStep {
    ArrayElement,
    InnerType,
    WildcardBound,
    TypeArgument(u8),
}

/// Path to the annotated part of a type, for type annotations on nested types
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TypePath(pub Vec<TypePathStep>);

/// Canonical form: `[` for array elements, `.` for inner types, `*` for wildcard bounds, and
/// `N;` for type argument `N`
impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            match step {
                TypePathStep::ArrayElement => f.write_str("[")?,
                TypePathStep::InnerType => f.write_str(".")?,
                TypePathStep::WildcardBound => f.write_str("*")?,
                TypePathStep::TypeArgument(idx) => write!(f, "{};", idx)?,
            }
        }
        Ok(())
    }
}

/// Annotation on a use of a type
#[derive(Clone, PartialEq, Debug)]
pub struct TypeAnnotationNode {
    pub type_ref: TypeReference,
    pub type_path: Option<TypePath>,
    pub annotation: AnnotationNode,
}

/// Type annotation on a local variable declaration
///
/// A local variable can live in several disjoint ranges. `start`, `end`, and `index` are parallel
/// lists: range `i` covers `start[i]..end[i]` in slot `index[i]`.
#[derive(Clone, PartialEq, Debug)]
pub struct LocalVariableAnnotationNode {
    pub type_annotation: TypeAnnotationNode,
    pub start: Vec<Label>,
    pub end: Vec<Label>,
    pub index: Vec<u16>,
}

impl LocalVariableAnnotationNode {
    /// Annotation over ranges `start[i]..end[i]` in slot `index[i]`
    ///
    /// The three lists must have the same length.
    pub fn new(
        type_annotation: TypeAnnotationNode,
        start: Vec<Label>,
        end: Vec<Label>,
        index: Vec<u16>,
    ) -> Result<LocalVariableAnnotationNode, Error> {
        if start.len() != end.len() || start.len() != index.len() {
            return Err(Error::UnevenLocalVariableRanges {
                start: start.len(),
                end: end.len(),
                index: index.len(),
            });
        }
        Ok(LocalVariableAnnotationNode {
            type_annotation,
            start,
            end,
            index,
        })
    }

    /// `(start, end, index)` for each range
    ///
    /// Runs as long as the longest of the three lists. Entries missing from the shorter lists are
    /// `None`.
    pub fn ranges(
        &self,
    ) -> impl Iterator<Item = (Option<Label>, Option<Label>, Option<u16>)> + '_ {
        let count = self.start.len().max(self.end.len()).max(self.index.len());
        (0..count).map(move |i| {
            (
                self.start.get(i).copied(),
                self.end.get(i).copied(),
                self.index.get(i).copied(),
            )
        })
    }


    /// All labels delimiting ranges, starts before ends
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.start.iter().chain(self.end.iter()).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flat_values() -> Result<(), Error> {
        let annotation = AnnotationNode::from_flat_values(
            "Ljava/lang/Deprecated;",
            vec![
                AnnotationValue::String(String::from("since")),
                AnnotationValue::String(String::from("9")),
                AnnotationValue::String(String::from("forRemoval")),
                AnnotationValue::Boolean(true),
            ],
        )?;
        assert_eq!(
            annotation.value("since"),
            Some(&AnnotationValue::String(String::from("9")))
        );
        assert_eq!(annotation.value("forRemoval"), Some(&AnnotationValue::Boolean(true)));
        assert_eq!(annotation.value("other"), None);
        Ok(())
    }

    #[test]
    fn ranges_cover_the_longest_list() {
        let (a, b, c) = (Label::new(), Label::new(), Label::new());
        let node = LocalVariableAnnotationNode {
            type_annotation: TypeAnnotationNode {
                type_ref: TypeReference::of_sort(TypeReference::LOCAL_VARIABLE),
                type_path: None,
                annotation: AnnotationNode::new("LA;"),
            },
            start: vec![a, b],
            end: vec![c],
            index: vec![1, 2],
        };
        assert_eq!(
            node.ranges().collect::<Vec<_>>(),
            vec![(Some(a), Some(c), Some(1)), (Some(b), None, Some(2))]
        );

        let rebuilt = LocalVariableAnnotationNode::new(
            node.type_annotation.clone(),
            node.start.clone(),
            node.end.clone(),
            node.index.clone(),
        );
        assert!(matches!(
            rebuilt,
            Err(Error::UnevenLocalVariableRanges {
                start: 2,
                end: 1,
                index: 2
            })
        ));
        let even =
            LocalVariableAnnotationNode::new(node.type_annotation, vec![a], vec![c], vec![1]);
        assert!(even.is_ok());
    }

    #[test]
    fn odd_flat_values_are_rejected() {
        let result = AnnotationNode::from_flat_values(
            "LFoo;",
            vec![AnnotationValue::String(String::from("value"))],
        );
        assert!(matches!(result, Err(Error::OddAnnotationValueCount(1))));

        let result = AnnotationNode::from_flat_values(
            "LFoo;",
            vec![AnnotationValue::Int(1), AnnotationValue::Int(2)],
        );
        assert!(matches!(result, Err(Error::AnnotationValueNameNotString(0))));
    }

    #[test]
    fn type_references() {
        let reference = TypeReference(0x1601_0000);
        assert_eq!(reference.sort(), TypeReference::METHOD_FORMAL_PARAMETER);
        assert_eq!(reference.formal_parameter_index(), 1);

        let reference = TypeReference(0x10FF_FF00);
        assert_eq!(reference.sort(), TypeReference::CLASS_EXTENDS);
        assert_eq!(reference.super_type_index(), -1);

        let reference = TypeReference(0x4700_0002);
        assert_eq!(reference.type_argument_index(), 2);
    }

    #[test]
    fn type_path_display() {
        let path = TypePath(vec![
            TypePathStep::ArrayElement,
            TypePathStep::InnerType,
            TypePathStep::TypeArgument(1),
            TypePathStep::WildcardBound,
        ]);
        assert_eq!(path.to_string(), "[.1;*");
    }
}
