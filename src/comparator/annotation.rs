use super::{
    compare_positional, compare_unordered, IndexAwareComparator, LabelComparator,
    StructuralComparator, TypeComparator, TypePathComparator, TypeReferenceComparator,
};
use crate::jvm::model::{
    AnnotationNode, AnnotationValue, LocalVariableAnnotationNode, TypeAnnotationNode,
};
use crate::labels::LabelIndexLookup;
use std::cmp::Ordering;

/// Compares annotations by type, then by their element values
///
/// Element values are compared as a map from name to value: the order in which elements appear
/// does not matter.
#[derive(Clone, Debug, Default)]
pub struct AnnotationNodeComparator {
    types: TypeComparator,
}

impl AnnotationNodeComparator {
    pub fn new() -> AnnotationNodeComparator {
        AnnotationNodeComparator {
            types: TypeComparator::new(),
        }
    }

    /// Compare element values
    pub fn compare_values(&self, first: &AnnotationValue, second: &AnnotationValue) -> Ordering {
        use AnnotationValue::*;
        match (first, second) {
            (Byte(a), Byte(b)) => a.cmp(b),
            (Char(a), Char(b)) => a.cmp(b),
            (Short(a), Short(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Long(a), Long(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Double(a), Double(b)) => a.total_cmp(b),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Class(a), Class(b)) => self.types.compare_descriptors(a, b),
            (
                Enum {
                    descriptor: d1,
                    value: v1,
                },
                Enum {
                    descriptor: d2,
                    value: v2,
                },
            ) => self
                .types
                .compare_descriptors(d1, d2)
                .then_with(|| v1.cmp(v2)),
            (Annotation(a), Annotation(b)) => self.compare(a, b),
            (Array(a), Array(b)) => {
                compare_positional(a, b, |first, second| self.compare_values(first, second))
            }
            _ => value_rank(first).cmp(&value_rank(second)),
        }
    }

    /// Compare annotation lists where order does not matter
    pub fn compare_sets(&self, first: &[AnnotationNode], second: &[AnnotationNode]) -> Ordering {
        compare_unordered(first, second, |first, second| self.compare(first, second))
    }

    /// Compare per-parameter annotation lists: parameters in order, annotations in any order
    pub fn compare_parameter_sets(
        &self,
        first: &[Vec<AnnotationNode>],
        second: &[Vec<AnnotationNode>],
    ) -> Ordering {
        compare_positional(first, second, |first, second| self.compare_sets(first, second))
    }
}

fn value_rank(value: &AnnotationValue) -> u8 {
    match value {
        AnnotationValue::Byte(_) => 0,
        AnnotationValue::Char(_) => 1,
        AnnotationValue::Short(_) => 2,
        AnnotationValue::Int(_) => 3,
        AnnotationValue::Long(_) => 4,
        AnnotationValue::Float(_) => 5,
        AnnotationValue::Double(_) => 6,
        AnnotationValue::Boolean(_) => 7,
        AnnotationValue::String(_) => 8,
        AnnotationValue::Class(_) => 9,
        AnnotationValue::Enum { .. } => 10,
        AnnotationValue::Annotation(_) => 11,
        AnnotationValue::Array(_) => 12,
    }
}

impl StructuralComparator<AnnotationNode> for AnnotationNodeComparator {
    fn compare(&self, first: &AnnotationNode, second: &AnnotationNode) -> Ordering {
        self.types
            .compare_descriptors(&first.descriptor, &second.descriptor)
            .then_with(|| {
                compare_unordered(&first.values, &second.values, |(n1, v1), (n2, v2)| {
                    n1.cmp(n2).then_with(|| self.compare_values(v1, v2))
                })
            })
    }
}

/// Compares default values of annotation interface elements
///
/// Values of different kinds are ordered by kind (`byte` first, arrays last).
#[derive(Clone, Debug, Default)]
pub struct AnnotationDefaultComparator {
    annotation: AnnotationNodeComparator,
}

impl AnnotationDefaultComparator {
    pub fn new() -> AnnotationDefaultComparator {
        AnnotationDefaultComparator {
            annotation: AnnotationNodeComparator::new(),
        }
    }
}

impl StructuralComparator<AnnotationValue> for AnnotationDefaultComparator {
    fn compare(&self, first: &AnnotationValue, second: &AnnotationValue) -> Ordering {
        self.annotation.compare_values(first, second)
    }
}

/// Compares type annotations by annotation, then type reference, then type path
#[derive(Clone, Debug, Default)]
pub struct TypeAnnotationNodeComparator {
    annotation: AnnotationNodeComparator,
    type_reference: TypeReferenceComparator,
    type_path: TypePathComparator,
}

impl TypeAnnotationNodeComparator {
    pub fn new() -> TypeAnnotationNodeComparator {
        TypeAnnotationNodeComparator {
            annotation: AnnotationNodeComparator::new(),
            type_reference: TypeReferenceComparator,
            type_path: TypePathComparator,
        }
    }

    /// Compare type annotation lists where order does not matter
    pub fn compare_sets(
        &self,
        first: &[TypeAnnotationNode],
        second: &[TypeAnnotationNode],
    ) -> Ordering {
        compare_unordered(first, second, |first, second| self.compare(first, second))
    }
}

impl StructuralComparator<TypeAnnotationNode> for TypeAnnotationNodeComparator {
    fn compare(&self, first: &TypeAnnotationNode, second: &TypeAnnotationNode) -> Ordering {
        self.annotation
            .compare(&first.annotation, &second.annotation)
            .then_with(|| self.type_reference.compare(&first.type_ref, &second.type_ref))
            .then_with(|| {
                self.type_path
                    .compare_optional(first.type_path.as_ref(), second.type_path.as_ref())
            })
    }
}

/// Compares local variable annotations by their type annotation, then their ranges
///
/// Range starts, range ends, and slot indices are compared as separate ordered lists, so lists of
/// uneven length never hide an entry.
#[derive(Clone, Debug, Default)]
pub struct LocalVariableAnnotationNodeComparator {
    type_annotation: TypeAnnotationNodeComparator,
    label: LabelComparator,
}

impl LocalVariableAnnotationNodeComparator {
    pub fn new() -> LocalVariableAnnotationNodeComparator {
        LocalVariableAnnotationNodeComparator {
            type_annotation: TypeAnnotationNodeComparator::new(),
            label: LabelComparator,
        }
    }

    /// Compare local variable annotation lists where order does not matter
    pub fn compare_sets(
        &self,
        first: &[LocalVariableAnnotationNode],
        second: &[LocalVariableAnnotationNode],
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        compare_unordered(first, second, |first, second| {
            self.compare_with_labels(first, second, labels)
        })
    }
}

impl StructuralComparator<LocalVariableAnnotationNode> for LocalVariableAnnotationNodeComparator {
    fn compare(
        &self,
        first: &LocalVariableAnnotationNode,
        second: &LocalVariableAnnotationNode,
    ) -> Ordering {
        self.compare_with_labels(first, second, &mut LabelIndexLookup::new())
    }
}

impl IndexAwareComparator<LocalVariableAnnotationNode> for LocalVariableAnnotationNodeComparator {
    fn compare_with_labels(
        &self,
        first: &LocalVariableAnnotationNode,
        second: &LocalVariableAnnotationNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        self.type_annotation
            .compare(&first.type_annotation, &second.type_annotation)
            .then_with(|| {
                compare_positional(&first.start, &second.start, |a, b| {
                    self.label.compare_with_labels(a, b, labels)
                })
            })
            .then_with(|| {
                compare_positional(&first.end, &second.end, |a, b| {
                    self.label.compare_with_labels(a, b, labels)
                })
            })
            .then_with(|| compare_positional(&first.index, &second.index, |a, b| a.cmp(b)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::Label;
    use crate::jvm::model::{TypePath, TypePathStep, TypeReference};

    fn deprecated(since: &str, for_removal: bool) -> AnnotationNode {
        AnnotationNode::new("Ljava/lang/Deprecated;")
            .with_value("since", AnnotationValue::String(String::from(since)))
            .with_value("forRemoval", AnnotationValue::Boolean(for_removal))
    }

    #[test]
    fn value_order_does_not_matter() {
        let cmp = AnnotationNodeComparator::new();
        let first = deprecated("9", true);
        let mut second = deprecated("9", true);
        second.values.reverse();
        assert_eq!(cmp.compare(&first, &second), Ordering::Equal);
        assert_eq!(
            cmp.compare(&first, &deprecated("10", true)),
            Ordering::Greater
        );
    }

    #[test]
    fn annotation_sets_ignore_order() {
        let cmp = AnnotationNodeComparator::new();
        let a = deprecated("1", false);
        let b = AnnotationNode::new("Ljava/lang/FunctionalInterface;");
        assert_eq!(
            cmp.compare_sets(&[a.clone(), b.clone()], &[b.clone(), a.clone()]),
            Ordering::Equal
        );
        assert_eq!(cmp.compare_sets(&[a.clone()], &[b, a]), Ordering::Less);
    }

    #[test]
    fn nested_values() {
        let cmp = AnnotationNodeComparator::new();
        let array = |values: Vec<i32>| {
            AnnotationValue::Array(values.into_iter().map(AnnotationValue::Int).collect())
        };
        assert_eq!(
            cmp.compare_values(&array(vec![1, 2]), &array(vec![1, 2])),
            Ordering::Equal
        );
        assert_eq!(
            cmp.compare_values(&array(vec![2, 1]), &array(vec![1, 2])),
            Ordering::Greater
        );
        assert_eq!(
            AnnotationDefaultComparator::new()
                .compare(&AnnotationValue::Int(5), &AnnotationValue::Long(1)),
            Ordering::Less
        );
    }

    #[test]
    fn local_variable_annotations_resolve_labels() {
        let annotation = |start, end| LocalVariableAnnotationNode {
            type_annotation: TypeAnnotationNode {
                type_ref: TypeReference::of_sort(TypeReference::LOCAL_VARIABLE),
                type_path: Some(TypePath(vec![TypePathStep::ArrayElement])),
                annotation: AnnotationNode::new("LNonNull;"),
            },
            start: vec![start],
            end: vec![end],
            index: vec![3],
        };
        let (s1, e1, s2, e2) = (Label::new(), Label::new(), Label::new(), Label::new());
        let first = annotation(s1, e1);
        let second = annotation(s2, e2);
        let cmp = LocalVariableAnnotationNodeComparator::new();

        assert_ne!(cmp.compare(&first, &second), Ordering::Equal);
        let mut labels =
            LabelIndexLookup::from_entries(vec![(s1, 0), (e1, 1), (s2, 0), (e2, 1)]);
        assert_eq!(
            cmp.compare_with_labels(&first, &second, &mut labels),
            Ordering::Equal
        );
    }

    #[test]
    fn uneven_range_lists_are_compared_in_full() {
        let (a, b, c) = (Label::new(), Label::new(), Label::new());
        let annotation = |start: Vec<Label>, index: Vec<u16>| LocalVariableAnnotationNode {
            type_annotation: TypeAnnotationNode {
                type_ref: TypeReference::of_sort(TypeReference::LOCAL_VARIABLE),
                type_path: None,
                annotation: AnnotationNode::new("LA;"),
            },
            start,
            end: vec![c],
            index,
        };
        let one = annotation(vec![a], vec![1]);
        let two = annotation(vec![a, b], vec![1, 2]);
        let cmp = LocalVariableAnnotationNodeComparator::new();

        let mut labels = LabelIndexLookup::from_entries(vec![(a, 0), (b, 1), (c, 2)]);
        assert_eq!(cmp.compare_with_labels(&one, &two, &mut labels), Ordering::Less);
        assert_eq!(cmp.compare_with_labels(&two, &one, &mut labels), Ordering::Greater);
        assert_eq!(cmp.compare_with_labels(&two, &two, &mut labels), Ordering::Equal);
    }
}
