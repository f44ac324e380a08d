use super::{
    AccessComparator, AnnotationDefaultComparator, AnnotationNodeComparator, AttributeComparator,
    ClassNodeComparator, FieldNodeComparator, IgnoreLineNumbersCapable, IndexAwareComparator,
    InnerClassNodeComparator, InstructionComparator, InstructionListComparator, LabelComparator,
    LocalVariableAnnotationNodeComparator, LocalVariableNodeComparator, MethodNodeComparator,
    ParameterNodeComparator, StructuralComparator, TryCatchBlockNodeComparator,
    TypeAnnotationNodeComparator, TypeComparator, TypePathComparator, TypeReferenceComparator,
};
use crate::labels::LabelIndexLookup;
use crate::{NodeRef, Settings};
use log::debug;
use std::cmp::Ordering;

/// One comparator for every kind of node
///
/// This is what an assertion library needs when the type of the compared values is only known at
/// runtime. Nodes of different kinds are ordered by [`crate::NodeKind`].
#[derive(Clone, Debug)]
pub struct DefaultComparators {
    class: ClassNodeComparator,
    field: FieldNodeComparator,
    method: MethodNodeComparator,
    instructions: InstructionListComparator,
    instruction: InstructionComparator,
    label: LabelComparator,
    local_variable: LocalVariableNodeComparator,
    local_variable_annotation: LocalVariableAnnotationNodeComparator,
    try_catch_block: TryCatchBlockNodeComparator,
    annotation: AnnotationNodeComparator,
    type_annotation: TypeAnnotationNodeComparator,
    annotation_value: AnnotationDefaultComparator,
    parameter: ParameterNodeComparator,
    inner_class: InnerClassNodeComparator,
    attribute: AttributeComparator,
    access: AccessComparator,
    type_reference: TypeReferenceComparator,
    type_path: TypePathComparator,
    types: TypeComparator,
}

impl DefaultComparators {
    pub fn new() -> DefaultComparators {
        DefaultComparators::with_settings(&Settings::new())
    }

    pub fn with_settings(settings: &Settings) -> DefaultComparators {
        let mut comparators = DefaultComparators {
            class: ClassNodeComparator::new(),
            field: FieldNodeComparator::new(),
            method: MethodNodeComparator::new(),
            instructions: InstructionListComparator::new(),
            instruction: InstructionComparator::new(),
            label: LabelComparator,
            local_variable: LocalVariableNodeComparator::new(),
            local_variable_annotation: LocalVariableAnnotationNodeComparator::new(),
            try_catch_block: TryCatchBlockNodeComparator::new(),
            annotation: AnnotationNodeComparator::new(),
            type_annotation: TypeAnnotationNodeComparator::new(),
            annotation_value: AnnotationDefaultComparator::new(),
            parameter: ParameterNodeComparator::default(),
            inner_class: InnerClassNodeComparator::new(),
            attribute: AttributeComparator,
            access: AccessComparator,
            type_reference: TypeReferenceComparator,
            type_path: TypePathComparator,
            types: TypeComparator::new(),
        };
        if settings.ignore_line_numbers {
            comparators.class = comparators.class.ignore_line_numbers();
            comparators.method = comparators.method.ignore_line_numbers();
            comparators.instructions = comparators.instructions.ignore_line_numbers();
        }
        comparators
    }

    /// Compare two possibly absent nodes of any kind
    pub fn compare_nodes(
        &self,
        first: Option<NodeRef<'_>>,
        second: Option<NodeRef<'_>>,
    ) -> Ordering {
        super::compare_nulls_first(first.as_ref(), second.as_ref(), |first, second| {
            self.dispatch(*first, *second, None)
        })
    }

    /// Compare two possibly absent nodes of any kind, resolving labels through `labels`
    pub fn compare_nodes_with_labels(
        &self,
        first: Option<NodeRef<'_>>,
        second: Option<NodeRef<'_>>,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        super::compare_nulls_first(first.as_ref(), second.as_ref(), |first, second| {
            self.dispatch(*first, *second, Some(labels))
        })
    }

    fn dispatch(
        &self,
        first: NodeRef<'_>,
        second: NodeRef<'_>,
        labels: Option<&mut LabelIndexLookup>,
    ) -> Ordering {
        macro_rules! index_aware {
            ($comparator:expr, $first:expr, $second:expr) => {
                match labels {
                    Some(labels) => $comparator.compare_with_labels($first, $second, labels),
                    None => $comparator.compare($first, $second),
                }
            };
        }

        match (first, second) {
            (NodeRef::Class(a), NodeRef::Class(b)) => index_aware!(self.class, a, b),
            (NodeRef::Field(a), NodeRef::Field(b)) => self.field.compare(a, b),
            (NodeRef::Method(a), NodeRef::Method(b)) => index_aware!(self.method, a, b),
            (NodeRef::Instructions(a), NodeRef::Instructions(b)) => {
                index_aware!(self.instructions, a, b)
            }
            (NodeRef::Instruction(a), NodeRef::Instruction(b)) => {
                index_aware!(self.instruction, a, b)
            }
            (NodeRef::Label(a), NodeRef::Label(b)) => index_aware!(self.label, a, b),
            (NodeRef::LocalVariable(a), NodeRef::LocalVariable(b)) => {
                index_aware!(self.local_variable, a, b)
            }
            (NodeRef::LocalVariableAnnotation(a), NodeRef::LocalVariableAnnotation(b)) => {
                index_aware!(self.local_variable_annotation, a, b)
            }
            (NodeRef::TryCatchBlock(a), NodeRef::TryCatchBlock(b)) => {
                index_aware!(self.try_catch_block, a, b)
            }
            (NodeRef::Annotation(a), NodeRef::Annotation(b)) => self.annotation.compare(a, b),
            (NodeRef::TypeAnnotation(a), NodeRef::TypeAnnotation(b)) => {
                self.type_annotation.compare(a, b)
            }
            (NodeRef::AnnotationValue(a), NodeRef::AnnotationValue(b)) => {
                self.annotation_value.compare(a, b)
            }
            (NodeRef::Parameter(a), NodeRef::Parameter(b)) => self.parameter.compare(a, b),
            (NodeRef::InnerClass(a), NodeRef::InnerClass(b)) => self.inner_class.compare(a, b),
            (NodeRef::Attribute(a), NodeRef::Attribute(b)) => self.attribute.compare(a, b),
            (NodeRef::Access(a), NodeRef::Access(b)) => self.access.compare(a, b),
            (NodeRef::TypeReference(a), NodeRef::TypeReference(b)) => {
                self.type_reference.compare(a, b)
            }
            (NodeRef::TypePath(a), NodeRef::TypePath(b)) => self.type_path.compare(a, b),
            (NodeRef::Type(a), NodeRef::Type(b)) => self.types.compare(a, b),
            (first, second) => {
                debug!(
                    "Comparing nodes of different kinds: {:?} and {:?}",
                    first.kind(),
                    second.kind()
                );
                first.kind().cmp(&second.kind())
            }
        }
    }
}

impl Default for DefaultComparators {
    fn default() -> DefaultComparators {
        DefaultComparators::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::{Instruction, Label, Opcode};
    use crate::jvm::model::AnnotationValue;

    #[test]
    fn nulls_and_kinds() {
        let cmp = DefaultComparators::new();
        let label = Label::new();
        let value = AnnotationValue::Int(1);
        assert_eq!(cmp.compare_nodes(None, None), Ordering::Equal);
        assert_eq!(
            cmp.compare_nodes(None, Some(NodeRef::from(&label))),
            Ordering::Less
        );
        assert_eq!(
            cmp.compare_nodes(Some(NodeRef::from(&label)), Some(NodeRef::from(&label))),
            Ordering::Equal
        );
        assert_eq!(
            cmp.compare_nodes(Some(NodeRef::from(&label)), Some(NodeRef::from(&value))),
            Ordering::Less
        );
    }

    #[test]
    fn dispatches_with_settings() {
        let start = Label::new();
        let with: Vec<Instruction> = vec![
            Instruction::Label(start),
            Instruction::LineNumber { line: 7, start },
            Instruction::Insn {
                opcode: Opcode::RETURN,
            },
        ];
        let without = vec![Instruction::Insn {
            opcode: Opcode::RETURN,
        }];
        let first = Some(NodeRef::from(&with[..]));
        let second = Some(NodeRef::from(&without[..]));

        assert_ne!(
            DefaultComparators::new().compare_nodes(first, second),
            Ordering::Equal
        );
        let settings = Settings {
            ignore_line_numbers: true,
            ..Settings::new()
        };
        let cmp = DefaultComparators::with_settings(&settings);
        assert_eq!(cmp.compare_nodes(first, second), Ordering::Equal);
        assert_eq!(
            cmp.compare_nodes_with_labels(first, second, &mut LabelIndexLookup::new()),
            Ordering::Equal
        );
    }
}
