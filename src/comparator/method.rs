use super::{
    compare_positional, compare_unordered, AccessComparator, AnnotationDefaultComparator,
    AnnotationNodeComparator, AttributeComparator, IgnoreLineNumbersCapable, IndexAwareComparator,
    InstructionListComparator, LabelComparator, LocalVariableAnnotationNodeComparator,
    StructuralComparator, TypeAnnotationNodeComparator, TypeComparator,
};
use crate::jvm::model::{LocalVariableNode, MethodNode, ParameterNode, TryCatchBlockNode};
use crate::labels::{
    extract_method_label_indices, extract_method_pair_label_indices, LabelIndexLookup,
};
use log::trace;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Compares local variables by slot, name, type, signature, then range
#[derive(Clone, Debug, Default)]
pub struct LocalVariableNodeComparator {
    types: TypeComparator,
    label: LabelComparator,
}

impl LocalVariableNodeComparator {
    pub fn new() -> LocalVariableNodeComparator {
        LocalVariableNodeComparator {
            types: TypeComparator::new(),
            label: LabelComparator,
        }
    }
}

/// Without an enclosing method, range labels are compared by identity
impl StructuralComparator<LocalVariableNode> for LocalVariableNodeComparator {
    fn compare(&self, first: &LocalVariableNode, second: &LocalVariableNode) -> Ordering {
        self.compare_with_labels(first, second, &mut LabelIndexLookup::new())
    }
}

impl IndexAwareComparator<LocalVariableNode> for LocalVariableNodeComparator {
    fn compare_with_labels(
        &self,
        first: &LocalVariableNode,
        second: &LocalVariableNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        first
            .index
            .cmp(&second.index)
            .then_with(|| first.name.cmp(&second.name))
            .then_with(|| {
                self.types
                    .compare_descriptors(&first.descriptor, &second.descriptor)
            })
            .then_with(|| first.signature.cmp(&second.signature))
            .then_with(|| self.label.compare_with_labels(&first.start, &second.start, labels))
            .then_with(|| self.label.compare_with_labels(&first.end, &second.end, labels))
    }
}

/// Compares exception handlers by range, handler, caught type, then type annotations
#[derive(Clone, Debug, Default)]
pub struct TryCatchBlockNodeComparator {
    types: TypeComparator,
    label: LabelComparator,
    type_annotation: TypeAnnotationNodeComparator,
}

impl TryCatchBlockNodeComparator {
    pub fn new() -> TryCatchBlockNodeComparator {
        TryCatchBlockNodeComparator {
            types: TypeComparator::new(),
            label: LabelComparator,
            type_annotation: TypeAnnotationNodeComparator::new(),
        }
    }
}

/// Without an enclosing method, labels are compared by identity
impl StructuralComparator<TryCatchBlockNode> for TryCatchBlockNodeComparator {
    fn compare(&self, first: &TryCatchBlockNode, second: &TryCatchBlockNode) -> Ordering {
        self.compare_with_labels(first, second, &mut LabelIndexLookup::new())
    }
}

impl IndexAwareComparator<TryCatchBlockNode> for TryCatchBlockNodeComparator {
    fn compare_with_labels(
        &self,
        first: &TryCatchBlockNode,
        second: &TryCatchBlockNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        self.label
            .compare_with_labels(&first.start, &second.start, labels)
            .then_with(|| self.label.compare_with_labels(&first.end, &second.end, labels))
            .then_with(|| {
                self.label
                    .compare_with_labels(&first.handler, &second.handler, labels)
            })
            .then_with(|| {
                self.types.compare_optional_internal_names(
                    first.exception_type.as_ref(),
                    second.exception_type.as_ref(),
                )
            })
            .then_with(|| {
                self.type_annotation.compare_sets(
                    &first.visible_type_annotations,
                    &second.visible_type_annotations,
                )
            })
            .then_with(|| {
                self.type_annotation.compare_sets(
                    &first.invisible_type_annotations,
                    &second.invisible_type_annotations,
                )
            })
    }
}

/// Compares `MethodParameters` entries by access, then name
#[derive(Copy, Clone, Debug, Default)]
pub struct ParameterNodeComparator {
    access: AccessComparator,
}

impl StructuralComparator<ParameterNode> for ParameterNodeComparator {
    fn compare(&self, first: &ParameterNode, second: &ParameterNode) -> Ordering {
        self.access
            .compare_flags(first.access, second.access)
            .then_with(|| first.name.cmp(&second.name))
    }
}

/// Compares methods field by field, including their code
///
/// Before anything is compared, the labels of both methods are indexed: labels defined in the
/// instructions by position, then labels only referenced by local variables, try/catch blocks, and
/// local variable annotations. This way a try/catch block is compared by where it sits in the
/// code rather than by which label objects it holds.
#[derive(Clone, Debug, Default)]
pub struct MethodNodeComparator {
    ignore_line_numbers: bool,
    types: TypeComparator,
    access: AccessComparator,
    parameter: ParameterNodeComparator,
    annotation: AnnotationNodeComparator,
    type_annotation: TypeAnnotationNodeComparator,
    attribute: AttributeComparator,
    instructions: InstructionListComparator,
    try_catch_block: TryCatchBlockNodeComparator,
    local_variable: LocalVariableNodeComparator,
    local_variable_annotation: LocalVariableAnnotationNodeComparator,
    annotation_default: AnnotationDefaultComparator,
}

impl MethodNodeComparator {
    pub fn new() -> MethodNodeComparator {
        MethodNodeComparator {
            ignore_line_numbers: false,
            types: TypeComparator::new(),
            access: AccessComparator,
            parameter: ParameterNodeComparator::default(),
            annotation: AnnotationNodeComparator::new(),
            type_annotation: TypeAnnotationNodeComparator::new(),
            attribute: AttributeComparator,
            instructions: InstructionListComparator::new(),
            try_catch_block: TryCatchBlockNodeComparator::new(),
            local_variable: LocalVariableNodeComparator::new(),
            local_variable_annotation: LocalVariableAnnotationNodeComparator::new(),
            annotation_default: AnnotationDefaultComparator::new(),
        }
    }

    /// Line numbers are stripped from the whole method, so that labels still used by local
    /// variables or try/catch blocks survive. The instruction list comparator then runs as is.
    fn prepare<'a>(&self, method: &'a MethodNode) -> Cow<'a, MethodNode> {
        if self.ignore_line_numbers {
            Cow::Owned(method.without_line_numbers())
        } else {
            Cow::Borrowed(method)
        }
    }

    fn compare_prepared(
        &self,
        first: &MethodNode,
        second: &MethodNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        trace!("Comparing methods {}{}", first.name, first.descriptor);
        first
            .name
            .cmp(&second.name)
            .then_with(|| {
                self.types
                    .compare_descriptors(&first.descriptor, &second.descriptor)
            })
            .then_with(|| self.access.compare_flags(first.access, second.access))
            .then_with(|| first.signature.cmp(&second.signature))
            .then_with(|| {
                self.types
                    .compare_internal_name_sets(&first.exceptions, &second.exceptions)
            })
            .then_with(|| {
                compare_positional(&first.parameters, &second.parameters, |a, b| {
                    self.parameter.compare(a, b)
                })
            })
            .then_with(|| {
                self.annotation
                    .compare_sets(&first.visible_annotations, &second.visible_annotations)
            })
            .then_with(|| {
                self.annotation
                    .compare_sets(&first.invisible_annotations, &second.invisible_annotations)
            })
            .then_with(|| {
                self.type_annotation.compare_sets(
                    &first.visible_type_annotations,
                    &second.visible_type_annotations,
                )
            })
            .then_with(|| {
                self.type_annotation.compare_sets(
                    &first.invisible_type_annotations,
                    &second.invisible_type_annotations,
                )
            })
            .then_with(|| {
                compare_unordered(&first.attributes, &second.attributes, |a, b| {
                    self.attribute.compare(a, b)
                })
            })
            .then_with(|| {
                first
                    .visible_annotable_parameter_count
                    .cmp(&second.visible_annotable_parameter_count)
            })
            .then_with(|| {
                self.annotation.compare_parameter_sets(
                    &first.visible_parameter_annotations,
                    &second.visible_parameter_annotations,
                )
            })
            .then_with(|| {
                first
                    .invisible_annotable_parameter_count
                    .cmp(&second.invisible_annotable_parameter_count)
            })
            .then_with(|| {
                self.annotation.compare_parameter_sets(
                    &first.invisible_parameter_annotations,
                    &second.invisible_parameter_annotations,
                )
            })
            .then_with(|| {
                self.instructions
                    .compare_with_labels(&first.instructions[..], &second.instructions[..], labels)
            })
            .then_with(|| {
                compare_unordered(&first.try_catch_blocks, &second.try_catch_blocks, |a, b| {
                    self.try_catch_block.compare_with_labels(a, b, labels)
                })
            })
            .then_with(|| first.max_locals.cmp(&second.max_locals))
            .then_with(|| first.max_stack.cmp(&second.max_stack))
            .then_with(|| {
                compare_unordered(&first.local_variables, &second.local_variables, |a, b| {
                    self.local_variable.compare_with_labels(a, b, labels)
                })
            })
            .then_with(|| {
                self.local_variable_annotation.compare_sets(
                    &first.visible_local_variable_annotations,
                    &second.visible_local_variable_annotations,
                    labels,
                )
            })
            .then_with(|| {
                self.local_variable_annotation.compare_sets(
                    &first.invisible_local_variable_annotations,
                    &second.invisible_local_variable_annotations,
                    labels,
                )
            })
            .then_with(|| {
                self.annotation_default.compare_optional(
                    first.annotation_default.as_ref(),
                    second.annotation_default.as_ref(),
                )
            })
    }
}

impl IgnoreLineNumbersCapable for MethodNodeComparator {
    fn ignore_line_numbers(mut self) -> Self {
        self.ignore_line_numbers = true;
        self
    }
}

impl StructuralComparator<MethodNode> for MethodNodeComparator {
    fn compare(&self, first: &MethodNode, second: &MethodNode) -> Ordering {
        let first = self.prepare(first);
        let second = self.prepare(second);
        let mut labels = extract_method_pair_label_indices(&first, &second);
        self.compare_prepared(&first, &second, &mut labels)
    }
}

impl IndexAwareComparator<MethodNode> for MethodNodeComparator {
    fn compare_with_labels(
        &self,
        first: &MethodNode,
        second: &MethodNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        let first = self.prepare(first);
        let second = self.prepare(second);
        labels.put_all(extract_method_label_indices(&first));
        labels.put_all(extract_method_label_indices(&second));
        self.compare_prepared(&first, &second, labels)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::{Instruction, Label, Opcode};
    use crate::jvm::{MethodAccessFlags, ParameterAccessFlags};

    /// `static int first(int x) { try { return x; } catch (RuntimeException e) { return 0; } }`
    fn method(variable_name: &str, with_line_numbers: bool) -> MethodNode {
        let (start, end, handler, exit) = (Label::new(), Label::new(), Label::new(), Label::new());
        let mut method = MethodNode::new(
            MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
            "first",
            "(I)I",
        );
        method.instructions.push(Instruction::Label(start));
        if with_line_numbers {
            method
                .instructions
                .push(Instruction::LineNumber { line: 3, start });
        }
        method.instructions.extend(vec![
            Instruction::Var {
                opcode: Opcode::ILOAD,
                var: 0,
            },
            Instruction::Label(end),
            Instruction::Insn {
                opcode: Opcode::IRETURN,
            },
            Instruction::Label(handler),
            Instruction::Var {
                opcode: Opcode::ASTORE,
                var: 1,
            },
            Instruction::Insn {
                opcode: Opcode::ICONST_0,
            },
            Instruction::Insn {
                opcode: Opcode::IRETURN,
            },
            Instruction::Label(exit),
        ]);
        method.try_catch_blocks.push(TryCatchBlockNode::new(
            start,
            end,
            handler,
            Some(String::from("java/lang/RuntimeException")),
        ));
        method.local_variables.push(LocalVariableNode {
            name: String::from(variable_name),
            descriptor: String::from("I"),
            signature: None,
            start,
            end: exit,
            index: 0,
        });
        method.max_locals = 2;
        method.max_stack = 1;
        method
    }

    #[test]
    fn copies_compare_equal() {
        let cmp = MethodNodeComparator::new();
        let first = method("x", false);
        let second = method("x", false);
        assert_eq!(cmp.compare(&first, &second), Ordering::Equal);
        assert_eq!(
            cmp.compare_with_labels(&first, &second, &mut LabelIndexLookup::new()),
            Ordering::Equal
        );
    }

    #[test]
    fn local_variable_names_matter() {
        let cmp = MethodNodeComparator::new();
        let ordering = cmp.compare(&method("x", false), &method("y", false));
        assert_eq!(ordering, Ordering::Less);
        assert_eq!(
            cmp.compare(&method("y", false), &method("x", false)),
            ordering.reverse()
        );
    }

    #[test]
    fn try_catch_blocks_need_their_method() {
        let first = method("x", false);
        let second = method("x", false);
        let cmp = TryCatchBlockNodeComparator::new();
        let (a, b) = (&first.try_catch_blocks[0], &second.try_catch_blocks[0]);

        assert_ne!(
            cmp.compare_with_labels(a, b, &mut LabelIndexLookup::new()),
            Ordering::Equal
        );
        let mut labels = extract_method_pair_label_indices(&first, &second);
        assert_eq!(cmp.compare_with_labels(a, b, &mut labels), Ordering::Equal);
    }

    #[test]
    fn line_numbers() {
        let with = method("x", true);
        let without = method("x", false);
        assert_ne!(
            MethodNodeComparator::new().compare(&with, &without),
            Ordering::Equal
        );

        let cmp = MethodNodeComparator::new().ignore_line_numbers();
        assert_eq!(cmp.compare(&with, &without), Ordering::Equal);
        assert_eq!(cmp.compare(&without, &with), Ordering::Equal);
    }

    #[test]
    fn parameters_in_order() {
        let cmp = MethodNodeComparator::new();
        let mut first = method("x", false);
        let mut second = method("x", false);
        first.parameters = vec![
            ParameterNode::new("a", ParameterAccessFlags::empty()),
            ParameterNode::new("b", ParameterAccessFlags::FINAL),
        ];
        second.parameters = vec![first.parameters[1].clone(), first.parameters[0].clone()];
        assert_ne!(cmp.compare(&first, &second), Ordering::Equal);

        second.parameters.reverse();
        assert_eq!(cmp.compare(&first, &second), Ordering::Equal);
    }

    #[test]
    fn absent_annotation_default_first() {
        let cmp = MethodNodeComparator::new();
        let first = method("x", false);
        let mut second = method("x", false);
        second.annotation_default = Some(crate::jvm::model::AnnotationValue::Int(1));
        assert_eq!(cmp.compare(&first, &second), Ordering::Less);
    }
}
