use super::{
    compare_unordered, compare_constants, AccessComparator, AnnotationNodeComparator,
    AttributeComparator, IgnoreLineNumbersCapable, IndexAwareComparator, MethodNodeComparator,
    StructuralComparator, TypeAnnotationNodeComparator, TypeComparator,
};
use crate::jvm::model::{ClassNode, FieldNode, InnerClassNode};
use crate::labels::LabelIndexLookup;
use std::cmp::Ordering;

/// Compares fields by name, type, access, signature, initial value, then annotations and
/// attributes
#[derive(Clone, Debug, Default)]
pub struct FieldNodeComparator {
    types: TypeComparator,
    access: AccessComparator,
    annotation: AnnotationNodeComparator,
    type_annotation: TypeAnnotationNodeComparator,
    attribute: AttributeComparator,
}

impl FieldNodeComparator {
    pub fn new() -> FieldNodeComparator {
        FieldNodeComparator {
            types: TypeComparator::new(),
            access: AccessComparator,
            annotation: AnnotationNodeComparator::new(),
            type_annotation: TypeAnnotationNodeComparator::new(),
            attribute: AttributeComparator,
        }
    }
}

impl StructuralComparator<FieldNode> for FieldNodeComparator {
    fn compare(&self, first: &FieldNode, second: &FieldNode) -> Ordering {
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
                super::compare_nulls_first(
                    first.value.as_ref(),
                    second.value.as_ref(),
                    compare_constants,
                )
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
    }
}

/// Compares `InnerClasses` entries by name, outer name, simple name, then access
#[derive(Clone, Debug, Default)]
pub struct InnerClassNodeComparator {
    types: TypeComparator,
    access: AccessComparator,
}

impl InnerClassNodeComparator {
    pub fn new() -> InnerClassNodeComparator {
        InnerClassNodeComparator {
            types: TypeComparator::new(),
            access: AccessComparator,
        }
    }
}

impl StructuralComparator<InnerClassNode> for InnerClassNodeComparator {
    fn compare(&self, first: &InnerClassNode, second: &InnerClassNode) -> Ordering {
        self.types
            .compare_internal_names(&first.name, &second.name)
            .then_with(|| {
                self.types.compare_optional_internal_names(
                    first.outer_name.as_ref(),
                    second.outer_name.as_ref(),
                )
            })
            .then_with(|| first.inner_name.cmp(&second.inner_name))
            .then_with(|| self.access.compare_flags(first.access, second.access))
    }
}

/// Compares classes field by field, members included
///
/// Fields and methods are compared as sets. Every method indexes its own labels (see
/// [`MethodNodeComparator`]), so one lookup is shared across all methods of the class.
#[derive(Clone, Debug, Default)]
pub struct ClassNodeComparator {
    types: TypeComparator,
    access: AccessComparator,
    annotation: AnnotationNodeComparator,
    type_annotation: TypeAnnotationNodeComparator,
    attribute: AttributeComparator,
    inner_class: InnerClassNodeComparator,
    field: FieldNodeComparator,
    method: MethodNodeComparator,
}

impl ClassNodeComparator {
    pub fn new() -> ClassNodeComparator {
        ClassNodeComparator {
            types: TypeComparator::new(),
            access: AccessComparator,
            annotation: AnnotationNodeComparator::new(),
            type_annotation: TypeAnnotationNodeComparator::new(),
            attribute: AttributeComparator,
            inner_class: InnerClassNodeComparator::new(),
            field: FieldNodeComparator::new(),
            method: MethodNodeComparator::new(),
        }
    }
}

impl IgnoreLineNumbersCapable for ClassNodeComparator {
    fn ignore_line_numbers(mut self) -> Self {
        self.method = self.method.ignore_line_numbers();
        self
    }
}

impl StructuralComparator<ClassNode> for ClassNodeComparator {
    fn compare(&self, first: &ClassNode, second: &ClassNode) -> Ordering {
        self.compare_with_labels(first, second, &mut LabelIndexLookup::new())
    }
}

impl IndexAwareComparator<ClassNode> for ClassNodeComparator {
    fn compare_with_labels(
        &self,
        first: &ClassNode,
        second: &ClassNode,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        let types = &self.types;
        first
            .version
            .cmp(&second.version)
            .then_with(|| self.access.compare_flags(first.access, second.access))
            .then_with(|| types.compare_internal_names(&first.name, &second.name))
            .then_with(|| first.signature.cmp(&second.signature))
            .then_with(|| {
                types.compare_optional_internal_names(
                    first.super_name.as_ref(),
                    second.super_name.as_ref(),
                )
            })
            .then_with(|| types.compare_internal_name_sets(&first.interfaces, &second.interfaces))
            .then_with(|| first.source_file.cmp(&second.source_file))
            .then_with(|| first.source_debug.cmp(&second.source_debug))
            .then_with(|| {
                types.compare_optional_internal_names(
                    first.outer_class.as_ref(),
                    second.outer_class.as_ref(),
                )
            })
            .then_with(|| first.outer_method.cmp(&second.outer_method))
            .then_with(|| {
                super::compare_nulls_first(
                    first.outer_method_descriptor.as_deref(),
                    second.outer_method_descriptor.as_deref(),
                    |a, b| types.compare_descriptors(a, b),
                )
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
                compare_unordered(&first.inner_classes, &second.inner_classes, |a, b| {
                    self.inner_class.compare(a, b)
                })
            })
            .then_with(|| {
                types.compare_optional_internal_names(
                    first.nest_host_class.as_ref(),
                    second.nest_host_class.as_ref(),
                )
            })
            .then_with(|| {
                types.compare_internal_name_sets(&first.nest_members, &second.nest_members)
            })
            .then_with(|| {
                types.compare_internal_name_sets(
                    &first.permitted_subclasses,
                    &second.permitted_subclasses,
                )
            })
            .then_with(|| {
                compare_unordered(&first.fields, &second.fields, |a, b| self.field.compare(a, b))
            })
            .then_with(|| {
                compare_unordered(&first.methods, &second.methods, |a, b| {
                    self.method.compare_with_labels(a, b, labels)
                })
            })
    }
}
