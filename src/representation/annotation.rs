use super::{
    java_double, java_float, java_string_literal, IndexAwareRenderer, LabelRenderer, Renderer,
    TypePathRenderer, TypeReferenceRenderer, TypeRenderer,
};
use crate::jvm::code::Label;
use crate::jvm::model::{
    AnnotationNode, AnnotationValue, LocalVariableAnnotationNode, TypeAnnotationNode,
};
use crate::labels::LabelIndexLookup;

/// Renders annotations the way they are written in Java source
///
/// `@java.lang.Deprecated(since="9", forRemoval=true)`, or just `@java.lang.Deprecated` when
/// values are hidden or the rendering is simplified.
#[derive(Copy, Clone, Debug, Default)]
pub struct AnnotationNodeRenderer {
    types: TypeRenderer,
    hide_values: bool,
}

impl AnnotationNodeRenderer {
    pub fn new(types: TypeRenderer) -> AnnotationNodeRenderer {
        AnnotationNodeRenderer {
            types,
            hide_values: false,
        }
    }

    /// Only render the annotation type
    pub fn hide_values(mut self) -> Self {
        self.hide_values = true;
        self
    }

    /// Render an element value as a Java expression
    pub fn render_value(&self, value: &AnnotationValue) -> String {
        match value {
            AnnotationValue::Byte(value) => format!("(byte){}", value),
            AnnotationValue::Char(value) => format!("(char){}", value),
            AnnotationValue::Short(value) => format!("(short){}", value),
            AnnotationValue::Int(value) => value.to_string(),
            AnnotationValue::Long(value) => format!("{}L", value),
            AnnotationValue::Float(value) => format!("{}F", java_float(*value)),
            AnnotationValue::Double(value) => format!("{}D", java_double(*value)),
            AnnotationValue::Boolean(value) => value.to_string(),
            AnnotationValue::String(value) => java_string_literal(value),
            AnnotationValue::Class(descriptor) => {
                format!("{}.class", self.types.render_descriptor(descriptor))
            }
            AnnotationValue::Enum { descriptor, value } => {
                format!("{}.{}", self.types.render_descriptor(descriptor), value)
            }
            AnnotationValue::Annotation(annotation) => self.render_full(annotation),
            AnnotationValue::Array(values) => {
                let values: Vec<String> = values.iter().map(|v| self.render_value(v)).collect();
                format!("{{{}}}", values.join(", "))
            }
        }
    }

    fn render_type(&self, node: &AnnotationNode) -> String {
        format!("@{}", self.types.render_descriptor(&node.descriptor))
    }

    fn render_full(&self, node: &AnnotationNode) -> String {
        if node.values.is_empty() {
            return self.render_type(node);
        }
        let values: Vec<String> = node
            .values
            .iter()
            .map(|(name, value)| format!("{}={}", name, self.render_value(value)))
            .collect();
        format!("{}({})", self.render_type(node), values.join(", "))
    }
}

impl Renderer<AnnotationNode> for AnnotationNodeRenderer {
    fn render(&self, node: &AnnotationNode) -> String {
        if self.hide_values {
            self.render_type(node)
        } else {
            self.render_full(node)
        }
    }

    fn render_simplified(&self, node: &AnnotationNode) -> String {
        self.render_type(node)
    }
}

/// Renders annotation element values, eg. the default value of an annotation interface element
#[derive(Copy, Clone, Debug, Default)]
pub struct AnnotationValueRenderer {
    annotation: AnnotationNodeRenderer,
}

impl AnnotationValueRenderer {
    pub fn new(annotation: AnnotationNodeRenderer) -> AnnotationValueRenderer {
        AnnotationValueRenderer { annotation }
    }
}

impl Renderer<AnnotationValue> for AnnotationValueRenderer {
    fn render(&self, node: &AnnotationValue) -> String {
        self.annotation.render_value(node)
    }
}

/// Renders type annotations: `<annotation> // reference: <reference>; path: <path>`
#[derive(Copy, Clone, Debug, Default)]
pub struct TypeAnnotationNodeRenderer {
    annotation: AnnotationNodeRenderer,
    type_reference: TypeReferenceRenderer,
    type_path: TypePathRenderer,
}

impl TypeAnnotationNodeRenderer {
    pub fn new(annotation: AnnotationNodeRenderer) -> TypeAnnotationNodeRenderer {
        TypeAnnotationNodeRenderer {
            annotation,
            type_reference: TypeReferenceRenderer,
            type_path: TypePathRenderer,
        }
    }
}

impl Renderer<TypeAnnotationNode> for TypeAnnotationNodeRenderer {
    fn render(&self, node: &TypeAnnotationNode) -> String {
        let path = match &node.type_path {
            Some(path) => self.type_path.render(path),
            None => String::from("null"),
        };
        format!(
            "{} // reference: {}; path: {}",
            self.annotation.render(&node.annotation),
            self.type_reference.render(&node.type_ref),
            path
        )
    }

    fn render_simplified(&self, node: &TypeAnnotationNode) -> String {
        self.annotation.render_simplified(&node.annotation)
    }
}

/// Renders local variable annotations with their ranges: `... // range: #1 L0-L3`
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalVariableAnnotationNodeRenderer {
    type_annotation: TypeAnnotationNodeRenderer,
    label: LabelRenderer,
}

impl LocalVariableAnnotationNodeRenderer {
    pub fn new(type_annotation: TypeAnnotationNodeRenderer) -> LocalVariableAnnotationNodeRenderer {
        LocalVariableAnnotationNodeRenderer {
            type_annotation,
            label: LabelRenderer,
        }
    }
}

/// Without an enclosing method, labels render by identity
impl Renderer<LocalVariableAnnotationNode> for LocalVariableAnnotationNodeRenderer {
    fn render(&self, node: &LocalVariableAnnotationNode) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &LocalVariableAnnotationNode) -> String {
        self.type_annotation.render_simplified(&node.type_annotation)
    }
}

impl IndexAwareRenderer<LocalVariableAnnotationNode> for LocalVariableAnnotationNodeRenderer {
    fn render_with_labels(
        &self,
        node: &LocalVariableAnnotationNode,
        labels: &mut LabelIndexLookup,
    ) -> String {
        let ranges: Vec<String> = node
            .ranges()
            .map(|(start, end, index)| {
                let label = |label: Option<Label>| match label {
                    Some(label) => self.label.name(&label, labels),
                    None => String::from("null"),
                };
                format!(
                    "#{} {}-{}",
                    index.map_or_else(|| String::from("null"), |index| index.to_string()),
                    label(start),
                    label(end)
                )
            })
            .collect();
        format!(
            "{} // range: {}",
            self.type_annotation.render(&node.type_annotation),
            ranges.join(", ")
        )
    }
}
