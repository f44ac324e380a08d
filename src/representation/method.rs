use super::{
    indent, AccessRenderer, AnnotationNodeRenderer, AnnotationValueRenderer, AttributeRenderer,
    IndexAwareRenderer, InstructionListRenderer, LabelRenderer,
    LocalVariableAnnotationNodeRenderer, Renderer, TypeAnnotationNodeRenderer, TypeRenderer,
};
use crate::jvm::model::{
    AnnotationNode, LocalVariableNode, MethodNode, ParameterNode, TryCatchBlockNode,
};
use crate::jvm::{is_initializer, BinaryName, MethodDescriptor, ParseDescriptor, RenderDescriptor};
use crate::labels::{extract_method_label_indices, LabelIndexLookup};
use log::debug;

/// Renders local variables: `#1 int count // range: L0-L4`
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalVariableNodeRenderer {
    types: TypeRenderer,
    label: LabelRenderer,
}

impl LocalVariableNodeRenderer {
    pub fn new(types: TypeRenderer) -> LocalVariableNodeRenderer {
        LocalVariableNodeRenderer {
            types,
            label: LabelRenderer,
        }
    }
}

/// Without an enclosing method, range labels render by identity
impl Renderer<LocalVariableNode> for LocalVariableNodeRenderer {
    fn render(&self, node: &LocalVariableNode) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &LocalVariableNode) -> String {
        node.name.clone()
    }
}

impl IndexAwareRenderer<LocalVariableNode> for LocalVariableNodeRenderer {
    fn render_with_labels(
        &self,
        node: &LocalVariableNode,
        labels: &mut LabelIndexLookup,
    ) -> String {
        let mut rendered = format!(
            "#{} {} {} // range: {}-{}",
            node.index,
            self.types.render_descriptor(&node.descriptor),
            node.name,
            self.label.name(&node.start, labels),
            self.label.name(&node.end, labels)
        );
        if let Some(signature) = &node.signature {
            rendered.push_str(&format!(" // signature: {}", signature));
        }
        rendered
    }
}

/// Renders exception handlers: `java.io.IOException // range: L0-L1; handled in: L2`
///
/// Type annotations on the caught type come first, one per line.
#[derive(Copy, Clone, Debug, Default)]
pub struct TryCatchBlockNodeRenderer {
    types: TypeRenderer,
    label: LabelRenderer,
    type_annotation: TypeAnnotationNodeRenderer,
}

impl TryCatchBlockNodeRenderer {
    pub fn new(
        types: TypeRenderer,
        type_annotation: TypeAnnotationNodeRenderer,
    ) -> TryCatchBlockNodeRenderer {
        TryCatchBlockNodeRenderer {
            types,
            label: LabelRenderer,
            type_annotation,
        }
    }

    fn caught_type(&self, node: &TryCatchBlockNode) -> String {
        match &node.exception_type {
            Some(exception_type) => self.types.render_internal_name(exception_type),
            None => String::from("finally"),
        }
    }
}

/// Without an enclosing method, labels render by identity
impl Renderer<TryCatchBlockNode> for TryCatchBlockNodeRenderer {
    fn render(&self, node: &TryCatchBlockNode) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &TryCatchBlockNode) -> String {
        self.caught_type(node)
    }
}

impl IndexAwareRenderer<TryCatchBlockNode> for TryCatchBlockNodeRenderer {
    fn render_with_labels(
        &self,
        node: &TryCatchBlockNode,
        labels: &mut LabelIndexLookup,
    ) -> String {
        let mut lines: Vec<String> = vec![];
        for annotation in &node.visible_type_annotations {
            lines.push(self.type_annotation.render(annotation));
        }
        for annotation in &node.invisible_type_annotations {
            lines.push(format!("{} // invisible", self.type_annotation.render(annotation)));
        }
        lines.push(format!(
            "{} // range: {}-{}; handled in: {}",
            self.caught_type(node),
            self.label.name(&node.start, labels),
            self.label.name(&node.end, labels),
            self.label.name(&node.handler, labels)
        ));
        lines.join("\n")
    }
}

/// Renders `MethodParameters` entries: `(16) final name`, or just `name` without flags
#[derive(Copy, Clone, Debug, Default)]
pub struct ParameterNodeRenderer {
    access: AccessRenderer,
}

impl Renderer<ParameterNode> for ParameterNodeRenderer {
    fn render(&self, node: &ParameterNode) -> String {
        let name = node.name.as_deref().unwrap_or("null");
        if node.access.is_empty() {
            String::from(name)
        } else {
            format!("{} {}", self.access.render_flags(node.access), name)
        }
    }

    fn render_simplified(&self, node: &ParameterNode) -> String {
        String::from(node.name.as_deref().unwrap_or("null"))
    }
}

/// Renders whole methods
///
/// ```text
/// @java.lang.Deprecated
/// (9) public static int abs(int x)
///     L0
///       ILOAD 0 // opcode: 21
///       IRETURN // opcode: 172
///     L1
///   // Local variable: #0 int x // range: L0-L1
///   // Max locals: 1
///   // Max stack: 1
/// ```
///
/// Attributes, annotations, and type annotations come before the declaration. The code follows,
/// and then the details without a place in the declaration, always in the same order: annotation
/// default, parameters, local variables, local variable annotations, try/catch blocks, max locals,
/// and max stack. Invisible annotations are marked with `// invisible`.
#[derive(Copy, Clone, Debug, Default)]
pub struct MethodNodeRenderer {
    types: TypeRenderer,
    access: AccessRenderer,
    attribute: AttributeRenderer,
    annotation: AnnotationNodeRenderer,
    annotation_value: AnnotationValueRenderer,
    type_annotation: TypeAnnotationNodeRenderer,
    parameter: ParameterNodeRenderer,
    instructions: InstructionListRenderer,
    local_variable: LocalVariableNodeRenderer,
    local_variable_annotation: LocalVariableAnnotationNodeRenderer,
    try_catch_block: TryCatchBlockNodeRenderer,
}

impl MethodNodeRenderer {
    pub fn new(
        types: TypeRenderer,
        annotation: AnnotationNodeRenderer,
        instructions: InstructionListRenderer,
    ) -> MethodNodeRenderer {
        let type_annotation = TypeAnnotationNodeRenderer::new(annotation);
        MethodNodeRenderer {
            types,
            access: AccessRenderer,
            attribute: AttributeRenderer,
            annotation,
            annotation_value: AnnotationValueRenderer::new(annotation),
            type_annotation,
            parameter: ParameterNodeRenderer::default(),
            instructions,
            local_variable: LocalVariableNodeRenderer::new(types),
            local_variable_annotation: LocalVariableAnnotationNodeRenderer::new(type_annotation),
            try_catch_block: TryCatchBlockNodeRenderer::new(types, type_annotation),
        }
    }

    /// Name of every parameter declared in the descriptor
    ///
    /// Names come from the `MethodParameters` entries if there are any, then from the local
    /// variable stored in the parameter's slot, and finally default to `var<i>`.
    fn parameter_names(&self, node: &MethodNode, slots: &[usize]) -> Vec<String> {
        slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                node.parameters
                    .get(i)
                    .and_then(|parameter| parameter.name.clone())
                    .or_else(|| {
                        node.local_variables
                            .iter()
                            .find(|variable| variable.index as usize == *slot)
                            .map(|variable| variable.name.clone())
                    })
                    .unwrap_or_else(|| format!("var{}", i))
            })
            .collect()
    }

    /// Annotations of one parameter, invisible ones marked
    fn parameter_annotations(&self, node: &MethodNode, parameter: usize) -> Vec<String> {
        let visible = node.visible_parameter_annotations.get(parameter).into_iter().flatten();
        let invisible = node.invisible_parameter_annotations.get(parameter).into_iter().flatten();
        visible
            .map(|annotation: &AnnotationNode| self.annotation.render(annotation))
            .chain(invisible.map(|annotation: &AnnotationNode| {
                format!("{} // invisible", self.annotation.render(annotation))
            }))
            .collect()
    }

    /// A parameter in the declaration: `(16) final java.lang.String name`
    ///
    /// Parameters with a `MethodParameters` entry show their access here and their annotations in
    /// the `Parameter:` lines. Annotations of the others are written in front of the type.
    fn parameter_declaration(
        &self,
        node: &MethodNode,
        i: usize,
        parameter_type: String,
        name: String,
    ) -> String {
        let mut declaration = String::new();
        match node.parameters.get(i) {
            Some(parameter) => {
                if !parameter.access.is_empty() {
                    declaration.push_str(&self.access.render_flags(parameter.access));
                    declaration.push(' ');
                }
            }
            None => {
                let visible = node.visible_parameter_annotations.get(i).into_iter().flatten();
                let invisible = node.invisible_parameter_annotations.get(i).into_iter().flatten();
                for annotation in visible.chain(invisible) {
                    declaration.push_str(&self.annotation.render(annotation));
                    declaration.push(' ');
                }
            }
        }
        declaration.push_str(&parameter_type);
        declaration.push(' ');
        declaration.push_str(&name);
        declaration
    }

    fn declaration(&self, node: &MethodNode) -> String {
        let mut declaration = format!("{} ", self.access.render_flags(node.access));
        let descriptor = match MethodDescriptor::<BinaryName>::parse(&node.descriptor) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                debug!("Rendering method {}{} as is: {}", node.name, node.descriptor, err);
                declaration.push_str(&node.name);
                declaration.push_str(&node.descriptor);
                return declaration;
            }
        };

        if !is_initializer(&node.name) {
            match &descriptor.return_type {
                Some(return_type) => {
                    declaration.push_str(&self.types.render_descriptor(&return_type.render()))
                }
                None => declaration.push_str("void"),
            }
            declaration.push(' ');
        }

        let slots = descriptor.parameter_slots(!node.is_static());
        let names = self.parameter_names(node, &slots);
        let parameters: Vec<String> = descriptor
            .parameters
            .iter()
            .zip(names)
            .enumerate()
            .map(|(i, (parameter, name))| {
                let parameter_type = self.types.render_descriptor(&parameter.render());
                self.parameter_declaration(node, i, parameter_type, name)
            })
            .collect();
        declaration.push_str(&format!("{}({})", node.name, parameters.join(", ")));

        if !node.exceptions.is_empty() {
            declaration.push_str(" throws");
            for exception in &node.exceptions {
                declaration.push(' ');
                declaration.push_str(&self.types.render_internal_name(exception));
            }
        }
        if let Some(signature) = &node.signature {
            declaration.push_str(&format!(" // signature: {}", signature));
        }
        declaration
    }
}

/// The method's own labels are indexed before rendering
impl Renderer<MethodNode> for MethodNodeRenderer {
    fn render(&self, node: &MethodNode) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &MethodNode) -> String {
        format!("{}{}", node.name, node.descriptor)
    }
}

impl IndexAwareRenderer<MethodNode> for MethodNodeRenderer {
    fn render_with_labels(&self, node: &MethodNode, labels: &mut LabelIndexLookup) -> String {
        labels.put_all(extract_method_label_indices(node));

        let mut lines: Vec<String> = vec![];
        for attribute in &node.attributes {
            lines.push(format!("// Attribute: {}", self.attribute.render(attribute)));
        }
        for annotation in &node.visible_annotations {
            lines.push(self.annotation.render(annotation));
        }
        for annotation in &node.invisible_annotations {
            lines.push(format!("{} // invisible", self.annotation.render(annotation)));
        }
        for annotation in &node.visible_type_annotations {
            lines.push(self.type_annotation.render(annotation));
        }
        for annotation in &node.invisible_type_annotations {
            lines.push(format!("{} // invisible", self.type_annotation.render(annotation)));
        }
        lines.push(self.declaration(node));
        if !node.instructions.is_empty() {
            let code = self.instructions.render_with_labels(&node.instructions[..], labels);
            lines.push(indent(&code, "    "));
        }

        let mut meta: Vec<String> = vec![];
        if let Some(value) = &node.annotation_default {
            meta.push(format!("Annotation default: {}", self.annotation_value.render(value)));
        }
        for (i, parameter) in node.parameters.iter().enumerate() {
            let mut entry = self.parameter_annotations(node, i);
            entry.push(self.parameter.render(parameter));
            meta.push(format!("Parameter: {}", entry.join("\n")));
        }
        for variable in &node.local_variables {
            meta.push(format!(
                "Local variable: {}",
                self.local_variable.render_with_labels(variable, labels)
            ));
        }
        for annotation in &node.visible_local_variable_annotations {
            meta.push(format!(
                "Local variable annotation: {}",
                self.local_variable_annotation
                    .render_with_labels(annotation, labels)
            ));
        }
        for annotation in &node.invisible_local_variable_annotations {
            meta.push(format!(
                "Local variable annotation: {} // invisible",
                self.local_variable_annotation
                    .render_with_labels(annotation, labels)
            ));
        }
        for try_catch_block in &node.try_catch_blocks {
            meta.push(format!(
                "Try catch block: {}",
                self.try_catch_block
                    .render_with_labels(try_catch_block, labels)
            ));
        }
        meta.push(format!("Max locals: {}", node.max_locals));
        meta.push(format!("Max stack: {}", node.max_stack));

        for entry in meta {
            lines.push(indent(&entry, "  // "));
        }
        lines.join("\n")
    }
}
