use super::{
    constant_text, indent, AccessRenderer, AnnotationNodeRenderer, AttributeRenderer,
    IndexAwareRenderer, InstructionListRenderer, MethodNodeRenderer, Renderer,
    TypeAnnotationNodeRenderer, TypeRenderer,
};
use crate::jvm::model::{
    AnnotationNode, Attribute, ClassNode, FieldNode, InnerClassNode, TypeAnnotationNode,
};
use crate::labels::LabelIndexLookup;

/// Lines shared by everything that carries attributes and annotations
#[derive(Copy, Clone, Debug, Default)]
struct Header {
    attribute: AttributeRenderer,
    annotation: AnnotationNodeRenderer,
    type_annotation: TypeAnnotationNodeRenderer,
}

impl Header {
    fn new(annotation: AnnotationNodeRenderer) -> Header {
        Header {
            attribute: AttributeRenderer,
            annotation,
            type_annotation: TypeAnnotationNodeRenderer::new(annotation),
        }
    }

    fn lines(
        &self,
        attributes: &[Attribute],
        annotations: (&[AnnotationNode], &[AnnotationNode]),
        type_annotations: (&[TypeAnnotationNode], &[TypeAnnotationNode]),
    ) -> Vec<String> {
        let mut lines: Vec<String> = attributes
            .iter()
            .map(|attribute| format!("// Attribute: {}", self.attribute.render(attribute)))
            .collect();
        lines.extend(annotations.0.iter().map(|a| self.annotation.render(a)));
        lines.extend(
            annotations
                .1
                .iter()
                .map(|a| format!("{} // invisible", self.annotation.render(a))),
        );
        lines.extend(type_annotations.0.iter().map(|a| self.type_annotation.render(a)));
        lines.extend(
            type_annotations
                .1
                .iter()
                .map(|a| format!("{} // invisible", self.type_annotation.render(a))),
        );
        lines
    }
}

/// Renders fields: `(26) private static final long serialVersionUID = 1L`
#[derive(Copy, Clone, Debug, Default)]
pub struct FieldNodeRenderer {
    types: TypeRenderer,
    access: AccessRenderer,
    header: Header,
}

impl FieldNodeRenderer {
    pub fn new(types: TypeRenderer, annotation: AnnotationNodeRenderer) -> FieldNodeRenderer {
        FieldNodeRenderer {
            types,
            access: AccessRenderer,
            header: Header::new(annotation),
        }
    }
}

impl Renderer<FieldNode> for FieldNodeRenderer {
    fn render(&self, node: &FieldNode) -> String {
        let mut lines = self.header.lines(
            &node.attributes,
            (&node.visible_annotations[..], &node.invisible_annotations[..]),
            (&node.visible_type_annotations[..], &node.invisible_type_annotations[..]),
        );
        let mut declaration = self.render_simplified(node);
        if let Some(value) = &node.value {
            declaration.push_str(" = ");
            declaration.push_str(&constant_text(value));
        }
        if let Some(signature) = &node.signature {
            declaration.push_str(&format!(" // signature: {}", signature));
        }
        lines.push(declaration);
        lines.join("\n")
    }

    fn render_simplified(&self, node: &FieldNode) -> String {
        format!(
            "{} {} {}",
            self.access.render_flags(node.access),
            self.types.render_descriptor(&node.descriptor),
            node.name
        )
    }
}

/// Renders `InnerClasses` entries: `(9) public static java.util.Map$Entry // outer name: ...`
#[derive(Copy, Clone, Debug, Default)]
pub struct InnerClassNodeRenderer {
    types: TypeRenderer,
    access: AccessRenderer,
}

impl InnerClassNodeRenderer {
    pub fn new(types: TypeRenderer) -> InnerClassNodeRenderer {
        InnerClassNodeRenderer {
            types,
            access: AccessRenderer,
        }
    }
}

impl Renderer<InnerClassNode> for InnerClassNodeRenderer {
    fn render(&self, node: &InnerClassNode) -> String {
        let mut rendered = format!(
            "{} {}",
            self.access.render_flags(node.access),
            self.types.render_internal_name(&node.name)
        );
        if let Some(outer_name) = &node.outer_name {
            rendered.push_str(&format!(
                " // outer name: {}",
                self.types.render_internal_name(outer_name)
            ));
        }
        if let Some(inner_name) = &node.inner_name {
            rendered.push_str(&format!(" // inner name: {}", inner_name));
        }
        rendered
    }

    fn render_simplified(&self, node: &InnerClassNode) -> String {
        self.types.render_internal_name(&node.name)
    }
}

/// Renders whole classes
///
/// ```text
/// // Class version: 52
/// (33) public super class com.example.Point extends java.lang.Object
///
///     (2) private int x
///
///     (1) public <init>()
///         ...
///
///   // Source file: Point.java
/// ```
///
/// The header (version, attributes, annotations) and the declaration come first, followed by a
/// blank line. Fields and methods are indented by four spaces, with a blank line after the fields
/// and after each method. Details without a place in the declaration close the rendering.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClassNodeRenderer {
    types: TypeRenderer,
    access: AccessRenderer,
    header: Header,
    field: FieldNodeRenderer,
    inner_class: InnerClassNodeRenderer,
    method: MethodNodeRenderer,
}

impl ClassNodeRenderer {
    pub fn new(
        types: TypeRenderer,
        annotation: AnnotationNodeRenderer,
        instructions: InstructionListRenderer,
    ) -> ClassNodeRenderer {
        ClassNodeRenderer {
            types,
            access: AccessRenderer,
            header: Header::new(annotation),
            field: FieldNodeRenderer::new(types, annotation),
            inner_class: InnerClassNodeRenderer::new(types),
            method: MethodNodeRenderer::new(types, annotation, instructions),
        }
    }

    fn version(node: &ClassNode) -> String {
        let (major, minor) = (node.version & 0xFFFF, node.version >> 16);
        if minor == 0 {
            major.to_string()
        } else {
            format!("{}.{}", major, minor)
        }
    }

    fn names(&self, names: &[String]) -> String {
        let names: Vec<String> = names
            .iter()
            .map(|name| self.types.render_internal_name(name))
            .collect();
        names.join(", ")
    }

    fn declaration(&self, node: &ClassNode) -> String {
        let mut declaration = format!(
            "{} {} {}",
            self.access.render_flags(node.access),
            node.access.declaration_keyword(),
            self.types.render_internal_name(&node.name)
        );
        if let Some(super_name) = &node.super_name {
            declaration.push_str(" extends ");
            declaration.push_str(&self.types.render_internal_name(super_name));
        }
        if !node.interfaces.is_empty() {
            declaration.push_str(" implements ");
            declaration.push_str(&self.names(&node.interfaces));
        }
        if let Some(signature) = &node.signature {
            declaration.push_str(&format!(" // signature: {}", signature));
        }
        declaration
    }

    fn meta(&self, node: &ClassNode) -> Vec<String> {
        let mut meta = vec![];
        if let Some(source_file) = &node.source_file {
            meta.push(format!("Source file: {}", source_file));
        }
        if let Some(source_debug) = &node.source_debug {
            meta.push(format!("Source debug: {}", source_debug));
        }
        if let Some(outer_class) = &node.outer_class {
            meta.push(format!(
                "Outer class: {}",
                self.types.render_internal_name(outer_class)
            ));
        }
        if let Some(outer_method) = &node.outer_method {
            let descriptor = node.outer_method_descriptor.as_deref().unwrap_or("");
            meta.push(format!("Outer method: {}{}", outer_method, descriptor));
        }
        for inner_class in &node.inner_classes {
            meta.push(format!("Inner class: {}", self.inner_class.render(inner_class)));
        }
        if let Some(nest_host_class) = &node.nest_host_class {
            meta.push(format!(
                "Nest host class: {}",
                self.types.render_internal_name(nest_host_class)
            ));
        }
        if !node.nest_members.is_empty() {
            meta.push(format!("Nest members: {}", self.names(&node.nest_members)));
        }
        if !node.permitted_subclasses.is_empty() {
            meta.push(format!(
                "Permitted subclasses: {}",
                self.names(&node.permitted_subclasses)
            ));
        }
        meta
    }
}

/// Each method's labels are indexed as the method is rendered
impl Renderer<ClassNode> for ClassNodeRenderer {
    fn render(&self, node: &ClassNode) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &ClassNode) -> String {
        format!(
            "{} {}",
            node.access.declaration_keyword(),
            self.types.render_internal_name(&node.name)
        )
    }
}

impl IndexAwareRenderer<ClassNode> for ClassNodeRenderer {
    fn render_with_labels(&self, node: &ClassNode, labels: &mut LabelIndexLookup) -> String {
        let mut lines = vec![format!("// Class version: {}", Self::version(node))];
        lines.extend(self.header.lines(
            &node.attributes,
            (&node.visible_annotations[..], &node.invisible_annotations[..]),
            (&node.visible_type_annotations[..], &node.invisible_type_annotations[..]),
        ));
        lines.push(self.declaration(node));
        lines.push(String::new());

        if !node.fields.is_empty() {
            for field in &node.fields {
                lines.push(indent(&self.field.render(field), "    "));
            }
            lines.push(String::new());
        }
        for method in &node.methods {
            lines.push(indent(
                &self.method.render_with_labels(method, labels),
                "    ",
            ));
            lines.push(String::new());
        }

        for entry in self.meta(node) {
            lines.push(indent(&entry, "  // "));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::{Constant, Instruction, Label, Opcode};
    use crate::jvm::model::MethodNode;
    use crate::jvm::{ClassAccessFlags, FieldAccessFlags, InnerClassAccessFlags, MethodAccessFlags};
    use crate::representation::InstructionRenderer;

    fn renderer() -> ClassNodeRenderer {
        ClassNodeRenderer::new(
            TypeRenderer::default(),
            AnnotationNodeRenderer::default(),
            InstructionListRenderer::new(InstructionRenderer::new().hide_opcodes()),
        )
    }

    #[test]
    fn fields() {
        let mut field = FieldNode::new(
            FieldAccessFlags::PRIVATE | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL,
            "serialVersionUID",
            "J",
        );
        field.value = Some(Constant::Long(1));
        field.invisible_annotations.push(AnnotationNode::new("Lcom/example/Generated;"));

        let renderer = FieldNodeRenderer::default();
        assert_eq!(
            renderer.render(&field),
            "@com.example.Generated // invisible\n\
             (26) private static final long serialVersionUID = 1L"
        );
        assert_eq!(
            renderer.render_simplified(&field),
            "(26) private static final long serialVersionUID"
        );
    }

    #[test]
    fn inner_classes() {
        let inner = InnerClassNode {
            name: String::from("java/util/Map$Entry"),
            outer_name: Some(String::from("java/util/Map")),
            inner_name: Some(String::from("Entry")),
            access: InnerClassAccessFlags::PUBLIC
                | InnerClassAccessFlags::STATIC
                | InnerClassAccessFlags::INTERFACE
                | InnerClassAccessFlags::ABSTRACT,
        };
        assert_eq!(
            InnerClassNodeRenderer::default().render(&inner),
            "(1545) public static interface abstract java.util.Map$Entry \
             // outer name: java.util.Map // inner name: Entry"
        );
        assert_eq!(
            InnerClassNodeRenderer::default().render_simplified(&inner),
            "java.util.Map$Entry"
        );
    }

    #[test]
    fn class_layout() {
        let mut class = ClassNode::new(52, ClassAccessFlags::PUBLIC, "com/example/Point");
        class.interfaces.push(String::from("java/io/Serializable"));
        class.source_file = Some(String::from("Point.java"));
        class.fields.push(FieldNode::new(FieldAccessFlags::PRIVATE, "x", "I"));

        let label = Label::new();
        let mut method = MethodNode::new(MethodAccessFlags::PUBLIC, "reset", "()V");
        method.instructions = vec![
            Instruction::Label(label),
            Instruction::Insn {
                opcode: Opcode::RETURN,
            },
        ];
        class.methods.push(method.clone());
        class.methods.push(method);

        let expected = "\
// Class version: 52
(1) public class com.example.Point extends java.lang.Object implements java.io.Serializable

    (2) private int x

    (1) public void reset()
        L0
          RETURN
      // Max locals: 0
      // Max stack: 0

    (1) public void reset()
        L0
          RETURN
      // Max locals: 0
      // Max stack: 0

  // Source file: Point.java";
        assert_eq!(renderer().render(&class), expected);
        assert_eq!(renderer().render_simplified(&class), "class com.example.Point");
    }
}
