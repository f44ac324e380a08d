use super::Renderer;
use crate::jvm::model::{Attribute, TypePath, TypeReference};
use crate::jvm::{
    AccessNode, BinaryName, FieldType, Name, ParseDescriptor, RefType, RenderJavaType,
    TypeDescriptor,
};
use crate::{Error, TypeNameMode};
use log::debug;

/// Renders descriptors and internal names
///
/// In the default [`TypeNameMode::ClassName`] mode, types are written the way Java source writes
/// them (`int[]`, `java.lang.String`). Method descriptors have no such form and stay as they are.
/// Descriptors which fail to parse are rendered unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeRenderer {
    mode: TypeNameMode,
}

impl TypeRenderer {
    pub fn new(mode: TypeNameMode) -> TypeRenderer {
        TypeRenderer { mode }
    }

    pub fn mode(&self) -> TypeNameMode {
        self.mode
    }

    /// Render a field or method descriptor
    pub fn render_descriptor(&self, descriptor: &str) -> String {
        let rendered = match self.mode {
            TypeNameMode::Descriptor => return String::from(descriptor),
            TypeNameMode::ClassName => java_name(descriptor),
            TypeNameMode::InternalName => internal_name(descriptor),
        };
        rendered.unwrap_or_else(|err| {
            debug!("Rendering type {:?} as is: {}", descriptor, err);
            String::from(descriptor)
        })
    }

    /// Render an internal class name
    ///
    /// Array classes use their descriptor as internal name (eg. `[I`) and are rendered as
    /// descriptors.
    pub fn render_internal_name(&self, name: &str) -> String {
        if name.starts_with('[') {
            return self.render_descriptor(name);
        }
        match self.mode {
            TypeNameMode::InternalName => String::from(name),
            TypeNameMode::Descriptor => format!("L{};", name),
            TypeNameMode::ClassName => match BinaryName::from_string(String::from(name)) {
                Ok(name) => name.class_name(),
                Err(err) => {
                    debug!("{}", Error::MalformedName(err));
                    name.replace('/', ".")
                }
            },
        }
    }
}

impl Default for TypeRenderer {
    fn default() -> TypeRenderer {
        TypeRenderer::new(TypeNameMode::ClassName)
    }
}

fn parse_descriptor(descriptor: &str) -> Result<TypeDescriptor, Error> {
    TypeDescriptor::parse(descriptor).map_err(|err| Error::MalformedDescriptor(err.to_string()))
}

fn java_name(descriptor: &str) -> Result<String, Error> {
    Ok(parse_descriptor(descriptor)?.java_name())
}

fn internal_name(descriptor: &str) -> Result<String, Error> {
    match parse_descriptor(descriptor)? {
        TypeDescriptor::Field(FieldType::Ref(RefType::Object(class))) => {
            Ok(String::from(class.as_str()))
        }
        _ => Ok(String::from(descriptor)),
    }
}

/// Guesses whether the text is a descriptor or an internal name
///
/// Internal names of classes in the default package can look like primitive descriptors (a class
/// named `I`), so prefer [`TypeRenderer::render_descriptor`] or
/// [`TypeRenderer::render_internal_name`] when the kind of text is known.
impl Renderer<str> for TypeRenderer {
    fn render(&self, node: &str) -> String {
        let is_descriptor = node.starts_with('(')
            || node.starts_with('[')
            || (node.starts_with('L') && node.ends_with(';'))
            || (node.len() == 1 && "BCDFIJSZV".contains(node));
        if node == "V" {
            String::from("void")
        } else if is_descriptor {
            self.render_descriptor(node)
        } else {
            self.render_internal_name(node)
        }
    }
}

/// Renders access flags as their value followed by the matching keywords: `(9) public static`
#[derive(Copy, Clone, Debug, Default)]
pub struct AccessRenderer;

impl AccessRenderer {
    /// Render flags of any kind
    pub fn render_flags(&self, flags: impl Into<AccessNode>) -> String {
        self.render(&flags.into())
    }
}

impl Renderer<AccessNode> for AccessRenderer {
    fn render(&self, node: &AccessNode) -> String {
        let mut rendered = format!("({})", node.access);
        for keyword in node.keywords() {
            rendered.push(' ');
            rendered.push_str(keyword);
        }
        rendered
    }
}

/// Renders type references by sort, along with the index for sorts which have one
#[derive(Copy, Clone, Debug, Default)]
pub struct TypeReferenceRenderer;

impl Renderer<TypeReference> for TypeReferenceRenderer {
    fn render(&self, node: &TypeReference) -> String {
        match node.sort() {
            TypeReference::CLASS_TYPE_PARAMETER => {
                format!("class_type_parameter={}", node.type_parameter_index())
            }
            TypeReference::METHOD_TYPE_PARAMETER => {
                format!("method_type_parameter={}", node.type_parameter_index())
            }
            TypeReference::CLASS_EXTENDS => format!("class_extends={}", node.super_type_index()),
            TypeReference::CLASS_TYPE_PARAMETER_BOUND => format!(
                "class_type_parameter_bound={},{}",
                node.type_parameter_index(),
                node.type_parameter_bound_index()
            ),
            TypeReference::METHOD_TYPE_PARAMETER_BOUND => format!(
                "method_type_parameter_bound={},{}",
                node.type_parameter_index(),
                node.type_parameter_bound_index()
            ),
            TypeReference::FIELD => String::from("field"),
            TypeReference::METHOD_RETURN => String::from("method_return"),
            TypeReference::METHOD_RECEIVER => String::from("method_receiver"),
            TypeReference::METHOD_FORMAL_PARAMETER => {
                format!("method_formal_parameter={}", node.formal_parameter_index())
            }
            TypeReference::THROWS => format!("throws={}", node.exception_index()),
            TypeReference::LOCAL_VARIABLE => String::from("local_variable"),
            TypeReference::RESOURCE_VARIABLE => String::from("resource_variable"),
            TypeReference::EXCEPTION_PARAMETER => {
                format!("exception_parameter={}", node.try_catch_block_index())
            }
            TypeReference::INSTANCEOF => String::from("instanceof"),
            TypeReference::NEW => String::from("new"),
            TypeReference::CONSTRUCTOR_REFERENCE => String::from("constructor_reference"),
            TypeReference::METHOD_REFERENCE => String::from("method_reference"),
            TypeReference::CAST => format!("cast={}", node.type_argument_index()),
            TypeReference::CONSTRUCTOR_INVOCATION_TYPE_ARGUMENT => format!(
                "constructor_invocation_type_argument={}",
                node.type_argument_index()
            ),
            TypeReference::METHOD_INVOCATION_TYPE_ARGUMENT => format!(
                "method_invocation_type_argument={}",
                node.type_argument_index()
            ),
            TypeReference::CONSTRUCTOR_REFERENCE_TYPE_ARGUMENT => format!(
                "constructor_reference_type_argument={}",
                node.type_argument_index()
            ),
            TypeReference::METHOD_REFERENCE_TYPE_ARGUMENT => format!(
                "method_reference_type_argument={}",
                node.type_argument_index()
            ),
            sort => format!("unknown_sort=0x{:02x}", sort),
        }
    }
}

/// Renders type paths in their canonical form (eg. `[[*`)
#[derive(Copy, Clone, Debug, Default)]
pub struct TypePathRenderer;

impl Renderer<TypePath> for TypePathRenderer {
    fn render(&self, node: &TypePath) -> String {
        node.to_string()
    }
}

/// Renders attributes as their name followed by their content in hex
#[derive(Copy, Clone, Debug, Default)]
pub struct AttributeRenderer;

impl Renderer<Attribute> for AttributeRenderer {
    fn render(&self, node: &Attribute) -> String {
        let mut rendered = format!("{}: ", node.name);
        for byte in &node.content {
            rendered.push_str(&format!("{:02x}", byte));
        }
        rendered
    }

    fn render_simplified(&self, node: &Attribute) -> String {
        node.name.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::model::TypePathStep;
    use crate::jvm::{FieldAccessFlags, MethodAccessFlags, ParameterAccessFlags};

    #[test]
    fn malformed_descriptors() {
        assert!(matches!(java_name("Ljava/lang/String"), Err(Error::MalformedDescriptor(_))));
        assert!(matches!(internal_name("Q"), Err(Error::MalformedDescriptor(_))));
        assert_eq!(
            TypeRenderer::new(TypeNameMode::ClassName).render_descriptor("Q"),
            "Q"
        );
    }

    #[test]
    fn class_names() {
        let renderer = TypeRenderer::default();
        assert_eq!(renderer.render_descriptor("I"), "int");
        assert_eq!(renderer.render_descriptor("[[I"), "int[][]");
        assert_eq!(
            renderer.render_descriptor("Ljava/lang/String;"),
            "java.lang.String"
        );
        assert_eq!(renderer.render_descriptor("(I)V"), "(I)V");
        assert_eq!(renderer.render_descriptor("Lbroken"), "Lbroken");
        assert_eq!(renderer.render_internal_name("java/util/Map$Entry"), "java.util.Map$Entry");
        assert_eq!(renderer.render_internal_name("[Ljava/lang/Object;"), "java.lang.Object[]");
        assert_eq!(renderer.render("java/lang/Object"), "java.lang.Object");
        assert_eq!(renderer.render("J"), "long");
        assert_eq!(renderer.render("V"), "void");
    }

    #[test]
    fn other_modes() {
        let internal = TypeRenderer::new(TypeNameMode::InternalName);
        assert_eq!(
            internal.render_descriptor("Ljava/lang/String;"),
            "java/lang/String"
        );
        assert_eq!(internal.render_descriptor("[I"), "[I");
        assert_eq!(internal.render_internal_name("java/lang/String"), "java/lang/String");

        let descriptor = TypeRenderer::new(TypeNameMode::Descriptor);
        assert_eq!(descriptor.render_descriptor("I"), "I");
        assert_eq!(
            descriptor.render_internal_name("java/lang/String"),
            "Ljava/lang/String;"
        );
    }

    #[test]
    fn access() {
        let renderer = AccessRenderer;
        assert_eq!(
            renderer.render_flags(MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC),
            "(9) public static"
        );
        assert_eq!(renderer.render_flags(FieldAccessFlags::empty()), "(0)");
        assert_eq!(
            renderer.render_flags(ParameterAccessFlags::FINAL),
            "(16) final"
        );
    }

    #[test]
    fn type_references_and_paths() {
        let renderer = TypeReferenceRenderer;
        assert_eq!(
            renderer.render(&TypeReference::of_sort(TypeReference::LOCAL_VARIABLE)),
            "local_variable"
        );
        assert_eq!(
            renderer.render(&TypeReference(0x1601_0000)),
            "method_formal_parameter=1"
        );
        assert_eq!(renderer.render(&TypeReference(0x10FF_FF00)), "class_extends=-1");
        assert_eq!(
            TypePathRenderer.render(&TypePath(vec![
                TypePathStep::ArrayElement,
                TypePathStep::TypeArgument(0),
                TypePathStep::WildcardBound
            ])),
            "[0;*"
        );
    }

    #[test]
    fn attributes() {
        let attribute = Attribute::new("Custom", vec![0xca, 0xfe, 0x01]);
        assert_eq!(AttributeRenderer.render(&attribute), "Custom: cafe01");
        assert_eq!(AttributeRenderer.render_simplified(&attribute), "Custom");
    }
}
