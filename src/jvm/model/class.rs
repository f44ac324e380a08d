use super::{AnnotationNode, Attribute, FieldNode, MethodNode, TypeAnnotationNode};
use crate::jvm::{ClassAccessFlags, InnerClassAccessFlags};

/// Class, interface, enum, record, annotation interface, or module
#[derive(Clone, PartialEq, Debug)]
pub struct ClassNode {
    /// Class file version: minor version in the upper 16 bits, major version in the lower 16
    pub version: u32,

    pub access: ClassAccessFlags,

    /// Internal name (eg. `java/lang/String`)
    pub name: String,

    pub signature: Option<String>,

    /// Internal name of the superclass, absent only for `java/lang/Object` and modules
    pub super_name: Option<String>,

    pub interfaces: Vec<String>,
    pub source_file: Option<String>,

    /// Contents of the `SourceDebugExtension` attribute
    pub source_debug: Option<String>,

    /// Enclosing class of a local or anonymous class
    pub outer_class: Option<String>,

    /// Enclosing method of a local or anonymous class
    pub outer_method: Option<String>,
    pub outer_method_descriptor: Option<String>,

    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<TypeAnnotationNode>,
    pub invisible_type_annotations: Vec<TypeAnnotationNode>,
    pub attributes: Vec<Attribute>,
    pub inner_classes: Vec<InnerClassNode>,
    pub nest_host_class: Option<String>,
    pub nest_members: Vec<String>,
    pub permitted_subclasses: Vec<String>,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
}

impl ClassNode {
    pub fn new(version: u32, access: ClassAccessFlags, name: impl Into<String>) -> ClassNode {
        ClassNode {
            version,
            access,
            name: name.into(),
            signature: None,
            super_name: Some(String::from("java/lang/Object")),
            interfaces: vec![],
            source_file: None,
            source_debug: None,
            outer_class: None,
            outer_method: None,
            outer_method_descriptor: None,
            visible_annotations: vec![],
            invisible_annotations: vec![],
            visible_type_annotations: vec![],
            invisible_type_annotations: vec![],
            attributes: vec![],
            inner_classes: vec![],
            nest_host_class: None,
            nest_members: vec![],
            permitted_subclasses: vec![],
            fields: vec![],
            methods: vec![],
        }
    }
}

/// Entry of the `InnerClasses` attribute
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct InnerClassNode {
    /// Internal name of the inner class (eg. `java/util/Map$Entry`)
    pub name: String,

    /// Internal name of the enclosing class, absent for local and anonymous classes
    pub outer_name: Option<String>,

    /// Simple name, absent for anonymous classes
    pub inner_name: Option<String>,

    pub access: InnerClassAccessFlags,
}
