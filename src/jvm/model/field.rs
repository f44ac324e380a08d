use super::{AnnotationNode, Attribute, TypeAnnotationNode};
use crate::jvm::code::Constant;
use crate::jvm::FieldAccessFlags;

/// Field of a class
#[derive(Clone, PartialEq, Debug)]
pub struct FieldNode {
    pub access: FieldAccessFlags,
    pub name: String,

    /// Field descriptor (eg. `Ljava/lang/String;`)
    pub descriptor: String,

    pub signature: Option<String>,

    /// Initial value from the `ConstantValue` attribute
    pub value: Option<Constant>,

    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<TypeAnnotationNode>,
    pub invisible_type_annotations: Vec<TypeAnnotationNode>,
    pub attributes: Vec<Attribute>,
}

impl FieldNode {
    pub fn new(
        access: FieldAccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> FieldNode {
        FieldNode {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            value: None,
            visible_annotations: vec![],
            invisible_annotations: vec![],
            visible_type_annotations: vec![],
            invisible_type_annotations: vec![],
            attributes: vec![],
        }
    }
}
