use crate::jvm::code::{Instruction, Label};
use crate::jvm::model::{
    AnnotationNode, AnnotationValue, Attribute, ClassNode, FieldNode, InnerClassNode,
    LocalVariableAnnotationNode, LocalVariableNode, MethodNode, ParameterNode, TryCatchBlockNode,
    TypeAnnotationNode, TypePath, TypeReference,
};
use crate::jvm::AccessNode;

/// Kinds of nodes which can be compared or rendered
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum NodeKind {
    Class,
    Field,
    Method,
    Instructions,
    Instruction,
    Label,
    LocalVariable,
    LocalVariableAnnotation,
    TryCatchBlock,
    Annotation,
    TypeAnnotation,
    AnnotationValue,
    Parameter,
    InnerClass,
    Attribute,
    Access,
    TypeReference,
    TypePath,

    /// Field or method descriptor, or internal class name
    Type,
}

/// Borrowed node of any kind
///
/// This is the entry point for code which only knows at runtime what it is comparing or
/// rendering, like an assertion library.
#[derive(Copy, Clone, Debug)]
pub enum NodeRef<'a> {
    Class(&'a ClassNode),
    Field(&'a FieldNode),
    Method(&'a MethodNode),
    Instructions(&'a [Instruction]),
    Instruction(&'a Instruction),
    Label(&'a Label),
    LocalVariable(&'a LocalVariableNode),
    LocalVariableAnnotation(&'a LocalVariableAnnotationNode),
    TryCatchBlock(&'a TryCatchBlockNode),
    Annotation(&'a AnnotationNode),
    TypeAnnotation(&'a TypeAnnotationNode),
    AnnotationValue(&'a AnnotationValue),
    Parameter(&'a ParameterNode),
    InnerClass(&'a InnerClassNode),
    Attribute(&'a Attribute),
    Access(&'a AccessNode),
    TypeReference(&'a TypeReference),
    TypePath(&'a TypePath),
    Type(&'a str),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Class(_) => NodeKind::Class,
            NodeRef::Field(_) => NodeKind::Field,
            NodeRef::Method(_) => NodeKind::Method,
            NodeRef::Instructions(_) => NodeKind::Instructions,
            NodeRef::Instruction(_) => NodeKind::Instruction,
            NodeRef::Label(_) => NodeKind::Label,
            NodeRef::LocalVariable(_) => NodeKind::LocalVariable,
            NodeRef::LocalVariableAnnotation(_) => NodeKind::LocalVariableAnnotation,
            NodeRef::TryCatchBlock(_) => NodeKind::TryCatchBlock,
            NodeRef::Annotation(_) => NodeKind::Annotation,
            NodeRef::TypeAnnotation(_) => NodeKind::TypeAnnotation,
            NodeRef::AnnotationValue(_) => NodeKind::AnnotationValue,
            NodeRef::Parameter(_) => NodeKind::Parameter,
            NodeRef::InnerClass(_) => NodeKind::InnerClass,
            NodeRef::Attribute(_) => NodeKind::Attribute,
            NodeRef::Access(_) => NodeKind::Access,
            NodeRef::TypeReference(_) => NodeKind::TypeReference,
            NodeRef::TypePath(_) => NodeKind::TypePath,
            NodeRef::Type(_) => NodeKind::Type,
        }
    }
}

/// Node types which have a [`NodeRef`] variant
pub trait Node {
    const KIND: NodeKind;

    /// Extract the node, if the reference is of this type
    fn from_node_ref(node: NodeRef<'_>) -> Option<&Self>;
}

macro_rules! node {
    ($ty:ty, $variant:ident) => {
        impl Node for $ty {
            const KIND: NodeKind = NodeKind::$variant;

            fn from_node_ref(node: NodeRef<'_>) -> Option<&Self> {
                match node {
                    NodeRef::$variant(node) => Some(node),
                    _ => None,
                }
            }
        }

        impl<'a> From<&'a $ty> for NodeRef<'a> {
            fn from(node: &'a $ty) -> NodeRef<'a> {
                NodeRef::$variant(node)
            }
        }
    };
}

node!(ClassNode, Class);
node!(FieldNode, Field);
node!(MethodNode, Method);
node!([Instruction], Instructions);
node!(Instruction, Instruction);
node!(Label, Label);
node!(LocalVariableNode, LocalVariable);
node!(LocalVariableAnnotationNode, LocalVariableAnnotation);
node!(TryCatchBlockNode, TryCatchBlock);
node!(AnnotationNode, Annotation);
node!(TypeAnnotationNode, TypeAnnotation);
node!(AnnotationValue, AnnotationValue);
node!(ParameterNode, Parameter);
node!(InnerClassNode, InnerClass);
node!(Attribute, Attribute);
node!(AccessNode, Access);
node!(TypeReference, TypeReference);
node!(TypePath, TypePath);
node!(str, Type);
