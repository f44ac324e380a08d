use super::{
    AnnotationNode, AnnotationValue, Attribute, LocalVariableAnnotationNode, TypeAnnotationNode,
};
use crate::jvm::code::{Instruction, Label};
use crate::jvm::{MethodAccessFlags, ParameterAccessFlags};

/// Method, including its body
#[derive(Clone, PartialEq, Debug)]
pub struct MethodNode {
    pub access: MethodAccessFlags,

    /// Method name (eg. `<init>` or `toString`)
    pub name: String,

    /// Method descriptor (eg. `(ILjava/lang/String;)V`)
    pub descriptor: String,

    /// Generic method signature
    ///
    /// [Format](https://docs.oracle.com/javase/specs/jvms/se11/html/jvms-4.html#jvms-4.7.9.1)
    pub signature: Option<String>,

    /// Internal names of the declared exceptions
    pub exceptions: Vec<String>,

    /// Entries of the `MethodParameters` attribute
    pub parameters: Vec<ParameterNode>,

    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_type_annotations: Vec<TypeAnnotationNode>,
    pub invisible_type_annotations: Vec<TypeAnnotationNode>,
    pub attributes: Vec<Attribute>,

    /// Default value of an annotation interface element
    pub annotation_default: Option<AnnotationValue>,

    /// Number of parameters that can have visible annotations
    ///
    /// This can be smaller than the descriptor's parameter count, since `javac` leaves out
    /// synthetic parameters.
    pub visible_annotable_parameter_count: u8,

    /// Visible annotations of each parameter, indexed by parameter
    pub visible_parameter_annotations: Vec<Vec<AnnotationNode>>,

    pub invisible_annotable_parameter_count: u8,
    pub invisible_parameter_annotations: Vec<Vec<AnnotationNode>>,

    pub instructions: Vec<Instruction>,
    pub try_catch_blocks: Vec<TryCatchBlockNode>,
    pub max_stack: u16,
    pub max_locals: u16,
    pub local_variables: Vec<LocalVariableNode>,
    pub visible_local_variable_annotations: Vec<LocalVariableAnnotationNode>,
    pub invisible_local_variable_annotations: Vec<LocalVariableAnnotationNode>,
}

impl MethodNode {
    /// Create an empty method
    pub fn new(
        access: MethodAccessFlags,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> MethodNode {
        MethodNode {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            exceptions: vec![],
            parameters: vec![],
            visible_annotations: vec![],
            invisible_annotations: vec![],
            visible_type_annotations: vec![],
            invisible_type_annotations: vec![],
            attributes: vec![],
            annotation_default: None,
            visible_annotable_parameter_count: 0,
            visible_parameter_annotations: vec![],
            invisible_annotable_parameter_count: 0,
            invisible_parameter_annotations: vec![],
            instructions: vec![],
            try_catch_blocks: vec![],
            max_stack: 0,
            max_locals: 0,
            local_variables: vec![],
            visible_local_variable_annotations: vec![],
            invisible_local_variable_annotations: vec![],
        }
    }

    pub fn is_static(&self) -> bool {
        self.access.contains(MethodAccessFlags::STATIC)
    }

    /// Labels referenced from outside the instruction stream
    ///
    /// Local variable ranges come first, then try/catch blocks, then local variable annotations
    /// (visible before invisible).
    pub fn side_labels(&self) -> Vec<Label> {
        let mut labels = vec![];
        for local_variable in &self.local_variables {
            labels.push(local_variable.start);
            labels.push(local_variable.end);
        }
        for try_catch_block in &self.try_catch_blocks {
            labels.push(try_catch_block.start);
            labels.push(try_catch_block.end);
            labels.push(try_catch_block.handler);
        }
        for annotation in self
            .visible_local_variable_annotations
            .iter()
            .chain(self.invisible_local_variable_annotations.iter())
        {
            labels.extend(annotation.labels());
        }
        labels
    }

    /// Copy of the method with all line numbers removed
    ///
    /// Labels which only served as line number positions are removed too.
    pub fn without_line_numbers(&self) -> MethodNode {
        let mut method = self.clone();
        method.instructions = crate::labels::filter_method_line_numbers(self);
        method
    }
}

/// Entry of the `MethodParameters` attribute
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ParameterNode {
    /// Parameter name, absent for formal parameters without a name
    pub name: Option<String>,
    pub access: ParameterAccessFlags,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, access: ParameterAccessFlags) -> ParameterNode {
        ParameterNode {
            name: Some(name.into()),
            access,
        }
    }
}

/// Entry of the `LocalVariableTable` attribute
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct LocalVariableNode {
    pub name: String,

    /// Field descriptor of the variable type
    pub descriptor: String,

    /// Generic signature (from the `LocalVariableTypeTable`)
    pub signature: Option<String>,

    /// First instruction in scope
    pub start: Label,

    /// First instruction no longer in scope
    pub end: Label,

    /// Local variable slot
    pub index: u16,
}

/// Exception handler range
#[derive(Clone, PartialEq, Debug)]
pub struct TryCatchBlockNode {
    pub start: Label,
    pub end: Label,
    pub handler: Label,

    /// Internal name of the caught exception, `None` for `finally` blocks
    pub exception_type: Option<String>,

    pub visible_type_annotations: Vec<TypeAnnotationNode>,
    pub invisible_type_annotations: Vec<TypeAnnotationNode>,
}

impl TryCatchBlockNode {
    pub fn new(
        start: Label,
        end: Label,
        handler: Label,
        exception_type: Option<String>,
    ) -> TryCatchBlockNode {
        TryCatchBlockNode {
            start,
            end,
            handler,
            exception_type,
            visible_type_annotations: vec![],
            invisible_type_annotations: vec![],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::Opcode;

    #[test]
    fn side_labels_order() {
        let (l0, l1, l2, l3) = (Label::new(), Label::new(), Label::new(), Label::new());
        let mut method = MethodNode::new(MethodAccessFlags::STATIC, "run", "()V");
        method.try_catch_blocks.push(TryCatchBlockNode::new(l0, l1, l2, None));
        method.local_variables.push(LocalVariableNode {
            name: String::from("x"),
            descriptor: String::from("I"),
            signature: None,
            start: l3,
            end: l1,
            index: 0,
        });
        assert_eq!(method.side_labels(), vec![l3, l1, l0, l1, l2]);
        assert!(method.is_static());
    }

    #[test]
    fn without_line_numbers() {
        let (l0, l1) = (Label::new(), Label::new());
        let mut method = MethodNode::new(MethodAccessFlags::PUBLIC, "run", "()V");
        method.instructions = vec![
            Instruction::Label(l0),
            Instruction::LineNumber { line: 7, start: l0 },
            Instruction::Insn {
                opcode: Opcode::NOP,
            },
            Instruction::Label(l1),
            Instruction::Insn {
                opcode: Opcode::RETURN,
            },
        ];
        method.try_catch_blocks.push(TryCatchBlockNode::new(l1, l1, l1, None));

        let filtered = method.without_line_numbers();
        assert_eq!(
            filtered.instructions,
            vec![
                Instruction::Insn {
                    opcode: Opcode::NOP
                },
                Instruction::Label(l1),
                Instruction::Insn {
                    opcode: Opcode::RETURN
                },
            ]
        );
        assert_eq!(method.instructions.len(), 5);
    }
}
