use super::{Label, Opcode};

/// Bytecode instruction, in the form produced by a bytecode reader
///
/// Names are stored the way they appear in the class file: classes as internal names
/// (`java/lang/String`) and types as descriptors (`Ljava/lang/String;`). Labels, frames and line
/// numbers are pseudo instructions: they occupy no bytes and have no opcode.
#[derive(Clone, PartialEq, Debug)]
pub enum Instruction {
    /// Instruction without operands (eg. `IADD`, `RETURN`)
    Insn { opcode: Opcode },

    /// `BIPUSH`, `SIPUSH`, or `NEWARRAY`
    Int { opcode: Opcode, operand: i32 },

    /// Load, store, or `RET` on a local variable slot
    Var { opcode: Opcode, var: u16 },

    /// `NEW`, `ANEWARRAY`, `CHECKCAST`, or `INSTANCEOF` on an internal name
    Type { opcode: Opcode, class: String },

    /// Field access
    Field {
        opcode: Opcode,
        owner: String,
        name: String,
        descriptor: String,
    },

    /// Method invocation (except `INVOKEDYNAMIC`)
    Method {
        opcode: Opcode,
        owner: String,
        name: String,
        descriptor: String,
        is_interface: bool,
    },

    /// `INVOKEDYNAMIC`
    InvokeDynamic {
        name: String,
        descriptor: String,
        bootstrap_method: Handle,
        bootstrap_arguments: Vec<Constant>,
    },

    /// Conditional or unconditional branch
    Jump { opcode: Opcode, label: Label },

    /// Defines the position of a label
    Label(Label),

    /// `LDC` of a loadable constant
    Ldc(Constant),

    /// `IINC`
    Iinc { var: u16, increment: i16 },

    TableSwitch {
        min: i32,
        max: i32,
        default: Label,
        labels: Vec<Label>,
    },

    LookupSwitch {
        default: Label,
        keys: Vec<i32>,
        labels: Vec<Label>,
    },

    /// `MULTIANEWARRAY` with the array descriptor and number of dimensions to allocate
    MultiANewArray { descriptor: String, dimensions: u8 },

    /// Stack map frame
    Frame {
        kind: FrameKind,
        locals: Vec<FrameValue>,
        stack: Vec<FrameValue>,
    },

    /// Source line number for code starting at `start`
    LineNumber { line: u32, start: Label },
}

/// Loadable constant (operand of `LDC`, bootstrap argument, or field initial value)
#[derive(Clone, PartialEq, Debug)]
pub enum Constant {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),

    /// Class or method type, given as a descriptor
    Type(String),

    MethodHandle(Handle),
}

/// Method handle constant
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Handle {
    /// Reference kind (`1` for `REF_getField` up to `9` for `REF_invokeInterface`)
    pub tag: u8,
    pub owner: String,
    pub name: String,
    pub descriptor: String,
    pub is_interface: bool,
}

/// Kind of a stack map frame
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum FrameKind {
    /// Uncompressed frame
    New,
    Full,
    Append,
    Chop,
    Same,
    Same1,
}

/// Verification type of a local variable or stack slot in a frame
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum FrameValue {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,

    /// Internal name of a class
    Object(String),

    /// Object created by the `NEW` instruction following the label
    Uninitialized(Label),
}

impl Instruction {
    /// Opcode of the instruction, `None` for pseudo instructions
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Instruction::Insn { opcode }
            | Instruction::Int { opcode, .. }
            | Instruction::Var { opcode, .. }
            | Instruction::Type { opcode, .. }
            | Instruction::Field { opcode, .. }
            | Instruction::Method { opcode, .. }
            | Instruction::Jump { opcode, .. } => Some(*opcode),
            Instruction::InvokeDynamic { .. } => Some(Opcode::INVOKEDYNAMIC),
            Instruction::Ldc(_) => Some(Opcode::LDC),
            Instruction::Iinc { .. } => Some(Opcode::IINC),
            Instruction::TableSwitch { .. } => Some(Opcode::TABLESWITCH),
            Instruction::LookupSwitch { .. } => Some(Opcode::LOOKUPSWITCH),
            Instruction::MultiANewArray { .. } => Some(Opcode::MULTIANEWARRAY),
            Instruction::Label(_) | Instruction::Frame { .. } | Instruction::LineNumber { .. } => {
                None
            }
        }
    }

    /// Labels this instruction refers to (not counting a label definition)
    pub fn referenced_labels(&self) -> Vec<Label> {
        match self {
            Instruction::Jump { label, .. } => vec![*label],
            Instruction::TableSwitch {
                default, labels, ..
            }
            | Instruction::LookupSwitch {
                default, labels, ..
            } => {
                let mut referenced = labels.clone();
                referenced.push(*default);
                referenced
            }
            Instruction::Frame { locals, stack, .. } => locals
                .iter()
                .chain(stack.iter())
                .filter_map(|value| match value {
                    FrameValue::Uninitialized(label) => Some(*label),
                    _ => None,
                })
                .collect(),
            Instruction::LineNumber { start, .. } => vec![*start],
            _ => vec![],
        }
    }

    /// Label defined at this position, if this is a label pseudo instruction
    pub fn defined_label(&self) -> Option<Label> {
        match self {
            Instruction::Label(label) => Some(*label),
            _ => None,
        }
    }

    pub fn is_line_number(&self) -> bool {
        matches!(self, Instruction::LineNumber { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pseudo_instructions_have_no_opcode() {
        let label = Label::new();
        assert_eq!(Instruction::Label(label).opcode(), None);
        assert_eq!(
            Instruction::LineNumber {
                line: 3,
                start: label
            }
            .opcode(),
            None
        );
        assert_eq!(
            Instruction::Iinc {
                var: 1,
                increment: 1
            }
            .opcode(),
            Some(Opcode::IINC)
        );
    }

    #[test]
    fn referenced_labels() {
        let (l0, l1, l2) = (Label::new(), Label::new(), Label::new());
        let switch = Instruction::LookupSwitch {
            default: l2,
            keys: vec![1, 5],
            labels: vec![l0, l1],
        };
        assert_eq!(switch.referenced_labels(), vec![l0, l1, l2]);

        let frame = Instruction::Frame {
            kind: FrameKind::Full,
            locals: vec![FrameValue::Integer, FrameValue::Uninitialized(l1)],
            stack: vec![],
        };
        assert_eq!(frame.referenced_labels(), vec![l1]);
        assert_eq!(Instruction::Label(l0).referenced_labels(), vec![]);
        assert_eq!(Instruction::Label(l0).defined_label(), Some(l0));
    }
}
