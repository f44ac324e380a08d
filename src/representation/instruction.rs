use super::{indent, IndexAwareRenderer, LabelRenderer, Renderer};
use crate::jvm::code::{
    newarray_type_name, Constant, FrameKind, FrameValue, Handle, Instruction, Label, Opcode,
};
use crate::labels::{extract_label_indices, LabelIndexLookup};

/// Renders instructions in textifier form (`INVOKEVIRTUAL java/lang/Integer.intValue ()I`)
///
/// Real instructions are followed by their opcode (` // opcode: 182`), unless opcodes are hidden
/// or the rendering is simplified. Switches take several lines: one per case, then the default.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstructionRenderer {
    label: LabelRenderer,
    hide_opcodes: bool,
}

impl InstructionRenderer {
    pub fn new() -> InstructionRenderer {
        InstructionRenderer {
            label: LabelRenderer,
            hide_opcodes: false,
        }
    }

    /// Leave out the ` // opcode: N` suffix
    pub fn hide_opcodes(mut self) -> Self {
        self.hide_opcodes = true;
        self
    }

    fn text(&self, instruction: &Instruction, labels: &LabelIndexLookup) -> String {
        let label = |label: &Label| self.label.name(label, labels);
        match instruction {
            Instruction::Insn { opcode } => opcode.mnemonic(),
            Instruction::Int { opcode, operand } if *opcode == Opcode::NEWARRAY => {
                match newarray_type_name(*operand) {
                    Some(name) => format!("NEWARRAY {}", name),
                    None => format!("NEWARRAY {}", operand),
                }
            }
            Instruction::Int { opcode, operand } => format!("{} {}", opcode.mnemonic(), operand),
            Instruction::Var { opcode, var } => format!("{} {}", opcode.mnemonic(), var),
            Instruction::Type { opcode, class } => format!("{} {}", opcode.mnemonic(), class),
            Instruction::Field {
                opcode,
                owner,
                name,
                descriptor,
            } => format!("{} {}.{} : {}", opcode.mnemonic(), owner, name, descriptor),
            Instruction::Method {
                opcode,
                owner,
                name,
                descriptor,
                is_interface,
            } => {
                let mut text = format!("{} {}.{} {}", opcode.mnemonic(), owner, name, descriptor);
                if *is_interface && *opcode != Opcode::INVOKEINTERFACE {
                    text.push_str(" (itf)");
                }
                text
            }
            Instruction::InvokeDynamic {
                name,
                descriptor,
                bootstrap_method,
                bootstrap_arguments,
            } => {
                let mut bootstrap = vec![handle_text(bootstrap_method)];
                bootstrap.extend(bootstrap_arguments.iter().map(constant_text));
                format!("INVOKEDYNAMIC {}{} [{}]", name, descriptor, bootstrap.join(", "))
            }
            Instruction::Jump { opcode, label: target } => {
                format!("{} {}", opcode.mnemonic(), label(target))
            }
            Instruction::Label(defined) => label(defined),
            Instruction::Ldc(constant) => format!("LDC {}", constant_text(constant)),
            Instruction::Iinc { var, increment } => format!("IINC {} {}", var, increment),
            Instruction::TableSwitch {
                min,
                max,
                default,
                labels: targets,
            } => {
                let mut text = String::from("TABLESWITCH");
                for (key, target) in (*min..=*max).zip(targets) {
                    text.push_str(&format!("\n  {}: {}", key, label(target)));
                }
                text.push_str(&format!("\n  default: {}", label(default)));
                text
            }
            Instruction::LookupSwitch {
                default,
                keys,
                labels: targets,
            } => {
                let mut text = String::from("LOOKUPSWITCH");
                for (key, target) in keys.iter().zip(targets) {
                    text.push_str(&format!("\n  {}: {}", key, label(target)));
                }
                text.push_str(&format!("\n  default: {}", label(default)));
                text
            }
            Instruction::MultiANewArray {
                descriptor,
                dimensions,
            } => format!("MULTIANEWARRAY {} {}", descriptor, dimensions),
            Instruction::Frame {
                kind,
                locals,
                stack,
            } => {
                let values = |values: &[FrameValue]| {
                    let values: Vec<String> = values
                        .iter()
                        .map(|value| frame_value_text(value, &label))
                        .collect();
                    format!("[{}]", values.join(" "))
                };
                match kind {
                    FrameKind::New => format!("FRAME NEW {} {}", values(locals), values(stack)),
                    FrameKind::Full => format!("FRAME FULL {} {}", values(locals), values(stack)),
                    FrameKind::Append => format!("FRAME APPEND {}", values(locals)),
                    FrameKind::Chop => format!("FRAME CHOP {}", locals.len()),
                    FrameKind::Same => String::from("FRAME SAME"),
                    FrameKind::Same1 => match stack.first() {
                        Some(value) => format!("FRAME SAME1 {}", frame_value_text(value, &label)),
                        None => String::from("FRAME SAME1"),
                    },
                }
            }
            Instruction::LineNumber { line, start } => {
                format!("LINENUMBER {} {}", line, label(start))
            }
        }
    }
}

fn frame_value_text(value: &FrameValue, label: &impl Fn(&Label) -> String) -> String {
    match value {
        FrameValue::Top => String::from("T"),
        FrameValue::Integer => String::from("I"),
        FrameValue::Float => String::from("F"),
        FrameValue::Double => String::from("D"),
        FrameValue::Long => String::from("J"),
        FrameValue::Null => String::from("N"),
        FrameValue::UninitializedThis => String::from("UninitializedThis"),
        FrameValue::Object(class) => class.clone(),
        FrameValue::Uninitialized(target) => label(target),
    }
}

fn handle_text(handle: &Handle) -> String {
    const TAGS: [&str; 10] = [
        "",
        "H_GETFIELD",
        "H_GETSTATIC",
        "H_PUTFIELD",
        "H_PUTSTATIC",
        "H_INVOKEVIRTUAL",
        "H_INVOKESTATIC",
        "H_INVOKESPECIAL",
        "H_NEWINVOKESPECIAL",
        "H_INVOKEINTERFACE",
    ];
    let tag = match TAGS.get(handle.tag as usize) {
        Some(tag) if !tag.is_empty() => String::from(*tag),
        _ => format!("H_UNKNOWN_{}", handle.tag),
    };
    let mut text = format!(
        "{} {}.{}{}",
        tag, handle.owner, handle.name, handle.descriptor
    );
    if handle.is_interface {
        text.push_str(" (itf)");
    }
    text
}

/// Constant as written by `LDC`: `5`, `5L`, `1.5F`, `"text"`, `Ljava/lang/String;.class`
pub fn constant_text(constant: &Constant) -> String {
    match constant {
        Constant::Integer(value) => value.to_string(),
        Constant::Long(value) => format!("{}L", value),
        Constant::Float(value) => format!("{}F", java_float(*value)),
        Constant::Double(value) => format!("{}D", java_double(*value)),
        Constant::String(value) => java_string_literal(value),
        Constant::Type(descriptor) => format!("{}.class", descriptor),
        Constant::MethodHandle(handle) => handle_text(handle),
    }
}

/// Quoted and escaped string literal
///
/// Control characters and anything outside of ASCII are written as `\uXXXX` escapes.
pub fn java_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            ' '..='~' => literal.push(c),
            _ => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    literal.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    literal.push('"');
    literal
}

/// `float` in the form Java prints it (`1.0`, `1.0E10`, `NaN`)
pub fn java_float(value: f32) -> String {
    java_floating(value as f64, value.to_string(), format!("{:E}", value))
}

/// `double` in the form Java prints it (`1.0`, `1.0E10`, `NaN`)
pub fn java_double(value: f64) -> String {
    java_floating(value, value.to_string(), format!("{:E}", value))
}

fn java_floating(value: f64, plain: String, scientific: String) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value.is_infinite() {
        String::from(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value != 0.0 && !(1e-3..1e7).contains(&value.abs()) {
        match scientific.split_once('E') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                format!("{}.0E{}", mantissa, exponent)
            }
            _ => scientific,
        }
    } else if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

impl Renderer<Instruction> for InstructionRenderer {
    fn render(&self, node: &Instruction) -> String {
        self.render_with_labels(node, &mut LabelIndexLookup::new())
    }

    fn render_simplified(&self, node: &Instruction) -> String {
        self.text(node, LabelIndexLookup::empty())
    }
}

impl IndexAwareRenderer<Instruction> for InstructionRenderer {
    fn render_with_labels(&self, node: &Instruction, labels: &mut LabelIndexLookup) -> String {
        let text = self.text(node, labels);
        match node.opcode() {
            Some(Opcode(opcode)) if !self.hide_opcodes => {
                let suffix = format!(" // opcode: {}", opcode);
                match text.split_once('\n') {
                    Some((first, rest)) => format!("{}{}\n{}", first, suffix, rest),
                    None => text + &suffix,
                }
            }
            _ => text,
        }
    }

    fn render_simplified_with_labels(
        &self,
        node: &Instruction,
        labels: &mut LabelIndexLookup,
    ) -> String {
        self.text(node, labels)
    }
}

/// Renders instruction streams, one instruction after the other
///
/// Labels and frames start at the beginning of the line, other instructions are indented by two
/// spaces. The context free rendering indexes the labels of the stream itself.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstructionListRenderer {
    instruction: InstructionRenderer,
}

impl InstructionListRenderer {
    pub fn new(instruction: InstructionRenderer) -> InstructionListRenderer {
        InstructionListRenderer { instruction }
    }
}

impl Renderer<[Instruction]> for InstructionListRenderer {
    fn render(&self, node: &[Instruction]) -> String {
        let mut labels = LabelIndexLookup::from_entries(extract_label_indices(node));
        self.render_with_labels(node, &mut labels)
    }

    fn render_simplified(&self, node: &[Instruction]) -> String {
        match node.len() {
            1 => String::from("1 instruction"),
            count => format!("{} instructions", count),
        }
    }
}

impl IndexAwareRenderer<[Instruction]> for InstructionListRenderer {
    fn render_with_labels(&self, node: &[Instruction], labels: &mut LabelIndexLookup) -> String {
        node.iter()
            .map(|instruction| {
                let text = self.instruction.render_with_labels(instruction, labels);
                match instruction {
                    Instruction::Label(_) | Instruction::Frame { .. } => text,
                    _ => indent(&text, "  "),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn textifier_forms() {
        let renderer = InstructionRenderer::new();
        assert_eq!(
            renderer.render(&Instruction::Int {
                opcode: Opcode::BIPUSH,
                operand: 6
            }),
            "BIPUSH 6 // opcode: 16"
        );
        assert_eq!(
            renderer.render(&Instruction::Method {
                opcode: Opcode::INVOKEVIRTUAL,
                owner: String::from("java/lang/Integer"),
                name: String::from("intValue"),
                descriptor: String::from("()I"),
                is_interface: false,
            }),
            "INVOKEVIRTUAL java/lang/Integer.intValue ()I // opcode: 182"
        );
        assert_eq!(
            renderer.render_simplified(&Instruction::Field {
                opcode: Opcode::GETSTATIC,
                owner: String::from("java/lang/System"),
                name: String::from("out"),
                descriptor: String::from("Ljava/io/PrintStream;"),
            }),
            "GETSTATIC java/lang/System.out : Ljava/io/PrintStream;"
        );
        let hidden = InstructionRenderer::new().hide_opcodes();
        assert_eq!(
            hidden.render(&Instruction::Ldc(Constant::String(String::from("foo")))),
            "LDC \"foo\""
        );
        assert_eq!(
            hidden.render(&Instruction::Iinc {
                var: 1,
                increment: 1
            }),
            "IINC 1 1"
        );
        assert_eq!(
            hidden.render(&Instruction::Int {
                opcode: Opcode::NEWARRAY,
                operand: 10
            }),
            "NEWARRAY T_INT"
        );
        assert_eq!(
            hidden.render(&Instruction::Frame {
                kind: FrameKind::Same,
                locals: vec![],
                stack: vec![]
            }),
            "FRAME SAME"
        );
    }

    #[test]
    fn switches() {
        let (a, b, default) = (Label::new(), Label::new(), Label::new());
        let switch = Instruction::TableSwitch {
            min: 1,
            max: 2,
            default,
            labels: vec![a, b],
        };
        let mut labels = LabelIndexLookup::from_entries(vec![(a, 0), (b, 1), (default, 2)]);
        assert_eq!(
            InstructionRenderer::new().render_with_labels(&switch, &mut labels),
            "TABLESWITCH // opcode: 170\n  1: L0\n  2: L1\n  default: L2"
        );
    }

    #[test]
    fn literals() {
        assert_eq!(java_string_literal("a\"b\\\n\u{e9}"), "\"a\\\"b\\\\\\n\\u00e9\"");
        assert_eq!(java_float(1.0), "1.0");
        assert_eq!(java_float(0.5), "0.5");
        assert_eq!(java_double(-0.0), "-0.0");
        assert_eq!(java_double(1e10), "1.0E10");
        assert_eq!(java_double(f64::NAN), "NaN");
        assert_eq!(constant_text(&Constant::Long(3)), "3L");
        assert_eq!(constant_text(&Constant::Double(2.5)), "2.5D");
    }

    #[test]
    fn label_names_follow_the_lookup() {
        let label = Label::new();
        let instructions = vec![
            Instruction::Label(label),
            Instruction::Insn {
                opcode: Opcode::RETURN,
            },
        ];
        let renderer = InstructionListRenderer::new(InstructionRenderer::new().hide_opcodes());

        let mut labels = LabelIndexLookup::from_entries(vec![(label, 0)]);
        assert_eq!(
            renderer.render_with_labels(&instructions, &mut labels),
            "L0\n  RETURN"
        );
        assert_eq!(
            renderer.render_with_labels(&instructions, &mut LabelIndexLookup::new()),
            format!("L{}\n  RETURN", label.identity_hash())
        );
        assert_eq!(renderer.render(&instructions), "L0\n  RETURN");
        assert_eq!(renderer.render_simplified(&instructions), "2 instructions");
    }
}
