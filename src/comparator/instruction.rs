use super::{
    compare_positional, IgnoreLineNumbersCapable, IndexAwareComparator, LabelComparator,
    StructuralComparator,
};
use crate::jvm::code::{Constant, FrameValue, Handle, Instruction};
use crate::labels::{
    extract_label_indices, extract_pair_label_indices, filter_instruction_line_numbers,
    LabelIndexLookup,
};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Compares instructions by opcode, then operands
///
/// Pseudo instructions (labels, frames, line numbers) sort first. Label operands are resolved
/// through the lookup.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstructionComparator {
    label: LabelComparator,
}

impl InstructionComparator {
    pub fn new() -> InstructionComparator {
        InstructionComparator {
            label: LabelComparator,
        }
    }
}

fn instruction_rank(instruction: &Instruction) -> u8 {
    match instruction {
        Instruction::Insn { .. } => 0,
        Instruction::Int { .. } => 1,
        Instruction::Var { .. } => 2,
        Instruction::Type { .. } => 3,
        Instruction::Field { .. } => 4,
        Instruction::Method { .. } => 5,
        Instruction::InvokeDynamic { .. } => 6,
        Instruction::Jump { .. } => 7,
        Instruction::Label(_) => 8,
        Instruction::Ldc(_) => 9,
        Instruction::Iinc { .. } => 10,
        Instruction::TableSwitch { .. } => 11,
        Instruction::LookupSwitch { .. } => 12,
        Instruction::MultiANewArray { .. } => 13,
        Instruction::Frame { .. } => 14,
        Instruction::LineNumber { .. } => 15,
    }
}

fn constant_rank(constant: &Constant) -> u8 {
    match constant {
        Constant::Integer(_) => 0,
        Constant::Long(_) => 1,
        Constant::Float(_) => 2,
        Constant::Double(_) => 3,
        Constant::String(_) => 4,
        Constant::Type(_) => 5,
        Constant::MethodHandle(_) => 6,
    }
}

/// Total order on constants: by kind, then value
///
/// Floating point values use the IEEE total order, so `NaN` is equal to itself.
pub fn compare_constants(first: &Constant, second: &Constant) -> Ordering {
    match (first, second) {
        (Constant::Integer(a), Constant::Integer(b)) => a.cmp(b),
        (Constant::Long(a), Constant::Long(b)) => a.cmp(b),
        (Constant::Float(a), Constant::Float(b)) => a.total_cmp(b),
        (Constant::Double(a), Constant::Double(b)) => a.total_cmp(b),
        (Constant::String(a), Constant::String(b)) => a.cmp(b),
        (Constant::Type(a), Constant::Type(b)) => a.cmp(b),
        (Constant::MethodHandle(a), Constant::MethodHandle(b)) => compare_handles(a, b),
        _ => constant_rank(first).cmp(&constant_rank(second)),
    }
}

fn compare_handles(first: &Handle, second: &Handle) -> Ordering {
    (
        first.tag,
        &first.owner,
        &first.name,
        &first.descriptor,
        first.is_interface,
    )
        .cmp(&(
            second.tag,
            &second.owner,
            &second.name,
            &second.descriptor,
            second.is_interface,
        ))
}

fn frame_value_rank(value: &FrameValue) -> u8 {
    match value {
        FrameValue::Top => 0,
        FrameValue::Integer => 1,
        FrameValue::Float => 2,
        FrameValue::Double => 3,
        FrameValue::Long => 4,
        FrameValue::Null => 5,
        FrameValue::UninitializedThis => 6,
        FrameValue::Object(_) => 7,
        FrameValue::Uninitialized(_) => 8,
    }
}

impl InstructionComparator {
    fn compare_frame_values(
        &self,
        first: &[FrameValue],
        second: &[FrameValue],
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        compare_positional(first, second, |first, second| match (first, second) {
            (FrameValue::Object(a), FrameValue::Object(b)) => a.cmp(b),
            (FrameValue::Uninitialized(a), FrameValue::Uninitialized(b)) => {
                self.label.compare_with_labels(a, b, labels)
            }
            _ => frame_value_rank(first).cmp(&frame_value_rank(second)),
        })
    }
}

impl StructuralComparator<Instruction> for InstructionComparator {
    fn compare(&self, first: &Instruction, second: &Instruction) -> Ordering {
        self.compare_with_labels(first, second, &mut LabelIndexLookup::new())
    }
}

impl IndexAwareComparator<Instruction> for InstructionComparator {
    fn compare_with_labels(
        &self,
        first: &Instruction,
        second: &Instruction,
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        let ordering = first
            .opcode()
            .cmp(&second.opcode())
            .then_with(|| instruction_rank(first).cmp(&instruction_rank(second)));
        if ordering.is_ne() {
            return ordering;
        }

        use Instruction::*;
        match (first, second) {
            (Insn { .. }, Insn { .. }) => Ordering::Equal,
            (Int { operand: a, .. }, Int { operand: b, .. }) => a.cmp(b),
            (Var { var: a, .. }, Var { var: b, .. }) => a.cmp(b),
            (Type { class: a, .. }, Type { class: b, .. }) => a.cmp(b),
            (
                Field {
                    owner: o1,
                    name: n1,
                    descriptor: d1,
                    ..
                },
                Field {
                    owner: o2,
                    name: n2,
                    descriptor: d2,
                    ..
                },
            ) => (o1, n1, d1).cmp(&(o2, n2, d2)),
            (
                Method {
                    owner: o1,
                    name: n1,
                    descriptor: d1,
                    is_interface: i1,
                    ..
                },
                Method {
                    owner: o2,
                    name: n2,
                    descriptor: d2,
                    is_interface: i2,
                    ..
                },
            ) => (o1, n1, d1, i1).cmp(&(o2, n2, d2, i2)),
            (
                InvokeDynamic {
                    name: n1,
                    descriptor: d1,
                    bootstrap_method: h1,
                    bootstrap_arguments: a1,
                },
                InvokeDynamic {
                    name: n2,
                    descriptor: d2,
                    bootstrap_method: h2,
                    bootstrap_arguments: a2,
                },
            ) => (n1, d1)
                .cmp(&(n2, d2))
                .then_with(|| compare_handles(h1, h2))
                .then_with(|| compare_positional(a1, a2, compare_constants)),
            (Jump { label: a, .. }, Jump { label: b, .. }) => {
                self.label.compare_with_labels(a, b, labels)
            }
            (Label(a), Label(b)) => self.label.compare_with_labels(a, b, labels),
            (Ldc(a), Ldc(b)) => compare_constants(a, b),
            (
                Iinc {
                    var: v1,
                    increment: i1,
                },
                Iinc {
                    var: v2,
                    increment: i2,
                },
            ) => (v1, i1).cmp(&(v2, i2)),
            (
                TableSwitch {
                    min: min1,
                    max: max1,
                    default: d1,
                    labels: l1,
                },
                TableSwitch {
                    min: min2,
                    max: max2,
                    default: d2,
                    labels: l2,
                },
            ) => (min1, max1)
                .cmp(&(min2, max2))
                .then_with(|| self.label.compare_with_labels(d1, d2, labels))
                .then_with(|| self.label.compare_lists(l1, l2, labels)),
            (
                LookupSwitch {
                    default: d1,
                    keys: k1,
                    labels: l1,
                },
                LookupSwitch {
                    default: d2,
                    keys: k2,
                    labels: l2,
                },
            ) => compare_positional(k1, k2, |a, b| a.cmp(b))
                .then_with(|| self.label.compare_with_labels(d1, d2, labels))
                .then_with(|| self.label.compare_lists(l1, l2, labels)),
            (
                MultiANewArray {
                    descriptor: d1,
                    dimensions: n1,
                },
                MultiANewArray {
                    descriptor: d2,
                    dimensions: n2,
                },
            ) => (d1, n1).cmp(&(d2, n2)),
            (
                Frame {
                    kind: k1,
                    locals: l1,
                    stack: s1,
                },
                Frame {
                    kind: k2,
                    locals: l2,
                    stack: s2,
                },
            ) => k1
                .cmp(k2)
                .then_with(|| self.compare_frame_values(l1, l2, labels))
                .then_with(|| self.compare_frame_values(s1, s2, labels)),
            (
                LineNumber {
                    line: n1,
                    start: s1,
                },
                LineNumber {
                    line: n2,
                    start: s2,
                },
            ) => n1
                .cmp(n2)
                .then_with(|| self.label.compare_with_labels(s1, s2, labels)),
            _ => Ordering::Equal,
        }
    }
}

/// Compares instruction streams position by position
///
/// The context free comparison indexes labels from both streams, the first stream being
/// authoritative. Streams of different length are ordered by length.
#[derive(Copy, Clone, Debug, Default)]
pub struct InstructionListComparator {
    instruction: InstructionComparator,
    ignore_line_numbers: bool,
}

impl InstructionListComparator {
    pub fn new() -> InstructionListComparator {
        InstructionListComparator {
            instruction: InstructionComparator::new(),
            ignore_line_numbers: false,
        }
    }

    fn prepare<'a>(&self, instructions: &'a [Instruction]) -> Cow<'a, [Instruction]> {
        if self.ignore_line_numbers {
            Cow::Owned(filter_instruction_line_numbers(instructions))
        } else {
            Cow::Borrowed(instructions)
        }
    }

    fn compare_prepared(
        &self,
        first: &[Instruction],
        second: &[Instruction],
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        compare_positional(first, second, |first, second| {
            self.instruction.compare_with_labels(first, second, labels)
        })
    }
}

impl IgnoreLineNumbersCapable for InstructionListComparator {
    fn ignore_line_numbers(mut self) -> Self {
        self.ignore_line_numbers = true;
        self
    }
}

impl StructuralComparator<[Instruction]> for InstructionListComparator {
    fn compare(&self, first: &[Instruction], second: &[Instruction]) -> Ordering {
        let first = self.prepare(first);
        let second = self.prepare(second);
        let mut labels = extract_pair_label_indices(&first, &second);
        self.compare_prepared(&first, &second, &mut labels)
    }
}

impl IndexAwareComparator<[Instruction]> for InstructionListComparator {
    fn compare_with_labels(
        &self,
        first: &[Instruction],
        second: &[Instruction],
        labels: &mut LabelIndexLookup,
    ) -> Ordering {
        let first = self.prepare(first);
        let second = self.prepare(second);
        labels.put_all(extract_label_indices(&first));
        labels.put_all(extract_label_indices(&second));
        self.compare_prepared(&first, &second, labels)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::{Label, Opcode};

    fn body(start: Label, end: Label, with_line_numbers: bool) -> Vec<Instruction> {
        let mut instructions = vec![Instruction::Label(start)];
        if with_line_numbers {
            instructions.push(Instruction::LineNumber { line: 4, start });
        }
        instructions.extend(vec![
            Instruction::Var {
                opcode: Opcode::ILOAD,
                var: 0,
            },
            Instruction::Jump {
                opcode: Opcode::IFEQ,
                label: end,
            },
            Instruction::Iinc {
                var: 0,
                increment: 1,
            },
            Instruction::Label(end),
            Instruction::Insn {
                opcode: Opcode::RETURN,
            },
        ]);
        instructions
    }

    #[test]
    fn equal_streams_with_different_labels() {
        let first = body(Label::new(), Label::new(), false);
        let second = body(Label::new(), Label::new(), false);
        let cmp = InstructionListComparator::new();
        assert_eq!(cmp.compare(&first, &second), Ordering::Equal);
        assert_eq!(cmp.compare(&first, &first), Ordering::Equal);
    }

    #[test]
    fn jump_to_other_position_differs() {
        let (start, end) = (Label::new(), Label::new());
        let first = body(start, end, false);
        let mut second = body(start, end, false);
        second[2] = Instruction::Jump {
            opcode: Opcode::IFEQ,
            label: start,
        };
        let cmp = InstructionListComparator::new();
        let ordering = cmp.compare(&first, &second);
        assert_ne!(ordering, Ordering::Equal);
        assert_eq!(cmp.compare(&second, &first), ordering.reverse());
    }

    #[test]
    fn line_numbers() {
        let first = body(Label::new(), Label::new(), true);
        let second = body(Label::new(), Label::new(), false);
        let strict = InstructionListComparator::new();
        let lenient = InstructionListComparator::new().ignore_line_numbers();
        assert_ne!(strict.compare(&first, &second), Ordering::Equal);
        assert_eq!(lenient.compare(&first, &second), Ordering::Equal);
        assert_eq!(
            lenient.compare_with_labels(&second, &first, &mut LabelIndexLookup::new()),
            Ordering::Equal
        );
    }

    #[test]
    fn without_lookup_labels_compare_by_identity() {
        let cmp = InstructionComparator::new();
        let jump = |label| Instruction::Jump {
            opcode: Opcode::GOTO,
            label,
        };
        assert_ne!(cmp.compare(&jump(Label::new()), &jump(Label::new())), Ordering::Equal);
        let label = Label::new();
        assert_eq!(cmp.compare(&jump(label), &jump(label)), Ordering::Equal);
    }

    #[test]
    fn constants() {
        assert_eq!(
            compare_constants(&Constant::Float(f32::NAN), &Constant::Float(f32::NAN)),
            Ordering::Equal
        );
        assert_eq!(
            compare_constants(&Constant::Integer(9), &Constant::Long(1)),
            Ordering::Less
        );
        assert_eq!(
            compare_constants(
                &Constant::String(String::from("a")),
                &Constant::String(String::from("b"))
            ),
            Ordering::Less
        );
    }
}
