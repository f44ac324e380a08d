use super::LabelIndexLookup;
use crate::jvm::code::{Instruction, Label};
use crate::jvm::model::MethodNode;
use log::debug;
use std::collections::HashSet;

/// Index every label defined in an instruction stream by its position among label definitions
///
/// Only `Instruction::Label` entries count: the first label defined gets `0`, the next `1`, and so
/// on. A label defined twice keeps its first position.
pub fn extract_label_indices(instructions: &[Instruction]) -> Vec<(Label, usize)> {
    let mut seen = HashSet::new();
    instructions
        .iter()
        .filter_map(Instruction::defined_label)
        .enumerate()
        .filter(|(_, label)| seen.insert(*label))
        .map(|(index, label)| (label, index))
        .collect()
}

/// Index the labels of two instruction streams being compared
///
/// The first stream is authoritative: its labels keep the indices they have in the first stream.
/// Labels only found in the second stream get their position in the second stream.
pub fn extract_pair_label_indices(
    first: &[Instruction],
    second: &[Instruction],
) -> LabelIndexLookup {
    let mut lookup = LabelIndexLookup::from_entries(extract_label_indices(first));
    lookup.put_all(extract_label_indices(second));
    lookup
}

/// Index every label of a method
///
/// Labels defined in the instruction stream are indexed first. Labels only referenced by local
/// variables, try/catch blocks, or local variable annotations (which can happen with malformed or
/// partially built methods) are numbered after those, in the order of
/// [`MethodNode::side_labels`].
pub fn extract_method_label_indices(method: &MethodNode) -> Vec<(Label, usize)> {
    let mut entries = extract_label_indices(&method.instructions);
    let mut seen: HashSet<Label> = entries.iter().map(|(label, _)| *label).collect();
    let mut next_index = method
        .instructions
        .iter()
        .filter(|instruction| instruction.defined_label().is_some())
        .count();

    for label in method.side_labels() {
        if seen.insert(label) {
            debug!(
                "Label {:?} of method {} is not defined in its instructions",
                label, method.name
            );
            entries.push((label, next_index));
            next_index += 1;
        }
    }
    entries
}

/// Index the labels of two methods being compared (see [`extract_pair_label_indices`])
pub fn extract_method_pair_label_indices(
    first: &MethodNode,
    second: &MethodNode,
) -> LabelIndexLookup {
    let mut lookup = LabelIndexLookup::from_entries(extract_method_label_indices(first));
    lookup.put_all(extract_method_label_indices(second));
    lookup
}

/// Labels still needed once line numbers are gone
///
/// These are the labels referenced by any instruction other than a line number, along with the
/// extra labels passed in.
pub fn collect_required_labels(
    instructions: &[Instruction],
    extra: impl IntoIterator<Item = Label>,
) -> HashSet<Label> {
    let mut required: HashSet<Label> = instructions
        .iter()
        .filter(|instruction| !instruction.is_line_number())
        .flat_map(Instruction::referenced_labels)
        .collect();
    required.extend(extra);
    required
}

/// Remove line numbers, along with the labels which are not in `required`
pub fn filter_line_numbers(
    instructions: &[Instruction],
    required: &HashSet<Label>,
) -> Vec<Instruction> {
    instructions
        .iter()
        .filter(|instruction| match instruction {
            Instruction::LineNumber { .. } => false,
            Instruction::Label(label) => required.contains(label),
            _ => true,
        })
        .cloned()
        .collect()
}

/// Remove line numbers from a bare instruction stream
pub fn filter_instruction_line_numbers(instructions: &[Instruction]) -> Vec<Instruction> {
    let required = collect_required_labels(instructions, std::iter::empty::<Label>());
    filter_line_numbers(instructions, &required)
}

/// Remove line numbers from a method body
///
/// Labels used by local variables, try/catch blocks, and local variable annotations are kept.
pub fn filter_method_line_numbers(method: &MethodNode) -> Vec<Instruction> {
    let required = collect_required_labels(&method.instructions, method.side_labels());
    filter_line_numbers(&method.instructions, &required)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::code::Opcode;
    use crate::jvm::model::{LocalVariableNode, TryCatchBlockNode};
    use crate::jvm::MethodAccessFlags;

    fn insn(opcode: Opcode) -> Instruction {
        Instruction::Insn { opcode }
    }

    #[test]
    fn single_stream_is_deterministic() {
        let (l0, l1, l2) = (Label::new(), Label::new(), Label::new());
        let stream = vec![
            Instruction::Label(l0),
            insn(Opcode::NOP),
            Instruction::Jump {
                opcode: Opcode::GOTO,
                label: l2,
            },
            Instruction::Label(l1),
            Instruction::Label(l2),
            insn(Opcode::RETURN),
        ];
        let first = extract_label_indices(&stream);
        assert_eq!(first, vec![(l0, 0), (l1, 1), (l2, 2)]);
        assert_eq!(first, extract_label_indices(&stream));
        assert!(extract_label_indices(&[insn(Opcode::RETURN)]).is_empty());
    }

    #[test]
    fn duplicate_definition_keeps_first_position() {
        let (l0, l1) = (Label::new(), Label::new());
        let stream = vec![
            Instruction::Label(l0),
            Instruction::Label(l0),
            Instruction::Label(l1),
        ];
        assert_eq!(extract_label_indices(&stream), vec![(l0, 0), (l1, 2)]);
    }

    #[test]
    fn first_stream_is_authoritative() {
        let (shared, a, b) = (Label::new(), Label::new(), Label::new());
        let first = vec![Instruction::Label(a), Instruction::Label(shared)];
        let second = vec![Instruction::Label(shared), Instruction::Label(b)];

        let lookup = extract_pair_label_indices(&first, &second);
        assert_eq!(lookup.find(&a), Some(0));
        assert_eq!(lookup.find(&shared), Some(1));
        assert_eq!(lookup.find(&b), Some(1));

        let reversed = extract_pair_label_indices(&second, &first);
        assert_eq!(reversed.find(&shared), Some(0));
    }

    #[test]
    fn method_side_labels_continue_numbering() {
        let (l0, l1, outside) = (Label::new(), Label::new(), Label::new());
        let mut method = MethodNode::new(MethodAccessFlags::STATIC, "run", "()V");
        method.instructions = vec![
            Instruction::Label(l0),
            insn(Opcode::RETURN),
            Instruction::Label(l1),
        ];
        method.local_variables.push(LocalVariableNode {
            name: String::from("x"),
            descriptor: String::from("I"),
            signature: None,
            start: l0,
            end: outside,
            index: 0,
        });
        method
            .try_catch_blocks
            .push(TryCatchBlockNode::new(l0, l1, outside, None));

        assert_eq!(
            extract_method_label_indices(&method),
            vec![(l0, 0), (l1, 1), (outside, 2)]
        );
    }

    #[test]
    fn line_number_filtering_keeps_jump_targets() {
        let (l0, l1, l2) = (Label::new(), Label::new(), Label::new());
        let stream = vec![
            Instruction::Label(l0),
            Instruction::LineNumber { line: 1, start: l0 },
            Instruction::Jump {
                opcode: Opcode::GOTO,
                label: l1,
            },
            Instruction::Label(l1),
            Instruction::LineNumber { line: 2, start: l1 },
            Instruction::Label(l2),
            Instruction::LineNumber { line: 3, start: l2 },
            insn(Opcode::RETURN),
        ];
        assert_eq!(
            filter_instruction_line_numbers(&stream),
            vec![
                Instruction::Jump {
                    opcode: Opcode::GOTO,
                    label: l1,
                },
                Instruction::Label(l1),
                insn(Opcode::RETURN),
            ]
        );
    }
}
