use bytecode_testkit::jvm::code::{Instruction, Label, Opcode};
use bytecode_testkit::jvm::model::{
    AnnotationNode, AnnotationValue, ClassNode, FieldNode, LocalVariableNode, MethodNode,
    TryCatchBlockNode,
};
use bytecode_testkit::jvm::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use bytecode_testkit::labels::LabelIndexLookup;
use bytecode_testkit::representation::{
    DefaultRepresentations, IndexAwareRenderer, InstructionListRenderer, InstructionRenderer,
    Representations, TryCatchBlockNodeRenderer,
};
use bytecode_testkit::{NodeRef, Settings, TypeNameMode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn quiet() -> DefaultRepresentations {
    DefaultRepresentations::with_settings(&Settings {
        hide_opcodes: true,
        ..Settings::new()
    })
}

/// `static int parse(String text)` which returns `0` when `Integer.parseInt` throws
fn parse_method() -> MethodNode {
    let (start, end, handler, last) = (Label::new(), Label::new(), Label::new(), Label::new());
    let mut method = MethodNode::new(
        MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
        "parse",
        "(Ljava/lang/String;)I",
    );
    method.instructions = vec![
        Instruction::Label(start),
        Instruction::LineNumber { line: 3, start },
        Instruction::Var {
            opcode: Opcode::ALOAD,
            var: 0,
        },
        Instruction::Method {
            opcode: Opcode::INVOKESTATIC,
            owner: String::from("java/lang/Integer"),
            name: String::from("parseInt"),
            descriptor: String::from("(Ljava/lang/String;)I"),
            is_interface: false,
        },
        Instruction::Label(end),
        Instruction::Insn {
            opcode: Opcode::IRETURN,
        },
        Instruction::Label(handler),
        Instruction::Var {
            opcode: Opcode::ASTORE,
            var: 1,
        },
        Instruction::Insn {
            opcode: Opcode::ICONST_0,
        },
        Instruction::Insn {
            opcode: Opcode::IRETURN,
        },
        Instruction::Label(last),
    ];
    method.try_catch_blocks.push(TryCatchBlockNode::new(
        start,
        end,
        handler,
        Some(String::from("java/lang/NumberFormatException")),
    ));
    method.local_variables.push(LocalVariableNode {
        name: String::from("text"),
        descriptor: String::from("Ljava/lang/String;"),
        signature: None,
        start,
        end: last,
        index: 0,
    });
    method.max_locals = 2;
    method.max_stack = 1;
    method
}

const PARSE_METHOD: &str = "\
(9) public static int parse(java.lang.String text)
    L0
      LINENUMBER 3 L0
      ALOAD 0
      INVOKESTATIC java/lang/Integer.parseInt (Ljava/lang/String;)I
    L1
      IRETURN
    L2
      ASTORE 1
      ICONST_0
      IRETURN
    L3
  // Local variable: #0 java.lang.String text // range: L0-L3
  // Try catch block: java.lang.NumberFormatException // range: L0-L1; handled in: L2
  // Max locals: 2
  // Max stack: 1";

#[test]
fn labels_follow_the_lookup() {
    init_logging();
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
        renderer.render_with_labels(&instructions[..], &mut labels),
        "L0\n  RETURN"
    );
    assert_eq!(
        renderer.render_with_labels(&instructions[..], &mut LabelIndexLookup::new()),
        format!("L{}\n  RETURN", label.identity_hash())
    );
}

#[test]
fn opcodes_are_shown_by_default() {
    init_logging();
    let instruction = Instruction::Int {
        opcode: Opcode::BIPUSH,
        operand: 6,
    };
    let representations = DefaultRepresentations::shared();
    assert_eq!(
        representations.render(Some(NodeRef::from(&instruction))),
        "BIPUSH 6 // opcode: 16"
    );
    assert_eq!(
        representations.render_simplified(Some(NodeRef::from(&instruction))),
        "BIPUSH 6"
    );
}

#[test]
fn method_layout() {
    init_logging();
    let method = parse_method();
    let representations = quiet();
    assert_eq!(representations.render(Some(NodeRef::from(&method))), PARSE_METHOD);
    assert_eq!(
        representations.render_simplified(Some(NodeRef::from(&method))),
        "parse(Ljava/lang/String;)I"
    );

    let mut labels = LabelIndexLookup::new();
    assert_eq!(
        representations.render_with_labels(Some(NodeRef::from(&method)), &mut labels),
        PARSE_METHOD
    );
    assert_eq!(labels.len(), 4);
}

#[test]
fn try_catch_blocks_need_their_method() {
    init_logging();
    let method = parse_method();
    let block = &method.try_catch_blocks[0];
    let alone = quiet().render(Some(NodeRef::from(block)));
    assert_eq!(
        alone,
        format!(
            "java.lang.NumberFormatException // range: L{}-L{}; handled in: L{}",
            block.start.identity_hash(),
            block.end.identity_hash(),
            block.handler.identity_hash()
        )
    );

    let mut labels = LabelIndexLookup::from_entries(vec![
        (block.start, 0),
        (block.end, 1),
        (block.handler, 2),
    ]);
    assert_eq!(
        TryCatchBlockNodeRenderer::default().render_with_labels(block, &mut labels),
        "java.lang.NumberFormatException // range: L0-L1; handled in: L2"
    );
}

#[test]
fn class_layout() {
    init_logging();
    let mut class = ClassNode::new(
        52,
        ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
        "com/example/Numbers",
    );
    class.source_file = Some(String::from("Numbers.java"));
    class.visible_annotations.push(
        AnnotationNode::new("Lcom/example/Generated;")
            .with_value("value", AnnotationValue::String(String::from("gen"))),
    );
    let mut field = FieldNode::new(
        FieldAccessFlags::PUBLIC | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL,
        "LIMIT",
        "I",
    );
    field.value = Some(bytecode_testkit::jvm::code::Constant::Integer(10));
    class.fields.push(field);
    class.methods.push(parse_method());

    let expected = format!(
        "\
// Class version: 52
@com.example.Generated(value=\"gen\")
(33) public super class com.example.Numbers extends java.lang.Object

    (25) public static final int LIMIT = 10

{}

  // Source file: Numbers.java",
        PARSE_METHOD
            .lines()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    );
    let representations = quiet();
    assert_eq!(representations.render(Some(NodeRef::from(&class))), expected);
    assert_eq!(
        representations.render_simplified(Some(NodeRef::from(&class))),
        "class com.example.Numbers"
    );
}

#[test]
fn settings_reach_every_renderer() {
    init_logging();
    let representations = DefaultRepresentations::with_settings(&Settings {
        hide_opcodes: true,
        hide_annotation_values: true,
        type_name_mode: TypeNameMode::InternalName,
        ..Settings::new()
    });
    let mut field = FieldNode::new(FieldAccessFlags::PRIVATE, "name", "Ljava/lang/String;");
    field.visible_annotations.push(
        AnnotationNode::new("Lcom/example/Size;").with_value("max", AnnotationValue::Int(8)),
    );
    assert_eq!(
        representations.render(Some(NodeRef::from(&field))),
        "@com/example/Size\n(2) private java/lang/String name"
    );
    assert_eq!(representations.render(None), "null");
    assert_eq!(representations.render(Some(NodeRef::Type("[I"))), "[I");
}
