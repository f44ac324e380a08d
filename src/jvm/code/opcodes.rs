use std::fmt;

/// JVM opcode
///
/// See <https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-6.html>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode(pub u8);

const MNEMONICS: [&str; 202] = [
    "NOP", "ACONST_NULL", "ICONST_M1", "ICONST_0", "ICONST_1", "ICONST_2", "ICONST_3",
    "ICONST_4", "ICONST_5", "LCONST_0", "LCONST_1", "FCONST_0", "FCONST_1", "FCONST_2",
    "DCONST_0", "DCONST_1", "BIPUSH", "SIPUSH", "LDC", "LDC_W", "LDC2_W", "ILOAD", "LLOAD",
    "FLOAD", "DLOAD", "ALOAD", "ILOAD_0", "ILOAD_1", "ILOAD_2", "ILOAD_3", "LLOAD_0", "LLOAD_1",
    "LLOAD_2", "LLOAD_3", "FLOAD_0", "FLOAD_1", "FLOAD_2", "FLOAD_3", "DLOAD_0", "DLOAD_1",
    "DLOAD_2", "DLOAD_3", "ALOAD_0", "ALOAD_1", "ALOAD_2", "ALOAD_3", "IALOAD", "LALOAD",
    "FALOAD", "DALOAD", "AALOAD", "BALOAD", "CALOAD", "SALOAD", "ISTORE", "LSTORE", "FSTORE",
    "DSTORE", "ASTORE", "ISTORE_0", "ISTORE_1", "ISTORE_2", "ISTORE_3", "LSTORE_0", "LSTORE_1",
    "LSTORE_2", "LSTORE_3", "FSTORE_0", "FSTORE_1", "FSTORE_2", "FSTORE_3", "DSTORE_0",
    "DSTORE_1", "DSTORE_2", "DSTORE_3", "ASTORE_0", "ASTORE_1", "ASTORE_2", "ASTORE_3",
    "IASTORE", "LASTORE", "FASTORE", "DASTORE", "AASTORE", "BASTORE", "CASTORE", "SASTORE",
    "POP", "POP2", "DUP", "DUP_X1", "DUP_X2", "DUP2", "DUP2_X1", "DUP2_X2", "SWAP", "IADD",
    "LADD", "FADD", "DADD", "ISUB", "LSUB", "FSUB", "DSUB", "IMUL", "LMUL", "FMUL", "DMUL",
    "IDIV", "LDIV", "FDIV", "DDIV", "IREM", "LREM", "FREM", "DREM", "INEG", "LNEG", "FNEG",
    "DNEG", "ISHL", "LSHL", "ISHR", "LSHR", "IUSHR", "LUSHR", "IAND", "LAND", "IOR", "LOR",
    "IXOR", "LXOR", "IINC", "I2L", "I2F", "I2D", "L2I", "L2F", "L2D", "F2I", "F2L", "F2D", "D2I",
    "D2L", "D2F", "I2B", "I2C", "I2S", "LCMP", "FCMPL", "FCMPG", "DCMPL", "DCMPG", "IFEQ", "IFNE",
    "IFLT", "IFGE", "IFGT", "IFLE", "IF_ICMPEQ", "IF_ICMPNE", "IF_ICMPLT", "IF_ICMPGE",
    "IF_ICMPGT", "IF_ICMPLE", "IF_ACMPEQ", "IF_ACMPNE", "GOTO", "JSR", "RET", "TABLESWITCH",
    "LOOKUPSWITCH", "IRETURN", "LRETURN", "FRETURN", "DRETURN", "ARETURN", "RETURN",
    "GETSTATIC", "PUTSTATIC", "GETFIELD", "PUTFIELD", "INVOKEVIRTUAL", "INVOKESPECIAL",
    "INVOKESTATIC", "INVOKEINTERFACE", "INVOKEDYNAMIC", "NEW", "NEWARRAY", "ANEWARRAY",
    "ARRAYLENGTH", "ATHROW", "CHECKCAST", "INSTANCEOF", "MONITORENTER", "MONITOREXIT", "WIDE",
    "MULTIANEWARRAY", "IFNULL", "IFNONNULL", "GOTO_W", "JSR_W",
];

/// Names of the primitive array types accepted by `NEWARRAY`, indexed by operand
const NEWARRAY_TYPES: [&str; 12] = [
    "", "", "", "", "T_BOOLEAN", "T_CHAR", "T_FLOAT", "T_DOUBLE", "T_BYTE", "T_SHORT", "T_INT",
    "T_LONG",
];

impl Opcode {
    pub const NOP: Opcode = Opcode(0);
    pub const ACONST_NULL: Opcode = Opcode(1);
    pub const ICONST_0: Opcode = Opcode(3);
    pub const ICONST_1: Opcode = Opcode(4);
    pub const BIPUSH: Opcode = Opcode(16);
    pub const SIPUSH: Opcode = Opcode(17);
    pub const LDC: Opcode = Opcode(18);
    pub const ILOAD: Opcode = Opcode(21);
    pub const LLOAD: Opcode = Opcode(22);
    pub const FLOAD: Opcode = Opcode(23);
    pub const DLOAD: Opcode = Opcode(24);
    pub const ALOAD: Opcode = Opcode(25);
    pub const ISTORE: Opcode = Opcode(54);
    pub const LSTORE: Opcode = Opcode(55);
    pub const FSTORE: Opcode = Opcode(56);
    pub const DSTORE: Opcode = Opcode(57);
    pub const ASTORE: Opcode = Opcode(58);
    pub const POP: Opcode = Opcode(87);
    pub const DUP: Opcode = Opcode(89);
    pub const IADD: Opcode = Opcode(96);
    pub const ISUB: Opcode = Opcode(100);
    pub const IMUL: Opcode = Opcode(104);
    pub const IINC: Opcode = Opcode(132);
    pub const IFEQ: Opcode = Opcode(153);
    pub const IFNE: Opcode = Opcode(154);
    pub const IF_ICMPGE: Opcode = Opcode(162);
    pub const GOTO: Opcode = Opcode(167);
    pub const RET: Opcode = Opcode(169);
    pub const TABLESWITCH: Opcode = Opcode(170);
    pub const LOOKUPSWITCH: Opcode = Opcode(171);
    pub const IRETURN: Opcode = Opcode(172);
    pub const ARETURN: Opcode = Opcode(176);
    pub const RETURN: Opcode = Opcode(177);
    pub const GETSTATIC: Opcode = Opcode(178);
    pub const PUTSTATIC: Opcode = Opcode(179);
    pub const GETFIELD: Opcode = Opcode(180);
    pub const PUTFIELD: Opcode = Opcode(181);
    pub const INVOKEVIRTUAL: Opcode = Opcode(182);
    pub const INVOKESPECIAL: Opcode = Opcode(183);
    pub const INVOKESTATIC: Opcode = Opcode(184);
    pub const INVOKEINTERFACE: Opcode = Opcode(185);
    pub const INVOKEDYNAMIC: Opcode = Opcode(186);
    pub const NEW: Opcode = Opcode(187);
    pub const NEWARRAY: Opcode = Opcode(188);
    pub const ANEWARRAY: Opcode = Opcode(189);
    pub const ATHROW: Opcode = Opcode(191);
    pub const CHECKCAST: Opcode = Opcode(192);
    pub const INSTANCEOF: Opcode = Opcode(193);
    pub const MULTIANEWARRAY: Opcode = Opcode(197);
    pub const IFNULL: Opcode = Opcode(198);
    pub const IFNONNULL: Opcode = Opcode(199);

    /// Upper case mnemonic (eg. `INVOKEVIRTUAL`)
    ///
    /// Bytes outside the JVM instruction set render as `UNKNOWN_<byte>`.
    pub fn mnemonic(&self) -> String {
        match MNEMONICS.get(self.0 as usize) {
            Some(mnemonic) => String::from(*mnemonic),
            None => format!("UNKNOWN_{}", self.0),
        }
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic())
    }
}

/// Name of the primitive array type for a `NEWARRAY` operand (eg. `T_INT`)
pub fn newarray_type_name(operand: i32) -> Option<&'static str> {
    usize::try_from(operand)
        .ok()
        .and_then(|idx| NEWARRAY_TYPES.get(idx))
        .copied()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!(Opcode::NOP.mnemonic(), "NOP");
        assert_eq!(Opcode::BIPUSH.mnemonic(), "BIPUSH");
        assert_eq!(Opcode::IINC.mnemonic(), "IINC");
        assert_eq!(Opcode::IFEQ.mnemonic(), "IFEQ");
        assert_eq!(Opcode::TABLESWITCH.mnemonic(), "TABLESWITCH");
        assert_eq!(Opcode::ARETURN.mnemonic(), "ARETURN");
        assert_eq!(Opcode::RETURN.mnemonic(), "RETURN");
        assert_eq!(Opcode::INVOKEDYNAMIC.mnemonic(), "INVOKEDYNAMIC");
        assert_eq!(Opcode::MULTIANEWARRAY.mnemonic(), "MULTIANEWARRAY");
        assert_eq!(Opcode::IFNONNULL.mnemonic(), "IFNONNULL");
        assert_eq!(Opcode(201).mnemonic(), "JSR_W");
        assert_eq!(Opcode(230).mnemonic(), "UNKNOWN_230");
    }

    #[test]
    fn newarray_types() {
        assert_eq!(newarray_type_name(10), Some("T_INT"));
        assert_eq!(newarray_type_name(4), Some("T_BOOLEAN"));
        assert_eq!(newarray_type_name(2), None);
        assert_eq!(newarray_type_name(-1), None);
    }
}
