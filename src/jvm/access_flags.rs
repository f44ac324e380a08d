use bitflags::bitflags;

bitflags! {
    /// Access flags on classes
    ///
    /// `RECORD` and `DEPRECATED` are pseudo flags: they are not stored in the access flags of a
    /// class file but derived from the `Record` and `Deprecated` attributes.
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.1-200-E.1
    pub struct ClassAccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
        const RECORD = 0x10000;
        const DEPRECATED = 0x20000;
    }
}

bitflags! {
    /// Access flags on methods
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.6-200-A.1
    pub struct MethodAccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const DEPRECATED = 0x20000;
    }
}

bitflags! {
    /// Access flags on fields
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.5-200-A.1
    pub struct FieldAccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
        const DEPRECATED = 0x20000;
    }
}

bitflags! {
    /// Access flags on inner classes
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.7.6-300-D.1-D.1
    pub struct InnerClassAccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// Access flags on method parameters
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html#jvms-4.7.24
    pub struct ParameterAccessFlags: u32 {
        const FINAL = 0x0010;
        const SYNTHETIC = 0x1000;
        const MANDATED = 0x8000;
    }
}

/// The kind of declaration some access flags belong to
///
/// The same bit means different things on different declarations (`0x0020` is `super` on a class
/// but `synchronized` on a method), so flags can only be named once their kind is known.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum AccessKind {
    Class,
    InnerClass,
    Field,
    Method,
    Parameter,
    Module,
    ModuleRequires,
    ModuleExports,
    ModuleOpens,
}

const CLASS_KEYWORDS: &[(u32, &str)] = &[
    (0x0001, "public"),
    (0x0002, "private"),
    (0x0004, "protected"),
    (0x0010, "final"),
    (0x0020, "super"),
    (0x0200, "interface"),
    (0x0400, "abstract"),
    (0x1000, "synthetic"),
    (0x2000, "annotation"),
    (0x4000, "enum"),
    (0x8000, "module"),
    (0x10000, "record"),
    (0x20000, "deprecated"),
];

const INNER_CLASS_KEYWORDS: &[(u32, &str)] = &[
    (0x0001, "public"),
    (0x0002, "private"),
    (0x0004, "protected"),
    (0x0008, "static"),
    (0x0010, "final"),
    (0x0200, "interface"),
    (0x0400, "abstract"),
    (0x1000, "synthetic"),
    (0x2000, "annotation"),
    (0x4000, "enum"),
];

const FIELD_KEYWORDS: &[(u32, &str)] = &[
    (0x0001, "public"),
    (0x0002, "private"),
    (0x0004, "protected"),
    (0x0008, "static"),
    (0x0010, "final"),
    (0x0040, "volatile"),
    (0x0080, "transient"),
    (0x1000, "synthetic"),
    (0x4000, "enum"),
    (0x20000, "deprecated"),
];

const METHOD_KEYWORDS: &[(u32, &str)] = &[
    (0x0001, "public"),
    (0x0002, "private"),
    (0x0004, "protected"),
    (0x0008, "static"),
    (0x0010, "final"),
    (0x0020, "synchronized"),
    (0x0040, "bridge"),
    (0x0080, "varargs"),
    (0x0100, "native"),
    (0x0400, "abstract"),
    (0x0800, "strict"),
    (0x1000, "synthetic"),
    (0x20000, "deprecated"),
];

const PARAMETER_KEYWORDS: &[(u32, &str)] =
    &[(0x0010, "final"), (0x1000, "synthetic"), (0x8000, "mandated")];

const MODULE_KEYWORDS: &[(u32, &str)] =
    &[(0x0020, "open"), (0x1000, "synthetic"), (0x8000, "mandated")];

const MODULE_REQUIRES_KEYWORDS: &[(u32, &str)] = &[
    (0x0020, "transitive"),
    (0x0040, "static_phase"),
    (0x1000, "synthetic"),
    (0x8000, "mandated"),
];

const MODULE_EXPORTS_KEYWORDS: &[(u32, &str)] = &[(0x1000, "synthetic"), (0x8000, "mandated")];

impl AccessKind {
    /// Flag bits valid for this kind along with their keyword, sorted by bit
    pub fn keywords(&self) -> &'static [(u32, &'static str)] {
        match self {
            AccessKind::Class => CLASS_KEYWORDS,
            AccessKind::InnerClass => INNER_CLASS_KEYWORDS,
            AccessKind::Field => FIELD_KEYWORDS,
            AccessKind::Method => METHOD_KEYWORDS,
            AccessKind::Parameter => PARAMETER_KEYWORDS,
            AccessKind::Module => MODULE_KEYWORDS,
            AccessKind::ModuleRequires => MODULE_REQUIRES_KEYWORDS,
            AccessKind::ModuleExports | AccessKind::ModuleOpens => MODULE_EXPORTS_KEYWORDS,
        }
    }
}

/// Raw access flags paired with the kind of declaration they come from
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct AccessNode {
    pub access: u32,
    pub kind: AccessKind,
}

impl AccessNode {
    pub fn new(access: u32, kind: AccessKind) -> AccessNode {
        AccessNode { access, kind }
    }

    /// Keywords of all the set flags, in ascending bit order
    ///
    /// Bits which have no meaning for the kind are skipped.
    pub fn keywords(&self) -> Vec<&'static str> {
        self.kind
            .keywords()
            .iter()
            .filter(|(bit, _)| self.access & bit != 0)
            .map(|(_, keyword)| *keyword)
            .collect()
    }
}

impl From<ClassAccessFlags> for AccessNode {
    fn from(flags: ClassAccessFlags) -> AccessNode {
        AccessNode::new(flags.bits(), AccessKind::Class)
    }
}

impl From<InnerClassAccessFlags> for AccessNode {
    fn from(flags: InnerClassAccessFlags) -> AccessNode {
        AccessNode::new(flags.bits(), AccessKind::InnerClass)
    }
}

impl From<FieldAccessFlags> for AccessNode {
    fn from(flags: FieldAccessFlags) -> AccessNode {
        AccessNode::new(flags.bits(), AccessKind::Field)
    }
}

impl From<MethodAccessFlags> for AccessNode {
    fn from(flags: MethodAccessFlags) -> AccessNode {
        AccessNode::new(flags.bits(), AccessKind::Method)
    }
}

impl From<ParameterAccessFlags> for AccessNode {
    fn from(flags: ParameterAccessFlags) -> AccessNode {
        AccessNode::new(flags.bits(), AccessKind::Parameter)
    }
}

impl ClassAccessFlags {
    /// Keyword used to declare a class with these flags
    pub fn declaration_keyword(&self) -> &'static str {
        if self.contains(ClassAccessFlags::ENUM) {
            "enum"
        } else if self.contains(ClassAccessFlags::ANNOTATION) {
            "@interface"
        } else if self.contains(ClassAccessFlags::INTERFACE) {
            "interface"
        } else if self.contains(ClassAccessFlags::RECORD) {
            "record"
        } else if self.contains(ClassAccessFlags::MODULE) {
            "module"
        } else {
            "class"
        }
    }
}
