/// Configuration shared by the default comparators and renderers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Compare instruction streams as if they had no line numbers
    ///
    /// Labels which only mark line number positions are dropped as well, so that two methods
    /// compiled with and without debug information compare equal.
    pub ignore_line_numbers: bool,

    /// Leave out the `// opcode: N` suffix when rendering instructions
    pub hide_opcodes: bool,

    /// Render annotations by their type only (eg. `@java.lang.Deprecated`)
    pub hide_annotation_values: bool,

    /// How types are written out
    pub type_name_mode: TypeNameMode,
}

impl Settings {
    pub fn new() -> Settings {
        Settings {
            ignore_line_numbers: false,
            hide_opcodes: false,
            hide_annotation_values: false,
            type_name_mode: TypeNameMode::ClassName,
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::new()
    }
}

/// How types are written out
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeNameMode {
    /// Java source form (`java.lang.String`, `int[]`)
    ClassName,

    /// Internal form for classes (`java/lang/String`), descriptors otherwise
    InternalName,

    /// Descriptors (`Ljava/lang/String;`, `[I`)
    Descriptor,
}
