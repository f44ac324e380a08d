/// Attribute not otherwise modelled (eg. a vendor specific attribute)
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Attribute {
    /// Attribute name, as found in the constant pool
    pub name: String,

    /// Raw attribute bytes, without the name and length header
    pub content: Vec<u8>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Attribute {
        Attribute {
            name: name.into(),
            content,
        }
    }
}
