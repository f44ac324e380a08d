use std::borrow::Cow;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// Names of classes and interfaces, in internal form (eg. `java/lang/String`)
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.1>
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BinaryName(Cow<'static, str>);

/// Extracts the raw underlying string name
impl AsRef<str> for BinaryName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

pub trait Name: Sized {
    /// Check if a string would be a valid name
    fn check_valid(name: impl AsRef<str>) -> Result<(), String>;

    /// Extract the raw underlying string data
    fn as_cow(&self) -> &Cow<'static, str>;

    /// Extract the raw underlying string name
    fn as_str(&self) -> &str {
        self.as_cow().as_ref()
    }

    /// Try to construct a name from a string
    fn from_string(name: String) -> Result<Self, String>;
}

impl Name for BinaryName {
    fn check_valid(name: impl AsRef<str>) -> Result<(), String> {
        let name = name.as_ref();
        if name.is_empty() {
            Err(format!("Binary name '{}' is empty", name))
        } else {
            name.split('/').map(check_unqualified_name).collect()
        }
    }

    fn as_cow(&self) -> &Cow<'static, str> {
        &self.0
    }

    fn from_string(name: String) -> Result<Self, String> {
        Self::check_valid(&name)?;
        Ok(BinaryName(Cow::Owned(name)))
    }
}

impl Debug for BinaryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0.as_ref())
    }
}

/// Displays the Java source form of the name (`java.lang.String`)
impl Display for BinaryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(&self.class_name())
    }
}

impl BinaryName {
    /// Java source form of the name, with `/` replaced by `.`
    pub fn class_name(&self) -> String {
        internal_to_class_name(self.as_str())
    }
}

/// Check a method, field, local variable name, or one segment of a class name
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.2>
fn check_unqualified_name(name: &str) -> Result<(), String> {
    if name.contains(&['.', ';', '[', '/'][..]) {
        Err(format!(
            "Unqualified name '{}' contains an illegal character",
            name
        ))
    } else if name.is_empty() {
        Err(format!("Unqualified name '{}' is empty", name))
    } else {
        Ok(())
    }
}

/// Is this the name of a constructor or a static initializer?
pub fn is_initializer(name: &str) -> bool {
    name == "<init>" || name == "<clinit>"
}

/// Convert an internal name (`java/lang/String`) into its Java source form (`java.lang.String`)
///
/// Works on any string since the node model stores names unvalidated.
pub fn internal_to_class_name(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn class_names() -> Result<(), String> {
        let string = BinaryName::from_string(String::from("java/lang/String"))?;
        assert_eq!(string.class_name(), "java.lang.String");
        assert_eq!(string.to_string(), "java.lang.String");
        assert_eq!(internal_to_class_name("Foo$Bar"), "Foo$Bar");
        Ok(())
    }

    #[test]
    fn validation() {
        assert!(BinaryName::from_string(String::from("a/b/C")).is_ok());
        assert!(BinaryName::from_string(String::from("a//C")).is_err());
        assert!(BinaryName::from_string(String::from("a/b.c/C")).is_err());
        assert!(BinaryName::from_string(String::new()).is_err());
        assert!(is_initializer("<clinit>"));
        assert!(!is_initializer("run"));
    }
}
