use super::{compare_positional, StructuralComparator};
use crate::jvm::model::{Attribute, TypePath, TypeReference};
use crate::jvm::AccessNode;
use crate::representation::{Renderer, TypeRenderer};
use crate::TypeNameMode;
use std::cmp::Ordering;

/// Compares types by their Java source name
///
/// Ties (eg. `I` as an internal class name against `I` as a descriptor) are broken on the raw text,
/// so types are only equal when they are written identically.
#[derive(Clone, Debug)]
pub struct TypeComparator {
    renderer: TypeRenderer,
}

impl TypeComparator {
    pub fn new() -> TypeComparator {
        TypeComparator {
            renderer: TypeRenderer::new(TypeNameMode::ClassName),
        }
    }

    /// Compare field or method descriptors
    pub fn compare_descriptors(&self, first: &str, second: &str) -> Ordering {
        self.renderer
            .render_descriptor(first)
            .cmp(&self.renderer.render_descriptor(second))
            .then_with(|| first.cmp(second))
    }

    /// Compare internal class names
    pub fn compare_internal_names(&self, first: &str, second: &str) -> Ordering {
        self.renderer
            .render_internal_name(first)
            .cmp(&self.renderer.render_internal_name(second))
            .then_with(|| first.cmp(second))
    }

    /// Compare possibly absent internal class names
    pub fn compare_optional_internal_names(
        &self,
        first: Option<&String>,
        second: Option<&String>,
    ) -> Ordering {
        super::compare_nulls_first(first, second, |first, second| {
            self.compare_internal_names(first, second)
        })
    }

    /// Compare unordered lists of internal class names
    pub fn compare_internal_name_sets(&self, first: &[String], second: &[String]) -> Ordering {
        super::compare_unordered(first, second, |first, second| {
            self.compare_internal_names(first, second)
        })
    }
}

impl Default for TypeComparator {
    fn default() -> TypeComparator {
        TypeComparator::new()
    }
}

impl StructuralComparator<str> for TypeComparator {
    fn compare(&self, first: &str, second: &str) -> Ordering {
        self.renderer
            .render(first)
            .cmp(&self.renderer.render(second))
            .then_with(|| first.cmp(second))
    }
}

/// Compares access flags numerically
#[derive(Copy, Clone, Debug, Default)]
pub struct AccessComparator;

impl StructuralComparator<AccessNode> for AccessComparator {
    fn compare(&self, first: &AccessNode, second: &AccessNode) -> Ordering {
        first.access.cmp(&second.access)
    }
}

impl AccessComparator {
    /// Compare flags of the same kind
    pub fn compare_flags(
        &self,
        first: impl Into<AccessNode>,
        second: impl Into<AccessNode>,
    ) -> Ordering {
        self.compare(&first.into(), &second.into())
    }
}

/// Compares type paths by their canonical text
#[derive(Copy, Clone, Debug, Default)]
pub struct TypePathComparator;

impl StructuralComparator<TypePath> for TypePathComparator {
    fn compare(&self, first: &TypePath, second: &TypePath) -> Ordering {
        first.to_string().cmp(&second.to_string())
    }
}

/// Compares type references numerically
#[derive(Copy, Clone, Debug, Default)]
pub struct TypeReferenceComparator;

impl StructuralComparator<TypeReference> for TypeReferenceComparator {
    fn compare(&self, first: &TypeReference, second: &TypeReference) -> Ordering {
        first.0.cmp(&second.0)
    }
}

/// Compares attributes by name, then content
#[derive(Copy, Clone, Debug, Default)]
pub struct AttributeComparator;

impl StructuralComparator<Attribute> for AttributeComparator {
    fn compare(&self, first: &Attribute, second: &Attribute) -> Ordering {
        first.name.cmp(&second.name).then_with(|| {
            compare_positional(&first.content, &second.content, |a, b| a.cmp(b))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::model::TypePathStep;
    use crate::jvm::{MethodAccessFlags, ParameterAccessFlags};

    #[test]
    fn types_compare_by_java_name() {
        let cmp = TypeComparator::new();
        assert_eq!(
            cmp.compare_descriptors("Ljava/lang/String;", "Ljava/lang/String;"),
            Ordering::Equal
        );
        assert_eq!(cmp.compare_descriptors("I", "J"), Ordering::Less);
        assert_eq!(
            cmp.compare_internal_names("java/lang/Object", "java/lang/Integer"),
            Ordering::Greater
        );
        assert_eq!(
            cmp.compare_internal_name_sets(
                &[String::from("a/B"), String::from("a/A")],
                &[String::from("a/A"), String::from("a/B")]
            ),
            Ordering::Equal
        );
        assert_eq!(cmp.compare_optional(None, Some("I")), Ordering::Less);
    }

    #[test]
    fn access_compares_numerically() {
        let cmp = AccessComparator;
        assert_eq!(
            cmp.compare_flags(MethodAccessFlags::PUBLIC, MethodAccessFlags::PRIVATE),
            Ordering::Less
        );
        assert_eq!(
            cmp.compare_flags(ParameterAccessFlags::FINAL, ParameterAccessFlags::FINAL),
            Ordering::Equal
        );
    }

    #[test]
    fn attributes_and_paths() {
        let cmp = AttributeComparator;
        let first = Attribute::new("Foo", vec![1, 2]);
        let second = Attribute::new("Foo", vec![1, 3]);
        assert_eq!(cmp.compare(&first, &second), Ordering::Less);
        assert_eq!(cmp.compare(&first, &first.clone()), Ordering::Equal);

        let path = TypePath(vec![TypePathStep::ArrayElement]);
        assert_eq!(
            TypePathComparator.compare_optional(Some(&path), None),
            Ordering::Greater
        );
    }
}
