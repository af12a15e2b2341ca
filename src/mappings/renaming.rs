use std::fmt;

use indexmap::IndexMap;

use crate::error::MappingError;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::{is_valid_package_name, JavaType, ReferenceType};

type ClassTransformer = Box<dyn Fn(&ReferenceType) -> ReferenceType>;
type MethodRenamer = Box<dyn Fn(&MethodSymbol) -> String>;
type FieldRenamer = Box<dyn Fn(&FieldSymbol) -> String>;

/// Rename relation defined by pure functions instead of stored pairs.
///
/// Lookups compute their answers on the fly; the relation has no
/// enumerable content, cannot be inverted, and cannot be snapshotted.
/// Materialize it against concrete data with
/// [`Mappings::transform`](crate::Mappings::transform) or a chain step.
pub struct RenamingMappings {
    class_transformer: Option<ClassTransformer>,
    method_renamer: Option<MethodRenamer>,
    field_renamer: Option<FieldRenamer>,
}

impl RenamingMappings {
    /// Builds from up to three transformer functions; `None` means
    /// identity.
    pub fn new(
        class_transformer: Option<ClassTransformer>,
        method_renamer: Option<MethodRenamer>,
        field_renamer: Option<FieldRenamer>,
    ) -> RenamingMappings {
        RenamingMappings { class_transformer, method_renamer, field_renamer }
    }

    /// Moves every class whose package appears in `packages` to the
    /// corresponding new package; an empty string names the default
    /// package on either side.
    pub fn for_packages(
        packages: IndexMap<String, String>,
    ) -> Result<RenamingMappings, MappingError> {
        for package in packages.keys().chain(packages.values()) {
            if !is_valid_package_name(package) {
                return Err(MappingError::MalformedIdentifier { name: package.clone() });
            }
        }
        let transformer = move |class: &ReferenceType| {
            match packages.get(class.package_name()) {
                Some(new_package) => {
                    let simple = class.simple_name();
                    let renamed = if new_package.is_empty() {
                        simple.to_string()
                    } else {
                        format!("{new_package}.{simple}")
                    };
                    ReferenceType::from_validated(renamed)
                }
                None => class.clone(),
            }
        };
        Ok(RenamingMappings {
            class_transformer: Some(Box::new(transformer)),
            method_renamer: None,
            field_renamer: None,
        })
    }

    /// Image of a class under the transformer; identity when absent.
    pub fn resolve_class(&self, class: &ReferenceType) -> ReferenceType {
        match &self.class_transformer {
            Some(transformer) => transformer(class),
            None => class.clone(),
        }
    }

    /// Image of a plain class reference; primitives and arrays are
    /// rejected.
    pub fn get_new_class(&self, java_type: &JavaType) -> Result<JavaType, MappingError> {
        match java_type {
            JavaType::Reference(class) => Ok(JavaType::Reference(self.resolve_class(class))),
            other => Err(MappingError::NotAReferenceType { type_name: other.name() }),
        }
    }

    /// Image of any type, substituting classes structurally.
    pub fn get_new_type(&self, java_type: &JavaType) -> JavaType {
        java_type.map_class(|class| self.resolve_class(class))
    }

    /// Applies the class transformer to the symbol's types and the method
    /// renamer to its name. The renamer sees the original symbol; a
    /// renamer producing an invalid identifier fails.
    pub fn get_new_method(&self, original: &MethodSymbol) -> Result<MethodSymbol, MappingError> {
        let mapped = original.map_class(|class| self.resolve_class(class));
        match &self.method_renamer {
            Some(renamer) => mapped.with_name(renamer(original)),
            None => Ok(mapped),
        }
    }

    /// Field counterpart of [`get_new_method`](Self::get_new_method).
    pub fn get_new_field(&self, original: &FieldSymbol) -> Result<FieldSymbol, MappingError> {
        let mapped = original.map_class(|class| self.resolve_class(class));
        match &self.field_renamer {
            Some(renamer) => mapped.with_name(renamer(original)),
            None => Ok(mapped),
        }
    }
}

impl fmt::Debug for RenamingMappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenamingMappings")
            .field("class_transformer", &self.class_transformer.is_some())
            .field("method_renamer", &self.method_renamer.is_some())
            .field("field_renamer", &self.field_renamer.is_some())
            .finish()
    }
}
