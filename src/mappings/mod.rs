//! The three representations of a rename relation and the operations
//! shared between them.

mod bimap;
mod chain;
mod immutable;
mod mutable;
mod renaming;

pub use chain::chain;
pub use immutable::ImmutableMappings;
pub use mutable::MutableMappings;
pub use renaming::RenamingMappings;

use std::fmt;

use crate::error::MappingError;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::{JavaType, ReferenceType};

pub(crate) fn inconsistent(
    original: &impl fmt::Display,
    renamed: &impl fmt::Display,
) -> MappingError {
    MappingError::InconsistentRename {
        original: original.to_string(),
        renamed: renamed.to_string(),
    }
}

/// A rename relation in one of three representations.
///
/// The materialized kinds store their pairs; the renaming kind computes
/// them and therefore refuses [`invert`](Mappings::invert) and
/// [`snapshot`](Mappings::snapshot).
#[derive(Debug)]
pub enum Mappings {
    /// Materialized, shareable snapshot with a cached inverse.
    Immutable(ImmutableMappings),
    /// Materialized and editable, with a live inverted view.
    Mutable(MutableMappings),
    /// Defined by functions; no stored pairs.
    Renaming(RenamingMappings),
}

impl Mappings {
    /// The shared empty mapping.
    pub fn empty() -> Mappings {
        Mappings::Immutable(ImmutableMappings::empty())
    }

    /// Renamed counterpart of a class; unmapped classes resolve to
    /// themselves.
    pub fn resolve_class(&self, class: &ReferenceType) -> ReferenceType {
        match self {
            Mappings::Immutable(mappings) => mappings.resolve_class(class),
            Mappings::Mutable(mappings) => mappings.resolve_class(class),
            Mappings::Renaming(mappings) => mappings.resolve_class(class),
        }
    }

    /// Renamed counterpart of a plain class reference; primitives and
    /// arrays are rejected.
    pub fn get_new_class(&self, java_type: &JavaType) -> Result<JavaType, MappingError> {
        match self {
            Mappings::Immutable(mappings) => mappings.get_new_class(java_type),
            Mappings::Mutable(mappings) => mappings.get_new_class(java_type),
            Mappings::Renaming(mappings) => mappings.get_new_class(java_type),
        }
    }

    /// Renamed counterpart of any type, substituting classes structurally.
    pub fn get_new_type(&self, java_type: &JavaType) -> JavaType {
        match self {
            Mappings::Immutable(mappings) => mappings.get_new_type(java_type),
            Mappings::Mutable(mappings) => mappings.get_new_type(java_type),
            Mappings::Renaming(mappings) => mappings.get_new_type(java_type),
        }
    }

    /// Renamed counterpart of a method. Falls back to a same-name symbol
    /// with substituted types; only a renaming function producing an
    /// invalid identifier can fail.
    pub fn get_new_method(&self, original: &MethodSymbol) -> Result<MethodSymbol, MappingError> {
        match self {
            Mappings::Immutable(mappings) => Ok(mappings.get_new_method(original)),
            Mappings::Mutable(mappings) => Ok(mappings.get_new_method(original)),
            Mappings::Renaming(mappings) => mappings.get_new_method(original),
        }
    }

    /// Renamed counterpart of a field, with the same fallback as
    /// [`get_new_method`](Mappings::get_new_method).
    pub fn get_new_field(&self, original: &FieldSymbol) -> Result<FieldSymbol, MappingError> {
        match self {
            Mappings::Immutable(mappings) => Ok(mappings.get_new_field(original)),
            Mappings::Mutable(mappings) => Ok(mappings.get_new_field(original)),
            Mappings::Renaming(mappings) => mappings.get_new_field(original),
        }
    }

    /// True when the class has an explicit entry. Always false for the
    /// renaming kind, which stores nothing.
    pub fn contains_class(&self, class: &ReferenceType) -> bool {
        match self {
            Mappings::Immutable(mappings) => mappings.contains_class(class),
            Mappings::Mutable(mappings) => mappings.contains_class(class),
            Mappings::Renaming(_) => false,
        }
    }

    pub fn contains_method(&self, method: &MethodSymbol) -> bool {
        match self {
            Mappings::Immutable(mappings) => mappings.contains_method(method),
            Mappings::Mutable(mappings) => mappings.contains_method(method),
            Mappings::Renaming(_) => false,
        }
    }

    pub fn contains_field(&self, field: &FieldSymbol) -> bool {
        match self {
            Mappings::Immutable(mappings) => mappings.contains_field(field),
            Mappings::Mutable(mappings) => mappings.contains_field(field),
            Mappings::Renaming(_) => false,
        }
    }

    /// Ordered (original, renamed) class pairs; empty for the renaming
    /// kind.
    pub fn classes(&self) -> Vec<(ReferenceType, ReferenceType)> {
        match self {
            Mappings::Immutable(mappings) => {
                mappings.classes().map(|(a, b)| (a.clone(), b.clone())).collect()
            }
            Mappings::Mutable(mappings) => mappings.classes(),
            Mappings::Renaming(_) => Vec::new(),
        }
    }

    /// Ordered (original, renamed) method pairs; empty for the renaming
    /// kind.
    pub fn methods(&self) -> Vec<(MethodSymbol, MethodSymbol)> {
        match self {
            Mappings::Immutable(mappings) => {
                mappings.methods().map(|(a, b)| (a.clone(), b.clone())).collect()
            }
            Mappings::Mutable(mappings) => mappings.methods(),
            Mappings::Renaming(_) => Vec::new(),
        }
    }

    /// Ordered (original, renamed) field pairs; empty for the renaming
    /// kind.
    pub fn fields(&self) -> Vec<(FieldSymbol, FieldSymbol)> {
        match self {
            Mappings::Immutable(mappings) => {
                mappings.fields().map(|(a, b)| (a.clone(), b.clone())).collect()
            }
            Mappings::Mutable(mappings) => mappings.fields(),
            Mappings::Renaming(_) => Vec::new(),
        }
    }

    /// The inverse relation: cached for the immutable kind, a live view
    /// for the mutable kind, refused for the renaming kind.
    pub fn invert(&self) -> Result<Mappings, MappingError> {
        match self {
            Mappings::Immutable(mappings) => Ok(Mappings::Immutable(mappings.invert())),
            Mappings::Mutable(mappings) => Ok(Mappings::Mutable(mappings.invert())),
            Mappings::Renaming(_) => {
                Err(MappingError::UnsupportedForFunctionalMapping { operation: "invert" })
            }
        }
    }

    /// Immutable copy of the current state; refused for the renaming
    /// kind, which has no state to copy.
    pub fn snapshot(&self) -> Result<ImmutableMappings, MappingError> {
        match self {
            Mappings::Immutable(mappings) => Ok(mappings.snapshot()),
            Mappings::Mutable(mappings) => mappings.snapshot(),
            Mappings::Renaming(_) => {
                Err(MappingError::UnsupportedForFunctionalMapping { operation: "snapshot" })
            }
        }
    }

    /// Materializes this relation over the outputs of `input`: every
    /// renamed value of `input` is keyed to its image under `self`. This
    /// is how a renaming mapping becomes concrete data.
    pub fn transform(&self, input: &Mappings) -> Result<ImmutableMappings, MappingError> {
        let mut classes = Vec::new();
        for (_, renamed) in input.classes() {
            let new = self.resolve_class(&renamed);
            classes.push((renamed, new));
        }
        let mut methods = Vec::new();
        for (_, renamed) in input.methods() {
            let new = self.get_new_method(&renamed)?;
            methods.push((renamed, new));
        }
        let mut fields = Vec::new();
        for (_, renamed) in input.fields() {
            let new = self.get_new_field(&renamed)?;
            fields.push((renamed, new));
        }
        ImmutableMappings::new(classes, methods, fields)
    }
}

impl From<ImmutableMappings> for Mappings {
    fn from(mappings: ImmutableMappings) -> Mappings {
        Mappings::Immutable(mappings)
    }
}

impl From<MutableMappings> for Mappings {
    fn from(mappings: MutableMappings) -> Mappings {
        Mappings::Mutable(mappings)
    }
}

impl From<RenamingMappings> for Mappings {
    fn from(mappings: RenamingMappings) -> Mappings {
        Mappings::Renaming(mappings)
    }
}

impl PartialEq for Mappings {
    /// Materialized kinds compare by content; a renaming operand never
    /// compares equal.
    fn eq(&self, other: &Mappings) -> bool {
        match (self.snapshot(), other.snapshot()) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}
