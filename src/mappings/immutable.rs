use std::sync::{Arc, Mutex, MutexGuard, Weak};

use once_cell::sync::Lazy;

use crate::error::MappingError;
use crate::mappings::bimap::BiMap;
use crate::mappings::inconsistent;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::{JavaType, ReferenceType};

static EMPTY: Lazy<ImmutableMappings> =
    Lazy::new(|| ImmutableMappings::from_parts(BiMap::new(), BiMap::new(), BiMap::new()));

/// Immutable snapshot of a rename relation. Cloning is cheap and shares
/// storage; instances can cross threads freely.
#[derive(Debug, Clone)]
pub struct ImmutableMappings {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    classes: BiMap<ReferenceType>,
    methods: BiMap<MethodSymbol>,
    fields: BiMap<FieldSymbol>,
    /// Cache slot for the inverted twin, filled on first use.
    inverse: Mutex<Weak<Inner>>,
}

fn lock_slot(slot: &Mutex<Weak<Inner>>) -> MutexGuard<'_, Weak<Inner>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ImmutableMappings {
    /// The shared empty mapping.
    pub fn empty() -> ImmutableMappings {
        EMPTY.clone()
    }

    pub(crate) fn from_parts(
        classes: BiMap<ReferenceType>,
        methods: BiMap<MethodSymbol>,
        fields: BiMap<FieldSymbol>,
    ) -> ImmutableMappings {
        ImmutableMappings {
            inner: Arc::new(Inner { classes, methods, fields, inverse: Mutex::new(Weak::new()) }),
        }
    }

    /// Builds a snapshot from explicit pairs, validating that every member
    /// pair agrees with the class relation about types.
    pub fn new<C, M, F>(classes: C, methods: M, fields: F) -> Result<ImmutableMappings, MappingError>
    where
        C: IntoIterator<Item = (ReferenceType, ReferenceType)>,
        M: IntoIterator<Item = (MethodSymbol, MethodSymbol)>,
        F: IntoIterator<Item = (FieldSymbol, FieldSymbol)>,
    {
        let mut class_map = BiMap::new();
        for (original, renamed) in classes {
            class_map.insert(original, renamed);
        }
        let mut method_map = BiMap::new();
        for (original, renamed) in methods {
            let expected = original.map_class(|class| resolve_in(&class_map, class));
            if !expected.has_same_types(&renamed) {
                return Err(inconsistent(&original, &renamed));
            }
            method_map.insert(original, renamed);
        }
        let mut field_map = BiMap::new();
        for (original, renamed) in fields {
            let expected = original.map_class(|class| resolve_in(&class_map, class));
            if !expected.has_same_types(&renamed) {
                return Err(inconsistent(&original, &renamed));
            }
            field_map.insert(original, renamed);
        }
        Ok(ImmutableMappings::from_parts(class_map, method_map, field_map))
    }

    /// Builds a snapshot from a class table plus member *name* tables. The
    /// renamed member symbols are synthesized by substituting the class
    /// table, so the result is consistent by construction.
    pub fn from_renames<C, M, F>(
        classes: C,
        method_names: M,
        field_names: F,
    ) -> Result<ImmutableMappings, MappingError>
    where
        C: IntoIterator<Item = (ReferenceType, ReferenceType)>,
        M: IntoIterator<Item = (MethodSymbol, String)>,
        F: IntoIterator<Item = (FieldSymbol, String)>,
    {
        let mut class_map = BiMap::new();
        for (original, renamed) in classes {
            class_map.insert(original, renamed);
        }
        let mut method_map = BiMap::new();
        for (original, new_name) in method_names {
            let renamed = original
                .map_class(|class| resolve_in(&class_map, class))
                .with_name(new_name)?;
            method_map.insert(original, renamed);
        }
        let mut field_map = BiMap::new();
        for (original, new_name) in field_names {
            let renamed = original
                .map_class(|class| resolve_in(&class_map, class))
                .with_name(new_name)?;
            field_map.insert(original, renamed);
        }
        Ok(ImmutableMappings::from_parts(class_map, method_map, field_map))
    }

    /// Renamed counterpart of a class; unmapped classes resolve to
    /// themselves.
    pub fn resolve_class(&self, class: &ReferenceType) -> ReferenceType {
        resolve_in(&self.inner.classes, class)
    }

    /// Renamed counterpart of a plain class reference; primitives and
    /// arrays are rejected.
    pub fn get_new_class(&self, java_type: &JavaType) -> Result<JavaType, MappingError> {
        match java_type {
            JavaType::Reference(class) => Ok(JavaType::Reference(self.resolve_class(class))),
            other => Err(MappingError::NotAReferenceType { type_name: other.name() }),
        }
    }

    /// Renamed counterpart of any type, substituting classes structurally.
    pub fn get_new_type(&self, java_type: &JavaType) -> JavaType {
        java_type.map_class(|class| self.resolve_class(class))
    }

    /// Recorded rename of a method, or the same-name symbol with its types
    /// substituted when no explicit pair exists.
    pub fn get_new_method(&self, original: &MethodSymbol) -> MethodSymbol {
        match self.inner.methods.get(original) {
            Some(renamed) => renamed.clone(),
            None => original.map_class(|class| self.resolve_class(class)),
        }
    }

    /// Recorded rename of a field, or the same-name symbol with its
    /// declaring class substituted when no explicit pair exists.
    pub fn get_new_field(&self, original: &FieldSymbol) -> FieldSymbol {
        match self.inner.fields.get(original) {
            Some(renamed) => renamed.clone(),
            None => original.map_class(|class| self.resolve_class(class)),
        }
    }

    pub fn contains_class(&self, class: &ReferenceType) -> bool {
        self.inner.classes.contains_key(class)
    }

    pub fn contains_method(&self, method: &MethodSymbol) -> bool {
        self.inner.methods.contains_key(method)
    }

    pub fn contains_field(&self, field: &FieldSymbol) -> bool {
        self.inner.fields.contains_key(field)
    }

    /// Ordered (original, renamed) class pairs.
    pub fn classes(&self) -> impl Iterator<Item = (&ReferenceType, &ReferenceType)> {
        self.inner.classes.iter()
    }

    /// Ordered (original, renamed) method pairs.
    pub fn methods(&self) -> impl Iterator<Item = (&MethodSymbol, &MethodSymbol)> {
        self.inner.methods.iter()
    }

    /// Ordered (original, renamed) field pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldSymbol, &FieldSymbol)> {
        self.inner.fields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.classes.len() == 0
            && self.inner.methods.len() == 0
            && self.inner.fields.len() == 0
    }

    /// The inverse relation, computed once per instance.
    ///
    /// The result keeps a back-reference, so while either twin is alive
    /// `invert()` returns the same instance again and inverting twice
    /// yields exactly the mapping it started from. Once the inverse has
    /// been dropped a later call recomputes an equal value.
    pub fn invert(&self) -> ImmutableMappings {
        {
            let slot = lock_slot(&self.inner.inverse);
            if let Some(inverse) = slot.upgrade() {
                return ImmutableMappings { inner: inverse };
            }
        }
        let inverse = Arc::new(Inner {
            classes: self.inner.classes.inverted(),
            methods: self.inner.methods.inverted(),
            fields: self.inner.fields.inverted(),
            inverse: Mutex::new(Arc::downgrade(&self.inner)),
        });
        // Two racing computations both produce valid twins; the slot just
        // keeps whichever landed last.
        *lock_slot(&self.inner.inverse) = Arc::downgrade(&inverse);
        ImmutableMappings { inner: inverse }
    }

    /// An immutable snapshot of an immutable mapping is itself.
    pub fn snapshot(&self) -> ImmutableMappings {
        self.clone()
    }
}

fn resolve_in(classes: &BiMap<ReferenceType>, class: &ReferenceType) -> ReferenceType {
    match classes.get(class) {
        Some(renamed) => renamed.clone(),
        None => class.clone(),
    }
}

impl PartialEq for ImmutableMappings {
    fn eq(&self, other: &ImmutableMappings) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.classes == other.inner.classes
                && self.inner.methods == other.inner.methods
                && self.inner.fields == other.inner.fields)
    }
}

impl Eq for ImmutableMappings {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::MethodSignature;

    fn class(internal: &str) -> ReferenceType {
        ReferenceType::from_internal_name(internal).unwrap()
    }

    fn method(internal: &str, descriptor: &str) -> MethodSymbol {
        let signature = MethodSignature::from_descriptor(descriptor).unwrap();
        MethodSymbol::from_internal_name(internal, signature).unwrap()
    }

    fn field(internal: &str) -> FieldSymbol {
        FieldSymbol::from_internal_name(internal).unwrap()
    }

    fn sample() -> ImmutableMappings {
        ImmutableMappings::new(
            [(class("aa"), class("Entity")), (class("ab"), class("Cow"))],
            [(method("ab/a", "(Lab;)V"), method("Cow/love", "(LCow;)V"))],
            [(field("aa/a"), field("Entity/dead"))],
        )
        .unwrap()
    }

    #[test]
    fn empty_is_shared() {
        let first = ImmutableMappings::empty();
        let second = ImmutableMappings::empty();
        assert!(Arc::ptr_eq(&first.inner, &second.inner));
        assert!(first.is_empty());
    }

    #[test]
    fn construction_rejects_inconsistent_members() {
        let result = ImmutableMappings::new(
            [(class("aa"), class("Entity"))],
            [],
            [(field("aa/a"), field("Villain/dead"))],
        );
        assert!(matches!(result, Err(MappingError::InconsistentRename { .. })));
    }

    #[test]
    fn unmapped_classes_resolve_to_themselves() {
        let mappings = sample();
        assert_eq!(mappings.resolve_class(&class("zz")), class("zz"));
        assert_eq!(mappings.resolve_class(&class("aa")), class("Entity"));
    }

    #[test]
    fn get_new_class_rejects_non_references() {
        let mappings = sample();
        assert!(matches!(
            mappings.get_new_class(&JavaType::int()),
            Err(MappingError::NotAReferenceType { .. })
        ));
        let array = JavaType::array(JavaType::Reference(class("aa")), 1);
        assert!(mappings.get_new_class(&array).is_err());
        // The structural lookup handles the same input fine.
        assert_eq!(
            mappings.get_new_type(&array),
            JavaType::array(JavaType::Reference(class("Entity")), 1)
        );
    }

    #[test]
    fn member_lookup_falls_back_to_substitution() {
        let mappings = sample();
        let unlisted = method("aa/b", "(Lab;)Laa;");
        let renamed = mappings.get_new_method(&unlisted);
        assert_eq!(renamed.name(), "b");
        assert_eq!(renamed.owner(), &class("Entity"));
        assert_eq!(renamed.signature().descriptor(), "(LCow;)LEntity;");
    }

    #[test]
    fn recorded_member_renames_win() {
        let mappings = sample();
        let renamed = mappings.get_new_method(&method("ab/a", "(Lab;)V"));
        assert_eq!(renamed.name(), "love");
    }

    #[test]
    fn from_renames_synthesizes_member_symbols() {
        let mappings = ImmutableMappings::from_renames(
            [(class("obf4"), class("net/techcable/minecraft/Player"))],
            [(method("obfs/a", "(Lobf4;ID)Z"), "isHacking".to_string())],
            [(field("obf4/a"), "dead".to_string())],
        )
        .unwrap();
        let renamed_field = mappings.get_new_field(&field("obf4/a"));
        assert_eq!(renamed_field.internal_name(), "net/techcable/minecraft/Player/dead");
        let renamed_method = mappings.get_new_method(&method("obfs/a", "(Lobf4;ID)Z"));
        assert_eq!(renamed_method.owner(), &class("obfs"));
        assert_eq!(
            renamed_method.signature().descriptor(),
            "(Lnet/techcable/minecraft/Player;ID)Z"
        );
    }

    #[test]
    fn inversion_is_cached_and_self_inverse() {
        let mappings = sample();
        let inverse = mappings.invert();
        assert_eq!(inverse.resolve_class(&class("Entity")), class("aa"));
        assert_eq!(
            inverse.get_new_method(&method("Cow/love", "(LCow;)V")),
            method("ab/a", "(Lab;)V")
        );

        let again = mappings.invert();
        assert!(Arc::ptr_eq(&inverse.inner, &again.inner));
        let back = inverse.invert();
        assert!(Arc::ptr_eq(&mappings.inner, &back.inner));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(sample(), sample());
        assert_ne!(sample(), ImmutableMappings::empty());
    }
}
