use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::MappingError;
use crate::mappings::bimap::BiMap;
use crate::mappings::inconsistent;
use crate::mappings::ImmutableMappings;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::{JavaType, ReferenceType};

/// Editable rename relation.
///
/// Handles are cheap clones sharing one store, which is what makes the
/// live inverted view possible; the type is deliberately single-threaded.
#[derive(Debug, Clone)]
pub struct MutableMappings {
    store: Rc<RefCell<Store>>,
    /// When set, this handle reads and writes the store with the
    /// original/renamed roles swapped.
    inverted: bool,
}

#[derive(Debug, Default)]
struct Store {
    classes: BiMap<ReferenceType>,
    methods: BiMap<MethodSymbol>,
    fields: BiMap<FieldSymbol>,
}

impl MutableMappings {
    pub fn new() -> MutableMappings {
        MutableMappings { store: Rc::new(RefCell::new(Store::default())), inverted: false }
    }

    /// Records a class rename. An identity pair removes any existing entry
    /// for that class instead of being stored.
    pub fn put_class(&self, original: ReferenceType, renamed: ReferenceType) {
        let mut store = self.store.borrow_mut();
        if original == renamed {
            if self.inverted {
                store.classes.remove_by_value(&original);
            } else {
                store.classes.remove(&original);
            }
            return;
        }
        let (key, value) = self.orient(original, renamed);
        store.classes.insert(key, value);
    }

    /// Records a method rename; the pair must agree with the current class
    /// relation about types.
    pub fn put_method(
        &self,
        original: MethodSymbol,
        renamed: MethodSymbol,
    ) -> Result<(), MappingError> {
        let mut store = self.store.borrow_mut();
        let expected =
            original.map_class(|class| resolve_oriented(&store.classes, self.inverted, class));
        if !expected.has_same_types(&renamed) {
            return Err(inconsistent(&original, &renamed));
        }
        let (key, value) = self.orient(original, renamed);
        store.methods.insert(key, value);
        Ok(())
    }

    /// Records a field rename; the pair must agree with the current class
    /// relation about types.
    pub fn put_field(
        &self,
        original: FieldSymbol,
        renamed: FieldSymbol,
    ) -> Result<(), MappingError> {
        let mut store = self.store.borrow_mut();
        let expected =
            original.map_class(|class| resolve_oriented(&store.classes, self.inverted, class));
        if !expected.has_same_types(&renamed) {
            return Err(inconsistent(&original, &renamed));
        }
        let (key, value) = self.orient(original, renamed);
        store.fields.insert(key, value);
        Ok(())
    }

    /// Records a method rename by new name only; the renamed symbol is
    /// synthesized from the current class relation.
    pub fn put_method_name(
        &self,
        original: MethodSymbol,
        new_name: impl Into<String>,
    ) -> Result<(), MappingError> {
        let renamed = self.get_new_method(&original).with_name(new_name)?;
        self.put_method(original, renamed)
    }

    /// Records a field rename by new name only.
    pub fn put_field_name(
        &self,
        original: FieldSymbol,
        new_name: impl Into<String>,
    ) -> Result<(), MappingError> {
        let renamed = self.get_new_field(&original).with_name(new_name)?;
        self.put_field(original, renamed)
    }

    fn orient<T>(&self, original: T, renamed: T) -> (T, T) {
        if self.inverted {
            (renamed, original)
        } else {
            (original, renamed)
        }
    }

    /// Renamed counterpart of a class; unmapped classes resolve to
    /// themselves.
    pub fn resolve_class(&self, class: &ReferenceType) -> ReferenceType {
        let store = self.store.borrow();
        resolve_oriented(&store.classes, self.inverted, class)
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
        let store = self.store.borrow();
        let recorded = if self.inverted {
            store.methods.get_reverse(original)
        } else {
            store.methods.get(original)
        };
        match recorded {
            Some(renamed) => renamed.clone(),
            None => original
                .map_class(|class| resolve_oriented(&store.classes, self.inverted, class)),
        }
    }

    /// Recorded rename of a field, or the same-name symbol with its
    /// declaring class substituted when no explicit pair exists.
    pub fn get_new_field(&self, original: &FieldSymbol) -> FieldSymbol {
        let store = self.store.borrow();
        let recorded = if self.inverted {
            store.fields.get_reverse(original)
        } else {
            store.fields.get(original)
        };
        match recorded {
            Some(renamed) => renamed.clone(),
            None => original
                .map_class(|class| resolve_oriented(&store.classes, self.inverted, class)),
        }
    }

    pub fn contains_class(&self, class: &ReferenceType) -> bool {
        let store = self.store.borrow();
        if self.inverted {
            store.classes.contains_value(class)
        } else {
            store.classes.contains_key(class)
        }
    }

    pub fn contains_method(&self, method: &MethodSymbol) -> bool {
        let store = self.store.borrow();
        if self.inverted {
            store.methods.contains_value(method)
        } else {
            store.methods.contains_key(method)
        }
    }

    pub fn contains_field(&self, field: &FieldSymbol) -> bool {
        let store = self.store.borrow();
        if self.inverted {
            store.fields.contains_value(field)
        } else {
            store.fields.contains_key(field)
        }
    }

    /// Ordered (original, renamed) class pairs as seen from this view.
    pub fn classes(&self) -> Vec<(ReferenceType, ReferenceType)> {
        let store = self.store.borrow();
        pairs_of(&store.classes, self.inverted)
    }

    /// Ordered (original, renamed) method pairs as seen from this view.
    pub fn methods(&self) -> Vec<(MethodSymbol, MethodSymbol)> {
        let store = self.store.borrow();
        pairs_of(&store.methods, self.inverted)
    }

    /// Ordered (original, renamed) field pairs as seen from this view.
    pub fn fields(&self) -> Vec<(FieldSymbol, FieldSymbol)> {
        let store = self.store.borrow();
        pairs_of(&store.fields, self.inverted)
    }

    /// Live inverted view over the same store; writes through either
    /// handle are visible to both.
    pub fn invert(&self) -> MutableMappings {
        MutableMappings { store: Rc::clone(&self.store), inverted: !self.inverted }
    }

    /// Immutable copy of the current state. Class edits made after a
    /// member was inserted can leave the store inconsistent, which is
    /// caught here.
    pub fn snapshot(&self) -> Result<ImmutableMappings, MappingError> {
        ImmutableMappings::new(self.classes(), self.methods(), self.fields())
    }
}

impl Default for MutableMappings {
    fn default() -> MutableMappings {
        MutableMappings::new()
    }
}

fn resolve_oriented(
    classes: &BiMap<ReferenceType>,
    inverted: bool,
    class: &ReferenceType,
) -> ReferenceType {
    let recorded = if inverted { classes.get_reverse(class) } else { classes.get(class) };
    match recorded {
        Some(renamed) => renamed.clone(),
        None => class.clone(),
    }
}

fn pairs_of<T: Clone + Eq + Hash>(map: &BiMap<T>, inverted: bool) -> Vec<(T, T)> {
    if inverted {
        map.iter_reverse().map(|(k, v)| (k.clone(), v.clone())).collect()
    } else {
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

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

    #[test]
    fn put_and_lookup() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        mappings.put_field(field("aa/a"), field("Entity/dead")).unwrap();
        assert_eq!(mappings.resolve_class(&class("aa")), class("Entity"));
        assert_eq!(mappings.get_new_field(&field("aa/a")), field("Entity/dead"));
        assert!(mappings.contains_field(&field("aa/a")));
    }

    #[test]
    fn inconsistent_member_pairs_are_rejected() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        let result = mappings.put_field(field("aa/a"), field("Villain/dead"));
        assert!(matches!(result, Err(MappingError::InconsistentRename { .. })));
        assert!(!mappings.contains_field(&field("aa/a")));
    }

    #[test]
    fn identity_pair_removes_the_entry() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        assert!(mappings.contains_class(&class("aa")));
        mappings.put_class(class("aa"), class("aa"));
        assert!(!mappings.contains_class(&class("aa")));
        assert_eq!(mappings.resolve_class(&class("aa")), class("aa"));
    }

    #[test]
    fn inverted_view_is_live_in_both_directions() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        let inverse = mappings.invert();
        assert_eq!(inverse.resolve_class(&class("Entity")), class("aa"));

        inverse.put_class(class("Cow"), class("ab"));
        assert_eq!(mappings.resolve_class(&class("ab")), class("Cow"));
        assert!(mappings.contains_class(&class("ab")));

        // Inverting the view again restores the original orientation.
        let back = inverse.invert();
        assert_eq!(back.resolve_class(&class("aa")), class("Entity"));
    }

    #[test]
    fn inverted_identity_pair_removes_by_renamed_side() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        let inverse = mappings.invert();
        inverse.put_class(class("Entity"), class("Entity"));
        assert!(!mappings.contains_class(&class("aa")));
    }

    #[test]
    fn member_puts_through_the_inverted_view() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("ab"), class("Cow"));
        let inverse = mappings.invert();
        inverse
            .put_method(method("Cow/love", "(LCow;)V"), method("ab/a", "(Lab;)V"))
            .unwrap();
        assert_eq!(
            mappings.get_new_method(&method("ab/a", "(Lab;)V")),
            method("Cow/love", "(LCow;)V")
        );
    }

    #[test]
    fn name_only_puts_synthesize_the_renamed_symbol() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("ab"), class("Cow"));
        mappings.put_method_name(method("ab/a", "(Lab;)V"), "love").unwrap();
        assert_eq!(
            mappings.get_new_method(&method("ab/a", "(Lab;)V")),
            method("Cow/love", "(LCow;)V")
        );
        assert!(mappings.put_field_name(field("ab/b"), "bad name").is_err());
    }

    #[test]
    fn snapshot_revalidates_the_store() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        mappings.put_field(field("aa/a"), field("Entity/dead")).unwrap();
        let snapshot = mappings.snapshot().unwrap();
        assert_eq!(snapshot.get_new_field(&field("aa/a")), field("Entity/dead"));

        // Redirecting the class afterwards invalidates the member pair.
        mappings.put_class(class("aa"), class("Villain"));
        assert!(matches!(
            mappings.snapshot(),
            Err(MappingError::InconsistentRename { .. })
        ));
    }

    #[test]
    fn view_enumeration_swaps_pair_roles() {
        let mappings = MutableMappings::new();
        mappings.put_class(class("aa"), class("Entity"));
        let inverse = mappings.invert();
        assert_eq!(inverse.classes(), [(class("Entity"), class("aa"))]);
        assert_eq!(mappings.classes(), [(class("aa"), class("Entity"))]);
    }
}
