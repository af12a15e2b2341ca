use indexmap::IndexMap;
use tracing::debug;

use crate::error::MappingError;
use crate::mappings::{ImmutableMappings, Mappings};
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::ReferenceType;

/// Folds an ordered sequence of rename stages into one mapping from the
/// oldest original names to the newest renamed names.
///
/// Each stage may rename classes further, rename members of already
/// renamed classes, or both. Renaming stages contribute no pairs of their
/// own but rewrite everything accumulated so far. A stage pair whose
/// oldest original is already claimed by an earlier stage is skipped.
pub fn chain<I>(stages: I) -> Result<ImmutableMappings, MappingError>
where
    I: IntoIterator<Item = Mappings>,
{
    let mut chained = ImmutableMappings::empty();
    for (index, stage) in stages.into_iter().enumerate() {
        chained = apply_stage(&chained, &stage)?;
        debug!(
            stage = index,
            classes = chained.classes().count(),
            methods = chained.methods().count(),
            fields = chained.fields().count(),
            "chained stage"
        );
    }
    Ok(chained)
}

fn apply_stage(
    chained: &ImmutableMappings,
    stage: &Mappings,
) -> Result<ImmutableMappings, MappingError> {
    let inverse = chained.invert();

    // Pairs starting fresh in this stage, keyed back to the oldest known
    // originals.
    let mut classes: IndexMap<ReferenceType, ReferenceType> = IndexMap::new();
    let mut methods: IndexMap<MethodSymbol, MethodSymbol> = IndexMap::new();
    let mut fields: IndexMap<FieldSymbol, FieldSymbol> = IndexMap::new();

    for (original, renamed) in stage.classes() {
        let oldest = inverse.resolve_class(&original);
        if !chained.contains_class(&oldest) && !classes.contains_key(&oldest) {
            classes.insert(oldest, renamed);
        }
    }
    for (original, renamed) in stage.methods() {
        let oldest = inverse.get_new_method(&original);
        if !chained.contains_method(&oldest) && !methods.contains_key(&oldest) {
            methods.insert(oldest, renamed);
        }
    }
    for (original, renamed) in stage.fields() {
        let oldest = inverse.get_new_field(&original);
        if !chained.contains_field(&oldest) && !fields.contains_key(&oldest) {
            fields.insert(oldest, renamed);
        }
    }

    // Everything chained before this stage gets its renamed side pushed
    // through the stage. The key sets cannot collide with the fresh pairs
    // above.
    for (original, renamed) in chained.classes() {
        classes.insert(original.clone(), stage.resolve_class(renamed));
    }
    for (original, renamed) in chained.methods() {
        methods.insert(original.clone(), stage.get_new_method(renamed)?);
    }
    for (original, renamed) in chained.fields() {
        fields.insert(original.clone(), stage.get_new_field(renamed)?);
    }

    ImmutableMappings::new(classes, methods, fields)
}
