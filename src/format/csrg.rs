//! The compact format: no tags, the field count alone decides what a
//! record is. Member records name only the new member, so they are
//! buffered and resolved against the document's class table once the
//! whole document has been read. Record order therefore does not matter.

use indexmap::IndexMap;

use crate::error::MappingError;
use crate::mappings::{ImmutableMappings, Mappings};
use crate::signature::MethodSignature;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::ReferenceType;

pub(super) fn parse<I, S>(lines: I) -> Result<Mappings, MappingError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut classes: IndexMap<ReferenceType, ReferenceType> = IndexMap::new();
    let mut field_names: IndexMap<FieldSymbol, String> = IndexMap::new();
    let mut method_names: IndexMap<MethodSymbol, String> = IndexMap::new();

    for raw in lines {
        let Some(line) = super::content_line(raw.as_ref()) else {
            continue;
        };
        let fields: Vec<&str> = line.split(' ').collect();
        match fields.as_slice() {
            [original, renamed] => {
                classes.insert(
                    ReferenceType::from_internal_name(original)?,
                    ReferenceType::from_internal_name(renamed)?,
                );
            }
            [owner, name, new_name] => {
                let owner = ReferenceType::from_internal_name(owner)?;
                field_names.insert(FieldSymbol::new(owner, *name)?, (*new_name).to_string());
            }
            [owner, name, descriptor, new_name] => {
                let owner = ReferenceType::from_internal_name(owner)?;
                let signature = MethodSignature::from_descriptor(descriptor)?;
                method_names
                    .insert(MethodSymbol::new(owner, *name, signature)?, (*new_name).to_string());
            }
            _ => return Err(MappingError::MalformedLine { line: line.to_string() }),
        }
    }

    let mappings = ImmutableMappings::from_renames(classes, method_names, field_names)?;
    Ok(Mappings::Immutable(mappings))
}

pub(super) fn to_lines(mappings: &Mappings) -> Vec<String> {
    let mut lines = Vec::new();
    for (original, renamed) in mappings.classes() {
        lines.push(format!("{} {}", original.internal_name(), renamed.internal_name()));
    }
    for (original, renamed) in mappings.fields() {
        lines.push(format!(
            "{} {} {}",
            original.owner().internal_name(),
            original.name(),
            renamed.name(),
        ));
    }
    for (original, renamed) in mappings.methods() {
        lines.push(format!(
            "{} {} {} {}",
            original.owner().internal_name(),
            original.name(),
            original.signature().descriptor(),
            renamed.name(),
        ));
    }
    lines
}
