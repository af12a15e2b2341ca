//! The tagged format: one record per line, introduced by a two-letter
//! tag. `PK:` records exist in the wild but carry nothing this crate
//! models, so they parse and vanish.

use crate::error::MappingError;
use crate::mappings::{Mappings, MutableMappings};
use crate::signature::MethodSignature;
use crate::symbols::{FieldSymbol, MethodSymbol};
use crate::types::ReferenceType;

pub(super) fn parse<I, S>(lines: I) -> Result<Mappings, MappingError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mappings = MutableMappings::new();
    for raw in lines {
        let Some(line) = super::content_line(raw.as_ref()) else {
            continue;
        };
        parse_line(line, &mappings)?;
    }
    Ok(Mappings::Mutable(mappings))
}

fn parse_line(line: &str, mappings: &MutableMappings) -> Result<(), MappingError> {
    let malformed = || MappingError::MalformedLine { line: line.to_string() };
    let (tag, rest) = line.split_once(": ").ok_or_else(malformed)?;
    let fields: Vec<&str> = rest.split(' ').collect();
    match (tag, fields.as_slice()) {
        ("CL", [original, renamed]) => {
            mappings.put_class(
                ReferenceType::from_internal_name(original)?,
                ReferenceType::from_internal_name(renamed)?,
            );
            Ok(())
        }
        ("FD", [original, renamed]) => mappings.put_field(
            FieldSymbol::from_internal_name(original)?,
            FieldSymbol::from_internal_name(renamed)?,
        ),
        ("MD", [original, original_descriptor, renamed, renamed_descriptor]) => mappings
            .put_method(
                MethodSymbol::from_internal_name(
                    original,
                    MethodSignature::from_descriptor(original_descriptor)?,
                )?,
                MethodSymbol::from_internal_name(
                    renamed,
                    MethodSignature::from_descriptor(renamed_descriptor)?,
                )?,
            ),
        ("PK", _) => Ok(()),
        _ => Err(malformed()),
    }
}

pub(super) fn to_lines(mappings: &Mappings) -> Vec<String> {
    let mut lines = Vec::new();
    for (original, renamed) in mappings.classes() {
        lines.push(format!(
            "CL: {} {}",
            original.internal_name(),
            renamed.internal_name()
        ));
    }
    for (original, renamed) in mappings.fields() {
        lines.push(format!(
            "FD: {} {}",
            original.internal_name(),
            renamed.internal_name()
        ));
    }
    for (original, renamed) in mappings.methods() {
        lines.push(format!(
            "MD: {} {} {} {}",
            original.internal_name(),
            original.signature().descriptor(),
            renamed.internal_name(),
            renamed.signature().descriptor(),
        ));
    }
    lines
}
