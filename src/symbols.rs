use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::signature::MethodSignature;
use crate::types::ReferenceType;

/// Returns true when `name` is acceptable as a class member name.
///
/// The grammar is deliberately permissive: compiled-program data contains
/// constructor and initializer entries (`<init>`, `<clinit>`) and
/// `$`-decorated synthetic members, none of which fit the source-level
/// identifier rules. Anything non-empty made of alphanumerics plus
/// `_ $ < >` passes, as long as it does not start with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_numeric() {
        return false;
    }
    is_identifier_char(first) && chars.all(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '<' | '>')
}

fn validate_name(name: String) -> Result<String, MappingError> {
    if is_valid_identifier(&name) {
        Ok(name)
    } else {
        Err(MappingError::MalformedIdentifier { name })
    }
}

/// Splits `pkg/Class/member` at the last separator.
fn split_member_internal_name(internal: &str) -> Result<(ReferenceType, &str), MappingError> {
    let malformed = || MappingError::MalformedInternalName { name: internal.to_string() };
    let split = internal.rfind('/').ok_or_else(malformed)?;
    if split + 1 == internal.len() {
        return Err(malformed());
    }
    let owner = ReferenceType::from_internal_name(&internal[..split]).map_err(|_| malformed())?;
    Ok((owner, &internal[split + 1..]))
}

/// A field identity: declaring class plus name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSymbol {
    owner: ReferenceType,
    name: String,
}

impl FieldSymbol {
    pub fn new(owner: ReferenceType, name: impl Into<String>) -> Result<FieldSymbol, MappingError> {
        Ok(FieldSymbol { owner, name: validate_name(name.into())? })
    }

    /// Parses `pkg/Class/field`, splitting at the last separator.
    pub fn from_internal_name(internal: &str) -> Result<FieldSymbol, MappingError> {
        let (owner, name) = split_member_internal_name(internal)?;
        FieldSymbol::new(owner, name)
    }

    pub fn owner(&self) -> &ReferenceType {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn internal_name(&self) -> String {
        format!("{}/{}", self.owner.internal_name(), self.name)
    }

    pub fn with_name(&self, name: impl Into<String>) -> Result<FieldSymbol, MappingError> {
        FieldSymbol::new(self.owner.clone(), name)
    }

    pub fn with_owner(&self, owner: ReferenceType) -> FieldSymbol {
        FieldSymbol { owner, name: self.name.clone() }
    }

    /// Substitutes a class-rename function into the declaring class,
    /// keeping the name.
    pub fn map_class<F>(&self, mut f: F) -> FieldSymbol
    where
        F: FnMut(&ReferenceType) -> ReferenceType,
    {
        FieldSymbol { owner: f(&self.owner), name: self.name.clone() }
    }

    /// True when both symbols agree on everything but the name.
    pub fn has_same_types(&self, other: &FieldSymbol) -> bool {
        self.owner == other.owner
    }
}

impl fmt::Display for FieldSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.internal_name())
    }
}

/// A method identity: declaring class, name, and signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSymbol {
    owner: ReferenceType,
    name: String,
    signature: MethodSignature,
}

impl MethodSymbol {
    pub fn new(
        owner: ReferenceType,
        name: impl Into<String>,
        signature: MethodSignature,
    ) -> Result<MethodSymbol, MappingError> {
        Ok(MethodSymbol { owner, name: validate_name(name.into())?, signature })
    }

    /// Parses `pkg/Class/method`, splitting at the last separator. The
    /// signature travels separately in the text formats.
    pub fn from_internal_name(
        internal: &str,
        signature: MethodSignature,
    ) -> Result<MethodSymbol, MappingError> {
        let (owner, name) = split_member_internal_name(internal)?;
        MethodSymbol::new(owner, name, signature)
    }

    pub fn owner(&self) -> &ReferenceType {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    pub fn internal_name(&self) -> String {
        format!("{}/{}", self.owner.internal_name(), self.name)
    }

    pub fn with_name(&self, name: impl Into<String>) -> Result<MethodSymbol, MappingError> {
        MethodSymbol::new(self.owner.clone(), name, self.signature.clone())
    }

    pub fn with_owner(&self, owner: ReferenceType) -> MethodSymbol {
        MethodSymbol { owner, name: self.name.clone(), signature: self.signature.clone() }
    }

    pub fn with_signature(&self, signature: MethodSignature) -> MethodSymbol {
        MethodSymbol { owner: self.owner.clone(), name: self.name.clone(), signature }
    }

    /// Substitutes a class-rename function into the declaring class and the
    /// whole signature, keeping the name.
    pub fn map_class<F>(&self, mut f: F) -> MethodSymbol
    where
        F: FnMut(&ReferenceType) -> ReferenceType,
    {
        MethodSymbol {
            owner: f(&self.owner),
            name: self.name.clone(),
            signature: self.signature.map_class(&mut f),
        }
    }

    /// True when both symbols agree on everything but the name.
    pub fn has_same_types(&self, other: &MethodSymbol) -> bool {
        self.owner == other.owner && self.signature == other.signature
    }
}

impl fmt::Display for MethodSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.internal_name(), self.signature.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(internal: &str) -> ReferenceType {
        ReferenceType::from_internal_name(internal).unwrap()
    }

    #[test]
    fn identifier_grammar_is_permissive() {
        for name in ["a", "dead", "<init>", "<clinit>", "a$b", "_x", "isHacking", "val$this"] {
            assert!(is_valid_identifier(name), "rejected {name:?}");
        }
        for name in ["", "1a", "a b", "a-b", "a/b", "a."] {
            assert!(!is_valid_identifier(name), "accepted {name:?}");
        }
    }

    #[test]
    fn field_internal_name_splits_at_last_separator() {
        let field = FieldSymbol::from_internal_name("net/minecraft/server/Entity/dead").unwrap();
        assert_eq!(field.owner(), &owner("net/minecraft/server/Entity"));
        assert_eq!(field.name(), "dead");
        assert_eq!(field.internal_name(), "net/minecraft/server/Entity/dead");
    }

    #[test]
    fn member_internal_names_need_a_separator() {
        for internal in ["dead", "Entity/", "/dead"] {
            let result = FieldSymbol::from_internal_name(internal);
            assert!(
                matches!(result, Err(MappingError::MalformedInternalName { .. })),
                "accepted {internal:?}"
            );
        }
    }

    #[test]
    fn constructors_validate_the_name() {
        let class = owner("aa");
        assert!(FieldSymbol::new(class.clone(), "1bad").is_err());
        assert!(FieldSymbol::new(class.clone(), "").is_err());
        assert!(MethodSymbol::new(
            class,
            "<init>",
            MethodSignature::from_descriptor("()V").unwrap(),
        )
        .is_ok());
    }

    #[test]
    fn has_same_types_ignores_the_name() {
        let signature = MethodSignature::from_descriptor("(Lab;)V").unwrap();
        let original = MethodSymbol::new(owner("ab"), "a", signature.clone()).unwrap();
        let renamed = original.with_name("love").unwrap();
        assert!(original.has_same_types(&renamed));

        let moved = original.with_owner(owner("ac"));
        assert!(!original.has_same_types(&moved));

        let changed = original.with_signature(MethodSignature::from_descriptor("()V").unwrap());
        assert!(!original.has_same_types(&changed));
    }

    #[test]
    fn map_class_rewrites_owner_and_signature() {
        let signature = MethodSignature::from_descriptor("(Lab;)V").unwrap();
        let method = MethodSymbol::new(owner("ab"), "a", signature).unwrap();
        let cow = owner("net/minecraft/server/Cow");
        let mapped = method.map_class(|_| cow.clone());
        assert_eq!(mapped.owner(), &cow);
        assert_eq!(mapped.signature().descriptor(), "(Lnet/minecraft/server/Cow;)V");
        assert_eq!(mapped.name(), "a");
    }

    #[test]
    fn symbol_serde_round_trip() {
        let method = MethodSymbol::new(
            owner("net/minecraft/server/Cow"),
            "love",
            MethodSignature::from_descriptor("(Lnet/minecraft/server/Cow;)V").unwrap(),
        )
        .unwrap();
        let json = serde_json::to_string(&method).unwrap();
        let decoded: MethodSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, method);
    }
}
