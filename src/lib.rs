//! Rename tables for Java program symbols.
//!
//! A mapping relates two namings of the same program: every class,
//! method, and field known under an original name is paired with the
//! name it carries after an obfuscation or deobfuscation pass. This
//! crate models the symbols themselves ([`ReferenceType`],
//! [`MethodSymbol`], [`FieldSymbol`]), the relation between the two
//! namings ([`Mappings`] in immutable, mutable, and function-backed
//! flavors), composition of several passes ([`chain`]), and the two
//! line-oriented text formats the modding toolchains exchange
//! ([`MappingsFormat`]).
//!
//! Member renames must stay consistent with the class renames around
//! them: a method or field pair is only accepted when substituting the
//! class table into the original symbol produces the renamed symbol's
//! types. Lookups never fail on unmapped input; a symbol without an
//! entry resolves to itself with its types substituted.
//!
//! ```
//! use srgmap::{JavaType, MappingsFormat};
//!
//! # fn main() -> Result<(), srgmap::MappingError> {
//! let source = "CL: aa net/minecraft/server/Entity\n";
//! let mappings = MappingsFormat::Srg.parse_str(source)?;
//!
//! let entity = JavaType::from_internal_name("aa")?;
//! assert_eq!(
//!     mappings.get_new_class(&entity)?.internal_name(),
//!     "net/minecraft/server/Entity"
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;
pub mod mappings;
pub mod signature;
pub mod symbols;
pub mod types;

pub use error::MappingError;
pub use format::MappingsFormat;
pub use mappings::{chain, ImmutableMappings, Mappings, MutableMappings, RenamingMappings};
pub use signature::MethodSignature;
pub use symbols::{is_valid_identifier, FieldSymbol, MethodSymbol};
pub use types::{JavaType, PrimitiveType, ReferenceType};
