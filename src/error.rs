use thiserror::Error;

/// Errors produced while building, transforming, or (de)serializing
/// rename tables.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A class or member name that does not fit the identifier grammar.
    #[error("invalid identifier: {name:?}")]
    MalformedIdentifier { name: String },

    /// A slash-separated member name without a usable separator.
    #[error("invalid internal name: {name:?}")]
    MalformedInternalName { name: String },

    /// A type or method descriptor that cannot be decoded.
    #[error("invalid descriptor: {descriptor:?}")]
    MalformedDescriptor { descriptor: String },

    /// A member pair whose two sides disagree about types once the class
    /// relation has been substituted.
    #[error("inconsistent rename: {original} does not map onto {renamed}")]
    InconsistentRename { original: String, renamed: String },

    /// A document line with an unknown record shape.
    #[error("invalid mapping line: {line:?}")]
    MalformedLine { line: String },

    /// A primitive or array type where only a plain class reference works.
    #[error("not a reference type: {type_name}")]
    NotAReferenceType { type_name: String },

    /// Inversion or snapshotting of a function-backed mapping.
    #[error("{operation} is not supported for renaming mappings")]
    UnsupportedForFunctionalMapping { operation: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
