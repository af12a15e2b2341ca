use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// The nine JVM primitive kinds, `void` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Void,
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    /// Source-level keyword, which doubles as the internal name.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// One-byte descriptor code.
    pub fn descriptor(self) -> char {
        match self {
            PrimitiveType::Void => 'V',
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Char => 'C',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
        }
    }

    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        PrimitiveType::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn from_descriptor_char(code: char) -> Option<PrimitiveType> {
        PrimitiveType::ALL.iter().copied().find(|kind| kind.descriptor() == code)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully qualified class name, stored in dotted form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceType {
    name: String,
}

impl ReferenceType {
    /// Builds a reference type from a dotted qualified name such as
    /// `net.minecraft.server.Entity`.
    pub fn new(name: impl Into<String>) -> Result<ReferenceType, MappingError> {
        let name = name.into();
        if !is_valid_class_name(&name) {
            return Err(MappingError::MalformedIdentifier { name });
        }
        Ok(ReferenceType { name })
    }

    /// Builds a reference type from a slash-separated internal name such as
    /// `net/minecraft/server/Entity`.
    pub fn from_internal_name(internal: &str) -> Result<ReferenceType, MappingError> {
        ReferenceType::new(internal.replace('/', "."))
    }

    /// Skips validation; the caller guarantees `name` is a valid dotted
    /// class name.
    pub(crate) fn from_validated(name: String) -> ReferenceType {
        debug_assert!(is_valid_class_name(&name));
        ReferenceType { name }
    }

    /// Dotted qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-separated form used by the text formats.
    pub fn internal_name(&self) -> String {
        self.name.replace('.', "/")
    }

    pub fn descriptor(&self) -> String {
        format!("L{};", self.internal_name())
    }

    /// Package portion of the name; empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(split) => &self.name[..split],
            None => "",
        }
    }

    pub fn simple_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(split) => &self.name[split + 1..],
            None => &self.name,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A Java type as the text formats see it: primitive, class reference, or
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JavaType {
    Primitive(PrimitiveType),
    Reference(ReferenceType),
    /// `element_type` is never itself an array and `dimensions` is at
    /// least one, so `int[]` and `int[][]` are distinct values.
    Array {
        element_type: Box<JavaType>,
        dimensions: usize,
    },
}

impl JavaType {
    pub fn void() -> JavaType {
        JavaType::Primitive(PrimitiveType::Void)
    }

    pub fn boolean() -> JavaType {
        JavaType::Primitive(PrimitiveType::Boolean)
    }

    pub fn int() -> JavaType {
        JavaType::Primitive(PrimitiveType::Int)
    }

    pub fn double() -> JavaType {
        JavaType::Primitive(PrimitiveType::Double)
    }

    /// Builds a reference type from a dotted qualified name.
    pub fn reference(name: &str) -> Result<JavaType, MappingError> {
        Ok(JavaType::Reference(ReferenceType::new(name)?))
    }

    /// Builds an array type, folding a nested array element into the
    /// dimension count.
    pub fn array(element: JavaType, dimensions: usize) -> JavaType {
        debug_assert!(dimensions >= 1);
        match element {
            JavaType::Array { element_type, dimensions: inner } => JavaType::Array {
                element_type,
                dimensions: inner + dimensions,
            },
            other => JavaType::Array {
                element_type: Box::new(other),
                dimensions,
            },
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, JavaType::Reference(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JavaType::Array { .. })
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            JavaType::Reference(class) => Some(class),
            _ => None,
        }
    }

    /// Dotted source-level name, with `[]` suffixes for arrays.
    pub fn name(&self) -> String {
        match self {
            JavaType::Primitive(kind) => kind.name().to_string(),
            JavaType::Reference(class) => class.name().to_string(),
            JavaType::Array { element_type, dimensions } => {
                let mut name = element_type.name();
                for _ in 0..*dimensions {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    /// Slash-separated name, with `[]` suffixes for arrays.
    pub fn internal_name(&self) -> String {
        match self {
            JavaType::Primitive(kind) => kind.name().to_string(),
            JavaType::Reference(class) => class.internal_name(),
            JavaType::Array { element_type, dimensions } => {
                let mut name = element_type.internal_name();
                for _ in 0..*dimensions {
                    name.push_str("[]");
                }
                name
            }
        }
    }

    pub fn descriptor(&self) -> String {
        match self {
            JavaType::Primitive(kind) => kind.descriptor().to_string(),
            JavaType::Reference(class) => class.descriptor(),
            JavaType::Array { element_type, dimensions } => {
                let mut descriptor = "[".repeat(*dimensions);
                descriptor.push_str(&element_type.descriptor());
                descriptor
            }
        }
    }

    /// Parses a dotted name. Primitive keywords win over class names, and
    /// trailing `[]` pairs denote array dimensions.
    pub fn from_name(name: &str) -> Result<JavaType, MappingError> {
        let mut base = name;
        let mut dimensions = 0usize;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
            dimensions += 1;
        }
        let element = match PrimitiveType::from_name(base) {
            Some(kind) => JavaType::Primitive(kind),
            None => JavaType::Reference(ReferenceType::new(base)?),
        };
        if dimensions == 0 {
            Ok(element)
        } else {
            Ok(JavaType::array(element, dimensions))
        }
    }

    pub fn from_internal_name(internal: &str) -> Result<JavaType, MappingError> {
        JavaType::from_name(&internal.replace('/', "."))
    }

    /// Decodes a single complete type descriptor; trailing input fails.
    pub fn from_descriptor(descriptor: &str) -> Result<JavaType, MappingError> {
        let mut scanner = DescriptorScanner::new(descriptor);
        let parsed = scanner.read_type()?;
        if !scanner.at_end() {
            return Err(scanner.malformed());
        }
        Ok(parsed)
    }

    /// Substitutes a class-rename function through the type structure.
    /// Array dimensions are preserved; primitives pass through untouched.
    pub fn map_class<F>(&self, mut f: F) -> JavaType
    where
        F: FnMut(&ReferenceType) -> ReferenceType,
    {
        self.map_class_dyn(&mut f)
    }

    fn map_class_dyn(&self, f: &mut dyn FnMut(&ReferenceType) -> ReferenceType) -> JavaType {
        match self {
            JavaType::Primitive(kind) => JavaType::Primitive(*kind),
            JavaType::Reference(class) => JavaType::Reference(f(class)),
            JavaType::Array { element_type, dimensions } => JavaType::Array {
                element_type: Box::new(element_type.map_class_dyn(f)),
                dimensions: *dimensions,
            },
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if is_segment_char(first) && !first.is_numeric() => {}
        _ => return false,
    }
    chars.all(is_segment_char)
}

fn is_segment_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_valid_class_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_valid_segment)
}

/// Empty means the default package.
pub(crate) fn is_valid_package_name(name: &str) -> bool {
    name.is_empty() || name.split('.').all(is_valid_segment)
}

/// Cursor over a descriptor string, shared by the type and signature codecs.
pub(crate) struct DescriptorScanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorScanner<'a> {
    pub(crate) fn new(source: &'a str) -> DescriptorScanner<'a> {
        DescriptorScanner { source, bytes: source.as_bytes(), pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Result<u8, MappingError> {
        let byte = self.peek().ok_or_else(|| self.malformed())?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn expect(&mut self, expected: u8) -> Result<(), MappingError> {
        if self.bump()? != expected {
            return Err(self.malformed());
        }
        Ok(())
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn malformed(&self) -> MappingError {
        MappingError::MalformedDescriptor { descriptor: self.source.to_string() }
    }

    /// Consumes one complete type descriptor at the cursor.
    pub(crate) fn read_type(&mut self) -> Result<JavaType, MappingError> {
        let mut dimensions = 0usize;
        while self.peek() == Some(b'[') {
            self.pos += 1;
            dimensions += 1;
        }
        let element = match self.bump()? {
            b'L' => {
                let start = self.pos;
                while self.bump()? != b';' {}
                let internal = &self.source[start..self.pos - 1];
                let class = ReferenceType::from_internal_name(internal)
                    .map_err(|_| self.malformed())?;
                JavaType::Reference(class)
            }
            code => {
                let kind = PrimitiveType::from_descriptor_char(code as char)
                    .ok_or_else(|| self.malformed())?;
                JavaType::Primitive(kind)
            }
        };
        if dimensions == 0 {
            Ok(element)
        } else {
            Ok(JavaType::array(element, dimensions))
        }
    }
}
