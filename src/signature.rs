use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::types::{DescriptorScanner, JavaType, ReferenceType};

/// Parameter and return types of a method, without its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    parameters: Vec<JavaType>,
    return_type: JavaType,
}

impl MethodSignature {
    pub fn new(parameters: Vec<JavaType>, return_type: JavaType) -> MethodSignature {
        MethodSignature { parameters, return_type }
    }

    pub fn parameters(&self) -> &[JavaType] {
        &self.parameters
    }

    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }

    /// Method descriptor in `(parameters)return` form, e.g. `(IDLa/b/C;)V`.
    pub fn descriptor(&self) -> String {
        let mut descriptor = String::from("(");
        for parameter in &self.parameters {
            descriptor.push_str(&parameter.descriptor());
        }
        descriptor.push(')');
        descriptor.push_str(&self.return_type.descriptor());
        descriptor
    }

    /// Decodes a method descriptor; trailing input fails.
    pub fn from_descriptor(descriptor: &str) -> Result<MethodSignature, MappingError> {
        let mut scanner = DescriptorScanner::new(descriptor);
        scanner.expect(b'(')?;
        let mut parameters = Vec::new();
        while scanner.peek() != Some(b')') {
            parameters.push(scanner.read_type()?);
        }
        scanner.expect(b')')?;
        let return_type = scanner.read_type()?;
        if !scanner.at_end() {
            return Err(scanner.malformed());
        }
        Ok(MethodSignature { parameters, return_type })
    }

    /// Substitutes a class-rename function into every parameter and the
    /// return type.
    pub fn map_class<F>(&self, mut f: F) -> MethodSignature
    where
        F: FnMut(&ReferenceType) -> ReferenceType,
    {
        MethodSignature {
            parameters: self.parameters.iter().map(|parameter| parameter.map_class(&mut f)).collect(),
            return_type: self.return_type.map_class(&mut f),
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}
