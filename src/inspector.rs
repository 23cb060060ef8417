//! Operation metadata: patterns and parameter descriptors.
//!
//! The engine never discovers operations on its own. An
//! [`OperationInspector`] reports, for each `(declaring type, operation)`
//! pair, the URI pattern and which arguments feed path and query
//! parameters. [`MappingRegistry`] is the in-memory implementation.

use std::collections::HashMap;

use crate::declared_type::DeclaredType;
use crate::error::CompileError;
use crate::invocation::{DeclaringType, OperationId};

/// Describes one named parameter of an operation.
///
/// `index` is the position of the argument in the invocation's full argument
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterDescriptor {
    name: String,
    declared_type: DeclaredType,
    index: usize,
}

impl ParameterDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType, index: usize) -> Self {
        Self {
            name: name.into(),
            declared_type,
            index,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    /// Returns the argument index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// The pattern and parameter descriptors of one operation.
///
/// # Examples
///
/// ```
/// use link_template::{DeclaredType, OperationMapping};
///
/// let mapping = OperationMapping::new("/people/{id}")
///     .path_param("id", DeclaredType::Long, 0)
///     .query_param("expand", DeclaredType::list_of(DeclaredType::Str), 1);
///
/// assert_eq!(mapping.pattern(), "/people/{id}");
/// assert_eq!(mapping.path_params().len(), 1);
/// assert_eq!(mapping.query_params()[0].name(), "expand");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperationMapping {
    pattern: String,
    #[cfg_attr(feature = "serde", serde(default))]
    path_params: Vec<ParameterDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    query_params: Vec<ParameterDescriptor>,
}

impl OperationMapping {
    /// Creates a mapping with no parameters.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
        }
    }

    /// Adds a named path parameter.
    #[must_use]
    pub fn path_param(
        mut self,
        name: impl Into<String>,
        declared_type: DeclaredType,
        index: usize,
    ) -> Self {
        self.path_params
            .push(ParameterDescriptor::new(name, declared_type, index));
        self
    }

    /// Adds a named query parameter.
    #[must_use]
    pub fn query_param(
        mut self,
        name: impl Into<String>,
        declared_type: DeclaredType,
        index: usize,
    ) -> Self {
        self.query_params
            .push(ParameterDescriptor::new(name, declared_type, index));
        self
    }

    /// Returns the URI pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the named path parameters.
    #[must_use]
    pub fn path_params(&self) -> &[ParameterDescriptor] {
        &self.path_params
    }

    /// Returns the named query parameters.
    #[must_use]
    pub fn query_params(&self) -> &[ParameterDescriptor] {
        &self.query_params
    }

    fn with_pattern(&self, pattern: String) -> Self {
        Self {
            pattern,
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
        }
    }
}

/// Reports the mapping of an operation.
///
/// Called once per operation; the result is cached by the
/// [`TemplateCache`](crate::TemplateCache) as a compiled template.
pub trait OperationInspector: Send + Sync {
    /// Returns the mapping of `operation` as declared by `declaring_type`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownOperation`] or
    /// [`CompileError::NoMapping`] when no pattern can be produced.
    fn inspect(
        &self,
        declaring_type: DeclaringType,
        operation: OperationId,
    ) -> Result<OperationMapping, CompileError>;
}

#[derive(Debug, Clone, Default)]
struct TypeMappings {
    prefix: String,
    operations: HashMap<&'static str, OperationMapping>,
}

/// An in-memory [`OperationInspector`].
///
/// Each declaring type may carry a prefix that is joined in front of the
/// patterns of its operations. Both parts are normalised to start with `/`
/// when non-empty.
///
/// # Examples
///
/// ```
/// use link_template::{DeclaredType, DeclaringType, MappingRegistry, OperationInspector,
///     OperationMapping};
///
/// struct People;
///
/// let registry = MappingRegistry::new()
///     .with_type::<People>("people")
///     .with_operation::<People>("show", OperationMapping::new("{id}"));
///
/// let mapping = registry
///     .inspect(DeclaringType::of::<People>(), "show".into())
///     .unwrap();
/// assert_eq!(mapping.pattern(), "/people/{id}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    types: HashMap<DeclaringType, TypeMappings>,
}

impl MappingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type-level prefix of `T`.
    #[must_use]
    pub fn with_type<T: ?Sized + 'static>(mut self, prefix: impl Into<String>) -> Self {
        self.register_type(DeclaringType::of::<T>(), prefix);
        self
    }

    /// Registers an operation declared by `T`.
    #[must_use]
    pub fn with_operation<T: ?Sized + 'static>(
        mut self,
        operation: &'static str,
        mapping: OperationMapping,
    ) -> Self {
        self.register_operation(DeclaringType::of::<T>(), OperationId::new(operation), mapping);
        self
    }

    /// Sets the type-level prefix of a declaring type.
    pub fn register_type(&mut self, declaring_type: DeclaringType, prefix: impl Into<String>) {
        self.types.entry(declaring_type).or_default().prefix = prefix.into();
    }

    /// Registers an operation, replacing any previous mapping.
    pub fn register_operation(
        &mut self,
        declaring_type: DeclaringType,
        operation: OperationId,
        mapping: OperationMapping,
    ) {
        self.types
            .entry(declaring_type)
            .or_default()
            .operations
            .insert(operation.name(), mapping);
    }

    /// Returns the number of registered operations across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.values().map(|t| t.operations.len()).sum()
    }

    /// Returns true if no operation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OperationInspector for MappingRegistry {
    fn inspect(
        &self,
        declaring_type: DeclaringType,
        operation: OperationId,
    ) -> Result<OperationMapping, CompileError> {
        let unknown = || CompileError::UnknownOperation {
            declaring_type: declaring_type.name(),
            operation: operation.name(),
        };

        let mappings = self.types.get(&declaring_type).ok_or_else(unknown)?;
        let mapping = mappings
            .operations
            .get(operation.name())
            .ok_or_else(unknown)?;

        let prefix = normalize(&mappings.prefix);
        let suffix = normalize(mapping.pattern());
        if prefix.is_empty() && suffix.is_empty() {
            return Err(CompileError::NoMapping {
                declaring_type: declaring_type.name(),
                operation: operation.name(),
            });
        }

        Ok(mapping.with_pattern(prefix + &suffix))
    }
}

/// Prepends `/` to a non-empty part that lacks it.
fn normalize(part: &str) -> String {
    if part.is_empty() || part.starts_with('/') {
        part.to_string()
    } else {
        format!("/{part}")
    }
}
