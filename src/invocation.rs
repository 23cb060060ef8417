//! The record of one operation invocation a link is built for.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::cache::TemplateKey;
use crate::value::Value;

/// Identity of the type that declares an operation.
///
/// Equality is by [`TypeId`]; the name is carried for diagnostics only.
#[derive(Clone, Copy)]
pub struct DeclaringType {
    id: TypeId,
    name: &'static str,
}

impl DeclaringType {
    /// Returns the identity of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for DeclaringType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DeclaringType {}

impl Hash for DeclaringType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for DeclaringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeclaringType").field(&self.name).finish()
    }
}

impl fmt::Display for DeclaringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity of an operation within its declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(&'static str);

impl OperationId {
    /// Creates an operation identity from its name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for OperationId {
    fn from(name: &'static str) -> Self {
        Self(name)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One invocation of an operation: who declares it, and the values passed.
///
/// Positional values are anonymous and bind placeholders left to right ahead
/// of any named lookup. Arguments are the full, ordered argument list that
/// named parameter descriptors index into.
///
/// # Examples
///
/// ```
/// use link_template::Invocation;
///
/// struct People;
///
/// let invocation = Invocation::of::<People>("show")
///     .with_positional(["acme"])
///     .with_argument(42)
///     .with_argument(None::<String>);
///
/// assert_eq!(invocation.positional().len(), 1);
/// assert_eq!(invocation.arguments().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Invocation {
    declaring_type: DeclaringType,
    operation: OperationId,
    positional: Vec<Value>,
    arguments: Vec<Value>,
}

impl Invocation {
    /// Creates an invocation with no values.
    #[must_use]
    pub fn new(declaring_type: DeclaringType, operation: impl Into<OperationId>) -> Self {
        Self {
            declaring_type,
            operation: operation.into(),
            positional: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Creates an invocation of an operation declared by `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>(operation: impl Into<OperationId>) -> Self {
        Self::new(DeclaringType::of::<T>(), operation)
    }

    /// Sets the positional values.
    #[must_use]
    pub fn with_positional<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.positional = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the full argument list.
    #[must_use]
    pub fn with_arguments<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.arguments = values.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one argument.
    #[must_use]
    pub fn with_argument(mut self, value: impl Into<Value>) -> Self {
        self.arguments.push(value.into());
        self
    }

    /// Returns the declaring type.
    #[must_use]
    pub const fn declaring_type(&self) -> DeclaringType {
        self.declaring_type
    }

    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> OperationId {
        self.operation
    }

    /// Returns the positional values.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the full argument list.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Returns the cache key of the invoked operation.
    #[must_use]
    pub const fn key(&self) -> TemplateKey {
        TemplateKey::new(self.declaring_type, self.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct First;
    struct Second;

    #[test]
    fn declaring_type_equality_is_by_identity() {
        assert_eq!(DeclaringType::of::<First>(), DeclaringType::of::<First>());
        assert_ne!(DeclaringType::of::<First>(), DeclaringType::of::<Second>());
    }

    #[test]
    fn declaring_type_name_is_diagnostic() {
        assert!(DeclaringType::of::<First>().name().ends_with("First"));
    }

    #[test]
    fn builder_methods_collect_values() {
        let invocation = Invocation::of::<First>("show")
            .with_positional(vec!["a", "b"])
            .with_arguments([1, 2, 3]);
        assert_eq!(invocation.positional(), &[Value::from("a"), Value::from("b")]);
        assert_eq!(invocation.arguments().len(), 3);
        assert_eq!(invocation.operation().name(), "show");
    }

    #[test]
    fn key_combines_type_and_operation() {
        let a = Invocation::of::<First>("show").key();
        let b = Invocation::of::<First>("show").with_argument(1).key();
        let c = Invocation::of::<Second>("show").key();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
