//! Error types for compiling and rendering link templates.

use thiserror::Error;

use crate::char_class::UriContext;

/// Errors raised while turning a URI pattern and its parameter descriptors
/// into a [`CompiledTemplate`](crate::CompiledTemplate).
///
/// A compile error is a static defect of the operation mapping: it fails the
/// same way on every attempt and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A placeholder is bound neither by a positional value nor by a named
    /// path parameter.
    #[error(
        "unresolved variable '{name}' in pattern '{pattern}'; no positional value or path parameter supplies it"
    )]
    UnresolvedVariable {
        /// The placeholder name
        name: String,
        /// The pattern being compiled
        pattern: String,
    },
    /// Positional values took a placeholder a named path parameter was
    /// meant for, leaving a later placeholder unbound.
    #[error(
        "placeholder '{name}' in pattern '{pattern}' cannot be bound; positional value #{position} took '{shadowed}', which a path parameter was named after"
    )]
    TooManyPlaceholders {
        /// The pattern being compiled
        pattern: String,
        /// The placeholder left unbound
        name: String,
        /// The placeholder consumed positionally despite a matching path parameter
        shadowed: String,
        /// Index of the positional value that took `shadowed`
        position: usize,
    },
    /// The pattern could not be scanned for placeholders.
    #[error("malformed pattern '{pattern}' at position {position}: {reason}")]
    MalformedPattern {
        /// The pattern being compiled
        pattern: String,
        /// Byte offset of the offending brace
        position: usize,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// The inspector knows nothing about the requested operation.
    #[error("no mapping registered for operation '{operation}' of '{declaring_type}'")]
    UnknownOperation {
        /// Name of the declaring type
        declaring_type: &'static str,
        /// Name of the operation
        operation: &'static str,
    },
    /// Both the type-level and the operation-level mapping are empty.
    #[error(
        "no type-level or operation-level mapping found for operation '{operation}' of '{declaring_type}'"
    )]
    NoMapping {
        /// Name of the declaring type
        declaring_type: &'static str,
        /// Name of the operation
        operation: &'static str,
    },
}

/// Errors raised while encoding a single argument value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The declared type (or the value itself) is map-like and cannot be
    /// flattened into one segment or one `name=value` pair.
    #[error("encoding links with parameters of type '{type_name}' is not supported")]
    UnsupportedType {
        /// The declared or runtime type
        type_name: String,
    },
    /// A directly stringified value contains a character its URI context
    /// does not allow unescaped.
    #[error("value '{value}' contains character '{character}' which is not allowed in a {context}")]
    InvalidCharacter {
        /// The stringified value
        value: String,
        /// The first offending character
        character: char,
        /// The context the value was validated against
        context: UriContext,
    },
    /// The conversion facility could not produce a string.
    #[error("failed to convert value '{value}': {cause}")]
    ConversionFailure {
        /// Debug rendering of the value
        value: String,
        /// Reason reported by the conversion
        cause: String,
    },
}

/// Errors raised while rendering a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A path variable produced no value.
    ///
    /// Path variables are mandatory, so this signals a template that does not
    /// match the invocation it is rendered against.
    #[error("missing value for {component}; parameters do not match the operation")]
    MissingVariable {
        /// Description of the component
        component: String,
    },
    /// An accessor points past the values supplied by the invocation.
    #[error("{accessor} is out of range; invocation supplies {len} values")]
    ArgumentOutOfRange {
        /// Description of the accessor
        accessor: String,
        /// Index the accessor reads
        index: usize,
        /// Number of values available
        len: usize,
    },
    /// The template was compiled for a different number of positional values.
    #[error(
        "template was compiled for {expected} positional values, invocation supplies {actual}"
    )]
    StaleTemplate {
        /// Positional values the template binds
        expected: usize,
        /// Positional values supplied
        actual: usize,
    },
    /// Compiling the template failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// Encoding an argument failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_variable_names_pattern() {
        let err = CompileError::UnresolvedVariable {
            name: "missing".to_string(),
            pattern: "/foo/{missing}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'missing'"));
        assert!(msg.contains("'/foo/{missing}'"));
    }

    #[test]
    fn invalid_character_names_context() {
        let err = EncodeError::InvalidCharacter {
            value: "a#b".to_string(),
            character: '#',
            context: UriContext::PathSegment,
        };
        assert_eq!(
            err.to_string(),
            "value 'a#b' contains character '#' which is not allowed in a path segment"
        );
    }

    #[test]
    fn render_error_wraps_encode_error() {
        let err: RenderError = EncodeError::UnsupportedType {
            type_name: "map".to_string(),
        }
        .into();
        assert!(matches!(err, RenderError::Encode(EncodeError::UnsupportedType { .. })));
        assert_eq!(
            err.to_string(),
            "encoding links with parameters of type 'map' is not supported"
        );
    }
}
