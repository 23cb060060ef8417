//! Declared parameter types and the encoder strategy each one selects.

use std::fmt;

/// The declared type of an operation parameter.
///
/// This is the static type an operation inspector reports for a parameter,
/// not the runtime shape of the value passed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeclaredType {
    /// Text
    Str,
    /// Enumeration, identified by its type name
    Enum(String),
    /// Boolean
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Floating point number
    Float,
    /// UUID
    Uuid,
    /// Calendar date, rendered `YYYY-MM-DD`
    Date,
    /// Date-time with offset, rendered in ISO form
    DateTime,
    /// Collection or array of the element type
    List(Box<DeclaredType>),
    /// Map-like type
    Map,
    /// Any other type, identified by name
    Named(String),
}

/// The value-encoding strategy selected for a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncoderKind {
    /// Stringify and validate, never escape.
    Direct,
    /// Convert through the conversion facility, then percent-encode.
    Generic,
    /// Always fail.
    Unsupported,
}

impl DeclaredType {
    /// Shorthand for a list of the given element type.
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Classifies the type into the encoder strategy that renders it.
    ///
    /// Strings, enums, booleans, integers and longs (and lists of them) are
    /// rendered directly. Maps, and lists of maps, are unsupported. Everything
    /// else goes through the conversion facility.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_template::{DeclaredType, EncoderKind};
    ///
    /// assert_eq!(DeclaredType::Long.classify(), EncoderKind::Direct);
    /// assert_eq!(DeclaredType::list_of(DeclaredType::Str).classify(), EncoderKind::Direct);
    /// assert_eq!(DeclaredType::Date.classify(), EncoderKind::Generic);
    /// assert_eq!(DeclaredType::Map.classify(), EncoderKind::Unsupported);
    /// ```
    #[must_use]
    pub fn classify(&self) -> EncoderKind {
        match self {
            Self::Str | Self::Enum(_) | Self::Bool | Self::Int | Self::Long => EncoderKind::Direct,
            Self::Map => EncoderKind::Unsupported,
            Self::List(element) => element.classify(),
            Self::Float | Self::Uuid | Self::Date | Self::DateTime | Self::Named(_) => {
                EncoderKind::Generic
            }
        }
    }

    /// Returns the innermost element type of a (possibly nested) list, or the
    /// type itself.
    #[must_use]
    pub fn element_type(&self) -> &Self {
        match self {
            Self::List(element) => element.element_type(),
            other => other,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "string"),
            Self::Enum(name) | Self::Named(name) => write!(f, "{name}"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Uuid => write!(f, "uuid"),
            Self::Date => write!(f, "date"),
            Self::DateTime => write!(f, "date-time"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Map => write!(f, "map"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_types_are_direct() {
        for ty in [
            DeclaredType::Str,
            DeclaredType::Enum("Status".into()),
            DeclaredType::Bool,
            DeclaredType::Int,
            DeclaredType::Long,
        ] {
            assert_eq!(ty.classify(), EncoderKind::Direct, "{ty}");
        }
    }

    #[test]
    fn list_follows_element() {
        assert_eq!(
            DeclaredType::list_of(DeclaredType::Long).classify(),
            EncoderKind::Direct
        );
        assert_eq!(
            DeclaredType::list_of(DeclaredType::Date).classify(),
            EncoderKind::Generic
        );
        assert_eq!(
            DeclaredType::list_of(DeclaredType::Map).classify(),
            EncoderKind::Unsupported
        );
    }

    #[test]
    fn other_types_are_generic() {
        for ty in [
            DeclaredType::Float,
            DeclaredType::Uuid,
            DeclaredType::Date,
            DeclaredType::DateTime,
            DeclaredType::Named("Money".into()),
        ] {
            assert_eq!(ty.classify(), EncoderKind::Generic, "{ty}");
        }
    }

    #[test]
    fn element_type_unwraps_nested_lists() {
        let nested = DeclaredType::list_of(DeclaredType::list_of(DeclaredType::Uuid));
        assert_eq!(nested.element_type(), &DeclaredType::Uuid);
        assert_eq!(DeclaredType::Int.element_type(), &DeclaredType::Int);
    }

    #[test]
    fn display() {
        assert_eq!(
            DeclaredType::list_of(DeclaredType::Named("Money".into())).to_string(),
            "list<Money>"
        );
        assert_eq!(DeclaredType::Map.to_string(), "map");
    }
}
