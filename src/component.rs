//! Render-ready pieces of a compiled template.

use std::fmt;

use crate::constants::{NAME_VALUE_SEPARATOR, PAIR_SEPARATOR};
use crate::encoder::ValueEncoder;
use crate::error::RenderError;
use crate::invocation::Invocation;
use crate::value::Value;

/// Where a component reads its runtime value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// Index into the invocation's positional values.
    Positional(usize),
    /// Index into the invocation's full argument list.
    Argument(usize),
}

impl Accessor {
    /// Fetches the value this accessor points at.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ArgumentOutOfRange`] if the invocation supplies
    /// fewer values than the index requires.
    pub fn fetch<'a>(&self, invocation: &'a Invocation) -> Result<&'a Value, RenderError> {
        let (values, index) = match *self {
            Self::Positional(index) => (invocation.positional(), index),
            Self::Argument(index) => (invocation.arguments(), index),
        };
        values.get(index).ok_or_else(|| RenderError::ArgumentOutOfRange {
            accessor: self.to_string(),
            index,
            len: values.len(),
        })
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(index) => write!(f, "positional value #{index}"),
            Self::Argument(index) => write!(f, "argument #{index}"),
        }
    }
}

/// Literal pattern text, reproduced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPart {
    text: String,
}

impl StaticPart {
    /// Creates a static part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the literal text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn append(&self, buf: &mut String) {
        buf.push_str(&self.text);
    }
}

/// A mandatory path placeholder.
#[derive(Debug, Clone)]
pub struct PathVariable {
    name: String,
    accessor: Accessor,
    encoder: ValueEncoder,
}

impl PathVariable {
    /// Creates a path variable for the named placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, accessor: Accessor, encoder: ValueEncoder) -> Self {
        Self {
            name: name.into(),
            accessor,
            encoder,
        }
    }

    /// Returns the placeholder name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the accessor.
    #[must_use]
    pub const fn accessor(&self) -> Accessor {
        self.accessor
    }

    /// Returns the encoder.
    #[must_use]
    pub const fn encoder(&self) -> &ValueEncoder {
        &self.encoder
    }

    fn append(&self, buf: &mut String, invocation: &Invocation) -> Result<(), RenderError> {
        let value = self.accessor.fetch(invocation)?;
        match self.encoder.encode(value)? {
            Some(text) => {
                buf.push_str(&text);
                Ok(())
            }
            None => Err(RenderError::MissingVariable {
                component: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for PathVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path variable '{{{}}}' bound to {}", self.name, self.accessor)
    }
}

/// An optional query parameter.
#[derive(Debug, Clone)]
pub struct QueryVariable {
    name: String,
    accessor: Accessor,
    encoder: ValueEncoder,
}

impl QueryVariable {
    /// Creates a query variable.
    #[must_use]
    pub fn new(name: impl Into<String>, accessor: Accessor, encoder: ValueEncoder) -> Self {
        Self {
            name: name.into(),
            accessor,
            encoder,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the accessor.
    #[must_use]
    pub const fn accessor(&self) -> Accessor {
        self.accessor
    }

    /// Returns the encoder.
    #[must_use]
    pub const fn encoder(&self) -> &ValueEncoder {
        &self.encoder
    }

    /// Appends this parameter's `name=value` pairs.
    ///
    /// A list emits one pair per non-null element, joined by `&`. Returns
    /// whether at least one pair was written; a null value or an empty list
    /// writes nothing.
    ///
    /// # Errors
    ///
    /// Propagates accessor and encoder failures.
    pub fn append(&self, buf: &mut String, invocation: &Invocation) -> Result<bool, RenderError> {
        let value = self.accessor.fetch(invocation)?;

        let Some(items) = value.as_list() else {
            return self.append_pair(buf, value, false);
        };

        let mut wrote = false;
        for item in items {
            wrote |= self.append_pair(buf, item, wrote)?;
        }
        Ok(wrote)
    }

    fn append_pair(
        &self,
        buf: &mut String,
        value: &Value,
        separate: bool,
    ) -> Result<bool, RenderError> {
        let Some(encoded) = self.encoder.encode(value)? else {
            return Ok(false);
        };
        if separate {
            buf.push(PAIR_SEPARATOR);
        }
        buf.push_str(&self.name);
        buf.push(NAME_VALUE_SEPARATOR);
        buf.push_str(&encoded);
        Ok(true)
    }
}

impl fmt::Display for QueryVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query variable '{}' bound to {}", self.name, self.accessor)
    }
}

/// One piece of a compiled template.
#[derive(Debug, Clone)]
pub enum Component {
    /// Literal text
    StaticPart(StaticPart),
    /// Mandatory path placeholder
    PathVariable(PathVariable),
    /// Optional query parameter
    QueryVariable(QueryVariable),
}

impl Component {
    /// Appends this component and reports whether it contributed output.
    ///
    /// Static parts and path variables always contribute or fail.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingVariable`] when a path variable has no
    /// value, and propagates accessor and encoder failures.
    pub fn append(&self, buf: &mut String, invocation: &Invocation) -> Result<bool, RenderError> {
        match self {
            Self::StaticPart(part) => {
                part.append(buf);
                Ok(true)
            }
            Self::PathVariable(variable) => variable.append(buf, invocation).map(|()| true),
            Self::QueryVariable(variable) => variable.append(buf, invocation),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticPart(part) => write!(f, "static part '{}'", part.text),
            Self::PathVariable(variable) => variable.fmt(f),
            Self::QueryVariable(variable) => variable.fmt(f),
        }
    }
}

impl From<StaticPart> for Component {
    fn from(part: StaticPart) -> Self {
        Self::StaticPart(part)
    }
}

impl From<PathVariable> for Component {
    fn from(variable: PathVariable) -> Self {
        Self::PathVariable(variable)
    }
}

impl From<QueryVariable> for Component {
    fn from(variable: QueryVariable) -> Self {
        Self::QueryVariable(variable)
    }
}
