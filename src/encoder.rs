//! Value encoders: how a runtime value becomes URI text.

use std::sync::Arc;

use crate::char_class::UriContext;
use crate::constants::LIST_SEPARATOR;
use crate::conversion::Conversions;
use crate::declared_type::{DeclaredType, EncoderKind};
use crate::error::EncodeError;
use crate::value::Value;

/// Encodes argument values for one URI context.
///
/// The strategy is chosen once per parameter from its declared type (see
/// [`DeclaredType::classify`]) and reused for every render.
#[derive(Debug, Clone)]
pub enum ValueEncoder {
    /// Stringifies and validates; never escapes.
    Direct {
        /// Context the output is validated against
        context: UriContext,
    },
    /// Converts through the conversion facility, then percent-encodes.
    Generic {
        /// Context the output is encoded for
        context: UriContext,
        /// Declared type driving the conversion
        declared: DeclaredType,
        /// Conversion facility
        conversions: Arc<Conversions>,
    },
    /// Fails for every non-null value.
    Unsupported {
        /// The offending declared type
        declared: DeclaredType,
    },
}

impl ValueEncoder {
    /// Creates a Direct encoder for the context.
    #[must_use]
    pub const fn direct(context: UriContext) -> Self {
        Self::Direct { context }
    }

    /// Selects the encoder for a declared type.
    #[must_use]
    pub fn for_type(
        declared: &DeclaredType,
        context: UriContext,
        conversions: &Arc<Conversions>,
    ) -> Self {
        match declared.classify() {
            EncoderKind::Direct => Self::Direct { context },
            EncoderKind::Generic => Self::Generic {
                context,
                declared: declared.clone(),
                conversions: Arc::clone(conversions),
            },
            EncoderKind::Unsupported => Self::Unsupported {
                declared: declared.clone(),
            },
        }
    }

    /// Returns the strategy of this encoder.
    #[must_use]
    pub const fn kind(&self) -> EncoderKind {
        match self {
            Self::Direct { .. } => EncoderKind::Direct,
            Self::Generic { .. } => EncoderKind::Generic,
            Self::Unsupported { .. } => EncoderKind::Unsupported,
        }
    }

    /// Encodes a value. Returns `None` for a null value and for a list with
    /// no non-null elements.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnsupportedType`] for map-like values or declared types
    /// - [`EncodeError::InvalidCharacter`] when a Direct value holds a
    ///   character its context does not allow
    /// - [`EncodeError::ConversionFailure`] when a Generic conversion fails
    ///
    /// # Examples
    ///
    /// ```
    /// use link_template::{EncodeError, UriContext, Value, ValueEncoder};
    ///
    /// let encoder = ValueEncoder::direct(UriContext::PathSegment);
    /// assert_eq!(encoder.encode(&Value::from(42)).unwrap().as_deref(), Some("42"));
    /// assert!(matches!(
    ///     encoder.encode(&Value::from("a#b")),
    ///     Err(EncodeError::InvalidCharacter { character: '#', .. })
    /// ));
    /// ```
    pub fn encode(&self, value: &Value) -> Result<Option<String>, EncodeError> {
        if value.is_absent() {
            return Ok(None);
        }

        match self {
            Self::Direct { context } => encode_direct(*context, value).map(Some),
            Self::Generic {
                context,
                declared,
                conversions,
            } => encode_generic(*context, declared.element_type(), conversions, value).map(Some),
            Self::Unsupported { declared } => Err(EncodeError::UnsupportedType {
                type_name: declared.to_string(),
            }),
        }
    }
}

fn encode_direct(context: UriContext, value: &Value) -> Result<String, EncodeError> {
    if value.contains_map() {
        return Err(EncodeError::UnsupportedType {
            type_name: value.kind().to_string(),
        });
    }

    let mut text = String::new();
    value.write_plain(&mut text);

    match context.first_disallowed(&text) {
        Some(character) => Err(EncodeError::InvalidCharacter {
            value: text,
            character,
            context,
        }),
        None => Ok(text),
    }
}

fn encode_generic(
    context: UriContext,
    target: &DeclaredType,
    conversions: &Conversions,
    value: &Value,
) -> Result<String, EncodeError> {
    let Value::List(items) = value else {
        let converted = conversions.convert(value, target)?;
        return Ok(context.encode(&converted).into_owned());
    };

    let mut out = String::new();
    for (i, item) in items.iter().filter(|item| !item.is_null()).enumerate() {
        if i > 0 {
            out.push(LIST_SEPARATOR);
        }
        let piece = encode_generic(context, target, conversions, item)?;
        out.push_str(&piece);
    }
    Ok(out)
}
