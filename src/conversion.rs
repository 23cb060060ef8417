//! Declared-type-driven conversion of values to strings.
//!
//! The Generic encoder hands every value to a [`Conversions`] facility before
//! percent-encoding it. Built-in conversions cover dates, timestamps, UUIDs
//! and floats; callers may register their own per declared type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, SecondsFormat};
use uuid::Uuid;

use crate::declared_type::DeclaredType;
use crate::error::EncodeError;
use crate::value::Value;

/// A user-supplied conversion. Returns the textual form or a failure reason.
pub type ConversionFn = dyn Fn(&Value) -> Result<String, String> + Send + Sync;

const ISO_DATE: &str = "%Y-%m-%d";

/// Converts values to strings according to their declared type.
///
/// # Examples
///
/// ```
/// use link_template::{Conversions, DeclaredType, Value};
///
/// let conversions = Conversions::new().with(DeclaredType::Named("Cents".into()), |value| {
///     match value {
///         Value::Long(cents) => Ok(format!("{}.{:02}", cents / 100, cents % 100)),
///         other => Err(format!("expected cents, got {}", other.kind())),
///     }
/// });
///
/// let text = conversions
///     .convert(&Value::Long(1234), &DeclaredType::Named("Cents".into()))
///     .unwrap();
/// assert_eq!(text, "12.34");
/// ```
#[derive(Clone, Default)]
pub struct Conversions {
    custom: HashMap<DeclaredType, Arc<ConversionFn>>,
}

impl Conversions {
    /// Creates a facility with only the built-in conversions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a conversion for a declared type, replacing any previous one.
    #[must_use]
    pub fn with<F>(mut self, declared: DeclaredType, conversion: F) -> Self
    where
        F: Fn(&Value) -> Result<String, String> + Send + Sync + 'static,
    {
        self.register(declared, conversion);
        self
    }

    /// Registers a conversion for a declared type, replacing any previous one.
    pub fn register<F>(&mut self, declared: DeclaredType, conversion: F)
    where
        F: Fn(&Value) -> Result<String, String> + Send + Sync + 'static,
    {
        self.custom.insert(declared, Arc::new(conversion));
    }

    /// Returns true if a custom conversion is registered for the type.
    #[must_use]
    pub fn has_custom(&self, declared: &DeclaredType) -> bool {
        self.custom.contains_key(declared)
    }

    /// Converts a single value to a string.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnsupportedType`] for map values and
    /// [`EncodeError::ConversionFailure`] when the value cannot be represented
    /// as the declared type.
    pub fn convert(&self, value: &Value, declared: &DeclaredType) -> Result<String, EncodeError> {
        if value.contains_map() {
            return Err(EncodeError::UnsupportedType {
                type_name: value.kind().to_string(),
            });
        }

        let result = match self.custom.get(declared) {
            Some(conversion) => conversion(value),
            None => builtin(value, declared),
        };

        result.map_err(|cause| EncodeError::ConversionFailure {
            value: describe(value),
            cause,
        })
    }
}

impl fmt::Debug for Conversions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.custom.keys().map(ToString::to_string).collect();
        types.sort();
        f.debug_struct("Conversions").field("custom", &types).finish()
    }
}

fn builtin(value: &Value, declared: &DeclaredType) -> Result<String, String> {
    match (declared, value) {
        (_, Value::Null) => Err("no value to convert".to_string()),
        (_, Value::List(_)) => Err("a list cannot be converted to a single value".to_string()),

        (DeclaredType::Date, Value::Date(_))
        | (DeclaredType::DateTime, Value::Timestamp(_))
        | (DeclaredType::Uuid, Value::Uuid(_))
        | (DeclaredType::Float, Value::Float(_) | Value::Int(_) | Value::Long(_)) => plain(value),

        (DeclaredType::Date, Value::Timestamp(t)) => Ok(t.date_naive().format(ISO_DATE).to_string()),
        (DeclaredType::Date, Value::Str(s)) => NaiveDate::parse_from_str(s, ISO_DATE)
            .map(|d| d.format(ISO_DATE).to_string())
            .map_err(|e| format!("not an ISO date: {e}")),
        (DeclaredType::Date, other) => Err(format!("cannot convert {} to a date", other.kind())),

        (DeclaredType::DateTime, Value::Str(s)) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, false))
            .map_err(|e| format!("not an ISO date-time: {e}")),
        (DeclaredType::DateTime, other) => {
            Err(format!("cannot convert {} to a date-time", other.kind()))
        }

        (DeclaredType::Uuid, Value::Str(s)) => Uuid::parse_str(s)
            .map(|u| u.hyphenated().to_string())
            .map_err(|e| format!("not a UUID: {e}")),
        (DeclaredType::Uuid, other) => Err(format!("cannot convert {} to a UUID", other.kind())),

        (DeclaredType::Float, Value::Str(s)) => s
            .parse::<f64>()
            .map(|x| x.to_string())
            .map_err(|e| format!("not a number: {e}")),
        (DeclaredType::Float, other) => Err(format!("cannot convert {} to a float", other.kind())),

        _ => plain(value),
    }
}

fn plain(value: &Value) -> Result<String, String> {
    let mut out = String::new();
    if value.write_plain(&mut out) {
        Ok(out)
    } else {
        Err(format!("{} has no textual form", value.kind()))
    }
}

/// Describes a value for error messages: its plain form, or its kind.
pub(crate) fn describe(value: &Value) -> String {
    plain(value).unwrap_or_else(|_| value.kind().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp() -> Value {
        Value::Timestamp(DateTime::parse_from_rfc3339("2013-01-01T12:00:00+01:00").unwrap())
    }

    #[test]
    fn date_from_timestamp_drops_time() {
        let text = Conversions::new()
            .convert(&timestamp(), &DeclaredType::Date)
            .unwrap();
        assert_eq!(text, "2013-01-01");
    }

    #[test]
    fn date_time_keeps_offset() {
        let text = Conversions::new()
            .convert(&timestamp(), &DeclaredType::DateTime)
            .unwrap();
        assert_eq!(text, "2013-01-01T12:00:00.000+01:00");
    }

    #[test]
    fn date_time_from_string_is_normalised() {
        let text = Conversions::new()
            .convert(&Value::from("2013-01-01T12:00:00Z"), &DeclaredType::DateTime)
            .unwrap();
        assert_eq!(text, "2013-01-01T12:00:00.000+00:00");
    }

    #[test]
    fn uuid_is_hyphenated_lowercase() {
        let text = Conversions::new()
            .convert(
                &Value::from("67E55044-10B1-426F-9247-BB680E5FE0C8"),
                &DeclaredType::Uuid,
            )
            .unwrap();
        assert_eq!(text, "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn bad_uuid_is_conversion_failure() {
        let err = Conversions::new()
            .convert(&Value::from("nope"), &DeclaredType::Uuid)
            .unwrap_err();
        assert!(matches!(err, EncodeError::ConversionFailure { ref value, .. } if value == "nope"));
    }

    #[test]
    fn map_is_unsupported() {
        let err = Conversions::new()
            .convert(&Value::Map(Vec::new()), &DeclaredType::Named("Anything".into()))
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnsupportedType {
                type_name: "map".to_string()
            }
        );
    }

    #[test]
    fn custom_conversion_wins() {
        let conversions =
            Conversions::new().with(DeclaredType::Date, |_| Ok("yesterday".to_string()));
        assert!(conversions.has_custom(&DeclaredType::Date));
        assert_eq!(
            conversions.convert(&timestamp(), &DeclaredType::Date).unwrap(),
            "yesterday"
        );
    }

    #[test]
    fn custom_failure_carries_cause() {
        let conversions = Conversions::new()
            .with(DeclaredType::Named("Even".into()), |_| Err("odd number".to_string()));
        let err = conversions
            .convert(&Value::from(3), &DeclaredType::Named("Even".into()))
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::ConversionFailure {
                value: "3".to_string(),
                cause: "odd number".to_string()
            }
        );
    }

    #[test]
    fn unknown_named_type_uses_plain_form() {
        let text = Conversions::new()
            .convert(&Value::from(2.5), &DeclaredType::Named("Ratio".into()))
            .unwrap();
        assert_eq!(text, "2.5");
    }

    #[test]
    fn debug_lists_custom_types() {
        let conversions = Conversions::new().with(DeclaredType::Uuid, |_| Ok(String::new()));
        assert_eq!(format!("{conversions:?}"), "Conversions { custom: [\"uuid\"] }");
    }
}
