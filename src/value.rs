//! Runtime argument values handed to a link template.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use uuid::Uuid;

use crate::constants::LIST_SEPARATOR;

/// An enumeration constant.
///
/// Links always use the symbolic `name`; the optional `label` is the
/// human-facing display form and never reaches a URI.
///
/// # Examples
///
/// ```
/// use link_template::EnumValue;
///
/// let status = EnumValue::new("ACTIVE").with_label("currently active");
/// assert_eq!(status.name(), "ACTIVE");
/// assert_eq!(status.to_string(), "currently active");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    name: String,
    label: Option<String>,
}

impl EnumValue {
    /// Creates an enum value with the given symbolic name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    /// Attaches a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label.as_deref().unwrap_or(&self.name))
    }
}

/// A single argument of an operation invocation.
///
/// `Null` stands for an absent argument. `List` covers both collections and
/// arrays; `Map` is carried only so that it can be rejected loudly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Str(String),
    /// Enumeration constant
    Enum(EnumValue),
    /// UUID
    Uuid(Uuid),
    /// Calendar date
    Date(NaiveDate),
    /// Date-time with offset
    Timestamp(DateTime<FixedOffset>),
    /// Collection or array, in iteration order
    List(Vec<Value>),
    /// Key-value pairs, in insertion order
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for [`Value::Null`] and for lists with no non-null
    /// element at any depth.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::List(items) => items.iter().all(Self::is_absent),
            _ => false,
        }
    }

    /// Returns the elements of a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a short name for the runtime shape of the value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::Uuid(_) => "uuid",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns true if the value is a map or a list holding one at any depth.
    #[must_use]
    pub fn contains_map(&self) -> bool {
        match self {
            Self::Map(_) => true,
            Self::List(items) => items.iter().any(Self::contains_map),
            _ => false,
        }
    }

    /// Appends the plain textual form of a scalar value.
    ///
    /// Enums write their symbolic name, timestamps their ISO form with
    /// milliseconds. Lists write their non-null elements joined by `,`.
    /// Returns false, writing nothing, for `Null` and `Map`.
    pub(crate) fn write_plain(&self, out: &mut String) -> bool {
        use std::fmt::Write;

        match self {
            Self::Null | Self::Map(_) => return false,
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Self::Long(l) => {
                let _ = write!(out, "{l}");
            }
            Self::Float(x) => {
                let _ = write!(out, "{x}");
            }
            Self::Str(s) => out.push_str(s),
            Self::Enum(e) => out.push_str(e.name()),
            Self::Uuid(u) => {
                let _ = write!(out, "{}", u.hyphenated());
            }
            Self::Date(d) => {
                let _ = write!(out, "{}", d.format("%Y-%m-%d"));
            }
            Self::Timestamp(t) => out.push_str(&t.to_rfc3339_opts(SecondsFormat::Millis, false)),
            Self::List(items) => {
                let mut first = true;
                for item in items.iter().filter(|item| !item.is_null()) {
                    if !first {
                        out.push(LIST_SEPARATOR);
                    }
                    first = false;
                    item.write_plain(out);
                }
            }
        }
        true
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(value: &Value) -> Option<String> {
        let mut out = String::new();
        value.write_plain(&mut out).then_some(out)
    }

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(plain(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(plain(&Value::from(42)).as_deref(), Some("42"));
        assert_eq!(plain(&Value::from(-7_i64)).as_deref(), Some("-7"));
        assert_eq!(plain(&Value::from(1.5)).as_deref(), Some("1.5"));
        assert_eq!(plain(&Value::from("abc")).as_deref(), Some("abc"));
    }

    #[test]
    fn enum_renders_name_not_label() {
        let value = Value::from(EnumValue::new("VALUE1").with_label("value one"));
        assert_eq!(plain(&value).as_deref(), Some("VALUE1"));
    }

    #[test]
    fn list_joins_with_comma_skipping_nulls() {
        let value = Value::List(vec![Value::from(1), Value::Null, Value::from(3)]);
        assert_eq!(plain(&value).as_deref(), Some("1,3"));
    }

    #[test]
    fn date_and_timestamp_render_iso() {
        let date = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        assert_eq!(plain(&Value::from(date)).as_deref(), Some("2013-01-01"));

        let ts = DateTime::parse_from_rfc3339("2013-01-01T12:00:00+01:00").unwrap();
        assert_eq!(
            plain(&Value::from(ts)).as_deref(),
            Some("2013-01-01T12:00:00.000+01:00")
        );
    }

    #[test]
    fn null_and_map_write_nothing() {
        assert_eq!(plain(&Value::Null), None);
        assert_eq!(plain(&Value::Map(vec![("k".into(), Value::from(1))])), None);
    }

    #[test]
    fn lists_without_values_are_absent() {
        assert!(Value::Null.is_absent());
        assert!(Value::from(Vec::<i64>::new()).is_absent());
        assert!(Value::List(vec![Value::Null, Value::List(vec![Value::Null])]).is_absent());
        assert!(!Value::List(vec![Value::Null, Value::from(1)]).is_absent());
        assert!(!Value::from("").is_absent());
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
    }

    #[test]
    fn contains_map_looks_into_lists() {
        let nested = Value::List(vec![Value::from(1), Value::Map(Vec::new())]);
        assert!(nested.contains_map());
        assert!(!Value::from(vec!["a", "b"]).contains_map());
    }

    #[test]
    fn kind_names_shape() {
        assert_eq!(Value::from(vec![1, 2]).kind(), "list");
        assert_eq!(Value::Map(Vec::new()).kind(), "map");
    }
}
