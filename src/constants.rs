//! Separators and markers used when assembling links.

/// Opens a placeholder in a URI pattern.
pub const PLACEHOLDER_OPEN: char = '{';

/// Closes a placeholder in a URI pattern.
pub const PLACEHOLDER_CLOSE: char = '}';

/// Separates a placeholder name from its regular-expression constraint.
pub const CONSTRAINT_SEPARATOR: char = ':';

/// Starts the query string.
pub const QUERY_START: char = '?';

/// Separates `name=value` pairs in the query string.
pub const PAIR_SEPARATOR: char = '&';

/// Separates a query parameter name from its value.
pub const NAME_VALUE_SEPARATOR: char = '=';

/// Joins the elements of a sequence rendered into a single value.
pub const LIST_SEPARATOR: char = ',';
