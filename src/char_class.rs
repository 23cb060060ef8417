//! RFC 3986 character classes for the two contexts a link value can land in.
//!
//! Each context carries its rules as data: an allowed-character predicate used
//! to validate values that are already representable, and a percent-encoding
//! set used to escape values that are not.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in a path segment: everything outside `pchar`.
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Characters escaped in a query parameter value.
///
/// `=`, `&` and `+` stay escaped: the first two delimit pairs and form
/// decoders read a bare `+` as a space.
const QUERY_PARAMETER_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b';')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'?');

struct ContextRules {
    allowed: fn(char) -> bool,
    encode_set: &'static AsciiSet,
    description: &'static str,
}

const PATH_SEGMENT_RULES: ContextRules = ContextRules {
    allowed: path_segment_allows,
    encode_set: PATH_SEGMENT_SET,
    description: "path segment",
};

const QUERY_PARAMETER_RULES: ContextRules = ContextRules {
    allowed: query_parameter_allows,
    encode_set: QUERY_PARAMETER_SET,
    description: "query parameter",
};

/// The part of a URI a rendered value is written into.
///
/// # Examples
///
/// ```
/// use link_template::UriContext;
///
/// assert!(UriContext::PathSegment.is_allowed('@'));
/// assert!(!UriContext::PathSegment.is_allowed('/'));
/// assert!(!UriContext::QueryParameter.is_allowed('&'));
///
/// assert_eq!(UriContext::PathSegment.encode("a b/c"), "a%20b%2Fc");
/// assert_eq!(UriContext::QueryParameter.encode("a=b/c"), "a%3Db/c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriContext {
    /// A single path segment: `pchar` plus `%`.
    PathSegment,
    /// A query parameter value: `pchar`, `/`, `?` and `%`, minus `=` and `&`.
    QueryParameter,
}

impl UriContext {
    const fn rules(self) -> &'static ContextRules {
        match self {
            Self::PathSegment => &PATH_SEGMENT_RULES,
            Self::QueryParameter => &QUERY_PARAMETER_RULES,
        }
    }

    /// Returns true if the character may appear unescaped in this context.
    #[must_use]
    pub fn is_allowed(self, c: char) -> bool {
        (self.rules().allowed)(c)
    }

    /// Returns true if every character of the input may appear unescaped.
    #[must_use]
    pub fn is_allowed_str(self, input: &str) -> bool {
        self.first_disallowed(input).is_none()
    }

    /// Returns the first character of the input this context does not allow.
    #[must_use]
    pub fn first_disallowed(self, input: &str) -> Option<char> {
        let allowed = self.rules().allowed;
        input.chars().find(|&c| !allowed(c))
    }

    /// Percent-encodes the input for this context.
    ///
    /// Non-ASCII characters are encoded as their UTF-8 bytes. Because the input
    /// is a `&str`, encoding cannot fail.
    #[must_use]
    pub fn encode(self, input: &str) -> Cow<'_, str> {
        utf8_percent_encode(input, self.rules().encode_set).into()
    }
}

impl fmt::Display for UriContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rules().description)
    }
}

fn path_segment_allows(c: char) -> bool {
    is_pchar(c) || c == '%'
}

fn query_parameter_allows(c: char) -> bool {
    if c == '=' || c == '&' {
        return false;
    }
    is_pchar(c) || matches!(c, '/' | '?' | '%')
}

/// `unreserved / sub-delims / ":" / "@"` (RFC 3986, appendix A).
#[must_use]
pub const fn is_pchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delimiter(c) || c == ':' || c == '@'
}

/// `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
#[must_use]
pub const fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`.
#[must_use]
pub const fn is_sub_delimiter(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_allows_pchar_and_percent() {
        for c in "azAZ09-._~!$&'()*+,;=:@%".chars() {
            assert!(UriContext::PathSegment.is_allowed(c), "expected '{c}' allowed");
        }
    }

    #[test]
    fn path_segment_rejects_delimiters() {
        for c in "/?#[] \"<>".chars() {
            assert!(!UriContext::PathSegment.is_allowed(c), "expected '{c}' rejected");
        }
    }

    #[test]
    fn query_parameter_rejects_pair_delimiters() {
        assert!(!UriContext::QueryParameter.is_allowed('='));
        assert!(!UriContext::QueryParameter.is_allowed('&'));
        assert!(UriContext::QueryParameter.is_allowed('/'));
        assert!(UriContext::QueryParameter.is_allowed('?'));
        assert!(UriContext::QueryParameter.is_allowed('%'));
        assert!(!UriContext::QueryParameter.is_allowed('#'));
    }

    #[test]
    fn first_disallowed_reports_offender() {
        assert_eq!(UriContext::PathSegment.first_disallowed("ab#c/d"), Some('#'));
        assert_eq!(UriContext::PathSegment.first_disallowed("abc"), None);
        assert!(UriContext::QueryParameter.is_allowed_str("a/b?c"));
        assert!(!UriContext::QueryParameter.is_allowed_str("a=b"));
    }

    #[test]
    fn non_ascii_is_never_allowed() {
        assert!(!UriContext::PathSegment.is_allowed('ü'));
        assert!(!UriContext::QueryParameter.is_allowed('ü'));
    }

    #[test]
    fn encode_path_segment() {
        assert_eq!(UriContext::PathSegment.encode("/ ="), "%2F%20=");
        assert_eq!(UriContext::PathSegment.encode("a+b"), "a+b");
        assert_eq!(UriContext::PathSegment.encode("100%"), "100%25");
    }

    #[test]
    fn encode_query_parameter() {
        assert_eq!(UriContext::QueryParameter.encode("/ ="), "/%20%3D");
        assert_eq!(UriContext::QueryParameter.encode("a&b"), "a%26b");
        assert_eq!(UriContext::QueryParameter.encode("+01:00"), "%2B01:00");
    }

    #[test]
    fn encode_utf8() {
        assert_eq!(UriContext::PathSegment.encode("ü"), "%C3%BC");
    }

    #[test]
    fn encode_borrows_when_nothing_to_escape() {
        assert!(matches!(
            UriContext::PathSegment.encode("plain"),
            Cow::Borrowed("plain")
        ));
    }

    #[test]
    fn encoded_output_is_allowed() {
        for context in [UriContext::PathSegment, UriContext::QueryParameter] {
            let encoded = context.encode("a b=c&d/e?f#g%h+ü");
            assert!(context.is_allowed_str(&encoded), "{context}: {encoded}");
        }
    }

    #[test]
    fn display_names_context() {
        assert_eq!(UriContext::PathSegment.to_string(), "path segment");
        assert_eq!(UriContext::QueryParameter.to_string(), "query parameter");
    }
}
