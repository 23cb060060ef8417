//! Placeholder scanning for URI patterns.
//!
//! A pattern is literal text interleaved with `{name}` placeholders. A
//! placeholder may carry a constraint after a colon, `{name:regex}`; the
//! constraint can contain balanced braces and is ignored when building links.

use crate::constants::{CONSTRAINT_SEPARATOR, PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};
use crate::error::CompileError;

/// A placeholder found in a pattern, with the literal text preceding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    name: &'a str,
    constraint: Option<&'a str>,
    literal: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Placeholder<'a> {
    /// Returns the placeholder name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the constraint following the name, if any.
    #[must_use]
    pub const fn constraint(&self) -> Option<&'a str> {
        self.constraint
    }

    /// Returns the literal text between the previous placeholder and this one.
    #[must_use]
    pub const fn literal(&self) -> &'a str {
        self.literal
    }

    /// Returns the byte span of the placeholder, braces included.
    #[must_use]
    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

/// A pattern split into placeholders and trailing literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern<'a> {
    placeholders: Vec<Placeholder<'a>>,
    trailing: &'a str,
}

impl<'a> ParsedPattern<'a> {
    /// Scans a pattern left to right.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MalformedPattern`] for an unterminated `{` or
    /// a placeholder with an empty or nested name.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_template::ParsedPattern;
    ///
    /// let parsed = ParsedPattern::parse("/people/{id:\\d{1,3}}/friends").unwrap();
    /// let names: Vec<_> = parsed.placeholders().iter().map(|p| p.name()).collect();
    /// assert_eq!(names, ["id"]);
    /// assert_eq!(parsed.placeholders()[0].literal(), "/people/");
    /// assert_eq!(parsed.trailing(), "/friends");
    /// ```
    pub fn parse(pattern: &'a str) -> Result<Self, CompileError> {
        let malformed = |position: usize, reason: &'static str| CompileError::MalformedPattern {
            pattern: pattern.to_string(),
            position,
            reason,
        };

        let mut placeholders = Vec::new();
        let mut literal_start = 0;

        while let Some(offset) = pattern[literal_start..].find(PLACEHOLDER_OPEN) {
            let start = literal_start + offset;
            let close = matching_close(pattern, start)
                .ok_or_else(|| malformed(start, "unterminated placeholder"))?;
            let body = &pattern[start + 1..close];

            let (name, constraint) = match body.split_once(CONSTRAINT_SEPARATOR) {
                Some((name, constraint)) => (name, Some(constraint)),
                None => (body, None),
            };
            if name.is_empty() {
                return Err(malformed(start, "empty placeholder name"));
            }
            if name.contains(PLACEHOLDER_OPEN) {
                return Err(malformed(start, "nested placeholder"));
            }

            placeholders.push(Placeholder {
                name,
                constraint,
                literal: &pattern[literal_start..start],
                start,
                end: close + 1,
            });
            literal_start = close + 1;
        }

        Ok(Self {
            placeholders,
            trailing: &pattern[literal_start..],
        })
    }

    /// Returns the placeholders in order of occurrence.
    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder<'a>] {
        &self.placeholders
    }

    /// Returns the literal text after the last placeholder.
    #[must_use]
    pub const fn trailing(&self) -> &'a str {
        self.trailing
    }
}

/// Finds the `}` closing the `{` at `open`, honouring nested braces.
fn matching_close(pattern: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in pattern[open..].char_indices() {
        if c == PLACEHOLDER_OPEN {
            depth += 1;
        } else if c == PLACEHOLDER_CLOSE {
            depth -= 1;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}
