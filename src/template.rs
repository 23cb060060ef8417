//! Compiled templates and rendering.

use crate::component::{Component, QueryVariable};
use crate::constants::{PAIR_SEPARATOR, QUERY_START};
use crate::error::RenderError;
use crate::invocation::Invocation;

/// A pattern bound to accessors and encoders, ready to render.
///
/// Immutable once built; rendering never mutates it, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    path: Vec<Component>,
    query: Vec<QueryVariable>,
    positional_count: usize,
}

impl CompiledTemplate {
    /// Assembles a template from its components.
    ///
    /// `positional_count` is the number of positional values the template
    /// was compiled for.
    #[must_use]
    pub const fn new(
        path: Vec<Component>,
        query: Vec<QueryVariable>,
        positional_count: usize,
    ) -> Self {
        Self {
            path,
            query,
            positional_count,
        }
    }

    /// Returns the path components in render order.
    #[must_use]
    pub fn path_components(&self) -> &[Component] {
        &self.path
    }

    /// Returns the query components in render order.
    #[must_use]
    pub fn query_components(&self) -> &[QueryVariable] {
        &self.query
    }

    /// Returns the number of positional values this template binds.
    #[must_use]
    pub const fn positional_count(&self) -> usize {
        self.positional_count
    }

    /// Renders a link: `base`, then the path, then the query string if any
    /// query component contributed.
    ///
    /// # Errors
    ///
    /// - [`RenderError::StaleTemplate`] if the invocation supplies a different
    ///   number of positional values than the template was compiled for
    /// - [`RenderError::MissingVariable`] if a path variable has no value
    /// - [`RenderError::ArgumentOutOfRange`] if an accessor points past the
    ///   supplied values
    /// - [`RenderError::Encode`] if a value cannot be encoded
    pub fn render(&self, base: &str, invocation: &Invocation) -> Result<String, RenderError> {
        let actual = invocation.positional().len();
        if actual != self.positional_count {
            return Err(RenderError::StaleTemplate {
                expected: self.positional_count,
                actual,
            });
        }

        let mut buf = String::from(base);
        for component in &self.path {
            component.append(&mut buf, invocation)?;
        }

        buf.push(QUERY_START);
        let mut contributed = false;
        for variable in &self.query {
            let rollback = buf.len();
            if contributed {
                buf.push(PAIR_SEPARATOR);
            }
            if variable.append(&mut buf, invocation)? {
                contributed = true;
            } else {
                buf.truncate(rollback);
            }
        }
        if !contributed {
            buf.pop();
        }

        Ok(buf)
    }

    /// Renders the path and query without a base.
    ///
    /// # Errors
    ///
    /// See [`CompiledTemplate::render`].
    pub fn expand(&self, invocation: &Invocation) -> Result<String, RenderError> {
        self.render("", invocation)
    }
}
