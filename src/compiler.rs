//! Turns a URI pattern plus parameter descriptors into a [`CompiledTemplate`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::char_class::UriContext;
use crate::component::{Accessor, Component, PathVariable, QueryVariable, StaticPart};
use crate::conversion::Conversions;
use crate::encoder::ValueEncoder;
use crate::error::CompileError;
use crate::inspector::{OperationMapping, ParameterDescriptor};
use crate::pattern::ParsedPattern;
use crate::template::CompiledTemplate;

/// Compiles patterns into render-ready templates.
///
/// Placeholders are bound left to right. The first `positional_count`
/// placeholders take the invocation's positional values in order, whatever
/// their names; the rest are looked up by name among the path parameters.
/// Every query parameter becomes a query component, whether or not the
/// pattern mentions it.
///
/// # Examples
///
/// ```
/// use link_template::{DeclaredType, Invocation, ParameterDescriptor, TemplateCompiler};
///
/// struct Orders;
///
/// let compiler = TemplateCompiler::default();
/// let template = compiler
///     .compile(
///         "/shops/{shop}/orders/{id}",
///         1,
///         &[ParameterDescriptor::new("id", DeclaredType::Long, 0)],
///         &[ParameterDescriptor::new("page", DeclaredType::Int, 1)],
///     )
///     .unwrap();
///
/// let invocation = Invocation::of::<Orders>("show")
///     .with_positional(["acme"])
///     .with_arguments([Some(17), None]);
/// assert_eq!(template.expand(&invocation).unwrap(), "/shops/acme/orders/17");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateCompiler {
    conversions: Arc<Conversions>,
}

impl TemplateCompiler {
    /// Creates a compiler whose Generic encoders use `conversions`.
    #[must_use]
    pub fn new(conversions: Conversions) -> Self {
        Self::with_shared(Arc::new(conversions))
    }

    /// Creates a compiler sharing an existing conversion facility.
    #[must_use]
    pub const fn with_shared(conversions: Arc<Conversions>) -> Self {
        Self { conversions }
    }

    /// Returns the conversion facility.
    #[must_use]
    pub const fn conversions(&self) -> &Arc<Conversions> {
        &self.conversions
    }

    /// Compiles an operation mapping.
    ///
    /// # Errors
    ///
    /// See [`TemplateCompiler::compile`].
    pub fn compile_mapping(
        &self,
        mapping: &OperationMapping,
        positional_count: usize,
    ) -> Result<CompiledTemplate, CompileError> {
        self.compile(
            mapping.pattern(),
            positional_count,
            mapping.path_params(),
            mapping.query_params(),
        )
    }

    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// - [`CompileError::MalformedPattern`] if the pattern cannot be scanned
    /// - [`CompileError::UnresolvedVariable`] if a placeholder is bound
    ///   neither positionally nor by name
    /// - [`CompileError::TooManyPlaceholders`] if positional values took
    ///   placeholders whose names a path parameter expected, leaving a later
    ///   placeholder unbound
    pub fn compile(
        &self,
        pattern: &str,
        positional_count: usize,
        path_params: &[ParameterDescriptor],
        query_params: &[ParameterDescriptor],
    ) -> Result<CompiledTemplate, CompileError> {
        let parsed = ParsedPattern::parse(pattern)?;
        let named: HashMap<&str, &ParameterDescriptor> =
            path_params.iter().map(|d| (d.name(), d)).collect();

        let mut path = Vec::with_capacity(parsed.placeholders().len() * 2 + 1);
        let mut consumed = 0;

        for placeholder in parsed.placeholders() {
            if !placeholder.literal().is_empty() {
                path.push(Component::from(StaticPart::new(placeholder.literal())));
            }

            let name = placeholder.name();
            let variable = if consumed < positional_count {
                consumed += 1;
                PathVariable::new(
                    name,
                    Accessor::Positional(consumed - 1),
                    ValueEncoder::direct(UriContext::PathSegment),
                )
            } else if let Some(descriptor) = named.get(name) {
                PathVariable::new(
                    name,
                    Accessor::Argument(descriptor.index()),
                    self.encoder(descriptor, UriContext::PathSegment),
                )
            } else {
                return Err(unresolved(&parsed, pattern, name, consumed, path_params));
            };
            path.push(Component::from(variable));
        }

        if !parsed.trailing().is_empty() {
            path.push(Component::from(StaticPart::new(parsed.trailing())));
        }

        let unused: Vec<&str> = path_params
            .iter()
            .map(ParameterDescriptor::name)
            .filter(|name| {
                !parsed.placeholders()[consumed..]
                    .iter()
                    .any(|p| p.name() == *name)
            })
            .collect();
        if !unused.is_empty() {
            debug!(pattern, ?unused, "path parameters not bound by any placeholder");
        }

        let query: Vec<QueryVariable> = query_params
            .iter()
            .map(|descriptor| {
                QueryVariable::new(
                    descriptor.name(),
                    Accessor::Argument(descriptor.index()),
                    self.encoder(descriptor, UriContext::QueryParameter),
                )
            })
            .collect();

        debug!(
            pattern,
            positional_count,
            path_components = path.len(),
            query_components = query.len(),
            "compiled link template"
        );
        Ok(CompiledTemplate::new(path, query, positional_count))
    }

    fn encoder(&self, descriptor: &ParameterDescriptor, context: UriContext) -> ValueEncoder {
        ValueEncoder::for_type(descriptor.declared_type(), context, &self.conversions)
    }
}

/// Builds the error for a placeholder no binding could satisfy.
///
/// When positional values consumed placeholders that a path parameter was
/// named after, the positional/named split is what failed, not a typo.
fn unresolved(
    parsed: &ParsedPattern<'_>,
    pattern: &str,
    name: &str,
    consumed: usize,
    path_params: &[ParameterDescriptor],
) -> CompileError {
    let shadowed = parsed.placeholders()[..consumed]
        .iter()
        .enumerate()
        .find(|(_, p)| path_params.iter().any(|d| d.name() == p.name()));

    match shadowed {
        Some((position, placeholder)) => CompileError::TooManyPlaceholders {
            pattern: pattern.to_string(),
            name: name.to_string(),
            shadowed: placeholder.name().to_string(),
            position,
        },
        None => CompileError::UnresolvedVariable {
            name: name.to_string(),
            pattern: pattern.to_string(),
        },
    }
}
