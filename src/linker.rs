//! The link-building entry point.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::base_uri::BaseUriProvider;
use crate::builder::{Empty, LinkerBuilder};
use crate::cache::TemplateCache;
use crate::compiler::TemplateCompiler;
use crate::error::{CompileError, RenderError};
use crate::inspector::OperationInspector;
use crate::invocation::Invocation;
use crate::template::CompiledTemplate;

/// Renders links for operation invocations.
///
/// On first use of an operation the linker asks its inspector for the
/// mapping, compiles it and caches the template under the operation's key.
/// Later invocations of the same operation only render.
///
/// # Examples
///
/// ```
/// use link_template::{DeclaredType, Invocation, Linker, MappingRegistry, OperationMapping};
///
/// struct People;
///
/// let registry = MappingRegistry::new()
///     .with_type::<People>("/people")
///     .with_operation::<People>(
///         "search",
///         OperationMapping::new("/search")
///             .query_param("tag", DeclaredType::list_of(DeclaredType::Str), 0)
///             .query_param("page", DeclaredType::Int, 1),
///     );
///
/// let linker = Linker::builder().base("https://example.org").inspector(registry).build();
///
/// let link = linker
///     .render(&Invocation::of::<People>("search").with_arguments([
///         vec!["admin", "ops"].into(),
///         link_template::Value::Null,
///     ]))
///     .unwrap();
/// assert_eq!(link, "https://example.org/people/search?tag=admin&tag=ops");
/// ```
#[derive(Clone)]
pub struct Linker {
    inspector: Arc<dyn OperationInspector>,
    base_uri: Arc<dyn BaseUriProvider>,
    compiler: TemplateCompiler,
    cache: Arc<TemplateCache>,
}

impl Linker {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> LinkerBuilder<Empty> {
        LinkerBuilder::new()
    }

    pub(crate) fn new(
        inspector: Arc<dyn OperationInspector>,
        base_uri: Arc<dyn BaseUriProvider>,
        compiler: TemplateCompiler,
        cache: Arc<TemplateCache>,
    ) -> Self {
        Self {
            inspector,
            base_uri,
            compiler,
            cache,
        }
    }

    /// Returns the compiled template for the invoked operation, compiling it
    /// on first use.
    ///
    /// # Errors
    ///
    /// Returns the inspector's or the compiler's [`CompileError`].
    pub fn template(&self, invocation: &Invocation) -> Result<Arc<CompiledTemplate>, CompileError> {
        self.cache.get_or_compile(invocation.key(), || {
            let mapping = self
                .inspector
                .inspect(invocation.declaring_type(), invocation.operation())?;
            self.compiler
                .compile_mapping(&mapping, invocation.positional().len())
        })
    }

    /// Renders the link for an invocation, starting with the current base
    /// URI.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Compile`] if the operation cannot be compiled,
    /// [`RenderError::Encode`] if an argument cannot be encoded, and the
    /// other [`RenderError`] variants if the template does not fit the
    /// invocation.
    pub fn render(&self, invocation: &Invocation) -> Result<String, RenderError> {
        let template = self.template(invocation)?;
        let base = self.base_uri.current_base();
        let link = template.render(&base, invocation)?;
        trace!(key = %invocation.key(), %link, "rendered link");
        Ok(link)
    }

    /// Renders the path and query for an invocation, without a base.
    ///
    /// # Errors
    ///
    /// See [`Linker::render`].
    pub fn expand(&self, invocation: &Invocation) -> Result<String, RenderError> {
        self.template(invocation)?.expand(invocation)
    }

    /// Returns the template cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<TemplateCache> {
        &self.cache
    }

    /// Returns the template compiler.
    #[must_use]
    pub const fn compiler(&self) -> &TemplateCompiler {
        &self.compiler
    }
}

impl fmt::Debug for Linker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linker")
            .field("compiler", &self.compiler)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
