//! Typestate builder for constructing a [`Linker`].
//!
//! The inspector is the one required collaborator, so `build()` only exists
//! once it has been supplied. Everything else has a default.

use std::fmt;
use std::sync::Arc;

use crate::base_uri::{BaseUriProvider, FixedBaseUri};
use crate::cache::TemplateCache;
use crate::compiler::TemplateCompiler;
use crate::conversion::Conversions;
use crate::inspector::OperationInspector;
use crate::linker::Linker;

/// Marker: no inspector set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// State: the inspector has been set, ready to build.
#[derive(Clone)]
pub struct Ready {
    inspector: Arc<dyn OperationInspector>,
}

impl fmt::Debug for Ready {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ready").finish_non_exhaustive()
    }
}

/// A typestate builder for [`Linker`].
///
/// # Type State
///
/// - [`Empty`]: initial state, no inspector
/// - [`Ready`]: inspector set, `build()` available
///
/// Base URI, conversions and cache are optional and can be set in any state.
/// Without a base URI, links start at the path. Without a cache, the linker
/// gets a fresh one of its own.
///
/// # Examples
///
/// ```
/// use link_template::{Invocation, LinkerBuilder, MappingRegistry, OperationMapping};
///
/// struct Health;
///
/// let linker = LinkerBuilder::new()
///     .base("http://localhost:8080")
///     .inspector(MappingRegistry::new().with_operation::<Health>("check", OperationMapping::new("/health")))
///     .build();
///
/// let link = linker.render(&Invocation::of::<Health>("check")).unwrap();
/// assert_eq!(link, "http://localhost:8080/health");
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use link_template::LinkerBuilder;
///
/// // Error: cannot call build() without an inspector
/// let linker = LinkerBuilder::new().base("http://localhost").build();
/// ```
#[derive(Clone)]
pub struct LinkerBuilder<State = Empty> {
    base_uri: Arc<dyn BaseUriProvider>,
    conversions: Arc<Conversions>,
    cache: Option<Arc<TemplateCache>>,
    state: State,
}

impl LinkerBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_uri: Arc::new(FixedBaseUri::default()),
            conversions: Arc::new(Conversions::default()),
            cache: None,
            state: Empty,
        }
    }

    /// Sets the operation inspector and advances to the [`Ready`] state.
    #[must_use]
    pub fn inspector(self, inspector: impl OperationInspector + 'static) -> LinkerBuilder<Ready> {
        self.shared_inspector(Arc::new(inspector))
    }

    /// Sets an already shared operation inspector.
    #[must_use]
    pub fn shared_inspector(self, inspector: Arc<dyn OperationInspector>) -> LinkerBuilder<Ready> {
        LinkerBuilder {
            base_uri: self.base_uri,
            conversions: self.conversions,
            cache: self.cache,
            state: Ready { inspector },
        }
    }
}

impl Default for LinkerBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkerBuilder<Ready> {
    /// Builds the [`Linker`].
    #[must_use]
    pub fn build(self) -> Linker {
        Linker::new(
            self.state.inspector,
            self.base_uri,
            TemplateCompiler::with_shared(self.conversions),
            self.cache.unwrap_or_default(),
        )
    }
}

/// Methods available in every state for optional settings.
impl<State> LinkerBuilder<State> {
    /// Sets the base URI provider. The last call wins.
    #[must_use]
    pub fn base_uri(mut self, provider: impl BaseUriProvider + 'static) -> Self {
        self.base_uri = Arc::new(provider);
        self
    }

    /// Sets a fixed base URI; trailing `/` is stripped.
    #[must_use]
    pub fn base(self, base: impl Into<String>) -> Self {
        self.base_uri(FixedBaseUri::new(base))
    }

    /// Sets the conversions used by Generic encoders.
    #[must_use]
    pub fn conversions(mut self, conversions: Conversions) -> Self {
        self.conversions = Arc::new(conversions);
        self
    }

    /// Shares a template cache, typically between linkers using the same
    /// inspector.
    #[must_use]
    pub fn cache(mut self, cache: Arc<TemplateCache>) -> Self {
        self.cache = Some(cache);
        self
    }
}

impl<State: fmt::Debug> fmt::Debug for LinkerBuilder<State> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkerBuilder")
            .field("conversions", &self.conversions)
            .field("cache", &self.cache)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
