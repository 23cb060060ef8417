//! The compiled-template cache.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::error::CompileError;
use crate::invocation::{DeclaringType, OperationId};
use crate::template::CompiledTemplate;

/// Cache key: an operation within its declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    declaring_type: DeclaringType,
    operation: OperationId,
}

impl TemplateKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(declaring_type: DeclaringType, operation: OperationId) -> Self {
        Self {
            declaring_type,
            operation,
        }
    }

    /// Returns the declaring type.
    #[must_use]
    pub const fn declaring_type(&self) -> DeclaringType {
        self.declaring_type
    }

    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> OperationId {
        self.operation
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.operation)
    }
}

/// Compiled templates keyed by operation.
///
/// Reads and writes are sharded, so lookups from many threads do not contend
/// on a single lock. No lock is held while a template compiles: concurrent
/// misses for the same key each compile, and the last insert wins. Entries
/// are never evicted.
///
/// # Examples
///
/// ```
/// use link_template::{Invocation, TemplateCache, TemplateCompiler};
///
/// struct People;
///
/// let cache = TemplateCache::new();
/// let compiler = TemplateCompiler::default();
/// let key = Invocation::of::<People>("index").key();
///
/// let template = cache
///     .get_or_compile(key, || compiler.compile("/people", 0, &[], &[]))
///     .unwrap();
/// assert_eq!(template.expand(&Invocation::of::<People>("index")).unwrap(), "/people");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: DashMap<TemplateKey, Arc<CompiledTemplate>>,
}

impl TemplateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached template for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &TemplateKey) -> Option<Arc<CompiledTemplate>> {
        self.templates.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the cached template for `key`, compiling and storing it on a
    /// miss.
    ///
    /// # Errors
    ///
    /// Propagates the compile error; nothing is stored in that case.
    pub fn get_or_compile<F>(
        &self,
        key: TemplateKey,
        compile: F,
    ) -> Result<Arc<CompiledTemplate>, CompileError>
    where
        F: FnOnce() -> Result<CompiledTemplate, CompileError>,
    {
        if let Some(template) = self.get(&key) {
            trace!(%key, "link template cache hit");
            return Ok(template);
        }

        debug!(%key, "link template cache miss");
        let template = Arc::new(compile()?);
        self.templates.insert(key, Arc::clone(&template));
        Ok(template)
    }

    /// Removes every cached template.
    pub fn clear(&self) {
        self.templates.clear();
    }

    /// Returns the number of cached templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::compiler::TemplateCompiler;
    use crate::invocation::Invocation;

    struct Sample;
    struct Other;

    fn key<T: 'static>(operation: &'static str) -> TemplateKey {
        TemplateKey::new(DeclaringType::of::<T>(), OperationId::new(operation))
    }

    #[test]
    fn key_display() {
        let key = key::<Sample>("show");
        assert!(key.to_string().ends_with("Sample::show"));
    }

    #[test]
    fn miss_compiles_once_then_hits() {
        let cache = TemplateCache::new();
        let compiler = TemplateCompiler::default();
        let calls = AtomicUsize::new(0);
        let compile = || {
            calls.fetch_add(1, Ordering::SeqCst);
            compiler.compile("/sample", 0, &[], &[])
        };

        let first = cache.get_or_compile(key::<Sample>("show"), compile).unwrap();
        let second = cache.get_or_compile(key::<Sample>("show"), compile).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn keys_are_isolated_by_type() {
        let cache = TemplateCache::new();
        let compiler = TemplateCompiler::default();
        cache
            .get_or_compile(key::<Sample>("show"), || compiler.compile("/a", 0, &[], &[]))
            .unwrap();
        cache
            .get_or_compile(key::<Other>("show"), || compiler.compile("/b", 0, &[], &[]))
            .unwrap();

        assert_eq!(cache.len(), 2);
        let rendered = cache
            .get(&key::<Other>("show"))
            .unwrap()
            .expand(&Invocation::of::<Other>("show"))
            .unwrap();
        assert_eq!(rendered, "/b");
    }

    #[test]
    fn compile_error_is_not_cached() {
        let cache = TemplateCache::new();
        let compiler = TemplateCompiler::default();
        let err = cache
            .get_or_compile(key::<Sample>("broken"), || {
                compiler.compile("/foo/{missing}", 0, &[], &[])
            })
            .unwrap_err();
        assert!(matches!(err, CompileError::UnresolvedVariable { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties() {
        let cache = TemplateCache::new();
        let compiler = TemplateCompiler::default();
        cache
            .get_or_compile(key::<Sample>("show"), || compiler.compile("/a", 0, &[], &[]))
            .unwrap();
        cache.clear();
        assert!(cache.get(&key::<Sample>("show")).is_none());
    }
}
