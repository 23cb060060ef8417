//! Base URI providers.

/// Supplies the scheme, authority and fixed prefix that rendered links start
/// with. Consulted once per render.
pub trait BaseUriProvider: Send + Sync {
    /// Returns the current base, without a trailing `/`.
    fn current_base(&self) -> String;
}

impl<F> BaseUriProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_base(&self) -> String {
        self()
    }
}

/// A base URI that never changes.
///
/// # Examples
///
/// ```
/// use link_template::{BaseUriProvider, FixedBaseUri};
///
/// let base = FixedBaseUri::new("http://localhost:8080/api/");
/// assert_eq!(base.current_base(), "http://localhost:8080/api");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedBaseUri {
    base: String,
}

impl FixedBaseUri {
    /// Creates a provider, stripping trailing `/` from `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        let trimmed = base.trim_end_matches('/').len();
        base.truncate(trimmed);
        Self { base }
    }

    /// Returns the base.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl BaseUriProvider for FixedBaseUri {
    fn current_base(&self) -> String {
        self.base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(FixedBaseUri::new("http://localhost//").as_str(), "http://localhost");
        assert_eq!(FixedBaseUri::new("/").as_str(), "");
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(FixedBaseUri::default().current_base(), "");
    }

    #[test]
    fn closures_are_providers() {
        let host = String::from("https://example.org");
        let provider = move || host.clone();
        assert_eq!(provider.current_base(), "https://example.org");
    }
}
