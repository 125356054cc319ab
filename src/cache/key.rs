//! Cache Key Module
//!
//! Namespaced keys derived from a request's resource path and parameters.

use std::fmt;

// == Cache Key ==
/// A cache key of the form `namespace:path[?k=v&...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key for a parameterless request.
    pub fn new(namespace: &str, path: &str) -> Self {
        Self(format!("{}{}", Self::namespace_prefix(namespace), path))
    }

    /// Builds a key including query parameters.
    ///
    /// Parameters are sorted so the same query always maps to the same key.
    pub fn with_params(namespace: &str, path: &str, params: &[(&str, &str)]) -> Self {
        if params.is_empty() {
            return Self::new(namespace, path);
        }

        let mut pairs: Vec<_> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        pairs.sort();

        Self(format!(
            "{}{}?{}",
            Self::namespace_prefix(namespace),
            path,
            pairs.join("&")
        ))
    }

    /// Prefix shared by every key in `namespace`.
    pub fn namespace_prefix(namespace: &str) -> String {
        format!("{}:", namespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}
