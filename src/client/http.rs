//! HTTP transport for the remote REST API
//!
//! GET responses are memoized in the shared cache under namespaced keys;
//! mutations go straight to the network and invalidate the namespaces
//! whose listings they can change.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheKey, SharedCache};
use crate::client::resources::{AsistenciaApi, AsuntosApi, InstanciasApi, PersonasApi};
use crate::config::Config;
use crate::error::{AppError, Result};

/// Client for the attendance REST API.
///
/// Cloning is cheap: clones share the connection pool and the cache.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    cache: SharedCache,
    ttl: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` that memoizes into `cache`.
    pub fn new(base_url: impl Into<String>, cache: SharedCache) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
            ttl: crate::cache::DEFAULT_TTL,
        })
    }

    pub fn from_config(config: &Config, cache: SharedCache) -> Result<Self> {
        Ok(Self::new(&config.api_base_url, cache)?.with_ttl(config.default_ttl()))
    }

    /// Sets how long GET responses stay cached.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Resources ==
    pub fn personas(&self) -> PersonasApi<'_> {
        PersonasApi::new(self)
    }

    pub fn asuntos(&self) -> AsuntosApi<'_> {
        AsuntosApi::new(self)
    }

    pub fn instancias(&self) -> InstanciasApi<'_> {
        InstanciasApi::new(self)
    }

    pub fn asistencia(&self) -> AsistenciaApi<'_> {
        AsistenciaApi::new(self)
    }

    // == Verbs ==
    /// GET `path`, served from the cache while the stored response is live.
    ///
    /// A response is not stored if an invalidation ran while it was in
    /// flight, since it may predate the mutation.
    pub(crate) async fn get_cached(&self, namespace: &str, path: &str) -> Result<Value> {
        let key = CacheKey::new(namespace, path);

        let generation = {
            let mut cache = self.cache.write().await;
            if let Some(hit) = cache.get(key.as_str()).cloned() {
                debug!(key = %key, "cache hit");
                return Ok(hit);
            }
            cache.generation()
        };

        debug!(key = %key, "cache miss");
        let value = self.send(Method::GET, path, None::<&()>).await?;

        let mut cache = self.cache.write().await;
        if cache.generation() == generation {
            cache.set_with_ttl(key, value.clone(), self.ttl);
        } else {
            debug!(key = %key, "invalidated while in flight, not caching");
        }
        Ok(value)
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        invalidates: &[&str],
    ) -> Result<Value> {
        let value = self.send(Method::POST, path, Some(body)).await?;
        self.invalidate(invalidates).await;
        Ok(value)
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        invalidates: &[&str],
    ) -> Result<Value> {
        let value = self.send(Method::PUT, path, Some(body)).await?;
        self.invalidate(invalidates).await;
        Ok(value)
    }

    pub(crate) async fn delete(&self, path: &str, invalidates: &[&str]) -> Result<Value> {
        let value = self.send(Method::DELETE, path, None::<&()>).await?;
        self.invalidate(invalidates).await;
        Ok(value)
    }

    /// Drops every cached response in the given namespaces.
    async fn invalidate(&self, namespaces: &[&str]) {
        let mut cache = self.cache.write().await;
        for namespace in namespaces {
            let removed = cache.remove_prefix(&CacheKey::namespace_prefix(namespace));
            if removed > 0 {
                debug!(namespace = *namespace, removed, "invalidated cached responses");
            }
        }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");

        let mut request: RequestBuilder = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
