//! Parameter Service
//!
//! Wraps a `ParameterClient` with the TTL cache. Reads consult the cache
//! first; on miss or expiry the value is fetched from the backing store and
//! the cache repopulated, re-applying the expired entry's TTL when the
//! caller does not supply one.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::Cache;
use crate::client::{HttpParameterClient, ParameterClient};
use crate::config::Config;
use crate::error::{CacheError, ClientError, ServiceError, ServiceResult};

// == Parameter Service ==
/// Caching front for one region of the backing parameter store.
///
/// One instance per region; the client binding is fixed at construction.
pub struct ParameterService {
    /// TTL cache of fetched values, shared for external inspection
    cache: Arc<RwLock<Cache<Value>>>,
    /// Client bound to this service's region
    client: Arc<dyn ParameterClient>,
    /// Backend region this service serves
    region: String,
}

impl ParameterService {
    // == Constructors ==
    /// Creates a service with an HTTP client for the given region.
    ///
    /// # Arguments
    /// * `config` - Backing store connection settings
    /// * `region` - Backend region; falls back to `config.default_region`
    pub fn new(config: &Config, region: Option<&str>) -> Result<Self, ClientError> {
        let region = region.unwrap_or(&config.default_region).to_owned();
        let client = HttpParameterClient::new(config, region.clone())?;
        Ok(Self::with_client(Arc::new(client), region))
    }

    /// Creates a service around an existing client.
    ///
    /// # Arguments
    /// * `client` - The parameter store client to fetch through
    /// * `region` - The region the client is bound to
    pub fn with_client(client: Arc<dyn ParameterClient>, region: impl Into<String>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(Cache::new())),
            client,
            region: region.into(),
        }
    }

    /// Returns the region this service is bound to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns a handle to the underlying cache for inspection.
    pub fn cache(&self) -> Arc<RwLock<Cache<Value>>> {
        Arc::clone(&self.cache)
    }

    // == Get Text ==
    /// Gets a parameter as text, serving from the cache when possible.
    ///
    /// On a miss the value is fetched and cached with `ttl`; on an expired
    /// entry the fetch is cached with `ttl` if supplied, else the expired
    /// entry's own remembered TTL.
    ///
    /// # Arguments
    /// * `key` - The key/path of the parameter
    /// * `ttl` - Optional TTL to apply when the cache is repopulated
    ///
    /// # Errors
    /// Propagates fetch errors from the client unwrapped.
    pub async fn get_text(&self, key: &str, ttl: Option<Duration>) -> ServiceResult<String> {
        let effective_ttl = {
            let mut cache = self.cache.write().await;
            match cache.get(key) {
                Ok(entry) => match entry.value().as_str() {
                    Some(text) => {
                        debug!(key, "parameter cache hit");
                        return Ok(text.to_owned());
                    }
                    // Key was populated as structured data; refetch as text
                    None => ttl,
                },
                Err(CacheError::NotFound { .. }) => ttl,
                Err(CacheError::Expired { remembered_ttl, .. }) => ttl.or(remembered_ttl),
            }
        };

        debug!(key, "parameter cache miss, fetching as text");
        let value = self.get_uncached_text(key).await?;

        let mut cache = self.cache.write().await;
        cache.put(key, Value::String(value.clone()), effective_ttl);
        Ok(value)
    }

    // == Get Uncached Text ==
    /// Gets a parameter as text, bypassing the cache entirely.
    ///
    /// # Arguments
    /// * `key` - The key/path of the parameter
    pub async fn get_uncached_text(&self, key: &str) -> ServiceResult<String> {
        Ok(self.client.fetch(key, true).await?)
    }

    // == Get JSON ==
    /// Gets a parameter parsed as JSON, serving from the cache when possible.
    ///
    /// The parsed document is what gets cached; parse failures are surfaced
    /// and never cached. Repopulation TTL follows the same rule as
    /// `get_text`.
    ///
    /// # Arguments
    /// * `key` - The key/path of the parameter
    /// * `ttl` - Optional TTL to apply when the cache is repopulated
    ///
    /// # Errors
    /// Fails with `ServiceError::Parse` when the fetched text is not valid
    /// JSON, or propagates fetch errors from the client unwrapped.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Option<Duration>,
    ) -> ServiceResult<T> {
        let effective_ttl = {
            let mut cache = self.cache.write().await;
            match cache.get(key) {
                Ok(entry) => {
                    debug!(key, "parameter cache hit");
                    return serde_json::from_value(entry.into_value())
                        .map_err(|err| parse_error(key, &err));
                }
                Err(CacheError::NotFound { .. }) => ttl,
                Err(CacheError::Expired { remembered_ttl, .. }) => ttl.or(remembered_ttl),
            }
        };

        debug!(key, "parameter cache miss, fetching as JSON");
        let parsed: Value = self.get_uncached_json(key).await?;
        let typed = serde_json::from_value(parsed.clone()).map_err(|err| parse_error(key, &err))?;

        let mut cache = self.cache.write().await;
        cache.put(key, parsed, effective_ttl);
        Ok(typed)
    }

    // == Get Uncached JSON ==
    /// Gets a parameter parsed as JSON, bypassing the cache entirely.
    ///
    /// # Arguments
    /// * `key` - The key/path of the parameter
    ///
    /// # Errors
    /// Fails with `ServiceError::Parse` when the fetched text is not valid
    /// JSON.
    pub async fn get_uncached_json<T: DeserializeOwned>(&self, key: &str) -> ServiceResult<T> {
        let raw = self.client.fetch(key, true).await?;
        serde_json::from_str(&raw).map_err(|err| parse_error(key, &err))
    }

    // == Clear Cache ==
    /// Clears all cached values and remembered TTLs.
    pub async fn clear_cache(&self) {
        self.cache.write().await.flush();
    }
}

/// Builds the parse error surfaced by the JSON accessors.
fn parse_error(key: &str, err: &serde_json::Error) -> ServiceError {
    ServiceError::Parse {
        key: key.to_owned(),
        message: err.to_string(),
    }
}
