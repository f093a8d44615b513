//! Service Registry
//!
//! Hands out one `ParameterService` per backend region so repeated requests
//! for the same region reuse the same cache and client connection. The
//! registry is an explicit object constructed once at process start and
//! passed by handle; services are stored in a `Cache` with no TTL, so they
//! live until an explicit flush.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::ClientError;
use crate::service::ParameterService;

// == Service Registry ==
/// Region-keyed registry of parameter services, lazily populated.
pub struct ServiceRegistry {
    /// Connection settings shared by all services this registry creates
    config: Config,
    /// One service per region, never expiring
    services: RwLock<Cache<Arc<ParameterService>>>,
}

impl ServiceRegistry {
    // == Constructor ==
    /// Creates an empty registry using the given connection settings.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            services: RwLock::new(Cache::new()),
        }
    }

    /// Creates an empty registry configured from environment variables.
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    // == Get ==
    /// Returns the service for a region, creating it on first request.
    ///
    /// # Arguments
    /// * `region` - Backend region; falls back to the configured default
    ///
    /// # Errors
    /// Propagates client construction failures.
    pub async fn get(&self, region: Option<&str>) -> Result<Arc<ParameterService>, ClientError> {
        let region = region.unwrap_or(&self.config.default_region).to_owned();

        {
            let mut services = self.services.write().await;
            if let Ok(entry) = services.get(&region) {
                return Ok(entry.into_value());
            }
        }

        let service = Arc::new(ParameterService::new(&self.config, Some(&region))?);

        let mut services = self.services.write().await;
        // Another task may have created the service while the lock was
        // released; keep the stored one so all callers share a cache.
        if let Ok(entry) = services.get(&region) {
            return Ok(entry.into_value());
        }

        debug!(%region, "registering parameter service");
        services.put(region, Arc::clone(&service), None);
        Ok(service)
    }

    // == Flush ==
    /// Drops all cached service instances.
    pub async fn flush(&self) {
        self.services.write().await.flush();
    }

    // == Length ==
    /// Returns the number of registered services.
    pub async fn len(&self) -> usize {
        self.services.read().await.len()
    }
}
