//! Error types for the caching layer
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses are typed errors rather than sentinel values: `Expired`
//! carries the remembered TTL so callers can re-apply it when repopulating
//! the entry. `NotFound` and `Expired` are consumed internally by
//! `ParameterService` and never reach its callers.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Miss signals raised by `Cache::get`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key was never stored in the cache
    #[error("Key {key} not in cache")]
    NotFound {
        /// The requested key
        key: String,
    },

    /// Key was stored but its entry lapsed
    #[error("Key {key} has expired")]
    Expired {
        /// The requested key
        key: String,
        /// The most recently supplied TTL for this key, if any
        remembered_ttl: Option<Duration>,
    },
}

// == Client Error Enum ==
/// Errors raised by a `ParameterClient` implementation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backing store has no parameter under this key
    #[error("Parameter {key} not found in the backing store")]
    ParameterNotFound {
        /// The requested key
        key: String,
    },

    /// The backing store rejected the request
    #[error("Backing store returned HTTP {status}: {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Transport-level failure
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

// == Service Error Enum ==
/// Errors surfaced to callers of `ParameterService`.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Fetched text was not valid JSON
    #[error("Failed to get uncached JSON key {key} error: {message}")]
    Parse {
        /// The requested key
        key: String,
        /// The underlying parser's message
        message: String,
    },

    /// Fetch failure, propagated from the client unwrapped
    #[error(transparent)]
    Client(#[from] ClientError),
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
