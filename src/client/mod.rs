//! Parameter Store Client Module
//!
//! Defines the boundary to the remote parameter store and the HTTP-backed
//! implementation used in production. The service layer depends only on the
//! `ParameterClient` trait, so tests can substitute an in-memory fake.

mod http;

pub use http::HttpParameterClient;

use async_trait::async_trait;

use crate::error::ClientError;

// == Parameter Client Trait ==
/// Fetches raw string values from a remote parameter store.
///
/// Implementations are bound to one backend region at construction.
#[async_trait]
pub trait ParameterClient: Send + Sync {
    /// Fetches the raw string value stored under a key.
    ///
    /// # Arguments
    /// * `key` - The key/path of the parameter to fetch
    /// * `decrypt` - Whether the value should be transport-decrypted
    ///
    /// # Errors
    /// Fails with `ClientError::ParameterNotFound` when the store has no
    /// such key, or a transport/backend error otherwise.
    async fn fetch(&self, key: &str, decrypt: bool) -> Result<String, ClientError>;
}
