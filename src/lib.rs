//! Param Cache - a caching layer for remote key/value parameter stores
//!
//! Provides an in-memory TTL cache with carryover semantics and a service
//! wrapper that fetches parameters from a backing store on cache miss.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod service;

pub use cache::{Cache, CacheEntry, CacheStats};
pub use client::{HttpParameterClient, ParameterClient};
pub use config::Config;
pub use error::{CacheError, ClientError, ServiceError};
pub use service::{ParameterService, ServiceRegistry};
