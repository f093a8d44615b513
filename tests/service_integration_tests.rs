//! Integration Tests for the Parameter Service
//!
//! Drives the full read path (cache -> client -> cache repopulation)
//! against an in-memory store fake that counts backend calls, mirroring
//! how the service sits in front of the real backing store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use param_cache::{ClientError, ParameterClient, ParameterService, ServiceError};

// == Helper Functions ==

const TTL: Duration = Duration::from_millis(200);
const PAST_TTL: Duration = Duration::from_millis(320);

/// In-memory stand-in for the backing parameter store.
///
/// Serves fixed responses per key and counts every fetch so tests can
/// assert how often the service went to the backend.
struct FakeStore {
    parameters: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FakeStore {
    fn with_parameters(parameters: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParameterClient for FakeStore {
    async fn fetch(&self, key: &str, _decrypt: bool) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.parameters
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::ParameterNotFound {
                key: key.to_owned(),
            })
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "param_cache=debug".into()),
        )
        .try_init();
}

// == Text Read Path Tests ==

#[tokio::test]
async fn test_get_text_fetches_then_serves_from_cache() {
    init_tracing();
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    let value = service.get_text("/app/public-key", None).await.unwrap();
    assert_eq!(value, "X");
    assert_eq!(store.calls(), 1);

    let cache = service.cache();
    assert!(cache.write().await.has("/app/public-key"));

    // Second read is served from the cache, no additional backend call
    let value = service.get_text("/app/public-key", None).await.unwrap();
    assert_eq!(value, "X");
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_get_text_refetches_after_expiry() {
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    service.get_text("/app/public-key", Some(TTL)).await.unwrap();
    assert_eq!(store.calls(), 1);

    tokio::time::sleep(PAST_TTL).await;

    // The entry lapsed: a bare read triggers a second fetch and repopulates
    let value = service.get_text("/app/public-key", None).await.unwrap();
    assert_eq!(value, "X");
    assert_eq!(store.calls(), 2);
    assert!(service.cache().write().await.has("/app/public-key"));
}

#[tokio::test]
async fn test_expired_entry_keeps_its_ttl_across_refetch() {
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    service.get_text("/app/public-key", Some(TTL)).await.unwrap();
    tokio::time::sleep(PAST_TTL).await;

    // Refetch without an explicit TTL: the expired entry's TTL carries over
    service.get_text("/app/public-key", None).await.unwrap();
    assert_eq!(store.calls(), 2);

    tokio::time::sleep(PAST_TTL).await;
    assert!(!service.cache().write().await.has("/app/public-key"));
}

#[tokio::test]
async fn test_get_uncached_text_never_touches_cache() {
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    service.get_uncached_text("/app/public-key").await.unwrap();
    service.get_uncached_text("/app/public-key").await.unwrap();

    assert_eq!(store.calls(), 2);
    assert!(service.cache().read().await.is_empty());
}

// == JSON Read Path Tests ==

#[derive(Debug, Deserialize, PartialEq)]
struct KeyMaterial {
    kid: String,
    alg: String,
}

#[tokio::test]
async fn test_get_json_returns_typed_value_and_caches() {
    let store = FakeStore::with_parameters(&[(
        "/app/signing-key",
        r#"{"kid": "k-1", "alg": "RS256"}"#,
    )]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    let first: KeyMaterial = service.get_json("/app/signing-key", None).await.unwrap();
    let second: KeyMaterial = service.get_json("/app/signing-key", None).await.unwrap();

    assert_eq!(first.kid, "k-1");
    assert_eq!(first, second);
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn test_get_json_parse_failure_propagates_and_is_not_cached() {
    let store = FakeStore::with_parameters(&[("/app/signing-key", "not-json")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    let result: Result<Value, ServiceError> = service.get_json("/app/signing-key", None).await;
    let err = result.unwrap_err();

    assert!(matches!(err, ServiceError::Parse { .. }));
    let message = err.to_string();
    assert!(message.contains("/app/signing-key"));
    assert!(message.starts_with("Failed to get uncached JSON key /app/signing-key error:"));

    // The failed parse left nothing behind
    assert!(service.cache().read().await.is_empty());

    // A later read goes back to the backend rather than any poisoned entry
    let retry: Result<Value, ServiceError> = service.get_json("/app/signing-key", None).await;
    assert!(retry.is_err());
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_get_uncached_json_always_fetches() {
    let store = FakeStore::with_parameters(&[("/app/flags", r#"{"beta": true}"#)]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    let flags: Value = service.get_uncached_json("/app/flags").await.unwrap();
    assert_eq!(flags["beta"], true);

    let _: Value = service.get_uncached_json("/app/flags").await.unwrap();
    assert_eq!(store.calls(), 2);
    assert!(service.cache().read().await.is_empty());
}

// == Error Propagation Tests ==

#[tokio::test]
async fn test_backend_not_found_propagates_unwrapped() {
    let store = FakeStore::with_parameters(&[]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    let err = service.get_text("/missing", None).await.unwrap_err();

    match err {
        ServiceError::Client(ClientError::ParameterNotFound { key }) => {
            assert_eq!(key, "/missing");
        }
        other => panic!("expected ParameterNotFound, got {:?}", other),
    }

    // Fetch failures are not cached either
    assert!(service.cache().read().await.is_empty());
}

// == Cache Management Tests ==

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    service.get_text("/app/public-key", None).await.unwrap();
    service.clear_cache().await;
    service.get_text("/app/public-key", None).await.unwrap();

    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_exposed_cache_reflects_service_state() {
    let store = FakeStore::with_parameters(&[("/app/public-key", "X")]);
    let service = ParameterService::with_client(store.clone(), "eu-west-1");

    service
        .get_text("/app/public-key", Some(Duration::from_secs(3600)))
        .await
        .unwrap();

    let cache = service.cache();
    let mut cache = cache.write().await;

    assert!(cache.has("/app/public-key"));
    assert_eq!(
        cache.remembered_ttl("/app/public-key"),
        Some(Duration::from_secs(3600))
    );

    let entry = cache.get("/app/public-key").unwrap();
    assert_eq!(entry.value().as_str(), Some("X"));
}
