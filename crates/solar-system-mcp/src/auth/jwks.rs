//! Signing-key retrieval and caching.
//!
//! Keys come from a remote JWKS endpoint and are cached by key id for the
//! lifetime of the process. The set is refreshed lazily, only when a token
//! names a key id that is not cached. Concurrent misses on the same key id
//! share one refresh: the first caller fetches, the rest await its outcome.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use thiserror::Error;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

/// Failure to obtain a key set from the JWKS endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwksError {
    #[error("failed to fetch JWKS from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("JWKS request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
}

/// Where signing keys come from.
#[async_trait]
pub trait JwksSource: Send + Sync {
    /// Fetch the full key set.
    async fn fetch(&self) -> Result<JwkSet, JwksError>;

    /// Endpoint description used in diagnostics.
    fn endpoint(&self) -> &str;
}

/// Fetches a JWKS document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpJwksSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJwksSource {
    /// Create a source for `url`; every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, JwksError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JwksError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl JwksSource for HttpJwksSource {
    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        debug!(url = %self.url, "fetching JWKS");
        let fetch_error = |e: reqwest::Error| JwksError::Fetch {
            url: self.url.clone(),
            message: e.to_string(),
        };

        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?
            .json::<JwkSet>()
            .await
            .map_err(fetch_error)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

type RefreshOutcome = Result<(), JwksError>;

/// Key-id indexed cache of decoding keys with single-flight refresh.
pub struct KeyCache {
    source: Arc<dyn JwksSource>,
    fetch_timeout: Duration,
    keys: RwLock<HashMap<String, Arc<DecodingKey>>>,
    inflight: Mutex<HashMap<String, Arc<OnceCell<RefreshOutcome>>>>,
}

impl KeyCache {
    pub fn new(source: Arc<dyn JwksSource>, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
            keys: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the decoding key for `kid`, refreshing the set on a miss.
    pub async fn key(&self, kid: &str) -> Result<Arc<DecodingKey>, KeyLookupError> {
        if let Some(key) = self.cached(kid).await {
            return Ok(key);
        }

        let cell = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            inflight
                .entry(kid.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let outcome = cell.get_or_init(|| self.refresh(kid)).await.clone();

        {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            if inflight
                .get(kid)
                .is_some_and(|current| Arc::ptr_eq(current, &cell))
            {
                inflight.remove(kid);
            }
        }

        outcome?;
        self.cached(kid)
            .await
            .ok_or_else(|| KeyLookupError::UnknownKeyId {
                kid: kid.to_string(),
            })
    }

    /// Number of keys currently cached.
    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }

    async fn cached(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        self.keys.read().await.get(kid).cloned()
    }

    async fn refresh(&self, kid: &str) -> RefreshOutcome {
        let endpoint = self.source.endpoint();
        info!(endpoint, kid, "unknown key id, refreshing signing keys");

        let set = match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(JwksError::Timeout {
                    url: endpoint.to_string(),
                    timeout: self.fetch_timeout,
                })
            }
        };

        let mut keys = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(key_id) = jwk.common.key_id.clone() else {
                debug!("skipping JWK without a key id");
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(key_id, Arc::new(key));
                }
                Err(e) => warn!(kid = %key_id, error = %e, "skipping unusable JWK"),
            }
        }

        info!(endpoint, keys = keys.len(), "signing keys refreshed");
        *self.keys.write().await = keys;
        Ok(())
    }
}

/// Failure to resolve a key id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyLookupError {
    #[error(transparent)]
    Jwks(#[from] JwksError),

    #[error("no signing key with id {kid}")]
    UnknownKeyId { kid: String },
}
