use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use url::Url;

/// Source of trusted signing keys, indexed by `kid`
#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn key(&self, kid: &str) -> Option<DecodingKey>;
}

/// Fixed set of keys
#[derive(Clone, Default)]
pub struct InMemoryKeyStore {
    keys: HashMap<String, DecodingKey>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, kid: impl Into<String>, key: DecodingKey) -> Self {
        self.keys.insert(kid.into(), key);
        self
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn key(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.get(kid).cloned()
    }
}

/// Keys published by the identity provider, fetched lazily and cached.
///
/// A lookup miss triggers a refetch. After a successful fetch the next one
/// waits for `refresh_interval`, so tokens signed by unknown keys cannot
/// hammer the provider; a failed fetch is retried on the next miss.
/// Cached keys stay readable while a fetch is in flight, and concurrent
/// misses share a single fetch.
pub struct JwksCache {
    url: Url,
    client: reqwest::Client,
    refresh_interval: Duration,
    keys: RwLock<HashMap<String, DecodingKey>>,
    refresh: Mutex<RefreshState>,
}

#[derive(Default)]
struct RefreshState {
    /// Last fetch that produced a key set
    fetched_at: Option<Instant>,
    /// Last fetch started, successful or not
    attempted_at: Option<Instant>,
}

impl JwksCache {
    const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
    const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: Url) -> Result<Self, reqwest::Error> {
        Self::with_fetch_timeout(url, Self::DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_fetch_timeout(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            client,
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            keys: RwLock::new(HashMap::new()),
            refresh: Mutex::new(RefreshState::default()),
        })
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn cached(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    async fn fetch(&self) -> Result<HashMap<String, DecodingKey>, reqwest::Error> {
        let set: JwkSet = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(keys_from_jwks(&set))
    }
}

#[async_trait]
impl KeyStore for JwksCache {
    async fn key(&self, kid: &str) -> Option<DecodingKey> {
        if let Some(key) = self.cached(kid).await {
            return Some(key);
        }

        let missed_at = Instant::now();
        let mut refresh = self.refresh.lock().await;

        // Someone else refreshed while this lookup waited for the lock
        if refresh.attempted_at.is_some_and(|at| at >= missed_at) {
            return self.cached(kid).await;
        }
        if refresh
            .fetched_at
            .is_some_and(|at| at.elapsed() < self.refresh_interval)
        {
            return None;
        }

        refresh.attempted_at = Some(Instant::now());
        match self.fetch().await {
            Ok(keys) => {
                info!("Fetched {} signing keys from {}", keys.len(), self.url);
                *self.keys.write().await = keys;
                refresh.fetched_at = Some(Instant::now());
            }
            Err(e) => warn!("Failed to fetch signing keys from {}: {}", self.url, e),
        }
        self.cached(kid).await
    }
}

/// Decoding keys for every JWK that carries a `kid` and usable key material
fn keys_from_jwks(set: &JwkSet) -> HashMap<String, DecodingKey> {
    set.keys
        .iter()
        .filter_map(|jwk| {
            let kid = jwk.common.key_id.clone()?;
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => Some((kid, key)),
                Err(e) => {
                    warn!("Skipping signing key '{}': {}", kid, e);
                    None
                }
            }
        })
        .collect()
}
