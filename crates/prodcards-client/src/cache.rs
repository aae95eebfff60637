use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use serde_json::Value;

use crate::error::ClientError;

type FetchFuture = Shared<BoxFuture<'static, Result<Arc<Value>, Arc<ClientError>>>>;

/// Process-lifetime cache of fetched source documents, keyed by the joined
/// identifier-set string (plus a source prefix chosen by the caller).
///
/// Concurrent consumers asking for the same key share one in-flight fetch
/// instead of issuing duplicate upstream requests. Successful documents are
/// kept for the process lifetime; an entry is never mutated in place, only
/// replaced wholesale. Failures are not cached, so the next cycle retries.
#[derive(Clone, Default)]
pub struct DocumentCache {
    inner: Arc<Mutex<CacheInner>>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, Arc<Value>>,
    inflight: HashMap<String, FetchFuture>,
}

impl DocumentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document for `key`, or runs `fetch` to produce it.
    ///
    /// If another consumer is already fetching the same key, this awaits the
    /// shared in-flight future rather than calling `fetch`.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error, shared between all coalesced waiters.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        fetch: F,
    ) -> Result<Arc<Value>, Arc<ClientError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>> + Send + 'static,
    {
        let future = {
            let mut inner = self.lock();
            if let Some(cached) = inner.entries.get(key) {
                tracing::debug!(key, "document cache hit");
                return Ok(Arc::clone(cached));
            }
            if let Some(inflight) = inner.inflight.get(key) {
                tracing::debug!(key, "joining in-flight fetch");
                inflight.clone()
            } else {
                let fut = fetch();
                let shared = async move { fut.await.map(Arc::new).map_err(Arc::new) }
                    .boxed()
                    .shared();
                inner.inflight.insert(key.to_owned(), shared.clone());
                shared
            }
        };

        let result = future.clone().await;

        let mut inner = self.lock();
        // Only the future we awaited gets evicted; a newer in-flight fetch
        // for the same key must stay registered.
        if inner
            .inflight
            .get(key)
            .is_some_and(|current| current.ptr_eq(&future))
        {
            inner.inflight.remove(key);
        }
        if let Ok(doc) = &result {
            inner.entries.insert(key.to_owned(), Arc::clone(doc));
        }
        result
    }

    /// Returns the cached document for `key` without fetching.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<Arc<Value>> {
        self.lock().entries.get(key).map(Arc::clone)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn second_request_served_from_cache() {
        let cache = DocumentCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            let doc = cache
                .get_or_fetch("detail:se:SKU1", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({"products": []}))
                })
                .await
                .expect("fetch should succeed");
            assert_eq!(*doc, json!({"products": []}));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_fetch() {
        let cache = DocumentCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fetches = (0..4).map(|_| {
            let cache = cache.clone();
            let calls = Arc::clone(&calls);
            async move {
                cache
                    .get_or_fetch("simple:SKU1", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Yield so the other callers get a chance to join.
                        tokio::task::yield_now().await;
                        Ok(json!({"SKU1": {}}))
                    })
                    .await
            }
        });
        let results = futures::future::join_all(fetches).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = DocumentCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = {
            let calls = Arc::clone(&calls);
            cache
                .get_or_fetch("detail:se:SKU1", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ClientError::UnexpectedStatus {
                        status: 503,
                        url: "https://api.example/detail".to_owned(),
                    })
                })
                .await
        };
        assert!(first.is_err());
        assert!(cache.peek("detail:se:SKU1").is_none());

        let second = {
            let calls = Arc::clone(&calls);
            cache
                .get_or_fetch("detail:se:SKU1", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({}))
                })
                .await
        };
        assert!(second.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_coalesce() {
        let cache = DocumentCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in ["detail:se:SKU1", "detail:se:SKU2"] {
            let calls = Arc::clone(&calls);
            cache
                .get_or_fetch(key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(json!({}))
                })
                .await
                .expect("fetch should succeed");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
