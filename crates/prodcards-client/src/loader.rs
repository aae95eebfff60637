use std::sync::Arc;

use prodcards_core::{cache_key, OverrideMap, PresentationRecord};
use prodcards_extract::aggregate;
use serde_json::Value;
use tokio::sync::watch;

use crate::cache::DocumentCache;
use crate::client::CardApiClient;
use crate::error::{ClientError, LoadError};

/// Drives one load cycle: fetch both source documents concurrently, then
/// aggregate them into presentation records.
///
/// Each [`CardLoader`] carries a generation counter. Starting a new cycle
/// bumps it, which signals every older in-flight cycle on the same loader
/// to resolve as [`LoadError::Superseded`] instead of racing the newer
/// cycle's output. The underlying fetches are shared through the
/// [`DocumentCache`], so a superseded cycle does not waste the network
/// work it started.
pub struct CardLoader {
    api: Arc<CardApiClient>,
    cache: DocumentCache,
    generation: watch::Sender<u64>,
}

impl CardLoader {
    #[must_use]
    pub fn new(api: CardApiClient) -> Self {
        Self::with_cache(api, DocumentCache::new())
    }

    /// Creates a loader sharing an existing cache, e.g. across several
    /// loaders in one process or for test isolation.
    #[must_use]
    pub fn with_cache(api: CardApiClient, cache: DocumentCache) -> Self {
        Self {
            api: Arc::new(api),
            cache,
            generation: watch::channel(0).0,
        }
    }

    /// Loads and aggregates cards for `ids`.
    ///
    /// The two source fetches run concurrently and fail independently: one
    /// failed source degrades that source to absent for the whole
    /// aggregation pass.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Superseded`] when a newer `load` call started on this
    ///   loader before this one finished.
    /// - [`LoadError::AllSourcesFailed`] when both fetches failed.
    pub async fn load(
        &self,
        ids: &[String],
        locale: &str,
        overrides: &OverrideMap,
    ) -> Result<Vec<PresentationRecord>, LoadError> {
        let mut generation = self.generation.subscribe();
        let mut my_generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            my_generation = *g;
        });

        let key = cache_key(ids);
        let detail_key = format!("detail:{locale}:{key}");
        let simple_key = format!("simple:{key}");

        let fetches = async {
            let detail = self.cache.get_or_fetch(&detail_key, || {
                let api = Arc::clone(&self.api);
                let ids = ids.to_vec();
                let locale = locale.to_owned();
                async move { api.fetch_detail(&ids, &locale).await }
            });
            let simple = self.cache.get_or_fetch(&simple_key, || {
                let api = Arc::clone(&self.api);
                let ids = ids.to_vec();
                async move { api.fetch_simple(&ids).await }
            });
            futures::join!(detail, simple)
        };

        let (detail, simple) = tokio::select! {
            results = fetches => results,
            () = superseded(&mut generation, my_generation) => {
                tracing::debug!(generation = my_generation, "load cycle superseded mid-fetch");
                return Err(LoadError::Superseded);
            }
        };
        // A newer cycle may have started between fetch completion and here.
        if *generation.borrow() > my_generation {
            return Err(LoadError::Superseded);
        }

        let detail_doc = keep_or_warn(detail, "detail");
        let simple_doc = keep_or_warn(simple, "simple");
        if let (Err(detail), Err(simple)) = (&detail_doc, &simple_doc) {
            return Err(LoadError::AllSourcesFailed {
                detail: detail.to_string(),
                simple: simple.to_string(),
            });
        }

        Ok(aggregate(
            ids,
            detail_doc.as_deref().ok(),
            simple_doc.as_deref().ok(),
            overrides,
            locale,
        ))
    }
}

/// Resolves once the loader's generation counter passes `my_generation`.
async fn superseded(generation: &mut watch::Receiver<u64>, my_generation: u64) {
    while *generation.borrow_and_update() <= my_generation {
        if generation.changed().await.is_err() {
            // Sender gone: nothing can supersede this cycle anymore.
            std::future::pending::<()>().await;
        }
    }
}

fn keep_or_warn(
    result: Result<Arc<Value>, Arc<ClientError>>,
    source: &str,
) -> Result<Arc<Value>, Arc<ClientError>> {
    if let Err(error) = &result {
        tracing::warn!(source, error = %error, "source fetch failed; continuing without it");
    }
    result
}
