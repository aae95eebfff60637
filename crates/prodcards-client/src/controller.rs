use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use prodcards_core::{
    normalize_locale, parse_identifiers, parse_overrides, OverrideMap, PresentationRecord,
};
use tokio::sync::watch;

use crate::error::LoadError;
use crate::loader::CardLoader;

/// One requested card-grid configuration.
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub ids: Vec<String>,
    pub locale: String,
    pub overrides: OverrideMap,
}

impl CardRequest {
    /// Builds a request from raw attribute strings, the way an embedding
    /// widget supplies them: a comma-separated identifier list, an optional
    /// locale code, and an optional JSON override document.
    #[must_use]
    pub fn from_attributes(ids: &str, locale: Option<&str>, overrides_json: Option<&str>) -> Self {
        Self {
            ids: parse_identifiers(ids),
            locale: normalize_locale(locale),
            overrides: overrides_json.map(parse_overrides).unwrap_or_default(),
        }
    }
}

/// What the rendering layer should currently show.
#[derive(Debug, Clone)]
pub enum RenderState {
    /// A load cycle is in flight; show loading placeholders.
    Loading,
    /// Cards ready for display, in requested order.
    Ready(Vec<PresentationRecord>),
    /// Both sources failed; show a single error state with the diagnostic.
    Failed(String),
}

/// Debounces configuration changes into load cycles and publishes the
/// resulting [`RenderState`] on a watch channel.
///
/// Rapid successive [`submit`](Self::submit) calls (say, the identifier
/// list and the locale changing back to back) coalesce into one cycle: the
/// actual load is deferred to the next scheduling opportunity and picks up
/// whatever request is latest by then. A cycle superseded by a newer
/// submit publishes nothing, so stale results never overwrite fresh ones.
pub struct CardController {
    loader: Arc<CardLoader>,
    pending: Arc<Mutex<Option<CardRequest>>>,
    scheduled: Arc<AtomicBool>,
    state: watch::Sender<RenderState>,
}

impl CardController {
    #[must_use]
    pub fn new(loader: CardLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            pending: Arc::new(Mutex::new(None)),
            scheduled: Arc::new(AtomicBool::new(false)),
            state: watch::channel(RenderState::Loading).0,
        }
    }

    /// Subscribes to render-state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.state.subscribe()
    }

    /// Requests a (re)load for the given configuration.
    ///
    /// Returns immediately. The load itself runs on a spawned task after a
    /// deliberate yield, so several submits in the same scheduling window
    /// trigger a single cycle for the last request.
    pub fn submit(&self, request: CardRequest) {
        *lock(&self.pending) = Some(request);
        if self.scheduled.swap(true, Ordering::SeqCst) {
            return;
        }

        let loader = Arc::clone(&self.loader);
        let pending = Arc::clone(&self.pending);
        let scheduled = Arc::clone(&self.scheduled);
        let state = self.state.clone();
        tokio::spawn(async move {
            // Let any same-tick submits land before reading the request.
            tokio::task::yield_now().await;
            scheduled.store(false, Ordering::SeqCst);
            let Some(request) = lock(&pending).take() else {
                return;
            };

            let _ = state.send(RenderState::Loading);
            match loader
                .load(&request.ids, &request.locale, &request.overrides)
                .await
            {
                Ok(records) => {
                    let _ = state.send(RenderState::Ready(records));
                }
                Err(LoadError::Superseded) => {
                    tracing::debug!("discarding superseded load cycle");
                }
                Err(error) => {
                    tracing::error!(%error, "load cycle failed");
                    let _ = state.send(RenderState::Failed(error.to_string()));
                }
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
