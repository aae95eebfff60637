use thiserror::Error;

/// Errors from one upstream fetch. Always scoped to a single source API;
/// a failure here never aborts the whole load cycle on its own.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to decode {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },
}

/// Terminal outcome of a load cycle that produced no records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Both source fetches failed; nothing to aggregate from.
    #[error("all sources failed (detail: {detail}; simple: {simple})")]
    AllSourcesFailed { detail: String, simple: String },

    /// A newer load cycle started while this one was in flight. Not a
    /// failure: callers discard it silently and let the newer cycle render.
    #[error("load cycle superseded by a newer request")]
    Superseded,
}
