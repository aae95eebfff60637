//! Fetching, caching, and load-cycle orchestration for product cards.
//!
//! [`CardApiClient`] talks to the two upstream APIs, [`DocumentCache`]
//! coalesces and remembers their responses, [`CardLoader`] runs one load
//! cycle with cancellation, and [`CardController`] debounces configuration
//! changes into cycles and publishes render states.

pub mod cache;
pub mod client;
pub mod controller;
pub mod error;
pub mod loader;

pub use cache::DocumentCache;
pub use client::CardApiClient;
pub use controller::{CardController, CardRequest, RenderState};
pub use error::{ClientError, LoadError};
pub use loader::CardLoader;
