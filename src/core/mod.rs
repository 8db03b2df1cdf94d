//! Core components of the `signalist` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The [`FinnhubClient`], its builder and the fetch primitive.
//! - The primary [`SignalistError`] type.
//! - The [`Symbol`] value type that owns case normalization.
//! - The per-request [`RequestContext`] and its memo cache.

/// The main client (`FinnhubClient`), builder, and configuration.
pub mod client;
/// Request-scoped identity and memoization.
pub mod context;
/// The primary error type (`SignalistError`) for the crate.
pub mod error;
/// Symbol normalization.
pub mod symbol;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FinnhubClient`
pub use client::{FinnhubClient, FinnhubClientBuilder};
pub use context::{RequestCache, RequestContext, Session, SessionUser};
pub use error::SignalistError;
pub use net::FetchOptions;
pub use symbol::{Symbol, normalize_symbols};
