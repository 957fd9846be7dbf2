//! rerandom: memoized randomness.
//!
//! A [`Rerandom`] instance hands out random values keyed by arbitrary
//! [`Value`](value::Value)s. The first call with a key draws a fresh value;
//! later calls with an equal key return the stored one. Useful wherever a
//! repeated identity should keep a stable random attribute (an ID, a color, a
//! jitter offset).
//!
//! ```
//! let mut instance = rerandom::rerandom();
//!
//! let keys = ["a", "b", "c", "d", "a", "b", "c", "d"];
//! let results: Vec<_> = keys.iter().map(|&k| instance.invoke(k)).collect();
//! for i in 0..4 {
//!     assert_eq!(results[i], results[i + 4]);
//! }
//!
//! // absent keys are never memoized
//! let _ = instance.invoke_unkeyed();
//! assert_eq!(instance.registry().len(), 4);
//! ```
//!
//! Hooks ([`hooks`]) customize key normalization, value generation and
//! post-processing. With the `concurrency` feature (on by default),
//! [`concurrent::ConcurrentRerandom`] shares one instance across threads.
//!
//! With the `metrics` feature (on by default) each instance keeps hit/miss
//! counters, see [`Rerandom::metrics`].
//!
//! Operations log through `tracing`; install a subscriber to see them.

pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod error;
pub mod hooks;
mod instance;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod prelude;
pub mod registry;
pub mod value;

pub use instance::Rerandom;

/// Creates a new, independent instance with the default configuration.
///
/// Equivalent to [`Rerandom::new`].
pub fn rerandom() -> Rerandom {
    Rerandom::new()
}
