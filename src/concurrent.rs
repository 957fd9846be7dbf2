//! Thread-safe shared instance.
//!
//! [`ConcurrentRerandom`] wraps a [`Rerandom`] in an `Arc<RwLock<..>>`.
//! Clones share one instance.
//!
//! ## Locking
//!
//! | Operation                               | Lock  |
//! |-----------------------------------------|-------|
//! | `invoke`, `invoke_unkeyed`              | write |
//! | `reset_registry`, setters               | write |
//! | `with_registry_mut`                     | write |
//! | `with_registry`, `contains`, getters    | read  |
//!
//! `invoke` holds the write lock across lookup, generation and storage, so
//! concurrent calls with the same key generate at most once. The
//! generator, key-processor and post-processor run under that lock and must
//! not call back into the same instance.
//!
//! ## Example Usage
//!
//! ```
//! use std::thread;
//!
//! use rerandom::concurrent::ConcurrentRerandom;
//!
//! let shared = ConcurrentRerandom::new();
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let shared = shared.clone();
//!         thread::spawn(move || shared.invoke("session"))
//!     })
//!     .collect();
//! let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
//! assert!(values.windows(2).all(|w| w[0] == w[1]));
//! assert_eq!(shared.registry_len(), 1);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::InvalidGeneratorError;
use crate::hooks::{Generator, KeyProcessor, PostProcessor};
use crate::instance::Rerandom;
#[cfg(feature = "metrics")]
use crate::metrics::RerandomMetrics;
use crate::registry::Registry;
use crate::value::Value;

/// Thread-safe [`Rerandom`] using a `parking_lot::RwLock`.
#[derive(Debug, Clone, Default)]
pub struct ConcurrentRerandom {
    inner: Arc<RwLock<Rerandom>>,
}

impl ConcurrentRerandom {
    /// Creates a shared instance with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value for `key`. See [`Rerandom::invoke`].
    pub fn invoke(&self, key: impl Into<Value>) -> Value {
        self.inner.write().invoke(key)
    }

    /// Draws a fresh, unmemoized value.
    pub fn invoke_unkeyed(&self) -> Value {
        self.inner.write().invoke_unkeyed()
    }

    /// Runs `f` against the live registry under the read lock.
    pub fn with_registry<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(self.inner.read().registry())
    }

    /// Runs `f` against the live registry under the write lock.
    pub fn with_registry_mut<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(self.inner.write().registry_mut())
    }

    /// Returns `true` if the registry holds `key` (already normalized).
    pub fn contains(&self, key: &Value) -> bool {
        self.inner.read().registry().contains(key)
    }

    pub fn registry_len(&self) -> usize {
        self.inner.read().registry().len()
    }

    /// Copies the registry out.
    pub fn registry_snapshot(&self) -> Registry {
        self.inner.read().registry().clone()
    }

    pub fn reset_registry(&self) -> &Self {
        self.inner.write().reset_registry();
        self
    }

    pub fn generator(&self) -> Generator {
        self.inner.read().generator().clone()
    }

    /// Validates and installs a generator. See [`Rerandom::set_generator`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGeneratorError`] if the validation draw is not a
    /// number.
    pub fn set_generator(&self, generator: Generator) -> Result<&Self, InvalidGeneratorError> {
        self.inner.write().set_generator(generator)?;
        Ok(self)
    }

    pub fn key(&self) -> Option<KeyProcessor> {
        self.inner.read().key().cloned()
    }

    pub fn set_key(&self, processor: KeyProcessor) -> &Self {
        self.inner.write().set_key(processor);
        self
    }

    pub fn clear_key(&self) -> &Self {
        self.inner.write().clear_key();
        self
    }

    pub fn post(&self) -> Option<PostProcessor> {
        self.inner.read().post().cloned()
    }

    pub fn set_post(&self, processor: PostProcessor) -> &Self {
        self.inner.write().set_post(processor);
        self
    }

    pub fn clear_post(&self) -> &Self {
        self.inner.write().clear_post();
        self
    }

    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> RerandomMetrics {
        self.inner.read().metrics()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) -> &Self {
        self.inner.write().reset_metrics();
        self
    }

    /// Consumes the wrapper and returns the instance if this is the last
    /// handle.
    pub fn try_into_inner(self) -> Result<Rerandom, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Rerandom> for ConcurrentRerandom {
    fn from(instance: Rerandom) -> Self {
        Self {
            inner: Arc::new(RwLock::new(instance)),
        }
    }
}
