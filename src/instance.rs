//! The memoized randomness instance.
//!
//! ## Architecture
//!
//! ```text
//!   invoke(key)
//!     │
//!     ▼
//!   lookup = key_processor(key) or key
//!     │
//!     ├── key truthy && lookup truthy && registry has lookup
//!     │        └──► return stored value (no generator, no post)
//!     │
//!     └── otherwise
//!              value  = generator()
//!              result = post_processor(value, key) or value
//!              if key truthy && lookup truthy: registry[lookup] = result
//!              return result
//! ```
//!
//! ## Key Components
//!
//! - [`Rerandom`]: one instance; owns its registry and its three hooks.
//!
//! ## Operations
//!
//! | Operation          | Notes                                          |
//! |--------------------|------------------------------------------------|
//! | `invoke`           | Memoized for truthy keys only                  |
//! | `invoke_unkeyed`   | Always generates, never stores                 |
//! | `registry`         | Live table, by reference                       |
//! | `reset_registry`   | Replaces the table with an empty one           |
//! | `set_generator`    | Validates with one draw; may fail              |
//! | `set_key`          | Installs a key-processor, no validation        |
//! | `set_post`         | Installs a post-processor, no validation       |
//!
//! Setters return `&mut Self` and chain.
//!
//! ## Falsy Keys
//!
//! Keys that are falsy (`undefined`, `null`, `false`, `0`, `-0`, `NaN`, `""`),
//! or that a key-processor maps to a falsy value, are never memoized: every
//! such call draws a fresh value and leaves the registry untouched. `0` and
//! `""` are not cacheable keys.
//!
//! ## Example Usage
//!
//! ```
//! use rerandom::hooks::KeyProcessor;
//! use rerandom::value::Value;
//!
//! let mut ids = rerandom::rerandom();
//!
//! let a = ids.invoke("alice");
//! assert_eq!(ids.invoke("alice"), a);
//!
//! // distinct list identities are distinct keys...
//! assert_ne!(ids.invoke(Value::list(["x"])), ids.invoke(Value::list(["x"])));
//!
//! // ...until a key-processor folds them together
//! ids.set_key(KeyProcessor::stringify());
//! assert_eq!(ids.invoke(Value::list(["x"])), ids.invoke(Value::list(["x"])));
//! ```
//!
//! ## Thread Safety
//!
//! `Rerandom` is `Send + Sync` but every mutating operation takes `&mut self`.
//! For a shared instance use `ConcurrentRerandom` (feature `concurrency`).

use tracing::{debug, trace, warn};

use crate::builder::RerandomBuilder;
use crate::error::InvalidGeneratorError;
use crate::hooks::{Generator, KeyProcessor, PostProcessor};
#[cfg(feature = "metrics")]
use crate::metrics::{MetricsCounters, RerandomMetrics};
use crate::registry::Registry;
use crate::value::Value;

/// A stateful source of memoized random values.
///
/// Created by [`rerandom()`](crate::rerandom), [`Rerandom::new`] or
/// [`Rerandom::builder`]. Instances share no state.
///
/// Not `Clone`: a copy would share the generator's stream with the original.
#[derive(Debug, Default)]
pub struct Rerandom {
    registry: Registry,
    generator: Generator,
    key_processor: Option<KeyProcessor>,
    post_processor: Option<PostProcessor>,
    #[cfg(feature = "metrics")]
    metrics: MetricsCounters,
}

impl Rerandom {
    /// Creates an instance with an empty registry, the platform generator and
    /// no processors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a [`RerandomBuilder`].
    pub fn builder() -> RerandomBuilder {
        RerandomBuilder::new()
    }

    pub(crate) fn from_parts(
        generator: Generator,
        key_processor: Option<KeyProcessor>,
        post_processor: Option<PostProcessor>,
    ) -> Self {
        Self {
            generator,
            key_processor,
            post_processor,
            ..Self::default()
        }
    }

    // ---------------------------------------------------------------------
    // Invocation
    // ---------------------------------------------------------------------

    /// Returns the memoized value for `key`, generating and storing one on
    /// first sight.
    ///
    /// The key is normalized with the key-processor, if any. The call is
    /// served from the registry only when both the raw key and the normalized
    /// key are truthy; otherwise a fresh value is generated and nothing is
    /// stored. On a miss the post-processor receives the raw key.
    ///
    /// ```
    /// let mut instance = rerandom::rerandom();
    /// let results: Vec<_> = ["a", "b", "b"].into_iter().map(|k| instance.invoke(k)).collect();
    /// assert_ne!(results[0], results[1]);
    /// assert_eq!(results[1], results[2]);
    /// ```
    pub fn invoke(&mut self, key: impl Into<Value>) -> Value {
        let key = key.into();
        let lookup = match &self.key_processor {
            Some(processor) => processor.apply(&key),
            None => key.clone(),
        };
        let recognized = key.is_truthy() && lookup.is_truthy();

        if recognized && let Some(stored) = self.registry.get(&lookup) {
            trace!(key = %lookup, "rerandom hit");
            #[cfg(feature = "metrics")]
            self.metrics.record_hit();
            return stored.clone();
        }

        let result = self.generate(&key);
        if recognized {
            trace!(key = %lookup, value = %result, "rerandom store");
            #[cfg(feature = "metrics")]
            self.metrics.record_miss();
            self.registry.insert(lookup, result.clone());
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_unkeyed();
        }
        result
    }

    /// Draws a fresh, post-processed value without a key. Never memoized.
    pub fn invoke_unkeyed(&mut self) -> Value {
        self.invoke(Value::Undefined)
    }

    #[inline]
    fn generate(&self, raw_key: &Value) -> Value {
        let value = self.generator.sample();
        match &self.post_processor {
            Some(post) => post.apply(value, raw_key),
            None => value,
        }
    }

    // ---------------------------------------------------------------------
    // Registry
    // ---------------------------------------------------------------------

    /// The live memoization table.
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The live memoization table, mutably. Edits are seen by later calls.
    #[inline]
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Replaces the table with a fresh empty one.
    pub fn reset_registry(&mut self) -> &mut Self {
        debug!(dropped = self.registry.len(), "rerandom registry reset");
        self.registry = Registry::new();
        #[cfg(feature = "metrics")]
        self.metrics.record_reset();
        self
    }

    // ---------------------------------------------------------------------
    // Hooks
    // ---------------------------------------------------------------------

    /// The current generator.
    #[inline]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Installs a custom generator after drawing once from it to check that
    /// it returns a number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGeneratorError`] if the validation draw is not a
    /// [`Value::Number`]. The previous generator stays in effect.
    pub fn set_generator(&mut self, generator: Generator) -> Result<&mut Self, InvalidGeneratorError> {
        if let Err(err) = validate_generator(&generator) {
            #[cfg(feature = "metrics")]
            self.metrics.record_rejected_generator();
            return Err(err);
        }
        debug!(platform = generator.is_platform(), "rerandom generator replaced");
        self.generator = generator;
        Ok(self)
    }

    /// The current key-processor, if any.
    #[inline]
    pub fn key(&self) -> Option<&KeyProcessor> {
        self.key_processor.as_ref()
    }

    /// Installs a key-processor. Existing registry entries are kept as they
    /// are.
    pub fn set_key(&mut self, processor: KeyProcessor) -> &mut Self {
        debug!("rerandom key processor replaced");
        self.key_processor = Some(processor);
        self
    }

    /// Removes the key-processor.
    pub fn clear_key(&mut self) -> &mut Self {
        self.key_processor = None;
        self
    }

    /// The current post-processor, if any.
    #[inline]
    pub fn post(&self) -> Option<&PostProcessor> {
        self.post_processor.as_ref()
    }

    /// Installs a post-processor. Already stored values are not reprocessed.
    pub fn set_post(&mut self, processor: PostProcessor) -> &mut Self {
        debug!("rerandom post processor replaced");
        self.post_processor = Some(processor);
        self
    }

    /// Removes the post-processor.
    pub fn clear_post(&mut self) -> &mut Self {
        self.post_processor = None;
        self
    }

    // ---------------------------------------------------------------------
    // Metrics
    // ---------------------------------------------------------------------

    /// Snapshot of this instance's counters.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> RerandomMetrics {
        self.metrics.snapshot()
    }

    /// Zeroes the counters.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) -> &mut Self {
        self.metrics = MetricsCounters::default();
        self
    }
}

/// Draws once from `generator` and rejects it unless the result is a number.
pub(crate) fn validate_generator(generator: &Generator) -> Result<(), InvalidGeneratorError> {
    let probe = generator.sample();
    if probe.is_number() {
        Ok(())
    } else {
        warn!(returned = probe.type_name(), "rejected custom generator");
        Err(InvalidGeneratorError::new(probe.type_name()))
    }
}
