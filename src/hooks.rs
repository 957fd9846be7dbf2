//! Pluggable callables: value generation, key normalization and
//! post-processing.
//!
//! Each hook is a cheap, cloneable handle around an `Arc<dyn Fn ..>`. Handles
//! compare by identity through `ptr_eq`, so a getter can be checked against
//! the handle that was passed to the setter.
//!
//! ## Key Components
//!
//! - [`Generator`]: zero-argument source of raw values, expected to return a
//!   number in `[0, 1)`.
//! - [`KeyProcessor`]: `(raw key) -> normalized key`.
//! - [`PostProcessor`]: `(raw value, raw key) -> stored value`.
//!
//! ## Example Usage
//!
//! ```
//! use rerandom::hooks::{Generator, KeyProcessor, PostProcessor};
//! use rerandom::value::Value;
//!
//! let seeded = Generator::seeded(7);
//! let n = seeded.sample().as_f64().unwrap();
//! assert!((0.0..1.0).contains(&n));
//!
//! let stringify = KeyProcessor::stringify();
//! assert_eq!(stringify.apply(&Value::list(["a"])), Value::from("a"));
//!
//! let plus_one = PostProcessor::new(|v, _key| Value::from(v.as_f64().unwrap_or(0.0) + 1.0));
//! assert_eq!(plus_one.apply(Value::from(0.5), &Value::Undefined), Value::from(1.5));
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::value::Value;

type GenerateFn = dyn Fn() -> Value + Send + Sync;
type KeyFn = dyn Fn(&Value) -> Value + Send + Sync;
type PostFn = dyn Fn(Value, &Value) -> Value + Send + Sync;

static PLATFORM: LazyLock<Generator> =
    LazyLock::new(|| Generator::from_fn_f64(rand::random::<f64>));

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Source of raw random values.
///
/// A generator is only accepted by an instance if it returns
/// [`Value::Number`]; see [`Rerandom::set_generator`](crate::Rerandom::set_generator).
#[derive(Clone)]
pub struct Generator(Arc<GenerateFn>);

impl Generator {
    /// Wraps an arbitrary closure. The result type is checked when the
    /// generator is installed, not here.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wraps a closure that already returns `f64`.
    pub fn from_fn_f64<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Self::new(move || Value::Number(f()))
    }

    /// The default source: uniform `f64` in `[0, 1)` from the thread-local
    /// RNG.
    ///
    /// Every call returns a clone of one shared handle.
    ///
    /// ```
    /// use rerandom::hooks::Generator;
    ///
    /// assert!(Generator::platform().ptr_eq(&Generator::platform()));
    /// ```
    pub fn platform() -> Self {
        PLATFORM.clone()
    }

    /// Deterministic uniform source in `[0, 1)` seeded from `seed`.
    ///
    /// Two generators with the same seed yield the same sequence.
    pub fn seeded(seed: u64) -> Self {
        let rng = Mutex::new(StdRng::seed_from_u64(seed));
        Self::from_fn_f64(move || rng.lock().random::<f64>())
    }

    /// Draws one raw value.
    #[inline]
    pub fn sample(&self) -> Value {
        (self.0)()
    }

    /// Returns `true` if both handles wrap the same closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` if this is the [`platform`](Self::platform) source.
    #[inline]
    pub fn is_platform(&self) -> bool {
        self.ptr_eq(&PLATFORM)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::platform()
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("platform", &self.is_platform())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// KeyProcessor
// ---------------------------------------------------------------------------

/// Normalizes a raw key before registry lookup and storage.
#[derive(Clone)]
pub struct KeyProcessor(Arc<KeyFn>);

impl KeyProcessor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Normalizes keys to their string coercion, so composite keys with equal
    /// contents collide.
    pub fn stringify() -> Self {
        Self::new(|key| Value::Str(key.to_string()))
    }

    #[inline]
    pub fn apply(&self, key: &Value) -> Value {
        (self.0)(key)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for KeyProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyProcessor(..)")
    }
}

// ---------------------------------------------------------------------------
// PostProcessor
// ---------------------------------------------------------------------------

/// Transforms a freshly generated value before it is stored.
///
/// Receives the raw generated value and the caller's original key (not the
/// normalized one).
#[derive(Clone)]
pub struct PostProcessor(Arc<PostFn>);

impl PostProcessor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value, &Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, value: Value, raw_key: &Value) -> Value {
        (self.0)(value, raw_key)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PostProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostProcessor(..)")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn platform_is_shared_and_in_unit_range() {
        let a = Generator::platform();
        let b = Generator::default();
        assert!(a.ptr_eq(&b));
        assert!(a.is_platform());
        for _ in 0..1000 {
            let n = a.sample().as_f64().unwrap();
            assert!((0.0..1.0).contains(&n));
        }
    }

    #[test]
    fn seeded_is_deterministic() {
        let a = Generator::seeded(42);
        let b = Generator::seeded(42);
        let xs: Vec<Value> = (0..16).map(|_| a.sample()).collect();
        let ys: Vec<Value> = (0..16).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
        assert!(!a.is_platform());
    }

    #[test]
    fn seeded_differs_across_seeds() {
        let a = Generator::seeded(1);
        let b = Generator::seeded(2);
        let xs: Vec<Value> = (0..8).map(|_| a.sample()).collect();
        let ys: Vec<Value> = (0..8).map(|_| b.sample()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn clones_share_identity() {
        let g = Generator::new(|| Value::from(1));
        assert!(g.ptr_eq(&g.clone()));
        assert!(!g.ptr_eq(&Generator::new(|| Value::from(1))));

        let k = KeyProcessor::stringify();
        assert!(k.ptr_eq(&k.clone()));

        let p = PostProcessor::new(|v, _| v);
        assert!(p.ptr_eq(&p.clone()));
    }

    #[test]
    fn sample_invokes_closure_each_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let g = Generator::new(move || {
            Value::from(counter.fetch_add(1, Ordering::SeqCst) as f64)
        });
        assert_eq!(g.sample(), Value::from(0));
        assert_eq!(g.sample(), Value::from(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stringify_folds_equal_lists() {
        let k = KeyProcessor::stringify();
        assert_eq!(
            k.apply(&Value::list(["a", "b"])),
            k.apply(&Value::list(["a", "b"]))
        );
        assert_eq!(k.apply(&Value::from(1)), Value::from("1"));
    }

    #[test]
    fn post_processor_sees_raw_key() {
        let p = PostProcessor::new(|v, key| {
            Value::from(format!("{}:{}", key, v))
        });
        assert_eq!(
            p.apply(Value::from(0.5), &Value::from("id")),
            Value::from("id:0.5")
        );
    }

    #[test]
    fn debug_is_opaque() {
        assert!(format!("{:?}", Generator::platform()).contains("platform: true"));
        assert_eq!(format!("{:?}", KeyProcessor::stringify()), "KeyProcessor(..)");
        assert_eq!(
            format!("{:?}", PostProcessor::new(|v, _| v)),
            "PostProcessor(..)"
        );
    }
}
