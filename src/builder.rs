//! Builder for configuring an instance in one expression.
//!
//! ## Example
//!
//! ```rust
//! use rerandom::builder::RerandomBuilder;
//! use rerandom::hooks::{KeyProcessor, PostProcessor};
//! use rerandom::value::Value;
//!
//! let mut dice = RerandomBuilder::new()
//!     .seed(2024)
//!     .key(KeyProcessor::stringify())
//!     .post(PostProcessor::new(|v, _| {
//!         Value::from((v.as_f64().unwrap_or(0.0) * 6.0).floor() + 1.0)
//!     }))
//!     .build();
//!
//! let roll = dice.invoke("player-1").as_f64().unwrap();
//! assert!((1.0..=6.0).contains(&roll));
//! assert_eq!(dice.invoke("player-1").as_f64(), Some(roll));
//! ```

use crate::error::InvalidGeneratorError;
use crate::hooks::{Generator, KeyProcessor, PostProcessor};
use crate::instance::{Rerandom, validate_generator};

/// Where a built instance gets its values from.
#[derive(Debug, Clone)]
enum GeneratorSource {
    Custom(Generator),
    /// Materialized per build, so clones of a builder never share a stream.
    Seeded(u64),
}

/// Builder for [`Rerandom`] instances.
///
/// Cloning a builder with a [`seed`](Self::seed) yields builders whose
/// instances replay the same sequence independently.
#[derive(Debug, Clone, Default)]
pub struct RerandomBuilder {
    generator: Option<GeneratorSource>,
    key: Option<KeyProcessor>,
    post: Option<PostProcessor>,
}

impl RerandomBuilder {
    /// Create a builder with the platform generator and no processors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom generator. Validated by [`try_build`](Self::try_build).
    pub fn generator(mut self, generator: Generator) -> Self {
        self.generator = Some(GeneratorSource::Custom(generator));
        self
    }

    /// Use a deterministic generator seeded with `seed`. Each built instance
    /// gets its own RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        self.generator = Some(GeneratorSource::Seeded(seed));
        self
    }

    /// Normalize keys with `key`.
    pub fn key(mut self, key: KeyProcessor) -> Self {
        self.key = Some(key);
        self
    }

    /// Transform generated values with `post`.
    pub fn post(mut self, post: PostProcessor) -> Self {
        self.post = Some(post);
        self
    }

    /// Build the instance.
    ///
    /// # Panics
    ///
    /// Panics if a custom generator does not return a number. For a
    /// non-panicking alternative, use [`try_build`](Self::try_build).
    pub fn build(self) -> Rerandom {
        match self.try_build() {
            Ok(instance) => instance,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the instance, returning an error instead of panicking.
    ///
    /// A custom generator is drawn from once, as with
    /// [`Rerandom::set_generator`]; the platform generator is not.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGeneratorError`] if the custom generator's validation
    /// draw is not a number.
    ///
    /// # Example
    ///
    /// ```
    /// use rerandom::builder::RerandomBuilder;
    /// use rerandom::hooks::Generator;
    /// use rerandom::value::Value;
    ///
    /// let bad = RerandomBuilder::new()
    ///     .generator(Generator::new(|| Value::Null))
    ///     .try_build();
    /// assert!(bad.is_err());
    /// ```
    pub fn try_build(self) -> Result<Rerandom, InvalidGeneratorError> {
        let generator = match self.generator {
            Some(GeneratorSource::Custom(generator)) => {
                validate_generator(&generator)?;
                generator
            },
            Some(GeneratorSource::Seeded(seed)) => {
                let generator = Generator::seeded(seed);
                validate_generator(&generator)?;
                generator
            },
            None => Generator::platform(),
        };
        Ok(Rerandom::from_parts(generator, self.key, self.post))
    }
}
