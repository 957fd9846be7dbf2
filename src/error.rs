//! Error types for the rerandom library.
//!
//! ## Key Components
//!
//! - [`InvalidGeneratorError`]: Returned when a candidate generator does not
//!   produce a number on its validation call.
//!
//! ## Example Usage
//!
//! ```
//! use rerandom::error::InvalidGeneratorError;
//! use rerandom::hooks::Generator;
//! use rerandom::value::Value;
//!
//! let mut instance = rerandom::rerandom();
//! let err: InvalidGeneratorError = instance
//!     .set_generator(Generator::new(|| Value::Bool(true)))
//!     .unwrap_err();
//! assert_eq!(err.returned(), "boolean");
//! assert!(err.to_string().contains("post-processing"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvalidGeneratorError
// ---------------------------------------------------------------------------

/// Error returned when a custom generator does not return a number.
///
/// Produced by [`Rerandom::set_generator`](crate::Rerandom::set_generator)
/// and [`RerandomBuilder::try_build`](crate::builder::RerandomBuilder::try_build).
/// Carries the type name of the value the candidate returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGeneratorError {
    returned: &'static str,
}

impl InvalidGeneratorError {
    /// Creates a new `InvalidGeneratorError` for a generator that returned a
    /// value of the given type.
    #[inline]
    pub fn new(returned: &'static str) -> Self {
        Self { returned }
    }

    /// Returns the type name of the rejected result.
    #[inline]
    pub fn returned(&self) -> &'static str {
        self.returned
    }
}

impl fmt::Display for InvalidGeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "custom random generator must be a function that returns a number (got {}); \
             to convert randomized numbers to contextually useful values, use the \
             post-processing hook",
            self.returned
        )
    }
}

impl std::error::Error for InvalidGeneratorError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
